use std::collections::HashMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use failure::ResultExt;
use log::{debug, info, warn};

use crate::errors::*;
use crate::models::{IntentDefinition, SlotFillerConfig, SlotFillerModel};
use crate::ontology::{EntityMatch, Slot, Token};
use crate::slot_filler::tagging::{decode_tags, TagResult};
use crate::slot_filler::{SlotFiller, TokenTagger};
use crate::slot_utils::*;
use crate::utils::IntentName;

/// Slot filler decoding BIO labels into slots
///
/// Each token is decoded independently, then tokens are folded from left to
/// right: the slot of the current span grows or gets replaced until a token
/// starts another slot or is outside of any slot.
pub struct BioSlotFiller {
    intents: HashMap<IntentName, IntentDefinition>,
    config: SlotFillerConfig,
    tagger: Box<dyn TokenTagger>,
}

/// Slots of an utterance, as accumulated while walking through its tokens
#[derive(Debug, Default)]
struct SlotsAccumulator {
    slots: Vec<Slot>,
    current_slot: Option<Slot>,
}

impl SlotsAccumulator {
    fn close_current_slot(mut self) -> Self {
        if let Some(slot) = self.current_slot.take() {
            self.slots.push(slot);
        }
        self
    }

    fn into_slots(self) -> Vec<Slot> {
        self.close_current_slot().slots
    }
}

impl BioSlotFiller {
    pub fn new(model: SlotFillerModel, tagger: Box<dyn TokenTagger>) -> Self {
        let intents = HashMap::from_iter(
            model
                .intents
                .into_iter()
                .map(|intent| (intent.name.clone(), intent)),
        );
        Self {
            intents,
            config: model.config,
            tagger,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, tagger: Box<dyn TokenTagger>) -> Result<Self> {
        let slot_filler_model_path = path.as_ref().join("slot_filler.json");
        info!("Loading slot filler ({:?}) ...", slot_filler_model_path);
        let model_file = fs::File::open(&slot_filler_model_path).with_context(|_| {
            SnipsNluError::ModelLoad(slot_filler_model_path.to_string_lossy().to_string())
        })?;
        let model: SlotFillerModel = serde_json::from_reader(model_file)
            .with_context(|_| "Cannot deserialize BioSlotFiller json data")?;
        info!("Slot filler loaded");
        Ok(Self::new(model, tagger))
    }

    pub fn config(&self) -> SlotFillerConfig {
        self.config
    }

    pub fn intent(&self, intent: &str) -> Option<&IntentDefinition> {
        self.intents.get(intent)
    }

    fn accumulate(
        &self,
        accumulator: SlotsAccumulator,
        token: &Token,
        tag: Option<TagResult>,
        intent: &IntentDefinition,
        entities: &[EntityMatch],
    ) -> SlotsAccumulator {
        let is_valid = is_tag_a_valid_slot_with_threshold(
            Some(token),
            tag.as_ref(),
            intent,
            self.config.min_slot_probability,
        );
        let (tag, slot_definition) = match tag {
            Some(tag) if is_valid => match tag.slot_name().and_then(|name| intent.slot(name)) {
                Some(slot_definition) => (tag, slot_definition),
                None => return accumulator.close_current_slot(),
            },
            Some(tag) => {
                debug!("Tag {:?} of token '{}' rejected", tag, token.value);
                return accumulator.close_current_slot();
            }
            None => return accumulator.close_current_slot(),
        };

        let continues_current_slot = accumulator
            .current_slot
            .as_ref()
            .map(|slot| slot.slot_name == slot_definition.name)
            .unwrap_or(false);
        let mut accumulator = if continues_current_slot {
            accumulator
        } else {
            accumulator.close_current_slot()
        };
        let new_slot = make_slot(token, &tag, slot_definition, entities);
        let existing_slot = accumulator.current_slot.take();
        accumulator.current_slot = Some(combine_slots(existing_slot, token, &tag, new_slot));
        accumulator
    }
}

impl SlotFiller for BioSlotFiller {
    fn get_slots(
        &self,
        intent: &str,
        tokens: &[Token],
        entities: &[EntityMatch],
    ) -> Result<Vec<Slot>> {
        let intent = self
            .intents
            .get(intent)
            .ok_or_else(|| SnipsNluError::UnknownIntent(intent.to_string()))?;
        if intent.slots.is_empty() || tokens.is_empty() {
            return Ok(vec![]);
        }

        let distributions = self.tagger.tag_probabilities(&intent.name, tokens)?;
        if distributions.len() != tokens.len() {
            return Err(SnipsNluError::TokenCountMismatch {
                tokens: tokens.len(),
                distributions: distributions.len(),
            }
            .into());
        }

        let slots = tokens
            .iter()
            .zip(decode_tags(&distributions))
            .fold(SlotsAccumulator::default(), |accumulator, (token, tag)| {
                let tag = tag
                    .map_err(|e| {
                        warn!(
                            "Cannot decode tag of token '{}', considered outside: {}",
                            token.value, e
                        )
                    })
                    .ok();
                self.accumulate(accumulator, token, tag, intent, entities)
            })
            .into_slots();
        debug!("{} slot(s) found for intent '{}'", slots.len(), intent.name);
        Ok(slots)
    }
}
