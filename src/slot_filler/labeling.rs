use itertools::Itertools;

use crate::models::IntentDefinition;
use crate::ontology::{Sequence, Token};
use crate::slot_filler::tagging::{Label, SlotBinding};
use crate::utterance::Utterance;

/// Labels of a slot occurrence spanning `slot_size` tokens
pub fn positive_labels(slot_name: &str, binding: SlotBinding, slot_size: usize) -> Vec<Label> {
    (0..slot_size)
        .map(|i| {
            if i == 0 {
                Label::Beginning(slot_name.to_string(), binding)
            } else {
                Label::Inside(slot_name.to_string(), binding)
            }
        })
        .collect()
}

/// Computes the label of each token
///
/// Consecutive tokens tagged with the same slot name form a single slot
/// occurrence. An occurrence is entity bound as soon as one of its tokens
/// matched an entity.
pub fn labelize_tokens(tokens: &[Token]) -> Vec<String> {
    let mut labels = Vec::with_capacity(tokens.len());
    for (slot_name, occurrence) in &tokens.iter().group_by(|token| token.slot.as_ref()) {
        let occurrence = occurrence.collect_vec();
        match slot_name {
            None => labels.extend(occurrence.iter().map(|_| Label::Outside)),
            Some(slot_name) => {
                let entity_bound = occurrence.iter().any(|token| token.is_entity_bound());
                let binding = SlotBinding::from_entity_bound(entity_bound);
                labels.extend(positive_labels(slot_name, binding, occurrence.len()));
            }
        }
    }
    labels.into_iter().map(|label| label.to_string()).collect()
}

pub fn labelize_sequence(sequence: &Sequence) -> Vec<String> {
    labelize_tokens(&sequence.tokens)
}

pub fn labelize_utterance(utterance: &Utterance) -> Vec<String> {
    labelize_tokens(utterance.tokens())
}

/// All the labels a sequence tagger can emit for the given intent
pub fn intent_labels(intent: &IntentDefinition) -> Vec<String> {
    let slot_labels = intent.slots.iter().flat_map(|slot| {
        vec![
            Label::Beginning(slot.name.clone(), SlotBinding::Entity),
            Label::Beginning(slot.name.clone(), SlotBinding::Any),
            Label::Inside(slot.name.clone(), SlotBinding::Entity),
            Label::Inside(slot.name.clone(), SlotBinding::Any),
        ]
    });
    Some(Label::Outside)
        .into_iter()
        .chain(slot_labels)
        .map(|label| label.to_string())
        .collect()
}
