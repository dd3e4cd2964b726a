pub mod bio_slot_filler;
pub mod labeling;
pub mod tagging;

pub use self::bio_slot_filler::BioSlotFiller;
use self::tagging::LabelProbabilities;
use crate::errors::*;
use crate::ontology::{EntityMatch, Slot, Token};

/// Sequence labeling model, producing a label distribution for each token
pub trait TokenTagger: Send + Sync {
    fn tag_probabilities(&self, intent: &str, tokens: &[Token])
        -> Result<Vec<LabelProbabilities>>;
}

pub trait SlotFiller: Send + Sync {
    fn get_slots(
        &self,
        intent: &str,
        tokens: &[Token],
        entities: &[EntityMatch],
    ) -> Result<Vec<Slot>>;
}
