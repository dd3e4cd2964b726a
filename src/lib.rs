pub mod errors;
pub mod models;
pub mod ontology;
pub mod slot_filler;
mod slot_utils;
#[cfg(test)]
mod testutils;
mod utils;
mod utterance;

pub use crate::errors::*;
pub use crate::models::*;
pub use crate::ontology::*;
pub use crate::slot_filler::labeling::{
    intent_labels, labelize_sequence, labelize_tokens, labelize_utterance,
};
pub use crate::slot_filler::tagging::{
    decode_tag, decode_tags, Label, LabelProbabilities, SlotBinding, Tag, TagResult,
};
pub use crate::slot_filler::{BioSlotFiller, SlotFiller, TokenTagger};
pub use crate::slot_utils::{
    combine_slots, is_tag_a_valid_slot, is_tag_a_valid_slot_with_threshold, make_slot,
};
pub use crate::utils::{EntityName, IntentName, SlotName, SPACE};
pub use crate::utterance::Utterance;
