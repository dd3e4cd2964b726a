use serde_derive::Deserialize;

use crate::models::IntentDefinition;

/// Probability a decoded tag must strictly exceed to be considered as a slot
pub const DEFAULT_MIN_SLOT_PROBABILITY: f32 = 0.2;

#[derive(Debug, Clone, Deserialize)]
pub struct SlotFillerModel {
    pub intents: Vec<IntentDefinition>,
    #[serde(default)]
    pub config: SlotFillerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlotFillerConfig {
    pub min_slot_probability: f32,
}

impl Default for SlotFillerConfig {
    fn default() -> Self {
        Self {
            min_slot_probability: DEFAULT_MIN_SLOT_PROBABILITY,
        }
    }
}
