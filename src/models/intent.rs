use serde_derive::Deserialize;

use crate::utils::{EntityName, IntentName, SlotName};

/// Entity name used in slot definitions to accept free text values
pub const ANY_ENTITY: &str = "any";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IntentDefinition {
    pub name: IntentName,
    #[serde(default)]
    pub slots: Vec<SlotDefinition>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlotDefinition {
    pub name: SlotName,
    #[serde(default)]
    pub entities: Vec<EntityName>,
}

impl IntentDefinition {
    pub fn slot(&self, slot_name: &str) -> Option<&SlotDefinition> {
        self.slots.iter().find(|slot| slot.name == slot_name)
    }

    pub fn has_slot(&self, slot_name: &str) -> bool {
        self.slot(slot_name).is_some()
    }
}

impl SlotDefinition {
    /// Whether an entity extracted from the input can fill this slot
    pub fn accepts_entity(&self, entity_name: &str) -> bool {
        entity_name != ANY_ENTITY && self.entities.iter().any(|e| e == entity_name)
    }
}
