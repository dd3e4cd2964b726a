use std::ops::Range;

use serde_derive::Serialize;
use serde_json::Value;

use crate::utils::{split_leading_space, EntityName, IntentName, SlotName};

/// A token of an utterance
///
/// `value` is the raw surface form and starts with a space marker (or a
/// whitespace) when the token was preceded by a space in the original input.
/// `slot` and `matched_entities` are only filled for annotated training data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Token {
    pub canonical: String,
    pub value: String,
    pub char_range: Range<usize>,
    pub slot: Option<SlotName>,
    pub matched_entities: Vec<EntityName>,
}

impl Token {
    pub fn new<S: Into<String>>(value: S, char_range: Range<usize>) -> Self {
        let value = value.into();
        let canonical = split_leading_space(&value).1.to_lowercase();
        Self {
            canonical,
            value,
            char_range,
            slot: None,
            matched_entities: vec![],
        }
    }

    /// Raw surface form without its leading space
    pub fn surface(&self) -> &str {
        split_leading_space(&self.value).1
    }

    /// Whitespace preceding the token, space markers converted to actual spaces
    pub fn leading_space(&self) -> String {
        split_leading_space(&self.value).0
    }

    pub fn is_entity_bound(&self) -> bool {
        !self.matched_entities.is_empty()
    }
}

/// An utterance whose tokens already carry their slot annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub canonical: String,
    pub intent: IntentName,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SlotValue {
    /// Free text value, always identical to the slot source
    Custom(String),
    /// Value resolved by the entity recognition
    Entity(Value),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotEntity {
    pub entity_type: EntityName,
    pub meta: Value,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    pub slot_name: SlotName,
    pub source: String,
    pub value: SlotValue,
    pub entity: Option<SlotEntity>,
    pub confidence: Option<f32>,
}

impl Slot {
    pub fn is_entity_bound(&self) -> bool {
        self.entity.is_some()
    }
}

/// Entity recognized in the input by the entity extraction, prior to slot filling
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMatch {
    pub entity_name: EntityName,
    pub source: String,
    pub char_range: Range<usize>,
    pub value: Value,
    pub meta: Value,
    pub data: Value,
}
