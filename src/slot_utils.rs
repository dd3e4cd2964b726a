use log::debug;

use crate::models::{IntentDefinition, SlotDefinition, DEFAULT_MIN_SLOT_PROBABILITY};
use crate::ontology::{EntityMatch, Slot, SlotEntity, SlotValue, Token};
use crate::slot_filler::tagging::{Tag, TagResult};
use crate::utils::ranges_overlap;

/// Checks that a decoded tag can be trusted as a slot of the given intent
pub fn is_tag_a_valid_slot(
    token: Option<&Token>,
    tag: Option<&TagResult>,
    intent: &IntentDefinition,
) -> bool {
    is_tag_a_valid_slot_with_threshold(token, tag, intent, DEFAULT_MIN_SLOT_PROBABILITY)
}

/// Same as `is_tag_a_valid_slot`, the tag probability having to be strictly
/// greater than `min_slot_probability`
pub fn is_tag_a_valid_slot_with_threshold(
    token: Option<&Token>,
    tag: Option<&TagResult>,
    intent: &IntentDefinition,
    min_slot_probability: f32,
) -> bool {
    let tag = match (token, tag) {
        (Some(_), Some(tag)) => tag,
        _ => return false,
    };
    let slot_name = match tag.slot_name() {
        Some(slot_name) => slot_name,
        None => return false,
    };
    tag.probability > min_slot_probability && intent.has_slot(slot_name)
}

/// Builds the slot corresponding to a single token
///
/// The slot is bound to the first entity overlapping the token which can fill
/// the slot, and holds the token surface text otherwise.
pub fn make_slot(
    token: &Token,
    tag: &TagResult,
    slot_definition: &SlotDefinition,
    entities: &[EntityMatch],
) -> Slot {
    let matching_entity = entities.iter().find(|entity| {
        ranges_overlap(&entity.char_range, &token.char_range)
            && slot_definition.accepts_entity(&entity.entity_name)
    });
    match matching_entity {
        Some(entity) => Slot {
            slot_name: slot_definition.name.clone(),
            source: entity.source.clone(),
            value: SlotValue::Entity(entity.value.clone()),
            entity: Some(SlotEntity {
                entity_type: entity.entity_name.clone(),
                meta: entity.meta.clone(),
                data: entity.data.clone(),
            }),
            confidence: Some(tag.probability),
        },
        None => {
            let source = token.surface().to_string();
            Slot {
                slot_name: slot_definition.name.clone(),
                value: SlotValue::Custom(source.clone()),
                source,
                entity: None,
                confidence: Some(tag.probability),
            }
        }
    }
}

/// Combines the slot accumulated so far with the slot built from the current token
///
/// An `Inside` tag extends a free text slot with a free text token, keeping the
/// whitespace found before the token. Slots bound to an entity are never
/// extended, and a free text slot is not replaced by an entity found on an
/// `Inside` token.
/// A `Beginning` tag is a competing occurrence of the slot: it replaces the
/// existing slot only when its confidence is strictly higher.
pub fn combine_slots(
    existing_slot: Option<Slot>,
    token: &Token,
    tag: &TagResult,
    new_slot: Slot,
) -> Slot {
    let existing_slot = match existing_slot {
        Some(existing_slot) => existing_slot,
        None => return new_slot,
    };
    match tag.tag {
        Tag::Inside(_) if !existing_slot.is_entity_bound() && !new_slot.is_entity_bound() => {
            let source = format!(
                "{}{}{}",
                existing_slot.source,
                token.leading_space(),
                new_slot.source
            );
            Slot {
                value: SlotValue::Custom(source.clone()),
                source,
                ..existing_slot
            }
        }
        // TODO: decide whether an entity found on an `Inside` token should take
        // over a free text slot, the existing slot is kept for now
        Tag::Inside(_) => existing_slot,
        Tag::Beginning(_) => match (new_slot.confidence, existing_slot.confidence) {
            (Some(new_confidence), Some(existing_confidence))
                if new_confidence > existing_confidence =>
            {
                debug!(
                    "Slot '{}' replaced by '{}' ({} > {})",
                    existing_slot.source, new_slot.source, new_confidence, existing_confidence
                );
                new_slot
            }
            _ => existing_slot,
        },
        Tag::Outside => existing_slot,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::utils::SPACE;

    fn a_token() -> Token {
        Token::new(format!("{}LeGrand", SPACE), 8..15)
    }

    fn a_tag(tag: Tag) -> TagResult {
        TagResult {
            tag,
            probability: 0.5,
        }
    }

    fn free_slot(source: &str, confidence: Option<f32>) -> Slot {
        Slot {
            slot_name: "name".to_string(),
            source: source.to_string(),
            value: SlotValue::Custom(source.to_string()),
            entity: None,
            confidence,
        }
    }

    fn time_slot(source: &str) -> Slot {
        Slot {
            slot_name: "time".to_string(),
            source: source.to_string(),
            value: SlotValue::Entity(json!(7_200_000)),
            entity: Some(SlotEntity {
                entity_type: "time".to_string(),
                meta: json!({}),
                data: json!({}),
            }),
            confidence: None,
        }
    }

    fn coffee_intent() -> IntentDefinition {
        IntentDefinition {
            name: "brew coffee".to_string(),
            slots: vec![SlotDefinition {
                name: "coffee-type".to_string(),
                entities: vec!["any".to_string()],
            }],
        }
    }

    #[test]
    fn test_is_tag_a_valid_slot() {
        // Given
        let token = Token::new("a token", 0..7);
        let outside_tag = TagResult {
            tag: Tag::Outside,
            probability: 0.5,
        };
        let slot_tag = TagResult {
            tag: Tag::Beginning("coffee-type".to_string()),
            probability: 0.5,
        };
        let low_slot_tag = TagResult {
            probability: 0.1,
            ..slot_tag.clone()
        };
        let unknown_slot_tag = TagResult {
            tag: Tag::Inside("milk".to_string()),
            probability: 0.9,
        };
        let intent = coffee_intent();

        // Then
        assert!(!is_tag_a_valid_slot(None, Some(&slot_tag), &intent));
        assert!(!is_tag_a_valid_slot(Some(&token), None, &intent));
        assert!(!is_tag_a_valid_slot(Some(&token), Some(&outside_tag), &intent));
        assert!(!is_tag_a_valid_slot(Some(&token), Some(&low_slot_tag), &intent));
        assert!(!is_tag_a_valid_slot(Some(&token), Some(&unknown_slot_tag), &intent));
        assert!(is_tag_a_valid_slot(Some(&token), Some(&slot_tag), &intent));
    }

    #[test]
    fn test_is_tag_a_valid_slot_threshold_is_strict() {
        // Given
        let token = Token::new("latte", 0..5);
        let tag = |probability| TagResult {
            tag: Tag::Inside("coffee-type".to_string()),
            probability,
        };
        let intent = coffee_intent();

        // Then
        assert!(!is_tag_a_valid_slot(Some(&token), Some(&tag(0.2)), &intent));
        assert!(is_tag_a_valid_slot(Some(&token), Some(&tag(0.21)), &intent));
        assert!(!is_tag_a_valid_slot_with_threshold(
            Some(&token),
            Some(&tag(0.4)),
            &intent,
            0.4
        ));
        assert!(is_tag_a_valid_slot_with_threshold(
            Some(&token),
            Some(&tag(0.1)),
            &intent,
            0.05
        ));
    }

    #[test]
    fn test_make_free_text_slot() {
        // Given
        let token = a_token();
        let slot_definition = SlotDefinition {
            name: "name".to_string(),
            entities: vec!["any".to_string()],
        };
        let entities = vec![EntityMatch {
            entity_name: "time".to_string(),
            source: "LeGrand".to_string(),
            char_range: 8..15,
            value: json!(0),
            meta: json!({}),
            data: json!({}),
        }];

        // When
        let tag = a_tag(Tag::Beginning("name".to_string()));
        let slot = make_slot(&token, &tag, &slot_definition, &entities);

        // Then
        assert_eq!(free_slot("LeGrand", Some(0.5)), slot);
    }

    #[test]
    fn test_make_entity_slot() {
        // Given
        let token = Token::new(format!("{}hours", SPACE), 6..12);
        let slot_definition = SlotDefinition {
            name: "time".to_string(),
            entities: vec!["time".to_string()],
        };
        let entities = vec![
            EntityMatch {
                entity_name: "number".to_string(),
                source: "2".to_string(),
                char_range: 4..5,
                value: json!(2),
                meta: json!({}),
                data: json!({}),
            },
            EntityMatch {
                entity_name: "time".to_string(),
                source: "2 hours".to_string(),
                char_range: 4..12,
                value: json!(7_200_000),
                meta: json!({}),
                data: json!({}),
            },
        ];

        // When
        let tag = a_tag(Tag::Inside("time".to_string()));
        let slot = make_slot(&token, &tag, &slot_definition, &entities);

        // Then
        let expected_slot = Slot {
            confidence: Some(0.5),
            ..time_slot("2 hours")
        };
        assert_eq!(expected_slot, slot);
    }

    #[test]
    fn test_combine_without_existing_slot() {
        // Given
        let token = a_token();
        let new_slot = free_slot("antoine", None);

        // When
        let tag = a_tag(Tag::Beginning("name".to_string()));
        let beginning = combine_slots(None, &token, &tag, new_slot.clone());
        let tag = a_tag(Tag::Inside("name".to_string()));
        let inside = combine_slots(None, &token, &tag, new_slot.clone());

        // Then
        assert_eq!(new_slot, beginning);
        assert_eq!(new_slot, inside);
    }

    #[test]
    fn test_combine_any_slot_with_inside_any_slot() {
        // Given
        let token = a_token();
        let existing = free_slot("antoine", Some(0.7));
        let new_slot = free_slot("LeGrand", Some(0.4));

        // When
        let tag = a_tag(Tag::Inside("name".to_string()));
        let combined = combine_slots(Some(existing), &token, &tag, new_slot);

        // Then
        assert_eq!("antoine LeGrand", combined.source);
        assert_eq!(SlotValue::Custom("antoine LeGrand".to_string()), combined.value);
        assert_eq!(Some(0.7), combined.confidence);
        assert_eq!(None, combined.entity);
    }

    #[test]
    fn test_combine_keeps_adjacent_tokens_glued() {
        // Given
        let token = Token::new("-Thony", 3..9);
        let existing = free_slot("Han", None);
        let new_slot = free_slot("-Thony", None);

        // When
        let tag = a_tag(Tag::Inside("name".to_string()));
        let combined = combine_slots(Some(existing), &token, &tag, new_slot);

        // Then
        assert_eq!("Han-Thony", combined.source);
    }

    #[test]
    fn test_combine_entity_slot_with_inside_any_slot() {
        // Given
        let token = a_token();
        let existing = time_slot("2 hours");
        let new_slot = free_slot("LeGrand", None);

        // When
        let tag = a_tag(Tag::Inside("name".to_string()));
        let combined = combine_slots(Some(existing.clone()), &token, &tag, new_slot);

        // Then
        assert_eq!(existing, combined);
    }

    #[test]
    fn test_combine_any_slot_with_inside_entity_slot() {
        // Given
        let token = a_token();
        let existing = free_slot("2", None);
        let new_slot = time_slot("2 hours");

        // When
        let tag = a_tag(Tag::Inside("time".to_string()));
        let combined = combine_slots(Some(existing.clone()), &token, &tag, new_slot);

        // Then
        assert_eq!(existing, combined);
    }

    #[test]
    fn test_combine_entity_slot_with_inside_entity_slot() {
        // Given
        let token = a_token();
        let existing = time_slot("2");
        let new_slot = time_slot("2 hours");

        // When
        let tag = a_tag(Tag::Inside("time".to_string()));
        let combined = combine_slots(Some(existing.clone()), &token, &tag, new_slot);

        // Then
        assert_eq!(existing, combined);
    }

    #[test]
    fn test_combine_existing_slot_with_beginning_slot() {
        // Given
        let token = a_token();
        let tag = a_tag(Tag::Beginning("name".to_string()));
        let existing = free_slot("Han-Thony", Some(0.2));
        let new_slot = free_slot("Justin Trudeau", Some(0.1));

        // When
        let lower = combine_slots(Some(existing.clone()), &token, &tag, new_slot.clone());
        let higher = combine_slots(
            Some(existing.clone()),
            &token,
            &tag,
            Slot {
                confidence: Some(0.9),
                ..new_slot.clone()
            },
        );
        let equal = combine_slots(
            Some(existing.clone()),
            &token,
            &tag,
            Slot {
                confidence: existing.confidence,
                ..new_slot.clone()
            },
        );

        // Then
        assert_eq!(existing, lower);
        assert_eq!("Justin Trudeau", higher.source);
        assert_eq!(SlotValue::Custom("Justin Trudeau".to_string()), higher.value);
        assert_eq!(existing, equal);
    }

    #[test]
    fn test_combine_beginning_slot_without_confidence_keeps_existing() {
        // Given
        let token = a_token();
        let tag = a_tag(Tag::Beginning("time".to_string()));
        let existing = time_slot("2 hours");
        let new_slot = free_slot("LeGrand", Some(0.9));

        // When
        let combined = combine_slots(Some(existing.clone()), &token, &tag, new_slot);

        // Then
        assert_eq!(existing, combined);
    }
}
