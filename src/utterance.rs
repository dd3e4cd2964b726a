use std::ops::Range;

use itertools::Itertools;

use crate::ontology::Token;
use crate::utils::ranges_overlap;

/// Utterance built from raw tokens, onto which slots and entities are overlaid
/// afterwards using character ranges
///
/// Whitespace tokens are kept as regular tokens, so that character offsets
/// match the original text.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    tokens: Vec<Token>,
}

impl Utterance {
    pub fn new<I, S>(raw_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut offset = 0;
        let tokens = raw_tokens
            .into_iter()
            .map(|raw_token| {
                let value = raw_token.into();
                let start = offset;
                offset += value.chars().count();
                Token::new(value, start..offset)
            })
            .collect();
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn text(&self) -> String {
        self.tokens.iter().map(|token| &*token.value).join("")
    }

    /// Tags all the tokens overlapping `char_range` with `slot_name`
    pub fn tag_slot(&mut self, slot_name: &str, char_range: Range<usize>) {
        self.tokens
            .iter_mut()
            .filter(|token| ranges_overlap(&token.char_range, &char_range))
            .for_each(|token| token.slot = Some(slot_name.to_string()));
    }

    /// Records `entity_name` as matched on all the tokens overlapping `char_range`
    pub fn tag_entity(&mut self, entity_name: &str, char_range: Range<usize>) {
        self.tokens
            .iter_mut()
            .filter(|token| ranges_overlap(&token.char_range, &char_range))
            .for_each(|token| token.matched_entities.push(entity_name.to_string()));
    }
}
