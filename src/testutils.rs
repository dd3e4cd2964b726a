use std::collections::HashMap;
use std::iter::FromIterator;

use failure::format_err;
use itertools::Itertools;

use crate::errors::*;
use crate::ontology::Token;
use crate::slot_filler::tagging::LabelProbabilities;
use crate::slot_filler::TokenTagger;

pub fn label_probabilities(probabilities: &[(&str, f32)]) -> LabelProbabilities {
    probabilities
        .iter()
        .map(|(label, probability)| (label.to_string(), *probability))
        .collect()
}

/// Splits a text on whitespaces, keeping the whitespaces as tokens
pub fn split_keeping_spaces(text: &str) -> Vec<String> {
    let groups = text.chars().group_by(|c| c.is_whitespace());
    groups
        .into_iter()
        .map(|(_, chars)| chars.collect::<String>())
        .collect()
}

pub fn annotated_token(value: &str, slot: Option<&str>, matched_entities: &[&str]) -> Token {
    Token {
        slot: slot.map(|s| s.to_string()),
        matched_entities: matched_entities.iter().map(|e| e.to_string()).collect(),
        ..Token::new(value, 0..value.chars().count())
    }
}

/// Token tagger returning predefined distributions, indexed by the text of the tokens
#[derive(Default)]
pub struct MockedTokenTagger {
    pub mocked_outputs: HashMap<String, Vec<LabelProbabilities>>,
}

impl TokenTagger for MockedTokenTagger {
    fn tag_probabilities(
        &self,
        _intent: &str,
        tokens: &[Token],
    ) -> Result<Vec<LabelProbabilities>> {
        let text = tokens
            .iter()
            .map(|token| format!("{}{}", token.leading_space(), token.surface()))
            .join("");
        self.mocked_outputs
            .get(&text)
            .cloned()
            .ok_or_else(|| format_err!("No mocked output for '{}'", text))
    }
}

impl FromIterator<(String, Vec<LabelProbabilities>)> for MockedTokenTagger {
    fn from_iter<T: IntoIterator<Item = (String, Vec<LabelProbabilities>)>>(iter: T) -> Self {
        Self {
            mocked_outputs: HashMap::from_iter(iter),
        }
    }
}
