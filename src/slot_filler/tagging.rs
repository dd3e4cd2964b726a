use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::errors::*;
use crate::utils::SlotName;

pub const OUTSIDE: &str = "o";
pub const BEGINNING_PREFIX: &str = "B-";
pub const INSIDE_PREFIX: &str = "I-";
pub const ANY_SUFFIX: &str = "/any";

/// Probability of each label for a single token, in the order the tagger
/// produced them
pub type LabelProbabilities = Vec<(String, f32)>;

/// Whether a slot occurrence was also recognized as an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotBinding {
    Entity,
    Any,
}

impl SlotBinding {
    pub fn from_entity_bound(entity_bound: bool) -> Self {
        if entity_bound {
            SlotBinding::Entity
        } else {
            SlotBinding::Any
        }
    }
}

/// Label of a single token, as emitted by the sequence tagger
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Outside,
    Beginning(SlotName, SlotBinding),
    Inside(SlotName, SlotBinding),
}

impl Label {
    pub fn slot_name(&self) -> Option<&str> {
        match self {
            Label::Outside => None,
            Label::Beginning(name, _) | Label::Inside(name, _) => Some(name),
        }
    }

    pub fn binding(&self) -> Option<SlotBinding> {
        match self {
            Label::Outside => None,
            Label::Beginning(_, binding) | Label::Inside(_, binding) => Some(*binding),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (prefix, name, binding) = match self {
            Label::Outside => return write!(f, "{}", OUTSIDE),
            Label::Beginning(name, binding) => (BEGINNING_PREFIX, name, binding),
            Label::Inside(name, binding) => (INSIDE_PREFIX, name, binding),
        };
        let suffix = match binding {
            SlotBinding::Entity => "",
            SlotBinding::Any => ANY_SUFFIX,
        };
        write!(f, "{}{}{}", prefix, name, suffix)
    }
}

impl FromStr for Label {
    type Err = failure::Error;

    fn from_str(label: &str) -> Result<Self> {
        if label == OUTSIDE {
            return Ok(Label::Outside);
        }
        let (is_beginning, qualified_name) = if label.starts_with(BEGINNING_PREFIX) {
            (true, &label[BEGINNING_PREFIX.len()..])
        } else if label.starts_with(INSIDE_PREFIX) {
            (false, &label[INSIDE_PREFIX.len()..])
        } else {
            return Err(SnipsNluError::InvalidLabel(label.to_string()).into());
        };
        let (name, binding) = if qualified_name.ends_with(ANY_SUFFIX) {
            (
                &qualified_name[..qualified_name.len() - ANY_SUFFIX.len()],
                SlotBinding::Any,
            )
        } else {
            (qualified_name, SlotBinding::Entity)
        };
        if name.is_empty() {
            return Err(SnipsNluError::InvalidLabel(label.to_string()).into());
        }
        Ok(if is_beginning {
            Label::Beginning(name.to_string(), binding)
        } else {
            Label::Inside(name.to_string(), binding)
        })
    }
}

/// Decoded tag of a token, regardless of the entity binding of its label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    Outside,
    Beginning(SlotName),
    Inside(SlotName),
}

impl From<Label> for Tag {
    fn from(label: Label) -> Self {
        match label {
            Label::Outside => Tag::Outside,
            Label::Beginning(name, _) => Tag::Beginning(name),
            Label::Inside(name, _) => Tag::Inside(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagResult {
    pub tag: Tag,
    pub probability: f32,
}

impl TagResult {
    pub fn slot_name(&self) -> Option<&str> {
        match &self.tag {
            Tag::Outside => None,
            Tag::Beginning(name) | Tag::Inside(name) => Some(name),
        }
    }
}

/// Returns the tag of the most probable label
///
/// Probabilities are compared as they are: they don't need to sum to one, and
/// the `/any` and entity variants of a same slot label are never aggregated.
/// When several labels share the highest probability, the first one wins.
pub fn decode_tag<I, K, P>(label_probabilities: I) -> Result<TagResult>
where
    I: IntoIterator<Item = (K, P)>,
    K: AsRef<str>,
    P: Borrow<f32>,
{
    let mut best: Option<(Label, f32)> = None;
    for (label, probability) in label_probabilities {
        let label = label.as_ref();
        let probability = *probability.borrow();
        if probability.is_nan() || probability < 0.0 || probability > 1.0 {
            return Err(
                SnipsNluError::InvalidProbability(label.to_string(), probability).into(),
            );
        }
        let parsed_label = label.parse::<Label>()?;
        let is_better = best
            .as_ref()
            .map(|(_, best_probability)| probability > *best_probability)
            .unwrap_or(true);
        if is_better {
            best = Some((parsed_label, probability));
        }
    }
    let (label, probability) = best.ok_or(SnipsNluError::EmptyLabelProbabilities)?;
    Ok(TagResult {
        tag: label.into(),
        probability,
    })
}

/// Decodes the tags of a sequence of tokens, each token independently
pub fn decode_tags<'a>(
    distributions: &'a [LabelProbabilities],
) -> impl Iterator<Item = Result<TagResult>> + 'a {
    distributions
        .iter()
        .map(|distribution| decode_tag(distribution.iter().map(|(l, p)| (l, p))))
}
