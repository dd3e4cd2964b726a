use failure::Fail;

#[derive(Debug, Fail)]
pub enum SnipsNluError {
    #[fail(display = "Unable to read file '{}'", _0)]
    ModelLoad(String),
    #[fail(display = "Unknown intent: '{}'", _0)]
    UnknownIntent(String),
    #[fail(display = "Cannot decode a tag from an empty label distribution")]
    EmptyLabelProbabilities,
    #[fail(display = "Invalid label: '{}'", _0)]
    InvalidLabel(String),
    #[fail(display = "Invalid probability {} for label '{}'", _1, _0)]
    InvalidProbability(String, f32),
    #[fail(
        display = "Expected one label distribution per token ({}) but found {}",
        tokens, distributions
    )]
    TokenCountMismatch { tokens: usize, distributions: usize },
}

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;
