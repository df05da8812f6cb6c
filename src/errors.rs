use std::error::Error;
use std::fmt::{Debug, Display};

use derive_builder::UninitializedFieldError;

/// Everything that can go wrong while constructing a render URL.
///
/// All variants are raised before any part of the URL is produced; the
/// query encoder and the token signer cannot fail. None of these are
/// recoverable internally, the caller has to fix its input and retry.
#[derive(Clone, PartialEq, Eq)]
pub enum UrlboxError {
    /// `build_url` was called without an options object.
    MissingOptions,
    /// An options object was supplied but carried no usable `url` entry.
    MissingUrl,
    /// The `url` entry exists but is not a string.
    InvalidUrlType,
    /// The client was constructed without an API key.
    Configuration(String),
}

impl Error for UrlboxError {}

impl Display for UrlboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlboxError::MissingOptions => write!(f, "no options object passed"),
            UrlboxError::MissingUrl => write!(f, "no url option passed"),
            UrlboxError::InvalidUrlType => write!(
                f,
                "url should be of type string (something like www.google.com)"
            ),
            UrlboxError::Configuration(message) => write!(f, "{}", message),
        }
    }
}

impl Debug for UrlboxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl From<UninitializedFieldError> for UrlboxError {
    fn from(err: UninitializedFieldError) -> Self {
        UrlboxError::Configuration(format!("{} must be set", err.field_name()))
    }
}
