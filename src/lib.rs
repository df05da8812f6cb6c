pub(crate) mod builder;
pub(crate) mod errors;
pub(crate) mod options;
pub(crate) mod query;
pub(crate) mod token;

pub use builder::{Urlbox, UrlboxOpts, UrlboxOptsBuilder};
pub use errors::UrlboxError;
pub use options::{OptionValue, RenderOptions};
