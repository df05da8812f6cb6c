use derive_builder::Builder;

use crate::{
    errors::UrlboxError,
    options::{self, RenderOptions},
    query, token,
};

#[cfg(test)]
#[path = "./builder_test.rs"]
mod builder_test;

pub(crate) const BASE_URL: &str = "https://api.urlbox.io/v1";

/// Immutable client configuration, fixed at construction time.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::check_api_key", error = "crate::errors::UrlboxError"))]
pub struct UrlboxOpts {
    /// Account API key. Becomes the first path segment of every render URL.
    #[builder(setter(into))]
    pub(crate) api_key: String,

    /// Shared signing secret. When unset, no token segment is generated.
    #[builder(setter(into, strip_option), default = None)]
    pub(crate) secret: Option<String>,

    /// Override the Urlbox API endpoint. Useful for region specific
    /// deployments or a proxy in front of the service.
    ///
    /// If unset, this will default to `https://api.urlbox.io/v1`
    #[builder(setter(into), default = BASE_URL.to_string())]
    pub(crate) host: String,
}

impl UrlboxOptsBuilder {
    fn check_api_key(&self) -> Result<(), UrlboxError> {
        if self.api_key.as_deref() == Some("") {
            return Err(UrlboxError::Configuration("an api key is required".into()));
        }

        Ok(())
    }
}

impl UrlboxOpts {
    pub fn client(self) -> Urlbox {
        Urlbox { opts: self }
    }
}

/// Stateless render-URL builder for the Urlbox screenshot API.
///
/// Every [`build_url`](Self::build_url) call is an independent pure
/// computation over the captured configuration, so a single instance can be
/// shared freely across threads.
#[derive(Debug, Clone)]
pub struct Urlbox {
    opts: UrlboxOpts,
}

impl Urlbox {
    /// Creates a client without a signing secret; render URLs carry no
    /// token segment.
    pub fn new(api_key: impl Into<String>) -> Result<Self, UrlboxError> {
        let opts = UrlboxOptsBuilder::default().api_key(api_key).build()?;
        Ok(opts.client())
    }

    /// Creates a signing client. An empty secret behaves as if no secret
    /// was configured at all.
    pub fn with_secret(
        api_key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, UrlboxError> {
        let secret = secret.into();

        let mut builder = UrlboxOptsBuilder::default();
        builder.api_key(api_key);
        if !secret.is_empty() {
            builder.secret(secret);
        }

        Ok(builder.build()?.client())
    }

    /// Builds the full render URL:
    /// `{host}/{api_key}/[{token}/]{format}?{query}`.
    ///
    /// The token segment is present exactly when a secret was configured.
    pub fn build_url(&self, options: Option<&RenderOptions>) -> Result<String, UrlboxError> {
        let normalized = options::normalize(options)?;
        let query = query::construct_query(&normalized.entries);

        let guessed_length = self.opts.host.len() + self.opts.api_key.len() + query.len() + 64;
        let mut url = String::with_capacity(guessed_length);

        url.push_str(&self.opts.host);
        url.push('/');
        url.push_str(&self.opts.api_key);
        url.push('/');

        if let Some(secret) = self.opts.secret.as_deref() {
            url.push_str(&token::sign(secret, &query));
            url.push('/');
        }

        url.push_str(&normalized.format);

        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        Ok(url)
    }

    /// [`build_url`](Self::build_url) over a plain JSON object, keeping the
    /// object's key order as the query order.
    pub fn build_url_json(&self, options: &serde_json::Value) -> Result<String, UrlboxError> {
        let options = RenderOptions::from_json(options)?;
        self.build_url(Some(&options))
    }
}
