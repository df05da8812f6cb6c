use serde::{Deserialize, Serialize, de, ser::SerializeMap};

use crate::errors::UrlboxError;

#[cfg(test)]
#[path = "./options_test.rs"]
mod options_test;

pub(crate) const DEFAULT_FORMAT: &str = "png";

/// A single rendering option value.
///
/// Urlbox options are dynamically typed on the wire; this closed union covers
/// every shape the service accepts. `Null` exists so a caller can explicitly
/// blank out an option, which behaves exactly like never setting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Null,
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<i64> for OptionValue {
    fn from(value: i64) -> Self {
        OptionValue::Int(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<u32> for OptionValue {
    fn from(value: u32) -> Self {
        OptionValue::Int(value.into())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(value: Vec<String>) -> Self {
        OptionValue::List(value)
    }
}

impl From<Vec<&str>> for OptionValue {
    fn from(value: Vec<&str>) -> Self {
        OptionValue::List(value.into_iter().map(|item| item.to_string()).collect())
    }
}

impl From<&[&str]> for OptionValue {
    fn from(value: &[&str]) -> Self {
        OptionValue::List(value.iter().map(|item| item.to_string()).collect())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Null)
    }
}

/// Ordered set of rendering options.
///
/// Keys keep their insertion order, which is also the order they appear in
/// the canonical query string. `set` on an existing key replaces the value
/// without moving the key. Unknown keys pass through to the service
/// untouched; only `format` is treated specially (it becomes a path segment,
/// see [`normalize`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderOptions {
    entries: Vec<(String, OptionValue)>,
}

impl RenderOptions {
    /// Starts an option set with the mandatory target page url.
    pub fn new(url: impl Into<String>) -> Self {
        let mut options = Self::default();
        options.set("url", url.into());
        options
    }

    /// Sets `key`, replacing any existing value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();

        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }

        self
    }

    /// Chainable [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds options from a plain JSON object, keeping the object's key
    /// order as the query order.
    ///
    /// Array elements that are not JSON strings are carried as their JSON
    /// text, as are nested objects; neither is interpreted here.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, UrlboxError> {
        let map = value.as_object().ok_or(UrlboxError::MissingOptions)?;

        let mut options = Self::default();
        for (key, value) in map {
            options.entries.push((key.clone(), json_value(value)));
        }

        Ok(options)
    }
}

fn json_value(value: &serde_json::Value) -> OptionValue {
    use serde_json::Value;

    match value {
        Value::Null => OptionValue::Null,
        Value::Bool(b) => OptionValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => OptionValue::Int(i),
            None => OptionValue::Float(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => OptionValue::Str(s.clone()),
        Value::Array(items) => OptionValue::List(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        Value::Object(_) => OptionValue::Str(value.to_string()),
    }
}

impl Serialize for RenderOptions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RenderOptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OptionsVisitor;

        impl<'de> de::Visitor<'de> for OptionsVisitor {
            type Value = RenderOptions;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of rendering options")
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut options = RenderOptions::default();
                while let Some((key, value)) = access.next_entry::<String, OptionValue>()? {
                    options.set(key, value);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

/// Builds a [`RenderOptions`] from `key => value` pairs.
///
/// ```
/// let options = urlbox::options! {
///     "url" => "bbc.co.uk",
///     "width" => 1024,
///     "full_page" => true,
/// };
/// assert_eq!(options.len(), 3);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $key:expr => $val:expr ),* $(,)? ) => {{
        let mut options = $crate::RenderOptions::default();
        $( options.set($key, $val); )*
        options
    }};
}

/// The working copy the encoder and assembler run on: `format` pulled out
/// into its own field, semantically-absent entries already dropped.
#[derive(Debug)]
pub(crate) struct NormalizedOptions {
    pub(crate) entries: Vec<(String, OptionValue)>,
    pub(crate) format: String,
}

/// Validates the option set and produces its working copy.
///
/// An entry is semantically absent when its value is null or `false` and is
/// dropped entirely. `0` and the empty string are meaningful values and
/// stay. List entries pass through whole for the encoder to expand. The
/// caller's map is never touched.
pub(crate) fn normalize(options: Option<&RenderOptions>) -> Result<NormalizedOptions, UrlboxError> {
    let options = options.ok_or(UrlboxError::MissingOptions)?;

    match options.get("url") {
        None | Some(OptionValue::Null) => return Err(UrlboxError::MissingUrl),
        Some(OptionValue::Str(_)) => {}
        Some(_) => return Err(UrlboxError::InvalidUrlType),
    }

    let mut format = None;
    let mut entries = Vec::with_capacity(options.entries.len());

    for (key, value) in &options.entries {
        if key == "format" {
            format = format_segment(value);
            continue;
        }

        match value {
            OptionValue::Null | OptionValue::Bool(false) => {}
            kept => entries.push((key.clone(), kept.clone())),
        }
    }

    Ok(NormalizedOptions {
        entries,
        format: format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
    })
}

// A falsy format falls back to the default, so `format: ""` still renders
// as png.
fn format_segment(value: &OptionValue) -> Option<String> {
    match value {
        OptionValue::Str(s) if !s.is_empty() => Some(s.clone()),
        OptionValue::Int(n) if *n != 0 => Some(n.to_string()),
        OptionValue::Float(n) if *n != 0.0 => Some(n.to_string()),
        _ => None,
    }
}
