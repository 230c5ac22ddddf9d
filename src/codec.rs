//! The JSON boundary: turning text into values and values back into text.
//!
//! The engine only ever sees `serde_json::Value`s. Everything textual goes
//! through a [`JsonCodec`], which holds no state beyond its configuration.
use crate::config::{JsonConfig, OutputStyle};
use crate::error::JjqError;
use serde_json::{Deserializer, Value};
use std::borrow::Cow;

pub trait JsonCodec {
    /// Parses exactly one JSON document.
    fn parse(&self, text: &str) -> Result<Value, JjqError>;

    /// Parses a sequence of whitespace-separated JSON documents.
    fn parse_stream(&self, text: &str) -> Result<Vec<Value>, JjqError>;

    fn render(&self, value: &Value) -> Result<String, JjqError>;
}

/// A [`JsonCodec`] backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonCodec {
    config: JsonConfig,
}

impl SerdeJsonCodec {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.config.single_quotes && text.contains('\'') {
            Cow::Owned(text.replace('\'', "\""))
        } else {
            Cow::Borrowed(text)
        }
    }
}

impl JsonCodec for SerdeJsonCodec {
    fn parse(&self, text: &str) -> Result<Value, JjqError> {
        Ok(serde_json::from_str(&self.prepare(text))?)
    }

    fn parse_stream(&self, text: &str) -> Result<Vec<Value>, JjqError> {
        let text = self.prepare(text);
        let values = Deserializer::from_str(&text)
            .into_iter::<Value>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    fn render(&self, value: &Value) -> Result<String, JjqError> {
        let rendered = match self.config.output {
            OutputStyle::Compact => serde_json::to_string(value)?,
            OutputStyle::Pretty => serde_json::to_string_pretty(value)?,
        };
        Ok(rendered)
    }
}
