//! Rendered payloads

use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

/// Output of a presentation helper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "body", rename_all = "lowercase")]
pub enum Rendered {
    Markdown(String),
    Html(String),
}

impl Rendered {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Rendered::Markdown(_) => "text/markdown",
            Rendered::Html(_) => "text/html",
        }
    }

    pub fn body(&self) -> &str {
        match self {
            Rendered::Markdown(body) | Rendered::Html(body) => body,
        }
    }

    /// Jupyter display-data bundle: `{ "<mime>": "<body>" }`
    pub fn to_mime_bundle(&self) -> Value {
        let mut bundle = serde_json::Map::new();
        bundle.insert(self.mime_type().to_string(), json!(self.body()));
        Value::Object(bundle)
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.body())
    }
}
