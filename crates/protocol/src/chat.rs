//! Chat components.

use serde::Deserialize;

use crate::{
    codec::{Decode, Encode, Reader},
    error::{CodecError, Result},
};

/// A chat message as sent by the server: a JSON text component.
///
/// The raw JSON is kept as-is; [`ChatMessage::plain_text`] flattens it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatMessage {
    pub json: String,
}

impl ChatMessage {
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }

    /// Builds a message holding plain text.
    pub fn text(text: &str) -> Self {
        let json = serde_json::json!({ "text": text }).to_string();
        Self { json }
    }

    /// Parses the JSON component.
    pub fn component(&self) -> Result<Component> {
        serde_json::from_str(&self.json).map_err(CodecError::InvalidChat)
    }

    /// Flattens the message into plain text, dropping styling.
    ///
    /// Translated components are rendered as their key followed by
    /// their arguments. If the JSON cannot be parsed, the raw JSON
    /// is returned.
    pub fn plain_text(&self) -> String {
        match self.component() {
            Ok(component) => {
                let mut out = String::new();
                component.write_plain(&mut out);
                out
            }
            Err(_) => self.json.clone(),
        }
    }
}

impl std::fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.plain_text())
    }
}

impl Decode for ChatMessage {
    fn decode(reader: &mut Reader) -> Result<Self> {
        reader.read().map(|json| ChatMessage { json })
    }
}

impl Encode for ChatMessage {
    fn encode(&self, out: &mut Vec<u8>) {
        self.json.encode(out);
    }
}

/// A text component. Only the fields relevant to plain-text
/// rendering are kept.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Component {
    Plain(String),
    List(Vec<Component>),
    Object {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        translate: Option<String>,
        #[serde(default)]
        with: Vec<Component>,
        #[serde(default)]
        extra: Vec<Component>,
    },
}

impl Component {
    fn write_plain(&self, out: &mut String) {
        match self {
            Component::Plain(s) => out.push_str(s),
            Component::List(parts) => parts.iter().for_each(|p| p.write_plain(out)),
            Component::Object {
                text,
                translate,
                with,
                extra,
            } => {
                if let Some(text) = text {
                    out.push_str(text);
                }
                if let Some(key) = translate {
                    out.push_str(key);
                    for (i, arg) in with.iter().enumerate() {
                        out.push_str(if i == 0 { " " } else { ", " });
                        arg.write_plain(out);
                    }
                }
                extra.iter().for_each(|e| e.write_plain(out));
            }
        }
    }
}
