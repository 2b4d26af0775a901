//! The stages/steps dialect: a multi-document YAML stream where each document
//! declares its `kind`.

mod condition;
mod pipeline;
mod step;
mod variable;

pub use condition::*;
pub use pipeline::*;
pub use step::*;
pub use variable::*;

use crate::error::ConvertError;
use crate::flexible::shape_of;
use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

pub const KIND_PIPELINE: &str = "pipeline";
pub const KIND_SECRET: &str = "secret";
pub const KIND_SIGNATURE: &str = "signature";

/// One parsed document of the stream, tagged by its `kind`.
#[derive(Debug, Clone)]
pub enum Document {
    Pipeline(Box<Pipeline>),
    Secret(Secret),
    Signature(Signature),
}

impl Document {
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Pipeline(_) => KIND_PIPELINE,
            Document::Secret(_) => KIND_SECRET,
            Document::Signature(_) => KIND_SIGNATURE,
        }
    }
}

/// Parses every document of the stream. Empty documents are skipped; any failure
/// fails the whole parse.
pub fn parse(input: &[u8]) -> Result<Vec<Document>, ConvertError> {
    let mut documents = Vec::new();
    for (index, deserializer) in serde_yaml::Deserializer::from_slice(input).enumerate() {
        let raw = Value::deserialize(deserializer).map_err(|e| ConvertError::Syntax(e.to_string()))?;
        if raw.is_null() {
            continue;
        }
        let document = parse_document(index, raw)?;
        debug!(document = index, kind = document.kind(), "parsed legacy document");
        documents.push(document);
    }
    Ok(documents)
}

fn parse_document(index: usize, raw: Value) -> Result<Document, ConvertError> {
    let kind = match &raw {
        Value::Mapping(map) => map
            .get("kind")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ConvertError::structural(index, "missing `kind` discriminator"))?,
        other => {
            return Err(ConvertError::structural(
                index,
                format!("expected a mapping, found a {}", shape_of(other)),
            ));
        }
    };

    match kind.as_str() {
        KIND_PIPELINE => serde_yaml::from_value(raw)
            .map(|p| Document::Pipeline(Box::new(p)))
            .map_err(|e| ConvertError::decode(index, e)),
        KIND_SECRET => serde_yaml::from_value(raw)
            .map(Document::Secret)
            .map_err(|e| ConvertError::decode(index, e)),
        KIND_SIGNATURE => serde_yaml::from_value(raw)
            .map(Document::Signature)
            .map_err(|e| ConvertError::decode(index, e)),
        other => Err(ConvertError::structural(
            index,
            format!("unknown kind `{other}`"),
        )),
    }
}
