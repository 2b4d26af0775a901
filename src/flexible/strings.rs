use super::{flexible, from_value};
use serde::Serialize;
use serde_yaml::Value;

/// A field written either as a single string or as a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringOrSlice(pub Vec<String>);

impl StringOrSlice {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for StringOrSlice {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

flexible! {
    StringOrSlice as "string or sequence" {
        "string" => |raw: &Value| raw.as_str().map(|s| StringOrSlice(vec![s.to_string()])),
        "sequence of strings" => |raw: &Value| from_value::<Vec<String>>(raw).map(StringOrSlice),
    }
}
