use super::{StringOrSlice, flexible, from_value};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Retry policy of a job: a bare integer is shorthand for `{ max: n }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Retry {
    pub max: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<StringOrSlice>,
}

#[derive(Deserialize)]
struct RetryFields {
    #[serde(default)]
    max: u32,
    #[serde(default)]
    when: Option<StringOrSlice>,
}

flexible! {
    Retry as "retry policy" {
        "integer" => |raw: &Value| {
            raw.as_u64()
                .and_then(|max| u32::try_from(max).ok())
                .map(|max| Retry { max, when: None })
        },
        "mapping" => |raw: &Value| {
            if !raw.is_mapping() {
                return None;
            }
            from_value::<RetryFields>(raw).map(|f| Retry { max: f.max, when: f.when })
        },
    }
}

