use crate::flexible::{StringOrSlice, decode, flexible, from_value};
use serde::Deserialize;
use serde_yaml::Value;

/// Trigger conditions of a pipeline or step, one include/exclude pair per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Conditions {
    pub action: Condition,
    pub branch: Condition,
    pub cron: Condition,
    pub event: Condition,
    pub instance: Condition,
    pub paths: Condition,
    #[serde(rename = "ref")]
    pub reference: Condition,
    pub repo: Condition,
    pub status: Condition,
    pub target: Condition,
}

/// Include and exclude patterns for a single condition dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Condition {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Condition {
    pub fn include(patterns: &[&str]) -> Self {
        Self {
            include: patterns.iter().map(|p| p.to_string()).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn exclude(patterns: &[&str]) -> Self {
        Self {
            include: Vec::new(),
            exclude: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

#[derive(Deserialize)]
struct ConditionFields {
    #[serde(default)]
    include: StringOrSlice,
    #[serde(default)]
    exclude: StringOrSlice,
}

flexible! {
    Condition as "condition" {
        "null" => |raw: &Value| raw.is_null().then(Condition::default),
        "string or sequence" => |raw: &Value| {
            decode::<StringOrSlice>(raw).ok().map(|include| Condition {
                include: include.into_vec(),
                exclude: Vec::new(),
            })
        },
        "include/exclude mapping" => |raw: &Value| {
            if !raw.is_mapping() {
                return None;
            }
            from_value::<ConditionFields>(raw).map(|f| Condition {
                include: f.include.into_vec(),
                exclude: f.exclude.into_vec(),
            })
        },
    }
}
