use super::{Resources, When, is_false};
use crate::flexible::scalar_string;
use serde::Serialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub name: String,
    #[serde(flatten)]
    pub spec: StepSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
}

impl Step {
    /// The wire type tag of the step.
    pub fn kind(&self) -> &'static str {
        match self.spec {
            StepSpec::Plugin(_) => "plugin",
            StepSpec::Background(_) => "background",
            StepSpec::Script(_) => "script",
        }
    }
}

/// Step type tag and its matching spec. Background and script steps share a spec shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "spec", rename_all = "lowercase")]
pub enum StepSpec {
    Plugin(StepPlugin),
    Background(StepExec),
    Script(StepExec),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepPlugin {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "is_false")]
    pub privileged: bool,
    #[serde(skip_serializing_if = "Pull::is_unspecified")]
    pub pull: Pull,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub with: BTreeMap<String, SettingValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StepExec {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "is_false")]
    pub privileged: bool,
    #[serde(skip_serializing_if = "Pull::is_unspecified")]
    pub pull: Pull,
    #[serde(skip_serializing_if = "Shell::is_unspecified")]
    pub shell: Shell,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub entrypoint: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub run: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Pull {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "always")]
    Always,
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "if-not-exists")]
    IfNotExists,
}

impl Pull {
    pub fn is_unspecified(&self) -> bool {
        *self == Pull::Unspecified
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Shell {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "bash")]
    Bash,
    #[serde(rename = "sh")]
    Sh,
    #[serde(rename = "powershell")]
    Powershell,
}

impl Shell {
    pub fn is_unspecified(&self) -> bool {
        *self == Shell::Unspecified
    }
}

/// A plugin setting value. Secret references have already been rendered as
/// placeholder strings by the time a value lands here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Number(serde_yaml::Number),
    Bool(bool),
    List(Vec<SettingValue>),
    Map(BTreeMap<String, SettingValue>),
}

impl SettingValue {
    /// Converts a raw value. Nulls yield `None` and are dropped from nested
    /// lists and maps; tagged values are rejected.
    pub fn from_yaml(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null | Value::Tagged(_) => None,
            Value::String(s) => Some(SettingValue::String(s.clone())),
            Value::Number(n) => Some(SettingValue::Number(n.clone())),
            Value::Bool(b) => Some(SettingValue::Bool(*b)),
            Value::Sequence(items) => Some(SettingValue::List(
                items.iter().filter_map(SettingValue::from_yaml).collect(),
            )),
            Value::Mapping(map) => {
                let mut entries = BTreeMap::new();
                for (key, value) in map {
                    let key = scalar_string(key)?;
                    if let Some(value) = SettingValue::from_yaml(value) {
                        entries.insert(key, value);
                    }
                }
                Some(SettingValue::Map(entries))
            }
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::String(value.to_string())
    }
}
