//! The jobs dialect: a single document of named jobs grouped into ordered stages.

use crate::error::ConvertError;
use crate::flexible::{Retry, StringOrSlice, decode, flexible, from_value, scalar_string, shape_of};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Stages used when the document does not declare its own.
pub const DEFAULT_STAGES: [&str; 3] = ["build", "test", "deploy"];
/// Stage of a job that does not name one.
pub const DEFAULT_JOB_STAGE: &str = "test";

/// Top-level keys that are document settings rather than jobs.
pub const RESERVED_KEYS: [&str; 11] = [
    "stages",
    "types",
    "variables",
    "image",
    "services",
    "before_script",
    "after_script",
    "default",
    "include",
    "workflow",
    "cache",
];

/// A parsed jobs-dialect document. Jobs keep document order.
#[derive(Debug, Clone, Default)]
pub struct GitlabDocument {
    pub settings: GlobalSettings,
    pub jobs: Vec<(String, Job)>,
}

impl GitlabDocument {
    /// Declared stages, or the dialect defaults.
    pub fn stages(&self) -> Vec<String> {
        if self.settings.stages.is_empty() {
            DEFAULT_STAGES.iter().map(|s| s.to_string()).collect()
        } else {
            self.settings.stages.clone()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    #[serde(alias = "types")]
    pub stages: Vec<String>,
    pub variables: BTreeMap<String, Variable>,
    pub image: Option<Image>,
    pub services: Option<Vec<Service>>,
    pub before_script: Option<StringOrSlice>,
    pub after_script: Option<StringOrSlice>,
    pub default: Defaults,

    // Recognized, not mapped.
    pub include: Option<Value>,
    pub workflow: Option<Value>,
    pub cache: Option<Value>,
}

/// Values inherited by every job that does not set its own.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub image: Option<Image>,
    pub services: Option<Vec<Service>>,
    pub before_script: Option<StringOrSlice>,
    pub after_script: Option<StringOrSlice>,
    pub retry: Option<Retry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Job {
    pub stage: Option<String>,
    pub image: Option<Image>,
    pub services: Option<Vec<Service>>,
    pub before_script: Option<StringOrSlice>,
    pub script: StringOrSlice,
    pub after_script: Option<StringOrSlice>,
    pub variables: BTreeMap<String, Variable>,
    pub retry: Option<Retry>,
    pub only: Option<Refs>,
    pub except: Option<Refs>,

    // Recognized, not mapped.
    pub artifacts: Option<Value>,
    pub cache: Option<Value>,
    pub needs: Option<Value>,
    pub rules: Option<Value>,
    pub extends: Option<Value>,
    pub tags: Option<Value>,
    pub allow_failure: Option<Value>,
    pub timeout: Option<Value>,
    pub when: Option<Value>,
}

/// A job variable; the object form carries the value plus a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variable(pub String);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub entrypoint: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub alias: Option<String>,
    pub entrypoint: Vec<String>,
    pub command: Vec<String>,
}

impl Service {
    /// Step name of the service: its alias, else the image name without tag.
    pub fn step_name(&self) -> String {
        if let Some(alias) = &self.alias {
            return alias.clone();
        }
        let image = self.name.rsplit('/').next().unwrap_or(&self.name);
        image.split(':').next().unwrap_or(image).to_string()
    }
}

/// Ref patterns of `only` / `except`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refs(pub Vec<String>);

#[derive(Deserialize)]
struct VariableFields {
    value: Value,
}

#[derive(Deserialize)]
struct ImageFields {
    name: String,
    #[serde(default)]
    entrypoint: Vec<String>,
}

#[derive(Deserialize)]
struct ServiceFields {
    name: String,
    #[serde(default)]
    alias: Option<String>,
    #[serde(default)]
    entrypoint: Vec<String>,
    #[serde(default)]
    command: Vec<String>,
}

#[derive(Deserialize)]
struct RefsFields {
    #[serde(default)]
    refs: StringOrSlice,
}

flexible! {
    Variable as "variable" {
        "scalar" => |raw: &Value| scalar_string(raw).map(Variable),
        "value mapping" => |raw: &Value| {
            from_value::<VariableFields>(raw)
                .and_then(|f| scalar_string(&f.value))
                .map(Variable)
        },
    }

    Image as "image" {
        "string" => |raw: &Value| {
            raw.as_str().map(|name| Image { name: name.to_string(), entrypoint: Vec::new() })
        },
        "mapping" => |raw: &Value| {
            from_value::<ImageFields>(raw).map(|f| Image { name: f.name, entrypoint: f.entrypoint })
        },
    }

    Service as "service" {
        "string" => |raw: &Value| {
            raw.as_str().map(|name| Service { name: name.to_string(), ..Service::default() })
        },
        "mapping" => |raw: &Value| {
            from_value::<ServiceFields>(raw).map(|f| Service {
                name: f.name,
                alias: f.alias,
                entrypoint: f.entrypoint,
                command: f.command,
            })
        },
    }

    Refs as "refs" {
        "string or sequence" => |raw: &Value| decode::<StringOrSlice>(raw).ok().map(|r| Refs(r.into_vec())),
        "refs mapping" => |raw: &Value| {
            if !raw.is_mapping() {
                return None;
            }
            from_value::<RefsFields>(raw).map(|f| Refs(f.refs.into_vec()))
        },
    }
}

/// Parses a jobs-dialect document. Only the first non-empty document of the
/// stream is read.
pub fn parse(input: &[u8]) -> Result<GitlabDocument, ConvertError> {
    let mut raw = Value::Null;
    for deserializer in serde_yaml::Deserializer::from_slice(input) {
        raw = Value::deserialize(deserializer).map_err(|e| ConvertError::Syntax(e.to_string()))?;
        if !raw.is_null() {
            break;
        }
    }

    let map = match &raw {
        Value::Mapping(map) => map,
        Value::Null => return Ok(GitlabDocument::default()),
        other => {
            return Err(ConvertError::structural(
                0,
                format!("expected a mapping, found a {}", shape_of(other)),
            ));
        }
    };

    let mut jobs = Vec::new();
    for (key, value) in map {
        let Some(name) = key.as_str() else {
            return Err(ConvertError::structural(0, "job names must be strings"));
        };
        if RESERVED_KEYS.contains(&name) || name.starts_with('.') {
            continue;
        }
        if !value.is_mapping() {
            debug!(key = name, shape = shape_of(value), "skipping non-job key");
            continue;
        }
        let job = Job::deserialize(value).map_err(|e| ConvertError::Decode {
            document: 0,
            message: format!("job `{name}`: {e}"),
        })?;
        debug!(job = name, "parsed legacy job");
        jobs.push((name.to_string(), job));
    }

    let settings = GlobalSettings::deserialize(&raw).map_err(|e| ConvertError::decode(0, e))?;
    Ok(GitlabDocument { settings, jobs })
}
