use super::{Conditions, Resources, Step, Variable};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// Runtime type that selects the container-orchestrated canonical runtime.
pub const KUBERNETES: &str = "kubernetes";

/// A `kind: pipeline` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Pipeline {
    pub name: String,
    #[serde(rename = "type")]
    pub pipeline_type: String,
    pub clone: CloneSettings,
    pub environment: BTreeMap<String, Variable>,
    pub image_pull_secrets: Vec<String>,
    pub metadata: Metadata,
    pub node: BTreeMap<String, String>,
    pub node_selector: BTreeMap<String, String>,
    pub node_name: String,
    pub platform: Platform,
    pub resources: Resources,
    pub service_account_name: String,
    pub services: Vec<Step>,
    pub steps: Vec<Step>,
    pub trigger: Conditions,

    // Recognized, not mapped.
    pub concurrency: Option<Value>,
    pub depends_on: Option<Value>,
    pub volumes: Option<Value>,
    pub workspace: Option<Value>,
    pub tolerations: Option<Value>,
    pub dns_config: Option<Value>,
    pub host_aliases: Option<Value>,
}

impl Pipeline {
    pub fn is_kubernetes(&self) -> bool {
        self.pipeline_type == KUBERNETES
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CloneSettings {
    pub depth: u64,
    pub disable: bool,
    pub skip_verify: bool,
    pub trace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub namespace: String,
    pub annotations: BTreeMap<String, String>,
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Platform {
    pub os: String,
    pub arch: String,
    pub variant: String,
    pub version: String,
}

/// A `kind: secret` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Secret {
    pub name: String,
    pub get: Option<SecretSource>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SecretSource {
    pub path: String,
    pub name: String,
}

/// A `kind: signature` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub hmac: String,
}
