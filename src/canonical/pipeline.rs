use super::{Credentials, Resources, Step, When, is_false, is_zero};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pipeline {
    pub stages: Vec<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stage {
    pub name: String,
    #[serde(flatten)]
    pub spec: StageSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub when: Option<When>,
}

/// Stage type tag and its matching spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "spec", rename_all = "lowercase")]
pub enum StageSpec {
    Ci(StageCi),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StageCi {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clone: Option<ClonePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate: Option<Delegate>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub envs: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub runtime: Runtime,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClonePolicy {
    #[serde(skip_serializing_if = "is_zero")]
    pub depth: u64,
    #[serde(skip_serializing_if = "is_false")]
    pub disabled: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub insecure: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub trace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Delegate {
    pub selectors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    #[default]
    Linux,
    Windows,
    Darwin,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    #[default]
    Amd64,
    Arm64,
}

/// Runtime type tag and its matching spec.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "spec", rename_all = "lowercase")]
pub enum Runtime {
    Kubernetes(RuntimeKube),
    Machine(RuntimeMachine),
}

impl Default for Runtime {
    fn default() -> Self {
        Runtime::Machine(RuntimeMachine {})
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuntimeKube {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub node: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service_account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}

/// A bare machine runtime has no spec fields; it serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuntimeMachine {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    pub credentials: Vec<Credentials>,
}
