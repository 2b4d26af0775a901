use super::{Conditions, Parameter, Variable};
use crate::flexible::{BytesSize, Quantity};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;

/// A step or service container. Whether it becomes a script, background or plugin
/// step is decided at mapping time; the model itself carries no role.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Step {
    pub name: String,
    pub image: String,
    pub commands: Vec<String>,
    pub command: Vec<String>,
    pub entrypoint: Vec<String>,
    pub detach: bool,
    pub environment: BTreeMap<String, Variable>,
    pub settings: BTreeMap<String, Parameter>,
    pub resources: Resources,
    pub pull: String,
    pub shell: String,
    pub user: String,
    pub privileged: bool,
    pub when: Conditions,

    // Recognized, not mapped.
    pub depends_on: Option<Value>,
    pub failure: Option<Value>,
    pub network_mode: Option<Value>,
    pub volumes: Option<Value>,
    pub working_dir: Option<Value>,
    pub dns: Option<Value>,
    pub dns_search: Option<Value>,
    pub extra_hosts: Option<Value>,
}

/// Resource requests and limits of a container or pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub limits: ResourceObject,
    pub requests: ResourceObject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResourceObject {
    pub cpu: Quantity,
    pub memory: BytesSize,
}

impl ResourceObject {
    pub fn is_zero(&self) -> bool {
        self.cpu.is_zero() && self.memory.is_zero()
    }
}
