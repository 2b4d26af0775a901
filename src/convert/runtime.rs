use crate::canonical::{
    Arch, ClonePolicy, Delegate, Os, Platform, Resource, Resources, Runtime, RuntimeKube,
    RuntimeMachine,
};
use crate::legacy::drone::{self, CloneSettings, Pipeline, ResourceObject};
use std::collections::BTreeMap;

/// Chooses the runtime of a stage. Kubernetes pipelines carry their metadata and
/// scheduling hints through; every other type runs on a bare machine.
pub fn map_runtime(pipeline: &Pipeline) -> Runtime {
    if !pipeline.is_kubernetes() {
        return Runtime::Machine(RuntimeMachine {});
    }
    Runtime::Kubernetes(RuntimeKube {
        annotations: pipeline.metadata.annotations.clone(),
        labels: pipeline.metadata.labels.clone(),
        namespace: pipeline.metadata.namespace.clone(),
        node_selector: pipeline.node_selector.clone(),
        node: pipeline.node_name.clone(),
        service_account: pipeline.service_account_name.clone(),
        resources: map_requests(&pipeline.resources),
    })
}

/// Normalizes OS and architecture. Absent when neither is set.
pub fn map_platform(platform: &drone::Platform) -> Option<Platform> {
    if platform.os.is_empty() && platform.arch.is_empty() {
        return None;
    }
    let os = match platform.os.as_str() {
        "windows" => Os::Windows,
        "darwin" => Os::Darwin,
        _ => Os::Linux,
    };
    let arch = match platform.arch.as_str() {
        "arm" | "arm64" => Arch::Arm64,
        _ => Arch::Amd64,
    };
    Some(Platform { os, arch })
}

/// Maps a single request or limit. Zero CPU and zero memory yield `None`;
/// a single zero value is omitted from the output.
pub fn map_resource(source: &ResourceObject) -> Option<Resource> {
    if source.is_zero() {
        return None;
    }
    Some(Resource {
        cpu: (!source.cpu.is_zero()).then(|| source.cpu.clone()),
        memory: (!source.memory.is_zero()).then_some(source.memory),
    })
}

/// Maps only the requests of a legacy resource block.
pub fn map_requests(source: &drone::Resources) -> Option<Resources> {
    map_resource(&source.requests).map(|requests| Resources {
        limits: None,
        requests: Some(requests),
    })
}

/// Maps both limits and requests of a step. Absent when both are zero.
pub fn map_step_resources(source: &drone::Resources) -> Option<Resources> {
    let limits = map_resource(&source.limits);
    let requests = map_resource(&source.requests);
    if limits.is_none() && requests.is_none() {
        return None;
    }
    Some(Resources { limits, requests })
}

/// Maps the clone policy. Absent when every setting is at its default.
pub fn map_clone(source: &CloneSettings) -> Option<ClonePolicy> {
    let policy = ClonePolicy {
        depth: source.depth,
        disabled: source.disable,
        insecure: source.skip_verify,
        trace: source.trace,
    };
    (policy != ClonePolicy::default()).then_some(policy)
}

/// Turns node labels into `key:value` delegate selectors, ordered by key.
pub fn map_delegate(node: &BTreeMap<String, String>) -> Option<Delegate> {
    if node.is_empty() {
        return None;
    }
    Some(Delegate {
        selectors: node.iter().map(|(k, v)| format!("{k}:{v}")).collect(),
    })
}
