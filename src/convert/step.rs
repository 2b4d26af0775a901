use super::condition::build_when;
use super::runtime::map_step_resources;
use crate::canonical::{self, Pull, SettingValue, Shell, StepExec, StepPlugin, StepSpec};
use crate::diagnostics::{Diagnostics, Unsupported};
use crate::legacy::drone::{Parameter, Pipeline, Step, Variable};
use std::collections::BTreeMap;
use tracing::debug;

/// The canonical role a legacy step is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRole {
    Script,
    Background,
    Plugin,
}

/// Decides the role of a step. Detach is checked first, so a detached step with
/// settings is still a background step.
pub fn classify(step: &Step) -> StepRole {
    if step.detach {
        StepRole::Background
    } else if !step.settings.is_empty() {
        StepRole::Plugin
    } else {
        StepRole::Script
    }
}

/// Maps the services and steps of a pipeline. Services come first, each group in
/// declaration order.
pub fn map_steps(pipeline: &Pipeline, diagnostics: &mut Diagnostics) -> Vec<canonical::Step> {
    let mut mapped = Vec::with_capacity(pipeline.services.len() + pipeline.steps.len());
    for service in &pipeline.services {
        let location = format!("{} / service {}", pipeline.name, service.name);
        report_unsupported(service, &location, diagnostics);
        mapped.push(map_service(service));
    }
    for step in &pipeline.steps {
        let location = format!("{} / step {}", pipeline.name, step.name);
        report_unsupported(step, &location, diagnostics);
        mapped.push(map_step(step));
    }
    mapped
}

/// Maps a step according to its [`classify`] role.
pub fn map_step(step: &Step) -> canonical::Step {
    let role = classify(step);
    debug!(step = %step.name, ?role, "classified step");
    let spec = match role {
        StepRole::Background => StepSpec::Background(map_exec(step)),
        StepRole::Plugin => StepSpec::Plugin(map_plugin(step)),
        StepRole::Script => StepSpec::Script(map_exec(step)),
    };
    canonical::Step {
        name: step.name.clone(),
        spec,
        when: build_when(&step.when),
    }
}

/// Services always run in the background.
pub fn map_service(service: &Step) -> canonical::Step {
    canonical::Step {
        name: service.name.clone(),
        spec: StepSpec::Background(map_exec(service)),
        when: build_when(&service.when),
    }
}

fn map_exec(step: &Step) -> StepExec {
    StepExec {
        image: step.image.clone(),
        privileged: step.privileged,
        pull: map_pull(&step.pull),
        shell: map_shell(&step.shell),
        user: step.user.clone(),
        entrypoint: map_entrypoint(&step.entrypoint),
        args: map_args(&step.entrypoint, &step.command),
        run: map_script(&step.commands),
        envs: map_variables(&step.environment),
        resources: map_step_resources(&step.resources),
    }
}

fn map_plugin(step: &Step) -> StepPlugin {
    StepPlugin {
        image: step.image.clone(),
        privileged: step.privileged,
        pull: map_pull(&step.pull),
        user: step.user.clone(),
        envs: map_variables(&step.environment),
        with: map_settings(&step.settings),
        resources: map_step_resources(&step.resources),
    }
}

fn report_unsupported(step: &Step, location: &str, diagnostics: &mut Diagnostics) {
    diagnostics.report_present(&step.depends_on, location, Unsupported::DependsOn);
    diagnostics.report_present(&step.failure, location, Unsupported::Failure);
    diagnostics.report_present(&step.network_mode, location, Unsupported::NetworkMode);
    diagnostics.report_present(&step.volumes, location, Unsupported::Volumes);
    diagnostics.report_present(&step.working_dir, location, Unsupported::WorkingDir);
    diagnostics.report_present(&step.dns, location, Unsupported::Dns);
    diagnostics.report_present(&step.dns_search, location, Unsupported::DnsSearch);
    diagnostics.report_present(&step.extra_hosts, location, Unsupported::ExtraHosts);
}

/// The first entrypoint element, or empty.
pub fn map_entrypoint(entrypoint: &[String]) -> String {
    entrypoint.first().cloned().unwrap_or_default()
}

/// With an entrypoint, args are its first element followed by the command;
/// without one, args are the command as given.
pub fn map_args(entrypoint: &[String], command: &[String]) -> Vec<String> {
    match entrypoint.first() {
        Some(first) => std::iter::once(first.clone()).chain(command.iter().cloned()).collect(),
        None => command.to_vec(),
    }
}

/// Joins script lines with newlines.
pub fn map_script(commands: &[String]) -> String {
    commands.join("\n")
}

/// Renders the placeholder that the engine resolves against its secret store.
pub fn secret_placeholder(name: &str) -> String {
    format!("${{{{ secrets.get({name:?}) }}}}")
}

/// Literal values pass through, secrets become placeholders, empty values are dropped.
pub fn map_variables(environment: &BTreeMap<String, Variable>) -> BTreeMap<String, String> {
    environment
        .iter()
        .filter_map(|(key, variable)| match variable {
            Variable::Value(value) if !value.is_empty() => Some((key.clone(), value.clone())),
            Variable::Value(_) => None,
            Variable::Secret(name) => Some((key.clone(), secret_placeholder(name))),
        })
        .collect()
}

pub fn map_settings(settings: &BTreeMap<String, Parameter>) -> BTreeMap<String, SettingValue> {
    settings
        .iter()
        .filter_map(|(key, parameter)| match parameter {
            Parameter::Secret(name) => Some((key.clone(), SettingValue::String(secret_placeholder(name)))),
            Parameter::Literal(value) => Some((key.clone(), value.clone())),
            Parameter::Empty => None,
        })
        .collect()
}

/// Unknown pull policies map to [`Pull::Unspecified`].
pub fn map_pull(pull: &str) -> Pull {
    match pull {
        "always" => Pull::Always,
        "never" => Pull::Never,
        "if-not-exists" => Pull::IfNotExists,
        _ => Pull::Unspecified,
    }
}

/// Unknown shells map to [`Shell::Unspecified`].
pub fn map_shell(shell: &str) -> Shell {
    match shell {
        "bash" => Shell::Bash,
        "sh" | "posix" => Shell::Sh,
        "pwsh" | "powershell" => Shell::Powershell,
        _ => Shell::Unspecified,
    }
}
