use super::IntoPipeline;
use super::condition::build_trigger_from;
use super::step::{map_args, map_entrypoint, map_script};
use crate::canonical::{
    self, Dimension, Runtime, Stage, StageCi, StageSpec, StepExec, StepSpec, When,
};
use crate::diagnostics::{Diagnostics, Unsupported};
use crate::error::ConvertError;
use crate::legacy::drone::Condition;
use crate::legacy::gitlab::{DEFAULT_JOB_STAGE, GitlabDocument, Job, Service, Variable};
use std::collections::BTreeMap;
use tracing::debug;

impl IntoPipeline for GitlabDocument {
    fn into_pipeline(self, diagnostics: &mut Diagnostics) -> Result<canonical::Pipeline, ConvertError> {
        let settings = &self.settings;
        diagnostics.report_present(&settings.include, "document", Unsupported::Include);
        diagnostics.report_present(&settings.workflow, "document", Unsupported::Workflow);
        diagnostics.report_present(&settings.cache, "document", Unsupported::Cache);
        diagnostics.report_present(&settings.after_script, "document", Unsupported::AfterScript);
        diagnostics.report_present(&settings.default.after_script, "default", Unsupported::AfterScript);
        diagnostics.report_present(&settings.default.retry, "default", Unsupported::Retry);

        let stages = self.stages();
        let mut grouped: Vec<Vec<&(String, Job)>> = vec![Vec::new(); stages.len()];
        for entry in &self.jobs {
            let (name, job) = entry;
            let stage = job.stage.as_deref().unwrap_or(DEFAULT_JOB_STAGE);
            let Some(slot) = stages.iter().position(|s| s == stage) else {
                return Err(ConvertError::structural(
                    0,
                    format!("job `{name}` uses undeclared stage `{stage}`"),
                ));
            };
            grouped[slot].push(entry);
        }

        let envs = map_variables(&settings.variables);
        let mut pipeline = canonical::Pipeline::default();
        for (stage, jobs) in stages.iter().zip(grouped) {
            if jobs.is_empty() {
                continue;
            }
            debug!(stage = %stage, jobs = jobs.len(), "mapping stage");

            let mut services: Vec<canonical::Step> = Vec::new();
            let mut steps = Vec::with_capacity(jobs.len());
            for (name, job) in jobs {
                for service in job_services(&self, job) {
                    let service_name = service.step_name();
                    if !services.iter().any(|s| s.name == service_name) {
                        services.push(map_service(service));
                    }
                }
                report_unsupported(name, job, diagnostics);
                steps.push(map_job(&self, name, job));
            }

            services.extend(steps);
            pipeline.stages.push(Stage {
                name: stage.clone(),
                spec: StageSpec::Ci(StageCi {
                    envs: envs.clone(),
                    runtime: Runtime::default(),
                    steps: services,
                    ..StageCi::default()
                }),
                when: None,
            });
        }
        Ok(pipeline)
    }
}

fn job_services<'a>(document: &'a GitlabDocument, job: &'a Job) -> &'a [Service] {
    job.services
        .as_deref()
        .or(document.settings.default.services.as_deref())
        .or(document.settings.services.as_deref())
        .unwrap_or_default()
}

/// Maps a job to a script step. Job values win over `default`, which wins over
/// the top-level settings.
fn map_job(document: &GitlabDocument, name: &str, job: &Job) -> canonical::Step {
    let settings = &document.settings;
    let image = job
        .image
        .as_ref()
        .or(settings.default.image.as_ref())
        .or(settings.image.as_ref());
    let before_script = job
        .before_script
        .as_ref()
        .or(settings.default.before_script.as_ref())
        .or(settings.before_script.as_ref());

    let mut lines: Vec<String> = before_script.map(|s| s.as_slice().to_vec()).unwrap_or_default();
    lines.extend_from_slice(job.script.as_slice());

    let entrypoint = image.map(|i| i.entrypoint.as_slice()).unwrap_or_default();
    canonical::Step {
        name: name.to_string(),
        spec: StepSpec::Script(StepExec {
            image: image.map(|i| i.name.clone()).unwrap_or_default(),
            entrypoint: map_entrypoint(entrypoint),
            args: map_args(entrypoint, &[]),
            run: map_script(&lines),
            envs: map_variables(&job.variables),
            ..StepExec::default()
        }),
        when: map_refs(job),
    }
}

fn map_service(service: &Service) -> canonical::Step {
    canonical::Step {
        name: service.step_name(),
        spec: StepSpec::Background(StepExec {
            image: service.name.clone(),
            entrypoint: map_entrypoint(&service.entrypoint),
            args: map_args(&service.entrypoint, &service.command),
            ..StepExec::default()
        }),
        when: None,
    }
}

/// `only` and `except` constrain the branch dimension.
fn map_refs(job: &Job) -> Option<When> {
    let condition = Condition {
        include: job.only.as_ref().map(|r| r.0.clone()).unwrap_or_default(),
        exclude: job.except.as_ref().map(|r| r.0.clone()).unwrap_or_default(),
    };
    build_trigger_from([(Dimension::Branch, &condition)]).map(When::from)
}

fn map_variables(variables: &BTreeMap<String, Variable>) -> BTreeMap<String, String> {
    variables
        .iter()
        .map(|(key, Variable(value))| (key.clone(), value.clone()))
        .collect()
}

fn report_unsupported(name: &str, job: &Job, diagnostics: &mut Diagnostics) {
    let location = format!("job {name}");
    let location = location.as_str();
    diagnostics.report_present(&job.retry, location, Unsupported::Retry);
    diagnostics.report_present(&job.after_script, location, Unsupported::AfterScript);
    diagnostics.report_present(&job.artifacts, location, Unsupported::Artifacts);
    diagnostics.report_present(&job.cache, location, Unsupported::Cache);
    diagnostics.report_present(&job.needs, location, Unsupported::Needs);
    diagnostics.report_present(&job.rules, location, Unsupported::Rules);
    diagnostics.report_present(&job.extends, location, Unsupported::Extends);
    diagnostics.report_present(&job.tags, location, Unsupported::Tags);
    diagnostics.report_present(&job.allow_failure, location, Unsupported::AllowFailure);
    diagnostics.report_present(&job.timeout, location, Unsupported::Timeout);
    diagnostics.report_present(&job.when, location, Unsupported::JobWhen);
}
