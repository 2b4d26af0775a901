use super::IntoPipeline;
use super::condition::build_when;
use super::runtime::{map_clone, map_delegate, map_platform, map_runtime};
use super::step::{map_steps, map_variables};
use crate::canonical::{self, Credentials, Registry, Stage, StageCi, StageSpec};
use crate::diagnostics::{Diagnostics, Unsupported};
use crate::error::ConvertError;
use crate::legacy::drone::{Document, Pipeline};
use tracing::debug;

impl IntoPipeline for Vec<Document> {
    fn into_pipeline(self, diagnostics: &mut Diagnostics) -> Result<canonical::Pipeline, ConvertError> {
        let mut pipeline = canonical::Pipeline::default();
        let mut credentials: Vec<Credentials> = Vec::new();

        for document in self {
            match document {
                Document::Secret(secret) => {
                    diagnostics.report(format!("secret {}", secret.name), Unsupported::SecretDocument)
                }
                Document::Signature(_) => diagnostics.report("signature", Unsupported::SignatureDocument),
                Document::Pipeline(source) => {
                    for name in &source.image_pull_secrets {
                        if !credentials.iter().any(|c| &c.name == name) {
                            credentials.push(Credentials::named(name.as_str()));
                        }
                    }
                    pipeline.stages.push(map_stage(&source, diagnostics));
                }
            }
        }

        if !credentials.is_empty() {
            pipeline.registry = Some(Registry { credentials });
        }
        Ok(pipeline)
    }
}

/// Maps one `kind: pipeline` document to a `ci` stage.
pub fn map_stage(source: &Pipeline, diagnostics: &mut Diagnostics) -> Stage {
    debug!(stage = %source.name, kind = %source.pipeline_type, "mapping pipeline");
    let location = source.name.as_str();
    diagnostics.report_present(&source.concurrency, location, Unsupported::Concurrency);
    diagnostics.report_present(&source.depends_on, location, Unsupported::DependsOn);
    diagnostics.report_present(&source.volumes, location, Unsupported::Volumes);
    diagnostics.report_present(&source.workspace, location, Unsupported::Workspace);
    diagnostics.report_present(&source.tolerations, location, Unsupported::Tolerations);
    diagnostics.report_present(&source.dns_config, location, Unsupported::DnsConfig);
    diagnostics.report_present(&source.host_aliases, location, Unsupported::HostAliases);

    Stage {
        name: source.name.clone(),
        spec: StageSpec::Ci(StageCi {
            clone: map_clone(&source.clone),
            delegate: map_delegate(&source.node),
            envs: map_variables(&source.environment),
            platform: map_platform(&source.platform),
            runtime: map_runtime(source),
            steps: map_steps(source, diagnostics),
        }),
        when: build_when(&source.trigger),
    }
}
