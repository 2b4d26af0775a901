//! End-to-end tests for the stages/steps dialect.
mod common;
use common::*;
use serde_yaml::Value;
use tenkan::canonical::{Runtime, StageCi};
use tenkan::legacy::drone;
use tenkan::prelude::*;

#[test]
fn test_full_document_conversion() {
    let conversion = convert_drone(DRONE_KUBERNETES);
    let pipeline = &conversion.pipeline;

    assert_eq!(pipeline.stages.len(), 1, "secret and signature documents are not stages");
    let stage = &pipeline.stages[0];
    assert_eq!(stage.name, "default");

    let ci = stage_ci(stage);
    assert!(matches!(ci.runtime, Runtime::Kubernetes(_)));
    assert_eq!(ci.envs.get("GOFLAGS").map(String::as_str), Some("-mod=vendor"));

    let names: Vec<&str> = ci.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["database", "build", "publish"]);
    let kinds: Vec<&str> = ci.steps.iter().map(Step::kind).collect();
    assert_eq!(kinds, vec!["background", "script", "plugin"]);

    let database = exec_spec(&ci.steps[0]);
    assert_eq!(
        database.envs.get("POSTGRES_PASSWORD").map(String::as_str),
        Some(r#"${{ secrets.get("db_password") }}"#)
    );

    let trigger = &stage.when.as_ref().expect("trigger should be present").cond[0];
    assert_eq!(
        trigger[&Dimension::Event],
        Expr::In(vec!["push".to_string(), "tag".to_string()])
    );

    let publish = &ci.steps[2];
    let publish_trigger = &publish.when.as_ref().expect("step when should be present").cond[0];
    assert_eq!(
        publish_trigger[&Dimension::Event],
        Expr::In(vec!["pull_request".to_string()]).negate()
    );
}

#[test]
fn test_secret_and_signature_documents_are_reported() {
    let conversion = convert_drone(DRONE_KUBERNETES);
    assert_eq!(
        markers(&conversion),
        vec![Unsupported::SecretDocument, Unsupported::SignatureDocument]
    );
    assert_eq!(conversion.diagnostics[0].location, "secret docker_password");
}

#[test]
fn test_image_pull_secrets_become_registry_credentials() {
    let conversion = convert_drone(DRONE_KUBERNETES);
    let registry = conversion.pipeline.registry.expect("registry should be present");
    assert_eq!(registry.credentials, vec![Credentials::named("dockerconfig")]);

    assert!(convert_drone(DRONE_MINIMAL).pipeline.registry.is_none());
}

#[test]
fn test_registry_credentials_are_deduplicated_across_stages() {
    let source = r#"
kind: pipeline
name: one
image_pull_secrets: [shared, first]
---
kind: pipeline
name: two
image_pull_secrets: [shared]
"#;
    let registry = convert_drone(source).pipeline.registry.unwrap();
    let names: Vec<&str> = registry.credentials.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["shared", "first"]);
}

#[test]
fn test_multiple_pipelines_keep_document_order() {
    let source = r#"
kind: pipeline
name: backend
steps:
  - name: test
    commands: [cargo test]
---
---
kind: pipeline
name: frontend
steps:
  - name: test
    commands: [npm test]
"#;
    let conversion = convert_drone(source);
    let names: Vec<&str> = conversion.pipeline.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["backend", "frontend"]);
}

#[test]
fn test_absent_trigger_is_omitted() {
    let output = Converter::default().convert_str(DRONE_MINIMAL).unwrap();
    let document: Value = serde_yaml::from_slice(&output).unwrap();
    let stage = &document["stages"][0];

    assert_eq!(stage["name"].as_str(), Some("minimal"));
    assert_eq!(stage["type"].as_str(), Some("ci"));
    assert!(stage.get("when").is_none());
    assert!(stage["spec"]["steps"][0].get("when").is_none());
    assert_eq!(stage["spec"]["runtime"]["type"].as_str(), Some("machine"));
    assert!(document.get("registry").is_none());
}

#[test]
fn test_yaml_output_is_deterministic() {
    let converter = Converter::default();
    let first = converter.convert_str(DRONE_KUBERNETES).unwrap();
    let second = converter.convert_str(DRONE_KUBERNETES).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_yaml_output_has_no_tags() {
    let output = Converter::default().convert_str(DRONE_KUBERNETES).unwrap();
    let text = String::from_utf8(output).unwrap();
    assert!(!text.contains(": !"), "unexpected YAML tag in output:\n{text}");
    assert!(text.contains("type: kubernetes"));
    assert!(text.contains("memory: 512Mi"));
}

#[test]
fn test_json_output() {
    let converter = Converter::builder().format(OutputFormat::Json).build();
    let output = converter.convert_str(DRONE_KUBERNETES).unwrap();
    let document: serde_json::Value = serde_json::from_slice(&output).unwrap();

    let stage = &document["stages"][0];
    assert_eq!(stage["type"], "ci");
    assert_eq!(stage["spec"]["runtime"]["spec"]["namespace"], "ci");
    assert_eq!(stage["spec"]["runtime"]["spec"]["service_account"], "builder");
    assert_eq!(stage["spec"]["runtime"]["spec"]["resources"]["requests"]["cpu"], "500m");
    assert_eq!(stage["spec"]["steps"][2]["spec"]["with"]["tags"][1], "1.0");
    assert_eq!(document["registry"]["credentials"][0]["name"], "dockerconfig");
}

#[test]
fn test_unsupported_fields_are_reported_with_location() {
    let source = r#"
kind: pipeline
name: default
concurrency:
  limit: 1
workspace:
  path: /src
steps:
  - name: build
    commands: [make]
    volumes:
      - name: cache
        path: /cache
    failure: ignore
"#;
    let conversion = convert_drone(source);
    let rendered: Vec<String> = conversion.diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "default: `concurrency` is not supported and was skipped",
            "default: `workspace` is not supported and was skipped",
            "default / step build: `failure` is not supported and was skipped",
            "default / step build: `volumes` is not supported and was skipped",
        ]
    );
    assert_eq!(stage_ci(&conversion.pipeline.stages[0]).steps.len(), 1);
}

#[test]
fn test_syntax_error() {
    let err = Converter::default().convert_str("kind: [pipeline").unwrap_err();
    assert!(matches!(err, ConvertError::Syntax(_)), "got {err:?}");
}

#[test]
fn test_document_must_be_a_mapping() {
    let err = Converter::default().convert_str("- just\n- a list\n").unwrap_err();
    assert!(matches!(err, ConvertError::Structural { document: 0, .. }), "got {err:?}");
}

#[test]
fn test_missing_and_unknown_kind() {
    let missing = Converter::default().convert_str("name: default\n").unwrap_err();
    assert_eq!(
        missing,
        ConvertError::Structural {
            document: 0,
            message: "missing `kind` discriminator".to_string(),
        }
    );

    let unknown = Converter::default().convert_str("kind: template\nname: x\n").unwrap_err();
    assert!(
        matches!(&unknown, ConvertError::Structural { message, .. } if message.contains("template")),
        "got {unknown:?}"
    );
}

#[test]
fn test_bad_field_shape_fails_the_whole_conversion() {
    let source = r#"
kind: pipeline
name: good
---
kind: pipeline
name: bad
trigger:
  branch:
    include:
      nested: true
"#;
    let err = Converter::default().convert_str(source).unwrap_err();
    assert!(matches!(err, ConvertError::Decode { document: 1, .. }), "got {err:?}");
}

#[test]
fn test_empty_stream_converts_to_empty_pipeline() {
    let conversion = convert_drone("");
    assert!(conversion.pipeline.stages.is_empty());
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_parse_exposes_typed_documents() {
    let documents = drone::parse(DRONE_KUBERNETES.as_bytes()).unwrap();
    let kinds: Vec<&str> = documents.iter().map(drone::Document::kind).collect();
    assert_eq!(kinds, vec!["pipeline", "secret", "signature"]);
}

#[test]
fn test_map_stage_directly() {
    let documents = drone::parse(DRONE_MINIMAL.as_bytes()).unwrap();
    let drone::Document::Pipeline(source) = &documents[0] else {
        panic!("expected a pipeline document");
    };
    let mut diagnostics = tenkan::diagnostics::Diagnostics::default();
    let stage = tenkan::convert::map_stage(source, &mut diagnostics);

    let ci: &StageCi = stage_ci(&stage);
    assert_eq!(ci.steps.len(), 1);
    assert_eq!(exec_spec(&ci.steps[0]).run, "cargo test");
    assert!(ci.platform.is_none());
    assert!(ci.clone.is_none());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_top_level_convert_function() {
    let output = tenkan::convert(DRONE_MINIMAL.as_bytes()).unwrap();
    assert!(String::from_utf8(output).unwrap().starts_with("stages:"));
}
