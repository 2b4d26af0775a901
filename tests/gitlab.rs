//! End-to-end tests for the jobs dialect.
mod common;
use common::*;
use tenkan::legacy::gitlab::{self, Service};
use tenkan::prelude::*;

fn step_names(stage: &Stage) -> Vec<&str> {
    stage_ci(stage).steps.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn test_jobs_are_grouped_by_declared_stage() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    let stages: Vec<&str> = conversion.pipeline.stages.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(stages, vec!["build", "test", "deploy"]);

    assert_eq!(step_names(&conversion.pipeline.stages[0]), vec!["postgres", "build"]);
    assert_eq!(
        step_names(&conversion.pipeline.stages[1]),
        vec!["cache", "postgres", "unit", "lint"]
    );
    assert_eq!(step_names(&conversion.pipeline.stages[2]), vec!["postgres", "release"]);
}

#[test]
fn test_hidden_jobs_are_skipped() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    let all_steps: Vec<&str> = conversion
        .pipeline
        .stages
        .iter()
        .flat_map(|stage| stage_ci(stage).steps.iter().map(|s| s.name.as_str()))
        .collect();
    assert!(!all_steps.contains(&".template"));
}

#[test]
fn test_job_inherits_image_and_before_script() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    let build = &stage_ci(&conversion.pipeline.stages[0]).steps[1];
    let exec = exec_spec(build);

    assert_eq!(build.kind(), "script");
    assert_eq!(exec.image, "rust:1.80");
    assert_eq!(exec.run, "rustc --version\ncargo build");
    assert!(exec.entrypoint.is_empty());
    assert!(build.when.is_none());
}

#[test]
fn test_image_entrypoint_and_variables() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    let release = &stage_ci(&conversion.pipeline.stages[2]).steps[1];
    let exec = exec_spec(release);
    assert_eq!(exec.image, "alpine:3.20");
    assert_eq!(exec.entrypoint, "/bin/sh");
    assert_eq!(exec.args, vec!["/bin/sh".to_string()]);

    let unit = &stage_ci(&conversion.pipeline.stages[1]).steps[2];
    assert_eq!(exec_spec(unit).envs.get("RUST_BACKTRACE").map(String::as_str), Some("1"));

    let ci = stage_ci(&conversion.pipeline.stages[0]);
    assert_eq!(ci.envs.get("CARGO_HOME").map(String::as_str), Some(".cargo"));
}

#[test]
fn test_services_are_background_steps() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    let cache = &stage_ci(&conversion.pipeline.stages[1]).steps[0];
    assert_eq!(cache.kind(), "background");
    assert_eq!(exec_spec(cache).image, "redis:7");
}

#[test]
fn test_only_and_except_constrain_branch() {
    let conversion = convert_gitlab(GITLAB_JOBS);

    let release = &stage_ci(&conversion.pipeline.stages[2]).steps[1];
    let trigger = &release.when.as_ref().expect("only should produce a trigger").cond[0];
    assert_eq!(trigger[&Dimension::Branch], Expr::In(vec!["main".to_string()]));

    let lint = &stage_ci(&conversion.pipeline.stages[1]).steps[3];
    let trigger = &lint.when.as_ref().expect("except should produce a trigger").cond[0];
    assert_eq!(
        trigger[&Dimension::Branch],
        Expr::In(vec!["tags".to_string()]).negate()
    );
}

#[test]
fn test_retry_is_reported() {
    let conversion = convert_gitlab(GITLAB_JOBS);
    assert_eq!(markers(&conversion), vec![Unsupported::Retry]);
    assert_eq!(conversion.diagnostics[0].location, "job unit");
}

#[test]
fn test_retry_shapes_decode_the_same() {
    let short = gitlab::parse(b"job:\n  script: make\n  retry: 2\n").unwrap();
    let long = gitlab::parse(b"job:\n  script: make\n  retry:\n    max: 2\n").unwrap();
    assert_eq!(short.jobs[0].1.retry, Some(Retry { max: 2, when: None }));
    assert_eq!(short.jobs[0].1.retry, long.jobs[0].1.retry);
}

#[test]
fn test_default_stages_and_job_stage() {
    let conversion = convert_gitlab("job:\n  script: make test\n");
    assert_eq!(conversion.pipeline.stages.len(), 1);
    assert_eq!(conversion.pipeline.stages[0].name, "test");
}

#[test]
fn test_undeclared_stage_is_an_error() {
    let err = Converter::builder()
        .dialect(Dialect::Gitlab)
        .build()
        .convert_str("stages: [build]\njob:\n  stage: deploy\n  script: make\n")
        .unwrap_err();
    assert!(
        matches!(&err, ConvertError::Structural { message, .. } if message.contains("deploy")),
        "got {err:?}"
    );
}

#[test]
fn test_non_mapping_keys_are_not_jobs() {
    let document = gitlab::parse(
        b"stages: [build]\nbuild_job:\n  stage: build\n  script: make\nextra_setting: true\nnotes: [a, b]\n",
    )
    .unwrap();
    let names: Vec<&str> = document.jobs.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["build_job"]);

    let conversion =
        convert_gitlab("stages: [build]\nbuild_job:\n  stage: build\n  script: make\nextra_setting: true\n");
    assert_eq!(conversion.pipeline.stages.len(), 1);
    assert_eq!(step_names(&conversion.pipeline.stages[0]), vec!["build_job"]);
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn test_job_decode_error_names_the_job() {
    let err = gitlab::parse(b"job:\n  script: make\n  retry: often\n").unwrap_err();
    match err {
        ConvertError::Decode { message, .. } => assert!(message.contains("job `job`"), "{message}"),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn test_unsupported_job_keys_are_reported() {
    let source = r#"
after_script: [cleanup]
job:
  script: make
  artifacts:
    paths: [target/]
  tags: [docker]
  when: manual
"#;
    let conversion = convert_gitlab(source);
    assert_eq!(
        markers(&conversion),
        vec![
            Unsupported::AfterScript,
            Unsupported::Artifacts,
            Unsupported::Tags,
            Unsupported::JobWhen,
        ]
    );
}

#[test]
fn test_service_step_names() {
    let plain = Service {
        name: "registry.example.com/team/postgres:15".to_string(),
        ..Service::default()
    };
    let aliased = Service {
        alias: Some("db".to_string()),
        ..plain.clone()
    };
    assert_eq!(plain.step_name(), "postgres");
    assert_eq!(aliased.step_name(), "db");
}

#[test]
fn test_variable_object_form() {
    let document = gitlab::parse(
        b"variables:\n  DEPLOY:\n    value: staging\n    description: target\njob:\n  script: make\n",
    )
    .unwrap();
    assert_eq!(
        document.settings.variables.get("DEPLOY"),
        Some(&gitlab::Variable("staging".to_string()))
    );
}

#[test]
fn test_empty_document() {
    let conversion = convert_gitlab("");
    assert!(conversion.pipeline.stages.is_empty());
}
