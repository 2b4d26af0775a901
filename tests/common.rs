//! Common test utilities: legacy fixtures and helpers for inspecting converted pipelines.
use tenkan::canonical::{StageCi, StepExec, StepPlugin};
use tenkan::prelude::*;

/// A kubernetes pipeline followed by a secret and a signature document.
#[allow(dead_code)]
pub const DRONE_KUBERNETES: &str = r#"
kind: pipeline
type: kubernetes
name: default

metadata:
  namespace: ci
  labels:
    team: platform

service_account_name: builder
node_selector:
  disk: ssd

resources:
  requests:
    cpu: 500m
    memory: 512Mi

environment:
  GOFLAGS: -mod=vendor

image_pull_secrets:
  - dockerconfig

services:
  - name: database
    image: postgres:15
    environment:
      POSTGRES_PASSWORD:
        from_secret: db_password

steps:
  - name: build
    image: golang:1.22
    commands:
      - go build ./...
      - go test ./...
    when:
      branch:
        - main
        - release/*

  - name: publish
    image: plugins/docker
    settings:
      repo: acme/app
      tags: [latest, "1.0"]
      password:
        from_secret: docker_password
    when:
      event:
        exclude: pull_request

trigger:
  event:
    - push
    - tag
---
kind: secret
name: docker_password
get:
  path: secret/data/docker
  name: password
---
kind: signature
hmac: 0123456789abcdef
"#;

/// A minimal docker pipeline with one script step and no trigger.
#[allow(dead_code)]
pub const DRONE_MINIMAL: &str = r#"
kind: pipeline
type: docker
name: minimal

steps:
  - name: test
    image: rust:1.80
    commands:
      - cargo test
"#;

/// A jobs-dialect document with declared stages, services and ref filters.
#[allow(dead_code)]
pub const GITLAB_JOBS: &str = r#"
stages:
  - build
  - test
  - deploy

variables:
  CARGO_HOME: .cargo

image: rust:1.80

default:
  before_script:
    - rustc --version

services:
  - postgres:15

build:
  stage: build
  script: cargo build

unit:
  stage: test
  services:
    - name: redis:7
      alias: cache
  script:
    - cargo test
  variables:
    RUST_BACKTRACE: "1"
  retry: 2

lint:
  stage: test
  script: cargo clippy
  except:
    - tags

.template:
  script: echo hidden

release:
  stage: deploy
  image:
    name: alpine:3.20
    entrypoint: ["/bin/sh", "-c"]
  script:
    - ./release.sh
  only:
    - main
"#;

/// Converts a stages/steps document, panicking on error.
#[allow(dead_code)]
pub fn convert_drone(source: &str) -> Conversion {
    Converter::default()
        .convert_document(source.as_bytes())
        .expect("conversion should succeed")
}

/// Converts a jobs-dialect document, panicking on error.
#[allow(dead_code)]
pub fn convert_gitlab(source: &str) -> Conversion {
    Converter::builder()
        .dialect(Dialect::Gitlab)
        .build()
        .convert_document(source.as_bytes())
        .expect("conversion should succeed")
}

/// Parses a legacy step from YAML.
#[allow(dead_code)]
pub fn legacy_step(source: &str) -> tenkan::legacy::drone::Step {
    serde_yaml::from_str(source).expect("step should decode")
}

#[allow(dead_code)]
pub fn stage_ci(stage: &Stage) -> &StageCi {
    match &stage.spec {
        StageSpec::Ci(ci) => ci,
    }
}

/// Returns the spec of a script or background step.
#[allow(dead_code)]
pub fn exec_spec(step: &Step) -> &StepExec {
    match &step.spec {
        StepSpec::Script(exec) | StepSpec::Background(exec) => exec,
        StepSpec::Plugin(_) => panic!("step `{}` is a plugin step", step.name),
    }
}

#[allow(dead_code)]
pub fn plugin_spec(step: &Step) -> &StepPlugin {
    match &step.spec {
        StepSpec::Plugin(plugin) => plugin,
        _ => panic!("step `{}` is not a plugin step", step.name),
    }
}

/// Collects the diagnostic markers of a conversion, in report order.
#[allow(dead_code)]
pub fn markers(conversion: &Conversion) -> Vec<Unsupported> {
    conversion.diagnostics.iter().map(|d| d.marker).collect()
}
