//! # Tenkan - Legacy CI Pipeline Conversion Engine
//!
//! **Tenkan** translates pipeline definitions written in legacy continuous-integration
//! dialects into a single canonical pipeline document consumed by a downstream
//! execution engine. It decodes loose, polymorphic legacy fields into typed models,
//! then re-emits them in the strict canonical schema.
//!
//! ## Core Workflow
//!
//! 1.  **Parse**: The legacy document is parsed into a typed model (see [`legacy`]).
//!     Fields that may appear as a scalar, a list, or an object are decoded by the
//!     ordered-candidate decoder in [`flexible`].
//! 2.  **Map**: The model implements [`convert::IntoPipeline`]. Stages, steps,
//!     trigger conditions, resources and runtime hints are translated into their
//!     [`canonical`] equivalents.
//! 3.  **Write**: The canonical [`canonical::Pipeline`] is serialized as YAML or JSON.
//!
//! Constructs the engine recognizes but does not map (secret documents, volumes,
//! retry policies, ...) are skipped and reported through [`diagnostics`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tenkan::prelude::*;
//!
//! let source = r#"
//! kind: pipeline
//! name: default
//! steps:
//!   - name: test
//!     image: golang:1.22
//!     commands:
//!       - go build
//!       - go test ./...
//! "#;
//!
//! let converter = Converter::builder()
//!     .dialect(Dialect::Drone)
//!     .format(OutputFormat::Yaml)
//!     .build();
//!
//! let conversion = converter.convert_document(source.as_bytes())?;
//! for diagnostic in &conversion.diagnostics {
//!     eprintln!("warning: {}", diagnostic);
//! }
//!
//! let output = converter.write(&conversion.pipeline)?;
//! println!("{}", String::from_utf8_lossy(&output));
//! # Ok::<(), ConvertError>(())
//! ```

pub mod canonical;
pub mod convert;
pub mod diagnostics;
pub mod error;
pub mod flexible;
pub mod legacy;
pub mod prelude;

/// Converts a stages/steps document to canonical YAML with the default settings.
pub fn convert(input: &[u8]) -> Result<Vec<u8>, error::ConvertError> {
    convert::Converter::default().convert(input)
}
