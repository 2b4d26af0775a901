//! The conversion engine: parses a legacy document, maps it to the canonical
//! schema, and writes the result.

pub mod condition;
mod drone;
mod gitlab;
pub mod runtime;
pub mod step;

pub use drone::map_stage;

use crate::canonical::Pipeline;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ConvertError;
use crate::legacy;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A typed legacy model that can be mapped into a canonical [`Pipeline`].
///
/// This is the seam between a dialect and the canonical schema. Constructs the
/// model recognizes but cannot map are recorded in `diagnostics`, never rejected.
pub trait IntoPipeline {
    fn into_pipeline(self, diagnostics: &mut Diagnostics) -> Result<Pipeline, ConvertError>;
}

/// The legacy dialect of the input document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// Multi-document `kind: pipeline` stream with stages and steps.
    #[default]
    Drone,
    /// Single document of named jobs grouped into stages.
    Gitlab,
}

/// Notation of the written canonical document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// The result of a conversion before it is written.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub pipeline: Pipeline,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ConverterBuilder {
    dialect: Dialect,
    format: OutputFormat,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Self {
            dialect: Dialect::default(),
            format: OutputFormat::default(),
        }
    }
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
    pub fn build(self) -> Converter {
        Converter {
            dialect: self.dialect,
            format: self.format,
        }
    }
}

impl Default for ConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts legacy pipeline documents into the canonical schema.
///
/// A `Converter` holds no state between calls; the same instance can convert any
/// number of documents, from any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    dialect: Dialect,
    format: OutputFormat,
}

impl Converter {
    pub fn builder() -> ConverterBuilder {
        ConverterBuilder::new()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Parses and maps `input` without writing it.
    pub fn convert_document(&self, input: &[u8]) -> Result<Conversion, ConvertError> {
        let mut diagnostics = Diagnostics::default();
        let pipeline = match self.dialect {
            Dialect::Drone => legacy::drone::parse(input)?.into_pipeline(&mut diagnostics)?,
            Dialect::Gitlab => legacy::gitlab::parse(input)?.into_pipeline(&mut diagnostics)?,
        };
        debug!(
            dialect = ?self.dialect,
            stages = pipeline.stages.len(),
            skipped = diagnostics.len(),
            "converted pipeline"
        );
        Ok(Conversion {
            pipeline,
            diagnostics: diagnostics.into_vec(),
        })
    }

    /// Converts `input` and writes the canonical document.
    pub fn convert(&self, input: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let conversion = self.convert_document(input)?;
        self.write(&conversion.pipeline)
    }

    pub fn convert_str(&self, input: &str) -> Result<Vec<u8>, ConvertError> {
        self.convert(input.as_bytes())
    }

    pub fn convert_reader<R: Read>(&self, mut reader: R) -> Result<Vec<u8>, ConvertError> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|e| ConvertError::Io(e.to_string()))?;
        self.convert(&input)
    }

    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>, ConvertError> {
        let path = path.as_ref();
        let input = fs::read(path)
            .map_err(|e| ConvertError::Io(format!("could not read '{}': {}", path.display(), e)))?;
        self.convert(&input)
    }

    /// Serializes a canonical pipeline in the configured format.
    pub fn write(&self, pipeline: &Pipeline) -> Result<Vec<u8>, ConvertError> {
        match self.format {
            OutputFormat::Yaml => serde_yaml::to_string(pipeline)
                .map(String::into_bytes)
                .map_err(|e| ConvertError::Serialize(e.to_string())),
            OutputFormat::Json => {
                serde_json::to_vec_pretty(pipeline).map_err(|e| ConvertError::Serialize(e.to_string()))
            }
        }
    }
}
