//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the tenkan crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use tenkan::prelude::*;
//!
//! # fn run_example() -> Result<(), ConvertError> {
//! let converter = Converter::builder().dialect(Dialect::Gitlab).build();
//! let output = converter.convert_file("path/to/.gitlab-ci.yml")?;
//! println!("{}", String::from_utf8_lossy(&output));
//! # Ok(())
//! # }
//! ```

// Conversion entry points
pub use crate::convert::{Conversion, Converter, ConverterBuilder, Dialect, IntoPipeline, OutputFormat};

// Canonical schema
pub use crate::canonical::{Dimension, Expr, Pipeline, Stage, StageSpec, Step, StepSpec, When};

// Flexible decoding
pub use crate::flexible::{Credentials, Flexible, Retry, StringOrSlice};

// Diagnostics and errors
pub use crate::diagnostics::{Diagnostic, Unsupported};
pub use crate::error::{ConvertError, DecodeError};
