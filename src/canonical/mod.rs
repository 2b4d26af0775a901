//! The canonical pipeline schema consumed by the execution engine.
//!
//! Every map is a `BTreeMap`, so serialization is deterministic. Empty and
//! unspecified values are omitted from the output.

mod expr;
mod pipeline;
mod resources;
mod step;

pub use expr::*;
pub use pipeline::*;
pub use resources::*;
pub use step::*;

pub use crate::flexible::{Credentials, Quantity};

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &u64) -> bool {
    *value == 0
}
