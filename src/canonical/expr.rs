use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Condition dimensions, declared in their wire (alphabetical) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Action,
    Branch,
    Cron,
    Event,
    Instance,
    Paths,
    Ref,
    Repo,
    Status,
    Target,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Action => "action",
            Dimension::Branch => "branch",
            Dimension::Cron => "cron",
            Dimension::Event => "event",
            Dimension::Instance => "instance",
            Dimension::Paths => "paths",
            Dimension::Ref => "ref",
            Dimension::Repo => "repo",
            Dimension::Status => "status",
            Dimension::Target => "target",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A trigger predicate over one dimension. Written as `{in: [..]}` or `{not: <expr>}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Matches when the value is one of the patterns.
    In(Vec<String>),
    /// Matches when the inner expression does not.
    Not(Box<Expr>),
}

impl Expr {
    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }
}

// Single-entry map; serde_yaml would otherwise write the variant as a YAML tag.
impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Expr::In(patterns) => map.serialize_entry("in", patterns)?,
            Expr::Not(inner) => map.serialize_entry("not", inner)?,
        }
        map.end()
    }
}

/// Present dimensions are ANDed downstream; a missing dimension is unconstrained.
pub type Trigger = BTreeMap<Dimension, Expr>;

/// Run condition of a stage or step. Absent means "always run".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct When {
    pub cond: Vec<Trigger>,
}

impl From<Trigger> for When {
    fn from(trigger: Trigger) -> Self {
        When {
            cond: vec![trigger],
        }
    }
}
