//! Reporting of legacy constructs that are recognized but not mapped.
//!
//! Unsupported constructs are skipped, never rejected. The converter records each
//! one so callers can audit what did not make it into the canonical document.

use std::fmt;
use tracing::debug;

/// Legacy constructs the converter recognizes but does not map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unsupported {
    SecretDocument,
    SignatureDocument,
    Concurrency,
    DependsOn,
    Volumes,
    Workspace,
    Tolerations,
    DnsConfig,
    HostAliases,
    Failure,
    WorkingDir,
    NetworkMode,
    Dns,
    DnsSearch,
    ExtraHosts,
    Retry,
    AfterScript,
    Artifacts,
    Cache,
    Needs,
    Rules,
    Extends,
    Tags,
    AllowFailure,
    Timeout,
    JobWhen,
    Include,
    Workflow,
}

impl Unsupported {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unsupported::SecretDocument => "kind: secret",
            Unsupported::SignatureDocument => "kind: signature",
            Unsupported::Concurrency => "concurrency",
            Unsupported::DependsOn => "depends_on",
            Unsupported::Volumes => "volumes",
            Unsupported::Workspace => "workspace",
            Unsupported::Tolerations => "tolerations",
            Unsupported::DnsConfig => "dns_config",
            Unsupported::HostAliases => "host_aliases",
            Unsupported::Failure => "failure",
            Unsupported::WorkingDir => "working_dir",
            Unsupported::NetworkMode => "network_mode",
            Unsupported::Dns => "dns",
            Unsupported::DnsSearch => "dns_search",
            Unsupported::ExtraHosts => "extra_hosts",
            Unsupported::Retry => "retry",
            Unsupported::AfterScript => "after_script",
            Unsupported::Artifacts => "artifacts",
            Unsupported::Cache => "cache",
            Unsupported::Needs => "needs",
            Unsupported::Rules => "rules",
            Unsupported::Extends => "extends",
            Unsupported::Tags => "tags",
            Unsupported::AllowFailure => "allow_failure",
            Unsupported::Timeout => "timeout",
            Unsupported::JobWhen => "when",
            Unsupported::Include => "include",
            Unsupported::Workflow => "workflow",
        }
    }
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One skipped construct and where it was found (e.g. `default / step build`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub location: String,
    pub marker: Unsupported,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: `{}` is not supported and was skipped", self.location, self.marker)
    }
}

/// Collects diagnostics during a single conversion.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn report(&mut self, location: impl Into<String>, marker: Unsupported) {
        let location = location.into();
        debug!(%location, %marker, "skipping unsupported construct");
        self.entries.push(Diagnostic { location, marker });
    }

    /// Reports `marker` when the optional field was present in the source.
    pub fn report_present<T>(&mut self, field: &Option<T>, location: &str, marker: Unsupported) {
        if field.is_some() {
            self.report(location, marker);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}
