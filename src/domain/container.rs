use std::fmt;

/// A container as reported by the runtime listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSummary {
    pub id: String,
    pub names: Vec<String>,
    pub image: String,
}

impl ContainerSummary {
    pub fn new(id: impl Into<String>, names: Vec<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            names,
            image: image.into(),
        }
    }

    /// First reported name without the leading `/` the Docker API prepends
    pub fn primary_name(&self) -> Option<&str> {
        self.names
            .first()
            .map(|name| name.strip_prefix('/').unwrap_or(name))
    }

    /// Primary name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.primary_name().unwrap_or(&self.id)
    }
}

/// Ordered, immutable set of containers eligible for cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    entries: Vec<ContainerSummary>,
}

impl CandidateSet {
    /// Only discovery builds candidate sets from a runtime listing; tests use
    /// this to script removal batches directly.
    pub fn from_classified(entries: Vec<ContainerSummary>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContainerSummary> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&ContainerSummary> {
        self.entries.get(index)
    }

    pub fn as_slice(&self) -> &[ContainerSummary] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a ContainerSummary;
    type IntoIter = std::slice::Iter<'a, ContainerSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A single container the remover could not delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalFailure {
    pub id: String,
    pub name: String,
    pub reason: String,
}

impl fmt::Display for RemovalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name, short_id(&self.id), self.reason)
    }
}

/// Every non-recoverable failure of one removal batch, in attempt order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("falha ao remover {} container(s): {}", .failures.len(), join_failures(.failures))]
pub struct CleanupError {
    failures: Vec<RemovalFailure>,
}

impl CleanupError {
    pub fn new(failures: Vec<RemovalFailure>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[RemovalFailure] {
        &self.failures
    }
}

fn join_failures(failures: &[RemovalFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of one confirmed removal batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    pub removed: Vec<String>,
    pub error: Option<CleanupError>,
}

impl CleanupOutcome {
    pub fn is_clean(&self) -> bool {
        self.error.is_none()
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(12) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}
