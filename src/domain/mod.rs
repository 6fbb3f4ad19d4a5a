mod container;
pub mod naming;
pub mod traits;

pub use container::{CandidateSet, CleanupError, CleanupOutcome, ContainerSummary, RemovalFailure};
pub use naming::{ClassifierStrategy, NameClassifier, is_auto_generated_name};
pub use traits::{ContainerRuntime, ListOptions, RemoveOptions, RuntimeError};
