pub mod cli;
pub mod domain;
pub mod infra;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    CandidateSet, CleanupOutcome, ContainerRuntime, ContainerSummary, NameClassifier,
    is_auto_generated_name,
};
pub use infra::DockerAdapter;
pub use services::{ContainerDiscovery, ContainerRemover};
