use super::ContainerSummary;
use async_trait::async_trait;
use std::fmt::Debug;

/// Options for listing containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    /// Include stopped containers
    pub all: bool,
}

/// Options for removing a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Kill a running container before removing it
    pub force: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The container does not exist (anymore)
    #[error("container {0} não encontrado")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

impl RuntimeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Trait for container runtime operations
#[async_trait]
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List containers known to the runtime
    async fn list_containers(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Remove a container by id
    async fn remove_container(
        &self,
        id: &str,
        options: &RemoveOptions,
    ) -> Result<(), RuntimeError>;

    /// Release the connection to the runtime
    async fn close(&self) -> Result<(), RuntimeError>;
}
