use crate::domain::{
    CandidateSet, CleanupError, CleanupOutcome, ContainerRuntime, ContainerSummary,
    RemovalFailure, RemoveOptions,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const CANCELLED_REASON: &str = "operação cancelada";

/// Removes candidate containers one at a time, continuing past failures
pub struct ContainerRemover {
    runtime: Arc<dyn ContainerRuntime>,
}

impl ContainerRemover {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Removes every candidate, in order.
    ///
    /// Containers that vanished before their turn are neither reported as
    /// removed nor as failed. Once `cancel` fires, the in-flight request and
    /// every remaining candidate are recorded as failures without further
    /// runtime calls.
    pub async fn remove_all(
        &self,
        cancel: &CancellationToken,
        candidates: &CandidateSet,
    ) -> CleanupOutcome {
        let options = RemoveOptions { force: false };
        let mut removed = Vec::new();
        let mut failures = Vec::new();

        info!("Removendo {} container(s)...", candidates.len());

        for container in candidates {
            let name = container.display_name();

            if cancel.is_cancelled() {
                failures.push(failure(container, CANCELLED_REASON));
                continue;
            }

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    warn!("Remoção de {name} interrompida");
                    failures.push(failure(container, CANCELLED_REASON));
                    continue;
                }
                result = self.runtime.remove_container(&container.id, &options) => result,
            };

            match result {
                Ok(()) => {
                    debug!("Container {name} removido");
                    removed.push(name.to_string());
                }
                Err(e) if e.is_not_found() => {
                    debug!("Container {name} já não existe");
                }
                Err(e) => {
                    error!("Falha ao remover {name}: {e}");
                    failures.push(failure(container, &e.to_string()));
                }
            }
        }

        let error = (!failures.is_empty()).then(|| CleanupError::new(failures));
        CleanupOutcome { removed, error }
    }
}

fn failure(container: &ContainerSummary, reason: &str) -> RemovalFailure {
    RemovalFailure {
        id: container.id.clone(),
        name: container.display_name().to_string(),
        reason: reason.to_string(),
    }
}
