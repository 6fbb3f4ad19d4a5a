use crate::domain::{
    CandidateSet, ContainerRuntime, ListOptions, NameClassifier, RuntimeError,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("listando containers: {0}")]
    List(#[source] RuntimeError),
    #[error("listagem de containers cancelada")]
    Cancelled,
}

/// Finds containers that still carry a runtime-generated name
pub struct ContainerDiscovery {
    runtime: Arc<dyn ContainerRuntime>,
    classifier: NameClassifier,
}

impl ContainerDiscovery {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, classifier: NameClassifier) -> Self {
        Self {
            runtime,
            classifier,
        }
    }

    /// Lists every container (stopped ones included) and keeps, in listing
    /// order, those whose primary name was auto-generated.
    pub async fn find_candidates(
        &self,
        cancel: &CancellationToken,
    ) -> Result<CandidateSet, DiscoveryError> {
        let listing = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(DiscoveryError::Cancelled),
            result = self.runtime.list_containers(&ListOptions { all: true }) => {
                result.map_err(DiscoveryError::List)?
            }
        };

        let total = listing.len();
        let candidates: Vec<_> = listing
            .into_iter()
            .filter(|container| match container.primary_name() {
                Some(name) if self.classifier.is_auto_generated(name) => true,
                Some(name) => {
                    debug!("Ignorando {name}: nome escolhido pelo usuário");
                    false
                }
                None => {
                    debug!("Ignorando {}: container sem nome", container.id);
                    false
                }
            })
            .collect();

        info!(
            "{} de {} container(s) com nome gerado automaticamente",
            candidates.len(),
            total
        );

        Ok(CandidateSet::from_classified(candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClassifierStrategy, ContainerSummary};
    use crate::test_support::MockRuntime;

    fn summary(id: &str, names: &[&str]) -> ContainerSummary {
        ContainerSummary::new(
            id,
            names.iter().map(|n| n.to_string()).collect(),
            "alpine:latest",
        )
    }

    #[tokio::test]
    async fn test_find_candidates_filters_and_keeps_order() {
        let mock = Arc::new(MockRuntime::new());
        mock.add_container(summary("id1", &["/inspiring_franklin"]));
        mock.add_container(summary("id2", &["/custom_app"]));
        mock.add_container(summary("id3", &["/agitated_wescoff7"]));
        mock.add_container(summary("id4", &[]));
        mock.add_container(summary("id5", &["/My_App"]));
        mock.add_container(summary("id6", &["/zen_turing"]));

        let discovery = ContainerDiscovery::new(mock.clone(), NameClassifier::default());
        let candidates = discovery
            .find_candidates(&CancellationToken::new())
            .await
            .unwrap();

        let ids: Vec<_> = candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["id1", "id3", "id6"]);
        assert_eq!(mock.get_commands(), ["list:all"]);
    }

    #[tokio::test]
    async fn test_find_candidates_uses_first_name_only() {
        let mock = Arc::new(MockRuntime::new());
        mock.add_container(summary("id1", &["/web", "/inspiring_franklin"]));
        mock.add_container(summary("id2", &["/inspiring_franklin", "/web"]));

        let discovery = ContainerDiscovery::new(mock, NameClassifier::default());
        let candidates = discovery
            .find_candidates(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.get(0).unwrap().id, "id2");
    }

    #[tokio::test]
    async fn test_find_candidates_structural_strategy() {
        let mock = Arc::new(MockRuntime::new());
        mock.add_container(summary("id1", &["/custom_app"]));
        mock.add_container(summary("id2", &["/custom_app_2"]));

        let discovery = ContainerDiscovery::new(
            mock,
            NameClassifier::new(ClassifierStrategy::Structural),
        );
        let candidates = discovery
            .find_candidates(&CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates.get(0).unwrap().id, "id1");
    }

    #[tokio::test]
    async fn test_find_candidates_propagates_list_failure() {
        let mock = Arc::new(MockRuntime::new());
        mock.add_container(summary("id1", &["/inspiring_franklin"]));
        mock.set_list_error("daemon unreachable");

        let discovery = ContainerDiscovery::new(mock, NameClassifier::default());
        let err = discovery
            .find_candidates(&CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::List(_)));
        assert!(err.to_string().contains("daemon unreachable"));
    }

    #[tokio::test]
    async fn test_find_candidates_respects_cancellation() {
        let mock = Arc::new(MockRuntime::new());
        mock.add_container(summary("id1", &["/inspiring_franklin"]));

        let cancel = CancellationToken::new();
        cancel.cancel();

        let discovery = ContainerDiscovery::new(mock.clone(), NameClassifier::default());
        let err = discovery.find_candidates(&cancel).await.unwrap_err();

        assert!(matches!(err, DiscoveryError::Cancelled));
        assert!(mock.get_commands().is_empty());
    }
}
