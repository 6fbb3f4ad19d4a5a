use crate::domain::{ContainerRuntime, ContainerSummary, ListOptions, RemoveOptions, RuntimeError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use bollard::errors::Error as BollardError;
use bollard::query_parameters::{ListContainersOptionsBuilder, RemoveContainerOptionsBuilder};
use bollard::{API_DEFAULT_VERSION, Docker};
use std::time::Duration;
use tracing::{debug, warn};

/// Talks to a Docker-compatible engine API (Docker or Podman's socket)
#[derive(Debug)]
pub struct DockerAdapter {
    docker: Docker,
}

impl DockerAdapter {
    /// Connects to `host`, or to the local defaults (`DOCKER_HOST` or the
    /// standard socket) when none is given, and checks the daemon answers.
    pub async fn connect(host: Option<&str>, timeout: Duration) -> Result<Self> {
        let docker = match host {
            Some(host) if host.starts_with("tcp://") || host.starts_with("http://") => {
                Docker::connect_with_http(host, timeout.as_secs(), API_DEFAULT_VERSION)
                    .with_context(|| format!("conectando ao engine em {host}"))?
            }
            Some(host) => {
                let socket = host.strip_prefix("unix://").unwrap_or(host);
                Docker::connect_with_socket(socket, timeout.as_secs(), API_DEFAULT_VERSION)
                    .with_context(|| format!("conectando ao engine em {host}"))?
            }
            None => Docker::connect_with_local_defaults()
                .context("conectando ao engine local")?
                .with_timeout(timeout),
        };

        docker
            .ping()
            .await
            .context("engine de containers não respondeu ao ping")?;
        debug!("Conectado ao engine de containers");

        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerAdapter {
    async fn list_containers(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let query = ListContainersOptionsBuilder::new().all(options.all).build();
        let listing = self
            .docker
            .list_containers(Some(query))
            .await
            .map_err(|e| RuntimeError::Other(e.to_string()))?;

        Ok(listing
            .into_iter()
            .filter_map(|summary| {
                let Some(id) = summary.id.filter(|id| !id.is_empty()) else {
                    warn!("Container sem id ignorado na listagem");
                    return None;
                };
                Some(ContainerSummary {
                    id,
                    names: summary.names.unwrap_or_default(),
                    image: summary.image.unwrap_or_default(),
                })
            })
            .collect())
    }

    async fn remove_container(
        &self,
        id: &str,
        options: &RemoveOptions,
    ) -> Result<(), RuntimeError> {
        let query = RemoveContainerOptionsBuilder::new()
            .force(options.force)
            .build();

        match self.docker.remove_container(id, Some(query)).await {
            Ok(()) => Ok(()),
            Err(e) if is_not_found_error(&e) => Err(RuntimeError::NotFound(id.to_string())),
            Err(e) => Err(RuntimeError::Other(e.to_string())),
        }
    }

    async fn close(&self) -> Result<(), RuntimeError> {
        // bollard releases its connection pool on drop
        debug!("Encerrando conexão com o engine de containers");
        Ok(())
    }
}

fn is_not_found_error(error: &BollardError) -> bool {
    matches!(
        error,
        BollardError::DockerResponseServerError {
            status_code: 404,
            ..
        }
    )
}
