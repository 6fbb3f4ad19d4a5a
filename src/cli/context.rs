use crate::domain::{ContainerRuntime, NameClassifier};
use crate::infra::{AppConfig, DockerAdapter};
use crate::services::{ContainerDiscovery, ContainerRemover};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Everything one sweep session needs, built once at startup
#[derive(Debug)]
pub struct SweepContext {
    runtime: Arc<dyn ContainerRuntime>,
    config: AppConfig,
    cancel: CancellationToken,
}

impl SweepContext {
    /// Connects to the engine described by `config`
    pub async fn connect(config: AppConfig) -> Result<Self> {
        let host = config.host();
        let adapter = DockerAdapter::connect(host.as_deref(), config.timeout())
            .await
            .context("falha ao inicializar cliente do engine de containers")?;
        Ok(Self::with_runtime(Arc::new(adapter), config))
    }

    pub fn with_runtime(runtime: Arc<dyn ContainerRuntime>, config: AppConfig) -> Self {
        Self {
            runtime,
            config,
            cancel: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn classifier(&self) -> NameClassifier {
        NameClassifier::new(self.config.strategy())
    }

    /// Token cancelled on Ctrl-C; every runtime call of the session observes it
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn discovery(&self) -> ContainerDiscovery {
        ContainerDiscovery::new(self.runtime.clone(), self.classifier())
    }

    pub fn remover(&self) -> ContainerRemover {
        ContainerRemover::new(self.runtime.clone())
    }

    /// Releases the runtime connection; consumes the context so it runs once
    pub async fn close(self) {
        if let Err(e) = self.runtime.close().await {
            warn!("Falha ao encerrar conexão com o engine: {e}");
        }
    }
}
