use crate::domain::{ContainerRuntime, ContainerSummary, ListOptions, RemoveOptions, RuntimeError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
enum RemoveBehavior {
    NotFound,
    Fail(String),
    Hang,
}

/// Scripted in-memory runtime that records every call it receives
#[derive(Debug)]
pub struct MockRuntime {
    containers: RwLock<Vec<ContainerSummary>>,
    commands: RwLock<Vec<String>>,
    list_error: RwLock<Option<String>>,
    remove_behavior: RwLock<HashMap<String, RemoveBehavior>>,
    cancel_after: RwLock<HashMap<String, CancellationToken>>,
    forced: AtomicUsize,
    closed: AtomicBool,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self {
            containers: RwLock::new(Vec::new()),
            commands: RwLock::new(Vec::new()),
            list_error: RwLock::new(None),
            remove_behavior: RwLock::new(HashMap::new()),
            cancel_after: RwLock::new(HashMap::new()),
            forced: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
        }
    }

    pub fn add_container(&self, container: ContainerSummary) {
        self.containers.write().unwrap().push(container);
    }

    /// Makes `list_containers` fail with the given message
    pub fn set_list_error(&self, message: &str) {
        *self.list_error.write().unwrap() = Some(message.to_string());
    }

    /// Makes removal of `id` report that the container is already gone
    pub fn set_remove_not_found(&self, id: &str) {
        self.set_behavior(id, RemoveBehavior::NotFound);
    }

    pub fn set_remove_error(&self, id: &str, message: &str) {
        self.set_behavior(id, RemoveBehavior::Fail(message.to_string()));
    }

    /// Makes removal of `id` never complete
    pub fn set_remove_hang(&self, id: &str) {
        self.set_behavior(id, RemoveBehavior::Hang);
    }

    /// Cancels `token` right after `id` has been removed
    pub fn cancel_after_remove(&self, id: &str, token: CancellationToken) {
        self.cancel_after
            .write()
            .unwrap()
            .insert(id.to_string(), token);
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    pub fn remove_calls(&self) -> usize {
        self.get_commands()
            .iter()
            .filter(|c| c.starts_with("remove:"))
            .count()
    }

    pub fn forced_removals(&self) -> usize {
        self.forced.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn container_exists(&self, id: &str) -> bool {
        self.containers.read().unwrap().iter().any(|c| c.id == id)
    }

    fn set_behavior(&self, id: &str, behavior: RemoveBehavior) {
        self.remove_behavior
            .write()
            .unwrap()
            .insert(id.to_string(), behavior);
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }
}

impl Default for MockRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn list_containers(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ContainerSummary>, RuntimeError> {
        self.record_command(if options.all { "list:all" } else { "list:running" });

        if let Some(message) = self.list_error.read().unwrap().clone() {
            return Err(RuntimeError::Other(message));
        }

        Ok(self.containers.read().unwrap().clone())
    }

    async fn remove_container(
        &self,
        id: &str,
        options: &RemoveOptions,
    ) -> Result<(), RuntimeError> {
        self.record_command(&format!("remove:{id}"));
        if options.force {
            self.forced.fetch_add(1, Ordering::SeqCst);
        }

        let behavior = self.remove_behavior.read().unwrap().get(id).cloned();
        match behavior {
            Some(RemoveBehavior::NotFound) => return Err(RuntimeError::NotFound(id.to_string())),
            Some(RemoveBehavior::Fail(message)) => return Err(RuntimeError::Other(message)),
            Some(RemoveBehavior::Hang) => std::future::pending::<()>().await,
            None => {}
        }

        self.containers.write().unwrap().retain(|c| c.id != id);

        if let Some(token) = self.cancel_after.read().unwrap().get(id) {
            token.cancel();
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), RuntimeError> {
        self.record_command("close");
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
