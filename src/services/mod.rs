mod discovery;
mod remover;

pub use discovery::{ContainerDiscovery, DiscoveryError};
pub use remover::ContainerRemover;
