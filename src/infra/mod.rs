pub mod config;
pub mod docker_adapter;
pub mod logging;

pub use config::{AppConfig, DisplayMode};
pub use docker_adapter::DockerAdapter;
pub use logging::log_writer;
