//! HTTP control surface and process wiring for the `mediadir` binary.

mod http;
mod serve;

pub use http::AppError;
pub use http::AppState;
pub use http::FolderRequest;
pub use http::HealthResponse;
pub use http::NodeResponse;
pub use http::router;
pub use serve::ServeOptions;
pub use serve::browse_once;
pub use serve::default_config_path;
pub use serve::load_config;
pub use serve::run_serve;
