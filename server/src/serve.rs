use crate::http::AppState;
use crate::http::router;
use anyhow::Context;
use anyhow::Result;
use mediadir_browse::BrowseRequest;
use mediadir_browse::BrowseResult;
use mediadir_browse::ContentDirectory;
use mediadir_browse::LocalFolderResolver;
use mediadir_config::CONFIG_FILE_NAME;
use mediadir_config::MediaConfig;
use mediadir_config::find_mediadir_home;
use mediadir_index::ConfigurationBridge;
use mediadir_index::MediaIndex;
use mediadir_index::spawn_sweeper;
use parking_lot::RwLock;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing::warn;

#[derive(Clone, Debug)]
pub struct ServeOptions {
    pub config_path: PathBuf,
    pub host: String,
    /// Overrides the configured port.
    pub port: Option<u16>,
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(find_mediadir_home()?.join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Result<MediaConfig> {
    MediaConfig::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Runs the HTTP surface until ctrl-c.
pub async fn run_serve(options: ServeOptions) -> Result<()> {
    let config = load_config(&options.config_path)?;
    let port = options.port.unwrap_or(config.parameters.http_port);
    let server_name = config.parameters.server_name.clone();
    let sweep_delay = config.parameters.cache_clean_delay_minutes;

    let index = MediaIndex::new();
    let bridge = ConfigurationBridge::new(index.clone());
    bridge.seed(&config);

    let shutdown = CancellationToken::new();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let bridge_task = tokio::spawn(bridge.run(events_rx, shutdown.clone()));
    let sweeper = spawn_sweeper(index.clone(), sweep_delay, shutdown.clone());

    let listener = TcpListener::bind((options.host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{port}", options.host))?;
    let addr = listener.local_addr()?;
    let state = AppState::new(
        index,
        Arc::new(RwLock::new(config)),
        options.config_path,
        format!("http://{addr}"),
        events_tx,
    );
    info!("{server_name} listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    if let Err(err) = bridge_task.await {
        warn!("configuration bridge panicked: {err}");
    }
    if let Some(sweeper) = sweeper {
        if let Err(err) = sweeper.await {
            warn!("index sweeper panicked: {err}");
        }
    }
    info!("{server_name} stopped");
    Ok(())
}

async fn shutdown_signal(shutdown: CancellationToken) {
    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(err) = result {
                warn!("failed to listen for ctrl-c: {err}");
            }
        }
        _ = shutdown.cancelled() => {}
    }
    shutdown.cancel();
}

/// Browses once against a freshly seeded index. Only root, category and
/// configured folder ids are known to such an index.
pub fn browse_once(config_path: &Path, request: &BrowseRequest) -> Result<BrowseResult> {
    let config = load_config(config_path)?;
    let http_base = format!("http://127.0.0.1:{}", config.parameters.http_port);
    let index = MediaIndex::new();
    ConfigurationBridge::new(index.clone()).seed(&config);
    let resolver = LocalFolderResolver::new(Arc::new(RwLock::new(config)));
    let directory = ContentDirectory::new(index, resolver, http_base);
    directory
        .browse(request)
        .with_context(|| format!("failed to browse {}", request.object_id))
}
