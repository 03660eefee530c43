use crate::IndexElement;
use crate::MediaIndex;
use mediadir_config::ConfigurationEvent;
use mediadir_config::ConfigurationEventKind;
use mediadir_config::MediaConfig;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::info;

/// Keeps the index in step with configuration edits.
///
/// Every event can be applied more than once with the same end state.
#[derive(Clone, Debug)]
pub struct ConfigurationBridge {
    index: MediaIndex,
}

impl ConfigurationBridge {
    pub fn new(index: MediaIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &MediaIndex {
        &self.index
    }

    /// Registers every configured folder as a locked entry.
    pub fn seed(&self, config: &MediaConfig) {
        let events = config.initial_events();
        let count = events.len();
        for event in &events {
            self.apply(event);
        }
        info!("seeded media index with {count} configured folders");
    }

    pub fn apply(&self, event: &ConfigurationEvent) {
        let category = event.category;
        let node = &event.node;
        debug!("configuration event {:?} on {category} folder {}", event.kind, node.id);
        match event.kind {
            ConfigurationEventKind::Add => {
                self.index
                    .put(&node.id, IndexElement::from_configuration(category, node));
            }
            ConfigurationEventKind::Update => {
                // Podcast entries are left for the sweep.
                self.index.replace(
                    &node.id,
                    IndexElement::from_configuration(category, node),
                    !category.is_podcast(),
                );
            }
            ConfigurationEventKind::Delete => {
                self.index.remove(&node.id);
                if !category.is_podcast() {
                    self.index.remove_children(&node.id);
                }
            }
        }
    }

    /// Applies events from `events` until the channel closes or `shutdown`
    /// fires.
    pub async fn run(
        self,
        mut events: mpsc::UnboundedReceiver<ConfigurationEvent>,
        shutdown: CancellationToken,
    ) {
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = events.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.apply(&event);
                }
            }
        }
        debug!("configuration bridge stopped");
    }
}
