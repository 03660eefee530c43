use crate::BrowseError;
use crate::Candidate;
use crate::CandidateId;
use crate::MimeType;
use crate::NodePayload;
use crate::ResolvedParent;
use crate::Resolver;
use crate::Result;
use chrono::DateTime;
use chrono::Utc;
use mediadir_config::MediaConfig;
use mediadir_config::ROOT_ID;
use mediadir_config::RootCategory;
use mediadir_index::IndexElement;
use parking_lot::RwLock;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use tracing::warn;

/// Configuration shared between the browse service and the folder editors.
pub type SharedConfig = Arc<RwLock<MediaConfig>>;

const ROOT_TITLE: &str = "root";

/// Serves the configured folders straight from the local filesystem.
///
/// Podcast feeds are remote and not fetched here, so podcast folders have no
/// children.
#[derive(Clone, Debug)]
pub struct LocalFolderResolver {
    config: SharedConfig,
}

impl LocalFolderResolver {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    fn categories(&self) -> Vec<Candidate> {
        let config = self.config.read();
        RootCategory::ALL
            .into_iter()
            .map(|category| {
                Candidate::new(
                    CandidateId::WellKnown(category.id().to_string()),
                    category.title(),
                    NodePayload::Folder {
                        child_count: config.folders(category).len(),
                    },
                )
            })
            .collect()
    }

    fn configured_folders(&self, category: RootCategory) -> Vec<Candidate> {
        let config = self.config.read();
        config
            .folders(category)
            .iter()
            .map(|node| {
                let element = IndexElement::from_configuration(category, node);
                let (child_count, modified) = if element.local_path {
                    let path = Path::new(&element.path);
                    (count_visible(path), modified_time(path))
                } else {
                    (0, None)
                };
                Candidate::new(
                    CandidateId::Configured {
                        id: node.id.clone(),
                        element,
                    },
                    node.label.clone(),
                    NodePayload::Folder { child_count },
                )
                .with_modified(modified)
            })
            .collect()
    }
}

impl Resolver for LocalFolderResolver {
    fn children(&self, parent: &ResolvedParent) -> Result<Vec<Candidate>> {
        if parent.id == ROOT_ID {
            return Ok(self.categories());
        }
        if let Some(category) = RootCategory::from_id(&parent.id) {
            return Ok(self.configured_folders(category));
        }
        let Some(element) = &parent.element else {
            return Err(BrowseError::UnknownNode(parent.id.clone()));
        };
        if element.category.is_podcast() || !element.local_path {
            return Ok(Vec::new());
        }
        list_directory(&parent.id, element)
    }

    fn describe(&self, node: &ResolvedParent) -> Result<Candidate> {
        let id = CandidateId::WellKnown(node.id.clone());
        if node.id == ROOT_ID {
            let child_count = RootCategory::ALL.len();
            return Ok(Candidate::new(id, ROOT_TITLE, NodePayload::Folder { child_count }));
        }
        if let Some(category) = RootCategory::from_id(&node.id) {
            let child_count = self.config.read().folders(category).len();
            return Ok(Candidate::new(id, category.title(), NodePayload::Folder { child_count }));
        }
        let Some(element) = &node.element else {
            return Err(BrowseError::UnknownNode(node.id.clone()));
        };
        if !element.local_path {
            return Ok(Candidate::new(
                id,
                element.name.clone(),
                NodePayload::Folder { child_count: 0 },
            ));
        }

        let path = Path::new(&element.path);
        let metadata = fs::metadata(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => BrowseError::UnknownNode(node.id.clone()),
            _ => BrowseError::io(path, err),
        })?;
        let payload = if metadata.is_dir() {
            NodePayload::Folder {
                child_count: count_visible(path),
            }
        } else {
            NodePayload::Content {
                mime: MimeType::from_path(path).unwrap_or_else(MimeType::octet_stream),
                size: metadata.len(),
            }
        };
        Ok(Candidate::new(id, element.name.clone(), payload)
            .with_modified(metadata.modified().ok().map(DateTime::<Utc>::from)))
    }

    fn backing_location(&self, element: &IndexElement) -> Option<String> {
        Some(element.path.clone())
    }
}

fn list_directory(parent_id: &str, element: &IndexElement) -> Result<Vec<Candidate>> {
    let dir = Path::new(&element.path);
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("folder {dir:?} does not exist; no children");
            return Ok(Vec::new());
        }
        Err(err) => return Err(BrowseError::io(dir, err)),
    };

    let mut children = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| BrowseError::io(dir, err))?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                // The index keys on UTF-8 paths; a lossy copy would name a
                // file that does not exist.
                warn!("skipping {raw:?} in {dir:?}: file name is not valid UTF-8");
                continue;
            }
        };
        if is_hidden(&name) {
            continue;
        }
        let path = entry.path();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                warn!("skipping {path:?}: {err}");
                continue;
            }
        };
        let payload = if metadata.is_dir() {
            NodePayload::Folder {
                child_count: count_visible(&path),
            }
        } else if metadata.is_file() {
            let Some(mime) = MimeType::from_path(&path)
                .filter(|mime| serves(element.category, mime))
            else {
                continue;
            };
            NodePayload::Content {
                mime,
                size: metadata.len(),
            }
        } else {
            continue;
        };
        let discovered = IndexElement::discovered(
            parent_id,
            element.category,
            path.to_string_lossy(),
            name.clone(),
            true,
        );
        children.push(
            Candidate::new(CandidateId::Discovered(discovered), name, payload)
                .with_modified(metadata.modified().ok().map(DateTime::<Utc>::from)),
        );
    }
    children.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
    Ok(children)
}

/// Whether a file of `mime` belongs in a `category` folder.
fn serves(category: RootCategory, mime: &MimeType) -> bool {
    match category {
        RootCategory::Podcast => false,
        RootCategory::Video if mime.is_subtitle() => true,
        RootCategory::Audio if mime.is_ogg() => true,
        _ => mime.kind() == category.media_type(),
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

fn count_visible(path: &Path) -> usize {
    match fs::read_dir(path) {
        Ok(entries) => entries
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_name().to_str().is_some_and(|name| !is_hidden(name)))
            .count(),
        Err(_) => 0,
    }
}

fn modified_time(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
