use crate::ConfigError;
use crate::ConfigurationEvent;
use crate::ConfigurationNode;
use crate::Parameters;
use crate::Result;
use crate::RootCategory;
use serde::Deserialize;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

pub const CONFIG_FILE_NAME: &str = "config.toml";
const HOME_ENV_VAR: &str = "MEDIADIR_HOME";

/// On-disk configuration: parameters plus one folder list per category.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MediaConfig {
    pub parameters: Parameters,
    pub video_folders: Vec<ConfigurationNode>,
    pub picture_folders: Vec<ConfigurationNode>,
    pub audio_folders: Vec<ConfigurationNode>,
    pub podcasts: Vec<ConfigurationNode>,
}

/// Returns `$MEDIADIR_HOME` when set, `~/.mediadir` otherwise.
pub fn find_mediadir_home() -> Result<PathBuf> {
    if let Ok(value) = std::env::var(HOME_ENV_VAR) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".mediadir"))
        .ok_or(ConfigError::HomeNotFound)
}

impl MediaConfig {
    /// Loads the configuration at `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("no configuration at {path:?}; using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|err| ConfigError::io(path, err))?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes through a sibling temp file so a crash never leaves a truncated config.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| ConfigError::io(parent, err))?;
        }
        let data = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, data).map_err(|err| ConfigError::io(&tmp_path, err))?;
        fs::rename(&tmp_path, path).map_err(|err| ConfigError::io(path, err))?;
        Ok(())
    }

    pub fn folders(&self, category: RootCategory) -> &[ConfigurationNode] {
        match category {
            RootCategory::Video => &self.video_folders,
            RootCategory::Picture => &self.picture_folders,
            RootCategory::Audio => &self.audio_folders,
            RootCategory::Podcast => &self.podcasts,
        }
    }

    fn folders_mut(&mut self, category: RootCategory) -> &mut Vec<ConfigurationNode> {
        match category {
            RootCategory::Video => &mut self.video_folders,
            RootCategory::Picture => &mut self.picture_folders,
            RootCategory::Audio => &mut self.audio_folders,
            RootCategory::Podcast => &mut self.podcasts,
        }
    }

    pub fn folder(&self, category: RootCategory, id: &str) -> Result<&ConfigurationNode> {
        self.folders(category)
            .iter()
            .find(|node| node.id == id)
            .ok_or_else(|| ConfigError::UnknownNode {
                category,
                id: id.to_string(),
            })
    }

    /// Finds another folder of `category` that already uses `label` or `path`.
    pub fn find_folder(
        &self,
        category: RootCategory,
        excluded_id: Option<&str>,
        label: &str,
        path: &str,
    ) -> Option<&ConfigurationNode> {
        self.folders(category).iter().find(|node| {
            if excluded_id == Some(node.id.as_str()) {
                return false;
            }
            node.label == label || node.path == path
        })
    }

    /// ADD events for every configured folder, used to seed a fresh index.
    pub fn initial_events(&self) -> Vec<ConfigurationEvent> {
        RootCategory::ALL
            .into_iter()
            .flat_map(|category| {
                self.folders(category)
                    .iter()
                    .cloned()
                    .map(move |node| ConfigurationEvent::add(category, node))
            })
            .collect()
    }

    pub fn add_folder(
        &mut self,
        category: RootCategory,
        label: &str,
        path: &str,
    ) -> Result<ConfigurationEvent> {
        let (label, path) = validate_folder(category, label, path)?;
        self.ensure_unique(category, None, &label, &path)?;
        let node = ConfigurationNode::new(Uuid::new_v4().to_string(), label, path);
        info!("adding {category} folder {} ({})", node.label, node.path);
        self.folders_mut(category).push(node.clone());
        Ok(ConfigurationEvent::add(category, node))
    }

    pub fn update_folder(
        &mut self,
        category: RootCategory,
        id: &str,
        label: &str,
        path: &str,
    ) -> Result<ConfigurationEvent> {
        let (label, path) = validate_folder(category, label, path)?;
        self.ensure_unique(category, Some(id), &label, &path)?;
        let node = self
            .folders_mut(category)
            .iter_mut()
            .find(|node| node.id == id)
            .ok_or_else(|| ConfigError::UnknownNode {
                category,
                id: id.to_string(),
            })?;
        node.label = label;
        node.path = path;
        info!("updated {category} folder {id}");
        Ok(ConfigurationEvent::update(category, node.clone()))
    }

    pub fn delete_folder(
        &mut self,
        category: RootCategory,
        id: &str,
    ) -> Result<ConfigurationEvent> {
        let folders = self.folders_mut(category);
        let position = folders
            .iter()
            .position(|node| node.id == id)
            .ok_or_else(|| ConfigError::UnknownNode {
                category,
                id: id.to_string(),
            })?;
        let node = folders.remove(position);
        info!("deleted {category} folder {id}");
        Ok(ConfigurationEvent::delete(category, node))
    }

    fn ensure_unique(
        &self,
        category: RootCategory,
        excluded_id: Option<&str>,
        label: &str,
        path: &str,
    ) -> Result<()> {
        match self.find_folder(category, excluded_id, label, path) {
            Some(_) => Err(ConfigError::DuplicateFolder {
                category,
                label: label.to_string(),
                path: path.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn validate_folder(category: RootCategory, label: &str, path: &str) -> Result<(String, String)> {
    let label = label.trim();
    let path = path.trim();
    if label.is_empty() {
        return Err(ConfigError::InvalidFolder("label is empty".to_string()));
    }
    if path.is_empty() {
        return Err(ConfigError::InvalidFolder("path is empty".to_string()));
    }
    if category.is_podcast() && !(path.starts_with("http://") || path.starts_with("https://")) {
        return Err(ConfigError::InvalidFolder(format!(
            "podcast path must be an http(s) url: {path}"
        )));
    }
    Ok((label.to_string(), path.to_string()))
}
