use mediadir_config::ConfigurationNode;
use mediadir_config::RootCategory;
use serde::Serialize;
use std::fmt;

/// Identity record of an indexed node.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct IndexElement {
    pub parent_id: String,
    pub category: RootCategory,
    /// Local filesystem path or remote url.
    pub path: String,
    pub name: String,
    /// Created from configuration; never removed by the sweep.
    pub locked: bool,
    /// `path` lives on the local filesystem and is checked for existence.
    pub local_path: bool,
}

/// The part of an element that decides whether two elements are the same
/// logical node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementKey {
    pub category: RootCategory,
    pub parent_id: String,
    pub path: String,
    pub name: String,
}

impl IndexElement {
    /// Locked element for a configured folder. Podcast feeds are remote.
    pub fn from_configuration(category: RootCategory, node: &ConfigurationNode) -> Self {
        Self {
            parent_id: category.id().to_string(),
            category,
            path: node.path.clone(),
            name: node.label.clone(),
            locked: true,
            local_path: !category.is_podcast(),
        }
    }

    /// Unlocked element for a node found while browsing.
    pub fn discovered(
        parent_id: impl Into<String>,
        category: RootCategory,
        path: impl Into<String>,
        name: impl Into<String>,
        local_path: bool,
    ) -> Self {
        Self {
            parent_id: parent_id.into(),
            category,
            path: path.into(),
            name: name.into(),
            locked: false,
            local_path,
        }
    }

    pub fn key(&self) -> ElementKey {
        ElementKey {
            category: self.category,
            parent_id: self.parent_id.clone(),
            path: self.path.clone(),
            name: self.name.clone(),
        }
    }
}

impl fmt::Display for IndexElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}] parent={}{}",
            self.category,
            self.name,
            self.path,
            self.parent_id,
            if self.locked { " locked" } else { "" }
        )
    }
}
