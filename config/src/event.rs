use crate::RootCategory;
use serde::Deserialize;
use serde::Serialize;

/// A configured top-level folder (or podcast feed).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ConfigurationNode {
    pub id: String,
    pub label: String,
    pub path: String,
}

impl ConfigurationNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            path: path.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationEventKind {
    Add,
    Update,
    Delete,
}

/// Folder change notification. Delivery is at-least-once, so consumers must
/// be able to apply the same event twice.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfigurationEvent {
    pub kind: ConfigurationEventKind,
    pub category: RootCategory,
    pub node: ConfigurationNode,
}

impl ConfigurationEvent {
    pub fn add(category: RootCategory, node: ConfigurationNode) -> Self {
        Self {
            kind: ConfigurationEventKind::Add,
            category,
            node,
        }
    }

    pub fn update(category: RootCategory, node: ConfigurationNode) -> Self {
        Self {
            kind: ConfigurationEventKind::Update,
            category,
            node,
        }
    }

    pub fn delete(category: RootCategory, node: ConfigurationNode) -> Self {
        Self {
            kind: ConfigurationEventKind::Delete,
            category,
            node,
        }
    }
}
