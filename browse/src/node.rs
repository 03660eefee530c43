use crate::MimeType;
use chrono::DateTime;
use chrono::Utc;

/// Presentation data shared by containers and items.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaNode {
    pub id: String,
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
    pub icon_url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentNode {
    pub node: MediaNode,
    pub mime: MimeType,
    pub size: u64,
}

/// What a candidate turns into once encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodePayload {
    Folder { child_count: usize },
    Content { mime: MimeType, size: u64 },
}

impl MediaNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modified: None,
            icon_url: None,
        }
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}
