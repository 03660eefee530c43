use crate::NodePayload;
use crate::Result;
use chrono::DateTime;
use chrono::Utc;
use mediadir_index::IndexElement;

/// How a candidate gets its id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CandidateId {
    /// A root or category node; never stored in the index.
    WellKnown(String),
    /// A configured folder whose id is owned by the configuration.
    Configured { id: String, element: IndexElement },
    /// A node found while browsing; the index assigns or reuses its id.
    Discovered(IndexElement),
}

/// A child produced by a [`Resolver`], before it has an index id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
    pub icon_url: Option<String>,
    pub payload: NodePayload,
}

impl Candidate {
    pub fn new(id: CandidateId, name: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            id,
            name: name.into(),
            modified: None,
            icon_url: None,
            payload,
        }
    }

    pub fn with_modified(mut self, modified: Option<DateTime<Utc>>) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }
}

/// A browse target looked up in the index. `element` is `None` for
/// well-known ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedParent {
    pub id: String,
    pub element: Option<IndexElement>,
}

/// Source of the content tree below a node.
pub trait Resolver: Send + Sync {
    /// Children of `parent` in a stable order.
    fn children(&self, parent: &ResolvedParent) -> Result<Vec<Candidate>>;

    /// The node itself, for metadata browsing. The returned id is ignored.
    fn describe(&self, node: &ResolvedParent) -> Result<Candidate>;

    /// Filesystem path or url backing an indexed element.
    fn backing_location(&self, element: &IndexElement) -> Option<String>;
}
