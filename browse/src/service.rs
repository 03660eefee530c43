use crate::BrowseError;
use crate::BrowseWindow;
use crate::Candidate;
use crate::CandidateId;
use crate::ContentNode;
use crate::MediaNode;
use crate::NodePayload;
use crate::ResolvedParent;
use crate::Resolver;
use crate::Result;
use mediadir_config::ROOT_ID;
use mediadir_config::ROOT_PARENT_ID;
use mediadir_config::RootCategory;
use mediadir_config::is_well_known_id;
use mediadir_index::MediaIndex;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BrowseFlag {
    #[default]
    BrowseDirectChildren,
    BrowseMetadata,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseRequest {
    pub object_id: String,
    #[serde(default)]
    pub browse_flag: BrowseFlag,
    #[serde(default)]
    pub starting_index: usize,
    /// Zero requests every child.
    #[serde(default)]
    pub requested_count: usize,
}

impl BrowseRequest {
    pub fn children(
        object_id: impl Into<String>,
        starting_index: usize,
        requested_count: usize,
    ) -> Self {
        Self {
            object_id: object_id.into(),
            browse_flag: BrowseFlag::BrowseDirectChildren,
            starting_index,
            requested_count,
        }
    }

    pub fn metadata(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            browse_flag: BrowseFlag::BrowseMetadata,
            starting_index: 0,
            requested_count: 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResult {
    /// DIDL-Lite document.
    pub result: String,
    pub number_returned: usize,
    pub total_matches: usize,
}

/// The browse action: resolves children, registers them in the index and
/// encodes the requested window.
pub struct ContentDirectory<R> {
    index: MediaIndex,
    resolver: R,
    http_base: String,
}

impl<R: Resolver> ContentDirectory<R> {
    pub fn new(index: MediaIndex, resolver: R, http_base: impl Into<String>) -> Self {
        let http_base = http_base.into().trim_end_matches('/').to_string();
        Self {
            index,
            resolver,
            http_base,
        }
    }

    pub fn index(&self) -> &MediaIndex {
        &self.index
    }

    pub fn browse(&self, request: &BrowseRequest) -> Result<BrowseResult> {
        let node = self.resolve(&request.object_id)?;
        let output = match request.browse_flag {
            BrowseFlag::BrowseDirectChildren => {
                let candidates = self.resolver.children(&node)?;
                let mut window = BrowseWindow::new(request.starting_index, request.requested_count);
                for candidate in candidates {
                    let id = self.register(&candidate);
                    if window.accept_node() {
                        self.encode(&mut window, &node.id, id, candidate)?;
                    }
                }
                window.finalize()?
            }
            BrowseFlag::BrowseMetadata => {
                let candidate = self.resolver.describe(&node)?;
                let mut window = BrowseWindow::new(0, 0);
                window.accept_node();
                self.encode(&mut window, &metadata_parent_id(&node), node.id.clone(), candidate)?;
                window.finalize()?
            }
        };
        debug!(
            "browse {} ({:?}): returned {} of {}",
            request.object_id, request.browse_flag, output.item_count, output.total_count
        );
        Ok(BrowseResult {
            result: output.document,
            number_returned: output.item_count,
            total_matches: output.total_count,
        })
    }

    /// Path or url behind an indexed node.
    pub fn backing_location(&self, id: &str) -> Result<String> {
        let element = self.index.lookup(id)?;
        self.resolver
            .backing_location(&element)
            .ok_or_else(|| BrowseError::CannotProcess(format!("node {id} has no backing location")))
    }

    pub fn content_url(&self, id: &str) -> String {
        let id: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
        format!("{}/content?id={id}", self.http_base)
    }

    fn resolve(&self, id: &str) -> Result<ResolvedParent> {
        if is_well_known_id(id) && id != ROOT_PARENT_ID {
            return Ok(ResolvedParent {
                id: id.to_string(),
                element: None,
            });
        }
        let element = self.index.lookup(id)?;
        Ok(ResolvedParent {
            id: id.to_string(),
            element: Some(element),
        })
    }

    fn register(&self, candidate: &Candidate) -> String {
        match &candidate.id {
            CandidateId::WellKnown(id) => id.clone(),
            CandidateId::Configured { id, element } => {
                self.index.put(id, element.clone());
                id.clone()
            }
            CandidateId::Discovered(element) => self.index.add(element.clone()),
        }
    }

    fn encode(
        &self,
        window: &mut BrowseWindow,
        parent_id: &str,
        id: String,
        candidate: Candidate,
    ) -> Result<()> {
        let node = MediaNode {
            id,
            name: candidate.name,
            modified: candidate.modified,
            icon_url: candidate.icon_url,
        };
        match candidate.payload {
            NodePayload::Folder { child_count } => {
                window.add_container(parent_id, &node, child_count)
            }
            NodePayload::Content { mime, size } => {
                let url = self.content_url(&node.id);
                window.add_item(parent_id, &ContentNode { node, mime, size }, &url)?;
                Ok(())
            }
        }
    }
}

fn metadata_parent_id(node: &ResolvedParent) -> String {
    if node.id == ROOT_ID {
        return ROOT_PARENT_ID.to_string();
    }
    if let Some(category) = RootCategory::from_id(&node.id) {
        return category.parent_id().to_string();
    }
    node.element
        .as_ref()
        .map(|element| element.parent_id.clone())
        .unwrap_or_else(|| ROOT_ID.to_string())
}
