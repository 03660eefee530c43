use crate::BrowseError;
use crate::ContentNode;
use crate::MediaNode;
use crate::Result;
use crate::didl::DidlContainer;
use crate::didl::DidlDocument;
use crate::didl::DidlItem;
use crate::didl::DidlMetadata;
use crate::didl::DidlResource;
use crate::didl::ItemClass;
use iri_string::types::UriReferenceStr;
use tracing::debug;

/// `dc:date` layout, e.g. `2014-03-01T10:15:30+0000`.
pub const UPNP_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Offset/limit accumulator for one browse response.
///
/// Call [`BrowseWindow::accept_node`] once for every candidate, in order, and
/// encode a candidate only when it returned true. Scanning continues after the
/// window is full so the total count covers every candidate.
#[derive(Debug)]
pub struct BrowseWindow {
    first_result: usize,
    max_results: usize,
    item_count: usize,
    total_count: usize,
    document: DidlDocument,
}

/// Finished window.
#[derive(Debug)]
pub struct WindowOutput {
    pub document: String,
    pub item_count: usize,
    pub total_count: usize,
}

impl BrowseWindow {
    /// `max_results == 0` means no limit.
    pub fn new(first_result: usize, max_results: usize) -> Self {
        Self {
            first_result,
            max_results,
            item_count: 0,
            total_count: 0,
            document: DidlDocument::default(),
        }
    }

    pub fn accept_node(&mut self) -> bool {
        self.total_count += 1;
        self.total_count > self.first_result
            && (self.max_results == 0 || self.item_count < self.max_results)
    }

    /// Adds a typed item. Content with a mime type that has no item class is
    /// skipped and `Ok(false)` is returned.
    pub fn add_item(
        &mut self,
        parent_id: &str,
        content: &ContentNode,
        url: &str,
    ) -> Result<bool> {
        let Some(class) = ItemClass::for_mime(&content.mime) else {
            debug!(
                "skipping {} with unsupported mime type {}",
                content.node.name, content.mime
            );
            return Ok(false);
        };
        let metadata = metadata(&content.node)?;
        self.document.add_item(DidlItem {
            id: content.node.id.clone(),
            parent_id: parent_id.to_string(),
            title: content.node.name.clone(),
            class,
            resource: DidlResource::http(&content.mime, content.size, url),
            metadata,
        });
        self.item_count += 1;
        Ok(true)
    }

    pub fn add_container(
        &mut self,
        parent_id: &str,
        node: &MediaNode,
        child_count: usize,
    ) -> Result<()> {
        let metadata = metadata(node)?;
        self.document.add_container(DidlContainer {
            id: node.id.clone(),
            parent_id: parent_id.to_string(),
            title: node.name.clone(),
            child_count,
            searchable: true,
            metadata,
        });
        self.item_count += 1;
        Ok(())
    }

    pub fn first_result(&self) -> usize {
        self.first_result
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Index just past the last encoded node.
    pub fn result_count(&self) -> usize {
        self.item_count + self.first_result
    }

    pub fn document(&self) -> &DidlDocument {
        &self.document
    }

    pub fn finalize(self) -> Result<WindowOutput> {
        Ok(WindowOutput {
            document: self.document.render()?,
            item_count: self.item_count,
            total_count: self.total_count,
        })
    }
}

fn metadata(node: &MediaNode) -> Result<DidlMetadata> {
    let date = node
        .modified
        .map(|modified| modified.format(UPNP_DATE_FORMAT).to_string());
    let icon = match &node.icon_url {
        Some(icon_url) => Some(icon_reference(&node.id, icon_url)?),
        None => None,
    };
    Ok(DidlMetadata { date, icon })
}

/// Icons must be RFC 3986 URI references; relative references are kept as
/// they are and illegal characters are rejected rather than escaped.
fn icon_reference(id: &str, icon_url: &str) -> Result<String> {
    UriReferenceStr::new(icon_url)
        .map(|reference| reference.as_str().to_string())
        .map_err(|err| {
            BrowseError::CannotProcess(format!("invalid icon url {icon_url:?} on {id}: {err}"))
        })
}
