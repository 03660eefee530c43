//! DIDL-Lite result documents.

use crate::BrowseError;
use crate::MimeType;
use crate::Result;
use quick_xml::Writer;
use quick_xml::events::BytesEnd;
use quick_xml::events::BytesStart;
use quick_xml::events::BytesText;
use quick_xml::events::Event;
use std::fmt;

const DIDL_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/DIDL-Lite/";
const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
const UPNP_NAMESPACE: &str = "urn:schemas-upnp-org:metadata-1-0/upnp/";

pub const CONTAINER_CLASS: &str = "object.container";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemClass {
    Movie,
    MusicTrack,
    Photo,
    TextItem,
}

impl ItemClass {
    /// Item class for a content mime type; `None` means the content is not
    /// served.
    pub fn for_mime(mime: &MimeType) -> Option<Self> {
        match mime.kind() {
            crate::mime::TYPE_VIDEO => Some(ItemClass::Movie),
            crate::mime::TYPE_AUDIO => Some(ItemClass::MusicTrack),
            crate::mime::TYPE_IMAGE => Some(ItemClass::Photo),
            _ if mime.is_subtitle() => Some(ItemClass::TextItem),
            _ if mime.is_ogg() => Some(ItemClass::MusicTrack),
            _ => None,
        }
    }

    pub fn upnp_class(self) -> &'static str {
        match self {
            ItemClass::Movie => "object.item.videoItem.movie",
            ItemClass::MusicTrack => "object.item.audioItem.musicTrack",
            ItemClass::Photo => "object.item.imageItem.photo",
            ItemClass::TextItem => "object.item.textItem",
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.upnp_class())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DidlMetadata {
    /// Already formatted `dc:date` value.
    pub date: Option<String>,
    /// Validated URI reference, absolute or relative.
    pub icon: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidlContainer {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub child_count: usize,
    pub searchable: bool,
    pub metadata: DidlMetadata,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidlResource {
    pub protocol_info: String,
    pub size: u64,
    pub url: String,
}

impl DidlResource {
    pub fn http(mime: &MimeType, size: u64, url: impl Into<String>) -> Self {
        Self {
            protocol_info: format!("http-get:*:{}:*", mime.upnp_mime_type()),
            size,
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DidlItem {
    pub id: String,
    pub parent_id: String,
    pub title: String,
    pub class: ItemClass,
    pub resource: DidlResource,
    pub metadata: DidlMetadata,
}

/// Containers and items of one browse response. Rendering writes every
/// container before the first item.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DidlDocument {
    containers: Vec<DidlContainer>,
    items: Vec<DidlItem>,
}

impl DidlDocument {
    pub fn add_container(&mut self, container: DidlContainer) {
        self.containers.push(container);
    }

    pub fn add_item(&mut self, item: DidlItem) {
        self.items.push(item);
    }

    pub fn containers(&self) -> &[DidlContainer] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len() + self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());
        let mut root = BytesStart::new("DIDL-Lite");
        root.push_attribute(("xmlns", DIDL_NAMESPACE));
        root.push_attribute(("xmlns:dc", DC_NAMESPACE));
        root.push_attribute(("xmlns:upnp", UPNP_NAMESPACE));
        writer.write_event(Event::Start(root)).map_err(cannot_process)?;

        for container in &self.containers {
            let child_count = container.child_count.to_string();
            let mut start = BytesStart::new("container");
            start.push_attribute(("id", container.id.as_str()));
            start.push_attribute(("parentID", container.parent_id.as_str()));
            start.push_attribute(("restricted", "1"));
            start.push_attribute(("searchable", if container.searchable { "1" } else { "0" }));
            start.push_attribute(("childCount", child_count.as_str()));
            writer.write_event(Event::Start(start)).map_err(cannot_process)?;
            write_text(&mut writer, "dc:title", &container.title)?;
            write_text(&mut writer, "upnp:class", CONTAINER_CLASS)?;
            write_metadata(&mut writer, &container.metadata)?;
            writer
                .write_event(Event::End(BytesEnd::new("container")))
                .map_err(cannot_process)?;
        }

        for item in &self.items {
            let mut start = BytesStart::new("item");
            start.push_attribute(("id", item.id.as_str()));
            start.push_attribute(("parentID", item.parent_id.as_str()));
            start.push_attribute(("restricted", "1"));
            writer.write_event(Event::Start(start)).map_err(cannot_process)?;
            write_text(&mut writer, "dc:title", &item.title)?;
            write_text(&mut writer, "upnp:class", item.class.upnp_class())?;
            write_metadata(&mut writer, &item.metadata)?;

            let size = item.resource.size.to_string();
            let mut res = BytesStart::new("res");
            res.push_attribute(("protocolInfo", item.resource.protocol_info.as_str()));
            res.push_attribute(("size", size.as_str()));
            writer.write_event(Event::Start(res)).map_err(cannot_process)?;
            writer
                .write_event(Event::Text(BytesText::new(&item.resource.url)))
                .map_err(cannot_process)?;
            writer
                .write_event(Event::End(BytesEnd::new("res")))
                .map_err(cannot_process)?;

            writer
                .write_event(Event::End(BytesEnd::new("item")))
                .map_err(cannot_process)?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("DIDL-Lite")))
            .map_err(cannot_process)?;
        String::from_utf8(writer.into_inner()).map_err(cannot_process)
    }
}

fn write_metadata(writer: &mut Writer<Vec<u8>>, metadata: &DidlMetadata) -> Result<()> {
    if let Some(date) = &metadata.date {
        write_text(writer, "dc:date", date)?;
    }
    if let Some(icon) = &metadata.icon {
        write_text(writer, "upnp:icon", icon)?;
    }
    Ok(())
}

fn write_text(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(cannot_process)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(cannot_process)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(cannot_process)?;
    Ok(())
}

fn cannot_process(err: impl fmt::Display) -> BrowseError {
    BrowseError::CannotProcess(err.to_string())
}
