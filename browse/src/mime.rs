use serde::Serialize;
use std::fmt;
use std::path::Path;

pub const TYPE_VIDEO: &str = "video";
pub const TYPE_AUDIO: &str = "audio";
pub const TYPE_IMAGE: &str = "image";

/// `type/subtype` pair, lowercased.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MimeType {
    kind: String,
    subtype: String,
}

impl MimeType {
    pub fn parse(value: &str) -> Option<Self> {
        let essence = value.split(';').next()?.trim();
        let (kind, subtype) = essence.split_once('/')?;
        if kind.is_empty() || subtype.is_empty() || subtype.contains('/') {
            return None;
        }
        Some(Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }

    pub fn subtitle() -> Self {
        Self::new("application", "x-subrip")
    }

    pub fn ogg() -> Self {
        Self::new("application", "ogg")
    }

    pub fn octet_stream() -> Self {
        Self::new("application", "octet-stream")
    }

    fn new(kind: &str, subtype: &str) -> Self {
        Self {
            kind: kind.to_string(),
            subtype: subtype.to_string(),
        }
    }

    /// Guesses from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "srt" => return Some(Self::subtitle()),
            "ogg" | "oga" | "ogx" => return Some(Self::ogg()),
            _ => {}
        }
        mime_guess::from_ext(&extension)
            .first_raw()
            .and_then(Self::parse)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn is_subtitle(&self) -> bool {
        *self == Self::subtitle()
    }

    pub fn is_ogg(&self) -> bool {
        *self == Self::ogg()
    }

    /// Mime type advertised in `protocolInfo`; renderers expect subtitles
    /// as `smi/caption`.
    pub fn upnp_mime_type(&self) -> String {
        if self.is_subtitle() {
            "smi/caption".to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.subtype)
    }
}
