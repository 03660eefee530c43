use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/// Id of the top of the content tree.
pub const ROOT_ID: &str = "0";

/// Parent id reported for [`ROOT_ID`]; it names no node.
pub const ROOT_PARENT_ID: &str = "-1";

/// Top-level partition of the content tree.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RootCategory {
    Video,
    Picture,
    Audio,
    Podcast,
}

impl RootCategory {
    pub const ALL: [RootCategory; 4] = [
        RootCategory::Video,
        RootCategory::Picture,
        RootCategory::Audio,
        RootCategory::Podcast,
    ];

    /// Well-known node id of the category container.
    pub fn id(self) -> &'static str {
        match self {
            RootCategory::Video => "1_VIDEOS",
            RootCategory::Picture => "2_PICTURES",
            RootCategory::Audio => "3_AUDIOS",
            RootCategory::Podcast => "4_PODCASTS",
        }
    }

    pub fn parent_id(self) -> &'static str {
        ROOT_ID
    }

    pub fn title(self) -> &'static str {
        match self {
            RootCategory::Video => "Videos",
            RootCategory::Picture => "Pictures",
            RootCategory::Audio => "Audios",
            RootCategory::Podcast => "Podcasts",
        }
    }

    /// Top-level mime type of the content this category serves.
    pub fn media_type(self) -> &'static str {
        match self {
            RootCategory::Video => "video",
            RootCategory::Picture => "image",
            RootCategory::Audio => "audio",
            RootCategory::Podcast => "podcast",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.id() == id)
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.trim().to_ascii_lowercase().as_str() {
            "video" | "videos" => Some(RootCategory::Video),
            "picture" | "pictures" => Some(RootCategory::Picture),
            "audio" | "audios" => Some(RootCategory::Audio),
            "podcast" | "podcasts" => Some(RootCategory::Podcast),
            _ => None,
        }
    }

    /// Podcast folders point at feeds rather than directories.
    pub fn is_podcast(self) -> bool {
        matches!(self, RootCategory::Podcast)
    }
}

impl fmt::Display for RootCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// True for ids that exist by construction and are never stored in the index.
pub fn is_well_known_id(id: &str) -> bool {
    id == ROOT_ID || id == ROOT_PARENT_ID || RootCategory::from_id(id).is_some()
}
