//! Folder configuration for the media directory.
//!
//! The configuration owns the top-level folders of every root category and the
//! named runtime parameters. Every folder mutation yields a
//! [`ConfigurationEvent`] that the caller forwards to the media index.

mod category;
mod error;
mod event;
mod media_config;
mod parameters;

pub use category::ROOT_ID;
pub use category::ROOT_PARENT_ID;
pub use category::RootCategory;
pub use category::is_well_known_id;
pub use error::ConfigError;
pub use error::Result;
pub use event::ConfigurationEvent;
pub use event::ConfigurationEventKind;
pub use event::ConfigurationNode;
pub use media_config::CONFIG_FILE_NAME;
pub use media_config::MediaConfig;
pub use media_config::find_mediadir_home;
pub use parameters::Parameters;
