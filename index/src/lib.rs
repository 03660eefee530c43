//! Identity registry for the media directory.
//!
//! [`MediaIndex`] hands out opaque, reusable ids for every node a browse
//! discovers and keeps them consistent while the configuration and the
//! filesystem change underneath it:
//!
//! - structurally equal elements always map to the same id
//! - configured folders are locked entries at their configuration id
//! - [`MediaIndex::remove_children`] and [`MediaIndex::clean`] work on the
//!   transitive closure of the parent links, never on a single scan
//!
//! The index is purely in memory and rebuilt from configuration at startup.

mod bridge;
mod error;
mod id;
mod model;
mod registry;
mod sweep;

pub use bridge::ConfigurationBridge;
pub use error::IndexError;
pub use id::IdGenerator;
pub use id::UuidGenerator;
pub use model::ElementKey;
pub use model::IndexElement;
pub use registry::CleanReport;
pub use registry::MediaIndex;
pub use sweep::spawn_sweeper;
pub use sweep::spawn_sweeper_every;
