//! Browse action of the media directory.
//!
//! A [`Resolver`] lists the children of a node, [`ContentDirectory`] gives
//! each of them an id through the [`mediadir_index::MediaIndex`] and a
//! [`BrowseWindow`] encodes the requested slice as a DIDL-Lite document.

pub mod didl;
mod error;
mod local;
mod mime;
mod node;
mod resolver;
mod service;
mod window;

pub use error::BrowseError;
pub use error::Result;
pub use local::LocalFolderResolver;
pub use local::SharedConfig;
pub use mime::MimeType;
pub use node::ContentNode;
pub use node::MediaNode;
pub use node::NodePayload;
pub use resolver::Candidate;
pub use resolver::CandidateId;
pub use resolver::ResolvedParent;
pub use resolver::Resolver;
pub use service::BrowseFlag;
pub use service::BrowseRequest;
pub use service::BrowseResult;
pub use service::ContentDirectory;
pub use window::BrowseWindow;
pub use window::UPNP_DATE_FORMAT;
pub use window::WindowOutput;
