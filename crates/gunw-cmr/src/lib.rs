//! gunw-cmr
//!
//! Granule search against NASA's Common Metadata Repository. Used to find
//! which products the archive already holds.

pub mod client;
pub mod error;
pub mod search;

pub use crate::client::CmrClient;
pub use crate::error::CmrError;
pub use crate::search::{Collection, IdentifierField, SearchQuery};
