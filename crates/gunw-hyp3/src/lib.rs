//! gunw-hyp3
//!
//! Queries HyP3 processing deployments for finished jobs. Authenticates
//! through Earthdata Login and follows the API's `next` links.

pub mod client;
pub mod error;
pub mod jobs;

pub use crate::client::{EarthdataCredentials, Hyp3Client};
pub use crate::error::Hyp3Error;
pub use crate::jobs::{JobFilter, JobQuery, find_succeeded_jobs};
