//! ARN helpers.

use crate::error::CoreError;

/// Extract the region from an ARN-like identifier.
///
/// The region is the fourth `:`-delimited field, e.g.
/// `arn:aws:sns:us-west-2:123456789012:topic` yields `us-west-2`.
pub fn region(arn: &str) -> Result<&str, CoreError> {
    match arn.split(':').nth(3) {
        Some(region) if !region.is_empty() => Ok(region),
        _ => Err(CoreError::InvalidArn(arn.to_string())),
    }
}
