//! S3 key conventions for GUNW products.
//!
//! Pure string functions. Keys always use `/` separators regardless of
//! platform, so these don't go through `std::path`.

pub const BROWSE_EXTENSION: &str = "png";
pub const METADATA_EXTENSION: &str = "json";

/// Split a key into `(parent_with_slash, file_name)`.
fn split_file_name(key: &str) -> (&str, &str) {
    match key.rfind('/') {
        Some(idx) => key.split_at(idx + 1),
        None => ("", key),
    }
}

/// Byte offset of the extension dot within a file name, if any.
///
/// A leading dot (".nc") is part of the name, not an extension.
fn extension_dot(file_name: &str) -> Option<usize> {
    match file_name.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == file_name.len() => None,
        Some(idx) => Some(idx),
    }
}

/// Final path component with its extension removed.
///
/// `foo/bar.nc` -> `bar`, `foo/bar.tar.gz` -> `bar.tar`.
pub fn product_name(key: &str) -> &str {
    let (_, file_name) = split_file_name(key);
    match extension_dot(file_name) {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Replace the key's extension, appending one when the name has none.
pub fn with_extension(key: &str, extension: &str) -> String {
    let (parent, file_name) = split_file_name(key);
    let stem = match extension_dot(file_name) {
        Some(idx) => &file_name[..idx],
        None => file_name,
    };
    format!("{parent}{stem}.{extension}")
}

pub fn browse(key: &str) -> String {
    with_extension(key, BROWSE_EXTENSION)
}

pub fn metadata(key: &str) -> String {
    with_extension(key, METADATA_EXTENSION)
}
