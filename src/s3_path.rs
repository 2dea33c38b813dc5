//! Helpers for slicing `bucket/dir.../file` object paths.
//!
//! These never fail: a path without any `/` is treated as a bare file name
//! with an empty directory and an empty bucket-relative remainder.

/// Returns the final segment after the last `/`, or the whole string.
///
/// ```
/// use s3dryview::s3_path::file_name;
///
/// assert_eq!(file_name("bkt/a/x.txt"), "x.txt");
/// assert_eq!(file_name("x.txt"), "x.txt");
/// ```
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// Returns everything before the last `/`, without a trailing slash.
///
/// ```
/// use s3dryview::s3_path::dir_name;
///
/// assert_eq!(dir_name("bkt/a/x.txt"), "bkt/a");
/// assert_eq!(dir_name("x.txt"), "");
/// ```
pub fn dir_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(i) => &path[..i],
        None => "",
    }
}

/// Drops the leading bucket segment (everything up to the first `/`).
///
/// ```
/// use s3dryview::s3_path::strip_bucket;
///
/// assert_eq!(strip_bucket("bkt/a/x.txt"), "a/x.txt");
/// assert_eq!(strip_bucket("bkt"), "");
/// ```
pub fn strip_bucket(path: &str) -> &str {
    match path.find('/') {
        Some(i) => &path[i + 1..],
        None => "",
    }
}
