//! Line classification for S3 sync dry-run output.
//!
//! Each input line becomes exactly one [`Record`]: a planned delete, a planned
//! upload, or the raw line when neither grammar matches.
//!
//! # Examples
//!
//! ```
//! use s3dryview::record::{classify, Record};
//!
//! match classify("(dryrun) delete: s3://bkt/old/a.txt") {
//!     Record::Delete(d) => assert_eq!(d.remote_path, "bkt/old/a.txt"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert_eq!(classify("hello"), Record::Unrecognized("hello".to_string()));
//! ```

use tracing::{debug, trace};

/// Prefix of a planned remote delete.
pub const DELETE_PREFIX: &str = "(dryrun) delete: s3://";
/// Prefix of a planned upload.
pub const UPLOAD_PREFIX: &str = "(dryrun) upload: ";
/// Separates the local source from the remote destination in an upload line.
pub const UPLOAD_INFIX: &str = " to s3://";
/// Path fragment that marks Dropbox cache content.
pub const DEFAULT_CACHE_MARKER: &str = "/.dropbox.cache/";

/// A planned delete of a remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delete {
    /// True if the remote path lies under the cache directory.
    pub is_cache_related: bool,
    /// Full remote path including the bucket, e.g. `bkt/dir/file`.
    pub remote_path: String,
}

/// A planned upload of a local file to a remote object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// True if the cache marker occurs anywhere in the local or remote path.
    pub is_cache_related: bool,
    /// Local source path.
    pub local_path: String,
    /// Full remote destination path including the bucket.
    pub remote_path: String,
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Delete(Delete),
    Upload(Upload),
    /// The line as read, untouched.
    Unrecognized(String),
}

/// Classifies lines against a configurable cache marker.
#[derive(Debug, Clone)]
pub struct Classifier {
    cache_marker: String,
}

impl Classifier {
    /// Creates a classifier that flags paths containing `cache_marker`.
    pub fn new(cache_marker: impl Into<String>) -> Self {
        Self {
            cache_marker: cache_marker.into(),
        }
    }

    /// The marker this classifier looks for.
    pub fn cache_marker(&self) -> &str {
        &self.cache_marker
    }

    /// Classifies one line.
    ///
    /// The delete grammar is tried first, then the upload grammar; anything
    /// else comes back as [`Record::Unrecognized`].
    pub fn classify(&self, line: &str) -> Record {
        if let Some(delete) = self.parse_delete(line) {
            return Record::Delete(delete);
        }
        if let Some(upload) = self.parse_upload(line) {
            return Record::Upload(upload);
        }
        Record::Unrecognized(line.to_string())
    }

    fn parse_delete(&self, line: &str) -> Option<Delete> {
        let remote_path = line.strip_prefix(DELETE_PREFIX)?;
        Some(Delete {
            is_cache_related: self.is_cache(remote_path),
            remote_path: remote_path.to_string(),
        })
    }

    fn parse_upload(&self, line: &str) -> Option<Upload> {
        let rest = line.strip_prefix(UPLOAD_PREFIX)?;
        let (local_path, remote_path) = rest.split_once(UPLOAD_INFIX)?;
        // Checked against the unsplit remainder, so a cache directory on
        // either side flags the upload.
        Some(Upload {
            is_cache_related: self.is_cache(rest),
            local_path: local_path.to_string(),
            remote_path: remote_path.to_string(),
        })
    }

    fn is_cache(&self, s: &str) -> bool {
        s.contains(self.cache_marker.as_str())
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_MARKER)
    }
}

/// Classifies a line with the default cache marker.
pub fn classify(line: &str) -> Record {
    Classifier::default().classify(line)
}

/// Input lines sorted into ordered delete, upload and unrecognized sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub deletes: Vec<Delete>,
    pub uploads: Vec<Upload>,
    pub unrecognized: Vec<String>,
}

impl Plan {
    /// Appends one classified record, keeping input order per sequence.
    pub fn push(&mut self, record: Record) {
        match record {
            Record::Delete(d) => self.deletes.push(d),
            Record::Upload(u) => self.uploads.push(u),
            Record::Unrecognized(s) => self.unrecognized.push(s),
        }
    }

    /// Classifies every line and collects the results.
    pub fn from_lines<I, S>(classifier: &Classifier, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut plan = Plan::default();
        for line in lines {
            let record = classifier.classify(line.as_ref());
            trace!(?record, "classified line");
            plan.push(record);
        }
        debug!(
            deletes = plan.deletes.len(),
            uploads = plan.uploads.len(),
            unrecognized = plan.unrecognized.len(),
            "classified input"
        );
        plan
    }
}
