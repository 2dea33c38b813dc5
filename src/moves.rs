//! Detection of files that moved between directories.
//!
//! A dry run reports a move as an unrelated delete and upload. This module
//! pairs them up by file name so the report can show one line per move.

use crate::record::{Delete, Upload};
use crate::s3_path::{dir_name, file_name};
use tracing::{debug, trace};

/// A file deleted in one remote directory and uploaded to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    /// Name shared by the deleted and uploaded object.
    pub file_name: String,
    /// Remote directory of the delete, including the bucket.
    pub from_dir: String,
    /// Remote directory of the upload, including the bucket.
    pub to_dir: String,
}

/// What is left after pairing deletes with uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveExtraction {
    /// Deletes that found no upload, in input order.
    pub deletes: Vec<Delete>,
    /// Uploads no delete consumed, in input order.
    pub uploads: Vec<Upload>,
    /// Detected moves, in the order of their deletes.
    pub moves: Vec<Move>,
}

/// Pairs each delete with the first unconsumed upload of the same file name.
///
/// Deletes are processed in input order and each upload can be consumed at
/// most once. Only the file name is compared, so same-named files in
/// unrelated directories also pair up. Cache flags of paired records are
/// dropped.
///
/// # Examples
///
/// ```
/// use s3dryview::moves::extract_moves;
/// use s3dryview::record::{Delete, Upload};
///
/// let deletes = vec![Delete { is_cache_related: false, remote_path: "bkt/a/x.txt".into() }];
/// let uploads = vec![Upload {
///     is_cache_related: false,
///     local_path: "/tmp/x.txt".into(),
///     remote_path: "bkt/b/x.txt".into(),
/// }];
///
/// let result = extract_moves(&deletes, &uploads);
/// assert!(result.deletes.is_empty());
/// assert!(result.uploads.is_empty());
/// assert_eq!(result.moves[0].from_dir, "bkt/a");
/// assert_eq!(result.moves[0].to_dir, "bkt/b");
/// ```
pub fn extract_moves(deletes: &[Delete], uploads: &[Upload]) -> MoveExtraction {
    let mut consumed = vec![false; uploads.len()];
    let mut result = MoveExtraction::default();

    for delete in deletes {
        let name = file_name(&delete.remote_path);
        let matched = uploads
            .iter()
            .enumerate()
            .find(|(i, upload)| !consumed[*i] && file_name(&upload.remote_path) == name);

        match matched {
            Some((i, upload)) => {
                consumed[i] = true;
                let m = Move {
                    file_name: name.to_string(),
                    from_dir: dir_name(&delete.remote_path).to_string(),
                    to_dir: dir_name(&upload.remote_path).to_string(),
                };
                trace!(?m, "paired delete with upload");
                result.moves.push(m);
            }
            None => result.deletes.push(delete.clone()),
        }
    }

    result.uploads = uploads
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(upload, _)| upload.clone())
        .collect();

    debug!(
        moves = result.moves.len(),
        deletes = result.deletes.len(),
        uploads = result.uploads.len(),
        "extracted moves"
    );
    result
}
