//! Folder discovery — qualify files into a playlist.
//!
//! A file qualifies when its extension marks it as a GIF (ASCII
//! case-insensitive) **and** its probed metadata reports more than one
//! frame. Dot-prefixed names (the `._` sidecar convention included) are
//! skipped outright. Files that fail to probe are logged and skipped;
//! they never poison discovery.
//!
//! Entries are sorted by file name so the playback order is stable within
//! a run — and, conveniently, across runs.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::list::{PlayableResource, Playlist};

/// Errors from playlist discovery.
#[derive(Debug, thiserror::Error)]
pub enum PlaylistError {
    /// The folder could not be listed.
    #[error("cannot read folder {}", path.display())]
    Io {
        /// Folder being scanned.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// No qualifying multi-frame resource was found. Fatal: the player
    /// has nothing to show and must terminate with a diagnostic.
    #[error("no playable animated images in {}", path.display())]
    NoResources {
        /// Folder that was scanned.
        path: PathBuf,
    },
}

/// Scan `folder` and build the playlist of qualifying resources.
///
/// # Errors
///
/// [`PlaylistError::Io`] when the folder cannot be listed,
/// [`PlaylistError::NoResources`] when nothing qualifies.
pub fn discover(folder: &Path) -> Result<Playlist, PlaylistError> {
    let read_dir = std::fs::read_dir(folder).map_err(|source| PlaylistError::Io {
        path: folder.to_path_buf(),
        source,
    })?;

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(folder = %folder.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if is_candidate(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    let mut entries = Vec::new();
    for path in candidates {
        match frames::probe(&path) {
            Ok(meta) if meta.frame_count >= 2 => {
                entries.push(PlayableResource { path, meta });
            }
            Ok(meta) => {
                info!(
                    path = %path.display(),
                    frames = meta.frame_count,
                    "skipping still image"
                );
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping undecodable file");
            }
        }
    }

    info!(folder = %folder.display(), count = entries.len(), "discovery complete");
    Playlist::from_entries(entries).ok_or(PlaylistError::NoResources {
        path: folder.to_path_buf(),
    })
}

/// Name-level filter: visible `.gif` files only.
fn is_candidate(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None => return false,
    };
    if name.starts_with('.') {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}
