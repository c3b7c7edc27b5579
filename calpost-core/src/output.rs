//! Delivery formats for rendered messages.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::compose::Messages;
use crate::config::OutputPaths;
use crate::error::{CalpostError, CalpostResult};

pub const REVIEW_BANNER: &str = "== REVIEW & COPY INTO DISCORD: ==";
pub const REVIEW_END: &str = "== END ==";

/// Body of a chat webhook post.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub content: &'a str,
}

/// Write one `{"content": ...}` file per bucket into `dir`.
///
/// Either every payload file is written or none is: payloads are staged in
/// temp files next to their targets and only moved into place once all of
/// them were written.
pub fn write_payloads(
    messages: &Messages,
    outputs: &OutputPaths,
    dir: &Path,
) -> CalpostResult<Vec<PathBuf>> {
    let mut staged = Vec::with_capacity(3);
    for (bucket, content) in messages.iter() {
        let json = serde_json::to_string(&Payload { content })
            .map_err(|e| CalpostError::Serialization(e.to_string()))?;
        let path = dir.join(outputs.for_bucket(bucket));
        let file = stage(&path, &json).map_err(|source| CalpostError::OutputWrite {
            path: path.clone(),
            source,
        })?;
        staged.push((path, file));
    }

    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (path, file) in staged {
        if let Err(e) = file.persist(&path) {
            for done in &written {
                if let Err(cleanup) = std::fs::remove_file(done) {
                    log::warn!("Could not remove {}: {}", done.display(), cleanup);
                }
            }
            return Err(CalpostError::OutputWrite {
                path,
                source: e.error,
            });
        }
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Write `json` to a temp file in the directory `path` will live in.
fn stage(path: &Path, json: &str) -> std::io::Result<NamedTempFile> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// All messages between review banners, for pasting by hand.
pub fn review_block(messages: &Messages) -> String {
    let body = messages
        .iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n{}\n{}", REVIEW_BANNER, body, REVIEW_END)
}
