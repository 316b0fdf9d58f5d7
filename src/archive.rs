//! Archive packager: bundles a [`FileSet`] into a gzip-compressed tar and
//! persists it under a freshly generated name.
//!
//! Names carry a short random token and are never checked against what is
//! already stored. Two calls that draw the same token overwrite each other;
//! the odds are bounded by the id generator's entropy only.

use std::io::Read;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::context::ServiceContext;
use crate::error::PipelineError;
use crate::ports::Area;
use crate::scaffold::FileSet;

const PREFIX: &str = "project_";
const SUFFIX: &str = ".tar.gz";

/// Packages `files` and writes the archive to the `generated` area.
///
/// Returns the archive name. Not idempotent: every call writes a new
/// archive under a new name.
///
/// # Errors
///
/// Returns `InvalidInput` for absolute or escaping entry paths and
/// `Storage` if the archive cannot be written.
pub fn package(ctx: &ServiceContext, files: &FileSet) -> Result<String, PipelineError> {
    let bytes = encode(files)?;
    let name = format!("{PREFIX}{}{SUFFIX}", ctx.id_gen.generate_id());
    ctx.storage
        .write(Area::Generated, &name, &bytes)
        .map_err(|e| PipelineError::storage(format!("writing {}/{name}", Area::Generated), e))?;
    tracing::info!(archive = %name, entries = files.len(), bytes = bytes.len(), "archive packaged");
    Ok(name)
}

/// Reads a packaged archive back into its file set.
///
/// Returns `Ok(None)` when no archive has that name.
///
/// # Errors
///
/// Returns `Storage` if the archive cannot be read and `CorruptEntry` if
/// it is not a valid archive of UTF-8 files.
pub fn open(ctx: &ServiceContext, name: &str) -> Result<Option<FileSet>, PipelineError> {
    if !is_archive_name(name) {
        return Ok(None);
    }
    let Some(bytes) = ctx
        .storage
        .read(Area::Generated, name)
        .map_err(|e| PipelineError::storage(format!("reading {}/{name}", Area::Generated), e))?
    else {
        return Ok(None);
    };
    decode(&bytes).map(Some).map_err(|reason| {
        tracing::warn!(archive = %name, %reason, "archive could not be decoded");
        PipelineError::corrupt(Area::Generated, name, reason)
    })
}

/// Serializes a file set to gzip-compressed tar bytes.
///
/// # Errors
///
/// Returns `InvalidInput` if a path is empty, absolute or contains `..`.
pub fn encode(files: &FileSet) -> Result<Vec<u8>, PipelineError> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (path, content) in files {
        check_entry_path(path)?;
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, content.as_bytes())
            .map_err(|e| PipelineError::InvalidInput(format!("cannot archive {path}: {e}")))?;
    }
    let encoder = builder
        .into_inner()
        .map_err(|e| PipelineError::InvalidInput(format!("cannot finish archive: {e}")))?;
    encoder.finish().map_err(|e| PipelineError::InvalidInput(format!("cannot compress archive: {e}")))
}

/// Parses gzip-compressed tar bytes back into a file set.
///
/// # Errors
///
/// Returns a description of the first malformed entry.
pub fn decode(bytes: &[u8]) -> Result<FileSet, String> {
    let mut archive = tar::Archive::new(GzDecoder::new(bytes));
    let mut files = FileSet::new();
    for entry in archive.entries().map_err(|e| e.to_string())? {
        let mut entry = entry.map_err(|e| e.to_string())?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let path = entry.path().map_err(|e| e.to_string())?.to_string_lossy().into_owned();
        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(|e| format!("{path}: {e}"))?;
        files.insert(path, content);
    }
    Ok(files)
}

fn check_entry_path(path: &str) -> Result<(), PipelineError> {
    // Only plain `a/b/c` paths survive a tar round trip unchanged.
    let irregular = path.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..");
    if path.trim().is_empty() || irregular {
        return Err(PipelineError::InvalidInput(format!(
            "archive entry path must be relative and stay inside the archive: {path:?}"
        )));
    }
    Ok(())
}

fn is_archive_name(name: &str) -> bool {
    name.strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(SUFFIX))
        .is_some_and(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric()))
}
