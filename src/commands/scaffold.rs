//! `codesmith scaffold` and `unpack` commands.

use serde::Serialize;

use crate::cli::Format;
use crate::context::ServiceContext;
use crate::pipeline::Pipeline;

use super::render;

/// Execute the `scaffold` command.
///
/// # Errors
///
/// Returns an error string if the description is blank or the archive
/// cannot be written.
pub fn run(ctx: &ServiceContext, spec: &str, format: Format) -> Result<String, String> {
    let outcome = Pipeline::new(ctx).scaffold_archive(spec).map_err(|e| e.to_string())?;
    render(&outcome, format)
}

#[derive(Serialize)]
struct ArchiveListing<'a> {
    archive: &'a str,
    files: Vec<FileEntry<'a>>,
}

#[derive(Serialize)]
struct FileEntry<'a> {
    path: &'a str,
    bytes: usize,
}

/// Execute the `unpack` command: list the files of an archive.
///
/// # Errors
///
/// Returns an error string if the archive does not exist or cannot be read.
pub fn run_unpack(ctx: &ServiceContext, archive: &str, format: Format) -> Result<String, String> {
    let files = Pipeline::new(ctx)
        .open_archive(archive)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("Archive not found: {archive}"))?;
    let listing = ArchiveListing {
        archive,
        files: files.iter().map(|(path, body)| FileEntry { path, bytes: body.len() }).collect(),
    };
    render(&listing, format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaffold_then_unpack() {
        let ctx = ServiceContext::in_memory();
        let out = run(&ctx, "nothing relevant", Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["template"], "static_site");
        let archive = value["archive"].as_str().unwrap().to_string();

        let listing = run_unpack(&ctx, &archive, Format::Json).unwrap();
        assert!(listing.contains("styles.css"));
    }

    #[test]
    fn unpack_unknown_archive_fails() {
        let ctx = ServiceContext::in_memory();
        let err = run_unpack(&ctx, "project_nothere.tar.gz", Format::Json).unwrap_err();
        assert_eq!(err, "Archive not found: project_nothere.tar.gz");
    }
}
