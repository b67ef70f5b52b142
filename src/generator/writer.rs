use super::{GeneratedFile, Ownership};
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Overwrite user-owned files that already exist
    pub force: bool,
    /// Report what would be written without touching the disk
    pub dry_run: bool,
}

/// Outcome of [`write_files`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
}

/// Write `files` below `root`.
///
/// Generated files are always rewritten. User-owned files are skipped when
/// they already exist unless `options.force` is set.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or a file cannot be written
pub fn write_files(
    root: &Path,
    files: &[GeneratedFile],
    options: WriteOptions,
) -> anyhow::Result<WriteReport> {
    let mut report = WriteReport::default();
    for file in files {
        let path = root.join(&file.path);
        if file.ownership == Ownership::UserOwned && path.exists() && !options.force {
            println!("⚠️  Skipping existing file: {path:?}");
            report.skipped.push(path);
            continue;
        }
        if options.dry_run {
            println!("📝 Would write: {path:?}");
            report.written.push(path);
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("✅ Generated {path:?}");
        report.written.push(path);
    }
    tracing::info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        dry_run = options.dry_run,
        "Finished writing files"
    );
    Ok(report)
}
