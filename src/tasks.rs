//! Housekeeping around a generation run: cleaning the output folder, merging
//! the SQL scripts, copying the output into the framework checkout and adding
//! file headers to framework sources that lack one.

use crate::generator::SP_ROOT;
use crate::template::{RenderContext, Replacements};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;


/// Name of the script produced by [`merge_procedures`]
pub const MERGED_SCRIPT_NAME: &str = "merged-stored-procedures.sql";

const FILE_HEADER_TEMPLATE: &str = include_str!("../templates/tasks/file_header.cs.txt");

const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Delete the output folder and recreate it empty
pub fn clean_output(dir: &Path) -> anyhow::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to remove output folder {}", dir.display()))?;
        println!("🧹 Output folder cleaned: {dir:?}");
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output folder {}", dir.display()))?;
    tracing::info!(path = %dir.display(), "Output folder ready");
    Ok(())
}

/// Concatenate every `sp/*.sql` script, in name order, into `sp/merged-stored-procedures.sql`
///
/// A previous merge result is not merged into the new one.
pub fn merge_procedures(output: &Path) -> anyhow::Result<PathBuf> {
    let sp_dir = output.join(SP_ROOT);
    let mut scripts: Vec<PathBuf> = fs::read_dir(&sp_dir)
        .with_context(|| format!("Failed to read {}", sp_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().map(|e| e == "sql").unwrap_or(false))
        .filter(|path| path.file_name().map(|n| n != MERGED_SCRIPT_NAME).unwrap_or(false))
        .collect();
    scripts.sort();

    let mut contents = Vec::with_capacity(scripts.len());
    for script in &scripts {
        contents.push(
            fs::read_to_string(script)
                .with_context(|| format!("Failed to read {}", script.display()))?,
        );
    }

    let merged = sp_dir.join(MERGED_SCRIPT_NAME);
    fs::write(&merged, contents.join("\n"))
        .with_context(|| format!("Failed to write {}", merged.display()))?;
    println!("✅ Merged {} script(s) into {merged:?}", scripts.len());
    Ok(merged)
}

/// Mirror the generated tree into the framework folder, overwriting existing files
///
/// Returns the target paths of the copied files.
pub fn copy_to_framework(
    output: &Path,
    framework: &Path,
    dry_run: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    if !output.is_dir() {
        anyhow::bail!("Output folder not found: {}", output.display());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(output).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", output.display()))?;
        let relative = entry
            .path()
            .strip_prefix(output)
            .with_context(|| format!("{} is outside {}", entry.path().display(), output.display()))?;
        let target = framework.join(relative);

        if entry.file_type().is_dir() {
            if !dry_run {
                fs::create_dir_all(&target)
                    .with_context(|| format!("Failed to create directory {}", target.display()))?;
            }
            continue;
        }

        if dry_run {
            println!("📝 Would copy: {:?} -> {target:?}", entry.path());
        } else {
            fs::copy(entry.path(), &target).with_context(|| {
                format!("Failed to copy {} to {}", entry.path().display(), target.display())
            })?;
            tracing::debug!(from = %entry.path().display(), to = %target.display(), "Copied file");
        }
        copied.push(target);
    }

    tracing::info!(
        files = copied.len(),
        framework = %framework.display(),
        dry_run,
        "Copied output to framework"
    );
    Ok(copied)
}

/// Header prepended by [`fill_missing_headers`]
pub fn file_header(ctx: &RenderContext, created: NaiveDate) -> String {
    let r = Replacements::new().with("CreatedDate", created.format("%Y-%m-%d").to_string());
    ctx.render(FILE_HEADER_TEMPLATE, &r)
}

/// Date the file was created, or last modified when the platform has no birth time
fn created_date(path: &Path) -> anyhow::Result<NaiveDate> {
    let metadata =
        fs::metadata(path).with_context(|| format!("Failed to stat {}", path.display()))?;
    let time = metadata
        .created()
        .or_else(|_| metadata.modified())
        .with_context(|| format!("No timestamps available for {}", path.display()))?;
    Ok(DateTime::<Utc>::from(time).date_naive())
}

/// Prepend the standard header to every `.cs` file below `framework` that has no `/*` comment
///
/// A leading byte order mark is dropped. Returns the updated files.
pub fn fill_missing_headers(
    framework: &Path,
    ctx: &RenderContext,
    dry_run: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut updated = Vec::new();
    for entry in WalkDir::new(framework).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", framework.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().map(|e| e != "cs").unwrap_or(true) {
            continue;
        }

        // Sources are not required to be UTF-8, so the check and the rewrite work on bytes
        let contents =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        if contents.windows(2).any(|w| w == b"/*") {
            continue;
        }

        if dry_run {
            println!("📝 Would add file header: {path:?}");
        } else {
            let header = file_header(ctx, created_date(path)?);
            let body = contents.strip_prefix(BOM).unwrap_or(&contents);
            let mut rewritten = header.into_bytes();
            rewritten.extend_from_slice(body);
            fs::write(path, rewritten)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ Added file header to {path:?}");
        }
        updated.push(path.to_path_buf());
    }
    tracing::info!(files = updated.len(), dry_run, "File headers filled");
    Ok(updated)
}
