//! Check command implementation.

use anyhow::{bail, Context, Result};
use plan_check_core::RuleSet;
use plan_check_io::{LibreDwgParser, XlsxRoomTableParser};
use plan_check_rules::validator_with_rules;
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use super::output;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    rooms: Option<&Path>,
    format: OutputFormat,
    dwgread: &Path,
    timeout: u64,
    config: Option<&Path>,
) -> Result<()> {
    let rules = match config {
        Some(p) => RuleSet::from_file(p)
            .with_context(|| format!("Failed to load rule set: {}", p.display()))?,
        None => RuleSet::default(),
    };

    let validator = validator_with_rules(rules);
    let parser = LibreDwgParser::new()
        .with_binary(dwgread)
        .with_timeout(Duration::from_secs(timeout));
    let room_parser = XlsxRoomTableParser::new();

    let drawings = discover_drawings(path)?;
    if drawings.is_empty() {
        bail!("no drawings found under {}", path.display());
    }

    tracing::info!(
        "Validating {} drawing(s) with {} checker(s)",
        drawings.len(),
        validator.checker_count()
    );

    let mut any_invalid = false;
    for drawing in &drawings {
        let result = match rooms {
            Some(table) => {
                validator.validate_file_with_rooms(&parser, drawing, &room_parser, table)
            }
            None => validator.validate_file(&parser, drawing),
        };
        output::print(&result, format)?;
        any_invalid |= !result.valid;
    }

    // Exit with error code if any drawing failed validation
    if any_invalid {
        std::process::exit(1);
    }

    Ok(())
}

/// Collects the drawings to validate: the file itself, or every `*.dwg`
/// under a directory.
fn discover_drawings(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut drawings = Vec::new();
    for entry in WalkDir::new(path) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("dwg"))
        {
            drawings.push(entry.into_path());
        }
    }
    drawings.sort();
    Ok(drawings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovers_dwg_files_recursively_and_sorted() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("og1");
        std::fs::create_dir(&nested).expect("nested dir");
        std::fs::write(dir.path().join("b.dwg"), b"").expect("file written");
        std::fs::write(dir.path().join("a.DWG"), b"").expect("file written");
        std::fs::write(nested.join("c.dwg"), b"").expect("file written");
        std::fs::write(dir.path().join("notes.txt"), b"").expect("file written");

        let drawings = discover_drawings(dir.path()).expect("discovery succeeds");
        let names: Vec<String> = drawings
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        assert_eq!(names, vec!["a.DWG", "b.dwg", "c.dwg"]);
    }

    #[test]
    fn single_file_is_returned_as_is() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("plan.dwg");
        std::fs::write(&file, b"").expect("file written");

        let drawings = discover_drawings(&file).expect("discovery succeeds");
        assert_eq!(drawings, vec![file]);
    }
}
