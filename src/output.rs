use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// One result per line, each newline terminated.
pub fn format_output(results: &[i64]) -> String {
    let mut out = String::new();
    for result in results {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}", result);
    }
    out
}

/// Writes `contents` to a temporary file next to `path`, then renames it into
/// place so readers never see a partially written file.
pub fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmpfile = NamedTempFile::new_in(dir)?;
    tmpfile.write_all(contents.as_bytes())?;
    tmpfile.flush()?;
    tmpfile.persist(path).map_err(|e| e.error)?;
    Ok(())
}
