//! Source tree walking shared by the line-oriented scanners

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Every file under `root` with one of `extensions`, in path order.
pub fn source_files(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable source entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| extensions.iter().any(|x| x == ext))
        })
        .collect()
}

/// Call `visit` with each 1-indexed line number and line of `path`.
///
/// Invalid UTF-8 is decoded lossily so a stray Latin-1 byte does not end the
/// scan early. The file handle is closed before this returns.
pub fn for_each_line(path: &Path, mut visit: impl FnMut(usize, &str)) -> std::io::Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    let mut number = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        number += 1;
        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        visit(number, &String::from_utf8_lossy(line));
    }
}
