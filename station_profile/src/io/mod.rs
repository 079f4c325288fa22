//! File input and output helpers for profile and segment data.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use crate::error::{ProfileError, Result};

pub mod profile_csv;
pub mod table;

pub use profile_csv::{read_profile_csv, write_profile_csv};
pub use table::{parse_number, read_table, Delimiter, Table};

/// Reads a file to string.
pub fn read_to_string(path: impl AsRef<Path>) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Reads a file and returns its lines with trailing carriage returns removed.
pub fn read_lines(path: impl AsRef<Path>) -> io::Result<Vec<String>> {
    let contents = read_to_string(path)?;
    Ok(contents
        .lines()
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}

/// Temporary file in `dir` carrying the permissions a plain `File::create`
/// would give: those of an existing `dest`, otherwise `0o666` less the umask.
fn temp_file_for(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;
    if let Ok(meta) = fs::metadata(dest) {
        tmp.as_file().set_permissions(meta.permissions())?;
    }
    Ok(tmp)
}

/// Writes `path` all-or-nothing.
///
/// The content is produced into a temporary file created next to `path` and
/// renamed over the destination only once `write` returned successfully, so a
/// failed run never leaves a truncated file behind.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = temp_file_for(dir, path).map_err(|e| ProfileError::sink_io(path, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write(&mut writer).map_err(|e| ProfileError::sink_io(path, e))?;
        writer.flush().map_err(|e| ProfileError::sink_io(path, e))?;
    }
    tmp.persist(path)
        .map_err(|e| ProfileError::sink_io(path, e.error))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Writes a string to `path` all-or-nothing.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, |w| w.write_all(contents.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_string(&path, "first").unwrap();
        write_string(&path, "second").unwrap();
        assert_eq!(read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn failed_write_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_string(&path, "keep").unwrap();
        let err = write_atomic(&path, |w| {
            w.write_all(b"partial")?;
            Err(io::Error::other("boom"))
        })
        .unwrap_err();
        assert!(matches!(err, ProfileError::SinkIo { .. }));
        assert_eq!(read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn missing_directory_is_sink_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = write_string(&path, "x").unwrap_err();
        match err {
            ProfileError::SinkIo { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn new_files_get_regular_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        File::create(&plain).unwrap();
        let path = dir.path().join("out.txt");
        write_string(&path, "x").unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn replaced_files_keep_their_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        write_string(&path, "first").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write_string(&path, "second").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn read_lines_strips_carriage_returns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crlf.txt");
        std::fs::write(&path, "a,b\r\n1,2\r\n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["a,b", "1,2"]);
    }
}
