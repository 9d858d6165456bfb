use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::{Builder, NamedTempFile};

use super::OutputError;

/// Write `path` through a temporary file in the same directory.
///
/// The destination is only replaced once `write` has succeeded and the data
/// is flushed; on any error the temporary file is removed and `path` is left
/// untouched. A replaced file keeps its permissions; a new file gets the
/// usual mode for a freshly created file.
pub(crate) fn write_atomically<F>(path: &Path, write: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), OutputError>,
{
    let file_name = path.display().to_string();
    let io_error = |source: std::io::Error| OutputError::Io {
        file: file_name.clone(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = staging_file(path, dir).map_err(io_error)?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush().map_err(io_error)?;
    }

    temp.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}

/// Mode requested for new outputs, narrowed by the process umask
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o666;

#[cfg(unix)]
fn staging_builder() -> Builder<'static, 'static> {
    use std::os::unix::fs::PermissionsExt;

    let mut builder = Builder::new();
    builder.permissions(fs::Permissions::from_mode(NEW_FILE_MODE));
    builder
}

#[cfg(not(unix))]
fn staging_builder() -> Builder<'static, 'static> {
    Builder::new()
}

fn staging_file(path: &Path, dir: &Path) -> io::Result<NamedTempFile> {
    let temp = staging_builder().tempfile_in(dir)?;
    if let Ok(existing) = fs::metadata(path) {
        temp.as_file().set_permissions(existing.permissions())?;
    }
    Ok(temp)
}
