//! Temporary files for uploaded documents

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;

/// An uploaded document written to disk. The temp file name keeps the
/// client's extension so the loader can dispatch on it; the file is
/// removed when this value is dropped.
pub struct TempUpload {
    file: NamedTempFile,
    filename: String,
}

impl TempUpload {
    /// Write `data` to a fresh `upload-*.<ext>` temp file
    pub fn write(filename: &str, data: &[u8]) -> Result<Self> {
        let suffix = Path::new(filename)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile()?;
        file.write_all(data)?;
        file.flush()?;

        tracing::debug!(
            "Stored upload {} ({} bytes) at {}",
            filename,
            data.len(),
            file.path().display()
        );

        Ok(Self {
            file,
            filename: filename.to_string(),
        })
    }

    /// Location on disk
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Name the client uploaded the file under
    pub fn filename(&self) -> &str {
        &self.filename
    }
}
