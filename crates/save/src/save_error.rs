// ---------------------------------------------------------------------------
// SaveError: error type for the save container and its load path
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while writing or reading an airside save file.
#[derive(Debug)]
pub enum SaveError {
    /// I/O error (file not found, permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The buffer does not start with the save file magic bytes.
    NotASaveFile,
    /// The buffer is shorter than the fixed header.
    Truncated { len: usize, need: usize },
    /// Header or payload was written by a newer build.
    VersionMismatch { expected_max: u32, found: u32 },
    /// Payload checksum does not match the header.
    ChecksumMismatch { expected: u32, found: u32 },
    /// LZ4 decompression failed.
    Decompress(String),
    /// Bitcode decoding failed (corrupt or invalid save data).
    Decode(String),
    /// A required resource was missing from the ECS world.
    MissingResource(&'static str),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "I/O error: {e}"),
            SaveError::NotASaveFile => write!(f, "Not an airside save file (bad magic bytes)"),
            SaveError::Truncated { len, need } => write!(
                f,
                "Save file is too short ({len} bytes, need at least {need} for the header)"
            ),
            SaveError::VersionMismatch {
                expected_max,
                found,
            } => write!(
                f,
                "Version mismatch: save is v{found}, but this build only supports up to v{expected_max}"
            ),
            SaveError::ChecksumMismatch { expected, found } => write!(
                f,
                "Save file is corrupted: checksum mismatch (expected {expected:#010X}, got {found:#010X})"
            ),
            SaveError::Decompress(msg) => write!(f, "Decompression error: {msg}"),
            SaveError::Decode(msg) => write!(f, "Decoding error: {msg}"),
            SaveError::MissingResource(name) => {
                write!(f, "Missing required resource: {name}")
            }
        }
    }
}

impl std::error::Error for SaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<bitcode::Error> for SaveError {
    fn from(e: bitcode::Error) -> Self {
        SaveError::Decode(e.to_string())
    }
}

impl From<lz4_flex::block::DecompressError> for SaveError {
    fn from(e: lz4_flex::block::DecompressError) -> Self {
        SaveError::Decompress(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_display_io() {
        let err = SaveError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        let msg = format!("{err}");
        assert!(msg.contains("I/O error"), "got: {msg}");
        assert!(msg.contains("file not found"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_checksum() {
        let err = SaveError::ChecksumMismatch {
            expected: 0xDEAD_BEEF,
            found: 0x1234,
        };
        let msg = format!("{err}");
        assert!(msg.contains("corrupted"), "got: {msg}");
        assert!(msg.contains("0xDEADBEEF"), "got: {msg}");
        assert!(msg.contains("0x00001234"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_version_mismatch() {
        let err = SaveError::VersionMismatch {
            expected_max: 1,
            found: 99,
        };
        let msg = format!("{err}");
        assert!(msg.contains("v99"), "got: {msg}");
        assert!(msg.contains("v1"), "got: {msg}");
    }

    #[test]
    fn test_save_error_display_truncated() {
        let msg = format!("{}", SaveError::Truncated { len: 6, need: 28 });
        assert!(msg.contains("6 bytes"), "got: {msg}");
        assert!(msg.contains("28"), "got: {msg}");
    }

    #[test]
    fn test_save_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let save_err: SaveError = io_err.into();
        assert!(matches!(save_err, SaveError::Io(_)));
    }

    #[test]
    fn test_save_error_source_only_for_io() {
        let io = SaveError::Io(std::io::Error::new(std::io::ErrorKind::Other, "test"));
        assert!(std::error::Error::source(&io).is_some());
        assert!(std::error::Error::source(&SaveError::NotASaveFile).is_none());
    }
}
