// ---------------------------------------------------------------------------
// file_header – Save file header with magic bytes, version, and checksum
// ---------------------------------------------------------------------------
//
// Header format (28 bytes, fixed-size, little-endian):
//   [0..4]   Magic bytes: "AIRS" (0x41495253)
//   [4..8]   Header format version (u32)
//   [8..12]  Flags (u32: bit 0 = LZ4 compressed payload)
//   [12..20] Timestamp (Unix epoch, u64)
//   [20..24] Uncompressed payload size (u32)
//   [24..28] xxHash32 checksum of the stored payload (everything after the header)
//
// The checksum covers the bytes as stored, so corruption is caught before
// decompression is attempted.

use xxhash_rust::xxh32::xxh32;

use crate::save_error::SaveError;

/// Magic bytes identifying an airside save file.
pub const MAGIC: [u8; 4] = *b"AIRS";

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 28;

/// Header layout version. Distinct from the payload version in
/// [`crate::save_codec::CURRENT_SAVE_VERSION`].
pub const HEADER_FORMAT_VERSION: u32 = 1;

/// Payload is LZ4 block-compressed with its size prepended.
pub const FLAG_COMPRESSED: u32 = 1 << 0;

const XXHASH_SEED: u32 = 0;

/// Parsed file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub format_version: u32,
    pub flags: u32,
    pub timestamp: u64,
    pub uncompressed_size: u32,
    pub checksum: u32,
}

impl FileHeader {
    fn new(stored: &[u8], uncompressed_size: usize, flags: u32) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            format_version: HEADER_FORMAT_VERSION,
            flags,
            timestamp,
            uncompressed_size: uncompressed_size as u32,
            checksum: xxh32(stored, XXHASH_SEED),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&self.format_version.to_le_bytes());
        out.extend_from_slice(&self.flags.to_le_bytes());
        out.extend_from_slice(&self.timestamp.to_le_bytes());
        out.extend_from_slice(&self.uncompressed_size.to_le_bytes());
        out.extend_from_slice(&self.checksum.to_le_bytes());
    }
}

/// Wrap an uncompressed payload: `[header] ++ [data]`.
pub fn wrap_with_header(data: &[u8]) -> Vec<u8> {
    let header = FileHeader::new(data, data.len(), 0);
    let mut out = Vec::with_capacity(HEADER_SIZE + data.len());
    header.write(&mut out);
    out.extend_from_slice(data);
    out
}

/// Compress `data` with LZ4 and wrap it with a header carrying
/// [`FLAG_COMPRESSED`].
pub fn wrap_with_header_compressed(data: &[u8]) -> Vec<u8> {
    let compressed = lz4_flex::compress_prepend_size(data);
    let header = FileHeader::new(&compressed, data.len(), FLAG_COMPRESSED);
    let mut out = Vec::with_capacity(HEADER_SIZE + compressed.len());
    header.write(&mut out);
    out.extend_from_slice(&compressed);
    out
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Parse and validate the header, returning it with the stored payload.
///
/// # Errors
///
/// - [`SaveError::NotASaveFile`] if the magic bytes are missing
/// - [`SaveError::Truncated`] if the buffer is shorter than the header
/// - [`SaveError::VersionMismatch`] for a header from a newer build
/// - [`SaveError::ChecksumMismatch`] if the payload was damaged
pub fn unwrap_header(bytes: &[u8]) -> Result<(FileHeader, &[u8]), SaveError> {
    if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
        return Err(SaveError::NotASaveFile);
    }
    if bytes.len() < HEADER_SIZE {
        return Err(SaveError::Truncated {
            len: bytes.len(),
            need: HEADER_SIZE,
        });
    }

    let format_version = read_u32(bytes, 4);
    if format_version > HEADER_FORMAT_VERSION {
        return Err(SaveError::VersionMismatch {
            expected_max: HEADER_FORMAT_VERSION,
            found: format_version,
        });
    }
    let flags = read_u32(bytes, 8);
    let timestamp = u64::from_le_bytes([
        bytes[12], bytes[13], bytes[14], bytes[15], bytes[16], bytes[17], bytes[18], bytes[19],
    ]);
    let uncompressed_size = read_u32(bytes, 20);
    let checksum = read_u32(bytes, 24);

    let payload = &bytes[HEADER_SIZE..];
    let computed = xxh32(payload, XXHASH_SEED);
    if computed != checksum {
        return Err(SaveError::ChecksumMismatch {
            expected: checksum,
            found: computed,
        });
    }

    let header = FileHeader {
        format_version,
        flags,
        timestamp,
        uncompressed_size,
        checksum,
    };
    Ok((header, payload))
}

/// Unwrap and, if flagged, decompress. Returns the bitcode payload.
pub fn read_payload(bytes: &[u8]) -> Result<(FileHeader, Vec<u8>), SaveError> {
    let (header, stored) = unwrap_header(bytes)?;
    let data = if header.is_compressed() {
        lz4_flex::decompress_size_prepended(stored)?
    } else {
        stored.to_vec()
    };
    if data.len() != header.uncompressed_size as usize {
        return Err(SaveError::Decompress(format!(
            "payload is {} bytes, header says {}",
            data.len(),
            header.uncompressed_size
        )));
    }
    Ok((header, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_and_unwrap_roundtrip() {
        let data = b"hello airside save data";
        let wrapped = wrap_with_header(data);
        assert_eq!(&wrapped[..4], b"AIRS");
        assert_eq!(wrapped.len(), HEADER_SIZE + data.len());

        let (header, payload) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert_eq!(header.format_version, HEADER_FORMAT_VERSION);
        assert!(!header.is_compressed());
        assert_eq!(header.uncompressed_size, data.len() as u32);
        assert_eq!(payload, data);
    }

    #[test]
    fn test_foreign_bytes_rejected() {
        let data = b"\x00\x01\x02\x03some other file";
        assert!(matches!(unwrap_header(data), Err(SaveError::NotASaveFile)));
        assert!(matches!(unwrap_header(b""), Err(SaveError::NotASaveFile)));
    }

    #[test]
    fn test_corrupted_checksum_detected() {
        let mut wrapped = wrap_with_header(b"test payload");
        let last = wrapped.len() - 1;
        wrapped[last] ^= 0xFF;

        match unwrap_header(&wrapped) {
            Err(SaveError::ChecksumMismatch { expected, found }) => assert_ne!(expected, found),
            other => panic!("expected checksum mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_future_header_version_rejected() {
        let mut wrapped = wrap_with_header(b"test payload");
        wrapped[4..8].copy_from_slice(&999u32.to_le_bytes());

        match unwrap_header(&wrapped) {
            Err(SaveError::VersionMismatch { found, .. }) => assert_eq!(found, 999),
            other => panic!("expected version mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_header_detected() {
        let result = unwrap_header(b"AIRS\x01\x00");
        assert!(matches!(
            result,
            Err(SaveError::Truncated { len: 6, need: HEADER_SIZE })
        ));
    }

    #[test]
    fn test_compressed_roundtrip() {
        let data = b"airside airside airside airside airside airside";
        let wrapped = wrap_with_header_compressed(data);

        let (header, stored) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert!(header.is_compressed());
        assert_eq!(header.flags & FLAG_COMPRESSED, FLAG_COMPRESSED);
        assert_eq!(header.uncompressed_size, data.len() as u32);
        assert_ne!(stored, data.as_slice());

        let (_, payload) = read_payload(&wrapped).expect("payload decompresses");
        assert_eq!(payload, data);
    }

    #[test]
    fn test_compression_shrinks_repetitive_payload() {
        let data = vec![0x5A_u8; 64 * 1024];
        let plain = wrap_with_header(&data);
        let packed = wrap_with_header_compressed(&data);
        assert!(
            packed.len() < plain.len() / 2,
            "compressed {} vs plain {}",
            packed.len(),
            plain.len()
        );
    }

    #[test]
    fn test_size_mismatch_reported() {
        let mut wrapped = wrap_with_header(b"four");
        wrapped[20..24].copy_from_slice(&5u32.to_le_bytes());
        assert!(matches!(read_payload(&wrapped), Err(SaveError::Decompress(_))));
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let wrapped = wrap_with_header(b"");
        assert_eq!(wrapped.len(), HEADER_SIZE);
        let (header, payload) = unwrap_header(&wrapped).expect("unwrap should succeed");
        assert_eq!(header.uncompressed_size, 0);
        assert!(payload.is_empty());
    }
}
