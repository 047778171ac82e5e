//! Loading an IDX file into one immutable byte buffer.
//!
//! Plain IDX files always begin with two zero bytes, so peeking at the first
//! bytes is enough to tell them apart from a compressed stream. Plain files are
//! memory-mapped; anything else is handed to niffler and decompressed fully
//! into memory. Inputs shorter than niffler's sniff window are kept as raw
//! bytes so that header parsing reports them as truncated.

use std::{
    fs::File,
    io::{BufReader, Cursor, Read, Seek, SeekFrom},
    ops::Deref,
    path::Path,
};

use memmap2::Mmap;
use tracing::debug;

/// Leading bytes of every uncompressed IDX file.
pub const IDX_MAGIC_PREFIX: [u8; 2] = [0x00, 0x00];

/// Bytes niffler needs to recognize a compression format.
pub const SNIFF_LEN: usize = 5;

/// Whole-file contents, either mapped or owned.
#[derive(Debug)]
pub enum IdxBytes {
    Mapped(Mmap),
    Owned(Vec<u8>),
}
impl IdxBytes {
    /// Loads the file at `path`, decompressing it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read, or if a
    /// compressed stream is corrupt.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let mut prefix = [0u8; SNIFF_LEN];
        let peeked = read_prefix(&mut file, &mut prefix)?;
        file.seek(SeekFrom::Start(0))?;

        if peeked < SNIFF_LEN {
            // too short to be compressed, and too short to be worth mapping
            let mut buffer = Vec::with_capacity(peeked);
            file.read_to_end(&mut buffer)?;
            return Ok(Self::Owned(buffer));
        }

        if prefix[..IDX_MAGIC_PREFIX.len()] == IDX_MAGIC_PREFIX {
            debug!(path = %path.display(), "mapping plain IDX file");
            // Safety: the map is read-only and the file is not modified while mapped
            let map = unsafe { Mmap::map(&file)? };
            Ok(Self::Mapped(map))
        } else {
            debug!(path = %path.display(), "reading compressed IDX file");
            Self::from_reader(BufReader::new(file))
        }
    }

    /// Reads a whole stream into memory, decompressing it if niffler
    /// recognizes its format.
    ///
    /// Streams shorter than [`SNIFF_LEN`] are returned as they are.
    pub fn from_reader<R: Read + Send + 'static>(mut rdr: R) -> crate::Result<Self> {
        let mut prefix = [0u8; SNIFF_LEN];
        let peeked = read_prefix(&mut rdr, &mut prefix)?;
        if peeked < SNIFF_LEN {
            return Ok(Self::Owned(prefix[..peeked].to_vec()));
        }
        let rdr = Cursor::new(prefix).chain(rdr);

        #[cfg(feature = "niffler")]
        let (mut rdr, _format) = niffler::send::get_reader(Box::new(rdr))
            .map_err(|e| crate::IdxError::Decompress(Box::new(e)))?;
        #[cfg(not(feature = "niffler"))]
        let mut rdr = rdr;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;
        Ok(Self::Owned(buffer))
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }
}
impl Deref for IdxBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(map) => &map[..],
            Self::Owned(buffer) => &buffer[..],
        }
    }
}
impl AsRef<[u8]> for IdxBytes {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

/// Fills as much of `buf` as the reader allows, returning the byte count.
fn read_prefix<R: Read>(rdr: &mut R, buf: &mut [u8]) -> crate::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match rdr.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(read)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdxError;
    use std::io::Write;

    fn two_images() -> Vec<u8> {
        vec![
            0x00, 0x00, 0x08, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00,
            0x00, 0x02, 0, 1, 0, 1, 1, 0, 1, 0,
        ]
    }

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_open_plain_is_mapped() {
        let data = two_images();
        let file = write_temp(&data);

        let bytes = IdxBytes::open(file.path()).unwrap();
        assert!(bytes.is_mapped());
        assert_eq!(&*bytes, data.as_slice());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = IdxBytes::open(dir.path().join("train-images.idx3-ubyte"));
        match result {
            Err(IdxError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_open_tiny_file() {
        let file = write_temp(&[0x00]);
        let bytes = IdxBytes::open(file.path()).unwrap();
        assert!(!bytes.is_mapped());
        assert_eq!(&bytes[..], &[0x00u8]);

        let file = write_temp(&[]);
        let bytes = IdxBytes::open(file.path()).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_open_short_file_with_reserved_bytes() {
        // reserved bytes are not validated, so this is a truncated header
        let file = write_temp(&[0x01, 0x02, 0x08, 0x02]);
        let bytes = IdxBytes::open(file.path()).unwrap();
        assert!(!bytes.is_mapped());
        assert_eq!(&bytes[..], &[0x01u8, 0x02, 0x08, 0x02]);
        assert!(matches!(
            crate::parse_header(&bytes),
            Err(IdxError::TruncatedHeader {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn test_open_reserved_bytes_not_validated() {
        let mut data = two_images();
        data[0] = 0x01;
        data[1] = 0x02;
        let file = write_temp(&data);

        let bytes = IdxBytes::open(file.path()).unwrap();
        assert_eq!(&*bytes, data.as_slice());
        assert_eq!(crate::parse_header(&bytes).unwrap().dims, vec![2, 2]);
    }

    #[test]
    fn test_from_reader_short_stream() {
        let bytes = IdxBytes::from_reader(Cursor::new(vec![0x00u8, 0x00, 0x08, 0x02])).unwrap();
        assert_eq!(&bytes[..], &[0x00u8, 0x00, 0x08, 0x02]);
        assert!(matches!(
            crate::parse_header(&bytes),
            Err(IdxError::TruncatedHeader { actual: 4, .. })
        ));

        let bytes = IdxBytes::from_reader(Cursor::new(Vec::<u8>::new())).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_from_reader_plain() {
        let data = two_images();
        let bytes = IdxBytes::from_reader(Cursor::new(data.clone())).unwrap();
        assert!(!bytes.is_mapped());
        assert_eq!(&*bytes, data.as_slice());
    }

    #[cfg(feature = "niffler")]
    #[test]
    fn test_open_gzip_is_decompressed() {
        // gzip of `two_images()`
        let gz = [
            0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0x63, 0x60, 0xe0, 0x60,
            0x62, 0x60, 0x60, 0x40, 0x60, 0x46, 0x06, 0x46, 0x20, 0x62, 0x00, 0x00, 0x77, 0x94,
            0x60, 0x5e, 0x18, 0x00, 0x00, 0x00,
        ];
        let file = write_temp(&gz);

        let bytes = IdxBytes::open(file.path()).unwrap();
        assert!(!bytes.is_mapped());
        assert_eq!(&*bytes, two_images().as_slice());
    }

    #[cfg(feature = "niffler")]
    #[test]
    fn test_open_corrupt_gzip() {
        let mut gz = vec![0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03];
        gz.extend_from_slice(&[0xff; 16]);
        let file = write_temp(&gz);
        assert!(IdxBytes::open(file.path()).is_err());
    }

    #[test]
    fn test_read_prefix_short_reader() {
        let mut buf = [0u8; 2];
        let n = read_prefix(&mut Cursor::new(vec![7u8]), &mut buf).unwrap();
        assert_eq!(n, 1);
        assert_eq!(buf[0], 7);
    }
}
