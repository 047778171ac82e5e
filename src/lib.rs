//! # idxview - Inspect IDX (MNIST-style) files
//!
//! `idxview` parses the header of an IDX file, walks its fixed-size records and
//! renders the first record as ASCII art.
//!
//! ## Format
//!
//! An IDX file is a small big-endian header followed by row-major element data:
//!
//! ### Header
//! - Bytes 0-1: reserved (not validated)
//! - Byte 2: element type code (`0x08` unsigned byte, `0x09` signed byte,
//!   `0x0b` short, `0x0c` integer, `0x0d` float, `0x0e` double)
//! - Byte 3: number of dimensions
//! - Bytes 4-7: item count
//! - Bytes 8..: one `u32` per dimension
//!
//! Only the first two dimensions are read. A file declaring more is clamped to
//! two, so record data starts at byte 16 for MNIST image files.
//!
//! ## Basic Usage
//!
//! ```rust
//! use idxview::{count_records, parse_header, records, render_first_record_as_ascii, ElementType};
//!
//! # fn main() -> idxview::Result<()> {
//! let buffer = [
//!     0x00, 0x00, 0x08, 0x02, // unsigned bytes, 2 dims
//!     0x00, 0x00, 0x00, 0x02, // 2 items
//!     0x00, 0x00, 0x00, 0x02, // 2 rows
//!     0x00, 0x00, 0x00, 0x02, // 2 cols
//!     0, 1, 0, 1, // first image
//!     1, 0, 1, 0, // second image
//! ];
//!
//! let header = parse_header(&buffer)?;
//! assert_eq!(header.element_type, Some(ElementType::UnsignedByte));
//! assert_eq!(header.dims, vec![2, 2]);
//! assert_eq!(header.record_size(), 4);
//!
//! let count = count_records(buffer.len(), header.data_start(), header.record_size());
//! assert_eq!(count, 2);
//! assert_eq!(records(&buffer, &header).count(), 2);
//!
//! let art = render_first_record_as_ascii(&buffer, header.data_start(), 2, 2)?;
//! let lines: Vec<String> = art.lines().collect();
//! assert_eq!(lines, vec![" #", "# "]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading Files
//!
//! ```rust,no_run
//! use idxview::{write_report, IdxBytes, ReportConfig};
//!
//! # fn main() -> idxview::Result<()> {
//! // Plain files are memory-mapped, compressed ones decompressed in memory
//! let bytes = IdxBytes::open("train-images-idx3-ubyte.gz")?;
//! let summary = write_report(&bytes, &ReportConfig::default(), &mut std::io::stdout())?;
//! println!("{} records", summary.record_count);
//! # Ok(())
//! # }
//! ```

mod constructs;
mod error;
mod io;
mod render;
mod report;

pub use constructs::{
    count_full_records, count_records, decode_big_endian_uint, element_type_name, header_size,
    lookup_element_type, parse_header, record_size, records, CountMode, ElementType, IdxHeader,
    Preamble, Record, Records, DIM_SIZE, MAX_DIMS, PREAMBLE_SIZE, UNKNOWN_ELEMENT,
};
pub use error::{IdxError, Result};
pub use io::{IdxBytes, IDX_MAGIC_PREFIX, SNIFF_LEN};
pub use render::{render_first_record_as_ascii, AsciiArt, Lines, BLANK, LIT};
pub use report::{write_report, DimsNotice, ReportConfig, Summary};
