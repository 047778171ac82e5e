//! Console report for one IDX buffer.
//!
//! The report is written line by line to any [`Write`] sink, in this order:
//! element type, the clamping notice (only when more than two dimensions were
//! declared), the item count, each dimension, the data offset and buffer
//! length, the first record as ASCII art, and finally the record count next to
//! the byte position reached after rendering.

use std::io::Write;

use tracing::{debug, warn};

use crate::{
    parse_header, records, render_first_record_as_ascii, CountMode, IdxError, IdxHeader,
    UNKNOWN_ELEMENT,
};

/// Which count the clamping notice prints.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DimsNotice {
    /// The count after clamping, always 2 (`found 2 dims, reducing to two`)
    #[default]
    Clamped,
    /// The count declared in the file
    Declared,
}

/// Knobs for [`write_report`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    /// How trailing partial records are counted
    pub count_mode: CountMode,
    /// Printed in place of the type name for unmapped type codes
    pub unknown_label: String,
    /// Count shown in the clamping notice
    pub dims_notice: DimsNotice,
}
impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            count_mode: CountMode::default(),
            unknown_label: UNKNOWN_ELEMENT.to_string(),
            dims_notice: DimsNotice::default(),
        }
    }
}

/// Values computed while writing a report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub header: IdxHeader,
    pub record_count: usize,
    /// Byte offset just past the rendered record
    pub cursor: usize,
}

/// Parses `buffer`, renders its first record and writes the report to `out`.
///
/// # Errors
///
/// Fails if the header is truncated, if fewer than two dimensions are present,
/// if the first record runs past the buffer, or if `out` cannot be written.
/// Lines written before the failure stay written.
pub fn write_report<W: Write>(
    buffer: &[u8],
    config: &ReportConfig,
    out: &mut W,
) -> crate::Result<Summary> {
    let header = parse_header(buffer)?;

    match header.element_type {
        Some(ty) => writeln!(out, "{}", ty)?,
        None => {
            warn!(code = header.type_code, "unknown element type code");
            writeln!(out, "{}", config.unknown_label)?;
        }
    }

    if header.was_clamped() {
        let shown = match config.dims_notice {
            DimsNotice::Clamped => header.dimension_count(),
            DimsNotice::Declared => header.declared_dims as usize,
        };
        writeln!(out, "found {} dims, reducing to two", shown)?;
    }
    writeln!(out, "number of images is: {}", header.item_count)?;
    for (i, dim) in header.dims.iter().enumerate() {
        writeln!(out, "dim {} is {}", i + 1, dim)?;
    }

    let data_start = header.data_start();
    writeln!(out, "{} {}", data_start, buffer.len())?;

    let (rows, cols) = header.shape().ok_or(IdxError::MissingDimensions {
        found: header.dimension_count(),
    })?;
    let art = render_first_record_as_ascii(buffer, data_start, rows, cols)?;
    for line in &art {
        writeln!(out, "{}", line)?;
    }

    let record_count = config
        .count_mode
        .count(buffer.len(), data_start, header.record_size());
    let cursor = data_start + art.span();
    writeln!(out, "{} {}", record_count, cursor)?;

    if let (Some(ty), Some(first)) = (header.element_type, records(buffer, &header).next()) {
        let (sum, n) = first
            .values(ty)
            .fold((0.0, 0usize), |(sum, n), value| (sum + value, n + 1));
        if n > 0 {
            debug!(mean = sum / n as f64, elements = n, "first record");
        }
    }
    debug!(
        records = record_count,
        record_size = header.record_size(),
        "report complete"
    );

    Ok(Summary {
        header,
        record_count,
        cursor,
    })
}
