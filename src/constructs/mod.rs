mod element;
mod header;
mod record;

pub use element::{element_type_name, lookup_element_type, ElementType, UNKNOWN_ELEMENT};
pub use header::{
    decode_big_endian_uint, header_size, parse_header, IdxHeader, Preamble, DIM_SIZE, MAX_DIMS,
    PREAMBLE_SIZE,
};
pub use record::{
    count_full_records, count_records, record_size, records, CountMode, Record, Records,
};
