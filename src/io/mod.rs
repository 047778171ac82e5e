mod load;

pub use load::{IdxBytes, IDX_MAGIC_PREFIX, SNIFF_LEN};
