pub mod assign;
pub mod edges;
pub mod scheme;

pub use assign::{bin, bin_age, bin_ages, bin_index, BinnedAges};
pub use edges::{age_extent, Bin, BinEdges};
pub use scheme::{BinScheme, MAX_BINS};
