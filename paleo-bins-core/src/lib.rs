pub mod binning;
pub mod column;
pub mod export;
pub mod occurrence;
pub mod summary;

pub use binning::{
    bin, bin_age, bin_ages, bin_index, Bin, BinEdges, BinScheme, BinnedAges, MAX_BINS,
};
pub use column::{
    age_column, bin_column, bin_columns, bin_with_config, ensure_age_column, taxon_column,
    with_midpoint_column,
};
pub use export::{render_summary_table, summary_to_json, write_summary_csv};
pub use occurrence::{age_range_widths, midpoint_ages};
pub use paleo_bins_common::{Config, LabelMode, PaleoBinsError, Result};
pub use summary::{summarize, summarize_batch, summarize_with_config, BinSummary};
