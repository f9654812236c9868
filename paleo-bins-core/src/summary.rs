use crate::binning::{bin, BinScheme, BinnedAges};
use crate::column::{age_column, ensure_age_column, taxon_column};
use arrow::record_batch::RecordBatch;
use paleo_bins_common::{Config, PaleoBinsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-bin tally of occurrences and, when taxa are given, distinct taxa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinSummary {
    pub ordinal: usize,
    pub lower: f64,
    pub upper: f64,
    pub midpoint: f64,
    pub occurrences: u64,
    pub distinct_taxa: Option<u64>,
}

/// One row per generated bin, empty bins included. `None` taxa are skipped
/// when counting distinct names but still count as occurrences.
pub fn summarize<S: AsRef<str>>(
    binned: &BinnedAges,
    taxa: Option<&[Option<S>]>,
) -> Result<Vec<BinSummary>> {
    if let Some(t) = taxa {
        if t.len() != binned.len() {
            return Err(PaleoBinsError::InvalidInput(format!(
                "{} taxa supplied for {} ages",
                t.len(),
                binned.len()
            )));
        }
    }
    let nbins = binned.edges().len();
    let mut counts = vec![0u64; nbins];
    let mut names: Vec<HashSet<&str>> = vec![HashSet::new(); nbins];
    for (i, &slot) in binned.slots().iter().enumerate() {
        counts[slot] += 1;
        if let Some(Some(name)) = taxa.map(|t| t[i].as_ref()) {
            names[slot].insert(name.as_ref());
        }
    }
    Ok(binned
        .edges()
        .bins()
        .map(|b| {
            let slot = b.ordinal - 1;
            BinSummary {
                ordinal: b.ordinal,
                lower: b.lower,
                upper: b.upper,
                midpoint: b.midpoint(),
                occurrences: counts[slot],
                distinct_taxa: taxa.map(|_| names[slot].len() as u64),
            }
        })
        .collect())
}

pub fn summarize_batch(
    batch: &RecordBatch,
    age_col: &str,
    taxon_col: Option<&str>,
    scheme: BinScheme,
) -> Result<Vec<BinSummary>> {
    let ages = age_column(batch, age_col)?;
    let taxa = taxon_col.map(|c| taxon_column(batch, c)).transpose()?;
    let binned = bin(&ages, scheme)?;
    summarize(&binned, taxa.as_deref())
}

/// Summary driven by `Config`: configured scheme and age column, taxa
/// counted when the configured taxon column is present.
pub fn summarize_with_config(batch: &RecordBatch, cfg: &Config) -> Result<Vec<BinSummary>> {
    let scheme = BinScheme::from_config(&cfg.binning)?;
    let batch = ensure_age_column(batch, cfg)?;
    let taxon = cfg.columns.taxon.as_str();
    let taxon_col = batch.column_by_name(taxon).is_some().then_some(taxon);
    summarize_batch(&batch, &cfg.columns.age, taxon_col, scheme)
}
