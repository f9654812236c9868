use super::edges::{Bin, BinEdges};
use super::scheme::BinScheme;
use paleo_bins_common::{LabelMode, PaleoBinsError, Result};
use serde::Serialize;

/// A sample mapped onto its bins: the edges plus one 0-based slot per age,
/// in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedAges {
    edges: BinEdges,
    slots: Vec<usize>,
}

impl BinnedAges {
    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 1-based ordinal of each sample's bin.
    pub fn indices(&self) -> Vec<usize> {
        self.slots.iter().map(|s| s + 1).collect()
    }

    /// Midpoint age of each sample's bin.
    pub fn ages(&self) -> Vec<f64> {
        let mids: Vec<f64> = self.edges.bins().map(|b| b.midpoint()).collect();
        self.slots.iter().map(|&s| mids[s]).collect()
    }

    pub fn labels(&self, mode: LabelMode) -> Vec<f64> {
        match mode {
            LabelMode::Index => self.slots.iter().map(|&s| (s + 1) as f64).collect(),
            LabelMode::Age => self.ages(),
        }
    }

    /// The bin holding sample `i`.
    pub fn bin_of(&self, i: usize) -> Option<Bin> {
        self.slots.get(i).and_then(|&s| self.edges.bin(s))
    }
}

pub fn bin(ages: &[f64], scheme: BinScheme) -> Result<BinnedAges> {
    let edges = BinEdges::build(ages, scheme)?;
    let slots = ages
        .iter()
        .enumerate()
        .map(|(i, &a)| {
            edges.locate(a).ok_or_else(|| {
                PaleoBinsError::Other(format!("age {a} at position {i} fell outside its own bins"))
            })
        })
        .collect::<Result<Vec<usize>>>()?;
    Ok(BinnedAges { edges, slots })
}

pub fn bin_index(ages: &[f64], scheme: BinScheme) -> Result<Vec<usize>> {
    Ok(bin(ages, scheme)?.indices())
}

pub fn bin_age(ages: &[f64], scheme: BinScheme) -> Result<Vec<f64>> {
    Ok(bin(ages, scheme)?.ages())
}

/// Flat form: width or count as loose options, labels as reals. Scheme
/// errors are reported before sample errors.
pub fn bin_ages(
    ages: &[f64],
    width: Option<f64>,
    count: Option<f64>,
    mode: LabelMode,
) -> Result<Vec<f64>> {
    let scheme = BinScheme::from_real_options(width, count)?;
    Ok(bin(ages, scheme)?.labels(mode))
}
