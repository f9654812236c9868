use super::scheme::{BinScheme, MAX_BINS};
use paleo_bins_common::{PaleoBinsError, Result};
use serde::Serialize;
use tracing::{debug, warn};

/// One generated bin. `[lower, upper)`, or `[lower, upper]` for the last bin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub ordinal: usize, // 1-based
    pub lower: f64,
    pub upper: f64,
    pub closed_upper: bool,
}

impl Bin {
    pub fn midpoint(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn contains(&self, age: f64) -> bool {
        age >= self.lower && (age < self.upper || (self.closed_upper && age == self.upper))
    }
}

/// Ascending bin boundaries; always at least two, so at least one bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinEdges {
    edges: Vec<f64>,
}

/// Minimum and maximum of a non-empty, all-finite sample.
pub fn age_extent(ages: &[f64]) -> Result<(f64, f64)> {
    if ages.is_empty() {
        return Err(PaleoBinsError::InvalidInput("age sample is empty".into()));
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (i, &a) in ages.iter().enumerate() {
        if !a.is_finite() {
            return Err(PaleoBinsError::InvalidInput(format!(
                "age at position {i} is not finite ({a})"
            )));
        }
        min = min.min(a);
        max = max.max(a);
    }
    Ok((min, max))
}

impl BinEdges {
    /// Bins spanning `[floor(min), ceil(max)]` of `ages` under `scheme`.
    pub fn build(ages: &[f64], scheme: BinScheme) -> Result<Self> {
        let scheme = scheme.validate()?;
        let (min, max) = age_extent(ages)?;
        let lo = min.floor();
        let hi = max.ceil();
        if !(hi - lo).is_finite() {
            return Err(PaleoBinsError::InvalidInput(format!(
                "age range [{min}, {max}] is too wide to bin"
            )));
        }
        if lo == hi {
            warn!(lo, %scheme, "all ages share one integer value; using a single-bin span");
        }
        let edges = match scheme {
            BinScheme::ByWidth(w) => width_edges(lo, hi, w)?,
            BinScheme::ByCount(k) => count_edges(lo, hi, k),
        };
        check_ascending(&edges, scheme)?;
        debug!(%scheme, lo, hi, bins = edges.len() - 1, "built bin edges");
        Ok(Self { edges })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// `(lowest boundary, highest boundary)`.
    pub fn span(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    /// Bin at 0-based `slot`.
    pub fn bin(&self, slot: usize) -> Option<Bin> {
        if slot >= self.len() {
            return None;
        }
        Some(Bin {
            ordinal: slot + 1,
            lower: self.edges[slot],
            upper: self.edges[slot + 1],
            closed_upper: slot + 1 == self.len(),
        })
    }

    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.len()).filter_map(move |slot| self.bin(slot))
    }

    /// 0-based slot of the bin containing `age`, or `None` outside the span.
    pub fn locate(&self, age: f64) -> Option<usize> {
        let (first, last) = self.span();
        if !(age >= first && age <= last) {
            return None;
        }
        let lowers = &self.edges[..self.len()];
        // last lower bound <= age; ties go to the bin the value opens
        let slot = lowers.partition_point(|&e| e <= age).saturating_sub(1);
        Some(slot.min(self.len() - 1))
    }

    pub fn midpoint(&self, slot: usize) -> Option<f64> {
        self.bin(slot).map(|b| b.midpoint())
    }
}

// Step by `w` from `lo` until the boundary reaches or passes `hi`.
fn width_edges(lo: f64, hi: f64, w: f64) -> Result<Vec<f64>> {
    let steps = ((hi - lo) / w).ceil();
    if steps > MAX_BINS as f64 {
        return Err(PaleoBinsError::Configuration(format!(
            "bin width {w} over [{lo}, {hi}] would produce more than {MAX_BINS} bins"
        )));
    }
    let mut n = (steps as usize).max(1);
    // correct for rounding in the division: the first boundary >= hi closes the list
    while n > 1 && lo + (n - 1) as f64 * w >= hi {
        n -= 1;
    }
    while lo + n as f64 * w < hi {
        n += 1;
    }
    Ok((0..=n).map(|i| lo + i as f64 * w).collect())
}

// Widths below the float spacing at `lo` collapse neighbouring edges.
fn check_ascending(edges: &[f64], scheme: BinScheme) -> Result<()> {
    match edges.windows(2).position(|p| !(p[1] > p[0]) || !p[1].is_finite()) {
        Some(i) => Err(PaleoBinsError::Configuration(format!(
            "{scheme} is finer than float resolution near {}; edges {i} and {} do not ascend",
            edges[i],
            i + 1
        ))),
        None => Ok(()),
    }
}

fn count_edges(lo: f64, hi: f64, k: usize) -> Vec<f64> {
    let hi = if lo == hi { lo + 1.0 } else { hi };
    let span = hi - lo;
    (0..=k)
        .map(|i| {
            if i == k {
                hi
            } else {
                lo + span * (i as f64 / k as f64)
            }
        })
        .collect()
}
