use paleo_bins_common::{BinningConfig, PaleoBinsError, Result};

/// Upper bound on generated bins, for either scheme.
pub const MAX_BINS: usize = 1_000_000;

/// How the age axis is cut. Prefer the validating constructors; variants
/// built directly are re-checked when edges are generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinScheme {
    ByWidth(f64),
    ByCount(usize),
}

impl BinScheme {
    pub fn by_width(width: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(PaleoBinsError::Configuration(format!(
                "bin width must be a positive finite number, got {width}"
            )));
        }
        Ok(Self::ByWidth(width))
    }

    pub fn by_count(count: usize) -> Result<Self> {
        if count == 0 {
            return Err(PaleoBinsError::Configuration(
                "bin count must be at least 1".into(),
            ));
        }
        if count > MAX_BINS {
            return Err(PaleoBinsError::Configuration(format!(
                "bin count {count} exceeds the limit of {MAX_BINS}"
            )));
        }
        Ok(Self::ByCount(count))
    }

    /// Width XOR count; both or neither is a configuration error.
    pub fn from_options(width: Option<f64>, count: Option<usize>) -> Result<Self> {
        match (width, count) {
            (Some(w), None) => Self::by_width(w),
            (None, Some(k)) => Self::by_count(k),
            (Some(_), Some(_)) => Err(PaleoBinsError::Configuration(
                "specify either a bin width or a bin count, not both".into(),
            )),
            (None, None) => Err(PaleoBinsError::Configuration(
                "specify a bin width or a bin count".into(),
            )),
        }
    }

    /// Count given as a real number, as it arrives from loosely typed callers.
    pub fn from_real_options(width: Option<f64>, count: Option<f64>) -> Result<Self> {
        let count = count.map(whole_count).transpose()?;
        Self::from_options(width, count)
    }

    pub fn from_config(cfg: &BinningConfig) -> Result<Self> {
        Self::from_options(cfg.width, cfg.count)
    }

    pub fn validate(self) -> Result<Self> {
        match self {
            Self::ByWidth(w) => Self::by_width(w),
            Self::ByCount(k) => Self::by_count(k),
        }
    }
}

fn whole_count(count: f64) -> Result<usize> {
    if !count.is_finite() || count.fract() != 0.0 {
        return Err(PaleoBinsError::Configuration(format!(
            "bin count must be a whole number, got {count}"
        )));
    }
    if count <= 0.0 {
        return Err(PaleoBinsError::Configuration(
            "bin count must be at least 1".into(),
        ));
    }
    if count > MAX_BINS as f64 {
        return Err(PaleoBinsError::Configuration(format!(
            "bin count {count} exceeds the limit of {MAX_BINS}"
        )));
    }
    Ok(count as usize)
}

impl std::fmt::Display for BinScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByWidth(w) => write!(f, "width={w}"),
            Self::ByCount(k) => write!(f, "count={k}"),
        }
    }
}
