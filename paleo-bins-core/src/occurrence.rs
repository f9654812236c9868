use paleo_bins_common::{PaleoBinsError, Result};

fn check_ranges(max_ma: &[f64], min_ma: &[f64]) -> Result<()> {
    if max_ma.len() != min_ma.len() {
        return Err(PaleoBinsError::InvalidInput(format!(
            "max_ma has {} values but min_ma has {}",
            max_ma.len(),
            min_ma.len()
        )));
    }
    for (row, (&hi, &lo)) in max_ma.iter().zip(min_ma).enumerate() {
        if !hi.is_finite() || !lo.is_finite() {
            return Err(PaleoBinsError::InvalidInput(format!(
                "row {row}: age bounds must be finite (max={hi}, min={lo})"
            )));
        }
        if hi < lo {
            return Err(PaleoBinsError::InvalidInput(format!(
                "row {row}: max age {hi} is younger than min age {lo}"
            )));
        }
    }
    Ok(())
}

/// Midpoint of each occurrence's age range, `(max + min) / 2`.
pub fn midpoint_ages(max_ma: &[f64], min_ma: &[f64]) -> Result<Vec<f64>> {
    check_ranges(max_ma, min_ma)?;
    Ok(max_ma.iter().zip(min_ma).map(|(hi, lo)| (hi + lo) / 2.0).collect())
}

/// Dating uncertainty of each occurrence, `max - min`.
pub fn age_range_widths(max_ma: &[f64], min_ma: &[f64]) -> Result<Vec<f64>> {
    check_ranges(max_ma, min_ma)?;
    Ok(max_ma.iter().zip(min_ma).map(|(hi, lo)| hi - lo).collect())
}
