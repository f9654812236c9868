use std::io::Write;
use paleo_bins_common::{PaleoBinsError, Result};
use crate::summary::BinSummary;

// --- text table ---

pub fn render_summary_table(summaries: &[BinSummary]) -> String {
    let mut out = format!(
        "{:>4} {:>10} {:>10} {:>10} {:>12} {:>8}\n",
        "bin", "lower", "upper", "midpoint", "occurrences", "taxa"
    );
    for s in summaries {
        out.push_str(&format!(
            "{:>4} {:>10.3} {:>10.3} {:>10.3} {:>12} {:>8}\n",
            s.ordinal,
            s.lower,
            s.upper,
            s.midpoint,
            s.occurrences,
            s.distinct_taxa.map_or("-".into(), |d| d.to_string()),
        ));
    }
    out
}

// --- JSON ---

pub fn summary_to_json(summaries: &[BinSummary]) -> Result<String> {
    let doc = serde_json::json!({
        "bin_count": summaries.len(),
        "total_occurrences": summaries.iter().map(|s| s.occurrences).sum::<u64>(),
        "bins": summaries,
    });
    serde_json::to_string_pretty(&doc).map_err(|e| PaleoBinsError::Other(e.to_string()))
}

// --- CSV ---

pub fn write_summary_csv<W: Write>(mut out: W, summaries: &[BinSummary]) -> Result<()> {
    writeln!(out, "bin,lower,upper,midpoint,occurrences,distinct_taxa")?;
    for s in summaries {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            s.ordinal,
            s.lower,
            s.upper,
            s.midpoint,
            s.occurrences,
            s.distinct_taxa.map_or(String::new(), |d| d.to_string()),
        )?;
    }
    Ok(())
}
