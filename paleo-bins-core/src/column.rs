use crate::binning::{bin, BinScheme};
use crate::occurrence::midpoint_ages;
use arrow::array::{Array, ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use paleo_bins_common::{Config, LabelMode, PaleoBinsError, Result};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

fn find_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef> {
    batch
        .column_by_name(name)
        .ok_or_else(|| PaleoBinsError::InvalidInput(format!("no column named '{name}'")))
}

/// Numeric column as `f64`s. Nulls are rejected rather than skipped so every
/// row keeps a label.
pub fn age_column(batch: &RecordBatch, name: &str) -> Result<Vec<f64>> {
    let col = find_column(batch, name)?;
    if !col.data_type().is_numeric() {
        return Err(PaleoBinsError::InvalidInput(format!(
            "column '{name}' has non-numeric type {}",
            col.data_type()
        )));
    }
    if col.null_count() > 0 {
        return Err(PaleoBinsError::InvalidInput(format!(
            "column '{name}' has {} null ages",
            col.null_count()
        )));
    }
    let as_f64 = cast(col, &DataType::Float64)?;
    let arr = as_f64
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| PaleoBinsError::Other(format!("column '{name}' did not cast to Float64")))?;
    Ok(arr.values().to_vec())
}

/// String column with nulls preserved as `None`.
pub fn taxon_column(batch: &RecordBatch, name: &str) -> Result<Vec<Option<String>>> {
    let col = find_column(batch, name)?;
    let as_utf8 = match col.data_type() {
        DataType::Utf8 => col.clone(),
        DataType::LargeUtf8 | DataType::Utf8View | DataType::Dictionary(_, _) => {
            cast(col, &DataType::Utf8)?
        }
        other => {
            return Err(PaleoBinsError::InvalidInput(format!(
                "column '{name}' has non-string type {other}"
            )))
        }
    };
    let arr = as_utf8
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PaleoBinsError::Other(format!("column '{name}' did not cast to Utf8")))?;
    Ok(arr.iter().map(|v| v.map(str::to_owned)).collect())
}

fn label_array(ages: &[f64], scheme: BinScheme, mode: LabelMode) -> Result<(ArrayRef, DataType)> {
    let binned = bin(ages, scheme)?;
    Ok(match mode {
        LabelMode::Index => {
            let idx: Vec<i64> = binned.indices().into_iter().map(|i| i as i64).collect();
            (Arc::new(Int64Array::from(idx)) as ArrayRef, DataType::Int64)
        }
        LabelMode::Age => (
            Arc::new(Float64Array::from(binned.ages())) as ArrayRef,
            DataType::Float64,
        ),
    })
}

fn append_columns(batch: &RecordBatch, new_cols: Vec<(String, DataType, ArrayRef)>) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut fields: Vec<Arc<Field>> = schema.fields().iter().cloned().collect();
    let mut columns: Vec<ArrayRef> = batch.columns().to_vec();
    for (name, dtype, array) in new_cols {
        if fields.iter().any(|f| f.name() == &name) {
            return Err(PaleoBinsError::InvalidInput(format!(
                "column '{name}' already exists"
            )));
        }
        fields.push(Arc::new(Field::new(name, dtype, false)));
        columns.push(array);
    }
    let schema = Schema::new_with_metadata(fields, schema.metadata().clone());
    Ok(RecordBatch::try_new(Arc::new(schema), columns)?)
}

/// Bin one age column and append the labels as `label_name`.
pub fn bin_column(
    batch: &RecordBatch,
    column: &str,
    scheme: BinScheme,
    mode: LabelMode,
    label_name: &str,
) -> Result<RecordBatch> {
    let ages = age_column(batch, column)?;
    let (array, dtype) = label_array(&ages, scheme, mode)?;
    debug!(column, label_name, rows = ages.len(), %scheme, "binned column");
    append_columns(batch, vec![(label_name.to_owned(), dtype, array)])
}

/// Bin several age columns independently, each over its own range. Label
/// columns are named `<column><suffix>` and appended in the order given.
pub fn bin_columns(
    batch: &RecordBatch,
    columns: &[&str],
    scheme: BinScheme,
    mode: LabelMode,
    suffix: &str,
) -> Result<RecordBatch> {
    let labelled: Vec<(String, DataType, ArrayRef)> = columns
        .par_iter()
        .map(|&col| -> Result<(String, DataType, ArrayRef)> {
            let ages = age_column(batch, col)?;
            let (array, dtype) = label_array(&ages, scheme, mode)?;
            Ok((format!("{col}{suffix}"), dtype, array))
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(columns = columns.len(), %scheme, "binned columns");
    append_columns(batch, labelled)
}

/// Append the midpoint of each row's `[min_col, max_col]` age range.
pub fn with_midpoint_column(
    batch: &RecordBatch,
    max_col: &str,
    min_col: &str,
    name: &str,
) -> Result<RecordBatch> {
    let max_ma = age_column(batch, max_col)?;
    let min_ma = age_column(batch, min_col)?;
    let mids = midpoint_ages(&max_ma, &min_ma)?;
    append_columns(
        batch,
        vec![(name.to_owned(), DataType::Float64, Arc::new(Float64Array::from(mids)) as ArrayRef)],
    )
}

/// Batch with the configured age column present, deriving it from the
/// `max_age`/`min_age` bounds when the table only carries ranges.
pub fn ensure_age_column(batch: &RecordBatch, cfg: &Config) -> Result<RecordBatch> {
    let cols = &cfg.columns;
    if batch.column_by_name(&cols.age).is_some() {
        return Ok(batch.clone());
    }
    debug!(age = %cols.age, max = %cols.max_age, min = %cols.min_age, "deriving midpoint ages");
    with_midpoint_column(batch, &cols.max_age, &cols.min_age, &cols.age)
}

/// Bin the configured age column using the `[binning]` section; the label
/// column is `<age><label_suffix>`.
pub fn bin_with_config(batch: &RecordBatch, cfg: &Config) -> Result<RecordBatch> {
    let scheme = BinScheme::from_config(&cfg.binning)?;
    let batch = ensure_age_column(batch, cfg)?;
    let age = &cfg.columns.age;
    bin_column(&batch, age, scheme, cfg.binning.label, &cfg.label_column_for(age))
}
