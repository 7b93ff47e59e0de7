//! Category counts of a generated table, computed with DataFusion.
//!
//! Used to report the mix of severities or bed types after a run.

use datafusion::arrow::array::{Array, Int64Array, StringArray};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::*;

use crate::error::IcuError;

fn count_column<'a, T: 'static>(batch: &'a RecordBatch, index: usize) -> Result<&'a T, IcuError> {
    batch
        .column(index)
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| IcuError::invalid(format!("unexpected type for summary column {index}")))
}

/// Number of rows per distinct value of `column`, ordered by value
pub async fn category_counts(
    batch: RecordBatch,
    column: &str,
) -> Result<Vec<(String, i64)>, IcuError> {
    let ctx = SessionContext::new();
    ctx.register_batch("generated", batch)?;
    let df = ctx
        .sql(&format!(
            "SELECT \"{column}\" AS category, COUNT(*) AS n \
             FROM generated GROUP BY \"{column}\" ORDER BY category"
        ))
        .await?;

    let mut counts = Vec::new();
    for batch in df.collect().await? {
        let categories: &StringArray = count_column(&batch, 0)?;
        let n: &Int64Array = count_column(&batch, 1)?;
        for i in 0..batch.num_rows() {
            counts.push((categories.value(i).to_string(), n.value(i)));
        }
    }
    Ok(counts)
}
