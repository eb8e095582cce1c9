//! LazyFrame materialization helpers with column validation
//!
//! Provides safe, explicit patterns for working with Polars frames so a
//! missing or misnamed column fails loudly instead of corrupting aggregates.

use polars::prelude::*;

use crate::error::{Result, TourismError};

/// Check that every required column is present
///
/// # Errors
/// `TourismError::MissingColumn` naming the first absent column together with
/// the columns that are available.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    let available: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !available.iter().any(|c| c == expected) {
            return Err(TourismError::MissingColumn {
                column: expected.to_string(),
                available,
            });
        }
    }

    Ok(())
}

/// Materialize a frame with exactly the given columns and uniform dtypes
///
/// Text columns are cast to `String`, numeric columns to `Float64` so that
/// integer-inferred CSV columns and float Parquet columns read the same way.
/// Values that cannot be cast become null and are reported by the caller.
///
/// # Example
/// ```rust,ignore
/// let df = materialize_typed(&raw, &["Place"], &["AvgVisitors"])?;
/// ```
pub fn materialize_typed(
    df: &DataFrame,
    text_columns: &[&str],
    numeric_columns: &[&str],
) -> Result<DataFrame> {
    let mut required: Vec<&str> = text_columns.to_vec();
    required.extend_from_slice(numeric_columns);
    require_columns(df, &required)?;

    let exprs: Vec<Expr> = text_columns
        .iter()
        .map(|&name| col(name).cast(DataType::String))
        .chain(
            numeric_columns
                .iter()
                .map(|&name| col(name).cast(DataType::Float64)),
        )
        .collect();

    let typed = df.clone().lazy().select(exprs).collect()?;
    Ok(typed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_success() {
        let df = df![
            "Place" => &["Goa", "Ooty"],
            "AvgVisitors" => &[10i64, 20],
        ]
        .unwrap();

        assert!(require_columns(&df, &["Place", "AvgVisitors"]).is_ok());
    }

    #[test]
    fn test_require_columns_missing() {
        let df = df![
            "Place" => &["Goa"],
        ]
        .unwrap();

        let err = require_columns(&df, &["Place", "AvgCostPerDay"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("AvgCostPerDay"));
        assert!(msg.contains("Place"));
    }

    #[test]
    fn test_materialize_typed_casts_integers() {
        let df = df![
            "Place" => &["Goa", "Ooty"],
            "AvgVisitors" => &[10i64, 20],
            "extra_col" => &["e1", "e2"],
        ]
        .unwrap();

        let typed = materialize_typed(&df, &["Place"], &["AvgVisitors"]).unwrap();
        assert_eq!(typed.width(), 2);
        assert_eq!(typed.height(), 2);

        let visitors = typed.column("AvgVisitors").unwrap().f64().unwrap();
        assert_eq!(visitors.get(1), Some(20.0));
    }
}
