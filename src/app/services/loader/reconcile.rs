//! Column-union concatenation across city exports
//!
//! Washington's export has no demographic columns while Chicago and New York
//! City do, so stacking cities means aligning on the union of columns. The
//! strict path requires matching dtypes for shared columns; when that fails
//! the frames are stacked with dtype promotion instead and the caller is told
//! the rows are unreconciled.

use crate::constants::columns;
use crate::error::{BikeshareError, Result};
use polars::prelude::*;
use tracing::debug;

/// Result of stacking several city frames
#[derive(Debug)]
pub enum Reconciliation {
    /// Column union in canonical order, missing cells null
    Reconciled(DataFrame),
    /// Relaxed stack kept after the strict union failed
    Unreconciled { frame: DataFrame, reason: String },
}

impl Reconciliation {
    pub fn into_frame(self) -> DataFrame {
        match self {
            Reconciliation::Reconciled(frame) => frame,
            Reconciliation::Unreconciled { frame, .. } => frame,
        }
    }

    pub fn is_reconciled(&self) -> bool {
        matches!(self, Reconciliation::Reconciled(_))
    }
}

/// Canonical columns (core, then optional) present in any of the frames
pub fn canonical_columns<'a>(frames: impl IntoIterator<Item = &'a DataFrame>) -> Vec<&'static str> {
    let frames: Vec<&DataFrame> = frames.into_iter().collect();
    columns::CORE
        .iter()
        .chain(columns::OPTIONAL.iter())
        .copied()
        .filter(|name| frames.iter().any(|df| df.get_column_index(name).is_some()))
        .collect()
}

/// Stack city frames on the union of their columns
///
/// # Arguments
///
/// * `frames` - Per-city frames in selection order
///
/// # Returns
///
/// [`Reconciliation::Reconciled`] on the strict path, otherwise the relaxed
/// stack. Errors only if the relaxed stack fails too.
pub fn reconcile_sources(frames: Vec<DataFrame>) -> Result<Reconciliation> {
    let source_count = frames.len();
    let ordered: Vec<Expr> = canonical_columns(&frames).into_iter().map(col).collect();
    let lazy: Vec<LazyFrame> = frames.into_iter().map(DataFrame::lazy).collect();

    debug!(
        "Reconciling {} frames onto {} columns",
        source_count,
        ordered.len()
    );

    let strict_args = UnionArgs {
        to_supertypes: false,
        ..Default::default()
    };
    let strict = concat_lf_diagonal(lazy.clone(), strict_args)
        .and_then(|stacked| stacked.select(ordered).collect());

    match strict {
        Ok(frame) => Ok(Reconciliation::Reconciled(frame)),
        Err(strict_error) => {
            let relaxed_args = UnionArgs {
                to_supertypes: true,
                ..Default::default()
            };
            let frame = concat_lf_diagonal(lazy, relaxed_args)
                .and_then(LazyFrame::collect)
                .map_err(|relaxed_error| BikeshareError::SchemaReconciliation {
                    source_count,
                    reason: format!("{}; relaxed stack: {}", strict_error, relaxed_error),
                })?;

            Ok(Reconciliation::Unreconciled {
                frame,
                reason: strict_error.to_string(),
            })
        }
    }
}
