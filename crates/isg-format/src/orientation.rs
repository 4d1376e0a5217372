//! Reordering of grid data into the canonical north-to-south, west-to-east
//! layout.

use isg_common::DataOrdering;
use tracing::debug;

/// Reorder `data` from `declared` into canonical order.
///
/// Row and column reversal are independent flips; the returned ordering is
/// always canonical, so applying the result a second time is a no-op.
pub fn normalize(data: &mut [Vec<f64>], declared: DataOrdering) -> DataOrdering {
    if declared.reverse_rows() {
        data.reverse();
    }
    if declared.reverse_cols() {
        for row in data.iter_mut() {
            row.reverse();
        }
    }

    if !declared.is_canonical() {
        debug!(from = %declared, rows = data.len(), "Reordered grid data");
    }
    DataOrdering::NorthToSouthWestToEast
}
