//! Dimension materialization: turning a variable's stored dimension
//! triples into the shape the *caller* sees, correcting for a mismatch
//! between the writer's array order and the order the caller asked for.

use crate::catalog::DimensionTriple;

/// The element order a caller wants arrays presented in. A BP file
/// records its own writer-side order per process group
/// (`ProcessGroup::host_column_major`); when it differs from the
/// caller's requested order, dimensions (and, at read time, the copied
/// bytes) are transposed transparently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOrder {
    RowMajor,
    ColumnMajor,
}

impl ArrayOrder {
    pub fn is_column_major(self) -> bool {
        matches!(self, Self::ColumnMajor)
    }
}

/// `true` when the writer's on-disk order disagrees with what the caller
/// asked for, meaning dims/bytes must be reordered before being handed
/// back.
pub fn needs_reversal(file_column_major: bool, caller_order: ArrayOrder) -> bool {
    file_column_major != caller_order.is_column_major()
}

/// Reverses `dims` in place to switch between row-major and column-major
/// presentation, keeping the time axis fixed at whichever end is
/// conventional for the *target* order (first dimension in C/row-major
/// files, last dimension in Fortran/column-major files). Returns the time
/// axis's new index, if there was one.
pub fn reverse_order(
    dims: &mut Vec<DimensionTriple>,
    time_dim: Option<usize>,
) -> Option<usize> {
    match time_dim {
        None => {
            dims.reverse();
            None
        }
        Some(idx) => {
            let time_val = dims.remove(idx);
            dims.reverse();
            let new_idx = if idx == 0 { dims.len() } else { 0 };
            dims.insert(new_idx, time_val);
            Some(new_idx)
        }
    }
}

/// Logs (does not fail) when a global array's time axis sits somewhere
/// other than the position its declared array order implies. This is a
/// structural oddity in the writer, not a reader error: the spec treats
/// it as non-fatal.
pub fn check_time_axis_placement(
    var_name: &str,
    ndims: usize,
    time_dim: Option<usize>,
    file_column_major: bool,
) {
    let Some(idx) = time_dim else { return };
    let expected = if file_column_major { ndims.saturating_sub(1) } else { 0 };
    if idx != expected {
        log::warn!(
            "variable '{var_name}': time axis at index {idx} does not match \
             the file's declared array order (expected index {expected})"
        );
    }
}

/// Replaces the time axis's stored extent (always 1, one characteristic per
/// write) with the variable's actual number of timesteps, so the shape
/// reported to callers reflects the full time series rather than a single
/// write's local footprint.
pub fn materialize_time_axis(
    mut dims: Vec<DimensionTriple>,
    time_dim: Option<usize>,
    ntimesteps: u32,
) -> Vec<DimensionTriple> {
    if let Some(idx) = time_dim {
        dims[idx] = DimensionTriple {
            local: ntimesteps as u64,
            global: 0,
            offset: 0,
        };
    }
    dims
}

/// Presents `dims` (as stored, in the writer's own order) in the order
/// `caller_order` expects, returning the possibly-reordered dims and the
/// time axis's index in that presentation.
pub fn present_dims(
    mut dims: Vec<DimensionTriple>,
    time_dim: Option<usize>,
    file_column_major: bool,
    caller_order: ArrayOrder,
) -> (Vec<DimensionTriple>, Option<usize>) {
    if needs_reversal(file_column_major, caller_order) {
        let new_time_dim = reverse_order(&mut dims, time_dim);
        (dims, new_time_dim)
    } else {
        (dims, time_dim)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(local: u64) -> DimensionTriple {
        DimensionTriple {
            local,
            global: 0,
            offset: 0,
        }
    }

    #[test]
    fn reverses_spatial_dims_only_and_moves_time() {
        let mut dims = vec![triple(1), triple(2), triple(3), triple(4)];
        let new_idx = reverse_order(&mut dims, Some(0));
        assert_eq!(new_idx, Some(3));
        assert_eq!(
            dims.iter().map(|d| d.local).collect::<Vec<_>>(),
            vec![4, 3, 2, 1]
        );
    }

    #[test]
    fn no_reversal_when_orders_match() {
        assert!(!needs_reversal(false, ArrayOrder::RowMajor));
        assert!(!needs_reversal(true, ArrayOrder::ColumnMajor));
        assert!(needs_reversal(false, ArrayOrder::ColumnMajor));
    }

    #[test]
    fn present_dims_no_time_axis_full_reverse() {
        let dims = vec![triple(2), triple(3)];
        let (out, time_dim) = present_dims(dims, None, true, ArrayOrder::RowMajor);
        assert_eq!(out.iter().map(|d| d.local).collect::<Vec<_>>(), vec![3, 2]);
        assert_eq!(time_dim, None);
    }
}
