//! Synthetic grid generators.
//!
//! Grids are row-major `Vec<Vec<f64>>` with the first row northernmost,
//! matching the canonical in-memory layout.

/// Sentinel written into generated grids for missing cells.
pub const SENTINEL: f64 = -9999.0;

/// Creates a grid with predictable values.
///
/// Each cell value is `row * 100 + col`, so a misplaced sample is easy to
/// spot in a failing assertion.
///
/// # Example
///
/// ```
/// use test_utils::create_index_grid;
///
/// let grid = create_index_grid(2, 3);
/// assert_eq!(grid[1][2], 102.0);
/// ```
pub fn create_index_grid(nrows: usize, ncols: usize) -> Vec<Vec<f64>> {
    (0..nrows)
        .map(|row| (0..ncols).map(|col| (row * 100 + col) as f64).collect())
        .collect()
}

/// Creates a grid of undulation-like values in metres.
///
/// Values vary smoothly between roughly 35 and 55 m, the range of geoid
/// heights over central Europe.
pub fn create_undulation_grid(nrows: usize, ncols: usize) -> Vec<Vec<f64>> {
    (0..nrows)
        .map(|row| {
            (0..ncols)
                .map(|col| {
                    let y = row as f64 / nrows.max(1) as f64;
                    let x = col as f64 / ncols.max(1) as f64;
                    45.0 + 10.0 * (x * std::f64::consts::PI).sin() * (y * 2.0).cos()
                })
                .collect()
        })
        .collect()
}

/// Creates an index grid with every `every`-th cell (row-major) replaced
/// by [`SENTINEL`].
pub fn create_grid_with_sentinels(nrows: usize, ncols: usize, every: usize) -> Vec<Vec<f64>> {
    let every = every.max(1);
    let mut grid = create_index_grid(nrows, ncols);
    for (index, value) in grid.iter_mut().flatten().enumerate() {
        if index % every == every - 1 {
            *value = SENTINEL;
        }
    }
    grid
}

/// Creates a grid filled with one value.
pub fn create_constant_grid(nrows: usize, ncols: usize, value: f64) -> Vec<Vec<f64>> {
    vec![vec![value; ncols]; nrows]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_grid() {
        let grid = create_index_grid(3, 4);
        assert_eq!(grid.len(), 3);
        assert_eq!(grid[0].len(), 4);
        assert_eq!(grid[0][0], 0.0);
        assert_eq!(grid[2][3], 203.0);
    }

    #[test]
    fn test_undulation_range() {
        let grid = create_undulation_grid(20, 30);
        for value in grid.iter().flatten() {
            assert!(*value > 34.0 && *value < 56.0, "out of range: {}", value);
        }
    }

    #[test]
    fn test_sentinels_placed() {
        let grid = create_grid_with_sentinels(2, 3, 2);
        assert_eq!(grid[0], vec![0.0, SENTINEL, 2.0]);
        assert_eq!(grid[1], vec![SENTINEL, 101.0, SENTINEL]);
    }

    #[test]
    fn test_constant_grid() {
        let grid = create_constant_grid(2, 2, 7.5);
        assert!(grid.iter().flatten().all(|v| *v == 7.5));
    }
}
