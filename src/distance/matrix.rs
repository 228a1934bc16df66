//! Travel-time matrix.

use serde::{Deserialize, Serialize};

use crate::models::Minutes;

/// An n×n travel-time matrix in minutes, stored row by row.
///
/// Unlike a purely dense matrix, rows may be ragged and cells may be absent
/// (`null` in JSON). Such data is representable so that the instance
/// validator can report it; a missing entry is never treated as infinite.
/// The matrix is not assumed symmetric.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![vec![0, 5], vec![7, 0]]);
/// assert_eq!(dm.get(0, 1), Some(5));
/// assert_eq!(dm.get(1, 0), Some(7));
/// assert_eq!(dm.get(2, 0), None);
/// assert!(dm.is_square());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DistanceMatrix {
    rows: Vec<Vec<Option<Minutes>>>,
}

impl DistanceMatrix {
    /// Creates a square matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            rows: vec![vec![Some(0); size]; size],
        }
    }

    /// Creates a matrix from fully specified rows.
    pub fn from_rows(rows: Vec<Vec<Minutes>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Some).collect())
                .collect(),
        }
    }

    /// Creates a matrix from rows that may contain missing entries.
    pub fn from_partial_rows(rows: Vec<Vec<Option<Minutes>>>) -> Self {
        Self { rows }
    }

    /// Returns the travel time from `from` to `to`.
    ///
    /// `None` if either index is out of bounds or the entry is missing.
    pub fn get(&self, from: usize, to: usize) -> Option<Minutes> {
        self.rows.get(from).and_then(|row| row.get(to)).copied().flatten()
    }

    /// Sets the travel time from `from` to `to`.
    ///
    /// Returns `false` if the cell does not exist.
    pub fn set(&mut self, from: usize, to: usize, minutes: Minutes) -> bool {
        match self.rows.get_mut(from).and_then(|row| row.get_mut(to)) {
            Some(cell) => {
                *cell = Some(minutes);
                true
            }
            None => false,
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Rows as stored.
    pub fn rows(&self) -> &[Vec<Option<Minutes>>] {
        &self.rows
    }

    /// Returns `true` if every row has as many entries as there are rows.
    pub fn is_square(&self) -> bool {
        let n = self.rows.len();
        self.rows.iter().all(|row| row.len() == n)
    }

    /// Returns `true` if the matrix is square, complete, and symmetric.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let n = self.size();
        for i in 0..n {
            for j in (i + 1)..n {
                match (self.get(i, j), self.get(j, i)) {
                    (Some(a), Some(b)) if a == b => {}
                    _ => return false,
                }
            }
        }
        true
    }

    /// Present off-diagonal entries, in row-major order.
    pub fn off_diagonal(&self) -> impl Iterator<Item = Minutes> + '_ {
        self.rows.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(move |(j, _)| *j != i)
                .filter_map(|(_, cell)| *cell)
        })
    }
}
