use crate::value::ExactValue;
use std::fmt::{Display, Formatter};


/// Dense matrix of exact values
/// Rows are addressed through an index table, so exchanging two rows doesn't move any data.
/// Indices out of range are a programming error and panic.
#[derive(Clone, Debug)]
pub struct Matrix {
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
    /// Values stored row by row
    values: Vec<ExactValue>,
    /// Offset of the first value of each logical row in `values`
    row_offsets: Vec<usize>,
}
impl Matrix {
    /// Creates new matrix filled with one value
    /// # Arguments
    /// * `rows` - number of rows
    /// * `cols` - number of columns
    /// * `fill` - value written to every position
    /// # Example
    /// ```
    /// use eqbalance::{ExactValue, Matrix};
    ///
    /// let matrix = Matrix::new(2, 3, ExactValue::zero());
    ///
    /// assert_eq!(matrix.row_count(), 2);
    /// assert_eq!(matrix.col_count(), 3);
    /// assert!(matrix.get(1, 2).is_zero());
    /// ```
    pub fn new(rows: usize, cols: usize, fill: ExactValue) -> Self {
        Self {
            rows,
            cols,
            values: vec![fill; rows * cols],
            row_offsets: (0..rows).map(|r| r * cols).collect(),
        }
    }

    /// Creates new matrix from rows of integers
    /// All rows must have the same length.
    /// # Example
    /// ```
    /// use eqbalance::{ExactValue, Matrix};
    ///
    /// let matrix = Matrix::from_rows(&[
    ///     vec![2, 0, -2],
    ///     vec![0, 2, -1],
    /// ]);
    ///
    /// assert_eq!(matrix.get(1, 2), &ExactValue::from(-1));
    /// ```
    pub fn from_rows(rows: &[Vec<i64>]) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::new(rows.len(), cols, ExactValue::zero());
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "all rows must have the same length");
            for (c, value) in row.iter().enumerate() {
                matrix.set(r, c, ExactValue::from(*value));
            }
        }
        matrix
    }

    /// Returns number of rows
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Returns number of columns
    pub fn col_count(&self) -> usize {
        self.cols
    }

    #[inline(always)]
    fn offset(&self, row: usize, col: usize) -> usize {
        assert!(col < self.cols, "column {} out of bounds", col);
        self.row_offsets[row] + col
    }

    /// Returns value at given position
    pub fn get(&self, row: usize, col: usize) -> &ExactValue {
        &self.values[self.offset(row, col)]
    }

    /// Overwrites value at given position
    pub fn set(&mut self, row: usize, col: usize, value: ExactValue) {
        let offset = self.offset(row, col);
        self.values[offset] = value;
    }

    /// Exchanges two rows
    /// # Example
    /// ```
    /// use eqbalance::{ExactValue, Matrix};
    ///
    /// let mut matrix = Matrix::from_rows(&[
    ///     vec![1, 2],
    ///     vec![3, 4],
    /// ]);
    ///
    /// matrix.exchange_row(0, 1);
    ///
    /// assert_eq!(matrix.get(0, 0), &ExactValue::from(3));
    /// assert_eq!(matrix.get(1, 1), &ExactValue::from(2));
    /// ```
    #[inline(always)]
    pub fn exchange_row(&mut self, r1: usize, r2: usize) {
        self.row_offsets.swap(r1, r2);
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            let line = (0..self.cols).map(|col| self.get(row, col).to_string()).collect::<Vec<_>>();
            writeln!(f, "[{}]", line.join(", "))?;
        }
        Ok(())
    }
}
