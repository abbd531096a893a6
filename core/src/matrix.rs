/// Dense host-by-feature matrix, stored row-major.
///
/// Row `i` belongs to host `i` of the report, column `j` to feature `j` in
/// registration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl FeatureMatrix {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            values: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix from feature columns of equal length `rows`.
    pub(crate) fn from_columns(rows: usize, columns: &[Vec<f64>]) -> Self {
        let mut matrix = Self::zeros(rows, columns.len());
        for (col, column) in columns.iter().enumerate() {
            for (row, value) in column.iter().enumerate().take(rows) {
                matrix.values[row * matrix.cols + col] = *value;
            }
        }
        matrix
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.values.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start: usize = row * self.cols;
        self.values.get(start..start + self.cols)
    }

    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.cols {
            return None;
        }
        Some((0..self.rows).map(|row| self.values[row * self.cols + col]).collect())
    }

    /// Iterates over rows in host order.
    ///
    /// A matrix without columns still yields one empty slice per row.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        (0..self.rows).filter_map(|row| self.row(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_laid_out_row_major() {
        let matrix = FeatureMatrix::from_columns(2, &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]);

        assert_eq!(matrix.shape(), (2, 3));
        assert_eq!(matrix.row(0), Some(&[1.0, 3.0, 5.0][..]));
        assert_eq!(matrix.row(1), Some(&[2.0, 4.0, 6.0][..]));
        assert_eq!(matrix.column(1), Some(vec![3.0, 4.0]));
        assert_eq!(matrix.get(1, 2), Some(6.0));
    }

    #[test]
    fn out_of_bounds_access_is_none() {
        let matrix = FeatureMatrix::zeros(2, 2);
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.get(0, 2), None);
        assert_eq!(matrix.row(2), None);
        assert_eq!(matrix.column(2), None);
    }

    #[test]
    fn degenerate_shapes() {
        let no_features = FeatureMatrix::from_columns(3, &[]);
        assert_eq!(no_features.shape(), (3, 0));
        assert_eq!(no_features.rows().count(), 3);
        assert!(no_features.is_empty());

        let no_hosts = FeatureMatrix::from_columns(0, &[Vec::new(), Vec::new()]);
        assert_eq!(no_hosts.shape(), (0, 2));
        assert_eq!(no_hosts.rows().count(), 0);
    }
}
