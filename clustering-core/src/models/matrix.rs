#[cfg(test)]
#[path = "../../tests/unit/models/matrix_test.rs"]
mod matrix_test;

use crate::utils::{ClusteringError, ClusteringResult, Float};
use std::fmt::{Debug, Formatter};

/// A dense two dimensional matrix stored in row-major order. Rows are cases, columns are features.
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Float>,
}

impl Matrix {
    /// Creates a new zero filled matrix of given shape.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, data: vec![0.; rows * cols] }
    }

    /// Creates a matrix from row-major data.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Float>) -> ClusteringResult<Self> {
        if rows * cols != data.len() {
            return Err(ClusteringError::InvalidInput(format!(
                "cannot create {rows}x{cols} matrix from {} values",
                data.len()
            )));
        }

        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix from rows, all rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Float>>) -> ClusteringResult<Self> {
        let cols = rows.first().map_or(0, |row| row.len());

        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != cols) {
            return Err(ClusteringError::InvalidInput(format!(
                "row {idx} has {} values, expected {cols}",
                row.len()
            )));
        }

        let size = rows.len();
        let data = rows.into_iter().flatten().collect();

        Ok(Self { rows: size, cols, data })
    }

    /// Creates a square matrix of given size filled by the function.
    pub fn from_fn<F>(size: usize, func: F) -> Self
    where
        F: Fn(usize, usize) -> Float,
    {
        let data = (0..size).flat_map(|i| (0..size).map(move |j| (i, j))).map(|(i, j)| func(i, j)).collect();

        Self { rows: size, cols: size, data }
    }

    /// Returns amount of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns amount of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns true if matrix has no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns value at given position.
    pub fn get(&self, row: usize, col: usize) -> Float {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col]
    }

    /// Sets value at given position.
    pub fn set(&mut self, row: usize, col: usize, value: Float) {
        debug_assert!(row < self.rows && col < self.cols);
        self.data[row * self.cols + col] = value;
    }

    /// Returns a row view.
    pub fn row(&self, row: usize) -> &[Float] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Returns a mutable row view.
    pub fn row_mut(&mut self, row: usize) -> &mut [Float] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Iterates over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Float]> + '_ {
        (0..self.rows).map(move |row| self.row(row))
    }

    /// Returns a new matrix which consists of the rows with given indices in given order.
    pub fn select_rows(&self, indices: &[usize]) -> Matrix {
        let data = indices.iter().flat_map(|&idx| self.row(idx).iter().cloned()).collect();

        Matrix { rows: indices.len(), cols: self.cols, data }
    }

    /// Returns a copy of data as rows.
    pub fn to_rows(&self) -> Vec<Vec<Float>> {
        self.iter_rows().map(|row| row.to_vec()).collect()
    }
}

impl Debug for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.to_rows())
            .finish()
    }
}
