//! Dense matrices generic over the amplitude scalar
//!
//! Storage is row-major, the same layout the density matrix uses. All
//! operator algebra in the simulator (Kronecker lifts, operator sums,
//! matrix-vector application, traces) goes through this type, so both
//! scalar modes share a single code path.

use crate::scalar::Scalar;
use num_complex::Complex64;
use rayon::prelude::*;
use std::ops::{Add, Mul, Sub};

/// Element count above which products are computed row-parallel
const PARALLEL_THRESHOLD: usize = 1 << 12;

/// Dense row-major matrix over a [`Scalar`]
///
/// # Example
/// ```
/// use kronq_core::{Complex64, Matrix};
///
/// let x: Matrix<Complex64> = Matrix::from_complex_2x2(&[
///     [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)],
///     [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)],
/// ]);
/// let squared = x.matmul(&x);
/// assert_eq!(squared, Matrix::identity(2));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<S> {
    rows: usize,
    cols: usize,
    data: Vec<S>,
}

impl<S: Scalar> Matrix<S> {
    /// All-zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![S::zero(); rows * cols],
        }
    }

    /// Identity matrix of the given dimension
    ///
    /// `identity(1)` is the 1×1 seed the Kronecker folds start from.
    pub fn identity(dimension: usize) -> Self {
        let mut m = Self::zeros(dimension, dimension);
        for i in 0..dimension {
            m.set(i, i, S::one());
        }
        m
    }

    /// Lift a concrete 2×2 complex matrix into this scalar type
    pub fn from_complex_2x2(m: &[[Complex64; 2]; 2]) -> Self {
        let data = vec![
            S::from_complex(m[0][0]),
            S::from_complex(m[0][1]),
            S::from_complex(m[1][0]),
            S::from_complex(m[1][1]),
        ];
        Self {
            rows: 2,
            cols: 2,
            data,
        }
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Element at (row, col)
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &S {
        &self.data[row * self.cols + col]
    }

    /// Set the element at (row, col)
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: S) {
        self.data[row * self.cols + col] = value;
    }

    /// Conjugate transpose
    pub fn adjoint(&self) -> Self {
        let mut out = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.set(j, i, self.get(i, j).conj());
            }
        }
        out
    }

    /// Sum of diagonal elements
    pub fn trace(&self) -> S {
        debug_assert_eq!(self.rows, self.cols, "trace of a non-square matrix");
        let mut sum = S::zero();
        for i in 0..self.rows {
            sum = sum + self.get(i, i).clone();
        }
        sum
    }

    /// Matrix product `self · rhs`
    ///
    /// Rows are computed in parallel once the result is large enough for the
    /// split to pay off.
    pub fn matmul(&self, rhs: &Matrix<S>) -> Matrix<S> {
        debug_assert_eq!(self.cols, rhs.rows, "matmul dimension mismatch");
        let mut data = vec![S::zero(); self.rows * rhs.cols];
        if data.len() >= PARALLEL_THRESHOLD {
            data.par_chunks_mut(rhs.cols)
                .enumerate()
                .for_each(|(i, row)| self.fill_product_row(rhs, i, row));
        } else {
            for (i, row) in data.chunks_mut(rhs.cols).enumerate() {
                self.fill_product_row(rhs, i, row);
            }
        }
        Matrix {
            rows: self.rows,
            cols: rhs.cols,
            data,
        }
    }

    fn fill_product_row(&self, rhs: &Matrix<S>, i: usize, row: &mut [S]) {
        for k in 0..self.cols {
            let a = self.get(i, k);
            if a.is_zero() {
                continue;
            }
            for (j, out) in row.iter_mut().enumerate() {
                *out = out.clone() + a.clone() * rhs.get(k, j).clone();
            }
        }
    }

    /// Kronecker product `self ⊗ rhs`
    ///
    /// Order-sensitive: the left factor indexes the coarse blocks. Qubit 1's
    /// operator must always arrive as the leftmost factor.
    pub fn kron(&self, rhs: &Matrix<S>) -> Matrix<S> {
        let mut out = Matrix::zeros(self.rows * rhs.rows, self.cols * rhs.cols);
        for i in 0..self.rows {
            for j in 0..self.cols {
                let a = self.get(i, j);
                if a.is_zero() {
                    continue;
                }
                for k in 0..rhs.rows {
                    for l in 0..rhs.cols {
                        out.set(
                            i * rhs.rows + k,
                            j * rhs.cols + l,
                            a.clone() * rhs.get(k, l).clone(),
                        );
                    }
                }
            }
        }
        out
    }

    /// Matrix-vector product `self · v`
    pub fn mul_vec(&self, v: &[S]) -> Vec<S> {
        debug_assert_eq!(self.cols, v.len(), "matrix-vector dimension mismatch");
        let mut data = vec![S::zero(); self.rows];
        if self.rows * self.cols >= PARALLEL_THRESHOLD {
            data.par_iter_mut()
                .enumerate()
                .for_each(|(i, out)| self.fill_vec_entry(v, i, out));
        } else {
            for (i, out) in data.iter_mut().enumerate() {
                self.fill_vec_entry(v, i, out);
            }
        }
        data
    }

    fn fill_vec_entry(&self, v: &[S], i: usize, out: &mut S) {
        let mut sum = S::zero();
        for k in 0..self.cols {
            let a = self.get(i, k);
            if a.is_zero() {
                continue;
            }
            sum = sum + a.clone() * v[k].clone();
        }
        *out = sum;
    }

    /// Element-wise sum
    pub fn add_matrix(&self, rhs: &Matrix<S>) -> Matrix<S> {
        debug_assert_eq!((self.rows, self.cols), (rhs.rows, rhs.cols));
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a.clone() + b.clone())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Element-wise difference
    pub fn sub_matrix(&self, rhs: &Matrix<S>) -> Matrix<S> {
        debug_assert_eq!((self.rows, self.cols), (rhs.rows, rhs.cols));
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a.clone() - b.clone())
            .collect();
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }
}

impl<'a, 'b, S: Scalar> Add<&'b Matrix<S>> for &'a Matrix<S> {
    type Output = Matrix<S>;

    fn add(self, rhs: &'b Matrix<S>) -> Matrix<S> {
        self.add_matrix(rhs)
    }
}

impl<'a, 'b, S: Scalar> Sub<&'b Matrix<S>> for &'a Matrix<S> {
    type Output = Matrix<S>;

    fn sub(self, rhs: &'b Matrix<S>) -> Matrix<S> {
        self.sub_matrix(rhs)
    }
}

impl<'a, 'b, S: Scalar> Mul<&'b Matrix<S>> for &'a Matrix<S> {
    type Output = Matrix<S>;

    fn mul(self, rhs: &'b Matrix<S>) -> Matrix<S> {
        self.matmul(rhs)
    }
}
