use rand::Rng;
use std::ops::Index;

/// Dense row-major matrix backed by a single allocation.
///
/// The backing vector is sized once in the constructor; every operation on
/// it afterwards writes in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Fills a matrix with independent draws from `U[-half_range, half_range)`.
    pub fn random<R: Rng + ?Sized>(rows: usize, cols: usize, half_range: f64, rng: &mut R) -> Matrix {
        let data = (0..rows * cols)
            .map(|_| rng.gen_range(-half_range..half_range))
            .collect();

        Matrix { rows, cols, data }
    }

    /// Wraps an existing row-major buffer. Returns `None` when the buffer
    /// length disagrees with `rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Option<Matrix> {
        if data.len() != rows * cols {
            return None;
        }

        Some(Matrix { rows, cols, data })
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rows_are_contiguous() {
        let m = Matrix::from_flat(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
        assert_eq!(m[(0, 2)], 3.0);
    }

    #[test]
    fn from_flat_rejects_wrong_length() {
        assert!(Matrix::from_flat(2, 2, vec![0.0; 3]).is_none());
    }

    #[test]
    fn random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = Matrix::random(8, 9, 0.5, &mut rng);
        assert_eq!(m.len(), 72);
        assert!(m.as_slice().iter().all(|w| (-0.5..0.5).contains(w)));
    }
}
