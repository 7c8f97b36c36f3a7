use crate::ComplexField;
use assert2::{assert as fancy_assert, debug_assert as fancy_debug_assert};
use core::ops::{Index, IndexMut};
use reborrow::*;

/// Number of elements spanned by a column-major matrix with the given dimensions.
#[inline]
fn required_len(nrows: usize, ncols: usize, col_stride: usize) -> usize {
    if nrows == 0 || ncols == 0 {
        0
    } else {
        (ncols - 1) * col_stride + nrows
    }
}

/// Column-major matrix view with a leading dimension.
///
/// The element at position `(i, j)` is stored at offset `i + j * col_stride` of the underlying
/// slice. Elements in the padding between the end of a column and the start of the next one are
/// never accessed.
///
/// # Example
///
/// ```
/// use tsqr_core::MatRef;
///
/// let nan = f64::NAN;
/// let data = [0.0, 1.0, nan, 2.0, 3.0, nan, 4.0, 5.0];
///
/// let m = MatRef::from_column_major_slice(&data, 2, 3, 3);
///
/// assert_eq!(m.nrows(), 2);
/// assert_eq!(m.ncols(), 3);
///
/// assert_eq!(m[(0, 0)], 0.0);
/// assert_eq!(m[(1, 0)], 1.0);
/// assert_eq!(m[(0, 1)], 2.0);
/// assert_eq!(m[(1, 1)], 3.0);
/// assert_eq!(m[(0, 2)], 4.0);
/// assert_eq!(m[(1, 2)], 5.0);
/// ```
pub struct MatRef<'a, T> {
    data: &'a [T],
    nrows: usize,
    ncols: usize,
    col_stride: usize,
}

/// Mutable column-major matrix view with a leading dimension.
///
/// For usage examples, see [`MatRef`].
pub struct MatMut<'a, T> {
    data: &'a mut [T],
    nrows: usize,
    ncols: usize,
    col_stride: usize,
}

impl<'a, T> Copy for MatRef<'a, T> {}
impl<'a, T> Clone for MatRef<'a, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<'b, 'a, T> Reborrow<'b> for MatRef<'a, T> {
    type Target = MatRef<'b, T>;
    #[inline]
    fn rb(&'b self) -> Self::Target {
        *self
    }
}
impl<'b, 'a, T> ReborrowMut<'b> for MatRef<'a, T> {
    type Target = MatRef<'b, T>;
    #[inline]
    fn rb_mut(&'b mut self) -> Self::Target {
        *self
    }
}

impl<'b, 'a, T> Reborrow<'b> for MatMut<'a, T> {
    type Target = MatRef<'b, T>;
    #[inline]
    fn rb(&'b self) -> Self::Target {
        MatRef {
            data: &*self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            col_stride: self.col_stride,
        }
    }
}
impl<'b, 'a, T> ReborrowMut<'b> for MatMut<'a, T> {
    type Target = MatMut<'b, T>;
    #[inline]
    fn rb_mut(&'b mut self) -> Self::Target {
        MatMut {
            data: &mut *self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            col_stride: self.col_stride,
        }
    }
}

impl<'a, T> IntoConst for MatRef<'a, T> {
    type Target = MatRef<'a, T>;

    #[inline]
    fn into_const(self) -> Self::Target {
        self
    }
}
impl<'a, T> IntoConst for MatMut<'a, T> {
    type Target = MatRef<'a, T>;

    #[inline]
    fn into_const(self) -> Self::Target {
        MatRef {
            data: self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            col_stride: self.col_stride,
        }
    }
}

impl<'a, T> MatRef<'a, T> {
    /// Returns a view over the `nrows` by `ncols` column-major matrix stored in `data`, with
    /// leading dimension `col_stride`.
    ///
    /// # Panics
    ///
    /// Requires that
    /// - `col_stride >= nrows`,
    /// - `data` holds at least `(ncols - 1) * col_stride + nrows` elements if the matrix is not
    /// empty.
    ///
    /// Otherwise, it panics.
    #[track_caller]
    pub fn from_column_major_slice(
        data: &'a [T],
        nrows: usize,
        ncols: usize,
        col_stride: usize,
    ) -> Self {
        fancy_assert!(col_stride >= nrows);
        let len = required_len(nrows, ncols, col_stride);
        fancy_assert!(data.len() >= len);
        Self {
            data: &data[..len],
            nrows,
            ncols,
            col_stride,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the offset between the first elements of two successive columns in the matrix.
    #[inline]
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Returns a reference to the element at position (i, j).
    ///
    /// Out of bounds indices are caught by a debug assertion, or by the slice bound check if they
    /// fall outside the underlying storage.
    #[track_caller]
    #[inline]
    pub fn get(self, i: usize, j: usize) -> &'a T {
        fancy_debug_assert!(i < self.nrows);
        fancy_debug_assert!(j < self.ncols);
        &self.data[i + j * self.col_stride]
    }

    /// Returns a copy of the element at position (i, j).
    #[track_caller]
    #[inline]
    pub fn read(&self, i: usize, j: usize) -> T
    where
        T: Copy,
    {
        *self.rb().get(i, j)
    }

    /// Returns the `j`-th column of the matrix as a contiguous slice.
    #[track_caller]
    #[inline]
    pub fn col(self, j: usize) -> &'a [T] {
        fancy_assert!(j < self.ncols);
        if self.nrows == 0 {
            return &[];
        }
        let start = j * self.col_stride;
        &self.data[start..start + self.nrows]
    }

    /// Returns the submatrix starting at position (i, j), with dimensions `nrows` by `ncols`.
    ///
    /// # Panics
    ///
    /// Requires that
    /// - `i + nrows <= self.nrows()`,
    /// - `j + ncols <= self.ncols()`.
    ///
    /// Otherwise, it panics.
    #[track_caller]
    pub fn submatrix(self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
        fancy_assert!(i <= self.nrows);
        fancy_assert!(j <= self.ncols);
        fancy_assert!(nrows <= self.nrows - i);
        fancy_assert!(ncols <= self.ncols - j);
        let cs = self.col_stride;
        let len = required_len(nrows, ncols, cs);
        let data: &'a [T] = if len == 0 {
            &[]
        } else {
            let start = i + j * cs;
            &self.data[start..start + len]
        };
        Self {
            data,
            nrows,
            ncols,
            col_stride: cs,
        }
    }

    /// Splits the matrix vertically into two parts in the following order: left, right.
    ///
    /// # Panics
    ///
    /// Requires that `j <= self.ncols()`. Otherwise, it panics.
    #[track_caller]
    pub fn split_at_col(self, j: usize) -> (Self, Self) {
        fancy_assert!(j <= self.ncols);
        (
            self.submatrix(0, 0, self.nrows, j),
            self.submatrix(0, j, self.nrows, self.ncols - j),
        )
    }

    /// Copies the matrix into a new owned matrix with a tight leading dimension.
    pub fn to_owned(&self) -> Mat<T>
    where
        T: Copy,
    {
        Mat::with_dims(self.nrows, self.ncols, |i, j| self.read(i, j))
    }
}

impl<'a, T> MatMut<'a, T> {
    /// Returns a mutable view over the `nrows` by `ncols` column-major matrix stored in `data`,
    /// with leading dimension `col_stride`.
    ///
    /// # Panics
    ///
    /// Same requirements as [`MatRef::from_column_major_slice`].
    #[track_caller]
    pub fn from_column_major_slice_mut(
        data: &'a mut [T],
        nrows: usize,
        ncols: usize,
        col_stride: usize,
    ) -> Self {
        fancy_assert!(col_stride >= nrows);
        let len = required_len(nrows, ncols, col_stride);
        fancy_assert!(data.len() >= len);
        Self {
            data: &mut data[..len],
            nrows,
            ncols,
            col_stride,
        }
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the offset between the first elements of two successive columns in the matrix.
    #[inline]
    pub fn col_stride(&self) -> usize {
        self.col_stride
    }

    /// Returns a mutable reference to the element at position (i, j).
    #[track_caller]
    #[inline]
    pub fn get(self, i: usize, j: usize) -> &'a mut T {
        fancy_debug_assert!(i < self.nrows);
        fancy_debug_assert!(j < self.ncols);
        &mut self.data[i + j * self.col_stride]
    }

    /// Returns a copy of the element at position (i, j).
    #[track_caller]
    #[inline]
    pub fn read(&self, i: usize, j: usize) -> T
    where
        T: Copy,
    {
        self.rb().read(i, j)
    }

    /// Writes `value` to the element at position (i, j).
    #[track_caller]
    #[inline]
    pub fn write(&mut self, i: usize, j: usize, value: T) {
        *self.rb_mut().get(i, j) = value;
    }

    /// Returns the `j`-th column of the matrix as a contiguous slice.
    #[track_caller]
    #[inline]
    pub fn col_mut(self, j: usize) -> &'a mut [T] {
        fancy_assert!(j < self.ncols);
        if self.nrows == 0 {
            return &mut [];
        }
        let start = j * self.col_stride;
        &mut self.data[start..start + self.nrows]
    }

    /// Returns the mutable submatrix starting at position (i, j), with dimensions `nrows` by
    /// `ncols`.
    ///
    /// # Panics
    ///
    /// Same requirements as [`MatRef::submatrix`].
    #[track_caller]
    pub fn submatrix(self, i: usize, j: usize, nrows: usize, ncols: usize) -> Self {
        fancy_assert!(i <= self.nrows);
        fancy_assert!(j <= self.ncols);
        fancy_assert!(nrows <= self.nrows - i);
        fancy_assert!(ncols <= self.ncols - j);
        let cs = self.col_stride;
        let len = required_len(nrows, ncols, cs);
        let data: &'a mut [T] = if len == 0 {
            Default::default()
        } else {
            let start = i + j * cs;
            &mut self.data[start..start + len]
        };
        Self {
            data,
            nrows,
            ncols,
            col_stride: cs,
        }
    }

    /// Splits the matrix vertically into two parts in the following order: left, right.
    ///
    /// # Panics
    ///
    /// Requires that `j <= self.ncols()`. Otherwise, it panics.
    #[track_caller]
    pub fn split_at_col(self, j: usize) -> (Self, Self) {
        fancy_assert!(j <= self.ncols);
        let Self {
            data,
            nrows,
            ncols,
            col_stride: cs,
        } = self;

        if required_len(nrows, j, cs) == 0 || required_len(nrows, ncols - j, cs) == 0 {
            let (left, right) = if j == 0 {
                (Default::default(), data)
            } else {
                (data, Default::default())
            };
            return (
                Self {
                    data: left,
                    nrows,
                    ncols: j,
                    col_stride: cs,
                },
                Self {
                    data: right,
                    nrows,
                    ncols: ncols - j,
                    col_stride: cs,
                },
            );
        }

        let (left, right) = data.split_at_mut(j * cs);
        (
            Self {
                data: &mut left[..required_len(nrows, j, cs)],
                nrows,
                ncols: j,
                col_stride: cs,
            },
            Self {
                data: right,
                nrows,
                ncols: ncols - j,
                col_stride: cs,
            },
        )
    }

    /// Fills every element of the matrix with `value`, leaving the padding untouched.
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        for j in 0..self.ncols {
            self.rb_mut().col_mut(j).fill(value);
        }
    }
}

impl<'a, T> Index<(usize, usize)> for MatRef<'a, T> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        self.rb().get(i, j)
    }
}

impl<'a, T> Index<(usize, usize)> for MatMut<'a, T> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        self.rb().get(i, j)
    }
}

impl<'a, T> IndexMut<(usize, usize)> for MatMut<'a, T> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        self.rb_mut().get(i, j)
    }
}

/// Heap allocated column-major matrix with a tight leading dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T> Mat<T> {
    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with the provided function,
    /// called in column-major order.
    pub fn with_dims(nrows: usize, ncols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }

    /// Returns a new matrix with dimensions `(nrows, ncols)`, filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self
    where
        T: ComplexField,
    {
        Self::with_dims(nrows, ncols, |_, _| T::zero())
    }

    /// Returns the number of rows of the matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns of the matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns a view over the matrix.
    #[inline]
    pub fn as_ref(&self) -> MatRef<'_, T> {
        MatRef {
            data: &self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            col_stride: self.nrows,
        }
    }

    /// Returns a mutable view over the matrix.
    #[inline]
    pub fn as_mut(&mut self) -> MatMut<'_, T> {
        MatMut {
            data: &mut self.data,
            nrows: self.nrows,
            ncols: self.ncols,
            col_stride: self.nrows,
        }
    }
}

impl<T> Index<(usize, usize)> for Mat<T> {
    type Output = T;

    #[track_caller]
    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        self.as_ref().get(i, j)
    }
}

impl<T> IndexMut<(usize, usize)> for Mat<T> {
    #[track_caller]
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        self.as_mut().get(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAD: f64 = -7.0;

    fn padded(nrows: usize, ncols: usize, col_stride: usize) -> Vec<f64> {
        let mut data = vec![PAD; col_stride * ncols];
        for j in 0..ncols {
            for i in 0..nrows {
                data[i + j * col_stride] = (10 * i + j) as f64;
            }
        }
        data
    }

    #[test]
    fn padded_access() {
        let data = padded(3, 4, 5);
        let m = MatRef::from_column_major_slice(&data, 3, 4, 5);

        for j in 0..4 {
            for i in 0..3 {
                assert_eq!(m[(i, j)], (10 * i + j) as f64);
            }
            assert_eq!(m.col(j), &[j as f64, (10 + j) as f64, (20 + j) as f64]);
        }
    }

    #[test]
    fn fill_skips_padding() {
        let mut data = padded(3, 4, 5);
        MatMut::from_column_major_slice_mut(&mut data, 3, 4, 5).fill(1.0);

        for j in 0..4 {
            for i in 0..5 {
                let expected = if i < 3 { 1.0 } else { PAD };
                assert_eq!(data[i + j * 5], expected);
            }
        }
    }

    #[test]
    fn submatrix_offsets() {
        let data = padded(4, 4, 6);
        let m = MatRef::from_column_major_slice(&data, 4, 4, 6);
        let sub = m.submatrix(1, 2, 3, 2);

        assert_eq!((sub.nrows(), sub.ncols(), sub.col_stride()), (3, 2, 6));
        for j in 0..2 {
            for i in 0..3 {
                assert_eq!(sub[(i, j)], m[(i + 1, j + 2)]);
            }
        }

        let empty = m.submatrix(4, 4, 0, 0);
        assert_eq!((empty.nrows(), empty.ncols()), (0, 0));
    }

    #[test]
    fn split_mut_is_disjoint() {
        let mut data = padded(3, 5, 4);
        let mut m = MatMut::from_column_major_slice_mut(&mut data, 3, 5, 4);

        {
            let (left, mut right) = m.rb_mut().split_at_col(2);
            assert_eq!((left.ncols(), right.ncols()), (2, 3));
            let corner = left.read(2, 1);
            right.write(0, 0, corner);
        }
        assert_eq!(m.read(0, 2), m.read(2, 1));

        let (left, right) = m.rb_mut().split_at_col(0);
        assert_eq!((left.ncols(), right.ncols()), (0, 5));
        let (left, right) = m.rb_mut().split_at_col(5);
        assert_eq!((left.ncols(), right.ncols()), (5, 0));
    }

    #[test]
    fn empty_rows_split() {
        let mut data: Vec<f64> = vec![];
        let m = MatMut::from_column_major_slice_mut(&mut data, 0, 3, 2);
        let (left, right) = m.split_at_col(1);
        assert_eq!((left.nrows(), left.ncols()), (0, 1));
        assert_eq!((right.nrows(), right.ncols()), (0, 2));
        assert!(right.col_mut(1).is_empty());
    }

    #[test]
    fn to_owned_drops_padding() {
        let data = padded(2, 3, 4);
        let src = MatRef::from_column_major_slice(&data, 2, 3, 4);
        let dst = src.to_owned();

        assert_eq!((dst.nrows(), dst.ncols()), (2, 3));
        assert_eq!(dst.as_ref().col_stride(), 2);
        assert_eq!(dst[(1, 2)], src[(1, 2)]);
        assert_eq!(dst[(1, 2)], 12.0);
    }

    #[test]
    fn mat_indexing() {
        let mut m = Mat::with_dims(2, 2, |i, j| (i + 2 * j) as f64);
        assert_eq!(m[(1, 1)], 3.0);
        m[(0, 1)] = 9.0;
        assert_eq!(m.as_ref().col(1), &[9.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn short_slice_panics() {
        let data = vec![0.0; 10];
        MatRef::from_column_major_slice(&data, 3, 4, 3);
    }

    #[test]
    #[should_panic]
    fn small_stride_panics() {
        let data = vec![0.0; 100];
        MatRef::from_column_major_slice(&data, 4, 2, 3);
    }
}
