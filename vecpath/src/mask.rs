//! Dense N-dimensional arrays and the per-point selection mask built on them.
//!
//! Storage is one flat buffer addressed through row-major strides that are
//! computed once at construction; element access never allocates.

use std::fmt;

use crate::error::{Error, Result};
use crate::model::Slot;

#[derive(Clone, Debug, PartialEq)]
pub struct NdArray<T> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    data: Vec<T>,
}

impl<T: Clone + Default> NdArray<T> {
    pub fn new(shape: &[usize]) -> Self {
        Self::filled(shape, T::default())
    }
}

impl<T: Clone> NdArray<T> {
    pub fn filled(shape: &[usize], value: T) -> Self {
        let mut strides = vec![1usize; shape.len()];
        for axis in (0..shape.len().saturating_sub(1)).rev() {
            strides[axis] = strides[axis + 1] * shape[axis + 1];
        }
        let len = shape.iter().product();
        NdArray {
            shape: shape.to_vec(),
            strides,
            data: vec![value; len],
        }
    }

    pub fn get(&self, coords: &[usize]) -> Result<T> {
        let offset = self.offset(coords)?;
        Ok(self.data[offset].clone())
    }

    pub fn set(&mut self, value: T, coords: &[usize]) -> Result<()> {
        let offset = self.offset(coords)?;
        self.data[offset] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        for v in self.data.iter_mut() {
            *v = value.clone();
        }
    }

    /// Independent deep duplicate.
    pub fn copy(&self) -> Self {
        self.clone()
    }
}

impl<T> NdArray<T> {
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Slices along the last axis, one per combination of the leading indices.
    pub fn rows(&self) -> Rows<'_, T> {
        let width = self.shape.last().copied().unwrap_or(1);
        let count = if self.shape.is_empty() {
            1
        } else {
            self.shape[..self.shape.len() - 1].iter().product()
        };
        Rows { data: &self.data, width, next: 0, count }
    }

    fn offset(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.shape.len() {
            return Err(Error::RankMismatch { expected: self.shape.len(), got: coords.len() });
        }
        let mut offset = 0;
        for ((&c, &dim), &stride) in coords.iter().zip(&self.shape).zip(&self.strides) {
            if c >= dim {
                return Err(Error::InvalidIndex { index: c, len: dim });
            }
            offset += c * stride;
        }
        Ok(offset)
    }
}

pub struct Rows<'a, T> {
    data: &'a [T],
    width: usize,
    next: usize,
    count: usize,
}

impl<'a, T> Iterator for Rows<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<&'a [T]> {
        if self.next >= self.count {
            return None;
        }
        let start = self.next * self.width;
        self.next += 1;
        Some(&self.data[start..start + self.width])
    }
}

impl<T: fmt::Display> NdArray<T> {
    fn fmt_axis(&self, f: &mut fmt::Formatter<'_>, axis: usize, base: usize) -> fmt::Result {
        if axis == self.shape.len() {
            return write!(f, "{}", self.data[base]);
        }
        f.write_str("[")?;
        for i in 0..self.shape[axis] {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.fmt_axis(f, axis + 1, base + i * self.strides[axis])?;
        }
        f.write_str("]")
    }
}

impl<T: fmt::Display> fmt::Display for NdArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_axis(f, 0, 0)
    }
}

/// Selected anchors/handles, shaped `[point_count, 3]`.
pub type SelectionMask = NdArray<bool>;

pub const SLOTS_PER_POINT: usize = 3;

impl NdArray<bool> {
    pub fn for_points(count: usize) -> SelectionMask {
        NdArray::new(&[count, SLOTS_PER_POINT])
    }

    pub fn is_selected(&self, index: usize, slot: Slot) -> Result<bool> {
        self.get(&[index, slot.index()])
    }

    pub fn any_in_row(&self, index: usize) -> Result<bool> {
        let rows = self.shape.first().copied().unwrap_or(0);
        if index >= rows {
            return Err(Error::InvalidIndex { index, len: rows });
        }
        Ok(self.rows().nth(index).map_or(false, |r| r.iter().any(|s| *s)))
    }

    /// One flag per row: is anything in that row selected.
    pub fn row_flags(&self) -> Vec<bool> {
        self.rows().map(|r| r.iter().any(|s| *s)).collect()
    }

    pub fn selected_count(&self) -> usize {
        self.data.iter().filter(|s| **s).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_are_row_major() {
        let a: NdArray<u8> = NdArray::new(&[2, 3, 4]);
        assert_eq!(a.strides, vec![12, 4, 1]);
        assert_eq!(a.len(), 24);
        assert_eq!(a.rows().count(), 6);
    }

    #[test]
    fn set_get_and_bounds() {
        let mut m = SelectionMask::for_points(3);
        m.set(true, &[1, 2]).unwrap();
        assert_eq!(m.get(&[1, 2]), Ok(true));
        assert_eq!(m.selected_count(), 1);
        assert_eq!(m.get(&[3, 0]), Err(Error::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(m.get(&[0, 3]), Err(Error::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(m.get(&[0]), Err(Error::RankMismatch { expected: 2, got: 1 }));
        assert!(m.set(true, &[0, 0, 0]).is_err());
    }

    #[test]
    fn copy_is_independent() {
        let mut a = SelectionMask::for_points(2);
        let b = a.copy();
        a.set(true, &[0, 0]).unwrap();
        assert_eq!(b.get(&[0, 0]), Ok(false));
        assert_ne!(a, b);
    }

    #[test]
    fn display_nests_brackets() {
        let mut m = SelectionMask::for_points(2);
        m.set(true, &[1, 1]).unwrap();
        assert_eq!(m.to_string(), "[[false, false, false], [false, true, false]]");
        let v: NdArray<i32> = NdArray::filled(&[3], 7);
        assert_eq!(v.to_string(), "[7, 7, 7]");
        assert_eq!(SelectionMask::for_points(0).to_string(), "[]");
    }

    #[test]
    fn row_lookups() {
        let mut m = SelectionMask::for_points(3);
        m.set(true, &[2, 0]).unwrap();
        assert_eq!(m.row_flags(), vec![false, false, true]);
        assert_eq!(m.any_in_row(2), Ok(true));
        assert_eq!(m.any_in_row(0), Ok(false));
        assert!(m.any_in_row(3).is_err());
        assert!(m.is_selected(2, Slot::Anchor).unwrap());
    }

    #[test]
    fn zero_width_rows_do_not_panic() {
        let a: NdArray<bool> = NdArray::new(&[2, 0]);
        assert_eq!(a.rows().map(|r| r.len()).collect::<Vec<_>>(), vec![0, 0]);
        assert_eq!(a.to_string(), "[[], []]");
    }
}
