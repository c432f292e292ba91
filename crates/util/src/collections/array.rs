use std::ops::{Deref, DerefMut, Index, IndexMut};

/// A fixed length, heap allocated array. The length is decided at construction and never changes.
#[repr(transparent)]
#[derive(Clone, Debug, PartialEq)]
pub struct Array<T> {
    inner: Box<[T]>,
}

impl<T> Array<T> {
    pub fn as_slice(&self) -> &[T] {
        self
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

impl<T: Clone> Array<T> {
    /// Create an array of `len` copies of `value`.
    pub fn filled(len: usize, value: T) -> Self {
        Self::from(vec![value; len])
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(value: Vec<T>) -> Self {
        Self {
            inner: value.into_boxed_slice(),
        }
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl<T> Deref for Array<T> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for Array<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.inner[index]
    }
}
