//! `Debug` helpers for structures carrying large buffers.
//!
//! Decoded pixel buffers, palettes and per-frame vertex arrays easily reach
//! tens of thousands of elements. Fields annotated with
//! `#[debug(with = q2_utils::debug::trimmed_collection_fmt)]` only print the
//! first few elements followed by the number of elements left out.

use std::{fmt, sync};

const FIRST_N_ELEMENTS: usize = 3;

/// A collection that can report its length and expose a leading slice.
pub trait HasLength {
    type Item: fmt::Debug;

    fn element_count(&self) -> usize;
    fn leading(&self, elements: usize) -> &[Self::Item];
}

impl<T: fmt::Debug> HasLength for [T] {
    type Item = T;
    fn element_count(&self) -> usize {
        self.len()
    }
    fn leading(&self, elements: usize) -> &[Self::Item] {
        &self[..elements.min(self.len())]
    }
}

impl<T: fmt::Debug, const N: usize> HasLength for [T; N] {
    type Item = T;
    fn element_count(&self) -> usize {
        N
    }
    fn leading(&self, elements: usize) -> &[Self::Item] {
        &self[..elements.min(N)]
    }
}

impl<T: fmt::Debug> HasLength for Vec<T> {
    type Item = T;
    fn element_count(&self) -> usize {
        self.len()
    }
    fn leading(&self, elements: usize) -> &[Self::Item] {
        self.as_slice().leading(elements)
    }
}

impl<T: ?Sized + HasLength> HasLength for sync::Arc<T> {
    type Item = T::Item;
    fn element_count(&self) -> usize {
        self.as_ref().element_count()
    }
    fn leading(&self, elements: usize) -> &[Self::Item] {
        self.as_ref().leading(elements)
    }
}

#[cfg(not(feature = "debug-print-all"))]
pub fn trimmed_collection_fmt<T: ?Sized + HasLength + fmt::Debug>(
    n: &T,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    let leading = n.leading(FIRST_N_ELEMENTS);
    let omitted = n.element_count().saturating_sub(leading.len());

    if omitted == 0 {
        write!(f, "{:?}", leading)
    } else {
        write!(f, "{:?} + {} elements", leading, omitted)
    }
}

#[cfg(feature = "debug-print-all")]
pub fn trimmed_collection_fmt<T: ?Sized + HasLength + fmt::Debug>(
    n: &T,
    f: &mut fmt::Formatter,
) -> fmt::Result {
    write!(f, "{:?}", n)
}
