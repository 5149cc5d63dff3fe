use core::fmt;

use crate::index::{Index, Size};

/// Axis-aligned box of logical indices `[origin[d], origin[d] + size[d])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region<const N: usize> {
    pub origin: Index<N>,
    pub size: Size<N>,
}

impl<const N: usize> Region<N> {
    pub const fn new(origin: Index<N>, size: Size<N>) -> Self {
        Self { origin, size }
    }

    /// Region anchored at the zero index.
    pub const fn from_size(size: Size<N>) -> Self {
        Self {
            origin: Index::zero(),
            size,
        }
    }

    #[inline]
    pub fn origin(&self) -> Index<N> {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> Size<N> {
        self.size
    }

    /// Exclusive upper corner: `origin[d] + size[d]`.
    #[inline]
    pub fn end_index(&self) -> Index<N> {
        let mut end = self.origin;
        for d in 0..N {
            end[d] += self.size[d] as isize;
        }
        end
    }

    /// Inclusive upper corner. Only meaningful for non-empty regions.
    pub fn last_index(&self) -> Index<N> {
        let mut last = self.end_index();
        for d in 0..N {
            last[d] -= 1;
        }
        last
    }

    pub fn num_elements(&self) -> Option<usize> {
        self.size.num_elements()
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn is_inside(&self, index: &Index<N>) -> bool {
        (0..N).all(|d| {
            let rel = index[d] - self.origin[d];
            rel >= 0 && (rel as usize) < self.size[d]
        })
    }

    /// Returns `true` when `other` lies entirely within `self`.
    ///
    /// An empty `other` is contained when its corners lie inside or on the
    /// boundary of `self`.
    pub fn contains_region(&self, other: &Region<N>) -> bool {
        let end = self.end_index();
        let other_end = other.end_index();
        (0..N).all(|d| other.origin[d] >= self.origin[d] && other_end[d] <= end[d])
    }

    /// Intersection of two regions, `None` when they do not overlap.
    pub fn crop(&self, other: &Region<N>) -> Option<Region<N>> {
        let end = self.end_index();
        let other_end = other.end_index();
        let mut out = Region::default();
        for d in 0..N {
            let lo = self.origin[d].max(other.origin[d]);
            let hi = end[d].min(other_end[d]);
            if hi <= lo {
                return None;
            }
            out.origin[d] = lo;
            out.size[d] = (hi - lo) as usize;
        }
        Some(out)
    }
}

impl<const N: usize> fmt::Display for Region<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "origin: {} size: {}", self.origin, self.size)
    }
}
