use core::fmt;
use core::ops::{Index as IndexOp, IndexMut};

/// Logical pixel position, one signed coordinate per dimension.
///
/// Dimension 0 varies fastest in memory (`[0] = column`, `[1] = row`,
/// `[2] = slice`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Index<const N: usize>(pub [isize; N]);

impl<const N: usize> Index<N> {
    pub const fn new(coords: [isize; N]) -> Self {
        Self(coords)
    }

    pub const fn filled(value: isize) -> Self {
        Self([value; N])
    }

    pub const fn zero() -> Self {
        Self([0; N])
    }

    pub fn coords(&self) -> &[isize; N] {
        &self.0
    }
}

impl<const N: usize> Default for Index<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[isize; N]> for Index<N> {
    fn from(coords: [isize; N]) -> Self {
        Self(coords)
    }
}

impl<const N: usize> IndexOp<usize> for Index<N> {
    type Output = isize;

    #[inline]
    fn index(&self, dim: usize) -> &isize {
        &self.0[dim]
    }
}

impl<const N: usize> IndexMut<usize> for Index<N> {
    #[inline]
    fn index_mut(&mut self, dim: usize) -> &mut isize {
        &mut self.0[dim]
    }
}

impl<const N: usize> fmt::Display for Index<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.0.iter())
    }
}

/// Extent of a region along each dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size<const N: usize>(pub [usize; N]);

impl<const N: usize> Size<N> {
    pub const fn new(extents: [usize; N]) -> Self {
        Self(extents)
    }

    pub const fn filled(value: usize) -> Self {
        Self([value; N])
    }

    pub fn extents(&self) -> &[usize; N] {
        &self.0
    }

    /// Product of all extents, `None` on overflow.
    pub fn num_elements(&self) -> Option<usize> {
        self.0
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
    }

    pub fn is_empty(&self) -> bool {
        self.0.contains(&0)
    }
}

impl<const N: usize> Default for Size<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> From<[usize; N]> for Size<N> {
    fn from(extents: [usize; N]) -> Self {
        Self(extents)
    }
}

impl<const N: usize> IndexOp<usize> for Size<N> {
    type Output = usize;

    #[inline]
    fn index(&self, dim: usize) -> &usize {
        &self.0[dim]
    }
}

impl<const N: usize> IndexMut<usize> for Size<N> {
    #[inline]
    fn index_mut(&mut self, dim: usize) -> &mut usize {
        &mut self.0[dim]
    }
}

impl<const N: usize> fmt::Display for Size<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.0.iter())
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str("]")
}
