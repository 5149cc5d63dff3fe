use crate::error::Error;
use crate::index::{Index, Size};
use crate::region::Region;

/// Maps logical indices of a buffered region to linear element offsets.
///
/// Strides are in elements, not bytes, and are anchored at the buffered
/// region's origin:
///
/// `offset(i) = Σ_d (i[d] - origin[d]) * stride[d]`
///
/// For a packed buffer `stride[0] = 1` and
/// `stride[d] = stride[d - 1] * size[d - 1]`. Padded buffers may use larger
/// strides as long as every stride covers the extent of the dimension below
/// it, which keeps the mapping injective over the buffered region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTable<const N: usize> {
    origin: Index<N>,
    size: Size<N>,
    strides: [usize; N],
    required_len: usize,
}

impl<const N: usize> OffsetTable<N> {
    /// Row-major strides, dimension 0 contiguous.
    ///
    /// An empty region addresses no element, so its strides saturate instead
    /// of overflowing.
    pub fn packed(buffered: &Region<N>) -> Result<Self, Error> {
        let empty = buffered.is_empty();
        let mut strides = [0usize; N];
        let mut acc = 1usize;
        for (d, stride) in strides.iter_mut().enumerate() {
            *stride = acc;
            acc = if empty {
                acc.saturating_mul(buffered.size[d]).min(isize::MAX as usize)
            } else {
                acc.checked_mul(buffered.size[d]).ok_or(Error::Overflow)?
            };
        }
        Self::with_strides(buffered, strides)
    }

    pub fn with_strides(buffered: &Region<N>, strides: [usize; N]) -> Result<Self, Error> {
        if N > 0 && strides[0] == 0 {
            return Err(Error::InvalidStride { dim: 0 });
        }
        if strides.iter().any(|&s| s > isize::MAX as usize) {
            return Err(Error::Overflow);
        }
        // nothing to alias in an empty region
        if !buffered.is_empty() {
            for d in 1..N {
                let covered = strides[d - 1]
                    .checked_mul(buffered.size[d - 1])
                    .ok_or(Error::Overflow)?;
                if strides[d] < covered {
                    return Err(Error::InvalidStride { dim: d });
                }
            }
        }

        let required_len = required_len(&buffered.size, &strides).ok_or(Error::Overflow)?;
        Ok(Self {
            origin: buffered.origin,
            size: buffered.size,
            strides,
            required_len,
        })
    }

    /// Region this table is anchored at.
    pub fn buffered_region(&self) -> Region<N> {
        Region::new(self.origin, self.size)
    }

    #[inline]
    pub fn stride(&self, dim: usize) -> usize {
        self.strides[dim]
    }

    pub fn strides(&self) -> &[usize; N] {
        &self.strides
    }

    /// Minimum length of a backing slice for the buffered region.
    pub fn required_len(&self) -> usize {
        self.required_len
    }

    pub fn is_packed(&self) -> bool {
        let mut acc = 1usize;
        for d in 0..N {
            if self.strides[d] != acc {
                return false;
            }
            acc = acc.saturating_mul(self.size[d]);
        }
        true
    }

    /// Linear offset of `index`. No bounds checks: indices one step outside
    /// the buffered region yield offsets outside `[0, required_len)`.
    #[inline]
    pub fn offset(&self, index: &Index<N>) -> isize {
        let mut offset = 0isize;
        for d in 0..N {
            offset += (index[d] - self.origin[d]) * self.strides[d] as isize;
        }
        offset
    }

    /// Inverse of [`OffsetTable::offset`] for offsets of buffered indices.
    ///
    /// Offsets that fall into padding decompose to an index whose lowest
    /// coordinate lies past the buffered extent.
    pub fn index(&self, offset: usize) -> Index<N> {
        let mut index = self.origin;
        let mut rem = offset;
        for d in (0..N).rev() {
            let stride = self.strides[d];
            if stride == 0 {
                continue;
            }
            let q = rem / stride;
            rem -= q * stride;
            index[d] += q as isize;
        }
        index
    }
}

fn required_len<const N: usize>(size: &Size<N>, strides: &[usize; N]) -> Option<usize> {
    if size.is_empty() {
        return Some(0);
    }
    let mut last = 0usize;
    for d in 0..N {
        let span = (size[d] - 1).checked_mul(strides[d])?;
        last = last.checked_add(span)?;
    }
    last.checked_add(1)
}
