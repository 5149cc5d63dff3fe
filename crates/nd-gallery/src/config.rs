use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use nd_imaging::{Index, Region, Size};
use serde::{Deserialize, Serialize};

/// Largest buffer a walk will allocate visit counts for.
pub const MAX_BUFFER_ELEMENTS: usize = 1 << 24;

/// One traversal: a buffer, the region walked inside it, and how.
///
/// Coordinates are per dimension, dimension 0 first. A missing walked region
/// means the whole buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    pub buffered_origin: Vec<isize>,
    pub buffered_size: Vec<usize>,
    pub region_origin: Option<Vec<isize>>,
    pub region_size: Option<Vec<usize>>,
    /// Active direction of the linear walk.
    pub direction: usize,
    /// Walk from the last index back to the first.
    pub reverse: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            buffered_origin: vec![0, 0],
            buffered_size: vec![8, 12],
            region_origin: None,
            region_size: None,
            direction: 0,
            reverse: false,
        }
    }
}

impl WalkConfig {
    pub fn dims(&self) -> usize {
        self.buffered_size.len()
    }

    /// Checks that every coordinate list matches the buffer's dimension
    /// count, that the direction is in range and that the buffer stays under
    /// [`MAX_BUFFER_ELEMENTS`]. Region containment is left to iterator
    /// construction.
    pub fn validate(&self) -> Result<()> {
        let dims = self.dims();
        if dims == 0 {
            bail!("buffered_size must name at least one dimension");
        }
        if self.buffered_origin.len() != dims {
            bail!(
                "buffered_origin has {} coordinates, expected {dims}",
                self.buffered_origin.len()
            );
        }
        if let Some(origin) = self.region_origin.as_ref().filter(|o| o.len() != dims) {
            bail!("region_origin has {} coordinates, expected {dims}", origin.len());
        }
        if let Some(size) = self.region_size.as_ref().filter(|s| s.len() != dims) {
            bail!("region_size has {} extents, expected {dims}", size.len());
        }
        if self.direction >= dims {
            bail!("direction {} out of range for {dims} dimensions", self.direction);
        }
        let elements = self
            .buffered_size
            .iter()
            .try_fold(1usize, |acc, &extent| acc.checked_mul(extent));
        match elements {
            Some(n) if n <= MAX_BUFFER_ELEMENTS => {}
            _ => bail!(
                "buffered_size {:?} exceeds {MAX_BUFFER_ELEMENTS} elements",
                self.buffered_size
            ),
        }
        Ok(())
    }

    pub(crate) fn buffered_region<const N: usize>(&self) -> Result<Region<N>> {
        Ok(Region::new(
            Index::new(to_array(&self.buffered_origin, "buffered_origin")?),
            Size::new(to_array(&self.buffered_size, "buffered_size")?),
        ))
    }

    pub(crate) fn walked_region<const N: usize>(&self) -> Result<Region<N>> {
        let buffered = self.buffered_region::<N>()?;
        let origin = match &self.region_origin {
            Some(origin) => Index::new(to_array(origin, "region_origin")?),
            None => buffered.origin,
        };
        let size = match &self.region_size {
            Some(size) => Size::new(to_array(size, "region_size")?),
            None => buffered.size,
        };
        Ok(Region::new(origin, size))
    }
}

fn to_array<T: Copy, const N: usize>(values: &[T], name: &str) -> Result<[T; N]> {
    <[T; N]>::try_from(values)
        .with_context(|| format!("{name} has {} entries, expected {N}", values.len()))
}

pub fn load_config(path: &Path) -> Result<WalkConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read walk config {}", path.display()))?;
    let config: WalkConfig = serde_json::from_str(&data)
        .with_context(|| format!("failed to parse walk config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
