use nd_core::{Index, Region, Size};
use rand::Rng;
use rand::rngs::StdRng;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn region2(x: isize, y: isize, w: usize, h: usize) -> Region<2> {
    Region::new(Index::new([x, y]), Size::new([w, h]))
}

/// Every index of `region`, dimension 0 fastest, enumerated with a plain
/// mixed-radix counter.
#[allow(dead_code)]
pub fn raster_indices<const N: usize>(region: &Region<N>) -> Vec<Index<N>> {
    let mut out = Vec::new();
    if region.is_empty() {
        return out;
    }
    let mut idx = region.origin;
    'outer: loop {
        out.push(idx);
        for d in 0..N {
            idx[d] += 1;
            if idx[d] < region.origin[d] + region.size[d] as isize {
                continue 'outer;
            }
            idx[d] = region.origin[d];
        }
        break;
    }
    out
}

/// Offset of `index` in a packed buffer, computed by nesting the dimensions
/// (Horner form) rather than through a stride table.
#[allow(dead_code)]
pub fn nested_offset<const N: usize>(buffered: &Region<N>, index: &Index<N>) -> isize {
    let mut offset = 0isize;
    for d in (0..N).rev() {
        offset = offset * buffered.size[d] as isize + (index[d] - buffered.origin[d]);
    }
    offset
}

/// Random buffered region and a random sub-region inside it.
#[allow(dead_code)]
pub fn random_regions<const N: usize>(rng: &mut StdRng) -> (Region<N>, Region<N>) {
    let buffered = Region::new(
        Index::new(core::array::from_fn(|_| rng.gen_range(-4..=4))),
        Size::new(core::array::from_fn(|_| rng.gen_range(1..=6))),
    );

    let mut walked = Region::default();
    for d in 0..N {
        let extent = buffered.size[d];
        let start = rng.gen_range(0..extent);
        let len = rng.gen_range(1..=extent - start);
        walked.origin[d] = buffered.origin[d] + start as isize;
        walked.size[d] = len;
    }
    (buffered, walked)
}
