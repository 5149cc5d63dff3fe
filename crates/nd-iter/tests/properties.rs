//! Randomized traversal properties over 2, 3 and 4 dimensions.
//!
//! Each case draws a buffered region with a non-zero origin, a walked
//! sub-region and an active direction from a seeded generator, so failures
//! are reproducible.

mod common;

use std::collections::{HashMap, HashSet};

use common::fixtures::{init_logging, nested_offset, random_regions, raster_indices};
use nd_core::{Image, ImageViewMut, Index, OffsetTable, Region};
use nd_iter::{
    LineWalk, LinearConstIterator, LinearIterator, PixelRead, PixelWrite, RegionConstIterator,
    RegionWalk,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CASES: usize = 150;

/// Image whose pixels hold their own packed offset.
fn offset_image<const N: usize>(buffered: Region<N>) -> Image<isize, N> {
    let len = buffered.num_elements().expect("small region") as isize;
    Image::from_vec(buffered, (0..len).collect()).expect("valid image")
}

/// Line starts for `dir`: raster order restricted to the first coordinate of
/// the active direction.
fn expected_line_starts<const N: usize>(walked: &Region<N>, dir: usize) -> Vec<Index<N>> {
    raster_indices(walked)
        .into_iter()
        .filter(|idx| idx[dir] == walked.origin[dir])
        .collect()
}

fn check_forward_walk<const N: usize>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..CASES {
        let (buffered, walked) = random_regions::<N>(&mut rng);
        let dir = rng.gen_range(0..N);
        let img = offset_image(buffered);
        let starts = expected_line_starts(&walked, dir);

        let mut it = LinearConstIterator::with_direction(&img, walked, dir).expect("valid");
        let mut visits: HashMap<Index<N>, usize> = HashMap::new();
        let mut lines = 0;
        while !it.is_at_end() {
            assert_eq!(it.index(), starts[lines], "line {lines} dir {dir} in {walked}");
            assert!(it.is_at_begin_of_line());

            for _ in 0..walked.size[dir] {
                assert!(!it.is_at_end_of_line());
                let expected = nested_offset(&buffered, &it.index());
                assert_eq!(it.offset(), expected);
                assert_eq!(it.get(), expected);
                *visits.entry(it.index()).or_default() += 1;
                it.inc();
            }
            assert!(it.is_at_end_of_line());

            lines += 1;
            it.next_line();
        }

        assert_eq!(lines, starts.len());
        let mut sentinel = walked.origin;
        sentinel[N - 1] += walked.size[N - 1] as isize;
        assert_eq!(it.index(), sentinel);

        let all = raster_indices(&walked);
        assert_eq!(visits.len(), all.len());
        assert!(all.iter().all(|idx| visits.get(idx) == Some(&1)));
    }
}

fn check_previous_line_inverts_next_line<const N: usize>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..CASES {
        let (buffered, walked) = random_regions::<N>(&mut rng);
        let img = offset_image(buffered);

        for dir in 0..N {
            let starts = expected_line_starts(&walked, dir);
            let last = walked.origin[dir] + walked.size[dir] as isize - 1;
            let line_end = |start: Index<N>| {
                let mut idx = start;
                idx[dir] = last;
                idx
            };

            let mut it = LinearConstIterator::with_direction(&img, walked, dir).expect("valid");
            for k in 0..starts.len() {
                assert_eq!(it.index(), starts[k]);

                let mut back = it.clone();
                back.previous_line();
                if k == 0 {
                    assert!(back.is_at_reverse_end(), "dir {dir} in {walked}");
                } else {
                    let expected_prev = line_end(starts[k - 1]);
                    assert_eq!(back.index(), expected_prev);
                    assert_eq!(back.offset(), nested_offset(&buffered, &expected_prev));
                }

                back.next_line();
                assert_eq!(back.index(), it.index(), "dir {dir} in {walked}");
                assert_eq!(back.offset(), it.offset());
                assert!(!back.is_at_end());

                it.next_line();
            }
            assert!(it.is_at_end());

            // From the end, one line back is the last line and one forward
            // returns to the same sentinel.
            let sentinel = it.index();
            let mut back = it.clone();
            back.previous_line();
            let expected_last = line_end(starts[starts.len() - 1]);
            assert!(!back.is_at_end(), "dir {dir} in {walked}");
            assert_eq!(back.index(), expected_last, "dir {dir} in {walked}");
            assert_eq!(back.offset(), nested_offset(&buffered, &expected_last));
            back.next_line();
            assert!(back.is_at_end(), "dir {dir} in {walked}");
            assert_eq!(back.index(), sentinel);

            // From the reverse end, one line forward is the first line.
            it.go_to_reverse_end();
            it.next_line();
            assert!(!it.is_at_reverse_end(), "dir {dir} in {walked}");
            assert_eq!(it.index(), starts[0], "dir {dir} in {walked}");
            assert_eq!(it.offset(), nested_offset(&buffered, &starts[0]));
            it.previous_line();
            assert!(it.is_at_reverse_end());
        }
    }
}

fn check_reverse_walk_mirrors_forward<const N: usize>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..CASES {
        let (buffered, walked) = random_regions::<N>(&mut rng);
        let dir = rng.gen_range(0..N);
        let img = offset_image(buffered);

        let mut it = LinearConstIterator::with_direction(&img, walked, dir).expect("valid");
        let mut forward = Vec::new();
        while !it.is_at_end() {
            while !it.is_at_end_of_line() {
                forward.push(it.get());
                it.inc();
            }
            it.next_line();
        }

        let mut backward = Vec::new();
        it.go_to_reverse_begin();
        while !it.is_at_reverse_end() {
            while !it.is_at_reverse_end_of_line() {
                backward.push(it.get());
                it.dec();
            }
            it.previous_line();
        }

        backward.reverse();
        assert_eq!(forward, backward, "dir {dir} in {walked}");
    }
}

fn check_raster_order<const N: usize>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..CASES {
        let (buffered, walked) = random_regions::<N>(&mut rng);
        let img = offset_image(buffered);

        let raster: Vec<Index<N>> = RegionConstIterator::new(&img, walked)
            .expect("valid region")
            .pixels()
            .map(|(idx, &v)| {
                assert_eq!(v, nested_offset(&buffered, &idx));
                idx
            })
            .collect();
        assert_eq!(raster, raster_indices(&walked));
    }
}

fn check_padded_writes_are_injective<const N: usize>(seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..CASES {
        let (buffered, walked) = random_regions::<N>(&mut rng);
        let dir = rng.gen_range(0..N);

        let mut strides = [0usize; N];
        let mut acc = 1usize;
        for d in 0..N {
            strides[d] = acc + rng.gen_range(0..3) * usize::from(d > 0);
            acc = strides[d] * buffered.size[d];
        }
        let table = OffsetTable::with_strides(&buffered, strides).expect("valid strides");
        let mut data = vec![-1i64; table.required_len()];

        let mut view =
            ImageViewMut::from_slice_with_strides_mut(buffered, strides, &mut data).expect("valid");
        let mut it = LinearIterator::with_direction(&mut view, walked, dir).expect("valid");
        let mut written = 0i64;
        while !it.is_at_end() {
            while !it.is_at_end_of_line() {
                it.set(written);
                written += 1;
                it.inc();
            }
            it.next_line();
        }

        let distinct: HashSet<i64> = data.iter().copied().filter(|&v| v >= 0).collect();
        assert_eq!(distinct.len() as i64, written);
        assert_eq!(written as usize, walked.num_elements().expect("small region"));
    }
}

#[test]
fn forward_walk_2d_3d_4d() {
    init_logging();
    check_forward_walk::<2>(0x5eed_0002);
    check_forward_walk::<3>(0x5eed_0003);
    check_forward_walk::<4>(0x5eed_0004);
}

#[test]
fn previous_line_inverts_next_line_2d_3d_4d() {
    init_logging();
    check_previous_line_inverts_next_line::<2>(0x11_0002);
    check_previous_line_inverts_next_line::<3>(0x11_0003);
    check_previous_line_inverts_next_line::<4>(0x11_0004);
}

#[test]
fn reverse_walk_mirrors_forward_2d_3d_4d() {
    init_logging();
    check_reverse_walk_mirrors_forward::<2>(0x22_0002);
    check_reverse_walk_mirrors_forward::<3>(0x22_0003);
    check_reverse_walk_mirrors_forward::<4>(0x22_0004);
}

#[test]
fn raster_order_matches_nested_loops() {
    init_logging();
    check_raster_order::<1>(0x33_0001);
    check_raster_order::<2>(0x33_0002);
    check_raster_order::<3>(0x33_0003);
    check_raster_order::<4>(0x33_0004);
}

#[test]
fn padded_strides_keep_writes_injective() {
    init_logging();
    check_padded_writes_are_injective::<2>(0x44_0002);
    check_padded_writes_are_injective::<3>(0x44_0003);
    check_padded_writes_are_injective::<4>(0x44_0004);
}
