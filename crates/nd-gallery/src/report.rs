use anyhow::{Context, Result, bail};
use log::{debug, info};
use nd_imaging::{
    Image, LineWalk, LinearIterator, PixelWrite, RegionConstIterator, RegionWalk,
};
use serde::Serialize;

use crate::config::WalkConfig;

/// Cap on the visit order recorded in a report.
pub const MAX_ORDER_ENTRIES: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalkReport {
    pub dims: usize,
    pub buffered: String,
    pub region: String,
    pub direction: usize,
    pub reverse: bool,
    pub visited: usize,
    pub lines: usize,
    /// First visited index of every line, in walk order.
    pub line_starts: Vec<Vec<isize>>,
    /// Leading visit order, at most [`MAX_ORDER_ENTRIES`] indices.
    pub order: Vec<Vec<isize>>,
    /// Every walked index was visited exactly once and nothing outside the
    /// walked region was touched.
    pub coverage_ok: bool,
}

pub fn run_walk(config: &WalkConfig) -> Result<WalkReport> {
    config.validate()?;
    match config.dims() {
        1 => walk::<1>(config),
        2 => walk::<2>(config),
        3 => walk::<3>(config),
        4 => walk::<4>(config),
        n => bail!("walks support 1 to 4 dimensions, got {n}"),
    }
}

fn walk<const N: usize>(config: &WalkConfig) -> Result<WalkReport> {
    let buffered = config.buffered_region::<N>()?;
    let region = config.walked_region::<N>()?;
    let mut counts = Image::new_fill(buffered, 0u32).context("failed to allocate visit counts")?;

    let mut report = WalkReport {
        dims: N,
        buffered: buffered.to_string(),
        region: region.to_string(),
        direction: config.direction,
        reverse: config.reverse,
        visited: 0,
        lines: 0,
        line_starts: Vec::new(),
        order: Vec::new(),
        coverage_ok: false,
    };

    let mut it = LinearIterator::with_direction(&mut counts, region, config.direction)
        .with_context(|| format!("cannot walk region ({region})"))?;
    if config.reverse {
        it.go_to_reverse_begin();
        while !it.is_at_reverse_end() {
            report.line_starts.push(it.index().0.to_vec());
            while !it.is_at_reverse_end_of_line() {
                visit(&mut it, &mut report);
                it.dec();
            }
            report.lines += 1;
            it.previous_line();
        }
    } else {
        it.go_to_begin();
        while !it.is_at_end() {
            report.line_starts.push(it.index().0.to_vec());
            while !it.is_at_end_of_line() {
                visit(&mut it, &mut report);
                it.inc();
            }
            report.lines += 1;
            it.next_line();
        }
    }
    debug!(
        "walk dims={N} direction={} reverse={} lines={}",
        config.direction, config.reverse, report.lines
    );

    report.coverage_ok = RegionConstIterator::new(&counts, buffered)?
        .pixels()
        .all(|(idx, &n)| n == u32::from(region.is_inside(&idx)));
    info!(
        "walked ({region}) visited={} coverage_ok={}",
        report.visited, report.coverage_ok
    );
    Ok(report)
}

fn visit<const N: usize>(it: &mut LinearIterator<'_, u32, N>, report: &mut WalkReport) {
    if report.order.len() < MAX_ORDER_ENTRIES {
        report.order.push(it.index().0.to_vec());
    }
    *it.value_mut() += 1;
    report.visited += 1;
}
