//! Flat-colour scanline fill.
//!
//! Every output row is intersected with each triangle's edges at the row's
//! vertical centre. The two recorded crossings bound a horizontal span that
//! is filled with the triangle's colour. Rows are split into contiguous
//! blocks, and each block is drawn by its own worker with exclusive access
//! to its slice of the raster.

use std::mem;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::RasterConfig;
use crate::partition::{partition_rows, RowBlock};
use crate::point2d::Point2D;
use crate::screen::PixelBuffer;
use crate::triangle::Triangle;

/// Where the horizontal line at `y` crosses the segment `a`-`b`.
///
/// Horizontal segments never report a crossing. Endpoints are inclusive.
#[inline(always)]
pub fn edge_intersection(y: f32, a: Point2D, b: Point2D) -> Option<Point2D> {
    let direction = b - a;
    if direction.y == 0.0 {
        return None;
    }
    let t = (y - a.y) / direction.y;
    if !(0.0..=1.0).contains(&t) {
        return None;
    }
    Some(a + direction * t)
}

/// The first two edge crossings in a->b, b->c, c->a order, sorted by x.
///
/// Collection stops at two hits. A scanline passing exactly through a vertex
/// crosses both edges meeting there, and the third edge is then never tested.
pub fn triangle_intersections(y: f32, triangle: &Triangle) -> [Option<Point2D>; 2] {
    let mut hits = triangle
        .edges()
        .into_iter()
        .filter_map(|(a, b)| edge_intersection(y, a, b));
    let mut intersections = [hits.next(), hits.next()];
    if let [Some(first), Some(second)] = intersections {
        if first.x > second.x {
            intersections.swap(0, 1);
        }
    }
    intersections
}

/// NDC y of the centre of `row`.
#[inline(always)]
pub fn row_to_ndc(row: usize, height: u32) -> f32 {
    let pixel_height = 2.0 / height as f32;
    -1.0 + (row as f32 + 0.5) * pixel_height
}

/// Pixel column of an NDC x. Truncates toward zero; the half-width offset
/// is the integer half of `width`.
#[inline(always)]
fn ndc_to_column(x: f32, width: u32) -> i64 {
    (x * width as f32 / 2.0 + (width / 2) as f32) as i64
}

/// Inclusive pixel columns covered on a row, or `None` when nothing is.
///
/// A lone crossing runs to the right edge of the raster.
pub fn span(intersections: &[Option<Point2D>; 2], width: u32) -> Option<(usize, usize)> {
    let first = intersections[0]?;
    let last_column = width as i64 - 1;

    let x_start = ndc_to_column(first.x, width).max(0);
    let x_end = match intersections[1] {
        Some(second) => ndc_to_column(second.x, width).min(last_column),
        None => last_column,
    };

    if x_start > last_column || x_end < 0 || x_start > x_end {
        return None;
    }
    Some((x_start as usize, x_end as usize))
}

/// Fills one row. `row_pixels` is exactly that row's bytes.
///
/// Triangles are applied in order, so later ones overwrite earlier ones.
/// Only the first `min(3, channels)` channels are written.
pub fn draw_row(
    row_pixels: &mut [u8],
    row: usize,
    width: u32,
    height: u32,
    channels: usize,
    triangles: &[Triangle],
) {
    let y = row_to_ndc(row, height);
    let written = channels.min(3);

    for triangle in triangles {
        let intersections = triangle_intersections(y, triangle);
        let Some((x_start, x_end)) = span(&intersections, width) else {
            continue;
        };
        let color = triangle.color.to_bytes();
        for px in row_pixels[x_start * channels..(x_end + 1) * channels].chunks_exact_mut(channels) {
            px[..written].copy_from_slice(&color[..written]);
        }
    }
}

/// Rasterizes `triangles` into `buffer` using one worker per logical core.
pub fn draw(buffer: &mut PixelBuffer, triangles: &[Triangle]) {
    draw_with(buffer, triangles, &RasterConfig::default());
}

/// Rasterizes `triangles` into `buffer` with `config.workers` row blocks.
///
/// A thread pool is built for this call and joined before returning. The
/// result does not depend on the worker count.
pub fn draw_with(buffer: &mut PixelBuffer, triangles: &[Triangle], config: &RasterConfig) {
    let start = Instant::now();
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    let row_bytes = buffer.row_bytes();
    let workers = config.workers.max(1);

    // Carve the raster into one disjoint slice per block
    let mut rest = buffer.data_mut();
    let mut work: Vec<(RowBlock, &mut [u8])> = Vec::with_capacity(workers);
    for block in partition_rows(height as usize, workers) {
        let (rows, tail) = mem::take(&mut rest).split_at_mut(block.len() * row_bytes);
        work.push((block, rows));
        rest = tail;
    }

    let render_block = |(block, rows): (RowBlock, &mut [u8])| {
        for (row, row_pixels) in block.rows().zip(rows.chunks_exact_mut(row_bytes)) {
            draw_row(row_pixels, row, width, height, channels, triangles);
        }
    };

    if workers == 1 {
        work.into_iter().for_each(render_block);
    } else {
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| work.into_par_iter().for_each(&render_block)),
            Err(err) => {
                log::warn!("could not start {workers} raster workers ({err}), drawing on the calling thread");
                work.into_iter().for_each(render_block);
            }
        }
    }

    log::debug!(
        "drew {} triangles into {}x{} with {} workers in {:.2?}",
        triangles.len(),
        width,
        height,
        workers,
        start.elapsed()
    );
}
