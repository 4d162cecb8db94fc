use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scanline::{draw, draw_with, BufferError, Color, PixelBuffer, Point2D, RasterConfig, Triangle};

const RED: Color = Color::new(255.0, 0.0, 0.0);
const BLUE: Color = Color::new(0.0, 0.0, 255.0);

fn p(x: f32, y: f32) -> Point2D {
    Point2D::new(x, y)
}

fn reference_triangle() -> Triangle {
    Triangle::new(p(-0.5, -0.5), p(0.5, -0.5), p(0.0, 0.5), RED)
}

fn render(width: u32, height: u32, triangles: &[Triangle], workers: usize) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(width, height, 3).unwrap();
    draw_with(&mut buffer, triangles, &RasterConfig::with_workers(workers));
    buffer
}

fn row_pixels(buffer: &PixelBuffer, row: u32) -> Vec<[u8; 3]> {
    (0..buffer.width())
        .map(|x| {
            let px = buffer.pixel(x, row).unwrap();
            [px[0], px[1], px[2]]
        })
        .collect()
}

fn covered(buffer: &PixelBuffer, row: u32) -> usize {
    row_pixels(buffer, row).iter().filter(|px| **px != [0, 0, 0]).count()
}

fn random_scene(seed: u64, count: usize) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mut corner = || p(rng.gen_range(-1.5..1.5), rng.gen_range(-1.5..1.5));
            let (a, b, c) = (corner(), corner(), corner());
            let color = Color::new(
                rng.gen_range(0.0..256.0),
                rng.gen_range(0.0..256.0),
                rng.gen_range(0.0..256.0),
            );
            Triangle::new(a, b, c, color)
        })
        .collect()
}

#[test]
fn reference_triangle_in_four_by_four() {
    let buffer = render(4, 4, &[reference_triangle()], 2);
    let expected_rows = [
        [false, false, false, false],
        [false, true, true, false],
        [false, true, true, false],
        [false, false, false, false],
    ];
    for (row, expected) in expected_rows.iter().enumerate() {
        for (x, &lit) in expected.iter().enumerate() {
            let px = buffer.pixel(x as u32, row as u32).unwrap();
            let want: &[u8] = if lit { &[255, 0, 0] } else { &[0, 0, 0] };
            assert_eq!(px, want, "pixel ({x}, {row})");
        }
    }
}

#[test]
fn span_narrows_toward_apex() {
    let buffer = render(64, 64, &[reference_triangle()], 4);
    // Row 32 is just above y = 0, row 47 is just below the apex at y = 0.5
    let widths: Vec<usize> = (32..48).map(|row| covered(&buffer, row)).collect();
    assert!(widths.windows(2).all(|w| w[0] >= w[1]), "{widths:?}");
    assert!(widths[0] > widths[widths.len() - 1], "{widths:?}");
    assert!(widths[0] > 0);
}

#[test]
fn triangles_above_or_below_write_nothing() {
    let above = Triangle::new(p(-0.5, 1.2), p(0.5, 1.2), p(0.0, 2.0), RED);
    let below = Triangle::new(p(-0.5, -2.0), p(0.5, -2.0), p(0.0, -1.01), RED);
    let buffer = render(16, 16, &[above, below], 3);
    assert!(buffer.data().iter().all(|&b| b == 0));
}

#[test]
fn triangles_left_or_right_write_nothing() {
    let left = Triangle::new(p(-3.0, -0.5), p(-2.0, -0.5), p(-2.5, 0.5), RED);
    let right = Triangle::new(p(2.0, -0.5), p(3.0, -0.5), p(2.5, 0.5), RED);
    let buffer = render(16, 16, &[left, right], 3);
    assert!(buffer.data().iter().all(|&b| b == 0));
}

#[test]
fn horizontal_edge_on_scanline() {
    // Row 2 of a 4-row buffer sits at y = 0.25, exactly on the flat top edge
    let t = Triangle::new(p(-0.5, 0.25), p(0.5, 0.25), p(0.0, -0.75), RED);
    let buffer = render(8, 4, &[t], 1);
    let lit: Vec<bool> = row_pixels(&buffer, 2).iter().map(|px| *px == [255, 0, 0]).collect();
    assert_eq!(lit, [false, false, true, true, true, true, true, false]);
}

#[test]
fn vertex_on_scanline_fills_from_first_two_hits() {
    // At y = 0.25 the scanline meets vertex b, which both a->b and b->c report
    let t = Triangle::new(p(-0.5, -0.5), p(0.5, 0.25), p(0.0, 0.75), RED);
    let buffer = render(8, 4, &[t], 1);
    let lit: Vec<usize> = row_pixels(&buffer, 2)
        .iter()
        .enumerate()
        .filter(|(_, px)| **px == [255, 0, 0])
        .map(|(x, _)| x)
        .collect();
    assert_eq!(lit, [6]);
}

#[test]
fn later_triangle_overwrites_earlier() {
    let a = Triangle::new(p(-1.0, -1.0), p(1.0, -1.0), p(0.0, 1.0), RED);
    let b = Triangle::new(p(-0.25, -1.0), p(0.25, -1.0), p(0.0, 1.0), BLUE);
    let buffer = render(8, 1, &[a, b], 1);
    let row = row_pixels(&buffer, 0);
    assert_eq!(row[2], [255, 0, 0]);
    assert_eq!(row[3], [0, 0, 255]);
    assert_eq!(row[4], [0, 0, 255]);
    assert_eq!(row[5], [255, 0, 0]);

    // Reversed order: the wide red triangle covers the blue one entirely
    let buffer = render(8, 1, &[b, a], 1);
    assert!(row_pixels(&buffer, 0)[2..=6].iter().all(|px| *px == [255, 0, 0]));
}

#[test]
fn worker_count_does_not_change_output() {
    let scene = random_scene(7, 300);
    let single = render(97, 61, &scene, 1);
    for workers in [2, 3, 8, 61, 100] {
        let parallel = render(97, 61, &scene, workers);
        assert!(single.data() == parallel.data(), "{workers} workers diverged");
    }
    assert!(single.data().iter().any(|&b| b != 0));
}

#[test]
fn default_draw_matches_single_worker() {
    let scene = random_scene(42, 64);
    let mut buffer = PixelBuffer::new(40, 30, 4).unwrap();
    draw(&mut buffer, &scene);
    let mut expected = PixelBuffer::new(40, 30, 4).unwrap();
    draw_with(&mut expected, &scene, &RasterConfig::with_workers(1));
    assert_eq!(buffer, expected);
}

#[test]
fn redraw_after_resize() {
    let mut buffer = PixelBuffer::new(4, 4, 3).unwrap();
    draw(&mut buffer, &[reference_triangle()]);
    buffer.resize(64, 64).unwrap();
    draw_with(&mut buffer, &[reference_triangle()], &RasterConfig::with_workers(5));
    assert_eq!(buffer, render(64, 64, &[reference_triangle()], 1));
}

#[test]
fn buffer_errors() {
    assert_eq!(
        PixelBuffer::new(0, 4, 3).unwrap_err(),
        BufferError::InvalidDimension { width: 0, height: 4 }
    );
    assert_eq!(PixelBuffer::new(4, 4, 5).unwrap_err(), BufferError::InvalidChannelCount(5));

    let mut buffer = PixelBuffer::new(4, 4, 3).unwrap();
    assert_eq!(
        buffer.set_channel(4, 0, 0, 255),
        Err(BufferError::OutOfBounds { x: 4, y: 0, channel: 0 })
    );
    assert!(buffer.set_channel(3, 3, 2, 255).is_ok());
}
