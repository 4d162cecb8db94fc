// External crates
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// STD library
use std::path::PathBuf;
use std::time::Instant;

// Internal imports
use scanline::{draw_with, Color, PixelBuffer, Point2D, RasterConfig, Triangle};

// Render resolution
const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;
const RANDOM_TRIANGLES: usize = 200;

/// Reference red triangle, a blue one drawn over it, then a random batch.
fn build_scene(rng: &mut StdRng) -> Vec<Triangle> {
    let mut triangles = vec![
        Triangle::new(
            Point2D::new(-0.5, -0.5),
            Point2D::new(0.5, -0.5),
            Point2D::new(0.0, 0.5),
            Color::new(255.0, 0.0, 0.0),
        ),
        Triangle::new(
            Point2D::new(0.0, -0.8),
            Point2D::new(0.9, 0.2),
            Point2D::new(-0.2, 0.9),
            Color::new(0.0, 64.0, 255.0),
        ),
    ];
    for _ in 0..RANDOM_TRIANGLES {
        let centre = Point2D::new(rng.gen_range(-1.2..1.2), rng.gen_range(-1.2..1.2));
        let mut corner = || centre + Point2D::new(rng.gen_range(-0.15..0.15), rng.gen_range(-0.15..0.15));
        let (a, b, c) = (corner(), corner(), corner());
        let color = Color::new(
            rng.gen_range(0.0..256.0),
            rng.gen_range(0.0..256.0),
            rng.gen_range(0.0..256.0),
        );
        triangles.push(Triangle::new(a, b, c, color));
    }
    triangles
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RasterConfig::from_env();
    log::info!("Number of raster workers: {}", config.workers);

    let png_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("scanline.png"));
    let bmp_path = png_path.with_extension("bmp");

    let mut rng = StdRng::seed_from_u64(0x5ca1_1e);
    let triangles = build_scene(&mut rng);

    let mut screen = PixelBuffer::new(WIDTH, HEIGHT, 3).context("allocating frame buffer")?;
    screen.clear(&[255, 255, 51])?;

    let draw_start = Instant::now();
    draw_with(&mut screen, &triangles, &config);
    let draw_time = draw_start.elapsed();

    let export_start = Instant::now();
    screen.save_png(&png_path)?;
    screen.write_bmp(&bmp_path)?;
    let export_time = export_start.elapsed();

    log::info!(
        "Drew {} triangles at {}x{}: raster {:.2?}, export {:.2?}",
        triangles.len(),
        WIDTH,
        HEIGHT,
        draw_time,
        export_time
    );
    log::info!("Saved {} and {}", png_path.display(), bmp_path.display());
    Ok(())
}
