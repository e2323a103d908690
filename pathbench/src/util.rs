use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GenericImageView};

use crate::grid::Grid;

/// Turn an image into a grid: dark pixels are walls, light pixels are free
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let width = i32::try_from(img.width()).context("image is too wide")?;
    let height = i32::try_from(img.height()).context("image is too tall")?;

    let mut mask = Vec::with_capacity(width as usize * height as usize);
    for y in 0..img.height() {
        for x in 0..img.width() {
            let p = img.get_pixel(x, y);
            mask.push(p.0[0] < 128);
        }
    }

    let grid = Grid::with_mask(width, height, mask);
    grid.validate()?;
    Ok(grid)
}

pub fn load_grid(path: &Path) -> Result<Grid, anyhow::Error> {
    let img = image::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let grid = parse_img(&img)?;
    log::debug!(
        "loaded {}x{} wall mask from {}",
        grid.width,
        grid.height,
        path.display()
    );
    Ok(grid)
}
