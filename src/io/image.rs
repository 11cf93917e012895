//! Image decoding, downscaling, intensity conversion and PNG export

use std::path::Path;

use bitvec::prelude::*;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};

use crate::io::configuration::{MASK_CLASS_A, MASK_CLASS_B};
use crate::io::error::{KmarkovError, Result};

/// Decode an image file
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| KmarkovError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Dimensions after dividing the width by `scale` and keeping the aspect ratio
///
/// Neither dimension drops below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, scale: u32) -> (u32, u32) {
    let scale = scale.max(1);
    let new_width = (width / scale).max(1);
    let new_height = if width == 0 {
        1
    } else {
        (u64::from(height) * u64::from(new_width) / u64::from(width)).max(1) as u32
    };
    (new_width, new_height)
}

/// Shrink with nearest-neighbour sampling; a scale of one returns a copy
pub fn downscale(image: &DynamicImage, scale: u32) -> DynamicImage {
    if scale <= 1 {
        return image.clone();
    }
    let (width, height) = scaled_dimensions(image.width(), image.height(), scale);
    image.resize_exact(width, height, FilterType::Nearest)
}

/// Row-major intensities, each the integer mean of the red, green and blue channels
pub fn intensities(image: &DynamicImage) -> Vec<u8> {
    image
        .to_rgb8()
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8
        })
        .collect()
}

/// Map class bits to display values, class A dark and class B light
pub fn assignment_mask(assignment: &BitSlice) -> Vec<u8> {
    assignment
        .iter()
        .by_vals()
        .map(|bit| if bit { MASK_CLASS_A } else { MASK_CLASS_B })
        .collect()
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| KmarkovError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    Ok(())
}

/// Write an image as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory cannot be created or encoding fails
pub fn save_image(image: &DynamicImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| KmarkovError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Write single-channel values as a grayscale PNG
///
/// # Errors
///
/// Returns an error if `values` does not hold `width * height` entries, the
/// directory cannot be created, or encoding fails
pub fn save_gray(values: &[u8], width: u32, height: u32, path: &Path) -> Result<()> {
    let expected = width as usize * height as usize;
    let gray = (values.len() == expected)
        .then(|| GrayImage::from_raw(width, height, values.to_vec()))
        .flatten()
        .ok_or_else(|| KmarkovError::InvalidSourceData {
            reason: format!(
                "{} values cannot fill a {width}x{height} image ({expected} pixels)",
                values.len()
            ),
        })?;
    save_image(&DynamicImage::ImageLuma8(gray), path)
}
