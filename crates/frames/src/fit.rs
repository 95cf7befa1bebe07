//! Uniform fill + center crop.
//!
//! Frames are scaled so the shorter-relative-to-target dimension exactly
//! fills the panel, then the centered region is cropped — no letterboxing,
//! matching how the device has always displayed its media.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Scale `src` uniformly until it covers `target_w × target_h`, then crop
/// the centered region to exactly that size.
pub fn fill_center_crop(src: &RgbImage, target_w: u32, target_h: u32) -> RgbImage {
    let (src_w, src_h) = src.dimensions();
    if (src_w, src_h) == (target_w, target_h) {
        return src.clone();
    }
    if src_w == 0 || src_h == 0 || target_w == 0 || target_h == 0 {
        return RgbImage::new(target_w, target_h);
    }

    // Integer aspect comparison: src wider than target  <=>  sw/sh > tw/th.
    let src_wider = u64::from(src_w) * u64::from(target_h) > u64::from(src_h) * u64::from(target_w);
    let (scaled_w, scaled_h) = if src_wider {
        // Height fills the target; width overflows and gets cropped.
        let w = (u64::from(src_w) * u64::from(target_h) / u64::from(src_h)) as u32;
        (w.max(target_w), target_h)
    } else {
        let h = (u64::from(src_h) * u64::from(target_w) / u64::from(src_w)) as u32;
        (target_w, h.max(target_h))
    };

    let scaled = imageops::resize(src, scaled_w, scaled_h, FilterType::Lanczos3);

    let crop_x = scaled_w / 2 - target_w / 2;
    let crop_y = scaled_h / 2 - target_h / 2;
    imageops::crop_imm(&scaled, crop_x, crop_y, target_w, target_h).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, px: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb(px))
    }

    #[test]
    fn test_same_size_is_passthrough() {
        let src = solid(16, 16, [9, 9, 9]);
        let out = fill_center_crop(&src, 16, 16);
        assert_eq!(out, src);
    }

    #[test]
    fn test_wide_source_fills_height_and_crops_width() {
        let out = fill_center_crop(&solid(200, 100, [1, 2, 3]), 100, 100);
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn test_tall_source_fills_width_and_crops_height() {
        let out = fill_center_crop(&solid(100, 300, [1, 2, 3]), 100, 100);
        assert_eq!(out.dimensions(), (100, 100));
    }

    #[test]
    fn test_upscale_small_source() {
        let out = fill_center_crop(&solid(10, 7, [1, 2, 3]), 128, 128);
        assert_eq!(out.dimensions(), (128, 128));
    }

    #[test]
    fn test_odd_dimensions_still_exact() {
        let out = fill_center_crop(&solid(33, 17, [1, 2, 3]), 21, 13);
        assert_eq!(out.dimensions(), (21, 13));
    }

    #[test]
    fn test_solid_color_survives_scaling() {
        // Resampling a uniform image must stay uniform.
        let out = fill_center_crop(&solid(64, 32, [40, 80, 120]), 16, 16);
        assert!(out.pixels().all(|p| *p == Rgb([40, 80, 120])));
    }

    #[test]
    fn test_center_crop_keeps_the_middle() {
        // Left third red, middle third green, right third blue; a square
        // crop of the 3:1 strip must come from the green middle.
        let mut src = RgbImage::new(300, 100);
        for (x, _, px) in src.enumerate_pixels_mut() {
            *px = if x < 100 {
                Rgb([255, 0, 0])
            } else if x < 200 {
                Rgb([0, 255, 0])
            } else {
                Rgb([0, 0, 255])
            };
        }
        let out = fill_center_crop(&src, 100, 100);
        let center = out.get_pixel(50, 50);
        assert_eq!(*center, Rgb([0, 255, 0]));
    }
}
