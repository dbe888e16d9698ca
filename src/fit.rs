use image::RgbaImage;
use image::imageops::{self, FilterType};
use thiserror::Error;

/// Share of the monitor a window may cover on each axis.
pub const SCREEN_FRACTION: f64 = 0.9;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid dimensions: image {image_w}x{image_h}, area {max_w}x{max_h}")]
pub struct InvalidDimensions {
    pub image_w: u32,
    pub image_h: u32,
    pub max_w: u32,
    pub max_h: u32,
}

/// Output size for one image and whether pixels must be resampled to get it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub width: u32,
    pub height: u32,
    pub resample: bool,
}

/// Size an image to the available area. Images that already fit are kept
/// as-is; larger ones are shrunk uniformly. Never upscales.
pub fn compute_fit(image_w: u32, image_h: u32, max_w: u32, max_h: u32) -> Result<Fit, InvalidDimensions> {
    if image_w == 0 || image_h == 0 || max_w == 0 || max_h == 0 {
        return Err(InvalidDimensions { image_w, image_h, max_w, max_h });
    }

    if image_w <= max_w && image_h <= max_h {
        return Ok(Fit { width: image_w, height: image_h, resample: false });
    }

    // scale = min(max_w / image_w, max_h / image_h), compared and applied in
    // integers so the floor is exact.
    let (iw, ih, mw, mh) = (image_w as u64, image_h as u64, max_w as u64, max_h as u64);
    let (width, height) = if mw * ih <= mh * iw {
        (mw, ih * mw / iw)
    } else {
        (iw * mh / ih, mh)
    };

    Ok(Fit {
        width: width.max(1) as u32,
        height: height.max(1) as u32,
        resample: true,
    })
}

/// The area a window may use on a monitor of the given physical size.
pub fn available_area(monitor_w: u32, monitor_h: u32) -> (u32, u32) {
    let w = (monitor_w as f64 * SCREEN_FRACTION) as u32;
    let h = (monitor_h as f64 * SCREEN_FRACTION) as u32;
    (w.max(1), h.max(1))
}

pub fn resample(img: RgbaImage, fit: Fit) -> RgbaImage {
    if !fit.resample {
        return img;
    }
    imageops::resize(&img, fit.width, fit.height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn fitting_images_are_untouched() {
        for &(w, h, mw, mh) in &[(1, 1, 1, 1), (640, 480, 900, 900), (900, 900, 900, 900), (10, 900, 10, 900)] {
            assert_eq!(
                compute_fit(w, h, mw, mh),
                Ok(Fit { width: w, height: h, resample: false })
            );
        }
    }

    #[test]
    fn wide_image_is_bound_by_width() {
        assert_eq!(
            compute_fit(2000, 1000, 900, 900),
            Ok(Fit { width: 900, height: 450, resample: true })
        );
    }

    #[test]
    fn tall_image_is_bound_by_height() {
        assert_eq!(
            compute_fit(800, 1600, 900, 900),
            Ok(Fit { width: 450, height: 900, resample: true })
        );
    }

    #[test]
    fn one_oversized_axis_still_scales_both() {
        assert_eq!(
            compute_fit(1000, 500, 1728, 250),
            Ok(Fit { width: 500, height: 250, resample: true })
        );
    }

    #[test]
    fn result_is_floored() {
        // scale = 1000 / 3000, 1001 / 3 = 333.67
        assert_eq!(
            compute_fit(3000, 1001, 1000, 1000),
            Ok(Fit { width: 1000, height: 333, resample: true })
        );
    }

    #[test]
    fn extreme_aspect_keeps_one_pixel() {
        let fit = compute_fit(100_000, 1, 900, 900).expect("fit");
        assert_eq!((fit.width, fit.height), (900, 1));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(compute_fit(0, 10, 100, 100).is_err());
        assert!(compute_fit(10, 0, 100, 100).is_err());
        assert!(compute_fit(10, 10, 0, 100).is_err());
    }

    #[test]
    fn available_area_is_ninety_percent() {
        assert_eq!(available_area(1920, 1080), (1728, 972));
        assert_eq!(available_area(1000, 1000), (900, 900));
    }

    #[test]
    fn resample_produces_target_size() {
        let img = RgbaImage::from_pixel(2000, 1000, Rgba([200, 10, 10, 255]));
        let fit = compute_fit(2000, 1000, 900, 900).expect("fit");
        let out = resample(img, fit);
        assert_eq!(out.dimensions(), (900, 450));
    }

    #[test]
    fn resample_is_deterministic() {
        let img = RgbaImage::from_fn(300, 200, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 7, 255]));
        let fit = compute_fit(300, 200, 120, 120).expect("fit");
        let a = resample(img.clone(), fit);
        let b = resample(img, fit);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn no_resample_returns_input() {
        let img = RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 4]));
        let fit = compute_fit(4, 3, 10, 10).expect("fit");
        let out = resample(img.clone(), fit);
        assert_eq!(out, img);
    }
}
