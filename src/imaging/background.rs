//! Solid-background removal for logo images
//!
//! The pixel at (0,0) is taken as the background reference color; the caller
//! is responsible for uploading an image where that corner actually is
//! background. Pixels within `tolerance` of the reference become fully
//! transparent, pixels in the `fade` band beyond it get an eased partial
//! alpha, and in `keep_internal` mode only pixels reachable from the image
//! border through near-background colors are touched at all.

use std::collections::VecDeque;
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

/// Parameters for one removal operation
#[derive(Debug, Clone, Copy)]
pub struct RemovalOptions {
    /// Fraction of the maximum RGB distance treated as background, in [0, 0.5]
    pub tolerance: f32,
    /// Fraction of the maximum RGB distance forming the soft edge beyond
    /// `tolerance`, in [0, 0.5]
    pub fade: f32,
    /// When true, only remove background reachable from the image border,
    /// protecting enclosed background-colored regions (e.g. the inside of an "O")
    pub keep_internal: bool,
    /// Easing exponent for the fade band; 3 reproduces the original curve
    pub fade_exponent: i32,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.05,
            fade: 0.10,
            keep_internal: true,
            fade_exponent: 3,
        }
    }
}

/// Remove the background of an encoded image, returning PNG bytes.
///
/// Returns `None` if the input cannot be decoded. Never panics on malformed
/// input. A zero-size image is a no-op returning the input bytes.
pub fn remove_background(encoded: &[u8], options: &RemovalOptions) -> Option<Vec<u8>> {
    let decoded = match image::load_from_memory(encoded) {
        Ok(img) => img,
        Err(e) => {
            tracing::debug!("Background removal skipped, image failed to decode: {}", e);
            return None;
        }
    };

    let mut pixels = decoded.to_rgba8();
    if pixels.width() == 0 || pixels.height() == 0 {
        return Some(encoded.to_vec());
    }

    apply_removal(&mut pixels, options);

    let mut out = Cursor::new(Vec::new());
    match DynamicImage::ImageRgba8(pixels).write_to(&mut out, ImageFormat::Png) {
        Ok(()) => Some(out.into_inner()),
        Err(e) => {
            tracing::warn!("Failed to re-encode image after background removal: {}", e);
            None
        }
    }
}

/// Apply background removal in place to a decoded pixel buffer.
pub fn apply_removal(pixels: &mut RgbaImage, options: &RemovalOptions) {
    let (width, height) = pixels.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let max_distance = (255.0f32 * 255.0 * 3.0).sqrt();
    let tol_dist = options.tolerance.clamp(0.0, 0.5) * max_distance;
    let fade_dist = options.fade.clamp(0.0, 0.5) * max_distance;
    let total_limit = tol_dist + fade_dist;

    // Zero thresholds leave every pixel untouched.
    if total_limit <= 0.0 {
        return;
    }

    let reference = *pixels.get_pixel(0, 0);

    if options.keep_internal {
        remove_reachable(pixels, reference, tol_dist, fade_dist, options.fade_exponent);
    } else {
        for pixel in pixels.pixels_mut() {
            let distance = color_distance(pixel, &reference);
            if let Some(alpha) = shade(distance, tol_dist, fade_dist, options.fade_exponent) {
                pixel[3] = alpha;
            }
        }
    }
}

/// Breadth-first flood fill seeded from every near-background border pixel.
///
/// Pixels never reached stay fully opaque even when their color matches the
/// reference; that is what protects enclosed holes inside the foreground.
fn remove_reachable(
    pixels: &mut RgbaImage,
    reference: Rgba<u8>,
    tol_dist: f32,
    fade_dist: f32,
    fade_exponent: i32,
) {
    let (width, height) = pixels.dimensions();
    let total_limit = tol_dist + fade_dist;
    let mut visited = vec![false; (width * height) as usize];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    for (x, y) in border {
        let idx = (y * width + x) as usize;
        if !visited[idx] && color_distance(pixels.get_pixel(x, y), &reference) <= total_limit {
            visited[idx] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        let pixel = pixels.get_pixel_mut(x, y);
        let distance = color_distance(pixel, &reference);
        if let Some(alpha) = shade(distance, tol_dist, fade_dist, fade_exponent) {
            pixel[3] = alpha;
        }

        let neighbors = [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ];
        for (nx, ny) in neighbors {
            if nx >= width || ny >= height {
                continue;
            }
            let idx = (ny * width + nx) as usize;
            if !visited[idx]
                && color_distance(pixels.get_pixel(nx, ny), &reference) <= total_limit
            {
                visited[idx] = true;
                queue.push_back((nx, ny));
            }
        }
    }
}

/// Alpha for a pixel at the given distance from the reference color, or `None`
/// when the pixel is outside both zones and must stay untouched.
///
/// In the fade band the alpha rises from 0 toward 255 with an eased curve, so
/// pixels closer to the background color come out more transparent.
fn shade(distance: f32, tol_dist: f32, fade_dist: f32, fade_exponent: i32) -> Option<u8> {
    if distance <= tol_dist {
        Some(0)
    } else if fade_dist > 0.0 && distance <= tol_dist + fade_dist {
        let factor = (distance - tol_dist) / fade_dist;
        Some((255.0 * factor.powi(fade_exponent)).round().clamp(0.0, 255.0) as u8)
    } else {
        None
    }
}

/// 3-D Euclidean distance between two colors' RGB channels; alpha is ignored.
fn color_distance(a: &Rgba<u8>, b: &Rgba<u8>) -> f32 {
    let dr = a[0] as f32 - b[0] as f32;
    let dg = a[1] as f32 - b[1] as f32;
    let db = a[2] as f32 - b[2] as f32;
    (dr * dr + dg * dg + db * db).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const RED: Rgba<u8> = Rgba([200, 30, 30, 255]);

    fn uniform(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_pixel(width, height, color)
    }

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img.clone())
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[test]
    fn zero_thresholds_change_nothing() {
        for keep_internal in [false, true] {
            let mut img = uniform(4, 4, WHITE);
            img.put_pixel(2, 2, RED);
            let before = img.clone();

            apply_removal(
                &mut img,
                &RemovalOptions {
                    tolerance: 0.0,
                    fade: 0.0,
                    keep_internal,
                    ..RemovalOptions::default()
                },
            );

            assert_eq!(
                img.as_raw(),
                before.as_raw(),
                "keep_internal={} must be a no-op at zero thresholds",
                keep_internal
            );
        }
    }

    #[test]
    fn full_scan_clears_background_and_keeps_foreground() {
        let mut img = uniform(5, 5, WHITE);
        img.put_pixel(2, 2, RED);

        apply_removal(
            &mut img,
            &RemovalOptions {
                tolerance: 0.05,
                fade: 0.0,
                keep_internal: false,
                ..RemovalOptions::default()
            },
        );

        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(4, 4)[3], 0);
        assert_eq!(img.get_pixel(2, 2)[3], 255);
        // RGB channels stay untouched, only alpha changes
        assert_eq!(&img.get_pixel(0, 0).0[..3], &[255, 255, 255]);
    }

    #[test]
    fn fade_band_is_monotone_in_distance() {
        // Reference black; a row of gray pixels at increasing distance.
        let mut img = RgbaImage::new(6, 1);
        let grays = [0u8, 20, 60, 100, 140, 180];
        for (x, g) in grays.iter().enumerate() {
            img.put_pixel(x as u32, 0, Rgba([*g, *g, *g, 255]));
        }

        apply_removal(
            &mut img,
            &RemovalOptions {
                tolerance: 0.05,
                fade: 0.45,
                keep_internal: false,
                ..RemovalOptions::default()
            },
        );

        let alphas: Vec<u8> = (0..6).map(|x| img.get_pixel(x, 0)[3]).collect();
        // Everything inside tolerance is fully transparent
        assert_eq!(alphas[0], 0);
        // Closer to the background color means more transparent
        for pair in alphas.windows(2) {
            assert!(pair[0] <= pair[1], "alpha must not decrease: {:?}", alphas);
        }
        assert!(alphas[5] > 0);
    }

    #[test]
    fn fade_uses_cubic_easing() {
        // Reference black, tolerance 0, fade 0.5 of the max distance.
        // A (100,100,100) pixel sits at distance 173.205 of a 220.836 band:
        // 255 * (173.205/220.836)^3 = 123.
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([100, 100, 100, 255]));

        apply_removal(
            &mut img,
            &RemovalOptions {
                tolerance: 0.0,
                fade: 0.5,
                keep_internal: false,
                ..RemovalOptions::default()
            },
        );

        let alpha = img.get_pixel(1, 0)[3];
        assert!(
            (122..=124).contains(&alpha),
            "expected cubic-eased alpha near 123, got {}",
            alpha
        );
    }

    #[test]
    fn flood_fill_protects_enclosed_hole() {
        // 7x7: background border, a solid red ring, and a background-colored
        // interior with no path to the border.
        let mut img = uniform(7, 7, WHITE);
        for i in 1..6 {
            img.put_pixel(i, 1, RED);
            img.put_pixel(i, 5, RED);
            img.put_pixel(1, i, RED);
            img.put_pixel(5, i, RED);
        }

        let options = RemovalOptions {
            tolerance: 0.05,
            fade: 0.0,
            keep_internal: true,
            ..RemovalOptions::default()
        };
        let mut protected = img.clone();
        apply_removal(&mut protected, &options);

        // Outer background cleared
        assert_eq!(protected.get_pixel(0, 0)[3], 0);
        assert_eq!(protected.get_pixel(6, 3)[3], 0);
        // Ring untouched
        assert_eq!(protected.get_pixel(1, 3)[3], 255);
        // Enclosed hole stays fully opaque despite matching the reference
        assert_eq!(protected.get_pixel(3, 3)[3], 255);

        // The full scan clears the hole too, which is exactly the difference
        let mut scanned = img;
        apply_removal(
            &mut scanned,
            &RemovalOptions {
                keep_internal: false,
                ..options
            },
        );
        assert_eq!(scanned.get_pixel(3, 3)[3], 0);
    }

    #[test]
    fn flood_fill_reaches_background_through_border_paths() {
        // Background on the left half, foreground wall on the right; every
        // background pixel touches the border region.
        let mut img = uniform(6, 3, WHITE);
        for y in 0..3 {
            img.put_pixel(4, y, RED);
            img.put_pixel(5, y, RED);
        }

        apply_removal(
            &mut img,
            &RemovalOptions {
                tolerance: 0.05,
                fade: 0.0,
                keep_internal: true,
                ..RemovalOptions::default()
            },
        );

        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(img.get_pixel(x, y)[3], 0, "({}, {})", x, y);
            }
            assert_eq!(img.get_pixel(4, y)[3], 255);
        }
    }

    #[test]
    fn degenerate_sizes_do_not_panic() {
        let mut empty = RgbaImage::new(0, 0);
        apply_removal(&mut empty, &RemovalOptions::default());

        let mut row = uniform(4, 1, WHITE);
        apply_removal(&mut row, &RemovalOptions::default());
        assert_eq!(row.get_pixel(0, 0)[3], 0);

        let mut single = uniform(1, 1, WHITE);
        apply_removal(&mut single, &RemovalOptions::default());
        assert_eq!(single.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn encoded_roundtrip_produces_transparent_png() {
        let mut img = uniform(5, 5, WHITE);
        img.put_pixel(2, 2, RED);

        let png = remove_background(&encode_png(&img), &RemovalOptions::default()).unwrap();
        let out = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(out.dimensions(), (5, 5));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(2, 2)[3], 255);
    }

    #[test]
    fn undecodable_input_yields_none() {
        assert!(remove_background(b"definitely not an image", &RemovalOptions::default()).is_none());
        assert!(remove_background(&[], &RemovalOptions::default()).is_none());
    }
}
