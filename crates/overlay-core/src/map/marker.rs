//! Location marker drawing.

use image::{Rgba, RgbaImage};

/// Filled circle drawn on top of the basemap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub radius: f32,
    pub color: Rgba<u8>,
}

impl MarkerStyle {
    pub fn new(radius: f32, rgb: [u8; 3]) -> Self {
        Self {
            radius,
            color: Rgba([rgb[0], rgb[1], rgb[2], 255]),
        }
    }
}

/// Draws a filled circle centered at pixel position (`cx`, `cy`).
///
/// Edge pixels are blended by approximate coverage. Parts outside the image are clipped.
pub fn draw_marker(img: &mut RgbaImage, cx: f64, cy: f64, style: &MarkerStyle) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let r = f64::from(style.radius);
    let x0 = (cx - r - 1.0).floor().max(0.0);
    let y0 = (cy - r - 1.0).floor().max(0.0);
    let x1 = (cx + r + 1.0).ceil().min(f64::from(w - 1));
    let y1 = (cy + r + 1.0).ceil().min(f64::from(h - 1));
    if x1 < x0 || y1 < y0 {
        return;
    }

    for y in y0 as u32..=y1 as u32 {
        for x in x0 as u32..=x1 as u32 {
            let dx = f64::from(x) + 0.5 - cx;
            let dy = f64::from(y) + 0.5 - cy;
            let coverage = (r + 0.5 - dx.hypot(dy)).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend(img.get_pixel_mut(x, y), style.color, coverage);
            }
        }
    }
}

fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>, coverage: f64) {
    let alpha = coverage * f64::from(src[3]) / 255.0;
    for i in 0..3 {
        let mixed = f64::from(src[i]) * alpha + f64::from(dst[i]) * (1.0 - alpha);
        dst[i] = mixed.round() as u8;
    }
    let a = 255.0 * alpha + f64::from(dst[3]) * (1.0 - alpha);
    dst[3] = a.round() as u8;
}
