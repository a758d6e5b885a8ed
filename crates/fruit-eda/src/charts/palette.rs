//! Chart colors.
//!
//! Fixed RGB anchors for the colormaps the figures use, interpolated in
//! linear light with the `palette` crate and handed to plotters as
//! [`RGBColor`].

use palette::{LinSrgb, Mix, Srgb};
use plotters::style::RGBColor;

/// Histogram bars and density curve.
pub const HISTOGRAM_BLUE: RGBColor = RGBColor(0, 0, 255);

/// Low and high ends of the viridis map, used for the two quality classes.
pub const VIRIDIS_LOW: RGBColor = RGBColor(68, 1, 84);
pub const VIRIDIS_HIGH: RGBColor = RGBColor(253, 231, 37);

/// Pastel fills for the `Bad` and `Good` boxes and violins.
pub const PASTEL: [RGBColor; 2] = [RGBColor(161, 201, 244), RGBColor(255, 180, 130)];

/// Outline color for boxes, whiskers and violins.
pub const OUTLINE_GRAY: RGBColor = RGBColor(60, 60, 60);

/// Cells with no defined coefficient.
pub const MISSING_GRAY: RGBColor = RGBColor(235, 235, 235);

const COOLWARM: [(u8, u8, u8); 3] = [(59, 76, 192), (221, 221, 221), (180, 4, 38)];

fn linear(rgb: (u8, u8, u8)) -> LinSrgb {
    Srgb::new(rgb.0, rgb.1, rgb.2).into_format::<f32>().into_linear()
}

fn to_rgb(color: LinSrgb) -> RGBColor {
    let srgb: Srgb<u8> = Srgb::<f32>::from_linear(color).into_format();
    RGBColor(srgb.red, srgb.green, srgb.blue)
}

/// Diverging blue-white-red map; `t` is clamped to `[0, 1]`.
pub fn coolwarm(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0) as f32;
    let (from, to, local) = if t <= 0.5 {
        (COOLWARM[0], COOLWARM[1], t * 2.0)
    } else {
        (COOLWARM[1], COOLWARM[2], (t - 0.5) * 2.0)
    };
    to_rgb(linear(from).mix(linear(to), local))
}

/// Color for a quality code: the low viridis end for 0, the high end otherwise.
pub fn quality_color(code: i64) -> RGBColor {
    if code == 0 { VIRIDIS_LOW } else { VIRIDIS_HIGH }
}

/// Fill for a quality code's box or violin.
pub fn quality_fill(code: i64) -> RGBColor {
    PASTEL[usize::from(code != 0)]
}

/// Annotation color readable on `background`: black on light, white on dark.
pub fn text_on(background: RGBColor) -> RGBColor {
    let lin = linear((background.0, background.1, background.2));
    let luminance = 0.2126 * lin.red + 0.7152 * lin.green + 0.0722 * lin.blue;
    if luminance > 0.408 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coolwarm_anchors() {
        assert_eq!(coolwarm(0.0), RGBColor(59, 76, 192));
        assert_eq!(coolwarm(0.5), RGBColor(221, 221, 221));
        assert_eq!(coolwarm(1.0), RGBColor(180, 4, 38));
        // out of range clamps
        assert_eq!(coolwarm(-3.0), coolwarm(0.0));
        assert_eq!(coolwarm(7.0), coolwarm(1.0));
    }

    #[test]
    fn test_coolwarm_midpoints_between_anchors() {
        let RGBColor(r, g, b) = coolwarm(0.25);
        assert!(r > 59 && r < 221);
        assert!(g > 76 && g < 221);
        assert!(b > 192 && b < 221);
    }

    #[test]
    fn test_quality_colors() {
        assert_eq!(quality_color(0), VIRIDIS_LOW);
        assert_eq!(quality_color(1), VIRIDIS_HIGH);
        assert_eq!(quality_fill(0), PASTEL[0]);
        assert_eq!(quality_fill(1), PASTEL[1]);
    }

    #[test]
    fn test_text_contrast() {
        assert_eq!(text_on(RGBColor(180, 4, 38)), RGBColor(255, 255, 255));
        assert_eq!(text_on(RGBColor(221, 221, 221)), RGBColor(0, 0, 0));
    }
}
