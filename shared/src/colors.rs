pub type Rgb = (u8, u8, u8);

/// Page and intro background.
pub const BACKGROUND: Rgb = (23, 22, 22);
/// Off-white used for intro text and the tooltip box.
pub const PAPER: Rgb = (241, 237, 231);
/// Tooltip text.
pub const ACCENT: Rgb = (167, 31, 41);

/// Format RGBA as a CSS color string. `a` is 0.0..=1.0.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{})", a.clamp(0.0, 1.0))
}

pub fn rgb_css((r, g, b): Rgb) -> String {
    format!("rgb({r},{g},{b})")
}

/// Convert a 0..=255 alpha to the 0.0..=1.0 range canvas styles expect.
pub fn alpha_unit(alpha_255: f64) -> f64 {
    (alpha_255 / 255.0).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_css_colors() {
        assert_eq!(rgb_css(BACKGROUND), "rgb(23,22,22)");
        assert_eq!(rgba_css(241, 237, 231, 0.5), "rgba(241,237,231,0.5)");
        assert_eq!(rgba_css(0, 0, 0, 3.0), "rgba(0,0,0,1)");
    }

    #[test]
    fn alpha_unit_is_clamped() {
        assert_eq!(alpha_unit(0.0), 0.0);
        assert_eq!(alpha_unit(255.0), 1.0);
        assert_eq!(alpha_unit(-4.0), 0.0);
        assert_eq!(alpha_unit(510.0), 1.0);
    }
}
