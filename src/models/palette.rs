// file: src/models/palette.rs
//! Fixed event color palette and the darker border shade paired with each.

pub const DEFAULT_BACKGROUND: &str = "#3788d8";
pub const DEFAULT_BORDER: &str = "#2c5aa0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub name: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

pub const SWATCHES: [Swatch; 5] = [
    Swatch { name: "Blue", background: "#3788d8", border: "#2c5aa0" },
    Swatch { name: "Green", background: "#28a745", border: "#1e7e34" },
    Swatch { name: "Yellow", background: "#ffc107", border: "#d39e00" },
    Swatch { name: "Red", background: "#dc3545", border: "#c82333" },
    Swatch { name: "Purple", background: "#6f42c1", border: "#5a32a3" },
];

/// Border shade for a background color; unknown colors get the default.
pub fn border_color(background: &str) -> &'static str {
    SWATCHES
        .iter()
        .find(|swatch| swatch.background.eq_ignore_ascii_case(background.trim()))
        .map(|swatch| swatch.border)
        .unwrap_or(DEFAULT_BORDER)
}

/// Parse `#rrggbb` into 0..=1 channels for rendering.
pub fn hex_to_rgb(hex: &str) -> Option<(f32, f32, f32)> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(digits.get(range)?, 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_color_for_each_swatch() {
        let expected = [
            ("#3788d8", "#2c5aa0"),
            ("#28a745", "#1e7e34"),
            ("#ffc107", "#d39e00"),
            ("#dc3545", "#c82333"),
            ("#6f42c1", "#5a32a3"),
        ];
        for (background, border) in expected {
            assert_eq!(border_color(background), border);
        }
    }

    #[test]
    fn test_border_color_unknown_falls_back() {
        assert_eq!(border_color("#unknown"), DEFAULT_BORDER);
        assert_eq!(border_color(""), DEFAULT_BORDER);
        assert_eq!(border_color("#123456"), DEFAULT_BORDER);
    }

    #[test]
    fn test_border_color_ignores_case() {
        assert_eq!(border_color("#DC3545"), "#c82333");
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ffffff"), Some((1.0, 1.0, 1.0)));
        assert_eq!(hex_to_rgb("#000000"), Some((0.0, 0.0, 0.0)));
        assert!(hex_to_rgb("#fff").is_none());
        assert!(hex_to_rgb("3788d8").is_none());
        assert!(hex_to_rgb("#zzzzzz").is_none());
    }
}
