// src/domain/services/color_table.rs
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Swatch for the default level; unrecognized level names fall back here.
pub const DEFAULT_SWATCH: &str = "#ffffff";

lazy_static! {
    /// Fixed accent level -> swatch mapping, built once at process start
    /// and never mutated.
    static ref COLOR_TABLE: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("White", "#ffffff");
        m.insert("Gray", "#E5E5E5");
        m.insert("Standard", "#E3E8E8");
        m.insert("Medium Priority", "#F3E3BE");
        m.insert("High Priority", "#DBA999");
        m
    };
}

/// Resolve an accent level name to its swatch hex value.
pub fn swatch_for(level: &str) -> &'static str {
    COLOR_TABLE.get(level).copied().unwrap_or(DEFAULT_SWATCH)
}

/// Render the swatch as a solid-color background image: a data-URI SVG
/// rect, so identical inputs always produce identical bytes.
pub fn background_image(level: &str) -> String {
    let hex = swatch_for(level).replace('#', "%23");
    format!(
        "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='50' height='50'><rect width='50' height='50' fill='{}'/></svg>",
        hex
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_levels() {
        assert_eq!(swatch_for("White"), "#ffffff");
        assert_eq!(swatch_for("Gray"), "#E5E5E5");
        assert_eq!(swatch_for("Standard"), "#E3E8E8");
        assert_eq!(swatch_for("Medium Priority"), "#F3E3BE");
        assert_eq!(swatch_for("High Priority"), "#DBA999");
    }

    #[test]
    fn test_unknown_level_falls_back_to_default() {
        assert_eq!(swatch_for("Chartreuse"), DEFAULT_SWATCH);
        assert_eq!(swatch_for(""), DEFAULT_SWATCH);
        assert_eq!(background_image("Chartreuse"), background_image("White"));
    }

    #[test]
    fn test_background_image_encodes_hash() {
        let img = background_image("High Priority");
        assert!(img.starts_with("data:image/svg+xml"));
        assert!(img.contains("%23DBA999"));
        assert!(!img.contains('#'));
    }
}
