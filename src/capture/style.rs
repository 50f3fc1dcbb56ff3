//! Inline style values written to marker elements

use crate::capture::input::types::Position;

/// `transform` value moving an element by `translation`
pub fn translate(translation: Position) -> String {
    format!("translate({}px, {}px)", translation.x, translation.y)
}

/// A length in pixels, e.g. `40px`
pub fn px(value: f64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate() {
        assert_eq!(translate(Position::new(14.0, -6.0)), "translate(14px, -6px)");
        assert_eq!(translate(Position::new(10.5, 0.25)), "translate(10.5px, 0.25px)");
    }

    #[test]
    fn test_marker_translations_match_frame_output() {
        // (20, 20) fast tracker with a 6px half-size, (10, 10) slow with 20px
        assert_eq!(
            translate(Position::new(20.0, 20.0).centered(6.0)),
            "translate(14px, 14px)"
        );
        assert_eq!(
            translate(Position::new(10.0, 10.0).centered(20.0)),
            "translate(-10px, -10px)"
        );
    }

    #[test]
    fn test_px() {
        assert_eq!(px(60.0), "60px");
        assert_eq!(px(40.0), "40px");
        assert_eq!(px(12.5), "12.5px");
    }
}
