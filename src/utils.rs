use std::sync::OnceLock;

use crate::host::Tripoint;

/// How many characters of a `Debug` argument `arg_context!()` keeps in the error message.
pub static DEBUG_PRINT_LIMIT: OnceLock<usize> = OnceLock::new();

pub fn clip_string(mut string: String, ending: &str, length: usize) -> String {
    if length == 0 {
        string = String::default();
    } else if string.chars().count() > length {
        string = format!(
            "{}{}",
            string
                .chars()
                .take(length.saturating_sub(ending.chars().count()))
                .collect::<String>(),
            ending
        );
    }

    string
}

/// Width of the text in terminal cells.
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Pads `text` with spaces on the left so that it takes exactly `width` cells.
pub fn align_right(text: &str, width: usize) -> String {
    let text = clip_string(text.to_string(), "…", width);
    format!("{}{}", " ".repeat(width - text_width(&text)), text)
}

/// Pads `text` with spaces on the right so that it takes exactly `width` cells.
pub fn align_left(text: &str, width: usize) -> String {
    let text = clip_string(text.to_string(), "…", width);
    format!("{}{}", text, " ".repeat(width - text_width(&text)))
}

/// Chebyshev distance, the way a turn-based grid counts steps.
pub fn square_dist(from: Tripoint, to: Tripoint) -> i32 {
    (from.x - to.x).abs().max((from.y - to.y).abs())
}

/// Compass direction of `to` as seen from `from`, empty when both are the same tile.
pub fn direction_suffix(from: Tripoint, to: Tripoint) -> &'static str {
    let dx = (to.x - from.x).signum();
    let dy = (to.y - from.y).signum();

    match (dx, dy) {
        (0, -1) => "N",
        (1, -1) => "NE",
        (1, 0) => "E",
        (1, 1) => "SE",
        (0, 1) => "S",
        (-1, 1) => "SW",
        (-1, 0) => "W",
        (-1, -1) => "NW",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clip_string_keeps_short_text() {
        assert_eq!(clip_string("rock".to_string(), "…", 10), "rock");
        assert_eq!(clip_string("pointy stick".to_string(), "…", 6), "point…");
        assert_eq!(clip_string("rock".to_string(), "…", 0), "");
    }

    #[test]
    fn alignment_pads_to_width() {
        assert_eq!(align_right("12", 5), "   12");
        assert_eq!(align_left("12", 5), "12   ");
        assert_eq!(align_left("123456", 3), "12…");
    }

    #[test]
    fn direction_suffix_covers_compass() {
        let origin = Tripoint::new(5, 5, 0);

        assert_eq!(direction_suffix(origin, origin), "");
        assert_eq!(direction_suffix(origin, Tripoint::new(5, 4, 0)), "N");
        assert_eq!(direction_suffix(origin, Tripoint::new(6, 6, 0)), "SE");
        assert_eq!(direction_suffix(origin, Tripoint::new(3, 5, 0)), "W");
        assert_eq!(square_dist(origin, Tripoint::new(3, 6, 0)), 2);
    }
}
