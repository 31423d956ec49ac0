//! Text metrics and greedy word wrapping.
//!
//! Widths come from the standard Helvetica AFM tables (units of 1/1000 em), so the
//! estimate matches what a PDF viewer draws with the base-14 font. Characters outside
//! printable ASCII use the average digit width.

use serde::{Deserialize, Serialize};

/// Points to millimetres.
pub const PT_TO_MM: f32 = 25.4 / 72.0;

const LINE_HEIGHT_FACTOR: f32 = 1.15;
const ASCENT: f32 = 0.718;
const DESCENT: f32 = 0.207;
const FALLBACK_WIDTH: u16 = 556;
const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

// ASCII 32..=126
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, weight: FontWeight) -> u16 {
    let table = match weight {
        FontWeight::Regular => &HELVETICA,
        FontWeight::Bold => &HELVETICA_BOLD,
    };
    let code = c as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Rendered width in millimetres.
pub fn text_width(text: &str, font_size: f32, weight: FontWeight) -> f32 {
    let units: u32 = text.chars().map(|c| char_width(c, weight) as u32).sum();
    units as f32 / 1000.0 * font_size * PT_TO_MM
}

/// Baseline advance between consecutive lines.
pub fn line_height(font_size: f32) -> f32 {
    font_size * PT_TO_MM * LINE_HEIGHT_FACTOR
}

pub fn ascent(font_size: f32) -> f32 {
    font_size * PT_TO_MM * ASCENT
}

pub fn descent(font_size: f32) -> f32 {
    font_size * PT_TO_MM * DESCENT
}

/// Vertical extent of `lines` wrapped lines: first ascent, then line advances, then descent.
pub fn block_height(lines: usize, font_size: f32) -> f32 {
    if lines == 0 {
        return 0.0;
    }
    ascent(font_size) + (lines - 1) as f32 * line_height(font_size) + descent(font_size)
}

/// Greedy word wrap using regular weight.
pub fn wrap(text: &str, max_width: f32, font_size: f32) -> Vec<String> {
    wrap_with(text, max_width, font_size, FontWeight::Regular)
}

/// Greedy word wrap. Never fails; an empty input yields a single empty line. Text that
/// already fits is returned untouched. A word wider than `max_width` sits alone on its
/// own line.
pub fn wrap_with(text: &str, max_width: f32, font_size: f32, weight: FontWeight) -> Vec<String> {
    if !text.contains('\n') && text_width(text, font_size, weight) <= max_width {
        return vec![text.to_string()];
    }

    let space = text_width(" ", font_size, weight);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, font_size, weight);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            }
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wrap and keep at most `max_lines` (at least one), marking the cut with an ellipsis on
/// the last line.
pub fn wrap_capped(
    text: &str,
    max_width: f32,
    font_size: f32,
    max_lines: usize,
) -> Vec<String> {
    let max_lines = max_lines.max(1);
    let mut lines = wrap(text, max_width, font_size);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = truncate(&format!("{last}{ELLIPSIS}"), max_width, font_size);
            if !last.ends_with(ELLIPSIS) {
                last.push_str(ELLIPSIS);
            }
        }
    }
    lines
}

/// Shorten `text` so that it, plus a trailing ellipsis, fits in `max_width`.
pub fn truncate(text: &str, max_width: f32, font_size: f32) -> String {
    truncate_with(text, max_width, font_size, FontWeight::Regular)
}

pub fn truncate_with(text: &str, max_width: f32, font_size: f32, weight: FontWeight) -> String {
    if text_width(text, font_size, weight) <= max_width {
        return text.to_string();
    }
    let budget = max_width - text_width(ELLIPSIS, font_size, weight);
    let mut kept = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let w = char_width(c, weight) as f32 / 1000.0 * font_size * PT_TO_MM;
        if width + w > budget {
            break;
        }
        kept.push(c);
        width += w;
    }
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_is_monotonic_in_length() {
        let mut previous = 0.0;
        for n in 0..50 {
            let width = text_width(&"x".repeat(n), 10.0, FontWeight::Regular);
            assert!(width >= previous);
            previous = width;
        }
    }

    #[test]
    fn test_bold_is_not_narrower() {
        let text = "Remote code execution in admin panel";
        assert!(
            text_width(text, 10.0, FontWeight::Bold) >= text_width(text, 10.0, FontWeight::Regular)
        );
    }

    #[test]
    fn test_wrap_short_text_is_identity() {
        let text = "Short  text with  double spaces";
        assert_eq!(wrap(text, 500.0, 10.0), vec![text.to_string()]);
    }

    #[test]
    fn test_wrap_empty_string() {
        assert_eq!(wrap("", 50.0, 10.0), vec![String::new()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "The service exposes an outdated TLS configuration that allows \
                    downgrade attacks against clients negotiating legacy cipher suites.";
        let lines = wrap(text, 60.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 10.0, FontWeight::Regular) <= 60.0, "{line}");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_places_long_word_alone() {
        let long = "a".repeat(80);
        let text = format!("before {long} after");
        let lines = wrap(&text, 40.0, 10.0);
        assert_eq!(lines, vec!["before".to_string(), long, "after".to_string()]);
    }

    #[test]
    fn test_wrap_honours_newlines() {
        let lines = wrap("first line\nsecond line", 200.0, 10.0);
        assert_eq!(lines, vec!["first line", "second line"]);
    }

    #[test]
    fn test_wrap_capped_marks_cut() {
        let text = "word ".repeat(200);
        let lines = wrap_capped(&text, 50.0, 10.0, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("..."));
    }

    #[test]
    fn test_wrap_capped_zero_keeps_one_line() {
        let text = "word ".repeat(200);
        let lines = wrap_capped(&text, 50.0, 10.0, 0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("..."));
    }

    #[test]
    fn test_truncate_fits() {
        let title = "Apache HTTP Server path traversal and remote code execution vulnerability";
        let short = truncate(title, 40.0, 9.0);
        assert!(short.ends_with("..."));
        assert!(text_width(&short, 9.0, FontWeight::Regular) <= 40.0);
        assert_eq!(truncate("SSH", 40.0, 9.0), "SSH");
    }

    #[test]
    fn test_block_height() {
        assert_eq!(block_height(0, 10.0), 0.0);
        let one = block_height(1, 10.0);
        let two = block_height(2, 10.0);
        assert!((two - one - line_height(10.0)).abs() < 1e-4);
    }
}
