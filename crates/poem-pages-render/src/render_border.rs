use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use poem_pages::FULLWIDTH_SPACE;

use crate::render_engine::LayoutError;

/// Corner glyph used on every row when the border style is [`BorderStyle::None`].
pub const NONE_CORNER: char = '+';
/// Interior fill for [`BorderStyle::None`] rows, which carry no text.
pub const NONE_RULE: char = '─';

/// Border decoration style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Plain `+` corners and a rule interior; no title/author/footer text.
    None,
    /// Single-line box drawing corners.
    Single,
    /// Double-line box drawing corners.
    #[default]
    Double,
}

/// Which decoration row is being drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderRow {
    /// Header row carrying the title.
    Top,
    /// Row under the header carrying the author.
    Separator,
    /// Footer row carrying the page indicator or next-title preview.
    Bottom,
}

/// Left/right corner pairs for each decoration row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top: (char, char),
    pub separator: (char, char),
    pub bottom: (char, char),
}

impl BorderGlyphs {
    /// Corner pair for `row`.
    pub const fn corners(&self, row: BorderRow) -> (char, char) {
        match row {
            BorderRow::Top => self.top,
            BorderRow::Separator => self.separator,
            BorderRow::Bottom => self.bottom,
        }
    }
}

const DOUBLE_GLYPHS: BorderGlyphs = BorderGlyphs {
    top: ('╔', '╗'),
    separator: ('╠', '╣'),
    bottom: ('╚', '╝'),
};

const SINGLE_GLYPHS: BorderGlyphs = BorderGlyphs {
    top: ('┌', '┐'),
    separator: ('├', '┤'),
    bottom: ('└', '┘'),
};

const NONE_GLYPHS: BorderGlyphs = BorderGlyphs {
    top: (NONE_CORNER, NONE_CORNER),
    separator: (NONE_CORNER, NONE_CORNER),
    bottom: (NONE_CORNER, NONE_CORNER),
};

impl BorderStyle {
    /// Glyph table for this style.
    pub const fn glyphs(self) -> &'static BorderGlyphs {
        match self {
            Self::None => &NONE_GLYPHS,
            Self::Single => &SINGLE_GLYPHS,
            Self::Double => &DOUBLE_GLYPHS,
        }
    }

    /// Whether border rows have a centered text slot.
    pub const fn carries_text(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Stable config name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "single",
            Self::Double => "double",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BorderStyle {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            _ => Err(LayoutError::InvalidConfig {
                field: "border_style",
                value: s.to_string(),
                reason: "expected none, single, or double",
            }),
        }
    }
}

/// Center `text` in a slot of `interior_width` cells using fullwidth blanks.
///
/// Extra padding goes to the right. Text wider than the slot is cut to the
/// first `interior_width` chars with no padding.
pub fn center_in_interior(text: &str, interior_width: usize) -> String {
    let len = text.chars().count();
    if len > interior_width {
        return text.chars().take(interior_width).collect();
    }
    let left = (interior_width - len) / 2;
    let right = interior_width - len - left;
    let mut out = String::with_capacity(text.len() + (left + right) * FULLWIDTH_SPACE.len_utf8());
    out.extend(core::iter::repeat(FULLWIDTH_SPACE).take(left));
    out.push_str(text);
    out.extend(core::iter::repeat(FULLWIDTH_SPACE).take(right));
    out
}

/// Render one decoration row `columns` cells wide.
///
/// `text` is dropped for [`BorderStyle::None`].
pub fn border_line(style: BorderStyle, row: BorderRow, text: &str, columns: usize) -> String {
    let (left, right) = style.glyphs().corners(row);
    let interior_width = columns.saturating_sub(2);
    let mut out = String::with_capacity((columns + 2) * 3);
    out.push(left);
    if style.carries_text() {
        out.push_str(&center_in_interior(text, interior_width));
    } else {
        out.extend(core::iter::repeat(NONE_RULE).take(interior_width));
    }
    out.push(right);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_style_uses_distinct_pairs_per_row() {
        let glyphs = BorderStyle::Double.glyphs();
        assert_eq!(glyphs.corners(BorderRow::Top), ('╔', '╗'));
        assert_eq!(glyphs.corners(BorderRow::Separator), ('╠', '╣'));
        assert_eq!(glyphs.corners(BorderRow::Bottom), ('╚', '╝'));
    }

    #[test]
    fn single_style_glyphs() {
        let glyphs = BorderStyle::Single.glyphs();
        assert_eq!(glyphs.top, ('┌', '┐'));
        assert_eq!(glyphs.separator, ('├', '┤'));
        assert_eq!(glyphs.bottom, ('└', '┘'));
    }

    #[test]
    fn centering_biases_extra_cell_right() {
        assert_eq!(center_in_interior("ab", 5), "\u{3000}ab\u{3000}\u{3000}");
        assert_eq!(center_in_interior("ab", 4), "\u{3000}ab\u{3000}");
    }

    #[test]
    fn centering_truncates_without_padding() {
        assert_eq!(center_in_interior("一二三四五", 3), "一二三");
    }

    #[test]
    fn empty_text_fills_interior() {
        assert_eq!(center_in_interior("", 3), "\u{3000}\u{3000}\u{3000}");
    }

    #[test]
    fn border_line_spans_exact_columns() {
        let line = border_line(BorderStyle::Double, BorderRow::Top, "春晓", 10);
        assert_eq!(line.chars().count(), 10);
        assert!(line.starts_with('╔'));
        assert!(line.ends_with('╗'));
        assert!(line.contains("春晓"));
    }

    #[test]
    fn none_style_omits_text() {
        let line = border_line(BorderStyle::None, BorderRow::Bottom, "第１／１页", 6);
        assert_eq!(line, "+────+");
    }

    #[test]
    fn parses_style_names() {
        assert_eq!("Double".parse::<BorderStyle>().unwrap(), BorderStyle::Double);
        assert_eq!("single".parse::<BorderStyle>().unwrap(), BorderStyle::Single);
        assert_eq!(" none ".parse::<BorderStyle>().unwrap(), BorderStyle::None);
        assert!("dotted".parse::<BorderStyle>().is_err());
    }
}
