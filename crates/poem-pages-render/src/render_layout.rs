use serde::{Deserialize, Serialize};

use poem_pages::FULLWIDTH_SPACE;

use crate::render_border::BorderStyle;
use crate::render_engine::LayoutError;

/// Clause delimiter used as the only line-break opportunity.
pub const CLAUSE_DELIMITER: char = '，';
/// Rows reserved by decoration: header, author separator, footer.
pub const DECORATION_ROWS: usize = 3;

/// Page geometry and decoration policy.
///
/// Every char is one display cell; widths and heights are in cells/rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Cells per row.
    pub columns_per_page: usize,
    /// Rows per page, decoration included.
    pub lines_per_page: usize,
    /// Draw header/separator/footer rows.
    pub decoration_enabled: bool,
    /// Corner glyph style for decoration rows.
    pub border_style: BorderStyle,
}

impl LayoutConfig {
    /// Convenience for a display size with default decoration.
    pub fn for_display(columns_per_page: usize, lines_per_page: usize) -> Self {
        Self {
            columns_per_page,
            lines_per_page,
            ..Self::default()
        }
    }

    /// Reject geometry the renderer cannot fill.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.columns_per_page <= 2 {
            return Err(LayoutError::InvalidConfig {
                field: "columns_per_page",
                value: self.columns_per_page.to_string(),
                reason: "must exceed 2 so the border interior is non-empty",
            });
        }
        check_lines_per_page(self.lines_per_page)
    }

    /// Content rows available per page.
    pub fn content_budget(&self) -> usize {
        content_budget(self.lines_per_page, self.decoration_enabled)
    }

    /// Cells between the left and right border glyphs.
    pub fn interior_width(&self) -> usize {
        self.columns_per_page.saturating_sub(2)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns_per_page: 30,
            lines_per_page: 20,
            decoration_enabled: true,
            border_style: BorderStyle::Double,
        }
    }
}

/// Display width of `text` in cells.
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}

/// Greedily wrap one paragraph at clause delimiters.
///
/// A clause that alone exceeds `columns_per_page` still gets its own line.
/// Empty clauses are skipped along with their delimiter. Always returns at
/// least one line so every paragraph keeps its row.
pub fn wrap_paragraph(paragraph: &str, columns_per_page: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    let mut parts = paragraph.split(CLAUSE_DELIMITER).peekable();
    while let Some(part) = parts.next() {
        let is_last = parts.peek().is_none();
        if part.is_empty() {
            continue;
        }
        let part_len = display_len(part) + usize::from(!is_last);

        if !current.is_empty() && current_len + part_len > columns_per_page {
            lines.push(core::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(part);
        if !is_last {
            current.push(CLAUSE_DELIMITER);
        }
        current_len += part_len;
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Left padding that centers a block whose widest line is `max_len`.
pub fn left_padding(max_len: usize, columns_per_page: usize) -> usize {
    if max_len < columns_per_page {
        (columns_per_page - max_len) / 2
    } else {
        0
    }
}

/// Merge wrapped paragraphs and pad them as one centered block.
///
/// Trailing empty lines are dropped; interior blank lines are kept and padded
/// like any other line.
pub fn align_lines<I>(paragraph_lines: I, columns_per_page: usize) -> Vec<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut lines: Vec<String> = paragraph_lines.into_iter().flatten().collect();
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    let max_len = lines.iter().map(|line| display_len(line)).max().unwrap_or(0);
    let pad = left_padding(max_len, columns_per_page);
    if pad == 0 {
        return lines;
    }

    let prefix: String = core::iter::repeat(FULLWIDTH_SPACE).take(pad).collect();
    lines
        .into_iter()
        .map(|line| {
            let mut out = String::with_capacity(prefix.len() + line.len());
            out.push_str(&prefix);
            out.push_str(&line);
            out
        })
        .collect()
}

/// Content rows per page after decoration rows are reserved.
pub fn content_budget(lines_per_page: usize, decoration_enabled: bool) -> usize {
    if decoration_enabled {
        lines_per_page.saturating_sub(DECORATION_ROWS)
    } else {
        lines_per_page
    }
}

fn check_lines_per_page(lines_per_page: usize) -> Result<(), LayoutError> {
    if lines_per_page <= DECORATION_ROWS {
        return Err(LayoutError::InvalidConfig {
            field: "lines_per_page",
            value: lines_per_page.to_string(),
            reason: "must exceed 3 so at least one content row remains",
        });
    }
    Ok(())
}

/// First pass: chunk content lines into pages.
///
/// Every page but the last holds exactly the content budget. No lines means
/// no pages. `lines_per_page` must exceed the decoration rows, with or
/// without decoration.
pub fn paginate(
    lines: Vec<String>,
    lines_per_page: usize,
    decoration_enabled: bool,
) -> Result<Vec<Vec<String>>, LayoutError> {
    check_lines_per_page(lines_per_page)?;
    let budget = content_budget(lines_per_page, decoration_enabled);
    let mut pages = Vec::with_capacity(lines.len().div_ceil(budget));
    let mut current = Vec::with_capacity(budget);

    for line in lines {
        current.push(line);
        if current.len() >= budget {
            pages.push(core::mem::replace(&mut current, Vec::with_capacity(budget)));
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    Ok(pages)
}
