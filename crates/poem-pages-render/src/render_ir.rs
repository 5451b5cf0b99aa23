use serde::Serialize;

/// Content of a page's bottom border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFooterKind {
    /// `第X／Y页` page indicator.
    Indicator,
    /// `▶` preview of the next poem's title.
    NextTitle,
}

/// One fully rendered page: fixed rows of display cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    /// 1-based page number within the poem.
    pub page_number: usize,
    /// Total pages in the poem's page set.
    pub total_pages: usize,
    /// Rendered rows, top to bottom, without line terminators.
    pub rows: Vec<String>,
    /// Footer kind, `None` when decoration is disabled.
    pub footer: Option<PageFooterKind>,
}

impl RenderedPage {
    /// Create an empty page.
    pub fn new(page_number: usize, total_pages: usize) -> Self {
        Self {
            page_number,
            total_pages,
            rows: Vec::with_capacity(0),
            footer: None,
        }
    }

    /// Rows joined with `\n`, no trailing newline.
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Number of rendered rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
