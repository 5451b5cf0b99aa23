use core::fmt;

use poem_pages::PoemRecord;

use crate::render_ir::RenderedPage;
use crate::render_layout::{align_lines, paginate, wrap_paragraph, LayoutConfig};
use crate::render_page::render_all;

/// Page formatting error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// Poem reached the formatter without paragraphs.
    EmptyPoem { title: String },
    /// Layout configuration cannot produce well-formed pages.
    InvalidConfig {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A page was handed more content rows than its budget holds.
    PageOverflow {
        page_number: usize,
        rows: usize,
        budget: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPoem { title } => write!(f, "poem '{}' has no paragraphs", title),
            Self::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "invalid layout config: {}={} ({})", field, value, reason),
            Self::PageOverflow {
                page_number,
                rows,
                budget,
            } => write!(
                f,
                "page {} has {} content rows, budget is {}",
                page_number, rows, budget
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Poem-to-pages pipeline bound to one validated [`LayoutConfig`].
#[derive(Clone, Debug)]
pub struct PageFormatter {
    cfg: LayoutConfig,
}

impl PageFormatter {
    /// Validate `cfg` and build a formatter.
    pub fn new(cfg: LayoutConfig) -> Result<Self, LayoutError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Active layout configuration.
    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    /// Wrap and align a poem into its content lines.
    pub fn layout_lines(&self, poem: &PoemRecord) -> Result<Vec<String>, LayoutError> {
        if poem.paragraphs.is_empty() {
            return Err(LayoutError::EmptyPoem {
                title: poem.title.clone(),
            });
        }
        let columns = self.cfg.columns_per_page;
        let wrapped = poem
            .paragraphs
            .iter()
            .map(|paragraph| wrap_paragraph(paragraph, columns));
        Ok(align_lines(wrapped, columns))
    }

    /// First pass: content chunks per page. The chunk count is the total page count.
    pub fn paginate_poem(&self, poem: &PoemRecord) -> Result<Vec<Vec<String>>, LayoutError> {
        let lines = self.layout_lines(poem)?;
        paginate(lines, self.cfg.lines_per_page, self.cfg.decoration_enabled)
    }

    /// Second pass: render chunks produced by [`paginate_poem`](Self::paginate_poem).
    pub fn render_all(
        &self,
        chunks: &[Vec<String>],
        poem: &PoemRecord,
        next_title: Option<&str>,
    ) -> Result<Vec<RenderedPage>, LayoutError> {
        render_all(chunks, poem, next_title, &self.cfg)
    }

    /// Format a poem into its page set.
    ///
    /// `next_poem` only affects single-page poems, whose footer previews its
    /// title. A poem whose paragraphs are all blank yields no pages.
    pub fn format_poem(
        &self,
        poem: &PoemRecord,
        next_poem: Option<&PoemRecord>,
    ) -> Result<Vec<RenderedPage>, LayoutError> {
        let chunks = self.paginate_poem(poem)?;
        if chunks.is_empty() {
            log::warn!("poem '{}' has no visible content", poem.title);
        } else {
            log::debug!(
                "poem '{}': {} lines over {} pages",
                poem.title,
                chunks.iter().map(Vec::len).sum::<usize>(),
                chunks.len()
            );
        }
        let next_title = next_poem.map(|next| next.title.as_str());
        self.render_all(&chunks, poem, next_title)
    }

    /// Format a poem into page strings.
    pub fn format_poem_text(
        &self,
        poem: &PoemRecord,
        next_poem: Option<&PoemRecord>,
    ) -> Result<Vec<String>, LayoutError> {
        Ok(self
            .format_poem(poem, next_poem)?
            .iter()
            .map(RenderedPage::text)
            .collect())
    }
}
