use poem_pages::{to_fullwidth_number, PoemRecord, FULLWIDTH_SPACE};

use crate::render_border::{border_line, BorderRow};
use crate::render_engine::LayoutError;
use crate::render_ir::{PageFooterKind, RenderedPage};
use crate::render_layout::{LayoutConfig, DECORATION_ROWS};

/// Marker in front of a next-poem title preview.
pub const NEXT_TITLE_PREFIX: char = '▶';
/// Appended when a next-poem title is shortened.
pub const ELLIPSIS: char = '…';

/// Inputs for rendering one page of a poem.
#[derive(Clone, Copy, Debug)]
pub struct PageRequest<'a> {
    /// Content lines for this page, already wrapped and aligned.
    pub content: &'a [String],
    /// 1-based page number.
    pub page_number: usize,
    /// Total pages in the set, known after pagination.
    pub total_pages: usize,
    /// Poem supplying the header title and author.
    pub poem: &'a PoemRecord,
    /// Title of the next poem in the batch, if any.
    pub next_title: Option<&'a str>,
}

/// A full row of fullwidth blanks.
pub fn blank_row(columns_per_page: usize) -> String {
    core::iter::repeat(FULLWIDTH_SPACE)
        .take(columns_per_page)
        .collect()
}

/// Blank rows above and below `content_len` rows in `available` rows.
///
/// The odd row goes below, shifting content up.
pub fn vertical_padding(available: usize, content_len: usize) -> (usize, usize) {
    let need = available.saturating_sub(content_len);
    let top = need / 2;
    (top, need - top)
}

/// `第X／Y页` with fullwidth digits.
pub fn page_indicator(page_number: usize, total_pages: usize) -> String {
    format!(
        "第{}／{}页",
        to_fullwidth_number(page_number),
        to_fullwidth_number(total_pages)
    )
}

/// `▶` + `title`, shortened with `…` to fit `interior_width`.
///
/// When not even one title char fits next to the prefix and ellipsis, the
/// text is returned whole and the border's hard truncation applies.
pub fn next_title_preview(title: &str, interior_width: usize) -> String {
    let title_len = title.chars().count();
    let mut out = String::with_capacity(title.len() + 6);
    out.push(NEXT_TITLE_PREFIX);
    if 1 + title_len > interior_width {
        if let Some(keep) = interior_width.checked_sub(2).filter(|keep| *keep > 0) {
            out.extend(title.chars().take(keep));
            out.push(ELLIPSIS);
            return out;
        }
    }
    out.push_str(title);
    out
}

/// Footer selection: a single-page poem followed by another previews it.
pub fn select_footer(total_pages: usize, next_title: Option<&str>) -> PageFooterKind {
    if total_pages == 1 && next_title.is_some() {
        PageFooterKind::NextTitle
    } else {
        PageFooterKind::Indicator
    }
}

/// Second pass: decorate and pad one page.
///
/// Fails on a config that [`LayoutConfig::validate`] rejects, or when the
/// request carries more content rows than the page budget.
pub fn render_page(
    req: &PageRequest<'_>,
    cfg: &LayoutConfig,
) -> Result<RenderedPage, LayoutError> {
    cfg.validate()?;
    let budget = cfg.content_budget();
    if req.content.len() > budget {
        return Err(LayoutError::PageOverflow {
            page_number: req.page_number,
            rows: req.content.len(),
            budget,
        });
    }

    let columns = cfg.columns_per_page;
    let mut page = RenderedPage::new(req.page_number, req.total_pages);
    page.rows.reserve(cfg.lines_per_page.max(req.content.len()));

    let available = if cfg.decoration_enabled {
        page.rows.push(border_line(
            cfg.border_style,
            BorderRow::Top,
            &req.poem.title,
            columns,
        ));
        let author = format!("「{}」", req.poem.author);
        page.rows.push(border_line(
            cfg.border_style,
            BorderRow::Separator,
            &author,
            columns,
        ));
        cfg.lines_per_page.saturating_sub(DECORATION_ROWS)
    } else {
        cfg.lines_per_page
    };

    let (top, bottom) = vertical_padding(available, req.content.len());
    let blank = blank_row(columns);
    page.rows.extend(core::iter::repeat(blank.clone()).take(top));
    page.rows.extend(req.content.iter().cloned());
    page.rows.extend(core::iter::repeat(blank).take(bottom));

    if cfg.decoration_enabled {
        let footer = select_footer(req.total_pages, req.next_title);
        let text = match (footer, req.next_title) {
            (PageFooterKind::NextTitle, Some(title)) => {
                next_title_preview(title, cfg.interior_width())
            }
            _ => page_indicator(req.page_number, req.total_pages),
        };
        page.rows.push(border_line(
            cfg.border_style,
            BorderRow::Bottom,
            &text,
            columns,
        ));
        page.footer = Some(footer);
    }
    Ok(page)
}

/// Render every chunk from [`paginate`](crate::paginate) in order.
pub fn render_all(
    chunks: &[Vec<String>],
    poem: &PoemRecord,
    next_title: Option<&str>,
    cfg: &LayoutConfig,
) -> Result<Vec<RenderedPage>, LayoutError> {
    cfg.validate()?;
    let total_pages = chunks.len();
    chunks
        .iter()
        .enumerate()
        .map(|(idx, content)| {
            let req = PageRequest {
                content,
                page_number: idx + 1,
                total_pages,
                poem,
                next_title,
            };
            render_page(&req, cfg)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_border::BorderStyle;

    fn poem() -> PoemRecord {
        PoemRecord::new("春晓", "孟浩然", ["春眠不觉晓，处处闻啼鸟。"])
    }

    #[test]
    fn vertical_padding_biases_content_up() {
        assert_eq!(vertical_padding(7, 2), (2, 3));
        assert_eq!(vertical_padding(7, 3), (2, 2));
        assert_eq!(vertical_padding(4, 4), (0, 0));
        assert_eq!(vertical_padding(4, 9), (0, 0));
    }

    #[test]
    fn indicator_uses_fullwidth_digits() {
        assert_eq!(page_indicator(1, 1), "第１／１页");
        assert_eq!(page_indicator(3, 12), "第３／１２页");
    }

    #[test]
    fn preview_fits_untouched() {
        assert_eq!(next_title_preview("静夜思", 8), "▶静夜思");
        assert_eq!(next_title_preview("一二三四五六七", 8), "▶一二三四五六七");
    }

    #[test]
    fn preview_truncates_with_ellipsis() {
        assert_eq!(next_title_preview("一二三四五六七八", 8), "▶一二三四五六…");
    }

    #[test]
    fn preview_without_room_keeps_full_text() {
        assert_eq!(next_title_preview("一二三", 2), "▶一二三");
    }

    #[test]
    fn footer_prefers_preview_only_for_single_page() {
        assert_eq!(select_footer(1, Some("x")), PageFooterKind::NextTitle);
        assert_eq!(select_footer(1, None), PageFooterKind::Indicator);
        assert_eq!(select_footer(2, Some("x")), PageFooterKind::Indicator);
    }

    #[test]
    fn decorated_page_has_exact_geometry() {
        let cfg = LayoutConfig::for_display(10, 10);
        let content = vec!["\u{3000}\u{3000}春眠不觉晓，".to_string()];
        let p = poem();
        let page = render_page(
            &PageRequest {
                content: &content,
                page_number: 1,
                total_pages: 1,
                poem: &p,
                next_title: None,
            },
            &cfg,
        )
        .unwrap();
        assert_eq!(page.row_count(), 10);
        assert_eq!(page.rows[0], "╔\u{3000}\u{3000}\u{3000}春晓\u{3000}\u{3000}\u{3000}╗");
        assert_eq!(page.rows[1], "╠\u{3000}「孟浩然」\u{3000}\u{3000}╣");
        assert_eq!(page.rows[9], "╚\u{3000}第１／１页\u{3000}\u{3000}╝");
        assert_eq!(page.rows[5], content[0]);
        assert_eq!(page.footer, Some(PageFooterKind::Indicator));
    }

    #[test]
    fn undecorated_page_is_only_content_and_blanks() {
        let cfg = LayoutConfig {
            decoration_enabled: false,
            ..LayoutConfig::for_display(4, 5)
        };
        let content = vec!["一二".to_string(), "三四".to_string()];
        let p = poem();
        let page = render_page(
            &PageRequest {
                content: &content,
                page_number: 1,
                total_pages: 1,
                poem: &p,
                next_title: Some("下一首"),
            },
            &cfg,
        )
        .unwrap();
        let blank = blank_row(4);
        assert_eq!(
            page.rows,
            vec![
                blank.clone(),
                content[0].clone(),
                content[1].clone(),
                blank.clone(),
                blank
            ]
        );
        assert!(page.footer.is_none());
    }

    #[test]
    fn single_style_preview_footer() {
        let cfg = LayoutConfig {
            border_style: BorderStyle::Single,
            ..LayoutConfig::for_display(8, 6)
        };
        let content = vec!["一".to_string()];
        let p = poem();
        let page = render_page(
            &PageRequest {
                content: &content,
                page_number: 1,
                total_pages: 1,
                poem: &p,
                next_title: Some("一二三四五六七"),
            },
            &cfg,
        )
        .unwrap();
        assert_eq!(page.rows.last().unwrap(), "└▶一二三四…┘");
        assert_eq!(page.footer, Some(PageFooterKind::NextTitle));
    }

    #[test]
    fn render_all_numbers_pages_and_shares_total() {
        let cfg = LayoutConfig::for_display(8, 5);
        let chunks = vec![vec!["一".to_string(), "二".to_string()], vec!["三".to_string()]];
        let pages = render_all(&chunks, &poem(), Some("next"), &cfg).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 2);
        assert!(pages.iter().all(|p| p.total_pages == 2));
        assert!(pages[1].rows[4].contains("第２／２页"));
    }

    #[test]
    fn degenerate_height_is_a_config_error() {
        let cfg = LayoutConfig {
            lines_per_page: 2,
            ..LayoutConfig::for_display(10, 2)
        };
        let chunks = vec![vec!["一".to_string()]];
        let err = render_all(&chunks, &poem(), None, &cfg).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidConfig {
                field: "lines_per_page",
                ..
            }
        ));

        let narrow = LayoutConfig::for_display(2, 10);
        let p = poem();
        let req = PageRequest {
            content: &chunks[0],
            page_number: 1,
            total_pages: 1,
            poem: &p,
            next_title: None,
        };
        assert!(render_page(&req, &narrow).is_err());
    }

    #[test]
    fn overfull_request_is_rejected() {
        let cfg = LayoutConfig::for_display(8, 5);
        let content = vec!["一".to_string(), "二".to_string(), "三".to_string()];
        let p = poem();
        let req = PageRequest {
            content: &content,
            page_number: 2,
            total_pages: 3,
            poem: &p,
            next_title: None,
        };
        assert_eq!(
            render_page(&req, &cfg).unwrap_err(),
            LayoutError::PageOverflow {
                page_number: 2,
                rows: 3,
                budget: 2
            }
        );
    }
}
