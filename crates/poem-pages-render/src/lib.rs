//! Page layout, pagination, and border rendering for `poem-pages`.
//!
//! Formatting a poem is two explicit passes: the layout pass wraps, aligns,
//! and chunks content lines into pages, then the render pass decorates each
//! chunk once the total page count is known.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod render_border;
mod render_engine;
mod render_ir;
mod render_layout;
mod render_page;

pub use poem_pages::{to_fullwidth, to_fullwidth_number, PoemRecord};
pub use render_border::{
    border_line, center_in_interior, BorderGlyphs, BorderRow, BorderStyle, NONE_CORNER, NONE_RULE,
};
pub use render_engine::{LayoutError, PageFormatter};
pub use render_ir::{PageFooterKind, RenderedPage};
pub use render_layout::{
    align_lines, content_budget, display_len, left_padding, paginate, wrap_paragraph,
    LayoutConfig, CLAUSE_DELIMITER, DECORATION_ROWS,
};
pub use render_page::{
    blank_row, next_title_preview, page_indicator, render_all, render_page, select_footer,
    vertical_padding, PageRequest, ELLIPSIS, NEXT_TITLE_PREFIX,
};
