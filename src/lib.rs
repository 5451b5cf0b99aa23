//! Poem records, text normalization, and corpus loading for `poem-pages`.
//!
//! This crate owns the data that flows into the page formatter in
//! `poem-pages-render`: [`PoemRecord`] values parsed from chinese-poetry style
//! JSON files, plus the fullwidth numeral helpers shared by page footers and
//! catalogs.
//!
//! # Usage
//!
//! ```rust
//! use poem_pages::{parse_poem_json, PoemParseOptions};
//!
//! # fn example() -> Result<(), poem_pages::PoemError> {
//! let json = r#"{"title": "春晓", "author": "孟浩然", "paragraphs": ["春眠不觉晓，处处闻啼鸟。"]}"#;
//! let poems = parse_poem_json(json.as_bytes(), &PoemParseOptions::default())?;
//! assert_eq!(poems[0].title, "春晓");
//! # Ok(())
//! # }
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod error;
#[cfg(feature = "std")]
pub mod library;
pub mod numeral;
pub mod poem;

pub use error::{PoemError, PoemErrorKind};
#[cfg(feature = "std")]
pub use library::{is_category_dir_name, load_poem_file, PoemLibrary};
pub use numeral::{to_fullwidth, to_fullwidth_number, to_fullwidth_padded};
pub use poem::{
    normalize_spaces, normalize_title_spaces, parse_poem_json, PoemParseOptions, PoemRecord,
    DEFAULT_AUTHOR, DEFAULT_TITLE, FULLWIDTH_SPACE,
};
