//! Poem records and JSON normalization.
//!
//! Source files follow the chinese-poetry layout: either a JSON array of poem
//! objects or one poem object, each carrying `title`, `author`, and
//! `paragraphs`. Unknown keys (`id`, `tags`, ...) are ignored.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

use crate::error::PoemError;

/// Title used when a record carries none.
pub const DEFAULT_TITLE: &str = "无题";
/// Author used when a record carries none.
pub const DEFAULT_AUTHOR: &str = "佚名";
/// Ideographic space; one display cell of blank.
pub const FULLWIDTH_SPACE: char = '\u{3000}';

/// One poem as consumed by the page formatter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoemRecord {
    /// Display title (whitespace already folded into the title separator).
    pub title: String,
    /// Author name.
    pub author: String,
    /// Verse paragraphs in reading order.
    pub paragraphs: Vec<String>,
}

impl PoemRecord {
    /// Build a record from raw parts without normalization.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        paragraphs: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    /// Char count of all paragraphs concatenated.
    pub fn content_len(&self) -> usize {
        self.paragraphs.iter().map(|p| p.chars().count()).sum()
    }
}

/// Parsing and filtering options for poem source files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemParseOptions {
    /// Replacement for whitespace runs inside titles.
    pub title_separator: String,
    /// Minimum accepted content length (inclusive).
    pub min_length: usize,
    /// Maximum accepted content length (inclusive).
    pub max_length: usize,
}

impl Default for PoemParseOptions {
    fn default() -> Self {
        Self {
            title_separator: "・".to_string(),
            min_length: 0,
            max_length: usize::MAX,
        }
    }
}

impl PoemParseOptions {
    fn accepts(&self, poem: &PoemRecord) -> bool {
        let len = poem.content_len();
        len >= self.min_length && len <= self.max_length
    }
}

#[derive(Deserialize)]
struct RawPoem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    paragraphs: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPoemFile {
    Many(Vec<RawPoem>),
    One(RawPoem),
    Other(IgnoredAny),
}

/// Fold every run of ASCII or ideographic whitespace into one `separator`.
pub fn normalize_title_spaces(text: &str, separator: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push_str(separator);
                in_space = true;
            }
        } else {
            out.push(ch);
            in_space = false;
        }
    }
    out
}

/// Replace ASCII spaces with ideographic spaces so every char stays one cell.
pub fn normalize_spaces(text: &str) -> String {
    text.replace(' ', "\u{3000}")
}

fn normalize_raw(raw: RawPoem, options: &PoemParseOptions) -> Option<PoemRecord> {
    let paragraphs: Vec<String> = raw
        .paragraphs
        .iter()
        .filter_map(Value::as_str)
        .map(normalize_spaces)
        .collect();
    if paragraphs.is_empty() {
        return None;
    }
    let title = raw.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let author = raw.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string());
    Some(PoemRecord {
        title: normalize_title_spaces(&title, &options.title_separator),
        author: normalize_spaces(&author),
        paragraphs,
    })
}

/// Parse one source file payload into normalized, length-filtered records.
///
/// Records without paragraphs are dropped silently; a payload that is not
/// JSON is an error.
pub fn parse_poem_json(bytes: &[u8], options: &PoemParseOptions) -> Result<Vec<PoemRecord>, PoemError> {
    let raws = match serde_json::from_slice::<RawPoemFile>(bytes)? {
        RawPoemFile::Many(raws) => raws,
        RawPoemFile::One(raw) => vec![raw],
        RawPoemFile::Other(_) => Vec::new(),
    };
    Ok(raws
        .into_iter()
        .filter_map(|raw| normalize_raw(raw, options))
        .filter(|poem| options.accepts(poem))
        .collect())
}
