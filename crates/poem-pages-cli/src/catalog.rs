//! Category index files and the master catalog.

use std::fs;
use std::path::{Path, PathBuf};

use poem_pages::{
    to_fullwidth_number, to_fullwidth_padded, PoemLibrary, PoemRecord, FULLWIDTH_SPACE,
};
use poem_pages_render::{border_line, display_len, BorderRow};

use crate::error::GenerateError;
use crate::generator::SHARD_SIZE;
use crate::settings::GeneratorSettings;

/// File name of the master catalog in the output root.
pub const MASTER_CATALOG_FILE: &str = "00_总目录.txt";
const CATALOG_HEADING: &str = "总目录";
const CATALOG_SUBHEADING: &str = "【古诗词】";

fn rule(glyph: char, width: usize) -> String {
    core::iter::repeat(glyph).take(width).collect()
}

fn truncate_chars(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn fill(count: usize) -> String {
    rule(FULLWIDTH_SPACE, count)
}

/// Pad both sides to `width`; wider text is unchanged.
///
/// An odd margin puts the extra cell on the right for even widths and on the
/// left for odd widths.
fn center_both(text: &str, width: usize) -> String {
    let len = display_len(text);
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    format!("{}{}{}", fill(left), text, fill(width - len - left))
}

/// Left-pad only; wider text is cut to `width`.
fn center_left(text: &str, width: usize) -> String {
    let len = display_len(text);
    if len >= width {
        return truncate_chars(text, width);
    }
    format!("{}{}", fill((width - len) / 2), text)
}

fn push_entry(lines: &mut Vec<String>, index: usize, poem: &PoemRecord) {
    lines.push(format!("{}・{}", to_fullwidth_padded(index, 3), poem.title));
    lines.push(format!("{0}{0}「{1}」", FULLWIDTH_SPACE, poem.author));
}

fn index_header(
    lines: &mut Vec<String>,
    category: &str,
    start: usize,
    end: usize,
    settings: &GeneratorSettings,
) {
    let width = settings.columns_per_page;
    if !settings.enable_decoration {
        lines.push(rule('═', width));
        lines.push(center_both(&format!("{} ({}～{})", category, start, end), width));
        lines.push(rule('═', width));
        return;
    }

    let style = settings.border_style;
    let interior = width.saturating_sub(2);
    lines.push(border_line(style, BorderRow::Top, "", width));
    lines.push(border_line(style, BorderRow::Separator, &format!("【{}】", category), width));
    let range = format!("第{}～{}首", to_fullwidth_number(start), to_fullwidth_number(end));
    if display_len(&range) < interior {
        lines.push(border_line(style, BorderRow::Separator, &range, width));
    }
    lines.push(border_line(style, BorderRow::Bottom, "", width));
}

/// Index files for one category, one per shard: `(file name, body)`.
///
/// Entries list `NNN・title` with the author on the next line. When several
/// poems share a file, each file's group is introduced by its number range.
pub fn category_index_files(
    category: &str,
    poems: &[PoemRecord],
    settings: &GeneratorSettings,
) -> Vec<(String, String)> {
    let per_file = settings.poems_per_file();
    let width = settings.columns_per_page;
    let mut files = Vec::with_capacity(poems.len().div_ceil(SHARD_SIZE));

    for (shard_idx, shard) in poems.chunks(SHARD_SIZE).enumerate() {
        let offset = shard_idx * SHARD_SIZE;
        let (start, end) = (offset + 1, offset + shard.len());
        let mut lines = Vec::with_capacity(shard.len() * 2 + 4);
        index_header(&mut lines, category, start, end, settings);

        if per_file == 1 {
            for (idx, poem) in shard.iter().enumerate() {
                push_entry(&mut lines, start + idx, poem);
            }
        } else {
            for (group_idx, group) in shard.chunks(per_file).enumerate() {
                let group_start = start + group_idx * per_file;
                let group_end = group_start + group.len() - 1;
                let heading = format!(
                    "━{}～{}━",
                    to_fullwidth_padded(group_start, 4),
                    to_fullwidth_padded(group_end, 4)
                );
                lines.push(truncate_chars(&heading, width));
                for (idx, poem) in group.iter().enumerate() {
                    push_entry(&mut lines, group_start + idx, poem);
                }
            }
        }

        files.push((format!("目录{:03}-{:03}.txt", start, end), lines.join("\n")));
    }
    files
}

/// Master catalog listing every non-empty category with its poem count.
///
/// Category numbers count empty categories too, so numbering matches the
/// sorted category directory listing.
pub fn build_master_catalog(library: &PoemLibrary, settings: &GeneratorSettings) -> String {
    let width = settings.columns_per_page;
    let style = settings.border_style;
    let decorated = settings.enable_decoration;
    let mut lines = Vec::with_capacity(library.category_count() + 4);

    lines.push(if decorated {
        border_line(style, BorderRow::Top, CATALOG_HEADING, width)
    } else {
        rule('═', width)
    });
    lines.push(center_left(CATALOG_SUBHEADING, width));
    lines.push(if decorated {
        border_line(style, BorderRow::Separator, "", width)
    } else {
        rule('─', width)
    });

    for (idx, (category, poems)) in library.categories().enumerate() {
        if poems.is_empty() {
            continue;
        }
        let line = format!(
            "{}・{}「{}首」",
            to_fullwidth_number(idx + 1),
            category,
            to_fullwidth_number(poems.len())
        );
        lines.push(truncate_chars(&line, width));
    }

    lines.push(if decorated {
        border_line(style, BorderRow::Bottom, "", width)
    } else {
        rule('═', width)
    });
    lines.join("\n")
}

/// Write the master catalog into `output_dir`.
pub fn save_master_catalog(content: &str, output_dir: &Path) -> Result<PathBuf, GenerateError> {
    fs::create_dir_all(output_dir).map_err(GenerateError::io(output_dir))?;
    let path = output_dir.join(MASTER_CATALOG_FILE);
    fs::write(&path, content).map_err(GenerateError::io(&path))?;
    log::info!("catalog written to {}", path.display());
    Ok(path)
}
