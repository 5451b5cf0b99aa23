//! Writes formatted poems to sharded text files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use poem_pages::{PoemLibrary, PoemRecord};
use poem_pages_render::PageFormatter;

use crate::catalog::category_index_files;
use crate::error::GenerateError;
use crate::settings::GeneratorSettings;

/// Poems per shard directory.
pub const SHARD_SIZE: usize = 100;
const MAX_FILENAME_CHARS: usize = 50;
const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Category name -> poem title -> output file name.
pub type FileMapping = BTreeMap<String, BTreeMap<String, String>>;

/// Outcome of a [`BatchGenerator::generate_all`] run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerateReport {
    /// Where each poem was written.
    pub mapping: FileMapping,
    /// Poems written successfully.
    pub poems_written: usize,
    /// Poem or batch files written.
    pub files_written: usize,
    /// Poems or batches skipped after an error.
    pub failures: usize,
}

/// Shard directory for a 1-based poem index: `001-100`, `101-200`, ...
pub fn shard_dir_name(index: usize) -> String {
    let start = (index.saturating_sub(1) / SHARD_SIZE) * SHARD_SIZE + 1;
    format!("{:03}-{:03}", start, start + SHARD_SIZE - 1)
}

/// Replace path-hostile chars with `_` and cap the length.
pub fn safe_filename(title: &str) -> String {
    title
        .chars()
        .map(|ch| if UNSAFE_FILENAME_CHARS.contains(&ch) { '_' } else { ch })
        .take(MAX_FILENAME_CHARS)
        .collect()
}

/// `NNNN_<title>.txt` for one-poem files.
pub fn poem_file_name(index: usize, title: &str) -> String {
    format!("{:04}_{}.txt", index, safe_filename(title))
}

/// `SSSS-EEEE_合集.txt` for multi-poem files.
pub fn batch_file_name(start: usize, end: usize) -> String {
    format!("{:04}-{:04}_合集.txt", start, end)
}

/// Formats a [`PoemLibrary`] into files under the configured output directory.
#[derive(Debug)]
pub struct BatchGenerator<'a> {
    settings: &'a GeneratorSettings,
    formatter: PageFormatter,
}

impl<'a> BatchGenerator<'a> {
    /// Validate layout settings and build a generator.
    pub fn new(settings: &'a GeneratorSettings) -> Result<Self, GenerateError> {
        let formatter = PageFormatter::new(settings.layout_config())?;
        Ok(Self {
            settings,
            formatter,
        })
    }

    /// Formatter used for every poem.
    pub fn formatter(&self) -> &PageFormatter {
        &self.formatter
    }

    /// Write every non-empty category, its shards, and its index files.
    ///
    /// A poem or batch that fails to format or write is logged and counted
    /// in [`GenerateReport::failures`]; directory and index failures abort.
    pub fn generate_all(&self, library: &PoemLibrary) -> Result<GenerateReport, GenerateError> {
        let output_dir = self.settings.output_dir.as_path();
        if output_dir.is_file() {
            fs::remove_file(output_dir).map_err(GenerateError::io(output_dir))?;
        }
        fs::create_dir_all(output_dir).map_err(GenerateError::io(output_dir))?;

        log::info!(
            "generating {} categories, {} poems into {}",
            library.category_count(),
            library.poem_count(),
            output_dir.display()
        );

        let mut report = GenerateReport::default();
        for (category, poems) in library.categories() {
            if poems.is_empty() {
                continue;
            }
            log::info!("category {} ({} poems)", category, poems.len());
            let category_dir = output_dir.join(category);
            fs::create_dir_all(&category_dir).map_err(GenerateError::io(&category_dir))?;
            self.generate_category(category, poems, &category_dir, &mut report)?;

            for (name, body) in category_index_files(category, poems, self.settings) {
                let path = category_dir.join(name);
                fs::write(&path, body).map_err(GenerateError::io(&path))?;
            }
        }

        log::info!(
            "wrote {} poems in {} files ({} failures)",
            report.poems_written,
            report.files_written,
            report.failures
        );
        Ok(report)
    }

    fn generate_category(
        &self,
        category: &str,
        poems: &[PoemRecord],
        category_dir: &Path,
        report: &mut GenerateReport,
    ) -> Result<(), GenerateError> {
        let mapping = report.mapping.entry(category.to_string()).or_default();
        let per_file = self.settings.poems_per_file();

        for (batch_idx, batch) in poems.chunks(per_file).enumerate() {
            let start = batch_idx * per_file + 1;
            let result = if per_file == 1 {
                self.write_poem_file(&batch[0], category_dir, start)
            } else {
                self.write_batch_file(batch, category_dir, start)
            };
            match result {
                Ok(file_name) => {
                    report.poems_written += batch.len();
                    report.files_written += 1;
                    log::debug!("wrote {} ({} poems so far)", file_name, report.poems_written);
                    for poem in batch {
                        mapping.insert(poem.title.clone(), file_name.clone());
                    }
                }
                Err(err) => {
                    log::warn!("skipping {} #{}: {}", category, start, err);
                    report.failures += 1;
                }
            }
        }
        Ok(())
    }

    fn shard_dir(&self, category_dir: &Path, index: usize) -> Result<PathBuf, GenerateError> {
        let dir = category_dir.join(shard_dir_name(index));
        fs::create_dir_all(&dir).map_err(GenerateError::io(&dir))?;
        Ok(dir)
    }

    fn write_poem_file(
        &self,
        poem: &PoemRecord,
        category_dir: &Path,
        index: usize,
    ) -> Result<String, GenerateError> {
        let pages = self.formatter.format_poem_text(poem, None)?;
        let file_name = poem_file_name(index, &poem.title);
        let path = self.shard_dir(category_dir, index)?.join(&file_name);
        fs::write(&path, pages.join("\n")).map_err(GenerateError::io(&path))?;
        Ok(file_name)
    }

    fn write_batch_file(
        &self,
        poems: &[PoemRecord],
        category_dir: &Path,
        start: usize,
    ) -> Result<String, GenerateError> {
        let mut bodies = Vec::with_capacity(poems.len());
        for (idx, poem) in poems.iter().enumerate() {
            let pages = self.formatter.format_poem_text(poem, poems.get(idx + 1))?;
            bodies.push(pages.join("\n"));
        }
        let file_name = batch_file_name(start, start + poems.len() - 1);
        let path = self.shard_dir(category_dir, start)?.join(&file_name);
        fs::write(&path, bodies.join("\n")).map_err(GenerateError::io(&path))?;
        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shard_names_group_by_hundred() {
        assert_eq!(shard_dir_name(1), "001-100");
        assert_eq!(shard_dir_name(100), "001-100");
        assert_eq!(shard_dir_name(101), "101-200");
        assert_eq!(shard_dir_name(1234), "1201-1300");
    }

    #[test]
    fn safe_filename_replaces_and_caps() {
        assert_eq!(safe_filename("a/b:c?"), "a_b_c_");
        let long: String = std::iter::repeat('字').take(60).collect();
        assert_eq!(safe_filename(&long).chars().count(), 50);
    }

    #[test]
    fn file_names_are_zero_padded() {
        assert_eq!(poem_file_name(7, "春晓"), "0007_春晓.txt");
        assert_eq!(batch_file_name(1, 5), "0001-0005_合集.txt");
    }

    #[test]
    fn rejects_invalid_geometry() {
        let settings = GeneratorSettings {
            columns_per_page: 2,
            ..GeneratorSettings::default()
        };
        assert!(matches!(
            BatchGenerator::new(&settings),
            Err(GenerateError::Layout(_))
        ));
    }
}
