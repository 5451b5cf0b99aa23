//! Batch generation of paged poem text files and their catalogs.
//!
//! Output layout under the configured output directory:
//!
//! ```text
//! 00_总目录.txt
//! <category>/目录001-100.txt
//! <category>/001-100/0001_<title>.txt        (one poem per file)
//! <category>/001-100/0001-0005_合集.txt      (several poems per file)
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

pub mod catalog;
pub mod error;
pub mod generator;
pub mod settings;

pub use catalog::{
    build_master_catalog, category_index_files, save_master_catalog, MASTER_CATALOG_FILE,
};
pub use error::GenerateError;
pub use generator::{
    batch_file_name, poem_file_name, safe_filename, shard_dir_name, BatchGenerator, FileMapping,
    GenerateReport, SHARD_SIZE,
};
pub use settings::{GeneratorSettings, LengthRange};
