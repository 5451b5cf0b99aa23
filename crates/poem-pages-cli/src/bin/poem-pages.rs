use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use poem_pages::{load_poem_file, PoemLibrary};
use poem_pages_cli::{build_master_catalog, save_master_catalog, BatchGenerator, GeneratorSettings};
use poem_pages_render::{BorderStyle, PageFormatter};

/// Format classical poems into fixed-size text pages.
#[derive(Parser, Debug)]
#[command(name = "poem-pages", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format every category under the input directory into paged files.
    Generate(GenerateArgs),
    /// Print the pages of one poem source file.
    Preview(PreviewArgs),
    /// Write a settings file with default values.
    InitConfig {
        /// Destination path.
        #[arg(value_name = "PATH", default_value = "config.json")]
        path: PathBuf,
    },
}

/// Overrides shared by `generate` and `preview`.
#[derive(Args, Debug)]
struct LayoutOverrides {
    /// Settings file; relative directories inside it resolve against its folder.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Display cells per row.
    #[arg(long)]
    columns: Option<usize>,

    /// Rows per page.
    #[arg(long)]
    lines: Option<usize>,

    /// Disable title, author, and footer rows.
    #[arg(long)]
    no_decoration: bool,

    /// Border style: none, single, or double.
    #[arg(long, value_name = "STYLE")]
    border: Option<BorderStyle>,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    layout: LayoutOverrides,

    /// Poem corpus root containing one directory per category.
    #[arg(long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Output root.
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Poems per output file.
    #[arg(long)]
    poems_per_file: Option<usize>,

    /// Skip the master catalog.
    #[arg(long)]
    no_catalog: bool,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    layout: LayoutOverrides,

    /// Poem JSON file.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Only show the poem at this 1-based position in the file.
    #[arg(long)]
    index: Option<usize>,

    /// Emit pages as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate(args) => generate(args),
        Command::Preview(args) => preview(args),
        Command::InitConfig { path } => {
            GeneratorSettings::default()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote default settings to {}", path.display());
            Ok(())
        }
    }
}

fn load_settings(overrides: &LayoutOverrides) -> GeneratorSettings {
    let mut settings = match overrides.config.as_deref() {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            GeneratorSettings::load_or_default(path).resolve_relative_to(base)
        }
        None => GeneratorSettings::default(),
    };
    if let Some(columns) = overrides.columns {
        settings.columns_per_page = columns;
    }
    if let Some(lines) = overrides.lines {
        settings.lines_per_page = lines;
    }
    if overrides.no_decoration {
        settings.enable_decoration = false;
    }
    if let Some(style) = overrides.border {
        settings.border_style = style;
    }
    settings
}

fn generate(args: GenerateArgs) -> Result<()> {
    let mut settings = load_settings(&args.layout);
    if let Some(input) = args.input {
        settings.input_dir = input;
    }
    if let Some(output) = args.output {
        settings.output_dir = output;
    }
    if let Some(per_file) = args.poems_per_file {
        settings.poems_per_file = per_file;
    }
    if args.no_catalog {
        settings.enable_catalog = false;
    }

    let generator = BatchGenerator::new(&settings).context("invalid page geometry")?;
    let library = PoemLibrary::load(&settings.input_dir, &settings.parse_options())
        .with_context(|| format!("failed to load poems from {}", settings.input_dir.display()))?;
    if library.is_empty() {
        bail!("no poem categories found in {}", settings.input_dir.display());
    }

    let report = generator.generate_all(&library).context("generation failed")?;
    if settings.enable_catalog {
        let catalog = build_master_catalog(&library, &settings);
        save_master_catalog(&catalog, &settings.output_dir)?;
    }

    tracing::info!(
        poems = report.poems_written,
        files = report.files_written,
        failures = report.failures,
        "done"
    );
    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    let settings = load_settings(&args.layout);
    let formatter = PageFormatter::new(settings.layout_config()).context("invalid page geometry")?;
    let poems = load_poem_file(&args.file, &settings.parse_options())
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let selected: Vec<usize> = match args.index {
        Some(0) => bail!("--index is 1-based"),
        Some(n) if n > poems.len() => {
            bail!("{} holds {} poems, asked for #{}", args.file.display(), poems.len(), n)
        }
        Some(n) => vec![n - 1],
        None => (0..poems.len()).collect(),
    };

    let mut out = io::stdout().lock();
    for idx in selected {
        let pages = formatter.format_poem(&poems[idx], poems.get(idx + 1))?;
        if args.json {
            serde_json::to_writer(&mut out, &pages)?;
            writeln!(out)?;
        } else {
            for page in &pages {
                writeln!(out, "{}", page.text())?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}
