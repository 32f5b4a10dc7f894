use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use vfx_blockdesc::loader::{FsSource, ManifestLoader};
use vfx_blockdesc::model::ContextType;
use vfx_blockdesc::{BlockDesc, BlockDescOptions, BlockLibrary};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Stage {
    Init,
    Update,
    Output,
}

impl From<Stage> for ContextType {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::Init => ContextType::INIT,
            Stage::Update => ContextType::UPDATE,
            Stage::Output => ContextType::OUTPUT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Build block descriptors from JSON block manifests", long_about = None)]
struct Cli {
    /// Manifest file, or directory searched recursively for `*.json` manifests
    #[arg(value_name = "MANIFEST")]
    manifest: String,

    /// JSON file with descriptor options
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Use fully-qualified function names (overrides the config file)
    #[arg(long)]
    safe_names: bool,

    /// Only print blocks compatible with this stage
    #[arg(long, value_enum)]
    context: Option<Stage>,

    /// Only print blocks in this category
    #[arg(long)]
    category: Option<String>,

    /// Only print blocks whose name, category or description contains this text
    #[arg(short, long)]
    query: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = Utf8PathBuf::from(&cli.manifest);
    let mut loader = ManifestLoader::new(FsSource);

    let mut options = match &cli.config {
        Some(config) => loader.load_options(config)?,
        None => BlockDescOptions::default(),
    };
    if cli.safe_names {
        options.use_collision_safe_names = true;
    }

    let block_types = if path.is_dir() {
        let loaded = loader
            .load_dir(&path)
            .with_context(|| format!("Failed to load manifests from {}", path))?;
        for (p, err) in &loaded.failures {
            eprintln!("Skipping {}: {:#}", p, err);
        }
        loaded.block_types
    } else {
        loader
            .load_file(&path)
            .with_context(|| format!("Failed to load {}", path))?
    };

    let mut library = BlockLibrary::new(options);
    for err in library.extend(&block_types) {
        eprintln!("Ignoring block: {}", err);
    }
    eprintln!("Described {} block(s)", library.len());

    let selected: Vec<&BlockDesc> = library
        .iter()
        .filter(|d| cli.context.is_none_or(|s| d.is_compatible_with(s.into())))
        .filter(|d| cli.category.as_deref().is_none_or(|c| d.category() == c))
        .filter(|d| d.matches_query(cli.query.as_deref().unwrap_or("")))
        .collect();

    let json = serde_json::to_string_pretty(&selected)?;
    println!("{}", json);
    Ok(())
}
