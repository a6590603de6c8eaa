use crate::config::GeneratorConfig;
use crate::pipeline::Generator;
use crate::route::RouteFile;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const STARTER_CONFIG: &str = r#"# routedoc configuration
title: API Documentation
base_url: http://localhost
faker_seed: 0

routes:
  - match:
      prefixes: ["api/*"]
      methods: []
      versions: []
    apply:
      headers: {}

default_group: General
group_sort: natural

output:
  markdown_dir: docs
  collection_file: docs/collection.json
"#;

/// Command-line interface for routedoc
///
/// Provides commands for generating documentation from a route-table file
/// and for writing a starter configuration.
#[derive(Parser)]
#[command(name = "routedoc")]
#[command(about = "Route-table driven API documentation generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for routedoc
#[derive(Subcommand)]
pub enum Commands {
    /// Generate Markdown pages and a Postman collection from a route table
    Generate {
        /// Path to the route-table file (YAML)
        #[arg(short, long)]
        routes: PathBuf,

        /// Path to the generator configuration (YAML); defaults apply when
        /// omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured Markdown output directory
        #[arg(long)]
        markdown_dir: Option<PathBuf>,

        /// Override the configured collection file path
        #[arg(long)]
        collection_file: Option<PathBuf>,

        /// Override the configured example seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a starter configuration file
    Init {
        /// Where to write the configuration
        #[arg(short, long, default_value = "routedoc.yaml")]
        path: PathBuf,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if the configuration or route table cannot be loaded,
/// or if generation fails fatally (the previous output is left untouched).
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            routes,
            config,
            markdown_dir,
            collection_file,
            seed,
        } => {
            let mut config = match config {
                Some(path) => GeneratorConfig::from_yaml_file(&path)?,
                None => GeneratorConfig::default(),
            };
            if let Some(dir) = markdown_dir {
                config.output.markdown_dir = dir;
            }
            if let Some(file) = collection_file {
                config.output.collection_file = file;
            }
            if let Some(seed) = seed {
                config.faker_seed = seed;
            }

            let content = std::fs::read_to_string(&routes)
                .with_context(|| format!("failed to read route table {}", routes.display()))?;
            let route_file: RouteFile = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse route table {}", routes.display()))?;
            let table = route_file.into_table()?;

            Generator::new(config).run(&table)?;
            Ok(())
        }
        Commands::Init { path } => {
            if path.exists() {
                anyhow::bail!("{} already exists", path.display());
            }
            std::fs::write(&path, STARTER_CONFIG)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote starter configuration to {}", path.display());
            Ok(())
        }
    }
}
