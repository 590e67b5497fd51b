mod generate;
mod inspect;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tml-gen")]
#[command(version)]
#[command(about = "Generate TML table and worksheet documents from ER diagram notation", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate TML documents from an ER diagram file
    Generate {
        /// Input diagram file (mermaid erDiagram notation)
        file: PathBuf,

        /// Worksheet name (default: input file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory for generated documents
        #[arg(short, long, default_value = "output")]
        output: PathBuf,

        /// Output format: yaml or json
        #[arg(short, long, default_value = "yaml")]
        format: String,

        /// Physical database name bound into table documents
        #[arg(long)]
        db: Option<String>,

        /// Schema name bound into table documents
        #[arg(long)]
        schema: Option<String>,

        /// Tag appended to table names to form object identifiers
        #[arg(long)]
        suffix: Option<String>,

        /// YAML config file with generator options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Preview without writing files (dry run)
        #[arg(long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Inspect a diagram: parsed tables, joins, roots, and join paths
    Inspect {
        /// Input diagram file (mermaid erDiagram notation)
        file: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            file,
            name,
            output,
            format,
            db,
            schema,
            suffix,
            config,
            dry_run,
            verbose,
        } => generate::run(
            file, name, output, format, db, schema, suffix, config, dry_run, verbose,
        ),
        Commands::Inspect { file } => inspect::run(file),
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "tml-gen", &mut io::stdout());
            Ok(())
        }
    }
}
