use crate::tml::{self, GeneratorOptions, TmlDocument};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

/// Serialization format for generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Yaml,
    Json,
}

impl OutputFormat {
    fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("unknown output format: {}. Valid options: yaml, json", s),
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "tml",
            OutputFormat::Json => "json",
        }
    }

    fn render(self, document: &TmlDocument) -> anyhow::Result<String> {
        Ok(match self {
            OutputFormat::Yaml => serde_yaml::to_string(document)?,
            OutputFormat::Json => {
                let mut rendered = serde_json::to_string_pretty(document)?;
                rendered.push('\n');
                rendered
            }
        })
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    file: PathBuf,
    name: Option<String>,
    output: PathBuf,
    format: String,
    db: Option<String>,
    schema: Option<String>,
    suffix: Option<String>,
    config: Option<PathBuf>,
    dry_run: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("input file does not exist: {}", file.display());
    }

    let format = OutputFormat::parse(&format)?;

    let mut options = match config {
        Some(path) => GeneratorOptions::from_yaml_file(&path)?,
        None => GeneratorOptions::default(),
    };
    if let Some(db) = db {
        options.db = db;
    }
    if let Some(schema) = schema {
        options.schema = schema;
    }
    if let Some(suffix) = suffix {
        options.suffix = suffix;
    }

    let worksheet_name = match name {
        Some(n) => n,
        None => file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "worksheet".to_string()),
    };

    let diagram_text = fs::read_to_string(&file)?;

    let start_time = Instant::now();
    let documents = tml::generate_with(&diagram_text, &worksheet_name, &options);
    let elapsed = start_time.elapsed();

    if dry_run {
        println!("Dry run: {} documents would be written:", documents.len());
        for key in documents.keys() {
            println!("  {}/{}.{}", output.display(), key, format.extension());
        }
        return Ok(());
    }

    fs::create_dir_all(&output)?;

    for (key, document) in &documents {
        let rendered = format.render(document)?;
        let path = output.join(format!("{}.{}", key, format.extension()));
        fs::write(&path, rendered)?;
        if verbose {
            println!("  wrote {}", path.display());
        }
    }

    println!(
        "✓ Generated {} documents in {:.3?} → {}",
        documents.len(),
        elapsed,
        output.display()
    );

    Ok(())
}
