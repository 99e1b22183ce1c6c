use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use swag_core::config::{self, CONFIG_FILE_NAME, SwagConfig};
use swag_core::ir::SwagSpec;
use swag_core::parse::{self, Document};
use swag_core::{CodeGenerator, Diagnostic, GeneratedFile, transform};
use swag_csharp::type_mapper::type_ref_to_csharp;
use swag_csharp::{CSharpGenerator, CSharpOptions};

#[derive(Parser)]
#[command(name = "swag", about = "Swagger/OpenAPI to C# model and service generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate C# models and services from a Swagger/OpenAPI document
    Generate {
        /// Path to the document (JSON or YAML); defaults to `input` from the config
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory; defaults to `output` from the config
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that a document can be parsed and transformed
    Validate {
        /// Path to the document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the model inventory and service groups of a document
    Inspect {
        /// Path to the document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default `.swag.yaml`
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "swag", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Load `.swag.yaml` from the current directory, if present.
fn try_load_config() -> Result<Option<SwagConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Read and validate a document. `.json` and `.yaml`/`.yml` pick the parser;
/// anything else is tried as JSON first, then YAML.
fn read_document(path: &Path) -> Result<Document> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let document = match ext {
        "json" => parse::from_json(&content)?,
        "yaml" | "yml" => parse::from_yaml(&content)?,
        _ => match parse::from_json(&content) {
            Ok(document) => document,
            Err(json_err) => {
                log::debug!("not JSON ({json_err}), trying YAML");
                parse::from_yaml(&content)?
            }
        },
    };
    Ok(document)
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    eprintln!("{} diagnostics:", diagnostics.len());
    for diagnostic in diagnostics {
        eprintln!("  {diagnostic}");
    }
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let document = read_document(&input)?;
    let spec = transform::transform(&document);

    eprintln!("Generating C# from {} → {}", input.display(), output_dir.display());
    let options = CSharpOptions::from(&cfg);
    let report = CSharpGenerator
        .generate(&spec, &options)
        .map_err(|e| anyhow::anyhow!(e))?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &report.files)?;

    print_diagnostics(&report.diagnostics);
    eprintln!(
        "Generated {} files in {} ({} errors)",
        report.files.len(),
        output_dir.display(),
        report.errors().count()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let document = read_document(&input)?;

    eprintln!(
        "Valid {} document: {}",
        document.dialect().as_str(),
        document.title().unwrap_or("(untitled)")
    );
    if let Some(version) = document.version() {
        eprintln!("  Version: {version}");
    }

    let spec = transform::transform(&document);
    eprintln!("  Models: {}", spec.models.len());
    eprintln!("  Service groups: {}", spec.services.len());
    eprintln!(
        "  Endpoints: {}",
        spec.services.values().map(Vec::len).sum::<usize>()
    );
    print_diagnostics(&spec.diagnostics);

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let document = read_document(&input)?;
    let spec = transform::transform(&document);

    let summary = build_inspect_summary(&spec, &CSharpOptions::from(&cfg));

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &SwagSpec, options: &CSharpOptions) -> serde_json::Value {
    let models: Vec<serde_json::Value> = spec
        .models
        .iter()
        .map(|m| {
            serde_json::json!({
                "name": m.name,
                "kind": m.kind.as_str(),
                "category": m.category,
                "namespace": format!("{}.{}", options.models_namespace, m.namespace_hint().relative()),
            })
        })
        .collect();

    let service_names = options.service_names(&spec.services);
    let services: Vec<serde_json::Value> = spec
        .services
        .iter()
        .zip(service_names)
        .map(|((tag, endpoints), service)| {
            let endpoints: Vec<serde_json::Value> = endpoints
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "method": e.method.as_str(),
                        "url": e.url,
                        "operation_id": e.operation_id,
                        "returns": type_ref_to_csharp(&e.return_type),
                    })
                })
                .collect();
            serde_json::json!({
                "tag": tag,
                "service": service,
                "endpoints": endpoints,
            })
        })
        .collect();

    let diagnostics: Vec<String> = spec.diagnostics.iter().map(ToString::to_string).collect();

    serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "models": models,
        "services": services,
        "diagnostics": diagnostics,
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
