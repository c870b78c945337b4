use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use fungidb_orthologs::api;
use fungidb_orthologs::client::FungidbHttpClient;
use fungidb_orthologs::config::{Settings, SettingsLoader};
use fungidb_orthologs::domain::OrganismKey;
use fungidb_orthologs::error::OrthologError;
use fungidb_orthologs::output::{JsonOutput, TsvOutput};
use fungidb_orthologs::service::OrthologService;

#[derive(Parser)]
#[command(name = "fungidb-orthologs")]
#[command(about = "Fetch orthologs from FungiDB for fungal genomes.")]
#[command(version, author)]
struct Cli {
    /// JSON settings file (endpoints, timeouts)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "List all available FungiDB genomes")]
    ListGenomes(ListArgs),
    #[command(about = "Extract orthologs from target genome to reference genomes")]
    Extract(ExtractArgs),
    #[command(about = "Run the REST API")]
    Serve(ServeArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Print `{"genomes": [...]}` instead of one key per line
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ExtractArgs {
    /// Target genome (FungiDB organism key, e.g. AfumigatusA1163). Required if --fasta not given.
    #[arg(long, short = 't')]
    target: Option<String>,

    /// Reference genomes to extract orthologs from (e.g. CalbicansSC5314 ScerevisiaeS288C Spombe972h)
    #[arg(long, short = 'r', num_args = 1..)]
    references: Vec<String>,

    /// Path to CDS/protein FASTA. If given, the target organism can be inferred from locus_tag.
    #[arg(long = "fasta", short = 'f')]
    fasta_path: Option<PathBuf>,

    /// Write results to TSV file
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 8000)]
    port: u16,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = SettingsLoader::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::ListGenomes(args) => run_list_genomes(args, &settings),
        Commands::Extract(args) => run_extract(args, &settings),
        Commands::Serve(args) => api::serve(settings, &args.host, args.port).into_diagnostic(),
    }
}

fn run_list_genomes(args: ListArgs, settings: &Settings) -> miette::Result<()> {
    let service = OrthologService::new(FungidbHttpClient::new(settings)?);
    let listing = service.list_genomes()?;
    if args.json {
        JsonOutput::print(&listing).into_diagnostic()?;
    } else {
        for genome in &listing.genomes {
            println!("{genome}");
        }
    }
    eprintln!("\nTotal: {} genomes", listing.genomes.len());
    Ok(())
}

fn run_extract(args: ExtractArgs, settings: &Settings) -> miette::Result<()> {
    if args.references.is_empty() {
        return Err(OrthologError::InvalidRequest(
            "Specify at least one reference genome with --references".to_string(),
        )
        .into());
    }

    let service = OrthologService::new(FungidbHttpClient::new(settings)?);
    let (table, organism) = match &args.fasta_path {
        Some(fasta_path) => {
            let path = if fasta_path.is_absolute() {
                fasta_path.clone()
            } else {
                std::env::current_dir().into_diagnostic()?.join(fasta_path)
            };
            if !path.exists() {
                return Err(OrthologError::FastaNotFound(fasta_path.clone()).into());
            }
            let result = service.get_orthologs_for_genome(
                &path,
                args.target.as_deref(),
                Some(args.references.as_slice()),
            )?;
            eprintln!("Target organism (from FASTA): {}", result.organism);
            (result.table, result.organism)
        }
        None => {
            let Some(target) = args.target.as_deref() else {
                return Err(OrthologError::InvalidRequest(
                    "Specify --target when not using --fasta".to_string(),
                )
                .into());
            };
            let target: OrganismKey = target.parse()?;
            let table =
                service.get_orthologs_by_organism(target.as_str(), &args.references, None)?;
            eprintln!("Target organism: {target}");
            (table, target.to_string())
        }
    };

    tracing::debug!("extract finished for {organism}");
    eprintln!("Reference genomes: {}", args.references.join(", "));
    eprintln!("Ortholog rows: {}", table.len());

    match &args.output {
        Some(output) => {
            TsvOutput::write_file(&table, output)?;
            eprintln!("Wrote {}", output.display());
        }
        None => TsvOutput::print(&table)?,
    }
    Ok(())
}
