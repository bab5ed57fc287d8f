use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use dbd_cbr::ingest::{
    self, CaseSynthesizer, QuerySubmission, SampledSynthesizer, ThresholdSynthesizer,
};
use dbd_cbr::{Case, CaseStore, CbrConfig, CbrEngine, DiagnosisReport};
use log::{info, warn};

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

#[derive(Debug, Parser)]
#[command(name = "dbd-cbr")]
#[command(about = "Case-based screening for dengue hemorrhagic fever")]
#[command(after_help = "Without --cases or --lab-records a seeded simulated case base is used.")]
struct Cli {
    /// Query submission (.json)
    query: PathBuf,

    /// Normalized case base (.json or .parquet)
    #[arg(long, conflicts_with = "lab_records")]
    cases: Option<PathBuf>,

    /// Hematology records to synthesize cases from (.json or .parquet)
    #[arg(long)]
    lab_records: Option<PathBuf>,

    /// Synthesize with the seeded sampled strategy (lab-aware)
    #[arg(long, requires = "lab_records")]
    sampled: bool,

    /// Attach lab flags when using the threshold strategy
    #[arg(long, requires = "lab_records")]
    with_labs: bool,

    /// Seed for simulation and sampling
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of similar cases used for voting
    #[arg(long, env = "CBR_TOP_K")]
    top_k: Option<usize>,

    /// Write the loaded case base (.json or .parquet)
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn load_cases(cli: &Cli) -> anyhow::Result<Vec<Case>> {
    if let Some(path) = &cli.cases {
        return ingest::load_case_base(path)
            .with_context(|| format!("Failed to load case base {}", path.display()));
    }

    if let Some(path) = &cli.lab_records {
        let records = ingest::load_lab_records(path)
            .with_context(|| format!("Failed to load lab records {}", path.display()))?;
        let mut synthesizer: Box<dyn CaseSynthesizer> = if cli.sampled {
            Box::new(SampledSynthesizer::new(cli.seed))
        } else {
            Box::new(ThresholdSynthesizer::new().with_lab_flags(cli.with_labs))
        };
        return Ok(ingest::synthesize_cases(&records, synthesizer.as_mut()));
    }

    warn!(
        "No case base given, using the simulated case base (seed {})",
        cli.seed
    );
    Ok(ingest::simulated_case_base(cli.seed))
}

fn export_cases(store: &CaseStore, path: &Path) -> anyhow::Result<()> {
    let result = match ingest::DataFormat::from_path(path)? {
        ingest::DataFormat::Json => ingest::write_case_base_json(store.all_cases(), path),
        ingest::DataFormat::Parquet => ingest::write_case_base_parquet(store.all_cases(), path),
    };
    result.with_context(|| format!("Failed to export case base to {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let start = Instant::now();
    let store = CaseStore::build(load_cases(&cli)?).context("Invalid case base")?;
    for (diagnosis, count) in store.label_counts() {
        info!("  {diagnosis}: {count} cases");
    }

    if let Some(path) = &cli.export {
        export_cases(&store, path)?;
    }

    let mut builder = CbrConfig::builder();
    if let Some(top_k) = cli.top_k {
        builder = builder.top_k(top_k);
    }
    let config = builder.build();
    info!("{config}");

    let submission = QuerySubmission::from_path(&cli.query)
        .with_context(|| format!("Failed to read query {}", cli.query.display()))?;
    let query = submission.to_query();

    let engine = CbrEngine::new(&store, config)?;
    let outcome = engine.diagnose(&query);
    let report = DiagnosisReport::new(submission.patient(), &query, outcome);
    info!("Reasoning cycle finished in {:?}", start.elapsed());

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }

    Ok(())
}
