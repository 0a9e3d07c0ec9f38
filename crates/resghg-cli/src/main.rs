/// Command-line front end for the reservoir GHG emissions toolkit.
///
/// Subcommands: `analyze` runs the full pipeline for one reservoir,
/// `climate` resolves the climate region for a coordinate, `draft`
/// saves and lists analysis drafts.
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use resghg_core::climate::latitude::ClimateBand;
use resghg_core::climate::resolver::{resolve, ClimateObservation, ZoneSelection};
use resghg_core::climate::zone_defaults;
use resghg_core::drafts::{self, Draft, DraftStatus};
use resghg_core::emissions::factors::baseline;
use resghg_core::emissions::trophic::TrophicStatus;
use resghg_core::report;
use resghg_core::{coords, run_analysis, AnalysisRequest};

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "resghg", about = "Reservoir greenhouse-gas emission assessment")]
struct Cli {
    /// Seed for the Monte Carlo simulations (omit for entropy).
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full emission analysis for one reservoir.
    Analyze(AnalyzeArgs),
    /// Resolve the climate region for a coordinate.
    Climate(ClimateArgs),
    /// Save and list analysis drafts.
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Read the full request from a JSON file instead of flags.
    #[arg(long)]
    request: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    longitude: Option<f64>,

    /// Surface area in km².
    #[arg(long)]
    surface_area: Option<f64>,

    /// Reservoir age in years.
    #[arg(long)]
    age: Option<f64>,

    /// Trophic status (oligotrophic, mesotrophic, eutrophic, hypereutrophic).
    #[arg(long)]
    trophic: Option<String>,

    /// Climate selection: "auto", a coarse band, or a Köppen code.
    #[arg(long, default_value = "auto")]
    region: String,

    #[arg(long, default_value = "1000")]
    iterations: u32,

    /// Skip the Monte Carlo uncertainty analysis.
    #[arg(long)]
    no_uncertainty: bool,

    /// Skip the sensitivity analysis.
    #[arg(long)]
    no_sensitivity: bool,

    /// Emit the response as JSON instead of the text report.
    #[arg(long)]
    json: bool,

    /// Record the submitted request in this draft store.
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ClimateArgs {
    #[arg(allow_hyphen_values = true)]
    latitude: f64,

    #[arg(allow_hyphen_values = true)]
    longitude: f64,

    /// Climate selection: "auto", a coarse band, or a Köppen code.
    #[arg(long, default_value = "auto")]
    region: String,
}

#[derive(Subcommand, Debug)]
enum DraftCommand {
    /// Append a request JSON file to the draft store.
    Save {
        request: PathBuf,
        #[arg(long, default_value = "drafts.jsonl")]
        store: PathBuf,
    },
    /// List saved drafts, oldest first.
    List {
        #[arg(long, default_value = "drafts.jsonl")]
        store: PathBuf,
    },
}

// ── Subcommands ──────────────────────────────────────────────────────────────

fn parse_trophic(s: &str) -> Result<TrophicStatus> {
    match s.to_ascii_lowercase().as_str() {
        "oligotrophic" => Ok(TrophicStatus::Oligotrophic),
        "mesotrophic" => Ok(TrophicStatus::Mesotrophic),
        "eutrophic" => Ok(TrophicStatus::Eutrophic),
        "hypereutrophic" => Ok(TrophicStatus::Hypereutrophic),
        other => bail!("unknown trophic status {other:?}"),
    }
}

fn parse_selection(s: &str) -> Result<ZoneSelection> {
    ZoneSelection::parse(s).with_context(|| format!("unknown climate selection {s:?}"))
}

fn build_request(args: &AnalyzeArgs) -> Result<AnalysisRequest> {
    if let Some(path) = &args.request {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading request {}", path.display()))?;
        return serde_json::from_str(&text).context("parsing request JSON");
    }

    let (Some(latitude), Some(longitude), Some(surface_area)) =
        (args.latitude, args.longitude, args.surface_area)
    else {
        bail!("--latitude, --longitude and --surface-area are required without --request");
    };

    let c = coords::normalize(latitude, longitude);
    let selection = parse_selection(&args.region)?;
    let climate_region_override = match selection {
        ZoneSelection::Auto => None,
        _ => Some(resolve(
            selection,
            Some(&ClimateObservation::from_latitude(c.lat)),
        )),
    };
    let trophic_status = args.trophic.as_deref().map(parse_trophic).transpose()?;

    Ok(AnalysisRequest {
        project_name: None,
        latitude: c.lat,
        longitude: c.lon,
        surface_area,
        reservoir_age: args.age,
        mean_depth: None,
        water_quality: None,
        trophic_status,
        climate_region_override,
        custom_ch4_ef: None,
        custom_co2_ef: None,
        custom_n2o_ef: None,
        run_uncertainty: !args.no_uncertainty,
        run_sensitivity: !args.no_sensitivity,
        uncertainty_iterations: args.iterations,
    })
}

fn cmd_analyze(args: &AnalyzeArgs, seed: Option<u64>) -> Result<()> {
    let request = build_request(args)?;
    tracing::info!(
        lat = request.latitude,
        lon = request.longitude,
        area_km2 = request.surface_area,
        iterations = request.uncertainty_iterations,
        "running analysis"
    );
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let response = run_analysis(&request, &mut rng)?;
    if let Some(store) = &args.store {
        drafts::append(store, &Draft::submitted(request))?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", report::render(&response));
    }
    Ok(())
}

fn cmd_climate(args: &ClimateArgs) -> Result<()> {
    let c = coords::normalize(args.latitude, args.longitude);
    let selection = parse_selection(&args.region)?;
    let observation = ClimateObservation::from_latitude(c.lat);
    let zone = resolve(selection, Some(&observation));
    let defaults = zone_defaults(zone);
    let band = ClimateBand::from_latitude(c.lat);
    let ef = baseline(band);
    println!("Coordinates:     {:.4}, {:.4}", c.lat, c.lon);
    println!("Climate region:  {} ({})", zone.name_en(), zone.name_cn());
    println!("Latitude band:   {}", band.name());
    println!(
        "Baseline factors (kg/km²/yr): CH4 {}, CO2 {}, N2O {}",
        ef.ch4, ef.co2, ef.n2o
    );
    println!(
        "Form defaults:   surface area {} km², mean depth {} m",
        defaults.surface_area, defaults.mean_depth
    );
    Ok(())
}

fn cmd_draft(command: &DraftCommand) -> Result<()> {
    match command {
        DraftCommand::Save { request, store } => {
            let text = fs::read_to_string(request)
                .with_context(|| format!("reading request {}", request.display()))?;
            let request: AnalysisRequest =
                serde_json::from_str(&text).context("parsing request JSON")?;
            if let Err(errors) = request.validate() {
                for e in &errors {
                    eprintln!("warning: {e}");
                }
            }
            drafts::append(store, &Draft::new(request))?;
            println!("Draft saved to {}", store.display());
        }
        DraftCommand::List { store } => {
            let drafts = drafts::load(store)?;
            if drafts.is_empty() {
                println!("No drafts in {}", store.display());
                return Ok(());
            }
            for (i, draft) in drafts.iter().enumerate() {
                let name = draft.request.project_name.as_deref().unwrap_or("(unnamed)");
                let status = match draft.status {
                    DraftStatus::Saved => "saved",
                    DraftStatus::Submitted => "submitted",
                };
                println!(
                    "{:>3}. {}  [{status}]  {}  ({:.4}, {:.4})  {} km²",
                    i + 1,
                    draft.created_at.format("%Y-%m-%d %H:%M"),
                    name,
                    draft.request.latitude,
                    draft.request.longitude,
                    draft.request.surface_area,
                );
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Analyze(args) => cmd_analyze(args, cli.seed),
        Command::Climate(args) => cmd_climate(args),
        Command::Draft { command } => cmd_draft(command),
    }
}
