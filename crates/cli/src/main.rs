#![warn(clippy::pedantic)]

mod logger;
mod report;
mod settings;

use std::{
    borrow::Cow,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use liftplan_domain::{self as domain, Catalog};
use liftplan_storage::{self as storage, SeedData, SqlScript, Source, catalog::CatalogFile};
use log::{LevelFilter, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{report::Report, settings::Settings};

#[derive(Parser, Debug)]
#[command(
    name = "liftplan",
    about = "Time-boxed workout plan generator",
    long_about = "Generate randomized workout plans from an exercise catalog and export catalogs as SQL seed data"
)]
struct Cli {
    /// JSON settings file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a workout plan
    Plan(PlanArgs),
    /// Write SQL seed data for one or more catalogs
    ExportSeed(ExportArgs),
    /// Print the effective exercise catalog as JSON
    Catalog {
        /// Exercise catalog (defaults to the built-in catalog)
        #[arg(long, value_name = "PATH")]
        catalog: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct PlanArgs {
    /// Exercise catalog (defaults to the built-in catalog)
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Total workout duration in minutes, warmup included
    #[arg(long, value_name = "MIN", value_parser = parse_duration)]
    duration: Option<f64>,

    /// Muscle group and its share of the exercise time, repeat for every group
    #[arg(long = "group", value_name = "NAME=FRACTION", value_parser = parse_group)]
    groups: Vec<(String, f64)>,

    /// Use the plan defaults of the catalog instead of a time split
    #[arg(long)]
    from_defaults: bool,

    /// Seed of the random exercise selection
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Catalog file, optionally prefixed by the name of its plan
    #[arg(long = "source", value_name = "[PLAN NAME=]PATH", value_parser = parse_source, required = true)]
    sources: Vec<SourceArg>,

    /// Output file (defaults to stdout)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
struct SourceArg {
    plan_name: Option<String>,
    path: PathBuf,
}

impl SourceArg {
    fn plan_name(&self) -> String {
        self.plan_name.clone().unwrap_or_else(|| {
            let stem = self
                .path
                .file_stem()
                .map_or_else(|| "catalog".into(), |s| s.to_string_lossy());
            format!("{stem} plan")
        })
    }

    fn description(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map_or_else(|| self.path.to_string_lossy(), |s| s.to_string_lossy());
        format!("Workout plan from {file_name}")
    }
}

fn parse_duration(value: &str) -> Result<f64, String> {
    let duration = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid duration '{value}': {err}"))?;
    if !duration.is_finite() {
        return Err(format!("duration must be a finite number of minutes, got '{value}'"));
    }
    Ok(duration)
}

fn parse_group(value: &str) -> Result<(String, f64), String> {
    let (name, fraction) = value
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=FRACTION, got '{value}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("muscle group must not be empty".to_string());
    }
    let fraction = fraction
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid fraction '{fraction}': {err}"))?;
    if !fraction.is_finite() {
        return Err(format!("fraction must be a finite number, got '{fraction}'"));
    }
    Ok((name.to_string(), fraction))
}

fn parse_source(value: &str) -> Result<SourceArg, String> {
    let (plan_name, path) = match value.split_once('=') {
        Some((name, path)) if !name.trim().is_empty() => (Some(name.trim().to_string()), path),
        Some(_) => return Err(format!("plan name must not be empty in '{value}'")),
        None => (None, value),
    };
    if path.is_empty() {
        return Err(format!("missing path in '{value}'"));
    }
    Ok(SourceArg {
        plan_name,
        path: PathBuf::from(path),
    })
}

fn log_level(verbose: u8, configured: LevelFilter) -> LevelFilter {
    let requested = match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    requested.max(configured)
}

fn load_catalog(path: Option<&Path>) -> Result<Cow<'static, Catalog>> {
    match path {
        Some(path) => Ok(Cow::Owned(storage::load_catalog(path).with_context(
            || format!("failed to load catalog {}", path.display()),
        )?)),
        None => Ok(Cow::Borrowed(Catalog::builtin())),
    }
}

impl PlanArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(catalog) = &self.catalog {
            settings.catalog = Some(catalog.clone());
        }
        if let Some(duration) = self.duration {
            settings.duration_minutes = duration;
        }
        if !self.groups.is_empty() {
            settings.set_groups(&self.groups);
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
    }
}

fn render_plan<R: Rng>(
    settings: &Settings,
    from_defaults: bool,
    json: bool,
    rng: &mut R,
) -> Result<String> {
    let catalog = load_catalog(settings.catalog.as_deref())?;

    let plan = if from_defaults {
        if catalog.defaults().is_empty() {
            bail!("catalog has no plan defaults");
        }
        domain::generate_from_defaults(catalog.defaults(), &catalog, rng)?
    } else {
        let parameters = settings.plan_parameters();
        info!(
            "generating {} minute plan for {}",
            parameters.duration_minutes,
            parameters.muscle_groups.join(", ")
        );
        domain::generate(&parameters, &catalog, rng)?
    };

    if json {
        Ok(storage::plan::to_json(&plan)?)
    } else {
        Ok(Report(&plan).to_string())
    }
}

fn export_seed(sources: &[SourceArg], writer: impl Write) -> Result<SeedData> {
    let catalogs = sources
        .iter()
        .map(|source| {
            storage::load_catalog(&source.path)
                .with_context(|| format!("failed to load catalog {}", source.path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let sources = sources
        .iter()
        .zip(&catalogs)
        .map(|(source, catalog)| Source {
            plan_name: source.plan_name(),
            description: source.description(),
            catalog,
        })
        .collect::<Vec<_>>();

    let data = SeedData::from_sources(&sources);
    let mut script = SqlScript::new(writer);
    data.apply(&mut script)
        .context("failed to write seed script")?;
    script
        .into_inner()
        .flush()
        .context("failed to write seed script")?;

    info!(
        "exported {} tags, {} exercises, {} plans and {} exercise-plan relationships",
        data.tags.len(),
        data.exercises.len(),
        data.plans.len(),
        data.exercise_plan_links()
    );

    Ok(data)
}

fn run(cli: Cli) -> Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    logger::init(log_level(cli.verbose, settings.log_level))
        .context("failed to initialize logging")?;

    match cli.command {
        Command::Plan(args) => {
            args.apply(&mut settings);
            let output = match settings.seed {
                Some(seed) => render_plan(
                    &settings,
                    args.from_defaults,
                    args.json,
                    &mut StdRng::seed_from_u64(seed),
                )?,
                None => render_plan(
                    &settings,
                    args.from_defaults,
                    args.json,
                    &mut StdRng::from_entropy(),
                )?,
            };
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", output.trim_end())?;
        }
        Command::ExportSeed(args) => match &args.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create {}", path.display()))?;
                let data = export_seed(&args.sources, BufWriter::new(file))?;
                println!("Generated {} with:", path.display());
                println!("  - {} tags", data.tags.len());
                println!("  - {} exercises", data.exercises.len());
                println!("  - {} plans", data.plans.len());
                println!(
                    "  - {} exercise-plan relationships",
                    data.exercise_plan_links()
                );
            }
            None => {
                export_seed(&args.sources, io::stdout().lock())?;
            }
        },
        Command::Catalog { catalog } => {
            let catalog = load_catalog(catalog.or(settings.catalog).as_deref())?;
            let json = serde_json::to_string_pretty(&CatalogFile::from(catalog.as_ref()))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
