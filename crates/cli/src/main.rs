use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use popdyn_automata::{Automaton, Grid, RuleSweep, RuleTable, Variant};
use popdyn_core::{Identifier, PopulationModel};
use popdyn_models::{
    alzheimer::Alzheimer,
    config::{ModelKind, SimulationConfig},
    effector_target::EffectorTarget,
};
use popdyn_observers::ProgressLogger;
use popdyn_solvers::transient::euler::{Config, Simulation};
use tracing::info;

mod csv;

#[derive(Parser, Debug)]
#[command(
    name = "popdyn",
    version,
    about = "Population dynamics and cellular automaton simulators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a population model and print its trajectory as CSV.
    Simulate {
        /// YAML run description.
        #[arg(short, long)]
        config: PathBuf,
        /// Log the state every this many steps.
        #[arg(long)]
        progress_every: Option<usize>,
    },
    /// Run a model twice, once with one parameter or initial value scaled,
    /// and print one species from both runs side by side.
    Perturb(PerturbArgs),
    /// Evolve one rule and print every generation as a row of 0/1.
    Automaton {
        /// Rule number in 0..=255.
        #[arg(long)]
        rule: u32,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Evolve all 256 rules and print each rule's final density.
    Sweep {
        #[command(flatten)]
        grid: GridArgs,
    },
}

#[derive(Args, Debug)]
struct PerturbArgs {
    /// YAML run description.
    #[arg(short, long)]
    config: PathBuf,
    /// Parameter to scale, e.g. `k` or `alpha3`.
    #[arg(long, conflicts_with = "species", required_unless_present = "species")]
    parameter: Option<String>,
    /// Species whose initial value to scale, e.g. `E` or `NS`.
    #[arg(long)]
    species: Option<String>,
    /// Scale factor.
    #[arg(long, default_value_t = 2.0)]
    factor: f64,
    /// Species to print.
    #[arg(long)]
    observe: String,
}

#[derive(Args, Debug)]
struct GridArgs {
    /// Number of cells.
    #[arg(long, default_value_t = 101)]
    width: usize,
    /// Number of generations to evolve.
    #[arg(long, default_value_t = 50)]
    epochs: usize,
    /// Use the two-generation memory update.
    #[arg(long)]
    memory: bool,
    /// Neighbor distance; defaults to 2 for plain and 1 for memory.
    #[arg(long)]
    reach: Option<usize>,
    /// Seed a random initial grid; without it only the center cell is set.
    #[arg(long)]
    seed: Option<u64>,
}

impl GridArgs {
    fn variant(&self) -> Variant {
        if self.memory {
            Variant::Memory
        } else {
            Variant::Plain
        }
    }

    fn initial(&self) -> Result<Grid> {
        let grid = match self.seed {
            Some(seed) => Grid::seeded(self.width, seed),
            None => Grid::single(self.width, self.width / 2),
        };
        grid.context("invalid initial grid")
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Simulate {
            config,
            progress_every,
        } => {
            let config = load(&config)?;
            match config.model {
                ModelKind::EffectorTarget => {
                    simulate::<EffectorTarget>(&config, progress_every, &mut out)
                }
                ModelKind::Alzheimer => simulate::<Alzheimer>(&config, progress_every, &mut out),
            }?;
        }
        Command::Perturb(args) => {
            let config = load(&args.config)?;
            match config.model {
                ModelKind::EffectorTarget => perturb::<EffectorTarget>(&config, &args, &mut out),
                ModelKind::Alzheimer => perturb::<Alzheimer>(&config, &args, &mut out),
            }?;
        }
        Command::Automaton { rule, grid } => automaton(rule, &grid, &mut out)?,
        Command::Sweep { grid } => sweep(&grid, &mut out)?,
    }

    out.flush().context("failed to write output")?;
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn load(path: &Path) -> Result<SimulationConfig> {
    SimulationConfig::from_path(path)
        .with_context(|| format!("failed to load run description {}", path.display()))
}

fn build<M: PopulationModel>(config: &SimulationConfig) -> Result<Simulation<M>> {
    let model = config.build_model::<M>().context("invalid model parameters")?;
    let initial = config.initial_state().context("invalid initial state")?;
    let schedule = config.schedule().context("invalid perturbation schedule")?;
    let run = Config::new(config.dt(), config.steps()).context("invalid step configuration")?;

    Simulation::new(model, initial, run, &schedule).context("invalid simulation")
}

fn simulate<M: PopulationModel>(
    config: &SimulationConfig,
    progress_every: Option<usize>,
    out: &mut impl Write,
) -> Result<()> {
    let simulation = build::<M>(config)?;
    let solution = match progress_every {
        Some(every) => {
            let logger = ProgressLogger::new(every).labeled(config.model.to_string());
            simulation.observe(logger)
        }
        None => simulation.run(),
    };

    info!(
        model = %config.model,
        steps = solution.steps,
        status = ?solution.status,
        "simulation finished"
    );
    csv::write_trajectory(out, &solution.trajectory).context("failed to write trajectory")
}

fn perturb<M: PopulationModel + Clone>(
    config: &SimulationConfig,
    args: &PerturbArgs,
    out: &mut impl Write,
) -> Result<()> {
    let base = build::<M>(config)?;
    let observed = M::Species::parse(&args.observe)?;
    let factor = args.factor;

    let perturbed = match (&args.parameter, &args.species) {
        (Some(name), None) => {
            let parameter = M::Parameter::parse(name)?;
            let model = base
                .model()
                .derive(parameter, |value| value * factor)
                .with_context(|| format!("cannot scale {name} by {factor}"))?;
            base.with_model(model)
        }
        (None, Some(name)) => {
            let species = M::Species::parse(name)?;
            base.with_initial(base.initial().derive(species, |value| value * factor))
        }
        _ => bail!("pass exactly one of --parameter or --species"),
    };

    let label = args
        .parameter
        .as_deref()
        .or(args.species.as_deref())
        .unwrap_or_default();
    info!(model = %config.model, scaled = label, factor, "comparing runs");

    let base = base.run();
    let perturbed = perturbed.run();
    csv::write_comparison(out, observed, &base.trajectory, &perturbed.trajectory)
        .context("failed to write comparison")
}

fn automaton(rule: u32, args: &GridArgs, out: &mut impl Write) -> Result<()> {
    let rule = RuleTable::from_number(rule)?;
    let mut automaton = Automaton::new(rule, args.variant());
    if let Some(reach) = args.reach {
        automaton = automaton.with_reach(reach)?;
    }

    let history = automaton.evolve(&args.initial()?, args.epochs);
    for grid in history.grids() {
        writeln!(out, "{grid}")?;
    }
    Ok(())
}

fn sweep(args: &GridArgs, out: &mut impl Write) -> Result<()> {
    let mut sweep = RuleSweep::new(args.variant());
    if let Some(reach) = args.reach {
        sweep = sweep.with_reach(reach)?;
    }

    let results = sweep.run(&args.initial()?, args.epochs);
    writeln!(out, "rule,final_density")?;
    for (rule, history) in &results {
        writeln!(out, "{rule},{}", history.last().density())?;
    }
    Ok(())
}
