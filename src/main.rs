//! chase - CLI entry point
//!
//! Simulation of a wolf chasing sheep.

use chase::{Config, RunRecorder, Simulation};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "chase")]
#[command(version)]
#[command(about = "Simulation of a wolf chasing sheep")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run(RunArgs),

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Configuration file (YAML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level; enables logging to the log file
    #[arg(short, long, value_name = "LEVEL", ignore_case = true)]
    log: Option<LogLevel>,

    /// Log file written when a log level is given
    #[arg(long, value_name = "FILE", default_value = "chase.log")]
    log_file: PathBuf,

    /// Maximum number of rounds (overrides the config file)
    #[arg(short, long, value_name = "NUM")]
    rounds: Option<u32>,

    /// Number of sheep (overrides the config file)
    #[arg(short, long, value_name = "NUM")]
    sheep: Option<usize>,

    /// Wait for a key press at the end of each round
    #[arg(short, long)]
    wait: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Output directory for position and alive-count files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    #[value(alias = "warn")]
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Critical => LevelFilter::Error,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run_simulation(args),
        Commands::Init { output } => generate_config(output),
    }
}

fn init_logging(level: Option<LogLevel>, log_file: &Path) -> io::Result<()> {
    match level {
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        }
        Some(level) => {
            let file = File::create(log_file)?;
            env_logger::Builder::new()
                .filter_level(level.into())
                .format(|buf, record| {
                    writeln!(buf, "{} - {} - {}", buf.timestamp(), record.level(), record.args())
                })
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
    }
    Ok(())
}

fn run_simulation(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log, &args.log_file)?;

    let mut config = match &args.config {
        Some(path) => Config::parse_file(path)?,
        None => Config::default(),
    };

    if let Some(rounds) = args.rounds {
        config.simulation.max_rounds = rounds;
    }
    if let Some(sheep) = args.sheep {
        config.simulation.sheep_count = sheep;
    }
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }

    if let Err(e) = config.validate() {
        println!("Argument error: {}", e);
        std::process::exit(1);
    }

    std::fs::create_dir_all(&args.output)?;

    let mut sim = Simulation::new(&config)?;
    log::info!("Using seed: {}", sim.seed());
    println!("{}", sim.start_summary());

    let mut recorder = RunRecorder::in_dir(
        &args.output,
        &config.output.positions_file,
        &config.output.alive_file,
    );
    let stdin = io::stdin();

    while let Some(report) = sim.run_round() {
        println!("{}", report);
        recorder.record(&sim);

        if args.wait {
            print!("Press 'enter' to continue...");
            io::stdout().flush()?;
            let mut line = String::new();
            stdin.lock().read_line(&mut line)?;
        }
    }

    if let Some(reason) = sim.termination() {
        println!("{}", reason);
    }
    println!("Positions: {:?}", recorder.positions_path());
    println!("Alive counts: {:?}", recorder.alive_path());

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
