use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use prodmix_form::{parse_dimensions, ProblemFile, Report, Session};
use prodmix_solver::{EqualityMode, Solver};

#[derive(Parser)]
#[command(name = "prodmix")]
#[command(about = "Find the most profitable product mix with linear programming", long_about = None)]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem file and print the optimal mix
    Solve {
        /// JSON problem file
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// How "=" constraints are handed to the solver
        #[arg(short, long, value_enum, default_value_t = Equality::Both)]
        equality: Equality,
    },
    /// Enter a problem field by field on the terminal
    Interactive {
        /// How "=" constraints are handed to the solver
        #[arg(short, long, value_enum, default_value_t = Equality::Both)]
        equality: Equality,
    },
    /// Print a blank problem file to fill in
    Template {
        /// Number of products
        #[arg(short, long)]
        products: String,
        /// Number of constraints
        #[arg(short, long)]
        constraints: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Equality {
    /// Enforce both directions of an equality
    Both,
    /// Treat an equality as an upper bound only
    UpperOnly,
}

impl From<Equality> for EqualityMode {
    fn from(e: Equality) -> Self {
        match e {
            Equality::Both => EqualityMode::Both,
            Equality::UpperOnly => EqualityMode::UpperOnly,
        }
    }
}

fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = setup_logger(level) {
        eprintln!("Error setting up logging: {}", e);
    }

    match cli.command {
        Commands::Solve {
            file,
            format,
            equality,
        } => {
            let problem = match ProblemFile::load(&file).and_then(|f| Ok(f.to_problem()?)) {
                Ok(p) => p,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };

            let solution = Solver::new().with_equality_mode(equality.into()).solve(&problem);
            let report = Report::new(&problem, &solution);

            match format {
                Format::Text => print!("{}", report),
                Format::Json => match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }
                },
            }

            if !report.is_optimal() {
                std::process::exit(1);
            }
        }
        Commands::Interactive { equality } => {
            let mut session =
                Session::new(io::stdin().lock(), io::stdout()).with_equality_mode(equality.into());
            if let Err(e) = session.run() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Template {
            products,
            constraints,
        } => {
            let dims = match parse_dimensions(&products, &constraints) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            };
            match serde_json::to_string_pretty(&ProblemFile::template(dims)) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
