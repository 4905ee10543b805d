use std::{
    io::{Write, stdout},
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use common::{BASELINE, ratio::write_ratios};
use eyre::{ContextCompat, Result};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod defaults;
mod report;

use report::{Runner, load_config};

/// Workspace crates that log, filtered at the same level as the binary
const MODULES: &[&str] = &["common", "log_bar"];

#[derive(Parser)]
#[command(version, about = "Charts and baseline ratios for OIDBS benchmark results")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Searched for input files missing from the working directory
    #[arg(long, global = true)]
    fallback_dir: Option<PathBuf>,
    /// Extra tracing directives, ie. log_bar=debug
    #[arg(short, long, global = true)]
    log: Vec<String>,
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every report of a configuration, the built-in one by default
    Run {
        #[arg(short, long)]
        config_file: Option<PathBuf>,
    },
    /// Print the ratio report of one results file
    Ratios {
        #[arg(short, long)]
        input: String,
        #[arg(short, long, default_value = BASELINE)]
        baseline: String,
    },
    /// Print the built-in configuration
    Config,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let _guard = init_logging(&args.log, args.log_file.as_deref())?;

    let command = args.command.unwrap_or(Commands::Run { config_file: None });
    match command {
        Commands::Run { config_file } => {
            let config = load_config(config_file.as_deref())?;
            let runner = Runner::new(&config.settings, args.fallback_dir)?;
            if let Err(err) = runner.run(&config, &mut stdout().lock()) {
                // eyre already reports to stderr, only the log file needs a copy
                if args.log_file.is_some() {
                    error!("{err:#?}");
                }
                return Err(err);
            }
        }
        Commands::Ratios { input, baseline } => {
            let runner = Runner::new(&Default::default(), args.fallback_dir)?;
            let table = runner.load(&input)?;
            let mut out = stdout().lock();
            write_ratios(&mut out, &table, &baseline)?;
            out.flush()?;
        }
        Commands::Config => print!("{}", serde_yml::to_string(&defaults::default_config())?),
    }

    Ok(())
}

fn init_logging(directives: &[String], log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("warn".to_owned());
    let mut env_filter = EnvFilter::new(format!("oidbs_plot={log_level}"));

    for directive in directives {
        env_filter = env_filter.add_directive(directive.parse()?);
    }

    for module in MODULES {
        if !directives.iter().any(|x| x.starts_with(module)) {
            env_filter = env_filter.add_directive(format!("{module}={log_level}").parse()?);
        }
    }

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let name = path.file_name().context("Log file needs a file name")?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            (
                Some(layer().with_ansi(false).with_writer(non_blocking)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact()
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
