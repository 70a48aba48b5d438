use clap::{Parser, Subcommand};
use mhc_json::config::{self, ConvertConfig};
use mhc_json::convert::{self, ConvertOptions};
use mhc_json::output;
use mhc_json::scan::{self, ScanOptions};
use std::path::PathBuf;

/// Flags that narrow or widen the sampling limit.
#[derive(clap::Args, Clone, Default)]
struct LimitArgs {
    /// Convert only the first N selected files
    #[arg(short = 'n', long, conflicts_with_all = ["sample", "no_limit"])]
    limit: Option<usize>,

    /// Convert only the first 10 selected files
    #[arg(long, conflicts_with = "no_limit")]
    sample: bool,

    /// Ignore any limit set in the config file
    #[arg(long)]
    no_limit: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "mhc-json")]
#[command(about = "Convert Matthew Henry's Commentary HTML into per-chapter JSON")]
#[command(long_about = "\
Convert Matthew Henry's Commentary HTML into per-chapter JSON

Input files are named <prefix><book><chapter>.<ext>, e.g. MHC45003.HTM for
Romans chapter 3. Each chapter becomes one record:

  {
    \"reference\": \"Romans 3\",
    \"tradition\": \"reformed\",
    \"author\": \"Matthew Henry\",
    \"source\": \"Commentary on the Whole Bible\",
    \"year\": 1706,
    \"text\": \"...\"
  }

Book introductions (chapter 000) and books outside the catalog are skipped.
A missing source directory is an error rather than an empty result.

Run 'mhc-json gen-config' to print a documented mhc-json.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: mhc-json.toml, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory containing the commentary HTML files (must exist)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output JSON file
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List which files would be converted, without converting them
    Scan(LimitArgs),
    /// Convert the selected files and write the JSON output
    Convert(LimitArgs),
    /// Print a stock mhc-json.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Command::Scan(limit) => {
            let config = resolve_config(&cli, limit)?;
            let report = scan::scan(&config.input.dir, &ScanOptions::from_config(&config))?;
            output::print_scan_output(
                &report,
                &config.input.dir,
                &config.input.pattern().display(),
                config.selection.books,
            );
        }
        Command::Convert(limit) => {
            let config = resolve_config(&cli, limit)?;
            init_thread_pool(&config.processing);

            println!("Parsing Matthew Henry's Commentary");
            println!("{}", "=".repeat(60));

            let report = scan::scan(&config.input.dir, &ScanOptions::from_config(&config))?;
            for line in output::format_convert_header(&report) {
                println!("{}", line);
            }

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_convert_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let converted = convert::convert(
                &report.selected,
                &ConvertOptions::from_config(&config),
                Some(tx),
            );
            if let Err(panic) = printer.join() {
                std::panic::resume_unwind(panic);
            }
            let result = converted?;

            convert::write_records(&config.output.path, &result.records)?;
            output::print_convert_summary(&result, &config.output.path);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file, then apply command-line overrides.
fn resolve_config(cli: &Cli, limit: &LimitArgs) -> Result<ConvertConfig, config::ConfigError> {
    let (path, required) = match &cli.config {
        Some(p) => (p.clone(), true),
        None => (PathBuf::from(config::DEFAULT_CONFIG_FILE), false),
    };
    let mut config = config::load_config(&path, required)?;

    if let Some(source) = &cli.source {
        config.input.dir = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output.path = output.clone();
    }
    if limit.no_limit {
        config.selection.limit = None;
    } else if limit.sample {
        config.selection.limit = Some(config::SAMPLE_LIMIT);
    } else if let Some(n) = limit.limit {
        config.selection.limit = Some(n);
    }

    config.validate()?;
    Ok(config)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
