use clap::{Parser, Subcommand};
use exifmap::{config, export, extract, output};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "exifmap")]
#[command(about = "Inspect image EXIF metadata, GPS location and CSV export")]
#[command(long_about = "\
Inspect image EXIF metadata, GPS location and CSV export

Reads one image, lists its EXIF tags by name, converts GPS coordinates to
decimal degrees with a map link, and exports the tag table as CSV.

Outcomes:
  Tags + GPS      table, coordinates (6 decimals) and map link
  Tags, no GPS    table and 'No GPS location data found in this image.'
  No EXIF         'No EXIF metadata found in this image.' (nothing exported)

Run 'exifmap gen-config' to generate a documented exifmap.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./exifmap.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log diagnostics (GPS failure reasons, tag counts) to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the tag table and GPS location of an image
    Show {
        /// Image file
        image: PathBuf,
        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export the tag table as CSV
    Export {
        /// Image file
        image: PathBuf,
        /// Destination file, '-' for stdout (default: export.file_name from config)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a stock exifmap.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Show { image, json } => {
            let app_config = load_app_config(cli.config.as_deref())?;
            let report = extract::extract_file(&image, &app_config.input.extensions)?;
            if json {
                let view = report.to_json_view();
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                output::print_show_output(&report, &app_config);
            }
        }
        Command::Export {
            image,
            output: destination,
        } => {
            let app_config = load_app_config(cli.config.as_deref())?;
            let report = extract::extract_file(&image, &app_config.input.extensions)?;
            let Some(tags) = report.tags() else {
                for notice in report.notices() {
                    println!("{}", output::format_notice(notice));
                }
                return Ok(());
            };
            let destination =
                destination.unwrap_or_else(|| PathBuf::from(&app_config.export.file_name));
            if destination == Path::new("-") {
                let artifact = export::artifact(tags, &app_config.export.file_name)?;
                let mut handle = std::io::stdout().lock();
                handle.write_all(&artifact.bytes)?;
                handle.flush()?;
            } else {
                export::export_to_path(tags, &destination)?;
                output::print_export_output(tags.len(), &destination);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Resolve config relative to the working directory.
fn load_app_config(explicit: Option<&Path>) -> Result<config::AppConfig, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    Ok(config::load_config(explicit, &cwd)?)
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables debug output for this
/// crate and `-q` silences everything below error.
fn init_tracing(verbose: bool, quiet: bool) {
    let default = if verbose {
        "warn,exifmap=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
