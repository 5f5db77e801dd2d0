use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use wide_evo::deps::{self, Tool};
use wide_evo::{config, output, process};

#[derive(Parser)]
#[command(name = "wide-evo")]
#[command(about = "Prepare photos for printing on an instax Wide Link printer")]
#[command(long_about = "\
Prepare photos for printing on an instax Wide Link printer

The printer app only accepts photos that look like they came straight off a
supported Fujifilm camera. For every input photo wide-evo:

  1. center-crops it to 4:3 (landscape) or 3:4 (portrait, square),
  2. re-encodes it as JPEG,
  3. copies the camera tags (make, model, serials, lens) from a template
     photo taken with a supported camera,
  4. names it like a camera file: DSCF0001.JPG, DSCF0002.JPG, ...

Existing DSCFNNNN.JPG files in the output directory are never overwritten;
numbering fills the lowest free slot.

Requires ImageMagick 7 (magick) and ExifTool on PATH.

Examples:
  wide-evo photo.png                   # process one photo
  wide-evo *.jpg                       # process many photos
  wide-evo photo.png -o ./prints       # choose the output directory

Run 'wide-evo --gen-config' to print a documented config file.")]
#[command(version)]
struct Cli {
    /// Photos to process, in order
    images: Vec<PathBuf>,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Show per-photo progress and the source → output mapping
    #[arg(short, long)]
    verbose: bool,

    /// Reference photo to copy camera tags from
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a documented stock config file and exit
    #[arg(long)]
    gen_config: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    if cli.images.is_empty() {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    }

    let settings = config::resolve_config(cli.config.as_deref())?.into_settings(cli.template)?;

    deps::probe(&[
        Tool::exiftool(settings.exiftool.as_str()),
        Tool::imagemagick(settings.magick.as_str()),
    ])?;

    if !settings.template.is_file() {
        return Err(format!("template not found: {}", settings.template.display()).into());
    }

    std::fs::create_dir_all(&cli.output)?;

    let verbose = cli.verbose;
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            output::print_process_event(&event, verbose);
        }
    });
    let report = process::process(&settings, &cli.images, &cli.output, Some(tx));
    if printer.join().is_err() {
        return Err("progress printer panicked".into());
    }

    output::print_summary(&report, &absolute(&cli.output), verbose);

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
