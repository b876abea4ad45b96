//! xml2csv CLI - worksheet XML to CSV conversion tool

mod logger;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::{Path, PathBuf};
use xml2csv::prelude::*;

#[derive(Parser)]
#[command(name = "xml2csv")]
#[command(
    author,
    version,
    about = "Convert a worksheet XML document (with optional shared strings) to CSV",
    after_help = "Examples:\n  xml2csv sheet.xml sharedStrings.xml output.csv\n  xml2csv sheet.xml output.csv   (without shared strings)"
)]
struct Cli {
    /// WORKSHEET [SHARED_STRINGS] OUTPUT (use '-' as OUTPUT for stdout)
    #[arg(value_name = "PATHS", num_args = 2..=3, required = true)]
    paths: Vec<PathBuf>,

    /// Field delimiter
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Terminate rows with CRLF instead of LF
    #[arg(long)]
    crlf: bool,

    /// Decode Excel _xHHHH_ escapes in string values
    #[arg(long)]
    decode_escapes: bool,

    /// Show debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show errors
    #[arg(short, long)]
    quiet: bool,
}

/// Input and output locations, as given on the command line
struct Invocation {
    worksheet: PathBuf,
    shared_strings: Option<PathBuf>,
    output: PathBuf,
}

impl Invocation {
    fn from_paths(paths: &[PathBuf]) -> Result<Self> {
        match paths {
            [worksheet, output] => Ok(Self {
                worksheet: worksheet.clone(),
                shared_strings: None,
                output: output.clone(),
            }),
            [worksheet, shared_strings, output] => Ok(Self {
                worksheet: worksheet.clone(),
                shared_strings: Some(shared_strings.clone()),
                output: output.clone(),
            }),
            _ => bail!("expected WORKSHEET [SHARED_STRINGS] OUTPUT"),
        }
    }

    fn writes_stdout(&self) -> bool {
        self.output == Path::new("-")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };
    logger::init(level);

    let invocation = Invocation::from_paths(&cli.paths)?;
    let options = convert_options(&cli)?;
    run(&invocation, options)
}

fn convert_options(cli: &Cli) -> Result<ConvertOptions> {
    if !cli.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", cli.delimiter);
    }

    Ok(ConvertOptions {
        read: ReadOptions::default().with_decode_escapes(cli.decode_escapes),
        write: CsvWriteOptions {
            delimiter: cli.delimiter as u8,
            line_terminator: if cli.crlf {
                LineTerminator::CRLF
            } else {
                LineTerminator::LF
            },
            ..CsvWriteOptions::default()
        },
    })
}

fn run(invocation: &Invocation, options: ConvertOptions) -> Result<()> {
    let converter = Converter::new(options);
    let worksheet = invocation.worksheet.as_path();
    let shared_strings = invocation.shared_strings.as_deref();

    let report = if invocation.writes_stdout() {
        converter
            .convert_to_writer(worksheet, shared_strings, io::stdout().lock())
            .context("Failed to convert worksheet")?
    } else {
        converter
            .convert_to_file(worksheet, shared_strings, &invocation.output)
            .with_context(|| {
                format!(
                    "Failed to convert '{}' to '{}'",
                    worksheet.display(),
                    invocation.output.display()
                )
            })?
    };

    log::debug!(
        "{} cells, {} shared strings, {} hyperlink overrides",
        report.cells,
        report.shared_strings,
        report.hyperlinks
    );
    log::info!("Dimensions: {}", report);

    Ok(())
}
