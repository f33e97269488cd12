//! xlf-sync - keep XLIFF translation files in step with their source file

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use xlf_sync::{MergeOptions, XliffDocument};

#[derive(Parser)]
#[command(name = "xlf-sync")]
#[command(version, about = "Synchronize XLIFF translation files", long_about = None)]
#[command(after_help = "EXAMPLES:
    xlf-sync messages.xlf -l de -t messages.de.xlf -o messages.de.xlf
    xlf-sync messages.xlf -l fr --placeholder TODO > messages.fr.xlf")]
struct Cli {
    /// Freshly extracted source file (XLIFF 1.2 or 2.0)
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Target language code
    #[arg(short, long)]
    lang: String,

    /// Previous translation file to take existing targets from
    #[arg(short, long, value_name = "FILE")]
    target: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// JSON settings file (missingTranslation, preserveTargetOrder)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target text for units without a translation
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Let the extracted unit's attributes keep their order
    #[arg(long)]
    no_preserve_order: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    quiet: bool,

    /// Log merge decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = merge_options(cli)?;

    let source = read_document(&cli.source)?;
    let previous = match &cli.target {
        Some(path) if path.exists() => Some(read_document(path)?),
        _ => None,
    };

    let (output, report) = xlf_sync::sync(&source, previous.as_ref(), &cli.lang, &options)
        .ok_or_else(|| format!("{}: not a valid XLIFF 1.2/2.0 document", cli.source.display()))?;
    let text = output
        .extract()
        .ok_or_else(|| "synchronized document is not valid XLIFF".to_string())?;

    match &cli.output {
        Some(path) => {
            fs::write(path, text).map_err(|e| format!("{}: {e}", path.display()))?;
        }
        None => print!("{text}"),
    }

    if !cli.quiet {
        eprintln!(
            "{} units: {} matched, {} need translation",
            report.total,
            report.matched,
            report.placeholders()
        );
    }
    Ok(())
}

fn merge_options(cli: &Cli) -> Result<MergeOptions, String> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
            MergeOptions::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => MergeOptions::default(),
    };

    if let Some(ref placeholder) = cli.placeholder {
        options.missing_translation = placeholder.clone();
    }
    if cli.no_preserve_order {
        options.preserve_target_order = false;
    }
    Ok(options)
}

fn read_document(path: &Path) -> Result<XliffDocument, String> {
    let bytes = fs::read(path).map_err(|e| format!("{}: {e}", path.display()))?;
    XliffDocument::try_load(&xlf_sync::decode_text(&bytes))
        .map_err(|e| format!("{}: {e}", path.display()))
}
