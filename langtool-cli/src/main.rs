use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};
use langtool_cli::{
    Config, run_export_command, run_import_command,
    validation::{validate_languages, validate_project_root},
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Moves game text between the project files and gettext PO catalogs.
#[derive(Parser, Debug)]
#[command(name = "langtool", author, version, about, long_about = None)]
struct Args {
    /// Export game text into lang/<code>/*.po
    #[arg(short = 'e', long = "export", conflicts_with = "import")]
    export: bool,

    /// Import translated catalogs back into the game
    #[arg(short = 'i', long = "import")]
    import: bool,

    /// Project root directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Configuration file (defaults to langtool.toml in the project root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for store text and achievements (defaults to ~/Downloads)
    #[arg(long)]
    downloads: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Language codes to process instead of the configured list
    languages: Vec<String>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn fail(message: impl std::fmt::Display, code: i32) -> ! {
    eprintln!("❌ Error: {}", message);
    std::process::exit(code);
}

fn main() {
    let args = Args::parse();

    if !args.export && !args.import {
        // Nothing to do: show usage and leave successfully.
        let _ = Args::command().print_help();
        println!();
        return;
    }

    init_tracing(args.verbose);

    if let Err(e) = validate_project_root(&args.root) {
        fail(e, 1);
    }

    let mut config = match Config::load(&args.root, args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(&e, e.exit_code()),
    };
    if let Some(downloads) = args.downloads {
        config.downloads = Some(downloads);
    }
    let languages = if args.languages.is_empty() {
        config.languages.clone()
    } else {
        args.languages
    };
    if let Err(e) = validate_languages(&languages) {
        fail(e, 1);
    }

    let result = if args.export {
        run_export_command(&config, &languages)
    } else {
        config
            .downloads_dir()
            .and_then(|downloads| run_import_command(&config, &languages, &downloads))
    };

    if let Err(e) = result {
        fail(&e, e.exit_code());
    }
}
