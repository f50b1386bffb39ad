//! Design My PC - Main entry point
//!
//! Launches the wizard by default; the subcommands expose the same
//! resolver, catalog and export logic for scripting.

use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use designmypc::app::App;
use designmypc::catalog::{self, ComponentBundle, COMPATIBILITY_NOTES};
use designmypc::classifier::{ChatCompleter, ZeroShotClassifier};
use designmypc::cli::{Cli, Commands};
use designmypc::config::AppConfig;
use designmypc::error::{BuildError, Recovery};
use designmypc::export::BuildExport;
use designmypc::logic::{advisor, resolver};
use designmypc::session::{BuildSelection, Session};
use designmypc::{ResolutionSource, StructuredRequest};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fmt::Display;
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Log file used while the wizard owns the terminal
const WIZARD_LOG_FILE: &str = "designmypc.log";

/// Exit status when free-text classification is unavailable
const EXIT_CLASSIFIER_UNAVAILABLE: i32 = 2;

/// Initialize tracing. `RUST_LOG` overrides the default level.
///
/// The wizard draws on stdout, so its logs go to a file in the temp dir;
/// subcommands log to stderr.
fn init_logging(verbose: bool, wizard: bool) {
    let default_level = match (verbose, wizard) {
        (true, _) => "debug",
        (false, true) => "info",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if !wizard {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return;
    }

    let path = std::env::temp_dir().join(WIZARD_LOG_FILE);
    match File::create(&path) {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            tracing_subscriber::fmt().with_writer(std::io::sink).init();
        }
    }
}

/// Print an error and exit with `code`
fn fail(err: impl Display, code: i32) -> ! {
    error!("{}", err);
    eprintln!("✗ {}", err);
    std::process::exit(code)
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let wizard = matches!(cli.command, None | Some(Commands::Wizard { .. }));
    init_logging(cli.verbose, wizard);
    info!("Design My PC starting up");
    debug!("Config path: {:?}", cli.config);

    let mut config = AppConfig::load(cli.config.as_deref())
        .unwrap_or_else(|e| fail(format!("Invalid configuration: {:#}", e), 1));

    match cli.command {
        None => run_wizard(config),
        Some(Commands::Wizard { export_dir }) => {
            if let Some(dir) = export_dir {
                config.export_dir = dir;
            }
            run_wizard(config)
        }
        Some(Commands::Recommend {
            use_case,
            budget,
            preferences,
            export,
            json,
        }) => run_recommend(&config, &use_case, budget, &preferences, export, json),
        Some(Commands::Classify {
            text,
            export,
            json,
            advise,
        }) => run_classify(&config, &text, export, json, advise),
        Some(Commands::Catalog { use_case }) => {
            run_catalog(use_case.as_deref());
            Ok(())
        }
        Some(Commands::Validate { file }) => {
            run_validate(&file);
            Ok(())
        }
    }
}

/// Run the interactive wizard
fn run_wizard(config: AppConfig) -> anyhow::Result<()> {
    debug!("Initializing terminal for wizard");

    enable_raw_mode()?;
    crossterm::execute!(stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config);
    let result = app.run(&mut terminal);

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    if let Some(path) = app.state().session.last_export() {
        println!("✓ Your build was saved to {}", path.display());
    }

    result
}

/// Resolve a structured request and print or export it
fn run_recommend(
    config: &AppConfig,
    use_case: &str,
    budget: f64,
    preferences: &[String],
    export: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let request =
        StructuredRequest::parse(use_case, budget, preferences).unwrap_or_else(|e| fail(e, 1));

    let mut session = Session::new();
    if let Err(e) = session.resolve_structured(&request, &config.tier_policy) {
        fail(e, 1);
    }

    emit(&mut session, export.as_deref(), json)
}

/// Resolve free text through the classifier and print or export it
fn run_classify(
    config: &AppConfig,
    text: &str,
    export: Option<PathBuf>,
    json: bool,
    advise: bool,
) -> anyhow::Result<()> {
    let classifier = ZeroShotClassifier::from_settings(&config.classifier)
        .unwrap_or_else(|reason| classification_failed(BuildError::ClassificationUnavailable(reason)));

    let mut session = Session::new();
    if let Err(e) =
        session.resolve_from_text(text, &classifier, &config.classifier.candidate_labels)
    {
        classification_failed(e);
    }

    emit(&mut session, export.as_deref(), json)?;

    if advise {
        if let Some(selection) = session.selection() {
            print_advice(config, selection);
        }
    }
    Ok(())
}

fn classification_failed(err: BuildError) -> ! {
    if err.recovery() == Recovery::FallbackToStructured {
        eprintln!("✗ {}", err);
        eprintln!("  Use structured input instead, e.g.:");
        eprintln!("  designmypc recommend --use-case gaming --budget 1500");
        std::process::exit(EXIT_CLASSIFIER_UNAVAILABLE);
    }
    fail(err, 1)
}

fn print_advice(config: &AppConfig, selection: &BuildSelection) {
    let completer = match ChatCompleter::from_settings(&config.assistant) {
        Ok(completer) => completer,
        Err(reason) => {
            warn!("Assistant unavailable: {}", reason);
            eprintln!("⚠ Assistant unavailable: {}", reason);
            return;
        }
    };
    match advisor::advise(&completer, selection) {
        Ok(advice) => println!("\nAssistant:\n{}", advice),
        Err(e) => eprintln!("⚠ {}", e),
    }
}

/// Print the session's build (table or JSON) and export it if asked
fn emit(session: &mut Session, export: Option<&Path>, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", session.snapshot()?.to_json()?);
    } else if let Some(selection) = session.selection() {
        print_selection(selection);
    }

    if let Some(path) = export {
        session
            .export_to(path)
            .unwrap_or_else(|e| fail(format!("Could not save build: {}", e), 1));
        // Keep stdout clean when it carries JSON
        if json {
            eprintln!("✓ Build saved to {}", path.display());
        } else {
            println!("✓ Build saved to {}", path.display());
        }
    }
    Ok(())
}

fn print_selection(selection: &BuildSelection) {
    let recommendation = selection.recommendation();
    println!(
        "{} PC  {}",
        selection.bundle().title(),
        catalog::format_usd(selection.price())
    );

    if let (Some(budget), Some(delta)) = (recommendation.budget, recommendation.price_delta) {
        if delta >= 0.0 {
            println!("Budget ${:.0}: ${:.0} under budget", budget, delta);
        } else {
            println!("Budget ${:.0}: ${:.0} over budget", budget, -delta);
        }
    }
    if recommendation.source == ResolutionSource::Classified {
        if let Some(top) = recommendation.top_label() {
            println!("Matched \"{}\" ({:.0}%)", top.label, top.score * 100.0);
        }
    }
    if !recommendation.preferences.is_empty() {
        let tags: Vec<&str> = recommendation.preferences.iter().map(String::as_str).collect();
        println!("Preferences: {}", tags.join(", "));
    }

    println!();
    for (slot, part) in selection.chosen_parts() {
        let alternatives: Vec<&str> = selection
            .options(slot)
            .iter()
            .copied()
            .filter(|o| *o != part)
            .collect();
        if alternatives.is_empty() {
            println!("  {:<12} {}", slot.to_string(), part);
        } else {
            println!("  {:<12} {}  (or {})", slot.to_string(), part, alternatives.join(", "));
        }
    }

    println!();
    print_metrics(selection.bundle());
    for note in COMPATIBILITY_NOTES {
        println!("✓ {}", note);
    }
}

fn print_metrics(bundle: &ComponentBundle) {
    for (label, value) in bundle.summary.metrics() {
        println!("  {:<13} {}", label, value);
    }
}

/// List catalog bundles
fn run_catalog(use_case: Option<&str>) {
    let bundles: Vec<&ComponentBundle> = match use_case {
        Some(input) => {
            let use_case = resolver::parse_use_case(input).unwrap_or_else(|e| fail(e, 1));
            catalog::bundles_for(use_case).collect()
        }
        None => catalog::bundles().collect(),
    };

    for bundle in bundles {
        println!("{}  {}", bundle.title(), catalog::format_usd(bundle.price));
        for (slot, options) in bundle.slots() {
            println!("  {:<12} {}", slot.to_string(), options.join(" | "));
        }
        print_metrics(bundle);
        println!();
    }
}

/// Validate a saved build file
fn run_validate(file: &Path) {
    info!("Validating build file: {:?}", file);
    match BuildExport::load_from_file(file) {
        Ok(export) => match export.validate() {
            Ok(()) => {
                println!(
                    "✓ Build file is valid: {} ({} components, {})",
                    export.build_type,
                    export.components.len(),
                    catalog::format_usd(export.price)
                );
            }
            Err(e) => fail(format!("Build file validation failed: {:#}", e), 1),
        },
        Err(e) => fail(format!("Failed to load build file: {:#}", e), 1),
    }
}
