//! sitequote - Main entry point
//!
//! Thin command-line front end over the quote engine and the quiz.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sitequote::cli::{CatalogCommands, Cli, Commands, SelectionArgs};
use sitequote::lead::{submission_path, BuilderLead};
use sitequote::quiz::catalog::QuizCatalog;
use sitequote::quiz::{QuizSession, QuizStep};
use sitequote::format::{self, summary_labels};
use sitequote::{BuilderSession, RuleTable, Selection};

/// Initialize tracing; `RUST_LOG` overrides the default level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

/// Main application entry point
fn main() {
    init_logger();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let result = match cli.command {
        Commands::Quote { selection, json } => run_quote(&selection, json),
        Commands::Catalog { action } => run_catalog(&action),
        Commands::Quiz {
            catalog,
            banded,
            site_type,
            client_sources,
            features,
            design_style,
            timeline,
        } => {
            let answers = [
                (QuizStep::SiteType, vec![site_type]),
                (QuizStep::ClientSource, client_sources),
                (QuizStep::SpecialFeatures, features),
                (QuizStep::DesignStyle, vec![design_style]),
                (QuizStep::Timeline, vec![timeline]),
            ];
            run_quiz(catalog.as_deref(), banded, &answers)
        }
        Commands::Lead {
            selection,
            name,
            contact,
            message,
            lang,
        } => run_lead(&selection, &name, &contact, &message, lang.as_deref()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn load_rule_table(path: Option<&Path>) -> Result<RuleTable> {
    match path {
        Some(path) => RuleTable::load_from_file(path),
        None => Ok(RuleTable::builder_default()),
    }
}

/// Build a session whose quote reflects the command-line selection.
fn builder_session(args: &SelectionArgs) -> Result<BuilderSession> {
    let table = load_rule_table(args.catalog.as_deref())?;

    let pages = args
        .pages
        .unwrap_or_else(|| table.included_pages(args.site_type));
    let mut selection = Selection::new(args.site_type, pages).with_design(args.design);
    for module in &args.modules {
        if !table.modules.contains_key(module) {
            tracing::warn!(module = %module, "Unknown module, priced with the fallback rule");
        }
        selection = selection.with_module(module.as_str());
    }

    Ok(BuilderSession::with_selection(table, selection))
}

fn run_quote(args: &SelectionArgs, json: bool) -> Result<()> {
    let session = builder_session(args)?;

    if json {
        let quote = serde_json::to_string_pretty(&session.quote())
            .context("Failed to serialize quote")?;
        println!("{}", quote);
        return Ok(());
    }

    let labels = summary_labels(args.locale);
    let display = format::format(&session.quote(), session.selection().page_count(), args.locale);
    println!("{} {}", labels.package, display.package);
    println!("{} {}", labels.pages, display.pages);
    println!("{} {}", labels.timeline, display.term);
    if display.discount_hint {
        println!("{} {} *", labels.price, display.price);
    } else {
        println!("{} {}", labels.price, display.price);
    }
    Ok(())
}

fn run_catalog(action: &CatalogCommands) -> Result<()> {
    match action {
        CatalogCommands::Dump { quiz, banded } => {
            let json = match (*quiz, *banded) {
                (false, _) => serde_json::to_string_pretty(&RuleTable::builder_default()),
                (true, false) => serde_json::to_string_pretty(&QuizCatalog::dream_site_default()),
                (true, true) => serde_json::to_string_pretty(&QuizCatalog::dream_site_banded()),
            }
            .context("Failed to serialize catalog")?;
            println!("{}", json);
        }
        CatalogCommands::Validate { file, quiz } => {
            info!("Validating catalog file: {:?}", file);
            let version = if *quiz {
                QuizCatalog::load_from_file(file)?.version
            } else {
                RuleTable::load_from_file(file)?.version
            };
            info!("Catalog validation successful");
            println!("✓ Catalog file is valid: {:?} (version {})", file, version);
        }
    }
    Ok(())
}

fn run_quiz(
    catalog: Option<&Path>,
    banded: bool,
    answers: &[(QuizStep, Vec<String>)],
) -> Result<()> {
    let catalog = match catalog {
        Some(path) => QuizCatalog::load_from_file(path)?,
        None if banded => QuizCatalog::dream_site_banded(),
        None => QuizCatalog::dream_site_default(),
    };

    let mut session = QuizSession::new(catalog);
    for (step, values) in answers {
        session
            .answer(values.as_slice())
            .with_context(|| format!("Step {}/{}", step.step_number(), QuizStep::TOTAL_STEPS))?;
    }

    let proposal = session.proposal()?;
    println!("{}", proposal.price);
    for feature in &proposal.features {
        println!("  ✓ {}", feature);
    }
    Ok(())
}

fn run_lead(
    args: &SelectionArgs,
    name: &str,
    contact: &str,
    message: &str,
    lang: Option<&str>,
) -> Result<()> {
    let session = builder_session(args)?;
    let lead = BuilderLead::from_session(&session, args.locale, name, contact, message)?;

    info!("Lead payload for POST {}", submission_path(lang));
    println!("{}", lead.to_json()?);
    Ok(())
}
