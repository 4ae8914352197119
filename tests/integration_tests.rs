// Integration tests for sitequote
//
// These walk the public API the way a page would: load a catalog, drive a
// builder session or a quiz through edits, then format and build the lead.

use sitequote::lead::{submission_path, CSRF_HEADER, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE};
use sitequote::{
    format::format, BuilderLead, BuilderSession, DesignTier, Locale, ModuleRule, PackageTier,
    QuizCatalog, QuizContacts, QuizLead, QuizPricing, QuizProgress, QuizSession, RuleTable,
    SelectionChange, SiteQuoteError, SiteType,
};
use tempfile::TempDir;

#[test]
fn test_builder_page_flow() {
    let mut session = BuilderSession::new(RuleTable::builder_default());

    // Page load: landing, template, one page
    let display = session.display(Locale::Uk);
    assert_eq!(display.package, "Econom");
    assert_eq!(display.pages, "1 сторінка");
    assert_eq!(display.term, "від 3 днів");
    assert_eq!(display.price, "від 100 $");

    let update = session.apply(SelectionChange::SiteType(SiteType::Store));
    assert!(update.refresh_ticket.is_some());
    assert_eq!(session.selection().page_count(), 5);

    let update = session.apply(SelectionChange::PageCount(8));
    assert!(update.refresh_ticket.is_none());

    session.apply(SelectionChange::Module("shop_catalog".into(), true));
    session.apply(SelectionChange::Module("payment_card".into(), true));
    session.apply(SelectionChange::Design(DesignTier::Unique));

    // store 400 + 300 + 200 + 3 × 50 + 100 + 7 × 20
    let quote = session.quote();
    assert_eq!(quote.total_price, 1290);
    // 7 + 3 + 2 + 3
    assert_eq!(quote.total_term_days, 15);
    // store 3 + 2 modules + 2 design
    assert_eq!(quote.complexity, 7);
    assert_eq!(quote.package, PackageTier::Plus);

    let display = session.display(Locale::En);
    assert_eq!(display.pages, "up to 8 pages");
    assert!(display.discount_hint);
}

#[test]
fn test_builder_lead_from_cli_style_selection() {
    let table = RuleTable::builder_default();
    let selection = sitequote::Selection::new(SiteType::Corporate, 4)
        .with_design(DesignTier::Unique)
        .with_module("multilingual");
    let session = BuilderSession::with_selection(table, selection);

    // 400 + 150 + 50 + 100 + 3 × 20 + 3 × 30
    assert_eq!(session.quote().total_price, 850);

    let lead = BuilderLead::from_session(&session, Locale::En, "Ann", "+380", "").unwrap();
    assert_eq!(lead.builder_pages, 4);
    assert_eq!(lead.builder_modules, "multilingual");
    assert_eq!(lead.builder_price, "from 850 $");
    assert_eq!(lead.message, "Запит з конструктора сайту");
}

#[test]
fn test_rule_table_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rules.json");

    let mut table = RuleTable::builder_default();
    table.version = "spring-promo".to_string();
    table
        .modules
        .insert("chatbot".to_string(), ModuleRule::new(400, 2.5, false));
    table.save_to_file(&path).unwrap();

    let loaded = RuleTable::load_from_file(&path).unwrap();
    assert_eq!(loaded, table);

    let session = BuilderSession::with_selection(
        loaded,
        sitequote::Selection::new(SiteType::Landing, 1).with_module("chatbot"),
    );
    assert_eq!(session.quote().total_price, 500);
    // 3 + 2.5 rounded up
    assert_eq!(session.quote().total_term_days, 6);
}

#[test]
fn test_rule_table_file_errors() {
    let temp = TempDir::new().unwrap();

    let missing = RuleTable::load_from_file(temp.path().join("absent.json"));
    assert!(missing.is_err());

    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(RuleTable::load_from_file(&path).is_err());

    let mut table = RuleTable::builder_default();
    table.site_types.remove(&SiteType::Webapp);
    let path = temp.path().join("incomplete.json");
    table.save_to_file(&path).unwrap();
    let err = RuleTable::load_from_file(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("webapp"));
}

#[test]
fn test_quiz_catalog_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("quiz.json");

    let catalog = QuizCatalog::dream_site_banded();
    catalog.save_to_file(&path).unwrap();
    let loaded = QuizCatalog::load_from_file(&path).unwrap();
    assert_eq!(loaded, catalog);
    assert!(matches!(
        loaded.pricing,
        QuizPricing::Banded {
            floor: 299,
            ceiling: 499
        }
    ));
}

#[test]
fn test_quiz_to_lead_flow() {
    let mut session = QuizSession::new(QuizCatalog::dream_site_default());

    let steps: [&[&str]; 5] = [
        &["corporate"],
        &["google", "no-matter"],
        &["online-booking", "automation"],
        &["classic"],
        &["month"],
    ];
    for options in steps {
        for option in options {
            session.select(option).unwrap();
        }
        session.advance().unwrap();
    }
    assert_eq!(session.progress(), QuizProgress::Complete);

    // 300 + 100 + 200 - 50
    let proposal = session.proposal().unwrap();
    assert_eq!(proposal.price, "$500-600");
    assert_eq!(proposal.features.len(), 8);
    assert_eq!(proposal.features[4], "Багатосторінкова структура");

    let contacts = QuizContacts {
        phone: "+380 50 000 0000".into(),
        telegram: "@client".into(),
        instagram: String::new(),
    };
    let lead = QuizLead::from_session(&session, "Client", &contacts, "").unwrap();
    assert_eq!(lead.contact_method, "Телефон: +380 50 000 0000, Telegram: @client");
    assert!(lead.message.contains("Особливі функції: Онлайн-запис, Автоматизація\n"));
    assert!(lead.message.contains("Стиль дизайну: Класичний\n"));
}

#[test]
fn test_quiz_rejects_skipping() {
    let mut session = QuizSession::new(QuizCatalog::dream_site_banded());
    session.select("webapp").unwrap();
    session.advance().unwrap();

    let err = session.advance().unwrap_err();
    assert!(matches!(err, SiteQuoteError::Quiz(_)));
    assert!(session.proposal().is_err());
}

#[test]
fn test_formatter_matches_session_display() {
    let mut session = BuilderSession::new(RuleTable::builder_default());
    session.apply(SelectionChange::SiteType(SiteType::Webapp));
    let direct = format(&session.quote(), session.selection().page_count(), Locale::En);
    assert_eq!(direct, session.display(Locale::En));
    assert_eq!(direct.pages, "up to 5 pages");
}

#[test]
fn test_submission_constants() {
    assert_eq!(submission_path(Some("en")), "/en/builder/request/");
    assert_eq!(CSRF_HEADER, "X-CSRFToken");
    assert_eq!((REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE), ("X-Requested-With", "XMLHttpRequest"));
}
