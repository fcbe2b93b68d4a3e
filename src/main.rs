use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::info;

use care_meal_planner::advisory::build_payload;
use care_meal_planner::catalog::{
    Dataset, Inventory, load_config, load_dataset, load_inventory, save_order_sheet,
    save_personalized_menu,
};
use care_meal_planner::cli::{Cli, Command};
use care_meal_planner::error::Result;
use care_meal_planner::interface::{
    display_inventory_summary, display_nutrition_check, display_order_sheet,
    display_patient_summary, display_personalized_menu, prompt_question, select_date,
    select_patient,
};
use care_meal_planner::logging;
use care_meal_planner::planner::{
    ADVISORY_INGREDIENT_LIMIT, PersonalizationEngine, PlannerConfig, ProcurementAggregator,
    verify_plan,
};

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Everything a command needs, loaded once per invocation.
struct Session {
    config: PlannerConfig,
    dataset: Dataset,
    inventory: Inventory,
    rng: StdRng,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut session = open_session(&cli)?;

    match cli.command.unwrap_or_default() {
        Command::Plan {
            patient,
            date,
            export,
        } => cmd_plan(&mut session, patient.as_deref(), date.as_deref(), export.as_deref()),
        Command::Order {
            date,
            export,
            workers,
        } => cmd_order(&mut session, date.as_deref(), export.as_deref(), workers),
        Command::Inventory => cmd_inventory(&session),
        Command::Advise {
            patient,
            date,
            question,
        } => cmd_advise(&mut session, patient.as_deref(), date.as_deref(), question),
    }
}

fn open_session(cli: &Cli) -> Result<Session> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = load_dataset(Path::new(&cli.data_dir), cli.patient_header_row)?;
    info!(
        items = dataset.catalog.len(),
        patients = dataset.patients.len(),
        dates = dataset.menu.dates().len(),
        "loaded dataset"
    );

    let inventory = match &cli.inventory {
        Some(path) => load_inventory(path)?,
        None => Inventory::mock(&dataset.catalog, config.mock_stock_max_g, &mut rng),
    };

    Ok(Session {
        config,
        dataset,
        inventory,
        rng,
    })
}

/// Personalize one patient's meal and print it with its nutrition check.
fn cmd_plan(
    session: &mut Session,
    patient: Option<&str>,
    date: Option<&str>,
    export: Option<&str>,
) -> Result<()> {
    let date = select_date(session.dataset.menu.dates(), date)?;
    let menu = session
        .dataset
        .menu
        .meal_for(&date, session.config.items_per_meal)?;
    let patient = select_patient(&session.dataset.patients, patient)?;

    let engine = PersonalizationEngine::new(&session.dataset.catalog, &session.config);
    let plan = engine.personalize(patient, &menu, &mut session.rng)?;

    println!("Master menu for {}: {}", date, menu.join(", "));
    display_patient_summary(patient, plan.target_kcal);
    display_personalized_menu(&plan);
    display_nutrition_check(&verify_plan(&session.dataset.catalog, &plan));

    if let Some(path) = export {
        save_personalized_menu(path, &plan.items)?;
        println!("Personalized menu written to {}", path);
    }

    Ok(())
}

/// Personalize every patient and print the order sheet for the date.
fn cmd_order(
    session: &mut Session,
    date: Option<&str>,
    export: Option<&str>,
    workers: usize,
) -> Result<()> {
    let date = select_date(session.dataset.menu.dates(), date)?;
    let menu = session
        .dataset
        .menu
        .meal_for(&date, session.config.items_per_meal)?;

    let engine = PersonalizationEngine::new(&session.dataset.catalog, &session.config);
    let plans = engine.personalize_all(&session.dataset.patients, &menu, &mut session.rng)?;

    println!(
        "Planned {} meals for {} ({} menu items)",
        plans.len(),
        date,
        menu.len()
    );

    let aggregator = ProcurementAggregator::new(&session.inventory);
    let lines = if workers > 1 {
        aggregator.aggregate_partitioned(&plans, workers)
    } else {
        aggregator.aggregate(&plans)
    };

    display_order_sheet(&lines);

    if let Some(path) = export {
        save_order_sheet(path, &lines)?;
        println!("Order sheet written to {}", path);
    }

    Ok(())
}

fn cmd_inventory(session: &Session) -> Result<()> {
    display_inventory_summary(&session.inventory, session.config.low_stock_threshold_g);
    Ok(())
}

/// Print the advisory request JSON for one patient.
fn cmd_advise(
    session: &mut Session,
    patient: Option<&str>,
    date: Option<&str>,
    question: Option<String>,
) -> Result<()> {
    let date = select_date(session.dataset.menu.dates(), date)?;
    let menu = session
        .dataset
        .menu
        .meal_for(&date, session.config.items_per_meal)?;
    let patient = select_patient(&session.dataset.patients, patient)?;

    let engine = PersonalizationEngine::new(&session.dataset.catalog, &session.config);
    let plan = engine.personalize(patient, &menu, &mut session.rng)?;

    let question = match question {
        Some(q) => q,
        None => prompt_question("Suggest recipes for this meal using the listed ingredients.")?,
    };

    let payload = build_payload(
        patient,
        &plan,
        &session.inventory,
        ADVISORY_INGREDIENT_LIMIT,
        &question,
    );
    println!("{}", payload.to_json()?);

    Ok(())
}
