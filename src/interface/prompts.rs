use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{PlannerError, Result};
use crate::models::PatientProfile;

/// Minimum similarity for a fuzzy name suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Patients whose names resemble `query`, best match first.
pub fn fuzzy_patient_matches<'a>(
    patients: &'a [PatientProfile],
    query: &str,
) -> Vec<(&'a PatientProfile, f64)> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&PatientProfile, f64)> = patients
        .iter()
        .map(|p| (p, jaro_winkler(&p.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Resolve a patient by name, asking when the name is missing or ambiguous.
pub fn select_patient<'a>(
    patients: &'a [PatientProfile],
    query: Option<&str>,
) -> Result<&'a PatientProfile> {
    if patients.is_empty() {
        return Err(PlannerError::InvalidInput("patient roster is empty".to_string()));
    }

    let Some(query) = query else {
        let names: Vec<&str> = patients.iter().map(|p| p.name.as_str()).collect();
        let selection = Select::new()
            .with_prompt("Select a patient")
            .items(&names)
            .default(0)
            .interact()?;
        return Ok(&patients[selection]);
    };

    // Try exact match first (case-insensitive)
    if let Some(p) = patients
        .iter()
        .find(|p| p.name.to_lowercase() == query.trim().to_lowercase())
    {
        return Ok(p);
    }

    let candidates = fuzzy_patient_matches(patients, query);
    match candidates.as_slice() {
        [] => Err(PlannerError::PatientNotFound(query.to_string())),
        [(patient, _)] => {
            let confirm = prompt_yes_no(&format!("Did you mean '{}'?", patient.name), true)?;
            if confirm {
                Ok(patient)
            } else {
                Err(PlannerError::PatientNotFound(query.to_string()))
            }
        }
        many => {
            let options: Vec<&str> = many
                .iter()
                .take(5)
                .map(|(p, _)| p.name.as_str())
                .collect();

            let mut selection_options = options.clone();
            selection_options.push("None of these");

            let selection = Select::new()
                .with_prompt("Which patient did you mean?")
                .items(&selection_options)
                .default(0)
                .interact()?;

            if selection < options.len() {
                Ok(many[selection].0)
            } else {
                Err(PlannerError::PatientNotFound(query.to_string()))
            }
        }
    }
}

/// Resolve a service date, asking when none was given.
pub fn select_date(dates: &[String], query: Option<&str>) -> Result<String> {
    if let Some(date) = query {
        return if dates.iter().any(|d| d == date.trim()) {
            Ok(date.trim().to_string())
        } else {
            Err(PlannerError::UnknownMenuDate(date.to_string()))
        };
    }

    if dates.is_empty() {
        return Err(PlannerError::InvalidInput("master menu has no dates".to_string()));
    }

    let selection = Select::new()
        .with_prompt("Select a service date")
        .items(dates)
        .default(0)
        .interact()?;
    Ok(dates[selection].clone())
}

/// Prompt for the question to attach to an advisory request.
pub fn prompt_question(default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt("Question for the menu advisor")
        .default(default.to_string())
        .interact_text()?;
    Ok(input)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
