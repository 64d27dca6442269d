//! Interview Coach
//!
//! Helpers for the terminal client: reading the settings file, describing
//! the current question, and writing the end-of-interview reports.

use anyhow::{Context, Result};
use interview_core::{
    report::{self, render_question_log, render_summary},
    schema::PlanRequest,
    session::InterviewSession,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const SUMMARY_FILE: &str = "interview_summary.txt";
pub const QUESTION_LOG_FILE: &str = "interview_questions_and_answers.txt";

/// Reads interview settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<PlanRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Invalid interview settings in {}", path.display()))
}

/// The header shown above the answer prompt, or `None` once complete.
pub fn describe_question(session: &InterviewSession) -> Option<String> {
    let stage = session.current_stage()?;
    let question = session.current_question()?;
    Some(format!(
        "[{}] Question {} of {} ({:.0}%)\n{}",
        stage.stage_name,
        session.current_question_number(),
        session.total_questions(),
        session.progress_percent(),
        question
    ))
}

/// Writes the summary and the question log into `dir`.
///
/// Returns the two paths written. Fails if the session has no summary yet.
pub fn write_reports(dir: &Path, session: &InterviewSession) -> Result<(PathBuf, PathBuf)> {
    let summary = session
        .summary()
        .context("Interview is not complete; nothing to report")?;
    let mut summary_text = render_summary(summary);
    if let Some(turn) = session.latest_turn() {
        summary_text.push_str(&format!(
            "\nTotal Possible Score: {}\n",
            report::total_possible_score(turn)
        ));
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let summary_path = dir.join(SUMMARY_FILE);
    fs::write(&summary_path, summary_text)
        .with_context(|| format!("Failed to write {}", summary_path.display()))?;

    let log_path = dir.join(QUESTION_LOG_FILE);
    fs::write(&log_path, render_question_log(&report::transcript(session)))
        .with_context(|| format!("Failed to write {}", log_path.display()))?;

    Ok((summary_path, log_path))
}
