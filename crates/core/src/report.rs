//! Plain-text interview reports: the overall summary and a per-question log.

use crate::{
    schema::{Evaluation, OverallEvaluation, TurnResult},
    session::InterviewSession,
};

/// One asked question with the candidate's answer and, if the model graded
/// it, the evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub question_number: usize,
    pub stage_name: String,
    pub question: String,
    pub answer: String,
    pub evaluation: Option<Evaluation>,
    pub example_answer: Option<String>,
}

/// Sum of the maximum scores of every graded question; `0` when none are.
pub fn total_possible_score(turn: &TurnResult) -> f64 {
    // Folding from +0.0: an empty float `sum()` is -0.0 and prints as "-0".
    turn.question_data
        .iter()
        .fold(0.0, |total, q| total + q.evaluation.total_score)
}

/// Joins the plan, the session's own answers, and the model's latest grading.
///
/// Answers always come from the session. Gradings are matched by
/// `question_number`; when the model repeats a number the last record wins,
/// and records for numbers outside the plan are dropped.
pub fn transcript(session: &InterviewSession) -> Vec<TranscriptEntry> {
    let records = session
        .latest_turn()
        .map(|t| t.question_data.as_slice())
        .unwrap_or_default();
    let stages = &session.configuration().interview_process;

    stages
        .iter()
        .flat_map(|stage| stage.questions.iter().map(move |q| (stage, q)))
        .zip(session.answers())
        .enumerate()
        .map(|(i, ((stage, question), answer))| {
            let number = i + 1;
            let record = records
                .iter()
                .rev()
                .find(|r| r.question_number as usize == number);
            TranscriptEntry {
                question_number: number,
                stage_name: stage.stage_name.clone(),
                question: question.clone(),
                answer: answer.clone(),
                evaluation: record.map(|r| r.evaluation.clone()),
                example_answer: record.map(|r| r.example_answer.clone()),
            }
        })
        .collect()
}

pub fn render_summary(summary: &OverallEvaluation) -> String {
    let mut lines = vec![
        "Interview Summary".to_string(),
        String::new(),
        format!("Total Score: {}", summary.total_score),
        String::new(),
        "Summary:".to_string(),
        summary.summary.clone(),
        String::new(),
        "Strengths:".to_string(),
    ];
    lines.extend(bullets(&summary.strengths));
    lines.push(String::new());
    lines.push("Areas for Improvement:".to_string());
    lines.extend(bullets(&summary.areas_for_improvement));
    to_text(lines)
}

pub fn render_question_log(entries: &[TranscriptEntry]) -> String {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "Question {} ({}): {}",
            entry.question_number, entry.stage_name, entry.question
        ));
        lines.push(format!("Your Answer: {}", entry.answer));
        match &entry.evaluation {
            Some(eval) => lines.extend([
                "Evaluation:".to_string(),
                format!("  Score: {}/{}", eval.score, eval.total_score),
                format!("  Feedback: {}", eval.feedback),
            ]),
            None => lines.push("Evaluation: not graded".to_string()),
        }
        if let Some(example) = &entry.example_answer {
            lines.push(format!("Example Answer: {example}"));
        }
        lines.push(String::new());
    }
    to_text(lines)
}

fn bullets(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items.iter().map(|item| format!("- {item}"))
}

/// Joins lines with a newline after each one.
fn to_text(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
