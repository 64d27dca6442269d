//! Interview Contract Types
//!
//! The data structures exchanged with the model provider and over the HTTP
//! boundary. Every type derives `JsonSchema` so it can be used as a
//! structured-output format; field names are the wire names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the candidate is expected to answer the questions of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterviewMode {
    Text,
    Voice,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterviewerTone {
    Formal,
    Casual,
    Friendly,
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InterviewStyle {
    Structured,
    SemiStructured,
    Unstructured,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InterviewLevel {
    Entry,
    Junior,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    InProgress,
    Completed,
}

// Display renders the wire form so prompt templates receive the same words
// the model sees in the JSON payload.
macro_rules! wire_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    match serde_json::to_value(self) {
                        Ok(serde_json::Value::String(s)) => f.write_str(&s),
                        _ => write!(f, "{:?}", self),
                    }
                }
            }
        )*
    };
}

wire_display!(
    InterviewMode,
    InterviewerTone,
    InterviewStyle,
    InterviewLevel,
    InterviewStatus
);

/// A named phase of the interview with its own question list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Stage {
    pub stage_name: String,
    pub interview_mode: InterviewMode,
    pub questions: Vec<String>,
}

/// The interview plan produced by the plan generator.
///
/// Immutable once received; the session walks `interview_process` in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InterviewConfiguration {
    pub job_description: String,
    pub job_requirements: Vec<String>,
    pub interview_process: Vec<Stage>,
    pub interviewer_tone: InterviewerTone,
    pub interview_language: String,
    pub interview_style: InterviewStyle,
    pub interview_level: InterviewLevel,
    pub max_questions_per_stage: u32,
}

impl InterviewConfiguration {
    /// Total number of questions across all stages.
    pub fn total_questions(&self) -> usize {
        self.interview_process.iter().map(|s| s.questions.len()).sum()
    }
}

/// Free-form settings submitted by the user to request a plan.
///
/// `interview_process` and `interview_questions` are optional hints; the
/// model is free to ignore them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    pub interview_level: InterviewLevel,
    pub job_description: String,
    #[serde(default)]
    pub job_requirements: Vec<String>,
    #[serde(default)]
    pub interview_process: Vec<String>,
    #[serde(default)]
    pub interview_questions: Vec<String>,
    pub interviewer_tone: InterviewerTone,
    pub interview_language: String,
    pub interview_style: InterviewStyle,
    pub max_questions_per_stage: u32,
}

/// One turn of the interview as sent by the client.
///
/// The server holds no session state, so the caller supplies the whole
/// configuration and every answer collected so far (unanswered slots empty).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRequest {
    #[serde(flatten)]
    pub configuration: InterviewConfiguration,
    #[serde(rename = "userInput", default)]
    pub user_input: String,
    #[serde(
        rename = "currentStage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_stage: Option<Stage>,
    #[serde(
        rename = "currentQuestion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_question: Option<String>,
    #[serde(default)]
    pub answers: Vec<String>,
}

impl TurnRequest {
    /// The request that opens an interview: no answer, no cursor.
    pub fn opening(configuration: InterviewConfiguration) -> Self {
        let answers = vec![String::new(); configuration.total_questions()];
        Self {
            configuration,
            user_input: String::new(),
            current_stage: None,
            current_question: None,
            answers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Evaluation {
    pub score: f64,
    pub total_score: f64,
    pub feedback: String,
}

/// The model's view of a single question: what was asked, what was answered
/// and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionRecord {
    pub question: String,
    /// 1-based running number across all stages.
    pub question_number: u32,
    pub my_answer: String,
    pub evaluation: Evaluation,
    pub example_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverallEvaluation {
    pub total_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
}

/// Everything the turn generator returns for one turn.
///
/// Scores are displayed verbatim; nothing here re-derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TurnResult {
    pub question_data: Vec<QuestionRecord>,
    pub overall_evaluation: OverallEvaluation,
    pub interview_status: InterviewStatus,
}
