//! Interview Generation Service
//!
//! This module defines the two stateless operations the rest of the system is
//! built on: turning free-form job settings into an interview plan, and
//! evaluating one turn of an interview in progress. Both delegate the actual
//! work to a language model through `LLMClient`.

use crate::{
    error::InterviewError,
    limits::InterviewLimits,
    llm_client::{LLMClient, generate},
    prompts::{PLAN_PROMPT, PromptLibrary, TURN_PROMPT},
    schema::{
        Evaluation, InterviewConfiguration, InterviewMode, InterviewStatus, OverallEvaluation,
        PlanRequest, QuestionRecord, Stage, TurnRequest, TurnResult,
    },
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};

/// Defines the contract for any service that can plan and conduct an interview.
///
/// Implementations hold no session state: every `conduct_turn` call carries
/// the full configuration and answer history.
#[async_trait]
pub trait InterviewService: Send + Sync {
    /// Generates a staged interview plan from the user's settings.
    async fn generate_plan(
        &self,
        request: &PlanRequest,
    ) -> Result<InterviewConfiguration, InterviewError>;

    /// Evaluates the answers supplied so far and returns the next turn.
    async fn conduct_turn(&self, request: &TurnRequest) -> Result<TurnResult, InterviewError>;
}

/// An implementation of `InterviewService` backed by a language model.
pub struct LLMInterviewService {
    llm_client: Arc<dyn LLMClient>,
    prompts: PromptLibrary,
    limits: InterviewLimits,
}

impl LLMInterviewService {
    pub fn new(
        llm_client: Arc<dyn LLMClient>,
        prompts: PromptLibrary,
        limits: InterviewLimits,
    ) -> Self {
        Self {
            llm_client,
            prompts,
            limits,
        }
    }
}

#[async_trait]
impl InterviewService for LLMInterviewService {
    #[instrument(skip_all, fields(level = %request.interview_level))]
    async fn generate_plan(
        &self,
        request: &PlanRequest,
    ) -> Result<InterviewConfiguration, InterviewError> {
        self.limits.check_plan(request)?;

        let system_prompt = self
            .prompts
            .render(
                PLAN_PROMPT,
                &[
                    ("interview_level", request.interview_level.to_string()),
                    (
                        "max_questions_per_stage",
                        request.max_questions_per_stage.to_string(),
                    ),
                ],
            )
            .map_err(|e| InterviewError::Internal(e.to_string()))?;

        // The question bound travels in the instruction, not in the data.
        let user_content = json!({
            "job_title": request.job_title,
            "company_name": request.company_name,
            "industry": request.industry,
            "interview_level": request.interview_level,
            "job_description": request.job_description,
            "job_requirements": request.job_requirements,
            "interview_process": request.interview_process,
            "interview_questions": request.interview_questions,
            "interviewer_tone": request.interviewer_tone,
            "interview_language": request.interview_language,
            "interview_style": request.interview_style,
        })
        .to_string();

        let plan: InterviewConfiguration = generate(
            self.llm_client.as_ref(),
            system_prompt,
            user_content,
            "interview_plan",
        )
        .await?;
        info!(
            stages = plan.interview_process.len(),
            questions = plan.total_questions(),
            "Interview plan generated"
        );
        Ok(plan)
    }

    #[instrument(skip_all, fields(answered = request.answers.iter().filter(|a| !a.is_empty()).count()))]
    async fn conduct_turn(&self, request: &TurnRequest) -> Result<TurnResult, InterviewError> {
        self.limits.check_turn(request)?;

        let config = &request.configuration;
        let system_prompt = self
            .prompts
            .render(
                TURN_PROMPT,
                &[
                    ("interviewer_tone", config.interviewer_tone.to_string()),
                    ("interview_style", config.interview_style.to_string()),
                    ("interview_language", config.interview_language.clone()),
                ],
            )
            .map_err(|e| InterviewError::Internal(e.to_string()))?;

        let user_content = json!({
            "job_description": config.job_description,
            "job_requirements": config.job_requirements,
            "interview_process": config.interview_process,
            "interviewer_tone": config.interviewer_tone,
            "interview_language": config.interview_language,
            "interview_style": config.interview_style,
            "userInput": request.user_input,
            "currentStage": request.current_stage,
            "currentQuestion": request.current_question,
            "answers": request.answers,
        })
        .to_string();

        let turn: TurnResult = generate(
            self.llm_client.as_ref(),
            system_prompt,
            user_content,
            "interview_turn",
        )
        .await?;
        info!(
            status = %turn.interview_status,
            total_score = turn.overall_evaluation.total_score,
            "Interview turn evaluated"
        );
        Ok(turn)
    }
}

/// A deterministic `InterviewService` for local development and tests.
///
/// Plans one stage per process hint (or a single "Screening" stage) with
/// numbered questions, and scores each non-empty answer by word count.
pub struct MockInterviewService {
    limits: InterviewLimits,
}

impl MockInterviewService {
    pub fn new(limits: InterviewLimits) -> Self {
        Self { limits }
    }
}

impl Default for MockInterviewService {
    fn default() -> Self {
        Self::new(InterviewLimits::default())
    }
}

const MOCK_QUESTIONS_PER_STAGE: u32 = 2;
const MOCK_POINTS_PER_QUESTION: f64 = 10.0;

#[async_trait]
impl InterviewService for MockInterviewService {
    async fn generate_plan(
        &self,
        request: &PlanRequest,
    ) -> Result<InterviewConfiguration, InterviewError> {
        self.limits.check_plan(request)?;

        let stage_names = if request.interview_process.is_empty() {
            vec!["Screening".to_string()]
        } else {
            request.interview_process.clone()
        };
        let per_stage = request
            .max_questions_per_stage
            .min(MOCK_QUESTIONS_PER_STAGE);
        let interview_process = stage_names
            .into_iter()
            .map(|stage_name| Stage {
                questions: (1..=per_stage)
                    .map(|n| format!("{stage_name} question {n}"))
                    .collect(),
                stage_name,
                interview_mode: InterviewMode::Text,
            })
            .collect();

        Ok(InterviewConfiguration {
            job_description: request.job_description.clone(),
            job_requirements: request.job_requirements.clone(),
            interview_process,
            interviewer_tone: request.interviewer_tone,
            interview_language: request.interview_language.clone(),
            interview_style: request.interview_style,
            interview_level: request.interview_level,
            max_questions_per_stage: request.max_questions_per_stage,
        })
    }

    async fn conduct_turn(&self, request: &TurnRequest) -> Result<TurnResult, InterviewError> {
        self.limits.check_turn(request)?;

        let questions = request
            .configuration
            .interview_process
            .iter()
            .flat_map(|stage| stage.questions.iter());
        let question_data: Vec<QuestionRecord> = questions
            .zip(request.answers.iter())
            .enumerate()
            .filter(|(_, (_, answer))| !answer.trim().is_empty())
            .map(|(i, (question, answer))| {
                let words = answer.split_whitespace().count() as f64;
                QuestionRecord {
                    question: question.clone(),
                    question_number: i as u32 + 1,
                    my_answer: answer.clone(),
                    evaluation: Evaluation {
                        score: words.min(MOCK_POINTS_PER_QUESTION),
                        total_score: MOCK_POINTS_PER_QUESTION,
                        feedback: format!("Answer used {words} words."),
                    },
                    example_answer: format!("A focused answer to: {question}"),
                }
            })
            .collect();

        let total_score = question_data
            .iter()
            .fold(0.0, |total, q| total + q.evaluation.score);
        let answered = question_data.len();
        let interview_status = if answered == request.configuration.total_questions() {
            InterviewStatus::Completed
        } else {
            InterviewStatus::InProgress
        };

        Ok(TurnResult {
            question_data,
            overall_evaluation: OverallEvaluation {
                total_score,
                summary: format!("{answered} question(s) answered so far."),
                strengths: vec![],
                areas_for_improvement: vec![],
            },
            interview_status,
        })
    }
}
