//! Size limits applied to incoming requests before any model call is made.

use crate::schema::{PlanRequest, TurnRequest};

pub const DEFAULT_MAX_QUESTIONS_PER_STAGE: u32 = 300;
pub const DEFAULT_MAX_ANSWER_CHARS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("max_questions_per_stage must be between 1 and {limit}, got {value}")]
    QuestionsPerStage { value: u32, limit: u32 },
    #[error("{}", answer_too_long(.index, .length, .limit))]
    AnswerTooLong {
        index: Option<usize>,
        length: usize,
        limit: usize,
    },
}

fn answer_too_long(index: &Option<usize>, length: &usize, limit: &usize) -> String {
    match index {
        Some(i) => format!("answers[{i}] is {length} characters long, the limit is {limit}"),
        None => format!("userInput is {length} characters long, the limit is {limit}"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewLimits {
    pub max_questions_per_stage: u32,
    pub max_answer_chars: usize,
}

impl Default for InterviewLimits {
    fn default() -> Self {
        Self {
            max_questions_per_stage: DEFAULT_MAX_QUESTIONS_PER_STAGE,
            max_answer_chars: DEFAULT_MAX_ANSWER_CHARS,
        }
    }
}

impl InterviewLimits {
    pub fn check_plan(&self, request: &PlanRequest) -> Result<(), ValidationError> {
        let value = request.max_questions_per_stage;
        if value == 0 || value > self.max_questions_per_stage {
            return Err(ValidationError::QuestionsPerStage {
                value,
                limit: self.max_questions_per_stage,
            });
        }
        Ok(())
    }

    /// Checks answer lengths. The answers array length is the caller's
    /// responsibility and is not cross-checked against the plan.
    pub fn check_turn(&self, request: &TurnRequest) -> Result<(), ValidationError> {
        self.check_answer(None, &request.user_input)?;
        for (i, answer) in request.answers.iter().enumerate() {
            self.check_answer(Some(i), answer)?;
        }
        Ok(())
    }

    fn check_answer(&self, index: Option<usize>, text: &str) -> Result<(), ValidationError> {
        let length = text.chars().count();
        if length > self.max_answer_chars {
            return Err(ValidationError::AnswerTooLong {
                index,
                length,
                limit: self.max_answer_chars,
            });
        }
        Ok(())
    }
}
