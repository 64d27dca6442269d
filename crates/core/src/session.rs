//! Interview Session State Machine
//!
//! Walks the questions of an interview plan in order, collecting one answer
//! per question. All state lives in a single `InterviewSession` value and
//! changes only through `InterviewSession::transition`, which returns the
//! side effect (if any) the runtime must perform next.
//!
//! Questions are addressed by a flattened 0-based `position` across all
//! stages; a prefix-sum table maps it back to a `(stage, question)` cursor,
//! so empty stages are skipped without special cases.

use crate::{
    Command,
    schema::{InterviewConfiguration, OverallEvaluation, Stage, TurnRequest, TurnResult},
};
use tracing::{debug, info, warn};

/// Location of a question inside the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub stage_index: usize,
    pub question_index: usize,
}

/// Prefix sums of per-stage question counts.
#[derive(Debug, Clone)]
pub struct QuestionIndex {
    /// `offsets[i]` is the number of questions in stages before `i`.
    offsets: Vec<usize>,
    total: usize,
}

impl QuestionIndex {
    pub fn new(stages: &[Stage]) -> Self {
        let mut offsets = Vec::with_capacity(stages.len());
        let mut total = 0;
        for stage in stages {
            offsets.push(total);
            total += stage.questions.len();
        }
        Self { offsets, total }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Maps a flattened position to its cursor, or `None` past the end.
    pub fn locate(&self, position: usize) -> Option<Cursor> {
        if position >= self.total {
            return None;
        }
        // Empty stages share an offset with their successor; the last stage
        // with `offset <= position` is the non-empty one holding it.
        let stage_index = self.offsets.partition_point(|&offset| offset <= position) - 1;
        Some(Cursor {
            stage_index,
            question_index: position - self.offsets[stage_index],
        })
    }

    pub fn position(&self, cursor: Cursor) -> usize {
        self.offsets[cursor.stage_index] + cursor.question_index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Plan received, opening turn not requested yet (or it failed).
    Initializing,
    /// Opening turn request in flight.
    Opening,
    /// A question is displayed and the user may type or dictate.
    AwaitingAnswer,
    /// An answer was submitted and its turn request is in flight.
    Submitting,
    /// Every question has been answered.
    Complete,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Request the opening turn.
    Start,
    /// Submit the current answer buffer for the current question.
    Submit(String),
    /// The in-flight turn request succeeded.
    TurnReceived(TurnResult),
    /// The in-flight turn request failed; carries the error message.
    TurnFailed(String),
}

#[derive(Debug, Clone)]
pub struct InterviewSession {
    config: InterviewConfiguration,
    index: QuestionIndex,
    position: usize,
    answers: Vec<String>,
    phase: Phase,
    latest_turn: Option<TurnResult>,
    summary: Option<OverallEvaluation>,
}

impl InterviewSession {
    /// Creates a session for a freshly received plan, with one empty answer
    /// slot per question.
    pub fn new(config: InterviewConfiguration) -> Self {
        let index = QuestionIndex::new(&config.interview_process);
        let answers = vec![String::new(); index.total()];
        Self {
            config,
            index,
            position: 0,
            answers,
            phase: Phase::Initializing,
            latest_turn: None,
            summary: None,
        }
    }

    /// Applies `event` and returns the command the runtime must execute.
    ///
    /// Events that make no sense in the current phase (a second submit while
    /// one is in flight, a submit after completion, a stray response) leave
    /// the session untouched and return `None`.
    pub fn transition(&mut self, event: SessionEvent) -> Option<Command> {
        match (self.phase, event) {
            (Phase::Initializing, SessionEvent::Start) => {
                self.phase = Phase::Opening;
                Some(Command::RequestTurn(TurnRequest::opening(self.config.clone())))
            }
            (Phase::Opening, SessionEvent::TurnReceived(turn)) => {
                if self.index.total() == 0 {
                    info!("Interview plan has no questions; completing immediately");
                    self.complete(&turn);
                } else {
                    self.phase = Phase::AwaitingAnswer;
                }
                self.latest_turn = Some(turn);
                Some(Command::ResetInput)
            }
            (Phase::Opening, SessionEvent::TurnFailed(reason)) => {
                warn!(%reason, "Opening turn failed");
                self.phase = Phase::Initializing;
                None
            }
            (Phase::AwaitingAnswer, SessionEvent::Submit(answer)) => {
                let cursor = self.index.locate(self.position)?;
                self.answers[self.position] = answer.clone();
                let stage = &self.config.interview_process[cursor.stage_index];
                let request = TurnRequest {
                    configuration: self.config.clone(),
                    user_input: answer,
                    current_stage: Some(stage.clone()),
                    current_question: Some(stage.questions[cursor.question_index].clone()),
                    answers: self.answers.clone(),
                };
                self.phase = Phase::Submitting;
                Some(Command::RequestTurn(request))
            }
            (Phase::Submitting, SessionEvent::TurnReceived(turn)) => {
                self.position += 1;
                if self.position >= self.index.total() {
                    self.complete(&turn);
                } else {
                    self.phase = Phase::AwaitingAnswer;
                }
                self.latest_turn = Some(turn);
                Some(Command::ResetInput)
            }
            (Phase::Submitting, SessionEvent::TurnFailed(reason)) => {
                // The recorded answer is kept; resubmitting retries the same question.
                warn!(%reason, question_number = self.position + 1, "Turn failed");
                self.phase = Phase::AwaitingAnswer;
                None
            }
            (phase, event) => {
                debug!(?phase, ?event, "Ignoring event");
                None
            }
        }
    }

    fn complete(&mut self, turn: &TurnResult) {
        self.phase = Phase::Complete;
        self.summary = Some(turn.overall_evaluation.clone());
        info!(
            total_score = turn.overall_evaluation.total_score,
            "Interview complete"
        );
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a turn request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Opening | Phase::Submitting)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn configuration(&self) -> &InterviewConfiguration {
        &self.config
    }

    pub fn question_index(&self) -> &QuestionIndex {
        &self.index
    }

    /// Cursor of the question being answered, `None` once all are answered.
    pub fn cursor(&self) -> Option<Cursor> {
        self.index.locate(self.position)
    }

    pub fn current_stage(&self) -> Option<&Stage> {
        self.cursor()
            .map(|c| &self.config.interview_process[c.stage_index])
    }

    pub fn current_question(&self) -> Option<&str> {
        let cursor = self.cursor()?;
        let stage = &self.config.interview_process[cursor.stage_index];
        Some(stage.questions[cursor.question_index].as_str())
    }

    pub fn total_questions(&self) -> usize {
        self.index.total()
    }

    /// 1-based number of the current question, capped at the total.
    pub fn current_question_number(&self) -> usize {
        (self.position + 1).min(self.index.total())
    }

    /// Number of questions whose turn has completed.
    pub fn answered_count(&self) -> usize {
        self.position
    }

    /// Progress through the plan in percent; 0 for a plan without questions.
    pub fn progress_percent(&self) -> f64 {
        let total = self.index.total();
        if total == 0 {
            return 0.0;
        }
        self.current_question_number() as f64 / total as f64 * 100.0
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn latest_turn(&self) -> Option<&TurnResult> {
        self.latest_turn.as_ref()
    }

    /// Final overall evaluation, set on completion.
    pub fn summary(&self) -> Option<&OverallEvaluation> {
        self.summary.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{InterviewStatus, fixtures};
    use approx::assert_relative_eq;

    fn turn(summary: &str) -> TurnResult {
        fixtures::turn_result(summary, InterviewStatus::InProgress)
    }

    fn started(config: InterviewConfiguration) -> InterviewSession {
        let mut session = InterviewSession::new(config);
        assert!(session.transition(SessionEvent::Start).is_some());
        assert!(matches!(
            session.transition(SessionEvent::TurnReceived(turn("opening"))),
            Some(Command::ResetInput)
        ));
        session
    }

    /// Submits `answer` and answers the resulting request successfully.
    fn answer(session: &mut InterviewSession, answer: &str, summary: &str) {
        let command = session.transition(SessionEvent::Submit(answer.to_string()));
        assert!(matches!(command, Some(Command::RequestTurn(_))));
        session.transition(SessionEvent::TurnReceived(turn(summary)));
    }

    #[test]
    fn test_question_index_skips_empty_stages() {
        let config = fixtures::configuration(vec![
            fixtures::stage("Empty", &[]),
            fixtures::stage("A", &["a1"]),
            fixtures::stage("Gap", &[]),
            fixtures::stage("B", &["b1", "b2"]),
            fixtures::stage("Tail", &[]),
        ]);
        let index = QuestionIndex::new(&config.interview_process);
        assert_eq!(index.total(), 3);

        let located: Vec<_> = (0..3)
            .map(|p| index.locate(p).map(|c| (c.stage_index, c.question_index)))
            .collect();
        assert_eq!(located, [Some((1, 0)), Some((3, 0)), Some((3, 1))]);
        assert_eq!(index.locate(3), None);

        for p in 0..3 {
            assert_eq!(index.position(index.locate(p).unwrap()), p);
        }
    }

    #[test]
    fn test_new_session_preallocates_answers() {
        let config = fixtures::configuration(vec![
            fixtures::stage("A", &["a1", "a2"]),
            fixtures::stage("B", &["b1", "b2", "b3"]),
        ]);
        let session = InterviewSession::new(config);
        assert_eq!(session.answers().len(), 5);
        assert!(session.answers().iter().all(String::is_empty));
        assert_eq!(session.phase(), Phase::Initializing);
        assert_eq!(session.current_question_number(), 1);
    }

    #[test]
    fn test_start_requests_opening_turn() {
        let mut session = InterviewSession::new(fixtures::screening());
        let Some(Command::RequestTurn(request)) = session.transition(SessionEvent::Start) else {
            panic!("Expected a turn request");
        };
        assert!(request.user_input.is_empty());
        assert!(request.current_stage.is_none());
        assert_eq!(request.answers, ["", ""]);
        assert!(session.is_loading());
    }

    #[test]
    fn test_first_answer_scenario() {
        let mut session = started(fixtures::screening());
        assert_eq!(session.answers(), ["", ""]);
        assert_eq!(session.current_question_number(), 1);

        let Some(Command::RequestTurn(request)) =
            session.transition(SessionEvent::Submit("I am a backend engineer".to_string()))
        else {
            panic!("Expected a turn request");
        };
        assert_eq!(request.user_input, "I am a backend engineer");
        assert_eq!(request.current_question.as_deref(), Some("Tell me about yourself"));
        assert_eq!(
            request.current_stage.as_ref().map(|s| s.stage_name.as_str()),
            Some("Screening")
        );
        assert_eq!(request.answers, ["I am a backend engineer", ""]);

        session.transition(SessionEvent::TurnReceived(turn("first")));
        assert_eq!(session.answers(), ["I am a backend engineer", ""]);
        assert_eq!(session.current_question_number(), 2);
        assert_eq!(
            session.cursor(),
            Some(Cursor {
                stage_index: 0,
                question_index: 1
            })
        );
        assert!(!session.is_complete());
        assert_eq!(session.current_question(), Some("Why this role?"));
    }

    #[test]
    fn test_last_answer_completes_with_summary() {
        let mut session = started(fixtures::screening());
        answer(&mut session, "I am a backend engineer", "first");

        session.transition(SessionEvent::Submit("Great culture".to_string()));
        let mut last = fixtures::turn_result("Strong candidate", InterviewStatus::Completed);
        last.overall_evaluation.total_score = 17.0;
        session.transition(SessionEvent::TurnReceived(last));

        assert!(session.is_complete());
        let summary = session.summary().unwrap();
        assert_eq!(summary.summary, "Strong candidate");
        assert_eq!(summary.total_score, 17.0);
        assert_eq!(session.current_question_number(), 2);
        assert_eq!(session.cursor(), None);
        assert_eq!(session.answers(), ["I am a backend engineer", "Great culture"]);
    }

    #[test]
    fn test_cursor_moves_across_stages() {
        let config = fixtures::configuration(vec![
            fixtures::stage("A", &["a1"]),
            fixtures::stage("B", &["b1", "b2"]),
        ]);
        let mut session = started(config);
        answer(&mut session, "one", "t1");
        assert_eq!(
            session.cursor(),
            Some(Cursor {
                stage_index: 1,
                question_index: 0
            })
        );
        assert_eq!(session.current_stage().unwrap().stage_name, "B");
    }

    #[test]
    fn test_submit_while_in_flight_is_noop() {
        let mut session = started(fixtures::screening());
        assert!(session.transition(SessionEvent::Submit("first".to_string())).is_some());

        assert!(session.transition(SessionEvent::Submit("second".to_string())).is_none());
        assert_eq!(session.phase(), Phase::Submitting);
        assert_eq!(session.answers(), ["first", ""]);
        assert_eq!(session.current_question_number(), 1);

        session.transition(SessionEvent::TurnReceived(turn("t")));
        assert_eq!(session.current_question_number(), 2);
    }

    #[test]
    fn test_failed_turn_keeps_cursor_and_answer() {
        let mut session = started(fixtures::screening());
        session.transition(SessionEvent::Submit("I am a backend engineer".to_string()));
        let command = session.transition(SessionEvent::TurnFailed("connection reset".to_string()));

        assert!(command.is_none());
        assert!(!session.is_loading());
        assert_eq!(session.phase(), Phase::AwaitingAnswer);
        assert_eq!(session.current_question_number(), 1);
        assert_eq!(session.current_question(), Some("Tell me about yourself"));
        assert_eq!(session.answers()[0], "I am a backend engineer");
        assert_eq!(session.latest_turn().unwrap().overall_evaluation.summary, "opening");

        // Resubmitting retries the same question.
        let Some(Command::RequestTurn(request)) =
            session.transition(SessionEvent::Submit("I am a backend engineer".to_string()))
        else {
            panic!("Expected a turn request");
        };
        assert_eq!(request.current_question.as_deref(), Some("Tell me about yourself"));
    }

    #[test]
    fn test_failed_opening_turn_allows_restart() {
        let mut session = InterviewSession::new(fixtures::screening());
        session.transition(SessionEvent::Start);
        session.transition(SessionEvent::TurnFailed("timeout".to_string()));
        assert_eq!(session.phase(), Phase::Initializing);
        assert!(session.transition(SessionEvent::Start).is_some());
    }

    #[test]
    fn test_submit_before_opening_turn_is_ignored() {
        let mut session = InterviewSession::new(fixtures::screening());
        assert!(session.transition(SessionEvent::Submit("early".to_string())).is_none());
        assert_eq!(session.answers(), ["", ""]);
    }

    #[test]
    fn test_empty_plan_completes_without_dividing() {
        let mut session = InterviewSession::new(fixtures::configuration(vec![]));
        assert_eq!(session.total_questions(), 0);
        assert_eq!(session.current_question_number(), 0);
        assert_eq!(session.progress_percent(), 0.0);

        session.transition(SessionEvent::Start);
        session.transition(SessionEvent::TurnReceived(turn("nothing to ask")));
        assert!(session.is_complete());
        assert_eq!(session.summary().unwrap().summary, "nothing to ask");
        assert!(session.progress_percent().is_finite());
        assert!(session.transition(SessionEvent::Submit("x".to_string())).is_none());
    }

    #[test]
    fn test_progress_percent() {
        let config = fixtures::configuration(vec![fixtures::stage("A", &["1", "2", "3"])]);
        let mut session = started(config);
        assert_relative_eq!(session.progress_percent(), 100.0 / 3.0);
        answer(&mut session, "x", "t");
        assert_relative_eq!(session.progress_percent(), 200.0 / 3.0);
        answer(&mut session, "y", "t");
        answer(&mut session, "z", "t");
        assert_relative_eq!(session.progress_percent(), 100.0);
    }

    #[test]
    fn test_question_number_is_monotonic_and_bounded() {
        let plans = [
            vec![fixtures::stage("A", &["1"])],
            vec![fixtures::stage("A", &["1", "2"]), fixtures::stage("B", &["3"])],
            vec![
                fixtures::stage("A", &[]),
                fixtures::stage("B", &["1", "2", "3"]),
                fixtures::stage("C", &[]),
                fixtures::stage("D", &["4"]),
            ],
        ];
        for stages in plans {
            let mut session = started(fixtures::configuration(stages));
            let total = session.total_questions();
            for n in 1..=total {
                assert_eq!(session.current_question_number(), n);
                assert!(!session.is_complete());
                answer(&mut session, &format!("answer {n}"), "t");
                assert!(session.current_question_number() <= total);
                assert_eq!(session.answers().len(), total);
            }
            assert!(session.is_complete());
            assert_eq!(session.answered_count(), total);
        }
    }

    #[test]
    fn test_stray_response_is_ignored() {
        let mut session = started(fixtures::screening());
        assert!(
            session
                .transition(SessionEvent::TurnReceived(turn("late")))
                .is_none()
        );
        assert_eq!(session.current_question_number(), 1);
        assert_eq!(session.latest_turn().unwrap().overall_evaluation.summary, "opening");
    }
}
