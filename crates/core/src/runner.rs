//! Interview Runner
//!
//! Executes the commands issued by `InterviewSession` against an
//! `InterviewService`, and owns the answer buffer the user types or dictates
//! into. Calls are strictly sequential: `&mut self` on every operation means
//! at most one turn request is in flight.

use crate::{
    Command,
    error::InterviewError,
    schema::InterviewConfiguration,
    service::InterviewService,
    session::{InterviewSession, SessionEvent},
    voice::{TranscriptEvent, VoiceCapture},
};
use std::sync::Arc;
use tracing::error;

pub struct InterviewRunner {
    service: Arc<dyn InterviewService>,
    session: InterviewSession,
    input: String,
    voice: VoiceCapture,
}

impl InterviewRunner {
    pub fn new(
        service: Arc<dyn InterviewService>,
        config: InterviewConfiguration,
        voice: VoiceCapture,
    ) -> Self {
        Self {
            service,
            session: InterviewSession::new(config),
            input: String::new(),
            voice,
        }
    }

    pub fn session(&self) -> &InterviewSession {
        &self.session
    }

    pub fn voice(&self) -> &VoiceCapture {
        &self.voice
    }

    /// The committed answer buffer.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The answer buffer as shown to the user, including interim speech.
    pub fn display_input(&self) -> String {
        self.voice.display(&self.input)
    }

    /// Replaces the answer buffer with typed text.
    pub fn type_answer(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn toggle_listening(&mut self) {
        self.voice.toggle();
    }

    pub fn on_transcript(&mut self, event: TranscriptEvent) {
        self.voice.on_transcript(&mut self.input, event);
    }

    /// Requests the opening turn. A failure leaves the session ready to
    /// start again.
    pub async fn start(&mut self) -> Result<(), InterviewError> {
        let command = self.session.transition(SessionEvent::Start);
        self.execute(command).await
    }

    /// Submits the answer buffer for the current question.
    ///
    /// On failure the answer stays recorded and in the buffer, and the
    /// session stays on the same question.
    pub async fn submit(&mut self) -> Result<(), InterviewError> {
        self.voice.stop();
        let command = self
            .session
            .transition(SessionEvent::Submit(self.input.clone()));
        self.execute(command).await
    }

    async fn execute(&mut self, mut next: Option<Command>) -> Result<(), InterviewError> {
        while let Some(command) = next.take() {
            next = match command {
                Command::RequestTurn(request) => {
                    match self.service.conduct_turn(&request).await {
                        Ok(turn) => self.session.transition(SessionEvent::TurnReceived(turn)),
                        Err(e) => {
                            error!(error = %e, status = e.status_code(), "Turn request failed");
                            self.session
                                .transition(SessionEvent::TurnFailed(e.to_string()));
                            return Err(e);
                        }
                    }
                }
                Command::ResetInput => {
                    self.input.clear();
                    self.voice.stop();
                    None
                }
            };
        }
        Ok(())
    }
}
