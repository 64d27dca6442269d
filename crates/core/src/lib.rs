pub mod error;
pub mod http_client;
pub mod limits;
pub mod llm_client;
pub mod prompts;
pub mod report;
pub mod runner;
pub mod schema;
pub mod service;
pub mod session;
pub mod voice;

#[cfg(test)]
mod test_server;

use schema::TurnRequest;

/// Represents commands that the session state machine issues to a runtime.
///
/// This enum decouples the session's decision-making from the runtime's
/// execution of side effects (calling the interview service or resetting
/// the answer input).
#[derive(Debug, Clone)]
pub enum Command {
    /// Command the runtime to send this turn to the interview service and
    /// report the outcome back as a `SessionEvent`.
    RequestTurn(TurnRequest),
    /// Command the runtime to clear the answer buffer and stop listening.
    ResetInput,
}
