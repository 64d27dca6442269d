//! Voice Capture
//!
//! Bridges a continuous speech-recognition source into the answer buffer.
//! Final transcripts are appended to the buffer; interim ones are only shown
//! after it. Hosts without a recognizer get `VoiceCapture::Unavailable`,
//! which accepts the same calls and does nothing.

use anyhow::Result;
use tracing::{debug, warn};

/// One recognition result from the speech source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEvent {
    pub text: String,
    pub is_final: bool,
}

impl TranscriptEvent {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// A continuous speech recognizer that reports results through
/// `VoiceCapture::on_transcript`.
pub trait SpeechRecognizer: Send {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
}

/// The recognizer plus the listening flag and the uncommitted interim text.
pub struct VoiceAdapter {
    recognizer: Box<dyn SpeechRecognizer>,
    listening: bool,
    interim: String,
}

/// Speech input capability, chosen once at startup.
pub enum VoiceCapture {
    Available(VoiceAdapter),
    Unavailable,
}

impl VoiceCapture {
    pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
        match recognizer {
            Some(recognizer) => VoiceCapture::Available(VoiceAdapter {
                recognizer,
                listening: false,
                interim: String::new(),
            }),
            None => VoiceCapture::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, VoiceCapture::Available(_))
    }

    pub fn is_listening(&self) -> bool {
        match self {
            VoiceCapture::Available(adapter) => adapter.listening,
            VoiceCapture::Unavailable => false,
        }
    }

    pub fn interim(&self) -> &str {
        match self {
            VoiceCapture::Available(adapter) => &adapter.interim,
            VoiceCapture::Unavailable => "",
        }
    }

    pub fn start(&mut self) {
        let VoiceCapture::Available(adapter) = self else {
            debug!("Speech recognition unavailable; ignoring start");
            return;
        };
        if adapter.listening {
            return;
        }
        adapter.interim.clear();
        match adapter.recognizer.start() {
            Ok(()) => adapter.listening = true,
            Err(e) => warn!(error = ?e, "Failed to start speech recognition"),
        }
    }

    pub fn stop(&mut self) {
        let VoiceCapture::Available(adapter) = self else {
            return;
        };
        adapter.interim.clear();
        if adapter.listening {
            adapter.listening = false;
            adapter.recognizer.stop();
        }
    }

    pub fn toggle(&mut self) {
        if self.is_listening() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Applies a recognition result to `buffer`. Ignored unless listening.
    pub fn on_transcript(&mut self, buffer: &mut String, event: TranscriptEvent) {
        let VoiceCapture::Available(adapter) = self else {
            return;
        };
        if !adapter.listening {
            return;
        }
        if event.is_final {
            let joined = format!("{} {}", buffer, event.text);
            *buffer = joined.trim().to_string();
            adapter.interim.clear();
        } else {
            adapter.interim = event.text;
        }
    }

    /// What the input field shows: the committed buffer, then interim text
    /// while listening.
    pub fn display(&self, buffer: &str) -> String {
        let interim = self.interim();
        if self.is_listening() && !interim.is_empty() {
            format!("{buffer} {interim}")
        } else {
            buffer.to_string()
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeRecognizer;
    use super::*;

    fn capture() -> (VoiceCapture, FakeRecognizer) {
        let fake = FakeRecognizer::default();
        (VoiceCapture::new(Some(Box::new(fake.clone()))), fake)
    }

    #[test]
    fn test_final_text_is_appended_with_single_space() {
        let (mut voice, _) = capture();
        let mut buffer = "I have".to_string();
        voice.start();

        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("five years "));
        assert_eq!(buffer, "I have five years");
        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("of Rust"));
        assert_eq!(buffer, "I have five years of Rust");
    }

    #[test]
    fn test_final_text_into_empty_buffer_is_trimmed() {
        let (mut voice, _) = capture();
        let mut buffer = String::new();
        voice.start();
        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("hello"));
        assert_eq!(buffer, "hello");
    }

    #[test]
    fn test_interim_text_is_displayed_but_not_committed() {
        let (mut voice, _) = capture();
        let mut buffer = "I led".to_string();
        voice.start();

        voice.on_transcript(&mut buffer, TranscriptEvent::interim("a team of"));
        assert_eq!(buffer, "I led");
        assert_eq!(voice.display(&buffer), "I led a team of");

        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("a team of four"));
        assert_eq!(buffer, "I led a team of four");
        assert_eq!(voice.interim(), "");
        assert_eq!(voice.display(&buffer), "I led a team of four");
    }

    #[test]
    fn test_stop_clears_interim_and_halts_source() {
        let (mut voice, fake) = capture();
        let mut buffer = String::new();
        voice.start();
        voice.on_transcript(&mut buffer, TranscriptEvent::interim("pending"));

        voice.stop();
        assert!(!voice.is_listening());
        assert_eq!(voice.interim(), "");
        assert_eq!(fake.starts(), 1);
        assert_eq!(fake.stops(), 1);

        // Late events after stopping are dropped.
        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("late"));
        assert_eq!(buffer, "");
    }

    #[test]
    fn test_start_resets_interim_and_is_idempotent() {
        let (mut voice, fake) = capture();
        let mut buffer = String::new();
        voice.start();
        voice.on_transcript(&mut buffer, TranscriptEvent::interim("half"));
        voice.start();
        assert_eq!(fake.starts(), 1);

        voice.toggle();
        voice.toggle();
        assert!(voice.is_listening());
        assert_eq!(voice.interim(), "");
        assert_eq!(fake.starts(), 2);
    }

    #[test]
    fn test_failed_start_stays_idle() {
        let fake = FakeRecognizer {
            fail: true,
            ..Default::default()
        };
        let mut voice = VoiceCapture::new(Some(Box::new(fake)));
        voice.start();
        assert!(!voice.is_listening());
    }

    #[test]
    fn test_unavailable_capture_is_a_noop() {
        let mut voice = VoiceCapture::new(None);
        let mut buffer = "typed".to_string();
        assert!(!voice.is_available());

        voice.start();
        assert!(!voice.is_listening());
        voice.on_transcript(&mut buffer, TranscriptEvent::finalized("spoken"));
        voice.stop();
        assert_eq!(buffer, "typed");
        assert_eq!(voice.display(&buffer), "typed");
    }
}
