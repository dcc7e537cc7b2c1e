//! Question Sequencer
//!
//! Walks an interview's question list one utterance at a time and speaks
//! each question into the live call.

use crate::ports::VoiceSession;

/// Ordered question list with a cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionSequencer {
    questions: Vec<String>,
    cursor: usize,
    started: bool,
}

impl QuestionSequencer {
    pub fn new(questions: Vec<String>) -> Self {
        Self {
            questions,
            cursor: 0,
            started: false,
        }
    }

    /// Move to the next question and return its index, or `None` when
    /// nothing should be asked.
    ///
    /// The first call selects index 0 without moving the cursor. Once the
    /// list is exhausted the cursor stays on the last question and further
    /// calls return `None`.
    pub fn next_index(&mut self) -> Option<usize> {
        if self.questions.is_empty() {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(self.cursor);
        }

        let next = self.cursor + 1;
        if next < self.questions.len() {
            self.cursor = next;
            Some(next)
        } else {
            None
        }
    }

    /// Advance and speak the selected question into the call.
    ///
    /// A provider that refuses the message is logged; the session carries on.
    pub fn advance(&mut self, voice: &dyn VoiceSession) -> Option<usize> {
        let index = self.next_index()?;
        let question = &self.questions[index];

        if let Err(e) = voice.send_assistant_message(question) {
            tracing::warn!("Failed to send question {}: {}", index, e);
        } else {
            tracing::debug!(index, "Asked question");
        }

        Some(index)
    }

    /// Forget progress, keeping the question list
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.started = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Question the cursor points at, once delivery has begun
    pub fn current_question(&self) -> Option<&str> {
        if self.started {
            self.questions.get(self.cursor).map(String::as_str)
        } else {
            None
        }
    }
}
