//! Transcript formatting

use crate::domain::entities::TranscriptMessage;

/// Render a transcript as one `- {role}: {content}` line per message
pub fn format_transcript(messages: &[TranscriptMessage]) -> String {
    messages
        .iter()
        .map(|m| format!("- {}: {}\n", m.role, m.content))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_transcript() {
        let messages = vec![
            TranscriptMessage::assistant("Tell me about yourself."),
            TranscriptMessage::user("I build compilers."),
        ];

        assert_eq!(
            format_transcript(&messages),
            "- assistant: Tell me about yourself.\n- user: I build compilers.\n"
        );
    }

    #[test]
    fn test_format_empty_transcript() {
        assert_eq!(format_transcript(&[]), "");
    }
}
