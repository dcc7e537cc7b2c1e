//! Scripted voice session
//!
//! Replays a recorded provider-event script (one JSON event per line) as if
//! a live voice provider emitted it, and prints everything the interviewer
//! would have said.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use colored::Colorize;
use tokio::sync::mpsc;

use prepwise::{
    DomainError, EventSubscription, Navigator, Route, VoiceEvent, VoiceSession, WebCallConfig,
};

type Sender = Arc<Mutex<Option<mpsc::UnboundedSender<VoiceEvent>>>>;

/// Voice provider stand-in driven by a fixed event list
pub struct ScriptedVoiceSession {
    events: Vec<VoiceEvent>,
    sender: Sender,
    spoken: Mutex<Vec<String>>,
}

impl ScriptedVoiceSession {
    pub fn new(events: Vec<VoiceEvent>) -> Self {
        Self {
            events,
            sender: Arc::new(Mutex::new(None)),
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Load a script file; blank lines and `#` comments are skipped
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        Ok(Self::new(parse_script(&content)?))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Questions the interviewer spoke so far
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Deliver the whole script to the subscriber, then hang up the line.
    ///
    /// Closing the channel lets a session without a scripted call-end drain.
    pub fn play(&self) {
        let Ok(mut sender) = self.sender.lock() else {
            return;
        };
        if let Some(tx) = sender.take() {
            for event in &self.events {
                if tx.send(event.clone()).is_err() {
                    break;
                }
            }
        }
    }
}

/// Parse a JSONL provider-event script
pub fn parse_script(content: &str) -> Result<Vec<VoiceEvent>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(number, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid event on line {}", number))
        })
        .collect()
}

#[async_trait]
impl VoiceSession for ScriptedVoiceSession {
    async fn start(&self, config: &WebCallConfig) -> Result<(), DomainError> {
        tracing::info!(workflow_id = %config.workflow_id, "Starting scripted web call");
        self.play();
        Ok(())
    }

    async fn stop(&self) -> Result<(), DomainError> {
        if let Ok(mut sender) = self.sender.lock() {
            sender.take();
        }
        println!("{}", "Call ended".dimmed());
        Ok(())
    }

    fn send_assistant_message(&self, content: &str) -> Result<(), DomainError> {
        println!("{} {}", "Interviewer:".cyan().bold(), content);
        self.spoken
            .lock()
            .map_err(|_| DomainError::ExternalService("voice session poisoned".to_string()))?
            .push(content.to_string());
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut sender) = self.sender.lock() {
            *sender = Some(tx);
        }
        let sender = self.sender.clone();
        EventSubscription::new(rx, move || {
            if let Ok(mut sender) = sender.lock() {
                sender.take();
            }
        })
    }
}

/// Prints navigation and remembers where the session ended up
#[derive(Default)]
pub struct ConsoleNavigator {
    last: Mutex<Option<Route>>,
}

impl ConsoleNavigator {
    pub fn last_route(&self) -> Option<Route> {
        self.last.lock().ok().and_then(|r| r.clone())
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: Route) {
        println!("{} {}", "→".green(), route);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(route);
        }
    }
}
