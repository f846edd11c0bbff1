//! Commands sent to the live preview's highlighter

use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

/// Remote highlighter in the live preview.
///
/// Both commands are idempotent; sending the same one twice is harmless.
pub trait HighlightAgent {
    /// Highlight every node matched by `selector` (may be a comma-joined union)
    fn highlight(&self, selector: &str);

    fn hide(&self);
}

/// Wire form of an agent command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HighlightCommand {
    Highlight { selector: String },
    Hide,
}

/// Agent that forwards commands over a channel to whatever owns the preview connection
#[derive(Debug, Clone)]
pub struct ChannelAgent {
    tx: Sender<HighlightCommand>,
}

impl ChannelAgent {
    pub fn new(tx: Sender<HighlightCommand>) -> Self {
        Self { tx }
    }

    fn send(&self, command: HighlightCommand) {
        if let Err(e) = self.tx.send(command) {
            // Preview connection already gone; nothing left to highlight
            tracing::debug!("Dropped highlight command {:?}: receiver closed", e.0);
        }
    }
}

impl HighlightAgent for ChannelAgent {
    fn highlight(&self, selector: &str) {
        self.send(HighlightCommand::Highlight {
            selector: selector.to_string(),
        });
    }

    fn hide(&self) {
        self.send(HighlightCommand::Hide);
    }
}
