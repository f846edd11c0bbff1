//! Live highlight - keeps a live preview highlight on the rule under the cursor
//!
//! A [`HighlightController`] binds one document to whichever editor view is
//! active for it, resolves each cursor to the enclosing rule through a
//! [`SelectorResolver`], and drives a [`HighlightAgent`] in the connected
//! preview. Every collaborator is a trait so hosts can plug in their own
//! editor, parser and preview channel.

pub mod agent;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod controller;
pub mod document;
pub mod events;
pub mod replay;
pub mod resolver;
pub mod selection;
pub mod tracing;
pub mod view;

// Re-export commonly used types
pub use agent::{HighlightAgent, HighlightCommand};
pub use config::{HighlightConfig, HighlightSetting, HighlightToggle};
pub use controller::{Collaborators, HighlightController};
pub use document::{Document, DocumentHandle, DocumentId};
pub use resolver::SelectorResolver;
pub use selection::{Position, Selection};
pub use view::{ActiveViewRegistry, EditorView, ViewId};
