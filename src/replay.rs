//! Scripted replay of editor events
//!
//! A script describes one document, the rule spans a stylesheet parser found
//! in it, the editor views that exist, and a sequence of focus and cursor
//! events. Replaying drives a real [`HighlightController`] with the in-process
//! registry and views, and records the agent commands each event produced.
//!
//! ```yaml
//! document: 1
//! rules:
//!   - { start: { line: 0, column: 0 }, end: { line: 3, column: 1 }, selector: ".nav" }
//! views:
//!   - { id: 1, document: 1 }
//! events:
//!   - { event: focus, view: 1 }
//!   - { event: open }
//!   - { event: select, view: 1, selections: [ { anchor: { line: 1, column: 2 }, head: { line: 1, column: 2 } } ] }
//!   - { event: close }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;
use std::sync::mpsc;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::agent::{ChannelAgent, HighlightCommand};
use crate::config::HighlightToggle;
use crate::controller::{Collaborators, HighlightController};
use crate::document::{Document, DocumentId};
use crate::resolver::{RuleSpan, RuleTable};
use crate::selection::Selection;
use crate::view::{ActiveViews, BufferView, EditorView, ViewId};

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Id of the document opened for live development
    pub document: u64,
    #[serde(default)]
    pub rules: Vec<RuleSpan>,
    #[serde(default)]
    pub views: Vec<ViewSpec>,
    /// Initial state of the highlight switch; config decides when absent
    #[serde(default)]
    pub highlight: Option<bool>,
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewSpec {
    pub id: u64,
    pub document: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    /// Start the live-development session (create the controller)
    Open,
    /// End the session
    Close,
    Focus {
        view: u64,
    },
    /// Focus leaves every editor
    Blur,
    Select {
        view: u64,
        selections: Vec<Selection>,
    },
    SetHighlight {
        enabled: bool,
    },
}

/// Commands produced by one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub event: ScriptEvent,
    pub commands: Vec<HighlightCommand>,
}

#[derive(Debug, Clone)]
pub struct ReplayReport {
    pub steps: Vec<Step>,
    /// Reference count left on the document after the session ended
    pub document_refs: usize,
}

impl ReplayReport {
    pub fn commands(&self) -> impl Iterator<Item = &HighlightCommand> {
        self.steps.iter().flat_map(|step| step.commands.iter())
    }
}

impl Script {
    /// Parse a script; JSON input is accepted since it is valid YAML
    pub fn parse(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("In script {}", path.display()))
    }
}

/// Replay `script` with highlighting initially `highlight`.
///
/// A session still open after the last event is closed implicitly and
/// reported as a trailing `close` step.
pub fn run(script: &Script, highlight: bool) -> Result<ReplayReport> {
    let document_id = DocumentId(script.document);
    let document = Rc::new(Document::new(document_id));

    let mut rules = RuleTable::new();
    rules.set_rules(document_id, script.rules.clone());

    let mut views: HashMap<u64, Rc<BufferView>> = HashMap::new();
    for spec in &script.views {
        let view = Rc::new(BufferView::new(ViewId(spec.id), DocumentId(spec.document)));
        if views.insert(spec.id, view).is_some() {
            bail!("View {} declared twice", spec.id);
        }
    }

    let registry = ActiveViews::new();
    let toggle = HighlightToggle::new(highlight);
    let (tx, rx) = mpsc::channel();
    let collaborators = Collaborators {
        resolver: Rc::new(rules),
        agent: Rc::new(ChannelAgent::new(tx)),
        setting: Rc::new(toggle.clone()),
    };

    let view = |id: u64, index: usize| -> Result<Rc<BufferView>> {
        views
            .get(&id)
            .cloned()
            .with_context(|| format!("Event #{} refers to unknown view {}", index, id))
    };

    let mut controller: Option<HighlightController> = None;
    let mut steps = Vec::with_capacity(script.events.len());

    for (index, event) in script.events.iter().enumerate() {
        tracing::debug!("Replaying #{}: {:?}", index, event);
        match event {
            ScriptEvent::Open => {
                if controller.is_some() {
                    tracing::warn!("Event #{}: session already open", index);
                } else {
                    controller = Some(HighlightController::new(
                        document.clone(),
                        &registry,
                        collaborators.clone(),
                    ));
                }
            }
            ScriptEvent::Close => match controller.take() {
                Some(controller) => controller.close(),
                None => tracing::warn!("Event #{}: no session to close", index),
            },
            ScriptEvent::Focus { view: id } => {
                let view: Rc<dyn EditorView> = view(*id, index)?;
                registry.set_active(Some(view));
            }
            ScriptEvent::Blur => registry.set_active(None),
            ScriptEvent::Select {
                view: id,
                selections,
            } => view(*id, index)?.set_selections(selections.clone()),
            ScriptEvent::SetHighlight { enabled } => toggle.set(*enabled),
        }

        steps.push(Step {
            index,
            event: event.clone(),
            commands: rx.try_iter().collect(),
        });
    }

    if let Some(controller) = controller.take() {
        controller.close();
        steps.push(Step {
            index: script.events.len(),
            event: ScriptEvent::Close,
            commands: rx.try_iter().collect(),
        });
    }

    Ok(ReplayReport {
        steps,
        document_refs: document.ref_count(),
    })
}
