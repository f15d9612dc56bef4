//! Navigation history for the embedded web content.
//!
//! The overlay does not own the web engine; it observes the engine's location
//! changes and keeps two stacks beside the current location:
//!
//! ```text
//!   back stack            current          forward stack
//!   [a, b, c]  <-- back --  d  -- forward -->  [f, e]
//!   (top = last)                               (top = last)
//! ```
//!
//! Back and forward move one location between the stacks through `current`.
//! Observed navigations push `current` onto the back stack. What happens to
//! the forward stack at that point is governed by [`ForwardPolicy`].

use crate::listener::HistoryListener;
use crate::{debug_log, trace_log};
use std::fmt;

// ============================================================================
// Events & commands
// ============================================================================

/// What kind of move produced a [`HistoryChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    /// The content navigated on its own (link tap, redirect, script)
    Navigate,
    /// The user pressed back
    Back,
    /// The user pressed forward
    Forward,
}

/// An effective change of the current location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryChange {
    pub from: String,
    pub to: String,
    pub direction: HistoryDirection,
}

/// History mutations expressed as messages, for hosts that route UI events
/// through a single dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryCommand {
    RecordNavigation(String),
    GoBack,
    GoForward,
    Reset(String),
}

/// Fate of the forward stack when the content navigates somewhere new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForwardPolicy {
    /// Keep forward entries. A forward press after navigating elsewhere
    /// returns to a location that is no longer "ahead" of the current one.
    #[default]
    Retain,
    /// Drop forward entries, as desktop browsers do.
    ClearOnNavigate,
}

// ============================================================================
// NavigationHistory
// ============================================================================

/// Back/forward stacks around the current location.
pub struct NavigationHistory {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
    policy: ForwardPolicy,
    /// Upper bound for each stack; oldest entries are evicted first
    max_depth: Option<usize>,
    listeners: Vec<Box<dyn HistoryListener>>,
}

impl NavigationHistory {
    /// Create a history positioned at `initial` with both stacks empty.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            current: initial.into(),
            back: Vec::new(),
            forward: Vec::new(),
            policy: ForwardPolicy::default(),
            max_depth: None,
            listeners: Vec::new(),
        }
    }

    /// Set the forward stack policy.
    pub fn with_policy(mut self, policy: ForwardPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound each stack to `depth` entries. A depth of 0 leaves the stacks
    /// unbounded.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = (depth > 0).then_some(depth);
        self
    }

    /// Register a listener for effective changes.
    pub fn add_listener(&mut self, listener: impl HistoryListener) {
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Back stack, most recent last.
    pub fn back_stack(&self) -> &[String] {
        &self.back
    }

    /// Forward stack, most recent last.
    pub fn forward_stack(&self) -> &[String] {
        &self.forward
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Location `go_back` would move to.
    pub fn peek_back(&self) -> Option<&str> {
        self.back.last().map(String::as_str)
    }

    /// Location `go_forward` would move to.
    pub fn peek_forward(&self) -> Option<&str> {
        self.forward.last().map(String::as_str)
    }

    pub fn policy(&self) -> ForwardPolicy {
        self.policy
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Record a location change observed from the content.
    ///
    /// Returns `None` when `location` is already current.
    pub fn record_navigation(&mut self, location: impl Into<String>) -> Option<HistoryChange> {
        let location = location.into();
        if location == self.current {
            trace_log!("record_navigation ignored: '{}' is already current", location);
            return None;
        }

        let from = std::mem::replace(&mut self.current, location);
        push_bounded(&mut self.back, from.clone(), self.max_depth);
        if self.policy == ForwardPolicy::ClearOnNavigate {
            self.forward.clear();
        }

        debug_log!(
            "Recorded navigation '{}' -> '{}' (back={}, forward={})",
            from,
            self.current,
            self.back.len(),
            self.forward.len()
        );
        Some(self.emit(from, HistoryDirection::Navigate))
    }

    /// Step back one location. Returns `None` when the back stack is empty.
    pub fn go_back(&mut self) -> Option<HistoryChange> {
        let Some(target) = self.back.pop() else {
            trace_log!("go_back ignored: back stack empty");
            return None;
        };

        let from = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.forward, from.clone(), self.max_depth);

        debug_log!("Back '{}' -> '{}'", from, self.current);
        Some(self.emit(from, HistoryDirection::Back))
    }

    /// Step forward one location. Returns `None` when the forward stack is empty.
    pub fn go_forward(&mut self) -> Option<HistoryChange> {
        let Some(target) = self.forward.pop() else {
            trace_log!("go_forward ignored: forward stack empty");
            return None;
        };

        let from = std::mem::replace(&mut self.current, target);
        push_bounded(&mut self.back, from.clone(), self.max_depth);

        debug_log!("Forward '{}' -> '{}'", from, self.current);
        Some(self.emit(from, HistoryDirection::Forward))
    }

    /// Clear both stacks and make `initial` current. Listeners are not notified.
    pub fn reset(&mut self, initial: impl Into<String>) {
        self.back.clear();
        self.forward.clear();
        self.current = initial.into();
        debug_log!("History reset to '{}'", self.current);
    }

    /// Apply a [`HistoryCommand`].
    pub fn apply(&mut self, command: HistoryCommand) -> Option<HistoryChange> {
        match command {
            HistoryCommand::RecordNavigation(location) => self.record_navigation(location),
            HistoryCommand::GoBack => self.go_back(),
            HistoryCommand::GoForward => self.go_forward(),
            HistoryCommand::Reset(initial) => {
                self.reset(initial);
                None
            }
        }
    }

    fn emit(&self, from: String, direction: HistoryDirection) -> HistoryChange {
        let change = HistoryChange {
            from,
            to: self.current.clone(),
            direction,
        };
        for listener in &self.listeners {
            trace_log!("Notifying listener '{}' of {:?}", listener.name(), direction);
            listener.on_change(&change);
        }
        change
    }
}

fn push_bounded(stack: &mut Vec<String>, location: String, max_depth: Option<usize>) {
    stack.push(location);
    if let Some(max) = max_depth {
        if stack.len() > max {
            let excess = stack.len() - max;
            stack.drain(..excess);
        }
    }
}

impl fmt::Debug for NavigationHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationHistory")
            .field("current", &self.current)
            .field("back", &self.back)
            .field("forward", &self.forward)
            .field("policy", &self.policy)
            .field("max_depth", &self.max_depth)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
