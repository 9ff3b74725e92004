//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current view.

use crate::session::ViewKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    /// Activate the focused row (answer or submit button)
    Select,
    /// Answer with the n-th choice directly (0-based)
    QuickPick(usize),
    Submit,
    Restart,
    Quit,
    Help,
    Dismiss,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Whether a key event triggers this binding.
    ///
    /// Shift is ignored for character keys since terminals disagree on
    /// whether `?` arrives with it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        let mut modifiers = event.modifiers;
        if matches!(event.code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        self.key == event.code && self.modifiers == modifiers
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// View-specific keybindings
    view_bindings: HashMap<ViewKind, Vec<Keybinding>>,
    /// Global keybindings (available in all views)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            view_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all views
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
            Keybinding::with_modifiers(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                KeyAction::Quit,
                "Ctrl+C",
                "Quit",
            ),
            Keybinding::new(KeyCode::Esc, KeyAction::Dismiss, "Esc", "Close help"),
        ];

        let mut answering = vec![
            Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous choice"),
            Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next choice"),
            Keybinding::new(KeyCode::Char('k'), KeyAction::NavigateUp, "K", "Previous choice"),
            Keybinding::new(KeyCode::Char('j'), KeyAction::NavigateDown, "J", "Next choice"),
            Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Answer"),
            Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "Start over"),
        ];
        for n in 0..crate::questions::CHOICE_COUNT {
            let digit = char::from_digit(n as u32 + 1, 10).unwrap_or('1');
            answering.push(Keybinding::new(
                KeyCode::Char(digit),
                KeyAction::QuickPick(n),
                "1-5",
                "Answer directly",
            ));
        }

        self.view_bindings.insert(ViewKind::Asking, answering.clone());

        let mut ready = answering;
        if let Some(select) = ready.iter_mut().find(|b| b.action == KeyAction::Select) {
            select.description = "Answer / view results".to_string();
        }
        ready.push(Keybinding::new(
            KeyCode::Char('s'),
            KeyAction::Submit,
            "S",
            "View results",
        ));
        self.view_bindings.insert(ViewKind::AwaitingSubmit, ready);

        // A request that never returns must not trap the user
        self.view_bindings.insert(
            ViewKind::Submitting,
            vec![Keybinding::new(
                KeyCode::Char('r'),
                KeyAction::Restart,
                "R",
                "Start over",
            )],
        );

        self.view_bindings.insert(
            ViewKind::ShowingResult,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Restart, "Enter", "Ask again"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Restart, "R", "Ask again"),
            ],
        );
    }

    /// Get keybindings for a specific view (includes global bindings)
    pub fn get_bindings(&self, view: ViewKind) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(view_bindings) = self.view_bindings.get(&view) {
            bindings.extend(view_bindings.iter());
        }
        bindings.extend(self.global_bindings.iter());

        bindings
    }

    /// Resolve a key event to an action in the given view
    pub fn action_for(&self, view: ViewKind, event: &KeyEvent) -> Option<KeyAction> {
        self.get_bindings(view)
            .into_iter()
            .find(|b| b.matches(event))
            .map(|b| b.action)
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, view: ViewKind) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(view);

        let priority_actions = match view {
            ViewKind::Asking => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::QuickPick(0),
                KeyAction::Help,
                KeyAction::Quit,
            ],
            ViewKind::AwaitingSubmit => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Submit,
                KeyAction::Restart,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            ViewKind::Submitting => vec![KeyAction::Restart, KeyAction::Quit],
            ViewKind::ShowingResult => vec![KeyAction::Restart, KeyAction::Help, KeyAction::Quit],
        };

        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            if action == KeyAction::NavigateUp {
                // Combine Up/Down into single item for cleaner display
                items.push(NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Choose".to_string(),
                });
            } else if let Some(binding) = bindings.iter().find(|b| b.action == action) {
                items.push(NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                });
            }
        }

        items
    }

    /// Get full help content for a view (for help overlay)
    pub fn get_help_content(&self, view: ViewKind) -> Vec<HelpSection> {
        let bindings = self.get_bindings(view);
        let mut sections = Vec::new();

        let mut push_section = |title: &str, filter: &dyn Fn(&KeyAction) -> bool| {
            let mut items: Vec<(String, String)> = Vec::new();
            for b in bindings.iter().filter(|b| filter(&b.action)) {
                let item = (b.display.clone(), b.description.clone());
                if !items.contains(&item) {
                    items.push(item);
                }
            }
            if !items.is_empty() {
                sections.push(HelpSection {
                    title: title.to_string(),
                    items,
                });
            }
        };

        push_section("Navigation", &|a: &KeyAction| {
            matches!(a, KeyAction::NavigateUp | KeyAction::NavigateDown)
        });
        push_section("Actions", &|a: &KeyAction| {
            matches!(
                a,
                KeyAction::Select | KeyAction::QuickPick(_) | KeyAction::Submit | KeyAction::Restart
            )
        });
        push_section("General", &|a: &KeyAction| {
            matches!(a, KeyAction::Help | KeyAction::Quit | KeyAction::Dismiss)
        });

        sections
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
