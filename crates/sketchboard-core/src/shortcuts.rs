//! Keyboard shortcut registry.

use crate::canvas::Command;
use crate::input::Modifiers;
use crate::tools::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shortcut {
    pub key: &'static str,
    /// Ctrl, or Cmd on macOS.
    pub ctrl: bool,
    pub shift: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        command: Command,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    /// Check if a key press triggers this shortcut. Keys compare
    /// case-insensitively. Shift only matters for Ctrl shortcuts, since
    /// keys like `+` need it on most layouts.
    pub fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        if modifiers.alt || modifiers.command() != self.ctrl {
            return false;
        }
        if self.ctrl && modifiers.shift != self.shift {
            return false;
        }
        self.key.eq_ignore_ascii_case(key)
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("Z", true, false, Command::Undo, "Undo"),
    Shortcut::new("Z", true, true, Command::Redo, "Redo"),
    Shortcut::new("Y", true, false, Command::Redo, "Redo"),
    Shortcut::new("Delete", false, false, Command::DeleteSelected, "Delete selected shape"),
    Shortcut::new("Backspace", false, false, Command::DeleteSelected, "Delete selected shape"),
    Shortcut::new("Escape", false, false, Command::Cancel, "Cancel current action"),
    Shortcut::new("+", false, false, Command::ZoomIn, "Zoom in"),
    Shortcut::new("=", false, false, Command::ZoomIn, "Zoom in"),
    Shortcut::new("-", false, false, Command::ZoomOut, "Zoom out"),
    Shortcut::new("V", false, false, Command::SetTool(ToolKind::Select), "Select tool"),
    Shortcut::new("H", false, false, Command::SetTool(ToolKind::Pan), "Pan tool"),
    Shortcut::new("A", false, false, Command::SetTool(ToolKind::Annotate), "Annotate tool"),
    Shortcut::new("L", false, false, Command::SetTool(ToolKind::Line), "Line tool"),
    Shortcut::new("R", false, false, Command::SetTool(ToolKind::Rectangle), "Rectangle tool"),
    Shortcut::new("C", false, false, Command::SetTool(ToolKind::Circle), "Circle tool"),
    Shortcut::new("T", false, false, Command::SetTool(ToolKind::Triangle), "Triangle tool"),
    Shortcut::new("P", false, false, Command::SetTool(ToolKind::Freehand), "Freehand tool"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Find the command bound to a key press.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Command> {
        let command = SHORTCUTS
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command);
        if let Some(command) = command {
            log::trace!("Key {:?} resolved to {:?}", key, command);
        }
        command
    }

    /// Shortcuts bound to a command, for tooltips and help text.
    pub fn for_command(command: Command) -> impl Iterator<Item = &'static Shortcut> {
        SHORTCUTS.iter().filter(move |s| s.command == command)
    }
}
