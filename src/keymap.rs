//! Data-driven keybinding configuration
//!
//! All keybindings are defined as data in `KeyMap::default()`, not as match arms
//! scattered across screens. To add a new binding, add an entry to the
//! appropriate context in `KeyMap::default()` and handle the `KeyAction` in the
//! screen that owns that context.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// A key combination (code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub const fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<KeyEvent> for KeyBind {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Which binding table applies to the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    Menu,
    Info,
    Table,
    /// A destructive action is awaiting y/n
    Confirm,
}

/// Semantic key actions: what a key means, not what key it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Global
    Quit,

    // Leave the current screen for the menu
    Back,

    // Navigation (menu cursor, table rows)
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Menu-specific
    Select,

    // Table-specific
    Terminate,
    TerminateAll,
    DropSlot,

    // Confirmation prompt
    Accept,
    Reject,
}

/// Maps key combos to semantic actions per context
pub struct KeyMap {
    /// Bindings that apply regardless of context (checked first)
    global: HashMap<KeyBind, KeyAction>,
    /// Per-context bindings (checked after global)
    contexts: HashMap<KeyContext, HashMap<KeyBind, KeyAction>>,
}

impl KeyMap {
    /// Resolve a key event to a semantic action.
    /// Checks global bindings first, then context-specific bindings.
    pub fn resolve(&self, context: KeyContext, key: KeyEvent) -> Option<KeyAction> {
        let bind = KeyBind::from(key);
        if let Some(action) = self.global.get(&bind) {
            return Some(*action);
        }
        self.contexts
            .get(&context)
            .and_then(|m| m.get(&bind))
            .copied()
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut global = HashMap::new();
        global.insert(
            KeyBind {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::Quit,
        );

        let mut contexts = HashMap::new();

        // ── Menu ─────────────────────────────────────────────────
        let mut menu = HashMap::new();
        insert_cursor_nav(&mut menu);
        menu.insert(KeyBind::plain(KeyCode::Enter), KeyAction::Select);
        menu.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Quit);
        contexts.insert(KeyContext::Menu, menu);

        // ── Info ─────────────────────────────────────────────────
        let mut info = HashMap::new();
        insert_back(&mut info);
        contexts.insert(KeyContext::Info, info);

        // ── Table ────────────────────────────────────────────────
        let mut table = HashMap::new();
        insert_back(&mut table);
        insert_cursor_nav(&mut table);
        insert_page_nav(&mut table);
        table.insert(KeyBind::plain(KeyCode::Char('t')), KeyAction::Terminate);
        table.insert(KeyBind::plain(KeyCode::Char('a')), KeyAction::TerminateAll);
        table.insert(KeyBind::plain(KeyCode::Char('d')), KeyAction::DropSlot);
        contexts.insert(KeyContext::Table, table);

        // ── Confirm ──────────────────────────────────────────────
        // Only accept/reject are bound: every other key is swallowed.
        let mut confirm = HashMap::new();
        confirm.insert(KeyBind::plain(KeyCode::Char('y')), KeyAction::Accept);
        confirm.insert(KeyBind::plain(KeyCode::Char('n')), KeyAction::Reject);
        confirm.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Reject);
        confirm.insert(KeyBind::plain(KeyCode::Esc), KeyAction::Reject);
        contexts.insert(KeyContext::Confirm, confirm);

        Self { global, contexts }
    }
}

/// q / Esc leave the screen
fn insert_back(map: &mut HashMap<KeyBind, KeyAction>) {
    map.insert(KeyBind::plain(KeyCode::Char('q')), KeyAction::Back);
    map.insert(KeyBind::plain(KeyCode::Esc), KeyAction::Back);
}

/// Arrows + jk
fn insert_cursor_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    map.insert(KeyBind::plain(KeyCode::Up), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::Char('k')), KeyAction::MoveUp);
    map.insert(KeyBind::plain(KeyCode::Down), KeyAction::MoveDown);
    map.insert(KeyBind::plain(KeyCode::Char('j')), KeyAction::MoveDown);
}

/// Page keys + g/G + Home/End
fn insert_page_nav(map: &mut HashMap<KeyBind, KeyAction>) {
    map.insert(KeyBind::plain(KeyCode::PageUp), KeyAction::PageUp);
    map.insert(KeyBind::plain(KeyCode::PageDown), KeyAction::PageDown);
    map.insert(KeyBind::plain(KeyCode::Char('g')), KeyAction::GoToTop);
    map.insert(KeyBind::plain(KeyCode::Home), KeyAction::GoToTop);
    map.insert(
        KeyBind {
            code: KeyCode::Char('G'),
            modifiers: KeyModifiers::SHIFT,
        },
        KeyAction::GoToBottom,
    );
    map.insert(KeyBind::plain(KeyCode::End), KeyAction::GoToBottom);
}
