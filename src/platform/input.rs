//! Keyboard input: held paddle keys and one-shot signals
//!
//! Terminals that support keyboard enhancement report key releases, so held
//! keys are tracked exactly. Elsewhere only presses and auto-repeats arrive,
//! and a key counts as held for a short window after its last event.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::sim::{PaddleIntent, TickInput};

/// How long a key stays held without a fresh press/repeat (no release events)
pub const HOLD_WINDOW_MS: u64 = 200;

/// Game key mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    LeftUp,
    LeftDown,
    RightUp,
    RightDown,
    Start,
    Quit,
}

impl GameKey {
    fn slot(self) -> Option<usize> {
        match self {
            GameKey::LeftUp => Some(0),
            GameKey::LeftDown => Some(1),
            GameKey::RightUp => Some(2),
            GameKey::RightDown => Some(3),
            GameKey::Start | GameKey::Quit => None,
        }
    }
}

/// Map a terminal key event to a game key
pub fn map_key(event: &KeyEvent) -> Option<GameKey> {
    match event.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if event.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(GameKey::Quit)
        }
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameKey::LeftUp),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameKey::LeftDown),
        KeyCode::Up => Some(GameKey::RightUp),
        KeyCode::Down => Some(GameKey::RightDown),
        KeyCode::Char(' ') => Some(GameKey::Start),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameKey::Quit),
        _ => None,
    }
}

/// Held-key state collected between ticks
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    /// Last press/repeat time per paddle key
    held: [Option<u64>; 4],
    /// Whether the terminal reports key releases
    reports_release: bool,
    start_pending: bool,
    quit_requested: bool,
}

impl KeyboardState {
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            ..Self::default()
        }
    }

    /// Record a terminal key event
    pub fn handle_event(&mut self, event: &KeyEvent, now_ms: u64) {
        if let Some(key) = map_key(event) {
            self.handle_key(key, event.kind, now_ms);
        }
    }

    pub fn handle_key(&mut self, key: GameKey, kind: KeyEventKind, now_ms: u64) {
        match key {
            GameKey::Start => {
                if kind == KeyEventKind::Press {
                    self.start_pending = true;
                }
            }
            GameKey::Quit => {
                if kind == KeyEventKind::Press {
                    self.quit_requested = true;
                }
            }
            _ => {
                if let Some(slot) = key.slot() {
                    self.held[slot] = match kind {
                        KeyEventKind::Press | KeyEventKind::Repeat => Some(now_ms),
                        KeyEventKind::Release => None,
                    };
                }
            }
        }
    }

    pub fn is_held(&self, key: GameKey, now_ms: u64) -> bool {
        let Some(last) = key.slot().and_then(|slot| self.held[slot]) else {
            return false;
        };
        self.reports_release || now_ms.saturating_sub(last) <= HOLD_WINDOW_MS
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn intent(&self, up: GameKey, down: GameKey, now_ms: u64) -> PaddleIntent {
        if self.is_held(up, now_ms) {
            PaddleIntent::Up
        } else if self.is_held(down, now_ms) {
            PaddleIntent::Down
        } else {
            PaddleIntent::Still
        }
    }

    /// Build this tick's input, consuming the pending start signal
    pub fn take_tick_input(&mut self, now_ms: u64) -> TickInput {
        TickInput {
            left: self.intent(GameKey::LeftUp, GameKey::LeftDown, now_ms),
            right: self.intent(GameKey::RightUp, GameKey::RightDown, now_ms),
            start: std::mem::take(&mut self.start_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(map_key(&key(KeyCode::Char('w'))), Some(GameKey::LeftUp));
        assert_eq!(map_key(&key(KeyCode::Char('S'))), Some(GameKey::LeftDown));
        assert_eq!(map_key(&key(KeyCode::Up)), Some(GameKey::RightUp));
        assert_eq!(map_key(&key(KeyCode::Down)), Some(GameKey::RightDown));
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(GameKey::Start));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(GameKey::Quit));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameKey::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_release_tracking() {
        let mut keys = KeyboardState::new(true);
        keys.handle_key(GameKey::LeftUp, KeyEventKind::Press, 0);
        assert_eq!(keys.take_tick_input(5_000).left, PaddleIntent::Up);

        keys.handle_key(GameKey::LeftUp, KeyEventKind::Release, 5_001);
        assert_eq!(keys.take_tick_input(5_002).left, PaddleIntent::Still);
    }

    #[test]
    fn test_hold_window_without_release() {
        let mut keys = KeyboardState::new(false);
        keys.handle_key(GameKey::RightDown, KeyEventKind::Press, 100);
        assert_eq!(keys.take_tick_input(100 + HOLD_WINDOW_MS).right, PaddleIntent::Down);
        assert_eq!(keys.take_tick_input(101 + HOLD_WINDOW_MS).right, PaddleIntent::Still);

        keys.handle_key(GameKey::RightDown, KeyEventKind::Repeat, 400);
        assert_eq!(keys.take_tick_input(450).right, PaddleIntent::Down);
    }

    #[test]
    fn test_up_wins_over_down() {
        let mut keys = KeyboardState::new(true);
        keys.handle_key(GameKey::RightDown, KeyEventKind::Press, 0);
        keys.handle_key(GameKey::RightUp, KeyEventKind::Press, 1);
        assert_eq!(keys.take_tick_input(2).right, PaddleIntent::Up);
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut keys = KeyboardState::new(true);
        keys.handle_event(&key(KeyCode::Char(' ')), 0);
        assert!(keys.take_tick_input(0).start);
        assert!(!keys.take_tick_input(16).start);
    }

    #[test]
    fn test_quit() {
        let mut keys = KeyboardState::new(false);
        assert!(!keys.quit_requested());
        keys.handle_event(&key(KeyCode::Char('q')), 0);
        assert!(keys.quit_requested());
    }
}
