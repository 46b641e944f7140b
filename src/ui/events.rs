// ============================================================================
// Gestion des événements
// ============================================================================
// Gère les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching : matches! sur KeyCode
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (rafraîchissement de l'affichage)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// - Si pas d'événement avant tick_rate, retourne Ok(Event::Tick)
    /// - Seuls les appuis (Press) sont transmis, pas les relâchements
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}

/// Extrait le KeyCode d'un événement clavier
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

/// Échap ou Backspace : retour
pub fn is_back_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc | KeyCode::Backspace))
}

/// Entrée : ouvrir la ligne sélectionnée
pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K'))
    )
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J'))
    )
}

/// 's' : bouton d'action de la sheet (Swap / Buy)
pub fn is_action_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('s') | KeyCode::Char('S')))
}

/// 'r' : rafraîchir les données de marché
pub fn is_refresh_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('r') | KeyCode::Char('R')))
}

/// 'c' : devise suivante
pub fn is_currency_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('c') | KeyCode::Char('C')))
}

/// 'n' : collectibles
pub fn is_collectibles_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('n') | KeyCode::Char('N')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_keys() {
        assert!(is_up_event(&key(KeyCode::Char('k'))));
        assert!(is_down_event(&key(KeyCode::Down)));
        assert!(is_back_event(&key(KeyCode::Esc)));
        assert!(is_action_event(&key(KeyCode::Char('s'))));
        assert!(!is_action_event(&key(KeyCode::Enter)));
    }
}
