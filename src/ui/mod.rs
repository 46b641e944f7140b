// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// ============================================================================

pub mod asset;       // Écran d'actif, échange, achat
pub mod chart;       // Graphique de prix
pub mod collectible; // Carte image d'un collectible
pub mod events;      // Gestion des événements clavier
pub mod sheet;       // Sheet du token panier

use ratatui::{style::Color, Frame};

use crate::app::{App, Screen};

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};

/// Dessine l'écran courant
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit l'exhaustivité (tous les écrans gérés)
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::IndexSheet => sheet::render_index_sheet(frame, app),
        Screen::ExpandedAsset => asset::render_expanded_asset(frame, app),
        Screen::Exchange => asset::render_exchange(frame, app),
        Screen::AddCash => asset::render_add_cash(frame, app),
        Screen::Collectible => collectible::render_collectible(frame, app),
    }
}

/// Convertit une couleur "#rrggbb" (ou "rrggbb") en couleur terminal
///
/// Retourne `fallback` si la couleur est absente ou invalide
pub fn token_color(hex: Option<&str>, fallback: Color) -> Color {
    let Some(hex) = hex else {
        return fallback;
    };
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return fallback;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => fallback,
    }
}

/// Largeur de la barre d'allocation : 2 cellules par point de pourcentage,
/// bornée par la place disponible
pub fn allocation_bar_width(percentage: f64, max_width: u16) -> u16 {
    if !percentage.is_finite() || percentage <= 0.0 {
        return 0;
    }
    let width = (percentage * 2.0).round();
    if width >= f64::from(max_width) {
        max_width
    } else {
        width as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_color() {
        assert_eq!(token_color(Some("#ff007a"), Color::White), Color::Rgb(255, 0, 122));
        assert_eq!(token_color(Some("8150E6"), Color::White), Color::Rgb(129, 80, 230));
        assert_eq!(token_color(Some("#zzz"), Color::White), Color::White);
        assert_eq!(token_color(None, Color::Cyan), Color::Cyan);
    }

    #[test]
    fn test_allocation_bar_width() {
        assert_eq!(allocation_bar_width(10.0, 100), 20);
        assert_eq!(allocation_bar_width(12.4, 100), 25);
        assert_eq!(allocation_bar_width(150.0, 40), 40);
        assert_eq!(allocation_bar_width(0.0, 40), 0);
        assert_eq!(allocation_bar_width(f64::NAN, 40), 0);
    }
}
