// ============================================================================
// Asset - Écrans ouverts depuis la sheet
// ============================================================================
// - Écran d'actif : un sous-jacent sélectionné (Enter)
// - Échange : requête produite par le bouton Swap
// - Achat : requête produite par le bouton Buy
//
// Chaque écran lit la requête de navigation au sommet de l'historique.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::navigation::RouteParams;
use crate::ui::{chart, token_color};

/// Écran d'un actif sous-jacent
pub fn render_expanded_asset(frame: &mut Frame, app: &App) {
    let Some(request) = app.current_request() else {
        render_message(frame, frame.size(), "Aucun actif sélectionné");
        return;
    };
    let RouteParams::ExpandedAsset { asset, .. } = &request.params else {
        render_message(frame, frame.size(), "Requête inattendue");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Détails
            Constraint::Min(6),    // Graphique
            Constraint::Length(3), // Footer
        ])
        .split(frame.size())
        .to_vec();

    let color = token_color(asset.color.as_deref(), Color::Cyan);
    let change_color = if asset.is_price_up {
        Color::Green
    } else {
        Color::Red
    };
    let arrow = if asset.is_price_up { "▲" } else { "▼" };
    let label = Style::default().fg(Color::Gray);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {} - {} ", asset.symbol, asset.name))
        .title_alignment(Alignment::Center);

    let text = vec![
        Line::from(vec![
            Span::styled("Prix : ", label),
            Span::styled(
                asset.price.clone(),
                Style::default().fg(change_color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(format!("{} {}", arrow, asset.change), Style::default().fg(change_color)),
        ]),
        Line::from(vec![
            Span::styled(format!("Dans 1 {} : ", app.basket.symbol), label),
            Span::raw(asset.price_per_unit_formatted.clone()),
        ]),
        Line::from(vec![
            Span::styled("Allocation : ", label),
            Span::styled(
                format!("{:.2}%", asset.percentage_allocation),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Adresse : ", label),
            Span::raw(asset.address.clone()),
        ]),
        Line::from(vec![
            Span::styled("Route : ", label),
            Span::raw(request.route.name()),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Left),
        chunks[0],
    );
    chart::render_price_chart(frame, app.snapshot.get(&asset.address), app.currency, chunks[1]);
    render_back_footer(frame, chunks[2]);
}

/// Écran d'échange : résume la requête produite par le bouton Swap
pub fn render_exchange(frame: &mut Frame, app: &App) {
    let Some(request) = app.current_request() else {
        render_message(frame, frame.size(), "Aucun échange en cours");
        return;
    };
    let RouteParams::Exchange {
        navigator,
        screen,
        input_type,
        asset,
    } = &request.params
    else {
        render_message(frame, frame.size(), "Requête inattendue");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(frame.size())
        .to_vec();

    let label = Style::default().fg(Color::Gray);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(" Swap ")
        .title_alignment(Alignment::Center);

    let text = vec![
        Line::from(vec![
            Span::styled("Navigation : ", label),
            Span::raw(format!("{} › {} › {}", request.route, navigator, screen)),
        ]),
        Line::from(vec![
            Span::styled(format!("{} : ", input_type.param_key()), label),
            Span::styled(
                format!("{} ({})", asset.symbol, asset.address),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Left),
        chunks[0],
    );
    render_back_footer(frame, chunks[1]);
}

/// Écran d'achat (pas d'ETH disponible)
pub fn render_add_cash(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(frame.size())
        .to_vec();

    let message = format!(
        "Vous n'avez pas de {} : ajoutez des fonds pour commencer",
        app.basket.symbol
    );
    render_message(frame, chunks[0], &message);
    render_back_footer(frame, chunks[1]);
}

/// Message centré dans un bloc
fn render_message(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Gray))),
    ];

    frame.render_widget(
        Paragraph::new(text).block(block).alignment(Alignment::Center),
        area,
    );
}

/// Footer commun : retour
fn render_back_footer(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = Line::from(vec![
        Span::styled(
            "[ESC]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Retour  "),
        Span::styled(
            "[q]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" Quit"),
    ]);

    frame.render_widget(
        Paragraph::new(vec![line]).block(block).alignment(Alignment::Center),
        area,
    );
}
