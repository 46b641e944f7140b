// ============================================================================
// Collectible - Carte image d'un NFT
// ============================================================================
// Un terminal ne dessine pas d'image : la carte affiche le média choisi
// (modèle 3D ou image), sa couleur de fond et la taille calculée du
// conteneur pour la largeur disponible.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{ImageLayout, TokenMedia, UniqueToken};
use crate::ui::token_color;

/// Padding horizontal de la carte, en cellules
const CARD_PADDING: f64 = 2.0;

/// Dessine le collectible courant
pub fn render_collectible(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(frame.size())
        .to_vec();

    match app.selected_collectible() {
        Some(token) => {
            let title = format!(
                " {} ({}/{}) ",
                token.name,
                app.collectible_index + 1,
                app.collectibles.len()
            );
            render_card(frame, token, &title, chunks[0]);
        }
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            frame.render_widget(
                Paragraph::new("Aucun collectible")
                    .block(block)
                    .alignment(Alignment::Center),
                chunks[0],
            );
        }
    }

    render_footer(frame, chunks[1]);
}

/// Carte : média, fond, dimensions calculées
fn render_card(frame: &mut Frame, token: &UniqueToken, title: &str, area: Rect) {
    let layout = ImageLayout::compute(f64::from(area.width), CARD_PADDING, token.image_dimensions);
    let background = token
        .background
        .as_deref()
        .map(|hex| format!("#{}", hex.trim_start_matches('#')));
    let accent = token_color(background.as_deref(), Color::Cyan);
    let label = Style::default().fg(Color::Gray);

    let (kind, uri, fallback) = match token.media() {
        TokenMedia::Model3d { uri, fallback } => ("Modèle 3D", Some(uri), fallback),
        TokenMedia::Image { url } => ("Image", url, None),
    };

    let mut text = vec![
        Line::from(vec![
            Span::styled("Média : ", label),
            Span::styled(kind, Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("URI : ", label),
            Span::raw(uri.unwrap_or_else(|| "-".to_string())),
        ]),
    ];
    if let Some(fallback) = fallback {
        text.push(Line::from(vec![
            Span::styled("Repli : ", label),
            Span::raw(fallback),
        ]));
    }
    text.push(Line::from(vec![
        Span::styled("Fond : ", label),
        Span::raw(background.unwrap_or_else(|| "-".to_string())),
    ]));
    text.push(Line::from(vec![
        Span::styled("Conteneur : ", label),
        Span::raw(format!(
            "{:.0} × {:.0} (max {:.0} × {:.0})",
            layout.max_image_width,
            layout.container_height,
            layout.max_image_width,
            layout.max_image_height
        )),
    ]));
    if layout.is_image_huge {
        text.push(Line::from(Span::styled(
            "Image trop haute : carte carrée",
            Style::default().fg(Color::Yellow),
        )));
    }
    text.push(Line::from(vec![
        Span::styled("Id : ", label),
        Span::styled(token.unique_id.clone(), Style::default().fg(Color::DarkGray)),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(title.to_string())
        .title_alignment(Alignment::Center);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = Line::from(vec![
        Span::styled("[↑↓]", key),
        Span::raw(" Collectible  "),
        Span::styled("[ESC]", key),
        Span::raw(" Retour  "),
        Span::styled("[q]", key),
        Span::raw(" Quit"),
    ]);

    frame.render_widget(
        Paragraph::new(vec![line]).block(block).alignment(Alignment::Center),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WalletData;
    use crate::format::NativeCurrency;
    use crate::models::{BasketAsset, ImageDimensions};
    use crate::navigation::Platform;
    use ratatui::{backend::TestBackend, Terminal};

    fn token(name: &str, animation: Option<&str>, dims: Option<ImageDimensions>) -> UniqueToken {
        UniqueToken {
            unique_id: format!("0xabc_{}", name),
            name: name.to_string(),
            image_preview_url: Some(format!("https://img/{}.png", name)),
            animation_url: animation.map(str::to_string),
            background: Some("ff0000".to_string()),
            image_dimensions: dims,
        }
    }

    #[test]
    fn test_render_collectible() {
        let data = WalletData {
            basket: BasketAsset::new("0xdpi", "DPI", "DeFi Pulse Index", vec![]),
            market: vec![],
            collectibles: vec![
                token("cube", Some("https://img/cube.glb"), None),
                token(
                    "tower",
                    None,
                    Some(ImageDimensions { width: 100.0, height: 400.0 }),
                ),
            ],
        };
        let mut app = App::new(data, NativeCurrency::Usd, Platform::Ios);
        app.show_collectibles();

        // Carte de 44 cellules : 40 utiles
        let mut terminal = Terminal::new(TestBackend::new(44, 20)).unwrap();
        terminal.draw(|frame| render_collectible(frame, &app)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("cube (1/2)"));
        assert!(text.contains("Modèle 3D"));
        assert!(text.contains("#ff0000"));

        app.navigate_down();
        terminal.draw(|frame| render_collectible(frame, &app)).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("tower (2/2)"));
        assert!(text.contains("40 × 40"));
    }
}
