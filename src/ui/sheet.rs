// ============================================================================
// Sheet - Vue détaillée du token panier
// ============================================================================
// Layout vertical :
// 1. Header : symbole, nom, prix, variation 24h
// 2. Graphique de prix
// 3. Bouton d'action (Swap "Get DPI" ou Buy)
// 4. "Underlying Assets" / "Makeup of 1 DPI"
// 5. Une ligne par sous-jacent avec sa barre d'allocation
// 6. Footer : raccourcis clavier
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::format::{format_price, format_price_change, is_price_up};
use crate::models::UnderlyingItem;
use crate::navigation::SheetAction;
use crate::ui::{allocation_bar_width, chart, token_color};

/// Largeur fixe de la partie texte d'une ligne (symbole, nom, prix, variation, valeur)
const ROW_TEXT_WIDTH: u16 = 62;

/// Dessine la sheet complète
pub fn render_index_sheet(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(12), // Graphique
            Constraint::Length(3),  // Action
            Constraint::Length(1),  // Titres de la liste
            Constraint::Min(3),     // Sous-jacents
            Constraint::Length(3),  // Footer
        ])
        .split(frame.size())
        .to_vec();

    render_header(frame, app, chunks[0]);
    chart::render_price_chart(frame, app.basket_market(), app.currency, chunks[1]);
    render_action(frame, app, chunks[2]);
    render_list_titles(frame, app, chunks[3]);
    render_underlying(frame, app, chunks[4]);
    render_footer(frame, app, chunks[5]);
}

/// Header : prix et variation du panier
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} - {} ", app.basket.symbol, app.basket.name))
        .title_alignment(Alignment::Center);

    let price = app.basket_market().and_then(|m| m.price);
    let line = match price {
        Some(price) => {
            let up = is_price_up(price.relative_change_24h);
            let color = if up { Color::Green } else { Color::Red };
            let arrow = if up { "▲" } else { "▼" };
            Line::from(vec![
                Span::styled(
                    format_price(price.value, app.currency),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", arrow, format_price_change(price.relative_change_24h)),
                    Style::default().fg(color),
                ),
                Span::raw("  "),
                Span::styled(app.currency.code(), Style::default().fg(Color::Gray)),
            ])
        }
        None => Line::from(Span::styled("Prix indisponible", Style::default().fg(Color::Gray))),
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Bouton d'action de la sheet
fn render_action(frame: &mut Frame, app: &App, area: Rect) {
    let action = app.sheet_action();
    let (color, modifier) = match &action {
        SheetAction::Buy => (Color::Green, Modifier::BOLD),
        SheetAction::Swap(swap) => {
            let color = token_color(swap.color.as_deref(), Color::Magenta);
            (color, Modifier::BOLD)
        }
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let line = Line::from(vec![
        Span::styled("[s] ", Style::default().fg(Color::Yellow)),
        Span::styled(
            action.label().to_string(),
            Style::default().fg(color).add_modifier(modifier),
        ),
    ]);

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// "Underlying Assets" à gauche, "Makeup of 1 <SYMBOL>" à droite
fn render_list_titles(frame: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let style = Style::default().fg(Color::DarkGray);
    frame.render_widget(
        Paragraph::new(Span::styled(" Underlying Assets", style)).alignment(Alignment::Left),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(format!("Makeup of 1 {} ", app.basket.symbol), style))
            .alignment(Alignment::Right),
        halves[1],
    );
}

/// Liste des sous-jacents
fn render_underlying(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.underlying.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Aucun sous-jacent avec des données de marché",
                Style::default().fg(Color::Gray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    // Place restante pour la barre : largeur intérieure - texte
    let bar_space = area.width.saturating_sub(2).saturating_sub(ROW_TEXT_WIDTH);

    let items: Vec<ListItem> = app
        .underlying
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let line = underlying_line(item, bar_space);
            let mut list_item = ListItem::new(line);
            if index == app.selected_index {
                list_item = list_item.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            list_item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Une ligne : symbole, nom, prix, variation, valeur par part, barre
pub fn underlying_line(item: &UnderlyingItem, bar_space: u16) -> Line<'static> {
    let change_color = if item.is_price_up {
        Color::Green
    } else {
        Color::Red
    };
    let arrow = if item.is_price_up { "▲" } else { "▼" };
    let bar_color = token_color(item.color.as_deref(), Color::Magenta);
    let bar = "█".repeat(usize::from(allocation_bar_width(
        item.percentage_allocation,
        bar_space,
    )));

    let name: String = item.name.chars().take(18).collect();

    Line::from(vec![
        Span::styled(
            format!(" {:<7}", item.symbol),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{:<19}", name), Style::default().fg(Color::Gray)),
        Span::raw(format!("{:>12} ", item.price)),
        Span::styled(
            format!("{} {:<8}", arrow, item.change),
            Style::default().fg(change_color),
        ),
        Span::styled(
            format!("{:>12} ", item.price_per_unit_formatted),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(bar, Style::default().fg(bar_color)),
    ])
}

/// Footer : raccourcis ou confirmation de quit
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let line = if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Appuyez sur ", key),
            Span::styled(
                "[q]",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
            Span::styled(" à nouveau pour quitter ⚠", key),
        ])
    } else if let Some(message) = app.loading_message.as_deref().filter(|_| app.is_loading) {
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Cyan)))
    } else if let Some(error) = &app.last_error {
        Line::from(Span::styled(format!("⚠ {}", error), Style::default().fg(Color::Red)))
    } else {
        Line::from(vec![
            Span::styled("[q]", key),
            Span::raw(" Quit  "),
            Span::styled("[↑↓ / j k]", key),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", key),
            Span::raw(" Open  "),
            Span::styled("[s]", key),
            Span::raw(" Action  "),
            Span::styled("[c]", key),
            Span::raw(format!(" {}  ", app.currency.code())),
            Span::styled("[r]", key),
            Span::raw(" Refresh  "),
            Span::styled("[n]", key),
            Span::raw(" Collectibles"),
        ])
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WalletData;
    use crate::format::NativeCurrency;
    use crate::models::{BasketAsset, Constituent, MarketAsset};
    use crate::navigation::Platform;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let data = WalletData {
            basket: BasketAsset::new(
                "0xdpi",
                "DPI",
                "DeFi Pulse Index",
                vec![Constituent::new("0xuni", 0, "3"), Constituent::new("0xaave", 0, "1")],
            ),
            market: vec![
                MarketAsset::new("0xdpi", "DPI", "DeFi Pulse Index").with_price(100.0, Some(2.0)),
                MarketAsset::new("0xuni", "UNI", "Uniswap").with_price(10.0, Some(-1.0)),
                MarketAsset::new("0xaave", "AAVE", "Aave").with_price(70.0, Some(4.0)),
            ],
            collectibles: vec![],
        };
        App::new(data, NativeCurrency::Usd, Platform::Ios)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_underlying_line_bar() {
        let app = app();
        let line = underlying_line(&app.underlying[0], 200);
        let bar = line.spans.last().unwrap().content.chars().count();
        assert_eq!(bar, 140);

        let line = underlying_line(&app.underlying[0], 10);
        assert_eq!(line.spans.last().unwrap().content.chars().count(), 10);
    }

    #[test]
    fn test_render_index_sheet() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render_index_sheet(frame, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Underlying Assets"));
        assert!(text.contains("Makeup of 1 DPI"));
        assert!(text.contains("Get DPI"));
        assert!(text.contains("AAVE"));
        assert!(text.contains("UNI"));
    }
}
