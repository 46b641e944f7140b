// ============================================================================
// Chart - Graphique de prix du token panier
// ============================================================================
// Affiche un graphique ligne (line chart) de la série de prix
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de données à afficher
// 3. Axis : configuration des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::format::{format_price, NativeCurrency};
use crate::models::MarketAsset;
use crate::ui::token_color;

/// Dessine le graphique ligne de l'actif
pub fn render_price_chart(
    frame: &mut Frame,
    asset: Option<&MarketAsset>,
    currency: NativeCurrency,
    area: Rect,
) {
    let Some(asset) = asset else {
        render_no_chart(frame, area, "Pas de données de marché");
        return;
    };

    let points = asset.chart.to_chart_points();
    if points.len() < 2 {
        render_no_chart(frame, area, "Pas d'historique de prix");
        return;
    }

    // Bornes de l'axe Y avec une marge de 5%
    let min_price = asset.chart.min_price().unwrap_or(0.0);
    let max_price = asset.chart.max_price().unwrap_or(0.0);
    let margin = (max_price - min_price) * 0.05;
    let y_min = (min_price - margin).max(0.0);
    let y_max = max_price + margin;

    // Couleur du token, sinon vert/rouge selon la variation sur la période
    let fallback = match asset.chart.change_percent() {
        Some(change) if change < 0.0 => Color::Red,
        _ => Color::Green,
    };
    let color = token_color(asset.color.as_deref(), fallback);

    let datasets = vec![Dataset::default()
        .name(asset.symbol.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let first = asset.chart.points.first().map(|p| p.timestamp.format("%d/%m").to_string());
    let last = asset.chart.last().map(|p| p.timestamp.format("%d/%m").to_string());

    let x_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, (points.len() - 1) as f64])
        .labels(vec![
            Span::raw(first.unwrap_or_default()),
            Span::raw(last.unwrap_or_default()),
        ]);

    let y_axis = Axis::default()
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format_price(y_min, currency)),
            Span::raw(format_price((y_min + y_max) / 2.0, currency)),
            Span::raw(format_price(y_max, currency)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", asset.symbol)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Message à la place du graphique
fn render_no_chart(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
