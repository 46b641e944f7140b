// ============================================================================
// Structures : PricePoint, PriceSeries
// ============================================================================
// Historique de prix d'un actif, affiché en ligne dans la sheet
//
// CONCEPTS RUST :
// 1. DateTime<Utc> : type de chrono pour dates avec timezone UTC
// 2. #[serde(transparent)] : la série est sérialisée comme un simple tableau
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Un point du graphique : (instant, prix)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Horodatage (RFC 3339 dans le JSON)
    pub timestamp: DateTime<Utc>,

    /// Prix en devise native
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Série de prix ordonnée chronologiquement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn add_point(&mut self, point: PricePoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Retourne le dernier point
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Prix minimum sur la série
    pub fn min_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::min)
    }

    /// Prix maximum sur la série
    pub fn max_price(&self) -> Option<f64> {
        self.points.iter().map(|p| p.price).reduce(f64::max)
    }

    /// Variation entre le premier et le dernier point, en pourcentage
    ///
    /// None si moins de deux points ou si le premier prix est nul
    pub fn change_percent(&self) -> Option<f64> {
        if self.points.len() < 2 {
            return None;
        }
        let first = self.points.first()?.price;
        let last = self.points.last()?.price;
        if first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }

    /// Convertit la série en points (x, y) pour le widget Chart
    ///
    /// CONCEPT RUST : Iterator chaining
    /// - x = index du point, y = prix
    pub fn to_chart_points(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.price))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn series(prices: &[f64]) -> PriceSeries {
        let start = Utc::now();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PricePoint::new(start + Duration::hours(i as i64), p))
                .collect(),
        )
    }

    #[test]
    fn test_min_max() {
        let s = series(&[120.0, 95.5, 130.25, 110.0]);
        assert_eq!(s.min_price(), Some(95.5));
        assert_eq!(s.max_price(), Some(130.25));
        assert_eq!(s.last().map(|p| p.price), Some(110.0));
    }

    #[test]
    fn test_change_percent() {
        let s = series(&[100.0, 90.0, 110.0]);
        let change = s.change_percent().unwrap();
        assert!((change - 10.0).abs() < 1e-9);

        assert_eq!(series(&[100.0]).change_percent(), None);
        assert_eq!(series(&[0.0, 5.0]).change_percent(), None);
    }

    #[test]
    fn test_empty_series() {
        let s = PriceSeries::default();
        assert!(s.is_empty());
        assert_eq!(s.min_price(), None);
        assert!(s.to_chart_points().is_empty());
    }

    #[test]
    fn test_deserialize_as_array() {
        let json = r#"[{"timestamp":"2021-03-01T00:00:00Z","price":301.5}]"#;
        let s: PriceSeries = serde_json::from_str(json).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.to_chart_points(), vec![(0.0, 301.5)]);
    }
}
