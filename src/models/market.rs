// ============================================================================
// Structures : MarketAsset, AssetPrice, MarketSnapshot
// ============================================================================
// Données de marché connues pour chaque actif (prix, variation 24h, couleur)
//
// CONCEPTS RUST :
// 1. HashMap<String, T> : lookup par adresse en O(1)
// 2. Normalisation des clés : toutes les adresses sont stockées en minuscules
// 3. #[serde(default)] : champs optionnels dans le JSON
// ============================================================================

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

/// Prix courant d'un actif
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetPrice {
    /// Prix unitaire en devise native
    pub value: f64,

    /// Variation relative sur 24h, en pourcentage (ex: -3.456)
    #[serde(default)]
    pub relative_change_24h: Option<f64>,
}

impl AssetPrice {
    pub fn new(value: f64, relative_change_24h: Option<f64>) -> Self {
        Self {
            value,
            relative_change_24h,
        }
    }
}

/// Entrée de marché pour un actif
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAsset {
    /// Adresse du contrat (ou "eth" pour l'actif natif)
    pub address: String,

    /// Symbole (ex: "UNI")
    pub symbol: String,

    /// Nom complet (ex: "Uniswap")
    pub name: String,

    /// Couleur d'affichage au format "#rrggbb"
    #[serde(default)]
    pub color: Option<String>,

    /// Prix courant (None si l'actif n'est pas coté)
    #[serde(default)]
    pub price: Option<AssetPrice>,

    /// Historique de prix pour le graphique
    #[serde(default)]
    pub chart: PriceSeries,
}

impl MarketAsset {
    pub fn new(address: &str, symbol: &str, name: &str) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            color: None,
            price: None,
            chart: PriceSeries::default(),
        }
    }

    /// Builder : ajoute un prix
    pub fn with_price(mut self, value: f64, relative_change_24h: Option<f64>) -> Self {
        self.price = Some(AssetPrice::new(value, relative_change_24h));
        self
    }

    /// Builder : ajoute une couleur
    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Prix unitaire, seulement s'il est strictement positif
    ///
    /// CONCEPT RUST : Option::filter
    /// - Un prix nul ne peut pas servir de base de calcul
    pub fn price_value(&self) -> Option<f64> {
        self.price
            .map(|p| p.value)
            .filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Snapshot immuable des données de marché, indexé par adresse en minuscules
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    assets: HashMap<String, MarketAsset>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute (ou remplace) un actif ; la clé est l'adresse en minuscules
    pub fn insert(&mut self, asset: MarketAsset) {
        self.assets.insert(asset.address.to_lowercase(), asset);
    }

    /// Recherche un actif par adresse, quelle que soit la casse
    pub fn get(&self, address: &str) -> Option<&MarketAsset> {
        self.assets.get(&address.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// CONCEPT RUST : FromIterator
// - Permet d'écrire assets.into_iter().collect::<MarketSnapshot>()
impl FromIterator<MarketAsset> for MarketSnapshot {
    fn from_iter<I: IntoIterator<Item = MarketAsset>>(iter: I) -> Self {
        let mut snapshot = MarketSnapshot::new();
        for asset in iter {
            snapshot.insert(asset);
        }
        snapshot
    }
}

impl IntoIterator for MarketSnapshot {
    type Item = MarketAsset;
    type IntoIter = std::collections::hash_map::IntoValues<String, MarketAsset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let snapshot: MarketSnapshot = vec![MarketAsset::new(
            "0x1F9840a85d5aF5bf1D1762F925BDADdC4201F984",
            "UNI",
            "Uniswap",
        )]
        .into_iter()
        .collect();

        assert!(snapshot.get("0x1f9840a85d5af5bf1d1762f925bdaddc4201f984").is_some());
        assert!(snapshot.get("0x1F9840A85D5AF5BF1D1762F925BDADDC4201F984").is_some());
        assert!(snapshot.get("0xdead").is_none());
    }

    #[test]
    fn test_price_value_rejects_zero() {
        let free = MarketAsset::new("0xa", "A", "A").with_price(0.0, None);
        assert_eq!(free.price_value(), None);

        let unpriced = MarketAsset::new("0xb", "B", "B");
        assert_eq!(unpriced.price_value(), None);

        let priced = MarketAsset::new("0xc", "C", "C").with_price(12.5, Some(1.0));
        assert_eq!(priced.price_value(), Some(12.5));
    }

    #[test]
    fn test_deserialize_minimal_entry() {
        let json = r#"{"address":"0xA","symbol":"A","name":"Alpha","price":{"value":2.0}}"#;
        let asset: MarketAsset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.price_value(), Some(2.0));
        assert_eq!(asset.price.unwrap().relative_change_24h, None);
        assert!(asset.chart.is_empty());
    }
}
