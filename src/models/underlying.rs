// ============================================================================
// Structure : UnderlyingItem
// ============================================================================
// Une ligne de la liste "Underlying Assets" : valeurs déjà formatées pour
// l'affichage, plus l'allocation numérique utilisée pour le tri et la barre
// ============================================================================

use serde::{Deserialize, Serialize};

/// Constituant dérivé, prêt à afficher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderlyingItem {
    pub address: String,

    pub symbol: String,

    pub name: String,

    /// Couleur d'affichage du token
    pub color: Option<String>,

    /// Prix unitaire formaté (ex: "$31.42")
    pub price: String,

    /// Variation 24h formatée, sans signe (ex: "3.46%")
    pub change: String,

    /// Vrai seulement si la variation 24h est strictement positive
    pub is_price_up: bool,

    /// Valeur de ce constituant dans 1 part du panier, formatée
    pub price_per_unit_formatted: String,

    /// Part de la valeur du panier, en pourcentage (peut dépasser 100)
    pub percentage_allocation: f64,
}

impl UnderlyingItem {
    /// Formatte l'item pour une ligne de texte
    ///
    /// Format : "UNI     Uniswap              $31.42  ▲ 3.46%"
    ///
    /// Note : Le nom est tronqué à 20 caractères pour éviter le débordement
    pub fn display(&self) -> String {
        let arrow = if self.is_price_up { "▲" } else { "▼" };

        let truncated_name = if self.name.chars().count() <= 20 {
            self.name.clone()
        } else {
            let truncated: String = self.name.chars().take(19).collect();
            format!("{}…", truncated)
        };

        format!(
            "{:<8} {:<20} {:>12}  {} {}",
            self.symbol, truncated_name, self.price, arrow, self.change
        )
    }
}
