// ============================================================================
// Structures : BasketAsset, BaseAsset, Constituent
// ============================================================================
// Un token "panier" (index) représente une part de plusieurs tokens sous-jacents
//
// CONCEPTS RUST :
// 1. Vec<T> ordonné : l'ordre des constituants est celui de la définition
// 2. String pour les montants bruts : un u256 on-chain ne tient pas dans un u64
// ============================================================================

use serde::{Deserialize, Serialize};

/// Référence vers l'actif de base dont le prix sert de dénominateur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAsset {
    pub address: String,
}

/// Un constituant du panier tel que décrit on-chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constituent {
    /// Adresse du token sous-jacent
    pub address: String,

    /// Nombre de décimales du token
    pub decimals: u8,

    /// Montant brut (entier en unités minimales) contenu dans 1 part du panier
    pub amount: String,
}

impl Constituent {
    pub fn new(address: &str, decimals: u8, amount: &str) -> Self {
        Self {
            address: address.to_string(),
            decimals,
            amount: amount.to_string(),
        }
    }
}

/// Le token panier et sa composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketAsset {
    /// Adresse du token panier
    pub address: String,

    pub symbol: String,

    pub name: String,

    /// Solde de l'utilisateur en unités affichables (None si non détenu)
    #[serde(default)]
    pub balance: Option<String>,

    /// Actif de base pour le calcul d'allocation
    pub base: BaseAsset,

    /// Constituants dans l'ordre de la définition
    pub underlying: Vec<Constituent>,
}

impl BasketAsset {
    /// Crée un panier dont l'actif de base est le panier lui-même
    pub fn new(address: &str, symbol: &str, name: &str, underlying: Vec<Constituent>) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            balance: None,
            base: BaseAsset {
                address: address.to_string(),
            },
            underlying,
        }
    }

    /// Vrai si l'utilisateur ne possède rien de cet actif
    ///
    /// Un solde absent compte comme non détenu
    pub fn has_zero_balance(&self) -> bool {
        match self.balance.as_deref() {
            None => true,
            Some(b) => b.trim().parse::<f64>().map(|v| v == 0.0).unwrap_or(false),
        }
    }

    /// Cas particulier : ETH natif sans solde → on propose d'acheter, pas d'échanger
    pub fn needs_eth(&self) -> bool {
        self.address.eq_ignore_ascii_case("eth")
            && self.balance.as_deref().map(str::trim) == Some("0")
    }
}
