// ============================================================================
// Navigation - Routes et actions de la sheet
// ============================================================================
// Les vues ne naviguent pas elles-mêmes : elles produisent une
// NavigationRequest (route + payload) que l'App applique.
//
// CONCEPTS RUST :
// 1. Enums avec données : chaque route porte ses propres paramètres
// 2. Builder pattern : SwapAction::new().with_label(...)
// ============================================================================

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::models::UnderlyingItem;

/// Plateforme cible : détermine la route de l'écran d'actif
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Ios,
    Android,
}

impl FromStr for Platform {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => bail!("Plateforme inconnue : {}", other),
        }
    }
}

/// Identifiants des écrans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    ExpandedAssetSheet,
    ExpandedAssetScreen,
    ExchangeModal,
    MainExchangeNavigator,
    MainExchangeScreen,
    AddCashSheet,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::ExpandedAssetSheet => "ExpandedAssetSheet",
            Route::ExpandedAssetScreen => "ExpandedAssetScreen",
            Route::ExchangeModal => "ExchangeModal",
            Route::MainExchangeNavigator => "MainExchangeNavigator",
            Route::MainExchangeScreen => "MainExchangeScreen",
            Route::AddCashSheet => "AddCashSheet",
        }
    }

    /// Route de l'écran d'actif selon la plateforme
    pub fn expanded_asset(platform: Platform) -> Route {
        match platform {
            Platform::Ios => Route::ExpandedAssetSheet,
            Platform::Android => Route::ExpandedAssetScreen,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type d'actif affiché dans l'écran d'actif
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Token,
}

/// Côté de l'échange où l'actif est placé
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetInputType {
    /// L'actif est vendu
    In,
    /// L'actif est acheté
    Out,
}

impl AssetInputType {
    /// Clé du paramètre portant l'actif dans la requête d'échange
    pub fn param_key(&self) -> &'static str {
        match self {
            AssetInputType::In => "inputAsset",
            AssetInputType::Out => "outputAsset",
        }
    }
}

/// Actif transmis à l'écran d'échange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeAsset {
    pub address: String,
    pub symbol: String,
}

/// Paramètres portés par une requête
#[derive(Debug, Clone, PartialEq)]
pub enum RouteParams {
    ExpandedAsset {
        asset: UnderlyingItem,
        kind: AssetKind,
    },
    /// Navigation imbriquée : modal → navigator → screen
    Exchange {
        navigator: Route,
        screen: Route,
        input_type: AssetInputType,
        asset: ExchangeAsset,
    },
    AddCash,
}

/// Demande de navigation produite par une vue
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationRequest {
    pub route: Route,
    pub params: RouteParams,
}

impl NavigationRequest {
    /// Ouvre l'écran d'un actif sous-jacent sélectionné
    pub fn expanded_asset(item: UnderlyingItem, platform: Platform) -> Self {
        Self {
            route: Route::expanded_asset(platform),
            params: RouteParams::ExpandedAsset {
                asset: item,
                kind: AssetKind::Token,
            },
        }
    }
}

/// Épaisseur du label d'un bouton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelWeight {
    #[default]
    Bold,
    Heavy,
}

/// Bouton "Swap" de la sheet
#[derive(Debug, Clone, PartialEq)]
pub struct SwapAction {
    pub asset: ExchangeAsset,
    pub input_type: AssetInputType,
    pub color: Option<String>,
    pub label: Option<String>,
    pub weight: LabelWeight,
}

impl SwapAction {
    pub fn new(asset: ExchangeAsset, input_type: AssetInputType) -> Self {
        Self {
            asset,
            input_type,
            color: None,
            label: None,
            weight: LabelWeight::default(),
        }
    }

    pub fn with_label(mut self, label: String) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn with_weight(mut self, weight: LabelWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Label affiché ("Swap" par défaut)
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("Swap")
    }

    /// Requête vers la modal d'échange, écran principal
    pub fn press(&self) -> NavigationRequest {
        NavigationRequest {
            route: Route::ExchangeModal,
            params: RouteParams::Exchange {
                navigator: Route::MainExchangeNavigator,
                screen: Route::MainExchangeScreen,
                input_type: self.input_type,
                asset: self.asset.clone(),
            },
        }
    }
}

/// Action principale de la sheet
#[derive(Debug, Clone, PartialEq)]
pub enum SheetAction {
    /// Pas d'ETH à échanger : on propose d'en acheter
    Buy,
    Swap(SwapAction),
}

impl SheetAction {
    pub fn label(&self) -> &str {
        match self {
            SheetAction::Buy => "Add Cash",
            SheetAction::Swap(swap) => swap.label(),
        }
    }

    pub fn press(&self) -> NavigationRequest {
        match self {
            SheetAction::Buy => NavigationRequest {
                route: Route::AddCashSheet,
                params: RouteParams::AddCash,
            },
            SheetAction::Swap(swap) => swap.press(),
        }
    }
}
