// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Mutabilité contrôlée : &mut self pour modifier l'état
// 3. Données dérivées : la liste des sous-jacents est recalculée
//    explicitement quand le snapshot ou la devise change
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use tracing::{debug, info};

use crate::allocation::compute_underlying;
use crate::api::WalletData;
use crate::format::NativeCurrency;
use crate::models::{BasketAsset, MarketAsset, MarketSnapshot, UnderlyingItem, UniqueToken};
use crate::navigation::{
    AssetInputType, ExchangeAsset, LabelWeight, NavigationRequest, Platform, Route, SheetAction,
    SwapAction,
};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Sheet du token panier : graphique, action, sous-jacents
    IndexSheet,

    /// Écran d'un actif sous-jacent sélectionné
    ExpandedAsset,

    /// Modal d'échange ouverte par le bouton Swap
    Exchange,

    /// Achat d'ETH (bouton Buy)
    AddCash,

    /// Carte image d'un collectible
    Collectible,
}

impl Screen {
    /// Écran correspondant à une route
    fn for_route(route: Route) -> Screen {
        match route {
            Route::ExpandedAssetSheet | Route::ExpandedAssetScreen => Screen::ExpandedAsset,
            Route::ExchangeModal | Route::MainExchangeNavigator | Route::MainExchangeScreen => {
                Screen::Exchange
            }
            Route::AddCashSheet => Screen::AddCash,
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Token panier affiché
    pub basket: BasketAsset,

    /// Dernier snapshot de marché reçu (immuable, remplacé en bloc)
    pub snapshot: MarketSnapshot,

    /// Devise d'affichage
    pub currency: NativeCurrency,

    /// Plateforme : choisit la route de l'écran d'actif
    pub platform: Platform,

    /// Lignes "Underlying Assets" dérivées du panier et du snapshot
    pub underlying: Vec<UnderlyingItem>,

    /// Index de la ligne sélectionnée
    pub selected_index: usize,

    /// Collectibles du wallet
    pub collectibles: Vec<UniqueToken>,

    /// Index du collectible affiché
    pub collectible_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Pile des requêtes de navigation appliquées (la dernière est visible)
    pub history: Vec<NavigationRequest>,

    /// Two-step quit : première pression de 'q' → confirmation
    pub confirm_quit: bool,

    /// Rafraîchissement en cours
    pub is_loading: bool,

    /// Message de chargement optionnel
    pub loading_message: Option<String>,

    /// Dernière erreur de rafraîchissement, affichée dans le footer
    pub last_error: Option<String>,
}

impl App {
    /// Crée l'application à partir des données chargées
    pub fn new(data: WalletData, currency: NativeCurrency, platform: Platform) -> Self {
        let snapshot = data.market_snapshot();
        let mut app = Self {
            running: true,
            basket: data.basket,
            snapshot,
            currency,
            platform,
            underlying: Vec::new(),
            selected_index: 0,
            collectibles: data.collectibles,
            collectible_index: 0,
            current_screen: Screen::IndexSheet,
            history: Vec::new(),
            confirm_quit: false,
            is_loading: false,
            loading_message: None,
            last_error: None,
        };
        app.recompute();
        app
    }

    /// Recalcule la liste des sous-jacents
    ///
    /// Appelé à chaque changement d'entrée (snapshot, devise)
    fn recompute(&mut self) {
        self.underlying = compute_underlying(&self.basket, &self.snapshot, self.currency);
        let max_index = self.underlying.len().saturating_sub(1);
        self.selected_index = self.selected_index.min(max_index);
        debug!(items = self.underlying.len(), "Underlying list recomputed");
    }

    /// Remplace le snapshot de marché
    pub fn set_snapshot(&mut self, snapshot: MarketSnapshot) {
        info!(assets = snapshot.len(), "Market snapshot replaced");
        self.snapshot = snapshot;
        self.last_error = None;
        self.recompute();
    }

    /// Change la devise d'affichage
    pub fn set_currency(&mut self, currency: NativeCurrency) {
        self.currency = currency;
        self.recompute();
    }

    /// Passe à la devise suivante
    pub fn cycle_currency(&mut self) {
        self.set_currency(self.currency.next());
    }

    /// Entrée de marché du panier lui-même (prix, graphique)
    pub fn basket_market(&self) -> Option<&MarketAsset> {
        self.snapshot.get(&self.basket.address)
    }

    /// Quitte l'application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Navigue vers le haut (liste des sous-jacents ou collectibles)
    ///
    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        match self.current_screen {
            Screen::Collectible => {
                self.collectible_index = self.collectible_index.saturating_sub(1);
            }
            _ => self.selected_index = self.selected_index.saturating_sub(1),
        }
    }

    /// Navigue vers le bas
    pub fn navigate_down(&mut self) {
        match self.current_screen {
            Screen::Collectible => {
                let max_index = self.collectibles.len().saturating_sub(1);
                self.collectible_index = (self.collectible_index + 1).min(max_index);
            }
            _ => {
                let max_index = self.underlying.len().saturating_sub(1);
                self.selected_index = (self.selected_index + 1).min(max_index);
            }
        }
    }

    /// Ligne sélectionnée
    pub fn selected_item(&self) -> Option<&UnderlyingItem> {
        self.underlying.get(self.selected_index)
    }

    /// Collectible affiché
    pub fn selected_collectible(&self) -> Option<&UniqueToken> {
        self.collectibles.get(self.collectible_index)
    }

    /// Action principale de la sheet
    ///
    /// - ETH sans solde : Buy
    /// - sinon : "Get <SYMBOL>", l'actif côté sortie de l'échange
    pub fn sheet_action(&self) -> SheetAction {
        if self.basket.needs_eth() {
            return SheetAction::Buy;
        }
        let asset = ExchangeAsset {
            address: self.basket.address.clone(),
            symbol: self.basket.symbol.clone(),
        };
        let color = self.basket_market().and_then(|m| m.color.clone());
        SheetAction::Swap(
            SwapAction::new(asset, AssetInputType::Out)
                .with_label(format!("Get {}", self.basket.symbol))
                .with_color(color)
                .with_weight(LabelWeight::Heavy),
        )
    }

    /// Requête d'ouverture de la ligne sélectionnée
    pub fn open_selected(&self) -> Option<NavigationRequest> {
        self.selected_item()
            .cloned()
            .map(|item| NavigationRequest::expanded_asset(item, self.platform))
    }

    /// Applique une requête de navigation
    pub fn navigate(&mut self, request: NavigationRequest) {
        info!(route = %request.route, "Navigating");
        self.current_screen = Screen::for_route(request.route);
        self.history.push(request);
    }

    /// Requête actuellement affichée
    pub fn current_request(&self) -> Option<&NavigationRequest> {
        self.history.last()
    }

    /// Retour à l'écran précédent
    pub fn back(&mut self) {
        if self.current_screen == Screen::Collectible {
            self.current_screen = self
                .history
                .last()
                .map(|r| Screen::for_route(r.route))
                .unwrap_or(Screen::IndexSheet);
            return;
        }
        self.history.pop();
        self.current_screen = self
            .history
            .last()
            .map(|r| Screen::for_route(r.route))
            .unwrap_or(Screen::IndexSheet);
    }

    /// Affiche la carte des collectibles (si le wallet en contient)
    pub fn show_collectibles(&mut self) {
        if !self.collectibles.is_empty() {
            self.current_screen = Screen::Collectible;
        }
    }

    pub fn is_on_sheet(&self) -> bool {
        self.current_screen == Screen::IndexSheet
    }

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn start_loading(&mut self, message: Option<String>) {
        self.is_loading = true;
        self.loading_message = message;
    }

    pub fn stop_loading(&mut self) {
        self.is_loading = false;
        self.loading_message = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.last_error = Some(error);
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Constituent;
    use crate::navigation::RouteParams;

    fn data() -> WalletData {
        WalletData {
            basket: BasketAsset::new(
                "0xDPI",
                "DPI",
                "DeFi Pulse Index",
                vec![
                    Constituent::new("0xuni", 0, "4"),
                    Constituent::new("0xaave", 0, "1"),
                    Constituent::new("0xmissing", 0, "7"),
                ],
            ),
            market: vec![
                MarketAsset::new("0xdpi", "DPI", "DeFi Pulse Index")
                    .with_price(100.0, Some(1.0))
                    .with_color("#8150e6"),
                MarketAsset::new("0xUNI", "UNI", "Uniswap").with_price(10.0, Some(-2.0)),
                MarketAsset::new("0xAAVE", "AAVE", "Aave").with_price(60.0, Some(0.0)),
            ],
            collectibles: vec![],
        }
    }

    #[test]
    fn test_app_creation_computes_underlying() {
        let app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        assert!(app.is_running());
        assert_eq!(app.underlying.len(), 2);
        assert_eq!(app.underlying[0].symbol, "AAVE");
        assert_eq!(app.current_screen, Screen::IndexSheet);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
        app.navigate_down();
        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        assert_eq!(app.selected_item().unwrap().symbol, "UNI");
    }

    #[test]
    fn test_open_selected_and_back() {
        let mut app = App::new(data(), NativeCurrency::Usd, Platform::Android);
        let request = app.open_selected().unwrap();
        assert_eq!(request.route, Route::ExpandedAssetScreen);

        app.navigate(request);
        assert_eq!(app.current_screen, Screen::ExpandedAsset);
        match &app.current_request().unwrap().params {
            RouteParams::ExpandedAsset { asset, .. } => assert_eq!(asset.symbol, "AAVE"),
            other => panic!("unexpected params: {:?}", other),
        }

        app.back();
        assert_eq!(app.current_screen, Screen::IndexSheet);
        assert!(app.history.is_empty());
    }

    #[test]
    fn test_sheet_action_is_swap_for_basket() {
        let app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        match app.sheet_action() {
            SheetAction::Swap(swap) => {
                assert_eq!(swap.label(), "Get DPI");
                assert_eq!(swap.input_type, AssetInputType::Out);
                assert_eq!(swap.color.as_deref(), Some("#8150e6"));
            }
            SheetAction::Buy => panic!("expected swap"),
        }
    }

    #[test]
    fn test_sheet_action_is_buy_without_eth() {
        let mut wallet = data();
        wallet.basket.address = "eth".to_string();
        wallet.basket.balance = Some("0".to_string());
        let app = App::new(wallet, NativeCurrency::Usd, Platform::Ios);
        assert_eq!(app.sheet_action(), SheetAction::Buy);
    }

    #[test]
    fn test_snapshot_replacement_recomputes() {
        let mut app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        app.navigate_down();

        let snapshot: MarketSnapshot = vec![
            MarketAsset::new("0xdpi", "DPI", "DeFi Pulse Index").with_price(100.0, None),
            MarketAsset::new("0xuni", "UNI", "Uniswap").with_price(10.0, None),
        ]
        .into_iter()
        .collect();
        app.set_snapshot(snapshot);

        assert_eq!(app.underlying.len(), 1);
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_currency_change_recomputes() {
        let mut app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        app.cycle_currency();
        assert_eq!(app.currency, NativeCurrency::Eur);
        assert!(app.underlying[0].price.starts_with('€'));
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = App::new(data(), NativeCurrency::Usd, Platform::Ios);
        app.request_quit();
        assert!(app.is_awaiting_quit_confirmation());
        app.cancel_quit();
        assert!(!app.is_awaiting_quit_confirmation());
        app.quit();
        assert!(!app.is_running());
    }
}
