// Parcours complet depuis le fichier de données fourni avec le dépôt :
// parsing → calcul des sous-jacents → navigation dans l'App

use lazyindex::allocation::{compute_underlying, total_allocation};
use lazyindex::api::parse_wallet_data;
use lazyindex::app::{App, Screen};
use lazyindex::format::NativeCurrency;
use lazyindex::models::TokenMedia;
use lazyindex::navigation::{Platform, Route, RouteParams, SheetAction};

const DPI: &str = include_str!("../data/dpi.json");

#[test]
fn test_underlying_from_sample_file() {
    let data = parse_wallet_data(DPI).unwrap();
    let items = compute_underlying(&data.basket, &data.market_snapshot(), NativeCurrency::Usd);

    // Le constituant sans données de marché est écarté
    let symbols: Vec<&str> = items.iter().map(|i| i.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAVE", "UNI", "MKR", "LDO", "SNX"]);

    for pair in items.windows(2) {
        assert!(pair[0].percentage_allocation >= pair[1].percentage_allocation);
    }
    assert!((total_allocation(&items) - 100.0).abs() < 1e-6);

    let uni = &items[1];
    assert_eq!(uni.change, "3.46%");
    assert!(!uni.is_price_up);

    let mkr = &items[2];
    assert_eq!(mkr.change, "0%");
    assert!(!mkr.is_price_up);
}

#[test]
fn test_sheet_navigation_flow() {
    let data = parse_wallet_data(DPI).unwrap();
    let mut app = App::new(data, NativeCurrency::Usd, Platform::Android);

    app.navigate_down();
    let request = app.open_selected().unwrap();
    assert_eq!(request.route, Route::ExpandedAssetScreen);
    app.navigate(request);
    assert_eq!(app.current_screen, Screen::ExpandedAsset);
    match &app.current_request().unwrap().params {
        RouteParams::ExpandedAsset { asset, .. } => assert_eq!(asset.symbol, "UNI"),
        other => panic!("unexpected params: {:?}", other),
    }
    app.back();
    assert!(app.is_on_sheet());

    let action = app.sheet_action();
    assert!(matches!(action, SheetAction::Swap(_)));
    assert_eq!(action.label(), "Get DPI");
    let request = action.press();
    assert_eq!(request.route, Route::ExchangeModal);
    app.navigate(request);
    assert_eq!(app.current_screen, Screen::Exchange);
}

#[test]
fn test_collectibles_from_sample_file() {
    let data = parse_wallet_data(DPI).unwrap();
    let mut app = App::new(data, NativeCurrency::Eur, Platform::Ios);

    app.show_collectibles();
    assert_eq!(app.current_screen, Screen::Collectible);
    assert!(matches!(
        app.selected_collectible().unwrap().media(),
        TokenMedia::Image { .. }
    ));

    app.navigate_down();
    assert!(matches!(
        app.selected_collectible().unwrap().media(),
        TokenMedia::Model3d { .. }
    ));

    app.back();
    assert_eq!(app.current_screen, Screen::IndexSheet);
}
