// ============================================================================
// Allocation - Répartition d'un token panier entre ses sous-jacents
// ============================================================================
// Fonction pure : (panier, snapshot de marché, devise) → lignes triées
//
// - valeur d'un constituant = montant brut / 10^décimales × prix
// - allocation = valeur × 100 / prix de l'actif de base
// - constituant sans donnée de marché : ignoré silencieusement
// - actif de base absent ou sans prix : résultat vide
//
// L'appelant relance le calcul quand le snapshot ou la devise change ;
// rien n'est mis en cache ici.
// ============================================================================

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::format::{
    convert_raw_amount_to_native_display, format_price, format_price_change, is_price_up,
    NativeCurrency,
};
use crate::models::{BasketAsset, Constituent, MarketAsset, MarketSnapshot, UnderlyingItem};

/// Calcule les lignes "Underlying Assets", triées par allocation décroissante
pub fn compute_underlying(
    basket: &BasketAsset,
    snapshot: &MarketSnapshot,
    currency: NativeCurrency,
) -> Vec<UnderlyingItem> {
    let base_price = match snapshot.get(&basket.base.address).and_then(MarketAsset::price_value) {
        Some(price) => price,
        None => {
            debug!(base = %basket.base.address, "No price for base asset, skipping allocation");
            return Vec::new();
        }
    };

    let mut items: Vec<UnderlyingItem> = basket
        .underlying
        .iter()
        .filter_map(|constituent| build_item(constituent, snapshot, base_price, currency))
        .collect();

    // Tri stable : à allocation égale, l'ordre de la définition est conservé
    items.sort_by(|a, b| {
        b.percentage_allocation
            .partial_cmp(&a.percentage_allocation)
            .unwrap_or(Ordering::Equal)
    });

    debug!(
        basket = %basket.symbol,
        shown = items.len(),
        total = basket.underlying.len(),
        "Computed underlying allocation"
    );
    items
}

/// Construit la ligne d'un constituant, None s'il doit être ignoré
fn build_item(
    constituent: &Constituent,
    snapshot: &MarketSnapshot,
    base_price: f64,
    currency: NativeCurrency,
) -> Option<UnderlyingItem> {
    let market = snapshot.get(&constituent.address)?;
    let price = market.price?;

    let Some(per_unit) = convert_raw_amount_to_native_display(
        &constituent.amount,
        constituent.decimals,
        price.value,
        currency,
    ) else {
        warn!(
            address = %constituent.address,
            amount = %constituent.amount,
            "Invalid raw amount for constituent"
        );
        return None;
    };

    let percentage_allocation = per_unit.amount * 100.0 / base_price;

    Some(UnderlyingItem {
        address: market.address.clone(),
        symbol: market.symbol.clone(),
        name: market.name.clone(),
        color: market.color.clone(),
        price: format_price(price.value, currency),
        change: format_price_change(price.relative_change_24h),
        is_price_up: is_price_up(price.relative_change_24h),
        price_per_unit_formatted: per_unit.display,
        percentage_allocation,
    })
}

/// Somme des allocations affichées (≈ 100 pour un panier cohérent)
pub fn total_allocation(items: &[UnderlyingItem]) -> f64 {
    items.iter().map(|i| i.percentage_allocation).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASKET: &str = "0xBASKET";

    fn snapshot(base_price: Option<f64>) -> MarketSnapshot {
        let mut base = MarketAsset::new(BASKET, "DPI", "DeFi Pulse Index");
        if let Some(p) = base_price {
            base = base.with_price(p, Some(1.2));
        }
        vec![
            base,
            MarketAsset::new("0xAAA", "AAA", "Alpha")
                .with_price(4.0, Some(-3.456))
                .with_color("#ff007a"),
            MarketAsset::new("0xbbb", "BBB", "Beta").with_price(6.0, Some(2.0)),
        ]
        .into_iter()
        .collect()
    }

    fn basket(underlying: Vec<Constituent>) -> BasketAsset {
        BasketAsset::new(BASKET, "DPI", "DeFi Pulse Index", underlying)
    }

    #[test]
    fn test_allocation_example() {
        // A : 10 × 4 = 40, B : 10 × 6 = 60, base = 100
        let basket = basket(vec![
            Constituent::new("0xaaa", 18, "10000000000000000000"),
            Constituent::new("0xBBB", 18, "10000000000000000000"),
        ]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].symbol, "BBB");
        assert_eq!(items[1].symbol, "AAA");
        assert!((items[0].percentage_allocation - 60.0).abs() < 1e-9);
        assert!((items[1].percentage_allocation - 40.0).abs() < 1e-9);
        assert!((total_allocation(&items) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_item_formatting() {
        let basket = basket(vec![Constituent::new("0xaaa", 0, "10")]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd);

        let a = &items[0];
        assert_eq!(a.change, "3.46%");
        assert!(!a.is_price_up);
        assert_eq!(a.price, "$4.00");
        assert_eq!(a.price_per_unit_formatted, "$40.00");
        assert_eq!(a.color.as_deref(), Some("#ff007a"));
    }

    #[test]
    fn test_missing_market_data_is_dropped() {
        let basket = basket(vec![
            Constituent::new("0xaaa", 0, "10"),
            Constituent::new("0xunknown", 0, "1000"),
        ]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd);
        assert_eq!(items.len(), 1);
        assert!(items.iter().all(|i| i.address.to_lowercase() != "0xunknown"));
    }

    #[test]
    fn test_invalid_amount_is_dropped() {
        let basket = basket(vec![
            Constituent::new("0xaaa", 0, "ten"),
            Constituent::new("0xbbb", 0, "10"),
        ]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].symbol, "BBB");
    }

    #[test]
    fn test_base_without_price_gives_empty() {
        let basket = basket(vec![Constituent::new("0xaaa", 0, "10")]);
        assert!(compute_underlying(&basket, &snapshot(None), NativeCurrency::Usd).is_empty());
        assert!(compute_underlying(&basket, &snapshot(Some(0.0)), NativeCurrency::Usd).is_empty());
    }

    #[test]
    fn test_base_absent_gives_empty() {
        let mut basket = basket(vec![Constituent::new("0xaaa", 0, "10")]);
        basket.base.address = "0xmissing".to_string();
        assert!(compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd).is_empty());
    }

    #[test]
    fn test_sorted_descending_and_unbounded() {
        let basket = basket(vec![
            Constituent::new("0xaaa", 0, "1"),
            Constituent::new("0xbbb", 0, "50"),
        ]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Usd);
        assert!(items[0].percentage_allocation > 100.0);
        assert!(items
            .windows(2)
            .all(|w| w[0].percentage_allocation >= w[1].percentage_allocation));
    }

    #[test]
    fn test_currency_symbol_follows_setting() {
        let basket = basket(vec![Constituent::new("0xaaa", 0, "10")]);
        let items = compute_underlying(&basket, &snapshot(Some(100.0)), NativeCurrency::Eur);
        assert_eq!(items[0].price, "€4.00");
        assert_eq!(items[0].price_per_unit_formatted, "€40.00");
    }
}
