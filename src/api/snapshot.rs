// ============================================================================
// API : Chargement des données du wallet
// ============================================================================
// Deux sources :
// 1. Fichier JSON local : panier + marché + collectibles (WalletData)
// 2. URL HTTP optionnelle : liste d'actifs de marché à jour
//
// CONCEPTS RUST :
// 1. async/await avec tokio::fs et reqwest
// 2. anyhow::Context pour des erreurs lisibles
// 3. #[instrument] : span tracing avec les paramètres de la fonction
// ============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::models::{BasketAsset, MarketAsset, MarketSnapshot, UniqueToken};

/// Contenu du fichier de données
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletData {
    /// Token panier affiché dans la sheet
    pub basket: BasketAsset,

    /// Actifs de marché connus
    #[serde(default)]
    pub market: Vec<MarketAsset>,

    /// Collectibles du wallet
    #[serde(default)]
    pub collectibles: Vec<UniqueToken>,
}

impl WalletData {
    /// Construit le snapshot indexé par adresse
    pub fn market_snapshot(&self) -> MarketSnapshot {
        self.market.iter().cloned().collect()
    }
}

/// Parse le contenu JSON du fichier de données
pub fn parse_wallet_data(json: &str) -> Result<WalletData> {
    let data: WalletData =
        serde_json::from_str(json).context("Échec du parsing JSON des données du wallet")?;
    debug!(
        basket = %data.basket.symbol,
        constituents = data.basket.underlying.len(),
        market = data.market.len(),
        collectibles = data.collectibles.len(),
        "Parsed wallet data"
    );
    Ok(data)
}

/// Charge le fichier de données
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn load_wallet_data(path: &Path) -> Result<WalletData> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
    let data = parse_wallet_data(&content)?;
    info!(basket = %data.basket.symbol, "Wallet data loaded");
    Ok(data)
}

/// Récupère la liste des actifs de marché depuis une URL
///
/// La réponse attendue est un tableau JSON de MarketAsset
#[instrument]
pub async fn fetch_market_snapshot(url: &str) -> Result<MarketSnapshot> {
    debug!("Creating HTTP client");
    let client = reqwest::Client::builder()
        .user_agent(concat!("lazyindex/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Échec de la création du client HTTP")?;

    debug!("Sending HTTP request for market data");
    let response = client
        .get(url)
        .send()
        .await
        .context("Échec de la requête HTTP vers la source de marché")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Market source returned error status");
        anyhow::bail!("La source de marché a retourné une erreur : HTTP {}", status);
    }

    let assets: Vec<MarketAsset> = response
        .json()
        .await
        .context("Échec du parsing JSON des données de marché")?;

    if assets.is_empty() {
        error!("Market source returned no assets");
        anyhow::bail!("Aucun actif de marché retourné par {}", url);
    }

    info!(assets = assets.len(), "Fetched market snapshot");
    Ok(assets.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
        "basket": {
            "address": "0x1494CA1F11D487c2bBe4543E90080AeBa4BA3C2b",
            "symbol": "DPI",
            "name": "DeFi Pulse Index",
            "base": { "address": "0x1494ca1f11d487c2bbe4543e90080aeba4ba3c2b" },
            "underlying": [
                { "address": "0x1F9840a85d5aF5bf1D1762F925BDADdC4201F984", "decimals": 18, "amount": "1000000000000000000" }
            ]
        },
        "market": [
            { "address": "0x1494ca1f11d487c2bbe4543e90080aeba4ba3c2b", "symbol": "DPI", "name": "DeFi Pulse Index",
              "price": { "value": 10.0, "relative_change_24h": 1.5 } },
            { "address": "0x1f9840a85d5af5bf1d1762f925bdaddc4201f984", "symbol": "UNI", "name": "Uniswap",
              "color": "#ff007a", "price": { "value": 5.0 } }
        ]
    }"##;

    #[test]
    fn test_parse_wallet_data() {
        let data = parse_wallet_data(SAMPLE).unwrap();
        assert_eq!(data.basket.symbol, "DPI");
        assert!(data.collectibles.is_empty());

        let snapshot = data.market_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert!(snapshot.get(&data.basket.underlying[0].address).is_some());
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_wallet_data("{ not json").is_err());
        assert!(parse_wallet_data(r#"{"market": []}"#).is_err());
    }

    #[tokio::test]
    async fn test_load_wallet_data() {
        let path = std::env::temp_dir().join(format!("lazyindex-data-{}.json", std::process::id()));
        tokio::fs::write(&path, SAMPLE).await.unwrap();

        let data = load_wallet_data(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.ok();
        assert_eq!(data.market.len(), 2);

        assert!(load_wallet_data(Path::new("/nonexistent/dpi.json")).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_rejects_invalid_url() {
        assert!(fetch_market_snapshot("not a url").await.is_err());
    }
}
