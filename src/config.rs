// ============================================================================
// Configuration
// ============================================================================
// Ordre de priorité :
// 1. Valeurs par défaut
// 2. Fichier JSON : <config_dir>/lazyindex/config.json
//    - Linux : ~/.config/lazyindex/config.json
//    - macOS : ~/Library/Application Support/lazyindex/config.json
// 3. Variables d'environnement LAZYINDEX_*
//
// CONCEPTS RUST :
// 1. #[serde(default)] : un fichier partiel complète avec Default
// 2. dirs : chemins cross-platform
// ============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::format::NativeCurrency;
use crate::navigation::Platform;

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Devise d'affichage
    pub native_currency: NativeCurrency,

    /// Plateforme (route de l'écran d'actif)
    pub platform: Platform,

    /// Fichier de données (panier, marché, collectibles)
    pub data_path: PathBuf,

    /// URL optionnelle d'un snapshot de marché à jour
    pub market_url: Option<String>,

    /// Intervalle de rafraîchissement automatique, en secondes (0 = jamais)
    pub refresh_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            native_currency: NativeCurrency::Usd,
            platform: Platform::Ios,
            data_path: PathBuf::from("./data/dpi.json"),
            market_url: None,
            refresh_secs: 60,
        }
    }
}

impl Config {
    /// Emplacement du fichier de configuration
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lazyindex").join("config.json"))
    }

    /// Charge la configuration complète (fichier + environnement)
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        info!(
            currency = %config.native_currency,
            platform = ?config.platform,
            data = ?config.data_path,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Lit un fichier JSON de configuration
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Configuration invalide dans {}", path.display()))
    }

    /// Applique les surcharges d'environnement
    ///
    /// CONCEPT RUST : closure en paramètre
    /// - `lookup` remplace std::env::var, ce qui rend la fonction testable
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(currency) = lookup("LAZYINDEX_CURRENCY") {
            self.native_currency = currency.parse::<NativeCurrency>().context("LAZYINDEX_CURRENCY invalide")?;
        }
        if let Some(platform) = lookup("LAZYINDEX_PLATFORM") {
            self.platform = platform.parse::<Platform>().context("LAZYINDEX_PLATFORM invalide")?;
        }
        if let Some(path) = lookup("LAZYINDEX_DATA") {
            self.data_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("LAZYINDEX_MARKET_URL") {
            self.market_url = Some(url).filter(|u| !u.trim().is_empty());
        }
        Ok(())
    }

    /// Intervalle de rafraîchissement, None si désactivé ou sans URL
    pub fn refresh_interval(&self) -> Option<Duration> {
        if self.market_url.is_none() || self.refresh_secs == 0 {
            return None;
        }
        Some(Duration::from_secs(self.refresh_secs))
    }
}
