// ============================================================================
// Module : api
// ============================================================================
// Chargement des données : fichier local et source de marché HTTP
// ============================================================================

pub mod snapshot;

// Re-export des fonctions principales
pub use snapshot::{fetch_market_snapshot, load_wallet_data, parse_wallet_data, WalletData};
