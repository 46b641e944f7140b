// ============================================================================
// Module : models
// ============================================================================
// Ce module contient toutes les structures de données de l'application
// ============================================================================

pub mod basket;       // Token panier et ses constituants
pub mod chart;        // Historique de prix
pub mod market;       // Données de marché et snapshot
pub mod underlying;   // Ligne dérivée de la liste des sous-jacents
pub mod unique_token; // Collectibles (NFT)

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazyindex::models::market::MarketSnapshot;
// On peut faire : use lazyindex::models::MarketSnapshot;
pub use basket::{BaseAsset, BasketAsset, Constituent};
pub use chart::{PricePoint, PriceSeries};
pub use market::{AssetPrice, MarketAsset, MarketSnapshot};
pub use underlying::UnderlyingItem;
pub use unique_token::{ImageDimensions, ImageLayout, TokenMedia, UniqueToken};
