// ============================================================================
// Structures : UniqueToken, ImageDimensions, ImageLayout
// ============================================================================
// Collectible (NFT) et calcul de la taille de sa carte image
//
// Règles de mise en page :
// - largeur max = largeur de l'écran - 2 × padding
// - hauteur max = 1.5 × largeur max
// - une image plus haute que la hauteur max est "huge" : la carte devient carrée
// ============================================================================

use serde::{Deserialize, Serialize};

/// Padding horizontal de la carte (en pixels côté mobile, en cellules côté TUI)
pub const IMAGE_PADDING_HORIZONTAL: f64 = 19.0;

/// Ratio hauteur max / largeur max
const MAX_HEIGHT_RATIO: f64 = 1.5;

/// Dimensions natives de l'image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub width: f64,
    pub height: f64,
}

/// Un collectible (NFT)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniqueToken {
    /// Identifiant unique (contrat + token id)
    pub unique_id: String,

    pub name: String,

    /// Image de prévisualisation
    #[serde(default)]
    pub image_preview_url: Option<String>,

    /// Média animé ou modèle 3D
    #[serde(default)]
    pub animation_url: Option<String>,

    /// Couleur de fond "#rrggbb" (sans le dièse côté OpenSea)
    #[serde(default)]
    pub background: Option<String>,

    /// Dimensions connues de l'image de prévisualisation
    #[serde(default)]
    pub image_dimensions: Option<ImageDimensions>,
}

/// Ce que la carte affiche
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMedia {
    /// Modèle 3D, avec l'image en repli
    Model3d { uri: String, fallback: Option<String> },
    /// Image simple
    Image { url: Option<String> },
}

impl UniqueToken {
    /// Choisit le média à afficher
    pub fn media(&self) -> TokenMedia {
        match self.animation_url.as_deref() {
            Some(uri) if is_3d_uri(uri) => TokenMedia::Model3d {
                uri: uri.to_string(),
                fallback: self.image_preview_url.clone(),
            },
            _ => TokenMedia::Image {
                url: self.image_preview_url.clone(),
            },
        }
    }
}

/// Vrai si l'URI désigne un modèle 3D (.glb / .gltf)
///
/// La query string et le fragment sont ignorés
pub fn is_3d_uri(uri: &str) -> bool {
    let path = uri.split(['?', '#']).next().unwrap_or_default();
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".glb") || lower.ends_with(".gltf")
}

/// Taille calculée de la carte image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageLayout {
    pub max_image_width: f64,
    pub max_image_height: f64,
    /// Hauteur de l'image si on la met à la largeur max
    pub height_for_device: f64,
    /// Hauteur finale du conteneur
    pub container_height: f64,
    /// L'image dépasse la hauteur max : marge verticale autour d'elle
    pub is_image_huge: bool,
}

impl ImageLayout {
    /// Calcule la mise en page pour une largeur d'écran donnée
    ///
    /// Des dimensions absentes ou dégénérées (0, NaN) sont traitées comme carrées
    pub fn compute(device_width: f64, padding: f64, dims: Option<ImageDimensions>) -> Self {
        let max_image_width = (device_width - padding * 2.0).max(0.0);
        let max_image_height = max_image_width * MAX_HEIGHT_RATIO;

        let aspect = dims
            .filter(|d| d.width.is_finite() && d.height.is_finite())
            .filter(|d| d.width > 0.0 && d.height > 0.0)
            .map(|d| d.height / d.width)
            .unwrap_or(1.0);

        let height_for_device = max_image_width * aspect;
        let is_image_huge = height_for_device > max_image_height;
        let container_height = if is_image_huge {
            max_image_width
        } else {
            height_for_device
        };

        Self {
            max_image_width,
            max_image_height,
            height_for_device,
            container_height,
            is_image_huge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_3d_uri() {
        assert!(is_3d_uri("https://cdn.example/model.glb"));
        assert!(is_3d_uri("https://cdn.example/model.GLTF?v=2"));
        assert!(!is_3d_uri("https://cdn.example/image.png"));
        assert!(!is_3d_uri("https://cdn.example/glb"));
    }

    #[test]
    fn test_layout_landscape_image() {
        let dims = ImageDimensions { width: 800.0, height: 400.0 };
        let layout = ImageLayout::compute(414.0, IMAGE_PADDING_HORIZONTAL, Some(dims));
        assert_eq!(layout.max_image_width, 376.0);
        assert_eq!(layout.container_height, 188.0);
        assert!(!layout.is_image_huge);
    }

    #[test]
    fn test_layout_tall_image_becomes_square() {
        let dims = ImageDimensions { width: 100.0, height: 400.0 };
        let layout = ImageLayout::compute(414.0, IMAGE_PADDING_HORIZONTAL, Some(dims));
        assert!(layout.is_image_huge);
        assert_eq!(layout.container_height, layout.max_image_width);
    }

    #[test]
    fn test_layout_without_dimensions() {
        let layout = ImageLayout::compute(100.0, 10.0, None);
        assert_eq!(layout.container_height, 80.0);

        let zero = ImageDimensions { width: 0.0, height: 50.0 };
        let layout = ImageLayout::compute(100.0, 10.0, Some(zero));
        assert_eq!(layout.container_height, 80.0);
    }

    #[test]
    fn test_media_selection() {
        let mut token = UniqueToken {
            unique_id: "0xabc_1".to_string(),
            name: "Cube".to_string(),
            image_preview_url: Some("https://img/cube.png".to_string()),
            animation_url: Some("https://img/cube.glb".to_string()),
            background: None,
            image_dimensions: None,
        };
        assert_eq!(
            token.media(),
            TokenMedia::Model3d {
                uri: "https://img/cube.glb".to_string(),
                fallback: Some("https://img/cube.png".to_string()),
            }
        );

        token.animation_url = Some("https://img/cube.mp4".to_string());
        assert_eq!(
            token.media(),
            TokenMedia::Image {
                url: Some("https://img/cube.png".to_string())
            }
        );
    }
}
