// ============================================================================
// LazyIndex - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests d'intégration
// ============================================================================

pub mod allocation; // Calcul de la répartition des actifs sous-jacents
pub mod api;        // Chargement des données (fichier, HTTP)
pub mod app;        // État de l'application
pub mod config;     // Configuration (fichier + variables d'environnement)
pub mod format;     // Affichage en devise native
pub mod models;     // Structures de données
pub mod navigation; // Requêtes de navigation (routes, actions de la sheet)
pub mod ui;         // Interface utilisateur
