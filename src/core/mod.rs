//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione
//! - Transazioni

pub mod config;
pub mod error;
pub mod state;
pub mod transaction;

// Re-exports per facilitare l'import
pub use config::Config;
pub use error::{AppError, StoreError, StoreResult};
pub use state::AppState;
