//! Lifecycle module - Operazioni transazionali multi-passo
//!
//! - `tree`: raccolta di tutti i discendenti di un nodo
//! - `tombstone`: soft delete che libera i campi univoci
//! - `deletion`: cancellazione atomica di un intero sottoalbero
//! - `counter`: like/view con contatore aggiornato nella stessa transazione

pub mod counter;
pub mod deletion;
pub mod tombstone;
pub mod tree;

pub use counter::{CounterMutator, CounterTargets};
pub use deletion::Hierarchy;
pub use tree::TreeResolver;
