//! Engagement DTOs - Richieste di like / visualizzazione e relative risposte

use crate::entities::{Counter, ObjectType};
use serde::{Deserialize, Serialize};

/// Body di `POST /likes` e `POST /views`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EngagementRequestDTO {
    pub user_id: i64,
    pub object_id: i64,
    pub object_type: ObjectType,
    /// `true` annulla un engagement precedente invece di registrarne uno nuovo
    #[serde(default)]
    pub undo: bool,
}

/// Valore del contatore dopo la mutazione
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EngagementDTO {
    pub object_id: i64,
    pub object_type: ObjectType,
    pub counter: Counter,
    pub value: i64,
}
