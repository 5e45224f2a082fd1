//! API response models.

use serde::{Deserialize, Serialize};

use crate::Status;
use crate::card::Card;

/// A response carrying a single card, e.g. from `GET /card/{id}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CardResponse {
    /// `OK` or `Created`.
    pub status: Status,
    /// The card.
    pub card: Card,
}

/// A response carrying only a status, e.g. from `DELETE /card/{id}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StatusResponse {
    pub status: Status,
}
