//! API request models.

pub mod card;
