//! Card endpoint request models.

use serde::{Deserialize, Serialize};

use crate::Truthy;
use crate::card::Price;

/// The body of `POST /card` and `PUT /card/{id}`.
///
/// Every field may be left out or set to `null`. Creating a card in strict
/// mode requires all of them to be truthy; updating merges only the truthy
/// ones.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CardFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narx: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xotira: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aloqa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holati: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasmi: Option<String>,
}

impl CardFields {
    /// The names of the fields that are not truthy.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("nomi", self.nomi.is_truthy()),
            ("narx", self.narx.is_truthy()),
            ("xotira", self.xotira.is_truthy()),
            ("aloqa", self.aloqa.is_truthy()),
            ("holati", self.holati.is_truthy()),
            ("rasmi", self.rasmi.is_truthy()),
        ]
        .into_iter()
        .filter_map(|(name, present)| (!present).then_some(name))
        .collect()
    }

    /// Checks if every field is truthy.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}
