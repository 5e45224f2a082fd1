//! Card data models.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::Truthy;
use crate::request::card::CardFields;

/// A single card listing.
///
/// Every descriptive field is optional so that cards accepted without
/// presence checks still round-trip. Absent fields are left out of the JSON
/// entirely.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Card {
    /// The unique identifier of the card.
    ///
    /// Opaque; generated cards use a UUID but anything read back from disk
    /// is kept as-is.
    pub id: String,
    /// The listing's name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nomi: Option<String>,
    /// The asking price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narx: Option<Price>,
    /// Memory or storage size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xotira: Option<String>,
    /// Contact details of the seller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aloqa: Option<String>,
    /// The item's condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holati: Option<String>,
    /// URI of the listing's image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasmi: Option<String>,
}

impl Card {
    /// Creates a new card from its fields.
    pub fn new(id: impl Into<String>, fields: CardFields) -> Card {
        let CardFields {
            nomi,
            narx,
            xotira,
            aloqa,
            holati,
            rasmi,
        } = fields;

        Card {
            id: id.into(),
            nomi,
            narx,
            xotira,
            aloqa,
            holati,
            rasmi,
        }
    }

    /// Merges new fields into the card.
    ///
    /// Only truthy values replace the current ones; a falsy value keeps the
    /// old value instead of clearing it. The id never changes.
    pub fn merge(&mut self, fields: CardFields) {
        replace_truthy(&mut self.nomi, fields.nomi);
        replace_truthy(&mut self.narx, fields.narx);
        replace_truthy(&mut self.xotira, fields.xotira);
        replace_truthy(&mut self.aloqa, fields.aloqa);
        replace_truthy(&mut self.holati, fields.holati);
        replace_truthy(&mut self.rasmi, fields.rasmi);
    }
}

fn replace_truthy<T: Truthy>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_truthy() {
        *slot = value;
    }
}

/// A card's price.
///
/// Clients send both `"1200"` and `1200`; either is stored as received.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Price {
    /// A numeric price.
    Number(Number),
    /// A free-form price.
    Text(String),
}

impl Truthy for Price {
    fn is_truthy(&self) -> bool {
        match self {
            Price::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
            Price::Text(text) => text.is_truthy(),
        }
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        Price::Text(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Price::Text(value.to_owned())
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::Number(value.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn phone() -> Card {
        Card::new(
            "a1",
            CardFields {
                nomi: Some("Redmi Note 12".into()),
                narx: Some(Price::from(2_100_000)),
                xotira: Some("128GB".into()),
                aloqa: Some("+998901234567".into()),
                holati: Some("yangi".into()),
                rasmi: Some("https://img.example/redmi.jpg".into()),
            },
        )
    }

    #[test]
    fn price_accepts_text_and_numbers() {
        let price: Price = serde_json::from_value(json!("1 200 000")).unwrap();
        assert_eq!(price, Price::from("1 200 000"));

        let price: Price = serde_json::from_value(json!(1200)).unwrap();
        assert_eq!(price, Price::from(1200));
        assert_eq!(serde_json::to_value(&price).unwrap(), json!(1200));
    }

    #[test]
    fn price_truthiness() {
        assert!(Price::from(1).is_truthy());
        assert!(!Price::from(0).is_truthy());
        assert!(!Price::from("").is_truthy());
        assert!(Price::from("0").is_truthy());

        let price: Price = serde_json::from_value(json!(0.0)).unwrap();
        assert!(!price.is_truthy());
    }

    #[test]
    fn merge_only_overwrites_truthy_fields() {
        let mut card = phone();

        card.merge(CardFields {
            nomi: Some("Redmi Note 13".into()),
            narx: Some(Price::from(0)),
            xotira: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(card.id, "a1");
        assert_eq!(card.nomi.as_deref(), Some("Redmi Note 13"));
        assert_eq!(card.narx, Some(Price::from(2_100_000)));
        assert_eq!(card.xotira.as_deref(), Some("128GB"));
        assert_eq!(card.holati.as_deref(), Some("yangi"));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let card = Card::new(
            "b2",
            CardFields {
                nomi: Some("iPhone".into()),
                ..Default::default()
            },
        );

        assert_eq!(
            serde_json::to_value(&card).unwrap(),
            json!({ "id": "b2", "nomi": "iPhone" })
        );
    }
}
