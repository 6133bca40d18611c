use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One product row from the index. Every field may be missing.
///
/// Catalog exports often carry `price` and `rating` as JSON numbers; any scalar is kept
/// in its text form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedRecord {
    #[serde(default, alias = "product_title", deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub rating: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub review: Option<String>,
}

/// String, number or bool as text; `null` as `None`. Arrays and objects are rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

impl RetrievedRecord {
    /// Record with only a title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_review(mut self, review: impl Into<String>) -> Self {
        self.review = Some(review.into());
        self
    }

    /// Text that gets embedded for this record: title and review.
    pub fn embedding_text(&self) -> String {
        [self.title.as_deref(), self.review.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join("\n")
    }
}
