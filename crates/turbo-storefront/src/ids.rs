//! Newtype IDs for type-safe identifiers.
//!
//! Keeps a cart line item ID from being passed where a product ID is
//! expected. An ID serializes the way it was given: numeric IDs as JSON
//! numbers, anything else as a JSON string.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw ID value as rendered by the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(u64),
    Text(String),
}

impl fmt::Display for IdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdValue::Number(n) => write!(f, "{}", n),
            IdValue::Text(s) => f.write_str(s),
        }
    }
}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(IdValue);

        impl $name {
            /// Create a new textual ID.
            pub fn new(id: impl Into<String>) -> Self {
                Self(IdValue::Text(id.into()))
            }

            /// Read an ID from attribute or command-line text.
            ///
            /// All-digit text becomes a numeric ID.
            pub fn from_attr(raw: &str) -> Self {
                let raw = raw.trim();
                match raw.parse::<u64>() {
                    Ok(n) if raw.bytes().all(|b| b.is_ascii_digit()) => Self(IdValue::Number(n)),
                    _ => Self::new(raw),
                }
            }

            pub fn value(&self) -> &IdValue {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(IdValue::Number(n))
            }
        }
    };
}

define_id!(
    /// Catalog product, as rendered in `data-product-id`.
    ProductId
);
define_id!(
    /// Line item inside the session cart.
    CartItemId
);
