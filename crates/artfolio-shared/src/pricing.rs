//! Listing prices and the discount badge shown next to them.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The price pair an artist sets on an artwork.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub original: f64,
    /// `None` when the artwork is sold at its original price.
    pub discounted: Option<f64>,
}

impl Pricing {
    pub fn new(original: f64, discounted: Option<f64>) -> Self {
        Self {
            original,
            discounted,
        }
    }

    /// Both prices must be positive and the discount may not exceed the
    /// original price.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.original > 0.0) {
            return Err(ValidationError::NonPositivePrice {
                field: "original price",
            });
        }
        if let Some(discounted) = self.discounted {
            if !(discounted > 0.0) {
                return Err(ValidationError::NonPositivePrice {
                    field: "discounted price",
                });
            }
            if discounted > self.original {
                return Err(ValidationError::DiscountExceedsOriginal {
                    original: self.original,
                    discounted,
                });
            }
        }
        Ok(())
    }

    /// What a buyer actually pays.
    pub fn effective(&self) -> f64 {
        self.discounted.unwrap_or(self.original)
    }

    /// Whole-number percentage knocked off the original price, rounded down.
    pub fn discount_percent(&self) -> u32 {
        match self.discounted {
            Some(discounted) if self.original > 0.0 && discounted < self.original => {
                ((self.original - discounted) / self.original * 100.0).floor() as u32
            }
            _ => 0,
        }
    }
}
