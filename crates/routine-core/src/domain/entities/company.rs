//! Company entity.

use crate::CompanyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A company that employs people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Unique identifier for the company.
    pub id: CompanyId,
    /// Company name.
    pub name: String,
    /// Country of registration.
    pub country: String,
    /// Industry the company operates in.
    pub industry: String,
    /// Flagship product.
    pub product: String,
    /// Free-form introduction.
    pub introduction: String,
    /// When the company went bankrupt, if it did.
    pub bankrupt_time: Option<DateTime<Utc>>,
}

impl Company {
    /// Creates a new company with a fresh ID.
    #[must_use]
    pub fn new(
        name: String,
        country: String,
        industry: String,
        product: String,
        introduction: String,
    ) -> Self {
        Self {
            id: CompanyId::new(),
            name,
            country,
            industry,
            product,
            introduction,
            bankrupt_time: None,
        }
    }

    /// Checks whether the company has gone bankrupt.
    #[must_use]
    pub const fn is_bankrupt(&self) -> bool {
        self.bankrupt_time.is_some()
    }
}
