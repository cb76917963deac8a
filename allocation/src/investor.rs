use serde::{Deserialize, Serialize};
use std::fmt;

use crate::NumericInput;

/// Identifies an investor contribution within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvestorId(i64);

impl InvestorId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// The id following this one.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for InvestorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for InvestorId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<InvestorId> for i64 {
    fn from(id: InvestorId) -> Self {
        id.0
    }
}

/// A single investor's contribution to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: InvestorId,
    pub name: String,
    pub amount: NumericInput,
}

impl Investor {
    pub fn new(
        id: impl Into<InvestorId>,
        name: impl Into<String>,
        amount: impl Into<NumericInput>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount: amount.into(),
        }
    }
}
