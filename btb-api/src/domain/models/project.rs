use allocation::{compute_allocation, AllocationResult, Investor, InvestorId};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::ProjectError;

/// The investment project being tracked.
///
/// Numeric fields hold the raw text a user typed so that partial entries like
/// `"12."` survive round trips; they are coerced only when computing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    pub cost: String,
    pub sell_price: String,
    pub currency: String,
    pub investors: Vec<Investor>,
}

impl Project {
    pub fn allocation(&self) -> AllocationResult {
        compute_allocation(&self.cost, &self.sell_price, &self.investors)
    }

    pub fn investor(&self, id: InvestorId) -> Option<&Investor> {
        self.investors.iter().find(|i| i.id == id)
    }

    pub fn investor_mut(&mut self, id: InvestorId) -> Option<&mut Investor> {
        self.investors.iter_mut().find(|i| i.id == id)
    }

    /// An id not used by any current investor.
    pub fn next_investor_id(&self) -> InvestorId {
        self.investors
            .iter()
            .map(|i| i.id)
            .max()
            .map(|id| id.next())
            .unwrap_or_else(|| InvestorId::new(1))
    }

    /// Checks that investor ids are unique.
    pub fn validate(&self) -> Result<(), ProjectError> {
        match self.investors.iter().map(|i| i.id).duplicates().next() {
            Some(id) => Err(ProjectError::DuplicateInvestorId(id)),
            None => Ok(()),
        }
    }

    /// Lists what changed going from `self` to `other`.
    pub fn diff(&self, other: &Project) -> Vec<ProjectChange> {
        let mut changes = Vec::new();

        if self.name != other.name {
            changes.push(ProjectChange::Name {
                from: self.name.clone(),
                to: other.name.clone(),
            });
        }
        if self.cost != other.cost {
            changes.push(ProjectChange::Cost {
                from: self.cost.clone(),
                to: other.cost.clone(),
            });
        }
        if self.sell_price != other.sell_price {
            changes.push(ProjectChange::SellPrice {
                from: self.sell_price.clone(),
                to: other.sell_price.clone(),
            });
        }
        if self.currency != other.currency {
            changes.push(ProjectChange::Currency {
                from: self.currency.clone(),
                to: other.currency.clone(),
            });
        }

        for before in &self.investors {
            match other.investor(before.id) {
                None => changes.push(ProjectChange::InvestorRemoved { id: before.id }),
                Some(after)
                    if after.name != before.name
                        || after.amount.to_text() != before.amount.to_text() =>
                {
                    changes.push(ProjectChange::InvestorUpdated { id: before.id })
                }
                Some(_) => {}
            }
        }
        for after in &other.investors {
            if self.investor(after.id).is_none() {
                changes.push(ProjectChange::InvestorAdded { id: after.id });
            }
        }

        let shared_order = |a: &Project, b: &Project| -> Vec<InvestorId> {
            a.investors
                .iter()
                .map(|i| i.id)
                .filter(|id| b.investor(*id).is_some())
                .collect()
        };
        if shared_order(self, other) != shared_order(other, self) {
            changes.push(ProjectChange::InvestorsReordered);
        }

        changes
    }
}

/// A single difference between two project snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProjectChange {
    Name { from: String, to: String },
    Cost { from: String, to: String },
    SellPrice { from: String, to: String },
    Currency { from: String, to: String },
    InvestorAdded { id: InvestorId },
    InvestorRemoved { id: InvestorId },
    InvestorUpdated { id: InvestorId },
    InvestorsReordered,
}

/// A project as held by the store, with its save counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProject {
    pub project: Project,
    /// Incremented on every successful save.
    pub version: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl StoredProject {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            version: 0,
            updated_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Result of a save: the stored snapshot and what the save changed.
#[derive(Debug, Clone)]
pub struct SavedProject {
    pub stored: StoredProject,
    pub changes: Vec<ProjectChange>,
}
