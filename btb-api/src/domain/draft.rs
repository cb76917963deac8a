use allocation::{is_numeric_text, Investor, InvestorId, NumericInput};
use serde::{Deserialize, Serialize};

use crate::domain::{
    models::{Project, ProjectChange, StoredProject},
    DraftError,
};

/// Partial update of the project's top-level fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFieldsUpdate {
    pub name: Option<String>,
    pub cost: Option<String>,
    pub sell_price: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewInvestor {
    pub name: String,
    #[serde(default)]
    pub amount: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvestorUpdate {
    pub name: Option<String>,
    pub amount: Option<String>,
}

/// A user's unsaved edits on top of the snapshot they were based on.
///
/// Dirtiness is the explicit diff between the base snapshot and the working
/// copy, so undoing an edit by hand makes the draft clean again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    base: Project,
    base_version: u64,
    working: Project,
}

impl ProjectDraft {
    pub fn new(stored: &StoredProject) -> Self {
        Self {
            base: stored.project.clone(),
            base_version: stored.version,
            working: stored.project.clone(),
        }
    }

    pub fn project(&self) -> &Project {
        &self.working
    }

    pub fn base_version(&self) -> u64 {
        self.base_version
    }

    pub fn changes(&self) -> Vec<ProjectChange> {
        self.base.diff(&self.working)
    }

    pub fn is_dirty(&self) -> bool {
        !self.changes().is_empty()
    }

    /// True if the store has been saved since this draft was taken.
    pub fn is_stale(&self, stored: &StoredProject) -> bool {
        stored.version != self.base_version
    }

    /// Picks up a newer stored snapshot, but only when there is nothing to lose.
    ///
    /// Returns whether the draft was replaced.
    pub fn refresh(&mut self, stored: &StoredProject) -> bool {
        if self.is_stale(stored) && !self.is_dirty() {
            self.rebase(stored);
            true
        } else {
            false
        }
    }

    /// Makes `stored` the new base and working copy.
    pub fn rebase(&mut self, stored: &StoredProject) {
        *self = Self::new(stored);
    }

    pub fn update_fields(&mut self, update: ProjectFieldsUpdate) -> Result<(), DraftError> {
        check_numeric("cost", update.cost.as_deref())?;
        check_numeric("sellPrice", update.sell_price.as_deref())?;

        let project = &mut self.working;
        if let Some(name) = update.name {
            project.name = name;
        }
        if let Some(cost) = update.cost {
            project.cost = cost;
        }
        if let Some(sell_price) = update.sell_price {
            project.sell_price = sell_price;
        }
        if let Some(currency) = update.currency {
            project.currency = currency;
        }

        Ok(())
    }

    pub fn add_investor(&mut self, new: NewInvestor) -> Result<InvestorId, DraftError> {
        check_numeric("amount", Some(&new.amount))?;

        // Ids are never reused within a draft, even after removals.
        let id = self.working.next_investor_id().max(self.base.next_investor_id());
        self.working
            .investors
            .push(Investor::new(id, new.name, NumericInput::Text(new.amount)));

        Ok(id)
    }

    pub fn update_investor(
        &mut self,
        id: InvestorId,
        update: InvestorUpdate,
    ) -> Result<(), DraftError> {
        check_numeric("amount", update.amount.as_deref())?;

        let investor = self
            .working
            .investor_mut(id)
            .ok_or(DraftError::InvestorNotFound(id))?;
        if let Some(name) = update.name {
            investor.name = name;
        }
        if let Some(amount) = update.amount {
            investor.amount = NumericInput::Text(amount);
        }

        Ok(())
    }

    pub fn remove_investor(&mut self, id: InvestorId) -> Result<(), DraftError> {
        let before = self.working.investors.len();
        self.working.investors.retain(|i| i.id != id);

        if self.working.investors.len() == before {
            return Err(DraftError::InvestorNotFound(id));
        }
        Ok(())
    }
}

fn check_numeric(field: &'static str, value: Option<&str>) -> Result<(), DraftError> {
    match value {
        Some(value) if !is_numeric_text(value) => Err(DraftError::InvalidNumericText {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::fixtures::default_project;

    fn stored(version: u64) -> StoredProject {
        StoredProject {
            version,
            ..StoredProject::new(default_project())
        }
    }

    #[test]
    fn fresh_draft_is_clean() {
        let draft = ProjectDraft::new(&stored(0));
        assert!(!draft.is_dirty());
        assert_eq!(draft.project(), &default_project());
    }

    #[test]
    fn editing_makes_the_draft_dirty_and_undoing_cleans_it() {
        let mut draft = ProjectDraft::new(&stored(0));

        draft
            .update_fields(ProjectFieldsUpdate {
                sell_price: Some("25000".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(draft.is_dirty());

        draft
            .update_fields(ProjectFieldsUpdate {
                sell_price: Some("20000".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(!draft.is_dirty());
    }

    #[test]
    fn partial_numbers_are_kept_verbatim() {
        let mut draft = ProjectDraft::new(&stored(0));
        draft
            .update_fields(ProjectFieldsUpdate {
                cost: Some("12.".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(draft.project().cost, "12.");
        assert!(draft.project().allocation().is_valid);
    }

    #[test]
    fn invalid_numeric_text_leaves_the_draft_untouched() {
        let mut draft = ProjectDraft::new(&stored(0));
        let before = draft.clone();

        let err = draft
            .update_fields(ProjectFieldsUpdate {
                name: Some("Renamed".to_string()),
                cost: Some("12a".to_string()),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            DraftError::InvalidNumericText {
                field: "cost",
                value: "12a".to_string(),
            }
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn added_investors_get_fresh_ids() {
        let mut draft = ProjectDraft::new(&stored(0));

        draft.remove_investor(InvestorId::new(2)).unwrap();
        let id = draft
            .add_investor(NewInvestor {
                name: "Carol".to_string(),
                amount: "2500".to_string(),
            })
            .unwrap();

        assert_eq!(id, InvestorId::new(3));
        assert!(draft.project().validate().is_ok());
        assert!(draft.changes().contains(&ProjectChange::InvestorAdded { id }));
    }

    #[test]
    fn unknown_investors_are_reported() {
        let mut draft = ProjectDraft::new(&stored(0));

        assert_eq!(
            draft.remove_investor(InvestorId::new(42)),
            Err(DraftError::InvestorNotFound(InvestorId::new(42)))
        );
        assert_eq!(
            draft.update_investor(InvestorId::new(42), InvestorUpdate::default()),
            Err(DraftError::InvestorNotFound(InvestorId::new(42)))
        );
    }

    #[test]
    fn investor_amount_updates_are_filtered() {
        let mut draft = ProjectDraft::new(&stored(0));

        assert!(draft
            .update_investor(
                InvestorId::new(1),
                InvestorUpdate {
                    amount: Some("-5".to_string()),
                    ..Default::default()
                },
            )
            .is_err());

        draft
            .update_investor(
                InvestorId::new(1),
                InvestorUpdate {
                    amount: Some("7500".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(draft.project().allocation().total_investment, 12500.0);
    }

    #[test]
    fn clean_drafts_follow_newer_saves_but_dirty_ones_do_not() {
        let mut clean = ProjectDraft::new(&stored(0));
        assert!(clean.refresh(&stored(1)));
        assert_eq!(clean.base_version(), 1);

        let mut dirty = ProjectDraft::new(&stored(0));
        dirty.remove_investor(InvestorId::new(1)).unwrap();
        assert!(!dirty.refresh(&stored(1)));
        assert!(dirty.is_stale(&stored(1)));
        assert!(dirty.is_dirty());
    }
}
