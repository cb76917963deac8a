use allocation::AllocationResult;

use crate::domain::{models::Project, Role};

/// Restricts the per-investor rows of `result` to what `role` may see.
///
/// Management sees every row; an investor sees at most their own. Totals are
/// left untouched for everyone.
pub fn visible_results(role: &Role, mut result: AllocationResult) -> AllocationResult {
    match role {
        Role::Management => {}
        Role::Investor(own_id) => result.investor_results.retain(|row| row.id == *own_id),
    }
    result
}

/// Restricts the project's contribution list the same way as [`visible_results`].
pub fn visible_project(role: &Role, mut project: Project) -> Project {
    match role {
        Role::Management => {}
        Role::Investor(own_id) => project.investors.retain(|i| i.id == *own_id),
    }
    project
}

#[cfg(test)]
mod tests {
    use allocation::InvestorId;

    use super::*;
    use crate::domain::models::fixtures::default_project;

    #[test]
    fn management_sees_every_investor() {
        let full = default_project().allocation();
        let visible = visible_results(&Role::Management, full.clone());
        assert_eq!(visible, full);
    }

    #[test]
    fn investor_sees_only_their_row_but_all_totals() {
        let full = default_project().allocation();
        let visible = visible_results(&Role::Investor(InvestorId::new(2)), full.clone());

        assert_eq!(visible.investor_results.len(), 1);
        assert_eq!(visible.investor_results[0].id, InvestorId::new(2));
        assert_eq!(visible.total_investment, full.total_investment);
        assert_eq!(visible.management_share, full.management_share);
        assert_eq!(visible.roi, full.roi);
    }

    #[test]
    fn investor_sees_only_their_own_contribution() {
        let project = visible_project(&Role::Investor(InvestorId::new(1)), default_project());

        assert_eq!(project.investors.len(), 1);
        assert_eq!(project.investors[0].name, "Alice");
        assert_eq!(project.cost, default_project().cost);
    }

    #[test]
    fn investor_without_a_contribution_sees_no_rows() {
        let full = default_project().allocation();
        let visible = visible_results(&Role::Investor(InvestorId::new(99)), full);

        assert!(visible.investor_results.is_empty());
        assert!(visible.is_valid);
    }
}
