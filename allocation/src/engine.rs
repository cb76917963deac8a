use serde::{Deserialize, Serialize};

use crate::{Investor, InvestorId, NumericInput};

/// How positive profit is divided between management and the investor pool.
///
/// Losses are never split: the investor pool carries all of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfitSplit {
    pub management: f64,
    pub investors: f64,
}

impl ProfitSplit {
    pub const STANDARD: ProfitSplit = ProfitSplit {
        management: 0.70,
        investors: 0.30,
    };

    /// Returns `(management_share, investor_pool)` for the given profit.
    pub fn divide(&self, profit: f64) -> (f64, f64) {
        if profit > 0.0 {
            (profit * self.management, profit * self.investors)
        } else {
            (0.0, profit)
        }
    }
}

impl Default for ProfitSplit {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One investor's slice of the pooled share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorResult {
    pub id: InvestorId,
    pub name: String,
    pub amount: f64,
    pub individual_profit_share: f64,
    pub payout: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub profit: f64,
    pub management_share: f64,
    pub investor_profit_share: f64,
    pub total_investment: f64,
    pub investor_results: Vec<InvestorResult>,
    pub net_return: f64,
    pub roi: f64,
    pub is_valid: bool,
}

impl AllocationResult {
    /// A zeroed result that still echoes every contribution back.
    ///
    /// An overflowed total is reported as zero.
    fn invalid(contributions: Vec<(InvestorId, String, f64)>, total_investment: f64) -> Self {
        let total_investment = if total_investment.is_finite() {
            total_investment
        } else {
            0.0
        };
        let investor_results = contributions
            .into_iter()
            .map(|(id, name, amount)| InvestorResult {
                id,
                name,
                amount,
                individual_profit_share: 0.0,
                payout: amount,
            })
            .collect();

        Self {
            profit: 0.0,
            management_share: 0.0,
            investor_profit_share: 0.0,
            total_investment,
            investor_results,
            net_return: 0.0,
            roi: 0.0,
            is_valid: false,
        }
    }

    pub fn investor(&self, id: InvestorId) -> Option<&InvestorResult> {
        self.investor_results.iter().find(|r| r.id == id)
    }
}

/// Computes the allocation using [`ProfitSplit::STANDARD`].
pub fn compute_allocation(
    cost: impl Into<NumericInput>,
    sell_price: impl Into<NumericInput>,
    investors: &[Investor],
) -> AllocationResult {
    compute_allocation_with(ProfitSplit::STANDARD, cost, sell_price, investors)
}

/// Computes profit, the management/investor split and every investor's payout.
///
/// The result is marked invalid (with all derived figures zeroed) when cost or
/// sell price is zero, when nothing has been invested, or when any figure would
/// overflow to an infinity.
pub fn compute_allocation_with(
    split: ProfitSplit,
    cost: impl Into<NumericInput>,
    sell_price: impl Into<NumericInput>,
    investors: &[Investor],
) -> AllocationResult {
    let cost = cost.into().value();
    let sell_price = sell_price.into().value();

    let contributions: Vec<(InvestorId, String, f64)> = investors
        .iter()
        .map(|investor| (investor.id, investor.name.clone(), investor.amount.value()))
        .collect();
    let total_investment: f64 = contributions.iter().map(|(_, _, amount)| amount).sum();

    let profit = sell_price - cost;

    // Must hold before any division by total_investment below.
    if cost == 0.0
        || sell_price == 0.0
        || total_investment <= 0.0
        || !total_investment.is_finite()
        || !profit.is_finite()
    {
        return AllocationResult::invalid(contributions, total_investment);
    }

    let (management_share, investor_profit_share) = split.divide(profit);

    let investor_results: Vec<InvestorResult> = contributions
        .iter()
        .cloned()
        .map(|(id, name, amount)| {
            let ratio = amount / total_investment;
            let individual_profit_share = investor_profit_share * ratio;
            InvestorResult {
                id,
                name,
                amount,
                individual_profit_share,
                payout: amount + individual_profit_share,
            }
        })
        .collect();

    let net_return = investor_profit_share;
    let roi = net_return / total_investment * 100.0;

    // Finite inputs near f64::MAX can still overflow a payout or the ROI.
    let overflowed = !roi.is_finite()
        || !management_share.is_finite()
        || investor_results
            .iter()
            .any(|r| !r.individual_profit_share.is_finite() || !r.payout.is_finite());
    if overflowed {
        return AllocationResult::invalid(contributions, total_investment);
    }

    AllocationResult {
        profit,
        management_share,
        investor_profit_share,
        total_investment,
        investor_results,
        net_return,
        roi,
        is_valid: true,
    }
}

/// A complete allocation request, as sent by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationInput {
    #[serde(default)]
    pub cost: NumericInput,
    #[serde(default)]
    pub sell_price: NumericInput,
    #[serde(default)]
    pub investors: Vec<Investor>,
}

impl AllocationInput {
    pub fn compute(&self) -> AllocationResult {
        compute_allocation(&self.cost, &self.sell_price, &self.investors)
    }
}
