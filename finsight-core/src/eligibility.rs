//! Eligibility decision types and the tunable scoring policy.

use serde::{Deserialize, Serialize};

/// Risk tier derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    #[serde(rename = "very-low")]
    VeryLow,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

/// Metrics echoed back alongside the decision so callers can render the
/// rationale without re-running the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub average_monthly_income: f64,
    pub average_monthly_expenses: f64,
    pub savings_per_month: f64,
    pub savings_rate: f64,
    pub months_span: f64,
    pub monthly_debt_obligations: f64,
}

/// Outcome of scoring one analysis snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub eligible: bool,
    /// 0-100 after the single final clamp.
    pub score: i64,
    pub risk_tier: RiskTier,
    pub strengths: Vec<String>,
    pub warnings: Vec<String>,
    /// Strengths when eligible, warnings otherwise, or a generic message.
    pub reasons: Vec<String>,
    /// 0 unless eligible.
    pub recommended_amount: f64,
    /// Same computed value regardless of eligibility, floored at 0.
    pub max_amount: f64,
    pub metrics: MetricsSnapshot,
}

/// Every threshold, point weight and cap used by the scorer, hoisted out of
/// the algorithm so risk policy can be tuned without touching code. The
/// defaults reproduce the production point model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    // Step 1: income vs expenses
    pub income_exceeds_expenses_points: i64,
    /// Expense/income ratio (percent) below which the lean-spending bonus
    /// applies.
    pub lean_expense_ratio: f64,
    pub lean_expense_points: i64,
    /// Ratio above which a high-spending warning is recorded (no points).
    pub high_expense_ratio: f64,

    // Step 2: absolute monthly savings
    pub strong_savings_threshold: f64,
    pub strong_savings_points: i64,
    pub positive_savings_points: i64,

    // Step 3: savings rate (percent)
    pub savings_rate_high: f64,
    pub savings_rate_high_points: i64,
    pub savings_rate_mid: f64,
    pub savings_rate_mid_points: i64,
    pub savings_rate_low_points: i64,

    // Step 4: income consistency
    pub consistency_high: f64,
    pub consistency_high_points: i64,
    pub consistency_mid: f64,
    pub consistency_mid_points: i64,
    pub consistency_low: f64,
    pub consistency_low_points: i64,

    // Step 5: spending stability
    pub stability_high: f64,
    pub stability_high_points: i64,
    pub stability_mid: f64,
    pub stability_mid_points: i64,

    // Step 6: emergency buffer (months of expenses)
    pub buffer_strong_months: f64,
    pub buffer_strong_points: i64,
    pub buffer_fair_months: f64,
    pub buffer_fair_points: i64,
    pub buffer_thin_points: i64,

    // Step 7: bill payment regularity
    pub regularity_threshold: f64,
    pub regularity_points: i64,
    pub regularity_fallback_points: i64,

    // Step 8: account age (months of history)
    pub account_age_full_months: f64,
    pub account_age_full_points: i64,
    pub account_age_partial_months: f64,
    pub account_age_partial_points: i64,

    // Step 9: debt penalty (debt/income percent)
    pub debt_ratio_severe: f64,
    pub debt_ratio_severe_penalty: i64,
    pub debt_ratio_elevated: f64,
    pub debt_ratio_elevated_penalty: i64,

    // Final decision
    pub eligible_min_score: i64,
    pub eligible_min_savings_rate: f64,
    pub recommended_multiplier: f64,
    pub recommended_cap: f64,

    // Risk tiers
    pub tier_high_below: i64,
    pub tier_medium_below: i64,
    pub tier_low_below: i64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            income_exceeds_expenses_points: 30,
            lean_expense_ratio: 70.0,
            lean_expense_points: 5,
            high_expense_ratio: 90.0,

            strong_savings_threshold: 10_000.0,
            strong_savings_points: 25,
            positive_savings_points: 10,

            savings_rate_high: 20.0,
            savings_rate_high_points: 15,
            savings_rate_mid: 10.0,
            savings_rate_mid_points: 10,
            savings_rate_low_points: 5,

            consistency_high: 80.0,
            consistency_high_points: 10,
            consistency_mid: 60.0,
            consistency_mid_points: 7,
            consistency_low: 40.0,
            consistency_low_points: 4,

            stability_high: 80.0,
            stability_high_points: 10,
            stability_mid: 60.0,
            stability_mid_points: 7,

            buffer_strong_months: 6.0,
            buffer_strong_points: 10,
            buffer_fair_months: 3.0,
            buffer_fair_points: 7,
            buffer_thin_points: 4,

            regularity_threshold: 80.0,
            regularity_points: 5,
            regularity_fallback_points: 2,

            account_age_full_months: 12.0,
            account_age_full_points: 5,
            account_age_partial_months: 6.0,
            account_age_partial_points: 3,

            debt_ratio_severe: 40.0,
            debt_ratio_severe_penalty: 15,
            debt_ratio_elevated: 20.0,
            debt_ratio_elevated_penalty: 8,

            eligible_min_score: 60,
            eligible_min_savings_rate: 5.0,
            recommended_multiplier: 3.0,
            recommended_cap: 100_000.0,

            tier_high_below: 40,
            tier_medium_below: 60,
            tier_low_below: 80,
        }
    }
}

impl ScoringPolicy {
    /// Load a policy override from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn risk_tier(&self, score: i64) -> RiskTier {
        if score < self.tier_high_below {
            RiskTier::High
        } else if score < self.tier_medium_below {
            RiskTier::Medium
        } else if score < self.tier_low_below {
            RiskTier::Low
        } else {
            RiskTier::VeryLow
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tiers() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.risk_tier(20), RiskTier::High);
        assert_eq!(policy.risk_tier(40), RiskTier::Medium);
        assert_eq!(policy.risk_tier(60), RiskTier::Low);
        assert_eq!(policy.risk_tier(80), RiskTier::VeryLow);
        assert_eq!(policy.risk_tier(100), RiskTier::VeryLow);
    }

    #[test]
    fn test_policy_json_partial_override() {
        let policy = ScoringPolicy::from_json(r#"{"recommended_cap": 250000.0}"#).unwrap();
        assert_eq!(policy.recommended_cap, 250_000.0);
        // everything else stays at defaults
        assert_eq!(policy.strong_savings_threshold, 10_000.0);
        assert_eq!(policy.eligible_min_score, 60);
    }

    #[test]
    fn test_tier_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&RiskTier::VeryLow).unwrap(),
            "\"very-low\""
        );
    }
}
