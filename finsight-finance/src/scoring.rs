//! Eligibility scorer: additive point model over one analysis snapshot.
//!
//! The nine steps run in fixed order and accumulate freely; the running
//! total is clamped to 0-100 once, at the very end, so a late debt penalty
//! can undo earlier gains.

use finsight_core::{AnalysisResult, EligibilityResult, MetricsSnapshot, ScoringPolicy};

/// Score one analysis snapshot against a policy. Pure and deterministic.
pub fn score_eligibility(analysis: &AnalysisResult, policy: &ScoringPolicy) -> EligibilityResult {
    let mut score: i64 = 0;
    let mut strengths: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    // 1. income vs expenses
    if analysis.total_income > analysis.total_expenses {
        score += policy.income_exceeds_expenses_points;
        strengths.push("Income exceeds expenses".to_string());

        let ratio = if analysis.total_income > 0.0 {
            analysis.total_expenses / analysis.total_income * 100.0
        } else {
            0.0
        };
        if ratio < policy.lean_expense_ratio {
            score += policy.lean_expense_points;
            strengths.push(format!("Lean spending ({ratio:.0}% of income)"));
        } else if ratio > policy.high_expense_ratio {
            warnings.push(format!("High expense ratio ({ratio:.0}% of income)"));
        }
    } else {
        warnings.push("Expenses meet or exceed income".to_string());
    }

    // 2. absolute monthly savings
    if analysis.savings_per_month > policy.strong_savings_threshold {
        score += policy.strong_savings_points;
        strengths.push("Strong monthly savings".to_string());
    } else if analysis.savings_per_month > 0.0 {
        score += policy.positive_savings_points;
        strengths.push("Positive monthly savings".to_string());
    } else {
        warnings.push("No monthly savings headroom".to_string());
    }

    // 3. savings rate
    if analysis.savings_rate >= policy.savings_rate_high {
        score += policy.savings_rate_high_points;
        strengths.push(format!("High savings rate ({:.0}%)", analysis.savings_rate));
    } else if analysis.savings_rate >= policy.savings_rate_mid {
        score += policy.savings_rate_mid_points;
        strengths.push(format!("Good savings rate ({:.0}%)", analysis.savings_rate));
    } else if analysis.savings_rate > 0.0 {
        score += policy.savings_rate_low_points;
    }

    // 4. income consistency
    if analysis.income_consistency_score >= policy.consistency_high {
        score += policy.consistency_high_points;
        strengths.push("Highly consistent income".to_string());
    } else if analysis.income_consistency_score >= policy.consistency_mid {
        score += policy.consistency_mid_points;
    } else if analysis.income_consistency_score >= policy.consistency_low {
        score += policy.consistency_low_points;
    }

    // 5. spending stability
    if analysis.spending_volatility_score >= policy.stability_high {
        score += policy.stability_high_points;
        strengths.push("Stable spending pattern".to_string());
    } else if analysis.spending_volatility_score >= policy.stability_mid {
        score += policy.stability_mid_points;
    }

    // 6. emergency buffer
    if analysis.emergency_savings_buffer >= policy.buffer_strong_months {
        score += policy.buffer_strong_points;
        strengths.push(format!(
            "Emergency buffer of {:.1} months",
            analysis.emergency_savings_buffer
        ));
    } else if analysis.emergency_savings_buffer >= policy.buffer_fair_months {
        score += policy.buffer_fair_points;
    } else if analysis.emergency_savings_buffer > 0.0 {
        score += policy.buffer_thin_points;
    }

    // 7. bill payment regularity
    if analysis.bill_payment_regularity >= policy.regularity_threshold {
        score += policy.regularity_points;
        strengths.push("Regular recurring payments detected".to_string());
    } else {
        score += policy.regularity_fallback_points;
    }

    // 8. account age (history span)
    if analysis.months_span >= policy.account_age_full_months {
        score += policy.account_age_full_points;
        strengths.push(format!(
            "{:.0} months of statement history",
            analysis.months_span
        ));
    } else if analysis.months_span >= policy.account_age_partial_months {
        score += policy.account_age_partial_points;
    } else {
        warnings.push(format!(
            "Short statement history ({:.1} months)",
            analysis.months_span
        ));
    }

    // 9. debt penalty
    if analysis.monthly_debt_obligations > 0.0 {
        let debt_ratio = if analysis.average_monthly_income > 0.0 {
            analysis.monthly_debt_obligations / analysis.average_monthly_income * 100.0
        } else {
            100.0
        };
        if debt_ratio > policy.debt_ratio_severe {
            score -= policy.debt_ratio_severe_penalty;
            warnings.push(format!("Heavy debt load ({debt_ratio:.0}% of income)"));
        } else if debt_ratio > policy.debt_ratio_elevated {
            score -= policy.debt_ratio_elevated_penalty;
            warnings.push(format!("Elevated debt load ({debt_ratio:.0}% of income)"));
        } else {
            strengths.push("Debt obligations are manageable".to_string());
        }
    } else {
        strengths.push("No debt obligations detected".to_string());
    }

    // the single clamp
    let score = score.clamp(0, 100);

    let eligible = score >= policy.eligible_min_score
        && analysis.savings_per_month > policy.strong_savings_threshold
        && analysis.total_income > analysis.total_expenses
        && analysis.savings_rate > policy.eligible_min_savings_rate;

    let computed = (analysis.savings_per_month
        * policy.recommended_multiplier
        * (score as f64 / 100.0))
        .min(policy.recommended_cap)
        .max(0.0);
    let recommended_amount = if eligible { computed } else { 0.0 };

    let reasons = if eligible {
        strengths.clone()
    } else if !warnings.is_empty() {
        warnings.clone()
    } else {
        vec!["Insufficient financial criteria met".to_string()]
    };

    EligibilityResult {
        eligible,
        score,
        risk_tier: policy.risk_tier(score),
        strengths,
        warnings,
        reasons,
        recommended_amount,
        max_amount: computed,
        metrics: MetricsSnapshot {
            average_monthly_income: analysis.average_monthly_income,
            average_monthly_expenses: analysis.average_monthly_expenses,
            savings_per_month: analysis.savings_per_month,
            savings_rate: analysis.savings_rate,
            months_span: analysis.months_span,
            monthly_debt_obligations: analysis.monthly_debt_obligations,
        },
    }
}
