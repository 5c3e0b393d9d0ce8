//! Analytics engine: classified transactions into one aggregate snapshot.
//!
//! Pure and order-independent: every aggregation is a sum, mean or set
//! min/max, so shuffling the input list cannot change the result.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use finsight_core::{
    AnalysisResult, DateRange, MonthlyBucket, RecurringPattern, Transaction,
};

/// Wording that marks a debt obligation.
pub const DEBT_KEYWORDS: &[&str] = &[
    "loan",
    "emi",
    "credit card",
    "debt",
    "repayment",
    "installment",
];

/// Analyze against the current date.
///
/// The clock is consulted only as the fallback date range when no
/// transaction date parses; with at least one parseable date the result is a
/// pure function of the input. Use [`analyze_as_of`] for a fully pinned run.
pub fn analyze(transactions: &[Transaction]) -> AnalysisResult {
    analyze_as_of(transactions, Local::now().date_naive())
}

/// Analyze with an explicit "today" for the no-parseable-dates fallback.
pub fn analyze_as_of(transactions: &[Transaction], today: NaiveDate) -> AnalysisResult {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let total_expenses: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    let savings = total_income - total_expenses;

    let parsed: Vec<NaiveDate> = transactions.iter().filter_map(|t| t.parsed_date()).collect();
    let (start, end) = match (parsed.iter().min(), parsed.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (today, today),
    };
    let days_span = (end - start).num_days().max(1);
    let months_span = (days_span as f64 / 30.0).max(1.0);

    let average_monthly_income = total_income / months_span;
    let average_monthly_expenses = total_expenses / months_span;
    let savings_per_month = average_monthly_income - average_monthly_expenses;
    let savings_rate = if average_monthly_income > 0.0 {
        savings_per_month / average_monthly_income * 100.0
    } else {
        0.0
    };

    let monthly_buckets = bucket_by_month(transactions);
    let income_consistency_score = income_consistency(&monthly_buckets);
    let spending_volatility_score = spending_stability(&monthly_buckets);

    let emergency_savings_buffer = if average_monthly_expenses > 0.0 {
        savings / average_monthly_expenses
    } else {
        0.0
    };

    let recurring_patterns = find_recurring(transactions);
    let bill_payment_regularity = if recurring_patterns.is_empty() {
        50.0
    } else {
        100.0
    };

    let debt_total: f64 = transactions
        .iter()
        .filter(|t| {
            let desc = t.description.to_lowercase();
            DEBT_KEYWORDS.iter().any(|k| desc.contains(k))
        })
        .map(|t| t.amount)
        .sum();
    let monthly_debt_obligations = debt_total / months_span;

    AnalysisResult {
        total_income,
        total_expenses,
        savings,
        date_range: DateRange {
            start,
            end,
            days_span,
        },
        months_span,
        average_monthly_income,
        average_monthly_expenses,
        savings_per_month,
        savings_rate,
        monthly_buckets,
        income_consistency_score,
        spending_volatility_score,
        emergency_savings_buffer,
        recurring_patterns,
        bill_payment_regularity,
        monthly_debt_obligations,
        transaction_count: transactions.len(),
    }
}

/// Group by calendar month of the parsed date. Transactions whose date does
/// not parse are excluded here only, never from the totals.
fn bucket_by_month(transactions: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut buckets: BTreeMap<String, MonthlyBucket> = BTreeMap::new();
    for txn in transactions {
        let Some(month) = txn.month_key() else {
            continue;
        };
        let bucket = buckets.entry(month.clone()).or_insert(MonthlyBucket {
            month,
            income: 0.0,
            expense: 0.0,
            transaction_count: 0,
        });
        if txn.is_income() {
            bucket.income += txn.amount;
        } else {
            bucket.expense += txn.amount;
        }
        bucket.transaction_count += 1;
    }
    buckets.into_values().collect()
}

/// clamp(0,100, (1 - cv(monthly incomes)) * 100); 0 when no month has
/// positive income. A zero mean is treated as 1 to keep the division sound.
fn income_consistency(buckets: &[MonthlyBucket]) -> f64 {
    if !buckets.iter().any(|b| b.income > 0.0) {
        return 0.0;
    }
    let incomes: Vec<f64> = buckets.iter().map(|b| b.income).collect();
    let mean = non_zero_mean(&incomes);
    let cv = stddev(&incomes) / mean;
    ((1.0 - cv) * 100.0).clamp(0.0, 100.0)
}

/// clamp(0,100, 100 - cv(monthly expenses) * 100); higher = steadier
/// spending. 0 when there are no dated months at all.
fn spending_stability(buckets: &[MonthlyBucket]) -> f64 {
    if buckets.is_empty() {
        return 0.0;
    }
    let expenses: Vec<f64> = buckets.iter().map(|b| b.expense).collect();
    let mean = non_zero_mean(&expenses);
    let cv = stddev(&expenses) / mean;
    (100.0 - cv * 100.0).clamp(0.0, 100.0)
}

fn non_zero_mean(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    if mean == 0.0 { 1.0 } else { mean }
}

/// Population standard deviation.
fn stddev(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Group by (case-folded description, amount rounded to whole units); a
/// pattern qualifies once it occurs twice. Output order is deterministic.
fn find_recurring(transactions: &[Transaction]) -> Vec<RecurringPattern> {
    let mut groups: BTreeMap<(String, i64), Vec<String>> = BTreeMap::new();
    for txn in transactions {
        let key = (
            txn.description.trim().to_lowercase(),
            txn.amount.round() as i64,
        );
        groups.entry(key).or_default().push(txn.date.clone());
    }

    groups
        .into_iter()
        .filter(|(_, dates)| dates.len() >= 2)
        .map(|((description, amount), mut dates)| {
            dates.sort();
            RecurringPattern {
                description,
                amount: amount as f64,
                occurrence_count: dates.len(),
                dates,
            }
        })
        .collect()
}
