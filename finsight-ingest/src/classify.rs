//! Income/expense classification as an ordered strategy chain.

use finsight_core::{Transaction, TxnKind};

use crate::normalize::NormalizedRow;

/// Wording that marks an outflow.
pub const EXPENSE_KEYWORDS: &[&str] = &[
    "purchase",
    "check",
    "withdrawal",
    "charge",
    "debit",
    "payment",
    "fee",
];

/// Wording that marks an inflow.
pub const INCOME_KEYWORDS: &[&str] = &[
    "credit",
    "deposit",
    "interest",
    "salary",
    "income",
    "preauthorized",
];

/// A named classification strategy. Returns None to pass to the next rule.
pub struct ClassifyRule {
    pub name: &'static str,
    pub apply: fn(&NormalizedRow) -> Option<TxnKind>,
}

/// Fixed priority order; the first rule that decides wins. The final
/// amount-sign rule always decides, so the chain is total.
pub const CLASSIFY_RULES: &[ClassifyRule] = &[
    ClassifyRule {
        name: "declared-type",
        apply: declared_type_rule,
    },
    ClassifyRule {
        name: "keyword",
        apply: keyword_rule,
    },
    ClassifyRule {
        name: "amount-sign",
        apply: amount_sign_rule,
    },
];

fn declared_type_rule(row: &NormalizedRow) -> Option<TxnKind> {
    match row.declared_type.as_str() {
        "credit" => Some(TxnKind::Income),
        "debit" => Some(TxnKind::Expense),
        _ => None,
    }
}

fn keyword_rule(row: &NormalizedRow) -> Option<TxnKind> {
    keyword_kind(&format!("{} {}", row.declared_type, row.description))
}

fn amount_sign_rule(row: &NormalizedRow) -> Option<TxnKind> {
    Some(if row.amount < 0.0 {
        TxnKind::Expense
    } else {
        TxnKind::Income
    })
}

/// Keyword family lookup shared with the image-text extractor.
///
/// Expense keywords are checked before income keywords: when both families
/// appear ("credit card payment"), debt-like wording wins and the row is
/// treated as an outflow. The asymmetry is a tunable chosen for conservative
/// scoring, not ground truth.
pub fn keyword_kind(text: &str) -> Option<TxnKind> {
    let text = text.to_lowercase();
    if EXPENSE_KEYWORDS.iter().any(|k| text.contains(k)) {
        return Some(TxnKind::Expense);
    }
    if INCOME_KEYWORDS.iter().any(|k| text.contains(k)) {
        return Some(TxnKind::Income);
    }
    None
}

/// Run the chain and build the final transaction. The stored amount is the
/// absolute value; direction lives only in `kind`.
pub fn classify(row: &NormalizedRow) -> Transaction {
    let kind = CLASSIFY_RULES
        .iter()
        .find_map(|rule| (rule.apply)(row))
        .unwrap_or(TxnKind::Income);

    Transaction {
        date: row.date.clone(),
        description: row.description.clone(),
        amount: row.amount.abs(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(description: &str, amount: f64, declared_type: &str) -> NormalizedRow {
        NormalizedRow {
            date: "2024-01-05".to_string(),
            description: description.to_string(),
            amount,
            declared_type: declared_type.to_string(),
        }
    }

    #[test]
    fn test_declared_type_wins_over_keywords() {
        // Description screams expense but the declared marker is credit
        let txn = classify(&row("LOAN EMI PAYMENT", 5000.0, "credit"));
        assert_eq!(txn.kind, TxnKind::Income);

        let txn = classify(&row("SALARY DEPOSIT", 5000.0, "debit"));
        assert_eq!(txn.kind, TxnKind::Expense);
    }

    #[test]
    fn test_keyword_families() {
        assert_eq!(
            classify(&row("ATM WITHDRAWAL", 200.0, "")).kind,
            TxnKind::Expense
        );
        assert_eq!(
            classify(&row("INTEREST EARNED", 12.5, "")).kind,
            TxnKind::Income
        );
    }

    #[test]
    fn test_expense_beats_income_when_both_match() {
        // "credit" (income family) and "payment" (expense family) both appear
        assert_eq!(keyword_kind("credit card payment"), Some(TxnKind::Expense));
    }

    #[test]
    fn test_amount_sign_fallback() {
        assert_eq!(classify(&row("xfer 0042", -75.0, "")).kind, TxnKind::Expense);
        assert_eq!(classify(&row("xfer 0042", 75.0, "")).kind, TxnKind::Income);
        assert_eq!(classify(&row("xfer 0042", 0.0, "")).kind, TxnKind::Income);
    }

    #[test]
    fn test_amount_is_never_negative() {
        let txn = classify(&row("ATM WITHDRAWAL", -350.0, ""));
        assert_eq!(txn.amount, 350.0);
        assert_eq!(txn.kind, TxnKind::Expense);
    }

    #[test]
    fn test_rule_chain_order_by_name() {
        let names: Vec<&str> = CLASSIFY_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["declared-type", "keyword", "amount-sign"]);
        // the closing rule is total, so the chain always decides
        let last = CLASSIFY_RULES.last().unwrap();
        assert!((last.apply)(&row("anything", 1.0, "")).is_some());
    }

    #[test]
    fn test_classification_is_stable() {
        let input = row("UPI PAYMENT GROCERIES", -820.0, "");
        assert_eq!(classify(&input), classify(&input));
    }
}
