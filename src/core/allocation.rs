//! Splits a declared total profit across shareholders by share count.
use crate::core::record::ShareholderRecord;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("total profit '{0}' is not a valid number")]
    InvalidProfit(String),
    #[error("there are no shares to allocate profit to")]
    NoShares,
}

/// One shareholder's slice of the profit.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub name: String,
    pub shares: f64,
    pub percent: f64,
    pub profit_share: f64,
}

/// Result of an allocation run, in registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub total_profit: f64,
    pub total_shares: f64,
    pub allocations: Vec<Allocation>,
}

impl AllocationOutcome {
    pub fn percent_total(&self) -> f64 {
        self.allocations.iter().map(|a| a.percent).sum()
    }

    pub fn profit_total(&self) -> f64 {
        self.allocations.iter().map(|a| a.profit_share).sum()
    }
}

/// Parses a profit declaration. Empty and non-finite values are rejected.
pub fn parse_profit(total_profit_text: &str) -> Result<f64, CalcError> {
    let trimmed = total_profit_text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidProfit(total_profit_text.to_string())),
    }
}

/// Computes each record's percentage of the total shares and its share of
/// `total_profit_text`.
///
/// This is a pure calculation: it reads its inputs and returns a fresh
/// outcome. A negative profit (a loss) is split the same way as a gain.
pub fn allocate(
    records: &[ShareholderRecord],
    total_profit_text: &str,
) -> Result<AllocationOutcome, CalcError> {
    let total_profit = parse_profit(total_profit_text)?;
    let total_shares: f64 = records.iter().map(|r| r.shares).sum();

    // Fractions come from shares scaled by the largest one, so a share total
    // that overflows to infinity still splits correctly.
    let largest = records.iter().map(|r| r.shares).fold(0.0, f64::max);
    if largest <= 0.0 {
        debug!(total_shares, "Refusing to allocate over a zero share total");
        return Err(CalcError::NoShares);
    }
    let scaled_total: f64 = records.iter().map(|r| r.shares / largest).sum();
    // Not finite only for records that bypassed validation
    if !scaled_total.is_finite() || scaled_total <= 0.0 {
        debug!(total_shares, "Refusing to allocate over invalid share counts");
        return Err(CalcError::NoShares);
    }

    let allocations = records
        .iter()
        .map(|record| {
            let fraction = record.shares / largest / scaled_total;
            Allocation {
                name: record.name.clone(),
                shares: record.shares,
                percent: fraction * 100.0,
                profit_share: fraction * total_profit,
            }
        })
        .collect();

    debug!(
        total_profit,
        total_shares,
        records = records.len(),
        "Computed allocation"
    );
    Ok(AllocationOutcome {
        total_profit,
        total_shares,
        allocations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn record(name: &str, shares: f64) -> ShareholderRecord {
        ShareholderRecord {
            name: name.to_string(),
            shares,
        }
    }

    #[test]
    fn test_two_shareholders() {
        let records = vec![record("A", 30.0), record("B", 70.0)];
        let outcome = allocate(&records, "1000").unwrap();

        assert_eq!(outcome.total_shares, 100.0);
        assert_eq!(outcome.total_profit, 1000.0);
        assert_eq!(outcome.allocations[0].name, "A");
        assert!((outcome.allocations[0].percent - 30.0).abs() < EPSILON);
        assert!((outcome.allocations[0].profit_share - 300.0).abs() < EPSILON);
        assert_eq!(outcome.allocations[1].name, "B");
        assert!((outcome.allocations[1].percent - 70.0).abs() < EPSILON);
        assert!((outcome.allocations[1].profit_share - 700.0).abs() < EPSILON);

        assert!((outcome.percent_total() - 100.0).abs() < EPSILON);
        assert!((outcome.profit_total() - 1000.0).abs() < EPSILON);
    }

    #[test]
    fn test_uneven_split_sums_to_total() {
        let records = vec![record("A", 1.0), record("B", 1.0), record("C", 1.0)];
        let outcome = allocate(&records, " 100 ").unwrap();

        for allocation in &outcome.allocations {
            assert!((allocation.percent - 100.0 / 3.0).abs() < EPSILON);
        }
        assert!((outcome.percent_total() - 100.0).abs() < EPSILON);
        assert!((outcome.profit_total() - 100.0).abs() < EPSILON);
    }

    #[test]
    fn test_preserves_registry_order() {
        let records = vec![record("Small", 1.0), record("Big", 99.0), record("Mid", 10.0)];
        let outcome = allocate(&records, "500").unwrap();
        let names: Vec<_> = outcome.allocations.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Small", "Big", "Mid"]);
    }

    #[test]
    fn test_loss_is_split_proportionally() {
        let records = vec![record("A", 25.0), record("B", 75.0)];
        let outcome = allocate(&records, "-200").unwrap();
        assert!((outcome.allocations[0].profit_share + 50.0).abs() < EPSILON);
        assert!((outcome.allocations[1].profit_share + 150.0).abs() < EPSILON);
    }

    #[test]
    fn test_share_total_overflowing_to_infinity() {
        let mut ledger = crate::core::registry::Ledger::new();
        ledger.add("A", "1e308").unwrap();
        ledger.add("B", "1e308").unwrap();

        let outcome = allocate(ledger.records(), "1000").unwrap();
        assert!(outcome.total_shares.is_infinite());
        for allocation in &outcome.allocations {
            assert!((allocation.percent - 50.0).abs() < EPSILON);
            assert!((allocation.profit_share - 500.0).abs() < EPSILON);
        }
        assert!((outcome.percent_total() - 100.0).abs() < EPSILON);
        assert!((outcome.profit_total() - 1000.0).abs() < EPSILON);
    }

    #[test]
    fn test_infinite_shares_are_rejected() {
        let records = vec![record("A", f64::INFINITY), record("B", 1.0)];
        assert_eq!(allocate(&records, "1000"), Err(CalcError::NoShares));
    }

    #[test]
    fn test_empty_registry_has_no_shares() {
        assert_eq!(allocate(&[], "1000"), Err(CalcError::NoShares));
    }

    #[test]
    fn test_all_zero_shares() {
        let records = vec![record("A", 0.0), record("B", 0.0)];
        assert_eq!(allocate(&records, "1000"), Err(CalcError::NoShares));
    }

    #[test]
    fn test_invalid_profit() {
        let records = vec![record("A", 30.0)];
        for text in ["abc", "", "   ", "NaN", "inf", "1,000"] {
            assert_eq!(
                allocate(&records, text),
                Err(CalcError::InvalidProfit(text.to_string())),
                "profit text {text:?}"
            );
        }
    }

    #[test]
    fn test_invalid_profit_checked_before_shares() {
        assert!(matches!(
            allocate(&[], "abc"),
            Err(CalcError::InvalidProfit(_))
        ));
    }

    #[test]
    fn test_does_not_touch_inputs() {
        let records = vec![record("A", 30.0), record("B", 70.0)];
        let before = records.clone();
        let _ = allocate(&records, "1000").unwrap();
        assert_eq!(records, before);
    }
}
