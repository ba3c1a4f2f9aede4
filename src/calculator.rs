//! Bill split arithmetic.
//!
//! Everything here is pure: the screen calls [`compute`] on every redraw with
//! whatever the user has typed or selected so far, and gets back fresh amounts.
//! Malformed numbers are never an error, they simply count as zero.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::str::FromStr;

const PERCENT: Decimal = dec!(100);

/// Raw screen inputs, exactly as the controls hold them.
#[derive(Debug, Clone, Copy)]
pub struct BillInputs<'a> {
    pub base_text: &'a str,
    pub tax_text: &'a str,
    /// Tip selector value, in percentage points
    pub tip_percent: f64,
    /// Split selector value, in people
    pub split_count: f64,
}

/// Derived amounts for one snapshot of the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breakdown {
    pub base: Decimal,
    pub tax_percent: Decimal,
    /// Whole tip points actually applied
    pub tip_percent: u32,
    /// Floored split selector value, as displayed (may be 0)
    pub split_count: u32,
    /// People the total is divided by, never below 1
    pub divisor: u32,
    pub total: Decimal,
    pub per_person: Decimal,
}

impl Breakdown {
    pub fn tip_label(&self) -> String {
        format!("Tip: {}%", self.tip_percent)
    }

    pub fn split_label(&self) -> String {
        format!("Split: {}", self.split_count)
    }

    pub fn per_person_label(&self) -> String {
        format!("Per Person: {}", format_money(self.per_person))
    }

    pub fn total_label(&self) -> String {
        format!("Total: {}", format_money(self.total))
    }
}

/// Parse free text as a number, falling back to zero.
///
/// Accepts plain decimals (`"75.50"`, `"-3"`) and scientific notation
/// (`"1e2"`), ignoring surrounding whitespace.
pub fn parse_amount(text: &str) -> Decimal {
    let text = text.trim();
    // Must also be valid float syntax, which rejects digit separators like "1_000"
    if text.is_empty() || text.parse::<f64>().is_err() {
        return Decimal::ZERO;
    }

    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// Like [`parse_amount`], but a bill base can't be negative.
pub fn parse_base(text: &str) -> Decimal {
    parse_amount(text).max(Decimal::ZERO)
}

/// Floor a selector value to whole units. NaN and negatives become 0.
pub fn whole_units(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    // `as` saturates, so huge values land on u32::MAX
    value.floor().max(0.0) as u32
}

pub fn compute(inputs: &BillInputs<'_>) -> Breakdown {
    let base = parse_base(inputs.base_text);
    let tax_percent = parse_amount(inputs.tax_text);
    let tip_percent = whole_units(inputs.tip_percent);
    let split_count = whole_units(inputs.split_count);
    let divisor = split_count.max(1);

    let tax = base.saturating_mul(tax_percent) / PERCENT;
    let tip = base.saturating_mul(Decimal::from(tip_percent)) / PERCENT;
    let total = base.saturating_add(tax).saturating_add(tip);
    let per_person = total / Decimal::from(divisor);

    tracing::trace!(%total, %per_person, divisor, "recomputed bill");

    Breakdown {
        base,
        tax_percent,
        tip_percent,
        split_count,
        divisor,
        total,
        per_person,
    }
}

/// `$` followed by the amount rounded half away from zero to two places.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${:.2}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(base: &str, tax: &str, tip: f64, split: f64) -> Breakdown {
        compute(&BillInputs {
            base_text: base,
            tax_text: tax,
            tip_percent: tip,
            split_count: split,
        })
    }

    #[test]
    fn test_single_payer_with_tax_and_tip() {
        let b = run("100", "8", 15.0, 1.0);
        assert_eq!(b.total_label(), "Total: $123.00");
        assert_eq!(b.per_person_label(), "Per Person: $123.00");
    }

    #[test]
    fn test_even_split_without_tax() {
        let b = run("50", "0", 20.0, 2.0);
        assert_eq!(b.total, dec!(60));
        assert_eq!(b.per_person, dec!(30));
        assert_eq!(format_money(b.per_person), "$30.00");
    }

    #[test]
    fn test_empty_base_is_zero() {
        let b = run("", "10", 15.0, 3.0);
        assert_eq!(format_money(b.total), "$0.00");
        assert_eq!(format_money(b.per_person), "$0.00");
    }

    #[test]
    fn test_fractional_base_five_ways() {
        let b = run("75.50", "5", 25.0, 5.0);
        assert_eq!(b.total, dec!(98.15));
        assert_eq!(format_money(b.total), "$98.15");
        assert_eq!(format_money(b.per_person), "$19.63");
    }

    #[test]
    fn test_garbage_tax_is_zero() {
        let b = run("40", "abc", 5.0, 1.0);
        assert_eq!(b.tax_percent, Decimal::ZERO);
        assert_eq!(format_money(b.total), "$42.00");
        assert_eq!(format_money(b.per_person), "$42.00");
    }

    #[test]
    fn test_zero_base_ignores_everything_else() {
        for (tax, tip, split) in [("8", 15.0, 1.0), ("99", 25.0, 10.0), ("-5", 5.0, 0.0)] {
            let b = run("0", tax, tip, split);
            assert_eq!(b.total, Decimal::ZERO);
            assert_eq!(b.per_person, Decimal::ZERO);
        }
    }

    #[test]
    fn test_split_below_one_divides_by_one() {
        let b = run("30", "0", 10.0, 0.0);
        assert_eq!(b.split_count, 0);
        assert_eq!(b.divisor, 1);
        assert_eq!(b.per_person, b.total);
        assert_eq!(b.split_label(), "Split: 0");

        let b = run("30", "0", 10.0, 0.7);
        assert_eq!(b.divisor, 1);
    }

    #[test]
    fn test_selector_values_are_floored() {
        let b = run("100", "0", 15.9, 2.9);
        assert_eq!(b.tip_percent, 15);
        assert_eq!(b.divisor, 2);
        assert_eq!(b.tip_label(), "Tip: 15%");
        assert_eq!(b.total, dec!(115));
        assert_eq!(b.per_person, dec!(57.5));
    }

    #[test]
    fn test_total_matches_closed_form() {
        let base = dec!(82.40);
        let b = run("82.40", "7.25", 18.0, 4.0);
        let expected = base * (Decimal::ONE + dec!(7.25) / PERCENT + dec!(18) / PERCENT);
        assert_eq!(b.total, expected);
        assert_eq!(b.per_person, expected / dec!(4));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let first = run("63.10", "6.5", 12.0, 3.0);
        let second = run("63.10", "6.5", 12.0, 3.0);
        assert_eq!(first, second);
        assert_eq!(first.total_label(), second.total_label());
        assert_eq!(first.per_person_label(), second.per_person_label());
    }

    #[test]
    fn test_parse_amount_forms() {
        assert_eq!(parse_amount("75.50"), dec!(75.5));
        assert_eq!(parse_amount("  40 "), dec!(40));
        assert_eq!(parse_amount("1e2"), dec!(100));
        assert_eq!(parse_amount("-3"), dec!(-3));
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("12abc"), Decimal::ZERO);
        assert_eq!(parse_amount("1_000"), Decimal::ZERO);
        assert_eq!(parse_amount("1,5"), Decimal::ZERO);
        assert_eq!(parse_amount("NaN"), Decimal::ZERO);
    }

    #[test]
    fn test_negative_base_clamps_to_zero() {
        assert_eq!(parse_base("-20"), Decimal::ZERO);
        let b = run("-20", "10", 15.0, 1.0);
        assert_eq!(b.total, Decimal::ZERO);
    }

    #[test]
    fn test_whole_units_edges() {
        assert_eq!(whole_units(f64::NAN), 0);
        assert_eq!(whole_units(-4.0), 0);
        assert_eq!(whole_units(9.99), 9);
        assert_eq!(whole_units(f64::INFINITY), u32::MAX);
    }

    #[test]
    fn test_huge_inputs_saturate() {
        let b = run("79228162514264337593543950335", "79228162514264337593543950335", 25.0, 1.0);
        assert_eq!(b.total, Decimal::MAX);
    }

    #[test]
    fn test_format_money_rounds_half_up() {
        assert_eq!(format_money(dec!(0.125)), "$0.13");
        assert_eq!(format_money(dec!(2.5)), "$2.50");
        assert_eq!(format_money(dec!(19.625)), "$19.63");
    }
}
