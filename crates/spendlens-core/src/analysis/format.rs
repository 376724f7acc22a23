//! Number formatting shared by insight and recommendation text

use chrono::NaiveDate;

/// Format an amount as dollars with thousands separators: `$1,234.56`
pub fn money(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, frac)
}

/// Label for an analyzed range, e.g. `Mar 01 - Mar 15, 2024`
pub fn period_label(from: NaiveDate, to: NaiveDate) -> String {
    format!("{} - {}", from.format("%b %d"), to.format("%b %d, %Y"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_grouping() {
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(5.5), "$5.50");
        assert_eq!(money(999.999), "$1,000.00");
        assert_eq!(money(1234567.891), "$1,234,567.89");
        assert_eq!(money(-300.0), "-$300.00");
    }

    #[test]
    fn test_period_label() {
        let from = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(period_label(from, to), "Mar 01 - Mar 15, 2024");
    }
}
