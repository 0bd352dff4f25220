//! Money formatting for display strings (logs, quote previews).

/// Amount in the smallest unit of the configured currency.
pub type Money = i64;

/// Format an amount the way `vi-VN` formats VND: `650.000 ₫`.
pub fn format_vnd(amount: Money) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}₫")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(format_vnd(650_000), "650.000\u{a0}₫");
        assert_eq!(format_vnd(150_000_000), "150.000.000\u{a0}₫");
    }

    #[test]
    fn small_and_negative_amounts() {
        assert_eq!(format_vnd(0), "0\u{a0}₫");
        assert_eq!(format_vnd(999), "999\u{a0}₫");
        assert_eq!(format_vnd(-1_500), "-1.500\u{a0}₫");
    }
}
