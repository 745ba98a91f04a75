use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Placeholder for an absent optional field.
pub const MISSING: &str = "N/A";

pub fn text_or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}

/// `YYYY-MM-DD`, or `N/A`.
pub fn date_or_missing(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// Two decimal places, rounded half away from zero.
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Full precision without trailing zeros.
pub fn exact(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_amounts() {
        assert_eq!(money(dec!(12.345)), "12.35");
        assert_eq!(money(dec!(-0.5)), "-0.50");
        assert_eq!(money(Decimal::ZERO), "0.00");
        assert_eq!(exact(dec!(80.500)), "80.5");
        assert_eq!(exact(dec!(120)), "120");
    }

    #[test]
    fn missing_values_render_as_placeholder() {
        assert_eq!(text_or_missing(None), "N/A");
        assert_eq!(date_or_missing(None), "N/A");
        let t = Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 0).unwrap();
        assert_eq!(date_or_missing(Some(t)), "2025-06-30");
    }
}
