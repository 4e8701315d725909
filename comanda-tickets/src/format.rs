//! Locale formatting helpers
//!
//! Pure, total functions: given well-typed input they never panic and
//! never return an error. Out-of-range timestamps format as a fixed
//! placeholder instead of propagating, because a bad clock must not
//! block a sale.
//!
//! Money uses Argentine display conventions: `$` prefix, `.` thousands
//! grouping, `,` decimal comma, decimals omitted when the value is
//! integral. Rounding is round-half-up to two decimals, done in decimal
//! arithmetic (no binary-float `.xx5` surprises).

use chrono::DateTime;
use chrono_tz::Tz;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ModifierKind, PaymentMethod, SalesChannel, ServiceType};

/// Placeholder for timestamps outside the representable range
pub const TIME_PLACEHOLDER: &str = "--:--";
/// Placeholder for dates outside the representable range
pub const DATE_PLACEHOLDER: &str = "--/--/----";

fn with_tz(millis: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz))
}

/// `HH:MM`
pub fn format_time(millis: i64, tz: Tz) -> String {
    match with_tz(millis, tz) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => TIME_PLACEHOLDER.to_string(),
    }
}

/// `DD/MM/YYYY`
pub fn format_date(millis: i64, tz: Tz) -> String {
    match with_tz(millis, tz) {
        Some(dt) => dt.format("%d/%m/%Y").to_string(),
        None => DATE_PLACEHOLDER.to_string(),
    }
}

/// `DD/MM/YYYY HH:MM`
pub fn format_date_time(millis: i64, tz: Tz) -> String {
    match with_tz(millis, tz) {
        Some(dt) => dt.format("%d/%m/%Y %H:%M").to_string(),
        None => format!("{} {}", DATE_PLACEHOLDER, TIME_PLACEHOLDER),
    }
}

/// Round a monetary value to cents, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a monetary value: `$2.500` / `$1.050,01` / `-$3,50`
pub fn format_money(value: Decimal) -> String {
    let rounded = round_money(value);
    // Integral after rounding to cents, so the conversion is exact
    let cents = (rounded.abs() * Decimal::from(100))
        .round()
        .to_i128()
        .unwrap_or(0);
    let sign = if rounded.is_sign_negative() && cents != 0 {
        "-"
    } else {
        ""
    };
    let units = group_thousands(cents / 100);
    let frac = cents % 100;
    if frac == 0 {
        format!("{}${}", sign, units)
    } else {
        format!("{}${},{:02}", sign, units, frac)
    }
}

fn group_thousands(mut n: i128) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups: Vec<String> = Vec::new();
    while n > 0 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    let mut out = groups
        .pop()
        .unwrap_or_default()
        .trim_start_matches('0')
        .to_string();
    if out.is_empty() {
        out.push('0');
    }
    for g in groups.iter().rev() {
        out.push('.');
        out.push_str(g);
    }
    out
}

/// Display label of a service type
pub fn service_type_label(service: ServiceType) -> &'static str {
    match service {
        ServiceType::DineIn => "SALON",
        ServiceType::Delivery => "DELIVERY",
        ServiceType::Takeaway => "PARA LLEVAR",
    }
}

/// Display label of the order origin. The sales channel overrides the
/// service type when present.
pub fn channel_label(channel: Option<SalesChannel>, service: ServiceType) -> &'static str {
    match channel {
        Some(SalesChannel::WebPropia) => "PEDIDO WEB",
        Some(SalesChannel::PedidosYa) => "PEDIDOS YA",
        Some(SalesChannel::Rappi) => "RAPPI",
        None => service_type_label(service),
    }
}

/// Display label of a payment method
pub fn payment_method_label(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "EFECTIVO",
        PaymentMethod::Debit => "DEBITO",
        PaymentMethod::Credit => "CREDITO",
        PaymentMethod::QrWallet => "QR / BILLETERA",
        PaymentMethod::Transfer => "TRANSFERENCIA",
    }
}

/// Printed prefix of a modifier kind
pub fn modifier_prefix(kind: ModifierKind) -> &'static str {
    match kind {
        ModifierKind::Removal => "SIN ",
        ModifierKind::Addition => "+ ",
        ModifierKind::Substitution => "> ",
        ModifierKind::Other => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Argentina::Buenos_Aires;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money_integral() {
        assert_eq!(format_money(dec!(2500)), "$2.500");
        assert_eq!(format_money(dec!(2500.00)), "$2.500");
        assert_eq!(format_money(dec!(0)), "$0");
        assert_eq!(format_money(dec!(999)), "$999");
        assert_eq!(format_money(dec!(1000000)), "$1.000.000");
    }

    #[test]
    fn test_format_money_cents() {
        assert_eq!(format_money(dec!(1050.01)), "$1.050,01");
        assert_eq!(format_money(dec!(3.5)), "$3,50");
        assert_eq!(format_money(dec!(-3.5)), "-$3,50");
        assert_eq!(format_money(dec!(0.05)), "$0,05");
    }

    #[test]
    fn test_format_money_half_up_boundaries() {
        // Explicit round-half-up, exact at .xx5 boundaries
        assert_eq!(format_money(dec!(1050.005)), "$1.050,01");
        assert_eq!(format_money(dec!(2.675)), "$2,68");
        assert_eq!(format_money(dec!(0.125)), "$0,13");
        assert_eq!(format_money(dec!(1.004)), "$1");
    }

    #[test]
    fn test_format_money_idempotent() {
        let once = round_money(dec!(1050.005));
        assert_eq!(format_money(once), format_money(round_money(once)));
    }

    #[test]
    fn test_format_time_and_date() {
        // 2024-01-22 14:32:15 UTC = 11:32 in Buenos Aires (UTC-3)
        let ts = 1705933935000;
        assert_eq!(format_time(ts, Buenos_Aires), "11:32");
        assert_eq!(format_date(ts, Buenos_Aires), "22/01/2024");
        assert_eq!(format_date_time(ts, Buenos_Aires), "22/01/2024 11:32");
    }

    #[test]
    fn test_out_of_range_placeholder() {
        assert_eq!(format_time(i64::MAX, Buenos_Aires), TIME_PLACEHOLDER);
        assert_eq!(format_date(i64::MAX, Buenos_Aires), DATE_PLACEHOLDER);
        assert_eq!(format_date_time(i64::MIN, Buenos_Aires), "--/--/---- --:--");
    }

    #[test]
    fn test_channel_overrides_service() {
        assert_eq!(
            channel_label(Some(SalesChannel::Rappi), ServiceType::DineIn),
            "RAPPI"
        );
        assert_eq!(channel_label(None, ServiceType::Takeaway), "PARA LLEVAR");
    }

    #[test]
    fn test_modifier_prefix() {
        assert_eq!(modifier_prefix(ModifierKind::Removal), "SIN ");
        assert_eq!(modifier_prefix(ModifierKind::Addition), "+ ");
        assert_eq!(modifier_prefix(ModifierKind::Substitution), "> ");
        assert_eq!(modifier_prefix(ModifierKind::Other), "");
    }
}
