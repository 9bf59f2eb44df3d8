//! Decimal helpers shared by every report shape.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serializer;

/// Fractional digits used for amounts and percentages on the wire.
pub const WIRE_SCALE: u32 = 2;

/// Rounds half away from zero to [`WIRE_SCALE`] digits.
pub fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(WIRE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Serializes a decimal as a JSON number rounded to two fractional digits.
pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rounded = round(*value);
    // Parsing the decimal text gives the nearest f64, unlike component-wise conversion.
    match rounded.to_string().parse::<f64>() {
        Ok(number) => serializer.serialize_f64(number),
        Err(_) => serializer.collect_str(&rounded),
    }
}
