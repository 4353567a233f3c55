use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Scaling applied to displayed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplayUnit {
    #[default]
    None,
    /// Picks the largest unit not exceeding the reference magnitude.
    Auto,
    Thousands,
    Millions,
    Billions,
    Trillions,
}

impl DisplayUnit {
    /// Resolves `Auto` against `magnitude`; other units return themselves.
    #[must_use]
    pub fn resolve(self, magnitude: f64) -> Self {
        if self != Self::Auto {
            return self;
        }
        let magnitude = if magnitude.is_finite() {
            magnitude.abs()
        } else {
            0.0
        };
        if magnitude >= 1e12 {
            Self::Trillions
        } else if magnitude >= 1e9 {
            Self::Billions
        } else if magnitude >= 1e6 {
            Self::Millions
        } else if magnitude >= 1e3 {
            Self::Thousands
        } else {
            Self::None
        }
    }

    #[must_use]
    pub fn divisor(self) -> f64 {
        match self {
            Self::None | Self::Auto => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
            Self::Trillions => 1e12,
        }
    }

    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::None | Self::Auto => "",
            Self::Thousands => "K",
            Self::Millions => "M",
            Self::Billions => "bn",
            Self::Trillions => "T",
        }
    }
}

/// Everything a formatter may need besides the number itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatContext<'a> {
    /// Host format descriptor carried over from the value column.
    pub format_string: &'a str,
    pub display_unit: DisplayUnit,
    pub decimals: u8,
    /// Magnitude `DisplayUnit::Auto` resolves against; defaults to the value.
    pub magnitude_hint: Option<f64>,
}

/// Host capability turning a raw number into display text.
pub trait ValueFormatter {
    fn format(&self, value: f64, ctx: &FormatContext<'_>) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(f64, &FormatContext<'_>) -> String,
{
    fn format(&self, value: f64, ctx: &FormatContext<'_>) -> String {
        self(value, ctx)
    }
}

/// Default formatter: display-unit scaling, fixed decimals rounded half away
/// from zero, and the two format-string traits that matter for axis labels
/// (`%` and `,` grouping).
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayUnitFormatter;

impl ValueFormatter for DisplayUnitFormatter {
    fn format(&self, value: f64, ctx: &FormatContext<'_>) -> String {
        if !value.is_finite() {
            return String::new();
        }

        let percent = ctx.format_string.trim_end().ends_with('%');
        let grouped = ctx.format_string.contains(',');
        let scaled_input = if percent { value * 100.0 } else { value };

        let unit = ctx
            .display_unit
            .resolve(ctx.magnitude_hint.unwrap_or(scaled_input));
        let scaled = scaled_input / unit.divisor();

        let mut text = round_to_decimals(scaled, ctx.decimals);
        if grouped {
            text = group_thousands(&text);
        }
        text.push_str(unit.suffix());
        if percent {
            text.push('%');
        }
        text
    }
}

fn round_to_decimals(value: f64, decimals: u8) -> String {
    let Some(decimal) = Decimal::from_f64(value) else {
        return format!("{value:.prec$}", prec = usize::from(decimals));
    };
    let mut rounded =
        decimal.round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(u32::from(decimals));
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.to_string()
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::{DisplayUnit, DisplayUnitFormatter, FormatContext, ValueFormatter, group_thousands};

    fn ctx(format_string: &str, display_unit: DisplayUnit, decimals: u8) -> FormatContext<'_> {
        FormatContext {
            format_string,
            display_unit,
            decimals,
            magnitude_hint: None,
        }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let formatter = DisplayUnitFormatter;
        assert_eq!(formatter.format(2.5, &ctx("", DisplayUnit::None, 0)), "3");
        assert_eq!(formatter.format(-2.5, &ctx("", DisplayUnit::None, 0)), "-3");
        assert_eq!(formatter.format(1.0, &ctx("", DisplayUnit::None, 2)), "1.00");
    }

    #[test]
    fn applies_units_and_grouping() {
        let formatter = DisplayUnitFormatter;
        assert_eq!(
            formatter.format(1_234_567.0, &ctx("#,0", DisplayUnit::None, 0)),
            "1,234,567"
        );
        assert_eq!(
            formatter.format(1_500_000.0, &ctx("", DisplayUnit::Millions, 1)),
            "1.5M"
        );
        assert_eq!(
            formatter.format(2_500.0, &ctx("", DisplayUnit::Auto, 1)),
            "2.5K"
        );
        assert_eq!(formatter.format(0.25, &ctx("0%", DisplayUnit::None, 0)), "25%");
    }

    #[test]
    fn auto_unit_follows_magnitude_hint() {
        let formatter = DisplayUnitFormatter;
        let context = FormatContext {
            magnitude_hint: Some(4_000_000.0),
            ..ctx("", DisplayUnit::Auto, 1)
        };
        assert_eq!(formatter.format(500_000.0, &context), "0.5M");
    }

    #[test]
    fn grouping_keeps_sign_and_fraction() {
        assert_eq!(group_thousands("-1234.50"), "-1,234.50");
        assert_eq!(group_thousands("999"), "999");
    }
}
