// ── Editable field sets ──
//
// A draft is the form-side view of an entity: every editable field,
// plus the id when editing an existing row. Input arrives as text from
// the front-end; numeric fields are coerced, never rejected.

use std::fmt::Debug;

use super::EntityId;
use crate::error::CoreError;

/// Form-editable field set for one resource.
pub trait Draft: Clone + Default + Debug + PartialEq + Send + Sync + 'static {
    /// Editable field names, in display order.
    const FIELDS: &'static [&'static str];

    /// Whether the form needs the full provider list to offer choices.
    const NEEDS_PROVIDER_OPTIONS: bool = false;

    /// Present when editing an existing entity.
    fn id(&self) -> Option<EntityId>;

    /// Assign one field from raw text.
    fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError>;

    /// Current value of one field as text (for pre-filling inputs).
    fn field(&self, name: &str) -> Option<String>;
}

/// Human label for a field name (`provider_id` -> `Provider`).
pub fn field_label(name: &str) -> String {
    let base = name.strip_suffix("_id").unwrap_or(name);
    base.split('_')
        .enumerate()
        .map(|(i, word)| {
            if i == 0 {
                let mut chars = word.chars();
                chars
                    .next()
                    .map(|c| c.to_uppercase().chain(chars).collect())
                    .unwrap_or_default()
            } else {
                word.to_owned()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Longest leading run of `text` that reads as a number: optional sign,
/// digits, and with `fraction` a decimal part and exponent. Trailing
/// junk is ignored, so `"12abc"` yields `"12"` and `"3.9"` as an
/// integer yields `"3"`.
fn leading_number(text: &str, fraction: bool) -> &str {
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .get(start..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;
    if !fraction {
        return &text[..end];
    }

    let mut mantissa = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = digits_from(end + 1);
        mantissa += frac_digits;
        end += 1 + frac_digits;
    }
    if mantissa == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits_from(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    &text[..end]
}

/// Decimal input: the leading number is kept; no number or a non-finite
/// one becomes 0.
pub(crate) fn coerce_decimal(value: &str) -> f64 {
    leading_number(value.trim_start(), true)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Integer input: the leading digits are kept; no digits becomes 0.
pub(crate) fn coerce_integer(value: &str) -> i64 {
    leading_number(value.trim_start(), false)
        .parse::<i64>()
        .unwrap_or(0)
}

pub(crate) fn unknown_field(entity_type: &str, field: &str) -> CoreError {
    CoreError::UnknownField {
        entity_type: entity_type.to_owned(),
        field: field.to_owned(),
    }
}
