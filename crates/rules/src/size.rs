//! Human-readable byte size parsing and formatting.
//!
//! Size values entered in the rule editor accept an optional unit suffix
//! (`"100MB"`, `"1.5GB"`, `"500KB"`). Every suffix spelling is binary: `K`,
//! `KB`, and `KiB` all multiply by 1024, so `"1.5GB"` is exactly
//! 1 610 612 736 bytes. Fractional magnitudes are resolved with integer
//! arithmetic so parsing never accumulates floating point error.

/// Internal classification of size parse failures, mapped onto
/// [`ConditionError`](crate::ConditionError) by the condition parser.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SizeSpecError {
    Empty,
    Negative,
    Invalid,
    TooLarge,
}

/// Parses a size specification into a byte count.
///
/// Accepts an optional leading `+`, a decimal magnitude (`.` or `,` as the
/// separator), and an optional suffix `B`/`K`/`M`/`G`/`T`/`P`/`E` with an
/// optional `B` or `iB` tail. Bare numbers are bytes.
pub(crate) fn parse_size_spec(text: &str) -> Result<u64, SizeSpecError> {
    if text.is_empty() {
        return Err(SizeSpecError::Empty);
    }

    let mut unsigned = text;
    let mut negative = false;

    if let Some(first) = unsigned.chars().next() {
        match first {
            '+' => {
                unsigned = &unsigned[first.len_utf8()..];
            }
            '-' => {
                negative = true;
                unsigned = &unsigned[first.len_utf8()..];
            }
            _ => {}
        }
    }

    if unsigned.is_empty() {
        return Err(SizeSpecError::Empty);
    }

    if negative {
        return Err(SizeSpecError::Negative);
    }

    let mut digits_seen = false;
    let mut decimal_seen = false;
    let mut numeric_end = unsigned.len();

    for (index, ch) in unsigned.char_indices() {
        if ch.is_ascii_digit() {
            digits_seen = true;
            continue;
        }

        if (ch == '.' || ch == ',') && !decimal_seen {
            decimal_seen = true;
            continue;
        }

        numeric_end = index;
        break;
    }

    let numeric_part = &unsigned[..numeric_end];
    let remainder = &unsigned[numeric_end..];

    if !digits_seen || numeric_part == "." || numeric_part == "," {
        return Err(SizeSpecError::Invalid);
    }

    let (integer_part, fractional_part, denominator) = parse_decimal_components(numeric_part)?;

    let (exponent, mut tail) = if remainder.is_empty() {
        (0u32, remainder)
    } else {
        let mut chars = remainder.chars();
        let ch = chars.next().unwrap();
        (
            match ch.to_ascii_lowercase() {
                'b' => 0,
                'k' => 1,
                'm' => 2,
                'g' => 3,
                't' => 4,
                'p' => 5,
                'e' => 6,
                _ => return Err(SizeSpecError::Invalid),
            },
            chars.as_str(),
        )
    };

    // Optional "B" or "iB" after the unit letter. The base stays binary
    // for every spelling so rule previews promise the same thresholds the
    // engine enforces.
    if !tail.is_empty() {
        let bytes = tail.as_bytes();
        match bytes[0] {
            b'b' | b'B' => {
                tail = &tail[1..];
            }
            b'i' | b'I' => {
                if bytes.len() < 2 || !matches!(bytes[1], b'b' | b'B') {
                    return Err(SizeSpecError::Invalid);
                }
                tail = &tail[2..];
            }
            _ => return Err(SizeSpecError::Invalid),
        }
    }

    if !tail.is_empty() {
        return Err(SizeSpecError::Invalid);
    }

    let scale = 1024u128
        .checked_pow(exponent)
        .ok_or(SizeSpecError::TooLarge)?;

    let numerator = integer_part
        .checked_mul(denominator)
        .and_then(|value| value.checked_add(fractional_part))
        .ok_or(SizeSpecError::TooLarge)?;
    let product = numerator.checked_mul(scale).ok_or(SizeSpecError::TooLarge)?;

    let value = product / denominator;
    if value > u128::from(u64::MAX) {
        return Err(SizeSpecError::TooLarge);
    }

    Ok(value as u64)
}

fn parse_decimal_components(text: &str) -> Result<(u128, u128, u128), SizeSpecError> {
    let mut integer = 0u128;
    let mut fraction = 0u128;
    let mut denominator = 1u128;
    let mut saw_decimal = false;

    for ch in text.chars() {
        match ch {
            '0'..='9' => {
                let digit = u128::from(ch as u8 - b'0');
                if saw_decimal {
                    denominator = denominator.checked_mul(10).ok_or(SizeSpecError::TooLarge)?;
                    fraction = fraction
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(digit))
                        .ok_or(SizeSpecError::TooLarge)?;
                } else {
                    integer = integer
                        .checked_mul(10)
                        .and_then(|value| value.checked_add(digit))
                        .ok_or(SizeSpecError::TooLarge)?;
                }
            }
            '.' | ',' => {
                if saw_decimal {
                    return Err(SizeSpecError::Invalid);
                }
                saw_decimal = true;
            }
            _ => return Err(SizeSpecError::Invalid),
        }
    }

    Ok((integer, fraction, denominator))
}

/// Formats a byte count with the largest binary unit that keeps the
/// magnitude above one, trimming a trailing `.0`.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = (scaled * 10.0).round() / 10.0;
    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("{} {}", rounded.trunc() as u64, UNITS[unit])
    } else {
        format!("{rounded:.1} {}", UNITS[unit])
    }
}
