use std::fmt;

use crate::models::AmountCell;

/// An amount cell that could not be read as a number. This is a value, not an
/// error: the row stays in the report with its raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct AmountParseFailure {
    pub raw: String,
    pub reason: &'static str,
}

impl fmt::Display for AmountParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse amount '{}': {}", self.raw, self.reason)
    }
}

// ---------------------------------------------------------------------------
// Locale parse (en-IN): "1,23,456.78", "-500", "1,234.50 Cr"
// ---------------------------------------------------------------------------

/// Parse an amount cell using the en-IN number format.
///
/// Blank input is zero. Grouping commas are accepted anywhere in the integer
/// part (so both "1,234.50" and "1,23,456" work). As with a locale number
/// parser, the longest numeric prefix is used and anything after it is ignored;
/// input without a leading number fails.
pub fn parse_amount(raw: &str) -> Result<f64, AmountParseFailure> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(0.0);
    }

    let mut chars = s.chars().peekable();
    let mut number = String::with_capacity(s.len());
    if chars.peek() == Some(&'-') {
        number.push('-');
        chars.next();
    }

    let mut digit_count = 0usize;
    let mut seen_point = false;
    for c in chars {
        match c {
            '0'..='9' => {
                number.push(c);
                digit_count += 1;
            }
            ',' if !seen_point => {}
            '.' if !seen_point => {
                seen_point = true;
                number.push('.');
            }
            _ => break,
        }
    }

    let fail = |reason| AmountParseFailure {
        raw: raw.to_string(),
        reason,
    };
    if digit_count == 0 {
        return Err(fail("unparseable number"));
    }
    match number.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        Ok(_) => Err(fail("number out of range")),
        Err(_) => Err(fail("unparseable number")),
    }
}

/// Extraction-stage form of an amount cell: the parsed value as canonical
/// decimal text, or the failure (whose `raw` text travels on in its place).
pub fn normalize_amount(raw: &str) -> Result<String, AmountParseFailure> {
    parse_amount(raw).map(|v| v.to_string())
}

// ---------------------------------------------------------------------------
// Lenient parse, used when totals are built
// ---------------------------------------------------------------------------

/// Drop everything except digits, `.` and `-`, then parse. When that still is
/// not a number the raw text is kept as-is.
pub fn parse_lenient(raw: &str) -> AmountCell {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => AmountCell::Parsed(v),
        _ => AmountCell::Raw(raw.to_string()),
    }
}
