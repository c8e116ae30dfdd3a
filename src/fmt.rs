/// Format a float as rupees with en-IN digit grouping: ₹1,23,456.78
pub fn rupees(val: f64) -> String {
    let fixed = format!("{:.2}", val.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let grouped = group_en_in(int_part);

    if val < 0.0 && fixed != "0.00" {
        format!("-₹{grouped}.{dec_part}")
    } else {
        format!("₹{grouped}.{dec_part}")
    }
}

/// Last three digits, then pairs: 1234567 -> 12,34,567
fn group_en_in(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// A fractional share as a percentage with two decimals, or "N/A".
pub fn percent(share: Option<f64>) -> String {
    match share {
        Some(s) => format!("{:.2}%", s * 100.0),
        None => "N/A".to_string(),
    }
}
