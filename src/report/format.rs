//! Number rendering for the exports.

/// Money with thousands separators and at most two decimals, trailing zeros
/// dropped: `0` → `"0"`, `3200` → `"3,200"`, `1234.5` → `"1,234.5"`.
pub fn format_amount(value: f64) -> String {
    render(value, true)
}

/// Like [`format_amount`] without thousands separators. Used for rates.
pub fn format_number(value: f64) -> String {
    render(value, false)
}

fn render(value: f64, grouped: bool) -> String {
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let mut out = String::new();
    if value < 0.0 && cents > 0 {
        out.push('-');
    }
    if grouped {
        out.push_str(&group_thousands(whole));
    } else {
        out.push_str(&whole.to_string());
    }
    if fraction > 0 {
        let digits = format!("{:02}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
