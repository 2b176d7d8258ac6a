//! Number formatting for axis labels and tooltips

const SI_STEPS: [(f64, &str); 3] = [(1e3, "k"), (1e6, "M"), (1e9, "G")];

/// Drop trailing zeros (and a dangling dot) from a fixed-point string
fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        let trimmed_len = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed_len);
    }
    s
}

fn round_one_decimal(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

/// Compact axis label: 950, 1.5k, 12M, 3.2G (one decimal, trailing zeros dropped)
///
/// The unit is picked after rounding, so 999.96 prints as `1k`, not `1000`.
pub fn format_num(n: f64) -> String {
    let mut scaled = round_one_decimal(n);
    let mut unit = "";
    for (step, suffix) in SI_STEPS {
        if scaled.abs() < 1000.0 {
            break;
        }
        scaled = round_one_decimal(n / step);
        unit = suffix;
    }
    format!("{}{}", trim_fraction(format!("{:.1}", scaled)), unit)
}

/// Thousands separators, up to two fraction digits: 1,234,567 / 1,234.5
pub fn number_with_commas(n: f64) -> String {
    let fixed = format!("{:.2}", n.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let frac = frac_part.trim_end_matches('0');
    let sign = if n < 0.0 && (int_part != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}
