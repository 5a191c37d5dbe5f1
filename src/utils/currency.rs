/// Currency utility functions for receipt amounts.
///
/// Amounts are rendered in US dollars with thousands separators. Whole
/// amounts drop the cents, fractional amounts keep two digits.

pub fn format_usd(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let amount = amount.abs();

    let mut whole = amount.trunc() as i64;
    let mut cents = (amount.fract() * 100.0).round() as i64;
    if cents >= 100 {
        whole += 1;
        cents -= 100;
    }

    if cents == 0 {
        format!("{}${}", sign, group_thousands(whole))
    } else {
        format!("{}${}.{:02}", sign, group_thousands(whole), cents)
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
