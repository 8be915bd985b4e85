/// Форматирует денежную сумму в AED: разделители тысяч (запятые), два знака
///
/// # Примеры
/// ```
/// use lulu_sales::shared::format::format_money;
/// assert_eq!(format_money(1234567.891), "AED 1,234,567.89");
/// assert_eq!(format_money(42.0), "AED 42.00");
/// ```
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, ch) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("AED {}{}.{}", sign, int_grouped, frac_part)
}

/// Округление до двух знаков (банковские суммы в датасете)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
