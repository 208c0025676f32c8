//! Centavos ⇄ "R$ 1.234,56" transforms for free-text cost fields.
//!
//! Parsing follows the dashboard's typing model: every non-digit is dropped
//! and the trailing two digits are read as centavos, so "R$ 1,50", "1.50"
//! and "150" all mean 150 centavos. Formatting then parsing a value gives
//! the value back, which keeps masked inputs stable while the user types.

/// Interpret a typed string as centavos. An empty digit string is zero.
pub fn parse_centavos(input: &str) -> i64 {
    let mut centavos: i64 = 0;
    for c in input.chars().filter(|c| c.is_ascii_digit()) {
        let digit = (c as u8 - b'0') as i64;
        centavos = centavos.saturating_mul(10).saturating_add(digit);
    }
    centavos
}

/// Format centavos in Brazilian locale, thousands '.' and decimal ','.
pub fn format_brl(centavos: i64) -> String {
    let negative = centavos < 0;
    let abs = centavos.unsigned_abs();
    let reais = (abs / 100).to_string();
    let cents = abs % 100;

    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, c) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("R$ {sign}{grouped},{cents:02}")
}

pub fn centavos_to_reais(centavos: i64) -> f64 {
    centavos as f64 / 100.0
}

pub fn reais_to_centavos(reais: f64) -> i64 {
    (reais * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn typed_digits_read_trailing_two_as_centavos() {
        assert_eq!(parse_centavos("12345"), 12_345);
        assert_eq!(format_brl(12_345), "R$ 123,45");
    }

    #[test]
    fn parse_strips_non_digits() {
        assert_eq!(parse_centavos("R$ 1.234,56"), 123_456);
        assert_eq!(parse_centavos("123.45"), 12_345);
        assert_eq!(parse_centavos("abc 1x2y3"), 123);
    }

    #[test]
    fn empty_digit_string_is_zero() {
        assert_eq!(parse_centavos(""), 0);
        assert_eq!(parse_centavos("R$ ,"), 0);
    }

    #[test]
    fn format_groups_thousands() {
        assert_eq!(format_brl(0), "R$ 0,00");
        assert_eq!(format_brl(7), "R$ 0,07");
        assert_eq!(format_brl(100_000), "R$ 1.000,00");
        assert_eq!(format_brl(123_456_789), "R$ 1.234.567,89");
        assert_eq!(format_brl(-12_345), "R$ -123,45");
    }

    #[test]
    fn round_trip_is_stable() {
        for centavos in [0, 7, 99, 100, 12_345, 987_654_321, 100_000_000_000] {
            let formatted = format_brl(centavos);
            assert_eq!(parse_centavos(&formatted), centavos);
            assert_eq!(format_brl(parse_centavos(&formatted)), formatted);
        }
    }

    #[test]
    fn absurdly_long_input_saturates_instead_of_panicking() {
        let huge = "9".repeat(40);
        assert_eq!(parse_centavos(&huge), i64::MAX);
    }

    #[test]
    fn reais_conversion() {
        assert_eq!(centavos_to_reais(12_345), 123.45);
        assert_eq!(reais_to_centavos(123.45), 12_345);
        assert_eq!(reais_to_centavos(123.449), 12_345);
    }
}
