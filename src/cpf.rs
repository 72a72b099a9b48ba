//! Brazilian CPF (taxpayer number) cleaning, masking and check-digit validation.

/// The number of digits in a CPF.
pub const CPF_LENGTH: usize = 11;

/// Strip everything but the digits from `raw`, keeping at most 11 digits.
pub fn clean_cpf(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(CPF_LENGTH)
        .collect()
}

/// Mask a CPF as "000.000.000-00".
///
/// Partial input is masked as far as it goes, e.g. "1234" becomes "123.4".
pub fn format_cpf(raw: &str) -> String {
    let digits = clean_cpf(raw);
    let mut formatted = String::with_capacity(14);

    for (index, digit) in digits.chars().enumerate() {
        match index {
            3 | 6 => formatted.push('.'),
            9 => formatted.push('-'),
            _ => {}
        }

        formatted.push(digit);
    }

    formatted
}

/// Whether `raw` is a CPF with valid check digits.
///
/// Punctuation is ignored. Sequences of one repeated digit, e.g.
/// "111.111.111-11", pass the check-digit test but are not valid CPFs.
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|char| char.to_digit(10)).collect();

    if digits.len() != CPF_LENGTH || digits.iter().all(|&digit| digit == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// The check digit for `digits`, weighted from `digits.len() + 1` down to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let first_weight = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .zip((2..=first_weight).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();

    match 11 - sum % 11 {
        10 | 11 => 0,
        digit => digit,
    }
}
