//! CPF and CNPJ check-digit validation
//!
//! Both identifiers end in two mod-11 check digits. The second digit is
//! computed over the base digits plus the first check digit.
//!
//! Reference: <https://pt.wikipedia.org/wiki/D%C3%ADgito_verificador>

use regex::Regex;
use std::sync::LazyLock;

/// `###.###.###-##` or eleven bare digits
static CPF_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{3}\.?[0-9]{3}\.?[0-9]{3}-?[0-9]{2}$").expect("CPF regex is valid")
});

/// `##.###.###/####-##` or fourteen bare digits
static CNPJ_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}\.?[0-9]{3}\.?[0-9]{3}/?[0-9]{4}-?[0-9]{2}$")
        .expect("CNPJ regex is valid")
});

/// Validate a CPF (individual taxpayer id)
///
/// Returns `false` for anything that is not a well-shaped CPF; never panics.
pub fn validate_cpf(cpf: &str) -> bool {
    if !CPF_SHAPE.is_match(cpf) {
        return false;
    }
    let digits = digit_values(cpf);
    if all_equal(&digits) {
        return false;
    }

    let first = cpf_check_digit(&digits[..9], 10);
    let second = cpf_check_digit(&digits[..10], 11);
    first == digits[9] && second == digits[10]
}

/// Validate a CNPJ (company registry id)
///
/// Returns `false` for anything that is not a well-shaped CNPJ; never panics.
pub fn validate_cnpj(cnpj: &str) -> bool {
    if !CNPJ_SHAPE.is_match(cnpj) {
        return false;
    }
    let digits = digit_values(cnpj);
    if all_equal(&digits) {
        return false;
    }

    let first = cnpj_check_digit(&digits[..12], 5);
    let second = cnpj_check_digit(&digits[..13], 6);
    first == digits[12] && second == digits[13]
}

/// Weights run from `start` down to 2, one per digit.
fn cpf_check_digit(digits: &[u32], start: u32) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip((2..=start).rev())
        .map(|(d, w)| d * w)
        .sum();
    mod11_digit(sum)
}

/// Weights run from `start` down to 2, then wrap to 9 and descend again.
fn cnpj_check_digit(digits: &[u32], start: u32) -> u32 {
    let mut weight = start;
    let mut sum = 0;
    for d in digits {
        sum += d * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }
    mod11_digit(sum)
}

fn mod11_digit(sum: u32) -> u32 {
    let rest = sum % 11;
    if rest < 2 { 0 } else { 11 - rest }
}

fn digit_values(s: &str) -> Vec<u32> {
    s.chars().filter_map(|c| c.to_digit(10)).collect()
}

// Sequences like 111.111.111-11 satisfy the arithmetic but are not issued.
fn all_equal(digits: &[u32]) -> bool {
    digits.windows(2).all(|w| w[0] == w[1])
}
