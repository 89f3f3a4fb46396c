use crate::error::EncodingError;
use ethers::types::U256;

/// Decimals of the reference chain's native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Converts a decimal native-currency amount (e.g. `"1.5"`) to its smallest unit.
///
/// An absent or blank value is zero. Negative, non-numeric and over-precise
/// amounts are rejected rather than rounded.
pub fn parse_native_value(value: Option<&str>, decimals: u8) -> Result<U256, EncodingError> {
    let amount = match value.map(str::trim) {
        None | Some("") => return Ok(U256::zero()),
        Some(amount) => amount,
    };
    let invalid = |reason: String| EncodingError::InvalidValue {
        value: amount.to_string(),
        reason,
    };

    if amount.starts_with('-') {
        return Err(invalid("negative amounts are not allowed".to_string()));
    }

    let (integer_part, fraction_part) = match amount.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (amount, ""),
    };
    if integer_part.is_empty() && fraction_part.is_empty() {
        return Err(invalid("no digits".to_string()));
    }
    if !integer_part.chars().all(|c| c.is_ascii_digit())
        || !fraction_part.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid("not a decimal number".to_string()));
    }

    let decimals = decimals as usize;
    if fraction_part.len() > decimals {
        return Err(invalid(format!(
            "{} decimal places exceed the currency precision of {}",
            fraction_part.len(),
            decimals
        )));
    }

    let digits = format!("{}{:0<width$}", integer_part, fraction_part, width = decimals);
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }
    U256::from_dec_str(digits).map_err(|_| invalid("amount overflows 256 bits".to_string()))
}
