use crate::abi::AbiType;
use ethers::abi::Token;
use ethers::types::{Address, U256};
use serde_json::Value;

/// Converts one argument string into a token of the declared type.
///
/// Arrays and tuples take a JSON array whose elements are converted recursively.
/// The error is the reason only; the caller attaches the index and type.
pub(crate) fn coerce_argument(ty: &AbiType, raw: &str) -> Result<Token, String> {
    match ty {
        AbiType::Uint(bits) => {
            let n = parse_unsigned(raw)?;
            if *bits < 256 && n >= (U256::one() << *bits) {
                return Err(format!("value does not fit in {} bits", bits));
            }
            Ok(Token::Uint(n))
        }
        AbiType::Int(bits) => parse_signed(raw, *bits).map(Token::Int),
        AbiType::Address => parse_address(raw).map(Token::Address),
        AbiType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Token::Bool(true)),
            "false" => Ok(Token::Bool(false)),
            _ => Err("expected 'true' or 'false'".to_string()),
        },
        AbiType::FixedBytes(size) => {
            let bytes = decode_hex(raw)?;
            if bytes.len() != *size {
                return Err(format!("expected {} bytes, got {}", size, bytes.len()));
            }
            Ok(Token::FixedBytes(bytes))
        }
        AbiType::Bytes => decode_hex(raw).map(Token::Bytes),
        AbiType::String => Ok(Token::String(raw.to_string())),
        AbiType::Array(inner) => coerce_elements(inner, &parse_list(raw)?).map(Token::Array),
        AbiType::FixedArray(inner, size) => {
            let items = parse_list(raw)?;
            if items.len() != *size {
                return Err(format!("expected {} elements, got {}", size, items.len()));
            }
            coerce_elements(inner, &items).map(Token::FixedArray)
        }
        AbiType::Tuple(members) => {
            let items = parse_list(raw)?;
            if items.len() != members.len() {
                return Err(format!(
                    "tuple expects {} elements, got {}",
                    members.len(),
                    items.len()
                ));
            }
            members
                .iter()
                .zip(items.iter())
                .enumerate()
                .map(|(i, (member, item))| {
                    coerce_argument(member, item).map_err(|e| format!("element {}: {}", i, e))
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Token::Tuple)
        }
    }
}

fn coerce_elements(inner: &AbiType, items: &[String]) -> Result<Vec<Token>, String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| coerce_argument(inner, item).map_err(|e| format!("element {}: {}", i, e)))
        .collect()
}

/// Reads a JSON array argument and renders each element back to argument text.
fn parse_list(raw: &str) -> Result<Vec<String>, String> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| format!("expected a JSON array: {}", e))?;
    match value {
        Value::Array(items) => Ok(items.iter().map(element_text).collect()),
        _ => Err("expected a JSON array".to_string()),
    }
}

fn element_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parses a base-10 or `0x`-prefixed unsigned integer.
pub(crate) fn parse_unsigned(raw: &str) -> Result<U256, String> {
    let s = raw.trim();
    if let Some(hex_digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex_digits.is_empty() || !hex_digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid hex integer '{}'", s));
        }
        U256::from_str_radix(hex_digits, 16).map_err(|_| format!("'{}' overflows 256 bits", s))
    } else {
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("invalid integer '{}'", s));
        }
        U256::from_dec_str(s).map_err(|_| format!("'{}' overflows 256 bits", s))
    }
}

/// Parses a signed integer into its 256-bit two's complement form.
fn parse_signed(raw: &str, bits: usize) -> Result<U256, String> {
    let s = raw.trim();
    let (negative, magnitude) = match s.strip_prefix('-') {
        Some(rest) => (true, parse_unsigned(rest)?),
        None => (false, parse_unsigned(s)?),
    };

    let limit = U256::one() << (bits - 1);
    if negative {
        if magnitude > limit {
            return Err(format!("value is below the int{} range", bits));
        }
        Ok((!magnitude).overflowing_add(U256::one()).0)
    } else {
        if magnitude >= limit {
            return Err(format!("value is above the int{} range", bits));
        }
        Ok(magnitude)
    }
}

pub(crate) fn parse_address(raw: &str) -> Result<Address, String> {
    let bytes = decode_hex(raw)?;
    if bytes.len() != 20 {
        return Err(format!("expected 20 bytes, got {}", bytes.len()));
    }
    Ok(Address::from_slice(&bytes))
}

fn decode_hex(raw: &str) -> Result<Vec<u8>, String> {
    let s = raw.trim();
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|e| format!("invalid hex: {}", e))
}
