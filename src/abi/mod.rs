//! ABI entries, function resolution and canonical signatures.
//!
//! A raw ABI is any JSON array of entries. Only entries whose `type` tag equals
//! `"function"` can be selected as call targets; constructors, events and errors
//! are carried along untouched so a saved graph reproduces what was loaded.

use crate::error::{NotFoundError, ParseError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

mod signature;
pub mod types;

pub use signature::{compute_signature, selector};
pub use types::AbiType;

/// The kind tag an ABI entry must carry to be call-eligible.
pub const FUNCTION_KIND: &str = "function";

/// A single ABI entry as it appears in the contract's JSON description.
///
/// Missing, `null` or mistyped fields default to empty values. Fields this crate
/// does not interpret (`outputs`, `stateMutability`, ...) are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub inputs: Vec<ParamDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A declared input parameter of an ABI entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParamDescriptor {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub type_name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_list"
    )]
    pub components: Option<Vec<ParamDescriptor>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionDescriptor {
    /// Creates a call-eligible entry from a name and `(name, type)` input pairs.
    pub fn function(name: &str, inputs: &[(&str, &str)]) -> Self {
        Self {
            kind: FUNCTION_KIND.to_string(),
            name: name.to_string(),
            inputs: inputs
                .iter()
                .map(|(param_name, type_name)| ParamDescriptor::new(param_name, type_name))
                .collect(),
            extra: Map::new(),
        }
    }

    pub fn is_function(&self) -> bool {
        self.kind == FUNCTION_KIND
    }

    /// The canonical `name(type1,type2,...)` form of this entry.
    pub fn signature(&self) -> String {
        compute_signature(self)
    }
}

impl ParamDescriptor {
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            components: None,
            extra: Map::new(),
        }
    }

    /// A `tuple` parameter (or array of tuples) with the given members.
    pub fn tuple(name: &str, type_name: &str, components: Vec<ParamDescriptor>) -> Self {
        Self {
            components: Some(components),
            ..Self::new(name, type_name)
        }
    }
}

/// Parses raw ABI text into its entries.
///
/// Only JSON well-formedness and the top-level array shape are checked. Entries
/// that are not objects load as empty, never-selectable entries. On error the
/// caller is expected to keep whatever ABI it had before.
pub fn parse_abi(abi_json: &str) -> Result<Vec<FunctionDescriptor>, ParseError> {
    let value: Value =
        serde_json::from_str(abi_json).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    match value {
        Value::Array(entries) => Ok(entries.into_iter().map(lenient_entry).collect()),
        other => Err(ParseError::NotAnArray(json_kind(&other).to_string())),
    }
}

/// Entries that can be selected as call targets, in declaration order.
pub fn selectable_functions(abi: &[FunctionDescriptor]) -> impl Iterator<Item = &FunctionDescriptor> {
    abi.iter().filter(|entry| entry.is_function())
}

/// Resolves a function by exact name.
///
/// Overloads are not disambiguated: the first matching function in declaration
/// order wins.
pub fn resolve_function<'a>(
    abi: &'a [FunctionDescriptor],
    function_name: &str,
) -> Result<&'a FunctionDescriptor, NotFoundError> {
    selectable_functions(abi)
        .find(|entry| entry.name == function_name)
        .ok_or_else(|| NotFoundError {
            function_name: function_name.to_string(),
        })
}

/// Reads an optional ABI array field leniently: `null` or a non-array is absent.
pub(crate) fn lenient_abi<'de, D>(deserializer: D) -> Result<Option<Vec<FunctionDescriptor>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_optional_list(deserializer)
}

fn lenient_entry<T: DeserializeOwned + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_else(|e| {
        log::warn!("Treating malformed ABI entry as empty: {}", e);
        T::default()
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient_optional_list(deserializer)?.unwrap_or_default())
}

fn lenient_optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.into_iter().map(lenient_entry).collect()),
        _ => None,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
