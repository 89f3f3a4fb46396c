use super::ParamDescriptor;
use ethers::abi::ParamType;
use itertools::Itertools;
use std::fmt;

/// The closed set of ABI type categories an argument can be encoded as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// `uintN`, width in bits.
    Uint(usize),
    /// `intN`, width in bits.
    Int(usize),
    Address,
    Bool,
    /// `bytesN`, length in bytes.
    FixedBytes(usize),
    Bytes,
    String,
    /// `T[]`
    Array(Box<AbiType>),
    /// `T[n]`
    FixedArray(Box<AbiType>, usize),
    /// `(T1,T2,...)`, declared as `tuple` with components.
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Parses a declared parameter, using its `components` for tuple types.
    pub fn from_param(param: &ParamDescriptor) -> Result<Self, String> {
        Self::parse(&param.type_name, param.components.as_deref())
    }

    /// Parses an ABI type string such as `uint256`, `bytes32[]` or `tuple[2]`.
    pub fn parse(type_name: &str, components: Option<&[ParamDescriptor]>) -> Result<Self, String> {
        let type_name = type_name.trim();

        if let Some(stripped) = type_name.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| format!("unbalanced array brackets in '{}'", type_name))?;
            let inner = Self::parse(&stripped[..open], components)?;
            let dimension = &stripped[open + 1..];
            if dimension.is_empty() {
                return Ok(AbiType::Array(Box::new(inner)));
            }
            let size: usize = dimension
                .parse()
                .map_err(|_| format!("invalid array length '{}'", dimension))?;
            if size == 0 {
                return Err("fixed arrays must have at least one element".to_string());
            }
            return Ok(AbiType::FixedArray(Box::new(inner), size));
        }

        match type_name {
            "address" => Ok(AbiType::Address),
            "bool" => Ok(AbiType::Bool),
            "string" => Ok(AbiType::String),
            "bytes" => Ok(AbiType::Bytes),
            "tuple" => {
                let components =
                    components.ok_or_else(|| "tuple type declares no components".to_string())?;
                components
                    .iter()
                    .map(Self::from_param)
                    .collect::<Result<Vec<_>, _>>()
                    .map(AbiType::Tuple)
            }
            "" => Err("missing type".to_string()),
            other => {
                if let Some(bits) = other.strip_prefix("uint") {
                    parse_int_width(bits).map(AbiType::Uint)
                } else if let Some(bits) = other.strip_prefix("int") {
                    parse_int_width(bits).map(AbiType::Int)
                } else if let Some(size) = other.strip_prefix("bytes") {
                    parse_fixed_bytes(size).map(AbiType::FixedBytes)
                } else {
                    Err(format!("unknown type '{}'", other))
                }
            }
        }
    }

    /// The equivalent `ethers` parameter type, used for the wire layout.
    pub fn to_param_type(&self) -> ParamType {
        match self {
            AbiType::Uint(bits) => ParamType::Uint(*bits),
            AbiType::Int(bits) => ParamType::Int(*bits),
            AbiType::Address => ParamType::Address,
            AbiType::Bool => ParamType::Bool,
            AbiType::FixedBytes(size) => ParamType::FixedBytes(*size),
            AbiType::Bytes => ParamType::Bytes,
            AbiType::String => ParamType::String,
            AbiType::Array(inner) => ParamType::Array(Box::new(inner.to_param_type())),
            AbiType::FixedArray(inner, size) => {
                ParamType::FixedArray(Box::new(inner.to_param_type()), *size)
            }
            AbiType::Tuple(members) => {
                ParamType::Tuple(members.iter().map(AbiType::to_param_type).collect())
            }
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{}", bits),
            AbiType::Int(bits) => write!(f, "int{}", bits),
            AbiType::Address => write!(f, "address"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::FixedBytes(size) => write!(f, "bytes{}", size),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Array(inner) => write!(f, "{}[]", inner),
            AbiType::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            AbiType::Tuple(members) => write!(f, "({})", members.iter().join(",")),
        }
    }
}

fn parse_int_width(bits: &str) -> Result<usize, String> {
    if bits.is_empty() {
        return Ok(256);
    }
    let width: usize = bits
        .parse()
        .map_err(|_| format!("invalid integer width '{}'", bits))?;
    if width == 0 || width > 256 || width % 8 != 0 {
        return Err(format!(
            "integer width {} must be a multiple of 8 between 8 and 256",
            width
        ));
    }
    Ok(width)
}

fn parse_fixed_bytes(size: &str) -> Result<usize, String> {
    let size: usize = size
        .parse()
        .map_err(|_| format!("invalid fixed bytes length '{}'", size))?;
    if !(1..=32).contains(&size) {
        return Err(format!("fixed bytes length {} must be between 1 and 32", size));
    }
    Ok(size)
}
