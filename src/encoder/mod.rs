//! Turns a resolved function and its argument strings into a transaction descriptor.

use crate::abi::{AbiType, FunctionDescriptor, selector};
use crate::error::EncodingError;
use ethers::abi::Token;
use ethers::types::{Address, U256};
use itertools::Itertools;

mod coerce;
mod value;

pub use value::{NATIVE_DECIMALS, parse_native_value};

/// A fully encoded contract call, ready for signing and broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDescriptor {
    /// The contract the call is sent to.
    pub to: Address,
    /// Selector followed by the ABI-encoded arguments.
    pub data: Vec<u8>,
    /// Native currency attached to the call, in the smallest unit.
    pub value: U256,
}

/// Encodes calls against ABI descriptors.
///
/// The encoder holds only configuration, so one instance can be shared freely.
#[derive(Debug, Clone, Copy)]
pub struct CallEncoder {
    value_decimals: u8,
}

impl Default for CallEncoder {
    fn default() -> Self {
        Self::new(NATIVE_DECIMALS)
    }
}

impl CallEncoder {
    pub fn new(value_decimals: u8) -> Self {
        Self { value_decimals }
    }

    pub fn value_decimals(&self) -> u8 {
        self.value_decimals
    }

    /// Encodes selector and arguments.
    ///
    /// All arguments are converted before anything is written, so a failure
    /// leaves no partial calldata behind.
    pub fn encode_calldata(
        &self,
        descriptor: &FunctionDescriptor,
        args: &[String],
    ) -> Result<Vec<u8>, EncodingError> {
        if args.len() != descriptor.inputs.len() {
            return Err(EncodingError::ArgumentCount {
                function: descriptor.name.clone(),
                expected: descriptor.inputs.len(),
                found: args.len(),
            });
        }

        let types = descriptor
            .inputs
            .iter()
            .enumerate()
            .map(|(index, param)| {
                AbiType::from_param(param).map_err(|reason| EncodingError::UnsupportedType {
                    index,
                    type_name: param.type_name.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tokens = types
            .iter()
            .zip(args.iter())
            .enumerate()
            .map(|(index, (ty, arg))| {
                coerce::coerce_argument(ty, arg).map_err(|reason| EncodingError::InvalidArgument {
                    index,
                    expected: ty.to_string(),
                    value: arg.clone(),
                    reason,
                })
            })
            .collect::<Result<Vec<Token>, _>>()?;

        let signature = format!("{}({})", descriptor.name, types.iter().join(","));
        let mut data = selector(&signature).to_vec();
        data.extend_from_slice(&ethers::abi::encode(&tokens));

        log::debug!(
            "Encoded call '{}' with {} argument(s) into {} bytes",
            signature,
            tokens.len(),
            data.len()
        );
        Ok(data)
    }

    /// Encodes a call to `target`, attaching the optional native `value`.
    pub fn encode_call(
        &self,
        target: &str,
        descriptor: &FunctionDescriptor,
        args: &[String],
        value: Option<&str>,
    ) -> Result<TransactionDescriptor, EncodingError> {
        let data = self.encode_calldata(descriptor, args)?;
        let value = parse_native_value(value, self.value_decimals)?;
        let to = coerce::parse_address(target).map_err(|_| EncodingError::InvalidTarget {
            address: target.to_string(),
        })?;

        Ok(TransactionDescriptor { to, data, value })
    }
}

/// Encodes a call with the reference chain's 18-decimal value scaling.
pub fn encode_call(
    target: &str,
    descriptor: &FunctionDescriptor,
    args: &[String],
    value: Option<&str>,
) -> Result<TransactionDescriptor, EncodingError> {
    CallEncoder::default().encode_call(target, descriptor, args, value)
}
