use super::{AbiType, FunctionDescriptor, ParamDescriptor};
use ethers::utils::keccak256;
use itertools::Itertools;

/// Computes `name(type1,type2,...)` with input types in declared order.
///
/// Types that parse are written in canonical form (`uint` becomes `uint256`,
/// tuples expand to their components). Anything else is kept verbatim.
pub fn compute_signature(descriptor: &FunctionDescriptor) -> String {
    format!(
        "{}({})",
        descriptor.name,
        descriptor.inputs.iter().map(canonical_type).join(",")
    )
}

/// The first four bytes of the keccak-256 hash of a canonical signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn canonical_type(param: &ParamDescriptor) -> String {
    AbiType::from_param(param)
        .map(|ty| ty.to_string())
        .unwrap_or_else(|_| param.type_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_selectors() {
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(selector("totalSupply()"), [0x18, 0x16, 0x0d, 0xdd]);
    }

    #[test]
    fn test_unparseable_types_are_kept_verbatim() {
        let descriptor = FunctionDescriptor::function("f", &[("x", "fixed128x18"), ("y", "uint")]);
        assert_eq!(compute_signature(&descriptor), "f(fixed128x18,uint256)");
    }
}
