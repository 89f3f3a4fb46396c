//! Common test utilities for building call graphs and ABIs.
use renkei::prelude::*;

#[allow(dead_code)]
pub const TOKEN_ADDRESS: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";
#[allow(dead_code)]
pub const RECIPIENT: &str = "0x000000000000000000000000000000000000dEaD";

/// An ERC-20 style ABI with a constructor and an event mixed in.
#[allow(dead_code)]
pub const ERC20_ABI_JSON: &str = r#"[
  {"type":"constructor","inputs":[{"name":"supply","type":"uint256"}]},
  {"type":"function","name":"transfer","stateMutability":"nonpayable",
   "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
   "outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"approve","stateMutability":"nonpayable",
   "inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],
   "outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"totalSupply","stateMutability":"view","inputs":[],
   "outputs":[{"name":"","type":"uint256"}]},
  {"type":"event","name":"Transfer","anonymous":false,
   "inputs":[{"name":"from","type":"address","indexed":true},
             {"name":"to","type":"address","indexed":true},
             {"name":"value","type":"uint256","indexed":false}]},
  {"type":"error","name":"InsufficientBalance","inputs":[]}
]"#;

#[allow(dead_code)]
pub fn erc20_abi() -> Vec<FunctionDescriptor> {
    parse_abi(ERC20_ABI_JSON).expect("fixture ABI must parse")
}

#[allow(dead_code)]
pub fn transfer_descriptor() -> FunctionDescriptor {
    FunctionDescriptor::function("transfer", &[("to", "address"), ("amount", "uint256")])
}

/// A node calling `transfer(RECIPIENT, amount)` on the token.
#[allow(dead_code)]
pub fn transfer_node(id: &str, amount: &str) -> CallNode {
    CallNode {
        id: id.to_string(),
        contract_address: TOKEN_ADDRESS.to_string(),
        abi: vec![transfer_descriptor()],
        function_name: "transfer".to_string(),
        function_signature: "transfer(address,uint256)".to_string(),
        args: vec![RECIPIENT.to_string(), amount.to_string()],
        ..Default::default()
    }
}

/// A node with no function selected; only useful for ordering tests.
#[allow(dead_code)]
pub fn bare_node(id: &str) -> CallNode {
    CallNode::new(id)
}

#[allow(dead_code)]
pub fn ids(nodes: &[&CallNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id.clone()).collect()
}

/// Three transfers wired `a -> b -> c`, declared in reverse.
#[allow(dead_code)]
pub fn create_chain_graph() -> Graph {
    Graph {
        nodes: vec![
            transfer_node("c", "3"),
            transfer_node("b", "2"),
            transfer_node("a", "1"),
        ],
        edges: vec![Edge::new("a", "b"), Edge::new("b", "c")],
    }
}

/// The 32-byte ABI word for a small unsigned integer, as hex.
#[allow(dead_code)]
pub fn uint_word(n: u64) -> String {
    format!("{:064x}", n)
}

/// The 32-byte ABI word for an address given as hex, lowercased.
#[allow(dead_code)]
pub fn address_word(address: &str) -> String {
    format!("{:0>64}", address.trim_start_matches("0x").to_lowercase())
}
