//! End-to-end tests: graph snapshot in, ordered transactions out.
mod common;
use common::*;
use ethers::types::{Address, U256};
use renkei::prelude::*;

#[test]
fn test_build_transactions_follows_dependencies() {
    let graph = create_chain_graph();
    let transactions = build_transactions(&graph).expect("Failed to build chain");

    assert_eq!(transactions.len(), 3);
    for (tx, amount) in transactions.iter().zip([1u64, 2, 3]) {
        let data = hex::encode(&tx.data);
        assert!(data.starts_with("a9059cbb"));
        assert!(data.ends_with(&uint_word(amount)), "expected amount {} in {}", amount, data);
        assert_eq!(tx.value, U256::zero());
    }
}

#[test]
fn test_approve_then_swap_scenario() {
    let router = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
    let approve = CallNode {
        id: "approve".to_string(),
        contract_address: TOKEN_ADDRESS.to_string(),
        abi: erc20_abi(),
        function_name: "approve".to_string(),
        function_signature: "approve(address,uint256)".to_string(),
        args: vec![router.to_string(), "1000".to_string()],
        ..Default::default()
    };
    let swap = CallNode {
        id: "swap".to_string(),
        contract_address: router.to_string(),
        abi: vec![FunctionDescriptor::function("swapExactETHForTokens", &[
            ("amountOutMin", "uint256"),
            ("path", "address[]"),
        ])],
        function_name: "swapExactETHForTokens".to_string(),
        args: vec!["0".to_string(), format!(r#"["{}"]"#, TOKEN_ADDRESS)],
        value: Some("0.25".to_string()),
        ..Default::default()
    };
    // Declared in reverse of the intended execution order.
    let graph = Graph {
        nodes: vec![swap, approve],
        edges: vec![Edge::new("approve", "swap")],
    };

    let batch = Pipeline::default().build_batch(&graph).unwrap();
    let node_ids: Vec<&str> = batch.entries.iter().map(|e| e.node_id.as_str()).collect();
    assert_eq!(node_ids, vec!["approve", "swap"]);

    let approve_tx = &batch.entries[0].transaction;
    let swap_tx = &batch.entries[1].transaction;
    assert_eq!(approve_tx.to, TOKEN_ADDRESS.parse::<Address>().unwrap());
    assert_eq!(&approve_tx.data[..4], &[0x09, 0x5e, 0xa7, 0xb3]);
    assert_eq!(swap_tx.to, router.parse::<Address>().unwrap());
    assert_eq!(swap_tx.value, U256::from_dec_str("250000000000000000").unwrap());
}

#[test]
fn test_unknown_function_fails_with_node_id() {
    let mut graph = create_chain_graph();
    graph.nodes[1].function_name = "mint".to_string();

    let err = build_transactions(&graph).unwrap_err();
    match err {
        BuildError::Node { node_id, cause: NodeFailure::NotFound(not_found) } => {
            assert_eq!(node_id, "b");
            assert_eq!(not_found.function_name, "mint");
        }
        other => panic!("Expected a not-found node failure, got {:?}", other),
    }
}

#[test]
fn test_encoding_failure_fails_with_node_id() {
    let mut graph = create_chain_graph();
    graph.nodes[0].args[1] = String::new();

    let err = build_transactions(&graph).unwrap_err();
    match &err {
        BuildError::Node { node_id, cause: NodeFailure::Encoding(EncodingError::InvalidArgument { index, .. }) } => {
            assert_eq!(node_id, "c");
            assert_eq!(*index, 1);
        }
        other => panic!("Expected an encoding node failure, got {:?}", other),
    }
    assert!(err.to_string().starts_with("Node 'c' could not be built"));
}

#[test]
fn test_first_failure_in_execution_order_wins() {
    let mut graph = create_chain_graph();
    // `c` is declared first but executes last; `a` fails first.
    graph.nodes[0].function_name = "missing".to_string();
    graph.nodes[2].contract_address = "0xnope".to_string();

    let err = build_transactions(&graph).unwrap_err();
    assert!(matches!(err, BuildError::Node { ref node_id, .. } if node_id == "a"), "got {:?}", err);
}

#[test]
fn test_cycle_fails_the_build() {
    let mut graph = create_chain_graph();
    graph.edges.push(Edge::new("c", "a"));
    let err = build_transactions(&graph).unwrap_err();
    assert!(matches!(err, BuildError::Cycle(_)));
}

#[test]
fn test_empty_graph_is_configurable() {
    let graph = Graph::new();
    assert!(build_transactions(&graph).unwrap().is_empty());

    let strict = Pipeline::builder().require_nodes(true).build();
    assert_eq!(strict.build_batch(&graph).unwrap_err(), BuildError::EmptyGraph);
}

#[test]
fn test_value_decimals_configuration() {
    let mut graph = create_chain_graph();
    graph.nodes[2].value = Some("1.5".to_string());

    let pipeline = Pipeline::builder().with_value_decimals(6).build();
    let transactions = pipeline.build_transactions(&graph).unwrap();
    assert_eq!(transactions[0].value, U256::from(1_500_000u64));
}

#[test]
fn test_build_does_not_modify_graph() {
    let graph = create_chain_graph();
    let before = graph.clone();
    let _ = build_transactions(&graph).unwrap();
    assert_eq!(graph, before);
}

#[test]
fn test_submit_all_stops_at_first_failure() {
    let transactions = build_transactions(&create_chain_graph()).unwrap();
    let mut submitter = DryRunSubmitter::failing_at(1);

    let err = submit_all(&mut submitter, &transactions).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.completed.len(), 1);
    assert_eq!(submitter.submitted().len(), 1, "nothing after the failure may be sent");
    assert_eq!(submitter.submitted()[0], transactions[0]);
}

#[test]
fn test_submit_all_in_order() {
    let batch = Pipeline::default().build_batch(&create_chain_graph()).unwrap();
    let mut submitter = DryRunSubmitter::new();

    let references = batch.submit(&mut submitter).unwrap();
    assert_eq!(references.len(), 3);
    let expected: Vec<TransactionDescriptor> = batch.transactions().cloned().collect();
    assert_eq!(submitter.submitted(), expected.as_slice());
    assert!(references.iter().all(|r| r.starts_with("0x") && r.len() == 66));
}
