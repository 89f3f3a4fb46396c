//! Tests for ABI parsing, function resolution and signatures.
mod common;
use common::*;
use renkei::prelude::*;

#[test]
fn test_parse_abi_keeps_all_entries() {
    let abi = erc20_abi();
    assert_eq!(abi.len(), 6);
    assert_eq!(abi[0].kind, "constructor");
    assert_eq!(abi[4].kind, "event");
}

#[test]
fn test_parse_abi_rejects_malformed_json() {
    let result = parse_abi(r#"[{"type":"function","name":"broken""#);
    assert!(matches!(result, Err(ParseError::InvalidJson(_))));
}

#[test]
fn test_parse_abi_rejects_non_array() {
    let result = parse_abi(r#"{"type":"function","name":"transfer"}"#);
    match result {
        Err(ParseError::NotAnArray(found)) => assert_eq!(found, "an object"),
        other => panic!("Expected NotAnArray, got {:?}", other),
    }
}

#[test]
fn test_parse_abi_tolerates_missing_fields() {
    let abi = parse_abi(r#"[{"name":"noKind"},{"type":"function","name":"noInputs"},{}]"#)
        .expect("missing fields must not fail parsing");
    assert_eq!(abi.len(), 3);
    assert_eq!(abi[0].kind, "");
    assert!(abi[1].inputs.is_empty());

    // An entry without a kind tag is never selectable.
    assert!(resolve_function(&abi, "noKind").is_err());
    assert_eq!(resolve_function(&abi, "noInputs").unwrap().name, "noInputs");
}

#[test]
fn test_selectable_functions_excludes_other_kinds() {
    let abi = erc20_abi();
    let names: Vec<&str> = selectable_functions(&abi).map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["transfer", "approve", "totalSupply"]);
}

#[test]
fn test_resolve_function_by_exact_name() {
    let abi = erc20_abi();
    let function = resolve_function(&abi, "approve").expect("approve should resolve");
    assert_eq!(function.inputs.len(), 2);
    assert_eq!(function.inputs[0].name, "spender");

    assert!(resolve_function(&abi, "Approve").is_err());
    assert!(resolve_function(&abi, "Transfer").is_err(), "events are not call targets");
}

#[test]
fn test_resolve_function_not_found_names_function() {
    let abi = erc20_abi();
    let err = resolve_function(&abi, "mint").unwrap_err();
    assert_eq!(err.function_name, "mint");
    assert!(err.to_string().contains("mint"));
}

#[test]
fn test_overloads_resolve_to_first_declared() {
    let abi = vec![
        FunctionDescriptor::function("safeTransferFrom", &[("from", "address"), ("to", "address"), ("id", "uint256")]),
        FunctionDescriptor::function(
            "safeTransferFrom",
            &[("from", "address"), ("to", "address"), ("id", "uint256"), ("data", "bytes")],
        ),
    ];
    let function = resolve_function(&abi, "safeTransferFrom").unwrap();
    assert_eq!(function.inputs.len(), 3);
}

#[test]
fn test_compute_signature_is_canonical_and_stable() {
    let abi = erc20_abi();
    let transfer = resolve_function(&abi, "transfer").unwrap();
    let first = compute_signature(transfer);
    assert_eq!(first, "transfer(address,uint256)");
    assert_eq!(compute_signature(transfer), first);
    assert_eq!(transfer.signature(), first);

    let total_supply = resolve_function(&abi, "totalSupply").unwrap();
    assert_eq!(compute_signature(total_supply), "totalSupply()");
}

#[test]
fn test_compute_signature_expands_tuples() {
    let abi = parse_abi(
        r#"[{"type":"function","name":"execute","inputs":[
            {"name":"calls","type":"tuple[]","components":[
                {"name":"target","type":"address"},
                {"name":"callData","type":"bytes"}]},
            {"name":"deadline","type":"uint"}]}]"#,
    )
    .unwrap();
    let function = resolve_function(&abi, "execute").unwrap();
    assert_eq!(compute_signature(function), "execute((address,bytes)[],uint256)");
}

#[test]
fn test_non_object_entries_load_as_unselectable() {
    let abi = parse_abi(r#"[{"type":"function","name":"f","inputs":[]}, 42, "x", null, []]"#)
        .expect("well-formed arrays must parse");
    assert_eq!(abi.len(), 5);
    assert!(abi[1..].iter().all(|entry| *entry == FunctionDescriptor::default()));

    let names: Vec<&str> = selectable_functions(&abi).map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["f"]);
}

#[test]
fn test_null_and_mistyped_fields_default() {
    let abi = parse_abi(
        r#"[{"type":"function","name":null,"inputs":null},
            {"type":"function","name":"g","inputs":[null, {"name":"a","type":null}, {"name":"b","type":"uint8"}]},
            {"type":"function","name":"h","inputs":{"not":"a list"}}]"#,
    )
    .expect("null fields must not fail parsing");

    assert_eq!(abi[0].name, "");
    assert!(abi[0].inputs.is_empty());

    let g = resolve_function(&abi, "g").unwrap();
    assert_eq!(g.inputs.len(), 3);
    assert_eq!(g.inputs[0], ParamDescriptor::default());
    assert_eq!(g.inputs[1].type_name, "");
    assert_eq!(g.inputs[2].type_name, "uint8");

    assert!(resolve_function(&abi, "h").unwrap().inputs.is_empty());
}

#[test]
fn test_invalid_json_is_reserved_for_syntax_errors() {
    assert!(matches!(parse_abi("[1, 2,"), Err(ParseError::InvalidJson(_))));
    assert!(matches!(parse_abi("42"), Err(ParseError::NotAnArray(_))));
}
