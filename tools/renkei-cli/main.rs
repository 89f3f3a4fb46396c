use clap::{Parser, Subcommand};
use renkei::prelude::*;
use std::fs;
use std::time::Instant;

/// Compiles saved call graphs into ordered transaction batches
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Decimals of the native currency used to scale node values
    #[arg(long, global = true, default_value_t = NATIVE_DECIMALS)]
    decimals: u8,

    /// Fail when the graph has no nodes instead of producing an empty batch
    #[arg(long, global = true)]
    require_nodes: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the transaction batch for a graph file and print it as JSON
    Build {
        /// Path to the saved graph JSON file
        graph_path: String,
        /// Also write the batch to this file in binary form
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Print the execution order of a graph file
    Order {
        /// Path to the saved graph JSON file
        graph_path: String,
    },
    /// List the callable functions of an ABI file with their signatures
    Functions {
        /// Path to the ABI JSON file
        abi_path: String,
    },
    /// Print a batch previously written with `build --out`
    Inspect {
        /// Path to the binary batch file
        batch_path: String,
    },
    /// Build a graph and submit it to a recording submitter
    DryRun {
        /// Path to the saved graph JSON file
        graph_path: String,
        /// Reject the submission with this zero-based index
        #[arg(long)]
        fail_at: Option<usize>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let pipeline = Pipeline::builder()
        .with_value_decimals(cli.decimals)
        .require_nodes(cli.require_nodes)
        .build();

    match cli.command {
        Command::Build { graph_path, out } => run_build(&pipeline, &graph_path, out.as_deref()),
        Command::Order { graph_path } => run_order(&graph_path),
        Command::Functions { abi_path } => run_functions(&abi_path),
        Command::Inspect { batch_path } => run_inspect(&batch_path),
        Command::DryRun {
            graph_path,
            fail_at,
        } => run_dry_run(&pipeline, &graph_path, fail_at),
    }
}

fn run_build(pipeline: &Pipeline, graph_path: &str, out: Option<&str>) {
    let total_start = Instant::now();
    let batch = build_batch(pipeline, graph_path);

    print_json(&batch.to_json_view());

    if let Some(out_path) = out {
        batch
            .save(out_path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save batch: {}", e)));
        log::info!("Wrote {} transaction(s) to '{}'", batch.len(), out_path);
    }
    log::info!("Total execution: {:?}", total_start.elapsed());
}

fn run_order(graph_path: &str) {
    let graph = load(graph_path);
    let ordered = graph
        .ordered()
        .unwrap_or_else(|e| exit_with_error(&format!("Ordering failed: {}", e)));

    for (position, node) in ordered.iter().enumerate() {
        let label = if node.function_signature.is_empty() {
            "<no function>"
        } else {
            node.function_signature.as_str()
        };
        println!("{:>3}. {} -> {}", position + 1, node.id, label);
    }
}

fn run_functions(abi_path: &str) {
    let abi_json = fs::read_to_string(abi_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read ABI file '{}': {}", abi_path, e))
    });
    let abi = parse_abi(&abi_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid ABI: {}", e)));

    let functions: Vec<_> = selectable_functions(&abi).collect();
    if functions.is_empty() {
        println!("No callable functions in '{}'", abi_path);
        return;
    }
    for function in functions {
        println!("{}", compute_signature(function));
    }
}

fn run_inspect(batch_path: &str) {
    let batch = TransactionBatch::from_file(batch_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load batch: {}", e)));
    print_json(&batch.to_json_view());
}

fn run_dry_run(pipeline: &Pipeline, graph_path: &str, fail_at: Option<usize>) {
    let batch = build_batch(pipeline, graph_path);
    let mut submitter = match fail_at {
        Some(index) => DryRunSubmitter::failing_at(index),
        None => DryRunSubmitter::new(),
    };

    match batch.submit(&mut submitter) {
        Ok(references) => {
            for (entry, reference) in batch.entries.iter().zip(&references) {
                println!("{} -> {}", entry.node_id, reference);
            }
            println!("All {} transaction(s) submitted", references.len());
        }
        Err(e) => {
            let node_id = batch
                .entries
                .get(e.index)
                .map(|entry| entry.node_id.as_str())
                .unwrap_or("?");
            exit_with_error(&format!("Submission stopped at node '{}': {}", node_id, e));
        }
    }
}

fn load(graph_path: &str) -> Graph {
    load_graph(graph_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load graph: {}", e)))
}

fn build_batch(pipeline: &Pipeline, graph_path: &str) -> TransactionBatch {
    let graph = load(graph_path);
    let build_start = Instant::now();
    let batch = pipeline
        .build_batch(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Build failed: {}", e)));
    log::info!(
        "Built {} transaction(s) in {:?}",
        batch.len(),
        build_start.elapsed()
    );
    batch
}

fn print_json(value: &serde_json::Value) {
    let rendered = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to render JSON: {}", e)));
    println!("{}", rendered);
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
