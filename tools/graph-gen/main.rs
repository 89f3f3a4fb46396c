use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use renkei::prelude::*;

/// A CLI tool to generate random acyclic call graphs for the renkei pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated graph JSON file to
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// The number of call nodes to generate
    #[arg(short, long, default_value_t = 10)]
    nodes: usize,

    /// Probability that a node depends on any given earlier node
    #[arg(long, default_value_t = 0.2)]
    edge_probability: f64,
}

const ERC20_ABI: &str = r#"[
  {"type":"function","name":"transfer","stateMutability":"nonpayable",
   "inputs":[{"name":"to","type":"address"},{"name":"amount","type":"uint256"}],
   "outputs":[{"name":"","type":"bool"}]},
  {"type":"function","name":"approve","stateMutability":"nonpayable",
   "inputs":[{"name":"spender","type":"address"},{"name":"amount","type":"uint256"}],
   "outputs":[{"name":"","type":"bool"}]},
  {"type":"event","name":"Transfer","anonymous":false,
   "inputs":[{"name":"from","type":"address","indexed":true},
             {"name":"to","type":"address","indexed":true},
             {"name":"value","type":"uint256","indexed":false}]}
]"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.edge_probability) {
        eprintln!(
            "Error: --edge-probability ({}) must be between 0 and 1",
            cli.edge_probability
        );
        std::process::exit(1);
    }

    println!(
        "Generating a call graph with {} node(s) (edge probability {})...",
        cli.nodes, cli.edge_probability
    );

    let abi = parse_abi(ERC20_ABI)?;
    let mut graph = Graph::new();

    for i in 0..cli.nodes {
        let id = graph.new_node_id();
        graph.add_node(CallNode::new(id.clone()).with_position(100.0 + i as f64 * 300.0, 200.0))?;
        graph.update_call(&id, generate_call(&mut rng, &abi))?;
    }

    // Edges only point from earlier to later nodes, so the graph stays acyclic.
    let ids: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    for (target_index, target) in ids.iter().enumerate() {
        for source in &ids[..target_index] {
            if rng.random_bool(cli.edge_probability) {
                graph.connect(source, target)?;
            }
        }
    }
    println!("-> Generated {} edge(s).", graph.edges.len());

    save_graph(&cli.output, &graph)?;
    println!("Successfully generated and saved graph to '{}'", cli.output);

    Ok(())
}

fn generate_call(rng: &mut ThreadRng, abi: &[FunctionDescriptor]) -> CallUpdate {
    let function_name = if rng.random_bool(0.5) { "transfer" } else { "approve" };
    CallUpdate {
        contract_address: random_address(rng),
        abi: abi.to_vec(),
        function_name: function_name.to_string(),
        args: vec![
            random_address(rng),
            rng.random_range(1u64..1_000_000_000).to_string(),
        ],
        value: None,
    }
}

fn random_address(rng: &mut ThreadRng) -> String {
    let bytes: [u8; 20] = rng.random();
    format!("0x{}", hex::encode(bytes))
}
