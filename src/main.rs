use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use multimodal_transport::generate::UniformSource;
use multimodal_transport::model::{Model, ModelConfig};
use multimodal_transport::network::{Dims, Network};
use multimodal_transport::report::Report;
use multimodal_transport::solve::{MilpSolver, SolveAdapter};

/// Build a multi-modal transport routing model over a randomly generated
/// network, solve it, and print the result.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Number of ports in the network
    #[clap(long, default_value_t = 4)]
    ports: usize,

    /// Number of goods to route
    #[clap(long, default_value_t = 2)]
    goods: usize,

    /// Number of shipment periods
    #[clap(long, default_value_t = 5)]
    periods: usize,

    /// Trade-off weight between cost (1.0) and delivery time (0.0)
    #[clap(long, default_value_t = 0.6)]
    alpha: f64,

    /// Seed for parameter generation; random when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Tie dispatch activation to nonzero container counts
    #[clap(long)]
    link_dispatch: bool,

    /// Write the report as JSON to this path
    #[clap(long)]
    output: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!("generating network from seed {seed}");

    let dims = Dims::new(args.ports, args.goods, args.periods);
    let network = Network::from_source(dims, &mut UniformSource::seeded(seed))?;

    let config = ModelConfig {
        alpha: args.alpha,
        link_dispatch: args.link_dispatch,
    };
    let model = Model::build(&network, config)?;
    let assignment = MilpSolver.solve(&model)?;
    let report = Report::new(&network, &model, &assignment)?;

    print!("{report}");

    if let Some(path) = &args.output {
        serde_json::to_writer_pretty(File::create(path)?, &report)?;
        info!("report written to {}", path.display());
    }

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
