//! Model-building core for multi-modal transport routing.
//!
//! Builds a mixed-integer program over (origin, destination, period, good)
//! shipment decisions: a scalarized cost/time objective weighted by `alpha`
//! and the feasibility constraints that make a routing realizable. The
//! numerical search itself is delegated through [`solve::SolveAdapter`];
//! [`solve::MilpSolver`] is the bundled backend.
//!
//! ```no_run
//! use multimodal_transport::generate::UniformSource;
//! use multimodal_transport::model::{Model, ModelConfig};
//! use multimodal_transport::network::{Dims, Network};
//! use multimodal_transport::report::Report;
//! use multimodal_transport::solve::{MilpSolver, SolveAdapter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let network = Network::from_source(Dims::new(4, 2, 5), &mut UniformSource::seeded(1))?;
//! let model = Model::build(&network, ModelConfig { alpha: 0.6, ..Default::default() })?;
//! let assignment = MilpSolver.solve(&model)?;
//! println!("{}", Report::new(&network, &model, &assignment)?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generate;
pub mod model;
pub mod network;
pub mod report;
pub mod solve;

pub use error::ModelError;
pub use model::{Model, ModelConfig};
pub use network::{Dims, Network};
pub use report::Report;
pub use solve::{Assignment, MilpSolver, SolveAdapter, SolveError};
