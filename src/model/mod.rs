pub mod constraints;
pub mod expr;
pub mod objective;
pub mod variables;

use log::info;

use crate::error::ModelError;
use crate::network::Network;

use expr::Constraint;
use objective::Objective;
use variables::VariableSpace;

/// Tunables supplied at model-construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    /// Trade-off weight between monetary cost (`alpha`) and delivery time
    /// (`1 - alpha`). Must lie in `[0, 1]`.
    pub alpha: f64,
    /// Emit the constraint tying dispatch activation to nonzero container
    /// counts. Defaults to off, which leaves the two families uncoupled and
    /// the fixed dispatch cost unable to bind.
    pub link_dispatch: bool,
}

impl Default for ModelConfig {
    fn default() -> ModelConfig {
        ModelConfig {
            alpha: 0.6,
            link_dispatch: false,
        }
    }
}

/// A fully assembled model instance: variables, scalarized objective and
/// feasibility constraints, ready to hand to a
/// [`SolveAdapter`](crate::solve::SolveAdapter).
///
/// The model is an explicit value. Building one has no side effects and two
/// builds from identical parameters compare equal, so determinism can be
/// verified structurally before any solver runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    variables: VariableSpace,
    objective: Objective,
    constraints: Vec<Constraint>,
    config: ModelConfig,
}

impl Model {
    /// Wires catalog, variable space, objective and constraints together.
    pub fn build(network: &Network, config: ModelConfig) -> Result<Model, ModelError> {
        let (p, g, t) = network.dims().dimensions();
        info!(
            "building transport model: {} ports, {} goods, {} periods, alpha {}",
            p, g, t, config.alpha
        );

        let variables = VariableSpace::new(network.dims(), network.container_bound());
        let objective = objective::build(network, &variables, config.alpha)?;
        let constraints = constraints::generate(network, &variables, &config)?;

        info!(
            "model ready: {} variables, {} constraints",
            variables.len(),
            constraints.len()
        );

        Ok(Model {
            variables,
            objective,
            constraints,
            config,
        })
    }

    pub fn variables(&self) -> &VariableSpace {
        &self.variables
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn config(&self) -> ModelConfig {
        self.config
    }

    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }
}

/// Both model-building stages consume the catalog and the variable space;
/// they must agree on the index-set sizes.
fn check_dims(network: &Network, vars: &VariableSpace) -> Result<(), ModelError> {
    let expected = network.dims().dimensions();
    let actual = vars.dims().dimensions();
    if expected == actual {
        Ok(())
    } else {
        Err(ModelError::InvalidDimension {
            subject: "variable space",
            expected: vec![expected.0, expected.1, expected.2],
            actual: vec![actual.0, actual.1, actual.2],
        })
    }
}
