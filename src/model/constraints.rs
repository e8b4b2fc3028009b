use itertools::iproduct;
use log::debug;

use crate::error::ModelError;
use crate::network::Network;

use super::expr::{Constraint, LinExpr, LinSum};
use super::variables::VariableSpace;
use super::ModelConfig;

/// Emits every constraint the solver must satisfy.
///
/// Deterministic given identical inputs: constraint order and term order
/// only depend on the index-set sizes. Fails with
/// [`ModelError::InvalidDimension`] if the variable space and catalog
/// disagree on dimensions.
pub fn generate(
    network: &Network,
    vars: &VariableSpace,
    config: &ModelConfig,
) -> Result<Vec<Constraint>, ModelError> {
    super::check_dims(network, vars)?;

    let (ports, goods, periods) = network.dims().dimensions();
    let mut constraints = Vec::new();

    // Every good ships on exactly one (origin, destination, period) triple.
    for k in 0..goods {
        let assignments = iproduct!(0..ports, 0..ports, 0..periods)
            .map(|(i, j, t)| vars.x(i, j, t, k))
            .collect::<Result<Vec<_>, _>>()?;

        constraints.push(Constraint::eq(
            format!("demand_{k}"),
            assignments.into_iter().lin_sum(),
            1.0,
        ));
    }

    // Containers dispatched on a route/period must hold the cumulative
    // volume assigned there.
    for (i, j, t) in iproduct!(0..ports, 0..ports, 0..periods) {
        // A zero container volume would make the per-container quotient
        // undefined, so the denominator is floored at one volume unit.
        // This weakens the constraint for such pairs instead of failing;
        // a deliberate approximation, not an error path.
        let denominator = network.container_capacity(i, j)?.max(1.0);

        let mut lhs = LinExpr::from(vars.y(i, j, t)?);
        for k in 0..goods {
            lhs.add_term(vars.x(i, j, t, k)?, -network.volume(k)? / denominator);
        }

        constraints.push(Constraint::ge(format!("capacity_{i}_{j}_{t}"), lhs, 0.0));
    }

    // Optional link between dispatch activation and container counts: a
    // nonzero y forces z to 1 on the same route/period. Off by default,
    // leaving z unconstrained and its fixed cost vacuous under minimization.
    if config.link_dispatch {
        let big_m = vars.container_bound();
        for (i, j, t) in iproduct!(0..ports, 0..ports, 0..periods) {
            let mut lhs = LinExpr::term(vars.z(i, j, t)?, big_m);
            lhs.add_term(vars.y(i, j, t)?, -1.0);

            constraints.push(Constraint::ge(format!("dispatch_link_{i}_{j}_{t}"), lhs, 0.0));
        }
    }

    debug!("generated {} constraints", constraints.len());

    Ok(constraints)
}
