use itertools::iproduct;
use log::debug;

use crate::error::ModelError;
use crate::network::Network;

use super::variables::VariableSpace;
use super::expr::LinExpr;

/// The scalarized objective of a model instance, together with its unscaled
/// parts so a solved assignment can be decomposed for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct Objective {
    /// `alpha * total_cost + (1 - alpha) * delivery_time`, to be minimized.
    pub expr: LinExpr,
    /// Total monetary cost: transport plus warehouse plus tax/duty.
    pub total_cost: LinExpr,
    /// Summed departure period plus transit duration over every assigned
    /// shipment.
    pub delivery_time: LinExpr,
    /// The cost/time trade-off weight the scalarization used.
    pub alpha: f64,
}

/// Builds the weighted objective from the catalog and variable space.
///
/// `alpha = 1` degenerates to pure cost minimization and `alpha = 0` to pure
/// delivery-time minimization; both stay well-formed since the weight only
/// ever scales the two parts.
pub fn build(
    network: &Network,
    vars: &VariableSpace,
    alpha: f64,
) -> Result<Objective, ModelError> {
    if !(0.0..=1.0).contains(&alpha) {
        return Err(ModelError::InvalidAlpha(alpha));
    }
    super::check_dims(network, vars)?;

    let (ports, goods, periods) = network.dims().dimensions();

    // Per-container and fixed dispatch charges over every route/period.
    let mut transport_cost = LinExpr::default();
    for (i, j, t) in iproduct!(0..ports, 0..ports, 0..periods) {
        transport_cost.add_term(vars.y(i, j, t)?, network.per_container_cost(i, j, t)?);
        transport_cost.add_term(vars.z(i, j, t)?, network.fixed_dispatch_cost(i, j, t)?);
    }

    // Warehouse fees accrue per port regardless of the routing decisions,
    // a known modeling simplification: actual warehousing is under- or
    // overcounted whenever a port goes unused.
    let mut warehouse_cost = LinExpr::default();
    for i in 0..ports {
        warehouse_cost.add_constant(network.warehouse_fee(i)?);
    }

    // Flat value tax per good, plus route-dependent transit duty on the
    // value of whatever ships across each pair.
    let mut tax_cost = LinExpr::default();
    for k in 0..goods {
        tax_cost.add_constant(network.tax_rate(k)? * network.value(k)?);
    }
    for (i, j, t, k) in iproduct!(0..ports, 0..ports, 0..periods, 0..goods) {
        tax_cost.add_term(
            vars.x(i, j, t, k)?,
            network.transit_duty(i, j)? * network.value(k)?,
        );
    }

    let total_cost = transport_cost + warehouse_cost + tax_cost;

    // Each assigned shipment contributes its departure period plus the
    // transit duration of the chosen route.
    let mut delivery_time = LinExpr::default();
    for (i, j, t, k) in iproduct!(0..ports, 0..ports, 0..periods, 0..goods) {
        delivery_time.add_term(
            vars.x(i, j, t, k)?,
            t as f64 + network.transit_time(i, j, t)?,
        );
    }

    let expr = total_cost.clone() * alpha + delivery_time.clone() * (1.0 - alpha);

    debug!(
        "objective built: {} terms, constant {}",
        expr.terms().len(),
        expr.constant()
    );

    Ok(Objective {
        expr,
        total_cost,
        delivery_time,
        alpha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::tests::ConstantSource;
    use crate::network::Dims;

    fn tiny() -> (Network, VariableSpace) {
        let network =
            Network::from_source(Dims::new(1, 1, 1), &mut ConstantSource::default()).unwrap();
        let vars = VariableSpace::new(network.dims(), network.container_bound());
        (network, vars)
    }

    #[test]
    fn rejects_alpha_outside_unit_interval() {
        let (network, vars) = tiny();
        assert_eq!(
            build(&network, &vars, 1.5).unwrap_err(),
            ModelError::InvalidAlpha(1.5)
        );
        assert_eq!(
            build(&network, &vars, -0.1).unwrap_err(),
            ModelError::InvalidAlpha(-0.1)
        );
    }

    #[test]
    fn boundary_weights_stay_well_formed() {
        let (network, vars) = tiny();

        // alpha = 1: pure cost. The constant is warehouse fee + flat tax.
        let cost_only = build(&network, &vars, 1.0).unwrap();
        assert_eq!(cost_only.expr.constant(), 7.0 + 0.1 * 100.0);

        // alpha = 0: pure time. Every cost coefficient is scaled away.
        let time_only = build(&network, &vars, 0.0).unwrap();
        assert_eq!(time_only.expr.constant(), 0.0);
        let x = vars.x(0, 0, 0, 0).unwrap();
        let time_coef: f64 = time_only
            .expr
            .terms()
            .iter()
            .filter(|(v, _)| *v == x)
            .map(|(_, c)| c)
            .sum();
        // departure period 0 plus transit time 1
        assert_eq!(time_coef, 1.0);
    }

    #[test]
    fn coefficients_follow_the_catalog() {
        let (network, vars) = tiny();
        let objective = build(&network, &vars, 0.5).unwrap();

        let x = vars.x(0, 0, 0, 0).unwrap();
        let y = vars.y(0, 0, 0).unwrap();
        let z = vars.z(0, 0, 0).unwrap();

        let coef = |expr: &LinExpr, var| -> f64 {
            expr.terms()
                .iter()
                .filter(|(v, _)| *v == var)
                .map(|(_, c)| c)
                .sum()
        };

        // unscaled parts
        assert_eq!(coef(&objective.total_cost, y), 10.0);
        assert_eq!(coef(&objective.total_cost, z), 5.0);
        assert_eq!(coef(&objective.total_cost, x), 0.05 * 100.0);
        assert_eq!(coef(&objective.delivery_time, x), 1.0);

        // scalarization folds both contributions of x together
        let expected = 0.5 * (0.05 * 100.0) + 0.5 * 1.0;
        assert!((coef(&objective.expr, x) - expected).abs() < 1e-12);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let (network, _) = tiny();
        let vars = VariableSpace::new(Dims::new(2, 1, 1), 4.0);
        assert!(matches!(
            build(&network, &vars, 0.5).unwrap_err(),
            ModelError::InvalidDimension { .. }
        ));
    }
}
