//! End-to-end scenarios through the bundled MILP backend.

use itertools::iproduct;

use multimodal_transport::generate::ParameterSource;
use multimodal_transport::model::{Model, ModelConfig};
use multimodal_transport::network::{Dims, Network};
use multimodal_transport::report::Report;
use multimodal_transport::solve::{Assignment, MilpSolver, SolveAdapter};

/// Two ports, one good, two periods. Route 0 -> 1 dominates either way:
/// departing in period 1 is the cheapest option in the whole network, while
/// departing in period 0 is the fastest.
struct TradeOff;

impl ParameterSource for TradeOff {
    fn per_container_cost(&mut self, i: usize, j: usize, t: usize) -> f64 {
        match (i, j, t) {
            (0, 1, 0) => 80.0,
            (0, 1, 1) => 20.0,
            _ => 500.0,
        }
    }
    fn fixed_dispatch_cost(&mut self, _: usize, _: usize, _: usize) -> f64 {
        7.0
    }
    fn warehouse_fee(&mut self, _: usize) -> f64 {
        0.0
    }
    fn tax_rate(&mut self, _: usize) -> f64 {
        0.0
    }
    fn transit_duty(&mut self, _: usize, _: usize) -> f64 {
        0.0
    }
    fn value(&mut self, _: usize) -> f64 {
        100.0
    }
    fn volume(&mut self, _: usize) -> f64 {
        4.0
    }
    fn container_capacity(&mut self, _: usize, _: usize) -> f64 {
        50.0
    }
    fn order_date(&mut self, _: usize) -> f64 {
        0.0
    }
    fn deadline(&mut self, _: usize) -> f64 {
        10.0
    }
    fn transit_time(&mut self, i: usize, j: usize, t: usize) -> f64 {
        match (i, j, t) {
            (0, 1, 0) => 1.0,
            (0, 1, 1) => 4.0,
            _ => 5.0,
        }
    }
}

fn solve_with(network: &Network, config: ModelConfig) -> (Model, Assignment) {
    let model = Model::build(network, config).unwrap();
    let assignment = MilpSolver.solve(&model).unwrap();
    (model, assignment)
}

/// Demand coverage and capacity sufficiency must hold in any returned
/// assignment.
fn assert_invariants(network: &Network, model: &Model, assignment: &Assignment) {
    let (ports, goods, periods) = network.dims().dimensions();
    let vars = model.variables();

    for k in 0..goods {
        let total: f64 = iproduct!(0..ports, 0..ports, 0..periods)
            .map(|(i, j, t)| assignment.value(vars.x(i, j, t, k).unwrap()).unwrap())
            .sum();
        assert!(
            (total - 1.0).abs() < 1e-6,
            "good {k} shipped {total} times"
        );
    }

    for (i, j, t) in iproduct!(0..ports, 0..ports, 0..periods) {
        let assigned: f64 = (0..goods)
            .map(|k| {
                assignment.value(vars.x(i, j, t, k).unwrap()).unwrap()
                    * network.volume(k).unwrap()
            })
            .sum();
        let containers = assignment.value(vars.y(i, j, t).unwrap()).unwrap();
        let capacity = network.container_capacity(i, j).unwrap().max(1.0);
        assert!(
            containers * capacity + 1e-6 >= assigned,
            "route ({i}, {j}) period {t}: {containers} containers for volume {assigned}"
        );
    }
}

#[test]
fn cost_weight_routes_via_the_cheap_period() {
    let network = Network::from_source(Dims::new(2, 1, 2), &mut TradeOff).unwrap();
    let (model, assignment) = solve_with(
        &network,
        ModelConfig {
            alpha: 1.0,
            link_dispatch: false,
        },
    );
    assert_invariants(&network, &model, &assignment);

    let vars = model.variables();
    let chosen = assignment.value(vars.x(0, 1, 1, 0).unwrap()).unwrap();
    assert!((chosen - 1.0).abs() < 1e-6, "expected the 20-cost departure");

    // one container suffices, and nothing forces a dispatch activation
    assert!((assignment.value(vars.y(0, 1, 1).unwrap()).unwrap() - 1.0).abs() < 1e-6);
    assert!(assignment.value(vars.z(0, 1, 1).unwrap()).unwrap() < 1e-6);
    assert!((assignment.objective_value() - 20.0).abs() < 1e-6);
}

#[test]
fn time_weight_routes_via_the_fast_period() {
    let network = Network::from_source(Dims::new(2, 1, 2), &mut TradeOff).unwrap();
    let (model, assignment) = solve_with(
        &network,
        ModelConfig {
            alpha: 0.0,
            link_dispatch: false,
        },
    );
    assert_invariants(&network, &model, &assignment);

    let vars = model.variables();
    let chosen = assignment.value(vars.x(0, 1, 0, 0).unwrap()).unwrap();
    assert!((chosen - 1.0).abs() < 1e-6, "expected the 1-period departure");
    assert!((assignment.objective_value() - 1.0).abs() < 1e-6);
}

#[test]
fn objective_decomposes_into_weighted_cost_and_time() {
    let network = Network::from_source(Dims::new(2, 1, 2), &mut TradeOff).unwrap();
    let (model, assignment) = solve_with(
        &network,
        ModelConfig {
            alpha: 0.6,
            link_dispatch: false,
        },
    );
    assert_invariants(&network, &model, &assignment);

    let report = Report::new(&network, &model, &assignment).unwrap();
    let recombined = 0.6 * report.total_cost + 0.4 * report.total_delivery_time;
    assert!((recombined - assignment.objective_value()).abs() < 1e-6);

    assert_eq!(report.shipments.len(), 1);
    assert_eq!(report.shipments[0].origin, 0);
    assert_eq!(report.shipments[0].destination, 1);
}

#[test]
fn dispatch_link_forces_activation_on_the_used_route() {
    let network = Network::from_source(Dims::new(2, 1, 2), &mut TradeOff).unwrap();
    let (model, assignment) = solve_with(
        &network,
        ModelConfig {
            alpha: 1.0,
            link_dispatch: true,
        },
    );
    assert_invariants(&network, &model, &assignment);

    let vars = model.variables();
    // the good still ships via the cheap departure, but now pays the fixed cost
    assert!((assignment.value(vars.x(0, 1, 1, 0).unwrap()).unwrap() - 1.0).abs() < 1e-6);
    assert!((assignment.value(vars.z(0, 1, 1).unwrap()).unwrap() - 1.0).abs() < 1e-6);
    assert!((assignment.objective_value() - 27.0).abs() < 1e-6);
}

/// A route pair with zero container volume falls back to the unit-volume
/// floor instead of failing.
struct ZeroCapacity;

impl ParameterSource for ZeroCapacity {
    fn per_container_cost(&mut self, _: usize, _: usize, _: usize) -> f64 {
        1.0
    }
    fn fixed_dispatch_cost(&mut self, _: usize, _: usize, _: usize) -> f64 {
        1.0
    }
    fn warehouse_fee(&mut self, _: usize) -> f64 {
        0.0
    }
    fn tax_rate(&mut self, _: usize) -> f64 {
        0.0
    }
    fn transit_duty(&mut self, _: usize, _: usize) -> f64 {
        0.0
    }
    fn value(&mut self, _: usize) -> f64 {
        50.0
    }
    fn volume(&mut self, _: usize) -> f64 {
        3.0
    }
    fn container_capacity(&mut self, _: usize, _: usize) -> f64 {
        0.0
    }
    fn order_date(&mut self, _: usize) -> f64 {
        0.0
    }
    fn deadline(&mut self, _: usize) -> f64 {
        10.0
    }
    fn transit_time(&mut self, _: usize, _: usize, _: usize) -> f64 {
        1.0
    }
}

#[test]
fn zero_capacity_floor_still_solves() {
    let network = Network::from_source(Dims::new(1, 1, 1), &mut ZeroCapacity).unwrap();
    let (model, assignment) = solve_with(
        &network,
        ModelConfig {
            alpha: 1.0,
            link_dispatch: false,
        },
    );
    assert_invariants(&network, &model, &assignment);

    // volume 3 against the floored unit capacity needs three containers
    let y = model.variables().y(0, 0, 0).unwrap();
    assert!((assignment.value(y).unwrap() - 3.0).abs() < 1e-6);
}

#[test]
fn boundary_weights_solve_the_minimal_instance() {
    for alpha in [0.0, 1.0] {
        let network = Network::from_source(Dims::new(1, 1, 1), &mut TradeOff).unwrap();
        let (model, assignment) = solve_with(
            &network,
            ModelConfig {
                alpha,
                link_dispatch: false,
            },
        );
        assert_invariants(&network, &model, &assignment);
        assert!(assignment.objective_value().is_finite());
    }
}
