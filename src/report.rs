use std::fmt;

use float_ord::FloatOrd;
use itertools::iproduct;
use log::warn;
use serde::Serialize;

use crate::error::ModelError;
use crate::model::Model;
use crate::network::{GoodIndex, Network, PeriodIndex, PortIndex};
use crate::solve::Assignment;

/// One routed good, read back from a solved assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shipment {
    pub good: GoodIndex,
    pub origin: PortIndex,
    pub destination: PortIndex,
    pub departure: PeriodIndex,
    /// Departure period plus transit duration of the chosen route.
    pub arrival: f64,
}

/// The reported outcome of a solve.
///
/// The weighted figures split the realized objective by the trade-off
/// weights; the unscaled cost and time totals are evaluated separately from
/// the objective parts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub alpha: f64,
    pub weighted_cost: f64,
    pub weighted_time: f64,
    pub objective_value: f64,
    pub total_cost: f64,
    pub total_delivery_time: f64,
    pub shipments: Vec<Shipment>,
}

impl Report {
    /// Extracts the reported scalars and the chosen routing from a completed
    /// assignment. Warns about goods whose arrival exceeds their deadline.
    pub fn new(
        network: &Network,
        model: &Model,
        assignment: &Assignment,
    ) -> Result<Report, ModelError> {
        let alpha = model.alpha();
        let objective_value = assignment.objective_value();

        let (ports, goods, periods) = network.dims().dimensions();
        let vars = model.variables();

        let mut shipments = Vec::with_capacity(goods);
        for (k, i, j, t) in iproduct!(0..goods, 0..ports, 0..ports, 0..periods) {
            if assignment.value(vars.x(i, j, t, k)?)? < 0.5 {
                continue;
            }

            let arrival = t as f64 + network.transit_time(i, j, t)?;
            let deadline = network.deadline(k)?;
            if arrival > deadline {
                warn!(
                    "good {} arrives in period {} but its deadline is {}",
                    k, arrival, deadline
                );
            }

            shipments.push(Shipment {
                good: k,
                origin: i,
                destination: j,
                departure: t,
                arrival,
            });
        }

        Ok(Report {
            alpha,
            weighted_cost: alpha * objective_value,
            weighted_time: (1.0 - alpha) * objective_value,
            objective_value,
            total_cost: assignment.eval(&model.objective().total_cost)?,
            total_delivery_time: assignment.eval(&model.objective().delivery_time)?,
            shipments,
        })
    }

    /// The latest arrival period over all routed goods.
    pub fn latest_arrival(&self) -> Option<f64> {
        self.shipments
            .iter()
            .map(|s| FloatOrd(s.arrival))
            .max()
            .map(|FloatOrd(arrival)| arrival)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Multi-Objective Optimization Results")?;
        writeln!(f, "------------------------------------")?;
        writeln!(
            f,
            "Alpha (Trade-off factor between cost and time): {}",
            self.alpha
        )?;
        writeln!(f, "Total Cost (weighted): {:.2}", self.weighted_cost)?;
        writeln!(f, "Total Delivery Time (weighted): {:.2}", self.weighted_time)?;
        writeln!(f, "Objective Value: {:.2}", self.objective_value)?;

        if !self.shipments.is_empty() {
            writeln!(f)?;
            for s in &self.shipments {
                writeln!(
                    f,
                    "good {}: {} -> {}, departs {}, arrives {}",
                    s.good, s.origin, s.destination, s.departure, s.arrival
                )?;
            }
        }
        if let Some(arrival) = self.latest_arrival() {
            writeln!(f, "Latest arrival: {arrival}")?;
        }

        Ok(())
    }
}
