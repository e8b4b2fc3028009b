use ndarray::{Array1, Array2, Array3};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::generate::ParameterSource;

/// The type used for monetary amounts
pub type Cost = f64;
/// The type used for cargo volume
pub type Volume = f64;

pub type PortIndex = usize;
pub type GoodIndex = usize;
pub type PeriodIndex = usize;

/// Sizes of the three finite index sets a model instance is built over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dims {
    /// Number of ports (origin/destination nodes)
    pub ports: usize,
    /// Number of goods to route
    pub goods: usize,
    /// Number of discrete shipment periods
    pub periods: usize,
}

impl Dims {
    pub fn new(ports: usize, goods: usize, periods: usize) -> Dims {
        Dims {
            ports,
            goods,
            periods,
        }
    }

    /// The index-set sizes as a `(ports, goods, periods)` triple.
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.ports, self.goods, self.periods)
    }
}

/// The parameter tables of a network instance, prior to validation.
///
/// This is the raw payload accepted by [`Network::new`]. Tables are indexed
/// `(origin, destination, period)` for route/period data, `(origin,
/// destination)` for route data, and by port or good index for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tables {
    pub per_container_cost: Array3<Cost>,
    pub fixed_dispatch_cost: Array3<Cost>,
    pub warehouse_fee: Array1<Cost>,
    pub tax_rate: Array1<f64>,
    pub transit_duty: Array2<f64>,
    pub value: Array1<Cost>,
    pub volume: Array1<Volume>,
    pub container_capacity: Array2<Volume>,
    pub order_date: Array1<f64>,
    pub deadline: Array1<f64>,
    pub transit_time: Array3<f64>,
}

/// The transport network and its immutable parameter catalog.
///
/// Holds the finite index-set sizes and every numeric parameter table of an
/// instance. Generated or loaded once, never mutated afterwards. All
/// accessors take raw indices and fail with
/// [`ModelError::IndexOutOfRange`] rather than clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    dims: Dims,
    tables: Tables,
}

impl Network {
    /// Validates every table's shape against `dims` and constructs the
    /// catalog. Fails with [`ModelError::InvalidDimension`] naming the first
    /// offending table.
    pub fn new(dims: Dims, tables: Tables) -> Result<Network, ModelError> {
        let (p, g, t) = dims.dimensions();

        let check = |subject: &'static str, expected: Vec<usize>, actual: Vec<usize>| {
            if expected == actual {
                Ok(())
            } else {
                Err(ModelError::InvalidDimension {
                    subject,
                    expected,
                    actual,
                })
            }
        };

        let dim3 = |a: &Array3<f64>| {
            let (x, y, z) = a.dim();
            vec![x, y, z]
        };
        let dim2 = |a: &Array2<f64>| {
            let (x, y) = a.dim();
            vec![x, y]
        };

        check(
            "per_container_cost",
            vec![p, p, t],
            dim3(&tables.per_container_cost),
        )?;
        check(
            "fixed_dispatch_cost",
            vec![p, p, t],
            dim3(&tables.fixed_dispatch_cost),
        )?;
        check("warehouse_fee", vec![p], vec![tables.warehouse_fee.len()])?;
        check("tax_rate", vec![g], vec![tables.tax_rate.len()])?;
        check("transit_duty", vec![p, p], dim2(&tables.transit_duty))?;
        check("value", vec![g], vec![tables.value.len()])?;
        check("volume", vec![g], vec![tables.volume.len()])?;
        check(
            "container_capacity",
            vec![p, p],
            dim2(&tables.container_capacity),
        )?;
        check("order_date", vec![g], vec![tables.order_date.len()])?;
        check("deadline", vec![g], vec![tables.deadline.len()])?;
        check("transit_time", vec![p, p, t], dim3(&tables.transit_time))?;

        Ok(Network { dims, tables })
    }

    /// Materializes a catalog by querying `source` for every cell, in a fixed
    /// table-by-table, row-major order.
    pub fn from_source<S: ParameterSource>(dims: Dims, source: &mut S) -> Result<Network, ModelError> {
        let (p, g, t) = dims.dimensions();

        let tables = Tables {
            per_container_cost: Array3::from_shape_fn((p, p, t), |(i, j, s)| {
                source.per_container_cost(i, j, s)
            }),
            fixed_dispatch_cost: Array3::from_shape_fn((p, p, t), |(i, j, s)| {
                source.fixed_dispatch_cost(i, j, s)
            }),
            warehouse_fee: Array1::from_shape_fn(p, |i| source.warehouse_fee(i)),
            tax_rate: Array1::from_shape_fn(g, |k| source.tax_rate(k)),
            transit_duty: Array2::from_shape_fn((p, p), |(i, j)| source.transit_duty(i, j)),
            value: Array1::from_shape_fn(g, |k| source.value(k)),
            volume: Array1::from_shape_fn(g, |k| source.volume(k)),
            container_capacity: Array2::from_shape_fn((p, p), |(i, j)| {
                source.container_capacity(i, j)
            }),
            order_date: Array1::from_shape_fn(g, |k| source.order_date(k)),
            deadline: Array1::from_shape_fn(g, |k| source.deadline(k)),
            transit_time: Array3::from_shape_fn((p, p, t), |(i, j, s)| source.transit_time(i, j, s)),
        };

        Network::new(dims, tables)
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// The cost of shipping one container from `i` to `j` departing in period `t`.
    pub fn per_container_cost(
        &self,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
    ) -> Result<Cost, ModelError> {
        self.check_route_period("per_container_cost", i, j, t)?;
        Ok(self.tables.per_container_cost[(i, j, t)])
    }

    /// The fixed cost of a dispatch event on `(i, j)` in period `t`.
    pub fn fixed_dispatch_cost(
        &self,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
    ) -> Result<Cost, ModelError> {
        self.check_route_period("fixed_dispatch_cost", i, j, t)?;
        Ok(self.tables.fixed_dispatch_cost[(i, j, t)])
    }

    /// The warehousing fee charged at the given port.
    pub fn warehouse_fee(&self, i: PortIndex) -> Result<Cost, ModelError> {
        self.check("warehouse_fee", "port", i, self.dims.ports)?;
        Ok(self.tables.warehouse_fee[i])
    }

    /// The flat tax rate applied to the value of good `k`.
    pub fn tax_rate(&self, k: GoodIndex) -> Result<f64, ModelError> {
        self.check("tax_rate", "good", k, self.dims.goods)?;
        Ok(self.tables.tax_rate[k])
    }

    /// The duty rate incurred per unit of value transported from `i` to `j`.
    pub fn transit_duty(&self, i: PortIndex, j: PortIndex) -> Result<f64, ModelError> {
        self.check_route("transit_duty", i, j)?;
        Ok(self.tables.transit_duty[(i, j)])
    }

    /// The monetary value of good `k`.
    pub fn value(&self, k: GoodIndex) -> Result<Cost, ModelError> {
        self.check("value", "good", k, self.dims.goods)?;
        Ok(self.tables.value[k])
    }

    /// The volume of good `k`.
    pub fn volume(&self, k: GoodIndex) -> Result<Volume, ModelError> {
        self.check("volume", "good", k, self.dims.goods)?;
        Ok(self.tables.volume[k])
    }

    /// The volume a single container holds on the route from `i` to `j`.
    pub fn container_capacity(&self, i: PortIndex, j: PortIndex) -> Result<Volume, ModelError> {
        self.check_route("container_capacity", i, j)?;
        Ok(self.tables.container_capacity[(i, j)])
    }

    /// The period in which good `k` was ordered.
    pub fn order_date(&self, k: GoodIndex) -> Result<f64, ModelError> {
        self.check("order_date", "good", k, self.dims.goods)?;
        Ok(self.tables.order_date[k])
    }

    /// The period by which good `k` must arrive.
    pub fn deadline(&self, k: GoodIndex) -> Result<f64, ModelError> {
        self.check("deadline", "good", k, self.dims.goods)?;
        Ok(self.tables.deadline[k])
    }

    /// The transit duration, in periods, from `i` to `j` when departing in period `t`.
    pub fn transit_time(
        &self,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
    ) -> Result<f64, ModelError> {
        self.check_route_period("transit_time", i, j, t)?;
        Ok(self.tables.transit_time[(i, j, t)])
    }

    /// An upper bound on the containers any single route/period can need:
    /// with the capacity floor of one volume unit, no triple ever requires
    /// more containers than the summed (ceiled) volume of all goods.
    pub fn container_bound(&self) -> f64 {
        self.tables
            .volume
            .iter()
            .map(|v| v.ceil())
            .sum::<f64>()
            .max(1.0)
    }

    fn check(
        &self,
        subject: &'static str,
        axis: &'static str,
        index: usize,
        bound: usize,
    ) -> Result<(), ModelError> {
        if index < bound {
            Ok(())
        } else {
            Err(ModelError::IndexOutOfRange {
                subject,
                axis,
                index,
                bound,
            })
        }
    }

    fn check_route(
        &self,
        subject: &'static str,
        i: PortIndex,
        j: PortIndex,
    ) -> Result<(), ModelError> {
        self.check(subject, "origin", i, self.dims.ports)?;
        self.check(subject, "destination", j, self.dims.ports)
    }

    fn check_route_period(
        &self,
        subject: &'static str,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
    ) -> Result<(), ModelError> {
        self.check_route(subject, i, j)?;
        self.check(subject, "period", t, self.dims.periods)
    }
}
