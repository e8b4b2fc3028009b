use std::ops::Range;

use crate::error::ModelError;
use crate::network::{Dims, GoodIndex, PeriodIndex, PortIndex};

use super::expr::{VarDef, VarId, VarKind};

/// Allocates a tensor of decision variables over a tuple of dimensions,
/// registering one [`VarDef`] per cell and returning the nested index
/// structure of handles.
trait AddVars {
    type Out;

    fn vars(
        &self,
        defs: &mut Vec<VarDef>,
        base_name: &str,
        kind: VarKind,
        bounds: &Range<f64>,
    ) -> Self::Out;

    /// Binary variables
    fn binary(&self, defs: &mut Vec<VarDef>, base_name: &str) -> Self::Out {
        self.vars(defs, base_name, VarKind::Binary, &(0.0..1.0))
    }

    /// Non-negative integer variables with the given upper bound
    fn integer(&self, defs: &mut Vec<VarDef>, base_name: &str, upper: f64) -> Self::Out {
        self.vars(defs, base_name, VarKind::Integer, &(0.0..upper))
    }
}

impl AddVars for usize {
    type Out = Vec<VarId>;

    fn vars(
        &self,
        defs: &mut Vec<VarDef>,
        base_name: &str,
        kind: VarKind,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut vec = Vec::with_capacity(*self);
        for i in 0..*self {
            defs.push(VarDef {
                name: format!("{}_{}", base_name, i),
                kind,
                lower: bounds.start,
                upper: bounds.end,
            });
            vec.push(VarId(defs.len() - 1));
        }

        vec
    }
}

impl AddVars for (usize, usize) {
    type Out = Vec<<usize as AddVars>::Out>;

    fn vars(
        &self,
        defs: &mut Vec<VarDef>,
        base_name: &str,
        kind: VarKind,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push(
                self.1
                    .vars(defs, &format!("{}_{}", base_name, i), kind, bounds),
            )
        }

        out
    }
}

impl AddVars for (usize, usize, usize) {
    type Out = Vec<<(usize, usize) as AddVars>::Out>;

    fn vars(
        &self,
        defs: &mut Vec<VarDef>,
        base_name: &str,
        kind: VarKind,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push((self.1, self.2).vars(defs, &format!("{}_{}", base_name, i), kind, bounds))
        }

        out
    }
}

impl AddVars for (usize, usize, usize, usize) {
    type Out = Vec<<(usize, usize, usize) as AddVars>::Out>;

    fn vars(
        &self,
        defs: &mut Vec<VarDef>,
        base_name: &str,
        kind: VarKind,
        bounds: &Range<f64>,
    ) -> Self::Out {
        let mut out = Vec::with_capacity(self.0);
        for i in 0..self.0 {
            out.push((self.1, self.2, self.3).vars(
                defs,
                &format!("{}_{}", base_name, i),
                kind,
                bounds,
            ))
        }

        out
    }
}

/// The three decision-variable families of a model instance, allocated once
/// over their full index ranges.
///
/// * `x[i][j][t][k]` - binary, good `k` ships from `i` to `j` departing in `t`
/// * `y[i][j][t]` - integer, containers dispatched on `(i, j)` in `t`
/// * `z[i][j][t]` - binary, a fixed-cost dispatch event occurs on `(i, j)` in `t`
///
/// Handles are created at construction and never destroyed; only the solver
/// assigns them values.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSpace {
    dims: Dims,
    defs: Vec<VarDef>,
    x: Vec<Vec<Vec<Vec<VarId>>>>,
    y: Vec<Vec<Vec<VarId>>>,
    z: Vec<Vec<Vec<VarId>>>,
    container_bound: f64,
}

impl VariableSpace {
    /// Allocates all three families. `container_bound` caps the integer `y`
    /// variables and doubles as the big-M of the optional dispatch link.
    pub fn new(dims: Dims, container_bound: f64) -> VariableSpace {
        let (p, g, t) = dims.dimensions();

        let mut defs = Vec::with_capacity(p * p * t * g + 2 * p * p * t);
        let x = (p, p, t, g).binary(&mut defs, "x");
        let y = (p, p, t).integer(&mut defs, "y", container_bound);
        let z = (p, p, t).binary(&mut defs, "z");

        VariableSpace {
            dims,
            defs,
            x,
            y,
            z,
            container_bound,
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// Declaration records for every variable, ordered by [`VarId`].
    pub fn defs(&self) -> &[VarDef] {
        &self.defs
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn container_bound(&self) -> f64 {
        self.container_bound
    }

    /// Shipment assignment variable for good `k` on `(i, j)` departing in `t`.
    pub fn x(
        &self,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
        k: GoodIndex,
    ) -> Result<VarId, ModelError> {
        self.check_route_period("x", i, j, t)?;
        self.check("x", "good", k, self.dims.goods)?;
        Ok(self.x[i][j][t][k])
    }

    /// Container count variable for `(i, j)` in period `t`.
    pub fn y(&self, i: PortIndex, j: PortIndex, t: PeriodIndex) -> Result<VarId, ModelError> {
        self.check_route_period("y", i, j, t)?;
        Ok(self.y[i][j][t])
    }

    /// Dispatch activation variable for `(i, j)` in period `t`.
    pub fn z(&self, i: PortIndex, j: PortIndex, t: PeriodIndex) -> Result<VarId, ModelError> {
        self.check_route_period("z", i, j, t)?;
        Ok(self.z[i][j][t])
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

    fn check_route_period(
        &self,
        subject: &'static str,
        i: PortIndex,
        j: PortIndex,
        t: PeriodIndex,
    ) -> Result<(), ModelError> {
        self.check(subject, "origin", i, self.dims.ports)?;
        self.check(subject, "destination", j, self.dims.ports)?;
        self.check(subject, "period", t, self.dims.periods)
    }
}
