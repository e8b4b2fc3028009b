use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::network::{Cost, GoodIndex, PeriodIndex, PortIndex, Volume};

/// A source of parameter values, queried once per table cell when a
/// [`crate::network::Network`] is materialized.
///
/// The model-building core never draws randomness itself. Instances for
/// tests supply fixed values; [`UniformSource`] supplies seeded draws.
pub trait ParameterSource {
    fn per_container_cost(&mut self, i: PortIndex, j: PortIndex, t: PeriodIndex) -> Cost;
    fn fixed_dispatch_cost(&mut self, i: PortIndex, j: PortIndex, t: PeriodIndex) -> Cost;
    fn warehouse_fee(&mut self, i: PortIndex) -> Cost;
    fn tax_rate(&mut self, k: GoodIndex) -> f64;
    fn transit_duty(&mut self, i: PortIndex, j: PortIndex) -> f64;
    fn value(&mut self, k: GoodIndex) -> Cost;
    fn volume(&mut self, k: GoodIndex) -> Volume;
    fn container_capacity(&mut self, i: PortIndex, j: PortIndex) -> Volume;
    fn order_date(&mut self, k: GoodIndex) -> f64;
    fn deadline(&mut self, k: GoodIndex) -> f64;
    fn transit_time(&mut self, i: PortIndex, j: PortIndex, t: PeriodIndex) -> f64;
}

/// Draws every parameter uniformly from its demonstration range, from a
/// seeded generator. Two sources built with the same seed produce identical
/// networks.
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    pub fn seeded(seed: u64) -> UniformSource {
        UniformSource {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ParameterSource for UniformSource {
    fn per_container_cost(&mut self, _: PortIndex, _: PortIndex, _: PeriodIndex) -> Cost {
        self.rng.gen_range(10..100) as Cost
    }

    fn fixed_dispatch_cost(&mut self, _: PortIndex, _: PortIndex, _: PeriodIndex) -> Cost {
        self.rng.gen_range(10..50) as Cost
    }

    fn warehouse_fee(&mut self, _: PortIndex) -> Cost {
        self.rng.gen_range(5..20) as Cost
    }

    fn tax_rate(&mut self, _: GoodIndex) -> f64 {
        self.rng.gen::<f64>()
    }

    fn transit_duty(&mut self, _: PortIndex, _: PortIndex) -> f64 {
        self.rng.gen::<f64>()
    }

    fn value(&mut self, _: GoodIndex) -> Cost {
        self.rng.gen_range(100..1000) as Cost
    }

    fn volume(&mut self, _: GoodIndex) -> Volume {
        self.rng.gen_range(1..10) as Volume
    }

    fn container_capacity(&mut self, _: PortIndex, _: PortIndex) -> Volume {
        self.rng.gen_range(10..100) as Volume
    }

    fn order_date(&mut self, _: GoodIndex) -> f64 {
        self.rng.gen_range(1..5) as f64
    }

    fn deadline(&mut self, _: GoodIndex) -> f64 {
        self.rng.gen_range(20..30) as f64
    }

    fn transit_time(&mut self, _: PortIndex, _: PortIndex, _: PeriodIndex) -> f64 {
        self.rng.gen_range(1..5) as f64
    }
}
