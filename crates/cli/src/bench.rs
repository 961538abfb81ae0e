// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Benchmark mode: run `repeat` random instances through both
//! [`star_route_core::Problem::route_simple`] and
//! `get_decomp`, and report averaged statistics comparing the two —
//! the trivial baseline against the lower bound a cycle-decomposition
//! router could achieve.

use std::time::Instant;

use log::info;
use rand::Rng;
use star_route_core::{CoreResult, Problem};

use crate::instance::Instance;

#[derive(Debug, Default)]
struct Totals {
    depth: u64,
    swaps: u64,
    expensive_swaps: u64,
    millis: u128,
}

/// Averaged statistics from one arm of the comparison (trivial router or
/// the decomposition lower bound), over `repeat` instances.
#[derive(Debug)]
pub struct ArmStats {
    pub avg_depth: f64,
    pub avg_cheap_swaps: f64,
    pub avg_expensive_swaps: f64,
    pub avg_millis: f64,
}

impl Totals {
    fn finish(&self, repeat: u32) -> ArmStats {
        let repeat = repeat as f64;
        ArmStats {
            avg_depth: self.depth as f64 / repeat,
            avg_cheap_swaps: (self.swaps - self.expensive_swaps) as f64 / repeat,
            avg_expensive_swaps: self.expensive_swaps as f64 / repeat,
            avg_millis: self.millis as f64 / repeat,
        }
    }
}

/// Result of a full benchmark run: trivial-router stats, decomposition
/// lower-bound stats, and the total number of misplaced values observed
/// across all instances (`sum of get_nmoves()` before routing).
#[derive(Debug)]
pub struct BenchReport {
    pub repeat: u32,
    pub trivial: ArmStats,
    pub decomposed_lower_bound: ArmStats,
    pub total_moves: u64,
}

/// Run `repeat` random `k`-centre, `m`-leaf instances through both the
/// trivial router and the decomposition lower bound.
pub fn run(k: usize, m: usize, repeat: u32, rng: &mut impl Rng) -> CoreResult<BenchReport> {
    let mut trivial = Totals::default();
    let mut decomposed = Totals::default();
    let mut total_moves = 0u64;

    for round in 0..repeat {
        let instance = Instance::random(k, m, rng);
        let y = instance.identity_y();

        let mut p = Problem::new(k, m, instance.x0.clone(), y.clone())?;
        let start = Instant::now();
        p.route_simple()?;
        trivial.millis += start.elapsed().as_millis();
        trivial.depth += p.depth() as u64;
        trivial.swaps += p.ns() as u64;
        trivial.expensive_swaps += p.nsb() as u64;

        let mut p = Problem::new(k, m, instance.x0, y)?;
        total_moves += p.get_nmoves() as u64;
        let start = Instant::now();
        let beta = p.get_decomp()?;
        decomposed.millis += start.elapsed().as_millis();
        decomposed.expensive_swaps += beta as u64;

        if round % 50 == 0 {
            info!("bench: completed round {round}/{repeat}");
        }
    }

    Ok(BenchReport {
        repeat,
        trivial: trivial.finish(repeat),
        decomposed_lower_bound: decomposed.finish(repeat),
        total_moves,
    })
}

impl std::fmt::Display for BenchReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AVG over {}\tSimple\tLower bound", self.repeat)?;
        writeln!(
            f,
            "d\t{:.1}\t{:.1}",
            self.trivial.avg_depth, self.decomposed_lower_bound.avg_depth
        )?;
        writeln!(
            f,
            "#s(a)\t{:.1}\t-",
            self.trivial.avg_cheap_swaps
        )?;
        writeln!(
            f,
            "#s(b)\t{:.1}\t{:.1}",
            self.trivial.avg_expensive_swaps, self.decomposed_lower_bound.avg_expensive_swaps
        )?;
        writeln!(
            f,
            "time\t{:.2}\t{:.2}",
            self.trivial.avg_millis, self.decomposed_lower_bound.avg_millis
        )?;
        write!(
            f,
            "moves\t{:.1}",
            self.total_moves as f64 / self.repeat as f64
        )
    }
}
