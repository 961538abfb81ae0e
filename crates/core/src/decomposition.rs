// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! `getDecomp`: the driver that combines [`crate::cycles`],
//! [`crate::remover`] and [`crate::rules`] into a lower bound `beta` on
//! the number of expensive (centre-centre) swaps any valid routing must
//! perform.

use log::debug;

use crate::error::CoreResult;
use crate::remover::DelCondition;
use crate::problem::Problem;

impl Problem {
    /// Compute `beta`, the minimum number of centre-centre swaps required
    /// to realize the current `x -> y` move matrix. Leaves `W` restored to
    /// its pre-decomposition state (callers that want the decomposed form
    /// should read `Wc`/intermediate state before `reset`-ing).
    pub fn get_decomp(&mut self) -> CoreResult<u32> {
        let k = self.k;
        let mut beta = self.n as u32;
        for pi in 0..k {
            beta -= self.w[[pi, pi]];
        }
        beta -= self.del_2_cycles();
        self.wc.fill(0);

        while !self.empty_graph()? {
            let lmin = self.get_min_cycle_len()?;
            debug!("get_decomp: shortest cycle length {lmin}");
            let mut niter: i32 = 0;

            'niter: loop {
                if !(niter <= 2 && self.get_min_cycle_len()? == lmin) {
                    break 'niter;
                }

                for pi in 0..k {
                    for pj in 0..k {
                        if pj != pi
                            && self.w[[pi, pj]] > 0
                            && self.w_shortest_paths(pj, pi)?.is_some()
                        {
                            self.wc[[pi, pj]] = 1;
                        }
                    }
                }

                let cnt = self.del_cycles(lmin);
                if cnt > 0 {
                    beta -= cnt;
                    niter = -1;
                } else if self.get_min_cycle_len()? != lmin {
                    break 'niter;
                }

                if niter == 1 {
                    if self.rule_b() {
                        break 'niter;
                    }
                    if self.rule_c() {
                        break 'niter;
                    }
                } else if niter == 2 {
                    beta -= self.remove_one_cycle_by_cascade(lmin)?;
                    break 'niter;
                }

                niter += 1;
            }
        }

        self.set_w();
        Ok(beta)
    }

    /// Last-resort single-cycle removal, tried in descending order of
    /// admissibility strength: a uniquely-forced shortest cycle, then a
    /// flow-bounded one, then any shortest cycle at all. Errors only if
    /// the graph is non-empty and none of the three succeed, which would
    /// mean `W` holds a cycle structure the decomposition can't make
    /// progress on.
    fn remove_one_cycle_by_cascade(&mut self, lmin: usize) -> CoreResult<u32> {
        for cond in [
            DelCondition::ShortestUniquePath,
            DelCondition::FlowBounded,
            DelCondition::AnyShortest,
        ] {
            for pi in 0..self.k {
                if self.del_cycle(pi, lmin, cond)? {
                    return Ok(1);
                }
            }
        }
        Err(crate::error::CoreError::NoAdmissibleCycle {
            dump: self.dump_matrices(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn identity_state_has_zero_beta() {
        let mut p = Problem::new(4, 2, identity(12), identity(12)).unwrap();
        assert_eq!(p.get_decomp().unwrap(), 0);
    }

    #[test]
    fn pure_2cycle_needs_one_centre_swap() {
        // Centres 0 and 2 hold each other's target value directly: one
        // centre-centre swap fixes both at once. beta starts at n - diag = 2
        // (two misplaced values) and del_2_cycles credits back 1 for the
        // single swap that clears both directions of the 2-cycle, leaving 1.
        let mut x = identity(4);
        x[0] = 2;
        x[2] = 0;
        let mut p = Problem::new(2, 1, x, identity(4)).unwrap();
        assert_eq!(p.get_decomp().unwrap(), 1);
    }

    #[test]
    fn a_3cycle_needs_two_expensive_swaps() {
        let mut x = identity(6);
        x[0] = 2;
        x[2] = 4;
        x[4] = 0;
        let mut p = Problem::new(3, 1, x, identity(6)).unwrap();
        // A 3-cycle of single moves decomposes into len - 1 transpositions.
        assert_eq!(p.get_decomp().unwrap(), 2);
    }

    #[test]
    fn get_decomp_restores_w_afterward() {
        let mut x = identity(6);
        x[0] = 2;
        x[2] = 4;
        x[4] = 0;
        let mut p = Problem::new(3, 1, x, identity(6)).unwrap();
        let w_before = p.w().clone();
        p.get_decomp().unwrap();
        assert_eq!(p.w(), &w_before);
    }
}
