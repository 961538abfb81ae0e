// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! `routeSimple`: a trivial baseline router that sorts groups in order,
//! pulling every value destined for group `i` in from later groups one
//! at a time. It does not use the cycle decomposition at all, so it's a
//! useful correctness and worst-case-cost baseline to compare a
//! decomposition-driven router against.

use log::trace;

use crate::error::CoreResult;
use crate::problem::Problem;

impl Problem {
    /// Make sure the number at the centre of `gi` is destined for group
    /// `gj`, pulling one in from a leaf if necessary. Returns whether a
    /// swap was performed.
    fn set_n(&mut self, gi: usize, gj: usize) -> CoreResult<bool> {
        let i = self.centre_of(gi);
        if self.dest_star(i) == gj {
            return Ok(false);
        }
        for l in 1..=self.m {
            if self.dest_star(i + l) == gj {
                self.swap(i, i + l);
                return Ok(true);
            }
        }
        Err(self.invariant_violation(format!(
            "set_n({gi}, {gj}): W claims an edge to group {gj} but no leaf of group {gi} is destined there"
        )))
    }

    /// Make sure the number at the centre of `gi` is destined to leave the
    /// group, pulling one in from a leaf if necessary. Returns whether a
    /// swap was performed.
    fn set_out(&mut self, gi: usize) -> CoreResult<bool> {
        let i = self.centre_of(gi);
        if self.dest_star(i) != gi {
            return Ok(false);
        }
        for l in 1..=self.m {
            if self.dest_star(i + l) != gi {
                self.swap(i, i + l);
                return Ok(true);
            }
        }
        Err(self.invariant_violation(format!(
            "set_out({gi}): group has an outgoing move but every leaf is destined to stay"
        )))
    }

    /// Sort groups `0, 1, ..., k - 1` in order: for each pair `(gi, gj)`
    /// with `gj > gi` and a pending move from `gj` to `gi`, repeatedly
    /// stage a centre-centre swap between them until `gj` holds nothing
    /// more for `gi`.
    pub fn route_simple(&mut self) -> CoreResult<()> {
        self.reset();

        for gi in 0..self.k {
            let ci = self.centre_of(gi);
            for gj in (gi + 1)..self.k {
                if self.w[[gj, gi]] == 0 {
                    continue;
                }
                let cj = self.centre_of(gj);
                trace!("route_simple: draining group {gj} into group {gi}");

                self.new_stage();
                let si = self.set_out(gi)?;
                let sj = self.set_n(gj, gi)?;
                if si || sj {
                    self.new_stage();
                }
                self.swap(ci, cj);

                while self.w[[gj, gi]] > 0 {
                    self.new_stage();
                    self.set_out(gi)?;
                    self.set_n(gj, gi)?;
                    self.new_stage();
                    self.swap(ci, cj);
                }
            }
        }

        self.new_stage();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn route_simple_sorts_identity_with_no_swaps() {
        let mut p = Problem::new(3, 2, identity(9), identity(9)).unwrap();
        p.route_simple().unwrap();
        assert_eq!(p.x(), &identity(9)[..]);
        assert_eq!(p.ns(), 0);
    }

    #[test]
    fn route_simple_sorts_a_3cycle() {
        let mut x = identity(6);
        x[0] = 2;
        x[2] = 4;
        x[4] = 0;
        let mut p = Problem::new(3, 1, x, identity(6)).unwrap();
        p.route_simple().unwrap();
        assert_eq!(p.x(), &identity(6)[..]);
    }

    #[test]
    fn route_simple_sorts_a_scrambled_instance() {
        let x = vec![5, 1, 2, 0, 7, 8, 3, 4, 6];
        let mut p = Problem::new(3, 2, x, identity(9)).unwrap();
        p.route_simple().unwrap();
        assert_eq!(p.x(), &identity(9)[..]);
    }

    #[test]
    fn route_simple_respects_a_nonidentity_target() {
        let y = vec![8, 7, 6, 5, 4, 3, 2, 1, 0];
        let x = identity(9);
        let mut p = Problem::new(3, 2, x, y.clone()).unwrap();
        p.route_simple().unwrap();
        // Every value should be in the group that owns it under y.
        for node in 0..9 {
            let value = p.x()[node];
            let home = y.iter().position(|&v| v == value).unwrap();
            assert_eq!(p.group(node), p.group(home));
        }
    }
}
