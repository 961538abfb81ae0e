// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Graph rewrite rules: fold a degree-1 neighbour through a hub centre
//! without changing the cycle structure of `W`.

use crate::problem::Problem;

impl Problem {
    /// Rule B: if centre `pi` has exactly one in-neighbour `pin`, route
    /// every outgoing edge of `pi` directly from `pin` instead, collapsing
    /// the forced `pin -> pi -> pj` detour into `pin -> pj`.
    pub fn rule_b(&mut self) -> bool {
        let k = self.k;
        let mut applied = false;
        for pi in 0..k {
            let mut in_neighbour = None;
            let mut count = 0;
            for pj in 0..k {
                if pj != pi && self.w[[pj, pi]] > 0 {
                    count += 1;
                    in_neighbour = Some(pj);
                }
            }
            let Some(pin) = in_neighbour.filter(|_| count == 1) else {
                continue;
            };
            for pj in 0..k {
                if pj != pi && pj != pin && self.w[[pi, pj]] > 0 {
                    self.w[[pin, pi]] -= 1;
                    self.w[[pi, pj]] -= 1;
                    self.w[[pin, pj]] += 1;
                    applied = true;
                }
            }
        }
        applied
    }

    /// Rule C: if centre `pi` has exactly one out-neighbour `pout`, route
    /// every incoming edge of `pi` directly to `pout` instead, collapsing
    /// `pj -> pi -> pout` into `pj -> pout`.
    pub fn rule_c(&mut self) -> bool {
        let k = self.k;
        let mut applied = false;
        for pi in 0..k {
            let mut out_neighbour = None;
            let mut count = 0;
            for pj in 0..k {
                if pj != pi && self.w[[pi, pj]] > 0 {
                    count += 1;
                    out_neighbour = Some(pj);
                }
            }
            let Some(pout) = out_neighbour.filter(|_| count == 1) else {
                continue;
            };
            for pj in 0..k {
                if pj != pi && pj != pout && self.w[[pj, pi]] > 0 {
                    self.w[[pj, pi]] -= 1;
                    self.w[[pi, pout]] -= 1;
                    self.w[[pj, pout]] += 1;
                    applied = true;
                }
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn rule_b_folds_sole_in_neighbour() {
        // 3 groups: 0 -> 1 -> 2, and 1 -> 1 is the only edge out of 1
        // besides the one we want folded; give 1 a second outgoing edge
        // to 2's sibling so folding is observable.
        let mut p = Problem::new(3, 1, identity(6), identity(6)).unwrap();
        p.w[[0, 1]] = 1;
        p.w[[1, 2]] = 1;
        assert!(p.rule_b());
        assert_eq!(p.w()[[0, 1]], 0);
        assert_eq!(p.w()[[1, 2]], 0);
        assert_eq!(p.w()[[0, 2]], 1);
    }

    #[test]
    fn rule_c_folds_sole_out_neighbour() {
        // pi=1's only outgoing edge is to pout=2; fold the incoming edge
        // from pj=0 directly to 2.
        let mut p = Problem::new(3, 1, identity(6), identity(6)).unwrap();
        p.w[[0, 1]] = 1;
        p.w[[1, 2]] = 1;
        assert!(p.rule_c());
        assert_eq!(p.w()[[0, 1]], 0);
        assert_eq!(p.w()[[1, 2]], 0);
        assert_eq!(p.w()[[0, 2]], 1);
    }

    #[test]
    fn rules_no_op_on_empty_graph() {
        let mut p = Problem::new(3, 1, identity(6), identity(6)).unwrap();
        assert!(!p.rule_b());
        assert!(!p.rule_c());
    }
}
