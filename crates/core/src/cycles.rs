// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! BFS/backtracking primitives over the move matrix `W`: shortest-cycle
//! length, shortest-path uniqueness, emptiness, and out-degree. These are
//! the building blocks [`crate::remover`] and [`crate::decomposition`] are
//! built from.

use crate::error::CoreResult;
use crate::problem::Problem;

impl Problem {
    /// `emptyGraph`: true iff every off-diagonal entry of `W` is zero.
    ///
    /// Also checks the capacity invariant `W[i][i'] <= m + 1`, returning
    /// an [`crate::error::CoreError::InvariantViolation`] instead of the
    /// original's `printW(); getchar();` trap.
    pub fn empty_graph(&self) -> CoreResult<bool> {
        let cap = (self.m + 1) as u32;
        for i in 0..self.k {
            for j in 0..self.k {
                let value = self.w[[i, j]];
                if value > cap {
                    return Err(self.invariant_violation(format!(
                        "W[{i}][{j}] = {value} exceeds capacity m + 1 = {cap}"
                    )));
                }
            }
        }
        for i in 0..self.k {
            for j in 0..self.k {
                if i != j && self.w[[i, j]] > 0 {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// `getEDegOut`: number of groups `i' != g` with a positive edge
    /// `W[g][i']`.
    pub fn edeg_out(&self, g: usize) -> usize {
        (0..self.k)
            .filter(|&i| i != g && self.w[[g, i]] > 0)
            .count()
    }

    /// `getMinCycleLen`: length of a shortest directed cycle in `W`
    /// (self-loops ignored). Behavior is undefined if `W` has no cycle at
    /// all; callers must check [`Problem::empty_graph`] first.
    pub fn get_min_cycle_len(&mut self) -> CoreResult<usize> {
        let k = self.k;
        let mut lmin = usize::MAX;
        for gs in 0..k {
            self.ndist.iter_mut().for_each(|d| *d = 0);
            let mut len = 0usize;
            let mut stop = false;
            let mut closed = false;
            let mut iterations = 0usize;
            while !stop {
                iterations += 1;
                if iterations > k * k + k {
                    return Err(self.invariant_violation(format!(
                        "get_min_cycle_len walked more than {} steps from centre {gs}",
                        k * k + k
                    )));
                }
                if len == 0 {
                    let gi = gs;
                    let mut edges_out = false;
                    for gj in 0..k {
                        if gj == gi || self.w[[gi, gj]] == 0 || self.ndist[gj] != 0 {
                            continue;
                        }
                        edges_out = true;
                        self.ndist[gj] = 1;
                    }
                    if !edges_out {
                        stop = true;
                    }
                } else {
                    let frontier: Vec<usize> =
                        (0..k).filter(|&gi| self.ndist[gi] as usize == len).collect();
                    'frontier: for gi in frontier {
                        for gj in 0..k {
                            if gj == gi || self.w[[gi, gj]] == 0 || self.ndist[gj] != 0 {
                                continue;
                            }
                            if gj == gs {
                                if len + 1 < lmin {
                                    lmin = len + 1;
                                }
                                closed = true;
                                break 'frontier;
                            }
                            self.ndist[gj] = (len + 1) as u32;
                        }
                    }
                    if closed {
                        stop = true;
                    }
                }
                len += 1;
            }
        }
        Ok(lmin)
    }

    /// `wShortestPaths`: length of the shortest path `pi -> pj`, or `None`
    /// if more than `W[pj][pi]` such shortest paths exist (the path is
    /// not "uniquely forced"). Leaves a witness cycle in
    /// `self.cycle_scratch[0..=len]`.
    pub fn w_shortest_paths(&mut self, pi: usize, pj: usize) -> CoreResult<Option<usize>> {
        let k = self.k;
        self.ndist.iter_mut().for_each(|d| *d = 0);
        self.path_counts.iter_mut().for_each(|d| *d = 0);

        let mut len = 0usize;
        while self.path_counts[pj] == 0 {
            if len == 0 {
                let p1 = pi;
                self.path_counts[p1] = self.w[[pj, p1]];
                for p2 in 0..k {
                    if p2 == p1 || self.w[[p1, p2]] == 0 {
                        continue;
                    }
                    let delta = self.path_counts[p1].min(self.w[[p1, p2]]);
                    if p2 == pj {
                        self.path_counts[p2] += delta;
                    } else if self.ndist[p2] == 0 {
                        self.path_counts[p2] += delta;
                        self.ndist[p2] = 1;
                    }
                }
            } else {
                let frontier: Vec<usize> =
                    (0..k).filter(|&p1| self.ndist[p1] as usize == len).collect();
                for p1 in frontier {
                    for p2 in 0..k {
                        if p2 == p1 || self.w[[p1, p2]] == 0 {
                            continue;
                        }
                        let delta = self.path_counts[p1].min(self.w[[p1, p2]]);
                        if p2 == pj {
                            self.path_counts[p2] += delta;
                        } else if self.ndist[p2] == 0 || self.ndist[p2] as usize == len + 1 {
                            self.path_counts[p2] += delta;
                            self.ndist[p2] = (len + 1) as u32;
                        }
                    }
                }
            }
            if len >= self.n {
                return Err(self.invariant_violation(format!(
                    "w_shortest_paths({pi}, {pj}) walked length {len} >= n = {}",
                    self.n
                )));
            }
            len += 1;
        }

        // Backtrack a shortest pi -> pj path into cycle_scratch.
        self.cycle_scratch.iter_mut().for_each(|c| *c = usize::MAX);
        self.cycle_scratch[0] = pi;
        self.cycle_scratch[len] = pj;
        let mut p2 = pj;
        let plen = len;
        let mut backtrack_len = len;
        if backtrack_len > 0 {
            backtrack_len -= 1;
        }
        let mut p1 = 0usize;
        while backtrack_len > 0 && p1 < k && self.cycle_scratch[backtrack_len] == usize::MAX {
            if p1 != p2 && self.w[[p1, p2]] > 0 && self.ndist[p1] as usize == backtrack_len {
                self.cycle_scratch[backtrack_len] = p1;
                p2 = p1;
                backtrack_len -= 1;
                p1 = 0;
            } else {
                p1 += 1;
            }
        }

        if self.path_counts[pj] <= self.path_counts[pi] {
            Ok(Some(plen))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn empty_graph_true_for_identity() {
        let p = Problem::new(3, 1, identity(6), identity(6)).unwrap();
        assert!(p.empty_graph().unwrap());
    }

    #[test]
    fn min_cycle_len_of_a_3cycle() {
        // k=3, m=1: centres at nodes 0, 2, 4; leaves at 1, 3, 5.
        // x[0]=2, x[2]=4, x[4]=0 rotates the three centre values in a
        // 3-cycle over groups 0 -> 1 -> 2 -> 0.
        let mut x = identity(6);
        x[0] = 2;
        x[2] = 4;
        x[4] = 0;
        let mut p = Problem::new(3, 1, x, identity(6)).unwrap();
        assert!(!p.empty_graph().unwrap());
        assert_eq!(p.get_min_cycle_len().unwrap(), 3);
    }
}
