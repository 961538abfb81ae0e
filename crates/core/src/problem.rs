// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

use ndarray::Array2;

use crate::error::{CoreError, CoreResult};

/// Per-centre admissibility state, tracked across a stage.
///
/// Replaces the original C source's bit-packed `char c2use[k]` (four
/// orthogonal bits folded into one byte) with an algebraic data type, so
/// that [`Problem::swap`]'s admissibility test reads as a plain match
/// instead of a bitmask comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CentreState {
    /// Any swap involving this centre is permitted.
    Free,
    /// A swap touching this centre already happened this stage.
    BeingUsed,
    /// The group's values are all present, but the centre still holds a
    /// leaf's value; one more centre-leaf swap finalizes it.
    Correct,
    /// As `Correct`, but set during the very swap that created the
    /// condition (so it still counts as "used" for this stage).
    BeingUsedCorrect,
    /// The group is fully sorted and will not be touched again.
    Sorted,
}

/// A single instance of the qubit-routing problem on a `k`-centre,
/// `m`-leaf-per-centre star graph.
///
/// Owns every array the decomposition and routing routines operate on:
/// the immutable initial state `x0`, the mutable working state `x`, the
/// target permutation `y` (plus its precomputed inverse), the move
/// matrices `W`/`Wc`, the per-centre state, the round counters, and the
/// scratch buffers reused by the BFS/backtracking routines in
/// [`crate::cycles`] and [`crate::remover`]. There is no module-level or
/// static state anywhere in this crate; every routine takes `&Problem` or
/// `&mut Problem` explicitly.
pub struct Problem {
    pub(crate) k: usize,
    pub(crate) m: usize,
    pub(crate) n: usize,

    pub(crate) x0: Vec<usize>,
    pub(crate) x: Vec<usize>,
    pub(crate) y: Vec<usize>,
    pub(crate) y_inv: Vec<usize>,

    pub(crate) w: Array2<u32>,
    pub(crate) wc: Array2<u32>,

    pub(crate) c2use: Vec<CentreState>,

    pub(crate) depth: u32,
    pub(crate) ns: u32,
    pub(crate) nsb: u32,

    // Scratch space reused across calls to the BFS/backtracking routines,
    // so that a decomposition run over a large instance doesn't allocate
    // on every cycle search. Each routine resets the slice it uses before
    // reading it.
    pub(crate) ndist: Vec<u32>,
    pub(crate) path_counts: Vec<u32>,
    pub(crate) cycle_scratch: Vec<usize>,
}

impl Problem {
    /// Build a new problem from a 0-based initial state `x0` and target
    /// permutation `y`, both of length `k * (m + 1)`.
    pub fn new(k: usize, m: usize, x0: Vec<usize>, y: Vec<usize>) -> CoreResult<Self> {
        let n = k * (m + 1);
        validate_permutation(&x0, n, "x0")?;
        validate_permutation(&y, n, "y")?;

        let mut y_inv = Vec::new();
        y_inv
            .try_reserve_exact(n)
            .map_err(|_| CoreError::AllocFailure { what: "y_inv", n })?;
        y_inv.resize(n, 0);
        for (node, &value) in y.iter().enumerate() {
            y_inv[value] = node;
        }

        let mut problem = Problem {
            k,
            m,
            n,
            x: x0.clone(),
            x0,
            y,
            y_inv,
            w: Array2::zeros((k, k)),
            wc: Array2::zeros((k, k)),
            c2use: vec![CentreState::Free; k],
            depth: 0,
            ns: 0,
            nsb: 0,
            ndist: vec![0; k],
            path_counts: vec![0; k],
            cycle_scratch: vec![0; k + 1],
        };
        problem.reset();
        Ok(problem)
    }

    /// Restore `x` to `x0`, clear the round counters and centre states,
    /// and rebuild `W`/`Wc`. Equivalent to the original `newRound()`.
    pub fn reset(&mut self) {
        self.x.copy_from_slice(&self.x0);
        self.depth = 0;
        self.ns = 0;
        self.nsb = 0;
        self.c2use.fill(CentreState::Free);
        self.set_w();
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn m(&self) -> usize {
        self.m
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn ns(&self) -> u32 {
        self.ns
    }

    pub fn nsb(&self) -> u32 {
        self.nsb
    }

    pub fn x(&self) -> &[usize] {
        &self.x
    }

    pub fn x0(&self) -> &[usize] {
        &self.x0
    }

    pub fn w(&self) -> &Array2<u32> {
        &self.w
    }

    pub fn wc(&self) -> &Array2<u32> {
        &self.wc
    }

    pub fn centre_state(&self, group: usize) -> CentreState {
        self.c2use[group]
    }

    /// Group index `g(j)` that node `j` belongs to.
    pub fn group(&self, node: usize) -> usize {
        node / (self.m + 1)
    }

    /// Whether `node` is the centre of its group.
    pub fn is_centre(&self, node: usize) -> bool {
        node % (self.m + 1) == 0
    }

    /// The centre node of group `g`.
    pub fn centre_of(&self, group: usize) -> usize {
        group * (self.m + 1)
    }

    /// `destStar(j)`: the group that the value currently at node `j` must
    /// end up in.
    pub fn dest_star(&self, node: usize) -> usize {
        self.group(self.y_inv[self.x[node]])
    }

    /// `destIsCentre(j)`: whether the value currently at node `j` is
    /// destined for a centre node specifically (rather than any leaf in
    /// its destination group).
    pub fn dest_is_centre(&self, node: usize) -> bool {
        self.y_inv[self.x[node]] % (self.m + 1) == 0
    }

    /// `getDestStar` restricted to a centre node, returning the target
    /// value that should sit at that centre once its group is sorted.
    pub fn target_value_of_centre(&self, group: usize) -> usize {
        self.y[self.centre_of(group)]
    }

    /// Recompute `W` and `Wc` from the current state `x`. Must be called
    /// after every mutation of `x` and before any cycle routine inspects
    /// the move matrices.
    pub fn set_w(&mut self) {
        self.w.fill(0);
        self.wc.fill(0);
        for j in 0..self.n {
            let gi = self.group(j);
            let di = self.dest_star(j);
            self.w[[gi, di]] += 1;
            if self.dest_is_centre(j) {
                self.wc[[gi, di]] += 1;
            }
        }
    }

    /// `getNmoves`: `n - sum_i W[i][i]`, the number of values not
    /// currently at home.
    pub fn get_nmoves(&self) -> usize {
        let at_home: u32 = (0..self.k).map(|i| self.w[[i, i]]).sum();
        self.n - at_home as usize
    }

    /// Format `W` and `Wc` for inclusion in an [`CoreError`] payload.
    pub(crate) fn dump_matrices(&self) -> String {
        let mut out = String::from("W =\n");
        for i in 0..self.k {
            out.push_str(&format!("{:>3?}\n", self.w.row(i).to_vec()));
        }
        out.push_str("Wc =\n");
        for i in 0..self.k {
            out.push_str(&format!("{:>3?}\n", self.wc.row(i).to_vec()));
        }
        out
    }

    pub(crate) fn invariant_violation(&self, reason: impl Into<String>) -> CoreError {
        CoreError::InvariantViolation {
            reason: reason.into(),
            dump: self.dump_matrices(),
        }
    }
}

fn validate_permutation(vals: &[usize], n: usize, name: &str) -> CoreResult<()> {
    if vals.len() != n {
        return Err(CoreError::BadInput {
            len: vals.len(),
            n,
            reason: format!("{name} has {} entries, expected {n}", vals.len()),
        });
    }
    let mut seen = vec![false; n];
    for &v in vals {
        if v >= n {
            return Err(CoreError::BadInput {
                len: vals.len(),
                n,
                reason: format!("{name} contains value {v} outside 0..{n}"),
            });
        }
        if seen[v] {
            return Err(CoreError::BadInput {
                len: vals.len(),
                n,
                reason: format!("{name} contains duplicate value {v}"),
            });
        }
        seen[v] = true;
    }
    Ok(())
}
