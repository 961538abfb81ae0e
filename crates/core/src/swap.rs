// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! The swap primitive every router builds on: `swap`, stage bookkeeping
//! (`new_stage`), and `finalize`, which brings a group's centre to its
//! exact target value once the rest of the group is already sorted.

use crate::problem::{CentreState, Problem};

fn admissible(state: CentreState) -> bool {
    matches!(state, CentreState::Free | CentreState::Correct)
}

impl Problem {
    /// Swap the values at nodes `i` and `j`, subject to the current
    /// stage's centre-admissibility rules. Returns whether the swap was
    /// performed; a denied swap is a no-op, not an error — callers that
    /// need a swap to succeed call it inside a loop that retries with a
    /// fresh stage (see [`Problem::route_simple`]).
    pub fn swap(&mut self, i: usize, j: usize) -> bool {
        let gi = self.group(i);
        let gj = self.group(j);
        if !admissible(self.c2use[gi]) || (self.is_centre(j) && !admissible(self.c2use[gj])) {
            return false;
        }

        self.x.swap(i, j);
        if self.is_centre(j) {
            self.nsb += 1;
        }
        self.c2use[gi] = CentreState::BeingUsed;
        self.c2use[gj] = CentreState::BeingUsed;
        self.ns += 1;
        self.set_w();

        if self.is_centre(j) {
            if self.w[[gi, gi]] as usize == self.m + 1 {
                self.c2use[gi] = if self.x[i] == self.target_value_of_centre(gi) {
                    CentreState::Sorted
                } else {
                    CentreState::BeingUsedCorrect
                };
            }
            if self.w[[gj, gj]] as usize == self.m + 1 {
                self.c2use[gj] = if self.x[j] == self.target_value_of_centre(gj) {
                    CentreState::Sorted
                } else {
                    CentreState::BeingUsedCorrect
                };
            }
        }
        true
    }

    /// Begin a new stage: release every centre that isn't mid-finalization,
    /// demote a just-finished `BeingUsedCorrect` centre back to `Correct`,
    /// bump the depth counter, and immediately try to finalize.
    pub fn new_stage(&mut self) {
        for gj in 0..self.k {
            match self.c2use[gj] {
                CentreState::Free | CentreState::BeingUsed => {
                    self.c2use[gj] = CentreState::Free;
                }
                CentreState::BeingUsedCorrect => {
                    self.c2use[gj] = CentreState::Correct;
                }
                CentreState::Correct | CentreState::Sorted => {}
            }
        }
        self.depth += 1;
        self.set_w();
        self.finalize();
    }

    /// For every group whose centre is `Correct` (every value is present
    /// in the group, but the centre itself still holds a leaf's value),
    /// swap the correct value in from a leaf. Returns whether any group
    /// is still not `Sorted`.
    pub fn finalize(&mut self) -> bool {
        let mut busy = false;
        for i in 0..self.k {
            if self.c2use[i] == CentreState::Correct {
                let centre = self.centre_of(i);
                let target = self.target_value_of_centre(i);
                for l in 1..=self.m {
                    if self.x[centre + l] == target {
                        if self.swap(centre, centre + l) {
                            self.c2use[i] = CentreState::Sorted;
                        }
                        break;
                    }
                }
            }
            if self.c2use[i] != CentreState::Sorted {
                busy = true;
            }
        }
        busy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn swap_moves_values_and_counts() {
        let mut p = Problem::new(2, 1, identity(4), identity(4)).unwrap();
        assert!(p.swap(0, 2));
        assert_eq!(p.x(), &[2, 1, 0, 3]);
        assert_eq!(p.ns(), 1);
        assert_eq!(p.nsb(), 1);
    }

    #[test]
    fn swap_denied_when_centre_being_used() {
        let mut p = Problem::new(2, 1, identity(4), identity(4)).unwrap();
        assert!(p.swap(0, 2));
        // Group 0's centre is now `BeingUsed`; a second centre-centre swap
        // this stage is denied.
        assert!(!p.swap(0, 2));
    }

    #[test]
    fn new_stage_frees_centres_for_another_swap() {
        let mut p = Problem::new(2, 1, identity(4), identity(4)).unwrap();
        assert!(p.swap(0, 2));
        p.new_stage();
        assert!(p.swap(0, 2));
        assert_eq!(p.x(), &identity(4)[..]);
    }
}
