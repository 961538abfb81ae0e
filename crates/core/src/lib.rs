// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Core routing algorithms for permutation routing on a fully-connected
//! star graph of `k` centres with `m` leaves each.
//!
//! A [`Problem`] owns the instance state (`x0`, the working state `x`,
//! the target `y`) and the move matrices `W`/`Wc` derived from it. The
//! rest of the crate is `impl Problem` blocks, grouped by concern:
//!
//! - [`cycles`]: BFS primitives over `W` (emptiness, shortest cycle
//!   length, shortest-path uniqueness).
//! - [`remover`]: cycle removal (2-cycles, conditional single-cycle
//!   removal, bulk exact-length removal).
//! - [`rules`]: the two graph rewrite rules that fold degree-1 centres.
//! - [`decomposition`]: `get_decomp`, the driver that combines the above
//!   into a lower bound on expensive swaps.
//! - [`swap`]: the swap primitive and stage/finalize bookkeeping every
//!   router is built from.
//! - [`router`]: `route_simple`, a baseline constructive router.

pub mod cycles;
pub mod decomposition;
pub mod error;
pub mod problem;
pub mod remover;
pub mod router;
pub mod rules;
pub mod swap;

pub use error::{CoreError, CoreResult};
pub use problem::{CentreState, Problem};
pub use remover::DelCondition;
