// This code is part of star-route.
//
// This code is licensed under the Apache License, Version 2.0. You may
// obtain a copy of this license in the LICENSE.txt file in the root directory
// of this source tree or at http://www.apache.org/licenses/LICENSE-2.0.

//! Cross-cutting invariant and bound checks that don't belong to any single
//! module: the concrete scenarios and the round-trip/bound laws the
//! decomposition and the baseline router are both expected to satisfy.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use star_route_core::Problem;

fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

fn random_permutation(n: usize, rng: &mut impl Rng) -> Vec<usize> {
    let mut x: Vec<usize> = (0..n).collect();
    for _ in 0..(n * n / 2) {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        x.swap(a, b);
    }
    x
}

fn assert_w_invariants(p: &Problem) {
    let cap = (p.m() + 1) as u32;
    let mut total = 0u32;
    for i in 0..p.k() {
        for j in 0..p.k() {
            let value = p.w()[[i, j]];
            assert!(value <= cap, "W[{i}][{j}] = {value} exceeds m + 1 = {cap}");
            total += value;
        }
    }
    assert_eq!(total as usize, p.n());
}

// Scenario 2: k=3, m=1, a pure 3-centre cycle 1->3->2->1 (1-based groups;
// 0-based groups 0->2->1->0) -> beta=2 (an L=3 cycle costs L-1 swaps).
#[test]
fn scenario_two_three_centre_cycle() {
    let x0 = vec![4, 1, 0, 3, 2, 5];
    let mut p = Problem::new(3, 1, x0, identity(6)).unwrap();
    assert_eq!(p.get_min_cycle_len().unwrap(), 3);
    assert_eq!(p.get_decomp().unwrap(), 2);
}

// Scenario 3: k=4, m=5, x0 a single 4-cycle over centres (identity
// elsewhere) -> beta=3 (an L-cycle costs L-1 centre swaps).
#[test]
fn scenario_three_four_centre_cycle_costs_l_minus_one() {
    let mut x0 = identity(24);
    // Centres are nodes 0, 6, 12, 18. Rotate their values 0 -> 6 -> 12 -> 18 -> 0.
    x0[0] = 6;
    x0[6] = 12;
    x0[12] = 18;
    x0[18] = 0;
    let mut p = Problem::new(4, 5, x0, identity(24)).unwrap();
    assert_eq!(p.get_decomp().unwrap(), 3);
}

// Scenario 4: x0 already equal to y -> beta=0 and routeSimple makes no swaps.
#[test]
fn scenario_four_already_sorted_needs_no_swaps() {
    let x0 = identity(8);
    let mut p = Problem::new(2, 3, x0.clone(), identity(8)).unwrap();
    assert_eq!(p.get_decomp().unwrap(), 0);

    let mut p = Problem::new(2, 3, x0, identity(8)).unwrap();
    p.route_simple().unwrap();
    assert_eq!(p.ns(), 0);
    assert_eq!(p.nsb(), 0);
}

// Scenario 5: k=5, m=2, x0 = reverse(y) -> Nsb <= n and beta matches the
// optimum cycle-cover count produced by get_decomp on the same instance.
#[test]
fn scenario_five_reversed_instance_bounds_hold() {
    let n = 15;
    let y = identity(n);
    let x0: Vec<usize> = y.iter().rev().copied().collect();

    let mut decomposed = Problem::new(5, 2, x0.clone(), y.clone()).unwrap();
    let beta = decomposed.get_decomp().unwrap();

    let mut routed = Problem::new(5, 2, x0, y).unwrap();
    routed.route_simple().unwrap();
    assert_eq!(routed.x(), &identity(n)[..]);
    assert!(routed.nsb() <= n as u32);
    assert!(beta <= routed.nsb());
}

// Scenario 6: k=3, m=2, x0 a pure 3-cycle with weight 2 on each edge ->
// beta=4 (two 3-cycles). A single del_cycles(3) call only removes one
// forced copy of the cycle (Wc caps each edge at weight 1); get_decomp()
// drives the repeated removal needed to clear both copies.
#[test]
fn scenario_six_weighted_three_cycle_needs_four_swaps() {
    let x0 = vec![0, 3, 4, 5, 6, 7, 8, 1, 2];
    let mut p = Problem::new(3, 2, x0.clone(), identity(9)).unwrap();
    assert_eq!(p.del_cycles(3), 1);
    assert!(!p.empty_graph().unwrap());

    let mut p = Problem::new(3, 2, x0, identity(9)).unwrap();
    assert_eq!(p.get_decomp().unwrap(), 4);
}

// beta <= Nsb produced by any correct router, and a + b <= Ns, checked over
// a spread of random instances rather than a single handcrafted one.
#[test]
fn beta_lower_bounds_route_simple_over_random_instances() {
    let mut rng = Pcg32::seed_from_u64(7);
    for trial in 0..40 {
        let k = 2 + (trial % 5);
        let m = 1 + (trial % 4);
        let n = k * (m + 1);
        let x0 = random_permutation(n, &mut rng);
        let y = identity(n);

        let mut decomposed = Problem::new(k, m, x0.clone(), y.clone()).unwrap();
        let beta = decomposed.get_decomp().unwrap();

        let mut routed = Problem::new(k, m, x0, y).unwrap();
        let a = routed.get_nmoves();
        routed.route_simple().unwrap();

        assert_eq!(routed.x(), &identity(n)[..]);
        assert!(
            beta <= routed.nsb(),
            "trial {trial}: beta={beta} > Nsb={}",
            routed.nsb()
        );
        assert!(
            (a as u32 + routed.nsb()) <= routed.ns(),
            "trial {trial}: a + b = {} > Ns = {}",
            a as u32 + routed.nsb(),
            routed.ns()
        );
    }
}

// setW(); setW(); is idempotent, and del2cycles() applied twice in a row
// has the second call return 0 -- checked over random instances rather
// than one fixed case.
#[test]
fn set_w_and_del_2_cycles_are_idempotent_over_random_instances() {
    let mut rng = Pcg32::seed_from_u64(99);
    for _ in 0..20 {
        let k = 3;
        let m = 2;
        let n = k * (m + 1);
        let x0 = random_permutation(n, &mut rng);
        let mut p = Problem::new(k, m, x0, identity(n)).unwrap();

        let before = p.w().clone();
        p.set_w();
        assert_eq!(p.w(), &before);

        p.del_2_cycles();
        assert_eq!(p.del_2_cycles(), 0);
        assert_w_invariants(&p);
    }
}

// After get_decomp() is done searching, W is restored by a trailing set_w()
// call, so re-deriving it from x always matches what get_decomp left behind.
#[test]
fn get_decomp_leaves_w_consistent_with_x_over_random_instances() {
    let mut rng = Pcg32::seed_from_u64(123);
    for _ in 0..20 {
        let k = 4;
        let m = 3;
        let n = k * (m + 1);
        let x0 = random_permutation(n, &mut rng);
        let mut p = Problem::new(k, m, x0, identity(n)).unwrap();
        p.get_decomp().unwrap();

        let after = p.w().clone();
        p.set_w();
        assert_eq!(p.w(), &after);
        assert_w_invariants(&p);
    }
}
