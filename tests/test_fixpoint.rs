#![cfg(test)]
//! This integration suite exercises the fixpoint engine itself: loops and
//! widening over an infinite height domain, accumulation along a chain,
//! unreachable nodes, seeded runs, edge transformers, and the general
//! invariants any run must satisfy (consistency of the computed states,
//! determinism, monotonicity in the seed).
use absint::prelude::*;

// ----------------------------------------------------------------------------
// --- A COUNTER RUNNING IN A LOOP --------------------------------------------
// ----------------------------------------------------------------------------
/// The analyzed program is the prototypal divergence candidate:
///
/// ```text
/// block 0:  x <- 0
/// block 1:  x <- x + 1; goto 1 or 2
/// block 2:  (exit)
/// ```
///
/// Tracking `x` with intervals, the loop head keeps learning a larger and
/// larger upper bound; only widening makes the analysis terminate, with the
/// expected invariant `x in [0, +oo)` at the head.
struct CounterLoop;
impl TransferFunctions<usize, IntervalDomain> for CounterLoop {
    fn analyze_node(&mut self, node: &usize, state: &mut IntervalDomain) {
        match *node {
            0 => *state = IntervalDomain::constant(0),
            1 => state.shift(1),
            _ => ()
        }
    }
}

fn counter_loop_engine(widening_delay: usize)
    -> impl FixpointIterator<usize, IntervalDomain>
{
    let succs = |n: &usize| match *n {
        0 => vec![1],
        1 => vec![1, 2],
        _ => vec![]
    };
    let preds = |n: &usize| match *n {
        1 => vec![0, 1],
        2 => vec![1],
        _ => vec![]
    };
    MonotonicFixpointIterator::customized(0, succs, preds, CounterLoop,
                                          widening_delay, 0)
}

#[test]
fn the_widened_counter_converges_to_a_half_line() {
    let mut engine = counter_loop_engine(2);
    engine.run(IntervalDomain::top());

    assert!(engine.entry_state_at(&1).equals(&IntervalDomain::at_least(0)));
    assert!(engine.exit_state_at(&1).equals(&IntervalDomain::at_least(1)));
    assert!(engine.entry_state_at(&2).equals(&IntervalDomain::at_least(1)));
}

#[test]
fn the_counter_converges_regardless_of_the_widening_delay() {
    for delay in 0..5 {
        let mut engine = counter_loop_engine(delay);
        engine.run(IntervalDomain::top());
        assert!(engine.entry_state_at(&1).equals(&IntervalDomain::at_least(0)));
    }
}

// ----------------------------------------------------------------------------
// --- LITERALS ACCUMULATED ALONG A CHAIN -------------------------------------
// ----------------------------------------------------------------------------
/// Each node of a five node straight line adds one distinct literal to the
/// running set; the exit of the last node must hold all five literals and
/// every earlier node a strict prefix of them.
const LITERALS: [&str; 5] = ["a", "b", "c", "d", "e"];

struct Accumulate;
impl TransferFunctions<usize, PowersetDomain<&'static str>> for Accumulate {
    fn analyze_node(&mut self, node: &usize, state: &mut PowersetDomain<&'static str>) {
        state.add(LITERALS[*node]);
    }
}

fn chain_succs(n: &usize) -> Vec<usize> {
    if *n < 4 { vec![*n + 1] } else { vec![] }
}
fn chain_preds(n: &usize) -> Vec<usize> {
    if *n > 0 { vec![*n - 1] } else { vec![] }
}

fn set(items: &[&'static str]) -> PowersetDomain<&'static str> {
    items.iter().copied().collect()
}

#[test]
fn literals_pile_up_along_the_chain() {
    let mut engine = MonotonicFixpointIterator::new(
        0, chain_succs, chain_preds, Accumulate);
    engine.run(PowersetDomain::empty());

    assert!(engine.exit_state_at(&4).equals(&set(&["a", "b", "c", "d", "e"])));
    for node in 0..4_usize {
        let exit = engine.exit_state_at(&node);
        assert!(exit.equals(&set(&LITERALS[..=node])));
        assert!(exit.leq(&engine.exit_state_at(&4)));
        assert!(!exit.equals(&engine.exit_state_at(&4)));
    }
}

#[test]
fn the_computed_states_satisfy_the_transfer_equations() {
    let mut engine = MonotonicFixpointIterator::new(
        0, chain_succs, chain_preds, Accumulate);
    engine.run(PowersetDomain::empty());

    for node in 0..5_usize {
        // exit(n) is the transfer function applied to entry(n)
        let mut recomputed = engine.entry_state_at(&node);
        Accumulate.analyze_node(&node, &mut recomputed);
        assert!(recomputed.equals(&engine.exit_state_at(&node)));

        // entry(n) is the join of the predecessors' exit states
        if node > 0 {
            assert!(engine.entry_state_at(&node)
                          .equals(&engine.exit_state_at(&(node - 1))));
        }
    }
}

#[test]
fn two_runs_on_the_same_inputs_yield_identical_maps() {
    let mut engine = MonotonicFixpointIterator::new(
        0, chain_succs, chain_preds, Accumulate);
    engine.run(PowersetDomain::empty());
    let first = (0..5_usize)
        .map(|n| (engine.entry_state_at(&n), engine.exit_state_at(&n)))
        .collect::<Vec<_>>();

    engine.run(PowersetDomain::empty());
    for (node, (entry, exit)) in first.iter().enumerate() {
        assert!(entry.equals(&engine.entry_state_at(&node)));
        assert!(exit.equals(&engine.exit_state_at(&node)));
    }
}

#[test]
fn a_larger_seed_can_only_produce_larger_states() {
    let mut small = MonotonicFixpointIterator::new(
        0, chain_succs, chain_preds, Accumulate);
    let mut large = MonotonicFixpointIterator::new(
        0, chain_succs, chain_preds, Accumulate);

    small.run(set(&["x"]));
    large.run(set(&["x", "y"]));

    for node in 0..5_usize {
        assert!(small.entry_state_at(&node).leq(&large.entry_state_at(&node)));
        assert!(small.exit_state_at(&node).leq(&large.exit_state_at(&node)));
    }
}

// ----------------------------------------------------------------------------
// --- UNREACHABLE NODES ------------------------------------------------------
// ----------------------------------------------------------------------------
/// Node 9 exists in the graph tables but no path from the root leads to it:
/// the fixpoint must leave it at Bottom on both sides.
#[test]
fn unreachable_nodes_stay_at_bottom() {
    let succs = |n: &usize| match *n {
        0 => vec![1],
        9 => vec![1],
        _ => vec![]
    };
    let preds = |n: &usize| match *n {
        1 => vec![0, 9],
        _ => vec![]
    };
    let mut engine = MonotonicFixpointIterator::new(0, succs, preds, Accumulate);
    engine.run(PowersetDomain::empty());

    assert!(engine.entry_state_at(&9).is_bottom());
    assert!(engine.exit_state_at(&9).is_bottom());
    // and the unreachable predecessor contributed nothing to node 1
    assert!(engine.entry_state_at(&1).equals(&set(&["a"])));
}

// ----------------------------------------------------------------------------
// --- SEEDED IDENTITY RUNS ---------------------------------------------------
// ----------------------------------------------------------------------------
/// With an identity transfer function, whatever is seeded at the root flows
/// unchanged through the whole graph: every reachable state equals the seed.
struct Identity;
impl TransferFunctions<usize, PowersetDomain<&'static str>> for Identity {
    fn analyze_node(&mut self, _: &usize, _: &mut PowersetDomain<&'static str>) {}
}

#[test]
fn an_identity_analysis_propagates_the_seed_everywhere() {
    // a diamond: 0 -> {1, 2} -> 3
    let succs = |n: &usize| match *n {
        0 => vec![1, 2],
        1 => vec![3],
        2 => vec![3],
        _ => vec![]
    };
    let preds = |n: &usize| match *n {
        1 => vec![0],
        2 => vec![0],
        3 => vec![1, 2],
        _ => vec![]
    };
    let mut engine = MonotonicFixpointIterator::new(0, succs, preds, Identity);
    let seed = set(&["s1", "s2"]);
    engine.run(seed.clone());

    for node in 0..4_usize {
        assert!(engine.entry_state_at(&node).equals(&seed));
        assert!(engine.exit_state_at(&node).equals(&seed));
    }
}

// ----------------------------------------------------------------------------
// --- EDGE TRANSFORMERS ------------------------------------------------------
// ----------------------------------------------------------------------------
/// A two way branch on the sign of the tracked quantity: the edge towards
/// node 1 is the "x <= 0" leg and the edge towards node 2 the "x >= 1" leg.
/// Refining the flowing interval on each edge is exactly what the
/// `analyze_edge` hook is for.
struct SignSplit;
impl TransferFunctions<usize, IntervalDomain> for SignSplit {
    fn analyze_node(&mut self, _: &usize, _: &mut IntervalDomain) {}

    fn analyze_edge(&mut self, _src: &usize, dst: &usize, exit: &IntervalDomain)
        -> IntervalDomain
    {
        match *dst {
            1 => exit.meet(&IntervalDomain::at_most(0)),
            2 => exit.meet(&IntervalDomain::at_least(1)),
            _ => exit.clone()
        }
    }
}

#[test]
fn edge_transformers_refine_the_flowing_states() {
    let succs = |n: &usize| if *n == 0 { vec![1, 2] } else { vec![] };
    let preds = |n: &usize| if *n > 0 { vec![0] } else { vec![] };

    let mut engine = MonotonicFixpointIterator::new(0, succs, preds, SignSplit);
    engine.run(IntervalDomain::finite(-5, 5));

    assert!(engine.entry_state_at(&1).equals(&IntervalDomain::finite(-5, 0)));
    assert!(engine.entry_state_at(&2).equals(&IntervalDomain::finite(1, 5)));
}

// ----------------------------------------------------------------------------
// --- NESTED LOOPS AND THRESHOLD WIDENING ------------------------------------
// ----------------------------------------------------------------------------
/// An upper bound on the tracked quantity, widened through a finite ladder
/// of thresholds rather than jumping straight to an extremum. An unstable
/// bound climbs to the next threshold above the incoming one; only past the
/// last rung does it give up and saturate. Such a widening overshoots by a
/// finite margin, so the states it produces are *not* sticky: a plain join
/// recomputed from scratch can land strictly below them.
#[derive(Clone, Debug, Eq, PartialEq)]
struct CeilingValue {
    hi: i64
}

const THRESHOLDS: [i64; 3] = [16, 256, 4096];
const NO_CEILING: i64 = std::i64::MAX;

impl CeilingValue {
    fn at_most(hi: i64) -> Self {
        CeilingValue { hi }
    }
}
impl Default for CeilingValue {
    fn default() -> Self {
        Self::at_most(0)
    }
}
impl AbstractValue for CeilingValue {
    fn clear(&mut self) {
        *self = Self::default();
    }
    fn kind(&self) -> Kind {
        if self.hi == NO_CEILING { Kind::Top } else { Kind::Value }
    }
    fn leq(&self, other: &Self) -> bool {
        self.hi <= other.hi
    }
    fn equals(&self, other: &Self) -> bool {
        self.hi == other.hi
    }
    fn join_with(&mut self, other: &Self) -> Kind {
        self.hi = self.hi.max(other.hi);
        self.kind()
    }
    fn widen_with(&mut self, other: &Self) -> Kind {
        if other.hi > self.hi {
            self.hi = THRESHOLDS.iter().copied()
                .find(|t| *t >= other.hi)
                .unwrap_or(NO_CEILING);
        }
        self.kind()
    }
    fn meet_with(&mut self, other: &Self) -> Kind {
        self.hi = self.hi.min(other.hi);
        self.kind()
    }
    fn narrow_with(&mut self, other: &Self) -> Kind {
        self.meet_with(other)
    }
}

type CeilingDomain = Scaffolding<CeilingValue>;

fn ceiling(hi: i64) -> CeilingDomain {
    CeilingDomain::from(CeilingValue::at_most(hi))
}

/// The analyzed program is a saturating counter running in a pair of nested
/// loops:
///
/// ```text
/// node 3:  x <- 0                  (entry)
/// node 0:  assume x <= 20          (outer loop guard)
/// node 1:  x <- min(x + 1, 20)     (inner loop, on itself)
/// node 2:  (no-op)                 (back edge to the outer guard)
/// ```
struct SaturatingCounter;
impl TransferFunctions<usize, CeilingDomain> for SaturatingCounter {
    fn analyze_node(&mut self, node: &usize, state: &mut CeilingDomain) {
        match *node {
            3 => *state = ceiling(0),
            0 => state.meet_with(&ceiling(20)),
            1 => match state.kind() {
                Kind::Value  => *state = ceiling((state.value().hi + 1).min(20)),
                Kind::Top    => *state = ceiling(20),
                Kind::Bottom => ()
            },
            _ => ()
        }
    }
}

/// The ordering of this graph nests the inner self loop inside the outer
/// cycle: `3 (0 (1) 2)`. Every pass of the outer component stabilizes the
/// inner head anew; the state recorded by the previous stabilization must
/// act as a floor there, or the widened overshoot would be regressed by a
/// plain join and the analysis would be unsound.
#[test]
fn an_outer_loop_never_regresses_the_head_of_an_inner_one() {
    let succs = |n: &usize| match *n {
        3 => vec![0],
        0 => vec![1],
        1 => vec![1, 2],
        2 => vec![0],
        _ => vec![]
    };
    let preds = |n: &usize| match *n {
        0 => vec![3, 2],
        1 => vec![0, 1],
        2 => vec![1],
        _ => vec![]
    };
    let mut engine = MonotonicFixpointIterator::new(3, succs, preds, SaturatingCounter);
    engine.run(CeilingDomain::top());

    // the inner head first stabilizes on the 256 threshold (the widened
    // overshoot above the saturation cap); the later passes of the outer
    // component must keep it there, never shrink it back
    assert!(ceiling(256).leq(&engine.entry_state_at(&1)));
    assert!(engine.entry_state_at(&1).equals(&ceiling(256)));
    assert!(engine.entry_state_at(&0).equals(&ceiling(256)));
    // past the guard and the saturating increment, the bound is the cap
    assert!(engine.exit_state_at(&0).equals(&ceiling(20)));
    assert!(engine.exit_state_at(&1).equals(&ceiling(20)));
    assert!(engine.exit_state_at(&2).equals(&ceiling(20)));
}
