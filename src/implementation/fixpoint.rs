// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! This module provides the implementation of the monotonic fixpoint
//! iterator: the engine which drives any analysis developed with this
//! library. The engine is a sequential, single threaded solver; one complete
//! call to `run` is CPU bound and never suspends.
use std::hash::Hash;

use metrohash::MetroHashMap;

use crate::abstraction::analysis::TransferFunctions;
use crate::abstraction::domain::AbstractDomain;
use crate::abstraction::solver::FixpointIterator;
use crate::implementation::wto::{WeakTopologicalOrder, WtoComponent};

/// This is the structure implementing the monotonic fixpoint iterator: given
/// a flow graph (a root plus a pair of successor/predecessor accessors) and
/// the transfer functions of an analysis, it computes the least fixpoint of
/// the analysis and memorizes the entry and exit states of every reachable
/// node.
///
/// The graph is iterated along its weak topological ordering: cycles are
/// visited over and over until their head stabilizes, and the entry state of
/// a head is extrapolated by widening on every repeated visit (past the
/// configured delay). This is what guarantees termination on domains having
/// infinitely ascending chains.
///
/// The direction of the analysis is entirely determined by the accessors:
/// for a backward analysis, pass the exit node of your flow graph as the
/// `root` and swap the successor and predecessor accessors. Nothing else in
/// the engine needs to know.
///
/// # Example Usage
/// ```
/// # use absint::prelude::*;
/// // each node of a straight line 0 -> 1 -> 2 adds its own identifier to
/// // the running set of literals
/// struct Collect;
/// impl TransferFunctions<usize, PowersetDomain<usize>> for Collect {
///     fn analyze_node(&mut self, node: &usize, state: &mut PowersetDomain<usize>) {
///         state.add(*node);
///     }
/// }
/// let succs = |n: &usize| if *n < 2 { vec![*n + 1] } else { vec![] };
/// let preds = |n: &usize| if *n > 0 { vec![*n - 1] } else { vec![] };
///
/// let mut engine = MonotonicFixpointIterator::new(0, succs, preds, Collect);
/// engine.run(PowersetDomain::empty());
///
/// assert!(engine.exit_state_at(&2).contains(&0));
/// assert!(engine.exit_state_at(&2).contains(&1));
/// assert!(engine.exit_state_at(&2).contains(&2));
/// ```
pub struct MonotonicFixpointIterator<N, D, A, S, P>
    where N: Eq + Hash + Clone,
          D: AbstractDomain,
          A: TransferFunctions<N, D>,
          S: Fn(&N) -> Vec<N>,
          P: Fn(&N) -> Vec<N>
{
    /// The node where the analysis starts (the exit node of the flow graph
    /// in the case of a backward analysis).
    root : N,
    /// Steps one node forward in the direction of the analysis.
    succs: S,
    /// Steps one node backward; this is where the contributions joined into
    /// an entry state come from.
    preds: P,
    /// The abstract semantics of the analyzed program.
    analyzer: A,
    /// The number of plain joins applied at the head of a cycle before the
    /// engine switches to widening.
    widening_delay: usize,
    /// The seed joined into the entry state of the root.
    seed : D,
    entry: MetroHashMap<N, D>,
    exit : MetroHashMap<N, D>,
    verbosity: u8
}

// private interface.
impl <N, D, A, S, P> MonotonicFixpointIterator<N, D, A, S, P>
    where N: Eq + Hash + Clone,
          D: AbstractDomain,
          A: TransferFunctions<N, D>,
          S: Fn(&N) -> Vec<N>,
          P: Fn(&N) -> Vec<N>
{
    /// Creates an engine with the default tuning: no widening delay and no
    /// verbosity at all.
    pub fn new(root: N, succs: S, preds: P, analyzer: A) -> Self {
        Self::customized(root, succs, preds, analyzer, 0, 0)
    }
    /// Creates a fully tuned engine. The `widening_delay` is the number of
    /// plain joins the engine applies at the head of a cycle before it
    /// starts widening: a few join rounds buy precision on short cycles, at
    /// the price of as many extra passes over each component.
    pub fn customized(root: N, succs: S, preds: P, analyzer: A,
                      widening_delay: usize, verbosity: u8) -> Self {
        MonotonicFixpointIterator {
            root, succs, preds, analyzer,
            widening_delay,
            seed : D::bottom(),
            entry: MetroHashMap::default(),
            exit : MetroHashMap::default(),
            verbosity
        }
    }

    /// Returns a reference to the transfer functions of this engine; this
    /// is how one retrieves the auxiliary data an analysis may have
    /// accumulated during the run.
    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }
    /// Returns a mutable reference to the transfer functions of this
    /// engine.
    pub fn analyzer_mut(&mut self) -> &mut A {
        &mut self.analyzer
    }

    /// Visits one element of the weak topological ordering.
    fn visit(&mut self, component: &WtoComponent<N>) {
        match component {
            WtoComponent::Vertex(node)             => self.analyze_vertex(node),
            WtoComponent::Component { head, body } => self.stabilize(head, body)
        }
    }

    /// Recomputes the states of a node lying on no cycle: such a node is
    /// visited exactly once per pass, and its entry state is simply the
    /// join of the contributions of its predecessors.
    fn analyze_vertex(&mut self, node: &N) {
        let entry = self.collect_entry(node);
        self.record(node, entry);
    }

    /// Iterates the component bracketed by the given head until one more
    /// pass does not teach the head anything new. The entry state of the
    /// head may only ever grow from one pass to the next, so testing it
    /// against the recomputed contribution of its predecessors detects the
    /// stabilization of the whole component.
    ///
    /// A component nested inside another one gets stabilized again on every
    /// pass of the enclosing component. The state recorded for its head by
    /// the previous visit is then the floor of the new iteration: a widening
    /// is only required to overshoot, not to jump to an extremum, so
    /// recomputing that state from scratch could regress below the
    /// overshoot and forfeit both soundness and termination.
    fn stabilize(&mut self, head: &N, body: &[WtoComponent<N>]) {
        let mut visits = 0_usize;
        loop {
            visits += 1;
            let new_entry = self.collect_entry(head);
            let entry = if visits == 1 {
                match self.entry.get(head) {
                    Some(old) => old.join(&new_entry),
                    None      => new_entry
                }
            } else {
                let old = &self.entry[head];
                if new_entry.leq(old) {
                    break;
                }
                if visits <= self.widening_delay + 1 {
                    old.join(&new_entry)
                } else {
                    old.widening(&new_entry)
                }
            };
            self.record(head, entry);
            for component in body {
                self.visit(component);
            }
        }
        if self.verbosity >= 2 {
            println!("Component stabilized, passes {}", visits);
        }
    }

    /// Computes the entry state of the given node: the join of the edge
    /// transformed exit states of its predecessors, plus the seed when the
    /// node is the root. Predecessors that were never reached (or not
    /// reached yet) hold a Bottom exit state and contribute nothing; in
    /// particular, the edge transformer is never invoked on them.
    fn collect_entry(&mut self, node: &N) -> D {
        let mut entry = D::bottom();
        if *node == self.root {
            entry.join_with(&self.seed);
        }
        for pred in (self.preds)(node) {
            if let Some(pred_exit) = self.exit.get(&pred) {
                if !pred_exit.is_bottom() {
                    let flowed = self.analyzer.analyze_edge(&pred, node, pred_exit);
                    entry.join_with(&flowed);
                }
            }
        }
        entry
    }

    /// Memorizes the entry state of the given node and the exit state
    /// obtained by running the node's transfer function on it.
    fn record(&mut self, node: &N, entry: D) {
        let mut exit = entry.clone();
        self.analyzer.analyze_node(node, &mut exit);
        self.entry.insert(node.clone(), entry);
        self.exit.insert(node.clone(), exit);
    }
}

impl <N, D, A, S, P> FixpointIterator<N, D> for MonotonicFixpointIterator<N, D, A, S, P>
    where N: Eq + Hash + Clone,
          D: AbstractDomain,
          A: TransferFunctions<N, D>,
          S: Fn(&N) -> Vec<N>,
          P: Fn(&N) -> Vec<N>
{
    /// Runs the analysis to its least fixpoint, starting from the given
    /// seed at the root. The states of any previous run are discarded.
    fn run(&mut self, seed: D) {
        self.entry.clear();
        self.exit.clear();
        self.seed = seed;

        let ordering = WeakTopologicalOrder::of(&self.root, &self.succs);
        for component in ordering.components() {
            self.visit(component);
        }
        if self.verbosity >= 1 {
            println!("Fixpoint reached, nodes {}", self.entry.len());
        }
    }

    fn entry_state_at(&self, node: &N) -> D {
        self.entry.get(node).cloned().unwrap_or_else(D::bottom)
    }
    fn exit_state_at(&self, node: &N) -> D {
        self.exit.get(node).cloned().unwrap_or_else(D::bottom)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################

/// The behavior of the engine on actual analyses (loops, widening, backward
/// runs) is validated by the integration suites; the unit tests below only
/// cover the bookkeeping contract of the engine itself.
