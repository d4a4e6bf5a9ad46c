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

//! This module defines the trait through which a client analysis teaches the
//! fixpoint iterator the abstract semantics of its program points.
use crate::abstraction::domain::AbstractDomain;

/// This is the second abstraction that should be provided by any user of our
/// library (the first one being the abstract domain itself). It defines the
/// abstract semantics of the analyzed program: what executing one node of
/// the flow graph does to an abstract state, and optionally what flowing
/// along one particular edge does to it.
///
/// The framework treats the nodes as completely opaque: it never inspects
/// an instruction, a basic block or whatever your nodes stand for. All it
/// ever does is hand a node identifier back to you, together with the state
/// holding at that point.
///
/// The receiver is mutable so that an analysis may accumulate auxiliary
/// results (diagnostics, per-node facts, ...) on the side while the fixpoint
/// is being computed.
pub trait TransferFunctions<N, D: AbstractDomain> {
    /// Applies the transfer function of the node `node` to the given
    /// `state`, mutating it in place from the entry state of the node to its
    /// exit state.
    ///
    /// This function *must* be monotone: feeding it a larger entry state may
    /// only ever produce a larger exit state. The framework has no way of
    /// detecting a non-monotone transfer function; all bets on termination
    /// are off if this requirement is violated.
    fn analyze_node(&mut self, node: &N, state: &mut D);

    /// Transforms the state flowing along the edge `src -> dst`. The default
    /// implementation propagates the exit state of `src` unchanged, which is
    /// what the vast majority of the analyses want. Overriding it is how one
    /// typically implements branch-condition refinement.
    ///
    /// This hook is only ever invoked for predecessors whose exit state is
    /// not Bottom: unreachable flow contributes nothing to a join, so there
    /// is no state to transform in the first place.
    #[allow(unused_variables)]
    fn analyze_edge(&mut self, src: &N, dst: &N, exit: &D) -> D {
        exit.clone()
    }
}

/// Any mutable reference to some transfer functions is itself a perfectly
/// valid set of transfer functions.
impl <N, D: AbstractDomain, A: TransferFunctions<N, D>> TransferFunctions<N, D> for &mut A {
    fn analyze_node(&mut self, node: &N, state: &mut D) {
        (*self).analyze_node(node, state)
    }
    fn analyze_edge(&mut self, src: &N, dst: &N, exit: &D) -> D {
        (*self).analyze_edge(src, dst, exit)
    }
}

#[cfg(test)]
mod test_transfer_defaults {
    use crate::abstraction::analysis::TransferFunctions;
    use crate::abstraction::domain::AbstractDomain;
    use crate::implementation::powerset::PowersetDomain;

    struct Identity;
    impl TransferFunctions<usize, PowersetDomain<usize>> for Identity {
        fn analyze_node(&mut self, _: &usize, _: &mut PowersetDomain<usize>) {}
    }

    #[test]
    fn by_default_edges_propagate_the_exit_state_unchanged() {
        let mut tf = Identity;
        let exit   = vec![1, 2, 3].into_iter().collect::<PowersetDomain<usize>>();
        let moved  = tf.analyze_edge(&0, &1, &exit);
        assert!(moved.equals(&exit));
    }

    #[test]
    fn a_mutable_reference_is_a_valid_set_of_transfer_functions() {
        fn through<A: TransferFunctions<usize, PowersetDomain<usize>>>(
            mut tf: A) -> PowersetDomain<usize>
        {
            let mut state = PowersetDomain::top();
            tf.analyze_node(&0, &mut state);
            state
        }
        let mut tf = Identity;
        assert!(through(&mut tf).is_top());
    }
}
