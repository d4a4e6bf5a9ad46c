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

//! This module defines the public face of a fixpoint engine, regardless of
//! the actual iteration strategy it implements.
use crate::abstraction::domain::AbstractDomain;

/// This trait describes a fixpoint engine: an object which, once run,
/// associates an entry and an exit abstract state to every node of some flow
/// graph reachable from its root.
pub trait FixpointIterator<N, D: AbstractDomain> {
    /// Runs the analysis to a fixpoint. The entry state of the root node is
    /// seeded with the given `seed` (joined to Bottom). Running an engine a
    /// second time discards the results of the previous run.
    fn run(&mut self, seed: D);

    /// Returns a copy of the entry state computed for the given node. Nodes
    /// the engine has never heard of (in particular, the nodes unreachable
    /// from the root) answer Bottom.
    fn entry_state_at(&self, node: &N) -> D;

    /// Returns a copy of the exit state computed for the given node. Nodes
    /// the engine has never heard of (in particular, the nodes unreachable
    /// from the root) answer Bottom.
    fn exit_state_at(&self, node: &N) -> D;
}
