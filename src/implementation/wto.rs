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

//! This module provides the weak topological ordering of a flow graph: the
//! hierarchical ordering of its vertices which brackets every cycle into a
//! component with a designated head. This ordering is what lets the fixpoint
//! iterator know where to apply widening and when a cycle has stabilized;
//! its construction follows Bourdoncle's partitioning of the depth first
//! search from the root, so irreducible flow graphs require no special
//! casing whatsoever.
use std::fmt;
use std::hash::Hash;

use metrohash::MetroHashMap;

/// One element of a weak topological ordering: either a vertex standing
/// outside of any cycle, or a bracketed component covering one cycle (or
/// nest of cycles) of the graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WtoComponent<N> {
    /// A vertex which is part of no cycle (w.r.t. the vertices ordered
    /// after it).
    Vertex(N),
    /// A strongly connected portion of the graph. The `head` is the target
    /// of the back edges closing the cycle; it is where the fixpoint
    /// iterator applies widening, and where the stabilization of the whole
    /// component is detected.
    Component {
        head: N,
        body: Vec<WtoComponent<N>>
    }
}

/// The weak topological ordering of a flow graph, rooted at some vertex.
/// Vertices unreachable from the root do not appear in the ordering.
///
/// # Example:
/// ```
/// # use absint::implementation::wto::WeakTopologicalOrder;
/// // a straight line ending in a self loop: 0 -> 1 -> 2 -> 2
/// let succs = |n: &usize| match *n {
///     0 => vec![1],
///     1 => vec![2],
///     _ => vec![2]
/// };
/// let wto = WeakTopologicalOrder::of(&0, &succs);
/// assert_eq!("0 1 (2)", format!("{}", wto));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeakTopologicalOrder<N> {
    components: Vec<WtoComponent<N>>
}

impl <N: Eq + Hash + Clone> WeakTopologicalOrder<N> {
    /// Computes the weak topological ordering of the graph spanned by the
    /// `succs` accessor, starting from the given `root`.
    pub fn of<S>(root: &N, succs: &S) -> Self
        where S: Fn(&N) -> Vec<N>
    {
        let mut builder = WtoBuilder {
            succs,
            dfn  : MetroHashMap::default(),
            stack: vec![],
            num  : 0
        };
        let mut components = vec![];
        builder.visit(root, &mut components);
        components.reverse();
        WeakTopologicalOrder { components }
    }

    /// Returns the top level components of this ordering, in iteration
    /// order.
    pub fn components(&self) -> &[WtoComponent<N>] {
        &self.components
    }
}

/// This structure holds the transient bookkeeping of Bourdoncle's
/// partitioning: the depth first numbering of the vertices, the stack of
/// the vertices whose strongly connected component is not closed yet, and
/// the running vertex counter.
struct WtoBuilder<'a, N, S> {
    succs: &'a S,
    /// The depth first number of each vertex; absent means unvisited and
    /// `usize::MAX` means the vertex already sits in the partition.
    dfn  : MetroHashMap<N, usize>,
    stack: Vec<N>,
    num  : usize
}

impl <N: Eq + Hash + Clone, S: Fn(&N) -> Vec<N>> WtoBuilder<'_, N, S> {
    fn number_of(&self, vertex: &N) -> usize {
        self.dfn.get(vertex).copied().unwrap_or(0)
    }

    /// The recursive traversal at the heart of the partitioning. It returns
    /// the number of the "oldest" vertex on the stack that the subtree
    /// rooted in `vertex` reaches back to; when that oldest vertex is
    /// `vertex` itself, a complete component (or a plain vertex) can be
    /// closed and appended to the partition.
    fn visit(&mut self, vertex: &N, partition: &mut Vec<WtoComponent<N>>) -> usize {
        self.stack.push(vertex.clone());
        self.num += 1;
        let number = self.num;
        self.dfn.insert(vertex.clone(), number);

        let mut head = number;
        let mut in_loop = false;
        for succ in (self.succs)(vertex) {
            let succ_number = self.number_of(&succ);
            let min = if succ_number == 0 {
                self.visit(&succ, partition)
            } else {
                succ_number
            };
            if min <= head {
                head = min;
                in_loop = true;
            }
        }

        if head == number {
            self.dfn.insert(vertex.clone(), usize::max_value());
            let mut element = self.stack.pop().unwrap();
            if in_loop {
                while element != *vertex {
                    // the members of the component will be re-numbered while
                    // building its body
                    self.dfn.insert(element, 0);
                    element = self.stack.pop().unwrap();
                }
                let body = self.component(vertex);
                partition.push(WtoComponent::Component { head: vertex.clone(), body });
            } else {
                partition.push(WtoComponent::Vertex(vertex.clone()));
            }
        }
        head
    }

    /// Builds the body of the component headed by `vertex`: the partition
    /// of the member vertices, which were reset to unvisited when the
    /// component was closed.
    fn component(&mut self, vertex: &N) -> Vec<WtoComponent<N>> {
        let mut partition = vec![];
        for succ in (self.succs)(vertex) {
            if self.number_of(&succ) == 0 {
                self.visit(&succ, &mut partition);
            }
        }
        partition.reverse();
        partition
    }
}

/// A weak topological ordering is traditionally written down as the
/// parenthesized sequence of its vertices, with the head of every component
/// leading the bracket. This rendition is mostly useful in tests and debug
/// traces.
impl <N: fmt::Display> fmt::Display for WtoComponent<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WtoComponent::Vertex(n) => write!(f, "{}", n),
            WtoComponent::Component { head, body } => {
                write!(f, "({}", head)?;
                for c in body {
                    write!(f, " {}", c)?;
                }
                write!(f, ")")
            }
        }
    }
}
impl <N: fmt::Display> fmt::Display for WeakTopologicalOrder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", c)?;
            first = false;
        }
        Ok(())
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
