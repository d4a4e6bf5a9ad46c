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

//! # ABSINT
//! ABSINT is a truly generic framework to develop abstract-interpretation
//! based static analyses in Rust. Its goal is to let you describe the domain
//! of your analysis as a lattice of abstract values (see `AbstractDomain`)
//! and the semantics of your program points as transfer functions (see
//! `TransferFunctions`). Given these two ingredients and an arbitrary flow
//! graph, the framework computes the least fixpoint of your analysis; that
//! is, the entry and exit states of every program point reachable from the
//! root of the graph.
//!
//! The engine guarantees termination even for domains having infinitely
//! ascending chains (think intervals or octagons): it iterates the graph
//! along a weak topological ordering and applies widening at the head of
//! every cycle.
//!
//! ## Side benefit
//! As a side benefit from using `absint`, the very same iterator serves
//! forward and backward analyses alike: the direction of an analysis is
//! nothing but the order in which you pass your successor and predecessor
//! accessors.
//!
//! ## Important note
//! The abstract states manipulated by this framework are plain mutable
//! values. The framework itself never shares a state between threads (the
//! iterator owns its maps and hands out copies); if you keep copies around
//! on your side, the side-effecting operations must only ever be invoked on
//! thread-local elements.
pub mod common;
pub mod abstraction;
pub mod implementation;
pub mod prelude;
