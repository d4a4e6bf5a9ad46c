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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation
//! levels). These are also the types your client code is likely to work with.

// ----------------------------------------------------------------------------
// --- KIND -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type classifies an abstract element as being either the least element
/// of its lattice (`Bottom`, no information yet), the greatest one (`Top`,
/// any possible concrete value), or a regular element in between (`Value`).
///
/// The mutating operations of an `AbstractValue` return a `Kind` to signal
/// the cases where their result collapsed to an extremum. This is what lets
/// the scaffolding coalesce extremal results once and for all, instead of
/// having each and every domain re-implement that very same case analysis.
///
/// # Example:
/// ```
/// # use absint::common::Kind;
/// assert_ne!(Kind::Bottom, Kind::Top);
/// assert_eq!(Kind::Value,  Kind::Value);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Kind {
    /// The least element of the lattice; stands for an unreachable (or not
    /// yet computed) state.
    Bottom,
    /// A regular element, carrying an actual representation.
    Value,
    /// The greatest element of the lattice; stands for a complete absence of
    /// information (any concrete value is possible).
    Top
}

impl Kind {
    /// True iff this kind denotes one of the two extrema of the lattice.
    /// Extremal elements carry no representation and the scaffolding makes
    /// sure their underlying value is always kept cleared.
    #[inline]
    pub fn is_extremal(self) -> bool {
        self != Kind::Value
    }
}
