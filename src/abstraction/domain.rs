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

//! This module defines the basic abstractions one will manipulate when
//! implementing an abstract domain for some static analysis.
//!
//! The most important abstractions that should be provided by a client are
//! `AbstractValue` (the regular elements of a lattice) and `AbstractDomain`
//! (the complete lattice interface consumed by the fixpoint engine). In the
//! typical case, a client only implements `AbstractValue` and obtains its
//! `AbstractDomain` for free through the `Scaffolding` combinator.
use crate::common::Kind;

/// This trait describes a *regular* element of some lattice; that is, an
/// element which is neither the Top nor the Bottom of its lattice and hence
/// carries an actual representation (a hash table, a pair of bounds, a
/// bitset, ...).
///
/// Implementing this trait is the cheapest way of defining a complete
/// abstract domain: the `Scaffolding` combinator lifts any `AbstractValue`
/// into a full `AbstractDomain`, and takes care of the complete Top/Bottom
/// case analysis on your behalf. Your implementation only ever deals with
/// the regular cases.
///
/// # Contract
/// All the binary operations of this trait are only ever invoked by the
/// scaffolding when *both* operands are of `Value` kind. Their behavior on
/// extremal operands is simply unspecified. The mutating operations
/// (`join_with`, `widen_with`, `meet_with`, `narrow_with`) must be sound
/// w.r.t. the concrete semantics and monotone in both arguments; on top of
/// that, iterated widening must stabilize every ascending chain after a
/// finite number of steps (this is what guarantees the termination of the
/// fixpoint computation on lattices of infinite height).
pub trait AbstractValue: Clone + Default {
    /// Releases whatever resources are held by the representation of this
    /// element. This method is only ever called when the owner is about to
    /// overwrite the kind of the element; therefore the `kind()` reported
    /// after a `clear()` is left at the implementor's discretion.
    fn clear(&mut self);

    /// Classifies the current element. This method is total: when the
    /// representation itself is able to denote an extremum (a saturated
    /// bitset, the interval spanning the whole line, an empty interval),
    /// it *must* report the corresponding extremal kind so that the
    /// scaffolding can normalize the element.
    fn kind(&self) -> Kind;

    /// Returns true iff `self` is covered by `other` in the partial order of
    /// the lattice. Only meaningful when both elements are of `Value` kind.
    fn leq(&self, other: &Self) -> bool;
    /// Returns true iff `self` and `other` denote the very same element.
    /// Only meaningful when both elements are of `Value` kind.
    fn equals(&self, other: &Self) -> bool;

    /// Replaces `self` by the least upper bound of `self` and `other` and
    /// returns the kind of that result. When the returned kind is extremal,
    /// `self` may still hold representation resources; the caller is in
    /// charge of clearing them.
    fn join_with(&mut self, other: &Self) -> Kind;
    /// Replaces `self` by an upper bound of `self` and `other` suitable for
    /// extrapolation, and returns the kind of that result. For lattices of
    /// finite height, delegating to `join_with` is the usual choice.
    fn widen_with(&mut self, other: &Self) -> Kind;
    /// Replaces `self` by the greatest lower bound of `self` and `other` and
    /// returns the kind of that result.
    fn meet_with(&mut self, other: &Self) -> Kind;
    /// Replaces `self` by a refinement of the over-approximation reached
    /// after widening, and returns the kind of that result. For lattices of
    /// finite height, delegating to `meet_with` is the usual choice.
    fn narrow_with(&mut self, other: &Self) -> Kind;
}

/// This trait describes a complete lattice element: the currency in which
/// the fixpoint iterator trades. An element is either the Bottom of the
/// lattice, its Top, or some regular value in between.
///
/// The contract is deliberately value-semantic: elements are meant to be
/// cheap-ish to copy, and the iterator holds and duplicates them by value.
/// This is also why the functional counterparts of the lattice operations
/// (`join`, `widening`, `meet`, `narrowing`) are provided as auto-implemented
/// methods which copy the receiver and then mutate the copy: they are never
/// to be specialized.
///
/// # Laws
/// Any implementation must satisfy the usual lattice algebra:
/// `join` is associative, commutative and idempotent (`meet` dually);
/// `a.equals(b)` iff `a.leq(b)` and `b.leq(a)`; `bottom()` is below and
/// `top()` above every element; `a.widening(b)` is an upper bound of both
/// its arguments and stabilizes every ascending chain in finitely many
/// steps.
pub trait AbstractDomain: Clone {
    /// Produces the least element of the lattice.
    fn bottom() -> Self;
    /// Produces the greatest element of the lattice.
    fn top() -> Self;

    /// True iff this element is the least of its lattice.
    fn is_bottom(&self) -> bool;
    /// True iff this element is the greatest of its lattice.
    fn is_top(&self) -> bool;

    /// True iff `self` is covered by `other` in the partial order.
    fn leq(&self, other: &Self) -> bool;
    /// True iff both elements denote the same point of the lattice.
    fn equals(&self, other: &Self) -> bool;

    /// Turns this element into the least element of the lattice, in place.
    fn set_to_bottom(&mut self);
    /// Turns this element into the greatest element of the lattice, in place.
    fn set_to_top(&mut self);

    /// Replaces `self` by the least upper bound of `self` and `other`.
    fn join_with(&mut self, other: &Self);
    /// Replaces `self` by an extrapolated upper bound of `self` and `other`.
    fn widen_with(&mut self, other: &Self);
    /// Replaces `self` by the greatest lower bound of `self` and `other`.
    fn meet_with(&mut self, other: &Self);
    /// Replaces `self` by a refinement of `self` knowing `other`.
    fn narrow_with(&mut self, other: &Self);

    /// Functional counterpart of `join_with`: returns the least upper bound
    /// of both operands and leaves them untouched.
    fn join(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.join_with(other);
        result
    }
    /// Functional counterpart of `widen_with`: returns the extrapolated
    /// upper bound of both operands and leaves them untouched.
    fn widening(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.widen_with(other);
        result
    }
    /// Functional counterpart of `meet_with`: returns the greatest lower
    /// bound of both operands and leaves them untouched.
    fn meet(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.meet_with(other);
        result
    }
    /// Functional counterpart of `narrow_with`: returns the refinement of
    /// `self` knowing `other` and leaves both operands untouched.
    fn narrowing(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.narrow_with(other);
        result
    }
}
