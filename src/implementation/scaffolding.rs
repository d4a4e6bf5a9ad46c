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

//! This module provides the scaffolding combinator: the adapter which lifts
//! any `AbstractValue` into a complete `AbstractDomain`. The quadratic case
//! table dealing with Top and Bottom operands lives here, once and for all;
//! the lifted value only ever sees regular operands.
use crate::abstraction::domain::{AbstractDomain, AbstractValue};
use crate::common::Kind;

/// This structure is the domain obtained by lifting the abstract value `V`.
/// It carries the kind of the element alongside its (possibly cleared)
/// representation, and implements the whole `AbstractDomain` contract by
/// short-circuiting the extremal cases and delegating the regular ones to
/// the value-level operations.
///
/// # Invariant
/// Whenever `kind` is extremal (Top or Bottom), the underlying value is
/// cleared: extremal elements hold no representation resources.
///
/// # Example:
/// ```
/// # use absint::prelude::*;
/// let mut a = PowersetDomain::<usize>::bottom();
/// let     b = vec![1, 2].into_iter().collect::<PowersetDomain<usize>>();
/// // joining anything into bottom amounts to copying it
/// a.join_with(&b);
/// assert!(a.equals(&b));
/// ```
#[derive(Clone, Debug)]
pub struct Scaffolding<V: AbstractValue> {
    kind : Kind,
    value: V
}

impl <V: AbstractValue> Scaffolding<V> {
    /// Classifies this element.
    pub fn kind(&self) -> Kind {
        self.kind
    }
    /// Grants read access to the underlying value. The content is only
    /// meaningful when the element is of `Value` kind: extremal elements
    /// keep their value cleared.
    pub fn value(&self) -> &V {
        &self.value
    }
    /// Grants write access to the underlying value. A derived domain that
    /// mutates the value through this accessor *must* call `normalize()`
    /// afterwards, so that a representation which collapsed to an extremum
    /// is properly coalesced.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
    /// Re-establishes the structural invariant after a direct mutation of
    /// the underlying value: the kind is re-read from the value and, if it
    /// turns out extremal, the representation is cleared.
    pub fn normalize(&mut self) {
        self.kind = self.value.kind();
        if self.kind.is_extremal() {
            self.value.clear();
        }
    }

    /// Factors out the join-like operations (`join_with` and `widen_with`):
    /// these two only differ by the value-level operation they delegate to.
    fn join_like_with<F>(&mut self, other: &Self, op: F)
        where F: FnOnce(&mut V, &V) -> Kind
    {
        if self.kind == Kind::Top || other.kind == Kind::Bottom {
            return;
        }
        if other.kind == Kind::Top {
            self.set_to_top();
        } else if self.kind == Kind::Bottom {
            *self = other.clone();
        } else {
            self.kind = op(&mut self.value, &other.value);
            if self.kind.is_extremal() {
                self.value.clear();
            }
        }
    }
    /// Factors out the meet-like operations (`meet_with` and `narrow_with`),
    /// which short-circuit on the extrema exactly dually to the join-like
    /// ones.
    fn meet_like_with<F>(&mut self, other: &Self, op: F)
        where F: FnOnce(&mut V, &V) -> Kind
    {
        if self.kind == Kind::Bottom || other.kind == Kind::Top {
            return;
        }
        if other.kind == Kind::Bottom {
            self.set_to_bottom();
        } else if self.kind == Kind::Top {
            *self = other.clone();
        } else {
            self.kind = op(&mut self.value, &other.value);
            if self.kind.is_extremal() {
                self.value.clear();
            }
        }
    }
}

/// The default element is whatever the default value of `V` stands for;
/// most of the time this is the least informative regular element of the
/// lattice (an empty set, a degenerate interval).
impl <V: AbstractValue> Default for Scaffolding<V> {
    fn default() -> Self {
        Self::from(V::default())
    }
}

/// Lifting a value normalizes it on the way in: a representation denoting
/// an extremum comes out as the extremal element itself.
impl <V: AbstractValue> From<V> for Scaffolding<V> {
    fn from(value: V) -> Self {
        let mut lifted = Scaffolding { kind: Kind::Value, value };
        lifted.normalize();
        lifted
    }
}

impl <V: AbstractValue> AbstractDomain for Scaffolding<V> {
    fn bottom() -> Self {
        let mut value = V::default();
        value.clear();
        Scaffolding { kind: Kind::Bottom, value }
    }
    fn top() -> Self {
        let mut value = V::default();
        value.clear();
        Scaffolding { kind: Kind::Top, value }
    }

    fn is_bottom(&self) -> bool {
        self.kind == Kind::Bottom
    }
    fn is_top(&self) -> bool {
        self.kind == Kind::Top
    }

    fn leq(&self, other: &Self) -> bool {
        if self.kind == Kind::Bottom || other.kind == Kind::Top {
            true
        } else if self.kind == Kind::Top || other.kind == Kind::Bottom {
            false
        } else {
            self.value.leq(&other.value)
        }
    }
    /// Two elements are equal iff their kinds match and, when both are
    /// regular, their values are equal. The kinds are compared first so that
    /// two cleared representations can never make Top equal Bottom.
    fn equals(&self, other: &Self) -> bool {
        self.kind == other.kind
            && (self.kind != Kind::Value || self.value.equals(&other.value))
    }

    fn set_to_bottom(&mut self) {
        self.kind = Kind::Bottom;
        self.value.clear();
    }
    fn set_to_top(&mut self) {
        self.kind = Kind::Top;
        self.value.clear();
    }

    fn join_with(&mut self, other: &Self) {
        self.join_like_with(other, V::join_with)
    }
    fn widen_with(&mut self, other: &Self) {
        self.join_like_with(other, V::widen_with)
    }
    fn meet_with(&mut self, other: &Self) {
        self.meet_like_with(other, V::meet_with)
    }
    fn narrow_with(&mut self, other: &Self) {
        self.meet_like_with(other, V::narrow_with)
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
