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

//! This module provides the interval value: ranges of integers with possibly
//! infinite bounds. Unlike the powersets, this lattice has infinitely
//! ascending chains; it is the value one reaches for when analyzing
//! numerical quantities (counters, indices, sizes), and the witness we use
//! to validate that widening actually enforces termination.
use crate::abstraction::domain::AbstractValue;
use crate::common::Kind;
use crate::implementation::scaffolding::Scaffolding;

// ----------------------------------------------------------------------------
// --- BOUND ------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type denotes one bound of an interval: either an actual integer or
/// one of the two infinities. The derived ordering is the expected one:
/// `NegInf < Finite(a) < Finite(b) < PosInf` whenever `a < b`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Bound {
    /// The bound lying below every integer.
    NegInf,
    /// An actual, finite bound.
    Finite(i64),
    /// The bound lying above every integer.
    PosInf
}

impl Bound {
    /// Translates this bound by the given amount. The infinities absorb the
    /// translation and finite bounds saturate instead of wrapping around.
    pub fn shifted(self, delta: i64) -> Bound {
        match self {
            Bound::Finite(x) => Bound::Finite(x.saturating_add(delta)),
            infinite         => infinite
        }
    }
}

// ----------------------------------------------------------------------------
// --- INTERVAL ---------------------------------------------------------------
// ----------------------------------------------------------------------------
/// This type is the regular element of the interval lattice: the set of all
/// integers between `lo` and `hi` (both inclusive when finite).
///
/// The representation is able to denote both extrema of the lattice on its
/// own: the interval spanning the whole line is Top, and an interval whose
/// bounds cross denotes the empty set, that is Bottom. `kind()` reports
/// these cases so the scaffolding can normalize them; a meet which crosses
/// the bounds thereby collapses to the Bottom element, as it should.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct IntervalValue {
    lo: Bound,
    hi: Bound
}

impl IntervalValue {
    /// Creates the interval spanning from `lo` to `hi`.
    pub fn new(lo: Bound, hi: Bound) -> Self {
        IntervalValue { lo, hi }
    }
    /// Creates the finite interval `[lo, hi]`.
    pub fn finite(lo: i64, hi: i64) -> Self {
        Self::new(Bound::Finite(lo), Bound::Finite(hi))
    }
    /// Creates the singleton interval `[value, value]`.
    pub fn constant(value: i64) -> Self {
        Self::finite(value, value)
    }
    /// Creates the upward closed interval `[lo, +oo)`.
    pub fn at_least(lo: i64) -> Self {
        Self::new(Bound::Finite(lo), Bound::PosInf)
    }
    /// Creates the downward closed interval `(-oo, hi]`.
    pub fn at_most(hi: i64) -> Self {
        Self::new(Bound::NegInf, Bound::Finite(hi))
    }

    /// Returns the lower bound of this interval.
    pub fn lo(&self) -> Bound {
        self.lo
    }
    /// Returns the upper bound of this interval.
    pub fn hi(&self) -> Bound {
        self.hi
    }
    /// Translates both bounds by the given amount. This is the abstract
    /// counterpart of adding a constant to the analyzed quantity.
    pub fn shift(&mut self, delta: i64) {
        self.lo = self.lo.shifted(delta);
        self.hi = self.hi.shifted(delta);
    }
}

/// The default interval is the degenerate singleton `[0, 0]`; this is also
/// the representation a cleared interval falls back onto.
impl Default for IntervalValue {
    fn default() -> Self {
        Self::constant(0)
    }
}

impl AbstractValue for IntervalValue {
    fn clear(&mut self) {
        *self = Self::default();
    }
    fn kind(&self) -> Kind {
        if self.lo > self.hi {
            Kind::Bottom
        } else if self.lo == Bound::NegInf && self.hi == Bound::PosInf {
            Kind::Top
        } else {
            Kind::Value
        }
    }

    /// Containment: `[a, b]` is covered by `[c, d]` iff `c <= a` and
    /// `b <= d`.
    fn leq(&self, other: &Self) -> bool {
        other.lo <= self.lo && self.hi <= other.hi
    }
    fn equals(&self, other: &Self) -> bool {
        self.lo == other.lo && self.hi == other.hi
    }

    /// The join of two intervals is their convex hull.
    fn join_with(&mut self, other: &Self) -> Kind {
        self.lo = self.lo.min(other.lo);
        self.hi = self.hi.max(other.hi);
        self.kind()
    }
    /// Widening jumps every unstable bound straight to its infinity: a
    /// growing upper bound becomes `+oo`, a shrinking lower bound becomes
    /// `-oo`. Since an interval can only take such a jump once per side,
    /// every ascending chain stabilizes after at most two widening steps.
    fn widen_with(&mut self, other: &Self) -> Kind {
        if other.lo < self.lo {
            self.lo = Bound::NegInf;
        }
        if other.hi > self.hi {
            self.hi = Bound::PosInf;
        }
        self.kind()
    }
    /// The meet of two intervals is their intersection, which collapses to
    /// Bottom when the bounds cross.
    fn meet_with(&mut self, other: &Self) -> Kind {
        self.lo = self.lo.max(other.lo);
        self.hi = self.hi.min(other.hi);
        self.kind()
    }
    /// Narrowing only refines the bounds a prior widening pushed to the
    /// infinities; the finite bounds, which carry actual information, are
    /// left untouched.
    fn narrow_with(&mut self, other: &Self) -> Kind {
        if self.lo == Bound::NegInf {
            self.lo = other.lo;
        }
        if self.hi == Bound::PosInf {
            self.hi = other.hi;
        }
        self.kind()
    }
}

/// This is the interval domain itself: the scaffolded lifting of the
/// interval value, with a handful of constructors and the `shift` operation
/// forwarded to the underlying value.
pub type IntervalDomain = Scaffolding<IntervalValue>;

impl IntervalDomain {
    /// Creates the element denoting the finite interval `[lo, hi]`.
    pub fn finite(lo: i64, hi: i64) -> Self {
        Self::from(IntervalValue::finite(lo, hi))
    }
    /// Creates the element denoting the singleton `[value, value]`.
    pub fn constant(value: i64) -> Self {
        Self::from(IntervalValue::constant(value))
    }
    /// Creates the element denoting the upward closed interval `[lo, +oo)`.
    pub fn at_least(lo: i64) -> Self {
        Self::from(IntervalValue::at_least(lo))
    }
    /// Creates the element denoting the downward closed interval
    /// `(-oo, hi]`.
    pub fn at_most(hi: i64) -> Self {
        Self::from(IntervalValue::at_most(hi))
    }
    /// Translates a regular interval element by the given amount; the
    /// extremal elements absorb the translation.
    pub fn shift(&mut self, delta: i64) {
        if self.kind() == Kind::Value {
            self.value_mut().shift(delta);
            self.normalize();
        }
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_interval_laws {
    use crate::abstraction::domain::AbstractDomain;
    use crate::implementation::interval::{IntervalDomain, IntervalValue};

    fn fixtures() -> Vec<IntervalDomain> {
        vec![
            IntervalDomain::bottom(),
            IntervalDomain::top(),
            IntervalDomain::constant(0),
            IntervalDomain::finite(0, 10),
            IntervalDomain::finite(-5, 3),
            IntervalDomain::at_least(2),
            IntervalDomain::at_most(7),
        ]
    }

    #[test]
    fn join_and_meet_are_idempotent_and_commutative() {
        for a in fixtures() {
            assert!(a.join(&a).equals(&a));
            assert!(a.meet(&a).equals(&a));
            for b in fixtures() {
                assert!(a.join(&b).equals(&b.join(&a)));
                assert!(a.meet(&b).equals(&b.meet(&a)));
            }
        }
    }
    #[test]
    fn join_is_associative() {
        for a in fixtures() {
            for b in fixtures() {
                for c in fixtures() {
                    assert!(a.join(&b).join(&c).equals(&a.join(&b.join(&c))));
                }
            }
        }
    }
    #[test]
    fn join_absorbs_meet() {
        for a in fixtures() {
            for b in fixtures() {
                assert!(a.join(&a.meet(&b)).equals(&a));
            }
        }
    }
    #[test]
    fn the_order_the_join_and_the_meet_are_consistent() {
        for a in fixtures() {
            for b in fixtures() {
                assert_eq!(a.leq(&b), a.join(&b).equals(&b));
                assert_eq!(a.leq(&b), a.meet(&b).equals(&a));
            }
        }
    }
    #[test]
    fn equality_is_mutual_coverage() {
        for a in fixtures() {
            for b in fixtures() {
                assert_eq!(a.equals(&b), a.leq(&b) && b.leq(&a));
            }
        }
    }
    #[test]
    fn bottom_and_top_bound_every_element() {
        for a in fixtures() {
            assert!(IntervalDomain::bottom().leq(&a));
            assert!(a.leq(&IntervalDomain::top()));
        }
    }
    #[test]
    fn widening_is_an_upper_bound_of_both_operands() {
        for a in fixtures() {
            for b in fixtures() {
                let w = a.widening(&b);
                assert!(a.leq(&w));
                assert!(b.leq(&w));
            }
        }
    }

    #[test]
    fn an_empty_meet_collapses_to_the_bottom_element() {
        let a = IntervalDomain::finite(0, 2);
        let b = IntervalDomain::finite(5, 7);
        assert!(a.meet(&b).is_bottom());
    }

    #[test]
    fn iterated_widening_stabilizes_every_ascending_chain() {
        // the prototypal divergent chain: [0,0] <= [0,1] <= [0,2] <= ...
        let mut stable = IntervalDomain::constant(0);
        let mut steps  = 0;
        for i in 1.. {
            let next    = IntervalDomain::finite(0, i);
            let widened = stable.widening(&next);
            if widened.equals(&stable) {
                break;
            }
            stable = widened;
            steps += 1;
            assert!(steps <= 2, "the chain should have stabilized by now");
        }
        assert!(stable.equals(&IntervalDomain::at_least(0)));
    }
}
