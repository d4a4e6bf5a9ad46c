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

//! This module provides the reference powerset value: finite sets of
//! hashable elements ordered by inclusion, with an explicit marker standing
//! for the whole universe. This is the domain most of the classic dataflow
//! analyses (liveness, reaching definitions, ...) are built upon, and the
//! witness we use to validate that the framework composes correctly.
use std::hash::Hash;
use std::iter::FromIterator;

use metrohash::MetroHashSet;

use crate::abstraction::domain::AbstractValue;
use crate::common::Kind;
use crate::implementation::scaffolding::Scaffolding;

/// This type is the regular element of a powerset lattice over some hashable
/// element type `T`: either a finite set of elements, or the saturated
/// marker standing for "every element of the universe". The latter is needed
/// because the universe of an arbitrary `T` is not enumerable; it classifies
/// as Top so that the scaffolding normalizes it away.
///
/// The empty finite set is a perfectly regular element (the least of the
/// regular ones). The Bottom of the lattice is managed by the scaffolding
/// and has no representation here.
#[derive(Clone, Debug)]
pub enum PowersetValue<T: Eq + Hash + Clone> {
    /// A finite set of elements of the universe.
    Finite(MetroHashSet<T>),
    /// Every single element of the universe at once.
    Universe
}

impl <T: Eq + Hash + Clone> PowersetValue<T> {
    /// Creates the empty set.
    pub fn empty() -> Self {
        PowersetValue::Finite(MetroHashSet::default())
    }
    /// Creates the saturated set standing for the whole universe.
    pub fn universe() -> Self {
        PowersetValue::Universe
    }

    /// Adds the given element to the set. Adding anything to the universe
    /// leaves it saturated.
    pub fn add(&mut self, elem: T) {
        if let PowersetValue::Finite(set) = self {
            set.insert(elem);
        }
    }
    /// Removes the given element from the set if it was present. The
    /// universe absorbs removals: dropping one element out of "everything"
    /// is not representable, and over-approximating is always allowed.
    pub fn remove(&mut self, elem: &T) {
        if let PowersetValue::Finite(set) = self {
            set.remove(elem);
        }
    }
    /// Returns true iff the set contains the given element.
    pub fn contains(&self, elem: &T) -> bool {
        match self {
            PowersetValue::Finite(set) => set.contains(elem),
            PowersetValue::Universe    => true
        }
    }
    /// Returns the number of elements in the set. This count is only
    /// meaningful for finite sets; the universe answers zero.
    pub fn len(&self) -> usize {
        match self {
            PowersetValue::Finite(set) => set.len(),
            PowersetValue::Universe    => 0
        }
    }
    /// Returns true iff this is the empty finite set.
    pub fn is_empty(&self) -> bool {
        match self {
            PowersetValue::Finite(set) => set.is_empty(),
            PowersetValue::Universe    => false
        }
    }
    /// Returns an iterator over the elements of the finite set. The
    /// saturated set has no finite enumeration; the scaffolding normalizes
    /// it away before any client can iterate it.
    pub fn iter(&self) -> impl Iterator<Item=&T> {
        match self {
            PowersetValue::Finite(set) => set.iter(),
            PowersetValue::Universe    => unreachable!("iterating a saturated set")
        }
    }
}

impl <T: Eq + Hash + Clone> Default for PowersetValue<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl <T: Eq + Hash + Clone> AbstractValue for PowersetValue<T> {
    fn clear(&mut self) {
        *self = Self::empty();
    }
    fn kind(&self) -> Kind {
        match self {
            PowersetValue::Finite(_) => Kind::Value,
            PowersetValue::Universe  => Kind::Top
        }
    }

    fn leq(&self, other: &Self) -> bool {
        match (self, other) {
            (PowersetValue::Finite(a), PowersetValue::Finite(b)) => a.is_subset(b),
            (_,                        PowersetValue::Universe ) => true,
            (PowersetValue::Universe,  PowersetValue::Finite(_)) => false
        }
    }
    fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (PowersetValue::Finite(a), PowersetValue::Finite(b)) => a == b,
            (PowersetValue::Universe,  PowersetValue::Universe ) => true,
            _                                                    => false
        }
    }

    fn join_with(&mut self, other: &Self) -> Kind {
        match other {
            PowersetValue::Universe  => {
                *self = PowersetValue::Universe;
                Kind::Top
            },
            PowersetValue::Finite(b) => match self {
                PowersetValue::Finite(a) => {
                    a.extend(b.iter().cloned());
                    Kind::Value
                },
                PowersetValue::Universe  => Kind::Top
            }
        }
    }
    /// The chains of this lattice are as long as the number of distinct
    /// elements a client ever inserts, which is finite. Joining is thus a
    /// perfectly fine widening.
    fn widen_with(&mut self, other: &Self) -> Kind {
        self.join_with(other)
    }
    fn meet_with(&mut self, other: &Self) -> Kind {
        match other {
            PowersetValue::Universe  => self.kind(),
            PowersetValue::Finite(b) => match self {
                PowersetValue::Finite(a) => {
                    a.retain(|x| b.contains(x));
                    Kind::Value
                },
                PowersetValue::Universe  => {
                    *self = PowersetValue::Finite(b.clone());
                    Kind::Value
                }
            }
        }
    }
    fn narrow_with(&mut self, other: &Self) -> Kind {
        self.meet_with(other)
    }
}

/// This is the powerset domain itself: the scaffolded lifting of the
/// powerset value. On top of the plain `AbstractDomain` contract, it
/// forwards the usual set operations to the underlying value whenever the
/// element is regular; the extremal elements simply absorb mutation (there
/// is nothing to add to "everything", and nothing reaches an unreachable
/// state).
pub type PowersetDomain<T> = Scaffolding<PowersetValue<T>>;

impl <T: Eq + Hash + Clone> PowersetDomain<T> {
    /// Creates the element denoting the empty set. Note that this is *not*
    /// the Bottom of the lattice: the empty set is a regular, perfectly
    /// reachable state.
    pub fn empty() -> Self {
        Self::from(PowersetValue::empty())
    }
    /// Adds the given element to the set.
    pub fn add(&mut self, elem: T) {
        if self.kind() == Kind::Value {
            self.value_mut().add(elem);
            self.normalize();
        }
    }
    /// Removes the given element from the set.
    pub fn remove(&mut self, elem: &T) {
        if self.kind() == Kind::Value {
            self.value_mut().remove(elem);
            self.normalize();
        }
    }
    /// Returns true iff the set contains the given element. Top contains
    /// everything and Bottom contains nothing.
    pub fn contains(&self, elem: &T) -> bool {
        match self.kind() {
            Kind::Value  => self.value().contains(elem),
            Kind::Top    => true,
            Kind::Bottom => false
        }
    }
    /// Returns the number of elements of a regular set element.
    pub fn len(&self) -> usize {
        self.value().len()
    }
    /// Returns true iff this element is the (regular) empty set.
    pub fn is_empty(&self) -> bool {
        self.kind() == Kind::Value && self.value().is_empty()
    }
    /// Returns an iterator over the elements of a regular set element.
    /// Extremal elements yield nothing.
    pub fn iter(&self) -> impl Iterator<Item=&T> {
        match self.kind() {
            Kind::Value => Some(self.value().iter()).into_iter().flatten(),
            _           => None.into_iter().flatten()
        }
    }
}

/// Collecting an iterator of elements produces the regular element holding
/// exactly these elements.
impl <T: Eq + Hash + Clone> FromIterator<T> for PowersetDomain<T> {
    fn from_iter<I: IntoIterator<Item=T>>(iter: I) -> Self {
        let mut set = MetroHashSet::default();
        set.extend(iter);
        Self::from(PowersetValue::Finite(set))
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
