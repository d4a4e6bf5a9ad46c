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

//! This module provides the dense variant of the powerset value: a compact
//! bitset over the universe `0..universe_size`. This is the representation
//! of choice when the analyzed entities are numbered (variables, registers,
//! definitions, ...): the set operations then work a machine-word at a time.
use std::iter::Cloned;
use std::slice::Iter;

use bitset_fixed::BitSet;

use crate::abstraction::domain::AbstractValue;
use crate::common::Kind;
use crate::implementation::scaffolding::Scaffolding;

/// This type is the regular element of a powerset lattice over the finite
/// universe `0..universe_size`, encoded compactly as a fixed size bitset.
///
/// Because the universe is finite and known, the saturated bitset (the one
/// where every member is present) *is* the universe: `kind()` classifies it
/// as Top and the scaffolding normalizes it away. All binary operations
/// assume both operands range over the same universe.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BitSetValue {
    universe: usize,
    bits    : BitSet
}

impl BitSetValue {
    /// Creates the empty set over the universe `0..universe_size`.
    pub fn new(universe_size: usize) -> Self {
        BitSetValue { universe: universe_size, bits: BitSet::new(universe_size) }
    }
    /// Creates the set over `0..universe_size` holding the given members.
    pub fn with_members(universe_size: usize, members: &[usize]) -> Self {
        let mut result = Self::new(universe_size);
        for m in members {
            result.add(*m);
        }
        result
    }

    /// Returns the size of the universe this set ranges over.
    pub fn universe_size(&self) -> usize {
        self.universe
    }
    /// Adds the given member to the set.
    pub fn add(&mut self, member: usize) {
        self.bits.set(member, true);
    }
    /// Removes the given member from the set.
    pub fn remove(&mut self, member: usize) {
        self.bits.set(member, false);
    }
    /// Returns true iff the set contains the given member.
    pub fn contains(&self, member: usize) -> bool {
        member < self.universe && self.bits[member]
    }
    /// Returns the number of members in the set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }
    /// Returns true iff the set holds no member at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns an iterator over the members of the set.
    pub fn iter(&self) -> OnesIter {
        OnesIter::new(&self.bits)
    }
}

impl Default for BitSetValue {
    fn default() -> Self {
        Self::new(0)
    }
}

impl AbstractValue for BitSetValue {
    fn clear(&mut self) {
        self.bits = BitSet::new(self.universe);
    }
    fn kind(&self) -> Kind {
        if self.universe > 0 && self.len() == self.universe {
            Kind::Top
        } else {
            Kind::Value
        }
    }

    /// Inclusion, tested a machine-word at a time on the backing buffers.
    fn leq(&self, other: &Self) -> bool {
        self.bits.buffer().iter()
            .zip(other.bits.buffer().iter())
            .all(|(x, y)| x & !y == 0)
    }
    fn equals(&self, other: &Self) -> bool {
        self.bits == other.bits
    }

    fn join_with(&mut self, other: &Self) -> Kind {
        for member in other.iter() {
            self.bits.set(member, true);
        }
        self.kind()
    }
    /// The lattice has a finite height (the size of the universe), so the
    /// join is a perfectly fine widening.
    fn widen_with(&mut self, other: &Self) -> Kind {
        self.join_with(other)
    }
    fn meet_with(&mut self, other: &Self) -> Kind {
        for member in 0..self.universe {
            if self.bits[member] && !other.contains(member) {
                self.bits.set(member, false);
            }
        }
        self.kind()
    }
    fn narrow_with(&mut self, other: &Self) -> Kind {
        self.meet_with(other)
    }
}

/// This is the dense powerset domain itself: the scaffolded lifting of the
/// bitset value, with the usual set operations forwarded to the underlying
/// value whenever the element is regular.
pub type BitSetDomain = Scaffolding<BitSetValue>;

impl BitSetDomain {
    /// Creates the element denoting the empty set over `0..universe_size`.
    /// This is *not* the Bottom of the lattice: the empty set is a regular,
    /// perfectly reachable state.
    pub fn empty(universe_size: usize) -> Self {
        Self::from(BitSetValue::new(universe_size))
    }
    /// Creates the element holding the given members of `0..universe_size`.
    pub fn with_members(universe_size: usize, members: &[usize]) -> Self {
        Self::from(BitSetValue::with_members(universe_size, members))
    }
    /// Adds the given member to the set.
    pub fn add(&mut self, member: usize) {
        if self.kind() == Kind::Value {
            self.value_mut().add(member);
            self.normalize();
        }
    }
    /// Removes the given member from the set.
    pub fn remove(&mut self, member: usize) {
        if self.kind() == Kind::Value {
            self.value_mut().remove(member);
            self.normalize();
        }
    }
    /// Returns true iff the set contains the given member. Top contains
    /// every member and Bottom contains none.
    pub fn contains(&self, member: usize) -> bool {
        match self.kind() {
            Kind::Value  => self.value().contains(member),
            Kind::Top    => true,
            Kind::Bottom => false
        }
    }
    /// Returns the number of members of a regular set element.
    pub fn len(&self) -> usize {
        self.value().len()
    }
    /// Returns an iterator over the members of a regular set element.
    /// Extremal elements yield nothing.
    pub fn iter(&self) -> OnesIter {
        match self.kind() {
            Kind::Value => self.value().iter(),
            _           => OnesIter::empty()
        }
    }
}

/// This structure defines an iterator over the members (the 1-bits) of a
/// bitset value. It walks the words of the backing buffer and strips the
/// lowest set bit of the current word at each step, so it is more efficient
/// than a crude probe of every position in the universe.
pub struct OnesIter<'a> {
    /// An iterator over the remaining words of the backing buffer.
    iter: Cloned<Iter<'a, u64>>,
    /// The current word, with the bits already yielded stripped off.
    word: Option<u64>,
    /// The member denoted by bit 0 of the current word.
    base: usize
}

impl OnesIter<'_> {
    fn new(bits: &BitSet) -> OnesIter {
        let mut iter = bits.buffer().iter().cloned();
        let word = iter.next();
        OnesIter { iter, word, base: 0 }
    }
    /// An iterator yielding no member at all (the iteration of an extremal
    /// set element).
    fn empty() -> OnesIter<'static> {
        static NO_WORDS: [u64; 0] = [];
        OnesIter { iter: NO_WORDS.iter().cloned(), word: None, base: 0 }
    }
}

impl Iterator for OnesIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while let Some(w) = self.word {
            if w == 0 {
                self.word  = self.iter.next();
                self.base += 64;
            } else {
                let offset = w.trailing_zeros() as usize;
                self.word  = Some(w & (w - 1));
                return Some(self.base + offset);
            }
        }
        None
    }
}


// ############################################################################
// #### TESTS #################################################################
// ############################################################################
