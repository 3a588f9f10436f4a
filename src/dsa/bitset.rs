use std::borrow::Borrow;
use std::marker::PhantomData;

use log::trace;

use crate::dsa::element::Element;
use crate::dsa::growth::GrowthPolicy;

pub type Unit = u64;
pub(crate) const UNIT_BITS:u64 = Unit::BITS as u64;

/// A growable bit-vector used as a membership set for unsigned integers.
///
/// Value `x` lives at bit `x % 64` of unit `x / 64`. Storage only grows:
/// `add` appends zeroed units when needed, `remove` and `contains` never
/// allocate and treat anything past the last unit as absent.
///
/// Not synchronized, wrap it in a lock if several threads need it.
#[derive(Clone)]
pub struct BitSet<T:Element> {
    //never empty, new() and with_max() both start with at least one unit
    units:Vec<Unit>,
    policy:GrowthPolicy,
    _m:PhantomData<T>
}

impl<T:Element> BitSet<T> {
    /// One zeroed unit, so values 0..64 fit without growing.
    pub fn new() -> Self {
        Self::from_units(vec![0])
    }
    /// Pre-sized so that `max_value` is addressable without growing.
    /// This is the largest value you plan to store, NOT the element count.
    pub fn with_max(max_value:T) -> Self {
        let (index,_) = Self::locate(max_value);
        let index = index.expect("unit index exceeds the address space, allocation impossible");
        Self::from_units(vec![0;index + 1])
    }
    pub(crate) fn from_units(units:Vec<Unit>) -> Self {
        debug_assert!(!units.is_empty());
        Self {
            units,policy:GrowthPolicy::default(),_m:PhantomData
        }
    }
    pub fn with_growth_policy(mut self,policy:GrowthPolicy) -> Self {
        self.policy = policy;
        self
    }
    pub fn growth_policy(&self) -> GrowthPolicy {
        self.policy
    }

    // (unit index, mask with only the bit offset set)
    // index is None when it can't be represented as usize on this target
    #[inline]
    fn locate(x:T) -> (Option<usize>,Unit) {
        let x = x.widen();
        let index = usize::try_from(x / UNIT_BITS).ok();
        (index,1 << (x % UNIT_BITS))
    }

    pub fn add(&mut self,x:T) {
        let (index,mask) = Self::locate(x);
        let index = index.expect("unit index exceeds the address space, allocation impossible");
        if index >= self.units.len() {
            self.grow(index);
        }
        self.units[index] |= mask;
    }
    fn grow(&mut self,index:usize) {
        let old_len = self.units.len();
        let new_len = self.policy.target_len(old_len,index);
        //Vec aborts on allocation failure
        self.units.resize(new_len,0);
        trace!("bitset grew from {old_len} to {new_len} units ({:?})",self.policy);
    }
    /// Clears `x`. A no-op when `x` was never added or lies past the storage.
    pub fn remove(&mut self,x:T) {
        let (index,mask) = Self::locate(x);
        if let Some(unit) = index.and_then(|i| self.units.get_mut(i)) {
            *unit &= !mask;
        }
    }
    pub fn contains(&self,x:T) -> bool {
        let (index,mask) = Self::locate(x);
        index
            .and_then(|i| self.units.get(i))
            .is_some_and(|unit| unit & mask != 0)
    }
    /// True on the first present value, false for an empty input.
    pub fn contains_any<I,B>(&self,values:I) -> bool
    where I:IntoIterator<Item = B>, B:Borrow<T> {
        values.into_iter().any(|x| self.contains(*x.borrow()))
    }
    /// False on the first absent value, true for an empty input.
    pub fn contains_all<I,B>(&self,values:I) -> bool
    where I:IntoIterator<Item = B>, B:Borrow<T> {
        values.into_iter().all(|x| self.contains(*x.borrow()))
    }

    /// Number of storage units, not the number of set bits.
    pub fn size(&self) -> usize {
        self.units.len()
    }
    /// Largest addressable value + 1 before the next growth.
    pub fn capacity(&self) -> u64 {
        self.units.len() as u64 * UNIT_BITS
    }
    pub fn unit_index(x:T) -> u64 {
        x.widen() / UNIT_BITS
    }
    /// The unit holding `x`, None when `x` is past the storage.
    pub fn storage_unit(&self,x:T) -> Option<Unit> {
        let (index,_) = Self::locate(x);
        index.and_then(|i| self.units.get(i)).copied()
    }
    pub fn units(&self) -> &[Unit] {
        &self.units
    }
}

impl<T:Element> Default for BitSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

// the growth policy is configuration, two sets with the same bits are equal
impl<T:Element> PartialEq for BitSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.units == other.units
    }
}

impl<T:Element> Eq for BitSet<T> {}

impl<T:Element> Extend<T> for BitSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl<T:Element> FromIterator<T> for BitSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
