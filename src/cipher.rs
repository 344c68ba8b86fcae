//! Ciphertext container: a growable, owned sequence of ring elements.

use std::fmt;
use std::sync::Arc;

use crate::context::RingContext;
use crate::error::{MorphError, Result};
use crate::polynomial::RingElement;

/// (c₀, c₁, …, c_{k-1}), decrypting as Σ sⁱ·cᵢ.
///
/// Slots below `len` are always materialized. Slots in `len..capacity` may
/// keep elements from an earlier, larger use; they are recycled, never read.
#[derive(Clone, Debug)]
pub struct Cipher {
    ctx: Arc<RingContext>,
    slots: Vec<Option<RingElement>>,
    len: usize,
    /// Multiplicative depth, for diagnostics only.
    pub depth: u32,
}

impl Cipher {
    /// Empty ciphertext with `capacity` unmaterialized slots.
    pub fn new(ctx: &Arc<RingContext>, capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        slots.resize_with(capacity, || None);
        Ok(Self {
            ctx: Arc::clone(ctx),
            slots,
            len: 0,
            depth: 0,
        })
    }

    /// Ciphertext holding exactly `elements`.
    #[must_use]
    pub fn from_elements(ctx: &Arc<RingContext>, elements: Vec<RingElement>) -> Self {
        let len = elements.len();
        Self {
            ctx: Arc::clone(ctx),
            slots: elements.into_iter().map(Some).collect(),
            len,
            depth: 0,
        }
    }

    /// Context the ciphertext was created under.
    #[must_use]
    pub fn context(&self) -> &Arc<RingContext> {
        &self.ctx
    }

    /// Number of elements in use.
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// True before any element is in use.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated slots; only ever grows.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Element `i`, if `i` is below the logical size.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<&RingElement> {
        if i < self.len {
            self.slots[i].as_ref()
        } else {
            None
        }
    }

    /// Element `i`, or `MissingElement` if it is not in use.
    pub fn element(&self, i: usize) -> Result<&RingElement> {
        self.get(i).ok_or(MorphError::MissingElement { index: i })
    }

    /// Elements in use, in order.
    pub fn iter(&self) -> impl Iterator<Item = &RingElement> + Clone + '_ {
        self.slots[..self.len].iter().flatten()
    }

    /// Extends storage to at least `capacity` slots. New slots start empty;
    /// existing slots are left untouched. Never shrinks.
    pub fn grow_to(&mut self, capacity: usize) -> Result<()> {
        if capacity <= self.slots.len() {
            return Ok(());
        }
        self.slots.try_reserve_exact(capacity - self.slots.len())?;
        self.slots.resize_with(capacity, || None);
        Ok(())
    }

    /// Sets the logical size to `size`, growing and materializing slots as needed.
    ///
    /// Slots that already hold an element keep their contents; callers
    /// overwrite or reset them.
    pub(crate) fn resize(&mut self, size: usize) -> Result<()> {
        self.grow_to(size)?;
        let n = self.ctx.n();
        for slot in &mut self.slots[..size] {
            if slot.is_none() {
                *slot = Some(RingElement::try_zero(n)?);
            }
        }
        self.len = size;
        Ok(())
    }

    /// Mutable access to a slot below the logical size.
    pub(crate) fn slot_mut(&mut self, i: usize) -> Result<&mut RingElement> {
        if i >= self.len {
            return Err(MorphError::MissingElement { index: i });
        }
        self.slots[i].as_mut().ok_or(MorphError::MissingElement { index: i })
    }
}

impl fmt::Display for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, poly) in self.iter().enumerate() {
            writeln!(f, "cipher-poly[{i}]:")?;
            writeln!(f, "{poly}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> Arc<RingContext> {
        RingContext::new(8).unwrap()
    }

    #[test]
    fn test_new_is_empty() {
        let c = Cipher::new(&ctx(), 3).unwrap();
        assert_eq!(c.capacity(), 3);
        assert_eq!(c.size(), 0);
        assert!(c.is_empty());
        assert!(c.get(0).is_none());
    }

    #[test]
    fn test_grow_preserves_elements() {
        let ctx = ctx();
        let a = RingElement::from_coeffs(vec![1, 2, 3]);
        let b = RingElement::from_coeffs(vec![-4]);
        let mut c = Cipher::from_elements(&ctx, vec![a.clone(), b.clone()]);

        c.grow_to(6).unwrap();
        assert_eq!(c.capacity(), 6);
        assert_eq!(c.size(), 2);
        assert_eq!(c.get(0), Some(&a));
        assert_eq!(c.get(1), Some(&b));

        // never shrinks
        c.grow_to(1).unwrap();
        assert_eq!(c.capacity(), 6);
    }

    #[test]
    fn test_resize_materializes() {
        let mut c = Cipher::new(&ctx(), 0).unwrap();
        c.resize(3).unwrap();
        assert_eq!(c.size(), 3);
        assert!(c.iter().all(RingElement::is_zero));
        assert_eq!(c.iter().count(), 3);

        c.slot_mut(2).unwrap().set_coeff(0, 5);
        c.resize(2).unwrap();
        assert_eq!(c.capacity(), 3);
        assert!(c.get(2).is_none());
        assert!(matches!(c.slot_mut(2), Err(MorphError::MissingElement { index: 2 })));
        assert!(matches!(c.element(4), Err(MorphError::MissingElement { index: 4 })));
    }

    #[test]
    fn test_grow_reports_allocation_failure() {
        let mut c = Cipher::from_elements(&ctx(), vec![RingElement::constant(3)]);
        assert!(matches!(c.grow_to(usize::MAX), Err(MorphError::Allocation(_))));
        assert_eq!(c.capacity(), 1);
        assert_eq!(c.get(0), Some(&RingElement::constant(3)));
    }

    #[test]
    fn test_display_dump() {
        let c = Cipher::from_elements(&ctx(), vec![RingElement::constant(1), RingElement::from_coeffs(vec![0, -1])]);
        assert_eq!(c.to_string(), "cipher-poly[0]:\n[1]\ncipher-poly[1]:\n[0, -1]\n");
    }
}
