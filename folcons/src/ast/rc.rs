//! This module implements `Rc`, the shared handle through which interned expressions are
//! accessed.

use super::pool::storage::Storage;
use std::{
    cell::RefCell,
    fmt,
    hash::{Hash, Hasher},
    mem,
    ops::Deref,
    rc,
};

/// A value that can be interned in a [`Pool`](super::Pool).
///
/// Freeing an entry moves its operands out of it and releases them in a loop, instead of letting
/// each entry drop its operands recursively. This keeps the stack bounded when the last handle to
/// a deeply nested expression is dropped.
pub trait Interned: Sized {
    /// A value with no operands. It replaces the value of an entry that is being freed.
    const EMPTY: Self;

    /// Releases the operands of a value that was moved out of its entry.
    fn release(self);
}

/// The allocation behind an `Rc`: the interned value, its structural hash, and a back-reference
/// to the registry of the pool that owns the canonical entry.
pub(crate) struct Node<T: Interned> {
    pub(crate) hash: u64,
    pub(crate) value: T,
    storage: rc::Weak<RefCell<Storage<T>>>,
}

impl<T: Interned> Node<T> {
    pub(crate) fn new(hash: u64, value: T, storage: rc::Weak<RefCell<Storage<T>>>) -> Self {
        Self { hash, value, storage }
    }

    /// Moves the value out of the node, leaving `T::EMPTY` in its place. The node itself is
    /// dropped, which removes its registration.
    pub(crate) fn into_value(mut self) -> T {
        mem::replace(&mut self.value, T::EMPTY)
    }
}

impl<T: Interned> Drop for Node<T> {
    fn drop(&mut self) {
        // The strong count is already zero at this point, so no lookup can return this entry
        // anymore. If the pool was dropped first, there is nothing to remove.
        if let Some(storage) = self.storage.upgrade() {
            let borrowed = storage.try_borrow_mut();
            match borrowed {
                Ok(mut storage) => storage.evict(self.hash),
                // Only happens if the last handle is dropped while the registry is borrowed. The
                // dead registration is pruned on the next insertion into the same bucket
                Err(_) => log::trace!("deferred eviction of entry with hash {:#018x}", self.hash),
            };
        }
        mem::replace(&mut self.value, T::EMPTY).release();
    }
}

/// A shared handle to an interned expression.
///
/// Handles are only ever created by a pool (see [`Pool::add`](super::Pool::add) and the factory
/// methods of [`TermPool`](super::TermPool) and [`FormulaPool`](super::FormulaPool)). The pool
/// guarantees that, while a handle is alive, any request to build a structurally equal value
/// returns a handle to the same allocation. When the last handle to an allocation is dropped, the
/// allocation is freed and its registration is removed from the pool.
///
/// Equality is structural, but it first compares the allocations by reference, so comparing two
/// handles that came from the same pool is a constant time operation when they are equal. Hashing
/// uses the structural hash computed once when the value was interned, so it is also constant
/// time, and it agrees with equality even between handles that came from different pools.
///
/// # Examples
///
/// ```
/// # use folcons::ast::*;
/// let pool = TermPool::new();
/// let a = pool.make_variable("x");
/// let b = pool.make_variable("x");
/// assert!(Rc::ptr_eq(&a, &b));
/// assert_eq!(Rc::strong_count(&a), 2);
///
/// let other = TermPool::new();
/// let c = other.make_variable("x");
/// assert!(!Rc::ptr_eq(&a, &c));
/// assert_eq!(a, c);
/// ```
pub struct Rc<T: Interned>(rc::Rc<Node<T>>);

// If we simply `#[derive(Clone)]`, it would require that the type parameter `T` also implements
// `Clone`, even though it is of course not needed.
impl<T: Interned> Clone for Rc<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: Interned + PartialEq> PartialEq for Rc<T> {
    fn eq(&self, other: &Self) -> bool {
        rc::Rc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash && self.0.value == other.0.value)
    }
}

impl<T: Interned + Eq> Eq for Rc<T> {}

impl<T: Interned> Hash for Rc<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl<T: Interned> Deref for Rc<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0.value
    }
}

impl<T: Interned> AsRef<T> for Rc<T> {
    fn as_ref(&self) -> &T {
        &self.0.value
    }
}

impl<T: Interned + fmt::Debug> fmt::Debug for Rc<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.0.value, f)
    }
}

impl<T: Interned + fmt::Display> fmt::Display for Rc<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0.value, f)
    }
}

impl<T: Interned> Rc<T> {
    pub(crate) fn from_node(node: rc::Rc<Node<T>>) -> Self {
        Self(node)
    }

    /// Returns the node if this is its last handle, or the handle back otherwise.
    pub(crate) fn try_unwrap(this: Self) -> Result<Node<T>, Self> {
        rc::Rc::try_unwrap(this.0).map_err(Self)
    }

    /// Returns `true` if both handles point to the same canonical entry.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        rc::Rc::ptr_eq(&this.0, &other.0)
    }

    /// Similar to [`std::rc::Rc::strong_count`].
    pub fn strong_count(this: &Self) -> usize {
        rc::Rc::strong_count(&this.0)
    }

    /// Returns the structural hash of the value, computed when it was interned.
    pub fn structural_hash(this: &Self) -> u64 {
        this.0.hash
    }
}
