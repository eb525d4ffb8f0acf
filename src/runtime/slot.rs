//! Storage cells
//!
//! Every binding and object member is backed by a [`Slot`]. An owned slot
//! holds its value; an alias forwards reads and writes to another owned
//! slot's cell. Aliases never chain: aliasing an alias shares the same
//! target cell, so there is at most one level of indirection.

use crate::runtime::value::Value;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone)]
pub enum Slot {
    Owned(Rc<RefCell<Value>>),
    Alias(Weak<RefCell<Value>>),
}

impl Slot {
    pub fn new(value: Value) -> Self {
        Slot::Owned(Rc::new(RefCell::new(value)))
    }

    /// An alias forwarding to this slot's owning cell.
    pub fn alias(&self) -> Slot {
        match self {
            Slot::Owned(cell) => Slot::Alias(Rc::downgrade(cell)),
            Slot::Alias(weak) => Slot::Alias(weak.clone()),
        }
    }

    /// An alias whose target is gone reads as Nil.
    pub fn get(&self) -> Value {
        match self {
            Slot::Owned(cell) => cell.borrow().clone(),
            Slot::Alias(weak) => match weak.upgrade() {
                Some(cell) => cell.borrow().clone(),
                None => Value::Nil,
            },
        }
    }

    /// An alias whose target is gone discards the write.
    pub fn set(&self, value: Value) {
        match self {
            Slot::Owned(cell) => *cell.borrow_mut() = value,
            Slot::Alias(weak) => {
                if let Some(cell) = weak.upgrade() {
                    *cell.borrow_mut() = value;
                }
            }
        }
    }

    /// A fresh owned cell holding this slot's current value. Closure capture
    /// copies cells this way rather than sharing them.
    pub fn snapshot(&self) -> Slot {
        Slot::new(self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_forwards_reads_and_writes() {
        let owned = Slot::new(Value::Int(1));
        let alias = owned.alias();

        alias.set(Value::Int(2));
        assert!(matches!(owned.get(), Value::Int(2)));

        owned.set(Value::Int(3));
        assert!(matches!(alias.get(), Value::Int(3)));
    }

    #[test]
    fn test_alias_of_alias_shares_target() {
        let owned = Slot::new(Value::Int(1));
        let first = owned.alias();
        let second = first.alias();

        second.set(Value::Int(9));
        assert!(matches!(owned.get(), Value::Int(9)));
        // still a single level of indirection
        assert!(matches!(second, Slot::Alias(_)));
    }

    #[test]
    fn test_dead_alias_defaults() {
        let alias = {
            let owned = Slot::new(Value::Int(5));
            owned.alias()
        };

        assert!(matches!(alias.get(), Value::Nil));
        alias.set(Value::Int(7)); // discarded, no panic
        assert!(matches!(alias.get(), Value::Nil));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let owned = Slot::new(Value::Int(5));
        let copy = owned.snapshot();

        owned.set(Value::Int(9));
        assert!(matches!(copy.get(), Value::Int(5)));
    }
}
