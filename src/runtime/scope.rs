//! Scope chain, declaration placement rules and dotted-path resolution
//!
//! Frames form a singly-linked chain from innermost block to the call frame.
//! Declaration placement is asymmetric and observable:
//! - `local` creates the cell in the current frame
//! - `var` creates the cell one frame out when a parent exists, never further
//! - parameter binding targets the call frame, and only lambdas may shadow
//!   names already present there (their captured names)
//!
//! Reads and writes both go through [`Scope::resolve`], which walks a dotted
//! path and returns a [`Handle`] on the final segment, so the two always
//! agree on where a name lives.

use crate::interpreter::errors::RuntimeError;
use crate::runtime::slot::Slot;
use crate::runtime::value::{new_member_map, MemberMap, TypeCode, Value};
use std::rc::Rc;

pub type ScopeRef = Rc<Scope>;

pub struct Scope {
    vars: MemberMap,
    parent: Option<ScopeRef>,
}

/// A resolved (container, final segment) pair.
#[derive(Debug)]
pub struct Handle {
    pub container: MemberMap,
    pub name: String,
}

impl Handle {
    pub fn slot(&self) -> Option<Slot> {
        self.container.borrow().get(&self.name).cloned()
    }

    pub fn read(&self) -> Result<Value, RuntimeError> {
        match self.slot() {
            Some(slot) => Ok(slot.get()),
            None => Err(RuntimeError::name(format!(
                "Unknown member '{}'",
                self.name
            ))),
        }
    }

    /// Sets the existing cell in place, keeping aliases into it live, or
    /// creates a new owned cell when the member does not exist yet.
    pub fn write(&self, value: Value) {
        match self.slot() {
            Some(slot) => slot.set(value),
            None => {
                self.container
                    .borrow_mut()
                    .insert(self.name.clone(), Slot::new(value));
            }
        }
    }
}

impl Scope {
    pub fn root() -> ScopeRef {
        Rc::new(Scope {
            vars: new_member_map(),
            parent: None,
        })
    }

    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(Scope {
            vars: new_member_map(),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// A parentless frame over an existing mapping. Lambdas own one of these
    /// as their captured environment.
    pub fn detached(vars: MemberMap) -> ScopeRef {
        Rc::new(Scope { vars, parent: None })
    }

    /// Declare a name with its type's zero value. Block-scoped names go in
    /// this frame; outward names go one frame out when a parent exists.
    /// Redeclaration in any targeted frame is a NAME error.
    pub fn declare(&self, name: &str, block_scoped: bool) -> Result<(), RuntimeError> {
        let code = TypeCode::of_binding(name).ok_or_else(|| {
            RuntimeError::type_error(format!("Variable '{}' has no valid type suffix", name))
        })?;

        if self.vars.borrow().contains_key(name) {
            return Err(RuntimeError::name(format!(
                "Variable '{}' defined more than once",
                name
            )));
        }

        let target = if block_scoped {
            &self.vars
        } else {
            match &self.parent {
                Some(parent) => {
                    if parent.vars.borrow().contains_key(name) {
                        return Err(RuntimeError::name(format!(
                            "Variable '{}' defined more than once",
                            name
                        )));
                    }
                    &parent.vars
                }
                None => &self.vars,
            }
        };

        target
            .borrow_mut()
            .insert(name.to_string(), Slot::new(code.zero_value()));
        Ok(())
    }

    /// Bind a parameter cell into this frame. Only lambdas may shadow an
    /// existing name (their captured bindings).
    pub fn bind(&self, name: &str, slot: Slot, allow_shadow: bool) -> Result<(), RuntimeError> {
        if !allow_shadow && self.vars.borrow().contains_key(name) {
            return Err(RuntimeError::name(format!(
                "Duplicate parameter '{}'",
                name
            )));
        }
        self.vars.borrow_mut().insert(name.to_string(), slot);
        Ok(())
    }

    /// Bind the implicit receiver name, overwriting any previous binding.
    pub fn bind_receiver(&self, name: &str, value: Value) {
        self.vars
            .borrow_mut()
            .insert(name.to_string(), Slot::new(value));
    }

    fn frame_of(&self, name: &str) -> Option<MemberMap> {
        if self.vars.borrow().contains_key(name) {
            return Some(Rc::clone(&self.vars));
        }
        self.parent.as_ref().and_then(|parent| parent.frame_of(name))
    }

    /// Resolve a dotted path to a handle on its final segment.
    ///
    /// The first segment is found by walking the chain outward. Every segment
    /// that gets dereferenced must be object- or interface-typed by suffix
    /// and must hold an Object; going through Nil is a FAULT. The final
    /// segment is not dereferenced and need not exist, so a write through the
    /// handle can create it.
    pub fn resolve(&self, path: &[String]) -> Result<Handle, RuntimeError> {
        let first = &path[0];
        let container = self.frame_of(first).ok_or_else(|| {
            RuntimeError::name(format!("Variable '{}' not found", first))
        })?;

        let mut handle = Handle {
            container,
            name: first.clone(),
        };

        for segment in &path[1..] {
            match TypeCode::of_binding(&handle.name) {
                Some(TypeCode::Object) | Some(TypeCode::Interface(_)) => {}
                _ => {
                    return Err(RuntimeError::type_error(format!(
                        "'{}' is not object-typed and cannot be dereferenced",
                        handle.name
                    )))
                }
            }

            let object = match handle.read()? {
                Value::Object(members) => members,
                Value::Nil => {
                    return Err(RuntimeError::fault(format!(
                        "Dereference through nil value '{}'",
                        handle.name
                    )))
                }
                other => {
                    return Err(RuntimeError::type_error(format!(
                        "Cannot access member '{}' of {} value",
                        segment,
                        other.kind_name()
                    )))
                }
            };

            handle = Handle {
                container: object,
                name: segment.clone(),
            };
        }

        Ok(handle)
    }

    /// Flatten the chain into one detached frame, copying each cell's current
    /// value and keeping the innermost binding when a name recurs. Shadowing
    /// is resolved here, once, not at call time.
    pub fn capture(&self) -> ScopeRef {
        let flat = new_member_map();
        self.capture_into(&flat);
        Scope::detached(flat)
    }

    fn capture_into(&self, flat: &MemberMap) {
        if let Some(parent) = &self.parent {
            parent.capture_into(flat);
        }
        for (name, slot) in self.vars.borrow().iter() {
            flat.borrow_mut().insert(name.clone(), slot.snapshot());
        }
    }
}
