//! Function values, overload keys and receiver stamping

use crate::parser::ast::{AstNode, Param};
use crate::runtime::scope::ScopeRef;
use crate::runtime::value::{MemberMap, TypeCode};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

pub type FunctionRef = Rc<FunctionValue>;

/// A callable: a named function from the registry or a lambda.
pub struct FunctionValue {
    pub name: String,
    pub return_code: TypeCode,
    pub params: Vec<Param>,
    pub body: Vec<AstNode>,
    /// Present only on lambdas: the flattened defining scope, owned by the
    /// lambda for its whole lifetime.
    pub captured: Option<ScopeRef>,
    /// Implicit receiver, stamped at most once when the value is stored into
    /// an object field.
    receiver: RefCell<Option<MemberMap>>,
}

impl FunctionValue {
    pub fn new(
        name: String,
        return_code: TypeCode,
        params: Vec<Param>,
        body: Vec<AstNode>,
        captured: Option<ScopeRef>,
    ) -> FunctionRef {
        Rc::new(FunctionValue {
            name,
            return_code,
            params,
            body,
            captured,
            receiver: RefCell::new(None),
        })
    }

    pub fn is_lambda(&self) -> bool {
        self.captured.is_some()
    }

    /// Registry key: name plus erased parameter signature, e.g. `absi(i)`.
    pub fn overload_key(&self) -> String {
        Self::key_for(
            &self.name,
            self.params.iter().map(|p| {
                TypeCode::of_binding(&p.name)
                    .map(|code| code.erased())
                    .unwrap_or('o')
            }),
        )
    }

    pub fn key_for<I>(name: &str, codes: I) -> String
    where
        I: IntoIterator<Item = char>,
    {
        let mut key = String::from(name);
        key.push('(');
        key.extend(codes);
        key.push(')');
        key
    }

    /// Set-once: the first containing object wins, later stores are ignored.
    pub fn stamp_receiver(&self, object: &MemberMap) {
        let mut receiver = self.receiver.borrow_mut();
        if receiver.is_none() {
            *receiver = Some(Rc::clone(object));
        }
    }

    pub fn receiver(&self) -> Option<MemberMap> {
        self.receiver.borrow().clone()
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::value::new_member_map;

    fn param(name: &str) -> Param {
        Param {
            name: name.to_string(),
            by_ref: false,
        }
    }

    #[test]
    fn test_overload_key_erases_interfaces() {
        let func = FunctionValue::new(
            "dumpv".to_string(),
            TypeCode::Void,
            vec![param("xi"), param("shapeA"), param("callf")],
            Vec::new(),
            None,
        );
        assert_eq!(func.overload_key(), "dumpv(iof)");
    }

    #[test]
    fn test_key_for_zero_params() {
        assert_eq!(FunctionValue::key_for("main", std::iter::empty()), "main()");
    }

    #[test]
    fn test_receiver_stamped_once() {
        let func = FunctionValue::new(
            "getf".to_string(),
            TypeCode::Function,
            Vec::new(),
            Vec::new(),
            None,
        );
        let first = new_member_map();
        let second = new_member_map();

        func.stamp_receiver(&first);
        func.stamp_receiver(&second);

        let receiver = func.receiver().unwrap();
        assert!(Rc::ptr_eq(&receiver, &first));
    }
}
