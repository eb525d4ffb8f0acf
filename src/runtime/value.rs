//! Runtime values and suffix type codes

use crate::runtime::function::FunctionRef;
use crate::runtime::slot::Slot;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Shared mutable name-to-cell mapping.
///
/// Used both for object members and for scope frames, so dotted-path
/// resolution treats "frame containing a variable" and "object containing a
/// member" identically.
pub type MemberMap = Rc<RefCell<FxHashMap<String, Slot>>>;

pub fn new_member_map() -> MemberMap {
    Rc::new(RefCell::new(FxHashMap::default()))
}

/// The five runtime value kinds. Objects and functions are reference types:
/// cloning a `Value` shares the underlying payload.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Text(String),
    Bool(bool),
    Nil,
    Object(MemberMap),
    Function(FunctionRef),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::Bool(_) => "boolean",
            Value::Nil => "nil",
            Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Erased type code of this value's runtime kind, used to build overload
    /// lookup keys at call sites. Nil erases to the generic object code.
    pub fn erased_code(&self) -> char {
        match self {
            Value::Int(_) => 'i',
            Value::Text(_) => 's',
            Value::Bool(_) => 'b',
            Value::Object(_) | Value::Nil => 'o',
            Value::Function(_) => 'f',
        }
    }

    /// Language-level equality. Objects and functions compare by identity,
    /// and values of different kinds are never equal.
    pub fn equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Type category derived once from an identifier's trailing character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCode {
    Int,
    Text,
    Bool,
    Object,
    Function,
    Void,
    Interface(char),
}

impl TypeCode {
    /// `i`/`s`/`b`/`o`/`f` or an uppercase interface letter. `v` is only
    /// valid as a return code; see [`TypeCode::of_return`].
    pub fn from_suffix(suffix: char) -> Option<TypeCode> {
        match suffix {
            'i' => Some(TypeCode::Int),
            's' => Some(TypeCode::Text),
            'b' => Some(TypeCode::Bool),
            'o' => Some(TypeCode::Object),
            'f' => Some(TypeCode::Function),
            c if c.is_ascii_uppercase() => Some(TypeCode::Interface(c)),
            _ => None,
        }
    }

    /// Type of a variable or parameter binding, from its name's last character.
    pub fn of_binding(name: &str) -> Option<TypeCode> {
        Self::from_suffix(name.chars().last()?)
    }

    /// Return type of a function, from its name. `main` and a `v` suffix
    /// return nothing.
    pub fn of_return(name: &str) -> Option<TypeCode> {
        if name == "main" {
            return Some(TypeCode::Void);
        }
        match name.chars().last()? {
            'v' => Some(TypeCode::Void),
            c => Self::from_suffix(c),
        }
    }

    /// Initial value of a freshly declared binding of this type.
    pub fn zero_value(&self) -> Value {
        match self {
            TypeCode::Int => Value::Int(0),
            TypeCode::Text => Value::Text(String::new()),
            TypeCode::Bool => Value::Bool(false),
            _ => Value::Nil,
        }
    }

    /// Erased code character used in overload keys. Interface types collapse
    /// to the generic object code so dispatch never depends on interface
    /// identity.
    pub fn erased(&self) -> char {
        match self {
            TypeCode::Int => 'i',
            TypeCode::Text => 's',
            TypeCode::Bool => 'b',
            TypeCode::Object | TypeCode::Interface(_) => 'o',
            TypeCode::Function => 'f',
            TypeCode::Void => 'v',
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TypeCode::Int => "integer".to_string(),
            TypeCode::Text => "text".to_string(),
            TypeCode::Bool => "boolean".to_string(),
            TypeCode::Object => "object".to_string(),
            TypeCode::Function => "function".to_string(),
            TypeCode::Void => "void".to_string(),
            TypeCode::Interface(letter) => format!("interface '{}'", letter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_classification() {
        assert_eq!(TypeCode::of_binding("counti"), Some(TypeCode::Int));
        assert_eq!(TypeCode::of_binding("names"), Some(TypeCode::Text));
        assert_eq!(TypeCode::of_binding("flagb"), Some(TypeCode::Bool));
        assert_eq!(TypeCode::of_binding("boxo"), Some(TypeCode::Object));
        assert_eq!(TypeCode::of_binding("callf"), Some(TypeCode::Function));
        assert_eq!(TypeCode::of_binding("shapeA"), Some(TypeCode::Interface('A')));
        assert_eq!(TypeCode::of_binding("oops"), Some(TypeCode::Text));
        assert_eq!(TypeCode::of_binding("badx"), None);
        assert_eq!(TypeCode::of_binding(""), None);
    }

    #[test]
    fn test_return_codes() {
        assert_eq!(TypeCode::of_return("main"), Some(TypeCode::Void));
        assert_eq!(TypeCode::of_return("printv"), Some(TypeCode::Void));
        assert_eq!(TypeCode::of_return("geti"), Some(TypeCode::Int));
        assert_eq!(TypeCode::of_return("pickf"), Some(TypeCode::Function));
    }

    #[test]
    fn test_zero_values() {
        assert!(matches!(TypeCode::Int.zero_value(), Value::Int(0)));
        assert!(matches!(TypeCode::Text.zero_value(), Value::Text(s) if s.is_empty()));
        assert!(matches!(TypeCode::Bool.zero_value(), Value::Bool(false)));
        assert!(matches!(TypeCode::Object.zero_value(), Value::Nil));
        assert!(matches!(TypeCode::Interface('A').zero_value(), Value::Nil));
    }

    #[test]
    fn test_object_equality_is_identity() {
        let a = new_member_map();
        let b = new_member_map();
        assert!(Value::Object(Rc::clone(&a)).equals(&Value::Object(Rc::clone(&a))));
        assert!(!Value::Object(a).equals(&Value::Object(b)));
    }

    #[test]
    fn test_cross_kind_never_equal() {
        assert!(!Value::Int(1).equals(&Value::Text("1".to_string())));
        assert!(!Value::Bool(false).equals(&Value::Nil));
    }

    #[test]
    fn test_erasure() {
        assert_eq!(Value::Nil.erased_code(), 'o');
        assert_eq!(Value::Object(new_member_map()).erased_code(), 'o');
        assert_eq!(TypeCode::Interface('Q').erased(), 'o');
        assert_eq!(TypeCode::Int.erased(), 'i');
    }
}
