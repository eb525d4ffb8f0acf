//! Suffix-based type checking and structural interface conformance

use crate::interpreter::errors::RuntimeError;
use crate::runtime::value::{TypeCode, Value};
use rustc_hash::FxHashMap;

/// A declared structural interface: required member names and required
/// method names. Method parameter lists are recorded but never checked
/// against call sites.
#[derive(Debug, Clone, Default)]
pub struct InterfaceDef {
    pub fields: Vec<String>,
    pub methods: FxHashMap<String, Vec<String>>,
}

pub type InterfaceTable = FxHashMap<char, InterfaceDef>;

/// Type of a binding name, or a TYPE error naming the offender.
pub fn binding_code(name: &str) -> Result<TypeCode, RuntimeError> {
    TypeCode::of_binding(name).ok_or_else(|| {
        RuntimeError::type_error(format!("'{}' has no valid type suffix", name))
    })
}

/// Check a value against a suffix type. Nil satisfies object, function and
/// interface types trivially.
pub fn check_value(
    code: TypeCode,
    value: &Value,
    interfaces: &InterfaceTable,
) -> Result<(), RuntimeError> {
    let ok = match code {
        TypeCode::Int => matches!(value, Value::Int(_)),
        TypeCode::Text => matches!(value, Value::Text(_)),
        TypeCode::Bool => matches!(value, Value::Bool(_)),
        TypeCode::Object => matches!(value, Value::Object(_) | Value::Nil),
        TypeCode::Function => matches!(value, Value::Function(_) | Value::Nil),
        TypeCode::Void => false,
        TypeCode::Interface(letter) => return check_interface(letter, value, interfaces),
    };

    if ok {
        Ok(())
    } else {
        Err(RuntimeError::type_error(format!(
            "Expected {} value, got {}",
            code.describe(),
            value.kind_name()
        )))
    }
}

/// Structural conformance: the object must contain every required member and
/// method name; nothing else is inspected.
fn check_interface(
    letter: char,
    value: &Value,
    interfaces: &InterfaceTable,
) -> Result<(), RuntimeError> {
    let def = interfaces.get(&letter).ok_or_else(|| {
        RuntimeError::name(format!("Interface '{}' is not declared", letter))
    })?;

    let object = match value {
        Value::Nil => return Ok(()),
        Value::Object(members) => members,
        other => {
            return Err(RuntimeError::type_error(format!(
                "Expected object conforming to interface '{}', got {}",
                letter,
                other.kind_name()
            )))
        }
    };

    let members = object.borrow();
    for field in &def.fields {
        if !members.contains_key(field) {
            return Err(RuntimeError::type_error(format!(
                "Object does not conform to interface '{}': missing member '{}'",
                letter, field
            )));
        }
    }
    for method in def.methods.keys() {
        if !members.contains_key(method) {
            return Err(RuntimeError::type_error(format!(
                "Object does not conform to interface '{}': missing method '{}'",
                letter, method
            )));
        }
    }
    Ok(())
}
