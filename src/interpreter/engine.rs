//! Interpreter construction, registries and the invocation protocol
//!
//! [`Interpreter::new`] builds the function and interface registries from the
//! program's top-level declarations and validates them; nothing runs until
//! [`Interpreter::run`] invokes the zero-argument `main`.
//!
//! The evaluator itself is split across `impl Interpreter` blocks:
//! - this file: invocation, return checking, delegation, registry lookups
//! - `statements`: statement execution and control flow
//! - `expressions`: expression evaluation, call dispatch, operators
//! - `builtins`: `print`, `inputi`, `inputs`

use crate::interpreter::errors::RuntimeError;
use crate::interpreter::host::Host;
use crate::interpreter::type_system::{self, InterfaceDef, InterfaceTable};
use crate::parser::ast::{AstNode, InterfaceMember, Param, Program};
use crate::runtime::function::{FunctionRef, FunctionValue};
use crate::runtime::scope::{Scope, ScopeRef};
use crate::runtime::slot::Slot;
use crate::runtime::value::{TypeCode, Value};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Name under which the implicit receiver is visible inside a method body.
pub(crate) const RECEIVER_NAME: &str = "selfo";

/// An evaluated call argument: the value, plus the caller's storage cell
/// when the argument was a plain variable or member read. Only arguments
/// with a cell can be passed by reference.
#[derive(Clone)]
pub(crate) struct ArgValue {
    pub slot: Option<Slot>,
    pub value: Value,
}

/// Control-flow signal propagated out of statement execution.
pub(crate) enum Flow {
    Normal,
    Return(Option<Value>),
}

pub struct Interpreter<H: Host> {
    pub(crate) host: H,
    /// Overload key → function, built once at program start.
    pub(crate) functions: FxHashMap<String, FunctionRef>,
    /// Overload keys in definition order, for deterministic prefix lookups.
    pub(crate) function_order: Vec<String>,
    pub(crate) interfaces: InterfaceTable,
}

impl<H: Host> Interpreter<H> {
    /// Build the registries from the program's top-level declarations.
    /// Duplicate definitions and malformed names are rejected here, before
    /// any statement runs.
    pub fn new(program: &Program, host: H) -> Result<Self, RuntimeError> {
        let mut functions = FxHashMap::default();
        let mut function_order = Vec::new();
        let mut interfaces = InterfaceTable::default();

        for node in &program.nodes {
            match node {
                AstNode::InterfaceDef {
                    name,
                    members,
                    location,
                } => {
                    let letter = interface_letter(name).ok_or_else(|| {
                        RuntimeError::name(format!(
                            "Interface name '{}' must be a single uppercase letter",
                            name
                        ))
                        .at(*location)
                    })?;
                    if interfaces.contains_key(&letter) {
                        return Err(RuntimeError::name(format!(
                            "Interface '{}' declared more than once",
                            name
                        ))
                        .at(*location));
                    }

                    let mut def = InterfaceDef::default();
                    for member in members {
                        match member {
                            InterfaceMember::Field { name } => {
                                type_system::binding_code(name).map_err(|e| e.at(*location))?;
                                def.fields.push(name.clone());
                            }
                            InterfaceMember::Method { name, params } => {
                                type_system::binding_code(name).map_err(|e| e.at(*location))?;
                                def.methods.insert(name.clone(), params.clone());
                            }
                        }
                    }
                    interfaces.insert(letter, def);
                }
                AstNode::FunctionDef {
                    name,
                    params,
                    body,
                    location,
                } => {
                    let func =
                        build_function(name, params, body, None).map_err(|e| e.at(*location))?;
                    let key = func.overload_key();
                    if functions.contains_key(&key) {
                        return Err(RuntimeError::name(format!(
                            "Function '{}' defined more than once with the same signature",
                            name
                        ))
                        .at(*location));
                    }
                    function_order.push(key.clone());
                    functions.insert(key, func);
                }
                _ => unreachable!("parser only produces declarations at top level"),
            }
        }

        Ok(Interpreter {
            host,
            functions,
            function_order,
            interfaces,
        })
    }

    /// Execute the program by invoking the zero-argument `main`.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        let key = FunctionValue::key_for("main", std::iter::empty());
        let main = self
            .functions
            .get(&key)
            .cloned()
            .ok_or_else(|| RuntimeError::name("No zero-argument 'main' function found"))?;
        self.invoke_function(&main, Vec::new())?;
        Ok(())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// The invocation protocol: frame setup, receiver binding, per-parameter
    /// type checks, body execution and return checking.
    pub(crate) fn invoke_function(
        &mut self,
        func: &FunctionRef,
        args: Vec<ArgValue>,
    ) -> Result<Value, RuntimeError> {
        if args.len() != func.params.len() {
            return Err(RuntimeError::name(format!(
                "Function '{}' expects {} argument(s), got {}",
                func.name,
                func.params.len(),
                args.len()
            )));
        }

        // functions returning a function may delegate; keep the caller's
        // argument list around for forwarding
        let forwarded = if func.return_code == TypeCode::Function {
            Some(args.clone())
        } else {
            None
        };

        // a lambda reuses its captured frame, so writes to captured names
        // persist across calls of the same lambda value
        let frame = match &func.captured {
            Some(captured) => Rc::clone(captured),
            None => Scope::root(),
        };

        if let Some(receiver) = func.receiver() {
            frame.bind_receiver(RECEIVER_NAME, Value::Object(receiver));
        }

        let allow_shadow = func.is_lambda();
        for (param, arg) in func.params.iter().zip(args) {
            let code = type_system::binding_code(&param.name)?;
            type_system::check_value(code, &arg.value, &self.interfaces)?;

            let slot = if param.by_ref {
                match arg.slot {
                    Some(slot) => slot.alias(),
                    // a literal argument has no cell to alias; bind a plain
                    // owned cell, writes stay local to the call
                    None => Slot::new(arg.value),
                }
            } else {
                Slot::new(arg.value)
            };
            frame.bind(&param.name, slot, allow_shadow)?;
        }

        if let Some(forward_args) = forwarded {
            return self.run_delegating_body(func, &frame, forward_args);
        }

        // the body runs directly in the call frame, so a declaration there
        // collides with a same-named parameter
        let flow = self.exec_statements(&func.body, &frame)?;
        self.check_return(func, flow)
    }

    /// Body execution for functions whose return type is `f`: a `return`
    /// directly in the body may name a function (or a lambda literal) to
    /// tail-invoke with the caller's own argument list instead of returning
    /// a value. Returns nested inside blocks are ordinary value returns.
    fn run_delegating_body(
        &mut self,
        func: &FunctionRef,
        frame: &ScopeRef,
        forward_args: Vec<ArgValue>,
    ) -> Result<Value, RuntimeError> {
        for statement in &func.body {
            if let AstNode::Return { expr, location } = statement {
                if let Some(expr) = expr {
                    if let Some(target) = self.delegation_target(expr, frame)? {
                        return self
                            .invoke_function(&target, forward_args)
                            .map_err(|e| e.at(*location));
                    }
                    let value = self.eval_expr(expr, frame)?;
                    return self
                        .check_return(func, Flow::Return(Some(value)))
                        .map_err(|e| e.at(*location));
                }
                return self.check_return(func, Flow::Return(None));
            }

            match self.exec_statement(statement, frame)? {
                Flow::Normal => {}
                flow => return self.check_return(func, flow),
            }
        }
        self.check_return(func, Flow::Normal)
    }

    /// A lambda literal or a bare single-segment name resolved against the
    /// function registry. Dotted paths and other expressions are not
    /// delegation forms.
    fn delegation_target(
        &mut self,
        expr: &AstNode,
        frame: &ScopeRef,
    ) -> Result<Option<FunctionRef>, RuntimeError> {
        match expr {
            AstNode::Lambda {
                name, params, body, ..
            } => {
                let func = build_function(name, params, body, Some(frame.capture()))?;
                Ok(Some(func))
            }
            AstNode::PathRef { path, .. } if path.len() == 1 => self
                .lookup_function_prefix(&path[0])
                .map(Some)
                .ok_or_else(|| RuntimeError::name(format!("Function '{}' not found", path[0]))),
            AstNode::Call { callee, .. } if callee.len() == 1 => self
                .lookup_function_prefix(&callee[0])
                .map(Some)
                .ok_or_else(|| RuntimeError::name(format!("Function '{}' not found", callee[0]))),
            _ => Ok(None),
        }
    }

    fn check_return(&self, func: &FunctionRef, flow: Flow) -> Result<Value, RuntimeError> {
        match flow {
            Flow::Return(Some(value)) => {
                if func.return_code == TypeCode::Void {
                    return Err(RuntimeError::type_error(format!(
                        "Function '{}' cannot return a value",
                        func.name
                    )));
                }
                type_system::check_value(func.return_code, &value, &self.interfaces)?;
                Ok(value)
            }
            // falling off the end and a bare `return;` both yield the
            // return type's zero value
            Flow::Return(None) | Flow::Normal => Ok(func.return_code.zero_value()),
        }
    }

    /// First registered function whose name matches, in definition order,
    /// ignoring the parameter signature.
    pub(crate) fn lookup_function_prefix(&self, name: &str) -> Option<FunctionRef> {
        let prefix = format!("{}(", name);
        self.function_order
            .iter()
            .find(|key| key.starts_with(&prefix))
            .and_then(|key| self.functions.get(key))
            .cloned()
    }

    /// Construct a lambda value, flattening the defining scope chain into its
    /// captured frame.
    pub(crate) fn make_lambda(
        &self,
        name: &str,
        params: &[Param],
        body: &[AstNode],
        frame: &ScopeRef,
    ) -> Result<Value, RuntimeError> {
        let func = build_function(name, params, body, Some(frame.capture()))?;
        Ok(Value::Function(func))
    }
}

/// Validate a function's return suffix and parameter suffixes and build its
/// runtime value.
pub(crate) fn build_function(
    name: &str,
    params: &[Param],
    body: &[AstNode],
    captured: Option<ScopeRef>,
) -> Result<FunctionRef, RuntimeError> {
    let return_code = TypeCode::of_return(name).ok_or_else(|| {
        RuntimeError::type_error(format!(
            "Function '{}' has no valid return type suffix",
            name
        ))
    })?;
    for param in params {
        type_system::binding_code(&param.name)?;
    }
    Ok(FunctionValue::new(
        name.to_string(),
        return_code,
        params.to_vec(),
        body.to_vec(),
        captured,
    ))
}

fn interface_letter(name: &str) -> Option<char> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_uppercase() => Some(letter),
        _ => None,
    }
}
