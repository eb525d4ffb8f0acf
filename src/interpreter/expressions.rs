//! Expression evaluation and call dispatch
//!
//! No implicit coercion anywhere: operators require exact operand kinds and
//! `&&`/`||` evaluate both sides before combining them.

use crate::interpreter::builtins::is_builtin;
use crate::interpreter::engine::{ArgValue, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::host::Host;
use crate::parser::ast::{AstNode, BinOp, ConvertTarget, UnOp};
use crate::runtime::function::{FunctionRef, FunctionValue};
use crate::runtime::scope::ScopeRef;
use crate::runtime::value::{new_member_map, TypeCode, Value};

impl<H: Host> Interpreter<H> {
    pub(crate) fn eval_expr(
        &mut self,
        expr: &AstNode,
        frame: &ScopeRef,
    ) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::IntLiteral(value, _) => Ok(Value::Int(*value)),
            AstNode::TextLiteral(value, _) => Ok(Value::Text(value.clone())),
            AstNode::BoolLiteral(value, _) => Ok(Value::Bool(*value)),
            AstNode::NilLiteral(_) => Ok(Value::Nil),
            AstNode::EmptyObject(_) => Ok(Value::Object(new_member_map())),
            AstNode::PathRef { path, location } => {
                let handle = frame.resolve(path).map_err(|e| e.at(*location))?;
                handle.read().map_err(|e| e.at(*location))
            }
            AstNode::Lambda {
                name,
                params,
                body,
                location,
            } => self
                .make_lambda(name, params, body, frame)
                .map_err(|e| e.at(*location)),
            AstNode::Call {
                callee,
                args,
                location,
            } => self
                .eval_call(callee, args, frame, false)
                .map_err(|e| e.at(*location)),
            AstNode::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let lhs = self.eval_expr(left, frame)?;
                let rhs = self.eval_expr(right, frame)?;
                eval_binary(*op, lhs, rhs).map_err(|e| e.at(*location))
            }
            AstNode::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.eval_expr(operand, frame)?;
                eval_unary(*op, value).map_err(|e| e.at(*location))
            }
            AstNode::Convert {
                target,
                expr,
                location,
            } => {
                let value = self.eval_expr(expr, frame)?;
                eval_convert(*target, value).map_err(|e| e.at(*location))
            }
            _ => unreachable!("parser only produces expressions here"),
        }
    }

    /// Dispatch a call. Builtins are matched first and cannot be shadowed;
    /// then a variable or member holding a function; then the overload
    /// registry keyed by the erased argument signature.
    pub(crate) fn eval_call(
        &mut self,
        callee: &[String],
        args: &[AstNode],
        frame: &ScopeRef,
        as_statement: bool,
    ) -> Result<Value, RuntimeError> {
        if callee.len() == 1 && is_builtin(&callee[0]) {
            return self.eval_builtin(&callee[0], args, frame, as_statement);
        }

        let arg_values = self.eval_call_args(args, frame)?;
        let func = self.resolve_callee(callee, &arg_values, frame)?;

        if func.return_code == TypeCode::Void && !as_statement {
            return Err(RuntimeError::type_error(format!(
                "Call to void function '{}' cannot be used as a value",
                func.name
            )));
        }
        self.invoke_function(&func, arg_values)
    }

    fn resolve_callee(
        &mut self,
        callee: &[String],
        args: &[ArgValue],
        frame: &ScopeRef,
    ) -> Result<FunctionRef, RuntimeError> {
        if callee.len() == 1 {
            let name = &callee[0];
            // only an f-suffixed name can denote a function-typed binding;
            // anything else goes straight to the registry
            if matches!(TypeCode::of_binding(name), Some(TypeCode::Function)) {
                if let Ok(handle) = frame.resolve(&callee[..1]) {
                    return callable_value(handle.read()?, name);
                }
            }
            let key =
                FunctionValue::key_for(name, args.iter().map(|arg| arg.value.erased_code()));
            return self.functions.get(&key).cloned().ok_or_else(|| {
                RuntimeError::name(format!(
                    "No function matching '{}' with the given argument types",
                    name
                ))
            });
        }

        let handle = frame.resolve(callee)?;
        callable_value(handle.read()?, &callee[callee.len() - 1])
    }

    /// Evaluate call arguments, keeping the caller's storage cell for plain
    /// variable/member arguments so by-reference parameters can alias it.
    fn eval_call_args(
        &mut self,
        args: &[AstNode],
        frame: &ScopeRef,
    ) -> Result<Vec<ArgValue>, RuntimeError> {
        args.iter().map(|arg| self.eval_arg(arg, frame)).collect()
    }

    fn eval_arg(&mut self, arg: &AstNode, frame: &ScopeRef) -> Result<ArgValue, RuntimeError> {
        if let AstNode::PathRef { path, location } = arg {
            let handle = frame.resolve(path).map_err(|e| e.at(*location))?;
            let slot = handle.slot().ok_or_else(|| {
                RuntimeError::name(format!("Unknown member '{}'", handle.name)).at(*location)
            })?;
            let value = slot.get();
            return Ok(ArgValue {
                slot: Some(slot),
                value,
            });
        }
        Ok(ArgValue {
            slot: None,
            value: self.eval_expr(arg, frame)?,
        })
    }

    /// Right-hand side of an assignment to an `f`-suffixed target. A bare
    /// single-segment name resolves against the scope chain first and falls
    /// back to the function registry, so `o.valf = helperf;` can name a
    /// top-level function directly.
    pub(crate) fn eval_function_operand(
        &mut self,
        expr: &AstNode,
        frame: &ScopeRef,
    ) -> Result<Value, RuntimeError> {
        match expr {
            AstNode::PathRef { path, location } if path.len() == 1 => {
                if frame.resolve(path).is_ok() {
                    return self.eval_expr(expr, frame);
                }
                self.lookup_function_prefix(&path[0])
                    .map(Value::Function)
                    .ok_or_else(|| {
                        RuntimeError::name(format!("Function '{}' not found", path[0]))
                            .at(*location)
                    })
            }
            other => self.eval_expr(other, frame),
        }
    }
}

fn callable_value(value: Value, name: &str) -> Result<FunctionRef, RuntimeError> {
    match value {
        Value::Function(func) => Ok(func),
        Value::Nil => Err(RuntimeError::type_error(format!(
            "'{}' is nil and cannot be called",
            name
        ))),
        other => Err(RuntimeError::type_error(format!(
            "'{}' is a {} value and cannot be called",
            name,
            other.kind_name()
        ))),
    }
}

fn eval_binary(op: BinOp, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
    match op {
        BinOp::Add => match (lhs, rhs) {
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_add(b))),
            (Value::Text(a), Value::Text(b)) => Ok(Value::Text(a + &b)),
            (l, r) => Err(RuntimeError::type_error(format!(
                "'+' requires two integers or two texts, got {} and {}",
                l.kind_name(),
                r.kind_name()
            ))),
        },
        BinOp::Sub | BinOp::Mul | BinOp::Div => {
            let (a, b) = int_operands(op, lhs, rhs)?;
            match op {
                BinOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
                BinOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
                BinOp::Div => {
                    if b == 0 {
                        return Err(RuntimeError::fault("Division by zero"));
                    }
                    // truncating division
                    Ok(Value::Int(a.wrapping_div(b)))
                }
                _ => unreachable!(),
            }
        }
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
            let (a, b) = int_operands(op, lhs, rhs)?;
            let result = match op {
                BinOp::Lt => a < b,
                BinOp::Le => a <= b,
                BinOp::Gt => a > b,
                BinOp::Ge => a >= b,
                _ => unreachable!(),
            };
            Ok(Value::Bool(result))
        }
        BinOp::Eq => Ok(Value::Bool(lhs.equals(&rhs))),
        BinOp::Ne => Ok(Value::Bool(!lhs.equals(&rhs))),
        // both operands are already evaluated; there is no short-circuit
        BinOp::And | BinOp::Or => match (lhs, rhs) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinOp::And {
                a && b
            } else {
                a || b
            })),
            (l, r) => Err(RuntimeError::type_error(format!(
                "'{}' requires two booleans, got {} and {}",
                op_symbol(op),
                l.kind_name(),
                r.kind_name()
            ))),
        },
    }
}

fn int_operands(op: BinOp, lhs: Value, rhs: Value) -> Result<(i64, i64), RuntimeError> {
    match (lhs, rhs) {
        (Value::Int(a), Value::Int(b)) => Ok((a, b)),
        (l, r) => Err(RuntimeError::type_error(format!(
            "'{}' requires two integers, got {} and {}",
            op_symbol(op),
            l.kind_name(),
            r.kind_name()
        ))),
    }
}

fn op_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Eq => "==",
        BinOp::Ne => "!=",
        BinOp::Lt => "<",
        BinOp::Le => "<=",
        BinOp::Gt => ">",
        BinOp::Ge => ">=",
        BinOp::And => "&&",
        BinOp::Or => "||",
    }
}

fn eval_unary(op: UnOp, value: Value) -> Result<Value, RuntimeError> {
    match (op, value) {
        (UnOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (UnOp::Neg, other) => Err(RuntimeError::type_error(format!(
            "Unary '-' requires an integer, got {}",
            other.kind_name()
        ))),
        (UnOp::Not, other) => Err(RuntimeError::type_error(format!(
            "'!' requires a boolean, got {}",
            other.kind_name()
        ))),
    }
}

/// Explicit conversions among integer, text and boolean. Objects, functions
/// and Nil never convert.
fn eval_convert(target: ConvertTarget, value: Value) -> Result<Value, RuntimeError> {
    match value {
        Value::Object(_) | Value::Function(_) | Value::Nil => {
            return Err(RuntimeError::type_error(format!(
                "Cannot convert {} value",
                value.kind_name()
            )))
        }
        _ => {}
    }

    match target {
        ConvertTarget::Int => match value {
            Value::Int(n) => Ok(Value::Int(n)),
            Value::Bool(b) => Ok(Value::Int(i64::from(b))),
            Value::Text(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                RuntimeError::type_error(format!("Cannot convert '{}' to an integer", s))
            }),
            _ => unreachable!(),
        },
        ConvertTarget::Text => match value {
            Value::Int(n) => Ok(Value::Text(n.to_string())),
            Value::Bool(b) => Ok(Value::Text(
                if b { "true" } else { "false" }.to_string(),
            )),
            Value::Text(s) => Ok(Value::Text(s)),
            _ => unreachable!(),
        },
        ConvertTarget::Bool => match value {
            Value::Int(n) => Ok(Value::Bool(n != 0)),
            Value::Bool(b) => Ok(Value::Bool(b)),
            // the rendered forms round-trip: bool(str(x)) == x
            Value::Text(s) => Ok(Value::Bool(!s.is_empty() && s != "false")),
            _ => unreachable!(),
        },
    }
}
