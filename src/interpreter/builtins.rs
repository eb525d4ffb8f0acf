//! Built-in functions: `print`, `inputi`, `inputs`
//!
//! Builtins are matched before any user definition and cannot be shadowed.
//! `print` emits one output line per call; the input builtins take at most
//! one prompt argument, printed before reading.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::host::Host;
use crate::parser::ast::AstNode;
use crate::runtime::scope::ScopeRef;
use crate::runtime::value::Value;

pub(crate) fn is_builtin(name: &str) -> bool {
    matches!(name, "print" | "inputi" | "inputs")
}

impl<H: Host> Interpreter<H> {
    pub(crate) fn eval_builtin(
        &mut self,
        name: &str,
        args: &[AstNode],
        frame: &ScopeRef,
        as_statement: bool,
    ) -> Result<Value, RuntimeError> {
        match name {
            "print" => {
                if !as_statement {
                    return Err(RuntimeError::type_error(
                        "'print' returns no value and cannot be used as a value",
                    ));
                }
                let mut line = String::new();
                for arg in args {
                    let value = self.eval_expr(arg, frame)?;
                    line.push_str(&render_value(&value));
                }
                self.host.output(&line);
                Ok(Value::Nil)
            }
            "inputi" => {
                let text = self.read_input("inputi", args, frame)?;
                text.trim().parse::<i64>().map(Value::Int).map_err(|_| {
                    RuntimeError::type_error(format!(
                        "inputi expected an integer, got '{}'",
                        text
                    ))
                })
            }
            "inputs" => self.read_input("inputs", args, frame).map(Value::Text),
            _ => unreachable!("callers check is_builtin first"),
        }
    }

    fn read_input(
        &mut self,
        name: &str,
        args: &[AstNode],
        frame: &ScopeRef,
    ) -> Result<String, RuntimeError> {
        if args.len() > 1 {
            return Err(RuntimeError::name(format!(
                "'{}' takes at most one prompt argument",
                name
            )));
        }
        if let Some(prompt) = args.first() {
            let value = self.eval_expr(prompt, frame)?;
            let rendered = render_value(&value);
            self.host.output(&rendered);
        }
        Ok(self.host.input())
    }
}

/// Text rendering used by `print` and input prompts. Booleans render
/// lowercase; arguments are concatenated with no separator.
pub(crate) fn render_value(value: &Value) -> String {
    match value {
        Value::Int(n) => n.to_string(),
        Value::Text(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Nil => "nil".to_string(),
        Value::Object(_) => "<object>".to_string(),
        Value::Function(func) => format!("<function {}>", func.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::value::new_member_map;

    #[test]
    fn test_render_values() {
        assert_eq!(render_value(&Value::Int(-3)), "-3");
        assert_eq!(render_value(&Value::Text("hi".to_string())), "hi");
        assert_eq!(render_value(&Value::Bool(true)), "true");
        assert_eq!(render_value(&Value::Nil), "nil");
        assert_eq!(render_value(&Value::Object(new_member_map())), "<object>");
    }

    #[test]
    fn test_builtin_names() {
        assert!(is_builtin("print"));
        assert!(is_builtin("inputi"));
        assert!(is_builtin("inputs"));
        assert!(!is_builtin("printv"));
    }
}
