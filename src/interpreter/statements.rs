//! Statement execution
//!
//! Each `if`/`while` body runs in a fresh child frame of its enclosing scope;
//! a function body runs directly in its call frame. `return` propagates a
//! [`Flow::Return`] sentinel that short-circuits every enclosing statement
//! sequence up to the call.

use crate::interpreter::engine::{Flow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::interpreter::host::Host;
use crate::interpreter::type_system;
use crate::parser::ast::{AstNode, SourceLocation};
use crate::runtime::scope::{Scope, ScopeRef};
use crate::runtime::value::{TypeCode, Value};

impl<H: Host> Interpreter<H> {
    /// Execute statements in a fresh child frame of `parent`.
    pub(crate) fn exec_block(
        &mut self,
        statements: &[AstNode],
        parent: &ScopeRef,
    ) -> Result<Flow, RuntimeError> {
        let frame = Scope::child(parent);
        self.exec_statements(statements, &frame)
    }

    pub(crate) fn exec_statements(
        &mut self,
        statements: &[AstNode],
        frame: &ScopeRef,
    ) -> Result<Flow, RuntimeError> {
        for statement in statements {
            match self.exec_statement(statement, frame)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    pub(crate) fn exec_statement(
        &mut self,
        statement: &AstNode,
        frame: &ScopeRef,
    ) -> Result<Flow, RuntimeError> {
        match statement {
            AstNode::VarDecl {
                name,
                block_scoped,
                location,
            } => {
                frame
                    .declare(name, *block_scoped)
                    .map_err(|e| e.at(*location))?;
                Ok(Flow::Normal)
            }
            AstNode::Assignment {
                target,
                expr,
                location,
            } => {
                self.exec_assignment(target, expr, frame)
                    .map_err(|e| e.at(*location))?;
                Ok(Flow::Normal)
            }
            AstNode::Call {
                callee,
                args,
                location,
            } => {
                self.eval_call(callee, args, frame, true)
                    .map_err(|e| e.at(*location))?;
                Ok(Flow::Normal)
            }
            AstNode::If {
                condition,
                then_branch,
                else_branch,
                location,
            } => {
                if self.eval_condition(condition, frame, location)? {
                    self.exec_block(then_branch, frame)
                } else if let Some(else_branch) = else_branch {
                    self.exec_block(else_branch, frame)
                } else {
                    Ok(Flow::Normal)
                }
            }
            AstNode::While {
                condition,
                body,
                location,
            } => {
                while self.eval_condition(condition, frame, location)? {
                    match self.exec_block(body, frame)? {
                        Flow::Normal => {}
                        flow => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            AstNode::Return { expr, .. } => {
                let value = match expr {
                    Some(expr) => Some(self.eval_expr(expr, frame)?),
                    None => None,
                };
                Ok(Flow::Return(value))
            }
            _ => unreachable!("parser only produces statements inside blocks"),
        }
    }

    fn eval_condition(
        &mut self,
        condition: &AstNode,
        frame: &ScopeRef,
        location: &SourceLocation,
    ) -> Result<bool, RuntimeError> {
        match self.eval_expr(condition, frame)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::type_error(format!(
                "Condition must be a boolean, got {}",
                other.kind_name()
            ))
            .at(*location)),
        }
    }

    /// Path-resolve the target, type-check the incoming value against the
    /// final segment's suffix, and write through the handle. Storing a
    /// function into an object field stamps its implicit receiver.
    fn exec_assignment(
        &mut self,
        target: &[String],
        expr: &AstNode,
        frame: &ScopeRef,
    ) -> Result<(), RuntimeError> {
        let last = &target[target.len() - 1];
        let code = type_system::binding_code(last)?;

        let value = if code == TypeCode::Function {
            self.eval_function_operand(expr, frame)?
        } else {
            self.eval_expr(expr, frame)?
        };

        let handle = frame.resolve(target)?;
        type_system::check_value(code, &value, &self.interfaces)?;

        if target.len() > 1 && code == TypeCode::Function {
            if let Value::Function(func) = &value {
                func.stamp_receiver(&handle.container);
            }
        }

        handle.write(value);
        Ok(())
    }
}
