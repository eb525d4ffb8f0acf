//! Parser coordinator: the [`Parser`] struct, token helpers, [`ParseError`]
//! and the program entry point.
//!
//! The grammar itself lives in the sibling modules, each an `impl Parser`
//! block over the shared token cursor:
//! - `declarations`: `interface` blocks and `def` functions
//! - `statements`: variable declarations, assignments, bare calls, `if`,
//!   `while`, `return`
//! - `expressions`: precedence climbing for binary operators, primaries,
//!   lambdas and conversions

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use std::fmt;

/// Parser error type
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for tailscript
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire program (top-level declarations)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            // Parse top-level declaration (function or interface)
            let decl = self.parse_top_level_declaration()?;
            program.nodes.push(decl);
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("Expected '(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("Expected ')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek() {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_function() {
        let source = "def main() { return; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.nodes.len(), 1);
        match &program.nodes[0] {
            AstNode::FunctionDef {
                name, params, body, ..
            } => {
                assert_eq!(name, "main");
                assert_eq!(params.len(), 0);
                assert_eq!(body.len(), 1);
            }
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_parse_interface() {
        let source = "interface A { vali; valb; foof(xi, yi); }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.nodes.len(), 1);
        match &program.nodes[0] {
            AstNode::InterfaceDef { name, members, .. } => {
                assert_eq!(name, "A");
                assert_eq!(members.len(), 3);
                assert!(matches!(&members[0], InterfaceMember::Field { name } if name == "vali"));
                match &members[2] {
                    InterfaceMember::Method { name, params } => {
                        assert_eq!(name, "foof");
                        assert_eq!(params, &["xi".to_string(), "yi".to_string()]);
                    }
                    _ => panic!("Expected method member"),
                }
            }
            _ => panic!("Expected interface definition"),
        }
    }

    #[test]
    fn test_parse_ref_params() {
        let source = "def bumpv(&xi, yi) { xi = xi + yi; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        match &program.nodes[0] {
            AstNode::FunctionDef { params, .. } => {
                assert!(params[0].by_ref);
                assert!(!params[1].by_ref);
            }
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_parse_dotted_assignment() {
        let source = "def main() { o.xo.vali = 3; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        match &program.nodes[0] {
            AstNode::FunctionDef { body, .. } => match &body[0] {
                AstNode::Assignment { target, .. } => {
                    assert_eq!(target, &["o".to_string(), "xo".to_string(), "vali".to_string()]);
                }
                _ => panic!("Expected assignment"),
            },
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_parse_lambda_expression() {
        let source = "def main() { var gf; gf = lambdai(xi) { return xi * 2; }; }";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        match &program.nodes[0] {
            AstNode::FunctionDef { body, .. } => match &body[1] {
                AstNode::Assignment { expr, .. } => {
                    assert!(matches!(expr.as_ref(), AstNode::Lambda { name, .. } if name == "lambdai"));
                }
                _ => panic!("Expected assignment"),
            },
            _ => panic!("Expected function definition"),
        }
    }

    #[test]
    fn test_parse_error_reports_location() {
        let source = "def main() { var ; }";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();
        assert_eq!(err.location.line, 1);
    }
}
