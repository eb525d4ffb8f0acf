//! Parsing of statements: declarations, assignments, bare calls, control flow.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// `{ statement* }`
    pub(crate) fn parse_block(&mut self) -> Result<Vec<AstNode>, ParseError> {
        self.expect_lbrace("to open block")?;

        let mut statements = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            if self.is_at_end() {
                return Err(ParseError {
                    message: "Unexpected end of file inside block".to_string(),
                    location: self.current_location(),
                });
            }
            statements.push(self.parse_statement()?);
        }
        self.expect_rbrace("to close block")?;

        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<AstNode, ParseError> {
        match self.peek() {
            Token::Var(_) => self.parse_var_decl(false),
            Token::Local(_) => self.parse_var_decl(true),
            Token::If(_) => self.parse_if(),
            Token::While(_) => self.parse_while(),
            Token::Return(_) => self.parse_return(),
            Token::Ident(_, _) => self.parse_path_statement(),
            other => Err(ParseError {
                message: format!("Expected statement, found {}", other),
                location: self.current_location(),
            }),
        }
    }

    /// `var xi;` (outward) or `local xi;` (block-scoped)
    fn parse_var_decl(&mut self, block_scoped: bool) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'var' or 'local'
        let name = self.expect_identifier()?;
        self.expect_semicolon("after variable declaration")?;

        Ok(AstNode::VarDecl {
            name,
            block_scoped,
            location,
        })
    }

    fn parse_if(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'if'

        self.expect_lparen("after 'if'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_block()?;
        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(AstNode::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    fn parse_while(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'while'

        self.expect_lparen("after 'while'")?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_rparen("after while condition")?;
        let body = self.parse_block()?;

        Ok(AstNode::While {
            condition,
            body,
            location,
        })
    }

    fn parse_return(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'return'

        let expr = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_semicolon("after return statement")?;

        Ok(AstNode::Return { expr, location })
    }

    /// A statement starting with an identifier: either an assignment
    /// (`a.b.c = expr;`) or a bare call (`a.b.cf(args);`).
    fn parse_path_statement(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        let path = self.parse_path()?;

        if self.match_token(&Token::LParen(self.current_location())) {
            let args = self.parse_call_args()?;
            self.expect_semicolon("after call statement")?;
            return Ok(AstNode::Call {
                callee: path,
                args,
                location,
            });
        }

        self.expect_token(
            &Token::Eq(self.current_location()),
            "Expected '=' or '(' after name",
        )?;
        let expr = Box::new(self.parse_expression()?);
        self.expect_semicolon("after assignment")?;

        Ok(AstNode::Assignment {
            target: path,
            expr,
            location,
        })
    }

    /// `a` or `a.b.c`, split into segments
    pub(crate) fn parse_path(&mut self) -> Result<Vec<String>, ParseError> {
        let mut segments = vec![self.expect_identifier()?];
        while self.match_token(&Token::Dot(self.current_location())) {
            segments.push(self.expect_identifier()?);
        }
        Ok(segments)
    }
}
