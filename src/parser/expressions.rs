//! Expression parsing with precedence climbing.
//!
//! Precedence, lowest to highest: `||`, `&&`, equality (`==` `!=`),
//! comparison (`<` `<=` `>` `>=`), additive (`+` `-`), multiplicative
//! (`*` `/`), unary (`-` `!`), primary.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_expression(&mut self) -> Result<AstNode, ParseError> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_and()?;
        while self.check(&Token::OrOr(self.current_location())) {
            let location = self.current_location();
            self.advance();
            let right = self.parse_and()?;
            left = AstNode::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&Token::AndAnd(self.current_location())) {
            let location = self.current_location();
            self.advance();
            let right = self.parse_equality()?;
            left = AstNode::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_comparison()?;
        loop {
            let op = match self.peek() {
                Token::EqEq(_) => BinOp::Eq,
                Token::NotEq(_) => BinOp::Ne,
                _ => break,
            };
            let location = self.current_location();
            self.advance();
            let right = self.parse_comparison()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Token::Lt(_) => BinOp::Lt,
                Token::Le(_) => BinOp::Le,
                Token::Gt(_) => BinOp::Gt,
                Token::Ge(_) => BinOp::Ge,
                _ => break,
            };
            let location = self.current_location();
            self.advance();
            let right = self.parse_additive()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            let location = self.current_location();
            self.advance();
            let right = self.parse_multiplicative()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<AstNode, ParseError> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                _ => break,
            };
            let location = self.current_location();
            self.advance();
            let right = self.parse_unary()?;
            left = AstNode::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek() {
            Token::Minus(_) => Some(UnOp::Neg),
            Token::Bang(_) => Some(UnOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            let location = self.current_location();
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(AstNode::UnaryOp {
                op,
                operand: Box::new(operand),
                location,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();

        match self.peek().clone() {
            Token::IntLiteral(value, _) => {
                self.advance();
                Ok(AstNode::IntLiteral(value, location))
            }
            Token::StringLiteral(value, _) => {
                self.advance();
                Ok(AstNode::TextLiteral(value, location))
            }
            Token::True(_) => {
                self.advance();
                Ok(AstNode::BoolLiteral(true, location))
            }
            Token::False(_) => {
                self.advance();
                Ok(AstNode::BoolLiteral(false, location))
            }
            Token::Nil(_) => {
                self.advance();
                Ok(AstNode::NilLiteral(location))
            }
            Token::At(_) => {
                self.advance();
                Ok(AstNode::EmptyObject(location))
            }
            Token::LParen(_) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_rparen("after grouped expression")?;
                Ok(expr)
            }
            Token::KwInt(_) => self.parse_convert(ConvertTarget::Int, location),
            Token::KwStr(_) => self.parse_convert(ConvertTarget::Text, location),
            Token::KwBool(_) => self.parse_convert(ConvertTarget::Bool, location),
            Token::Ident(name, _) => {
                if is_lambda_name(&name)
                    && matches!(self.peek_ahead(1), Some(Token::LParen(_)))
                {
                    return self.parse_lambda(location);
                }
                self.parse_path_expression(location)
            }
            other => Err(ParseError {
                message: format!("Expected expression, found {}", other),
                location,
            }),
        }
    }

    /// `int(e)`, `str(e)` or `bool(e)`
    fn parse_convert(
        &mut self,
        target: ConvertTarget,
        location: SourceLocation,
    ) -> Result<AstNode, ParseError> {
        self.advance(); // the conversion keyword
        self.expect_lparen("after conversion keyword")?;
        let expr = Box::new(self.parse_expression()?);
        self.expect_rparen("after conversion operand")?;
        Ok(AstNode::Convert {
            target,
            expr,
            location,
        })
    }

    /// `lambda<suffix>(params) { body }`
    fn parse_lambda(&mut self, location: SourceLocation) -> Result<AstNode, ParseError> {
        let name = self.expect_identifier()?;
        self.expect_lparen("after lambda name")?;
        let params = self.parse_params()?;
        self.expect_rparen("after lambda parameters")?;
        let body = self.parse_block()?;
        Ok(AstNode::Lambda {
            name,
            params,
            body,
            location,
        })
    }

    /// A dotted path, optionally followed by a call argument list.
    fn parse_path_expression(&mut self, location: SourceLocation) -> Result<AstNode, ParseError> {
        let path = self.parse_path()?;

        if self.match_token(&Token::LParen(self.current_location())) {
            let args = self.parse_call_args()?;
            return Ok(AstNode::Call {
                callee: path,
                args,
                location,
            });
        }

        Ok(AstNode::PathRef { path, location })
    }

    /// Comma-separated argument list; the opening `(` is already consumed.
    pub(crate) fn parse_call_args(&mut self) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();

        if self.match_token(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }
        self.expect_rparen("after call arguments")?;

        Ok(args)
    }
}

/// `lambda` followed by exactly one return type code character.
fn is_lambda_name(name: &str) -> bool {
    name.len() == 7 && name.starts_with("lambda")
}
