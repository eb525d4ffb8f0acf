//! Parsing of top-level declarations: `interface` blocks and `def` functions.

use crate::parser::ast::*;
use crate::parser::lexer::Token;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<AstNode, ParseError> {
        match self.peek() {
            Token::Interface(_) => self.parse_interface_def(),
            Token::Def(_) => self.parse_function_def(),
            other => Err(ParseError {
                message: format!("Expected 'def' or 'interface', found {}", other),
                location: self.current_location(),
            }),
        }
    }

    /// `interface A { vali; foof(xi); }`
    fn parse_interface_def(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'interface'

        let name = self.expect_identifier()?;
        self.expect_lbrace("after interface name")?;

        let mut members = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            let member_name = self.expect_identifier()?;

            if self.match_token(&Token::LParen(self.current_location())) {
                // Method requirement; parameter names are recorded only
                let mut params = Vec::new();
                if !self.check(&Token::RParen(self.current_location())) {
                    loop {
                        params.push(self.expect_identifier()?);
                        if !self.match_token(&Token::Comma(self.current_location())) {
                            break;
                        }
                    }
                }
                self.expect_rparen("after interface method parameters")?;
                self.expect_semicolon("after interface method")?;
                members.push(InterfaceMember::Method {
                    name: member_name,
                    params,
                });
            } else {
                self.expect_semicolon("after interface field")?;
                members.push(InterfaceMember::Field { name: member_name });
            }
        }
        self.expect_rbrace("after interface members")?;

        Ok(AstNode::InterfaceDef {
            name,
            members,
            location,
        })
    }

    /// `def foof(xi, &yo) { ... }`
    fn parse_function_def(&mut self) -> Result<AstNode, ParseError> {
        let location = self.current_location();
        self.advance(); // 'def'

        let name = self.expect_identifier()?;
        self.expect_lparen("after function name")?;
        let params = self.parse_params()?;
        self.expect_rparen("after function parameters")?;
        let body = self.parse_block()?;

        Ok(AstNode::FunctionDef {
            name,
            params,
            body,
            location,
        })
    }

    /// Comma-separated parameter list; `&` marks a by-reference parameter.
    /// Shared with lambda expressions.
    pub(crate) fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        loop {
            let by_ref = self.match_token(&Token::Amp(self.current_location()));
            let name = self.expect_identifier()?;
            params.push(Param { name, by_ref });

            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(params)
    }
}
