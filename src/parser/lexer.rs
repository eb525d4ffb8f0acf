//! Lexer (tokenizer) for tailscript source code
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the
//! parser. Line comments (`//`) and block comments (`/* */`) are skipped.

use super::ast::SourceLocation;
use std::fmt;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    IntLiteral(i64, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // Keywords
    Def(SourceLocation),
    Interface(SourceLocation),
    Var(SourceLocation),
    Local(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    Return(SourceLocation),
    True(SourceLocation),
    False(SourceLocation),
    Nil(SourceLocation),
    KwInt(SourceLocation),  // int(...) conversion
    KwStr(SourceLocation),  // str(...) conversion
    KwBool(SourceLocation), // bool(...) conversion

    // Operators
    Plus(SourceLocation),  // +
    Minus(SourceLocation), // -
    Star(SourceLocation),  // *
    Slash(SourceLocation), // /

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Assignment and markers
    Eq(SourceLocation),  // =
    Amp(SourceLocation), // & (by-reference parameter marker)
    At(SourceLocation),  // @ (empty object literal)
    Dot(SourceLocation), // .

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::Def(loc)
            | Token::Interface(loc)
            | Token::Var(loc)
            | Token::Local(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::Return(loc)
            | Token::True(loc)
            | Token::False(loc)
            | Token::Nil(loc)
            | Token::KwInt(loc)
            | Token::KwStr(loc)
            | Token::KwBool(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Eq(loc)
            | Token::Amp(loc)
            | Token::At(loc)
            | Token::Dot(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "integer literal {}", n),
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(name, _) => write!(f, "identifier '{}'", name),
            Token::Def(_) => write!(f, "'def'"),
            Token::Interface(_) => write!(f, "'interface'"),
            Token::Var(_) => write!(f, "'var'"),
            Token::Local(_) => write!(f, "'local'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::True(_) => write!(f, "'true'"),
            Token::False(_) => write!(f, "'false'"),
            Token::Nil(_) => write!(f, "'nil'"),
            Token::KwInt(_) => write!(f, "'int'"),
            Token::KwStr(_) => write!(f, "'str'"),
            Token::KwBool(_) => write!(f, "'bool'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::At(_) => write!(f, "'@'"),
            Token::Dot(_) => write!(f, "'.'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexing error with location
#[derive(Debug)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Hand-written lexer with line/column tracking
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Lexer {
            chars: source.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire source, ending with an [`Token::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;
            let loc = self.location();

            let Some(ch) = self.peek() else {
                tokens.push(Token::Eof(loc));
                return Ok(tokens);
            };

            let token = match ch {
                '0'..='9' => self.lex_number(loc)?,
                '"' => self.lex_string(loc)?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_word(loc),
                '+' => self.single(Token::Plus(loc)),
                '*' => self.single(Token::Star(loc)),
                '/' => self.single(Token::Slash(loc)),
                '@' => self.single(Token::At(loc)),
                '.' => self.single(Token::Dot(loc)),
                '(' => self.single(Token::LParen(loc)),
                ')' => self.single(Token::RParen(loc)),
                '{' => self.single(Token::LBrace(loc)),
                '}' => self.single(Token::RBrace(loc)),
                ';' => self.single(Token::Semicolon(loc)),
                ',' => self.single(Token::Comma(loc)),
                '-' => self.single(Token::Minus(loc)),
                '=' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token::EqEq(loc)
                    } else {
                        Token::Eq(loc)
                    }
                }
                '!' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token::NotEq(loc)
                    } else {
                        Token::Bang(loc)
                    }
                }
                '<' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token::Le(loc)
                    } else {
                        Token::Lt(loc)
                    }
                }
                '>' => {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        Token::Ge(loc)
                    } else {
                        Token::Gt(loc)
                    }
                }
                '&' => {
                    self.advance();
                    if self.peek() == Some('&') {
                        self.advance();
                        Token::AndAnd(loc)
                    } else {
                        Token::Amp(loc)
                    }
                }
                '|' => {
                    self.advance();
                    if self.peek() == Some('|') {
                        self.advance();
                        Token::OrOr(loc)
                    } else {
                        return Err(LexError {
                            message: "Unexpected character '|' (did you mean '||'?)".to_string(),
                            location: loc,
                        });
                    }
                }
                other => {
                    return Err(LexError {
                        message: format!("Unexpected character '{}'", other),
                        location: loc,
                    });
                }
            };

            tokens.push(token);
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    let start = self.location();
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            Some('*') if self.peek_next() == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => {
                                self.advance();
                            }
                            None => {
                                return Err(LexError {
                                    message: "Unterminated block comment".to_string(),
                                    location: start,
                                });
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_number(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits.push(c);
                self.advance();
            } else {
                break;
            }
        }

        digits
            .parse::<i64>()
            .map(|n| Token::IntLiteral(n, loc))
            .map_err(|_| LexError {
                message: format!("Integer literal '{}' is out of range", digits),
                location: loc,
            })
    }

    fn lex_string(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let mut text = String::new();

        loop {
            match self.advance() {
                Some('"') => return Ok(Token::StringLiteral(text, loc)),
                Some('\\') => match self.advance() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\\') => text.push('\\'),
                    Some('"') => text.push('"'),
                    Some(other) => {
                        return Err(LexError {
                            message: format!("Unknown escape sequence '\\{}'", other),
                            location: loc,
                        });
                    }
                    None => {
                        return Err(LexError {
                            message: "Unterminated string literal".to_string(),
                            location: loc,
                        });
                    }
                },
                Some('\n') | None => {
                    return Err(LexError {
                        message: "Unterminated string literal".to_string(),
                        location: loc,
                    });
                }
                Some(other) => text.push(other),
            }
        }
    }

    fn lex_word(&mut self, loc: SourceLocation) -> Token {
        let mut word = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                word.push(c);
                self.advance();
            } else {
                break;
            }
        }

        match word.as_str() {
            "def" => Token::Def(loc),
            "interface" => Token::Interface(loc),
            "var" => Token::Var(loc),
            "local" => Token::Local(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "return" => Token::Return(loc),
            "true" => Token::True(loc),
            "false" => Token::False(loc),
            "nil" => Token::Nil(loc),
            "int" => Token::KwInt(loc),
            "str" => Token::KwStr(loc),
            "bool" => Token::KwBool(loc),
            _ => Token::Ident(word, loc),
        }
    }
}
