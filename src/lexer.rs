//! Lexical analyzer

use std::collections::HashMap;
use std::io::prelude::*;
use std::path::Path;
use std::rc::Rc;

use crate::char_reader::{CharReader, CharReaderError};
use crate::ctx::Context;
use crate::diag::{Loc, Pos};
use crate::interner::Symbol;
use crate::token::{Token, TokenKind};

const KEYWORDS: [(&str, TokenKind); 2] = [("let", TokenKind::Let), ("print", TokenKind::Print)];

/// Turn sequence of bytes into sequence of tokens.
///
/// Malformed input is reported to the context and skipped; `lex` always produces a token.  Once
/// the input is exhausted every call returns `TokenKind::Eof`.
#[derive(Debug)]
pub struct Lexer<R: BufRead> {
    input: CharReader<R>,
    ctx: Rc<Context>,
    path: Option<Rc<Path>>,
    keywords: HashMap<Symbol, TokenKind>,

    // One character of lookahead, `None` at end of input, and where it sits in the source.
    ahead: Option<char>,
    pos: Pos,
    // Position of the last consumed character.
    last: Pos,
    // Start of the token being scanned.
    begin: Pos,
    // The lookahead stands in for a byte sequence that is not valid UTF-8.
    malformed: bool,
    exhausted: bool,

    // Buffer used when scanning longer tokens.  Allocated here to reuse memory.
    buf: String,
}

impl<R: BufRead> Lexer<R> {
    /// Creates a new lexer operating on `input`.  `path` only labels diagnostics.
    pub fn new(input: R, path: Option<&Path>, ctx: Rc<Context>) -> Lexer<R> {
        let keywords = KEYWORDS
            .iter()
            .cloned()
            .map(|(name, kind)| (ctx.symbol(name), kind))
            .collect();
        let mut lexer = Lexer {
            input: CharReader::new(input),
            ctx,
            path: path.map(Rc::from),
            keywords,
            ahead: None,
            pos: Pos::default(),
            last: Pos::default(),
            begin: Pos::default(),
            malformed: false,
            exhausted: false,
            buf: String::new(),
        };
        lexer.fill();
        lexer
    }

    /// Scan next token and return it.
    pub fn lex(&mut self) -> Token {
        let token = self.lex_raw();
        log::trace!("{}: token '{}'", token.loc, token.kind);
        token
    }

    fn lex_raw(&mut self) -> Token {
        loop {
            self.begin = self.pos;
            let ch = match self.ahead {
                None => return Token::new(TokenKind::Eof, self.here()),
                Some(ch) => ch,
            };
            match ch {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '(' => return self.single(TokenKind::LeftParen),
                ')' => return self.single(TokenKind::RightParen),
                '=' => return self.single(TokenKind::Equal),
                ';' => return self.single(TokenKind::Semicolon),
                '+' => return self.single(TokenKind::Plus),
                '-' => return self.single(TokenKind::Minus),
                '*' => return self.single(TokenKind::Star),
                '/' => {
                    self.bump();
                    if self.accept('*') {
                        self.skip_block_comment();
                    } else if self.accept('/') {
                        self.skip_line_comment();
                    } else {
                        return self.token(TokenKind::Slash);
                    }
                }
                '0'..='9' => return self.scan_int(),
                c if c == '_' || c.is_alphabetic() => return self.scan_identifier(),
                _ if self.malformed => {
                    self.ctx.report(self.here(), "invalid UTF-8 character");
                    self.bump();
                }
                _ => {
                    self.ctx.report(self.here(), format!("invalid input char: '{}'", ch));
                    self.bump();
                }
            }
        }
    }

    fn scan_int(&mut self) -> Token {
        self.buf.clear();
        while let Some(ch) = self.ahead.filter(char::is_ascii_digit) {
            self.buf.push(ch);
            self.bump();
        }

        let mut overflow = false;
        let mut value = 0u64;
        for digit in self.buf.bytes().map(|b| u64::from(b - b'0')) {
            let next = value.checked_mul(10).and_then(|v| v.checked_add(digit));
            overflow |= next.is_none();
            value = value.wrapping_mul(10).wrapping_add(digit);
        }

        let token = self.token(TokenKind::Int(value));
        if overflow {
            self.ctx.report(
                token.loc.clone(),
                format!("integer literal '{}' does not fit into 64 bits", self.buf),
            );
        }
        token
    }

    fn scan_identifier(&mut self) -> Token {
        self.buf.clear();
        while let Some(ch) = self
            .ahead
            .filter(|&c| c == '_' || c.is_alphabetic() || c.is_ascii_digit())
        {
            self.buf.push(ch);
            self.bump();
        }

        let sym = self.ctx.symbol(&self.buf);
        match self.keywords.get(&sym) {
            Some(kind) => self.token(kind.clone()),
            None => self.token(TokenKind::Identifier(sym)),
        }
    }

    /// Called after `//`.  Stops before the newline.
    fn skip_line_comment(&mut self) {
        while matches!(self.ahead, Some(ch) if ch != '\n') {
            self.bump();
        }
    }

    /// Called after `/*`.
    fn skip_block_comment(&mut self) {
        loop {
            match self.bump() {
                None => {
                    let loc = Loc::at(self.path.clone(), self.begin);
                    self.ctx.report(loc, "non-terminated multiline comment");
                    return;
                }
                Some('*') => {
                    if self.accept('/') {
                        return;
                    }
                }
                Some(_) => (),
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.bump();
        self.token(kind)
    }

    /// Token spanning from the start of the current scan to the last consumed character.
    fn token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Loc::new(self.path.clone(), self.begin, self.last))
    }

    fn here(&self) -> Loc {
        Loc::at(self.path.clone(), self.pos)
    }

    fn accept(&mut self, expected: char) -> bool {
        if self.ahead == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the lookahead character and return it.
    fn bump(&mut self) -> Option<char> {
        let ch = self.ahead?;
        self.last = self.pos;
        if ch == '\n' {
            self.pos.line += 1;
            self.pos.col = 1;
        } else {
            self.pos.col += 1;
        }
        self.fill();
        Some(ch)
    }

    /// Load the next character into the lookahead.
    fn fill(&mut self) {
        self.malformed = false;
        self.ahead = loop {
            if self.exhausted {
                break None;
            }
            match self.input.next() {
                None => {
                    self.exhausted = true;
                }
                Some(Ok(ch)) => break Some(ch),
                Some(Err(CharReaderError::Io(e))) => {
                    self.ctx.report(self.here(), format!("cannot read input: {}", e));
                    self.exhausted = true;
                }
                Some(Err(e)) => {
                    log::debug!("{}: {}", self.here(), e);
                    self.malformed = true;
                    break Some(char::REPLACEMENT_CHARACTER);
                }
            }
        };
    }
}

impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Token;

    /// Tokens up to, but excluding, the end of file.
    fn next(&mut self) -> Option<Self::Item> {
        match self.lex() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => None,
            t => Some(t),
        }
    }
}
