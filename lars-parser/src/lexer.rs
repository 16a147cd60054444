use lars_source::Position;
use logos::Logos;
use std::fmt;

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    #[regex("[0-9]+")]
    Int,
    #[regex(r"[0-9]+\.[0-9]*")]
    Float,

    // identifiers
    #[regex("[a-zA-Z_]+")]
    Ident,

    // operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("++")]
    Inc,
    #[token("--")]
    Dec,
    // - assignment
    #[token("=")]
    Assign,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    // - logical
    #[token("!")]
    Bang,
    #[token("&&")]
    And,
    #[token("||")]
    Or,
    // - equality
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    // - ordering
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    // - bitwise
    #[token("&")]
    BitAnd,
    #[token("|")]
    BitOr,
    #[token("^")]
    BitXor,
    #[token("~")]
    BitNot,
    #[token("<<")]
    LShift,
    #[token(">>")]
    RShift,

    // punctuation
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("..")]
    DotDot,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,

    // keywords
    #[token("fn")]
    Function,
    #[token("let")]
    Let,
    #[token("const")]
    Const,
    #[token("class")]
    Class,
    #[token("struct")]
    Struct,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("elif")]
    Elif,
    #[token("else")]
    Else,
    #[token("return")]
    Return,
    #[token("for")]
    For,
    #[token("in")]
    In,
    #[token("while")]
    While,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("null")]
    Null,
    #[token("typeof")]
    Typeof,

    // misc
    #[regex(r"[ \t\n\r]+", logos::skip)]
    #[error]
    Illegal,

    /// Only generated by [`Lexer::next_token`] once the input is exhausted.
    Eof,
}

/// Binding power of infix operators. Variants are declared in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` and `!=`
    Equals,
    /// `<`, `>`, `<=` and `>=`
    LessGreater,
    /// `+` and `-`
    Sum,
    /// `*`, `/` and `%`
    Product,
    /// `-x` and `!x`
    Prefix,
    /// `f(x)`, reserved for call expressions.
    Call,
}

impl TokenKind {
    /// Returns the infix precedence or `None` if the token is not an infix operator.
    pub fn precedence(self) -> Option<Precedence> {
        match self {
            TokenKind::Eq | TokenKind::NotEq => Some(Precedence::Equals),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                Some(Precedence::LessGreater)
            }
            TokenKind::Plus | TokenKind::Minus => Some(Precedence::Sum),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(Precedence::Product),
            _ => None,
        }
    }

    /// Name used when the token kind appears in a diagnostic.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Int => "INT",
            TokenKind::Float => "FLOAT",
            TokenKind::Ident => "IDENT",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Inc => "++",
            TokenKind::Dec => "--",
            TokenKind::Assign => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::Bang => "!",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::Eq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::BitAnd => "&",
            TokenKind::BitOr => "|",
            TokenKind::BitXor => "^",
            TokenKind::BitNot => "~",
            TokenKind::LShift => "<<",
            TokenKind::RShift => ">>",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::DotDot => "..",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::Class => "CLASS",
            TokenKind::Struct => "STRUCT",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Elif => "ELIF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
            TokenKind::For => "FOR",
            TokenKind::In => "IN",
            TokenKind::While => "WHILE",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Null => "NULL",
            TokenKind::Typeof => "TYPEOF",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token together with its literal text and the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line: position.line,
            col: position.col,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

/// Positioned token stream over a source string.
///
/// Once the input is exhausted, [`Lexer::next_token`] keeps returning the same [`TokenKind::Eof`] token.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    source: &'a str,
    /// Byte offset up to which `line` and `col` have been computed.
    cursor: usize,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            source,
            cursor: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn next_token(&mut self) -> Token {
        match self.inner.next() {
            Some(kind) => {
                let span = self.inner.span();
                self.advance_to(span.start);
                let position = Position::new(self.line, self.col);
                self.advance_to(span.end);

                let literal = String::from_utf8_lossy(&self.source.as_bytes()[span]);
                Token::new(kind, literal, position)
            }
            None => {
                self.advance_to(self.source.len());
                Token::new(TokenKind::Eof, "", Position::new(self.line, self.col))
            }
        }
    }

    /// Moves the line/column counters forward to the byte `offset`.
    fn advance_to(&mut self, offset: usize) {
        for &byte in &self.source.as_bytes()[self.cursor..offset] {
            if byte == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.cursor = offset;
    }
}

/// Yields every token before [`TokenKind::Eof`].
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is(TokenKind::Eof) {
            None
        } else {
            Some(token)
        }
    }
}
