use crate::error::{Location, Result, Span, TallyError};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    // Single-character tokens
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    LeftParen,
    RightParen,
    Semicolon,

    // Literals
    Identifier,
    Number,

    // Function names
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Sqrt,
    Int,

    // Keywords
    True,
    False,
    And,
    Or,
    Not,
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
    Var,

    // Special
    Eof,
}

impl TokenType {
    fn from_char(c: char) -> Option<Self> {
        let token_type = match c {
            '=' => TokenType::Assign,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '%' => TokenType::Percent,
            '^' => TokenType::Caret,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            ';' => TokenType::Semicolon,
            _ => return None,
        };
        Some(token_type)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            TokenType::Assign => "=",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Star => "*",
            TokenType::Slash => "/",
            TokenType::Percent => "%",
            TokenType::Caret => "^",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::Semicolon => ";",
            TokenType::Identifier => "identifier",
            TokenType::Number => "number",
            TokenType::Sin => "sin",
            TokenType::Cos => "cos",
            TokenType::Tan => "tan",
            TokenType::Asin => "asin",
            TokenType::Acos => "acos",
            TokenType::Atan => "atan",
            TokenType::Log => "log",
            TokenType::Sqrt => "sqrt",
            TokenType::Int => "Int",
            TokenType::True => "true",
            TokenType::False => "false",
            TokenType::And => "and",
            TokenType::Or => "or",
            TokenType::Not => "not",
            TokenType::EqualTo => "equal_to",
            TokenType::NotEqualTo => "not_equal_to",
            TokenType::LessThan => "less_than",
            TokenType::GreaterThan => "greater_than",
            TokenType::Var => "var",
            TokenType::Eof => "end of input",
        };
        write!(f, "{}", text)
    }
}

/// A lexical unit. Numbers keep their literal text; conversion happens at evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub location: Location,
    pub span: Span,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: String, location: Location, span: Span) -> Self {
        Self {
            token_type,
            lexeme,
            location,
            span,
        }
    }
}

/// Streaming tokenizer with one current token and a push-back buffer.
pub struct Lexer {
    source: String,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    keywords: HashMap<&'static str, TokenType>,
    token: Token,
    pushed_back: Vec<Token>,
}

impl Lexer {
    /// Creates a lexer positioned on the first token of `source`.
    pub fn new(source: &str) -> Result<Self> {
        let mut keywords = HashMap::new();
        keywords.insert("sin", TokenType::Sin);
        keywords.insert("cos", TokenType::Cos);
        keywords.insert("tan", TokenType::Tan);
        keywords.insert("asin", TokenType::Asin);
        keywords.insert("acos", TokenType::Acos);
        keywords.insert("atan", TokenType::Atan);
        keywords.insert("log", TokenType::Log);
        keywords.insert("sqrt", TokenType::Sqrt);
        keywords.insert("Int", TokenType::Int);
        keywords.insert("true", TokenType::True);
        keywords.insert("false", TokenType::False);
        keywords.insert("and", TokenType::And);
        keywords.insert("or", TokenType::Or);
        keywords.insert("not", TokenType::Not);
        keywords.insert("equal_to", TokenType::EqualTo);
        keywords.insert("not_equal_to", TokenType::NotEqualTo);
        keywords.insert("less_than", TokenType::LessThan);
        keywords.insert("greater_than", TokenType::GreaterThan);
        keywords.insert("var", TokenType::Var);

        let mut lexer = Self {
            source: source.to_string(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            keywords,
            token: Token::new(
                TokenType::Eof,
                String::new(),
                Location::new(1, 1),
                Span::single(0),
            ),
            pushed_back: Vec::new(),
        };
        lexer.token = lexer.scan_token()?;
        Ok(lexer)
    }

    pub fn current(&self) -> &Token {
        &self.token
    }

    /// Replaces the current token with the next one.
    pub fn advance(&mut self) -> Result<()> {
        self.token = match self.pushed_back.pop() {
            Some(token) => token,
            None => self.scan_token()?,
        };
        Ok(())
    }

    /// Makes `token` current again; the token it displaces is returned by the next `advance`.
    pub fn push_back(&mut self, token: Token) {
        let displaced = std::mem::replace(&mut self.token, token);
        self.pushed_back.push(displaced);
    }

    /// Drains the remaining input, including the final end-of-input token.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.token.clone();
            let done = token.token_type == TokenType::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
            self.advance()?;
        }
    }

    fn scan_token(&mut self) -> Result<Token> {
        self.skip_whitespace();
        self.start = self.current;
        let location = Location::new(self.line, self.column);

        let c = match self.advance_char() {
            Some(c) => c,
            None => {
                return Ok(Token::new(
                    TokenType::Eof,
                    String::new(),
                    location,
                    Span::single(self.current),
                ));
            }
        };

        let token = if c.is_ascii_alphabetic() {
            self.identifier(location)
        } else if c.is_ascii_digit() {
            self.number(location)
        } else if let Some(token_type) = TokenType::from_char(c) {
            self.make_token(token_type, location)
        } else {
            return Err(TallyError::lexical(
                location,
                Span::new(self.start, self.current),
                format!("Unexpected character: '{}'", c),
            ));
        };

        log::trace!(
            "token {:?} {:?} at {}",
            token.token_type,
            token.lexeme,
            token.location
        );
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance_char();
        }
    }

    fn advance_char(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn identifier(&mut self, location: Location) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.advance_char();
        }

        let text = &self.source[self.start..self.current];
        let token_type = self
            .keywords
            .get(text)
            .copied()
            .unwrap_or(TokenType::Identifier);

        self.make_token(token_type, location)
    }

    fn number(&mut self, location: Location) -> Token {
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance_char();
        }

        if self.peek() == Some('.') {
            self.advance_char();
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance_char();
            }
        }

        self.make_token(TokenType::Number, location)
    }

    fn make_token(&self, token_type: TokenType, location: Location) -> Token {
        Token::new(
            token_type,
            self.source[self.start..self.current].to_string(),
            location,
            Span::new(self.start, self.current),
        )
    }
}
