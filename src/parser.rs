use crate::ast::{BinaryOp, ComparisonOp, Expr, Function, LogicalOp, Program, Stmt, UnaryOp};
use crate::error::{Result, Span, TallyError};
use crate::lexer::{Lexer, Token, TokenType};

/// Parses a whole program from source text.
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(Lexer::new(source)?).parse()
}

/// Recursive-descent parser owning its lexer for the duration of one parse.
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(lexer: Lexer) -> Self {
        Self { lexer }
    }

    pub fn parse(&mut self) -> Result<Program> {
        let mut program = Program::new();

        while !self.check(TokenType::Eof) {
            let statement = self.statement()?;
            log::trace!("parsed statement: {}", statement.render(true).trim_end());
            program.push(statement);
        }

        Ok(program)
    }

    fn statement(&mut self) -> Result<Stmt> {
        let statement = if self.check(TokenType::Var) {
            self.advance()?;
            self.declaration()?
        } else if self.check(TokenType::Identifier) {
            self.assignment_or_print()?
        } else {
            Stmt::Print {
                expr: self.boolean_expr()?,
            }
        };

        self.consume_with_help(
            TokenType::Semicolon,
            "Missing semicolon",
            "Every statement must end with ';'. Example: var a = 1; a + 2;",
        )?;
        Ok(statement)
    }

    fn declaration(&mut self) -> Result<Stmt> {
        let name = self.consume_with_help(
            TokenType::Identifier,
            "Missing identifier after 'var'",
            "Declarations name a new variable: var name = value;",
        )?;

        self.consume_with_help(
            TokenType::Assign,
            "Missing '=' after variable name",
            "Declarations need an initial value: var name = value;",
        )?;

        let value = self.boolean_expr()?;
        Ok(Stmt::Assign {
            name: name.lexeme.clone(),
            create: true,
            value,
            token: name,
        })
    }

    /// An identifier starts either `name = value;` or an expression statement.
    fn assignment_or_print(&mut self) -> Result<Stmt> {
        let name = self.lexer.current().clone();
        self.advance()?;

        if self.check(TokenType::Assign) {
            self.advance()?;
            let value = self.boolean_expr()?;
            return Ok(Stmt::Assign {
                name: name.lexeme.clone(),
                create: false,
                value,
                token: name,
            });
        }

        self.lexer.push_back(name);
        Ok(Stmt::Print {
            expr: self.boolean_expr()?,
        })
    }

    fn boolean_expr(&mut self) -> Result<Expr> {
        let mut expr = self.boolean_unary()?;

        while let Some(operator) = LogicalOp::from_token(self.peek_type()) {
            let token = self.take()?;
            let right = self.boolean_unary()?;
            expr = Expr::logical(expr, operator, right, token)?;
        }

        Ok(expr)
    }

    fn boolean_unary(&mut self) -> Result<Expr> {
        if self.check(TokenType::Not) {
            let token = self.take()?;
            let operand = self.comparison()?;
            return Expr::not(operand, token);
        }

        self.comparison()
    }

    fn comparison(&mut self) -> Result<Expr> {
        let expr = self.add()?;

        let operator = match ComparisonOp::from_token(self.peek_type()) {
            Some(operator) => operator,
            None => return Ok(expr),
        };
        let token = self.take()?;
        let right = self.add()?;

        if ComparisonOp::from_token(self.peek_type()).is_some() {
            return Err(self.error_at_current(
                "Comparison operators cannot be chained",
                "Combine comparisons with 'and' / 'or': a less_than b and b less_than c",
            ));
        }

        Expr::comparison(expr, operator, right, token)
    }

    fn add(&mut self) -> Result<Expr> {
        let mut expr = self.mul()?;

        while let Some(operator @ (BinaryOp::Add | BinaryOp::Subtract)) =
            BinaryOp::from_token(self.peek_type())
        {
            let token = self.take()?;
            let right = self.mul()?;
            expr = Expr::binary(expr, operator, right, token)?;
        }

        Ok(expr)
    }

    fn mul(&mut self) -> Result<Expr> {
        let mut expr = self.pow()?;

        while let Some(operator @ (BinaryOp::Multiply | BinaryOp::Divide | BinaryOp::Modulo)) =
            BinaryOp::from_token(self.peek_type())
        {
            let token = self.take()?;
            let right = self.pow()?;
            expr = Expr::binary(expr, operator, right, token)?;
        }

        Ok(expr)
    }

    /// `^` is right-associative: `2^3^2` is `2^(3^2)`.
    fn pow(&mut self) -> Result<Expr> {
        let base = self.unary()?;

        if self.check(TokenType::Caret) {
            let token = self.take()?;
            let exponent = self.pow()?;
            return Expr::binary(base, BinaryOp::Power, exponent, token);
        }

        Ok(base)
    }

    /// A sign applies to a single primary, so `--1` is rejected.
    fn unary(&mut self) -> Result<Expr> {
        if let Some(operator) = UnaryOp::from_token(self.peek_type()) {
            let token = self.take()?;
            let operand = self.primary()?;
            return Expr::unary(operator, operand, token);
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        let token = self.lexer.current().clone();

        match token.token_type {
            TokenType::Identifier => {
                self.advance()?;
                Ok(Expr::variable(token))
            }
            TokenType::Number => {
                self.advance()?;
                Ok(Expr::number(token))
            }
            TokenType::True | TokenType::False => {
                self.advance()?;
                Expr::boolean(token)
            }
            TokenType::LeftParen => {
                self.advance()?;

                if self.check(TokenType::RightParen) {
                    return Err(TallyError::syntax_with_help(
                        token.location,
                        Span::new(token.span.start, self.lexer.current().span.end),
                        "Empty parentheses are not allowed".to_string(),
                        "Parentheses must contain an expression. Example: (x + 1)".to_string(),
                    ));
                }

                let expr = self.boolean_expr()?;
                self.consume_with_help(
                    TokenType::RightParen,
                    "Expected ')' after expression",
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'.",
                )?;
                Ok(Expr::grouping(expr, token))
            }
            token_type => match Function::from_token(token_type) {
                Some(function) => self.call(function, token),
                None => Err(self.unexpected(&token)),
            },
        }
    }

    fn call(&mut self, function: Function, token: Token) -> Result<Expr> {
        self.advance()?;
        self.consume_with_help(
            TokenType::LeftParen,
            &format!("Expected '(' after function name '{}'", function.name()),
            "Functions are called with one argument in parentheses. Example: sqrt(2)",
        )?;

        let argument = self.boolean_expr()?;
        self.consume_with_help(
            TokenType::RightParen,
            "Expected ')' after function argument",
            "Functions take exactly one argument. Example: log(e^2)",
        )?;

        Expr::call(function, argument, token)
    }

    fn unexpected(&self, token: &Token) -> TallyError {
        let help = match token.token_type {
            TokenType::RightParen => "Found ')' without matching '('. Check for unbalanced parentheses.",
            TokenType::Eof => "Reached end of input while expecting an expression.",
            TokenType::Semicolon => "A statement cannot be empty.",
            TokenType::Var => "Declarations must start a statement.",
            _ => "Expected a number, variable, boolean, function call or parenthesized expression here.",
        };

        let found = if token.token_type == TokenType::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };

        TallyError::syntax_with_help(
            token.location,
            token.span.clone(),
            format!("Expected expression, found {}", found),
            help.to_string(),
        )
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.lexer.current().token_type == token_type
    }

    fn peek_type(&self) -> TokenType {
        self.lexer.current().token_type
    }

    fn advance(&mut self) -> Result<()> {
        self.lexer.advance()
    }

    /// Returns the current token and moves past it.
    fn take(&mut self) -> Result<Token> {
        let token = self.lexer.current().clone();
        self.advance()?;
        Ok(token)
    }

    fn consume_with_help(&mut self, token_type: TokenType, message: &str, help: &str) -> Result<Token> {
        if self.check(token_type) {
            self.take()
        } else {
            Err(self.error_at_current(message, help))
        }
    }

    fn error_at_current(&self, message: &str, help: &str) -> TallyError {
        let token = self.lexer.current();
        TallyError::syntax_with_help(
            token.location,
            token.span.clone(),
            message.to_string(),
            help.to_string(),
        )
    }
}
