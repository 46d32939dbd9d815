use crate::error::{Result, TallyError};
use crate::lexer::{Token, TokenType};
use std::fmt;

/// A parsed program: statements in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, statement: Stmt) {
        self.statements.push(statement);
    }

    pub fn render(&self, grouping: bool) -> String {
        self.statements
            .iter()
            .map(|statement| statement.render(grouping))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// `var name = value;` when `create` is set, `name = value;` otherwise.
    Assign {
        name: String,
        create: bool,
        value: Expr,
        token: Token,
    },
    /// A bare expression statement; its value is printed.
    Print { expr: Expr },
}

impl Stmt {
    pub fn render(&self, grouping: bool) -> String {
        match self {
            Stmt::Assign {
                name,
                create: true,
                value,
                ..
            } => format!("var {} = {};\n", name, value.render(grouping)),
            Stmt::Assign { name, value, .. } => {
                format!("{} = {};\n", name, value.render(grouping))
            }
            Stmt::Print { expr } => format!("{};\n", expr.render(grouping)),
        }
    }
}

/// What kind of value a node can produce, known from its syntax alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Arithmetic,
    Boolean,
    /// Variables: resolved against the symbol table at evaluation time.
    Dynamic,
}

impl Capability {
    pub fn provides(self, required: Capability) -> bool {
        self == required || self == Capability::Dynamic
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Capability::Arithmetic => write!(f, "arithmetic"),
            Capability::Boolean => write!(f, "boolean"),
            Capability::Dynamic => write!(f, "variable"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number {
        literal: String,
        token: Token,
    },
    Bool {
        value: bool,
        token: Token,
    },
    Variable {
        name: String,
        token: Token,
    },
    Grouping {
        expr: Box<Expr>,
        token: Token,
    },
    Unary {
        operator: UnaryOp,
        operand: Box<Expr>,
        token: Token,
    },
    Binary {
        left: Box<Expr>,
        operator: BinaryOp,
        right: Box<Expr>,
        token: Token,
    },
    Call {
        function: Function,
        argument: Box<Expr>,
        token: Token,
    },
    Comparison {
        left: Box<Expr>,
        operator: ComparisonOp,
        right: Box<Expr>,
        token: Token,
    },
    Logical {
        left: Box<Expr>,
        operator: LogicalOp,
        right: Box<Expr>,
        token: Token,
    },
    Not {
        operand: Box<Expr>,
        token: Token,
    },
}

impl Expr {
    pub fn number(token: Token) -> Self {
        Expr::Number {
            literal: token.lexeme.clone(),
            token,
        }
    }

    pub fn boolean(token: Token) -> Result<Self> {
        let value = match token.token_type {
            TokenType::True => true,
            TokenType::False => false,
            _ => return Err(Self::mismatch(&token, "boolean literal", Capability::Boolean)),
        };
        Ok(Expr::Bool { value, token })
    }

    pub fn variable(token: Token) -> Self {
        Expr::Variable {
            name: token.lexeme.clone(),
            token,
        }
    }

    pub fn grouping(expr: Expr, token: Token) -> Self {
        Expr::Grouping {
            expr: Box::new(expr),
            token,
        }
    }

    pub fn unary(operator: UnaryOp, operand: Expr, token: Token) -> Result<Self> {
        Self::require(&operand, Capability::Arithmetic, &token, operator.name())?;
        Ok(Expr::Unary {
            operator,
            operand: Box::new(operand),
            token,
        })
    }

    pub fn binary(left: Expr, operator: BinaryOp, right: Expr, token: Token) -> Result<Self> {
        Self::require(&left, Capability::Arithmetic, &token, operator.name())?;
        Self::require(&right, Capability::Arithmetic, &token, operator.name())?;
        Ok(Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            token,
        })
    }

    pub fn call(function: Function, argument: Expr, token: Token) -> Result<Self> {
        Self::require(&argument, Capability::Arithmetic, &token, function.name())?;
        Ok(Expr::Call {
            function,
            argument: Box::new(argument),
            token,
        })
    }

    pub fn comparison(
        left: Expr,
        operator: ComparisonOp,
        right: Expr,
        token: Token,
    ) -> Result<Self> {
        Self::require(&left, Capability::Arithmetic, &token, operator.keyword())?;
        Self::require(&right, Capability::Arithmetic, &token, operator.keyword())?;
        Ok(Expr::Comparison {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            token,
        })
    }

    pub fn logical(left: Expr, operator: LogicalOp, right: Expr, token: Token) -> Result<Self> {
        Self::require(&left, Capability::Boolean, &token, operator.keyword())?;
        Self::require(&right, Capability::Boolean, &token, operator.keyword())?;
        Ok(Expr::Logical {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            token,
        })
    }

    pub fn not(operand: Expr, token: Token) -> Result<Self> {
        Self::require(&operand, Capability::Boolean, &token, "not")?;
        Ok(Expr::Not {
            operand: Box::new(operand),
            token,
        })
    }

    fn require(operand: &Expr, required: Capability, token: &Token, operation: &str) -> Result<()> {
        if operand.capability().provides(required) {
            Ok(())
        } else {
            Err(Self::mismatch(token, operation, required))
        }
    }

    fn mismatch(token: &Token, operation: &str, required: Capability) -> TallyError {
        TallyError::syntax_with_help(
            token.location,
            token.span.clone(),
            format!("Bad data type for {}: expected {} operand", operation, required),
            match required {
                Capability::Boolean => {
                    "Use a comparison such as 'x greater_than 0' to turn numbers into booleans."
                }
                _ => "Booleans cannot take part in arithmetic; numbers and booleans never convert.",
            }
            .to_string(),
        )
    }

    pub fn capability(&self) -> Capability {
        match self {
            Expr::Number { .. } | Expr::Unary { .. } | Expr::Binary { .. } | Expr::Call { .. } => {
                Capability::Arithmetic
            }
            Expr::Bool { .. }
            | Expr::Comparison { .. }
            | Expr::Logical { .. }
            | Expr::Not { .. } => Capability::Boolean,
            Expr::Variable { .. } => Capability::Dynamic,
            Expr::Grouping { expr, .. } => expr.capability(),
        }
    }

    /// The token that introduced this node.
    pub fn token(&self) -> &Token {
        match self {
            Expr::Number { token, .. }
            | Expr::Bool { token, .. }
            | Expr::Variable { token, .. }
            | Expr::Grouping { token, .. }
            | Expr::Unary { token, .. }
            | Expr::Binary { token, .. }
            | Expr::Call { token, .. }
            | Expr::Comparison { token, .. }
            | Expr::Logical { token, .. }
            | Expr::Not { token, .. } => token,
        }
    }

    /// Renders source text. With `grouping`, every operator and call is parenthesized.
    pub fn render(&self, grouping: bool) -> String {
        let wrap = |text: String| {
            if grouping {
                format!("({})", text)
            } else {
                text
            }
        };

        match self {
            Expr::Number { literal, .. } => literal.clone(),
            Expr::Bool { value, .. } => value.to_string(),
            Expr::Variable { name, .. } => name.clone(),
            Expr::Grouping { expr, .. } => {
                if grouping {
                    expr.render(true)
                } else {
                    format!("({})", expr.render(false))
                }
            }
            Expr::Unary {
                operator, operand, ..
            } => wrap(format!("{}{}", operator.symbol(), operand.render(grouping))),
            Expr::Binary {
                left,
                operator,
                right,
                ..
            } => wrap(format!(
                "{} {} {}",
                left.render(grouping),
                operator.symbol(),
                right.render(grouping)
            )),
            Expr::Call {
                function, argument, ..
            } => wrap(format!("{}({})", function.name(), argument.render(grouping))),
            Expr::Comparison {
                left,
                operator,
                right,
                ..
            } => wrap(format!(
                "{} {} {}",
                left.render(grouping),
                operator.keyword(),
                right.render(grouping)
            )),
            Expr::Logical {
                left,
                operator,
                right,
                ..
            } => wrap(format!(
                "{} {} {}",
                left.render(grouping),
                operator.keyword(),
                right.render(grouping)
            )),
            Expr::Not { operand, .. } => wrap(format!("not {}", operand.render(grouping))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Negate,
}

impl UnaryOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Plus => Some(UnaryOp::Plus),
            TokenType::Minus => Some(UnaryOp::Negate),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Negate => "-",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Plus => "positive",
            UnaryOp::Negate => "negative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Plus => Some(BinaryOp::Add),
            TokenType::Minus => Some(BinaryOp::Subtract),
            TokenType::Star => Some(BinaryOp::Multiply),
            TokenType::Slash => Some(BinaryOp::Divide),
            TokenType::Percent => Some(BinaryOp::Modulo),
            TokenType::Caret => Some(BinaryOp::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
            BinaryOp::Power => "^",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BinaryOp::Add => "addition",
            BinaryOp::Subtract => "subtraction",
            BinaryOp::Multiply => "multiplication",
            BinaryOp::Divide => "division",
            BinaryOp::Modulo => "modulo",
            BinaryOp::Power => "power",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log,
    Sqrt,
    Int,
}

impl Function {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Sin => Some(Function::Sin),
            TokenType::Cos => Some(Function::Cos),
            TokenType::Tan => Some(Function::Tan),
            TokenType::Asin => Some(Function::Asin),
            TokenType::Acos => Some(Function::Acos),
            TokenType::Atan => Some(Function::Atan),
            TokenType::Log => Some(Function::Log),
            TokenType::Sqrt => Some(Function::Sqrt),
            TokenType::Int => Some(Function::Int),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Log => "log",
            Function::Sqrt => "sqrt",
            Function::Int => "Int",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    EqualTo,
    NotEqualTo,
    LessThan,
    GreaterThan,
}

impl ComparisonOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::EqualTo => Some(ComparisonOp::EqualTo),
            TokenType::NotEqualTo => Some(ComparisonOp::NotEqualTo),
            TokenType::LessThan => Some(ComparisonOp::LessThan),
            TokenType::GreaterThan => Some(ComparisonOp::GreaterThan),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ComparisonOp::EqualTo => "equal_to",
            ComparisonOp::NotEqualTo => "not_equal_to",
            ComparisonOp::LessThan => "less_than",
            ComparisonOp::GreaterThan => "greater_than",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::And => Some(LogicalOp::And),
            TokenType::Or => Some(LogicalOp::Or),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}
