use crate::ast::{BinaryOp, Capability, ComparisonOp, Expr, Function, LogicalOp, Program, Stmt, UnaryOp};
use crate::error::{Result, TallyError};
use crate::lexer::Token;
use crate::symbols::SymbolTable;
use crate::value::Value;

impl Program {
    /// Runs every statement in order and returns the accumulated print output.
    ///
    /// A failing statement aborts the rest; bindings made by earlier statements stay.
    pub fn eval(&self, symbols: &mut SymbolTable) -> Result<String> {
        let mut output = String::new();
        for statement in &self.statements {
            output.push_str(&statement.execute(symbols)?);
        }
        Ok(output)
    }
}

impl Stmt {
    pub fn execute(&self, symbols: &mut SymbolTable) -> Result<String> {
        match self {
            Stmt::Assign {
                name,
                create,
                value,
                token,
            } => {
                assign(symbols, name, *create, value, token)?;
                Ok(String::new())
            }
            Stmt::Print { expr } => Ok(format!("{}\n", expr.eval(symbols)?)),
        }
    }
}

fn assign(
    symbols: &mut SymbolTable,
    name: &str,
    create: bool,
    value: &Expr,
    token: &Token,
) -> Result<()> {
    if SymbolTable::is_constant(name) {
        return Err(runtime_with_help(
            token,
            format!("attempted to modify built in constant '{}'", name),
            "pi, e, nan and inf are read-only.",
        ));
    }

    let new_value = value.eval(symbols)?;

    match (symbols.get(name), create) {
        (Some(_), true) => Err(runtime_with_help(
            token,
            format!("tried to create already existing variable '{}'", name),
            &format!("Drop 'var' to assign a new value: {} = ...;", name),
        )),
        (None, false) => Err(runtime_with_help(
            token,
            format!("unknown variable '{}'", name),
            &format!("Declare it first: var {} = ...;", name),
        )),
        (Some(existing), false) if !existing.same_type(&new_value) => Err(runtime_with_help(
            token,
            format!(
                "wrong data type: cannot assign {} to {} variable '{}'",
                new_value.type_name(),
                existing.type_name(),
                name
            ),
            "A variable keeps the type of its first value.",
        )),
        _ => {
            symbols.insert(name, new_value);
            Ok(())
        }
    }
}

impl Expr {
    pub fn eval(&self, symbols: &SymbolTable) -> Result<Value> {
        match self.capability() {
            Capability::Arithmetic => Ok(Value::Number(self.eval_number(symbols)?)),
            Capability::Boolean => Ok(Value::Bool(self.eval_bool(symbols)?)),
            Capability::Dynamic => match self {
                Expr::Grouping { expr, .. } => expr.eval(symbols),
                _ => self.lookup(symbols),
            },
        }
    }

    pub fn eval_number(&self, symbols: &SymbolTable) -> Result<f64> {
        match self {
            Expr::Number { literal, token } => match literal.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(n),
                _ => Err(runtime(token, format!("cannot parse literal '{}'", literal))),
            },
            Expr::Variable { name, token } => match self.lookup(symbols)? {
                Value::Number(n) => Ok(n),
                other => Err(wrong_type(token, name, &other, "double")),
            },
            Expr::Grouping { expr, .. } => expr.eval_number(symbols),
            Expr::Unary {
                operator, operand, ..
            } => {
                let operand = operand.eval_number(symbols)?;
                Ok(match operator {
                    UnaryOp::Plus => operand,
                    UnaryOp::Negate => -operand,
                })
            }
            Expr::Binary {
                left,
                operator,
                right,
                token,
            } => {
                let left = left.eval_number(symbols)?;
                let right = right.eval_number(symbols)?;
                apply_binary(*operator, left, right, token)
            }
            Expr::Call {
                function,
                argument,
                token,
            } => {
                let argument = argument.eval_number(symbols)?;
                apply_function(*function, argument, token)
            }
            _ => Err(runtime(
                self.token(),
                format!("wrong data type: {} expression used as a number", self.capability()),
            )),
        }
    }

    pub fn eval_bool(&self, symbols: &SymbolTable) -> Result<bool> {
        match self {
            Expr::Bool { value, .. } => Ok(*value),
            Expr::Variable { name, token } => match self.lookup(symbols)? {
                Value::Bool(b) => Ok(b),
                other => Err(wrong_type(token, name, &other, "bool")),
            },
            Expr::Grouping { expr, .. } => expr.eval_bool(symbols),
            Expr::Comparison {
                left,
                operator,
                right,
                ..
            } => {
                let left = left.eval_number(symbols)?;
                let right = right.eval_number(symbols)?;
                Ok(match operator {
                    ComparisonOp::EqualTo => left == right,
                    ComparisonOp::NotEqualTo => left != right,
                    ComparisonOp::LessThan => left < right,
                    ComparisonOp::GreaterThan => left > right,
                })
            }
            // Both sides are always evaluated so errors on the right are never hidden.
            Expr::Logical {
                left,
                operator,
                right,
                ..
            } => {
                let left = left.eval_bool(symbols)?;
                let right = right.eval_bool(symbols)?;
                Ok(match operator {
                    LogicalOp::And => left && right,
                    LogicalOp::Or => left || right,
                })
            }
            Expr::Not { operand, .. } => Ok(!operand.eval_bool(symbols)?),
            _ => Err(runtime(
                self.token(),
                format!("wrong data type: {} expression used as a boolean", self.capability()),
            )),
        }
    }

    fn lookup(&self, symbols: &SymbolTable) -> Result<Value> {
        let token = self.token();
        symbols.get(&token.lexeme).ok_or_else(|| {
            runtime_with_help(
                token,
                format!("variable '{}' does not exist", token.lexeme),
                &format!("Declare it before use: var {} = ...;", token.lexeme),
            )
        })
    }
}

fn apply_binary(operator: BinaryOp, left: f64, right: f64, token: &Token) -> Result<f64> {
    let result = match operator {
        BinaryOp::Add => left + right,
        BinaryOp::Subtract => left - right,
        BinaryOp::Multiply => left * right,
        BinaryOp::Divide | BinaryOp::Modulo if right == 0.0 => {
            return Err(runtime(token, "attempted to divide by zero".to_string()));
        }
        BinaryOp::Divide => left / right,
        BinaryOp::Modulo => left % right,
        BinaryOp::Power => left.powf(right),
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(runtime(token, format!("bad {} operation", operator.name())))
    }
}

fn apply_function(function: Function, argument: f64, token: &Token) -> Result<f64> {
    let result = match function {
        Function::Sin => argument.sin(),
        Function::Cos => argument.cos(),
        Function::Tan => argument.tan(),
        Function::Asin => argument.asin(),
        Function::Acos => argument.acos(),
        Function::Atan => argument.atan(),
        Function::Log => argument.ln(),
        Function::Sqrt => argument.sqrt(),
        // Rounds toward zero; never a domain error.
        Function::Int => {
            return Ok(if argument < 0.0 {
                argument.ceil()
            } else {
                argument.floor()
            });
        }
    };

    if result.is_finite() {
        Ok(result)
    } else {
        Err(runtime(
            token,
            format!("invalid argument to {}", function.name()),
        ))
    }
}

fn runtime(token: &Token, message: String) -> TallyError {
    TallyError::runtime(token.location, token.span.clone(), message)
}

fn runtime_with_help(token: &Token, message: String, help: &str) -> TallyError {
    TallyError::runtime_with_help(token.location, token.span.clone(), message, help.to_string())
}

fn wrong_type(token: &Token, name: &str, found: &Value, expected: &str) -> TallyError {
    runtime(
        token,
        format!(
            "wrong data type: variable '{}' holds a {}, expected a {}",
            name,
            found.type_name(),
            expected
        ),
    )
}
