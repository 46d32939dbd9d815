// Tally expression language
//
// A small interpreted language over doubles and booleans: declarations,
// re-assignment and print statements evaluated against a persistent symbol
// table seeded with built-in constants.

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod symbols;
pub mod value;

pub use ast::{Capability, Expr, Program, Stmt};
pub use error::{ErrorKind, Location, Span, TallyError};
pub use interpreter::Interpreter;
pub use lexer::{Lexer, Token, TokenType};
pub use parser::{parse, Parser};
pub use symbols::SymbolTable;
pub use value::Value;

pub use repl::start as start_repl;
pub use runner::run;
