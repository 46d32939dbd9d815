use crate::error::Result;
use crate::parser;
use crate::symbols::SymbolTable;

/// Owns a symbol table across `evaluate` calls.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    symbols: SymbolTable,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and runs `source`, returning everything its print statements produced.
    ///
    /// Nothing runs if the source fails to lex or parse. A runtime error stops the
    /// program at the failing statement, and bindings made before it are kept.
    pub fn evaluate(&mut self, source: &str) -> Result<String> {
        log::debug!("evaluating {} bytes", source.len());
        let program = parser::parse(source)?;
        let output = program.eval(&mut self.symbols);
        if let Err(error) = &output {
            log::debug!("evaluation stopped: {}", error);
        }
        output
    }

    /// Clears every binding and re-seeds the constants.
    pub fn reset(&mut self) {
        log::debug!("resetting symbol table ({} bindings)", self.symbols.len());
        self.symbols.reset();
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}
