use crate::error::{Result, TallyError};
use crate::parser;
use crate::symbols::SymbolTable;

/// Runs a whole program against a fresh symbol table.
///
/// Output produced before a runtime error is still printed, followed by the
/// diagnostic.
pub fn run(source: &str, filename: Option<&str>) -> Result<()> {
    let program = parser::parse(source).map_err(|error| report(error, source, filename))?;
    let mut symbols = SymbolTable::new();

    for statement in &program.statements {
        match statement.execute(&mut symbols) {
            Ok(text) => print!("{}", text),
            Err(error) => return Err(report(error, source, filename)),
        }
    }

    Ok(())
}

/// Prints `error` as a source-annotated diagnostic and hands it back.
pub fn report(error: TallyError, source: &str, filename: Option<&str>) -> TallyError {
    if let Err(io_error) = error.report(source, filename) {
        log::error!("failed to render diagnostic: {}", io_error);
        eprintln!("{}", error);
    }
    error
}
