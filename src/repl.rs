use crate::interpreter::Interpreter;
use crate::runner::report;
use std::io::{self, BufRead, Write};

const PROMPT: &str = "input> ";

/// Interactive loop over one persistent interpreter.
///
/// Each line is evaluated as a complete program. `:vars` lists the symbol
/// table, `:reset` clears it, and `q`, `quit` or `exit` leave.
pub fn start() {
    println!("Tally v{}", env!("CARGO_PKG_VERSION"));
    println!("Type 'q' to quit, ':vars' to list variables, ':reset' to start over");
    println!();

    let mut interpreter = Interpreter::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        if let Err(error) = io::stdout().flush() {
            log::error!("failed to flush prompt: {}", error);
            break;
        }

        let line = match lines.next() {
            None => {
                // EOF (Ctrl+D or piped input ended)
                println!();
                break;
            }
            Some(Ok(line)) => line,
            Some(Err(error)) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        };

        let line = line.trim();
        match line {
            "" => continue,
            "q" | "quit" | "exit" => break,
            ":vars" => print_vars(&interpreter),
            ":reset" => {
                interpreter.reset();
                println!("Symbol table reset");
            }
            source => run_line(source, &mut interpreter),
        }
    }
}

fn run_line(source: &str, interpreter: &mut Interpreter) {
    match interpreter.evaluate(source) {
        Ok(output) => print!("{}", output),
        Err(error) => {
            report(error, source, None);
        }
    }
}

fn print_vars(interpreter: &Interpreter) {
    let rows = interpreter.symbols().rows();
    let width = rows.iter().map(|(name, _, _)| name.len()).max().unwrap_or(4).max(4);

    println!("{:<width$}  {:<6}  value", "name", "type", width = width);
    for (name, type_name, value) in rows {
        println!("{:<width$}  {:<6}  {}", name, type_name, value, width = width);
    }
}
