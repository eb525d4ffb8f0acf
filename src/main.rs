use std::env;
use std::fs;
use std::process::ExitCode;

use tailscript::interpreter::{Interpreter, StdHost};
use tailscript::parser;

fn main() -> ExitCode {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("usage: tailscript <script>");
        return ExitCode::FAILURE;
    };
    if args.next().is_some() {
        eprintln!("usage: tailscript <script>");
        return ExitCode::FAILURE;
    }

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("tailscript: cannot read '{}': {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let program = match parser::parse(&source) {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut interpreter = match Interpreter::new(&program, StdHost) {
        Ok(interpreter) => interpreter,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = interpreter.run() {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
