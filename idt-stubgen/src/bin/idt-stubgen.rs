/// CLI: emits interrupt handler stubs and IDT gate registrations to stdout.
///
/// Usage:
///   idt-stubgen                                  > interrupt_stubs.c
///   idt-stubgen --section handlers               > handlers.c
///   idt-stubgen --section gates --wrap-gates idt_set_generated > gates.c
///   idt-stubgen --section prototypes             > interrupt_stubs.h
///   idt-stubgen --config stubgen.json -o interrupt_stubs.c
use idt_stubgen::cli::{self, Command};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", cli::USAGE);
            return ExitCode::FAILURE;
        }
    };

    let invocation = match command {
        Command::Help => {
            eprintln!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Command::Generate(invocation) => invocation,
    };

    match cli::run(&invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
