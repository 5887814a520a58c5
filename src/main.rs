/// qtune main: subcommand dispatch.
use clap::Parser; // trait import enables QtuneCli::parse()

use qtune::cli::{Command, QtuneCli};
use qtune::commands;
use qtune::config::RunConfig;

fn main() -> anyhow::Result<()> {
    let args = QtuneCli::parse();
    if args.debug {
        qtune::core::debug::force_enable();
    }

    match args.cmd {
        Some(Command::Optimize { overrides, trace_out }) => {
            let cfg = RunConfig::load(&args.config)?;
            commands::optimize::main(cfg, overrides, trace_out)
        }
        Some(Command::Sweep { trace_dir }) => {
            let cfg = RunConfig::load(&args.config)?;
            commands::sweep::main(cfg, trace_dir)
        }
        Some(Command::Entangle { qubits, preset, amplitudes }) => {
            commands::entangle::main(qubits, preset, amplitudes)
        }
        Some(Command::Circuit { angle }) => commands::circuit::main(angle),
        None => {
            use clap::CommandFactory;
            QtuneCli::command().print_help().ok();
            println!();
            Ok(())
        }
    }
}
