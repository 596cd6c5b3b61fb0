//! cplane main — subcommands, or the calculator shell by default.
use clap::Parser; // trait import enables CplaneCli::parse()
use colored::Colorize;

use complex_plane::cli::{Command, CplaneCli};
use complex_plane::commands::{self, arith::BinaryOp};
use complex_plane::config::Config;
use complex_plane::core::complex_number::DivisionMode;
use complex_plane::core::debug;
use complex_plane::debug_log;
use complex_plane::shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = CplaneCli::parse();

    let mut cfg = Config::load(&args.config)?;
    if let Some(d) = args.division {
        cfg.division = DivisionMode::from(d);
    }
    cfg.debug |= args.debug;
    if cfg.debug {
        debug::enable();
    }
    debug_log!("config: {:?}", cfg);

    match args.cmd {
        None | Some(Command::Shell) => shell::start(cfg),
        Some(Command::Show { z }) => commands::arith::show(z),
        Some(Command::Add { a, b }) => commands::arith::binary(BinaryOp::Add, a, b, cfg.division),
        Some(Command::Sub { a, b }) => commands::arith::binary(BinaryOp::Sub, a, b, cfg.division),
        Some(Command::Mul { a, b }) => commands::arith::binary(BinaryOp::Mul, a, b, cfg.division),
        Some(Command::Div { a, b }) => commands::arith::binary(BinaryOp::Div, a, b, cfg.division),
        Some(Command::Conj { z }) => commands::arith::conjugate(z),
        Some(Command::Plot { z, svg, limit }) => {
            commands::plot::main(z, limit.unwrap_or(cfg.plot_limit), svg)
        }
    }
}
