use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::complex_number::{ComplexNumber, DivisionMode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DivisionArg {
    /// Polar shortcut kept for compatibility with existing results
    #[clap(alias = "ref")]
    Reference,
    /// Textbook complex division
    Exact,
}

impl From<DivisionArg> for DivisionMode {
    fn from(arg: DivisionArg) -> Self {
        match arg {
            DivisionArg::Reference => DivisionMode::Reference,
            DivisionArg::Exact => DivisionMode::Exact,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "cplane",
    about = "Complex numbers: arithmetic, magnitude/phase, and a plot of the complex plane",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct CplaneCli {
    /// Global: path to config (TOML); default: ~/.cplane/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: division formula (overrides config)
    #[arg(long = "division", value_enum, value_name = "MODE", global = true)]
    pub division: Option<DivisionArg>,

    /// Global: debug logging to stderr (same as CPLANE_DEBUG=1)
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

/// Same rule as `plot.limit` in the config file.
fn parse_limit(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if n.is_finite() && n > 0.0 {
        Ok(n)
    } else {
        Err(format!("must be a positive number (got {s})"))
    }
}

/// Numbers are written `RE,IM` (e.g. `3,4` or `-1.5,2`), `"(RE, IM * i)"`, or `RE`.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a number with its magnitude, phase and conjugate
    Show {
        #[arg(value_name = "Z", allow_hyphen_values = true)]
        z: ComplexNumber,
    },

    /// A + B
    Add {
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: ComplexNumber,
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: ComplexNumber,
    },

    /// A - B
    Sub {
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: ComplexNumber,
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: ComplexNumber,
    },

    /// A * B
    Mul {
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: ComplexNumber,
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: ComplexNumber,
    },

    /// A / B (see --division)
    ///
    /// Examples:
    ///   cplane div 1,1 0,1
    ///   cplane --division exact div 3,4 1,2
    Div {
        #[arg(value_name = "A", allow_hyphen_values = true)]
        a: ComplexNumber,
        #[arg(value_name = "B", allow_hyphen_values = true)]
        b: ComplexNumber,
    },

    /// Complex conjugate of Z
    Conj {
        #[arg(value_name = "Z", allow_hyphen_values = true)]
        z: ComplexNumber,
    },

    /// Plot Z on the complex plane (terminal view, or SVG with --svg)
    Plot {
        #[arg(value_name = "Z", allow_hyphen_values = true)]
        z: ComplexNumber,
        /// Write an SVG figure to FILE instead of opening the terminal view
        #[arg(long = "svg", value_name = "FILE")]
        svg: Option<PathBuf>,
        /// Axis bound; both axes span [-N, N] (overrides config)
        #[arg(long = "limit", value_name = "N", value_parser = parse_limit)]
        limit: Option<f64>,
    },

    /// Interactive calculator shell (default when no subcommand is given)
    Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CplaneCli::command().debug_assert();
    }

    #[test]
    fn parses_negative_literals() {
        let cli = CplaneCli::try_parse_from(["cplane", "add", "-1,2", "3,-4"]).unwrap();
        match cli.cmd {
            Some(Command::Add { a, b }) => {
                assert_eq!(a, ComplexNumber::new(-1.0, 2.0));
                assert_eq!(b, ComplexNumber::new(3.0, -4.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            CplaneCli::try_parse_from(["cplane", "div", "1,1", "0,1", "--division", "exact"])
                .unwrap();
        assert_eq!(cli.division, Some(DivisionArg::Exact));
        assert!(matches!(cli.cmd, Some(Command::Div { .. })));
    }

    #[test]
    fn rejects_garbage_numbers() {
        assert!(CplaneCli::try_parse_from(["cplane", "show", "three"]).is_err());
    }

    #[test]
    fn plot_limit_must_be_positive() {
        for bad in ["-5", "0", "NaN", "inf", "ten"] {
            let res = CplaneCli::try_parse_from(["cplane", "plot", "1,1", "--limit", bad]);
            assert!(res.is_err(), "--limit {bad} was accepted");
        }
        let cli = CplaneCli::try_parse_from(["cplane", "plot", "1,1", "--limit", "2.5"]).unwrap();
        assert!(matches!(cli.cmd, Some(Command::Plot { limit: Some(l), .. }) if l == 2.5));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = CplaneCli::try_parse_from(["cplane"]).unwrap();
        assert!(cli.cmd.is_none());
    }
}
