use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::commands;
use crate::commands::arith::{evaluate, BinaryOp};
use crate::config::Config;
use crate::core::complex_number::{ComplexNumber, DivisionMode};
use crate::core::plane::{PlaneRenderer, PlaneSketch};
use crate::core::svg::SvgRenderer;
use crate::tui::plane::TerminalRenderer;

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Empty,
    Exit,
}

/// Calculator state: current division mode, plot bound, last result (`ans`).
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: DivisionMode,
    pub limit: f64,
    pub last: Option<ComplexNumber>,
}

impl Session {
    pub fn new(cfg: &Config) -> Self {
        Session {
            mode: cfg.division,
            limit: cfg.plot_limit,
            last: None,
        }
    }

    fn value(&self, word: &str) -> Result<ComplexNumber> {
        if word == "ans" {
            return match self.last {
                Some(z) => Ok(z),
                None => bail!("no previous result for 'ans'"),
            };
        }
        Ok(word.parse::<ComplexNumber>()?)
    }

    fn remember(&mut self, z: ComplexNumber) -> Reply {
        self.last = Some(z);
        Reply::Text(z.to_string())
    }

    fn binary(&mut self, op: BinaryOp, args: &[String]) -> Result<Reply> {
        let [a, b] = args else { bail!("usage: {} A B", op.word()) };
        let z = evaluate(op, &self.value(a)?, &self.value(b)?, self.mode)?;
        Ok(self.remember(z))
    }

    pub fn exec(&mut self, line: &str) -> Result<Reply> {
        let mut parts = shell_words(line.trim());
        if parts.is_empty() {
            return Ok(Reply::Empty);
        }

        // infix form: A op B
        if parts.len() == 3 {
            if let Some(op) = BinaryOp::from_symbol(&parts[1]) {
                parts.remove(1);
                return self.binary(op, &parts);
            }
        }

        let cmd = parts.remove(0);
        match cmd.as_str() {
            "help" | "?" => Ok(Reply::Text(help_text())),
            "exit" | "quit" => Ok(Reply::Exit),

            "add" => self.binary(BinaryOp::Add, &parts),
            "sub" => self.binary(BinaryOp::Sub, &parts),
            "mul" => self.binary(BinaryOp::Mul, &parts),
            "div" => self.binary(BinaryOp::Div, &parts),
            "conj" => {
                let Some(word) = parts.first() else { bail!("usage: conj Z") };
                let z = self.value(word)?.conjugate();
                Ok(self.remember(z))
            }
            "show" => {
                let Some(word) = parts.first() else { bail!("usage: show Z") };
                let z = self.value(word)?;
                self.last = Some(z);
                Ok(Reply::Text(commands::arith::describe(&z)))
            }
            "mode" => match parts.first() {
                None => Ok(Reply::Text(format!("division: {}", self.mode.label()))),
                Some(m) => {
                    self.mode = m.parse()?;
                    Ok(Reply::Text(format!("division: {}", self.mode.label())))
                }
            },
            "plot" => {
                // plot Z [--svg FILE]
                let Some(word) = parts.first() else { bail!("usage: plot Z [--svg FILE]") };
                let z = self.value(word)?;
                let sketch = PlaneSketch::from_number(z, self.limit);
                match parts.iter().position(|p| p == "--svg") {
                    Some(i) => {
                        let Some(file) = parts.get(i + 1) else { bail!("--svg needs FILE") };
                        let path = PathBuf::from(file);
                        SvgRenderer::new(&path).render(&sketch)?;
                        Ok(Reply::Text(format!("wrote {}", path.display())))
                    }
                    None => {
                        TerminalRenderer.render(&sketch)?;
                        Ok(Reply::Empty)
                    }
                }
            }

            other => bail!("unknown command: {other}"),
        }
    }
}

pub fn start(cfg: Config) -> Result<()> {
    banner();

    let mut session = Session::new(&cfg);
    loop {
        // Prompt
        print!(
            "{} {} ",
            "⟦cplane⟧".bold().truecolor(225, 0, 180),
            "›".truecolor(255, 240, 0)
        );
        io::stdout().flush().ok();

        // Read line
        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match session.exec(&line) {
            Ok(Reply::Text(t)) => println!("{t}"),
            Ok(Reply::Empty) => {}
            Ok(Reply::Exit) => break,
            Err(e) => eprintln!("{} {:#}", "err:".red().bold(), e),
        }
    }

    Ok(())
}

fn banner() {
    println!(
        "\n{}  \n{}  \n",
        "╔══════════════════════════════════════════════════╗".truecolor(225, 0, 180),
        "║              c o m p l e x   p l a n e           ║"
            .truecolor(255, 240, 0)
            .bold(),
    );
    println!(
        "{}  {}",
        "╚══════════════════════════════════════════════════╝".truecolor(225, 0, 180),
        "type 'help' for commands".truecolor(130, 0, 200)
    );
}

fn help_text() -> String {
    format!(
        "{}\n\
         {}\n  add A B | sub A B | mul A B | div A B\n  A + B   (also - * /)\n  conj Z\n  show Z              # magnitude, phase, conjugate\n\
         {}\n  plot Z [--svg FILE] # terminal view or SVG export\n\
         {}\n  mode [reference|exact]  # division formula\n  ans                 # last result, usable as a number\n  help | exit\n\
         {}",
        "cplane — complex number calculator".bold().truecolor(0, 255, 180),
        "Arithmetic:".truecolor(130, 0, 200),
        "Plot:".truecolor(130, 0, 200),
        "Session:".truecolor(130, 0, 200),
        "Numbers: 3,4  -1.5,2  \"(1.5, -2 * i)\"  7".truecolor(190, 190, 200),
    )
}

fn shell_words(s: &str) -> Vec<String> {
    // split by whitespace, keeping "quoted strings" and (parenthesised, literals) whole
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut in_q = false;
    let mut depth = 0usize;
    for c in s.chars() {
        match (c, in_q) {
            ('"', false) => in_q = true,
            ('"', true) => in_q = false,
            ('(', false) => {
                depth += 1;
                buf.push(c);
            }
            (')', false) => {
                depth = depth.saturating_sub(1);
                buf.push(c);
            }
            (c, _) if c.is_whitespace() && !in_q && depth == 0 => {
                if !buf.is_empty() {
                    out.push(std::mem::take(&mut buf));
                }
            }
            (c, _) => buf.push(c),
        }
    }
    if !buf.is_empty() {
        out.push(buf);
    }
    out
}
