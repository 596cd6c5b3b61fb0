//! src/commands/plot.rs
//! `cplane plot`: build the sketch, hand it to a renderer.

use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::core::complex_number::ComplexNumber;
use crate::core::plane::{PlaneRenderer, PlaneSketch};
use crate::core::svg::SvgRenderer;
use crate::debug_log;
use crate::tui::plane::TerminalRenderer;

pub fn render_with<R: PlaneRenderer>(renderer: &mut R, z: ComplexNumber, limit: f64) -> Result<()> {
    let sketch = PlaneSketch::from_number(z, limit);
    debug_log!(
        "plot: {} |z|={:.3} phase={:.3} limit={}",
        z,
        z.magnitude(),
        z.phase(),
        sketch.limit
    );
    renderer.render(&sketch)
}

/// SVG export when `svg` is given, otherwise the interactive terminal view.
pub fn main(z: ComplexNumber, limit: f64, svg: Option<PathBuf>) -> Result<()> {
    match svg {
        Some(path) => {
            render_with(&mut SvgRenderer::new(&path), z, limit)?;
            println!("{} {}", "wrote".truecolor(0, 255, 180), path.display());
            Ok(())
        }
        None => render_with(&mut TerminalRenderer, z, limit),
    }
}
