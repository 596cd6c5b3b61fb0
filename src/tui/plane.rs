//! Full-screen terminal view of a [`PlaneSketch`] (blocks until the user closes it).

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame, Terminal,
};

use crate::core::plane::{PlaneRenderer, PlaneSketch, Segment};
use crate::debug_log;

// ---------- Palette ----------
const GRID: Color = Color::Rgb(70, 70, 80);
const AXIS: Color = Color::Rgb(190, 190, 200);
const ARROW: Color = Color::Rgb(60, 120, 255);
const POINT: Color = Color::Rgb(0, 220, 90);
const ARC: Color = Color::Rgb(180, 0, 200);
const NOTE: Color = Color::Rgb(255, 240, 0);

#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalRenderer;

impl PlaneRenderer for TerminalRenderer {
    fn render(&mut self, sketch: &PlaneSketch) -> Result<()> {
        show(sketch)
    }
}

// ---------- Entry Point ----------
pub fn show(sketch: &PlaneSketch) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Complex Plane"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = panic::catch_unwind(AssertUnwindSafe(|| run_view(&mut terminal, sketch)));

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle("cplane"))?;
    terminal.show_cursor()?;

    match res {
        Ok(inner) => inner,
        Err(panic_payload) => {
            let msg = if let Some(s) = panic_payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "<non-string panic>".into()
            };
            anyhow::bail!("plane view crashed: {msg}")
        }
    }
}

// ---------- Event Loop ----------
fn run_view<B: Backend>(terminal: &mut Terminal<B>, sketch: &PlaneSketch) -> Result<()> {
    let tick_rate = Duration::from_millis(100);
    loop {
        terminal.draw(|f| draw(f, sketch))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Enter, _) => {
                        debug_log!("plane view: closed by {:?}", key.code);
                        return Ok(());
                    }
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Ok(()),
                    _ => {}
                }
            }
        }
    }
}

// ---------- Drawing ----------

/// Largest rect inside `area` whose cells form a visually square plot
/// (terminal cells are about twice as tall as they are wide).
fn square_in(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = (width / 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn segment(ctx: &mut Context<'_>, seg: &Segment, color: Color) {
    ctx.draw(&CanvasLine {
        x1: seg.from.0,
        y1: seg.from.1,
        x2: seg.to.0,
        y2: seg.to.1,
        color,
    });
}

pub fn draw(f: &mut Frame<'_>, sketch: &PlaneSketch) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(f.size());

    let lim = sketch.limit;
    let ticks = sketch.ticks();
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    format!(" {} ", sketch.title),
                    Style::default().fg(NOTE).add_modifier(Modifier::BOLD),
                )),
        )
        .marker(Marker::Braille)
        .x_bounds([-lim, lim])
        .y_bounds([-lim, lim])
        .paint(|ctx| {
            for &t in &ticks {
                segment(ctx, &Segment::new((t, -lim), (t, lim)), GRID);
                segment(ctx, &Segment::new((-lim, t), (lim, t)), GRID);
            }
            ctx.layer();
            segment(ctx, &Segment::new((-lim, 0.0), (lim, 0.0)), AXIS);
            segment(ctx, &Segment::new((0.0, -lim), (0.0, lim)), AXIS);
            for dash in sketch
                .vertical_projection
                .dashes(8)
                .iter()
                .chain(sketch.horizontal_projection.dashes(8).iter())
            {
                segment(ctx, dash, AXIS);
            }
            ctx.layer();
            segment(ctx, &sketch.arrow, ARROW);
            if !sketch.arc.is_empty() {
                let pts = sketch.arc.points(48);
                ctx.draw(&Points { coords: &pts, color: ARC });
            }
            ctx.layer();
            ctx.print(
                sketch.point.0,
                sketch.point.1,
                Span::styled("*", Style::default().fg(POINT).add_modifier(Modifier::BOLD)),
            );
            ctx.print(
                sketch.magnitude_note.at.0,
                sketch.magnitude_note.at.1,
                Span::styled(sketch.magnitude_note.text.clone(), Style::default().fg(NOTE)),
            );
            ctx.print(
                sketch.phase_note.at.0,
                sketch.phase_note.at.1,
                Span::styled(sketch.phase_note.text.clone(), Style::default().fg(NOTE)),
            );
        });
    f.render_widget(canvas, square_in(rows[0]));

    let mut legend = vec![
        Span::styled("* ", Style::default().fg(POINT)),
        Span::raw(sketch.legend.clone()),
        Span::styled(
            format!("   x: {}  y: {}", sketch.x_label, sketch.y_label),
            Style::default().fg(AXIS),
        ),
    ];
    if !sketch.point_in_view() {
        legend.push(Span::styled("   (point outside view)", Style::default().fg(Color::Red)));
    }
    legend.push(Span::styled("   q/Esc: close", Style::default().fg(GRID)));
    let footer = Paragraph::new(Line::from(legend))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, rows[1]);
}
