use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::UnicodeWidthStr;

use crate::maze::{Pos, Tile};
use crate::session::{GameSession, Phase};

const CELL_W: usize = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player,
    Exit,
    Wall,
    Path,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: String,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
    size: usize,
}

impl Renderer {
    pub fn new(size: usize) -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Path,
                    color: Color::Reset,
                };
                size * size
            ],
            last_hud: String::new(),
            needs_full: true,
            origin_x: 0,
            origin_y: 1,
            size,
        }
    }
}

pub fn render(stdout: &mut Stdout, session: &GameSession, renderer: &mut Renderer) -> io::Result<()> {
    let size = renderer.size;
    let needed_h = (size + 2) as u16;
    let needed_w = (size * CELL_W) as u16;

    stdout.queue(MoveTo(0, 0))?;

    let (term_w, term_h) = terminal::size()?;
    if term_w < needed_w || term_h < needed_h {
        stdout.queue(Clear(ClearType::All))?;
        let msg = format!(
            "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
            needed_w, needed_h, term_w, term_h
        );
        stdout.queue(Print(msg))?;
        stdout.flush()?;
        renderer.needs_full = true;
        return Ok(());
    }

    let origin_x = (term_w - needed_w) / 2;
    let origin_y = (term_h - needed_h) / 2 + 1;
    if origin_x != renderer.origin_x || origin_y != renderer.origin_y {
        renderer.origin_x = origin_x;
        renderer.origin_y = origin_y;
        renderer.needs_full = true;
    }

    let hud = hud_line(session);
    if renderer.needs_full || hud != renderer.last_hud {
        stdout.queue(MoveTo(renderer.origin_x, renderer.origin_y - 1))?;
        stdout.queue(SetForegroundColor(Color::White))?;
        stdout.queue(Clear(ClearType::CurrentLine))?;
        stdout.queue(Print(&hud))?;
        stdout.queue(ResetColor)?;
        renderer.last_hud = hud;
    }

    for y in 0..size {
        for x in 0..size {
            let pos = Pos { x, y };
            let cell = cell_for(session, pos);
            let idx = y * size + x;
            if renderer.needs_full || cell != renderer.last[idx] {
                renderer.last[idx] = cell;
                draw_cell(stdout, renderer, x, y, cell)?;
            }
        }
    }
    renderer.needs_full = false;

    stdout.flush()?;
    Ok(())
}

fn hud_line(session: &GameSession) -> String {
    let best = match session.best_secs() {
        Some(best) => format!("{}s", best),
        None => "N/A".to_string(),
    };
    let status = match session.phase() {
        Phase::NotStarted => "Press n to start".to_string(),
        Phase::Ready => "Ready to play!".to_string(),
        Phase::Playing => "Playing...".to_string(),
        Phase::Won => {
            let win = session.last_win();
            let elapsed = win.map(|w| w.elapsed_secs).unwrap_or(0);
            if win.map(|w| w.new_record).unwrap_or(false) {
                format!("Escaped in {}s! New record!", elapsed)
            } else {
                format!("Escaped in {}s!", elapsed)
            }
        }
    };
    format!(
        "Time: {}s  Best: {}  {}  (n: new maze, q: quit)",
        session.elapsed_secs(),
        best,
        status
    )
}

fn cell_for(session: &GameSession, pos: Pos) -> Cell {
    if pos == session.player() {
        return Cell {
            glyph: Glyph::Player,
            color: Color::Yellow,
        };
    }
    if pos == session.exit() {
        return Cell {
            glyph: Glyph::Exit,
            color: Color::Yellow,
        };
    }
    match session.grid().tile(pos) {
        Tile::Wall => Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        },
        Tile::Path => Cell {
            glyph: Glyph::Path,
            color: Color::Reset,
        },
    }
}

fn draw_cell(stdout: &mut Stdout, renderer: &Renderer, x: usize, y: usize, cell: Cell) -> io::Result<()> {
    let (text, color) = match cell.glyph {
        Glyph::Player => ("🐀", cell.color),
        Glyph::Exit => ("🧀", cell.color),
        Glyph::Wall => ("██", cell.color),
        Glyph::Path => ("  ", cell.color),
    };
    let x_pos = renderer.origin_x + (x * CELL_W) as u16;
    let y_pos = renderer.origin_y + y as u16;
    stdout.queue(MoveTo(x_pos, y_pos))?;
    stdout.queue(SetForegroundColor(color))?;
    stdout.queue(Print(text))?;
    let w = UnicodeWidthStr::width(text);
    if w < CELL_W {
        for _ in 0..(CELL_W - w) {
            stdout.queue(Print(' '))?;
        }
    }
    stdout.queue(ResetColor)?;
    Ok(())
}
