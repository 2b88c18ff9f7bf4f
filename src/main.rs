use std::io::{self, Stdout};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::info;

mod audio;
mod input;
mod maze;
mod render;
mod score;
mod session;

use input::Command;
use render::Renderer;
use score::{JsonScoreStore, RecordBook};
use session::GameSession;

const DEFAULT_MAZE_SIZE: usize = 20;
const DEFAULT_RENDER_FPS: u64 = 30;

fn main() -> Result<()> {
    env_logger::init();

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = run(&mut stdout);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

fn run(stdout: &mut Stdout) -> Result<()> {
    let (size, render_fps) = read_settings();
    let records = RecordBook::new(Box::new(JsonScoreStore::new(JsonScoreStore::default_path())));
    let mut rng = rand::thread_rng();
    let mut session = GameSession::new(size, records, &mut rng);
    let mut renderer = Renderer::new(size);
    let frame_time = Duration::from_micros(1_000_000 / render_fps.max(1));
    info!(
        "rat-escape up, maze size {}, best so far: {:?}",
        size,
        session.best_secs()
    );

    loop {
        let frame_start = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    continue;
                }
                match input::command_for_key(key.code) {
                    Some(Command::Quit) => return Ok(()),
                    Some(Command::NewGame) => {
                        session.new_game(&mut rng);
                        info!("new maze");
                    }
                    Some(Command::Move(dir)) => {
                        let outcome = session.move_player(dir);
                        if let Some(win) = outcome.win {
                            info!(
                                "escaped in {}s{}",
                                win.elapsed_secs,
                                if win.new_record { " (new record)" } else { "" }
                            );
                            audio::play_win_tone();
                        }
                    }
                    None => {}
                }
            }
        }

        render::render(stdout, &session, &mut renderer)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

fn read_settings() -> (usize, u64) {
    let size = std::env::var("RAT_ESCAPE_SIZE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v >= 3)
        .unwrap_or(DEFAULT_MAZE_SIZE);
    let render_fps = std::env::var("RAT_ESCAPE_FPS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_RENDER_FPS);
    (size, render_fps)
}
