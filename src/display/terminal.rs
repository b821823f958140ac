use anyhow::Result;
use crossterm::{
    event::{self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::braille;
use crate::canvas::Canvas;
use crate::color::ConfigResources;
use crate::config::Config;
use crate::scene::PhasorView;

/// How often the input thread checks whether the render loop went away.
const INPUT_POLL: Duration = Duration::from_millis(250);

pub async fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Forward terminal events from a blocking reader thread.
fn spawn_input_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel(64);
    thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(INPUT_POLL) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.blocking_send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Terminal input error: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("Terminal input error: {}", e);
                break;
            }
        }
    });
    rx
}

enum Action {
    Quit,
    Redraw,
    None,
}

fn handle_event(event: Event, view: &mut PhasorView, canvas: &mut Canvas) -> Action {
    match event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('q'),
            ..
        })
        | Event::Key(KeyEvent {
            code: KeyCode::Esc, ..
        })
        | Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }) => Action::Quit,
        Event::Resize(cols, rows) => {
            resize(view, canvas, cols, rows);
            Action::Redraw
        }
        Event::FocusGained => {
            view.on_visible();
            Action::Redraw
        }
        Event::FocusLost => {
            // Redraw so the status line shows the pause
            view.on_hidden();
            Action::Redraw
        }
        _ => Action::None,
    }
}

fn resize(view: &mut PhasorView, canvas: &mut Canvas, cols: u16, rows: u16) {
    // Bottom row is the status line
    let (width, height) = braille::canvas_size(cols, rows.saturating_sub(1));
    canvas.resize(width, height);
    view.on_size_changed(width as f32, height as f32);
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let resources = ConfigResources::new(&config.colors);
    let mut view = PhasorView::new(config.scene_settings(), &resources);

    let mut canvas = Canvas::new(0, 0);
    canvas.glyph_advance = braille::DOTS_X as f32;

    let size = terminal.size()?;
    resize(&mut view, &mut canvas, size.width, size.height);

    let mut events = spawn_input_reader();

    view.on_visible();
    draw(terminal, &mut view, &mut canvas)?;

    loop {
        tokio::select! {
            _ = view.next_tick() => {
                draw(terminal, &mut view, &mut canvas)?;
            }
            event = events.recv() => {
                let Some(event) = event else {
                    debug!("Input reader stopped");
                    break;
                };
                match handle_event(event, &mut view, &mut canvas) {
                    Action::Quit => break,
                    Action::Redraw => draw(terminal, &mut view, &mut canvas)?,
                    Action::None => {}
                }
            }
        }
    }

    view.on_hidden();
    info!("Stopped at angle {}", view.angle());
    Ok(())
}

fn draw(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    view: &mut PhasorView,
    canvas: &mut Canvas,
) -> Result<()> {
    canvas.clear();
    view.draw(canvas);

    terminal.draw(|frame| {
        let area = frame.area();

        // Clear with transparent/reset background for terminal transparency support
        let block = ratatui::widgets::Block::default().style(Style::default().bg(Color::Reset));
        frame.render_widget(block, area);

        let scene_area = Rect::new(area.x, area.y, area.width, area.height.saturating_sub(1));
        braille::render(canvas, frame.buffer_mut(), scene_area);
        braille::render_text(&canvas.texts, frame.buffer_mut(), scene_area);

        render_status(frame, area, view);
    })?;
    Ok(())
}

fn render_status(frame: &mut Frame, area: Rect, view: &PhasorView) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height - 1;
    frame.buffer_mut().set_stringn(
        area.x,
        y,
        status_line(view),
        area.width as usize,
        Style::default().fg(Color::DarkGray),
    );
}

fn status_line(view: &PhasorView) -> String {
    let state = if view.is_animating() { "running" } else { "paused" };
    format!(
        " angle: {:.0}° | radius: {:.0} | {} | [q]uit ",
        view.angle(),
        view.layout().radius,
        state
    )
}
