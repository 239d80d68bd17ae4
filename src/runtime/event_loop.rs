use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Command, InputMode, Player, PlaylistState};
use crate::audio::RodioMedia;
use crate::config;
use crate::ui;
use crate::visualizer::Visualizer;

/// Longest time the loop blocks on input when no frame is pending.
const IDLE_POLL: Duration = Duration::from_millis(100);

/// What a key press asks the runtime to do.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Nothing,
    Run(Command),
    Quit,
}

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: pumps media events, runs due visualizer
/// frames, draws and handles input. Returns `Ok(())` when quit is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    player: &mut Player<RodioMedia>,
    visualizer: &mut Visualizer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.pump_media_events();
        visualizer.tick(Instant::now());
        terminal.draw(|f| ui::draw(f, app, player.state(), visualizer, settings))?;

        // Sleep until input arrives or the next frame is due.
        let timeout = visualizer
            .time_until_next_frame(Instant::now())
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if !event::poll(timeout)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match handle_key_event(key, settings, app, player.state(), state) {
            KeyAction::Quit => break,
            KeyAction::Run(cmd) => {
                player.apply(cmd);
                app.ensure_selected_visible(&player.state().tracks);
            }
            KeyAction::Nothing => {}
        }
    }

    Ok(())
}

/// Map a key press to an action, updating UI-only state in `app` on the way.
pub fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    playlist: &PlaylistState,
    state: &mut EventLoopState,
) -> KeyAction {
    match app.input_mode {
        InputMode::Filter => {
            state.pending_gg = false;
            handle_filter_key(key, app, playlist)
        }
        InputMode::AddPath => {
            state.pending_gg = false;
            handle_add_key(key, app)
        }
        InputMode::Normal => handle_normal_key(key, settings, app, playlist, state),
    }
}

fn handle_filter_key(key: KeyEvent, app: &mut App, playlist: &PlaylistState) -> KeyAction {
    let tracks = &playlist.tracks;
    match key.code {
        KeyCode::Esc => app.clear_filter(tracks),
        KeyCode::Backspace => app.pop_filter_char(tracks),
        KeyCode::Char('j') | KeyCode::Char('n')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.next(tracks)
        }
        KeyCode::Char('k') | KeyCode::Char('p')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.prev(tracks)
        }
        KeyCode::Char(c) if !c.is_control() => app.push_filter_char(tracks, c),
        KeyCode::Enter => {
            if app.display_indices(tracks).is_empty() {
                return KeyAction::Nothing;
            }
            app.exit_filter_mode();
            return KeyAction::Run(Command::Select(app.selected));
        }
        _ => {}
    }
    KeyAction::Nothing
}

fn handle_add_key(key: KeyEvent, app: &mut App) -> KeyAction {
    match key.code {
        KeyCode::Esc => app.cancel_add(),
        KeyCode::Backspace => {
            app.add_input.pop();
        }
        KeyCode::Char(c) if !c.is_control() => app.add_input.push(c),
        KeyCode::Enter => {
            if let Some(path) = app.submit_add() {
                return KeyAction::Run(Command::AddTracks(vec![path]));
            }
        }
        _ => {}
    }
    KeyAction::Nothing
}

fn handle_normal_key(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    playlist: &PlaylistState,
    state: &mut EventLoopState,
) -> KeyAction {
    let tracks = &playlist.tracks;
    let was_gg = std::mem::take(&mut state.pending_gg);
    let scrub = settings.controls.scrub_seconds.min(i64::MAX as u64) as i64;
    let step = settings.audio.volume_step;

    match key.code {
        KeyCode::Char('q') => KeyAction::Quit,
        KeyCode::Char('/') => {
            app.enter_filter_mode(tracks);
            KeyAction::Nothing
        }
        KeyCode::Char('a') => {
            app.enter_add_mode();
            KeyAction::Nothing
        }
        KeyCode::Char('g') => {
            if was_gg {
                if let Some(&first) = app.display_indices(tracks).first() {
                    app.set_selected(tracks, first);
                }
            } else {
                state.pending_gg = true;
            }
            KeyAction::Nothing
        }
        KeyCode::Char('G') => {
            if let Some(&last) = app.display_indices(tracks).last() {
                app.set_selected(tracks, last);
            }
            KeyAction::Nothing
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.next(tracks);
            KeyAction::Nothing
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev(tracks);
            KeyAction::Nothing
        }
        KeyCode::Enter => {
            if app.display_indices(tracks).contains(&app.selected) {
                KeyAction::Run(Command::Select(app.selected))
            } else {
                KeyAction::Nothing
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => KeyAction::Run(Command::TogglePlay),
        KeyCode::Char('l') => KeyAction::Run(Command::Next),
        KeyCode::Char('h') => KeyAction::Run(Command::Previous),
        KeyCode::Char('L') => KeyAction::Run(Command::SeekBy(scrub)),
        KeyCode::Char('H') => KeyAction::Run(Command::SeekBy(-scrub)),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            KeyAction::Run(Command::SetVolume(playlist.volume + step))
        }
        KeyCode::Char('-') => KeyAction::Run(Command::SetVolume(playlist.volume - step)),
        KeyCode::Char('s') => KeyAction::Run(Command::ToggleShuffle),
        KeyCode::Char('r') => KeyAction::Run(Command::ToggleRepeat),
        KeyCode::Char('c') => KeyAction::Run(Command::Clear),
        _ => KeyAction::Nothing,
    }
}
