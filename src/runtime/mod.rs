use std::env;
use std::time::Instant;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::app::{App, Command, Player};
use crate::audio::RodioMedia;
use crate::logging;

mod event_loop;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("vizplay: logging disabled: {e}");
    }

    let selection = startup::selection_from_args(env::args_os().skip(1));
    let mut player = Player::new(RodioMedia::new(settings.audio.clone()), &settings);
    let mut app = App::new();
    startup::add_initial_tracks(&mut player, &mut app, selection);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The real layout area is reported on the first draw.
    let mut visualizer = startup::mount_visualizer(
        &settings.visualizer,
        player.media_mut(),
        Rect::default(),
        Instant::now(),
    );

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::default();
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut player,
            &mut visualizer,
            &mut state,
        )
    })();

    visualizer.unmount();
    player.apply(Command::Pause);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("shutdown");
    run_result
}
