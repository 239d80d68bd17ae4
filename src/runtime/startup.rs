use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;

use ratatui::layout::Rect;

use crate::app::{App, Command, Player};
use crate::audio::{MediaElement, RodioMedia};
use crate::config::VisualizerSettings;
use crate::visualizer::Visualizer;

/// Files and directories named on the command line, in order.
pub fn selection_from_args<I>(args: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .filter(|a| !a.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Queue the command-line selection, if any, and put the cursor on the
/// track that started playing.
pub fn add_initial_tracks<M: MediaElement>(
    player: &mut Player<M>,
    app: &mut App,
    selection: Vec<PathBuf>,
) {
    if selection.is_empty() {
        return;
    }
    player.apply(Command::AddTracks(selection));
    let current = player.state().current;
    app.set_selected(&player.state().tracks, current);
}

/// Mount the visualizer and hook it to the session's analysis tap. The tap
/// does not need an output device, so the floor bars show from the start.
pub fn mount_visualizer(
    settings: &VisualizerSettings,
    media: &mut RodioMedia,
    area: Rect,
    now: Instant,
) -> Visualizer {
    let mut visualizer = Visualizer::mount(settings, area, now);
    visualizer.attach(media.analyser());
    visualizer
}
