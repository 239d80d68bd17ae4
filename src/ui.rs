//! Terminal UI rendering.
//!
//! Left: visualizer, now-playing info and transport. Right: the song list
//! with its filter / add-path prompt and track count.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, InputMode, PlaylistState};
use crate::config::Settings;
use crate::library::{Track, cover_letter, format_time};
use crate::visualizer::{SurfaceView, Visualizer};

const ACCENT: Color = Color::Rgb(94, 234, 212);
const MUTED: Color = Color::Rgb(148, 163, 184);

const TITLE_PLACEHOLDER: &str = "Select a song";
const ARTIST_PLACEHOLDER: &str = "-";
const EMPTY_LIST_HINT: &str = "No songs yet. Press [a] to add files or folders.";

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected song");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("+/-", "volume");
    map.insert("s", "shuffle");
    map.insert("r", "repeat");
    map.insert("a", "add files");
    map.insert("/", "filter");
    map.insert("c", "clear list");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    let order = [
        "j/k", "enter", "space/p", "h/l", "H/L", "+/-", "s", "r", "a", "/", "c", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{}s", scrub_seconds))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On" } else { "Off" }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI. The visualizer is told about its layout area here.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    playlist: &PlaylistState,
    visualizer: &mut Visualizer,
    settings: &Settings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(settings.ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" vizplay ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),
            Constraint::Length(4),
            Constraint::Length(5),
        ])
        .split(body[0]);

    draw_visualizer(frame, main[0], visualizer, settings.visualizer.background);
    draw_now_playing(frame, main[1], playlist.current_track());
    draw_transport(frame, main[2], playlist);
    draw_sidebar(frame, body[1], app, playlist);

    let footer = Paragraph::new(controls_text(settings.controls.scrub_seconds))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_visualizer(frame: &mut Frame, area: Rect, visualizer: &mut Visualizer, bg: [u8; 3]) {
    let block = Block::default().borders(Borders::ALL).title(" spectrum ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    visualizer.observe_layout(inner);
    frame.render_widget(SurfaceView::new(visualizer.surface(), bg), inner);
}

fn draw_now_playing(frame: &mut Frame, area: Rect, track: Option<&Track>) {
    let (title, artist, album) = match track {
        Some(t) => (
            t.display_name.as_str(),
            t.artist.as_str(),
            t.album.as_deref(),
        ),
        None => (TITLE_PLACEHOLDER, ARTIST_PLACEHOLDER, None),
    };

    let mut lines = vec![Line::from(title.bold())];
    let mut second = vec![Span::styled(artist, Style::default().fg(MUTED))];
    if let Some(album) = album {
        second.push(Span::raw(" · "));
        second.push(Span::styled(album, Style::default().fg(MUTED).italic()));
    }
    lines.push(Line::from(second));

    let info = Paragraph::new(lines).block(padded_block(" now playing "));
    frame.render_widget(info, area);
}

fn draw_transport(frame: &mut Frame, area: Rect, playlist: &PlaylistState) {
    let block = padded_block(" transport ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let state = if playlist.is_playing {
        "\u{23f8} Playing"
    } else {
        "\u{25b6} Paused"
    };
    let buttons = Line::from(vec![
        Span::raw("\u{23ee}  "),
        Span::styled(state, Style::default().fg(ACCENT).bold()),
        Span::raw("  \u{23ed}"),
    ]);
    frame.render_widget(Paragraph::new(buttons), rows[0]);

    let duration = playlist.current_track().and_then(|t| t.duration);
    let ratio = match duration {
        Some(d) if !d.is_zero() => (playlist.position.as_secs_f64() / d.as_secs_f64()).clamp(0.0, 1.0),
        _ => 0.0,
    };
    let elapsed = if playlist.is_empty() {
        format_time(None)
    } else {
        format_time(Some(playlist.position))
    };
    let gauge = LineGauge::default()
        .ratio(ratio)
        .label(format!("{} / {}", elapsed, format_time(duration)))
        .filled_style(Style::default().fg(ACCENT))
        .unfilled_style(Style::default().fg(MUTED));
    frame.render_widget(gauge, rows[1]);

    let toggles = Line::from(vec![
        Span::styled(
            format!("Shuffle {}", on_off(playlist.shuffle)),
            toggle_style(playlist.shuffle),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Repeat {}", on_off(playlist.repeat)),
            toggle_style(playlist.repeat),
        ),
        Span::raw("  "),
        Span::raw(format!(
            "Vol {}%",
            (playlist.volume * 100.0).round() as u32
        )),
    ]);
    frame.render_widget(Paragraph::new(toggles), rows[2]);
}

fn toggle_style(on: bool) -> Style {
    if on {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED)
    }
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App, playlist: &PlaylistState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let prompt = match app.input_mode {
        InputMode::AddPath => Paragraph::new(format!("{}_", app.add_input))
            .block(padded_block(" add file or folder (enter/esc) ")),
        InputMode::Filter => Paragraph::new(format!("{}_", app.filter_query))
            .block(padded_block(" filter (enter/esc) ")),
        InputMode::Normal => {
            let q = app.filter_query.trim();
            let text = if q.is_empty() {
                Span::styled("/ to search", Style::default().fg(MUTED))
            } else {
                Span::raw(q.to_string())
            };
            Paragraph::new(Line::from(text)).block(padded_block(" filter "))
        }
    };
    frame.render_widget(prompt, parts[0]);

    draw_song_list(frame, parts[1], app, playlist);

    let count = Paragraph::new(format!(" {} track(s)", playlist.len()))
        .style(Style::default().fg(MUTED));
    frame.render_widget(count, parts[2]);
}

fn song_row<'a>(track: &'a Track, active: bool, query: &str) -> ListItem<'a> {
    let marker = if active { "\u{266a} " } else { "  " };
    let cover = format!("[{}] ", cover_letter(&track.artist, &track.display_name));
    let title_style = if active {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(cover, Style::default().fg(MUTED)),
    ];
    spans.extend(highlighted_title(&track.display_name, query, title_style));
    spans.push(Span::styled(
        format!("  {}", track.artist),
        Style::default().fg(MUTED),
    ));
    spans.push(Span::raw(format!("  {}", format_time(track.duration))));

    ListItem::new(Line::from(spans))
}

/// Split `title` into spans, underlining the filter match.
fn highlighted_title<'a>(title: &'a str, query: &str, base: Style) -> Vec<Span<'a>> {
    let Some((start, end)) = App::match_span(title, query) else {
        return vec![Span::styled(title, base)];
    };
    let byte_at = |ci: usize| {
        title
            .char_indices()
            .nth(ci)
            .map(|(b, _)| b)
            .unwrap_or(title.len())
    };
    let (s, e) = (byte_at(start), byte_at(end));
    vec![
        Span::styled(&title[..s], base),
        Span::styled(&title[s..e], base.add_modifier(Modifier::UNDERLINED)),
        Span::styled(&title[e..], base),
    ]
}

fn draw_song_list(frame: &mut Frame, area: Rect, app: &App, playlist: &PlaylistState) {
    let block = Block::default().borders(Borders::ALL).title(" songs ");

    if playlist.is_empty() {
        let hint = Paragraph::new(EMPTY_LIST_HINT)
            .style(Style::default().fg(MUTED))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(hint, area);
        return;
    }

    let display = app.display_indices(&playlist.tracks);
    let query = app.filter_query.trim();

    // Only build items for the visible window, keeping the cursor centred.
    let total = display.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel_pos = display.iter().position(|&i| i == app.selected).unwrap_or(0);
    let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
        (0, total, sel_pos)
    } else {
        let half = list_height / 2;
        let mut start = sel_pos.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height, sel_pos - start)
    };

    let items: Vec<ListItem> = display[start..end]
        .iter()
        .map(|&i| song_row(&playlist.tracks[i], i == playlist.current, query))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_pos_in_visible));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
