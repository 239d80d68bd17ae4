use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::display_name_for;
use super::handles::SourceRegistry;
use super::media_type::is_audio_file;
use super::model::{Track, TrackId};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Expand the user's selection into a flat list of files.
///
/// Plain files are kept in selection order. Directories are walked and their
/// files inserted in place, sorted by file name so the order is stable.
pub fn expand_selection(selection: &[PathBuf], settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in selection {
        if !entry.is_dir() {
            files.push(entry.clone());
            continue;
        }

        let mut walker = WalkDir::new(entry).follow_links(settings.follow_links);
        // Non-recursive = only the directory itself.
        let depth_cap = if settings.recursive {
            settings.max_depth
        } else {
            Some(1)
        };
        if let Some(d) = depth_cap {
            walker = walker.max_depth(d);
        }

        let mut found: Vec<PathBuf> = walker
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .collect();
        files.append(&mut found);
    }

    files
}

/// Tag fields read from the file, when it has any.
#[derive(Debug, Default)]
struct Tags {
    title: Option<String>,
    artist: Option<String>,
    album: Option<String>,
}

fn non_empty(v: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn read_tags(path: &Path) -> Tags {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return Tags::default();
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return Tags::default();
    };
    Tags {
        title: non_empty(tag.title()),
        artist: non_empty(tag.artist()),
        album: non_empty(tag.album()),
    }
}

fn derive_track_id(path: &Path, key: u64) -> TrackId {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    TrackId(format!("{name}-{size}-{key}"))
}

/// Turn selected files into tracks.
///
/// Entries whose declared media type is not `audio/*` are dropped silently.
/// Each accepted file gets a fresh handle from `registry`.
pub fn build_tracks(
    files: &[PathBuf],
    registry: &mut SourceRegistry,
    settings: &LibrarySettings,
) -> Vec<Track> {
    let mut tracks = Vec::new();

    for path in files {
        if !is_audio_file(path) {
            tracing::debug!(path = %path.display(), "skipping non-audio file");
            continue;
        }

        let tags = read_tags(path);
        let source = registry.allocate(path);
        let id = derive_track_id(path, source.key());

        tracks.push(Track {
            id,
            display_name: display_name_for(path, tags.title.as_deref()),
            artist: tags
                .artist
                .unwrap_or_else(|| settings.default_artist.clone()),
            album: tags.album,
            duration: None,
            source,
        });
    }

    tracks
}
