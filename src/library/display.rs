use std::path::Path;
use std::time::Duration;

/// Name shown for a track: the tag title when present, otherwise the file
/// name without its extension.
pub fn display_name_for(path: &Path, tag_title: Option<&str>) -> String {
    if let Some(t) = tag_title.map(str::trim).filter(|s| !s.is_empty()) {
        return t.to_string();
    }

    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Untitled")
        .to_string()
}

/// Single uppercase letter shown as the track's "cover".
pub fn cover_letter(artist: &str, name: &str) -> char {
    artist
        .trim()
        .chars()
        .next()
        .or_else(|| name.trim().chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// Format as `m:ss`; `--:--` when the duration is not known yet.
pub fn format_time(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "--:--".to_string();
    };
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}
