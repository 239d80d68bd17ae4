use super::display::display_name_for;
use super::media_type::OCTET_STREAM;
use super::*;
use crate::config::LibrarySettings;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn declared_media_type_recognizes_common_audio_extensions() {
    assert_eq!(declared_media_type(Path::new("/tmp/a.mp3")), "audio/mpeg");
    assert_eq!(declared_media_type(Path::new("/tmp/a.MP3")), "audio/mpeg");
    assert_eq!(declared_media_type(Path::new("/tmp/a.flac")), "audio/flac");
    assert_eq!(declared_media_type(Path::new("/tmp/a.wav")), "audio/wav");
    assert!(is_audio_file(Path::new("/tmp/a.ogg")));
    assert!(is_audio_file(Path::new("/tmp/a.m4a")));
}

#[test]
fn declared_media_type_of_other_files_is_not_audio() {
    assert_eq!(declared_media_type(Path::new("/tmp/a.txt")), OCTET_STREAM);
    assert_eq!(declared_media_type(Path::new("/tmp/cover.png")), OCTET_STREAM);
    assert_eq!(declared_media_type(Path::new("/tmp/noext")), OCTET_STREAM);
    assert!(!is_audio_file(Path::new("/tmp/a.txt")));
}

#[test]
fn display_name_prefers_tag_title_then_file_stem() {
    let p = Path::new("/tmp/My Song.mp3");
    assert_eq!(display_name_for(p, Some("Tagged")), "Tagged");
    assert_eq!(display_name_for(p, Some("   ")), "My Song");
    assert_eq!(display_name_for(p, None), "My Song");
}

#[test]
fn cover_letter_uses_artist_then_name() {
    assert_eq!(cover_letter("local file", "song"), 'L');
    assert_eq!(cover_letter("", "song"), 'S');
    assert_eq!(cover_letter(" ", ""), '?');
}

#[test]
fn format_time_is_minutes_and_padded_seconds() {
    assert_eq!(format_time(None), "--:--");
    assert_eq!(format_time(Some(Duration::from_secs(0))), "0:00");
    assert_eq!(format_time(Some(Duration::from_millis(65_900))), "1:05");
    assert_eq!(format_time(Some(Duration::from_secs(200))), "3:20");
}

#[test]
fn registry_releases_each_handle_once() {
    let mut registry = SourceRegistry::new();
    let a = registry.allocate(Path::new("/tmp/a.mp3"));
    let b = registry.allocate(Path::new("/tmp/b.mp3"));
    assert_ne!(a.url(), b.url());
    assert_eq!(registry.live_count(), 2);
    assert!(registry.is_live(&a));

    assert!(registry.release(a));
    assert_eq!(registry.live_count(), 1);
    assert!(registry.release(b));
    assert_eq!(registry.live_count(), 0);
    assert_eq!(registry.allocated_count(), 2);
    assert_eq!(registry.released_count(), 2);
}

#[test]
fn registry_refuses_foreign_handles() {
    let mut mine = SourceRegistry::new();
    let mut other = SourceRegistry::new();
    let _keep = mine.allocate(Path::new("/tmp/a.mp3"));
    let _skip = other.allocate(Path::new("/tmp/x.mp3"));
    let foreign = other.allocate(Path::new("/tmp/b.mp3"));

    // key 1 was never handed out by `mine`
    assert!(!mine.release(foreign));
    assert_eq!(mine.released_count(), 0);
}

#[test]
fn build_tracks_drops_non_audio_and_keeps_selection_order() {
    let dir = tempdir().unwrap();
    let b = dir.path().join("b.mp3");
    let a = dir.path().join("a.ogg");
    let txt = dir.path().join("notes.txt");
    fs::write(&b, b"not a real mp3").unwrap();
    fs::write(&a, b"not a real ogg").unwrap();
    fs::write(&txt, b"ignore me").unwrap();

    let mut registry = SourceRegistry::new();
    let settings = LibrarySettings::default();
    let tracks = build_tracks(&[b.clone(), txt, a.clone()], &mut registry, &settings);

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].display_name, "b");
    assert_eq!(tracks[1].display_name, "a");
    assert_eq!(tracks[0].source.path(), b.as_path());
    assert_eq!(tracks[1].source.path(), a.as_path());
    assert_eq!(tracks[0].artist, "Local file");
    assert!(tracks[0].duration.is_none());
    assert_ne!(tracks[0].id, tracks[1].id);
    assert_eq!(registry.live_count(), 2);
}

#[test]
fn build_tracks_derives_fresh_ids_for_the_same_file() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mp3");
    fs::write(&a, b"0123456789").unwrap();

    let mut registry = SourceRegistry::new();
    let settings = LibrarySettings::default();
    let first = build_tracks(&[a.clone()], &mut registry, &settings);
    let second = build_tracks(&[a], &mut registry, &settings);

    assert_ne!(first[0].id, second[0].id);
    assert!(first[0].id.as_str().starts_with("a.mp3-10-"));
}

#[test]
fn build_tracks_with_only_non_audio_allocates_nothing() {
    let files = vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.pdf")];
    let mut registry = SourceRegistry::new();
    let tracks = build_tracks(&files, &mut registry, &LibrarySettings::default());
    assert!(tracks.is_empty());
    assert_eq!(registry.allocated_count(), 0);
}

#[test]
fn expand_selection_walks_directories_in_name_order() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("album");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("02.mp3"), b"x").unwrap();
    fs::write(sub.join("01.mp3"), b"x").unwrap();
    fs::write(sub.join(".hidden.mp3"), b"x").unwrap();
    let single = dir.path().join("single.mp3");
    fs::write(&single, b"x").unwrap();

    let settings = LibrarySettings::default();
    let files = expand_selection(&[single.clone(), sub.clone()], &settings);

    assert_eq!(files, vec![single, sub.join("01.mp3"), sub.join("02.mp3")]);
}

#[test]
fn expand_selection_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"x").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        ..LibrarySettings::default()
    };
    let files = expand_selection(&[dir.path().to_path_buf()], &settings);
    assert_eq!(files, vec![dir.path().join("root.mp3")]);
}

#[test]
fn expand_selection_respects_max_depth() {
    let dir = tempdir().unwrap();
    let d1 = dir.path().join("d1");
    let d2 = d1.join("d2");
    fs::create_dir_all(&d2).unwrap();
    fs::write(dir.path().join("root.mp3"), b"x").unwrap();
    fs::write(d1.join("one.mp3"), b"x").unwrap();
    fs::write(d2.join("two.mp3"), b"x").unwrap();

    // WalkDir depth counts root as 0, children as 1, grandchildren as 2.
    let settings = LibrarySettings {
        max_depth: Some(2),
        ..LibrarySettings::default()
    };
    let files = expand_selection(&[dir.path().to_path_buf()], &settings);

    assert!(files.contains(&dir.path().join("root.mp3")));
    assert!(files.contains(&d1.join("one.mp3")));
    assert!(!files.contains(&d2.join("two.mp3")));
}
