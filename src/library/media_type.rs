//! Declared media types of input files.
//!
//! The media type is declared from the file name alone (like a browser file
//! picker does), using lofty's container detection for the extension.

use std::path::Path;

use lofty::file::FileType;

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Media type declared for `path`, e.g. `audio/mpeg`.
pub fn declared_media_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };

    match FileType::from_ext(ext.to_ascii_lowercase()) {
        Some(FileType::Mpeg) => "audio/mpeg",
        Some(FileType::Flac) => "audio/flac",
        Some(FileType::Wav) => "audio/wav",
        Some(FileType::Vorbis) | Some(FileType::Opus) | Some(FileType::Speex) => "audio/ogg",
        Some(FileType::Aac) => "audio/aac",
        Some(FileType::Mp4) => "audio/mp4",
        Some(FileType::Aiff) => "audio/aiff",
        Some(FileType::Ape) => "audio/ape",
        Some(FileType::Mpc) => "audio/musepack",
        Some(FileType::WavPack) => "audio/wavpack",
        _ => OCTET_STREAM,
    }
}

pub fn is_audio_media_type(media_type: &str) -> bool {
    media_type.starts_with("audio/")
}

pub fn is_audio_file(path: &Path) -> bool {
    is_audio_media_type(declared_media_type(path))
}
