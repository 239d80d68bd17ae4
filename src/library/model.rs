use std::fmt;
use std::time::Duration;

use super::handles::SourceHandle;

/// Stable identifier of a playlist entry, derived when the file is added.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(pub(crate) String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One playlist entry. Owns the playable handle of its file, so a track can
/// only leave the playlist through `SourceRegistry::release`.
#[derive(Debug)]
pub struct Track {
    pub id: TrackId,
    pub display_name: String,
    pub artist: String,
    pub album: Option<String>,
    /// Unknown until the media element reports metadata.
    pub duration: Option<Duration>,
    pub source: SourceHandle,
}
