//! In-memory model of a multi-session disc: an [`Image`] owns its [`Session`]s, which own
//! their [`Track`]s. Sessions and tracks are appended in disc order and never reordered.

pub mod geometry;
pub mod layout;

use crate::cd::{TrackMode, TrackType};
use log::debug;

pub const DEFAULT_VOLUME_NAME: &str = "UNNAMED";
pub const MAX_VOLUME_NAME_LEN: usize = 255;
pub const DEFAULT_PREGAP_SECTORS: u32 = 150;
pub const DEFAULT_POSTGAP_SECTORS: u32 = 0;

#[derive(Debug, Clone)]
pub struct Image {
    volume_name: String,
    sessions: Vec<Session>,
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    pub fn new() -> Self {
        Self {
            volume_name: DEFAULT_VOLUME_NAME.to_string(),
            sessions: Vec::new(),
        }
    }

    pub fn volume_name(&self) -> &str {
        &self.volume_name
    }

    /// Sets the volume name, truncated to [`MAX_VOLUME_NAME_LEN`] bytes.
    pub fn set_volume_name(&mut self, name: &str) {
        let mut end = name.len().min(MAX_VOLUME_NAME_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        self.volume_name = name[..end].to_string();
    }

    /// Appends an empty session at the end of the disc.
    pub fn new_session(&mut self) -> &mut Session {
        self.sessions.push(Session::default());
        debug!("Added session {}", self.sessions.len() - 1);
        let last = self.sessions.len() - 1;
        &mut self.sessions[last]
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn session(&self, index: usize) -> Option<&Session> {
        self.sessions.get(index)
    }

    pub fn session_mut(&mut self, index: usize) -> Option<&mut Session> {
        self.sessions.get_mut(index)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of tracks across every session.
    pub fn track_count(&self) -> usize {
        self.sessions.iter().map(Session::track_count).sum()
    }

    /// Total length of the disc, lead-in and lead-out of every session included.
    pub fn length_in_sectors(&self) -> u32 {
        geometry::sessions_length_sectors(&self.sessions)
    }

    /// Length of the session at `index` including lead-in and lead-out.
    pub fn session_length_in_sectors(&self, index: usize) -> Option<u32> {
        self.sessions
            .get(index)
            .map(|session| geometry::session_length_sectors(session, index == 0))
    }

    /// Start LBA of a track. Recomputed on every call from the current model.
    pub fn track_start_lba(&self, session_index: usize, track_index: usize) -> Option<u32> {
        geometry::track_start_lba(&self.sessions, session_index, track_index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    tracks: Vec<Track>,
}

impl Session {
    /// Appends a track holding a copy of `data`. The mode defaults from `track_type`.
    pub fn new_track(&mut self, track_type: TrackType, data: impl Into<Vec<u8>>) -> &mut Track {
        let track = Track::new(track_type, data.into());
        debug!(
            "Added {:?} track {} ({} bytes)",
            track.track_type,
            self.tracks.len(),
            track.data.len()
        );
        self.tracks.push(track);
        let last = self.tracks.len() - 1;
        &mut self.tracks[last]
    }

    /// Appends a track whose payload is `data_len` zero bytes.
    pub fn new_track_blank(&mut self, track_type: TrackType, data_len: usize) -> &mut Track {
        self.new_track(track_type, vec![0u8; data_len])
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Sectors used by the tracks themselves, pregaps and postgaps included.
    pub fn data_length_in_sectors(&self) -> u32 {
        self.tracks.iter().map(Track::total_size_in_sectors).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Track {
    track_type: TrackType,
    mode: TrackMode,
    data: Vec<u8>,
    pregap_sectors: u32,
    postgap_sectors: u32,
}

impl Track {
    fn new(track_type: TrackType, data: Vec<u8>) -> Self {
        Self {
            track_type,
            mode: track_type.default_mode(),
            data,
            pregap_sectors: DEFAULT_PREGAP_SECTORS,
            postgap_sectors: DEFAULT_POSTGAP_SECTORS,
        }
    }

    pub fn track_type(&self) -> TrackType {
        self.track_type
    }

    pub fn mode(&self) -> TrackMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: TrackMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_size_in_bytes(&self) -> usize {
        self.data.len()
    }

    pub fn data_size_in_sectors(&self) -> u32 {
        geometry::sectors_for(self.data.len(), self.mode)
    }

    pub fn pregap_sectors(&self) -> u32 {
        self.pregap_sectors
    }

    pub fn set_pregap_sectors(&mut self, sectors: u32) -> &mut Self {
        self.pregap_sectors = sectors;
        self
    }

    pub fn postgap_sectors(&self) -> u32 {
        self.postgap_sectors
    }

    pub fn set_postgap_sectors(&mut self, sectors: u32) -> &mut Self {
        self.postgap_sectors = sectors;
        self
    }

    /// Pregap + payload sectors + postgap.
    pub fn total_size_in_sectors(&self) -> u32 {
        self.pregap_sectors + self.data_size_in_sectors() + self.postgap_sectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_image_is_unnamed_and_empty() {
        let image = Image::new();
        assert_eq!(image.volume_name(), "UNNAMED");
        assert_eq!(image.session_count(), 0);
        assert_eq!(image.track_count(), 0);
        assert_eq!(image.length_in_sectors(), 0);
    }

    #[test]
    fn volume_name_is_truncated() {
        let mut image = Image::new();
        image.set_volume_name(&"A".repeat(300));
        assert_eq!(image.volume_name().len(), MAX_VOLUME_NAME_LEN);

        // multi-byte characters are never split
        image.set_volume_name(&format!("{}é", "A".repeat(254)));
        assert_eq!(image.volume_name(), "A".repeat(254));
    }

    #[test]
    fn tracks_keep_insertion_order() {
        let mut image = Image::new();
        let session = image.new_session();
        session.new_track(TrackType::Audio, vec![1u8; 10]);
        session.new_track(TrackType::Data, vec![2u8; 20]);
        image.new_session().new_track_blank(TrackType::Audio, 30);

        assert_eq!(image.session_count(), 2);
        assert_eq!(image.track_count(), 3);

        let first = image.session(0).unwrap();
        assert_eq!(first.track(0).unwrap().data(), &[1u8; 10]);
        assert_eq!(first.track(1).unwrap().data_size_in_bytes(), 20);
        assert!(first.track(2).is_none());
        assert!(image.session(2).is_none());
        assert_eq!(image.session(1).unwrap().track(0).unwrap().data(), &[0u8; 30]);
    }

    #[test]
    fn track_defaults_follow_type() {
        let mut image = Image::new();
        let session = image.new_session();

        let audio = session.new_track(TrackType::Audio, Vec::new());
        assert_eq!(audio.mode(), TrackMode::Cdda);
        assert_eq!(audio.pregap_sectors(), 150);
        assert_eq!(audio.postgap_sectors(), 0);

        let data = session.new_track(TrackType::Data, Vec::new());
        assert_eq!(data.mode(), TrackMode::XaMode2Form1);

        data.set_mode(TrackMode::Mode1);
        assert_eq!(data.mode(), TrackMode::Mode1);
        assert_eq!(data.track_type(), TrackType::Data);
    }

    #[test]
    fn total_size_counts_gaps() {
        let mut image = Image::new();
        let track = image
            .new_session()
            .new_track(TrackType::Data, vec![0u8; 2049]);
        track.set_pregap_sectors(10).set_postgap_sectors(2);

        assert_eq!(track.data_size_in_sectors(), 2);
        assert_eq!(track.total_size_in_sectors(), 14);
        assert_eq!(image.session(0).unwrap().data_length_in_sectors(), 14);
    }
}
