//! Sector arithmetic shared by the model, the track encoders and the CDI header.
//!
//! Nothing here is cached: every value is recomputed from the current sessions so that
//! edits made before serialization are always reflected.

use crate::cd::TrackMode;
use crate::disc::{Session, Track};

pub const LEAD_IN_SECTORS: u32 = 4500;
pub const FIRST_LEAD_OUT_SECTORS: u32 = 6750;
pub const LEAD_OUT_SECTORS: u32 = 2250;

/// Sectors needed to hold `payload_len` bytes in `mode`, rounded up.
pub fn sectors_for(payload_len: usize, mode: TrackMode) -> u32 {
    payload_len.div_ceil(mode.user_data_size()) as u32
}

pub fn lead_out_sectors(is_first_session: bool) -> u32 {
    if is_first_session {
        FIRST_LEAD_OUT_SECTORS
    } else {
        LEAD_OUT_SECTORS
    }
}

/// Session length including lead-in and lead-out.
pub fn session_length_sectors(session: &Session, is_first_session: bool) -> u32 {
    LEAD_IN_SECTORS + lead_out_sectors(is_first_session) + session.data_length_in_sectors()
}

/// Summed length of `sessions`, the first entry being the disc's first session.
pub fn sessions_length_sectors(sessions: &[Session]) -> u32 {
    sessions
        .iter()
        .enumerate()
        .map(|(index, session)| session_length_sectors(session, index == 0))
        .sum()
}

/// Start LBA of a track: every preceding session plus the preceding tracks of its own session.
pub fn track_start_lba(
    sessions: &[Session],
    session_index: usize,
    track_index: usize,
) -> Option<u32> {
    let session = sessions.get(session_index)?;
    if track_index >= session.track_count() {
        return None;
    }

    let preceding_sessions = sessions_length_sectors(&sessions[..session_index]);
    let preceding_tracks: u32 = session.tracks()[..track_index]
        .iter()
        .map(Track::total_size_in_sectors)
        .sum();

    Some(preceding_sessions + preceding_tracks)
}
