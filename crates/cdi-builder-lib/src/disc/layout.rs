//! The usual two-session layout of a self-booting disc: audio in the first session, one
//! XA Mode 2 Form 1 data track in the second.

use crate::cd::{SECTOR_SIZE, TrackType};
use crate::disc::{Image, Session};

/// A session cannot be empty, so a disc without audio gets about four seconds of silence.
pub const BLANK_AUDIO_TRACK_SECTORS: usize = 302;
pub const DATA_TRACK_POSTGAP_SECTORS: u32 = 2;

pub fn add_audio_session(image: &mut Image, audio_tracks: Vec<Vec<u8>>) -> &mut Session {
    let session = image.new_session();

    if audio_tracks.is_empty() {
        session.new_track_blank(TrackType::Audio, SECTOR_SIZE * BLANK_AUDIO_TRACK_SECTORS);
    }

    for pcm in audio_tracks {
        session.new_track(TrackType::Audio, pcm);
    }

    session
}

pub fn add_data_session(image: &mut Image, payload: Vec<u8>) -> &mut Session {
    let session = image.new_session();
    session
        .new_track(TrackType::Data, payload)
        .set_postgap_sectors(DATA_TRACK_POSTGAP_SECTORS);
    session
}

/// LBA at which a session appended now would start.
pub fn next_session_lba(image: &Image) -> u32 {
    image.length_in_sectors()
}

pub fn standard_image(
    volume_name: &str,
    audio_tracks: Vec<Vec<u8>>,
    data_payload: Vec<u8>,
) -> Image {
    let mut image = Image::new();
    image.set_volume_name(volume_name);
    add_audio_session(&mut image, audio_tracks);
    add_data_session(&mut image, data_payload);
    image
}
