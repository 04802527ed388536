use crate::cd::{TrackMode, TrackType};
use crate::cdi::error::{CdiError, CdiResult};
use crate::cdi::models::{
    DiscInfo, SessionHeader, SessionTrailer, TrackHeader, TrackRecord, TrackRecordParams,
};
use crate::disc::{Image, Track};
use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::Cursor;

/// Counts checked before any byte of the image is written.
pub(crate) struct HeaderCounts {
    pub session_count: u8,
    pub total_tracks: u8,
}

pub(crate) fn validate(image: &Image) -> CdiResult<HeaderCounts> {
    if image.session_count() == 0 {
        return Err(CdiError::EmptyImage);
    }

    if let Some(index) = image
        .sessions()
        .iter()
        .position(|session| session.track_count() == 0)
    {
        return Err(CdiError::EmptySession(index));
    }

    let session_count = u8::try_from(image.session_count())
        .map_err(|_| CdiError::TooManySessions(image.session_count()))?;
    let total_tracks = u8::try_from(image.track_count())
        .map_err(|_| CdiError::TooManyTracks(image.track_count()))?;

    Ok(HeaderCounts {
        session_count,
        total_tracks,
    })
}

/// CDI mode code: 0 = CD-DA, 1 = Mode 1, 2 = any Mode 2 flavour.
pub(crate) fn track_mode_code(mode: TrackMode) -> u32 {
    match mode {
        TrackMode::Cdda => 0,
        TrackMode::Mode1 => 1,
        TrackMode::Mode2 | TrackMode::XaMode2Form1 | TrackMode::XaMode2Form2 => 2,
    }
}

fn read_mode_code(track: &Track) -> u32 {
    match track.track_type() {
        TrackType::Audio => 2,
        TrackType::Data => 1,
    }
}

fn control_code(track: &Track) -> u32 {
    match track.track_type() {
        TrackType::Audio => 0,
        TrackType::Data => 4,
    }
}

/// Builds the metadata block appended after the track data, ending with the 4-byte distance
/// from the start of the block to the end of the file.
pub(crate) fn build_header_block(image: &Image, volume_label: &str) -> CdiResult<Vec<u8>> {
    let counts = validate(image)?;
    let track_header = TrackHeader::new(counts.total_tracks, volume_label);
    let mut cursor = Cursor::new(Vec::new());

    counts.session_count.write_le(&mut cursor)?;

    for (session_index, session) in image.sessions().iter().enumerate() {
        // validate() bounds the total track count to a u8
        SessionHeader::new(session.track_count() as u16).write(&mut cursor)?;

        for (track_index, track) in session.tracks().iter().enumerate() {
            track_header.write(&mut cursor)?;

            let start_lba = image
                .track_start_lba(session_index, track_index)
                .unwrap_or_default();
            let is_last = track_index + 1 == session.track_count();
            let track_mode = track_mode_code(track.mode());

            TrackRecord::new(TrackRecordParams {
                session_number: session_index as u32,
                track_number: track_index as u32,
                pregap_sectors: track.pregap_sectors(),
                sector_count: track.data_size_in_sectors() + track.postgap_sectors(),
                start_lba,
                track_mode,
                read_mode: read_mode_code(track),
                control: control_code(track),
                session_type: if is_last { track_mode as u8 } else { 0 },
            })
            .write(&mut cursor)?;

            if is_last {
                SessionTrailer::new(start_lba).write(&mut cursor)?;
            }
        }
    }

    SessionHeader::new(0).write(&mut cursor)?;
    track_header.write(&mut cursor)?;
    DiscInfo::new(image.length_in_sectors(), volume_label).write(&mut cursor)?;

    let offset = cursor.get_ref().len() as u32 + 4;
    cursor.write_u32::<LittleEndian>(offset)?;

    Ok(cursor.into_inner())
}
