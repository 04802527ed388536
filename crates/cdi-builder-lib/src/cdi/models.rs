// Metadata records of the CDI trailer. Every record is little-endian and unpadded. The
// layout was reverse engineered, so most constant fields have no known meaning.
use binrw::{BinRead, BinWrite};

pub const TRACK_MARKER: [u8; 10] = [0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
pub const LABEL_LENGTH: usize = 32;
pub const AUDIO_SAMPLE_RATE: u32 = 44100;
pub const MAX_CD_LENGTH: u32 = 360000;
pub const IMAGE_VERSION: u32 = 0x8000_0006;

pub const SESSION_HEADER_SIZE: usize = 7;
pub const TRACK_HEADER_SIZE: usize = 88;
pub const TRACK_RECORD_SIZE: usize = 180;
pub const SESSION_TRAILER_SIZE: usize = 8;
pub const DISC_INFO_SIZE: usize = 79;

/// Label field padded with spaces and cut to the fixed width.
pub fn padded_label(label: &str) -> [u8; LABEL_LENGTH] {
    let mut field = [b' '; LABEL_LENGTH];
    let len = label.len().min(LABEL_LENGTH);
    field[..len].copy_from_slice(&label.as_bytes()[..len]);
    field
}

/// Starts every session. A session header with zero tracks terminates the session list.
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct SessionHeader {
    pub reserved0: u8,
    pub track_count: u16,
    pub reserved1: u32,
}

impl SessionHeader {
    pub fn new(track_count: u16) -> Self {
        Self {
            reserved0: 0,
            track_count,
            reserved1: 0,
        }
    }
}

/// Precedes every track record, and the disc info record once more at the end.
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct TrackHeader {
    pub marker0: [u8; 10],
    pub marker1: [u8; 10],
    pub settings: [u8; 3],
    /// Tracks in the whole image
    pub total_tracks: u8,
    pub filename_length: u8,
    pub filename: [u8; LABEL_LENGTH],
    pub reserved0: [u8; 11],
    pub unknown1: u32,
    pub unknown2: u32,
    pub unknown3: u32,
    pub max_cd_length: u32,
    pub unknown4: u32,
}

impl TrackHeader {
    pub fn new(total_tracks: u8, filename: &str) -> Self {
        Self {
            marker0: TRACK_MARKER,
            marker1: TRACK_MARKER,
            settings: [0xAB, 0x00, 0x10],
            total_tracks,
            filename_length: LABEL_LENGTH as u8,
            filename: padded_label(filename),
            reserved0: [0; 11],
            unknown1: 2,
            unknown2: 0,
            unknown3: 0x8000_0000,
            max_cd_length: MAX_CD_LENGTH,
            unknown4: 0x0098_0000,
        }
    }
}

/// Per-track geometry. The last track of a session is followed by a [`SessionTrailer`].
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct TrackRecord {
    pub index_count: u16,
    pub pregap_sectors: u32,
    /// Payload plus postgap
    pub sector_count: u32,
    pub reserved0: [u8; 6],
    /// 0 = CD-DA, 1 = Mode 1, 2 = Mode 2
    pub track_mode: u32,
    pub reserved1: u32,
    pub session_number: u32,
    pub track_number: u32,
    pub start_lba: u32,
    /// Pregap, payload and postgap
    pub total_length: u32,
    pub reserved2: [u8; 16],
    /// 0 = 2048, 1 = 2336, 2 = 2352 bytes per stored sector
    pub read_mode: u32,
    pub control: u32,
    pub reserved3: u8,
    pub total_length2: u32,
    pub reserved4: u32,
    pub isrc_code: [u8; 12],
    pub isrc_valid: u32,
    pub reserved5: u8,
    pub unknown6: [u8; 8],
    pub unknown7: u32,
    pub unknown8: u32,
    pub unknown9: u32,
    pub unknown10: u32,
    pub audio_frequency: u32,
    pub reserved11: [u8; 42],
    pub unknown12: u32,
    pub reserved13: [u8; 12],
    /// Mode code of the session, only set on its last track
    pub session_type: u8,
    pub reserved14: [u8; 3],
}

#[derive(Debug, Clone, Copy)]
pub struct TrackRecordParams {
    pub session_number: u32,
    pub track_number: u32,
    pub pregap_sectors: u32,
    pub sector_count: u32,
    pub start_lba: u32,
    pub track_mode: u32,
    pub read_mode: u32,
    pub control: u32,
    pub session_type: u8,
}

impl TrackRecord {
    pub fn new(params: TrackRecordParams) -> Self {
        let total_length = params.sector_count + params.pregap_sectors;

        Self {
            index_count: 2,
            pregap_sectors: params.pregap_sectors,
            sector_count: params.sector_count,
            reserved0: [0; 6],
            track_mode: params.track_mode,
            reserved1: 0,
            session_number: params.session_number,
            track_number: params.track_number,
            start_lba: params.start_lba,
            total_length,
            reserved2: [0; 16],
            read_mode: params.read_mode,
            control: params.control,
            reserved3: 0,
            total_length2: total_length,
            reserved4: 0,
            isrc_code: [0; 12],
            isrc_valid: 0,
            reserved5: 0,
            unknown6: [0xFF; 8],
            unknown7: 1,
            unknown8: 0x80,
            unknown9: 2,
            unknown10: 0x10,
            audio_frequency: AUDIO_SAMPLE_RATE,
            reserved11: [0; 42],
            unknown12: 0xFFFF_FFFF,
            reserved13: [0; 12],
            session_type: params.session_type,
            reserved14: [0; 3],
        }
    }
}

/// Closes the record of the last track in a session.
#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct SessionTrailer {
    pub reserved0: [u8; 2],
    pub has_next_track: u8,
    pub reserved1: u8,
    pub last_track_lba: u32,
}

impl SessionTrailer {
    pub fn new(last_track_lba: u32) -> Self {
        Self {
            reserved0: [0; 2],
            has_next_track: 0,
            reserved1: 0,
            last_track_lba,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, BinRead, BinWrite)]
#[brw(little)]
pub struct DiscInfo {
    pub total_sectors: u32,
    pub volume_id_length: u8,
    pub volume_id: [u8; LABEL_LENGTH],
    pub reserved0: u8,
    pub unknown1: u32,
    pub unknown2: u32,
    pub ean13_code: [u8; 13],
    pub ean_code_valid: u32,
    pub cd_text_length: u8,
    pub reserved3: u32,
    pub reserved4: u32,
    pub reserved5: [u8; 3],
    pub image_version: u32,
}

impl DiscInfo {
    pub fn new(total_sectors: u32, volume_id: &str) -> Self {
        Self {
            total_sectors,
            volume_id_length: LABEL_LENGTH as u8,
            volume_id: padded_label(volume_id),
            reserved0: 0,
            unknown1: 1,
            unknown2: 1,
            ean13_code: [0; 13],
            ean_code_valid: 0,
            cd_text_length: 0,
            reserved3: 0,
            reserved4: 0,
            reserved5: [0; 3],
            image_version: IMAGE_VERSION,
        }
    }
}
