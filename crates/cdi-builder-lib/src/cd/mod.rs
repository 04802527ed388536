pub mod ecc;

/// Size of a full physical sector (sync + header + payload + EDC/ECC), and of a CD-DA sector.
pub const SECTOR_SIZE: usize = 2352;
/// Size of a sector as stored for data tracks in a CDI file: the physical sector without
/// its 12-byte sync pattern and 4-byte header.
pub const CDI_DATA_SECTOR_SIZE: usize = SECTOR_SIZE - SYNC_SIZE - HEADER_SIZE;
pub const SYNC_SIZE: usize = 12;
pub const HEADER_SIZE: usize = 4;
pub const SUBHEADER_SIZE: usize = 8;

pub const MODE1_DATA_SIZE: usize = 2048;
pub const MODE2_DATA_SIZE: usize = 2336;
pub const MODE2_FORM1_DATA_SIZE: usize = 2048;
pub const MODE2_FORM2_DATA_SIZE: usize = 2324;

/// Offset between an LBA and the absolute disc time, 2 seconds of pregap.
pub const MSF_LBA_OFFSET: u32 = 150;
pub const FRAMES_PER_SECOND: u32 = 75;
pub const SECONDS_PER_MINUTE: u32 = 60;

pub const SYNC_PATTERN: [u8; SYNC_SIZE] = [
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Audio,
    Data,
}

impl TrackType {
    /// Mode a freshly created track of this type starts with.
    pub const fn default_mode(self) -> TrackMode {
        match self {
            TrackType::Audio => TrackMode::Cdda,
            TrackType::Data => TrackMode::XaMode2Form1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackMode {
    Cdda,
    Mode1,
    Mode2,
    XaMode2Form1,
    XaMode2Form2,
}

impl TrackMode {
    /// Bytes of track payload carried by one sector of this mode.
    pub const fn user_data_size(self) -> usize {
        match self {
            TrackMode::Cdda => SECTOR_SIZE,
            TrackMode::Mode1 => MODE1_DATA_SIZE,
            TrackMode::Mode2 => MODE2_DATA_SIZE,
            TrackMode::XaMode2Form1 => MODE2_FORM1_DATA_SIZE,
            TrackMode::XaMode2Form2 => MODE2_FORM2_DATA_SIZE,
        }
    }

    /// Mode byte of the sector header, `None` for audio which has no header.
    pub const fn header_mode(self) -> Option<u8> {
        match self {
            TrackMode::Cdda => None,
            TrackMode::Mode1 => Some(1),
            TrackMode::Mode2 | TrackMode::XaMode2Form1 | TrackMode::XaMode2Form2 => Some(2),
        }
    }
}

/// Minute/second/frame disc time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Msf {
    pub minutes: u8,
    pub seconds: u8,
    pub frames: u8,
}

impl Msf {
    /// Disc time of `lba`, counting the 2 second offset of the first pregap.
    pub fn from_lba(lba: u32) -> Self {
        let frames = lba + MSF_LBA_OFFSET;
        Self {
            minutes: (frames / (SECONDS_PER_MINUTE * FRAMES_PER_SECOND)) as u8,
            seconds: ((frames / FRAMES_PER_SECOND) % SECONDS_PER_MINUTE) as u8,
            frames: (frames % FRAMES_PER_SECOND) as u8,
        }
    }

    /// LBA of this disc time, `None` before 00:02:00.
    pub fn to_lba(&self) -> Option<u32> {
        ((self.minutes as u32 * SECONDS_PER_MINUTE + self.seconds as u32) * FRAMES_PER_SECOND
            + self.frames as u32)
            .checked_sub(MSF_LBA_OFFSET)
    }

    /// Packed BCD representation as used in sector headers.
    pub fn to_bcd(&self) -> [u8; 3] {
        [to_bcd(self.minutes), to_bcd(self.seconds), to_bcd(self.frames)]
    }
}

fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_tracks_default_to_xa_form1() {
        assert_eq!(TrackType::Audio.default_mode(), TrackMode::Cdda);
        assert_eq!(TrackType::Data.default_mode(), TrackMode::XaMode2Form1);
    }

    #[test]
    fn user_data_size_per_mode() {
        assert_eq!(TrackMode::Cdda.user_data_size(), 2352);
        assert_eq!(TrackMode::Mode1.user_data_size(), 2048);
        assert_eq!(TrackMode::Mode2.user_data_size(), 2336);
        assert_eq!(TrackMode::XaMode2Form1.user_data_size(), 2048);
        assert_eq!(TrackMode::XaMode2Form2.user_data_size(), 2324);
        assert_eq!(CDI_DATA_SECTOR_SIZE, 2336);
    }

    #[test]
    fn msf_of_lba_zero_is_two_seconds() {
        let msf = Msf::from_lba(0);
        assert_eq!(
            msf,
            Msf {
                minutes: 0,
                seconds: 2,
                frames: 0
            }
        );
        assert_eq!(msf.to_lba(), Some(0));
    }

    #[test]
    fn msf_before_first_pregap_has_no_lba() {
        let start = Msf {
            minutes: 0,
            seconds: 0,
            frames: 0,
        };
        assert_eq!(start.to_lba(), None);

        let last = Msf {
            minutes: 0,
            seconds: 1,
            frames: 74,
        };
        assert_eq!(last.to_lba(), None);
    }

    #[test]
    fn msf_bcd_encodes_each_field() {
        // 11702 + 150 = 11852 frames = 2:38:02
        let msf = Msf::from_lba(11702);
        assert_eq!(msf.to_bcd(), [0x02, 0x38, 0x02]);
        assert_eq!(msf.to_lba(), Some(11702));
    }
}
