//! EDC/ECC generation for CD-ROM sectors.
//!
//! The EDC is the CD-ROM CRC-32 (stored little-endian). The ECC is the Reed-Solomon product
//! code of ECMA-130 annex A: 172 bytes of P parity followed by 104 bytes of Q parity, both
//! computed over the sector starting at the header.

use crate::cd::{
    HEADER_SIZE, MODE1_DATA_SIZE, MODE2_FORM1_DATA_SIZE, MODE2_FORM2_DATA_SIZE, Msf,
    SECTOR_SIZE, SUBHEADER_SIZE, SYNC_PATTERN, SYNC_SIZE, TrackMode,
};
use crc::{CRC_32_CD_ROM_EDC, Crc};
use lazy_static::lazy_static;

const EDC: Crc<u32> = Crc::<u32>::new(&CRC_32_CD_ROM_EDC);

const HEADER_OFFSET: usize = SYNC_SIZE;
const MODE1_EDC_OFFSET: usize = SYNC_SIZE + HEADER_SIZE + MODE1_DATA_SIZE;
const FORM1_EDC_OFFSET: usize = SYNC_SIZE + HEADER_SIZE + SUBHEADER_SIZE + MODE2_FORM1_DATA_SIZE;
const FORM2_EDC_OFFSET: usize = SYNC_SIZE + HEADER_SIZE + SUBHEADER_SIZE + MODE2_FORM2_DATA_SIZE;
const P_PARITY_OFFSET: usize = 0x81C;
const Q_PARITY_OFFSET: usize = 0x8C8;

struct EccTables {
    forward: [u8; 256],
    backward: [u8; 256],
}

impl EccTables {
    fn new() -> Self {
        let mut forward = [0u8; 256];
        let mut backward = [0u8; 256];

        for i in 0..256usize {
            let shifted = (i << 1) ^ if i & 0x80 != 0 { 0x11D } else { 0 };
            forward[i] = shifted as u8;
            backward[i ^ shifted] = i as u8;
        }

        Self { forward, backward }
    }
}

lazy_static! {
    static ref ECC_TABLES: EccTables = EccTables::new();
}

pub fn compute_edc(data: &[u8]) -> u32 {
    EDC.checksum(data)
}

/// Computes P and Q parity in place. Bytes 12 to 0x81B (header and payload) must already
/// hold their final values.
pub fn compute_ecc(sector: &mut [u8; SECTOR_SIZE]) {
    compute_ecc_block(sector, 86, 24, 2, 86, P_PARITY_OFFSET);
    compute_ecc_block(sector, 52, 43, 86, 88, Q_PARITY_OFFSET);
}

fn compute_ecc_block(
    sector: &mut [u8; SECTOR_SIZE],
    major_count: usize,
    minor_count: usize,
    major_mult: usize,
    minor_inc: usize,
    dest: usize,
) {
    let tables = &*ECC_TABLES;
    let size = major_count * minor_count;

    for major in 0..major_count {
        let mut index = (major >> 1) * major_mult + (major & 1);
        let mut ecc_a = 0u8;
        let mut ecc_b = 0u8;

        for _ in 0..minor_count {
            let value = sector[HEADER_OFFSET + index];
            index += minor_inc;
            if index >= size {
                index -= size;
            }
            ecc_a ^= value;
            ecc_b ^= value;
            ecc_a = tables.forward[ecc_a as usize];
        }

        ecc_a = tables.backward[(tables.forward[ecc_a as usize] ^ ecc_b) as usize];
        sector[dest + major] = ecc_a;
        sector[dest + major + major_count] = ecc_a ^ ecc_b;
    }
}

/// Frames a sector whose payload (and subheader, for XA modes) is already in place: writes
/// the sync pattern and header for `address`, then the EDC/ECC the mode calls for.
pub fn encode_sector(sector: &mut [u8; SECTOR_SIZE], mode: TrackMode, address: Msf) {
    let Some(mode_byte) = mode.header_mode() else {
        return;
    };

    let [minutes, seconds, frames] = address.to_bcd();
    let header = [minutes, seconds, frames, mode_byte];

    sector[..SYNC_SIZE].copy_from_slice(&SYNC_PATTERN);
    sector[HEADER_OFFSET..HEADER_OFFSET + HEADER_SIZE].copy_from_slice(&header);

    match mode {
        TrackMode::Cdda | TrackMode::Mode2 => {}
        TrackMode::Mode1 => {
            let edc = compute_edc(&sector[..MODE1_EDC_OFFSET]);
            sector[MODE1_EDC_OFFSET..MODE1_EDC_OFFSET + 4].copy_from_slice(&edc.to_le_bytes());
            sector[MODE1_EDC_OFFSET + 4..MODE1_EDC_OFFSET + 12].fill(0);
            compute_ecc(sector);
        }
        TrackMode::XaMode2Form1 => {
            let edc = compute_edc(&sector[SYNC_SIZE + HEADER_SIZE..FORM1_EDC_OFFSET]);
            sector[FORM1_EDC_OFFSET..FORM1_EDC_OFFSET + 4].copy_from_slice(&edc.to_le_bytes());

            // Form 1 parity is computed over a zeroed header
            sector[HEADER_OFFSET..HEADER_OFFSET + HEADER_SIZE].fill(0);
            compute_ecc(sector);
            sector[HEADER_OFFSET..HEADER_OFFSET + HEADER_SIZE].copy_from_slice(&header);
        }
        TrackMode::XaMode2Form2 => {
            let edc = compute_edc(&sector[SYNC_SIZE + HEADER_SIZE..FORM2_EDC_OFFSET]);
            sector[FORM2_EDC_OFFSET..FORM2_EDC_OFFSET + 4].copy_from_slice(&edc.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edc_matches_catalog_check_value() {
        assert_eq!(compute_edc(b"123456789"), 0x6EC2_EDC4);
    }

    #[test]
    fn edc_of_silent_form2_sector() {
        let mut data = vec![0u8; SUBHEADER_SIZE + MODE2_FORM2_DATA_SIZE];
        data[2] = 0x20;
        data[6] = 0x20;
        assert_eq!(compute_edc(&data).to_le_bytes(), [0x3F, 0x13, 0xB0, 0xBE]);
    }

    #[test]
    fn empty_form1_sector_matches_pressed_disc() {
        // Empty Mode 2 Form 1 sector at 00:02:03 as found on a pressed PlayStation disc
        let expected_tail: [(usize, u8); 42] = [
            (2072, 0x0B), (2073, 0x88), (2074, 0x81), (2075, 0x94), (2082, 0xFB),
            (2086, 0xFB), (2158, 0x1D), (2159, 0x85), (2160, 0x9E), (2161, 0xA1),
            (2168, 0xF3), (2172, 0xF3), (2244, 0x16), (2245, 0x0D), (2246, 0x1F),
            (2247, 0x35), (2262, 0x9E), (2263, 0xA1), (2264, 0x8E), (2265, 0x61),
            (2266, 0x72), (2267, 0xE3), (2268, 0x62), (2269, 0x23), (2286, 0xB9),
            (2288, 0xD2), (2290, 0xA5), (2292, 0x67), (2294, 0xA9), (2314, 0x1F),
            (2315, 0x35), (2316, 0x1B), (2317, 0x48), (2318, 0x70), (2319, 0x53),
            (2320, 0x74), (2321, 0x2E), (2338, 0x42), (2340, 0x21), (2342, 0x56),
            (2344, 0x94), (2346, 0xA1),
        ];

        let mut sector = [0u8; SECTOR_SIZE];
        sector[18] = 0x08;
        sector[22] = 0x08;
        let address = Msf {
            minutes: 0,
            seconds: 2,
            frames: 3,
        };
        encode_sector(&mut sector, TrackMode::XaMode2Form1, address);

        assert_eq!(&sector[..12], &SYNC_PATTERN);
        assert_eq!(&sector[12..16], &[0x00, 0x02, 0x03, 0x02]);

        let mut expected = [0u8; SECTOR_SIZE];
        expected[..2072].copy_from_slice(&sector[..2072]);
        for (offset, value) in expected_tail {
            expected[offset] = value;
        }
        assert_eq!(&sector[2072..], &expected[2072..]);
    }

    #[test]
    fn form1_parity_ignores_address() {
        let mut first = [0u8; SECTOR_SIZE];
        let mut second = [0u8; SECTOR_SIZE];
        first[24..32].copy_from_slice(b"PAYLOAD!");
        second[24..32].copy_from_slice(b"PAYLOAD!");

        encode_sector(&mut first, TrackMode::XaMode2Form1, Msf::from_lba(0));
        encode_sector(&mut second, TrackMode::XaMode2Form1, Msf::from_lba(12345));

        assert_ne!(&first[12..16], &second[12..16]);
        assert_eq!(&first[16..], &second[16..]);
    }

    #[test]
    fn mode1_parity_depends_on_address() {
        let mut first = [0u8; SECTOR_SIZE];
        let mut second = [0u8; SECTOR_SIZE];

        encode_sector(&mut first, TrackMode::Mode1, Msf::from_lba(0));
        encode_sector(&mut second, TrackMode::Mode1, Msf::from_lba(1));

        assert_eq!(first[15], 1);
        assert_ne!(&first[MODE1_EDC_OFFSET..], &second[MODE1_EDC_OFFSET..]);
        assert!(first[MODE1_EDC_OFFSET + 4..MODE1_EDC_OFFSET + 12].iter().all(|b| *b == 0));
    }

    #[test]
    fn audio_sectors_are_left_untouched() {
        let mut sector = [0x5Au8; SECTOR_SIZE];
        encode_sector(&mut sector, TrackMode::Cdda, Msf::from_lba(0));
        assert!(sector.iter().all(|b| *b == 0x5A));
    }
}
