//! Streams the sectors of one track into the image, pregap and postgap included.
//!
//! Audio sectors are stored as raw 2352-byte frames. Data sectors are stored as 2336 bytes:
//! the physical sector without its sync pattern and header.

use crate::cd::ecc::encode_sector;
use crate::cd::{
    CDI_DATA_SECTOR_SIZE, HEADER_SIZE, Msf, SECTOR_SIZE, SUBHEADER_SIZE, SYNC_SIZE, TrackMode,
};
use crate::cdi::error::CdiResult;
use crate::disc::Track;
use log::debug;
use std::io::Write;

/// Audio tracks shorter than this (payload + postgap) are padded with silence.
pub const MINIMUM_AUDIO_SECTORS: u32 = 302;

const STORED_OFFSET: usize = SYNC_SIZE + HEADER_SIZE;
const SUBHEADER_OFFSET: usize = SYNC_SIZE + HEADER_SIZE;
const XA_DATA_OFFSET: usize = SUBHEADER_OFFSET + SUBHEADER_SIZE;

const FORM1_SUBHEADER: [u8; SUBHEADER_SIZE] = [0x00, 0x00, 0x09, 0x00, 0x00, 0x00, 0x09, 0x00];
const FORM2_SUBHEADER: [u8; SUBHEADER_SIZE] = [0x00, 0x00, 0x20, 0x00, 0x00, 0x00, 0x20, 0x00];

const SILENT_AUDIO_SECTOR: [u8; SECTOR_SIZE] = [0; SECTOR_SIZE];
const SILENT_MODE2_SECTOR: [u8; CDI_DATA_SECTOR_SIZE] = [0; CDI_DATA_SECTOR_SIZE];

/// Gap sector of XA tracks: an empty Form 2 sector with its precomputed EDC.
const SILENT_XA_SECTOR: [u8; CDI_DATA_SECTOR_SIZE] = {
    let mut sector = [0u8; CDI_DATA_SECTOR_SIZE];
    sector[2] = 0x20;
    sector[6] = 0x20;
    sector[CDI_DATA_SECTOR_SIZE - 4] = 0x3F;
    sector[CDI_DATA_SECTOR_SIZE - 3] = 0x13;
    sector[CDI_DATA_SECTOR_SIZE - 2] = 0xB0;
    sector[CDI_DATA_SECTOR_SIZE - 1] = 0xBE;
    sector
};

/// Writes `track` starting at `start_lba` and returns the number of sectors written.
pub fn write_track<W: Write>(output: &mut W, track: &Track, start_lba: u32) -> CdiResult<u32> {
    debug!(
        "Encoding {:?} track at LBA {}: {} pregap, {} data, {} postgap sectors",
        track.mode(),
        start_lba,
        track.pregap_sectors(),
        track.data_size_in_sectors(),
        track.postgap_sectors()
    );

    match track.mode() {
        TrackMode::Cdda => write_cdda(output, track),
        TrackMode::Mode1 => write_mode1(output, track, start_lba),
        TrackMode::Mode2 => write_mode2(output, track),
        TrackMode::XaMode2Form1 => {
            write_xa(output, track, start_lba, TrackMode::XaMode2Form1, FORM1_SUBHEADER)
        }
        TrackMode::XaMode2Form2 => {
            write_xa(output, track, start_lba, TrackMode::XaMode2Form2, FORM2_SUBHEADER)
        }
    }
}

fn write_repeated<W: Write>(output: &mut W, sector: &[u8], count: u32) -> CdiResult<()> {
    for _ in 0..count {
        output.write_all(sector)?;
    }
    Ok(())
}

fn write_cdda<W: Write>(output: &mut W, track: &Track) -> CdiResult<u32> {
    write_repeated(output, &SILENT_AUDIO_SECTOR, track.pregap_sectors())?;

    output.write_all(track.data())?;
    let remainder = track.data().len() % SECTOR_SIZE;
    if remainder != 0 {
        output.write_all(&SILENT_AUDIO_SECTOR[..SECTOR_SIZE - remainder])?;
    }

    write_repeated(output, &SILENT_AUDIO_SECTOR, track.postgap_sectors())?;

    // the floor counts payload and postgap, not the pregap
    let mut written = track.data_size_in_sectors() + track.postgap_sectors();
    if written < MINIMUM_AUDIO_SECTORS {
        write_repeated(output, &SILENT_AUDIO_SECTOR, MINIMUM_AUDIO_SECTORS - written)?;
        written = MINIMUM_AUDIO_SECTORS;
    }

    Ok(track.pregap_sectors() + written)
}

fn write_mode1<W: Write>(output: &mut W, track: &Track, start_lba: u32) -> CdiResult<u32> {
    let mut lba = start_lba;
    let mut sector = [0u8; SECTOR_SIZE];

    for _ in 0..track.pregap_sectors() {
        write_mode1_sector(output, &mut sector, &[], lba)?;
        lba += 1;
    }
    for chunk in track.data().chunks(TrackMode::Mode1.user_data_size()) {
        write_mode1_sector(output, &mut sector, chunk, lba)?;
        lba += 1;
    }
    for _ in 0..track.postgap_sectors() {
        write_mode1_sector(output, &mut sector, &[], lba)?;
        lba += 1;
    }

    Ok(lba - start_lba)
}

fn write_mode1_sector<W: Write>(
    output: &mut W,
    sector: &mut [u8; SECTOR_SIZE],
    payload: &[u8],
    lba: u32,
) -> CdiResult<()> {
    sector.fill(0);
    sector[STORED_OFFSET..STORED_OFFSET + payload.len()].copy_from_slice(payload);
    encode_sector(sector, TrackMode::Mode1, Msf::from_lba(lba));
    output.write_all(&sector[STORED_OFFSET..])?;
    Ok(())
}

fn write_mode2<W: Write>(output: &mut W, track: &Track) -> CdiResult<u32> {
    write_repeated(output, &SILENT_MODE2_SECTOR, track.pregap_sectors())?;

    let chunk_size = TrackMode::Mode2.user_data_size();
    for chunk in track.data().chunks(chunk_size) {
        output.write_all(chunk)?;
        if chunk.len() < chunk_size {
            output.write_all(&SILENT_MODE2_SECTOR[..chunk_size - chunk.len()])?;
        }
    }

    write_repeated(output, &SILENT_MODE2_SECTOR, track.postgap_sectors())?;

    Ok(track.total_size_in_sectors())
}

fn write_xa<W: Write>(
    output: &mut W,
    track: &Track,
    start_lba: u32,
    mode: TrackMode,
    subheader: [u8; SUBHEADER_SIZE],
) -> CdiResult<u32> {
    write_repeated(output, &SILENT_XA_SECTOR, track.pregap_sectors())?;

    let mut lba = start_lba + track.pregap_sectors();
    let mut sector = [0u8; SECTOR_SIZE];

    for chunk in track.data().chunks(mode.user_data_size()) {
        sector.fill(0);
        sector[SUBHEADER_OFFSET..XA_DATA_OFFSET].copy_from_slice(&subheader);
        sector[XA_DATA_OFFSET..XA_DATA_OFFSET + chunk.len()].copy_from_slice(chunk);

        encode_sector(&mut sector, mode, Msf::from_lba(lba));
        output.write_all(&sector[STORED_OFFSET..])?;
        lba += 1;
    }

    write_repeated(output, &SILENT_XA_SECTOR, track.postgap_sectors())?;

    Ok(track.total_size_in_sectors())
}
