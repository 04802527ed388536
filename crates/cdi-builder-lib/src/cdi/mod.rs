pub mod encoder;
pub mod error;
mod header;
pub mod models;

use crate::cdi::error::CdiResult;
use crate::disc::Image;
use log::{debug, info};
use sha1::{Digest, Sha1};
use std::io::Write;

/// Outcome of a successful build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdiSummary {
    pub bytes_written: u64,
    /// Disc length in sectors as recorded in the disc info record.
    pub total_sectors: u32,
    /// Offset of the metadata block (the session count byte).
    pub header_offset: u64,
    pub sha1: [u8; 20],
}

/// Streams an [`Image`] as a CDI file, hashing everything it writes.
pub struct CdiWriter<W: Write> {
    writer: W,
    sha1: Sha1,
    bytes_written: u64,
}

impl<W: Write> CdiWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sha1: Sha1::new(),
            bytes_written: 0,
        }
    }

    /// Writes the track data of every session followed by the metadata block. The image is
    /// validated before the first byte is written; any write failure aborts the build.
    pub fn write_image(mut self, image: &Image, volume_label: &str) -> CdiResult<CdiSummary> {
        header::validate(image)?;

        for (session_index, session) in image.sessions().iter().enumerate() {
            debug!(
                "Writing session {} ({} tracks)",
                session_index,
                session.track_count()
            );

            for (track_index, track) in session.tracks().iter().enumerate() {
                let start_lba = image
                    .track_start_lba(session_index, track_index)
                    .unwrap_or_default();
                encoder::write_track(&mut self, track, start_lba)?;
            }
        }

        let header_offset = self.bytes_written;
        let header = header::build_header_block(image, volume_label)?;
        self.write_all(&header)?;
        self.flush()?;

        let summary = CdiSummary {
            bytes_written: self.bytes_written,
            total_sectors: image.length_in_sectors(),
            header_offset,
            sha1: self.sha1.finalize().into(),
        };

        info!(
            "Wrote CDI image: {} sessions, {} tracks, {} bytes",
            image.session_count(),
            image.track_count(),
            summary.bytes_written
        );

        Ok(summary)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Write for CdiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.writer.write(buf)?;
        self.sha1.update(&buf[..written]);
        self.bytes_written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// Builds `image` into `output`. `volume_label` fills the filename and volume id fields.
pub fn write_cdi<W: Write>(image: &Image, output: W, volume_label: &str) -> CdiResult<CdiSummary> {
    CdiWriter::new(output).write_image(image, volume_label)
}
