use binrw::{BinRead, BinWrite};

#[derive(Debug, Clone, BinRead, BinWrite)]
#[brw(little)]
pub struct RiffHeader {
    pub id: [u8; 4],
    pub size: u32,
    pub form: [u8; 4],
}

#[derive(Debug, Clone, BinRead, BinWrite)]
#[brw(little)]
pub struct ChunkHeader {
    pub id: [u8; 4],
    pub size: u32,
}

/// Leading 16 bytes of a `fmt ` chunk, common to every format tag.
#[derive(Debug, Clone, BinRead, BinWrite)]
#[brw(little)]
pub struct FormatChunk {
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

pub const CHUNK_HEADER_SIZE: usize = 8;
pub const FORMAT_CHUNK_SIZE: u32 = 16;
