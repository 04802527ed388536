use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for building multi-session DiscJuggler (CDI) disc images.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Eq, PartialEq)]
pub enum Commands {
    Build(BuildCommand),
    Layout(LayoutCommand),
    Scramble(ScrambleCommand),
}

/// Builds a CDI image with an audio session followed by a data session.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Builds a CDI image with an audio session followed by a data session\n\nNote: the data payload is used as is, a filesystem image inside it must be mastered for the LBA printed by the layout command"
)]
pub struct BuildCommand {
    /// Output CDI file path
    #[arg(long, short = 'o', value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Payload of the data track, usually an ISO9660 image
    #[arg(long, short = 'd', value_name = "DATA")]
    pub data: PathBuf,

    /// Wave file to use as an audio track, repeat for multiple tracks
    #[arg(long, short = 'c', value_name = "WAV")]
    pub cdda: Vec<PathBuf>,

    /// Label for the filename and volume id fields of the image, defaults to the output file name
    #[arg(long, short = 'n', value_name = "NAME")]
    pub volume_name: Option<String>,

    /// Force overwrite of the output file if it already exists
    #[arg(long, short = 'f', value_name = "FORCE", default_value_t = false)]
    pub force: bool,
}

/// Prints the LBA at which the data session of a build would start.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct LayoutCommand {
    /// Wave file to use as an audio track, repeat for multiple tracks
    #[arg(long, short = 'c', value_name = "WAV")]
    pub cdda: Vec<PathBuf>,
}

/// Scrambles a flat binary so it can be booted from a CD as 1ST_READ.BIN.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
pub struct ScrambleCommand {
    /// Unscrambled input binary
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Scrambled output binary
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,
}
