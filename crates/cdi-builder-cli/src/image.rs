use crate::commands::{BuildCommand, LayoutCommand, ScrambleCommand};
use anyhow::{Context, Result, bail};
use cdi_builder::audio::{ensure_minimum_length, load_wav};
use cdi_builder::boot::{load_binary, scramble};
use cdi_builder::cdi::write_cdi;
use cdi_builder::disc::Image;
use cdi_builder::disc::layout::{add_audio_session, next_session_lba, standard_image};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::{fs, task};

async fn load_audio_tracks(paths: &[PathBuf]) -> Result<Vec<Vec<u8>>> {
    let mut tracks = Vec::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let pcm = load_wav(path)
            .await
            .with_context(|| format!("Could not load audio track {:?}", path))?;
        ensure_minimum_length(&pcm).with_context(|| format!("Audio track {:?}", path))?;

        info!(
            "Added track {} ({} bytes) from {:?}",
            index + 1,
            pcm.len(),
            path
        );
        tracks.push(pcm);
    }

    Ok(tracks)
}

/// Label written to the CDI filename and volume id fields: `--volume-name` when given,
/// otherwise the output file name.
fn volume_label(cmd: &BuildCommand) -> String {
    cmd.volume_name.clone().unwrap_or_else(|| {
        cmd.output
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

/// Deletes a partially written image, warning when it stays on disk.
async fn remove_partial_output(path: &Path) -> bool {
    match fs::remove_file(path).await {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not remove partial image {:?}: {}", path, err);
            false
        }
    }
}

pub async fn build_image(pb: MultiProgress, cmd: BuildCommand) -> Result<()> {
    if fs::metadata(&cmd.output).await.is_ok() && !cmd.force {
        bail!("{:?} already exists, use --force to overwrite", cmd.output);
    }

    let audio_tracks = load_audio_tracks(&cmd.cdda).await?;
    let data = load_binary(&cmd.data)
        .await
        .with_context(|| format!("Could not load data payload {:?}", cmd.data))?;

    let label = volume_label(&cmd);
    let image = standard_image(&label, audio_tracks, data);
    debug!(
        "Data session starts at LBA {:?}",
        image.track_start_lba(1, 0)
    );

    let spinner = pb.add(ProgressBar::new_spinner());
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    spinner.set_message(format!("Writing {:?}", cmd.output));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = cmd.output.clone();
    let result = task::spawn_blocking(move || -> Result<_> {
        let file = File::create(&output)?;
        let writer = BufWriter::with_capacity(8 * 1024 * 1024, file); // 8 MB buffer
        Ok(write_cdi(&image, writer, &label)?)
    })
    .await?;

    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            info!(
                "Saved {:?}: {} sectors, sha1 {}",
                cmd.output,
                summary.total_sectors,
                hex::encode(summary.sha1)
            );
            Ok(())
        }
        Err(err) => {
            remove_partial_output(&cmd.output).await;
            Err(err.context(format!("Could not write {:?}", cmd.output)))
        }
    }
}

pub async fn print_layout(cmd: LayoutCommand) -> Result<()> {
    let audio_tracks = load_audio_tracks(&cmd.cdda).await?;

    let mut image = Image::new();
    add_audio_session(&mut image, audio_tracks);

    println!("{}", next_session_lba(&image));
    Ok(())
}

pub async fn scramble_binary(cmd: ScrambleCommand) -> Result<()> {
    let data = load_binary(&cmd.input)
        .await
        .with_context(|| format!("Could not load binary {:?}", cmd.input))?;

    let scrambled = task::spawn_blocking(move || scramble(&data)).await?;
    fs::write(&cmd.output, &scrambled).await?;

    info!("Saved scrambled binary to {:?}", cmd.output);
    Ok(())
}
