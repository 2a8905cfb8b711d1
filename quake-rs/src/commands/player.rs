//! Player directory command implementations

use anyhow::{Context, Result, bail};
use clap::Subcommand;
use log::{debug, warn};
use std::path::{Path, PathBuf};

use q2_md2::AnimationPlayer;

use crate::assets::{DEFAULT_FPS, DEFAULT_SCALE, PlaybackRate, PlayerAssets, TextureCache};
use crate::utils::{add_table_row, create_table, format_frame_range, format_percentage};

#[derive(Subcommand)]
pub enum PlayerCommands {
    /// List the skins and clips of a player directory
    Info {
        /// Player directory, or the path to its tris.md2
        dir: PathBuf,
    },

    /// Simulate playback of a clip and print each update
    Play {
        /// Player directory, or the path to its tris.md2
        dir: PathBuf,

        /// Clip to play
        #[arg(short, long, default_value = "stand")]
        clip: String,

        /// Skin to decode (file stem, defaults to the first skin)
        #[arg(long)]
        skin: Option<String>,

        /// Animation rate in frames per second
        #[arg(long, default_value_t = DEFAULT_FPS)]
        fps: f32,

        /// Simulated playback length in seconds
        #[arg(long, default_value = "1.0")]
        seconds: f32,

        /// Updates per simulated second
        #[arg(short, long, default_value = "10")]
        updates: u32,

        /// Uniform scale applied to the posed vertices
        #[arg(long, default_value_t = DEFAULT_SCALE)]
        scale: f32,
    },
}

pub fn execute(cmd: PlayerCommands) -> Result<()> {
    match cmd {
        PlayerCommands::Info { dir } => handle_info(&dir),
        PlayerCommands::Play {
            dir,
            clip,
            skin,
            fps,
            seconds,
            updates,
            scale,
        } => handle_play(&dir, &clip, skin.as_deref(), fps, seconds, updates, scale),
    }
}

fn discover(dir: &Path) -> Result<PlayerAssets> {
    PlayerAssets::discover(dir)
        .with_context(|| format!("Failed to load player assets from {}", dir.display()))
}

fn handle_info(dir: &Path) -> Result<()> {
    let assets = discover(dir)?;

    println!("Player: {}", assets.dir.display());
    println!("=====================================");

    if assets.skins.is_empty() {
        println!("Skins: none");
    } else {
        println!("Skins:");
        let mut table = create_table(vec!["Skin", "File", "Default"]);
        let default = assets.skins.default_skin().map(|skin| skin.path.clone());
        for skin in assets.skins.iter() {
            let file = skin
                .path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            let marker = if default.as_ref() == Some(&skin.path) {
                "*"
            } else {
                ""
            };
            add_table_row(
                &mut table,
                vec![skin.name.clone(), file, marker.to_string()],
            );
        }
        table.printstd();
    }

    let clips = assets.model.clips();
    if clips.is_empty() {
        println!("Clips: none");
    } else {
        println!("Clips:");
        let mut table = create_table(vec!["Clip", "Frames", "Count"]);
        for clip in clips {
            add_table_row(
                &mut table,
                vec![
                    clip.name.clone(),
                    format_frame_range(clip.start, clip.end),
                    clip.len().to_string(),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn handle_play(
    dir: &Path,
    clip_name: &str,
    skin_name: Option<&str>,
    fps: f32,
    seconds: f32,
    updates: u32,
    scale: f32,
) -> Result<()> {
    if updates == 0 {
        bail!("--updates must be at least 1");
    }

    let mut assets = discover(dir)?;

    if let Some(name) = skin_name {
        let path = assets
            .skins
            .find_by_name(name)
            .map(|skin| skin.path.clone())
            .with_context(|| format!("No skin named '{name}' in {}", assets.dir.display()))?;
        assets.skins.select(&path);
    }

    let mut textures = TextureCache::new();
    match assets.skins.selected() {
        Some(skin) => {
            let texture = textures
                .get_or_load(&skin.path)
                .with_context(|| format!("Failed to decode skin {}", skin.path.display()))?;
            println!(
                "Skin: {} ({}x{})",
                skin.name,
                texture.width(),
                texture.height()
            );
        }
        None => warn!("No skin available in {}", assets.dir.display()),
    }

    let mut player = AnimationPlayer::with_model(&assets.model);
    if !player.select_clip(clip_name) {
        warn!("No clip named '{clip_name}', keeping the first clip");
    }

    let Some(clip) = player.clip() else {
        println!("Model has no frames, nothing to play");
        return Ok(());
    };
    println!(
        "Clip: {} (frames {})",
        clip.name,
        format_frame_range(clip.start, clip.end)
    );

    let rate = PlaybackRate::new(fps);
    let dt = 1.0 / updates as f32;
    let steps = (seconds.max(0.0) * updates as f32).round() as u32;
    debug!(
        "Simulating {steps} update(s) at {} fps, delta {}",
        rate.fps(),
        rate.delta(dt)
    );

    let mut table = create_table(vec!["Time", "Current", "Next", "Blend", "Vertices"]);
    for step in 1..=steps {
        player.tick(rate.delta(dt));
        let vertices = player
            .pose(scale)
            .context("Failed to pose model")?
            .map_or(0, |pose| pose.len());

        add_table_row(
            &mut table,
            vec![
                format!("{:.2}s", step as f32 * dt),
                player.current_frame().to_string(),
                player.next_frame().to_string(),
                format_percentage(f64::from(player.blend()) * 100.0),
                vertices.to_string(),
            ],
        );
    }
    table.printstd();

    Ok(())
}
