//! MD2 model command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};

use q2_md2::Md2Model;
use q2_md2::animation::interpolate;
use q2_md2::header::MD2_HEADER_SIZE;

use crate::utils::{
    NodeType, TreeNode, TreeOptions, add_table_row, create_table, format_bytes,
    format_frame_range, format_modified, render_tree,
};

#[derive(Subcommand)]
pub enum Md2Commands {
    /// Display information about an MD2 model file
    Info {
        /// Path to the MD2 file
        file: PathBuf,

        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the animation clips derived from frame names
    Clips {
        /// Path to the MD2 file
        file: PathBuf,

        /// Also list the frames of each clip
        #[arg(short, long)]
        frames: bool,
    },

    /// Print the interpolated pose between two frames
    Pose {
        /// Path to the MD2 file
        file: PathBuf,

        /// Frame blended from
        #[arg(short = 'a', long, default_value = "0")]
        frame_a: usize,

        /// Frame blended towards (defaults to frame A)
        #[arg(short = 'b', long)]
        frame_b: Option<usize>,

        /// Blend factor between the two frames
        #[arg(short = 't', long, default_value = "0.0", allow_negative_numbers = true)]
        blend: f32,

        /// Uniform scale applied to positions
        #[arg(short, long, default_value = "1.0")]
        scale: f32,

        /// Maximum number of vertices to print
        #[arg(short, long, default_value = "12")]
        limit: usize,
    },

    /// Display MD2 file structure as a tree
    Tree {
        /// Path to the MD2 file
        file: PathBuf,

        /// Maximum depth to display
        #[arg(short, long, default_value = "5")]
        depth: usize,

        /// Include skin references
        #[arg(short, long)]
        refs: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Show metadata inline
        #[arg(long)]
        compact: bool,
    },
}

pub fn execute(cmd: Md2Commands) -> Result<()> {
    match cmd {
        Md2Commands::Info { file, detailed } => handle_info(&file, detailed),
        Md2Commands::Clips { file, frames } => handle_clips(&file, frames),
        Md2Commands::Pose {
            file,
            frame_a,
            frame_b,
            blend,
            scale,
            limit,
        } => handle_pose(&file, frame_a, frame_b.unwrap_or(frame_a), blend, scale, limit),
        Md2Commands::Tree {
            file,
            depth,
            refs,
            no_color,
            compact,
        } => handle_tree(&file, depth, refs, no_color, compact),
    }
}

fn load_model(path: &Path) -> Result<Md2Model> {
    Md2Model::load(path).with_context(|| format!("Failed to load MD2 file: {}", path.display()))
}

fn handle_info(path: &Path, detailed: bool) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read MD2 file: {}", path.display()))?;
    let model = load_model(path)?;
    let header = model.header();

    println!("MD2 Model Information: {}", path.display());
    println!("=====================================");
    println!("File Size: {}", format_bytes(metadata.len()));
    println!("Modified: {}", format_modified(metadata.modified().ok()));
    println!("Version: {}", header.version);
    println!("Skin Size: {}x{}", header.skin_width, header.skin_height);
    println!("Skins: {}", header.num_skins);
    println!("Vertices: {}", header.num_vertices);
    println!("Texture Coordinates: {}", header.num_st);
    println!("Triangles: {}", header.num_tris);
    println!("Frames: {}", header.num_frames);
    println!("Clips: {}", model.clips().len());

    for skin in model.skins() {
        println!("  Skin: {}", skin.name);
    }

    if detailed {
        println!("\nSections:");
        println!("---------");
        let mut table = create_table(vec!["Section", "Offset", "Count"]);
        for (name, offset, count) in [
            ("skins", header.offset_skins, header.num_skins),
            ("texture coordinates", header.offset_st, header.num_st),
            ("triangles", header.offset_tris, header.num_tris),
            ("frames", header.offset_frames, header.num_frames),
            ("gl commands", header.offset_glcmds, header.num_glcmds),
        ] {
            add_table_row(
                &mut table,
                vec![name.to_string(), offset.to_string(), count.to_string()],
            );
        }
        table.printstd();
        println!("Frame Size: {} bytes", header.frame_size);
        println!("End Offset: {}", header.offset_end);
    }

    Ok(())
}

fn handle_clips(path: &Path, show_frames: bool) -> Result<()> {
    let model = load_model(path)?;

    if model.clips().is_empty() {
        println!("No clips: the model has no frames");
        return Ok(());
    }

    let mut table = create_table(vec!["#", "Clip", "Frames", "Count"]);
    for (index, clip) in model.clips().iter().enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                clip.name.clone(),
                format_frame_range(clip.start, clip.end),
                clip.len().to_string(),
            ],
        );
    }
    table.printstd();

    if show_frames {
        for clip in model.clips() {
            let names: Vec<&str> = model.frames()[clip.frames()]
                .iter()
                .map(|frame| frame.name.as_str())
                .collect();
            println!("{}: {}", clip.name, names.join(", "));
        }
    }

    Ok(())
}

fn handle_pose(
    path: &Path,
    frame_a: usize,
    frame_b: usize,
    t: f32,
    scale: f32,
    limit: usize,
) -> Result<()> {
    let model = load_model(path)?;
    let pose = interpolate(&model, frame_a, frame_b, t, scale)
        .with_context(|| format!("Failed to interpolate frames {frame_a} and {frame_b}"))?;

    println!(
        "Pose: frame {frame_a} -> {frame_b}, t = {t}, scale = {scale}, {} vertices",
        pose.len()
    );

    let mut table = create_table(vec!["#", "X", "Y", "Z", "S", "T"]);
    for (index, vertex) in pose.iter().take(limit).enumerate() {
        add_table_row(
            &mut table,
            vec![
                index.to_string(),
                format!("{:.3}", vertex.position.x),
                format!("{:.3}", vertex.position.y),
                format!("{:.3}", vertex.position.z),
                format!("{:.4}", vertex.tex_coord.x),
                format!("{:.4}", vertex.tex_coord.y),
            ],
        );
    }
    table.printstd();

    if pose.len() > limit {
        println!("... {} more", pose.len() - limit);
    }

    Ok(())
}

fn handle_tree(path: &Path, depth: usize, show_refs: bool, no_color: bool, compact: bool) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read MD2 file: {}", path.display()))?;
    let model = load_model(path)?;
    let header = model.header();
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    let header_node = TreeNode::new("Header", NodeType::Header)
        .with_size(MD2_HEADER_SIZE as u64)
        .with_metadata("version", header.version)
        .with_metadata("skin size", format!("{}x{}", header.skin_width, header.skin_height))
        .with_metadata("frame size", header.frame_size);

    let mut skins = TreeNode::new("Skins", NodeType::Section)
        .with_size(64 * u64::from(header.num_skins))
        .with_metadata("count", header.num_skins);
    if show_refs {
        for skin in model.skins() {
            // Skin names are relative to the game directory; check next to the model too
            let exists = Path::new(&skin.name)
                .file_name()
                .map(|file| base_dir.join(file).exists());
            skins = skins.with_external_ref(&skin.name, exists);
        }
    }

    let geometry = TreeNode::new("Geometry", NodeType::Section)
        .add_child(
            TreeNode::new("Texture Coordinates", NodeType::Section)
                .with_size(4 * u64::from(header.num_st))
                .with_metadata("count", header.num_st),
        )
        .add_child(
            TreeNode::new("Triangles", NodeType::Section)
                .with_size(12 * u64::from(header.num_tris))
                .with_metadata("count", header.num_tris),
        );

    let mut clips = TreeNode::new("Frames", NodeType::Section)
        .with_size(header.frame_record_size() * u64::from(header.num_frames))
        .with_metadata("count", header.num_frames);
    for clip in model.clips() {
        let mut clip_node = TreeNode::new(clip.name.clone(), NodeType::Clip)
            .with_metadata("frames", format_frame_range(clip.start, clip.end));
        for frame in &model.frames()[clip.frames()] {
            clip_node = clip_node.add_child(TreeNode::new(frame.name.clone(), NodeType::Frame));
        }
        clips = clips.add_child(clip_node);
    }

    let root = TreeNode::new(name, NodeType::Root)
        .with_size(metadata.len())
        .add_child(header_node)
        .add_child(skins)
        .add_child(geometry)
        .add_child(clips);

    let options = TreeOptions {
        max_depth: Some(depth),
        show_external_refs: show_refs,
        no_color,
        show_metadata: true,
        compact,
    };

    print!("{}", render_tree(&root, &options));
    Ok(())
}
