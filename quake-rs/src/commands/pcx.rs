//! PCX skin command implementations

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use image::ImageFormat;
use std::path::{Path, PathBuf};

use q2_pcx::convert::{RowOrder, to_rgb_image};
use q2_pcx::parser::parse_pcx;
use q2_pcx::types::{ComponentOrder, DecodeOptions, PcxFile};

use crate::utils::{add_table_row, create_table, format_bytes, format_modified};

#[derive(Subcommand)]
pub enum PcxCommands {
    /// Display information about a PCX file
    Info {
        /// Path to the PCX file
        file: PathBuf,

        /// Show the palette entries
        #[arg(long)]
        palette: bool,

        /// Show raw header data
        #[arg(long)]
        raw: bool,
    },

    /// Convert a PCX file to another image format
    Convert {
        /// Input PCX file
        input: PathBuf,

        /// Output image file
        output: PathBuf,

        /// Output format (auto-detected from extension if not specified)
        #[arg(short = 'o', long)]
        output_format: Option<OutputFormat>,

        /// Channel order applied to palette lookups
        #[arg(long, default_value = "rgb")]
        order: ChannelOrder,

        /// Keep the bottom-first row order used for texture uploads
        #[arg(long)]
        bottom_up: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Tga,
    Tiff,
    Pnm,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

impl From<OutputFormat> for ImageFormat {
    fn from(value: OutputFormat) -> ImageFormat {
        match value {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Tga => ImageFormat::Tga,
            OutputFormat::Tiff => ImageFormat::Tiff,
            OutputFormat::Pnm => ImageFormat::Pnm,
        }
    }
}

impl From<ChannelOrder> for ComponentOrder {
    fn from(value: ChannelOrder) -> ComponentOrder {
        match value {
            ChannelOrder::Rgb => ComponentOrder::RGB,
            ChannelOrder::Bgr => ComponentOrder::BGR,
        }
    }
}

fn guess_output_format(path: &Path) -> Option<OutputFormat> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "png" => Some(OutputFormat::Png),
        "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
        "bmp" => Some(OutputFormat::Bmp),
        "tga" => Some(OutputFormat::Tga),
        "tiff" | "tif" => Some(OutputFormat::Tiff),
        "pnm" | "ppm" => Some(OutputFormat::Pnm),
        _ => None,
    }
}

fn read_pcx(path: &Path, options: &DecodeOptions) -> Result<PcxFile> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read PCX file: {}", path.display()))?;
    parse_pcx(&data, options).with_context(|| format!("Failed to decode PCX file: {}", path.display()))
}

pub fn execute(command: PcxCommands) -> Result<()> {
    match command {
        PcxCommands::Info { file, palette, raw } => show_pcx_info(&file, palette, raw),
        PcxCommands::Convert {
            input,
            output,
            output_format,
            order,
            bottom_up,
        } => convert_pcx(&input, &output, output_format, order, bottom_up),
    }
}

fn show_pcx_info(file: &Path, show_palette: bool, show_raw: bool) -> Result<()> {
    let metadata = std::fs::metadata(file)
        .with_context(|| format!("Failed to read PCX file: {}", file.display()))?;
    let pcx = read_pcx(file, &DecodeOptions::default())?;
    let header = &pcx.header;

    println!("PCX File Information: {}", file.display());
    println!("=====================================");
    println!("File Size: {}", format_bytes(metadata.len()));
    println!("Modified: {}", format_modified(metadata.modified().ok()));
    println!("Version: {}", header.version);
    println!("Encoding: {}", header.encoding);
    println!("Dimensions: {}x{}", pcx.image.width(), pcx.image.height());
    println!(
        "Window: ({}, {})-({}, {})",
        header.xmin, header.ymin, header.xmax, header.ymax
    );
    println!("Bits per Pixel: {}", header.bits_per_pixel);
    println!("Color Planes: {}", header.color_planes);
    println!("Bytes per Scanline: {}", header.bytes_per_scanline);
    println!("Resolution: {}x{} dpi", header.horz_res, header.vert_res);

    if pcx.warnings.is_empty() {
        println!("Warnings: none");
    } else {
        println!("\nWarnings:");
        for warning in &pcx.warnings {
            println!("  - {warning}");
        }
    }

    if show_raw {
        println!("\nRaw Header:");
        println!("-----------");
        println!("{header:#?}");
    }

    if show_palette {
        println!("\nPalette:");
        let mut table = create_table(vec!["Index", "R", "G", "B"]);
        for index in 0..=u8::MAX {
            let [r, g, b] = pcx.palette.color(index, ComponentOrder::RGB);
            add_table_row(
                &mut table,
                vec![
                    index.to_string(),
                    r.to_string(),
                    g.to_string(),
                    b.to_string(),
                ],
            );
        }
        table.printstd();
    }

    Ok(())
}

fn convert_pcx(
    input: &Path,
    output: &Path,
    output_format: Option<OutputFormat>,
    order: ChannelOrder,
    bottom_up: bool,
) -> Result<()> {
    let output_format = output_format
        .or_else(|| guess_output_format(output))
        .with_context(|| {
            format!(
                "Cannot determine output format from {}, use --output-format",
                output.display()
            )
        })?;

    let options = DecodeOptions::with_component_order(order.into());
    let pcx = read_pcx(input, &options)?;
    for warning in &pcx.warnings {
        eprintln!("Warning: {warning}");
    }

    let row_order = if bottom_up {
        RowOrder::BottomUp
    } else {
        RowOrder::TopDown
    };
    let image = to_rgb_image(&pcx.image, row_order).context("Failed to build image buffer")?;
    image
        .save_with_format(output, output_format.into())
        .with_context(|| format!("Failed to save image: {}", output.display()))?;

    println!(
        "Converted {} ({}x{}) to {}",
        input.display(),
        pcx.image.width(),
        pcx.image.height(),
        output.display()
    );
    Ok(())
}
