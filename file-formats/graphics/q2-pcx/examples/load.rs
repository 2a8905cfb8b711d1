use q2_pcx::{convert::save_image, parser::load_pcx};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <input.pcx> [output.png]", args[0]);
        println!("\nExample: Convert a PCX skin to PNG");
        return;
    }

    let pcx_filename = &args[1];
    let output_filename = args.get(2).map(String::as_str).unwrap_or("output.png");

    match load_pcx(pcx_filename) {
        Ok(pcx) => {
            println!("✓ Loaded PCX file: {pcx_filename}");
            println!("  Version: {}", pcx.header.version);
            println!(
                "  Dimensions: {}x{}",
                pcx.image.width(),
                pcx.image.height()
            );
            for warning in &pcx.warnings {
                println!("  Warning: {warning}");
            }

            match save_image(&pcx.image, output_filename) {
                Ok(()) => println!("✓ Saved as: {output_filename}"),
                Err(e) => eprintln!("✗ Failed to save image: {e}"),
            }
        }
        Err(e) => {
            eprintln!("✗ Failed to load PCX file '{pcx_filename}': {e}");
            eprintln!("\nTip: Make sure the file exists and is an 8-bit palettized PCX image.");
        }
    }
}
