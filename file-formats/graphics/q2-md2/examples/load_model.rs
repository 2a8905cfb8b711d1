use q2_md2::Md2Model;
use q2_md2::animation::AnimationPlayer;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        println!("Usage: {} <tris.md2> [clip]", args[0]);
        println!("\nExample: Print the clips of an MD2 model and play one");
        return;
    }

    let model = match Md2Model::load(&args[1]) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("✗ Failed to load MD2 file '{}': {e}", args[1]);
            return;
        }
    };

    let header = model.header();
    println!("✓ Loaded MD2 file: {}", args[1]);
    println!("  Skin size: {}x{}", header.skin_width, header.skin_height);
    println!("  Vertices: {}", header.num_vertices);
    println!("  Triangles: {}", header.num_tris);
    println!("  Frames: {}", header.num_frames);

    for skin in model.skins() {
        println!("  Skin: {}", skin.name);
    }
    for clip in model.clips() {
        println!("  Clip {:<12} frames {:?}", clip.name, clip.frames());
    }

    let mut player = AnimationPlayer::with_model(&model);
    if let Some(name) = args.get(2) {
        if !player.select_clip(name) {
            eprintln!("✗ No clip named '{name}'");
            return;
        }
    }

    // One second at 7 frames per second and 10 updates per second
    player.set_step(0.7);
    for _ in 0..10 {
        player.advance();
        println!(
            "  frame {} -> {} blend {:.1}",
            player.current_frame(),
            player.next_frame(),
            player.blend()
        );
    }
}
