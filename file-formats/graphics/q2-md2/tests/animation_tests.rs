//! Integration tests for interpolation and playback

mod common;

use common::{Md2Builder, stand_run_model};
use glam::Vec3;
use pretty_assertions::assert_eq;
use q2_md2::animation::{AnimationPlayer, interpolate, interpolate_into};
use q2_md2::{Md2Error, Md2Model};

fn two_frame_model() -> Md2Model {
    let data = Md2Builder::new(3)
        .tex_coord(0, 0)
        .tex_coord(64, 32)
        .triangle([0, 1, 2], [0, 1, 1])
        .triangle([2, 1, 0], [1, 1, 0])
        .frame(
            "walk1",
            [1.0, 1.0, 1.0],
            [0.0, 0.0, 0.0],
            &[[0, 0, 0], [10, 0, 0], [0, 10, 0]],
        )
        .frame(
            "walk2",
            [2.0, 2.0, 2.0],
            [1.0, -1.0, 0.0],
            &[[0, 0, 0], [10, 0, 0], [0, 10, 10]],
        )
        .build();
    Md2Model::from_bytes(&data).unwrap()
}

fn positions(model: &Md2Model, a: usize, b: usize, t: f32, scale: f32) -> Vec<Vec3> {
    interpolate(model, a, b, t, scale)
        .unwrap()
        .iter()
        .map(|v| v.position)
        .collect()
}

#[test]
fn test_pose_has_three_corners_per_triangle() {
    let model = two_frame_model();
    let pose = interpolate(&model, 0, 1, 0.5, 1.0).unwrap();
    assert_eq!(pose.len(), 6);
}

#[test]
fn test_blend_endpoints() {
    let model = two_frame_model();

    // t = 0 reproduces frame A regardless of B
    assert_eq!(
        positions(&model, 0, 1, 0.0, 1.0),
        positions(&model, 0, 0, 0.7, 1.0)
    );

    // t = 1 reproduces frame B decompressed directly
    let frame_b = model.frame(1).unwrap();
    let expected: Vec<Vec3> = model
        .triangles()
        .iter()
        .flat_map(|tri| tri.vertex)
        .map(|v| frame_b.decompress(usize::from(v)).unwrap())
        .collect();
    assert_eq!(positions(&model, 0, 1, 1.0, 1.0), expected);
}

#[test]
fn test_midpoint_and_scale() {
    let model = two_frame_model();
    let pose = positions(&model, 0, 1, 0.5, 0.1);

    // Vertex 1: (10, 0, 0) blended with (21, -1, 0)
    let expected = Vec3::new(15.5, -0.5, 0.0) * 0.1;
    assert!(pose[1].abs_diff_eq(expected, 1e-5));
}

#[test]
fn test_tex_coords_are_normalized() {
    let model = two_frame_model();
    let pose = interpolate(&model, 0, 1, 0.25, 1.0).unwrap();
    assert_eq!(pose[0].tex_coord, glam::Vec2::new(0.0, 1.0));
    assert_eq!(pose[1].tex_coord, glam::Vec2::new(0.25, 0.75));
}

#[test]
fn test_interpolate_into_reuses_buffer() {
    let model = two_frame_model();
    let mut pose = interpolate(&model, 0, 1, 0.0, 1.0).unwrap();
    interpolate_into(&model, 1, 1, 0.0, 1.0, &mut pose).unwrap();
    assert_eq!(pose.len(), 6);
    assert_eq!(pose, interpolate(&model, 1, 0, 0.0, 1.0).unwrap());
}

#[test]
fn test_frame_out_of_range() {
    let model = two_frame_model();
    assert!(matches!(
        interpolate(&model, 0, 2, 0.5, 1.0),
        Err(Md2Error::FrameOutOfRange { index: 2, count: 2 })
    ));
}

#[test]
fn test_player_binds_to_first_clip() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let player = AnimationPlayer::with_model(&model);

    assert!(player.is_bound());
    assert_eq!(player.clip().map(|c| c.name.as_str()), Some("run"));
    assert_eq!(player.current_frame(), 3);
    assert_eq!(player.next_frame(), 3);
    assert_eq!(player.blend(), 0.0);
}

#[test]
fn test_tick_cycles_through_clip() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::new();
    player.bind(&model);
    assert!(player.select_clip("stand"));

    // The player still sits on frame 3, outside "stand"; the first tick
    // brings it back to the clip start before advancing
    player.tick(0.0);
    assert_eq!(player.current_frame(), 0);

    let mut frames = Vec::new();
    for _ in 0..7 {
        player.tick(1.0);
        frames.push(player.current_frame());
    }
    assert_eq!(frames, [1, 2, 0, 1, 2, 0, 1]);
    assert_eq!(player.next_frame(), 2);
}

#[test]
fn test_partial_ticks_accumulate() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);

    player.tick(0.4);
    player.tick(0.4);
    assert_eq!(player.current_frame(), 3);
    assert!((player.blend() - 0.8).abs() < 1e-6);

    player.tick(0.4);
    assert_eq!(player.current_frame(), 4);
    assert_eq!(player.next_frame(), 3);
    assert_eq!(player.blend(), 0.0);
}

#[test]
fn test_advance_uses_stored_step() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);
    player.set_step(0.5);

    player.advance();
    player.advance();
    assert_eq!(player.current_frame(), 4);
    assert_eq!(player.step(), 0.5);
}

#[test]
fn test_unknown_clip_keeps_state() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);
    player.tick(1.0);

    assert!(!player.select_clip("jump"));
    assert_eq!(player.clip().map(|c| c.name.as_str()), Some("run"));
    assert_eq!(player.current_frame(), 4);
}

#[test]
fn test_clip_switch_keeps_frame_inside_new_clip() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);
    assert!(player.select_clip("stand"));
    player.tick(0.5);
    assert_eq!(player.current_frame(), 0);
    assert_eq!(player.next_frame(), 1);

    // Switching to a clip that contains the current frame keeps it
    assert!(player.select_clip("stand"));
    player.tick(0.25);
    assert_eq!(player.current_frame(), 0);
    assert_eq!(player.blend(), 0.75);
}

#[test]
fn test_unbound_player_is_inert() {
    let mut player = AnimationPlayer::new();
    player.tick(5.0);
    assert!(!player.select_clip("stand"));
    assert_eq!(player.current_frame(), 0);
    assert_eq!(player.blend(), 0.0);
    assert!(player.pose(1.0).unwrap().is_none());
}

#[test]
fn test_player_without_frames() {
    let model = Md2Model::from_bytes(&Md2Builder::new(0).build()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);
    player.tick(1.0);
    assert!(player.clip().is_none());
    assert!(player.pose(1.0).unwrap().is_none());
}

#[test]
fn test_player_pose_matches_interpolation() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut player = AnimationPlayer::with_model(&model);
    player.tick(1.0);
    player.tick(0.5);

    let pose = player.pose(0.1).unwrap().unwrap();
    assert_eq!(pose, interpolate(&model, 4, 3, 0.5, 0.1).unwrap());
}

#[test]
fn test_players_share_a_model() {
    let model = Md2Model::from_bytes(&stand_run_model()).unwrap();
    let mut first = AnimationPlayer::with_model(&model);
    let mut second = AnimationPlayer::with_model(&model);

    first.tick(1.0);
    assert!(second.select_clip("stand"));
    second.tick(1.0);

    assert_eq!(first.current_frame(), 4);
    assert_eq!(second.current_frame(), 1);
}
