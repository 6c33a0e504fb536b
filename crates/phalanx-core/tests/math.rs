use phalanx_core::{heading, normalize_degrees, signed_angle, TickContext, Vec2};

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4
}

#[test]
fn normalize_degrees_wraps_into_half_open_range() {
    assert!(approx(normalize_degrees(0.0), 0.0));
    assert!(approx(normalize_degrees(180.0), 180.0));
    assert!(approx(normalize_degrees(-180.0), 180.0));
    assert!(approx(normalize_degrees(190.0), -170.0));
    assert!(approx(normalize_degrees(-190.0), 170.0));
    assert!(approx(normalize_degrees(720.0 + 45.0), 45.0));

    for i in -20..20 {
        let a = normalize_degrees(i as f32 * 97.0);
        assert!(a > -180.0 && a <= 180.0, "{a}");
    }
}

#[test]
fn heading_zero_points_up_the_screen() {
    let up = heading(0.0);
    assert!(approx(up.x, 0.0) && approx(up.y, -1.0));
    let right = heading(90.0);
    assert!(approx(right.x, 1.0) && approx(right.y, 0.0));
}

#[test]
fn signed_angle_picks_the_shorter_turn() {
    let up = heading(0.0);
    assert!(approx(signed_angle(up, Vec2::new(1.0, 0.0)), 90.0));
    assert!(approx(signed_angle(up, Vec2::new(-1.0, 0.0)), -90.0));
    assert!(approx(signed_angle(up, Vec2::new(0.0, 1.0)).abs(), 180.0));
    assert_eq!(signed_angle(up, Vec2::ZERO), 0.0);
}

#[test]
fn vector_helpers_handle_zero_length() {
    assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    assert_eq!(Vec2::ZERO.scale_to_length(5.0), Vec2::ZERO);
    let v = Vec2::new(30.0, 40.0).clamp_length(5.0);
    assert!(approx(v.length(), 5.0));
}

#[test]
fn clamped_tick_limits_frame_time() {
    let ctx = TickContext::clamped(3, 0.5, 0.1);
    assert_eq!(ctx.tick, 3);
    assert!(approx(ctx.dt_seconds, 0.1));
    assert_eq!(TickContext::new(0, -1.0).dt_seconds, 0.0);
}
