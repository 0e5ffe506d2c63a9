use bounce_core::bounce::BounceConfig;
use bounce_core::config::SceneConfig;
use bounce_core::math::RandomStream;
use bounce_core::render::{RenderConfig, RenderSettings};
use bounce_core::scene::{SceneContext, SceneError};
use bounce_core::shape_field::{ShapeField, ShapeFieldConfig, ShapeKind};
use bounce_core::svg::LoadState;
use bounce_core::ui::IdleTimer;
use glam::Vec3;

const RECT_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect x="10" y="20" width="100" height="50"/></svg>"#;

fn scene(seed: u32) -> SceneContext {
    SceneContext::new(SceneConfig::default(), seed, 1600.0, 900.0, 1.5)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_scene_defaults() {
    let s = scene(1);
    assert!((s.camera.aspect - 1600.0 / 900.0).abs() < 1e-6);
    assert_eq!(s.camera.fov_deg, 50.0);
    assert_eq!(s.lighting.ambient, 0.7);
    assert_eq!(s.lighting.directional, 5.0);
    assert_eq!(s.render.pixel_size, 0.3);
    assert_eq!(s.render.pixel_ratio, 1.0, "initial pixel ratio is capped at 1");
    assert_eq!(s.shapes().len(), 60);
    assert_eq!(s.frame(), 0);
    assert_eq!(SceneConfig::default().camera_position, Vec3::new(0.0, 0.0, 50.0));
}

#[test]
fn test_same_seed_same_scene() {
    let a = scene(42);
    let b = scene(42);
    let pa: Vec<Vec3> = a.shapes().iter().map(|(_, s)| s.position).collect();
    let pb: Vec<Vec3> = b.shapes().iter().map(|(_, s)| s.position).collect();
    assert_eq!(pa, pb);

    let c = scene(43);
    let pc: Vec<Vec3> = c.shapes().iter().map(|(_, s)| s.position).collect();
    assert_ne!(pa, pc);
}

// ---------------------------------------------------------------------------
// Shape field
// ---------------------------------------------------------------------------

#[test]
fn test_shape_field_placement_ranges() {
    let config = ShapeFieldConfig::default();
    let field = ShapeField::scatter(&config, &mut RandomStream::new(7));

    let tori = field.iter().filter(|(_, s)| s.kind == ShapeKind::Torus).count();
    let boxes = field.iter().filter(|(_, s)| s.kind == ShapeKind::Box).count();
    assert_eq!((tori, boxes), (30, 30));

    for (_, s) in field.iter() {
        assert!(s.position.x >= -175.0 && s.position.x < 175.0, "x {}", s.position.x);
        assert!(s.position.y >= -175.0 && s.position.y < 175.0, "y {}", s.position.y);
        assert!(s.position.z <= -100.0 && s.position.z > -450.0, "z {}", s.position.z);
        assert!(s.scale >= 0.3 && s.scale < 1.3, "scale {}", s.scale);
        assert!(s.rotation.x >= 0.0 && s.rotation.x < std::f32::consts::PI);
        assert_eq!(s.rotation.z, 0.0);
        for axis in 0..3 {
            let v = s.rotation_speed[axis];
            assert!(v >= -1.0 && v < 1.0, "speed {}", v);
        }
    }
}

#[test]
fn test_shape_field_rotation_step() {
    let mut field = ShapeField::scatter(&ShapeFieldConfig::default(), &mut RandomStream::new(3));
    let before: Vec<_> = field.iter().map(|(k, s)| (k, *s)).collect();
    field.rotate();
    for (key, old) in before {
        let new = field.get(key).unwrap();
        let expected = old.rotation + old.rotation_speed * 0.005;
        assert!((new.rotation - expected).length() < 1e-6);
        assert_eq!(new.position, old.position);
    }
}

#[test]
fn test_shape_keys_stay_valid_after_removal() {
    let mut field = ShapeField::scatter(&ShapeFieldConfig::default(), &mut RandomStream::new(3));
    let keys: Vec<_> = field.iter().map(|(k, _)| k).collect();
    let removed = field.remove(keys[0]).unwrap();
    assert_eq!(removed.kind, ShapeKind::Torus);
    assert!(field.get(keys[0]).is_none());
    assert!(field.get(keys[1]).is_some());
    assert_eq!(field.len(), 59);
}

#[test]
fn test_tick_rotates_shapes() {
    let mut s = scene(5);
    let before: Vec<Vec3> = s.shapes().iter().map(|(_, sh)| sh.rotation).collect();
    s.tick(0.016);
    let after: Vec<Vec3> = s.shapes().iter().map(|(_, sh)| sh.rotation).collect();
    assert_ne!(before, after);
    assert_eq!(s.frame(), 1);
}

// ---------------------------------------------------------------------------
// Logo lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_logo_lifecycle_ready() {
    let mut s = scene(1);
    let key = s.add_logo("hejare.svg");
    assert_eq!(s.logo(key).unwrap().state(), &LoadState::Unloaded);
    assert_eq!(s.logo(key).unwrap().path(), "hejare.svg");

    s.begin_load(key).unwrap();
    assert_eq!(s.logo(key).unwrap().state(), &LoadState::Loading);

    assert_eq!(s.finish_load(key, RECT_SVG), Ok(true));
    let logo = s.logo(key).unwrap();
    assert!(logo.is_ready());
    assert!((logo.size() - Vec3::new(40.0, 20.0, 2.0)).length() < 1e-3);
    assert!(logo.mesh().is_some_and(|m| !m.is_empty()));
    assert_eq!(logo.transform.scale, Vec3::new(1.0, -1.0, 1.0));
}

#[test]
fn test_logo_invalid_transitions() {
    let mut s = scene(1);
    let key = s.add_logo("a.svg");

    assert_eq!(
        s.finish_load(key, RECT_SVG),
        Err(SceneError::InvalidTransition { from: "Unloaded", to: "Ready" })
    );
    assert!(s.fail_load(key, "nope").is_err());

    s.begin_load(key).unwrap();
    assert_eq!(
        s.begin_load(key),
        Err(SceneError::InvalidTransition { from: "Loading", to: "Loading" })
    );

    s.finish_load(key, RECT_SVG).unwrap();
    assert!(s.begin_load(key).is_err(), "no reloading a ready logo");
}

#[test]
fn test_logo_parse_failure_is_not_fatal() {
    let mut s = scene(1);
    let key = s.add_logo("broken.svg");
    s.begin_load(key).unwrap();

    assert_eq!(s.finish_load(key, "<not-svg"), Ok(false));
    let logo = s.logo(key).unwrap();
    assert!(matches!(logo.state(), LoadState::Failed(_)));
    assert_eq!(logo.size(), Vec3::ZERO);
    assert!(logo.mesh().is_none());

    // Failed logos are not retried.
    assert!(s.begin_load(key).is_err());
}

#[test]
fn test_logo_fetch_failure() {
    let mut s = scene(1);
    let key = s.add_logo("missing.svg");
    s.begin_load(key).unwrap();
    s.fail_load(key, "404").unwrap();
    assert_eq!(s.logo(key).unwrap().state(), &LoadState::Failed("404".into()));
}

#[test]
fn test_unknown_logo() {
    let mut s = scene(1);
    let key = s.add_logo("a.svg");
    s.remove_logo(key).unwrap();
    assert_eq!(s.begin_load(key), Err(SceneError::UnknownLogo));
    assert_eq!(s.enable_bounce(key, BounceConfig::default()), Err(SceneError::UnknownLogo));
    assert!(s.logo(key).is_none());
}

#[test]
fn test_logo_random_parameters_in_range() {
    let mut s = scene(9);
    for i in 0..20 {
        let key = s.add_logo(&format!("{i}.svg"));
        let logo = s.logo(key).unwrap();
        let speed = logo.rotation_speed();
        let freq = logo.color_frequency();
        for axis in 0..3 {
            assert!(speed[axis] >= -0.8 && speed[axis] < 0.8);
            assert!(freq[axis] >= 0.2 && freq[axis] < 0.8);
        }
    }
}

#[test]
fn test_logo_animation() {
    let mut s = scene(2);
    let key = s.add_logo("a.svg");

    // Not animated until ready.
    s.tick(3.0);
    assert_eq!(s.logo(key).unwrap().transform.rotation, Vec3::ZERO);

    s.begin_load(key).unwrap();
    s.finish_load(key, RECT_SVG).unwrap();
    s.tick(3.0);

    let logo = s.logo(key).unwrap();
    assert!((logo.transform.rotation - logo.rotation_speed() * 3.0).length() < 1e-5);
    let f = logo.color_frequency() * 3.0;
    let expected = Vec3::new(f.x.sin(), f.y.sin(), f.z.sin()) * 0.5 + 0.5;
    assert!((logo.color - expected).length() < 1e-5);
    assert!(logo.color.min_element() >= 0.0 && logo.color.max_element() <= 1.0);
}

// ---------------------------------------------------------------------------
// Bounce integration
// ---------------------------------------------------------------------------

#[test]
fn test_bounce_runs_only_when_ready() {
    let mut s = scene(1);
    let key = s.add_logo("a.svg");
    s.enable_default_bounce(key).unwrap();

    let steps = s.tick(0.0);
    assert!(steps.is_empty());
    assert_eq!(s.logo(key).unwrap().transform.position, Vec3::ZERO);

    s.begin_load(key).unwrap();
    s.finish_load(key, RECT_SVG).unwrap();

    let steps = s.tick(0.016);
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].0, key);
    let pos = s.logo(key).unwrap().transform.position;
    assert!(pos.z < -10.0, "pushed behind the near wall, z = {}", pos.z);
}

#[test]
fn test_logos_without_bounce_stay_put() {
    let mut s = scene(1);
    let bouncing = s.add_logo("hejare.svg");
    let still = s.add_logo("arcade.svg");
    for key in [bouncing, still] {
        s.begin_load(key).unwrap();
        s.finish_load(key, RECT_SVG).unwrap();
    }
    s.enable_default_bounce(bouncing).unwrap();

    for i in 0..100 {
        s.tick(i as f32 * 0.016);
    }
    assert_ne!(s.logo(bouncing).unwrap().transform.position, Vec3::ZERO);
    assert_eq!(s.logo(still).unwrap().transform.position, Vec3::ZERO);
    assert!(s.bounce(still).is_none());
}

#[test]
fn test_bounced_logo_stays_in_frustum() {
    let mut s = scene(4);
    let key = s.add_logo("small.svg");
    s.begin_load(key).unwrap();
    s.finish_load(key, RECT_SVG).unwrap();
    s.enable_bounce(
        key,
        BounceConfig {
            velocity: Vec3::new(0.8, -0.6, -1.5),
            ..BounceConfig::default()
        },
    )
    .unwrap();

    let size = s.logo(key).unwrap().size();
    for i in 0..3000 {
        let steps = s.tick(i as f32 / 60.0);
        let b = steps[0].1.bounds;
        let p = s.logo(key).unwrap().transform.position;
        assert!(p.z - size.z / 2.0 >= b.far - 1e-3 && p.z + size.z / 2.0 <= b.near + 1e-3);
        if b.width() > size.x {
            assert!(p.x - size.x / 2.0 >= b.left - 1e-3 && p.x + size.x / 2.0 <= b.right + 1e-3);
        }
    }
}

#[test]
fn test_disable_bounce() {
    let mut s = scene(1);
    let key = s.add_logo("a.svg");
    s.enable_default_bounce(key).unwrap();
    assert!(s.bounce(key).is_some());
    assert!(s.disable_bounce(key).is_some());
    assert!(s.bounce(key).is_none());
}

#[test]
fn test_debug_wireframe_uses_bounce_region() {
    let mut s = scene(1);
    let key = s.add_logo("a.svg");
    s.enable_bounce(
        key,
        BounceConfig {
            near_plane_offset: 5.0,
            box_depth: 50.0,
            ..BounceConfig::default()
        },
    )
    .unwrap();

    let custom = s.debug_wireframe(Some(key));
    assert!((custom.vertices[0].position[2] + 5.01).abs() < 1e-4);
    assert!((custom.vertices[4].position[2] + 55.01).abs() < 1e-3);

    let default = s.debug_wireframe(None);
    assert!((default.vertices[0].position[2] + 10.01).abs() < 1e-4);
}

// ---------------------------------------------------------------------------
// Resize, render settings, UI
// ---------------------------------------------------------------------------

#[test]
fn test_resize() {
    let mut s = scene(1);
    s.resize(1000.0, 500.0, 3.0);
    assert_eq!(s.camera.aspect, 2.0);
    assert_eq!(s.render.pixel_ratio, 2.0, "pixel ratio cap after resize is 2");
    assert_eq!((s.render.width, s.render.height), (1000.0, 500.0));
}

#[test]
fn test_render_settings_caps() {
    let config = RenderConfig::default();
    let r = RenderSettings::new(config, 800.0, 600.0, 0.5);
    assert_eq!(r.pixel_ratio, 0.5);
    let mut r = RenderSettings::new(config, 800.0, 600.0, 2.5);
    assert_eq!(r.pixel_ratio, 1.0);
    r.resize(800.0, 600.0, 1.5);
    assert_eq!(r.pixel_ratio, 1.5);
}

#[test]
fn test_idle_timer() {
    let mut t = IdleTimer::default();
    assert_eq!(t.hide_after_ms(), 2000.0);
    assert!(!t.is_visible(0.0), "hidden before any pointer movement");

    t.pointer_moved(1000.0);
    assert!(t.is_visible(1000.0));
    assert!(t.is_visible(2999.0));
    assert!(!t.is_visible(3000.0));

    t.pointer_moved(2500.0);
    assert!(t.is_visible(3000.0), "movement restarts the timer");
}

#[test]
fn test_scene_fullscreen_button() {
    let mut s = scene(1);
    assert!(!s.fullscreen_button_visible(10.0));
    s.pointer_moved(10.0);
    assert!(s.fullscreen_button_visible(500.0));
    assert!(!s.fullscreen_button_visible(2010.0));
}
