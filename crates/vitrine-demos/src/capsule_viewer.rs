//! Lit capsule spinning about three axes, with a light orbiting it.
//!
//! Controls: Left/Right orbit the light, Space pauses the spin, Escape quits.

use anyhow::{Context, Result};
use glam::{Vec3, Vec4};

use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::device::{Gpu, GpuInit};
use vitrine_engine::input::{InputState, Key};
use vitrine_engine::paint::Color;
use vitrine_engine::render::{GpuMesh, LitDraw, LitRenderer};
use vitrine_engine::scene::{camera, model, Camera, Light, Material, Rotation};
use vitrine_engine::window::{Runtime, RuntimeConfig};

#[derive(Debug, Clone)]
pub struct CapsuleViewerConfig {
    pub window: RuntimeConfig,
    pub divisions: u32,
    pub radius: f32,
    pub half_height: f32,
    pub material: Material,
    pub camera: Camera,
    pub light: Light,
    pub clear: Color,
    /// Spin rate about X, Y and Z in degrees per second.
    pub spin_rate: Vec3,
    /// Light orbit rate in degrees per second.
    pub light_rate: f32,
}

impl Default for CapsuleViewerConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig { title: "vitrine · capsule".to_string(), ..RuntimeConfig::default() },
            divisions: 16,
            radius: 1.0,
            half_height: 2.0,
            material: Material {
                ambient: Vec4::new(1.0, 0.2, 0.2, 1.0),
                diffuse: Vec4::new(1.0, 0.8, 0.0, 1.0),
                specular: Vec4::ONE,
                shininess: 100.0,
            },
            camera: Camera {
                fov_y: 45f32.to_radians(),
                z_near: 0.1,
                z_far: 1000.0,
                distance: 10.0,
                tilt_deg: 45.0,
            },
            light: Light::default(),
            clear: Color::BLACK,
            spin_rate: Vec3::new(100.0, 50.0, 50.0),
            light_rate: 100.0,
        }
    }
}

/// Keys the viewer reacts to, sampled once per frame.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Controls {
    pub orbit_left: bool,
    pub orbit_right: bool,
    pub paused: bool,
}

impl Controls {
    pub fn from_input(input: &InputState) -> Self {
        Self {
            orbit_left: input.key_down(Key::ArrowLeft),
            orbit_right: input.key_down(Key::ArrowRight),
            paused: input.key_down(Key::Space),
        }
    }
}

/// Simulation state: model rotation and light placement.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub rotation: Rotation,
    pub light: Light,
}

impl ViewerState {
    pub fn new(config: &CapsuleViewerConfig) -> Self {
        Self { rotation: Rotation::default(), light: config.light }
    }

    /// Advances by `dt` seconds. Angles are kept in `[0, 360)` degrees.
    pub fn advance(&mut self, controls: Controls, dt: f32, config: &CapsuleViewerConfig) {
        let mut orbit = 0.0;
        if controls.orbit_left {
            orbit -= config.light_rate * dt;
        }
        if controls.orbit_right {
            orbit += config.light_rate * dt;
        }
        self.light.orbit_deg = wrap_degrees(self.light.orbit_deg + orbit);

        if !controls.paused {
            let r = &mut self.rotation;
            r.x_deg = wrap_degrees(r.x_deg + config.spin_rate.x * dt);
            r.y_deg = wrap_degrees(r.y_deg + config.spin_rate.y * dt);
            r.z_deg = wrap_degrees(r.z_deg + config.spin_rate.z * dt);
        }
    }
}

fn wrap_degrees(deg: f32) -> f32 {
    deg.rem_euclid(360.0)
}

struct ViewerGpu {
    renderer: LitRenderer,
    mesh: GpuMesh,
}

pub struct CapsuleViewer {
    config: CapsuleViewerConfig,
    state: ViewerState,
    gpu: Option<ViewerGpu>,
}

impl CapsuleViewer {
    pub fn new(config: CapsuleViewerConfig) -> Self {
        let state = ViewerState::new(&config);
        Self { config, state, gpu: None }
    }
}

impl App for CapsuleViewer {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let c = &self.config;
        let mesh = vitrine_mesh::capsule(c.divisions, c.radius, c.half_height);
        log::info!(
            "capsule: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        let renderer = LitRenderer::new(gpu).context("lit renderer setup failed")?;
        let mesh = GpuMesh::upload_lit(gpu.device(), "capsule", &mesh)?;

        self.gpu = Some(ViewerGpu { renderer, mesh });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.state.advance(Controls::from_input(ctx.input), ctx.time.dt, &self.config);

        let Some(ViewerGpu { renderer, mesh }) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        let (state, config) = (&self.state, &self.config);

        ctx.render(config.clear, |rctx, target| {
            let projection = camera::projection_matrix(&config.camera, rctx.viewport.aspect());
            let draw = LitDraw {
                mesh: &*mesh,
                model_view: model::model_view(&state.rotation),
                material: config.material,
            };
            renderer.render(rctx, target, projection, &state.light, &[draw]);
        })
    }
}

/// Opens the viewer window and blocks until it closes.
pub fn run(config: CapsuleViewerConfig) -> Result<()> {
    let window = config.window.clone();
    Runtime::run(window, GpuInit::default(), CapsuleViewer::new(config))
}

#[cfg(test)]
mod tests {
    use vitrine_engine::input::{InputEvent, InputFrame, KeyState};

    use super::*;

    fn held(keys: &[Key]) -> InputState {
        let (mut input, mut frame) = (InputState::default(), InputFrame::default());
        input.apply_event(&mut frame, InputEvent::Focused(true));
        for &key in keys {
            input.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
        }
        input
    }

    fn step(controls: Controls, dt: f32) -> ViewerState {
        let config = CapsuleViewerConfig::default();
        let mut state = ViewerState::new(&config);
        state.advance(controls, dt, &config);
        state
    }

    // ── controls ──────────────────────────────────────────────────────────

    #[test]
    fn controls_follow_held_keys() {
        let c = Controls::from_input(&held(&[Key::ArrowLeft, Key::Space]));
        assert_eq!(c, Controls { orbit_left: true, orbit_right: false, paused: true });
        assert_eq!(Controls::from_input(&held(&[])), Controls::default());
    }

    // ── advance ───────────────────────────────────────────────────────────

    #[test]
    fn spins_at_configured_rates() {
        let s = step(Controls::default(), 0.5);
        assert_eq!(s.rotation, Rotation { x_deg: 50.0, y_deg: 25.0, z_deg: 25.0 });
        assert_eq!(s.light.orbit_deg, 0.0);
    }

    #[test]
    fn space_pauses_the_spin() {
        let s = step(Controls { paused: true, ..Controls::default() }, 0.5);
        assert_eq!(s.rotation, Rotation::default());
    }

    #[test]
    fn arrows_orbit_the_light() {
        let left = step(Controls { orbit_left: true, ..Controls::default() }, 0.25);
        let right = step(Controls { orbit_right: true, ..Controls::default() }, 0.25);
        assert_eq!(left.light.orbit_deg, 335.0);
        assert_eq!(right.light.orbit_deg, 25.0);
    }

    #[test]
    fn both_arrows_cancel_out() {
        let s = step(Controls { orbit_left: true, orbit_right: true, paused: true }, 0.1);
        assert_eq!(s.light.orbit_deg, 0.0);
    }

    #[test]
    fn angles_wrap_to_one_turn() {
        let config = CapsuleViewerConfig::default();
        let mut s = ViewerState::new(&config);
        for _ in 0..100 {
            s.advance(Controls { orbit_right: true, ..Controls::default() }, 0.25, &config);
        }
        let r = s.rotation;
        for deg in [r.x_deg, r.y_deg, r.z_deg, s.light.orbit_deg] {
            assert!((0.0..360.0).contains(&deg), "{deg}");
        }
    }

    #[test]
    fn spin_keeps_going_after_days_of_runtime() {
        let config = CapsuleViewerConfig::default();
        let mut s = ViewerState::new(&config);
        // Roughly four days of accumulated spin at 100°/s.
        s.rotation.x_deg = 34_560_000.0;
        s.advance(Controls::default(), 1.0 / 60.0, &config);
        let start = s.rotation.x_deg;

        let dt = 1.0 / 60.0;
        for _ in 0..60 {
            s.advance(Controls::default(), dt, &config);
        }

        let turned = (s.rotation.x_deg - start).rem_euclid(360.0);
        assert!((turned - 100.0).abs() < 1e-2, "turned {turned}");
    }

    #[test]
    fn light_orbits_while_paused() {
        let s = step(Controls { orbit_right: true, paused: true, ..Controls::default() }, 1.0);
        assert_eq!(s.light.orbit_deg, 100.0);
        assert_eq!(s.rotation, Rotation::default());
    }

    // ── config ────────────────────────────────────────────────────────────

    #[test]
    fn default_scene_matches_the_demo() {
        let c = CapsuleViewerConfig::default();
        assert_eq!((c.divisions, c.radius, c.half_height), (16, 1.0, 2.0));
        assert_eq!(c.material.shininess, 100.0);
        assert_eq!(c.light.distance, 5.0);
        assert_eq!(c.camera.tilt_deg, 45.0);
    }
}
