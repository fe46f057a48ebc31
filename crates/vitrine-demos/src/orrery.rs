//! Solar system orrery: flat-colored spheres orbiting in a parent → child
//! hierarchy. Escape quits.

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use anyhow::{Context, Result};
use rand::Rng;

use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::device::{Gpu, GpuInit};
use vitrine_engine::input::Key;
use vitrine_engine::paint::Color;
use vitrine_engine::render::{FlatDraw, FlatRenderer, GpuMesh};
use vitrine_engine::scene::{camera, Body, BodyId, Camera, OrbitSystem};
use vitrine_engine::window::{Runtime, RuntimeConfig};

/// Sphere resolution class of a body.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Detail {
    Sun,
    Large,
    Small,
}

impl Detail {
    pub const fn divisions(self) -> u32 {
        match self {
            Detail::Sun => 12,
            Detail::Large => 8,
            Detail::Small => 6,
        }
    }
}

/// Static description of one body.
///
/// `revolution` and `rotation` are periods: a body covers π radians of orbit
/// (or spin) in that many seconds.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    pub parent: Option<&'static str>,
    pub color: [u8; 3],
    pub size: f32,
    pub distance: f32,
    pub revolution: f32,
    pub rotation: f32,
    pub detail: Detail,
}

const YEAR: f32 = 365.26;

pub const SOLAR_SYSTEM: [BodySpec; 11] = [
    BodySpec {
        name: "sun",
        parent: None,
        color: [246, 215, 82],
        size: 696_340.0 / 15.0,
        distance: 0.0,
        revolution: 1.0e9,
        rotation: 27.0,
        detail: Detail::Sun,
    },
    BodySpec {
        name: "mercury",
        parent: Some("sun"),
        color: [203, 169, 131],
        size: 2439.7,
        distance: 64_902_000.0 / 500.0,
        revolution: 87.97,
        rotation: 58.6,
        detail: Detail::Small,
    },
    BodySpec {
        name: "venus",
        parent: Some("sun"),
        color: [171, 109, 43],
        size: 6051.8,
        distance: 107_730_000.0 / 500.0,
        revolution: 224.7,
        rotation: 243.0,
        detail: Detail::Small,
    },
    BodySpec {
        name: "earth",
        parent: Some("sun"),
        color: [15, 34, 99],
        size: 6371.0,
        distance: 147_530_000.0 / 500.0,
        revolution: YEAR,
        rotation: 0.99,
        detail: Detail::Small,
    },
    BodySpec {
        name: "moon",
        parent: Some("earth"),
        color: [70, 86, 82],
        size: 1737.1,
        distance: 384_400.0 / 20.0,
        revolution: 27.322,
        rotation: 27.0,
        detail: Detail::Small,
    },
    BodySpec {
        name: "mars",
        parent: Some("sun"),
        color: [130, 119, 78],
        size: 3389.5,
        distance: 221_050_000.0 / 600.0,
        revolution: 1.88 * YEAR,
        rotation: 1.03,
        detail: Detail::Small,
    },
    BodySpec {
        name: "jupiter",
        parent: Some("sun"),
        color: [180, 135, 90],
        size: 69_911.0 / 2.0,
        distance: 764_390_000.0 / 1200.0,
        revolution: 11.86 * YEAR,
        rotation: 0.41,
        detail: Detail::Large,
    },
    BodySpec {
        name: "saturn",
        parent: Some("sun"),
        color: [242, 201, 131],
        size: 58_232.0 / 2.0,
        distance: 1_492_000_000.0 / 1400.0,
        revolution: 29.46 * YEAR,
        rotation: 0.45,
        detail: Detail::Large,
    },
    BodySpec {
        name: "uranus",
        parent: Some("sun"),
        color: [172, 214, 238],
        size: 25_362.0 / 1.5,
        distance: 2_958_200_000.0 / 1800.0,
        revolution: 84.01 * YEAR,
        rotation: 0.72,
        detail: Detail::Large,
    },
    BodySpec {
        name: "neptune",
        parent: Some("sun"),
        color: [112, 139, 186],
        size: 24_622.0 / 1.5,
        distance: 4_476_100_000.0 / 2200.0,
        revolution: 164.79 * YEAR,
        rotation: 0.67,
        detail: Detail::Large,
    },
    BodySpec {
        name: "pluto",
        parent: Some("sun"),
        color: [253, 253, 253],
        size: 6371.0,
        distance: 5_900_000_000.0 / 2600.0,
        revolution: 248.59 * YEAR,
        rotation: 6.39,
        detail: Detail::Small,
    },
];

#[derive(Debug, Clone)]
pub struct OrreryConfig {
    pub window: RuntimeConfig,
    pub bodies: Vec<BodySpec>,
    pub camera: Camera,
    pub clear: Color,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig { title: "vitrine · orrery".to_string(), ..RuntimeConfig::default() },
            bodies: SOLAR_SYSTEM.to_vec(),
            camera: Camera {
                fov_y: 45f32.to_radians(),
                z_near: 1000.0,
                z_far: 1.0e8,
                distance: 600_000.0,
                tilt_deg: 20.0,
            },
            clear: Color::BLACK,
        }
    }
}

/// Orbit hierarchy plus the per-body periods driving it.
#[derive(Debug, Clone)]
pub struct OrreryState {
    pub system: OrbitSystem,
    /// `(id, spec)` in table order, parents before children.
    pub bodies: Vec<(BodyId, BodySpec)>,
}

impl OrreryState {
    /// Builds the hierarchy with random initial orbit and spin angles in `[0, π)`.
    ///
    /// Fails if a parent is named before it is defined or not at all.
    pub fn new(specs: &[BodySpec], rng: &mut impl Rng) -> Result<Self> {
        let mut system = OrbitSystem::new();
        let mut by_name: HashMap<&str, BodyId> = HashMap::new();
        let mut bodies = Vec::with_capacity(specs.len());

        for spec in specs {
            let parent = match spec.parent {
                Some(name) => Some(
                    *by_name
                        .get(name)
                        .with_context(|| format!("`{}` orbits unknown body `{name}`", spec.name))?,
                ),
                None => None,
            };

            let id = system.add(Body {
                parent,
                position: rng.random_range(0.0..PI),
                distance: spec.distance,
                angle: rng.random_range(0.0..PI),
                size: spec.size,
            });
            by_name.insert(spec.name, id);
            bodies.push((id, *spec));
        }

        Ok(Self { system, bodies })
    }

    /// Advances every orbit and spin by `dt` seconds.
    ///
    /// Angles stay in `[0, 2π)` so small steps keep their f32 precision.
    pub fn advance(&mut self, dt: f32) {
        for (id, spec) in &self.bodies {
            let body = self.system.body_mut(*id);
            body.position = (body.position + dt * PI / spec.revolution).rem_euclid(TAU);
            body.angle = (body.angle + dt * PI / spec.rotation).rem_euclid(TAU);
        }
    }
}

struct OrreryGpu {
    renderer: FlatRenderer,
    spheres: HashMap<Detail, GpuMesh>,
}

pub struct Orrery {
    config: OrreryConfig,
    state: OrreryState,
    gpu: Option<OrreryGpu>,
    draws: Vec<(BodyId, Detail, Color)>,
}

impl Orrery {
    pub fn new(config: OrreryConfig, rng: &mut impl Rng) -> Result<Self> {
        let state = OrreryState::new(&config.bodies, rng)?;
        let draws = state
            .bodies
            .iter()
            .map(|(id, spec)| (*id, spec.detail, Color::from(spec.color)))
            .collect();
        Ok(Self { config, state, gpu: None, draws })
    }
}

impl App for Orrery {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let renderer = FlatRenderer::new(gpu).context("flat renderer setup failed")?;

        let spheres = [Detail::Sun, Detail::Large, Detail::Small]
            .into_iter()
            .map(|detail| {
                let mesh = vitrine_mesh::sphere(detail.divisions());
                let label = format!("sphere {detail:?}");
                (detail, GpuMesh::upload_flat(gpu.device(), &label, &mesh))
            })
            .collect();

        log::info!("orrery: {} bodies", self.state.bodies.len());
        self.gpu = Some(OrreryGpu { renderer, spheres });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.state.advance(ctx.time.dt);

        let Some(OrreryGpu { renderer, spheres }) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        let (state, config, bodies) = (&self.state, &self.config, &self.draws);

        ctx.render(config.clear, |rctx, target| {
            let projection = camera::projection_matrix(&config.camera, rctx.viewport.aspect());
            let draws: Vec<FlatDraw<'_>> = bodies
                .iter()
                .filter_map(|&(id, detail, color)| {
                    Some(FlatDraw {
                        mesh: spheres.get(&detail)?,
                        model_view: state.system.draw_transform(id),
                        color,
                    })
                })
                .collect();
            renderer.render(rctx, target, projection, &draws);
        })
    }
}

/// Opens the orrery window and blocks until it closes.
pub fn run(config: OrreryConfig) -> Result<()> {
    let window = config.window.clone();
    let app = Orrery::new(config, &mut rand::rng())?;
    Runtime::run(window, GpuInit::default(), app)
}
