//! Two-colored logo spinning about X, Y and Z at once. Escape quits.

use anyhow::{Context, Result};
use glam::{Mat4, Vec2};

use vitrine_engine::core::{App, AppControl, FrameCtx};
use vitrine_engine::device::{Gpu, GpuInit};
use vitrine_engine::input::Key;
use vitrine_engine::paint::Color;
use vitrine_engine::render::{FlatDraw, FlatRenderer, GpuMesh};
use vitrine_engine::scene::{model, Rotation};
use vitrine_engine::window::{Runtime, RuntimeConfig};

/// Black strip outline, in design units.
pub const BLACK_OUTLINE: [[f32; 2]; 19] = [
    [53.044, -107.604],
    [40.431, -59.694],
    [-54.993, -108.444],
    [-31.556, -58.444],
    [-162.511, -108.444],
    [-102.511, -58.444],
    [-165.434, -105.521],
    [-105.434, -55.521],
    [-168.358, -98.771],
    [-108.357, -49.211],
    [-122.045, 130.556],
    [-81.431, 81.929],
    [-115.395, 137.306],
    [-76.176, 87.056],
    [-110.933, 139.556],
    [-35.692, 89.351],
    [-45.145, 139.556],
    [2.428, 90.851],
    [20.643, 138.063],
];

/// Yellow strip outline, in design units.
pub const YELLOW_OUTLINE: [[f32; 2]; 38] = [
    [192.392, 138.758],
    [183.421, 90.804],
    [65.532, 138.938],
    [79.897, 88.753],
    [54.593, 138.633],
    [70.861, 86.892],
    [42.960, 137.485],
    [64.083, 81.002],
    [36.304, 133.668],
    [59.131, 67.519],
    [31.336, 126.423],
    [54.643, 50.346],
    [1.730, 50.725],
    [56.257, 45.089],
    [-4.551, 43.805],
    [61.248, 41.514],
    [-8.706, 41.054],
    [223.407, 39.721],
    [-78.271, 38.695],
    [215.126, -8.946],
    [-87.357, -9.446],
    [101.923, -11.706],
    [32.143, -10.548],
    [98.161, -14.789],
    [37.002, -12.623],
    [96.643, -19.532],
    [41.509, -15.844],
    [106.131, -51.540],
    [44.156, -18.823],
    [110.527, -56.171],
    [55.196, -58.007],
    [120.893, -58.679],
    [66.522, -98.387],
    [134.893, -59.268],
    [71.226, -103.942],
    [153.643, -60.867],
    [77.201, -106.952],
    [144.111, -107.497],
];

#[derive(Debug, Clone)]
pub struct LogoConfig {
    pub window: RuntimeConfig,
    pub black: Color,
    pub yellow: Color,
    pub clear: Color,
    /// Spin rate in degrees per second.
    pub spin_rate: f32,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            window: RuntimeConfig { title: "vitrine · logo".to_string(), ..RuntimeConfig::default() },
            black: Color::BLACK,
            yellow: Color::rgb(1.0, 1.0, 0.0),
            clear: Color::rgb(0.95, 0.95, 0.95),
            spin_rate: 100.0,
        }
    }
}

/// Both outlines fitted jointly into `[-0.5, 0.5]²`, black first.
pub fn fitted_outlines() -> [Vec<Vec2>; 2] {
    let mut outlines = [
        BLACK_OUTLINE.iter().map(|&p| Vec2::from_array(p)).collect(),
        YELLOW_OUTLINE.iter().map(|&p| Vec2::from_array(p)).collect(),
    ];
    vitrine_mesh::fit_to_unit_square(&mut outlines);
    outlines
}

/// Advances `angle_deg` by `dt` seconds at `rate` degrees per second, wrapped to `[0, 360)`.
pub fn advance_angle(angle_deg: f32, dt: f32, rate: f32) -> f32 {
    (angle_deg + dt * rate).rem_euclid(360.0)
}

/// Orthographic projection keeping the rotated logo (|z| ≤ 1) inside wgpu's depth range.
pub fn projection() -> Mat4 {
    Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0)
}

struct LogoGpu {
    renderer: FlatRenderer,
    black: GpuMesh,
    yellow: GpuMesh,
}

pub struct Logo {
    config: LogoConfig,
    angle_deg: f32,
    gpu: Option<LogoGpu>,
}

impl Logo {
    pub fn new(config: LogoConfig) -> Self {
        Self { config, angle_deg: 0.0, gpu: None }
    }
}

impl App for Logo {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let renderer = FlatRenderer::new(gpu).context("flat renderer setup failed")?;

        let [black, yellow] = fitted_outlines();
        let black = vitrine_mesh::strip_mesh(&black);
        let yellow = vitrine_mesh::strip_mesh(&yellow);
        log::info!(
            "logo: {} + {} triangles",
            black.triangle_count(),
            yellow.triangle_count()
        );

        self.gpu = Some(LogoGpu {
            renderer,
            black: GpuMesh::upload_flat(gpu.device(), "logo black", &black),
            yellow: GpuMesh::upload_flat(gpu.device(), "logo yellow", &yellow),
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.pressed(Key::Escape) {
            return AppControl::Exit;
        }

        self.angle_deg = advance_angle(self.angle_deg, ctx.time.dt, self.config.spin_rate);

        let Some(LogoGpu { renderer, black, yellow }) = self.gpu.as_mut() else {
            return AppControl::Continue;
        };
        let config = &self.config;
        let model_view = model::model_view(&Rotation::uniform(self.angle_deg));

        ctx.render(config.clear, |rctx, target| {
            let draws = [
                FlatDraw { mesh: &*black, model_view, color: config.black },
                FlatDraw { mesh: &*yellow, model_view, color: config.yellow },
            ];
            renderer.render(rctx, target, projection(), &draws);
        })
    }
}

/// Opens the logo window and blocks until it closes.
pub fn run(config: LogoConfig) -> Result<()> {
    let window = config.window.clone();
    Runtime::run(window, GpuInit::default(), Logo::new(config))
}
