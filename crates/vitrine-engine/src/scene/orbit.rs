//! Parent → child orbit hierarchy.
//!
//! Each body orbits its parent about Y at `distance`, then spins about its own
//! Y axis. World transforms are recomposed from scratch on every query.

use glam::{Mat4, Vec3};

/// Handle to a body inside an [`OrbitSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct BodyId(usize);

impl BodyId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Orbital state of one body. Angles are in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Body {
    pub parent: Option<BodyId>,
    /// Orbital position (angle about the parent's Y axis).
    pub position: f32,
    /// Distance from the parent along the orbit radius.
    pub distance: f32,
    /// Spin angle about the body's own Y axis.
    pub angle: f32,
    /// Uniform scale applied when drawing; not inherited by children.
    pub size: f32,
}

impl Body {
    /// Unscaled body at rest on its parent's +Z axis.
    pub fn new(parent: Option<BodyId>, distance: f32, size: f32) -> Self {
        Self { parent, position: 0.0, distance, angle: 0.0, size }
    }

    /// `rotate_y(position) · translate(0, 0, distance) · rotate_y(angle)`.
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_rotation_y(self.position)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, self.distance))
            * Mat4::from_rotation_y(self.angle)
    }
}

/// Arena of bodies addressed by [`BodyId`].
///
/// A parent must exist before its children are added, so the hierarchy is
/// always a forest.
#[derive(Debug, Default, Clone)]
pub struct OrbitSystem {
    bodies: Vec<Body>,
}

impl OrbitSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body and returns its handle.
    ///
    /// # Panics
    /// Panics if `body.parent` does not belong to this system.
    pub fn add(&mut self, body: Body) -> BodyId {
        if let Some(parent) = body.parent {
            assert!(parent.0 < self.bodies.len(), "parent {parent:?} does not exist");
        }
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }

    pub fn body_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }

    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        (0..self.bodies.len()).map(BodyId)
    }

    /// `parent_world · local`, or `local` for a root body.
    pub fn world_transform(&self, id: BodyId) -> Mat4 {
        let body = &self.bodies[id.0];
        let local = body.local_transform();
        match body.parent {
            Some(parent) => self.world_transform(parent) * local,
            None => local,
        }
    }

    /// World transform with the body's own size applied.
    pub fn draw_transform(&self, id: BodyId) -> Mat4 {
        self.world_transform(id) * Mat4::from_scale(Vec3::splat(self.bodies[id.0].size))
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use super::*;

    fn origin_of(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    // ── hierarchy ─────────────────────────────────────────────────────────

    #[test]
    fn root_world_is_local() {
        let mut sys = OrbitSystem::new();
        let root = sys.add(Body { position: 0.3, angle: 1.1, ..Body::new(None, 4.0, 1.0) });
        assert_eq!(sys.world_transform(root), sys.body(root).local_transform());
    }

    #[test]
    fn child_composes_with_parent() {
        let mut sys = OrbitSystem::new();
        let sun = sys.add(Body { angle: 0.7, ..Body::new(None, 0.0, 10.0) });
        let earth = sys.add(Body { position: 0.4, angle: 2.0, ..Body::new(Some(sun), 50.0, 1.0) });

        let expected = sys.world_transform(sun) * sys.body(earth).local_transform();
        assert!(sys.world_transform(earth).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn three_levels_compose_left_to_right() {
        let mut sys = OrbitSystem::new();
        let a = sys.add(Body { position: 0.2, angle: 0.5, ..Body::new(None, 1.0, 1.0) });
        let b = sys.add(Body { position: 1.0, angle: 0.1, ..Body::new(Some(a), 2.0, 1.0) });
        let c = sys.add(Body { position: 2.5, angle: 0.9, ..Body::new(Some(b), 3.0, 1.0) });

        let expected = sys.body(a).local_transform()
            * sys.body(b).local_transform()
            * sys.body(c).local_transform();
        assert!(sys.world_transform(c).abs_diff_eq(expected, 1e-5));
    }

    #[test]
    #[should_panic]
    fn unknown_parent_is_rejected() {
        let mut other = OrbitSystem::new();
        other.add(Body::new(None, 0.0, 1.0));
        let stranger = other.add(Body::new(None, 0.0, 1.0));

        OrbitSystem::new().add(Body::new(Some(stranger), 1.0, 1.0));
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn body_sits_on_its_orbit() {
        let mut sys = OrbitSystem::new();
        let id = sys.add(Body { position: FRAC_PI_2, ..Body::new(None, 5.0, 1.0) });
        assert!(origin_of(sys.world_transform(id)).abs_diff_eq(Vec3::new(5.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn spin_does_not_move_the_center() {
        let mut sys = OrbitSystem::new();
        let id = sys.add(Body { position: 0.3, ..Body::new(None, 5.0, 1.0) });
        let before = origin_of(sys.world_transform(id));
        sys.body_mut(id).angle = PI;
        assert!(origin_of(sys.world_transform(id)).abs_diff_eq(before, 1e-5));
    }

    #[test]
    fn parent_spin_carries_the_child() {
        let mut sys = OrbitSystem::new();
        let earth = sys.add(Body { angle: PI, ..Body::new(None, 0.0, 1.0) });
        let moon = sys.add(Body::new(Some(earth), 2.0, 1.0));
        // A half spin of the parent puts the moon on -Z.
        assert!(origin_of(sys.world_transform(moon)).abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-5));
    }

    #[test]
    fn size_scales_only_the_drawn_body() {
        let mut sys = OrbitSystem::new();
        let sun = sys.add(Body::new(None, 0.0, 100.0));
        let planet = sys.add(Body::new(Some(sun), 3.0, 1.0));

        let drawn = sys.draw_transform(sun);
        assert!(drawn.transform_vector3(Vec3::X).abs_diff_eq(Vec3::X * 100.0, 1e-3));
        assert!(origin_of(sys.world_transform(planet)).abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
    }
}
