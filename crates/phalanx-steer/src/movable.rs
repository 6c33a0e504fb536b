use phalanx_core::{heading, normalize_degrees, signed_angle, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SteeringLimits {
    /// Top speed (units per second).
    pub max_velocity: f32,
    /// Largest velocity change a single tick may request.
    pub max_vel_accel: f32,
    /// Top turn rate (degrees per second).
    pub max_rotation: f32,
    /// Largest rotation change a single tick may request.
    pub max_rot_accel: f32,
}

impl Default for SteeringLimits {
    fn default() -> Self {
        Self {
            max_velocity: 0.0,
            max_vel_accel: 60.0,
            max_rotation: 0.0,
            max_rot_accel: 80.0,
        }
    }
}

impl SteeringLimits {
    pub fn new(max_velocity: f32, max_rotation: f32) -> Self {
        Self {
            max_velocity,
            max_rotation,
            ..Default::default()
        }
    }

    pub fn with_accel(mut self, max_vel_accel: f32, max_rot_accel: f32) -> Self {
        self.max_vel_accel = max_vel_accel;
        self.max_rot_accel = max_rot_accel;
        self
    }
}

/// Kinematic state of anything that moves and turns.
///
/// Invariants after every [`apply`](Movable::apply):
/// - `velocity.length() <= limits.max_velocity`
/// - `rotation.abs() <= limits.max_rotation`
/// - `facing` lies in `(-180, 180]`
#[derive(Debug, Clone, PartialEq)]
pub struct Movable {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Degrees; 0 faces up the screen.
    pub facing: f32,
    /// Degrees per second.
    pub rotation: f32,
    pub limits: SteeringLimits,
    velocity_steering: Vec2,
    rotation_steering: f32,
    stationary_timer: f32,
}

impl Default for Movable {
    fn default() -> Self {
        Self::new(SteeringLimits::default())
    }
}

impl Movable {
    pub fn new(limits: SteeringLimits) -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            facing: 0.0,
            rotation: 0.0,
            limits,
            velocity_steering: Vec2::ZERO,
            rotation_steering: 0.0,
            stationary_timer: 0.0,
        }
    }

    pub fn at(mut self, position: Vec2, facing: f32) -> Self {
        self.set_position(position, Some(facing));
        self
    }

    pub fn set_position(&mut self, position: Vec2, facing: Option<f32>) {
        self.position = position;
        if let Some(facing) = facing {
            self.facing = normalize_degrees(facing);
        }
    }

    pub fn velocity_steering(&self) -> Vec2 {
        self.velocity_steering
    }

    pub fn rotation_steering(&self) -> f32 {
        self.rotation_steering
    }

    pub fn reset_steering(&mut self) {
        self.velocity_steering = Vec2::ZERO;
        self.rotation_steering = 0.0;
    }

    /// Accumulate a velocity correction. Requests larger than `max_vel_accel` are shortened.
    pub fn add_velocity_steering(&mut self, steering: Vec2) {
        self.velocity_steering += steering.clamp_length(self.limits.max_vel_accel);
    }

    /// Accumulate a rotation correction. Requests larger than `max_rot_accel` are shortened.
    pub fn add_rotation_steering(&mut self, steering: f32) {
        let cap = self.limits.max_rot_accel.max(0.0);
        self.rotation_steering += steering.clamp(-cap, cap);
    }

    /// Stop moving (but keep turning) for `seconds`.
    pub fn hold_for(&mut self, seconds: f32) {
        self.stationary_timer = self.stationary_timer.max(seconds);
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary_timer > 0.0
    }

    pub fn stationary_remaining(&self) -> f32 {
        self.stationary_timer.max(0.0)
    }

    /// Integrate the accumulated steering over `dt_seconds`.
    ///
    /// Steering is a per-tick change of velocity/rotation; positions and facing advance by
    /// `velocity * dt` and `rotation * dt`.
    pub fn apply(&mut self, dt_seconds: f32) {
        let dt = dt_seconds.max(0.0);

        if self.stationary_timer > 0.0 {
            self.stationary_timer = (self.stationary_timer - dt).max(0.0);
        } else {
            let steering = self.velocity_steering.clamp_length(self.limits.max_vel_accel);
            self.velocity = (self.velocity + steering).clamp_length(self.limits.max_velocity);
            self.position += self.velocity * dt;
        }

        let cap = self.limits.max_rot_accel.max(0.0);
        let max_rotation = self.limits.max_rotation.max(0.0);
        self.rotation = (self.rotation + self.rotation_steering.clamp(-cap, cap))
            .clamp(-max_rotation, max_rotation);
        self.facing = normalize_degrees(self.facing + self.rotation * dt);
    }

    pub fn forward(&self) -> Vec2 {
        heading(self.facing)
    }

    /// Signed turn in degrees from the current facing toward `point`.
    pub fn bearing_to(&self, point: Vec2) -> f32 {
        signed_angle(self.forward(), point - self.position)
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

/// Anything that carries a [`Movable`].
pub trait Steerable {
    fn movable(&self) -> &Movable;
    fn movable_mut(&mut self) -> &mut Movable;
}

impl Steerable for Movable {
    fn movable(&self) -> &Movable {
        self
    }

    fn movable_mut(&mut self) -> &mut Movable {
        self
    }
}
