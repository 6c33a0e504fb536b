//! Stateless steering helpers.
//!
//! Every function requests a correction through the entity's steering accumulators rather than
//! touching velocity directly. `arrive` and `aim` always return `true` so they slot straight into
//! behavior-tree leaves.

use phalanx_core::Vec2;

use crate::Steerable;

/// Distance thresholds for [`arrive`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArriveRadii {
    /// Beyond this distance the entity travels at full speed.
    pub slow: f32,
    /// At or within this distance the entity wants to stand still.
    pub stop: f32,
}

impl ArriveRadii {
    /// Walking to a formation slot or army waypoint.
    pub const WAYPOINT: Self = Self {
        slow: 50.0,
        stop: 2.0,
    };
    /// Closing on an enemy; stops short so the weapon reach does the rest.
    pub const ENGAGE: Self = Self {
        slow: 40.0,
        stop: 15.0,
    };
    /// Running away: always full speed.
    pub const FLEE: Self = Self {
        slow: 0.0,
        stop: 0.0,
    };

    pub const fn new(slow: f32, stop: f32) -> Self {
        Self { slow, stop }
    }
}

/// Angular thresholds (degrees) for [`aim`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimRadii {
    pub slow: f32,
    pub stop: f32,
}

impl AimRadii {
    pub const WAYPOINT: Self = Self {
        slow: 45.0,
        stop: 3.0,
    };
    pub const ENGAGE: Self = Self {
        slow: 30.0,
        stop: 1.0,
    };

    pub const fn new(slow: f32, stop: f32) -> Self {
        Self { slow, stop }
    }
}

/// Speed [`arrive`] aims for at `distance` from its destination.
pub fn arrive_speed(distance: f32, max_velocity: f32, radii: ArriveRadii) -> f32 {
    if distance <= radii.stop {
        0.0
    } else if distance > radii.slow || radii.slow <= 0.0 {
        max_velocity
    } else {
        max_velocity * (distance / radii.slow)
    }
}

/// Steer toward (or, with `flee`, directly away from) `destination`, slowing inside `slow` and
/// stopping inside `stop`.
pub fn arrive<S: Steerable + ?Sized>(
    entity: &mut S,
    destination: Vec2,
    radii: ArriveRadii,
    flee: bool,
) -> bool {
    let body = entity.movable_mut();
    let mut direction = destination - body.position;
    if flee {
        direction = -direction;
    }
    let distance = direction.length();
    let speed = arrive_speed(distance, body.limits.max_velocity, radii);
    // A zero direction (already on the destination) normalizes to zero, i.e. "stand still".
    let target_velocity = direction.normalize_or_zero() * speed;
    let correction = target_velocity - body.velocity;
    body.add_velocity_steering(correction);
    true
}

/// Turn rate [`aim`] aims for when `difference` degrees away from the goal bearing.
pub fn aim_rotation(difference: f32, max_rotation: f32, radii: AimRadii) -> f32 {
    let magnitude = difference.abs();
    if magnitude < radii.stop {
        0.0
    } else if magnitude > radii.slow || radii.slow <= 0.0 {
        max_rotation * difference.signum()
    } else {
        max_rotation * (difference / radii.slow)
    }
}

/// Turn to face `destination` along the shorter direction.
pub fn aim<S: Steerable + ?Sized>(entity: &mut S, destination: Vec2, radii: AimRadii) -> bool {
    let body = entity.movable_mut();
    let difference = body.bearing_to(destination);
    let goal = aim_rotation(difference, body.limits.max_rotation, radii);
    let correction = goal - body.rotation;
    body.add_rotation_steering(correction);
    true
}

/// Push away from every neighbor closer than `distance`, one steering request per neighbor.
/// Closer neighbors push harder; neighbors sitting exactly on the entity are ignored since they
/// have no direction. Returns the number of neighbors that pushed.
pub fn separate<S, I>(entity: &mut S, neighbors: I, distance: f32, strength: f32) -> usize
where
    S: Steerable + ?Sized,
    I: IntoIterator<Item = Vec2>,
{
    let body = entity.movable_mut();
    if distance <= 0.0 {
        return 0;
    }
    let distance2 = distance * distance;
    let mut pushed = 0;
    for other in neighbors {
        let delta = body.position - other;
        let dist2 = delta.length_squared();
        if dist2 <= 1e-12 || dist2 > distance2 {
            continue;
        }
        let dist = dist2.sqrt();
        let weight = (distance - dist) / distance;
        body.add_velocity_steering(delta / dist * (weight * strength));
        pushed += 1;
    }
    pushed
}
