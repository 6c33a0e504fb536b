//! Sword and bow.
//!
//! A sword swing sweeps the blade across the wielder's front and damages the first enemy the
//! blade touches. A bow looses an [`Arrow`] that flies straight until it hits an enemy or runs
//! out of range.

use phalanx_core::{heading, ArmyId, SoldierId, Vec2};
use serde::{Deserialize, Serialize};

/// Duration of one sword swing.
pub const SWING_SECONDS: f32 = 0.75;
/// Total sweep of a swing, centered on the wielder's facing.
pub const SWING_ARC_DEG: f32 = 90.0;
/// How far the blade's hilt moves out from the wielder during a swing.
pub const SWORD_REACH: f32 = 20.0;
pub const BLADE_LENGTH: f32 = 10.0;
/// Speed (units per second) at which the blade extends and retracts.
pub const BLADE_EXTEND_SPEED: f32 = 1000.0;

/// Static weapon configuration carried by an archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WeaponSpec {
    Sword {
        damage: f32,
        attack_range: f32,
        #[serde(default = "default_sword_stationary")]
        stationary_time: f32,
    },
    Bow {
        damage: f32,
        attack_range: f32,
        #[serde(default = "default_bow_stationary")]
        stationary_time: f32,
        #[serde(default = "default_reload")]
        reload_seconds: f32,
        #[serde(default = "default_arrow_speed")]
        arrow_speed: f32,
        /// Distance an arrow flies before dropping; defaults to `attack_range`.
        #[serde(default)]
        arrow_range: Option<f32>,
    },
}

fn default_sword_stationary() -> f32 {
    SWING_SECONDS
}
fn default_bow_stationary() -> f32 {
    0.5
}
fn default_reload() -> f32 {
    1.5
}
fn default_arrow_speed() -> f32 {
    300.0
}

impl WeaponSpec {
    pub fn sword() -> Self {
        WeaponSpec::Sword {
            damage: 30.0,
            attack_range: 30.0,
            stationary_time: default_sword_stationary(),
        }
    }

    pub fn bow() -> Self {
        WeaponSpec::Bow {
            damage: 15.0,
            attack_range: 250.0,
            stationary_time: default_bow_stationary(),
            reload_seconds: default_reload(),
            arrow_speed: default_arrow_speed(),
            arrow_range: None,
        }
    }

    pub fn damage(&self) -> f32 {
        match self {
            WeaponSpec::Sword { damage, .. } | WeaponSpec::Bow { damage, .. } => *damage,
        }
    }

    pub fn attack_range(&self) -> f32 {
        match self {
            WeaponSpec::Sword { attack_range, .. } | WeaponSpec::Bow { attack_range, .. } => {
                *attack_range
            }
        }
    }

    /// How long the wielder is rooted after attacking.
    pub fn stationary_time(&self) -> f32 {
        match self {
            WeaponSpec::Sword {
                stationary_time, ..
            }
            | WeaponSpec::Bow {
                stationary_time, ..
            } => *stationary_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sword {
    damage: f32,
    /// Seconds into the current swing; `None` while sheathed.
    swing: Option<f32>,
    reach: f32,
}

impl Sword {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            swing: None,
            reach: 0.0,
        }
    }

    pub fn is_swinging(&self) -> bool {
        self.swing.is_some()
    }

    fn update(&mut self, dt: f32) {
        let step = BLADE_EXTEND_SPEED * dt;
        match self.swing {
            Some(t) if t + dt <= SWING_SECONDS => {
                self.swing = Some(t + dt);
                self.reach = (self.reach + step).min(SWORD_REACH);
            }
            Some(_) => {
                self.swing = None;
                self.reach = (self.reach - step).max(0.0);
            }
            None => self.reach = (self.reach - step).max(0.0),
        }
    }

    /// Blade as a segment (hilt, tip) in world space.
    pub fn blade(&self, wielder: Vec2, facing: f32) -> (Vec2, Vec2) {
        let progress = self.swing.map_or(0.5, |t| (t / SWING_SECONDS).clamp(0.0, 1.0));
        let angle = facing - SWING_ARC_DEG / 2.0 + SWING_ARC_DEG * progress;
        let dir = heading(angle);
        (
            wielder + dir * self.reach,
            wielder + dir * (self.reach + BLADE_LENGTH),
        )
    }

    /// Whether the blade of an active swing touches the circle.
    pub fn hits_circle(&self, wielder: Vec2, facing: f32, center: Vec2, radius: f32) -> bool {
        if !self.is_swinging() {
            return false;
        }
        let (hilt, tip) = self.blade(wielder, facing);
        segment_distance(center, hilt, tip) <= radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bow {
    damage: f32,
    reload_seconds: f32,
    arrow_speed: f32,
    arrow_range: f32,
    cooldown: f32,
}

impl Bow {
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn cooldown(&self) -> f32 {
        self.cooldown.max(0.0)
    }
}

/// A weapon instance owned by one soldier.
#[derive(Debug, Clone, PartialEq)]
pub enum Weapon {
    Sword(Sword),
    Bow(Bow),
}

impl Weapon {
    pub fn from_spec(spec: &WeaponSpec) -> Self {
        match *spec {
            WeaponSpec::Sword { damage, .. } => Weapon::Sword(Sword::new(damage)),
            WeaponSpec::Bow {
                damage,
                attack_range,
                reload_seconds,
                arrow_speed,
                arrow_range,
                ..
            } => Weapon::Bow(Bow {
                damage,
                reload_seconds,
                arrow_speed,
                arrow_range: arrow_range.unwrap_or(attack_range),
                cooldown: 0.0,
            }),
        }
    }

    pub fn damage(&self) -> f32 {
        match self {
            Weapon::Sword(sword) => sword.damage,
            Weapon::Bow(bow) => bow.damage,
        }
    }

    /// Start an attack. Returns `false` while a swing is in progress or the bow is reloading.
    pub fn activate(&mut self) -> bool {
        match self {
            Weapon::Sword(sword) => {
                if sword.is_swinging() {
                    return false;
                }
                sword.swing = Some(0.0);
                true
            }
            Weapon::Bow(bow) => {
                if !bow.is_ready() {
                    return false;
                }
                bow.cooldown = bow.reload_seconds;
                true
            }
        }
    }

    /// Cancel an active swing. Bows have nothing to cancel.
    pub fn deactivate(&mut self) {
        if let Weapon::Sword(sword) = self {
            sword.swing = None;
        }
    }

    pub fn update(&mut self, dt: f32) {
        match self {
            Weapon::Sword(sword) => sword.update(dt),
            Weapon::Bow(bow) => bow.cooldown = (bow.cooldown - dt).max(0.0),
        }
    }

    pub fn as_sword(&self) -> Option<&Sword> {
        match self {
            Weapon::Sword(sword) => Some(sword),
            Weapon::Bow(_) => None,
        }
    }

    /// The arrow a bow looses from `origin` toward `facing`. `None` for swords.
    pub fn arrow(
        &self,
        owner: SoldierId,
        army: ArmyId,
        origin: Vec2,
        facing: f32,
    ) -> Option<Arrow> {
        match self {
            Weapon::Bow(bow) => Some(Arrow {
                owner,
                army,
                position: origin,
                velocity: heading(facing) * bow.arrow_speed,
                remaining: bow.arrow_range,
                damage: bow.damage,
            }),
            Weapon::Sword(_) => None,
        }
    }
}

/// A projectile in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub owner: SoldierId,
    pub army: ArmyId,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Distance left before the arrow drops.
    pub remaining: f32,
    pub damage: f32,
}

impl Arrow {
    /// Advance by `dt`, returning the segment travelled this step.
    pub fn advance(&mut self, dt: f32) -> (Vec2, Vec2) {
        let start = self.position;
        let mut step = self.velocity * dt;
        let length = step.length();
        if length >= self.remaining {
            step = step.scale_to_length(self.remaining.max(0.0));
            self.remaining = 0.0;
        } else {
            self.remaining -= length;
        }
        self.position = start + step;
        (start, self.position)
    }

    pub fn is_spent(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Shortest distance from `point` to the segment `a..b`.
pub fn segment_distance(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len2).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}
