use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen-space 2D vector (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `ZERO` for a (near) zero vector.
    pub fn normalize_or_zero(self) -> Self {
        let len = self.length();
        if len <= f32::EPSILON {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Rescale to `len`. A zero vector stays zero.
    pub fn scale_to_length(self, len: f32) -> Self {
        self.normalize_or_zero() * len
    }

    pub fn clamp_length(self, max_len: f32) -> Self {
        let max_len = max_len.max(0.0);
        let len = self.length();
        if len <= max_len || len <= f32::EPSILON {
            self
        } else {
            self * (max_len / len)
        }
    }

    /// Angle of this vector in degrees, measured like `atan2(y, x)`.
    pub fn angle_degrees(self) -> f32 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Wrap an angle in degrees into `(-180, 180]`.
pub fn normalize_degrees(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let mut a = angle % 360.0;
    if a > 180.0 {
        a -= 360.0;
    } else if a <= -180.0 {
        a += 360.0;
    }
    a
}

/// Unit vector for a facing angle in degrees.
///
/// Facing 0 points up the screen (`-y`); positive angles turn toward `+x`.
pub fn heading(facing_degrees: f32) -> Vec2 {
    let rad = facing_degrees.to_radians();
    Vec2::new(rad.sin(), -rad.cos())
}

/// Signed turn in degrees that takes direction `from` onto direction `to`, in `(-180, 180]`.
///
/// Positive results mean "increase facing". Either vector being zero yields 0.
pub fn signed_angle(from: Vec2, to: Vec2) -> f32 {
    if from.length_squared() <= f32::EPSILON || to.length_squared() <= f32::EPSILON {
        return 0.0;
    }
    normalize_degrees(to.angle_degrees() - from.angle_degrees())
}
