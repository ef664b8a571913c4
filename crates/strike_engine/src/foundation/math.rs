//! Math utilities and types
//!
//! Provides fundamental math types for 2D arcade gameplay.

pub use nalgebra::{Rotation2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Axis-aligned rectangle with top-left origin
///
/// Gameplay code treats rectangles as centered hitboxes; `centered_at` and
/// `set_center` convert between the center the ECS tracks and the top-left
/// corner stored here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,

    /// Top edge
    pub y: f32,

    /// Width
    pub w: f32,

    /// Height
    pub h: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a rectangle of the given size centered on a point
    pub fn centered_at(center: Vec2, w: f32, h: f32) -> Self {
        Self {
            x: center.x - w / 2.0,
            y: center.y - h / 2.0,
            w,
            h,
        }
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move the rectangle so its center sits on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Whether two rectangles interpenetrate
    ///
    /// Strict on all edges: rectangles that merely touch do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Whether a point lies inside the rectangle, edges included
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Overlap extents along each axis
    ///
    /// Values are positive only while the rectangles interpenetrate on that
    /// axis; zero or negative means separated or touching.
    pub fn overlap(&self, other: &Self) -> (f32, f32) {
        let x = self.right().min(other.right()) - self.x.max(other.x);
        let y = self.bottom().min(other.bottom()) - self.y.max(other.y);
        (x, y)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Unit vector pointing along `angle` radians
    pub fn heading_vec(angle: f32) -> Vec2 {
        Vec2::new(angle.cos(), angle.sin())
    }

    /// Wrap an angle into the (-PI, PI] range
    pub fn wrap_angle(angle: f32) -> f32 {
        let mut a = angle % constants::TAU;
        if a > constants::PI {
            a -= constants::TAU;
        } else if a <= -constants::PI {
            a += constants::TAU;
        }
        a
    }
}
