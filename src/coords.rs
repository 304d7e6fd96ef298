use std::cmp::Ordering;
use std::f64::consts::PI;
use std::fmt;

use approx::{AbsDiffEq, RelativeEq};
use num::traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Two dimensional vector in normalized plane coordinates.
///
/// Equality is exact per component and ordering is lexicographic, x before y.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

/// A vector used as a position.
pub type Point = Vector;

impl Vector {
    pub fn new(x: f64, y: f64) -> Vector {
        Vector { x, y }
    }

    /// Euclidean norm, without underflow for tiny components
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Scale this vector to unit length.
    ///
    /// A zero vector has no direction; it is left untouched and
    /// `Error::DegenerateVector` is returned.
    pub fn normalize(&mut self) -> Result<()> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(Error::DegenerateVector);
        }
        self.x /= mag;
        self.y /= mag;
        Ok(())
    }

    /// Returns a unit vector with the same direction.
    pub fn unit(&self) -> Result<Vector> {
        let mut u = *self;
        u.normalize()?;
        Ok(u)
    }

    /// Counter-clockwise angle from the positive x axis in the range [0, 2π)
    pub fn angle(&self) -> Result<f64> {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Err(Error::DegenerateVector);
        }
        let a = (self.x / mag).acos();
        if self.y < 0.0 {
            Ok(2.0 * PI - a)
        } else {
            Ok(a)
        }
    }

    pub fn distance(&self, p: Vector) -> f64 {
        (p.x - self.x).hypot(p.y - self.y)
    }

    pub fn distance_squared(&self, p: Vector) -> f64 {
        let dx = p.x - self.x;
        let dy = p.y - self.y;
        dx * dx + dy * dy
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl<T: AsPrimitive<f64>> From<[T; 2]> for Vector {
    fn from(v: [T; 2]) -> Vector {
        Vector {
            x: v[0].as_(),
            y: v[1].as_(),
        }
    }
}

pub fn dot(a: Vector, b: Vector) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Angle to turn counter-clockwise from `a` to reach `b`, in [0, 2π)
pub fn angle_difference(a: Vector, b: Vector) -> Result<f64> {
    let d = b.angle()? - a.angle()?;
    if d < 0.0 {
        Ok(d + 2.0 * PI)
    } else {
        Ok(d)
    }
}

/// Z component of the cross product with both vectors placed in the z = 0 plane
pub fn cross_z_factor(a: Vector, b: Vector) -> f64 {
    a.x * b.y - a.y * b.x
}

/// True if going p1 -> p2 -> p3 turns clockwise.
pub fn makes_right_turn(p1: Point, p2: Point, p3: Point) -> bool {
    cross_z_factor(p2 - p1, p3 - p2) < 0.0
}

/// True if the segments p1 -> p2 and p2 -> p3 have exactly the same
/// direction. The comparison is exact, so points that are colinear on paper
/// may fail after rounding.
pub fn is_colinear(p1: Point, p2: Point, p3: Point) -> Result<bool> {
    let d1 = (p2 - p1).unit()?;
    let d2 = (p3 - p2).unit()?;
    Ok(d1 == d2)
}

/// Order by x, then by y
pub fn lexicographic_x_cmp(a: &Vector, b: &Vector) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Order by y, then by x
pub fn lexicographic_y_cmp(a: &Vector, b: &Vector) -> Ordering {
    a.y.partial_cmp(&b.y)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
}

impl std::ops::Add<Vector> for Vector {
    type Output = Vector;
    fn add(self, v: Vector) -> Vector {
        Vector {
            x: self.x + v.x,
            y: self.y + v.y,
        }
    }
}

impl std::ops::AddAssign<Vector> for Vector {
    fn add_assign(&mut self, v: Vector) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl std::ops::Sub<Vector> for Vector {
    type Output = Vector;
    fn sub(self, v: Vector) -> Vector {
        Vector {
            x: self.x - v.x,
            y: self.y - v.y,
        }
    }
}

impl std::ops::SubAssign<Vector> for Vector {
    fn sub_assign(&mut self, v: Vector) {
        self.x -= v.x;
        self.y -= v.y;
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector {
            x: -self.x,
            y: -self.y,
        }
    }
}

// Element by element
impl std::ops::Mul<Vector> for Vector {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        Vector {
            x: self.x * v.x,
            y: self.y * v.y,
        }
    }
}

impl std::ops::Div<Vector> for Vector {
    type Output = Vector;
    fn div(self, v: Vector) -> Vector {
        Vector {
            x: self.x / v.x,
            y: self.y / v.y,
        }
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, s: f64) -> Vector {
        Vector {
            x: self.x * s,
            y: self.y * s,
        }
    }
}

impl std::ops::Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        v * self
    }
}

impl std::ops::Div<f64> for Vector {
    type Output = Vector;
    fn div(self, s: f64) -> Vector {
        Vector {
            x: self.x / s,
            y: self.y / s,
        }
    }
}

impl std::ops::Div<Vector> for f64 {
    type Output = Vector;
    fn div(self, v: Vector) -> Vector {
        Vector {
            x: self / v.x,
            y: self / v.y,
        }
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for Vector {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

/// Affine transform stored column-wise as [a b c d e f], mapping
/// (x, y) to (a*x + c*y + e, b*x + d*y + f).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub matrix: [f64; 6],
}

fn matrix_mul(a: &[f64; 6], b: &[f64; 6]) -> [f64; 6] {
    [
        a[0] * b[0] + a[2] * b[1],
        a[1] * b[0] + a[3] * b[1],
        a[0] * b[2] + a[2] * b[3],
        a[1] * b[2] + a[3] * b[3],
        a[0] * b[4] + a[2] * b[5] + a[4],
        a[1] * b[4] + a[3] * b[5] + a[5],
    ]
}

impl Transform {
    pub fn new(m: &[f64; 6]) -> Transform {
        Transform { matrix: *m }
    }

    pub fn translate(x: f64, y: f64) -> Transform {
        Transform {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    pub fn scale_xy(sx: f64, sy: f64) -> Transform {
        Transform {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Maps normalized coordinates, [-1, 1] on both axes with y up, onto a
    /// `width` x `height` pixel area with the origin in the top left corner.
    pub fn normalized_to_viewport(width: f64, height: f64) -> Transform {
        Transform::translate(width / 2.0, height / 2.0) * Transform::scale_xy(width / 2.0, -height / 2.0)
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;
    fn mul(self, t: Self) -> Self {
        Transform {
            matrix: matrix_mul(&self.matrix, &t.matrix),
        }
    }
}

impl std::ops::Mul<Vector> for Transform {
    type Output = Vector;
    fn mul(self, v: Vector) -> Vector {
        Vector {
            x: self.matrix[0] * v.x + self.matrix[2] * v.y + self.matrix[4],
            y: self.matrix[1] * v.x + self.matrix[3] * v.y + self.matrix[5],
        }
    }
}

#[test]
fn test_magnitude_and_distance() {
    let v = Vector::new(3.0, 4.0);
    assert_eq!(v.magnitude(), 5.0);
    assert_eq!(Vector::new(1.0, 1.0).distance(Vector::new(4.0, 5.0)), 5.0);
    assert_eq!(Vector::new(1.0, 1.0).distance_squared(Vector::new(4.0, 5.0)), 25.0);
}

#[test]
fn test_tiny_vector_has_direction() {
    let v = Vector::new(1e-200, 0.0);
    assert_eq!(v.magnitude(), 1e-200);
    assert_eq!(v.unit().unwrap(), Vector::new(1.0, 0.0));
    assert_relative_eq!(Vector::new(0.0, -3e-170).angle().unwrap(), 1.5 * PI);
    assert_eq!(Vector::new(0.0, 0.0).distance(Vector::new(0.0, 2e-200)), 2e-200);
    assert!(matches!(
        Vector::new(0.0, 0.0).unit(),
        Err(Error::DegenerateVector)
    ));
}

#[test]
fn test_from_arrays() {
    assert_eq!(Vector::from([2i32, -7]), Vector::new(2.0, -7.0));
    assert_eq!(Vector::from([0.5f64, 1.5]), Vector::new(0.5, 1.5));
    assert_eq!(Vector::from([3u8, 4]), Vector::new(3.0, 4.0));
}

#[test]
fn test_normalize() {
    let mut v = Vector::new(0.0, -2.5);
    v.normalize().unwrap();
    assert_eq!(v, Vector::new(0.0, -1.0));

    let mut z = Vector::new(0.0, 0.0);
    assert!(matches!(z.normalize(), Err(Error::DegenerateVector)));
    assert_eq!(z, Vector::new(0.0, 0.0));
}

#[test]
fn test_angle() {
    assert_relative_eq!(Vector::new(1.0, 0.0).angle().unwrap(), 0.0);
    assert_relative_eq!(Vector::new(0.0, 2.0).angle().unwrap(), PI / 2.0);
    assert_relative_eq!(Vector::new(-1.0, 0.0).angle().unwrap(), PI);
    assert_relative_eq!(Vector::new(0.0, -1.0).angle().unwrap(), 1.5 * PI);
    assert_relative_eq!(Vector::new(1.0, -1.0).angle().unwrap(), 1.75 * PI);
    assert!(Vector::new(0.0, 0.0).angle().is_err());
}

#[test]
fn test_angle_difference() {
    let a = Vector::new(0.0, 1.0);
    let b = Vector::new(1.0, 0.0);
    assert_relative_eq!(angle_difference(b, a).unwrap(), PI / 2.0);
    // Never negative, going the long way around instead
    assert_relative_eq!(angle_difference(a, b).unwrap(), 1.5 * PI);
}

#[test]
fn test_operators() {
    let a = Vector::new(1.0, 2.0);
    let b = Vector::new(4.0, -8.0);
    assert_eq!(a + b, Vector::new(5.0, -6.0));
    assert_eq!(a - b, Vector::new(-3.0, 10.0));
    assert_eq!(a * b, Vector::new(4.0, -16.0));
    assert_eq!(b / a, Vector::new(4.0, -4.0));
    assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
    assert_eq!(2.0 * a, Vector::new(2.0, 4.0));
    assert_eq!(b / 4.0, Vector::new(1.0, -2.0));
    assert_eq!(8.0 / b, Vector::new(2.0, -1.0));
    assert_eq!(-a, Vector::new(-1.0, -2.0));
    assert_eq!(dot(a, b), -12.0);
    let mut c = a;
    c += b;
    c -= a;
    assert_eq!(c, b);
}

#[test]
fn test_turns() {
    let p1 = Vector::new(0.0, 0.0);
    let p2 = Vector::new(1.0, 0.0);
    assert!(makes_right_turn(p1, p2, Vector::new(1.0, -1.0)));
    assert!(!makes_right_turn(p1, p2, Vector::new(1.0, 1.0)));
    assert_eq!(cross_z_factor(Vector::new(1.0, 0.0), Vector::new(0.0, 1.0)), 1.0);
}

#[test]
fn test_colinear() {
    let p1 = Vector::new(0.0, 0.0);
    assert!(is_colinear(p1, Vector::new(1.0, 0.0), Vector::new(3.0, 0.0)).unwrap());
    assert!(!is_colinear(p1, Vector::new(1.0, 0.0), Vector::new(3.0, 0.5)).unwrap());
    // Going back along the same line is not the same direction
    assert!(!is_colinear(p1, Vector::new(1.0, 0.0), Vector::new(-3.0, 0.0)).unwrap());
    assert!(is_colinear(p1, p1, Vector::new(1.0, 0.0)).is_err());
}

#[test]
fn test_ordering() {
    let a = Vector::new(1.0, 5.0);
    let b = Vector::new(1.0, 6.0);
    let c = Vector::new(2.0, 0.0);
    assert!(a < b);
    assert!(b < c);
    let mut v = vec![c, b, a];
    v.sort_by(lexicographic_x_cmp);
    assert_eq!(v, vec![a, b, c]);
    v.sort_by(lexicographic_y_cmp);
    assert_eq!(v, vec![c, a, b]);
}

#[test]
fn test_viewport_transform() {
    let t = Transform::normalized_to_viewport(640.0, 480.0);
    assert_eq!(t * Vector::new(-1.0, 1.0), Vector::new(0.0, 0.0));
    assert_eq!(t * Vector::new(1.0, -1.0), Vector::new(640.0, 480.0));
    assert_eq!(t * Vector::new(0.0, 0.0), Vector::new(320.0, 240.0));
}
