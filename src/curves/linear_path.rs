use std::iter::FromIterator;

use log::debug;

use crate::coords::{Point, Vector};
use crate::error::{Error, Result};

/// Refers to a point of a `LinearPath`.
///
/// A handle is only valid until the path is mutated. Using it after that
/// fails with `Error::InvalidArgument` instead of silently hitting whatever
/// point moved into its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointHandle {
    index: usize,
    generation: u64,
}

impl PointHandle {
    /// Position of the point in the path at the time the handle was taken
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A path made of straight segments between consecutive points.
///
/// Positions along the path are given as the distance from the first point
/// measured along the segments. `path_locations` holds that distance for
/// every point and is rebuilt before any mutating call returns.
#[derive(Debug, Clone, Default)]
pub struct LinearPath {
    points: Vec<Point>,
    path_locations: Vec<f64>,
    path_length: f64,
    generation: u64,
}

/// Rebuilds the path locations when dropped, whichever way the scope is left.
struct RecalculateOnDrop<'a> {
    path: &'a mut LinearPath,
}

impl<'a> Drop for RecalculateOnDrop<'a> {
    fn drop(&mut self) {
        self.path.recalculate_path_lengths();
    }
}

impl LinearPath {
    pub fn new() -> LinearPath {
        LinearPath::default()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Distance along the path to each point, starting with 0.0
    pub fn path_locations(&self) -> &[f64] {
        &self.path_locations
    }

    pub fn path_length(&self) -> f64 {
        self.path_length
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns a handle to the point at `index`, if there is one.
    pub fn handle(&self, index: usize) -> Option<PointHandle> {
        if index < self.points.len() {
            Some(PointHandle {
                index,
                generation: self.generation,
            })
        } else {
            None
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = PointHandle> + '_ {
        (0..self.points.len()).map(move |index| PointHandle {
            index,
            generation: self.generation,
        })
    }

    pub fn add_point(&mut self, p: Point) {
        self.points.push(p);
        self.recalculate_path_lengths();
    }

    /// Removes the point the handle refers to and returns it.
    pub fn remove_point(&mut self, handle: PointHandle) -> Result<Point> {
        if handle.generation != self.generation {
            return Err(Error::InvalidArgument(format!(
                "point handle {} refers to a path that has since been modified",
                handle.index
            )));
        }
        if handle.index >= self.points.len() {
            return Err(Error::InvalidArgument(format!(
                "point handle {} is outside a path of {} points",
                handle.index,
                self.points.len()
            )));
        }
        let p = self.points.remove(handle.index);
        self.recalculate_path_lengths();
        Ok(p)
    }

    /// Finds the segment covering `pos`. Returns the index of the segment's
    /// end point, the start point being the one before it.
    fn bracket(&self, pos: f64) -> Result<usize> {
        if pos < 0.0 {
            return Err(Error::InvalidArgument(format!("negative path location {}", pos)));
        }
        self.path_locations
            .iter()
            .enumerate()
            .skip(1)
            .find(|&(_, &l)| pos <= l)
            .map(|(i, _)| i)
            .ok_or_else(|| {
                Error::NotFound(format!(
                    "path location {} is not on a path of length {} with {} points",
                    pos,
                    self.path_length,
                    self.points.len()
                ))
            })
    }

    fn segment_point(&self, i: usize, pos: f64) -> Point {
        let (start, end) = (self.points[i - 1], self.points[i]);
        let (l_start, l_end) = (self.path_locations[i - 1], self.path_locations[i]);
        if l_end == l_start {
            return start;
        }
        let ratio = (pos - l_start) / (l_end - l_start);
        ratio * end + (1.0 - ratio) * start
    }

    fn segment_direction(&self, i: usize) -> Result<Vector> {
        (self.points[i] - self.points[i - 1]).unit()
    }

    /// Returns the point at distance `pos` along the path.
    ///
    /// # Arguments
    ///
    /// * `pos` - Location in the range 0.0..=path_length()
    pub fn interpolate(&self, pos: f64) -> Result<Point> {
        let i = self.bracket(pos)?;
        Ok(self.segment_point(i, pos))
    }

    /// Returns the unit direction of the segment covering `pos`.
    ///
    /// Fails with `Error::DegenerateVector` if that segment has zero length.
    pub fn derivative(&self, pos: f64) -> Result<Vector> {
        let i = self.bracket(pos)?;
        self.segment_direction(i)
    }

    /// Point and direction at `pos`, same as calling `interpolate` and
    /// `derivative`.
    pub fn value(&self, pos: f64) -> Result<(Point, Vector)> {
        let i = self.bracket(pos)?;
        Ok((self.segment_point(i, pos), self.segment_direction(i)?))
    }

    /// Deletes points closer than `min_segment_length` to the point before
    /// them.
    ///
    /// Points are visited from the start, each one compared with the last
    /// point kept so far, so several short segments in a row merge into one.
    /// The first point is always kept and the path never goes below two
    /// points. Returns the number of deleted points.
    pub fn regularize(&mut self, min_segment_length: f64) -> usize {
        if self.points.len() <= 2 {
            return 0;
        }
        let mut guard = RecalculateOnDrop { path: self };
        let points = &mut guard.path.points;
        let n = points.len();
        let mut kept = 1;
        for i in 1..n {
            let p = points[i];
            // Points in the path, this one included
            let remaining = kept + (n - i);
            if remaining > 2 && points[kept - 1].distance(p) <= min_segment_length {
                continue;
            }
            points[kept] = p;
            kept += 1;
        }
        points.truncate(kept);
        let removed = n - kept;
        if removed > 0 {
            debug!(
                "regularize({}) removed {} of {} points",
                min_segment_length, removed, n
            );
        }
        removed
    }

    /// Shortens the path to `max_length`.
    ///
    /// Points beyond `max_length` are deleted and a new end point is placed
    /// exactly at `max_length`. Nothing happens if the path already is short
    /// enough or `max_length` is negative. Returns true if the path changed.
    pub fn truncate(&mut self, max_length: f64) -> Result<bool> {
        if self.path_length <= max_length || max_length < 0.0 {
            return Ok(false);
        }
        let end = self.interpolate(max_length)?;
        // Locations never decrease, so the points past max_length are a tail
        let keep = self
            .path_locations
            .iter()
            .take_while(|&&l| l <= max_length)
            .count();
        debug!(
            "truncate({}) dropped {} of {} points, path length was {}",
            max_length,
            self.points.len() - keep,
            self.points.len(),
            self.path_length
        );
        self.points.truncate(keep);
        self.points.push(end);
        self.recalculate_path_lengths();
        Ok(true)
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.path_locations.clear();
        self.path_length = 0.0;
        self.generation = self.generation.wrapping_add(1);
    }

    fn recalculate_path_lengths(&mut self) {
        self.path_locations.clear();
        let mut length = 0.0;
        let mut prev: Option<Point> = None;
        for &p in &self.points {
            if let Some(prev) = prev {
                length += prev.distance(p);
            }
            self.path_locations.push(length);
            prev = Some(p);
        }
        self.path_length = length;
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Extend<Point> for LinearPath {
    fn extend<I: IntoIterator<Item = Point>>(&mut self, iter: I) {
        self.points.extend(iter);
        self.recalculate_path_lengths();
    }
}

impl FromIterator<Point> for LinearPath {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> LinearPath {
        let mut path = LinearPath::new();
        path.extend(iter);
        path
    }
}

#[test]
fn test_empty_path() {
    let path = LinearPath::new();
    assert!(path.is_empty());
    assert_eq!(path.path_length(), 0.0);
    assert!(path.path_locations().is_empty());
    assert!(matches!(path.interpolate(0.0), Err(Error::NotFound(_))));
    assert!(matches!(path.derivative(0.0), Err(Error::NotFound(_))));
}

#[test]
fn test_single_point() {
    let mut path = LinearPath::new();
    path.add_point(Point::new(0.3, 0.4));
    assert_eq!(path.path_locations(), &[0.0]);
    assert_eq!(path.path_length(), 0.0);
    assert!(matches!(path.interpolate(0.0), Err(Error::NotFound(_))));
}

#[test]
fn test_regularize_coincident_points() {
    let mut path: LinearPath = vec![
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(0.0, 0.0),
    ]
    .into_iter()
    .collect();
    assert_eq!(path.regularize(0.0), 1);
    assert_eq!(path.len(), 2);
    assert_eq!(path.path_locations(), &[0.0, 0.0]);
}
