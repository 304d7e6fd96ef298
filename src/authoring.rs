use log::{debug, warn};

use crate::config::AuthoringConfig;
use crate::coords::Point;
use crate::curves::linear_path::LinearPath;
use crate::error::{Error, Result};
use crate::follow_path::FollowPathCommand;

/// Builds a path from pointer samples while the user drags across the view.
///
/// One path is reused for every gesture. Pressing clears it, every sample
/// while pressed is appended and the path is regularized and truncated to
/// the configured limits right away.
pub struct PathAuthoring {
    config: AuthoringConfig,
    path: LinearPath,
    drawing: bool,
}

impl PathAuthoring {
    pub fn new(config: AuthoringConfig) -> PathAuthoring {
        PathAuthoring {
            config,
            path: LinearPath::new(),
            drawing: false,
        }
    }

    pub fn config(&self) -> &AuthoringConfig {
        &self.config
    }

    pub fn path(&self) -> &LinearPath {
        &self.path
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Pointer pressed at `p`, starts a new path.
    pub fn begin(&mut self, p: Point) {
        self.path.clear();
        self.drawing = true;
        self.add_sample(p);
    }

    /// Pointer moved to `p`. Returns false if the sample was not used.
    pub fn add_sample(&mut self, p: Point) -> bool {
        if !self.drawing {
            return false;
        }
        if !p.x.is_finite() || !p.y.is_finite() {
            warn!("Dropping non-finite sample {}", p);
            return false;
        }
        self.path.add_point(p);
        self.path.regularize(self.config.min_segment_length);
        if let Err(e) = self.path.truncate(self.config.max_path_length) {
            warn!("Failed to limit path length: {}", e);
        }
        true
    }

    /// Pointer released. Returns the command for the finished path, or None
    /// if the gesture did not produce a segment.
    pub fn end(&mut self) -> Option<FollowPathCommand> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        if self.path.len() < 2 {
            debug!("Ignoring gesture with {} points", self.path.len());
            return None;
        }
        debug!(
            "Finished path with {} points, length {}",
            self.path.len(),
            self.path.path_length()
        );
        FollowPathCommand::from_path(&self.path)
    }
}

/// Marker running along a path to show its direction.
///
/// It restarts from the beginning while the path is being drawn and
/// whenever it has passed the end of the path.
pub struct PreviewCursor {
    step: f64,
    location: f64,
}

impl PreviewCursor {
    /// `step` is the distance moved per frame and must be positive.
    pub fn new(step: f64) -> Result<PreviewCursor> {
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "preview step must be positive, got {}",
                step
            )));
        }
        Ok(PreviewCursor {
            step,
            location: step,
        })
    }

    pub fn location(&self) -> f64 {
        self.location
    }

    /// Position of the marker for the next frame.
    pub fn advance(&mut self, path: &LinearPath, drawing: bool) -> Option<Point> {
        if drawing || self.location > path.path_length() {
            self.location = self.step;
        }
        let p = path.interpolate(self.location).ok();
        self.location += self.step;
        p
    }
}

#[test]
fn test_samples_ignored_when_not_drawing() {
    let mut authoring = PathAuthoring::new(AuthoringConfig::default());
    assert!(!authoring.add_sample(Point::new(0.0, 0.0)));
    assert!(authoring.path().is_empty());
    assert!(authoring.end().is_none());
}

#[test]
fn test_cursor_restarts() {
    let path: LinearPath = vec![Point::new(0.0, 0.0), Point::new(0.25, 0.0)]
        .into_iter()
        .collect();
    let mut cursor = PreviewCursor::new(0.125).unwrap();
    assert_eq!(cursor.advance(&path, false), Some(Point::new(0.125, 0.0)));
    assert_eq!(cursor.advance(&path, false), Some(Point::new(0.25, 0.0)));
    // Past the end, start over
    assert_eq!(cursor.advance(&path, false), Some(Point::new(0.125, 0.0)));
    assert_eq!(cursor.advance(&path, true), Some(Point::new(0.125, 0.0)));
}

#[test]
fn test_cursor_step_must_move() {
    for &step in &[0.0, -0.1, std::f64::NAN, std::f64::INFINITY] {
        assert!(matches!(
            PreviewCursor::new(step),
            Err(Error::InvalidArgument(_))
        ));
    }
}
