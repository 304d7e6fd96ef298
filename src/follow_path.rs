use serde::{Deserialize, Serialize};

use crate::coords::Point;
use crate::curves::linear_path::LinearPath;
use crate::error::{Error, Result};

/// Command telling the drone controller to follow a path.
///
/// Also the shape of the telemetry trace reported back, which is turned
/// into a path again with `to_path`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowPathCommand {
    pub path_x_coordinates: Vec<f64>,
    pub path_y_coordinates: Vec<f64>,
}

impl FollowPathCommand {
    /// Lists the points of `path`. An empty path gives no command.
    pub fn from_path(path: &LinearPath) -> Option<FollowPathCommand> {
        if path.is_empty() {
            return None;
        }
        let (path_x_coordinates, path_y_coordinates): (Vec<f64>, Vec<f64>) =
            path.points().iter().map(|p| (p.x, p.y)).unzip();
        Some(FollowPathCommand {
            path_x_coordinates,
            path_y_coordinates,
        })
    }

    pub fn to_path(&self) -> Result<LinearPath> {
        if self.path_x_coordinates.len() != self.path_y_coordinates.len() {
            return Err(Error::InvalidArgument(format!(
                "{} x coordinates but {} y coordinates",
                self.path_x_coordinates.len(),
                self.path_y_coordinates.len()
            )));
        }
        Ok(self
            .path_x_coordinates
            .iter()
            .zip(&self.path_y_coordinates)
            .map(|(&x, &y)| Point::new(x, y))
            .collect())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<FollowPathCommand> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Resamples `path` with points `spacing` apart along the path.
///
/// The first and last points are always included, so the final segment may
/// be shorter than `spacing`.
pub fn downsample(path: &LinearPath, spacing: f64) -> Result<LinearPath> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::InvalidArgument(format!(
            "sample spacing must be positive, got {}",
            spacing
        )));
    }
    let mut samples = LinearPath::new();
    if path.len() < 2 {
        samples.extend(path.points().iter().cloned());
        return Ok(samples);
    }
    let length = path.path_length();
    let count = (length / spacing).ceil();
    if count > MAX_SAMPLES as f64 {
        return Err(Error::InvalidArgument(format!(
            "sample spacing {} gives more than {} samples over length {}",
            spacing, MAX_SAMPLES, length
        )));
    }
    let mut points = Vec::with_capacity(count as usize + 1);
    let mut k: usize = 0;
    loop {
        let pos = k as f64 * spacing;
        if pos >= length {
            break;
        }
        points.push(path.interpolate(pos)?);
        k += 1;
    }
    points.push(path.interpolate(length)?);
    samples.extend(points);
    Ok(samples)
}

/// Upper bound on the number of points `downsample` produces.
pub const MAX_SAMPLES: usize = 1_000_000;

#[test]
fn test_command_from_path() {
    let path: LinearPath = vec![Point::new(0.0, 0.5), Point::new(-0.25, 1.0)]
        .into_iter()
        .collect();
    let cmd = FollowPathCommand::from_path(&path).unwrap();
    assert_eq!(cmd.path_x_coordinates, vec![0.0, -0.25]);
    assert_eq!(cmd.path_y_coordinates, vec![0.5, 1.0]);
    assert!(FollowPathCommand::from_path(&LinearPath::new()).is_none());
}

#[test]
fn test_command_json() {
    let cmd = FollowPathCommand {
        path_x_coordinates: vec![0.0, 3.0],
        path_y_coordinates: vec![0.0, 4.0],
    };
    let json = cmd.to_json().unwrap();
    assert_eq!(
        json,
        r#"{"pathXCoordinates":[0.0,3.0],"pathYCoordinates":[0.0,4.0]}"#
    );
    let path = FollowPathCommand::from_json(&json).unwrap().to_path().unwrap();
    assert_eq!(path.path_length(), 5.0);
}

#[test]
fn test_mismatched_trace() {
    let cmd = FollowPathCommand {
        path_x_coordinates: vec![0.0, 3.0],
        path_y_coordinates: vec![0.0],
    };
    assert!(matches!(cmd.to_path(), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_downsample_spacing() {
    let path: LinearPath = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        .into_iter()
        .collect();
    let samples = downsample(&path, 0.3).unwrap();
    assert_eq!(samples.len(), 5);
    assert_eq!(*samples.points().last().unwrap(), Point::new(1.0, 0.0));
    assert!(matches!(downsample(&path, 0.0), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        downsample(&path, std::f64::NAN),
        Err(Error::InvalidArgument(_))
    ));
    // Would need more points than can be allocated
    assert!(matches!(
        downsample(&path, 1e-300),
        Err(Error::InvalidArgument(_))
    ));
    assert!(downsample(&path, 1e-5).unwrap().len() > 100_000);
}
