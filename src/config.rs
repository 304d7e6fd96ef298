use std::fs::File;
use std::io::BufReader;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Settings for authoring a path with a pointer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthoringConfig {
    /// Shortest segment kept while drawing
    pub min_segment_length: f64,
    /// Paths are cut off at this length
    pub max_path_length: f64,
    /// How far the preview marker moves each frame
    pub preview_step: f64,
    pub view_width: u32,
    pub view_height: u32,
}

impl Default for AuthoringConfig {
    fn default() -> AuthoringConfig {
        AuthoringConfig {
            min_segment_length: 0.1,
            max_path_length: 4.0,
            preview_step: 0.01,
            view_width: 640,
            view_height: 480,
        }
    }
}

fn check_length(name: &str, v: f64) -> Result<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "{} must be a non-negative number, got {}",
            name, v
        )));
    }
    Ok(())
}

impl AuthoringConfig {
    pub fn validate(&self) -> Result<()> {
        check_length("minSegmentLength", self.min_segment_length)?;
        check_length("maxPathLength", self.max_path_length)?;
        check_length("previewStep", self.preview_step)?;
        if self.preview_step == 0.0 {
            return Err(Error::InvalidArgument("previewStep must not be zero".to_string()));
        }
        if self.view_width == 0 || self.view_height == 0 {
            return Err(Error::InvalidArgument(format!(
                "view size {}x{} is empty",
                self.view_width, self.view_height
            )));
        }
        Ok(())
    }
}

pub fn parse_config(json: &str) -> Result<AuthoringConfig> {
    let config: AuthoringConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

pub fn read_config(file_name: &str) -> Result<AuthoringConfig> {
    let file = File::open(file_name)?;
    let reader = BufReader::new(file);
    let config: AuthoringConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

#[test]
fn test_partial_config() {
    let config = parse_config(r#"{"maxPathLength": 2.5, "viewWidth": 1280}"#).unwrap();
    assert_eq!(config.max_path_length, 2.5);
    assert_eq!(config.view_width, 1280);
    assert_eq!(config.min_segment_length, 0.1);
    assert_eq!(config.view_height, 480);
}

#[test]
fn test_invalid_config() {
    assert!(matches!(
        parse_config(r#"{"minSegmentLength": -1.0}"#),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        parse_config(r#"{"previewStep": 0.0}"#),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        parse_config(r#"{"viewHeight": 0}"#),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(parse_config("{"), Err(Error::Json(_))));
}

#[test]
fn test_missing_config_file() {
    assert!(matches!(
        read_config("/nonexistent/authoring.json"),
        Err(Error::Io(_))
    ));
}
