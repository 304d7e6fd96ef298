extern crate flight_paths;
extern crate getopts;
#[macro_use]
extern crate log;
extern crate pretty_env_logger;

use std::env;
use std::fs;
use std::process;

use getopts::{Matches, Options};

use flight_paths::authoring::{PathAuthoring, PreviewCursor};
use flight_paths::config::{read_config, AuthoringConfig};
use flight_paths::follow_path::{downsample, FollowPathCommand};
use flight_paths::sample_parser::parse_points;
use flight_paths::svg_plot::SvgPlot;
use flight_paths::{Error, LinearPath, Result};

fn usage(prg: &str, opts: &Options) {
    let brief = format!("Usage: {} [options] FILE", prg);
    print!("{}", opts.usage(&brief));
}

fn parse_length(arg: Option<String>, name: &str) -> Result<Option<f64>> {
    match arg {
        Some(arg) => match arg.parse::<f64>() {
            Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
            Ok(_) => Err(Error::InvalidArgument(format!("{} must be >= 0", name))),
            Err(err) => Err(Error::InvalidArgument(format!("Invalid {}: {}", name, err))),
        },
        None => Ok(None),
    }
}

fn write_preview(file_name: &str, path: &LinearPath, config: &AuthoringConfig) -> Result<()> {
    let mut plot = SvgPlot::new(config.view_width, config.view_height);
    plot.set_color("blue");
    plot.add_path(path);
    plot.set_color("red");
    let mut cursor = PreviewCursor::new(config.preview_step.max(path.path_length() / 20.0))?;
    while cursor.location() <= path.path_length() {
        let pos = cursor.location();
        if cursor.advance(path, false).is_some() {
            if let Ok((p, dir)) = path.value(pos) {
                plot.add_vector(p, dir, 0.05);
            }
        }
    }
    plot.write(file_name)?;
    info!("Wrote preview to {}", file_name);
    Ok(())
}

fn options() -> Options {
    let mut opts = Options::new();
    opts.optopt("c", "config", "authoring settings (JSON)", "FILE");
    opts.optopt("", "min-segment", "shortest segment kept", "LEN");
    opts.optopt("", "max-length", "maximum path length", "LEN");
    opts.optopt("", "downsample", "resample the path at this spacing", "SPACING");
    opts.optopt("s", "svg", "write a preview of the path", "OUT");
    opts.optflag("h", "help", "print this help menu");
    opts
}

/// Settings from the config file, if any, with the length options applied
/// on top. Also returns the downsampling spacing.
fn merge_options(matches: &Matches) -> Result<(AuthoringConfig, Option<f64>)> {
    let mut config = match matches.opt_str("config") {
        Some(file_name) => {
            info!("Reading settings from {}", file_name);
            read_config(&file_name)?
        }
        None => AuthoringConfig::default(),
    };
    if let Some(len) = parse_length(matches.opt_str("min-segment"), "minimum segment length")? {
        config.min_segment_length = len;
    }
    if let Some(len) = parse_length(matches.opt_str("max-length"), "maximum path length")? {
        config.max_path_length = len;
    }
    let spacing = parse_length(matches.opt_str("downsample"), "sample spacing")?;
    Ok((config, spacing))
}

fn run(args: &[String]) -> Result<()> {
    let program = args[0].clone();
    let opts = options();

    let matches = opts
        .parse(&args[1..])
        .map_err(|f| Error::InvalidArgument(f.to_string()))?;
    if matches.opt_present("h") {
        usage(&program, &opts);
        return Ok(());
    }
    if matches.free.is_empty() {
        usage(&program, &opts);
        return Err(Error::InvalidArgument("No file name".to_string()));
    }

    let (config, spacing) = merge_options(&matches)?;

    let file_name = &matches.free[0];
    let samples = parse_points(&fs::read_to_string(file_name)?)?;
    info!("Read {} samples from {}", samples.len(), file_name);

    let mut authoring = PathAuthoring::new(config);
    let mut samples = samples.into_iter();
    if let Some(first) = samples.next() {
        authoring.begin(first);
    }
    for p in samples {
        authoring.add_sample(p);
    }
    if authoring.end().is_none() {
        warn!("Samples did not produce a path");
        return Ok(());
    }

    let path = match spacing {
        Some(spacing) => downsample(authoring.path(), spacing)?,
        None => authoring.path().clone(),
    };
    info!(
        "Path has {} points, length {}",
        path.len(),
        path.path_length()
    );

    if let Some(svg) = matches.opt_str("svg") {
        write_preview(&svg, &path, authoring.config())?;
    }
    if let Some(cmd) = FollowPathCommand::from_path(&path) {
        println!("{}", cmd.to_json()?);
    }
    Ok(())
}

fn main() {
    pretty_env_logger::init();
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
fn parse_args(args: &[&str]) -> Matches {
    options().parse(args).unwrap()
}

#[test]
fn test_options_override_config_file() {
    let file_name = env::temp_dir().join("path_tool_override_config.json");
    fs::write(
        &file_name,
        r#"{"minSegmentLength": 0.2, "maxPathLength": 3.0, "previewStep": 0.05}"#,
    )
    .unwrap();
    let file_name = file_name.to_str().unwrap();

    let (config, spacing) = merge_options(&parse_args(&["-c", file_name, "samples.txt"])).unwrap();
    assert_eq!(config.min_segment_length, 0.2);
    assert_eq!(config.max_path_length, 3.0);
    assert_eq!(config.preview_step, 0.05);
    assert_eq!(spacing, None);

    let (config, spacing) = merge_options(&parse_args(&[
        "-c",
        file_name,
        "--min-segment",
        "0.05",
        "--max-length",
        "1.5",
        "--downsample",
        "0.25",
    ]))
    .unwrap();
    assert_eq!(config.min_segment_length, 0.05);
    assert_eq!(config.max_path_length, 1.5);
    assert_eq!(config.preview_step, 0.05);
    assert_eq!(spacing, Some(0.25));
}

#[test]
fn test_options_without_config_file() {
    let (config, _) = merge_options(&parse_args(&["--max-length", "2"])).unwrap();
    let defaults = AuthoringConfig::default();
    assert_eq!(config.min_segment_length, defaults.min_segment_length);
    assert_eq!(config.max_path_length, 2.0);
}

#[test]
fn test_invalid_length_options() {
    for args in &[
        ["--min-segment=-1", "a.txt"],
        ["--max-length", "inf"],
        ["--max-length", "long"],
        ["--downsample", "NaN"],
    ] {
        assert!(matches!(
            merge_options(&parse_args(args)),
            Err(Error::InvalidArgument(_))
        ));
    }
}

#[test]
fn test_tiny_downsample_spacing() {
    let (_, spacing) = merge_options(&parse_args(&["--downsample", "1e-300"])).unwrap();
    use flight_paths::Point;

    let path: LinearPath = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]
        .into_iter()
        .collect();
    assert!(matches!(
        downsample(&path, spacing.unwrap()),
        Err(Error::InvalidArgument(_))
    ));
}
