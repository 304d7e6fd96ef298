use super::super::{
    coords::Point, curves::linear_path::LinearPath, error::Result, follow_path::downsample,
    svg_plot::SvgPlot,
};
use super::svg_utils;
use std::fs;

fn spiral() -> LinearPath {
    (0..200)
        .map(|i| {
            let a = i as f64 * 0.1;
            let r = 0.9 - i as f64 * 0.004;
            Point::new(r * a.cos(), r * a.sin())
        })
        .collect()
}

#[test]
fn plot_regularized_spiral() -> Result<()> {
    let mut plot = SvgPlot::new(400, 400);
    let mut path = spiral();
    plot.set_color("gray");
    plot.add_polyline(path.points());
    path.regularize(0.15);
    path.truncate(6.0)?;
    plot.set_color("blue");
    plot.set_point_radius(2.0);
    plot.add_path(&path);
    plot.set_color("red");
    let mut pos = 0.0;
    let mut arrows = 0;
    while pos <= path.path_length() {
        let (p, dir) = path.value(pos)?;
        plot.add_vector(p, dir, 0.08);
        arrows += 1;
        pos += 0.5;
    }
    assert!(arrows >= 12);
    let file_path = svg_utils::write_plot(&plot, "regularized_spiral")?;
    let doc = fs::read_to_string(file_path)?;
    assert!(doc.contains("<polyline"));
    assert_eq!(doc.matches("<g>").count(), arrows);
    Ok(())
}

#[test]
fn plot_downsampled_trace() -> Result<()> {
    let trace = spiral();
    let samples = downsample(&trace, 0.25)?;
    assert_eq!(samples.points()[0], trace.points()[0]);
    assert_relative_eq!(
        *samples.points().last().unwrap(),
        *trace.points().last().unwrap(),
        max_relative = 1e-12
    );
    for w in samples.points()[..samples.len() - 1].windows(2) {
        assert!(w[0].distance(w[1]) <= 0.25 + 1e-9);
    }
    let mut plot = SvgPlot::new(400, 400);
    plot.set_color("gray");
    plot.add_polyline(trace.points());
    plot.set_color("green");
    plot.add_path(&samples);
    svg_utils::write_plot(&plot, "downsampled_trace")?;
    Ok(())
}
