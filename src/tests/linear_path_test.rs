use super::super::{
    coords::{Point, Vector},
    curves::linear_path::LinearPath,
    error::Error,
};

fn path_from(points: &[(f64, f64)]) -> LinearPath {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn zigzag(n: usize) -> LinearPath {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Point::new((t * 0.37).sin() * 0.8, (t * 1.13).cos() * 0.6 - t * 0.01)
        })
        .collect()
}

#[test]
fn test_path_locations() {
    let path = zigzag(40);
    let locations = path.path_locations();
    assert_eq!(locations.len(), path.len());
    assert_eq!(locations[0], 0.0);
    for w in locations.windows(2) {
        assert!(w[0] <= w[1]);
    }
    let sum: f64 = path
        .points()
        .windows(2)
        .map(|w| w[0].distance(w[1]))
        .sum();
    assert_relative_eq!(path.path_length(), sum, max_relative = 1e-12);
    assert_eq!(path.path_length(), *locations.last().unwrap());
}

#[test]
fn test_corner_path() {
    let path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
    assert_eq!(path.path_length(), 7.0);
    assert_eq!(path.path_locations(), &[0.0, 3.0, 7.0]);
    assert_eq!(path.interpolate(0.0).unwrap(), Point::new(0.0, 0.0));
    assert_eq!(path.interpolate(3.0).unwrap(), Point::new(3.0, 0.0));
    assert_eq!(path.interpolate(5.0).unwrap(), Point::new(3.0, 2.0));
    assert_eq!(path.interpolate(7.0).unwrap(), Point::new(3.0, 4.0));
    assert_eq!(path.derivative(5.0).unwrap(), Vector::new(0.0, 1.0));
    assert_eq!(path.derivative(1.0).unwrap(), Vector::new(1.0, 0.0));
    // At a corner the segment leading up to it is used
    assert_eq!(path.derivative(3.0).unwrap(), Vector::new(1.0, 0.0));
    let (p, d) = path.value(5.0).unwrap();
    assert_eq!(p, Point::new(3.0, 2.0));
    assert_eq!(d, Vector::new(0.0, 1.0));
}

#[test]
fn test_interpolate_out_of_range() {
    let path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
    assert!(matches!(path.interpolate(-0.1), Err(Error::InvalidArgument(_))));
    assert!(matches!(path.derivative(-0.1), Err(Error::InvalidArgument(_))));
    assert!(matches!(path.interpolate(7.01), Err(Error::NotFound(_))));
    assert!(matches!(path.derivative(7.01), Err(Error::NotFound(_))));
    assert!(matches!(path.interpolate(std::f64::NAN), Err(Error::NotFound(_))));
    assert_eq!(path.path_length(), 7.0);
    assert_eq!(path.len(), 3);
}

#[test]
fn test_interpolate_on_segment() {
    let path = zigzag(25);
    let length = path.path_length();
    let locations = path.path_locations().to_vec();
    let points = path.points().to_vec();
    let mut s = 0.0;
    while s <= length {
        let p = path.interpolate(s).unwrap();
        let i = locations.iter().position(|&l| l >= s).unwrap().max(1);
        let (a, b) = (points[i - 1], points[i]);
        assert_abs_diff_eq!(
            a.distance(p) + p.distance(b),
            a.distance(b),
            epsilon = 1e-9
        );
        s += length / 97.0;
    }
    assert_relative_eq!(
        path.interpolate(length).unwrap(),
        *points.last().unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn test_zero_length_segment() {
    let path = path_from(&[(0.0, 0.0), (0.0, 0.0), (1.0, 0.0)]);
    assert_eq!(path.path_locations(), &[0.0, 0.0, 1.0]);
    assert_eq!(path.interpolate(0.0).unwrap(), Point::new(0.0, 0.0));
    assert!(matches!(path.derivative(0.0), Err(Error::DegenerateVector)));
    assert!(matches!(path.value(0.0), Err(Error::DegenerateVector)));
    assert_eq!(path.derivative(0.5).unwrap(), Vector::new(1.0, 0.0));
}

#[test]
fn test_regularize() {
    let mut path = path_from(&[(0.0, 0.0), (0.1, 0.0), (0.2, 0.0), (5.0, 0.0)]);
    assert_eq!(path.regularize(0.5), 2);
    assert_eq!(path.points(), &[Point::new(0.0, 0.0), Point::new(5.0, 0.0)]);
    assert_eq!(path.path_locations(), &[0.0, 5.0]);
    assert_eq!(path.path_length(), 5.0);
}

#[test]
fn test_regularize_cascades() {
    // Each step is short but together they pass the limit
    let mut path = path_from(&[
        (0.0, 0.0),
        (0.3, 0.0),
        (0.6, 0.0),
        (0.9, 0.0),
        (1.2, 0.0),
        (3.0, 0.0),
    ]);
    assert_eq!(path.regularize(0.5), 2);
    assert_eq!(
        path.points(),
        &[
            Point::new(0.0, 0.0),
            Point::new(0.6, 0.0),
            Point::new(1.2, 0.0),
            Point::new(3.0, 0.0)
        ]
    );
    assert_relative_eq!(path.path_length(), 3.0);
}

#[test]
fn test_regularize_keeps_two_points() {
    let mut path = path_from(&[(0.5, 0.5), (0.51, 0.5), (0.52, 0.5), (0.53, 0.5)]);
    path.regularize(1.0);
    assert_eq!(path.len(), 2);
    assert_eq!(path.points()[0], Point::new(0.5, 0.5));
    assert_eq!(path.points()[1], Point::new(0.53, 0.5));

    let mut path = path_from(&[(0.0, 0.0), (0.01, 0.0)]);
    assert_eq!(path.regularize(1.0), 0);
    assert_eq!(path.len(), 2);
}

#[test]
fn test_regularize_property() {
    for &d in &[0.0, 0.05, 0.2, 0.7, 5.0] {
        let mut path = zigzag(30);
        let first = path.points()[0];
        path.regularize(d);
        assert!(path.len() >= 2);
        assert_eq!(path.points()[0], first);
        assert_eq!(path.path_locations().len(), path.len());
        // Only the last segment may be short, when nothing else could go
        for w in path.points()[..path.len() - 1].windows(2) {
            assert!(w[0].distance(w[1]) > d);
        }
    }
}

#[test]
fn test_truncate() {
    let mut path = path_from(&[(0.0, 0.0), (5.0, 0.0)]);
    assert!(path.truncate(2.0).unwrap());
    assert_eq!(path.points(), &[Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
    assert_eq!(path.path_length(), 2.0);
}

#[test]
fn test_truncate_inside_segment() {
    let mut path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (0.0, 4.0)]);
    assert!(path.truncate(5.0).unwrap());
    assert_eq!(
        path.points(),
        &[Point::new(0.0, 0.0), Point::new(3.0, 0.0), Point::new(3.0, 2.0)]
    );
    assert_eq!(path.path_length(), 5.0);
}

#[test]
fn test_truncate_unchanged() {
    let mut path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
    assert!(!path.truncate(7.0).unwrap());
    assert!(!path.truncate(10.0).unwrap());
    assert!(!path.truncate(-1.0).unwrap());
    assert_eq!(path.len(), 3);
    assert_eq!(path.path_length(), 7.0);
}

#[test]
fn test_truncate_property() {
    for &l in &[0.0, 0.3, 1.0, 2.5, 4.0] {
        let mut path = zigzag(30);
        let before = path.path_length();
        assert!(before > l);
        assert!(path.truncate(l).unwrap());
        assert_abs_diff_eq!(path.path_length(), l, epsilon = 1e-9);
        assert_eq!(path.path_locations().len(), path.len());
    }
}

#[test]
fn test_clear_and_reuse() {
    let mut path = zigzag(10);
    path.clear();
    assert!(path.is_empty());
    assert_eq!(path.path_length(), 0.0);
    assert!(path.path_locations().is_empty());
    let (a, b) = (Point::new(-0.2, 0.7), Point::new(0.4, -0.1));
    path.add_point(a);
    path.add_point(b);
    assert_eq!(path.path_length(), a.distance(b));
    assert_eq!(path.path_locations(), &[0.0, a.distance(b)]);
}

#[test]
fn test_remove_point() {
    let mut path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
    let h = path.handle(1).unwrap();
    assert_eq!(h.index(), 1);
    assert_eq!(path.remove_point(h).unwrap(), Point::new(3.0, 0.0));
    assert_eq!(path.points(), &[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
    assert_eq!(path.path_length(), 5.0);
    assert!(path.handle(2).is_none());
}

#[test]
fn test_stale_handle() {
    let mut path = path_from(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
    let handles: Vec<_> = path.handles().collect();
    assert_eq!(handles.len(), 3);
    path.add_point(Point::new(0.0, 4.0));
    assert!(matches!(
        path.remove_point(handles[2]),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(path.len(), 4);

    let h = path.handle(3).unwrap();
    path.clear();
    assert!(matches!(path.remove_point(h), Err(Error::InvalidArgument(_))));

    // Handles are taken again after each removal
    let mut path = path_from(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
    while path.len() > 1 {
        let h = path.handle(path.len() - 1).unwrap();
        path.remove_point(h).unwrap();
    }
    assert_eq!(path.points(), &[Point::new(0.0, 0.0)]);
    assert_eq!(path.path_length(), 0.0);
}

#[test]
fn test_extend() {
    let mut path = path_from(&[(0.0, 0.0)]);
    path.extend(vec![Point::new(3.0, 0.0), Point::new(3.0, 4.0)]);
    assert_eq!(path.path_locations(), &[0.0, 3.0, 7.0]);
}
