//! Readers for the three whitespace-separated solver output files.
//!
//! One record per line; blank lines are ignored. Any other line that does
//! not match the record layout aborts the load with the line number.

use std::path::Path;
use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{Result, VizError};
use crate::mesh::{Element, Point, Scene};
use crate::persistence::config::Config;

/// Read `x y` node records.
pub fn read_points(path: &Path) -> Result<Vec<Point>> {
    parse_points(&read_source(path)?, &source_name(path))
}

/// Read `v0 v1 v2 v3 region` element records.
pub fn read_elements(path: &Path) -> Result<Vec<Element>> {
    parse_elements(&read_source(path)?, &source_name(path))
}

/// Read one field sample per line.
pub fn read_field(path: &Path) -> Result<Vec<f64>> {
    parse_field(&read_source(path)?, &source_name(path))
}

pub fn parse_points(text: &str, source: &str) -> Result<Vec<Point>> {
    records(text)
        .map(|(line, raw)| {
            let fields = tokens(raw, 2, source, line)?;
            Ok(Point::new(
                token(fields[0], raw, source, line)?,
                token(fields[1], raw, source, line)?,
            ))
        })
        .collect()
}

pub fn parse_elements(text: &str, source: &str) -> Result<Vec<Element>> {
    records(text)
        .map(|(line, raw)| {
            let fields = tokens(raw, 5, source, line)?;
            let mut vertices = [0usize; 4];
            for (slot, t) in vertices.iter_mut().zip(&fields) {
                *slot = token(t, raw, source, line)?;
            }
            let region = token(fields[4], raw, source, line)?;
            Ok(Element::new(vertices, region))
        })
        .collect()
}

pub fn parse_field(text: &str, source: &str) -> Result<Vec<f64>> {
    records(text)
        .map(|(line, raw)| {
            let fields = tokens(raw, 1, source, line)?;
            token(fields[0], raw, source, line)
        })
        .collect()
}

/// Load all three sources named by the config and build the scene.
pub fn load_scene(config: &Config) -> Result<Scene> {
    info!(
        points = %config.points_path.display(),
        elements = %config.elements_path.display(),
        field = %config.field_path.display(),
        "loading solver output"
    );
    let points = read_points(&config.points_path)?;
    let elements = read_elements(&config.elements_path)?;
    let samples = read_field(&config.field_path)?;
    debug!(
        points = points.len(),
        elements = elements.len(),
        samples = samples.len(),
        "parsed input records"
    );
    Scene::new(points, elements, samples)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| VizError::io(path, e))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Non-blank lines with their 1-based line numbers.
fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

/// Split a record into exactly `expected` whitespace-separated tokens.
fn tokens<'a>(raw: &'a str, expected: usize, source: &str, line: usize) -> Result<Vec<&'a str>> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() != expected {
        return Err(VizError::parse(
            source,
            line,
            raw,
            format!("expected {} field(s), found {}", expected, tokens.len()),
        ));
    }
    Ok(tokens)
}

fn token<T: FromStr>(t: &str, raw: &str, source: &str, line: usize) -> Result<T> {
    t.parse::<T>().map_err(|_| {
        let kind = std::any::type_name::<T>();
        VizError::parse(source, line, raw, format!("{:?} is not a valid {}", t, kind))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_points() {
        let pts = parse_points("0 0\n1.5 -2e-3\n\n", "points.txt").unwrap();
        assert_eq!(pts, vec![Point::new(0.0, 0.0), Point::new(1.5, -0.002)]);
    }

    #[test]
    fn test_parse_points_wrong_field_count() {
        let err = parse_points("0 0\n1 2 3\n", "points.txt").unwrap_err();
        match err {
            VizError::Parse { line, text, .. } => {
                assert_eq!(line, 2);
                assert_eq!(text, "1 2 3");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_parse_elements() {
        let els = parse_elements("0 1 3 4 0\n1 2 4 5 3\n", "elements.txt").unwrap();
        assert_eq!(els[1], Element::new([1, 2, 4, 5], 3));
    }

    #[test]
    fn test_parse_elements_keeps_unknown_region() {
        // Tags are checked when the overlay is drawn, not here.
        let els = parse_elements("0 1 3 4 7\n", "elements.txt").unwrap();
        assert_eq!(els[0].region, 7);
    }

    #[test]
    fn test_parse_elements_negative_vertex() {
        let err = parse_elements("0 -1 3 4 0\n", "elements.txt").unwrap_err();
        assert!(matches!(err, VizError::Parse { line: 1, .. }), "{}", err);
    }

    #[test]
    fn test_parse_field_exact_decimals() {
        let values = parse_field("0.1\n-3.2e-7\n  42  \n", "q.txt").unwrap();
        assert_eq!(values, vec![0.1, -3.2e-7, 42.0]);
    }

    #[test]
    fn test_parse_field_garbage() {
        let err = parse_field("1.0\nabc\n", "q.txt").unwrap_err();
        assert!(err.to_string().starts_with("q.txt:2:"), "{}", err);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_points(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, VizError::Io { .. }));
    }

    #[test]
    fn test_read_field_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "1e-5\n2e-5").unwrap();
        assert_eq!(read_field(&path).unwrap(), vec![1e-5, 2e-5]);
    }
}
