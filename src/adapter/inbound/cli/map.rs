//! Equirectangular world map with a position marker.
//!
//! The map is a plain character grid: a graticule every 30°, with the
//! equator and prime meridian emphasised. The marker is an ellipse sized in
//! cells, wider than tall to make up for terminal cell proportions, and
//! wraps across the antimeridian.

use crate::domain::PositionRecord;
use crate::infrastructure::config::DisplayConfig;

const MARKER_CENTER: char = '@';
const MARKER_FILL: char = 'o';
const BACKGROUND: char = ' ';
const GRATICULE: char = '.';
const EQUATOR: char = '-';
const MERIDIAN: char = '|';
const CROSSING: char = '+';

/// Renders positions onto a fixed-size character map.
#[derive(Debug, Clone)]
pub struct WorldMap {
    width: usize,
    height: usize,
    radius: usize,
}

impl WorldMap {
    /// Create a map. Sizes are clamped to at least 2x2 cells.
    #[must_use]
    pub fn new(width: usize, height: usize, radius: usize) -> Self {
        Self {
            width: width.max(2),
            height: height.max(2),
            radius,
        }
    }

    #[must_use]
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.map_width, config.map_height, config.marker_radius)
    }

    /// Grid cell `(column, row)` for a coordinate.
    ///
    /// Out-of-range coordinates are clamped to the map edge.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn project(&self, latitude: f64, longitude: f64) -> (usize, usize) {
        let x = ((longitude + 180.0) / 360.0 * self.width as f64).floor();
        let y = ((90.0 - latitude) / 180.0 * self.height as f64).floor();
        let col = x.clamp(0.0, (self.width - 1) as f64) as usize;
        let row = y.clamp(0.0, (self.height - 1) as f64) as usize;
        (col, row)
    }

    /// Render the map with the marker, framed, one line per row.
    #[must_use]
    pub fn render(&self, record: &PositionRecord) -> String {
        self.render_with(record, |c| c.to_string())
    }

    /// Render, passing marker cells through `paint` for styling.
    pub fn render_with<F>(&self, record: &PositionRecord, paint: F) -> String
    where
        F: Fn(char) -> String,
    {
        let (marker_col, marker_row) = self.project(record.latitude, record.longitude);
        let border = format!("+{}+", "-".repeat(self.width));

        let mut out = String::with_capacity((self.width + 3) * (self.height + 2));
        out.push_str(&border);
        out.push('\n');

        for row in 0..self.height {
            out.push('|');
            for col in 0..self.width {
                let cell = if col == marker_col && row == marker_row {
                    paint(MARKER_CENTER)
                } else if self.in_marker(col, row, marker_col, marker_row) {
                    paint(MARKER_FILL)
                } else {
                    self.base_cell(col, row).to_string()
                };
                out.push_str(&cell);
            }
            out.push_str("|\n");
        }

        out.push_str(&border);
        out
    }

    fn in_marker(&self, col: usize, row: usize, center_col: usize, center_row: usize) -> bool {
        if self.radius == 0 {
            return false;
        }
        let raw_dx = col.abs_diff(center_col);
        let dx = raw_dx.min(self.width - raw_dx);
        let dy = row.abs_diff(center_row);
        let r = self.radius;
        // Ellipse with horizontal semi-axis 2r and vertical semi-axis r.
        dx * dx + 4 * dy * dy <= 4 * r * r
    }

    fn base_cell(&self, col: usize, row: usize) -> char {
        let on_equator = row == self.row_of_latitude(0.0);
        let on_meridian = col == self.col_of_longitude(0.0);
        match (on_equator, on_meridian) {
            (true, true) => CROSSING,
            (true, false) => EQUATOR,
            (false, true) => MERIDIAN,
            (false, false) if self.on_graticule(col, row) => GRATICULE,
            (false, false) => BACKGROUND,
        }
    }

    fn on_graticule(&self, col: usize, row: usize) -> bool {
        let lines = |count: i32, project: &dyn Fn(f64) -> usize, index: usize| {
            (-count..=count).any(|k| project(f64::from(k) * 30.0) == index)
        };
        let on_parallel = lines(2, &|lat: f64| self.row_of_latitude(lat), row);
        let on_meridian = lines(5, &|lon: f64| self.col_of_longitude(lon), col);
        on_parallel && on_meridian
    }

    fn row_of_latitude(&self, latitude: f64) -> usize {
        self.project(latitude, 0.0).1
    }

    fn col_of_longitude(&self, longitude: f64) -> usize {
        self.project(0.0, longitude).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rendered: &str) -> Vec<Vec<char>> {
        rendered
            .lines()
            .skip(1)
            .take_while(|line| line.starts_with('|'))
            .map(|line| line.chars().skip(1).collect::<Vec<_>>())
            .map(|mut row| {
                row.pop();
                row
            })
            .collect()
    }

    #[test]
    fn projects_corners_and_center() {
        let map = WorldMap::new(72, 24, 1);
        assert_eq!(map.project(90.0, -180.0), (0, 0));
        assert_eq!(map.project(-90.0, 180.0), (71, 23));
        assert_eq!(map.project(0.0, 0.0), (36, 12));
    }

    #[test]
    fn out_of_range_coordinates_are_clamped() {
        let map = WorldMap::new(10, 5, 0);
        assert_eq!(map.project(200.0, -500.0), (0, 0));
        assert_eq!(map.project(-200.0, 500.0), (9, 4));
    }

    #[test]
    fn render_has_frame_and_dimensions() {
        let map = WorldMap::new(20, 8, 0);
        let rendered = map.render(&PositionRecord::new(0.0, 0.0, 0));
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines.iter().all(|l| l.chars().count() == 22));
        assert_eq!(lines[0], format!("+{}+", "-".repeat(20)));
    }

    #[test]
    fn marker_center_sits_at_projected_cell() {
        let map = WorldMap::new(72, 24, 0);
        let record = PositionRecord::new(51.2, -0.5, 0);
        let cells = grid(&map.render(&record));
        let (col, row) = map.project(51.2, -0.5);

        assert_eq!(cells[row][col], MARKER_CENTER);
        let markers = cells.iter().flatten().filter(|c| **c == MARKER_CENTER).count();
        assert_eq!(markers, 1);
    }

    #[test]
    fn marker_radius_fills_neighbours() {
        let map = WorldMap::new(72, 24, 1);
        let record = PositionRecord::new(10.0, 20.0, 0);
        let cells = grid(&map.render(&record));
        let (col, row) = map.project(10.0, 20.0);

        assert_eq!(cells[row][col + 2], MARKER_FILL);
        assert_eq!(cells[row - 1][col], MARKER_FILL);
        assert_ne!(cells[row - 1][col + 2], MARKER_FILL);
    }

    #[test]
    fn marker_wraps_across_antimeridian() {
        let map = WorldMap::new(72, 24, 1);
        let record = PositionRecord::new(0.0, 179.9, 0);
        let cells = grid(&map.render(&record));
        let (_, row) = map.project(0.0, 179.9);

        assert_eq!(cells[row][71], MARKER_CENTER);
        assert_eq!(cells[row][0], MARKER_FILL);
    }

    #[test]
    fn equator_and_meridian_are_drawn() {
        let map = WorldMap::new(72, 24, 0);
        let cells = grid(&map.render(&PositionRecord::new(60.0, 100.0, 0)));

        assert_eq!(cells[12][36], CROSSING);
        assert_eq!(cells[12][5], EQUATOR);
        assert_eq!(cells[3][36], MERIDIAN);
    }

    #[test]
    fn paint_only_touches_marker_cells() {
        let map = WorldMap::new(20, 8, 0);
        let rendered = map.render_with(&PositionRecord::new(0.0, 90.0, 0), |c| format!("[{c}]"));
        assert_eq!(rendered.matches('[').count(), 1);
        assert!(rendered.contains("[@]"));
    }
}
