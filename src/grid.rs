use crate::error::{Endpoint, GridError, SearchError};
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::grid::{BoolGrid, ValueGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Width of the reference board.
pub const DEFAULT_WIDTH: usize = 50;
/// Height of the reference board.
pub const DEFAULT_HEIGHT: usize = 30;
/// Chance that a randomly generated cell is passable.
pub const DEFAULT_PASSABLE_PROBABILITY: f64 = 0.78;

/// The unique key of a coordinate, `"x-y"`.
pub fn key(point: &Point) -> String {
    format!("{}-{}", point.x, point.y)
}

/// Parameters for [Grid::random].
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub passable_probability: f64,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            passable_probability: DEFAULT_PASSABLE_PROBABILITY,
        }
    }
}

/// One position on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub position: Point,
    pub passable: bool,
}

impl Cell {
    pub fn key(&self) -> String {
        key(&self.position)
    }
}

/// A fixed-size 4-connected grid. Blocked cells are stored as [true] in the underlying
/// [BoolGrid], passable ones as [false]. Passability never changes after construction, so the
/// connected components kept in a [UnionFind] are computed once up front.
#[derive(Clone, Debug)]
pub struct Grid {
    grid: BoolGrid,
    components: UnionFind<usize>,
}

impl Grid {
    /// An open grid in which every cell is passable.
    pub fn new(width: usize, height: usize) -> Grid {
        Grid::from_blocked(BoolGrid::new(width, height, false))
    }

    /// Generates a grid in which every cell is independently passable with
    /// `config.passable_probability`.
    pub fn random<R: Rng>(config: &GridConfig, rng: &mut R) -> Result<Grid, GridError> {
        check_dimensions(config.width, config.height)?;
        let p = config.passable_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(GridError::InvalidProbability(p));
        }
        let mut grid = BoolGrid::new(config.width, config.height, false);
        for y in 0..config.height as i32 {
            for x in 0..config.width as i32 {
                grid.set(x, y, !rng.gen_bool(p));
            }
        }
        info!(
            "Generated random {}x{} grid with passable probability {}",
            config.width, config.height, p
        );
        Ok(Grid::from_blocked(grid))
    }

    /// Builds a grid from an explicit passability map. Every coordinate of the
    /// `width` x `height` rectangle must be supplied exactly once.
    pub fn from_cells<I>(width: usize, height: usize, cells: I) -> Result<Grid, GridError>
    where
        I: IntoIterator<Item = (Point, bool)>,
    {
        check_dimensions(width, height)?;
        let mut grid = BoolGrid::new(width, height, false);
        let mut supplied = BoolGrid::new(width, height, false);
        let mut count = 0;
        for (point, passable) in cells {
            if !within(width, height, &point) {
                return Err(GridError::OutOfBounds {
                    key: key(&point),
                    width,
                    height,
                });
            }
            if supplied.get(point.x, point.y) {
                return Err(GridError::DuplicateCell { key: key(&point) });
            }
            supplied.set(point.x, point.y, true);
            grid.set(point.x, point.y, !passable);
            count += 1;
        }
        let total = width * height;
        if count < total {
            let first = points(width, height)
                .find(|p| !supplied.get(p.x, p.y))
                .map(|p| key(&p))
                .unwrap_or_default();
            return Err(GridError::MissingCells {
                missing: total - count,
                first,
            });
        }
        Ok(Grid::from_blocked(grid))
    }

    /// Parses a picture of the grid, one string per row from `y = 0` downwards, where `.` is
    /// passable and `#` is blocked.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                let point = Point::new(x as i32, y as i32);
                let passable = match c {
                    '.' => true,
                    '#' => false,
                    found => {
                        return Err(GridError::UnknownCell {
                            found,
                            key: key(&point),
                        })
                    }
                };
                cells.push((point, passable));
            }
        }
        Grid::from_cells(width, height, cells)
    }

    fn from_blocked(grid: BoolGrid) -> Grid {
        let mut base_grid = Grid {
            components: UnionFind::new(grid.width() * grid.height()),
            grid,
        };
        base_grid.generate_components();
        base_grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn in_bounds(&self, point: &Point) -> bool {
        within(self.width(), self.height(), point)
    }

    /// Out-of-bounds positions are never passable.
    pub fn is_passable(&self, point: &Point) -> bool {
        self.in_bounds(point) && !self.grid.get(point.x, point.y)
    }

    pub fn cell(&self, point: &Point) -> Option<Cell> {
        self.in_bounds(point).then(|| Cell {
            position: *point,
            passable: !self.grid.get(point.x, point.y),
        })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        points(self.width(), self.height()).map(move |position| Cell {
            position,
            passable: !self.grid.get(position.x, position.y),
        })
    }

    /// The passable cells among the four axis-aligned neighbours of `point`, enumerated up,
    /// right, down, left.
    pub fn neighbours(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        [
            Point::new(point.x, point.y - 1),
            Point::new(point.x + 1, point.y),
            Point::new(point.x, point.y + 1),
            Point::new(point.x - 1, point.y),
        ]
        .into_iter()
        .filter(|p| self.is_passable(p))
        .collect()
    }

    /// Checks that both endpoints of a search lie on passable cells.
    pub fn validate_endpoints(&self, start: &Point, goal: &Point) -> Result<(), SearchError> {
        for (endpoint, point) in [(Endpoint::Start, start), (Endpoint::Goal, goal)] {
            if !self.in_bounds(point) {
                return Err(SearchError::OutOfBounds {
                    endpoint,
                    key: key(point),
                });
            }
            if !self.is_passable(point) {
                return Err(SearchError::Blocked {
                    endpoint,
                    key: key(point),
                });
            }
        }
        Ok(())
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        point.y as usize * self.width() + point.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are passable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.is_passable(start)
            && self.is_passable(goal)
            && self
                .components
                .equiv(self.get_ix_point(start), self.get_ix_point(goal))
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components. Only the lower and right neighbours are joined; the others are covered by
    /// symmetry.
    fn generate_components(&mut self) {
        info!(
            "Generating connected components for {}x{} grid",
            self.width(),
            self.height()
        );
        self.components = UnionFind::new(self.width() * self.height());
        for point in points(self.width(), self.height()) {
            if !self.is_passable(&point) {
                continue;
            }
            let parent_ix = self.get_ix_point(&point);
            for p in [
                Point::new(point.x, point.y + 1),
                Point::new(point.x + 1, point.y),
            ] {
                if self.is_passable(&p) {
                    let ix = self.get_ix_point(&p);
                    self.components.union(parent_ix, ix);
                }
            }
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), GridError> {
    if width == 0 || height == 0 || width > i32::MAX as usize || height > i32::MAX as usize {
        Err(GridError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}

fn within(width: usize, height: usize, point: &Point) -> bool {
    point.x >= 0 && point.y >= 0 && (point.x as usize) < width && (point.y as usize) < height
}

fn points(width: usize, height: usize) -> impl Iterator<Item = Point> {
    (0..height as i32).flat_map(move |y| (0..width as i32).map(move |x| Point::new(x, y)))
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() as i32 {
            let row = (0..self.width() as i32)
                .map(|x| if self.grid.get(x, y) { '#' } else { '.' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn neighbours_are_ordered_and_filtered() {
        //  ___
        // |.#.|
        // |...|
        // |.#.|
        //  ___
        let grid = Grid::from_rows(&[".#.", "...", ".#."]).unwrap();
        let centre = Point::new(1, 1);
        assert_eq!(
            grid.neighbours(&centre).to_vec(),
            vec![Point::new(2, 1), Point::new(0, 1)]
        );
        let corner = Point::new(0, 0);
        assert_eq!(grid.neighbours(&corner).to_vec(), vec![Point::new(0, 1)]);
    }

    #[test]
    fn open_grid_neighbours_go_up_right_down_left() {
        let grid = Grid::new(3, 3);
        assert_eq!(
            grid.neighbours(&Point::new(1, 1)).to_vec(),
            vec![
                Point::new(1, 0),
                Point::new(2, 1),
                Point::new(1, 2),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn rejects_malformed_cell_maps() {
        let duplicate = vec![
            (Point::new(0, 0), true),
            (Point::new(1, 0), true),
            (Point::new(0, 0), false),
        ];
        assert_eq!(
            Grid::from_cells(2, 1, duplicate).unwrap_err(),
            GridError::DuplicateCell {
                key: "0-0".to_owned()
            }
        );
        let missing = vec![(Point::new(1, 0), true)];
        assert_eq!(
            Grid::from_cells(2, 1, missing).unwrap_err(),
            GridError::MissingCells {
                missing: 1,
                first: "0-0".to_owned()
            }
        );
        let outside = vec![(Point::new(2, 0), true)];
        assert!(matches!(
            Grid::from_cells(2, 1, outside),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(matches!(
            Grid::from_rows(&["..", "."]),
            Err(GridError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            Grid::from_rows(&[".x"]),
            Err(GridError::UnknownCell { found: 'x', .. })
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            Grid::from_rows(&empty),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn random_grid_respects_config() {
        let mut rng = StdRng::seed_from_u64(0);
        let grid = Grid::random(&GridConfig::default(), &mut rng).unwrap();
        assert_eq!(grid.width(), DEFAULT_WIDTH);
        assert_eq!(grid.height(), DEFAULT_HEIGHT);
        assert_eq!(grid.cells().count(), DEFAULT_WIDTH * DEFAULT_HEIGHT);

        let full = GridConfig {
            width: 4,
            height: 3,
            passable_probability: 1.0,
        };
        assert!(Grid::random(&full, &mut rng)
            .unwrap()
            .cells()
            .all(|c| c.passable));

        let bad = GridConfig {
            passable_probability: 1.5,
            ..GridConfig::default()
        };
        assert_eq!(
            Grid::random(&bad, &mut rng).unwrap_err(),
            GridError::InvalidProbability(1.5)
        );
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        // |.#.|
        // |.#.|
        let grid = Grid::from_rows(&[".#.", ".#."]).unwrap();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(!grid.reachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(!grid.reachable(&p1, &p4));
        assert_eq!(grid.get_component(&p1), grid.get_component(&p3));
    }

    #[test]
    fn diagonal_gap_does_not_connect() {
        //  __
        // |.#|
        // |#.|
        //  __
        let grid = Grid::from_rows(&[".#", "#."]).unwrap();
        assert!(!grid.reachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn validates_endpoints() {
        let grid = Grid::from_rows(&["..", ".#"]).unwrap();
        let start = Point::new(0, 0);
        assert!(grid.validate_endpoints(&start, &Point::new(1, 0)).is_ok());
        assert_eq!(
            grid.validate_endpoints(&start, &Point::new(1, 1)),
            Err(SearchError::Blocked {
                endpoint: Endpoint::Goal,
                key: "1-1".to_owned()
            })
        );
        assert_eq!(
            grid.validate_endpoints(&Point::new(-1, 0), &start),
            Err(SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                key: "-1-0".to_owned()
            })
        );
    }

    #[test]
    fn display_draws_blocked_cells() {
        let grid = Grid::from_rows(&[".#", ".."]).unwrap();
        assert_eq!(grid.to_string(), ".#\n..\n");
        assert_eq!(grid.cell(&Point::new(1, 0)).unwrap().key(), "1-0");
        assert!(grid.cell(&Point::new(2, 0)).is_none());
    }
}
