use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::CellOffset;
use crate::GridSize;
use crate::cell::Cell;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid grid dimensions {cols}x{rows}, both must be positive")]
    InvalidDimensions { cols: GridSize, rows: GridSize },

    #[error("Unexpected '{got}' in pattern row {row}, expected '#' or '.'")]
    InvalidPattern { row: usize, got: char },

    #[error("Pattern row {row} is {got} cells wide, expected {exp}")]
    RaggedRow { row: usize, exp: usize, got: usize },
}

/// A fixed size field of cells on a torus.
///
/// Every coordinate, however large or negative, resolves to a cell: `x` is taken modulo `cols`
/// and `y` modulo `rows`. The last column neighbors the first, and likewise for rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row major cell storage, `cols * rows` long
    cells: Vec<Cell>,

    cols: GridSize,
    rows: GridSize,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// Both dimensions must be positive, and `cols * rows` must fit in an `isize`.
    pub fn new(cols: GridSize, rows: GridSize) -> Result<Self, GridError> {
        let len = cols
            .checked_mul(rows)
            .filter(|&n| n != 0 && n <= CellOffset::MAX as usize)
            .ok_or(GridError::InvalidDimensions { cols, rows })?;

        Ok(Self {
            cells: vec![Cell::Dead; len],
            cols,
            rows,
        })
    }

    pub fn cols(&self) -> GridSize {
        self.cols
    }

    pub fn rows(&self) -> GridSize {
        self.rows
    }

    pub fn get(&self, x: CellOffset, y: CellOffset) -> Cell {
        self.cells[self.wrap(x, y)]
    }

    pub fn is_alive(&self, x: CellOffset, y: CellOffset) -> bool {
        self.get(x, y).is_alive()
    }

    pub fn set(&mut self, x: CellOffset, y: CellOffset, cell: Cell) {
        let i = self.wrap(x, y);
        self.cells[i] = cell;
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Coordinates of every live cell, in row major order
    pub fn alive_cells(&self) -> impl Iterator<Item = (GridSize, GridSize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(|(i, _)| self.xy_to(i))
    }

    /// Count the live cells among the 8 surrounding `(x, y)`, wrapping around the edges.
    ///
    /// On grids one cell wide (or tall) some offsets wrap back onto `(x, y)` itself. Those are
    /// skipped, so a cell never counts as its own neighbor.
    pub fn count_alive_adjacent(&self, x: CellOffset, y: CellOffset) -> u8 {
        let (cx, cy) = self.wrap_xy(x, y);
        let center = self.xy_from(cx, cy);
        let mut count = 0;

        // -1, 0 and 1 as unsigned steps on the wrapped coordinates
        let dxs = [self.cols - 1, 0, 1];
        let dys = [self.rows - 1, 0, 1];

        for (j, dy) in dys.into_iter().enumerate() {
            for (k, dx) in dxs.into_iter().enumerate() {
                if j == 1 && k == 1 {
                    continue;
                }

                let i = self.xy_from((cx + dx) % self.cols, (cy + dy) % self.rows);
                if i != center && self.cells[i].is_alive() {
                    count += 1;
                }
            }
        }

        count
    }

    /// Write the generation following `self` into `next`.
    ///
    /// `self` is only read, so every neighbor count sees the same generation no matter what
    /// order the cells of `next` are written in.
    pub fn next_generation_into(&self, next: &mut Grid) {
        assert!(
            self.cols == next.cols && self.rows == next.rows,
            "double buffers must share dimensions"
        );

        for (i, cell) in next.cells.iter_mut().enumerate() {
            let (x, y) = self.xy_to(i);
            let (x, y) = (x as CellOffset, y as CellOffset);

            *cell = self.cells[i].next(self.count_alive_adjacent(x, y));
        }
    }

    /// Overwrite every cell, each independently alive with probability `density`.
    ///
    /// `density` must lie in `[0, 1]`, callers check it first.
    pub(crate) fn fill_random<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::from(rng.random_bool(density));
        }
    }

    fn wrap(&self, x: CellOffset, y: CellOffset) -> usize {
        let (x, y) = self.wrap_xy(x, y);

        self.xy_from(x, y)
    }

    fn wrap_xy(&self, x: CellOffset, y: CellOffset) -> (usize, usize) {
        (
            x.rem_euclid(self.cols as CellOffset) as usize,
            y.rem_euclid(self.rows as CellOffset) as usize,
        )
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.cols, n / self.cols)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }
}

/// One line per row, `#` for alive and `.` for dead.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                let c = if cell.is_alive() { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Parses the output of `Display`. Leading and trailing whitespace on each line is ignored, as
/// are blank lines.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let cols = lines.first().map_or(0, |l| l.chars().count());
        let rows = lines.len();
        let mut grid = Grid::new(cols, rows)?;

        for (y, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != cols {
                return Err(GridError::RaggedRow { row: y, exp: cols, got });
            }

            for (x, c) in line.chars().enumerate() {
                let cell = match c {
                    '#' => Cell::Alive,
                    '.' => Cell::Dead,
                    got => return Err(GridError::InvalidPattern { row: y, got }),
                };

                let i = grid.xy_from(x, y);
                grid.cells[i] = cell;
            }
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Grid;
    use super::GridError;
    use crate::cell::Cell;

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(GridError::InvalidDimensions { cols: 0, rows: 5 })
        );
        assert_eq!(
            Grid::new(5, 0),
            Err(GridError::InvalidDimensions { cols: 5, rows: 0 })
        );
    }

    #[test]
    fn oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 2),
            Err(GridError::InvalidDimensions {
                cols: usize::MAX,
                rows: 2
            })
        );
        assert_eq!(
            Grid::new(isize::MAX as usize + 1, 1),
            Err(GridError::InvalidDimensions {
                cols: isize::MAX as usize + 1,
                rows: 1
            })
        );
    }

    #[test]
    fn count_at_extreme_coordinates() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.set(2, 2, Cell::Alive);

        // isize::MAX = 3 (mod 4) and isize::MIN = 0 (mod 4)
        assert_eq!(grid.count_alive_adjacent(isize::MAX, 0), 1);
        assert_eq!(grid.count_alive_adjacent(isize::MAX, isize::MAX), 2);
        assert_eq!(grid.count_alive_adjacent(isize::MIN, isize::MIN), 0);
        assert_eq!(grid.count_alive_adjacent(isize::MIN + 1, isize::MIN + 1), 2);
    }

    #[test]
    fn new_grid_is_dead() {
        let grid = Grid::new(7, 3).unwrap();

        assert_eq!(grid.cols(), 7);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn set_wraps_negative_coordinates() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(-1, -1, Cell::Alive);

        assert!(grid.is_alive(3, 2));
        assert_eq!(grid.alive_cells().collect::<Vec<_>>(), vec![(3, 2)]);
    }

    #[test]
    fn corners_are_adjacent() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.set(4, 4, Cell::Alive);
        grid.set(4, 0, Cell::Alive);
        grid.set(0, 4, Cell::Alive);

        assert_eq!(grid.count_alive_adjacent(0, 0), 3);
    }

    #[test]
    fn count_ignores_the_cell_itself() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(1, 1, Cell::Alive);

        assert_eq!(grid.count_alive_adjacent(1, 1), 0);
        assert_eq!(grid.count_alive_adjacent(0, 0), 1);
    }

    #[test]
    fn single_column_does_not_count_itself() {
        let mut grid = Grid::new(1, 4).unwrap();
        grid.set(0, 0, Cell::Alive);
        grid.set(0, 1, Cell::Alive);

        // (0, 1) is reached through dx = -1, 0 and 1, all wrapping to the same column
        assert_eq!(grid.count_alive_adjacent(0, 0), 3);
        assert_eq!(grid.count_alive_adjacent(0, 2), 3);
    }

    #[test]
    fn fill_random_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut grid = Grid::new(10, 10).unwrap();

        grid.fill_random(&mut rng, 1.0);
        assert_eq!(grid.population(), 100);

        grid.fill_random(&mut rng, 0.0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn display() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.set(1, 0, Cell::Alive);
        grid.set(3, 1, Cell::Alive);

        insta::assert_snapshot!(grid.to_string(), @r"
        .#..
        ...#
        ");
    }

    #[test]
    fn parse_pattern() {
        let grid: Grid = "
            .#.
            ..#
            ###
        "
        .parse()
        .unwrap();

        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.population(), 5);
        assert!(grid.is_alive(1, 0));
        assert!(!grid.is_alive(0, 0));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "".parse::<Grid>(),
            Err(GridError::InvalidDimensions { cols: 0, rows: 0 })
        );
        assert_eq!(
            "..\n.x".parse::<Grid>(),
            Err(GridError::InvalidPattern { row: 1, got: 'x' })
        );
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(GridError::RaggedRow {
                row: 1,
                exp: 3,
                got: 2
            })
        );
    }

    fn random_grid() -> impl Strategy<Value = Grid> {
        (1usize..16, 1usize..16, any::<u64>()).prop_map(|(cols, rows, seed)| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut grid = Grid::new(cols, rows).unwrap();
            grid.fill_random(&mut rng, 0.5);
            grid
        })
    }

    proptest! {
        #[test]
        fn indexing_is_periodic(
            grid in random_grid(),
            x in -64isize..64,
            y in -64isize..64,
            k in -8isize..8,
            m in -8isize..8,
        ) {
            let (w, h) = (grid.cols() as isize, grid.rows() as isize);

            prop_assert_eq!(grid.get(x, y), grid.get(x + k * w, y + m * h));
        }

        #[test]
        fn neighbor_count_in_range(grid in random_grid(), x in any::<isize>(), y in any::<isize>()) {
            prop_assert!(grid.count_alive_adjacent(x, y) <= 8);
        }

        #[test]
        fn neighbor_count_is_periodic(
            grid in random_grid(),
            x in -64isize..64,
            y in -64isize..64,
            k in -8isize..8,
            m in -8isize..8,
        ) {
            let (w, h) = (grid.cols() as isize, grid.rows() as isize);

            prop_assert_eq!(
                grid.count_alive_adjacent(x, y),
                grid.count_alive_adjacent(x + k * w, y + m * h)
            );
        }

        #[test]
        fn display_parse_round_trip(grid in random_grid()) {
            let parsed: Grid = grid.to_string().parse().unwrap();

            prop_assert_eq!(parsed, grid);
        }
    }
}
