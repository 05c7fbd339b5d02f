/// Liveness of a single cell.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Conway's transition: what this cell becomes given its number of live neighbors.
    ///
    /// ```notrust
    /// Dead  + 3        -> Alive  (birth)
    /// Alive + 2 or 3   -> Alive  (survival)
    /// anything else    -> Dead
    /// ```
    pub fn next(self, alive_neighbors: u8) -> Cell {
        match (self, alive_neighbors) {
            (Cell::Dead, 3) => Cell::Alive,
            (Cell::Alive, 2..=3) => Cell::Alive,
            _ => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}
