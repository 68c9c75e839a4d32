use std::fmt;

use crate::error::{Error, MalformedReason, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance, the A* heuristic on a 4-connected grid.
    pub fn manhattan(self, other: Position) -> u32 {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as u32
    }

    pub fn is_adjacent(self, other: Position) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Neighbour expansion order shared by every search.
    pub const SEARCH_ORDER: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn turn_right(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn turn_left(self) -> Direction {
        self.turn_right().turn_right().turn_right()
    }

    pub fn reverse(self) -> Direction {
        self.turn_right().turn_right()
    }

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
}

/// Sentinel for a distance that has not been reached.
pub const UNREACHABLE: u32 = u32::MAX;

/// One grid cell plus the per-run search bookkeeping.
///
/// The cell kind is fixed once the maze is generated; the remaining fields
/// belong to whichever algorithm currently owns the grid.
#[derive(Debug, Clone)]
pub struct Node {
    cell: Cell,
    pub distance: u32,
    pub heuristic: u32,
    pub visited: bool,
    /// Linear index of the predecessor on the discovered path.
    pub previous: Option<usize>,
}

impl Node {
    fn new(cell: Cell) -> Self {
        Node {
            cell,
            distance: UNREACHABLE,
            heuristic: 0,
            visited: false,
            previous: None,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.cell == Cell::Wall
    }

    fn reset(&mut self) {
        self.distance = UNREACHABLE;
        self.heuristic = 0;
        self.visited = false;
        self.previous = None;
    }
}

/// A rows x cols maze with one start and one end cell.
///
/// `Clone` produces a fully independent instance, which is how every
/// algorithm in a test iteration gets its own copy of the same layout.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    nodes: Vec<Node>,
    start: Position,
    end: Position,
}

impl Grid {
    /// A grid where every cell is a wall. Endpoints are placeholders until
    /// the generator sets them.
    pub(crate) fn filled(rows: usize, cols: usize) -> Self {
        Grid {
            rows,
            cols,
            nodes: vec![Node::new(Cell::Wall); rows * cols],
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        }
    }

    pub(crate) fn open_cell(&mut self, pos: Position) {
        let idx = self.idx(pos);
        self.nodes[idx].cell = Cell::Open;
    }

    pub(crate) fn set_endpoints(&mut self, start: Position, end: Position) {
        self.start = start;
        self.end = end;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    /// Linear index of an in-bounds position.
    #[inline]
    pub fn idx(&self, pos: Position) -> usize {
        pos.row * self.cols + pos.col
    }

    #[inline]
    pub fn position(&self, idx: usize) -> Position {
        Position::new(idx / self.cols, idx % self.cols)
    }

    pub fn node(&self, pos: Position) -> &Node {
        &self.nodes[self.idx(pos)]
    }

    pub(crate) fn node_at(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn node_at_mut(&mut self, idx: usize) -> &mut Node {
        &mut self.nodes[idx]
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        !self.contains(pos) || self.node(pos).is_wall()
    }

    pub fn is_open(&self, pos: Position) -> bool {
        !self.is_wall(pos)
    }

    pub fn wall_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_wall()).count()
    }

    pub fn open_count(&self) -> usize {
        self.nodes.len() - self.wall_count()
    }

    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.nodes.len())
            .filter(|&i| !self.nodes[i].is_wall())
            .map(|i| self.position(i))
    }

    /// In-bounds neighbour of `idx` in direction `dir`, wall or not.
    pub fn step(&self, idx: usize, dir: Direction) -> Option<usize> {
        let (dr, dc) = dir.delta();
        let row = (idx / self.cols).checked_add_signed(dr)?;
        let col = (idx % self.cols).checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Open neighbours of `idx` in Up, Down, Left, Right order.
    pub fn open_neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        Direction::SEARCH_ORDER
            .into_iter()
            .filter_map(move |dir| self.step(idx, dir))
            .filter(move |&n| !self.nodes[n].is_wall())
    }

    /// Open neighbours of a position, for callers outside the search code.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        self.open_neighbors(self.idx(pos))
            .map(|i| self.position(i))
            .collect()
    }

    /// Clear every node's search fields. The wall layout is untouched.
    pub fn reset_search(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Check both endpoints before a traversal and return their indices.
    pub fn validate_endpoints(&self, start: Position, end: Position) -> Result<(usize, usize)> {
        for pos in [start, end] {
            if !self.contains(pos) {
                return Err(Error::MalformedGrid(MalformedReason::OutOfBounds(pos)));
            }
            if self.node(pos).is_wall() {
                return Err(Error::MalformedGrid(MalformedReason::WallEndpoint(pos)));
            }
        }
        Ok((self.idx(start), self.idx(end)))
    }

    /// Walk `previous` links back from `end`. Returns the path from the
    /// search origin to `end`, or an empty vector when `end` was never
    /// settled.
    pub fn reconstruct_path(&self, end: Position) -> Vec<Position> {
        if !self.contains(end) || !self.node(end).visited {
            return Vec::new();
        }
        let mut path = Vec::new();
        let mut current = Some(self.idx(end));
        while let Some(idx) = current {
            path.push(self.position(idx));
            // A well-formed chain can never be longer than the grid.
            if path.len() > self.nodes.len() {
                return Vec::new();
            }
            current = self.nodes[idx].previous;
        }
        path.reverse();
        path
    }

    /// Parse a maze drawn with `#` walls, `.` open cells, `S` start and `E` end.
    pub fn parse(text: &str) -> Result<Grid> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if rows == 0 || cols == 0 {
            return Err(Error::Parse {
                line: 1,
                message: "empty grid".to_string(),
            });
        }

        let mut grid = Grid::filled(rows, cols);
        let mut start = None;
        let mut end = None;
        for (row, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(Error::Parse {
                    line: row + 1,
                    message: format!("expected {} columns", cols),
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let pos = Position::new(row, col);
                match ch {
                    '#' => {}
                    '.' => grid.open_cell(pos),
                    'S' | 'E' => {
                        grid.open_cell(pos);
                        let slot = if ch == 'S' { &mut start } else { &mut end };
                        if slot.replace(pos).is_some() {
                            return Err(Error::Parse {
                                line: row + 1,
                                message: format!("more than one '{}'", ch),
                            });
                        }
                    }
                    other => {
                        return Err(Error::Parse {
                            line: row + 1,
                            message: format!("unexpected character '{}'", other),
                        })
                    }
                }
            }
        }

        match (start, end) {
            (Some(start), Some(end)) => {
                grid.set_endpoints(start, end);
                Ok(grid)
            }
            _ => Err(Error::Parse {
                line: rows,
                message: "grid needs exactly one 'S' and one 'E'".to_string(),
            }),
        }
    }

    /// Draw the grid in the `parse` alphabet, with `*` on path cells.
    pub fn render(&self, path: &[Position]) -> String {
        let mut on_path = vec![false; self.nodes.len()];
        for &p in path {
            if self.contains(p) {
                on_path[self.idx(p)] = true;
            }
        }

        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let pos = Position::new(row, col);
                let idx = self.idx(pos);
                let ch = if pos == self.start {
                    'S'
                } else if pos == self.end {
                    'E'
                } else if self.nodes[idx].is_wall() {
                    '#'
                } else if on_path[idx] {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "
        S.#
        #..
        ##E
    ";

    #[test]
    fn parse_marks_walls_and_endpoints() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 3));
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.end(), Position::new(2, 2));
        assert_eq!(grid.wall_count(), 4);
        assert_eq!(grid.open_count(), 5);
        assert!(grid.is_wall(Position::new(0, 2)));
        assert!(grid.is_wall(Position::new(7, 7)));
    }

    #[test]
    fn parse_rejects_missing_end() {
        assert!(matches!(Grid::parse("S.\n.."), Err(Error::Parse { .. })));
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert!(matches!(Grid::parse("S..\n.E"), Err(Error::Parse { line: 2, .. })));
    }

    #[test]
    fn neighbours_follow_search_order_and_skip_walls() {
        let grid = Grid::parse(SMALL).unwrap();
        let centre = Position::new(1, 1);
        assert_eq!(
            grid.neighbors(centre),
            vec![Position::new(0, 1), Position::new(1, 2)]
        );
    }

    #[test]
    fn step_stays_in_bounds() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!(grid.step(0, Direction::Up), None);
        assert_eq!(grid.step(0, Direction::Left), None);
        assert_eq!(grid.step(0, Direction::Right), Some(1));
        assert_eq!(grid.step(8, Direction::Down), None);
    }

    #[test]
    fn validate_endpoints_rejects_walls_and_outside() {
        let grid = Grid::parse(SMALL).unwrap();
        assert!(matches!(
            grid.validate_endpoints(Position::new(0, 2), grid.end()),
            Err(Error::MalformedGrid(MalformedReason::WallEndpoint(_)))
        ));
        assert!(matches!(
            grid.validate_endpoints(grid.start(), Position::new(3, 0)),
            Err(Error::MalformedGrid(MalformedReason::OutOfBounds(_)))
        ));
        assert_eq!(grid.validate_endpoints(grid.start(), grid.end()).unwrap(), (0, 8));
    }

    #[test]
    fn reconstruct_path_is_empty_when_end_unvisited() {
        let grid = Grid::parse(SMALL).unwrap();
        assert!(grid.reconstruct_path(grid.end()).is_empty());
    }

    #[test]
    fn turns_are_consistent() {
        for dir in Direction::SEARCH_ORDER {
            assert_eq!(dir.turn_right().turn_left(), dir);
            assert_eq!(dir.reverse().reverse(), dir);
        }
    }

    #[test]
    fn render_round_trips_with_path_overlay() {
        let grid = Grid::parse(SMALL).unwrap();
        assert_eq!(grid.render(&[]), "S.#\n#..\n##E\n");
        let path = [
            Position::new(0, 0),
            Position::new(0, 1),
            Position::new(1, 1),
            Position::new(1, 2),
            Position::new(2, 2),
        ];
        assert_eq!(grid.render(&path), "S*#\n#**\n##E\n");
    }
}
