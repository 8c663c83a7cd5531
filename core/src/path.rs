//! Fixed enemy path and board geometry.
//!
//! The path is an immutable polyline of grid waypoints laid out when the
//! board is built; enemies address it with a `(segment, progress)` pair and
//! never see raw coordinates. Placement rules and targeting both depend on
//! the membership and interpolation helpers defined here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{CellCoord, CellPoint};

/// Minimum number of waypoints a path must carry to form a segment.
pub const MIN_WAYPOINTS: usize = 2;

/// Reasons a board description is rejected at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The waypoint list is too short to form a single segment.
    #[error("path needs at least {MIN_WAYPOINTS} waypoints, found {waypoints}")]
    PathTooShort {
        /// Number of waypoints provided.
        waypoints: usize,
    },
    /// The grid has a zero-sized dimension.
    #[error("board dimensions {columns}x{rows} leave no cells")]
    DegenerateGrid {
        /// Columns requested for the board.
        columns: u32,
        /// Rows requested for the board.
        rows: u32,
    },
    /// A waypoint lies outside the grid bounds.
    #[error("waypoint ({x}, {y}) lies outside the {columns}x{rows} board")]
    WaypointOutOfBounds {
        /// Column of the offending waypoint.
        x: u32,
        /// Row of the offending waypoint.
        y: u32,
        /// Columns available on the board.
        columns: u32,
        /// Rows available on the board.
        rows: u32,
    },
}

/// Immutable ordered polyline that enemies walk from first to last waypoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    waypoints: Vec<CellCoord>,
}

impl Path {
    /// Creates a path from an ordered waypoint list.
    ///
    /// Fails when fewer than [`MIN_WAYPOINTS`] waypoints are provided.
    pub fn new(waypoints: Vec<CellCoord>) -> Result<Self, BoardError> {
        if waypoints.len() < MIN_WAYPOINTS {
            return Err(BoardError::PathTooShort {
                waypoints: waypoints.len(),
            });
        }
        Ok(Self { waypoints })
    }

    /// Ordered waypoints that make up the path.
    #[must_use]
    pub fn waypoints(&self) -> &[CellCoord] {
        &self.waypoints
    }

    /// Number of waypoints on the path.
    ///
    /// An enemy whose segment index reaches this value has escaped.
    #[must_use]
    pub fn waypoint_count(&self) -> u32 {
        self.waypoints.len() as u32
    }

    /// Reports whether the given cell is part of the path.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.waypoints.iter().any(|waypoint| *waypoint == cell)
    }

    /// Interpolated position for a `(segment, progress)` pair, offset to
    /// cell centers.
    ///
    /// Indexes past the final waypoint clamp to it, so the last segment and
    /// any out-of-range query resolve to the path's end. Pure; `progress`
    /// is expected in `[0, 1)`.
    #[must_use]
    pub fn position_at(&self, segment: u32, progress: f32) -> CellPoint {
        let last = self.waypoints.len() - 1;
        let current = self.waypoints[(segment as usize).min(last)];
        let next = self.waypoints[(segment as usize + 1).min(last)];
        let x = current.x() as f32 + (next.x() as f32 - current.x() as f32) * progress + 0.5;
        let y = current.y() as f32 + (next.y() as f32 - current.y() as f32) * progress + 0.5;
        CellPoint::new(x, y)
    }
}

/// Play field combining grid bounds with the enemy path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: u32,
    rows: u32,
    path: Path,
}

impl Board {
    /// Creates a board after checking that every waypoint fits the grid.
    pub fn new(columns: u32, rows: u32, path: Path) -> Result<Self, BoardError> {
        if columns == 0 || rows == 0 {
            return Err(BoardError::DegenerateGrid { columns, rows });
        }
        for waypoint in path.waypoints() {
            if waypoint.x() >= columns || waypoint.y() >= rows {
                return Err(BoardError::WaypointOutOfBounds {
                    x: waypoint.x(),
                    y: waypoint.y(),
                    columns,
                    rows,
                });
            }
        }
        Ok(Self {
            columns,
            rows,
            path,
        })
    }

    /// Number of columns on the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows on the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// The enemy path laid across the board.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Reports whether the given cell lies within the board bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.x() < self.columns && cell.y() < self.rows
    }

    /// The standard 16x11 board with its single winding path.
    #[must_use]
    pub fn standard() -> Self {
        let waypoints = STANDARD_WAYPOINTS
            .iter()
            .map(|&(x, y)| CellCoord::new(x, y))
            .collect();
        let path = Path::new(waypoints).expect("standard path has enough waypoints");
        Self::new(STANDARD_COLUMNS, STANDARD_ROWS, path).expect("standard path fits the board")
    }
}

/// Columns on the standard board.
pub const STANDARD_COLUMNS: u32 = 16;

/// Rows on the standard board.
pub const STANDARD_ROWS: u32 = 11;

const STANDARD_WAYPOINTS: [(u32, u32); 30] = [
    (0, 6),
    (1, 6),
    (2, 6),
    (3, 6),
    (3, 5),
    (3, 4),
    (3, 3),
    (3, 2),
    (4, 2),
    (5, 2),
    (6, 2),
    (7, 2),
    (7, 3),
    (7, 4),
    (7, 5),
    (7, 6),
    (7, 7),
    (7, 8),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 8),
    (11, 7),
    (11, 6),
    (11, 5),
    (11, 4),
    (12, 4),
    (13, 4),
    (14, 4),
    (15, 4),
];

#[cfg(test)]
mod tests {
    use super::{Board, BoardError, Path, STANDARD_COLUMNS, STANDARD_ROWS};
    use crate::CellCoord;

    fn straight_path() -> Path {
        let waypoints = vec![
            CellCoord::new(0, 0),
            CellCoord::new(1, 0),
            CellCoord::new(2, 0),
        ];
        Path::new(waypoints).expect("three waypoints form a path")
    }

    #[test]
    fn path_rejects_single_waypoint() {
        let result = Path::new(vec![CellCoord::new(0, 0)]);
        assert_eq!(result.unwrap_err(), BoardError::PathTooShort { waypoints: 1 });
    }

    #[test]
    fn position_interpolates_between_cell_centers() {
        let path = straight_path();
        let start = path.position_at(0, 0.0);
        assert_eq!(start.x(), 0.5);
        assert_eq!(start.y(), 0.5);

        let midway = path.position_at(0, 0.5);
        assert_eq!(midway.x(), 1.0);
        assert_eq!(midway.y(), 0.5);
    }

    #[test]
    fn position_clamps_to_final_waypoint() {
        let path = straight_path();
        let end = path.position_at(2, 0.75);
        assert_eq!(end.x(), 2.5);
        assert_eq!(end.y(), 0.5);

        let escaped = path.position_at(9, 0.0);
        assert_eq!(escaped.x(), 2.5);
        assert_eq!(escaped.y(), 0.5);
    }

    #[test]
    fn membership_covers_exactly_the_waypoints() {
        let path = straight_path();
        assert!(path.contains(CellCoord::new(1, 0)));
        assert!(!path.contains(CellCoord::new(1, 1)));
    }

    #[test]
    fn board_rejects_out_of_bounds_waypoints() {
        let result = Board::new(2, 1, straight_path());
        assert_eq!(
            result.unwrap_err(),
            BoardError::WaypointOutOfBounds {
                x: 2,
                y: 0,
                columns: 2,
                rows: 1,
            }
        );
    }

    #[test]
    fn board_rejects_zero_dimensions() {
        let result = Board::new(0, 4, straight_path());
        assert_eq!(
            result.unwrap_err(),
            BoardError::DegenerateGrid {
                columns: 0,
                rows: 4
            }
        );
    }

    #[test]
    fn standard_board_matches_reference_layout() {
        let board = Board::standard();
        assert_eq!(board.columns(), STANDARD_COLUMNS);
        assert_eq!(board.rows(), STANDARD_ROWS);
        assert_eq!(board.path().waypoint_count(), 30);
        assert!(board.path().contains(CellCoord::new(0, 6)));
        assert!(board.path().contains(CellCoord::new(15, 4)));
        assert!(!board.path().contains(CellCoord::new(0, 0)));
    }
}
