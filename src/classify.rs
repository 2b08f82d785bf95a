//! Neighbour classification of dark modules.
//!
//! Each dark module is described by which of its eight neighbours are also
//! dark. The four orthogonal neighbours decide the [`PieceType`]; a diagonal
//! only matters for corners, where it tells whether the corner is filled in.
//! Positions outside the symbol count as light, so edge modules simply end up
//! with fewer connections.
//!
//! Piece types keep the tile codes from the qrlib artwork (`1a`, `2b`, ...),
//! available through [`PieceType::code`].

use std::fmt;

use crate::matrix::ModuleMatrix;

/// The eight neighbours of a module; `true` means present and dark.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Neighbors {
    pub top_left: bool,
    pub top: bool,
    pub top_right: bool,
    pub left: bool,
    pub right: bool,
    pub bottom_left: bool,
    pub bottom: bool,
    pub bottom_right: bool,
}

impl Neighbors {
    /// Reads the neighbourhood of `(x, y)` from the matrix.
    pub fn of(x: usize, y: usize, modules: &ModuleMatrix) -> Self {
        let (x, y) = (x as i64, y as i64);
        let dark = |dx: i64, dy: i64| modules.is_dark(x + dx, y + dy);
        Neighbors {
            top_left: dark(-1, -1),
            top: dark(0, -1),
            top_right: dark(1, -1),
            left: dark(-1, 0),
            right: dark(1, 0),
            bottom_left: dark(-1, 1),
            bottom: dark(0, 1),
            bottom_right: dark(1, 1),
        }
    }

    /// Number of dark orthogonal neighbours (diagonals excluded).
    pub fn surrounding_count(&self) -> u8 {
        [self.top, self.left, self.right, self.bottom]
            .iter()
            .filter(|&&n| n)
            .count() as u8
    }
}

/// Topological shape of a dark module.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceType {
    /// No orthogonal neighbour.
    Isolated,
    /// Exactly one orthogonal neighbour.
    SingleEdge,
    /// Two opposite neighbours.
    StraightThrough,
    /// Two adjacent neighbours, the diagonal between them light.
    Corner,
    /// Two adjacent neighbours, the diagonal between them dark.
    CornerWithDiagonal,
    /// Three orthogonal neighbours.
    ThreeSided,
    /// All four orthogonal neighbours.
    Cross,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::Isolated,
        PieceType::SingleEdge,
        PieceType::StraightThrough,
        PieceType::Corner,
        PieceType::CornerWithDiagonal,
        PieceType::ThreeSided,
        PieceType::Cross,
    ];

    /// The qrlib tile code for this piece.
    pub fn code(self) -> &'static str {
        match self {
            PieceType::Isolated => "1a",
            PieceType::SingleEdge => "2b",
            PieceType::StraightThrough => "1b3b",
            PieceType::Corner => "2a1b",
            PieceType::CornerWithDiagonal => "2a1b1a",
            PieceType::ThreeSided => "2a1b2c",
            PieceType::Cross => "2a1b2c3b",
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Clockwise rotation applied to a piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub fn degrees(self) -> u16 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }
}

/// A classified piece: its type and how it is turned.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceType,
    pub orientation: Orientation,
}

impl Piece {
    fn new(kind: PieceType, orientation: Orientation) -> Self {
        Piece { kind, orientation }
    }
}

/// Classifies the module at `(x, y)` from its neighbours.
///
/// Total over every coordinate inside the matrix; the module's own colour is
/// not consulted, so light modules can be classified too.
///
/// # Example
///
/// ```rust
/// use qirust_pieces::classify::{classify, PieceType};
/// use qirust_pieces::matrix::ModuleMatrix;
///
/// let m = ModuleMatrix::from_fn(3, |x, y| x == 1 && y == 1);
/// assert_eq!(classify(1, 1, &m).kind, PieceType::Isolated);
/// ```
pub fn classify(x: usize, y: usize, modules: &ModuleMatrix) -> Piece {
    classify_neighbors(&Neighbors::of(x, y, modules))
}

/// Classifies an already computed neighbourhood.
pub fn classify_neighbors(n: &Neighbors) -> Piece {
    use Orientation::*;
    use PieceType::*;

    match n.surrounding_count() {
        0 => {
            // Always Deg0 here; the checks mirror the other branches.
            let orientation = if n.right {
                Deg90
            } else if n.bottom {
                Deg180
            } else if n.left {
                Deg270
            } else {
                Deg0
            };
            Piece::new(Isolated, orientation)
        }
        1 => Piece::new(SingleEdge, Deg0),
        2 if n.top && n.bottom => Piece::new(StraightThrough, Deg0),
        2 if n.left && n.right => Piece::new(StraightThrough, Deg90),
        2 => {
            let (orientation, diagonal) = if n.top && n.right {
                (Deg90, n.top_right)
            } else if n.right && n.bottom {
                (Deg180, n.bottom_right)
            } else if n.left && n.bottom {
                (Deg270, n.bottom_left)
            } else {
                (Deg0, n.top_left)
            };
            let kind = if diagonal { CornerWithDiagonal } else { Corner };
            Piece::new(kind, orientation)
        }
        3 => {
            let orientation = if n.top && n.right && n.bottom {
                Deg90
            } else if n.right && n.bottom && n.left {
                Deg180
            } else if n.bottom && n.left && n.top {
                Deg270
            } else {
                Deg0
            };
            Piece::new(ThreeSided, orientation)
        }
        _ => Piece::new(Cross, Deg0),
    }
}
