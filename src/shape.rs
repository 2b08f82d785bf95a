//! Turning classified modules into vector primitives.
//!
//! Every style is total over all piece types. Only [`Style::Sharp`] and
//! [`Style::Ninja`] look at the piece at all, and both currently draw a full
//! cell: `Sharp` flat, `Ninja` turned by the piece's orientation about the
//! cell center. Per-piece contours are left for later artwork.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::classify::{Piece, PieceType};
use crate::color::Color;
use crate::error::{Error, Result};

/// How each module is drawn.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Style {
    /// Full cell square.
    Square,
    /// Circle filling the cell.
    Circle,
    /// Small circle, radius a third of the cell.
    Dot,
    /// Full cell square turned 45°.
    Diamond,
    /// Chosen per piece type.
    #[default]
    Sharp,
    /// Chosen per piece type and turned by its orientation.
    Ninja,
}

impl Style {
    pub const ALL: [Style; 6] = [Style::Square, Style::Circle, Style::Dot, Style::Diamond, Style::Sharp, Style::Ninja];

    pub fn name(self) -> &'static str {
        match self {
            Style::Square => "square",
            Style::Circle => "circle",
            Style::Dot => "dot",
            Style::Diamond => "diamond",
            Style::Sharp => "sharp",
            Style::Ninja => "ninja",
        }
    }

    /// Looks a style up by its exact lowercase name, falling back to
    /// [`Style::Square`] for anything else.
    pub fn from_name(name: &str) -> Style {
        match Style::ALL.iter().find(|s| s.name() == name) {
            Some(&style) => style,
            None => {
                warn!("unknown code style {:?}, drawing squares", name);
                Style::Square
            }
        }
    }
}

impl From<String> for Style {
    fn from(name: String) -> Self {
        Style::from_name(&name)
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.name().to_string()
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Size and offset of the module grid on the canvas.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CellGeometry {
    /// Side of one module in pixels.
    pub cell_size: f64,
    /// Border width in modules.
    pub padding: f64,
}

impl CellGeometry {
    /// `cell_size = size / (modules + 2 * padding)`.
    pub fn new(size: f64, padding: f64, modules: usize) -> Result<Self> {
        let cell_size = size / (modules as f64 + 2.0 * padding);
        if !cell_size.is_finite() || cell_size <= 0.0 || padding < 0.0 {
            return Err(Error::DegenerateGeometry { size, padding, modules });
        }
        Ok(CellGeometry { cell_size, padding })
    }

    /// Top-left pixel of module `(x, y)`.
    pub fn origin(&self, x: usize, y: usize) -> (f64, f64) {
        (
            (x as f64 + self.padding) * self.cell_size,
            (y as f64 + self.padding) * self.cell_size,
        )
    }

    /// Center pixel of module `(x, y)`.
    pub fn center(&self, x: usize, y: usize) -> (f64, f64) {
        let (px, py) = self.origin(x, y);
        let half = self.cell_size / 2.0;
        (px + half, py + half)
    }
}

/// Rotation about a pivot point, clockwise in degrees (SVG convention).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Rotation {
    pub degrees: f64,
    pub pivot_x: f64,
    pub pivot_y: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rotation: Option<Rotation>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
}

/// One filled shape on the canvas.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Primitive {
    pub shape: Shape,
    pub fill: Color,
}

/// Draws modules in one style, on one grid, in one color.
#[derive(Clone, Copy, Debug)]
pub struct ShapeRenderer {
    pub style: Style,
    pub cell: CellGeometry,
    pub fill: Color,
}

impl ShapeRenderer {
    pub fn new(style: Style, cell: CellGeometry, fill: Color) -> Self {
        ShapeRenderer { style, cell, fill }
    }

    /// Returns the primitive for module `(x, y)` classified as `piece`.
    pub fn draw(&self, x: usize, y: usize, piece: &Piece) -> Primitive {
        let shape = match self.style {
            Style::Square => self.cell_rect(x, y, None),
            Style::Circle => self.circle(x, y, self.cell.cell_size / 2.0),
            Style::Dot => self.circle(x, y, self.cell.cell_size / 3.0),
            Style::Diamond => self.turned_rect(x, y, 45.0),
            Style::Sharp => self.sharp(x, y, piece),
            Style::Ninja => self.ninja(x, y, piece),
        };
        Primitive { shape, fill: self.fill }
    }

    fn sharp(&self, x: usize, y: usize, piece: &Piece) -> Shape {
        match piece.kind {
            PieceType::Isolated
            | PieceType::SingleEdge
            | PieceType::StraightThrough
            | PieceType::Corner
            | PieceType::CornerWithDiagonal
            | PieceType::ThreeSided
            | PieceType::Cross => self.cell_rect(x, y, None),
        }
    }

    fn ninja(&self, x: usize, y: usize, piece: &Piece) -> Shape {
        let degrees = piece.orientation.degrees() as f64;
        match piece.kind {
            PieceType::Isolated
            | PieceType::SingleEdge
            | PieceType::StraightThrough
            | PieceType::Corner
            | PieceType::CornerWithDiagonal
            | PieceType::ThreeSided
            | PieceType::Cross => self.turned_rect(x, y, degrees),
        }
    }

    fn cell_rect(&self, x: usize, y: usize, rotation: Option<Rotation>) -> Shape {
        let (px, py) = self.cell.origin(x, y);
        Shape::Rect {
            x: px,
            y: py,
            width: self.cell.cell_size,
            height: self.cell.cell_size,
            rotation,
        }
    }

    fn turned_rect(&self, x: usize, y: usize, degrees: f64) -> Shape {
        let (cx, cy) = self.cell.center(x, y);
        self.cell_rect(x, y, Some(Rotation { degrees, pivot_x: cx, pivot_y: cy }))
    }

    fn circle(&self, x: usize, y: usize, r: f64) -> Shape {
        let (cx, cy) = self.cell.center(x, y);
        Shape::Circle { cx, cy, r }
    }
}
