//! Character-grid renderer for terminals and logs

use std::fmt;

use glam::Vec2;

use super::{Renderer, Shape};
use crate::consts::PROJECTILE_DIAMETER;
use crate::sim::Arena;

/// Rasterises shapes onto a fixed grid of cells
#[derive(Debug, Clone)]
pub struct AsciiRenderer {
    cols: usize,
    rows: usize,
    arena: Arena,
    cells: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(cols: usize, rows: usize, arena: Arena) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            arena,
            cells: vec![' '; cols * rows],
        }
    }

    fn cell(&self, pos: Vec2) -> Option<usize> {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return None;
        }
        let col = (pos.x / self.arena.width * self.cols as f32) as usize;
        let row = (pos.y / self.arena.height * self.rows as f32) as usize;
        (col < self.cols && row < self.rows).then_some(row * self.cols + col)
    }

    fn plot(&mut self, pos: Vec2, glyph: char) {
        if let Some(i) = self.cell(pos) {
            self.cells[i] = glyph;
        }
    }

    pub fn glyph_at(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }
}

impl Renderer for AsciiRenderer {
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn draw(&mut self, shape: &Shape) {
        match shape {
            Shape::Backdrop { .. } => {}
            Shape::Circle {
                center,
                diameter,
                fill,
                ..
            } => {
                let glyph = if *diameter <= PROJECTILE_DIAMETER {
                    '*'
                } else if fill[3] < 1.0 {
                    '+'
                } else {
                    'O'
                };
                self.plot(*center, glyph);
            }
            Shape::Ship { center, .. } => self.plot(*center, 'A'),
            Shape::Rect { min, max, .. } => {
                self.plot(*min, '.');
                self.plot(*max, '.');
            }
        }
    }
}

impl fmt::Display for AsciiRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(self.cols);
        writeln!(f, "+{border}+")?;
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().collect();
            writeln!(f, "|{line}|")?;
        }
        write!(f, "+{border}+")
    }
}
