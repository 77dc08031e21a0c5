use crossterm::style::Color;

/// One character cell of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub symbol: char,
    pub color: Option<Color>,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        symbol: ' ',
        color: None,
    };
}

/// Character buffer a frame is drawn into before it goes to the terminal
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets a cell; coordinates outside the canvas are clipped
    pub fn put(&mut self, x: isize, y: isize, symbol: char, color: Option<Color>) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = Cell { symbol, color };
        }
    }

    /// Writes text starting at `(x, y)`, clipped to the canvas
    pub fn draw_text(&mut self, x: isize, y: isize, text: &str, color: Option<Color>) {
        for (i, symbol) in text.chars().enumerate() {
            self.put(x + i as isize, y, symbol, color);
        }
    }

    /// Writes text horizontally centered on row `y`
    pub fn draw_text_centered(&mut self, y: isize, text: &str, color: Option<Color>) {
        let len = text.chars().count() as isize;
        let x = (self.width as isize - len) / 2;
        self.draw_text(x.max(0), y, text, color);
    }

    /// Runs of equally colored cells on row `y`, for presentation
    pub fn row_runs(&self, y: usize) -> Vec<(Option<Color>, String)> {
        let mut runs: Vec<(Option<Color>, String)> = Vec::new();
        if y >= self.height {
            return runs;
        }
        for cell in &self.cells[y * self.width..(y + 1) * self.width] {
            match runs.last_mut() {
                Some((color, text)) if *color == cell.color => text.push(cell.symbol),
                _ => runs.push((cell.color, cell.symbol.to_string())),
            }
        }
        runs
    }
}

#[cfg(test)]
impl Canvas {
    /// Rows as plain strings, colors dropped
    pub fn rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .take(self.height)
            .map(|row| row.iter().map(|cell| cell.symbol).collect())
            .collect()
    }
}

/// Draws a line between two points using Bresenham's algorithm
pub fn draw_line(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    canvas: &mut Canvas,
    symbol: char,
    color: Option<Color>,
) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        canvas.put(x0, y0, symbol, color);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a rectangular frame with box-drawing characters
pub fn draw_frame(
    canvas: &mut Canvas,
    x: isize,
    y: isize,
    width: isize,
    height: isize,
    color: Option<Color>,
) {
    if width < 2 || height < 2 {
        return;
    }
    let right = x + width - 1;
    let bottom = y + height - 1;
    for col in x + 1..right {
        canvas.put(col, y, '─', color);
        canvas.put(col, bottom, '─', color);
    }
    for row in y + 1..bottom {
        canvas.put(x, row, '│', color);
        canvas.put(right, row, '│', color);
    }
    canvas.put(x, y, '┌', color);
    canvas.put(right, y, '┐', color);
    canvas.put(x, bottom, '└', color);
    canvas.put(right, bottom, '┘', color);
}
