use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{Color, Colors, ResetColor, SetColors},
    terminal::SetTitle,
};

use crate::constants::*;
use crate::end_screen::EndScreen;
use crate::types::{Point, Rect, Viewport};

const SOLID: char = '\u{2588}';

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
    pub title: String,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
            title: String::new(),
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            // The bell has no cell of its own.
            if c == '\x07' {
                continue;
            }
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row_text(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|row| row.iter().collect()).unwrap_or_default()
    }

    #[cfg(test)]
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer [{}] ---", self.title);
        for y in 0..self.height {
            info!("{}", self.row_text(y));
        }
        info!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // Ignore in debug mode
        }
    }

    pub fn set_title(&mut self, title: &str) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, SetTitle(title)),
            OutputTarget::ScreenBuffer(sb) => {
                sb.title = title.to_string();
                Ok(())
            }
        }
    }

    pub fn screen_buffer(&self) -> Option<&ScreenBuffer> {
        match self {
            OutputTarget::ScreenBuffer(sb) => Some(sb),
            OutputTarget::Stdout(_) => None,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell { glyph: ' ', fg: BACKGROUND_COLOR, bg: BACKGROUND_COLOR };

    pub fn solid(color: Color) -> Self {
        Cell { glyph: SOLID, fg: color, bg: color }
    }
}

// --- GameGrid: the logical surface rasterised onto terminal cells ---
pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        GameGrid {
            grid: vec![vec![Cell::BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        *self = GameGrid::new(width, height);
    }

    pub fn cell(&self, x: u16, y: u16) -> Option<Cell> {
        self.grid.get(y as usize).and_then(|row| row.get(x as usize)).copied()
    }

    pub fn set_cell(&mut self, x: u16, y: u16, cell: Cell) {
        if y < self.height && x < self.width {
            self.grid[y as usize][x as usize] = cell;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::BLANK);
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect, color: Color) {
        if let Some((c0, r0, c1, r1)) = self.viewport().to_cells(rect) {
            for y in r0..r1 {
                for x in c0..c1 {
                    self.set_cell(x, y, Cell::solid(color));
                }
            }
        }
    }

    /// Writes `text` centred on a logical point, keeping whatever background is underneath.
    pub fn put_text_centered(&mut self, center: Point, text: &str, color: Color) {
        let (col, row) = self.viewport().cell_of(center);
        let len = text.chars().count() as u16;
        let start = col.saturating_sub(len / 2);
        for (i, glyph) in text.chars().enumerate() {
            let x = start.saturating_add(i as u16);
            let bg = self.cell(x, row).map_or(BACKGROUND_COLOR, |cell| cell.bg);
            self.set_cell(x, row, Cell { glyph, fg: color, bg });
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            let mut current: Option<(Color, Color)> = None;
            let mut run = String::with_capacity(self.width as usize);
            for cell in &self.grid[y as usize] {
                if current != Some((cell.fg, cell.bg)) {
                    if !run.is_empty() {
                        write!(stdout, "{}", run)?;
                        run.clear();
                    }
                    stdout.execute_other_command(SetColors(Colors::new(cell.fg, cell.bg)))?;
                    current = Some((cell.fg, cell.bg));
                }
                run.push(cell.glyph);
            }
            write!(stdout, "{}", run)?;
        }
        stdout.execute_other_command(ResetColor)?;
        Ok(())
    }
}

/// Clears the grid and draws one gameplay frame.
pub fn draw_frame(game_grid: &mut GameGrid, player: &Rect, meteors: &[Rect]) {
    game_grid.clear();
    game_grid.fill_rect(player, PLAYER_COLOR);
    for meteor in meteors {
        game_grid.fill_rect(meteor, METEOR_COLOR);
    }
}

/// Draws the end-of-run banner and its two buttons over the last frame.
pub fn draw_end_screen(game_grid: &mut GameGrid, screen: &EndScreen) {
    game_grid.put_text_centered(Point::new(WIDTH / 2, HEIGHT / 2), screen.banner_text(), BANNER_COLOR);
    for (button, color) in [(&screen.restart, RESTART_COLOR), (&screen.quit, QUIT_COLOR)] {
        game_grid.fill_rect(&button.rect, color);
        let center = Point::new(button.rect.x + button.rect.width / 2, button.rect.y + button.rect.height / 2);
        game_grid.put_text_centered(center, button.label, LABEL_COLOR);
    }
}

/// Pushes the grid to the output and flushes it.
pub fn present(game_grid: &GameGrid, stdout: &mut OutputTarget) -> io::Result<()> {
    game_grid.render(stdout)?;
    stdout.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::end_screen::{Banner, EndScreen};

    #[test]
    fn test_draw_frame_colours() {
        let mut grid = GameGrid::new(80, 24);
        let player = Rect::new(400, 550, 50, 50);
        let meteor = Rect::new(200, 0, 32, 32);
        draw_frame(&mut grid, &player, &[meteor]);

        // Player occupies columns 40..45 of the bottom rows
        assert_eq!(grid.cell(41, 23).unwrap().fg, PLAYER_COLOR);
        assert_eq!(grid.cell(20, 0).unwrap().fg, METEOR_COLOR);
        assert_eq!(grid.cell(70, 10).unwrap(), Cell::BLANK);
    }

    #[test]
    fn test_draw_frame_clears_previous() {
        let mut grid = GameGrid::new(80, 24);
        let player = Rect::new(400, 550, 50, 50);
        draw_frame(&mut grid, &player, &[Rect::new(200, 0, 32, 32)]);
        draw_frame(&mut grid, &player, &[]);
        assert_eq!(grid.cell(20, 0).unwrap(), Cell::BLANK);
    }

    #[test]
    fn test_render_to_screen_buffer() {
        let mut grid = GameGrid::new(80, 24);
        let screen = EndScreen::new(Banner::GameOver, 7);
        draw_end_screen(&mut grid, &screen);

        let mut out = OutputTarget::ScreenBuffer(ScreenBuffer::new(80, 24));
        present(&grid, &mut out).unwrap();
        let sb = out.screen_buffer().unwrap();
        assert!(sb.contains_text("Game Over | Points: 7"));
        assert!(sb.contains_text("Restart"));
        assert!(sb.contains_text("Quit"));
    }

    #[test]
    fn test_button_label_keeps_button_background() {
        let mut grid = GameGrid::new(80, 24);
        let screen = EndScreen::new(Banner::NewHighScore, 3);
        draw_end_screen(&mut grid, &screen);
        let (_, row) = grid.viewport().cell_of(Point::new(400, 375));
        let label_cell = (0..grid.width)
            .filter_map(|x| grid.cell(x, row))
            .find(|cell| cell.glyph == 'R')
            .unwrap();
        assert_eq!(label_cell.fg, LABEL_COLOR);
        assert_eq!(label_cell.bg, RESTART_COLOR);
    }

    #[test]
    fn test_set_title_on_buffer() {
        let mut out = OutputTarget::ScreenBuffer(ScreenBuffer::new(10, 2));
        out.set_title("Meteor Game | Points: 3").unwrap();
        assert_eq!(out.screen_buffer().unwrap().title, "Meteor Game | Points: 3");
    }
}
