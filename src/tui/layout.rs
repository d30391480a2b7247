// Width breakpoints and rect helpers shared by the views
//
// Render code asks for a Breakpoint instead of comparing raw widths.

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Breakpoint {
    /// < 70 cols: one column per event, no badges
    Compact,
    /// 70-119 cols
    Normal,
    /// 120+ cols: full status hints, wide overlay gallery
    Wide,
}

impl Breakpoint {
    pub fn from_width(width: u16) -> Self {
        match width {
            0..=69 => Breakpoint::Compact,
            70..=119 => Breakpoint::Normal,
            _ => Breakpoint::Wide,
        }
    }

    /// Inclusive
    pub fn at_least(&self, min: Breakpoint) -> bool {
        *self >= min
    }
}

/// Rect of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// Rect covering `percent_x` / `percent_y` of `area`, with minimums
pub fn centered_percent(percent_x: u16, percent_y: u16, min: (u16, u16), area: Rect) -> Rect {
    let width = (area.width * percent_x / 100).max(min.0);
    let height = (area.height * percent_y / 100).max(min.1);
    centered_rect(width, height, area)
}
