//! Layout helpers shared by the wizard screens

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rect covering `percent_x` x `percent_y` of `r`, centered
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Rect of a fixed size centered in `r`, clamped to fit
pub fn centered_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

/// Flatten a rendered buffer into text, one line per row
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_fixed() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(10, 3, 20, 4));
    }

    #[test]
    fn test_centered_fixed_clamps() {
        let area = Rect::new(2, 2, 10, 3);
        assert_eq!(centered_fixed(50, 9, area), area);
    }

    #[test]
    fn test_centered_rect_inside_parent() {
        let area = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 80, area);
        assert!(inner.width <= 60 && inner.height <= 40);
        assert!(area.intersection(inner) == inner);
    }
}
