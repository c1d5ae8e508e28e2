//! Cursor and scroll state for menus whose rows are only partly selectable.
//!
//! `SelectionState` tracks a cursor row and a scroll offset over `count`
//! rows shown `visible` at a time. Callers pass a predicate telling which
//! rows can hold the cursor (section headers and status rows cannot); the
//! cursor skips the others. Scroll edges are reported through
//! [`ScrollInfo`].

/// Which edges of the scrollable content are currently in view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollInfo {
    /// The first row is visible.
    pub at_top: bool,
    /// The last row is visible and the content is scrolled (a list that fits
    /// entirely is at the top, not the bottom).
    pub at_bottom: bool,
}

/// Tracks cursor position and scroll offset for a list of rows.
#[derive(Debug, Clone)]
pub struct SelectionState {
    cursor: usize,
    offset: usize,
    count: usize,
    visible: usize,
}

impl SelectionState {
    pub fn new(count: usize, visible: usize) -> Self {
        Self {
            cursor: 0,
            offset: 0,
            count,
            visible: visible.max(1),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
    pub fn offset(&self) -> usize {
        self.offset
    }
    pub fn count(&self) -> usize {
        self.count
    }
    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Reset cursor and offset to the top, then settle the cursor on the
    /// first selectable row.
    pub fn reset(&mut self, count: usize, selectable: impl Fn(usize) -> bool) {
        self.count = count;
        self.cursor = 0;
        self.offset = 0;
        self.settle_forward(&selectable);
    }

    /// Update the row count, keeping the cursor where it is when possible.
    pub fn set_count(&mut self, count: usize, selectable: impl Fn(usize) -> bool) {
        self.count = count;
        if self.count == 0 {
            self.cursor = 0;
            self.offset = 0;
            return;
        }
        if self.cursor >= self.count {
            self.cursor = self.count - 1;
        }
        if !selectable(self.cursor) && !self.settle_backward(&selectable) {
            self.settle_forward(&selectable);
        }
        self.ensure_visible();
    }

    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible.max(1);
        self.ensure_visible();
    }

    /// Put the cursor on `row`, if it exists.
    pub fn select(&mut self, row: usize) {
        if row < self.count {
            self.cursor = row;
            self.ensure_visible();
        }
    }

    pub fn move_up(&mut self, selectable: impl Fn(usize) -> bool) {
        if let Some(row) = (0..self.cursor).rev().find(|&row| selectable(row)) {
            self.cursor = row;
        } else {
            // Nothing selectable above: still reveal leading headers.
            self.offset = 0;
        }
        self.ensure_visible();
    }

    pub fn move_down(&mut self, selectable: impl Fn(usize) -> bool) {
        if let Some(row) = (self.cursor + 1..self.count).find(|&row| selectable(row)) {
            self.cursor = row;
            self.ensure_visible();
        } else {
            // Nothing selectable below: scroll trailing rows (loading or
            // sentinel) into view.
            self.scroll_to_end();
        }
    }

    pub fn page_up(&mut self, selectable: impl Fn(usize) -> bool) {
        let target = self.cursor.saturating_sub(self.visible);
        self.cursor = target;
        if !selectable(target) && !self.settle_forward(&selectable) {
            self.settle_backward(&selectable);
        }
        self.ensure_visible();
    }

    pub fn page_down(&mut self, selectable: impl Fn(usize) -> bool) {
        if self.count == 0 {
            return;
        }
        let target = (self.cursor + self.visible).min(self.count - 1);
        self.cursor = target;
        if !selectable(target) && !self.settle_backward(&selectable) {
            self.settle_forward(&selectable);
        }
        if target == self.count - 1 {
            self.scroll_to_end();
        } else {
            self.ensure_visible();
        }
    }

    pub fn home(&mut self, selectable: impl Fn(usize) -> bool) {
        self.cursor = 0;
        self.offset = 0;
        self.settle_forward(&selectable);
    }

    pub fn end(&mut self, selectable: impl Fn(usize) -> bool) {
        if self.count == 0 {
            return;
        }
        self.cursor = self.count - 1;
        self.settle_backward(&selectable);
        self.scroll_to_end();
    }

    /// Whether `row` lies inside the visible window.
    pub fn is_visible(&self, row: usize) -> bool {
        row >= self.offset && row < self.offset + self.visible
    }

    /// Row range currently in view.
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.offset..(self.offset + self.visible).min(self.count)
    }

    pub fn scroll_info(&self) -> ScrollInfo {
        let at_top = self.offset == 0;
        ScrollInfo {
            at_top,
            at_bottom: !at_top && self.offset + self.visible >= self.count,
        }
    }

    fn scroll_to_end(&mut self) {
        self.offset = self.count.saturating_sub(self.visible);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        }
    }

    fn settle_forward(&mut self, selectable: &impl Fn(usize) -> bool) -> bool {
        match (self.cursor..self.count).find(|&row| selectable(row)) {
            Some(row) => {
                self.cursor = row;
                self.ensure_visible();
                true
            }
            None => false,
        }
    }

    fn settle_backward(&mut self, selectable: &impl Fn(usize) -> bool) -> bool {
        match (0..=self.cursor.min(self.count.saturating_sub(1)))
            .rev()
            .find(|&row| selectable(row))
        {
            Some(row) => {
                self.cursor = row;
                self.ensure_visible();
                true
            }
            None => false,
        }
    }

    fn ensure_visible(&mut self) {
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + self.visible {
            self.offset = self.cursor + 1 - self.visible;
        }
        let max_offset = self.count.saturating_sub(self.visible);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(_: usize) -> bool {
        true
    }

    #[test]
    fn move_down_stops_at_last_row() {
        let mut s = SelectionState::new(3, 10);
        s.move_down(all);
        s.move_down(all);
        s.move_down(all);
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn cursor_skips_unselectable_rows() {
        // rows 0 and 3 are headers
        let selectable = |row: usize| row != 0 && row != 3;
        let mut s = SelectionState::new(6, 10);
        s.reset(6, selectable);
        assert_eq!(s.cursor(), 1);
        s.move_down(selectable);
        s.move_down(selectable);
        assert_eq!(s.cursor(), 4);
        s.move_up(selectable);
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn move_down_at_end_reveals_trailing_rows() {
        // last row is a status row
        let selectable = |row: usize| row < 4;
        let mut s = SelectionState::new(5, 2);
        s.end(selectable);
        assert_eq!(s.cursor(), 3);
        assert_eq!(s.offset(), 3);
        assert!(s.is_visible(4));
    }

    #[test]
    fn scroll_info_tracks_edges() {
        let mut s = SelectionState::new(10, 3);
        assert_eq!(
            s.scroll_info(),
            ScrollInfo {
                at_top: true,
                at_bottom: false
            }
        );
        s.end(all);
        assert_eq!(
            s.scroll_info(),
            ScrollInfo {
                at_top: false,
                at_bottom: true
            }
        );
    }

    #[test]
    fn short_list_is_at_top_not_bottom() {
        let s = SelectionState::new(2, 5);
        let info = s.scroll_info();
        assert!(info.at_top);
        assert!(!info.at_bottom);
    }

    #[test]
    fn set_count_clamps_cursor() {
        let mut s = SelectionState::new(10, 3);
        s.end(all);
        s.set_count(4, all);
        assert_eq!(s.cursor(), 3);
        assert!(s.is_visible(3));
    }

    #[test]
    fn set_visible_keeps_cursor_in_view() {
        let mut s = SelectionState::new(10, 10);
        s.select(8);
        s.set_visible(3);
        assert!(s.is_visible(8));
        assert_eq!(s.visible_range(), 6..9);
    }
}
