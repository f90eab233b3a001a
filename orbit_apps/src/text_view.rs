//! Scroll model for the full-screen text reader.

/// Resting Y of the first line; scrolling up never goes past this.
const TOP_MARGIN: f32 = 100.0;

/// Scrollable block of text lines.  Holds the vertical offset of the first
/// line and clamps it so the text can neither be dragged below its resting
/// position nor scrolled past its last line.
pub struct TextScroll {
    lines: Vec<String>,
    offset: f32,
    line_height: f32,
    viewport_h: f32,
}

impl TextScroll {
    pub fn new(text: &str, line_height: f32, viewport_h: f32) -> Self {
        TextScroll {
            lines: text.lines().map(str::to_string).collect(),
            offset: TOP_MARGIN,
            line_height,
            viewport_h,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Current Y position of the first line.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Lowest offset still showing the tail of the text.  Short texts that
    /// fit the viewport never scroll at all.
    fn min_offset(&self) -> f32 {
        let text_h = self.lines.len() as f32 * self.line_height;
        (self.viewport_h - text_h).min(TOP_MARGIN)
    }

    /// Move the text by `dy` pixels (positive scrolls the view up, i.e.
    /// the text moves down) and clamp to the valid range.
    pub fn scroll_by(&mut self, dy: f32) {
        self.offset = (self.offset + dy).clamp(self.min_offset(), TOP_MARGIN);
    }
}
