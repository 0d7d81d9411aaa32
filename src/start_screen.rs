use std::fmt;
use thiserror::Error;

use crate::layout::PixelRect;

const MAX_INPUT_LEN: usize = 12;
const COLUMN_WIDTH: u32 = 220;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("{field} must be a whole number, got \"{input}\"")]
    NotANumber { field: Field, input: String },
    #[error("{field} must be at least 1")]
    TooSmall { field: Field },
    #[error("{field} must be at most {max}")]
    TooLarge { field: Field, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Width,
    Height,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Width => "Map Width:",
            Field::Height => "Map Height:",
        }
    }

    fn other(self) -> Self {
        match self {
            Field::Width => Field::Height,
            Field::Height => Field::Width,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Width => write!(f, "Map width"),
            Field::Height => write!(f, "Map height"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

pub fn parse_dimension(field: Field, input: &str, max: u32) -> Result<u32, DimensionError> {
    let value: i64 = input.trim().parse().map_err(|_| DimensionError::NotANumber {
        field,
        input: input.to_string(),
    })?;
    if value < 1 {
        return Err(DimensionError::TooSmall { field });
    }
    if value > max as i64 {
        return Err(DimensionError::TooLarge { field, max });
    }
    Ok(value as u32)
}

/// Positions of the start screen widgets for a given window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLayout {
    pub button: PixelRect,
    pub width_label_y: u32,
    pub width_field: PixelRect,
    pub height_label_y: u32,
    pub height_field: PixelRect,
    pub error_y: u32,
}

impl StartLayout {
    pub fn compute(window_width: u32) -> Self {
        let x = window_width.saturating_sub(COLUMN_WIDTH) / 2;
        Self {
            button: PixelRect::new(x, 20, COLUMN_WIDTH, 44),
            width_label_y: 84,
            width_field: PixelRect::new(x, 106, COLUMN_WIDTH, 28),
            height_label_y: 146,
            height_field: PixelRect::new(x, 168, COLUMN_WIDTH, 28),
            error_y: 212,
        }
    }

    pub fn field_rect(&self, field: Field) -> PixelRect {
        match field {
            Field::Width => self.width_field,
            Field::Height => self.height_field,
        }
    }
}

/// The dialog asking for the map size before the editor opens.
#[derive(Debug, Clone)]
pub struct StartScreen {
    width_input: String,
    height_input: String,
    focus: Field,
    error: Option<DimensionError>,
    max_dimension: u32,
    dirty: bool,
}

impl StartScreen {
    pub fn new(default_width: u32, default_height: u32, max_dimension: u32) -> Self {
        Self {
            width_input: default_width.to_string(),
            height_input: default_height.to_string(),
            focus: Field::Width,
            error: None,
            max_dimension,
            dirty: true,
        }
    }

    pub fn input(&self, field: Field) -> &str {
        match field {
            Field::Width => &self.width_input,
            Field::Height => &self.height_input,
        }
    }

    fn input_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Width => &mut self.width_input,
            Field::Height => &mut self.height_input,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn error(&self) -> Option<&DimensionError> {
        self.error.as_ref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn type_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let focus = self.focus;
        let input = self.input_mut(focus);
        if input.chars().count() < MAX_INPUT_LEN {
            input.push(ch);
            self.dirty = true;
        }
    }

    pub fn backspace(&mut self) {
        let focus = self.focus;
        if self.input_mut(focus).pop().is_some() {
            self.dirty = true;
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.other();
        self.dirty = true;
    }

    /// Handles a click at window coordinates. Returns the map size when the
    /// click submitted valid dimensions.
    pub fn pointer_pressed(&mut self, px: f64, py: f64, window_width: u32) -> Option<MapSize> {
        let layout = StartLayout::compute(window_width);
        if layout.button.contains(px, py) {
            return self.submit();
        }
        for field in [Field::Width, Field::Height] {
            if layout.field_rect(field).contains(px, py) && self.focus != field {
                self.focus = field;
                self.dirty = true;
            }
        }
        None
    }

    pub fn parse(&self) -> Result<MapSize, DimensionError> {
        let width = parse_dimension(Field::Width, &self.width_input, self.max_dimension)?;
        let height = parse_dimension(Field::Height, &self.height_input, self.max_dimension)?;
        Ok(MapSize { width, height })
    }

    /// Validates both inputs. Failures are kept for display and the screen
    /// stays up.
    pub fn submit(&mut self) -> Option<MapSize> {
        match self.parse() {
            Ok(size) => {
                self.error = None;
                Some(size)
            }
            Err(err) => {
                log::warn!("Rejected map size: {}", err);
                self.error = Some(err);
                self.dirty = true;
                None
            }
        }
    }
}
