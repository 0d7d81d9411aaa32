use pixels::{Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{App, EditorView, Screen};
use crate::editor::Editor;
use crate::font;
use crate::grid::Cell;
use crate::layout::{PixelRect, TileLayout};
use crate::material::{color_name_to_rgba, PALETTE};
use crate::palette_panel::{self, Highlight, PalettePanel};
use crate::start_screen::{Field, StartLayout, StartScreen};

pub const BACKGROUND: [u8; 4] = [240, 240, 240, 255]; // #F0F0F0
pub const TEXT: [u8; 3] = [51, 51, 51]; // #333333
pub const HOVER_HIGHLIGHT: [u8; 4] = [214, 234, 248, 255]; // #D6EAF8
pub const SELECTED_HIGHLIGHT: [u8; 4] = [93, 173, 226, 255]; // #5DADE2
pub const CANVAS_BACKGROUND: [u8; 4] = [0, 0, 0, 255];
pub const FIELD_BACKGROUND: [u8; 4] = [255, 255, 255, 255];
pub const ERROR_TEXT: [u8; 3] = [192, 57, 43];
pub const HOVER_PREVIEW_ALPHA: f32 = 0.75;

/// Mutable view over an RGBA8 buffer. All drawing is clipped to the frame.
pub struct Frame<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Self {
        debug_assert!(buf.len() >= (width * height * 4) as usize);
        Self { buf, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = ((y * self.width + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.buf[index..index + 4]);
        Some(out)
    }

    pub fn clear(&mut self, color: [u8; 4]) {
        for pixel in self.buf.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    // Intersection of a signed rect with the frame, as pixel ranges.
    fn clip(&self, x: i32, y: i32, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (x as i64 + w as i64).min(self.width as i64);
        let y1 = (y as i64 + h as i64).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    pub fn fill_area(&mut self, x: i32, y: i32, w: u32, h: u32, color: [u8; 4]) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for py in y0..y1 {
            let start = ((py * self.width + x0) * 4) as usize;
            let end = ((py * self.width + x1) * 4) as usize;
            for pixel in self.buf[start..end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    pub fn blend_area(&mut self, x: i32, y: i32, w: u32, h: u32, color: [u8; 4], alpha: f32) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px as i32, py as i32, color, alpha);
            }
        }
    }

    /// One-pixel border just inside the area.
    pub fn outline_area(&mut self, x: i32, y: i32, w: u32, h: u32, color: [u8; 4]) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_area(x, y, w, 1, color);
        self.fill_area(x, y + h as i32 - 1, w, 1, color);
        self.fill_area(x, y, 1, h, color);
        self.fill_area(x + w as i32 - 1, y, 1, h, color);
    }

    pub fn fill_rect(&mut self, rect: PixelRect, color: [u8; 4]) {
        self.fill_area(rect.x as i32, rect.y as i32, rect.width, rect.height, color);
    }

    pub fn blend_rect(&mut self, rect: PixelRect, color: [u8; 4], alpha: f32) {
        self.blend_area(rect.x as i32, rect.y as i32, rect.width, rect.height, color, alpha);
    }

    pub fn outline_rect(&mut self, rect: PixelRect, color: [u8; 4]) {
        self.outline_area(rect.x as i32, rect.y as i32, rect.width, rect.height, color);
    }

    pub fn blend_pixel(&mut self, x: i32, y: i32, color: [u8; 4], alpha: f32) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let index = ((y as u32 * self.width + x as u32) * 4) as usize;
        for channel in 0..3 {
            let dst = self.buf[index + channel] as f32;
            let src = color[channel] as f32;
            self.buf[index + channel] = (dst + (src - dst) * alpha).round() as u8;
        }
        self.buf[index + 3] = 255;
    }
}

pub struct Renderer {
    pixels: Pixels,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(window: &Window, width: u32, height: u32) -> Result<Self, pixels::Error> {
        let surface_texture = SurfaceTexture::new(width, height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        Ok(Self { pixels, width, height })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimised windows report a zero size; keep the old buffer.
        if width == 0 || height == 0 {
            return;
        }
        self.width = width;
        self.height = height;

        if let Err(err) = self.pixels.resize_surface(width, height) {
            log::error!("Failed to resize surface: {}", err);
        }
        if let Err(err) = self.pixels.resize_buffer(width, height) {
            log::error!("Failed to resize buffer: {}", err);
        }
    }

    pub fn render(&mut self, app: &App) {
        let mut frame = Frame::new(self.pixels.frame_mut(), self.width, self.height);
        draw_app(&mut frame, app);
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

pub fn draw_app(frame: &mut Frame, app: &App) {
    let font_size = app.config().font_size;
    match app.screen() {
        Screen::Start(start) => render_start_screen(frame, start, font_size),
        Screen::Editor(EditorView { editor, palette }) => {
            render_palette(frame, palette, editor, font_size);
            let (canvas_width, canvas_height) = app.canvas_size();
            render_canvas(
                frame,
                editor,
                app.canvas_layout(),
                app.canvas_origin_x(),
                canvas_width,
                canvas_height,
            );
        }
    }
}

fn render_canvas(
    frame: &mut Frame,
    editor: &Editor,
    layout: Option<TileLayout>,
    origin_x: u32,
    canvas_width: u32,
    canvas_height: u32,
) {
    frame.fill_area(origin_x as i32, 0, canvas_width, canvas_height, CANVAS_BACKGROUND);

    let Some(layout) = layout else {
        return;
    };
    let grid_line = color_name_to_rgba("grey");

    for (y, row) in editor.map().rows().enumerate() {
        for (x, material) in row.iter().enumerate() {
            let rect = layout.cell_rect(Cell::new(x as u32, y as u32)).shifted(origin_x, 0);
            frame.fill_rect(rect, material.material().rgba());
            frame.outline_rect(rect, grid_line);
        }
    }

    // The preview shows what a press would paint, so it needs a material.
    if let (Some(cell), Some(selected)) = (editor.hover_cell(), editor.selected()) {
        let rect = layout.cell_rect(cell).shifted(origin_x, 0);
        frame.blend_rect(rect, selected.material().rgba(), HOVER_PREVIEW_ALPHA);
        frame.outline_rect(rect, color_name_to_rgba("black"));
    }
}

fn render_palette(frame: &mut Frame, palette: &PalettePanel, editor: &Editor, font_size: f32) {
    let height = frame.height();
    frame.fill_area(0, 0, palette.width(), height, BACKGROUND);

    let label_width = palette.width().saturating_sub(palette_panel::LABEL_X + palette_panel::LIST_PADDING);
    let line_height = font::line_height(font_size) as i32;

    for (index, material) in PALETTE.iter().enumerate() {
        let top = palette.entry_top(index);
        if top + palette_panel::ENTRY_HEIGHT as i32 <= 0 || top >= height as i32 {
            continue;
        }

        let label_background = match palette.highlight(material.id, editor.selected()) {
            Highlight::Selected => SELECTED_HIGHLIGHT,
            Highlight::Hover => HOVER_HIGHLIGHT,
            Highlight::None => BACKGROUND,
        };
        frame.fill_area(
            palette_panel::LABEL_X as i32,
            top,
            label_width,
            palette_panel::ENTRY_HEIGHT,
            label_background,
        );

        let swatch_y = top + ((palette_panel::ENTRY_HEIGHT - palette_panel::SWATCH_SIZE) / 2) as i32;
        let swatch = (palette_panel::LIST_PADDING as i32, swatch_y, palette_panel::SWATCH_SIZE);
        frame.fill_area(swatch.0, swatch.1, swatch.2, swatch.2, material.rgba());
        frame.outline_area(swatch.0, swatch.1, swatch.2, swatch.2, [0, 0, 0, 255]);

        let text_y = top + (palette_panel::ENTRY_HEIGHT as i32 - line_height) / 2;
        font::draw_text(
            frame,
            &material.label(),
            (palette_panel::LABEL_X + 10) as i32,
            text_y,
            TEXT,
            font_size,
        );
    }

    // Scroll indicator along the right edge when the list overflows.
    let content = PalettePanel::content_height();
    if content > height && height > 0 {
        let track_x = palette.width().saturating_sub(4) as i32;
        let thumb_height = (height as u64 * height as u64 / content as u64) as u32;
        let thumb_top = (palette.scroll() * height as f64 / content as f64).round() as i32;
        frame.fill_area(track_x, thumb_top, 3, thumb_height.max(8), [160, 160, 160, 255]);
    }
}

fn render_start_screen(frame: &mut Frame, start: &StartScreen, font_size: f32) {
    frame.clear(BACKGROUND);
    let layout = StartLayout::compute(frame.width());
    let line_height = font::line_height(font_size) as i32;

    // Button
    let button_size = font_size * 1.25;
    frame.fill_rect(layout.button, [225, 225, 225, 255]);
    frame.outline_rect(layout.button, [TEXT[0], TEXT[1], TEXT[2], 255]);
    let label = "Click to start";
    let label_x = layout.button.x as i32 + (layout.button.width as i32 - font::text_width(label, button_size) as i32) / 2;
    let label_y = layout.button.y as i32 + (layout.button.height as i32 - font::line_height(button_size) as i32) / 2;
    font::draw_text(frame, label, label_x, label_y, TEXT, button_size);

    for (field, label_y) in [
        (Field::Width, layout.width_label_y),
        (Field::Height, layout.height_label_y),
    ] {
        let label = field.label();
        let x = (frame.width() as i32 - font::text_width(label, font_size) as i32) / 2;
        font::draw_text(frame, label, x, label_y as i32, TEXT, font_size);

        let rect = layout.field_rect(field);
        frame.fill_rect(rect, FIELD_BACKGROUND);
        let focused = start.focus() == field;
        let border = if focused { SELECTED_HIGHLIGHT } else { color_name_to_rgba("grey") };
        frame.outline_rect(rect, border);

        let text = start.input(field);
        let text_x = rect.x as i32 + 6;
        let text_y = rect.y as i32 + (rect.height as i32 - line_height) / 2;
        font::draw_text(frame, text, text_x, text_y, TEXT, font_size);

        if focused {
            let caret_x = text_x + font::text_width(text, font_size) as i32 + 1;
            frame.fill_area(caret_x, rect.y as i32 + 5, 1, rect.height.saturating_sub(10), [0, 0, 0, 255]);
        }
    }

    if let Some(err) = start.error() {
        let message = err.to_string();
        let x = (frame.width() as i32 - font::text_width(&message, font_size) as i32) / 2;
        font::draw_text(frame, &message, x.max(4), layout.error_y as i32, ERROR_TEXT, font_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::input::InputAction;
    use crate::start_screen::MapSize;

    fn buffer(width: u32, height: u32) -> Vec<u8> {
        vec![0; (width * height * 4) as usize]
    }

    #[test]
    fn test_fill_area_clips_to_frame() {
        let mut buf = buffer(4, 4);
        let mut frame = Frame::new(&mut buf, 4, 4);
        frame.fill_area(-2, 2, 4, 10, [1, 2, 3, 255]);
        assert_eq!(frame.pixel(0, 2), Some([1, 2, 3, 255]));
        assert_eq!(frame.pixel(1, 3), Some([1, 2, 3, 255]));
        assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(0, 1), Some([0, 0, 0, 0]));
        assert_eq!(frame.pixel(4, 0), None);
    }

    #[test]
    fn test_outline_leaves_interior() {
        let mut buf = buffer(5, 5);
        let mut frame = Frame::new(&mut buf, 5, 5);
        frame.outline_area(0, 0, 5, 5, [9, 9, 9, 255]);
        assert_eq!(frame.pixel(0, 0), Some([9, 9, 9, 255]));
        assert_eq!(frame.pixel(4, 2), Some([9, 9, 9, 255]));
        assert_eq!(frame.pixel(2, 4), Some([9, 9, 9, 255]));
        assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_blend_pixel() {
        let mut buf = buffer(1, 1);
        let mut frame = Frame::new(&mut buf, 1, 1);
        frame.clear([0, 0, 200, 255]);
        frame.blend_pixel(0, 0, [200, 100, 0, 255], 0.75);
        assert_eq!(frame.pixel(0, 0), Some([150, 75, 50, 255]));
        frame.blend_pixel(-1, 0, [255, 255, 255, 255], 1.0);
    }

    fn painted_app() -> App {
        let config = EditorConfig {
            palette_width: 200,
            ..EditorConfig::default()
        };
        let mut app = App::new(config, 440, 120);
        app.open_editor(MapSize { width: 12, height: 12 });
        // Select Red, paint cell (3, 5).
        app.handle(InputAction::Press { x: 50.0, y: 15.0 + 2.0 * 35.0 });
        app.handle(InputAction::Release);
        app.handle(InputAction::Moved { x: 295.0, y: 55.0, dragging: false });
        app.handle(InputAction::Press { x: 295.0, y: 55.0 });
        app.handle(InputAction::Release);
        app
    }

    #[test]
    fn test_canvas_cells_use_material_colors() {
        let mut app = painted_app();
        // Move the hover away so (3, 5) shows its plain colour.
        app.handle(InputAction::Moved { x: 265.0, y: 115.0, dragging: false });
        let mut buf = buffer(440, 120);
        let mut frame = Frame::new(&mut buf, 440, 120);
        draw_app(&mut frame, &app);

        // Canvas letterbox is black; cells start at x = 260.
        assert_eq!(frame.pixel(230, 60), Some(CANVAS_BACKGROUND));
        assert_eq!(frame.pixel(295, 55), Some([255, 0, 0, 255]));
        assert_eq!(frame.pixel(305, 55), Some([255, 255, 255, 255]));
        // Grid line on the cell border.
        assert_eq!(frame.pixel(290, 55), Some([190, 190, 190, 255]));
        // Palette background.
        assert_eq!(frame.pixel(2, 2), Some(BACKGROUND));
    }

    #[test]
    fn test_hover_preview_is_blended_in_selected_color() {
        let mut app = painted_app();
        app.handle(InputAction::Moved { x: 305.0, y: 55.0, dragging: false });
        let mut buf = buffer(440, 120);
        let mut frame = Frame::new(&mut buf, 440, 120);
        draw_app(&mut frame, &app);

        // White cell under a 75% red preview.
        assert_eq!(frame.pixel(305, 55), Some([255, 64, 64, 255]));
        // Preview outline is black.
        assert_eq!(frame.pixel(300, 55), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_no_preview_without_selection() {
        let config = EditorConfig {
            palette_width: 200,
            ..EditorConfig::default()
        };
        let mut app = App::new(config, 440, 120);
        app.open_editor(MapSize { width: 12, height: 12 });
        app.handle(InputAction::Moved { x: 295.0, y: 55.0, dragging: false });

        let mut buf = buffer(440, 120);
        let mut frame = Frame::new(&mut buf, 440, 120);
        draw_app(&mut frame, &app);
        assert_eq!(frame.pixel(295, 55), Some([255, 255, 255, 255]));
        assert_eq!(frame.pixel(290, 55), Some([190, 190, 190, 255]));
    }

    #[test]
    fn test_selected_palette_entry_is_highlighted() {
        let app = painted_app();
        let mut buf = buffer(440, 120);
        let mut frame = Frame::new(&mut buf, 440, 120);
        draw_app(&mut frame, &app);

        // Red entry spans y 80..110; label background starts at x = 35.
        assert_eq!(frame.pixel(180, 82), Some(SELECTED_HIGHLIGHT));
        assert_eq!(frame.pixel(180, 12), Some(BACKGROUND));
        // Swatch interior.
        assert_eq!(frame.pixel(20, 95), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_start_screen_draws_fields() {
        let app = App::new(EditorConfig::default(), 800, 600);
        let mut buf = buffer(800, 600);
        let mut frame = Frame::new(&mut buf, 800, 600);
        draw_app(&mut frame, &app);

        let layout = StartLayout::compute(800);
        let field = layout.height_field;
        assert_eq!(frame.pixel(field.x + field.width - 2, field.y + 2), Some(FIELD_BACKGROUND));
        // Width field has focus and a highlighted border.
        let focused = layout.width_field;
        assert_eq!(frame.pixel(focused.x, focused.y + 3), Some(SELECTED_HIGHLIGHT));
        assert_eq!(frame.pixel(2, 590), Some(BACKGROUND));
    }
}
