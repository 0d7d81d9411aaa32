use crate::config::EditorConfig;
use crate::editor::Editor;
use crate::grid::TileMap;
use crate::input::InputAction;
use crate::layout::TileLayout;
use crate::palette_panel::PalettePanel;
use crate::start_screen::{MapSize, StartScreen};

/// Editor window contents once a map exists.
pub struct EditorView {
    pub editor: Editor,
    pub palette: PalettePanel,
}

pub enum Screen {
    Start(StartScreen),
    Editor(EditorView),
}

/// Routes input to whichever screen is showing and owns all UI state.
pub struct App {
    config: EditorConfig,
    screen: Screen,
    window_width: u32,
    window_height: u32,
}

impl App {
    pub fn new(config: EditorConfig, window_width: u32, window_height: u32) -> Self {
        let start = StartScreen::new(
            config.default_map_width,
            config.default_map_height,
            config.max_map_dimension,
        );
        Self {
            config,
            screen: Screen::Start(start),
            window_width,
            window_height,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Left edge of the canvas; the palette panel fills everything before it.
    pub fn canvas_origin_x(&self) -> u32 {
        self.config.palette_width.min(self.window_width)
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.window_width - self.canvas_origin_x(), self.window_height)
    }

    pub fn canvas_layout(&self) -> Option<TileLayout> {
        let Screen::Editor(view) = &self.screen else {
            return None;
        };
        let (cw, ch) = self.canvas_size();
        TileLayout::compute(cw, ch, view.editor.map().width(), view.editor.map().height())
    }

    pub fn needs_redraw(&self) -> bool {
        match &self.screen {
            Screen::Start(start) => start.is_dirty(),
            Screen::Editor(view) => view.editor.is_dirty(),
        }
    }

    pub fn mark_dirty(&mut self) {
        match &mut self.screen {
            Screen::Start(start) => start.mark_dirty(),
            Screen::Editor(view) => view.editor.mark_dirty(),
        }
    }

    pub fn clear_dirty(&mut self) {
        match &mut self.screen {
            Screen::Start(start) => start.clear_dirty(),
            Screen::Editor(view) => view.editor.clear_dirty(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
        if let Screen::Editor(view) = &mut self.screen {
            view.palette.clamp_scroll(height);
        }
        self.mark_dirty();
    }

    pub fn open_editor(&mut self, size: MapSize) {
        log::info!("Opening {}x{} tile map", size.width, size.height);
        self.screen = Screen::Editor(EditorView {
            editor: Editor::new(TileMap::new(size.width, size.height)),
            palette: PalettePanel::new(self.config.palette_width),
        });
    }

    pub fn handle(&mut self, action: InputAction) {
        if matches!(action, InputAction::None) {
            return;
        }
        let layout = self.canvas_layout();
        let origin_x = self.canvas_origin_x() as f64;
        let window_width = self.window_width;
        let window_height = self.window_height;

        let submitted = match &mut self.screen {
            Screen::Start(start) => Self::handle_start(start, action, window_width),
            Screen::Editor(view) => {
                Self::handle_editor(view, action, layout, origin_x, window_height);
                None
            }
        };
        if let Some(size) = submitted {
            self.open_editor(size);
        }
    }

    fn handle_start(start: &mut StartScreen, action: InputAction, window_width: u32) -> Option<MapSize> {
        match action {
            InputAction::Press { x, y } => start.pointer_pressed(x, y, window_width),
            InputAction::Submit => start.submit(),
            InputAction::Char(ch) => {
                start.type_char(ch);
                None
            }
            InputAction::Backspace => {
                start.backspace();
                None
            }
            InputAction::Tab => {
                start.toggle_focus();
                None
            }
            _ => None,
        }
    }

    fn handle_editor(
        view: &mut EditorView,
        action: InputAction,
        layout: Option<TileLayout>,
        origin_x: f64,
        window_height: u32,
    ) {
        let EditorView { editor, palette } = view;

        match action {
            InputAction::Press { x, y } => {
                if palette.contains(x, y) {
                    if let Some(material) = palette.entry_at(x, y) {
                        editor.select(material);
                    }
                } else if let Some(layout) = layout {
                    editor.press_at(&layout, x - origin_x, y);
                }
            }
            InputAction::Release => editor.release(),
            InputAction::Moved { x, y, dragging } => {
                let over_palette = palette.contains(x, y).then_some((x, y));
                if palette.hover_at(over_palette) {
                    editor.mark_dirty();
                }
                if let Some(layout) = layout {
                    editor.hover_at(&layout, x - origin_x, y);
                    if dragging {
                        editor.drag_to(&layout, x - origin_x, y);
                    }
                } else {
                    editor.hover(None);
                }
            }
            InputAction::Left => {
                if palette.hover_at(None) {
                    editor.mark_dirty();
                }
                editor.hover(None);
            }
            InputAction::Scroll { x, y, delta } => {
                if palette.contains(x, y) && palette.scroll_by(delta, window_height) {
                    // The hovered entry moved under the pointer.
                    palette.hover_at(Some((x, y)));
                    editor.mark_dirty();
                }
            }
            _ => {}
        }
    }
}
