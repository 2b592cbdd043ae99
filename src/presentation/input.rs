use crate::application::{App, AppMode};
use crate::domain::{PointerButton, Viewport};
use crate::infrastructure::ColorMapRepository;
use crate::presentation::grid_container;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::ColorInput | AppMode::ExportAs | AppMode::ImportFile => {
                Self::handle_prompt_mode(app, key)
            }
        }
    }

    /// Mouse input drives the paint protocol; prompts and help ignore it,
    /// except that a release always ends the stroke.
    pub fn handle_mouse_event(app: &mut App, event: MouseEvent) {
        if let MouseEventKind::Up(_) = event.kind {
            app.pointer_up();
            return;
        }
        if app.mode != AppMode::Normal {
            return;
        }

        match event.kind {
            MouseEventKind::Down(button) => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                };
                app.pointer_down(event.column, event.row, button);
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                app.pointer_move(event.column, event.row);
            }
            _ => {}
        }
    }

    /// Terminal resize: recompute the grid container and rebuild the grid.
    pub fn handle_resize(app: &mut App, width: u16, height: u16) {
        let container = grid_container(Rect::new(0, 0, width, height));
        app.update_grid_size(Viewport::new(container.x, container.y, container.width, container.height));
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            match key {
                KeyCode::Char('e') => {
                    app.start_export();
                    return;
                }
                KeyCode::Char('o') => {
                    app.start_import();
                    return;
                }
                _ => {}
            }
        }

        app.status_message = None;

        match key {
            KeyCode::Char(c @ '1'..='9') => {
                app.select_palette(c as usize - '1' as usize);
            }
            KeyCode::Char('c') => {
                app.start_color_input();
            }
            KeyCode::Char('r') => {
                app.reset_grid();
            }
            KeyCode::Char('e') => {
                app.start_export();
            }
            KeyCode::Char('i') => {
                app.start_import();
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.show_help();
            }
            KeyCode::Char('q') => {
                // Will be handled by main loop
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.mode = AppMode::Normal;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    fn handle_prompt_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter => match app.mode {
                AppMode::ColorInput => app.finish_color_input(),
                AppMode::ExportAs => {
                    let filename = app.get_prompt_filename();
                    let result = ColorMapRepository::export_grid(&app.grid, &filename);
                    app.set_export_result(result);
                }
                AppMode::ImportFile => {
                    let filename = app.get_prompt_filename();
                    let result = ColorMapRepository::import_color_map(&filename);
                    app.set_import_result(result);
                }
                AppMode::Normal | AppMode::Help => {}
            },
            KeyCode::Esc => {
                app.close_prompt();
            }
            KeyCode::Backspace => {
                app.delete_char_before_cursor();
            }
            KeyCode::Delete => {
                app.delete_char_at_cursor();
            }
            KeyCode::Left => {
                app.move_cursor_left();
            }
            KeyCode::Right => {
                app.move_cursor_right();
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::Char(c) => {
                app.insert_char(c);
            }
            _ => {}
        }
    }
}
