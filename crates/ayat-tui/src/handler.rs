use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use crate::app::App;
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_load().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        KeyCode::Left | KeyCode::Char('h') => app.prev_verse(),
        KeyCode::Right | KeyCode::Char('l') => app.next_verse(),

        // Dots are numbered from 1
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(digit) = c.to_digit(10) {
                app.select_verse(digit as usize - 1);
            }
        }

        // Get More Verses
        KeyCode::Char('r') | KeyCode::Enter => app.request_verses(),

        _ => {}
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_card = app.card_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.dot_areas.iter().position(|r| point_in_rect(x, y, *r)) {
                app.select_verse(index);
            }
        }
        MouseEventKind::ScrollDown if in_card => app.next_verse(),
        MouseEventKind::ScrollUp if in_card => app.prev_verse(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ayat_core::{Config, Editions, LanguageEdition, SeededRandom, VerseRecord};
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn loaded_app() -> App {
        loaded_app_with(Config::new())
    }

    fn loaded_app_with(config: Config) -> App {
        let edition = |label: &str| {
            let verses = (1..=5)
                .map(|v| VerseRecord::new(1, v, format!("{} {}", label, v)))
                .collect();
            LanguageEdition::new(label, verses).unwrap()
        };
        let editions = Editions {
            original: edition("ar"),
            translation_a: edition("en"),
            translation_b: edition("ml"),
        };

        let mut app = App::new(config, Box::new(SeededRandom::new(3)), Some(1));
        app.show_editions(&editions);
        app
    }

    #[tokio::test]
    async fn test_arrow_keys_move_carousel() {
        let mut app = loaded_app();

        handle_event(&mut app, key(KeyCode::Right)).await.unwrap();
        assert_eq!(app.carousel.index(), 1);
        handle_event(&mut app, key(KeyCode::Char('h'))).await.unwrap();
        handle_event(&mut app, key(KeyCode::Left)).await.unwrap();
        assert_eq!(app.carousel.index(), 2);
    }

    #[tokio::test]
    async fn test_digit_keys_select_dot() {
        let mut app = loaded_app();

        handle_event(&mut app, key(KeyCode::Char('3'))).await.unwrap();
        assert_eq!(app.carousel.index(), 2);
        handle_event(&mut app, key(KeyCode::Char('9'))).await.unwrap();
        assert_eq!(app.carousel.index(), 2);
    }

    #[tokio::test]
    async fn test_digit_keys_reach_wider_windows() {
        let mut config = Config::new();
        config.window_size = 5;
        let mut app = loaded_app_with(config);
        assert_eq!(app.carousel.len(), 5);

        handle_event(&mut app, key(KeyCode::Char('5'))).await.unwrap();
        assert_eq!(app.carousel.index(), 4);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = loaded_app();
        handle_event(&mut app, key(KeyCode::Char('q'))).await.unwrap();
        assert!(app.should_quit);

        let mut app = loaded_app();
        let ctrl_c = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: crossterm::event::KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        handle_event(&mut app, AppEvent::Key(ctrl_c)).await.unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_click_on_dot_selects_it() {
        let mut app = loaded_app();
        app.dot_areas = vec![
            Rect::new(10, 5, 1, 1),
            Rect::new(12, 5, 1, 1),
            Rect::new(14, 5, 1, 1),
        ];

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 14,
            row: 5,
            modifiers: KeyModifiers::NONE,
        };
        handle_event(&mut app, AppEvent::Mouse(click)).await.unwrap();
        assert_eq!(app.carousel.index(), 2);
    }

    #[test]
    fn test_point_in_rect_edges() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(2, 3, rect));
        assert!(point_in_rect(5, 4, rect));
        assert!(!point_in_rect(6, 4, rect));
        assert!(!point_in_rect(5, 5, rect));
    }
}
