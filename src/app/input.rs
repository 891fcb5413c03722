use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::search::SearchDirection;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key, model),
            Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        // Prompt routing comes first: an open prompt owns the keyboard.
        if let Some(name) = model.save_prompt.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelSave),
                KeyCode::Enter => Some(Message::ConfirmSave),
                KeyCode::Backspace => {
                    let mut next = name.clone();
                    next.pop();
                    Some(Message::SaveInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = name.clone();
                    next.push(c);
                    Some(Message::SaveInput(next))
                }
                _ => None,
            };
        }

        if let Some(search) = model.search.as_ref() {
            return match key.code {
                KeyCode::Esc => Some(Message::CancelSearch),
                KeyCode::Enter => Some(Message::ConfirmSearch),
                KeyCode::Right | KeyCode::Down => {
                    Some(Message::SearchNext(SearchDirection::Forward))
                }
                KeyCode::Left | KeyCode::Up => {
                    Some(Message::SearchNext(SearchDirection::Backward))
                }
                KeyCode::Backspace => {
                    let mut next = search.query().to_string();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = search.query().to_string();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        // Normal key handling
        match key.code {
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::StartSave)
            }
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::StartFind)
            }

            // Movement
            KeyCode::Left => Some(Message::Move(Direction::Left)),
            KeyCode::Right => Some(Message::Move(Direction::Right)),
            KeyCode::Up => Some(Message::Move(Direction::Up)),
            KeyCode::Down => Some(Message::Move(Direction::Down)),
            KeyCode::Home => Some(Message::Move(Direction::Home)),
            KeyCode::End => Some(Message::Move(Direction::End)),
            KeyCode::PageUp => Some(Message::Move(Direction::PageUp)),
            KeyCode::PageDown => Some(Message::Move(Direction::PageDown)),

            // Editing
            KeyCode::Backspace => Some(Message::DeleteChar),
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::InsertChar(c))
            }

            _ => None,
        }
    }
}
