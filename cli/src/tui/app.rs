// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, error::Error, io, rc::Rc};

use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, KeyCode, KeyEventKind};
use ratatui::layout::{Position, Rect};
use reflow_core::{Editor, Error as CoreError, Event, EventStore};

use crate::tui::component::{Component, Message};
use crate::tui::dispatcher::Dispatcher;
use crate::tui::editor_store::EditorStore;
use crate::tui::event_editor::EventEditor;

/// Opens the editor on an empty draft and saves it on submit.
///
/// Returns `None` when the user cancels.
pub async fn draft_event(store: &mut EventStore) -> Result<Option<Event>, Box<dyn Error>> {
    let mut editor = Editor::new();
    editor.begin_create();
    run_event_editor(store, editor).await
}

/// Opens the editor seeded from an existing event and saves it on submit.
///
/// Returns `None` when the user cancels.
pub async fn edit_event(
    store: &mut EventStore,
    event: &Event,
) -> Result<Option<Event>, Box<dyn Error>> {
    let mut editor = Editor::new();
    editor.begin_edit(event);
    run_event_editor(store, editor).await
}

async fn run_event_editor(
    store: &mut EventStore,
    mut editor: Editor,
) -> Result<Option<Event>, Box<dyn Error>> {
    let mut notice = None;
    loop {
        let mut view_store = EditorStore::new(editor);
        view_store.notice = notice.take();

        let view_store = run_editor_view(view_store)?;
        if !view_store.submit {
            return Ok(None);
        }

        editor = view_store.into_editor();
        match editor.submit(store).await {
            Ok(event) => return Ok(Some(event)),
            // reopen the editor so the draft is not lost on a failed save
            Err(CoreError::Api(e)) => {
                tracing::warn!(error = %e, "failed to save event, reopening the editor");
                notice = Some(e.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn run_editor_view(store: EditorStore) -> Result<EditorStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        EditorStore::register_to(store.clone(), &mut dispatcher);
        let mut view = EventEditor::new();
        view.activate(&mut dispatcher, &store);

        loop {
            if let Err(e) = draw(&view, &store, &mut terminal) {
                break Err(e);
            }

            match read_key() {
                Err(e) => break Err(e),
                Ok(None) => {} // not a key press, render the next frame
                Ok(Some(key)) => {
                    let area = match terminal.size() {
                        Ok(size) => Rect::new(0, 0, size.width, size.height),
                        Err(e) => break Err(e),
                    };
                    match view.on_key(&mut dispatcher, &store, area, key) {
                        Some(Message::Exit) if store.borrow_mut().try_close() => break Ok(()),
                        _ => {} // Continue the loop to render the next frame
                    }
                }
            }
        }
    }; // release dispatcher and view here to avoid borrow conflicts
    ratatui::restore();
    result?;

    let owned_store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(owned_store)
}

fn draw(
    view: &EventEditor,
    store: &Rc<RefCell<EditorStore>>,
    terminal: &mut DefaultTerminal,
) -> io::Result<()> {
    terminal.draw(|frame| {
        let area = frame.area();
        view.render(store, area, frame.buffer_mut());
        if let Some((x, y)) = view.get_cursor_position(store, area) {
            frame.set_cursor_position(Position { x, y });
        }
    })?;
    Ok(())
}

fn read_key() -> io::Result<Option<KeyCode>> {
    match event::read()? {
        event::Event::Key(key) if key.kind == KeyEventKind::Press => Ok(Some(key.code)),
        _ => Ok(None),
    }
}
