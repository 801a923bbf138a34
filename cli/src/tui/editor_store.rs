// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use reflow_core::{DraftChange, Editor, EventDraft};

use crate::tui::dispatcher::{Action, Dispatcher};

/// View state shared between the form components and the dispatcher.
#[derive(Debug)]
pub struct EditorStore {
    editor: Editor,

    /// Message shown in the page footer, usually a validation failure.
    pub notice: Option<String>,

    /// Whether the user submitted the changes.
    pub submit: bool,
}

impl EditorStore {
    pub fn new(editor: Editor) -> Self {
        Self {
            editor,
            notice: None,
            submit: false,
        }
    }

    pub fn draft(&self) -> &EventDraft {
        self.editor.draft()
    }

    pub fn into_editor(self) -> Editor {
        self.editor
    }

    fn update(&mut self, change: DraftChange) {
        self.editor.update(change);
        self.notice = None; // typing clears the last failure
    }

    /// Validates the draft before letting a submit close the view.
    ///
    /// A cancel always closes. A submit with an invalid draft keeps the view
    /// open and surfaces the failure as a notice.
    pub fn try_close(&mut self) -> bool {
        if !self.submit {
            return true;
        }
        match self.draft().parse() {
            Ok(_) => true,
            Err(e) => {
                self.notice = Some(e.to_string());
                self.submit = false;
                false
            }
        }
    }

    pub fn register_to(that: Rc<RefCell<Self>>, dispatcher: &mut Dispatcher) {
        let callback = Rc::new(RefCell::new(move |action: &Action| match action {
            Action::UpdateSummary(v) => that.borrow_mut().update(DraftChange::Summary(v.clone())),
            Action::UpdateFlexible(v) => that.borrow_mut().update(DraftChange::Flexible(*v)),
            Action::UpdateStartTime(v) => {
                that.borrow_mut().update(DraftChange::StartTime(v.clone()));
            }
            Action::UpdateEndTime(v) => that.borrow_mut().update(DraftChange::EndTime(v.clone())),
            Action::UpdateEarliestStart(v) => {
                that.borrow_mut()
                    .update(DraftChange::EarliestStart(v.clone()));
            }
            Action::UpdateLatestEnd(v) => {
                that.borrow_mut().update(DraftChange::LatestEnd(v.clone()));
            }
            Action::UpdateDurationMinutes(v) => {
                that.borrow_mut()
                    .update(DraftChange::DurationMinutes(v.clone()));
            }
            Action::SubmitChanges => that.borrow_mut().submit = true,
        }));
        dispatcher.register(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creating_store() -> EditorStore {
        let mut editor = Editor::new();
        editor.begin_create();
        EditorStore::new(editor)
    }

    #[test]
    fn cancel_closes_without_validation() {
        let mut store = creating_store();
        assert!(store.try_close());
        assert_eq!(store.notice, None);
    }

    #[test]
    fn submit_with_invalid_draft_keeps_the_view_open() {
        let mut store = creating_store();
        store.submit = true;

        assert!(!store.try_close());
        assert!(!store.submit);
        assert_eq!(store.notice.as_deref(), Some("summary cannot be empty"));
    }

    #[test]
    fn dispatched_changes_reach_the_draft_and_clear_the_notice() {
        let store = Rc::new(RefCell::new(creating_store()));
        store.borrow_mut().notice = Some("stale".to_string());

        let mut dispatcher = Dispatcher::new();
        EditorStore::register_to(store.clone(), &mut dispatcher);
        dispatcher.dispatch(&Action::UpdateSummary("Dinner".to_string()));

        assert_eq!(store.borrow().draft().summary, "Dinner");
        assert_eq!(store.borrow().notice, None);

        dispatcher.dispatch(&Action::SubmitChanges);
        assert!(store.borrow().submit);
    }
}
