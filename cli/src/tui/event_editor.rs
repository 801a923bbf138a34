// SPDX-FileCopyrightText: 2026 reflow contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::{cell::RefCell, rc::Rc};

use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;

use crate::tui::component::{Component, Message};
use crate::tui::component_form::{Access, Form, Input, RadioGroup};
use crate::tui::component_form_util::{VisibleIf, VisiblePredicate};
use crate::tui::component_page::SinglePage;
use crate::tui::dispatcher::{Action, Dispatcher};
use crate::tui::editor_store::EditorStore;

pub struct EventEditor(SinglePage<EditorStore, Form<EditorStore>>);

impl EventEditor {
    pub fn new() -> Self {
        Self(SinglePage::new("Event Editor".to_owned(), new_event_form()))
    }
}

impl Component<EditorStore> for EventEditor {
    fn render(&self, store: &Rc<RefCell<EditorStore>>, area: Rect, buf: &mut Buffer) {
        self.0.render(store, area, buf);

        // A notice replaces the key hints in the bottom border
        if let Some(notice) = store.borrow().notice.as_deref() {
            let y = area.y + area.height.saturating_sub(1);
            let inner = Rect::new(area.x + 1, y, area.width.saturating_sub(2), 1);
            for x in inner.left()..inner.right() {
                if let Some(c) = buf.cell_mut((x, y)) {
                    c.set_symbol("─");
                    c.set_fg(Color::White);
                }
            }
            Line::from(format!(" {notice} ").red().bold())
                .centered()
                .render(inner, buf);
        }
    }

    fn get_cursor_position(
        &self,
        store: &Rc<RefCell<EditorStore>>,
        area: Rect,
    ) -> Option<(u16, u16)> {
        self.0.get_cursor_position(store, area)
    }

    fn on_key(
        &mut self,
        dispatcher: &mut Dispatcher,
        store: &Rc<RefCell<EditorStore>>,
        area: Rect,
        key: KeyCode,
    ) -> Option<Message> {
        self.0.on_key(dispatcher, store, area, key)
    }

    fn activate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<EditorStore>>) {
        self.0.activate(dispatcher, store);
    }

    fn deactivate(&mut self, dispatcher: &mut Dispatcher, store: &Rc<RefCell<EditorStore>>) {
        self.0.deactivate(dispatcher, store);
    }
}

fn new_event_form() -> Form<EditorStore> {
    Form::new(vec![
        Box::new(new_summary()),
        Box::new(new_schedule()),
        Box::new(VisibleIf::<_, _, WhenFixed>::new(new_start_time())),
        Box::new(VisibleIf::<_, _, WhenFixed>::new(new_end_time())),
        Box::new(VisibleIf::<_, _, WhenFlexible>::new(new_earliest_start())),
        Box::new(VisibleIf::<_, _, WhenFlexible>::new(new_latest_end())),
        Box::new(VisibleIf::<_, _, WhenFlexible>::new(new_duration())),
    ])
}

macro_rules! new_input {
    ($fn: ident, $title:expr, $acc: ident, $field: ident, $action: ident) => {
        fn $fn() -> Input<EditorStore, $acc> {
            Input::new($title.to_string())
        }

        struct $acc;

        impl Access<EditorStore, String> for $acc {
            fn get(store: &Rc<RefCell<EditorStore>>) -> String {
                store.borrow().draft().$field.clone()
            }

            fn set(dispatcher: &mut Dispatcher, value: String) -> bool {
                dispatcher.dispatch(&Action::$action(value));
                true
            }
        }
    };
}

new_input!(new_summary, "Summary", SummaryAccess, summary, UpdateSummary);
new_input!(
    new_start_time,
    "Start time",
    StartTimeAccess,
    start_time,
    UpdateStartTime
);
new_input!(
    new_end_time,
    "End time",
    EndTimeAccess,
    end_time,
    UpdateEndTime
);
new_input!(
    new_earliest_start,
    "Earliest start",
    EarliestStartAccess,
    earliest_start,
    UpdateEarliestStart
);
new_input!(
    new_latest_end,
    "Latest end",
    LatestEndAccess,
    latest_end,
    UpdateLatestEnd
);
new_input!(
    new_duration,
    "Duration (minutes)",
    DurationAccess,
    duration_minutes,
    UpdateDurationMinutes
);

fn new_schedule() -> RadioGroup<EditorStore, bool, FlexibleAccess> {
    let values = vec![false, true];
    let options = vec!["Fixed".to_string(), "Flexible".to_string()];
    RadioGroup::new("Schedule".to_string(), values, options)
}

struct FlexibleAccess;

impl Access<EditorStore, bool> for FlexibleAccess {
    fn get(store: &Rc<RefCell<EditorStore>>) -> bool {
        store.borrow().draft().is_flexible
    }

    fn set(dispatcher: &mut Dispatcher, value: bool) -> bool {
        dispatcher.dispatch(&Action::UpdateFlexible(value));
        true
    }
}

struct WhenFixed;

impl VisiblePredicate<EditorStore> for WhenFixed {
    fn is_visible(store: &Rc<RefCell<EditorStore>>) -> bool {
        !store.borrow().draft().is_flexible
    }
}

struct WhenFlexible;

impl VisiblePredicate<EditorStore> for WhenFlexible {
    fn is_visible(store: &Rc<RefCell<EditorStore>>) -> bool {
        store.borrow().draft().is_flexible
    }
}
