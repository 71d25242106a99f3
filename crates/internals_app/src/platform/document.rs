//! In-memory document the debug page renders into.
//!
//! Elements are addressed by id and kept in document order. Checkboxes can
//! belong to a named group either as standalone elements or as cells of a
//! table row. Listeners are registered per element and event kind; the
//! returned [`Registration`] removes the listener when dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(&'static str);

impl ElementId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Button {
        label: String,
    },
    Checkbox {
        group: Option<String>,
        value: String,
        checked: bool,
    },
    TextInput {
        value: String,
    },
    TextArea {
        value: String,
        selected: bool,
    },
    Text(String),
    Table {
        template: ElementId,
        rows: Vec<TableRow>,
    },
    List {
        items: Vec<String>,
    },
    Modal {
        open: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Checkbox {
        group: String,
        value: String,
        checked: bool,
    },
    Link {
        href: String,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellTemplate {
    Text,
    /// Checkbox in `group`; takes its value from one field.
    Checkbox { group: &'static str },
    /// Link; takes href then text from two fields.
    Link,
}

/// Row layout cloned once per data item when a table is filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    pub cells: Vec<CellTemplate>,
}

impl RowTemplate {
    /// Fills the template from `fields` in order. Missing fields are empty.
    pub fn stamp(&self, fields: Vec<String>) -> TableRow {
        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let cells = self
            .cells
            .iter()
            .map(|template| match template {
                CellTemplate::Text => Cell::Text(next()),
                CellTemplate::Checkbox { group } => Cell::Checkbox {
                    group: (*group).to_string(),
                    value: next(),
                    checked: false,
                },
                CellTemplate::Link => {
                    let href = next();
                    Cell::Link { href, text: next() }
                }
            })
            .collect();
        TableRow { cells }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Change,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub target: ElementId,
    pub kind: EventKind,
    /// Checkbox state after the event, for checkbox targets.
    pub checked: Option<bool>,
}

/// Changes the renderer applies to the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentCommand {
    SetText { id: ElementId, text: String },
    SetChecked { id: ElementId, checked: bool },
    SetDisabled { id: ElementId, disabled: bool },
    SetValue { id: ElementId, value: String },
    /// Clears the table and stamps its row template once per entry.
    FillTable { id: ElementId, rows: Vec<Vec<String>> },
    FillList { id: ElementId, items: Vec<String> },
    ShowModal { id: ElementId },
    CloseModal { id: ElementId },
    SelectContents { id: ElementId },
}

type Listener = Box<dyn FnMut(&DomEvent)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, ElementId, EventKind, Listener)>,
}

/// Keeps a listener attached. Dropping it detaches the listener.
#[must_use = "dropping a registration detaches its listener"]
pub struct Registration {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Registration {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners
                .borrow_mut()
                .entries
                .retain(|(id, ..)| *id != self.id);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    id: ElementId,
    element: Element,
    disabled: bool,
}

#[derive(Default)]
pub struct Document {
    nodes: Vec<Node>,
    templates: BTreeMap<ElementId, RowTemplate>,
    listeners: Rc<RefCell<Listeners>>,
    clipboard: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element in document order.
    pub fn append(&mut self, id: ElementId, element: Element) {
        self.nodes.push(Node {
            id,
            element,
            disabled: false,
        });
    }

    pub fn define_template(&mut self, id: ElementId, template: RowTemplate) {
        self.templates.insert(id, template);
    }

    pub fn find(&self, name: &str) -> Option<ElementId> {
        self.nodes
            .iter()
            .find(|node| node.id.name() == name)
            .map(|node| node.id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.node(id).map(|node| &node.element)
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.node(id).is_some_and(|node| node.disabled)
    }

    /// Current value of a text input or text area; empty for anything else.
    pub fn value(&self, id: ElementId) -> String {
        match self.element(id) {
            Some(Element::TextInput { value }) | Some(Element::TextArea { value, .. }) => {
                value.clone()
            }
            _ => String::new(),
        }
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn add_listener(
        &mut self,
        target: ElementId,
        kind: EventKind,
        listener: impl FnMut(&DomEvent) + 'static,
    ) -> Registration {
        let mut listeners = self.listeners.borrow_mut();
        listeners.next_id += 1;
        let id = listeners.next_id;
        listeners
            .entries
            .push((id, target, kind, Box::new(listener)));
        Registration {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Simulates a user click. Disabled and unknown elements ignore it.
    /// Checkboxes flip and then fire `Click` followed by `Change`.
    pub fn click(&mut self, id: ElementId) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.disabled {
            return false;
        }
        let checked = match &mut node.element {
            Element::Checkbox { checked, .. } => {
                *checked = !*checked;
                Some(*checked)
            }
            _ => None,
        };
        self.dispatch(DomEvent {
            target: id,
            kind: EventKind::Click,
            checked,
        });
        if checked.is_some() {
            self.dispatch(DomEvent {
                target: id,
                kind: EventKind::Change,
                checked,
            });
        }
        true
    }

    /// Simulates the user typing into a text input or text area.
    pub fn type_text(&mut self, id: ElementId, text: &str) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        if node.disabled {
            return false;
        }
        match &mut node.element {
            Element::TextInput { value } | Element::TextArea { value, .. } => {
                *value = text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Simulates a click on the grouped checkbox carrying `value`.
    pub fn toggle_grouped_checkbox(&mut self, group: &str, value: &str) -> bool {
        let mut found = false;
        self.for_each_checkbox_in(group, |box_value, checked| {
            if !found && box_value == value {
                *checked = !*checked;
                found = true;
            }
        });
        found
    }

    /// Sets every checkbox in `group` to `state`, the state of the
    /// controlling checkbox.
    pub fn toggle_all_checkboxes(&mut self, group: &str, state: bool) {
        self.for_each_checkbox_in(group, |_, checked| *checked = state);
    }

    /// Values of the checked checkboxes in `group`, in document order.
    pub fn selected_values(&self, group: &str) -> Vec<String> {
        let mut selected = Vec::new();
        for node in &self.nodes {
            match &node.element {
                Element::Checkbox {
                    group: Some(name),
                    value,
                    checked: true,
                } if name == group => selected.push(value.clone()),
                Element::Table { rows, .. } => {
                    for cell in rows.iter().flat_map(|row| &row.cells) {
                        if let Cell::Checkbox {
                            group: name,
                            value,
                            checked: true,
                        } = cell
                        {
                            if name == group {
                                selected.push(value.clone());
                            }
                        }
                    }
                }
                _ => {}
            }
        }
        selected
    }

    /// Selects the contents of `id` and copies them to the clipboard.
    pub fn copy_contents(&mut self, id: ElementId) {
        self.apply(DocumentCommand::SelectContents { id });
        self.clipboard = Some(self.value(id));
    }

    pub fn apply(&mut self, command: DocumentCommand) {
        match command {
            DocumentCommand::SetText { id, text } => {
                if let Some(Element::Text(current)) = self.element_mut(id) {
                    *current = text;
                }
            }
            DocumentCommand::SetChecked { id, checked } => {
                if let Some(Element::Checkbox { checked: current, .. }) = self.element_mut(id) {
                    *current = checked;
                }
            }
            DocumentCommand::SetDisabled { id, disabled } => {
                if let Some(node) = self.node_mut(id) {
                    node.disabled = disabled;
                }
            }
            DocumentCommand::SetValue { id, value } => {
                if let Some(Element::TextInput { value: current })
                | Some(Element::TextArea { value: current, .. }) = self.element_mut(id)
                {
                    *current = value;
                }
            }
            DocumentCommand::FillTable { id, rows } => {
                let Some(Element::Table { template, .. }) = self.element(id) else {
                    return;
                };
                let Some(row_template) = self.templates.get(template).cloned() else {
                    return;
                };
                let stamped: Vec<TableRow> = rows
                    .into_iter()
                    .map(|fields| row_template.stamp(fields))
                    .collect();
                if let Some(Element::Table { rows, .. }) = self.element_mut(id) {
                    *rows = stamped;
                }
            }
            DocumentCommand::FillList { id, items } => {
                if let Some(Element::List { items: current }) = self.element_mut(id) {
                    *current = items;
                }
            }
            DocumentCommand::ShowModal { id } => self.set_modal(id, true),
            DocumentCommand::CloseModal { id } => self.set_modal(id, false),
            DocumentCommand::SelectContents { id } => {
                if let Some(Element::TextArea { selected, .. }) = self.element_mut(id) {
                    *selected = true;
                }
            }
        }
    }

    /// Plain-text rendering of the whole document for the console.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            let marker = if node.disabled { " (disabled)" } else { "" };
            let _ = match &node.element {
                Element::Button { label } => writeln!(out, "[{label}] #{}{marker}", node.id),
                Element::Checkbox { checked, .. } => {
                    let mark = if *checked { "x" } else { " " };
                    writeln!(out, "[{mark}] #{}{marker}", node.id)
                }
                Element::TextInput { value } => writeln!(out, "#{}: <{value}>{marker}", node.id),
                Element::TextArea { value, selected } => {
                    let mark = if *selected { " (selected)" } else { "" };
                    writeln!(out, "#{}{mark}:\n{value}", node.id)
                }
                Element::Text(text) if text.is_empty() => Ok(()),
                Element::Text(text) => writeln!(out, "#{}: {text}", node.id),
                Element::Table { rows, .. } => {
                    let _ = writeln!(out, "#{} ({} rows)", node.id, rows.len());
                    rows.iter().try_for_each(|row| writeln!(out, "  {}", format_row(row)))
                }
                Element::List { items } => {
                    let _ = writeln!(out, "#{} ({} items)", node.id, items.len());
                    items.iter().try_for_each(|item| writeln!(out, "  - {item}"))
                }
                Element::Modal { open } => {
                    writeln!(out, "#{} {}", node.id, if *open { "open" } else { "closed" })
                }
            };
        }
        if let Some(copied) = self.clipboard() {
            let _ = writeln!(out, "clipboard: {} chars", copied.chars().count());
        }
        out
    }

    fn dispatch(&mut self, event: DomEvent) {
        // Listeners must not add or drop registrations while being called.
        let mut listeners = self.listeners.borrow_mut();
        for (_, target, kind, listener) in listeners.entries.iter_mut() {
            if *target == event.target && *kind == event.kind {
                listener(&event);
            }
        }
    }

    fn set_modal(&mut self, id: ElementId, open: bool) {
        if let Some(Element::Modal { open: current }) = self.element_mut(id) {
            *current = open;
        }
    }

    fn for_each_checkbox_in(&mut self, group: &str, mut visit: impl FnMut(&str, &mut bool)) {
        for node in &mut self.nodes {
            match &mut node.element {
                Element::Checkbox {
                    group: Some(name),
                    value,
                    checked,
                } if name == group => visit(value, checked),
                Element::Table { rows, .. } => {
                    for cell in rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                        if let Cell::Checkbox {
                            group: name,
                            value,
                            checked,
                        } = cell
                        {
                            if name == group {
                                visit(value, checked);
                            }
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn node(&self, id: ElementId) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    fn node_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|node| node.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.node_mut(id).map(|node| &mut node.element)
    }
}

#[cfg(test)]
impl Document {
    pub fn is_checked(&self, id: ElementId) -> bool {
        matches!(
            self.element(id),
            Some(Element::Checkbox { checked: true, .. })
        )
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        match self.element(id)? {
            Element::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn rows(&self, id: ElementId) -> &[TableRow] {
        match self.element(id) {
            Some(Element::Table { rows, .. }) => rows,
            _ => &[],
        }
    }

    pub fn items(&self, id: ElementId) -> &[String] {
        match self.element(id) {
            Some(Element::List { items }) => items,
            _ => &[],
        }
    }

    pub fn is_modal_open(&self, id: ElementId) -> bool {
        matches!(self.element(id), Some(Element::Modal { open: true }))
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

fn format_row(row: &TableRow) -> String {
    row.cells
        .iter()
        .map(|cell| match cell {
            Cell::Text(text) => text.clone(),
            Cell::Checkbox { value, checked, .. } => {
                format!("[{}] {value}", if *checked { "x" } else { " " })
            }
            Cell::Link { href, text } if text == href => text.replace("\r\n", " "),
            Cell::Link { href, text } => format!("{} <{href}>", text.replace("\r\n", " ")),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
