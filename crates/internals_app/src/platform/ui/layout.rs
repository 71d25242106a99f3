use crate::platform::document::{CellTemplate, Document, Element, ElementId, RowTemplate};

use super::constants::*;

/// Builds the page in document order with empty tables and status lines.
pub fn build_document() -> Document {
    let mut doc = Document::new();

    doc.define_template(
        STORED_PAGES_ROW,
        RowTemplate {
            // checkbox(id), index, link(href, text), namespace, size
            cells: vec![
                CellTemplate::Checkbox {
                    group: STORED_GROUP,
                },
                CellTemplate::Text,
                CellTemplate::Link,
                CellTemplate::Text,
                CellTemplate::Text,
            ],
        },
    );
    doc.define_template(
        REQUEST_QUEUE_ROW,
        RowTemplate {
            // checkbox(id), url, created, status, origin
            cells: vec![
                CellTemplate::Checkbox {
                    group: REQUESTS_GROUP,
                },
                CellTemplate::Text,
                CellTemplate::Text,
                CellTemplate::Text,
                CellTemplate::Text,
            ],
        },
    );

    // Stored pages
    doc.append(TOGGLE_ALL_STORED, checkbox());
    doc.append(
        STORED_PAGES_TABLE,
        Element::Table {
            template: STORED_PAGES_ROW,
            rows: Vec::new(),
        },
    );
    doc.append(BUTTON_DELETE_PAGES, button("Delete selected pages"));
    doc.append(PAGE_ACTIONS_INFO, text());

    // Request queue
    doc.append(TOGGLE_ALL_REQUESTS, checkbox());
    doc.append(
        REQUEST_QUEUE_TABLE,
        Element::Table {
            template: REQUEST_QUEUE_ROW,
            rows: Vec::new(),
        },
    );
    doc.append(BUTTON_DELETE_REQUESTS, button("Delete selected requests"));
    doc.append(REQUEST_QUEUE_ACTIONS_INFO, text());

    doc.append(BUTTON_REFRESH, button("Refresh"));
    doc.append(BUTTON_DUMP, button("Dump"));

    doc.append(DUMP_MODAL, Element::Modal { open: false });
    doc.append(
        DUMP_BOX,
        Element::TextArea {
            value: String::new(),
            selected: false,
        },
    );
    doc.append(DUMP_INFO, text());
    doc.append(BUTTON_COPY, button("Copy to clipboard"));
    doc.append(BUTTON_SAVE_DUMP, button("Save to file"));
    doc.append(BUTTON_CLOSE_DUMP, button("Close"));

    // Device status
    doc.append(CURRENT_STATUS, text());
    doc.append(LIMITLESS_CHECKBOX, checkbox());

    // Event logs
    doc.append(MODEL_CHECKBOX, checkbox());
    doc.append(REQUEST_CHECKBOX, checkbox());
    doc.append(PREFETCH_CHECKBOX, checkbox());
    doc.append(BUTTON_REFRESH_LOGS, button("Refresh logs"));
    doc.append(LOGS_LIST, Element::List { items: Vec::new() });

    // Save page later
    doc.append(INPUT_URL, input());
    doc.append(BUTTON_ADD_TO_QUEUE, button("Load in background"));
    doc.append(SAVE_URL_STATE, text());

    // Prefetching
    doc.append(BUTTON_SCHEDULE_NWAKE, button("Schedule NWake"));
    doc.append(BUTTON_CANCEL_NWAKE, button("Cancel NWake"));
    doc.append(BUTTON_SHOW_NOTIFICATION, button("Show notification"));
    doc.append(INPUT_GENERATE_URLS, input());
    doc.append(BUTTON_GENERATE_PAGE_BUNDLE, button("Generate page bundle"));
    doc.append(INPUT_OPERATION_NAME, input());
    doc.append(BUTTON_GET_OPERATION, button("Get operation"));
    doc.append(INPUT_DOWNLOAD_NAME, input());
    doc.append(BUTTON_DOWNLOAD_ARCHIVE, button("Download archive"));
    doc.append(PREFETCH_ACTIONS_INFO, text());

    doc
}

/// Every element the console may address by name.
pub fn interactive_ids() -> Vec<ElementId> {
    vec![
        TOGGLE_ALL_STORED,
        TOGGLE_ALL_REQUESTS,
        LIMITLESS_CHECKBOX,
        MODEL_CHECKBOX,
        REQUEST_CHECKBOX,
        PREFETCH_CHECKBOX,
        BUTTON_REFRESH,
        BUTTON_DELETE_PAGES,
        BUTTON_DELETE_REQUESTS,
        BUTTON_REFRESH_LOGS,
        BUTTON_DUMP,
        BUTTON_CLOSE_DUMP,
        BUTTON_COPY,
        BUTTON_SAVE_DUMP,
        BUTTON_ADD_TO_QUEUE,
        BUTTON_SCHEDULE_NWAKE,
        BUTTON_CANCEL_NWAKE,
        BUTTON_SHOW_NOTIFICATION,
        BUTTON_GENERATE_PAGE_BUNDLE,
        BUTTON_GET_OPERATION,
        BUTTON_DOWNLOAD_ARCHIVE,
        INPUT_URL,
        INPUT_GENERATE_URLS,
        INPUT_OPERATION_NAME,
        INPUT_DOWNLOAD_NAME,
    ]
}

fn button(label: &str) -> Element {
    Element::Button {
        label: label.to_string(),
    }
}

fn checkbox() -> Element {
    Element::Checkbox {
        group: None,
        value: String::new(),
        checked: false,
    }
}

fn input() -> Element {
    Element::TextInput {
        value: String::new(),
    }
}

fn text() -> Element {
    Element::Text(String::new())
}
