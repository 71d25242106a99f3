use internals_core::{AppViewModel, DirtySections, RequestRow, StoredPageRow};

use crate::platform::document::DocumentCommand;

use super::constants::*;

/// Produces the document changes for the sections marked dirty.
pub fn render(view: &AppViewModel, dirty: DirtySections) -> Vec<DocumentCommand> {
    let mut cmds = Vec::new();

    if dirty.stored_pages {
        cmds.push(DocumentCommand::FillTable {
            id: STORED_PAGES_TABLE,
            rows: view.stored_pages.iter().map(stored_page_fields).collect(),
        });
    }
    if dirty.request_queue {
        cmds.push(DocumentCommand::FillTable {
            id: REQUEST_QUEUE_TABLE,
            rows: view.request_queue.iter().map(request_fields).collect(),
        });
    }
    if dirty.network_status {
        cmds.push(DocumentCommand::SetText {
            id: CURRENT_STATUS,
            text: view.network_status.clone(),
        });
    }
    if dirty.limitless_prefetching {
        cmds.push(DocumentCommand::SetChecked {
            id: LIMITLESS_CHECKBOX,
            checked: view.limitless_prefetching,
        });
    }
    if dirty.event_logs {
        cmds.push(DocumentCommand::FillList {
            id: LOGS_LIST,
            items: view.event_logs.clone(),
        });
    }
    if dirty.logging_state {
        let state = view.logging_state;
        for (id, checked) in [
            (MODEL_CHECKBOX, state.model_is_logging),
            (REQUEST_CHECKBOX, state.queue_is_logging),
            (PREFETCH_CHECKBOX, state.prefetch_is_logging),
        ] {
            cmds.push(DocumentCommand::SetChecked { id, checked });
        }
    }
    if dirty.status_text {
        for (id, text) in [
            (PAGE_ACTIONS_INFO, &view.page_actions_info),
            (REQUEST_QUEUE_ACTIONS_INFO, &view.request_queue_actions_info),
            (SAVE_URL_STATE, &view.save_url_state),
            (PREFETCH_ACTIONS_INFO, &view.prefetch_actions_info),
        ] {
            cmds.push(DocumentCommand::SetText {
                id,
                text: text.clone(),
            });
        }
    }
    if dirty.dump {
        match &view.dump {
            Some(dump) => {
                cmds.push(DocumentCommand::SetValue {
                    id: DUMP_BOX,
                    value: dump.text.clone(),
                });
                cmds.push(DocumentCommand::SetText {
                    id: DUMP_INFO,
                    text: dump.info.clone(),
                });
                cmds.push(DocumentCommand::ShowModal { id: DUMP_MODAL });
                cmds.push(DocumentCommand::SelectContents { id: DUMP_BOX });
            }
            None => {
                cmds.push(DocumentCommand::SetText {
                    id: DUMP_INFO,
                    text: String::new(),
                });
                cmds.push(DocumentCommand::CloseModal { id: DUMP_MODAL });
            }
        }
    }
    if dirty.controls {
        for id in INCOGNITO_DISABLED {
            cmds.push(DocumentCommand::SetDisabled {
                id,
                disabled: view.controls_disabled,
            });
        }
    }

    cmds
}

fn stored_page_fields(row: &StoredPageRow) -> Vec<String> {
    vec![
        row.id.clone(),
        row.index.to_string(),
        row.href.clone(),
        row.link_text.clone(),
        row.namespace.clone(),
        row.size_kib.to_string(),
    ]
}

fn request_fields(row: &RequestRow) -> Vec<String> {
    vec![
        row.id.clone(),
        row.online_url.clone(),
        row.created.clone(),
        row.status.clone(),
        row.request_origin.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use internals_core::DumpView;

    use super::*;

    fn view() -> AppViewModel {
        AppViewModel {
            stored_pages: vec![StoredPageRow {
                index: 1,
                id: "3".to_string(),
                href: "https://a.com".to_string(),
                link_text: "https://a.com".to_string(),
                namespace: "bookmark".to_string(),
                size_kib: 4,
            }],
            network_status: "Connected".to_string(),
            page_actions_info: "Success".to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn clean_view_renders_nothing() {
        assert!(render(&view(), DirtySections::default()).is_empty());
    }

    #[test]
    fn only_dirty_sections_are_rendered() {
        let dirty = DirtySections {
            network_status: true,
            ..DirtySections::default()
        };
        assert_eq!(
            render(&view(), dirty),
            vec![DocumentCommand::SetText {
                id: CURRENT_STATUS,
                text: "Connected".to_string(),
            }]
        );
    }

    #[test]
    fn stored_pages_fill_the_row_template_fields() {
        let dirty = DirtySections {
            stored_pages: true,
            ..DirtySections::default()
        };
        let cmds = render(&view(), dirty);
        assert_eq!(
            cmds,
            vec![DocumentCommand::FillTable {
                id: STORED_PAGES_TABLE,
                rows: vec![vec![
                    "3".to_string(),
                    "1".to_string(),
                    "https://a.com".to_string(),
                    "https://a.com".to_string(),
                    "bookmark".to_string(),
                    "4".to_string(),
                ]],
            }]
        );
    }

    #[test]
    fn dump_opens_and_closes_the_modal() {
        let dirty = DirtySections {
            dump: true,
            ..DirtySections::default()
        };
        let mut open = view();
        open.dump = Some(DumpView {
            text: "{}".to_string(),
            info: String::new(),
        });
        let cmds = render(&open, dirty);
        assert!(cmds.contains(&DocumentCommand::ShowModal { id: DUMP_MODAL }));
        assert_eq!(cmds.last(), Some(&DocumentCommand::SelectContents { id: DUMP_BOX }));
        assert!(cmds.contains(&DocumentCommand::SetValue {
            id: DUMP_BOX,
            value: "{}".to_string(),
        }));

        let cmds = render(&view(), dirty);
        assert_eq!(cmds.last(), Some(&DocumentCommand::CloseModal { id: DUMP_MODAL }));
    }

    #[test]
    fn controls_follow_incognito() {
        let dirty = DirtySections {
            controls: true,
            ..DirtySections::default()
        };
        let mut incognito = view();
        incognito.controls_disabled = true;
        let cmds = render(&incognito, dirty);
        assert_eq!(cmds.len(), INCOGNITO_DISABLED.len());
        assert!(cmds
            .iter()
            .all(|cmd| matches!(cmd, DocumentCommand::SetDisabled { disabled: true, .. })));
    }
}
