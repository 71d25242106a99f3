use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use chrono::Utc;
use internals_core::{update, AppState, Effect, Msg};
use internals_host::{DumpWriter, HostSeed, HostServiceProxy, InMemoryHost};
use internals_logging::{internals_debug, internals_info, internals_warn};

use super::config::{load_config, DEFAULT_CONFIG_PATH};
use super::console::{self, ConsoleCommand};
use super::document::{Document, DocumentCommand, DomEvent, ElementId, EventKind, Registration};
use super::effects::EffectRunner;
use super::ui::constants::*;
use super::ui::{layout, render};

pub fn run_app() -> anyhow::Result<()> {
    let config_path = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;
    internals_logging::initialize(&config.logging);
    internals_info!("Starting with config {:?}", config_path);

    let seed = match &config.seed_path {
        Some(path) => HostSeed::load(path)?,
        None => HostSeed::default(),
    };
    let host: Arc<dyn HostServiceProxy> = Arc::new(InMemoryHost::new(seed));
    let dump_writer = DumpWriter::new(
        config.dump_dir.clone(),
        Arc::new(|| Utc::now().timestamp_millis()),
    );

    let mut controller = PageController::new(host, dump_writer)?;
    console::spawn_reader(controller.event_sender())?;
    println!("{}", console::HELP);

    controller.start(config.incognito);
    controller.run();
    internals_info!("Page closed");
    Ok(())
}

/// Everything the controller reacts to from other threads, delivered on one
/// channel. Document events are handled synchronously by [`PageController::click`].
#[derive(Debug)]
pub enum AppEvent {
    Host(Msg),
    Console(ConsoleCommand),
}

/// Elements the controller listens to.
const BINDINGS: &[(ElementId, EventKind)] = &[
    (BUTTON_DELETE_PAGES, EventKind::Click),
    (BUTTON_DELETE_REQUESTS, EventKind::Click),
    (BUTTON_REFRESH, EventKind::Click),
    (BUTTON_DUMP, EventKind::Click),
    (BUTTON_CLOSE_DUMP, EventKind::Click),
    (BUTTON_COPY, EventKind::Click),
    (BUTTON_SAVE_DUMP, EventKind::Click),
    (BUTTON_REFRESH_LOGS, EventKind::Click),
    (BUTTON_ADD_TO_QUEUE, EventKind::Click),
    (BUTTON_SCHEDULE_NWAKE, EventKind::Click),
    (BUTTON_CANCEL_NWAKE, EventKind::Click),
    (BUTTON_SHOW_NOTIFICATION, EventKind::Click),
    (BUTTON_GENERATE_PAGE_BUNDLE, EventKind::Click),
    (BUTTON_GET_OPERATION, EventKind::Click),
    (BUTTON_DOWNLOAD_ARCHIVE, EventKind::Click),
    (TOGGLE_ALL_STORED, EventKind::Click),
    (TOGGLE_ALL_REQUESTS, EventKind::Click),
    (MODEL_CHECKBOX, EventKind::Change),
    (REQUEST_CHECKBOX, EventKind::Change),
    (PREFETCH_CHECKBOX, EventKind::Change),
    (LIMITLESS_CHECKBOX, EventKind::Change),
];

/// Owns the page state and the document, and is the only place either is
/// changed. Host completions and console commands are handled one at a time
/// from the same channel.
pub struct PageController {
    state: AppState,
    document: Document,
    effects: EffectRunner,
    dump_writer: DumpWriter,
    event_tx: mpsc::Sender<AppEvent>,
    event_rx: mpsc::Receiver<AppEvent>,
    dom_rx: mpsc::Receiver<DomEvent>,
    registrations: Vec<Registration>,
    running: bool,
}

impl PageController {
    pub fn new(host: Arc<dyn HostServiceProxy>, dump_writer: DumpWriter) -> io::Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let effects = EffectRunner::new(host, event_tx.clone())?;
        let mut document = layout::build_document();
        let (dom_tx, dom_rx) = mpsc::channel();
        let registrations = attach(&mut document, &dom_tx);
        Ok(Self {
            state: AppState::new(),
            document,
            effects,
            dump_writer,
            event_tx,
            event_rx,
            dom_rx,
            registrations,
            running: true,
        })
    }

    pub fn event_sender(&self) -> mpsc::Sender<AppEvent> {
        self.event_tx.clone()
    }

    /// Page load: reads the incognito flag once and, outside incognito,
    /// fetches everything.
    pub fn start(&mut self, incognito: bool) {
        internals_info!(
            "Page loaded ({} listeners, incognito={})",
            self.registrations.len(),
            incognito
        );
        self.dispatch(Msg::Initialized { incognito });
    }

    pub fn run(&mut self) {
        while self.running {
            match self.event_rx.recv() {
                Ok(event) => self.handle(event),
                Err(_) => break,
            }
        }
    }

    fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Host(msg) => self.dispatch(msg),
            AppEvent::Console(command) => self.handle_console(command),
        }
    }

    /// Clicks `id` and turns the resulting document events into messages
    /// before anything else is handled, so inputs and selections are read as
    /// they were at the click.
    fn click(&mut self, id: ElementId) -> bool {
        let clicked = self.document.click(id);
        while let Ok(event) = self.dom_rx.try_recv() {
            if let Some(msg) = self.dom_msg(&event) {
                self.dispatch(msg);
            }
        }
        clicked
    }

    fn dispatch(&mut self, msg: Msg) {
        internals_debug!("Dispatching {:?}", msg);
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        let local = self.effects.enqueue(effects);
        self.render();
        for effect in local {
            self.run_local_effect(effect);
        }
    }

    fn render(&mut self) {
        let dirty = self.state.consume_dirty();
        if !dirty.any() {
            return;
        }
        let view = self.state.view();
        for command in render::render(&view, dirty) {
            self.document.apply(command);
        }
    }

    fn run_local_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ClearUrlInput => self.document.apply(DocumentCommand::SetValue {
                id: INPUT_URL,
                value: String::new(),
            }),
            Effect::CopyDumpToClipboard => self.document.copy_contents(DUMP_BOX),
            Effect::WriteDump(text) => {
                let result = match self.dump_writer.write(&text) {
                    Ok(path) => {
                        internals_info!("Dump saved to {:?}", path);
                        Ok(path.display().to_string())
                    }
                    Err(err) => {
                        internals_warn!("Saving dump failed: {}", err);
                        Err(err.to_string())
                    }
                };
                let _ = self.event_tx.send(AppEvent::Host(Msg::DumpSaved(result)));
            }
            other => internals_warn!("Host effect reached the page: {:?}", other),
        }
    }

    fn dom_msg(&mut self, event: &DomEvent) -> Option<Msg> {
        let checked = event.checked.unwrap_or(false);
        let msg = match event.target {
            BUTTON_DELETE_PAGES => {
                Msg::DeletePagesClicked(self.document.selected_values(STORED_GROUP))
            }
            BUTTON_DELETE_REQUESTS => {
                Msg::DeleteRequestsClicked(self.document.selected_values(REQUESTS_GROUP))
            }
            BUTTON_REFRESH => Msg::RefreshAllClicked,
            BUTTON_DUMP => Msg::DumpClicked,
            BUTTON_CLOSE_DUMP => Msg::CloseDumpClicked,
            BUTTON_COPY => Msg::CopyDumpClicked,
            BUTTON_SAVE_DUMP => Msg::SaveDumpClicked,
            BUTTON_REFRESH_LOGS => Msg::RefreshLogsClicked,
            BUTTON_ADD_TO_QUEUE => Msg::AddToQueueClicked(self.document.value(INPUT_URL)),
            BUTTON_SCHEDULE_NWAKE => Msg::ScheduleNwakeClicked,
            BUTTON_CANCEL_NWAKE => Msg::CancelNwakeClicked,
            BUTTON_SHOW_NOTIFICATION => Msg::ShowNotificationClicked,
            BUTTON_GENERATE_PAGE_BUNDLE => {
                Msg::GeneratePageBundleClicked(self.document.value(INPUT_GENERATE_URLS))
            }
            BUTTON_GET_OPERATION => {
                Msg::GetOperationClicked(self.document.value(INPUT_OPERATION_NAME))
            }
            BUTTON_DOWNLOAD_ARCHIVE => {
                Msg::DownloadArchiveClicked(self.document.value(INPUT_DOWNLOAD_NAME))
            }
            MODEL_CHECKBOX => Msg::RecordPageModelToggled(checked),
            REQUEST_CHECKBOX => Msg::RecordRequestQueueToggled(checked),
            PREFETCH_CHECKBOX => Msg::RecordPrefetchServiceToggled(checked),
            LIMITLESS_CHECKBOX => Msg::LimitlessPrefetchingToggled(checked),
            TOGGLE_ALL_STORED => {
                self.document.toggle_all_checkboxes(STORED_GROUP, checked);
                return None;
            }
            TOGGLE_ALL_REQUESTS => {
                self.document.toggle_all_checkboxes(REQUESTS_GROUP, checked);
                return None;
            }
            other => {
                internals_debug!("Ignoring event on {}", other);
                return None;
            }
        };
        Some(msg)
    }

    fn handle_console(&mut self, command: ConsoleCommand) {
        match command {
            ConsoleCommand::Click(name) => match self.document.find(&name) {
                Some(id) if !self.click(id) => println!("{name} is disabled"),
                Some(_) => {}
                None => println!("no element named {name}"),
            },
            ConsoleCommand::Type { target, text } => {
                let typed = self
                    .document
                    .find(&target)
                    .is_some_and(|id| self.document.type_text(id, &text));
                if !typed {
                    println!("cannot type into {target}");
                }
            }
            ConsoleCommand::Select { group, value } => {
                if !self.document.toggle_grouped_checkbox(&group, &value) {
                    println!("no row {value} in {group}");
                }
            }
            ConsoleCommand::Show => print!("{}", self.document.render_text()),
            ConsoleCommand::Help => {
                println!("{}", console::HELP);
                let names: Vec<_> = layout::interactive_ids()
                    .iter()
                    .map(|id| id.name())
                    .collect();
                println!("elements: {}", names.join(", "));
            }
            ConsoleCommand::Quit => self.running = false,
        }
    }

    #[cfg(test)]
    fn pump(&mut self) {
        const QUIET: std::time::Duration = std::time::Duration::from_millis(500);
        while let Ok(event) = self.event_rx.recv_timeout(QUIET) {
            self.handle(event);
        }
    }
}

/// Registers a forwarding listener for every binding. The listeners stay
/// attached for as long as the returned registrations are kept.
fn attach(document: &mut Document, dom_tx: &mpsc::Sender<DomEvent>) -> Vec<Registration> {
    BINDINGS
        .iter()
        .map(|&(id, kind)| {
            let tx = dom_tx.clone();
            document.add_listener(id, kind, move |event| {
                let _ = tx.send(event.clone());
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use internals_core::{OfflinePage, SavePageRequest};
    use internals_host::Clock;
    use tempfile::TempDir;

    use super::*;

    fn page(id: &str) -> OfflinePage {
        OfflinePage {
            id: id.to_string(),
            online_url: format!("https://example.com/{id}"),
            namespace: "bookmark".to_string(),
            size: 2048,
            ..OfflinePage::default()
        }
    }

    fn controller(dump_dir: &TempDir) -> PageController {
        let seed = HostSeed {
            offline_pages: vec![page("3"), page("5"), page("7")],
            save_page_requests: vec![SavePageRequest {
                id: "41".to_string(),
                online_url: "https://queued.example.com".to_string(),
                ..SavePageRequest::default()
            }],
            ..HostSeed::default()
        };
        let clock: Clock = Arc::new(|| 1_700_000_000_000);
        let host: Arc<dyn HostServiceProxy> = Arc::new(InMemoryHost::with_clock(seed, clock.clone()));
        let writer = DumpWriter::new(dump_dir.path().to_path_buf(), clock);
        PageController::new(host, writer).expect("controller")
    }

    fn click(controller: &mut PageController, id: ElementId) {
        assert!(controller.click(id), "{id} not clickable");
        controller.pump();
    }

    #[test]
    fn load_fills_every_section() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        let doc = &page.document;
        assert_eq!(doc.rows(STORED_PAGES_TABLE).len(), 3);
        assert_eq!(doc.rows(REQUEST_QUEUE_TABLE).len(), 1);
        assert_eq!(doc.text(CURRENT_STATUS), Some("Connected"));
        assert!(!doc.is_disabled(BUTTON_REFRESH));
    }

    #[test]
    fn incognito_disables_controls_and_fetches_nothing() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(true);
        page.pump();

        for id in INCOGNITO_DISABLED {
            assert!(page.document.is_disabled(id), "{id} enabled");
        }
        assert!(page.document.rows(STORED_PAGES_TABLE).is_empty());
        assert_eq!(page.document.text(CURRENT_STATUS), Some(""));

        assert!(!page.click(BUTTON_REFRESH));
        page.pump();
        assert!(page.document.rows(STORED_PAGES_TABLE).is_empty());
    }

    #[test]
    fn deleting_selected_pages_refreshes_the_table() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        page.document.toggle_grouped_checkbox(STORED_GROUP, "3");
        page.document.toggle_grouped_checkbox(STORED_GROUP, "7");
        click(&mut page, BUTTON_DELETE_PAGES);

        let doc = &page.document;
        assert_eq!(doc.text(PAGE_ACTIONS_INFO), Some("Success"));
        let rows = doc.rows(STORED_PAGES_TABLE);
        assert_eq!(rows.len(), 1);
        assert!(doc.selected_values(STORED_GROUP).is_empty());
    }

    #[test]
    fn toggle_all_selects_every_request() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        click(&mut page, TOGGLE_ALL_REQUESTS);
        assert_eq!(page.document.selected_values(REQUESTS_GROUP), vec!["41"]);
        click(&mut page, BUTTON_DELETE_REQUESTS);
        assert_eq!(page.document.text(REQUEST_QUEUE_ACTIONS_INFO), Some("Success"));
        assert!(page.document.rows(REQUEST_QUEUE_TABLE).is_empty());
    }

    #[test]
    fn adding_urls_reports_each_and_refreshes_the_queue() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        page.document
            .type_text(INPUT_URL, "https://a.com,not a url");
        click(&mut page, BUTTON_ADD_TO_QUEUE);

        let status = page.document.text(SAVE_URL_STATE).unwrap_or_default();
        assert!(status.contains("https://a.com has been added to queue.\n"));
        assert!(status.contains("not a url failed to be added to queue.\n"));
        assert_eq!(page.document.value(INPUT_URL), "");
        assert_eq!(page.document.rows(REQUEST_QUEUE_TABLE).len(), 2);
        assert_eq!(page.state.pending_add_batches(), 0);
    }

    #[test]
    fn logging_checkboxes_reach_the_host() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        click(&mut page, MODEL_CHECKBOX);
        page.document.toggle_grouped_checkbox(STORED_GROUP, "5");
        click(&mut page, BUTTON_DELETE_PAGES);
        click(&mut page, BUTTON_REFRESH_LOGS);

        let logs = page.document.items(LOGS_LIST);
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("OfflinePageModel"));
        assert!(page.document.is_checked(MODEL_CHECKBOX));
    }

    #[test]
    fn prefetch_errors_are_shown() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        click(&mut page, BUTTON_CANCEL_NWAKE);
        assert_eq!(
            page.document.text(PREFETCH_ACTIONS_INFO),
            Some("Error: No NWake is scheduled")
        );
        click(&mut page, BUTTON_SCHEDULE_NWAKE);
        assert_eq!(page.document.text(PREFETCH_ACTIONS_INFO), Some("Scheduled."));
    }

    #[test]
    fn dump_can_be_copied_and_saved() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        click(&mut page, BUTTON_DUMP);
        assert!(page.document.is_modal_open(DUMP_MODAL));
        let dump = page.document.value(DUMP_BOX);
        assert!(dump.starts_with("{\n  \"offlinePages\": ["));

        click(&mut page, BUTTON_COPY);
        assert_eq!(page.document.clipboard(), Some(dump.as_str()));
        assert_eq!(page.document.text(DUMP_INFO), Some("Copied to clipboard!"));

        click(&mut page, BUTTON_SAVE_DUMP);
        let info = page.document.text(DUMP_INFO).unwrap_or_default().to_string();
        let path = info.strip_prefix("Saved to ").expect("saved");
        assert_eq!(fs::read_to_string(path).unwrap(), dump);

        click(&mut page, BUTTON_CLOSE_DUMP);
        assert!(!page.document.is_modal_open(DUMP_MODAL));
    }

    #[test]
    fn console_script_submits_input_as_it_was_at_the_click() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        page.document.toggle_grouped_checkbox(STORED_GROUP, "3");
        let tx = page.event_sender();
        for command in [
            ConsoleCommand::Type {
                target: "url".to_string(),
                text: "https://first.com".to_string(),
            },
            ConsoleCommand::Click("add-to-queue".to_string()),
            ConsoleCommand::Type {
                target: "url".to_string(),
                text: "https://second.com".to_string(),
            },
            ConsoleCommand::Click("delete-selected-pages".to_string()),
            ConsoleCommand::Select {
                group: STORED_GROUP.to_string(),
                value: "5".to_string(),
            },
        ] {
            tx.send(AppEvent::Console(command)).unwrap();
        }
        page.pump();

        assert_eq!(
            page.document.text(SAVE_URL_STATE),
            Some("https://first.com has been added to queue.\n")
        );
        let queued: Vec<_> = page
            .state
            .save_page_requests()
            .iter()
            .map(|request| request.online_url.as_str())
            .collect();
        assert_eq!(queued, vec!["https://queued.example.com", "https://first.com"]);
        let remaining: Vec<_> = page
            .state
            .offline_pages()
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(remaining, vec!["5", "7"]);
    }

    #[test]
    fn toggle_all_uses_the_state_carried_by_the_click() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        page.start(false);
        page.pump();

        click(&mut page, TOGGLE_ALL_STORED);
        assert_eq!(page.document.selected_values(STORED_GROUP), vec!["3", "5", "7"]);
        // The controlling checkbox is unchecked later; the earlier click still
        // selected everything.
        page.document.apply(DocumentCommand::SetChecked {
            id: TOGGLE_ALL_STORED,
            checked: false,
        });
        assert_eq!(page.document.selected_values(STORED_GROUP).len(), 3);
        click(&mut page, TOGGLE_ALL_STORED);
        assert_eq!(page.document.selected_values(STORED_GROUP), vec!["3", "5", "7"]);
    }

    #[test]
    fn dropping_registrations_detaches_listeners() {
        let temp = TempDir::new().unwrap();
        let mut page = controller(&temp);
        assert_eq!(page.document.listener_count(), BINDINGS.len());
        page.registrations.clear();
        assert_eq!(page.document.listener_count(), 0);
    }
}
