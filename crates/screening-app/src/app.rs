//! Main egui application — composes the chat widget and the employer
//! dashboard, and owns the session wiring.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{self, Align2, CentralPanel, Vec2};

use screening_core::event_bus::EventBus;
use screening_core::ports::{AnalysesPort, HostPagePort, SocketPort, StoragePort};
use screening_core::session::SessionController;
use screening_platform::analyses::HttpAnalyses;
use screening_platform::host::DomHostPage;
use screening_platform::socket::{SocketHandlers, WebSocketChannel};
use screening_platform::storage::{LocalStorage, MemoryStorage};
use screening_types::analysis::AnalysisRecord;
use screening_types::config::WidgetConfig;
use screening_ui::panels::{chat, dashboard, launcher};
use screening_ui::state::UiState;
use screening_ui::theme;

/// The main application state
pub struct WidgetApp {
    config: WidgetConfig,
    ui_state: UiState,
    event_bus: EventBus,
    controller: Rc<RefCell<SessionController>>,
    storage: Rc<dyn StoragePort>,
    host: Rc<dyn HostPagePort>,
    /// Live channel for the current widget session, if one is open.
    socket: Rc<RefCell<Option<Rc<WebSocketChannel>>>>,
    /// Analysis list, replaced wholesale by the one startup fetch.
    analyses: Rc<RefCell<Vec<AnalysisRecord>>>,
    first_frame: bool,
}

impl WidgetApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = WidgetConfig::default();
        let event_bus = EventBus::new();
        let controller = SessionController::new(config.clone(), event_bus.clone());

        let storage: Rc<dyn StoragePort> = match LocalStorage::new() {
            Ok(local) => Rc::new(local),
            Err(e) => {
                log::warn!("localStorage unavailable: {}. Using memory backend.", e);
                Rc::new(MemoryStorage::new())
            }
        };
        log::info!("Storage backend: {}", storage.backend_name());

        let host: Rc<dyn HostPagePort> = match DomHostPage::new() {
            Ok(dom) => Rc::new(dom),
            Err(e) => {
                log::warn!("Host page unavailable: {}. Identifiers will not resolve.", e);
                Rc::new(NullHostPage)
            }
        };

        let analyses = Rc::new(RefCell::new(Vec::new()));
        Self::fetch_analyses(&config, analyses.clone(), cc.egui_ctx.clone());

        Self {
            config,
            ui_state: UiState::new(),
            event_bus,
            controller: Rc::new(RefCell::new(controller)),
            storage,
            host,
            socket: Rc::new(RefCell::new(None)),
            analyses,
            first_frame: true,
        }
    }

    /// Fetch the analysis list once at startup (async, fire-and-forget).
    /// A failed fetch logs a warning and leaves the list empty.
    fn fetch_analyses(
        config: &WidgetConfig,
        slot: Rc<RefCell<Vec<AnalysisRecord>>>,
        ctx: egui::Context,
    ) {
        let port = HttpAnalyses::new(config.analyses_url.clone());
        wasm_bindgen_futures::spawn_local(async move {
            match port.fetch_analyses().await {
                Ok(records) => {
                    log::info!("Fetched {} analysis records", records.len());
                    *slot.borrow_mut() = records;
                    ctx.request_repaint();
                }
                Err(e) => {
                    log::warn!("Analyses fetch failed: {}", e);
                }
            }
        });
    }

    /// Open the widget: load the session and connect the channel.
    fn open_widget(&mut self, ctx: &egui::Context) {
        self.controller
            .borrow_mut()
            .open(self.storage.as_ref(), self.host.as_ref());
        self.ui_state.widget_open = true;
        self.ui_state.connection_lost = false;
        self.ui_state.status_text = "Connecting...".to_string();

        let controller = self.controller.clone();
        let storage = self.storage.clone();
        let slot = self.socket.clone();

        let handlers = SocketHandlers {
            on_open: Box::new({
                let controller = controller.clone();
                let slot = slot.clone();
                let ctx = ctx.clone();
                move || {
                    if let Some(channel) = slot.borrow().as_ref() {
                        controller.borrow_mut().handle_socket_open(channel.as_ref());
                    }
                    ctx.request_repaint();
                }
            }),
            on_message: Box::new({
                let controller = controller.clone();
                let storage = storage.clone();
                let slot = slot.clone();
                let ctx = ctx.clone();
                move |raw: String| {
                    if let Some(channel) = slot.borrow().as_ref() {
                        controller.borrow_mut().handle_inbound(
                            &raw,
                            channel.as_ref(),
                            storage.as_ref(),
                        );
                    }
                    ctx.request_repaint();
                }
            }),
            on_close: Box::new({
                let controller = controller.clone();
                let ctx = ctx.clone();
                move || {
                    controller.borrow_mut().handle_socket_closed();
                    ctx.request_repaint();
                }
            }),
        };

        match WebSocketChannel::connect(&self.config.ws_url, handlers) {
            Ok(channel) => *self.socket.borrow_mut() = Some(channel),
            // No retry: the widget stays usable, bot turns simply never arrive.
            Err(e) => log::warn!("Socket connect failed: {}", e),
        }
    }

    /// Explicit close: discard persisted state and drop the channel.
    fn close_widget(&mut self) {
        {
            let socket = self.socket.borrow();
            let mut controller = self.controller.borrow_mut();
            match socket.as_ref() {
                Some(channel) => {
                    controller.close_widget(channel.as_ref(), self.storage.as_ref())
                }
                None => controller.close_widget(&DisconnectedSocket, self.storage.as_ref()),
            }
        }
        *self.socket.borrow_mut() = None;
        self.ui_state.reset_widget();
    }

    fn submit(&mut self, text: String) {
        let socket = self.socket.borrow();
        let mut controller = self.controller.borrow_mut();
        match socket.as_ref() {
            Some(channel) => {
                controller.submit(&text, channel.as_ref(), self.storage.as_ref())
            }
            None => controller.submit(&text, &DisconnectedSocket, self.storage.as_ref()),
        }
    }
}

impl eframe::App for WidgetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        // Drain events from the session controller
        let events = self.event_bus.drain();
        if !events.is_empty() {
            self.ui_state.process_events(events);
            ctx.request_repaint();
        }

        // ── Employer dashboard ───────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            let analyses = self.analyses.borrow();
            dashboard::dashboard_panel(ui, &mut self.ui_state, &analyses);
        });

        // ── Chat widget overlay (bottom-right) ───────────────
        let mut action = None;
        let mut open_clicked = false;
        egui::Area::new(egui::Id::new("screening_widget"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-20.0, -20.0))
            .show(ctx, |ui| {
                if self.ui_state.widget_open {
                    ui.set_width(350.0);
                    ui.set_height(500.0);
                    let controller = self.controller.borrow();
                    action = chat::chat_panel(
                        ui,
                        &mut self.ui_state,
                        controller.turns(),
                        controller.is_finished(),
                    );
                } else {
                    open_clicked = launcher::launcher_button(ui);
                }
            });

        if open_clicked {
            self.open_widget(ctx);
        }
        match action {
            Some(chat::ChatAction::Submitted(text)) => self.submit(text),
            Some(chat::ChatAction::Closed) => self.close_widget(),
            None => {}
        }
    }
}

// ─── Fallback adapters ───────────────────────────────────────

/// Stands in for the channel before it is connected (or after it is
/// dropped): sends are silent no-ops, close does nothing.
struct DisconnectedSocket;

impl SocketPort for DisconnectedSocket {
    fn send_text(&self, _payload: &str) -> screening_types::Result<()> {
        Err(screening_types::WidgetError::Socket(
            "channel not connected".to_string(),
        ))
    }

    fn close(&self) {}

    fn is_open(&self) -> bool {
        false
    }
}

/// Host page without a document; identifiers never resolve, the
/// handshake never fires.
struct NullHostPage;

impl HostPagePort for NullHostPage {
    fn read_value(&self, _element_id: &str) -> Option<String> {
        None
    }
}
