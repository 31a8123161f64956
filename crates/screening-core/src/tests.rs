#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use screening_types::analysis::{AnalysisRecord, ScoreBucket};
    use screening_types::config::WidgetConfig;
    use screening_types::event::SessionEvent;
    use screening_types::turn::{ChatTurn, Sender};
    use screening_types::{Result, WidgetError};

    use crate::dashboard::DashboardQuery;
    use crate::event_bus::EventBus;
    use crate::ports::{HostPagePort, SocketPort, StoragePort};
    use crate::session::{SessionController, SessionPhase};

    // ─── Fake Ports ──────────────────────────────────────────

    struct FakeSocket {
        open: Cell<bool>,
        sent: RefCell<Vec<String>>,
        effective_closes: Cell<u32>,
    }

    impl FakeSocket {
        fn connected() -> Self {
            Self {
                open: Cell::new(true),
                sent: RefCell::new(Vec::new()),
                effective_closes: Cell::new(0),
            }
        }

        fn disconnected() -> Self {
            let socket = Self::connected();
            socket.open.set(false);
            socket
        }

        fn sent_frames(&self) -> Vec<String> {
            self.sent.borrow().clone()
        }
    }

    impl SocketPort for FakeSocket {
        fn send_text(&self, payload: &str) -> Result<()> {
            if !self.open.get() {
                return Err(WidgetError::Socket("channel not open".to_string()));
            }
            self.sent.borrow_mut().push(payload.to_string());
            Ok(())
        }

        fn close(&self) {
            if self.open.get() {
                self.open.set(false);
                self.effective_closes.set(self.effective_closes.get() + 1);
            }
        }

        fn is_open(&self) -> bool {
            self.open.get()
        }
    }

    struct MemStorage {
        data: RefCell<HashMap<String, String>>,
    }

    impl MemStorage {
        fn new() -> Self {
            Self {
                data: RefCell::new(HashMap::new()),
            }
        }
    }

    impl StoragePort for MemStorage {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.data.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.data
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<()> {
            self.data.borrow_mut().remove(key);
            Ok(())
        }

        fn backend_name(&self) -> &str {
            "test-memory"
        }
    }

    struct FakeHost {
        values: HashMap<String, String>,
    }

    impl FakeHost {
        fn with_ids(vacancy: &str, resume: &str) -> Self {
            let mut values = HashMap::new();
            values.insert("vacancy-id".to_string(), vacancy.to_string());
            values.insert("resume-id".to_string(), resume.to_string());
            Self { values }
        }

        fn empty() -> Self {
            Self {
                values: HashMap::new(),
            }
        }
    }

    impl HostPagePort for FakeHost {
        fn read_value(&self, element_id: &str) -> Option<String> {
            self.values.get(element_id).cloned()
        }
    }

    fn controller() -> (SessionController, EventBus) {
        let bus = EventBus::new();
        (
            SessionController::new(WidgetConfig::default(), bus.clone()),
            bus,
        )
    }

    // ─── EventBus Tests ──────────────────────────────────────

    #[test]
    fn test_event_bus_new_is_empty() {
        let bus = EventBus::new();
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_emit_and_drain() {
        let bus = EventBus::new();
        bus.emit(SessionEvent::HandshakeSent);
        bus.emit(SessionEvent::Finished);

        assert!(bus.has_pending());

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert!(!bus.has_pending());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_event_bus_clone_shares_state() {
        let bus1 = EventBus::new();
        let bus2 = bus1.clone();

        bus1.emit(SessionEvent::ConnectionClosed);
        assert!(bus2.has_pending());
        assert_eq!(bus2.drain().len(), 1);
        assert!(!bus1.has_pending());
    }

    // ─── Handshake Tests ─────────────────────────────────────

    #[test]
    fn test_handshake_fires_once_when_ready() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("vac-1", "res-1"));
        assert_eq!(session.phase(), SessionPhase::AwaitingIdentifiers);

        session.handle_socket_open(&socket);
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(session.handshake_sent());

        let frames = socket.sent_frames();
        assert_eq!(frames.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&frames[0]).unwrap();
        assert_eq!(value["text"], "start");
        assert_eq!(value["vacancy_id"], "vac-1");
        assert_eq!(value["resume_id"], "res-1");

        assert!(bus.drain().contains(&SessionEvent::HandshakeSent));

        // A second open event must not resend.
        session.handle_socket_open(&socket);
        assert_eq!(socket.sent_frames().len(), 1);
    }

    #[test]
    fn test_handshake_suppressed_without_identifiers() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::empty());
        session.handle_socket_open(&socket);

        // Silent no-op, not an error: still awaiting, nothing sent.
        assert_eq!(session.phase(), SessionPhase::AwaitingIdentifiers);
        assert!(socket.sent_frames().is_empty());
        assert!(!session.handshake_sent());
    }

    #[test]
    fn test_handshake_suppressed_by_restored_history() {
        let storage = MemStorage::new();
        let config = WidgetConfig::default();
        let turns = vec![ChatTurn::bot("where were we?")];
        storage
            .set(&config.storage.turns, &serde_json::to_string(&turns).unwrap())
            .unwrap();

        let (mut session, _bus) = controller();
        let socket = FakeSocket::connected();
        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);

        // Restored history still activates the session, without a handshake.
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(socket.sent_frames().is_empty());
    }

    #[test]
    fn test_handshake_waits_for_channel() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        // Channel never opened: nothing fires.
        assert_eq!(session.phase(), SessionPhase::AwaitingIdentifiers);
        assert!(!session.handshake_sent());
    }

    // ─── Submit Tests ────────────────────────────────────────

    #[test]
    fn test_submit_appends_persists_and_transmits() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v1", "r1"));
        session.handle_socket_open(&socket);
        let _ = bus.drain();

        session.submit("I have five years of experience", &socket, &storage);

        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].sender, Sender::User);

        // Handshake plus the user frame.
        let frames = socket.sent_frames();
        assert_eq!(frames.len(), 2);
        let value: serde_json::Value = serde_json::from_str(&frames[1]).unwrap();
        assert_eq!(value["text"], "I have five years of experience");
        assert_eq!(value["vacancy_id"], "v1");

        // Persisted snapshot mirrors in-memory state.
        let raw = storage.get("chat_messages").unwrap().unwrap();
        let persisted: Vec<ChatTurn> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, session.turns());
        assert_eq!(storage.get("chat_finished").unwrap().unwrap(), "false");

        assert!(bus.drain().contains(&SessionEvent::TurnAppended {
            sender: Sender::User
        }));
    }

    #[test]
    fn test_submit_trims_input() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        session.submit("  padded  ", &socket, &storage);

        assert_eq!(session.turns().last().unwrap().text, "padded");
    }

    #[test]
    fn test_submit_empty_and_whitespace_is_noop() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        let baseline = socket.sent_frames().len();
        let _ = bus.drain();

        session.submit("", &socket, &storage);
        session.submit("   \t\n", &socket, &storage);

        assert!(session.turns().is_empty());
        assert_eq!(socket.sent_frames().len(), baseline);
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_submit_on_closed_channel_appends_without_transmit() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();
        let open_socket = FakeSocket::connected();
        let socket = FakeSocket::disconnected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&open_socket);
        session.handle_socket_closed();

        session.submit("anyone there?", &socket, &storage);

        // The turn is kept locally; the transmit is a silent no-op.
        assert_eq!(session.turns().len(), 1);
        assert!(socket.sent_frames().is_empty());
    }

    // ─── Inbound Tests ───────────────────────────────────────

    #[test]
    fn test_inbound_appends_bot_turn_in_order() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);

        session.handle_inbound(
            r#"{"message":"What interests you about this role?","finish_conversation":false}"#,
            &socket,
            &storage,
        );
        session.submit("The team", &socket, &storage);
        session.handle_inbound(
            r#"{"message":"Good. Next question.","finish_conversation":false}"#,
            &socket,
            &storage,
        );

        // Displayed order equals arrival order.
        let senders: Vec<Sender> = session.turns().iter().map(|t| t.sender).collect();
        assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
        assert_eq!(session.turns()[2].text, "Good. Next question.");
    }

    #[test]
    fn test_inbound_finish_freezes_session_and_closes_channel() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        let _ = bus.drain();

        session.handle_inbound(
            r#"{"message":"Analysis complete. Thanks!","finish_conversation":true}"#,
            &socket,
            &storage,
        );

        assert!(session.is_finished());
        assert_eq!(session.phase(), SessionPhase::Finished);
        assert_eq!(socket.effective_closes.get(), 1);
        assert_eq!(storage.get("chat_finished").unwrap().unwrap(), "true");

        let events = bus.drain();
        assert!(events.contains(&SessionEvent::Finished));

        // No further sends may transmit once finished.
        let before = socket.sent_frames().len();
        session.submit("one more thing", &socket, &storage);
        assert_eq!(socket.sent_frames().len(), before);
        assert_eq!(session.turns().len(), 2);
    }

    #[test]
    fn test_double_finish_closes_channel_exactly_once() {
        let (mut session, _bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);

        let finish = r#"{"message":"bye","finish_conversation":true}"#;
        session.handle_inbound(finish, &socket, &storage);
        session.handle_inbound(finish, &socket, &storage);

        assert_eq!(socket.effective_closes.get(), 1);
    }

    #[test]
    fn test_malformed_inbound_is_dropped() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        let _ = bus.drain();

        session.handle_inbound("{not json", &socket, &storage);
        session.handle_inbound(r#"{"finish_conversation":true}"#, &socket, &storage);

        // Turn sequence and phase unchanged; nothing surfaced to the UI.
        assert!(session.turns().is_empty());
        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(!session.is_finished());
        assert!(bus.drain().is_empty());
    }

    #[test]
    fn test_socket_closed_emits_event_without_transition() {
        let (mut session, bus) = controller();
        let storage = MemStorage::new();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        let _ = bus.drain();

        session.handle_socket_closed();

        assert_eq!(session.phase(), SessionPhase::Active);
        assert!(bus.drain().contains(&SessionEvent::ConnectionClosed));
    }

    // ─── Persistence Tests ───────────────────────────────────

    #[test]
    fn test_persisted_state_reloads_identically() {
        let storage = MemStorage::new();
        let (mut session, _bus) = controller();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        session.handle_inbound(
            r#"{"message":"Hello candidate","finish_conversation":false}"#,
            &socket,
            &storage,
        );
        session.submit("Hello bot", &socket, &storage);
        let turns_before = session.turns().to_vec();

        // Fresh controller over the same storage reproduces the sequence.
        let (mut restored, _bus2) = controller();
        restored.open(&storage, &FakeHost::with_ids("v", "r"));
        assert_eq!(restored.turns(), turns_before.as_slice());
        assert!(!restored.is_finished());
    }

    #[test]
    fn test_finished_session_rehydrates_as_finished() {
        let storage = MemStorage::new();
        let (mut session, _bus) = controller();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        session.handle_inbound(
            r#"{"message":"done","finish_conversation":true}"#,
            &socket,
            &storage,
        );

        let (mut restored, _bus2) = controller();
        restored.open(&storage, &FakeHost::with_ids("v", "r"));
        assert!(restored.is_finished());
        assert_eq!(restored.phase(), SessionPhase::Finished);
    }

    #[test]
    fn test_corrupt_persisted_turns_start_fresh() {
        let storage = MemStorage::new();
        storage.set("chat_messages", "{{{ definitely not json").unwrap();
        storage.set("chat_finished", "false").unwrap();

        let (mut session, _bus) = controller();
        session.open(&storage, &FakeHost::with_ids("v", "r"));
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_close_widget_clears_state_for_fresh_open() {
        let storage = MemStorage::new();
        let (mut session, _bus) = controller();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        session.submit("hi", &socket, &storage);
        session.handle_inbound(
            r#"{"message":"done","finish_conversation":true}"#,
            &socket,
            &storage,
        );

        session.close_widget(&socket, &storage);
        assert_eq!(session.phase(), SessionPhase::Closed);
        assert!(storage.get("chat_messages").unwrap().is_none());
        assert!(storage.get("chat_finished").unwrap().is_none());

        // A fresh open shows zero turns and finished = false.
        let fresh_socket = FakeSocket::connected();
        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&fresh_socket);
        assert!(session.turns().is_empty());
        assert!(!session.is_finished());
        assert_eq!(session.phase(), SessionPhase::Active);
    }

    #[test]
    fn test_close_widget_closes_channel() {
        let storage = MemStorage::new();
        let (mut session, _bus) = controller();
        let socket = FakeSocket::connected();

        session.open(&storage, &FakeHost::with_ids("v", "r"));
        session.handle_socket_open(&socket);
        session.close_widget(&socket, &storage);

        assert!(!socket.is_open());
        assert_eq!(socket.effective_closes.get(), 1);
    }

    // ─── Dashboard Tests ─────────────────────────────────────

    fn record(id: &str, score: u8, summary: &str) -> AnalysisRecord {
        AnalysisRecord {
            analysis_id: id.to_string(),
            candidate_id: format!("cand-{}", id),
            final_score: score,
            summary: summary.to_string(),
            conversation: vec![ChatTurn::bot("q"), ChatTurn::user("a")],
            created_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn sample_records() -> Vec<AnalysisRecord> {
        vec![
            record("a1", 10, "Weak overlap with the role"),
            record("a2", 55, "Partial match, lacks leadership experience"),
            record("a3", 80, "Solid backend engineer"),
            record("a4", 95, "Excellent senior candidate"),
        ]
    }

    #[test]
    fn test_dashboard_medium_bucket() {
        let records = sample_records();
        let query = DashboardQuery {
            search_term: String::new(),
            bucket: ScoreBucket::Medium,
        };
        let hits = query.filter(&records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].final_score, 55);
    }

    #[test]
    fn test_dashboard_all_bucket_retains_everything() {
        let records = sample_records();
        let query = DashboardQuery::new();
        assert_eq!(query.filter(&records).len(), 4);
    }

    #[test]
    fn test_dashboard_search_no_match_is_empty() {
        let records = sample_records();
        let query = DashboardQuery {
            search_term: "quantum basket weaving".to_string(),
            bucket: ScoreBucket::All,
        };
        assert!(query.filter(&records).is_empty());
    }

    #[test]
    fn test_dashboard_search_is_case_insensitive() {
        let records = sample_records();
        let query = DashboardQuery {
            search_term: "SENIOR".to_string(),
            bucket: ScoreBucket::All,
        };
        let hits = query.filter(&records);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].analysis_id, "a4");
    }

    #[test]
    fn test_dashboard_predicates_are_anded() {
        let records = sample_records();
        let query = DashboardQuery {
            search_term: "match".to_string(),
            bucket: ScoreBucket::High,
        };
        // "match" appears only in low/medium summaries.
        assert!(query.filter(&records).is_empty());
    }

    #[test]
    fn test_dashboard_preserves_source_order() {
        let records = sample_records();
        let query = DashboardQuery {
            search_term: String::new(),
            bucket: ScoreBucket::High,
        };
        let ids: Vec<&str> = query
            .filter(&records)
            .iter()
            .map(|r| r.analysis_id.as_str())
            .collect();
        assert_eq!(ids, vec!["a3", "a4"]);
    }
}
