// Copyright 2026 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{collections::HashMap, fmt::Debug, io::Write, sync::Mutex, time::SystemTime};

use derive_more::From;
use serde::{Deserialize, Serialize};
use tracing::{
    field::{Field, Visit},
    span::Attributes,
    Event, Id, Subscriber,
};
use tracing_subscriber::{layer::Context, registry::LookupSpan, Layer};

use crate::{search::TerminationReason, tracing::constants};

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchEvent {
    pub timestamp: SystemTime,
    pub kind: SearchEventKind,
}

#[derive(Debug, Serialize, Deserialize, From)]
pub enum SearchEventKind {
    Start(StartEvent),
    Instant(InstantEvent),
    End(EndEvent),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartEvent {
    pub id: u64,
    pub kind: StartEventKind,
}

#[derive(Debug, Serialize, Deserialize, From)]
pub enum StartEventKind {
    Search(SearchStartEvent),
    RootMove(RootMoveStartEvent),
    Worker(WorkerStartEvent),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchStartEvent {
    pub board: String,
    pub color: String,
    pub depth: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RootMoveStartEvent {
    pub mov: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WorkerStartEvent {
    pub worker: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InstantEvent {
    pub kind: InstantEventKind,
}

#[derive(Debug, Serialize, Deserialize, From)]
pub enum InstantEventKind {
    SearchTermination(SearchTerminationEvent),
    SearchComplete(SearchCompleteEvent),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchTerminationEvent {
    pub reason: TerminationReason,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchCompleteEvent {
    pub best_move: String,
    pub best_score: String,
    pub nodes_evaluated: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EndEvent {
    pub id: u64,
    pub kind: EndEventKind,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum EndEventKind {
    Search,
    RootMove,
    Worker,
}

/// The SearchLogLayer is a Layer that understands the instrumentation in the search engine and writes a record of
/// every search, one JSON object per line, to its destination. It does not analyze the search; the log is meant to
/// be read back later.
///
/// Spans and events whose fields can't be read back are skipped rather than written half-formed.
pub struct SearchLogLayer {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl SearchLogLayer {
    pub fn new<W: Write + Send + 'static>(dest: W) -> SearchLogLayer {
        SearchLogLayer {
            writer: Mutex::new(Box::new(dest)),
        }
    }

    fn record_event<T: Into<SearchEventKind>>(&self, kind: T) {
        let event = SearchEvent {
            timestamp: SystemTime::now(),
            kind: kind.into(),
        };

        // A poisoned writer means another thread panicked mid-write; there's nothing sensible left to log to.
        if let Ok(mut writer) = self.writer.lock() {
            if serde_json::to_writer(&mut *writer, &event).is_ok() {
                let _ = writeln!(&mut *writer);
            }
        }
    }

    fn record_start_event<T: Into<StartEventKind>>(&self, id: &Id, kind: T) {
        let event = StartEvent {
            id: id.into_u64(),
            kind: kind.into(),
        };

        self.record_event(event);
    }

    fn record_instant_event<T: Into<InstantEventKind>>(&self, kind: T) {
        let event = InstantEvent { kind: kind.into() };
        self.record_event(event);
    }

    fn record_end_event(&self, id: &Id, kind: EndEventKind) {
        let event = EndEvent {
            id: id.into_u64(),
            kind,
        };

        self.record_event(event);
    }

    fn on_search_enter(&self, attrs: &Attributes<'_>, id: &Id) {
        let mut attrs = attrs.extract_fields();
        let depth: Option<u32> = attrs.get("depth").and_then(|d| d.parse().ok());
        if let (Some(board), Some(color), Some(depth)) =
            (attrs.remove("board"), attrs.remove("color"), depth)
        {
            self.record_start_event(id, SearchStartEvent { board, color, depth });
        }
    }

    fn on_search_exit(&self, id: &Id) {
        self.record_end_event(id, EndEventKind::Search);
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }

    fn on_root_move_enter(&self, attrs: &Attributes<'_>, id: &Id) {
        if let Some(mov) = attrs.extract_fields().remove("mov") {
            self.record_start_event(id, RootMoveStartEvent { mov });
        }
    }

    fn on_worker_enter(&self, attrs: &Attributes<'_>, id: &Id) {
        let worker: Option<usize> = attrs
            .extract_fields()
            .get("worker")
            .and_then(|w| w.parse().ok());
        if let Some(worker) = worker {
            self.record_start_event(id, WorkerStartEvent { worker });
        }
    }

    fn on_search_termination(&self, attrs: &HashMap<String, String>) {
        let reason = match attrs.get("reason").map(String::as_str) {
            Some("duration") => TerminationReason::Time,
            Some("nodes") => TerminationReason::Nodes,
            Some("explicit") => TerminationReason::Explicit,
            _ => return,
        };
        self.record_instant_event(SearchTerminationEvent { reason });
    }

    fn on_search_complete(&self, attrs: &mut HashMap<String, String>) {
        let nodes_evaluated: Option<u64> = attrs.get("nodes").and_then(|n| n.parse().ok());
        if let (Some(best_move), Some(best_score), Some(nodes_evaluated)) = (
            attrs.remove("best_move"),
            attrs.remove("best_score"),
            nodes_evaluated,
        ) {
            self.record_instant_event(SearchCompleteEvent {
                best_move,
                best_score,
                nodes_evaluated,
            });
        }
    }
}

impl<S: Subscriber> Layer<S> for SearchLogLayer
where
    S: for<'a> LookupSpan<'a>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let span = match ctx.span(id) {
            Some(span) => span,
            None => return,
        };

        match span.name() {
            constants::SEARCH => self.on_search_enter(attrs, id),
            constants::ROOT_MOVE => self.on_root_move_enter(attrs, id),
            constants::WORKER => self.on_worker_enter(attrs, id),
            _ => {}
        }
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let span = match ctx.span(&id) {
            Some(span) => span,
            None => return,
        };

        match span.name() {
            constants::SEARCH => self.on_search_exit(&id),
            constants::ROOT_MOVE => self.record_end_event(&id, EndEventKind::RootMove),
            constants::WORKER => self.record_end_event(&id, EndEventKind::Worker),
            _ => {}
        }
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut attrs = event.extract_fields();
        // Not all events have `event` keys (e.g. mundane logs from other modules).
        // Ignore the ones we don't care about.
        let kind = match attrs.get("event") {
            Some(kind) => kind.clone(),
            None => return,
        };

        match kind.as_str() {
            constants::SEARCH_TERMINATION => self.on_search_termination(&attrs),
            constants::SEARCH_COMPLETE => self.on_search_complete(&mut attrs),
            _ => {}
        }
    }
}

trait HasExtractableFields {
    fn extract_fields(&self) -> HashMap<String, String>;
}

impl HasExtractableFields for Attributes<'_> {
    fn extract_fields(&self) -> HashMap<String, String> {
        let mut extractor = HashMapExtractor(HashMap::new());
        self.record(&mut extractor);
        extractor.0
    }
}

impl HasExtractableFields for Event<'_> {
    fn extract_fields(&self) -> HashMap<String, String> {
        let mut extractor = HashMapExtractor(HashMap::new());
        self.record(&mut extractor);
        extractor.0
    }
}

struct HashMapExtractor(HashMap<String, String>);
impl Visit for HashMapExtractor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_owned(), value.to_owned());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        self.0
            .insert(field.name().to_owned(), format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing_subscriber::{layer::SubscriberExt, Registry};

    use super::*;
    use crate::{
        core::Color,
        eval::material,
        layouts,
        search::{SearchEngine, SearchOptions},
    };

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_events(buffer: &SharedBuffer) -> Vec<SearchEvent> {
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn logs_search_tree() {
        let buffer = SharedBuffer::default();
        let subscriber = Registry::default().with(SearchLogLayer::new(buffer.clone()));
        let engine = SearchEngine::configure(material(Color::White), 2);
        tracing::subscriber::with_default(subscriber, || {
            engine.search(&layouts::standard(), Color::White, &SearchOptions::default());
        });

        let events = logged_events(&buffer);
        match &events.first().unwrap().kind {
            SearchEventKind::Start(StartEvent {
                kind: StartEventKind::Search(start),
                ..
            }) => {
                assert_eq!(layouts::STANDARD, start.board);
                assert_eq!("White", start.color);
                assert_eq!(2, start.depth);
            }
            other => panic!("unexpected first event: {:?}", other),
        }

        assert!(matches!(
            events.last().unwrap().kind,
            SearchEventKind::End(EndEvent {
                kind: EndEventKind::Search,
                ..
            })
        ));

        let root_moves = events
            .iter()
            .filter(|e| {
                matches!(
                    e.kind,
                    SearchEventKind::Start(StartEvent {
                        kind: StartEventKind::RootMove(_),
                        ..
                    })
                )
            })
            .count();
        assert_eq!(10, root_moves);

        let complete = events.iter().find_map(|e| match &e.kind {
            SearchEventKind::Instant(InstantEvent {
                kind: InstantEventKind::SearchComplete(complete),
            }) => Some(complete),
            _ => None,
        });
        let complete = complete.unwrap();
        assert_eq!("a2a3", complete.best_move);
        assert!(complete.nodes_evaluated > 0);
    }

    #[test]
    fn logs_termination() {
        let buffer = SharedBuffer::default();
        let subscriber = Registry::default().with(SearchLogLayer::new(buffer.clone()));
        let engine = SearchEngine::configure(material(Color::White), 3);
        let options = SearchOptions {
            node_limit: Some(0),
            ..SearchOptions::default()
        };
        tracing::subscriber::with_default(subscriber, || {
            engine.search(&layouts::standard(), Color::White, &options);
        });

        let reasons: Vec<_> = logged_events(&buffer)
            .into_iter()
            .filter_map(|e| match e.kind {
                SearchEventKind::Instant(InstantEvent {
                    kind: InstantEventKind::SearchTermination(t),
                }) => Some(t.reason),
                _ => None,
            })
            .collect();
        assert_eq!(vec![TerminationReason::Nodes], reasons);
    }
}
