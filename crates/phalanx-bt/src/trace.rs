use std::sync::{Arc, Mutex};

use phalanx_core::{BbKey, Blackboard, SoldierId};

/// One node evaluation, recorded after the node returned.
///
/// This is intentionally "dumb data" so it can be collected during a battle and inspected later
/// by tests or debugging tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    pub tick: u64,
    pub agent: SoldierId,
    pub node: &'static str,
    pub success: bool,
}

pub trait TraceSink {
    fn emit(&mut self, event: TraceEvent);
}

#[derive(Debug, Default)]
pub struct NullTraceSink;

impl TraceSink for NullTraceSink {
    fn emit(&mut self, _event: TraceEvent) {}
}

#[derive(Debug, Default)]
pub struct VecTraceSink {
    pub events: Vec<TraceEvent>,
}

impl TraceSink for VecTraceSink {
    fn emit(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// Lets the caller keep a handle on a sink after boxing it into [`TRACE_SINK`].
impl<S: TraceSink> TraceSink for Arc<Mutex<S>> {
    fn emit(&mut self, event: TraceEvent) {
        if let Ok(mut sink) = self.lock() {
            sink.emit(event);
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Evaluations of nodes called `node`, in order.
    pub fn of<'a>(&'a self, node: &'a str) -> impl Iterator<Item = &'a TraceEvent> + 'a {
        self.events.iter().filter(move |e| e.node == node)
    }
}

/// Blackboard key for collecting events in-memory.
pub const TRACE_LOG: BbKey<TraceLog> = BbKey::new(0xA11D_7ACE_0000_0001);
/// Blackboard key for streaming events into a user-provided sink.
pub const TRACE_SINK: BbKey<Box<dyn TraceSink>> = BbKey::new(0xA11D_7ACE_0000_0002);

pub fn emit(blackboard: &mut Blackboard, event: TraceEvent) {
    if let Some(log) = blackboard.get_mut(TRACE_LOG) {
        log.push(event);
    }
    if let Some(sink) = blackboard.get_mut(TRACE_SINK) {
        sink.emit(event);
    }
}
