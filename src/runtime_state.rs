use super::*;

use crate::fetch::{FetchId, FetchMock, FetchRequest, Method};
use crate::selector::Selector;

/// Which widget behavior a registered listener triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListenerAction {
    OpenFromTrigger,
    CloseModal,
    SubmitForm,
}

/// Restricts a listener to events whose target matches a role selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TargetFilter {
    Any,
    Matches(Selector),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Listener {
    pub(crate) filter: TargetFilter,
    pub(crate) action: ListenerAction,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    pub(crate) map: HashMap<NodeId, HashMap<String, Vec<Listener>>>,
}

impl ListenerStore {
    pub(crate) fn add(&mut self, node_id: NodeId, event: String, listener: Listener) {
        let listeners = self
            .map
            .entry(node_id)
            .or_default()
            .entry(event)
            .or_default();

        // Re-registering an identical listener for the same event type is a no-op.
        if listeners.contains(&listener) {
            return;
        }

        listeners.push(listener);
    }

    pub(crate) fn get(&self, node_id: NodeId, event: &str) -> Vec<Listener> {
        self.map
            .get(&node_id)
            .and_then(|events| events.get(event))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub(crate) struct EventState {
    pub(crate) event_type: String,
    pub(crate) target: NodeId,
    pub(crate) current_target: NodeId,
    pub(crate) event_phase: i32,
    pub(crate) time_stamp_ms: i64,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub(crate) fn new(event_type: &str, target: NodeId, time_stamp_ms: i64) -> Self {
        Self {
            event_type: event_type.to_string(),
            target,
            current_target: target,
            event_phase: 2,
            time_stamp_ms,
            default_prevented: false,
        }
    }

    pub(crate) fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Timeout,
    AnimationFrame,
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub kind: TimerKind,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn allocate_timer_id(&mut self) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    pub(crate) fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }
}

#[derive(Debug)]
pub(crate) struct NetworkState {
    pub(crate) mocks: HashMap<(Method, String), FetchMock>,
    pub(crate) calls: Vec<FetchRequest>,
    pub(crate) pending: VecDeque<FetchRequest>,
    pub(crate) next_fetch_id: u64,
    pub(crate) fetch_step_limit: usize,
}

impl Default for NetworkState {
    fn default() -> Self {
        Self {
            mocks: HashMap::new(),
            calls: Vec::new(),
            pending: VecDeque::new(),
            next_fetch_id: 1,
            fetch_step_limit: 10_000,
        }
    }
}

impl NetworkState {
    pub(crate) fn allocate_fetch_id(&mut self) -> FetchId {
        let id = FetchId(self.next_fetch_id);
        self.next_fetch_id += 1;
        id
    }

    pub(crate) fn take_pending(&mut self, id: FetchId) -> Option<FetchRequest> {
        let pos = self.pending.iter().position(|request| request.id == id)?;
        self.pending.remove(pos)
    }
}

#[derive(Debug, Default)]
pub(crate) struct PlatformCaptureState {
    pub(crate) alert_messages: Vec<String>,
    pub(crate) console_errors: Vec<String>,
    pub(crate) navigations: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) network: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            network: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}
