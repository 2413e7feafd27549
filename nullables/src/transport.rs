//! Nullable transport: scripted node replies and recorded requests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

use cos_rpc::{RpcError, Transport};
use serde::Serialize;
use serde_json::Value;

#[derive(Default)]
struct State {
    /// Replies per action. The last reply of a queue is sticky.
    replies: HashMap<String, VecDeque<Result<Value, RpcError>>>,
    /// Every call made, in order.
    calls: Vec<(String, Value)>,
}

/// A test transport that answers from a script instead of a node.
///
/// Cheap to clone; clones share the script and the call log, so a test can
/// keep one clone for assertions after handing another to a `NodeClient`.
#[derive(Clone, Default)]
pub struct NullTransport {
    state: Arc<Mutex<State>>,
}

impl NullTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide the log from the others.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a successful reply for `action`.
    pub fn respond(&self, action: &str, result: Value) -> &Self {
        self.push(action, Ok(result))
    }

    /// Queue a reply serialized from `value`.
    pub fn respond_with<T: Serialize>(&self, action: &str, value: &T) -> &Self {
        let result = serde_json::to_value(value).unwrap_or(Value::Null);
        self.push(action, Ok(result))
    }

    /// Queue a failure for `action`.
    pub fn fail(&self, action: &str, error: RpcError) -> &Self {
        self.push(action, Err(error))
    }

    fn push(&self, action: &str, reply: Result<Value, RpcError>) -> &Self {
        self.lock()
            .replies
            .entry(action.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    /// All calls made so far.
    pub fn calls(&self) -> Vec<(String, Value)> {
        self.lock().calls.clone()
    }

    /// Parameters of each call to `action`, in order.
    pub fn calls_to(&self, action: &str) -> Vec<Value> {
        self.lock()
            .calls
            .iter()
            .filter(|(a, _)| a == action)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn call_count(&self, action: &str) -> usize {
        self.lock().calls.iter().filter(|(a, _)| a == action).count()
    }

    /// Clear all state.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.replies.clear();
        state.calls.clear();
    }
}

impl Transport for NullTransport {
    fn call(&self, action: &str, params: Value) -> Result<Value, RpcError> {
        let mut state = self.lock();
        state.calls.push((action.to_string(), params));
        let queue = state
            .replies
            .get_mut(action)
            .ok_or_else(|| RpcError::Transport(format!("no reply scripted for {action}")))?;
        match queue.len() {
            0 => Err(RpcError::Transport(format!("no reply scripted for {action}"))),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or(Err(RpcError::EmptyResponse)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replies_in_order_then_sticky() {
        let t = NullTransport::new();
        t.respond("ping", json!(1)).respond("ping", json!(2));
        assert_eq!(t.call("ping", json!({})).unwrap(), json!(1));
        assert_eq!(t.call("ping", json!({})).unwrap(), json!(2));
        assert_eq!(t.call("ping", json!({})).unwrap(), json!(2));
    }

    #[test]
    fn unscripted_action_fails() {
        let t = NullTransport::new();
        assert!(matches!(
            t.call("get_chain_state", json!({})),
            Err(RpcError::Transport(_))
        ));
        assert_eq!(t.call_count("get_chain_state"), 1);
    }

    #[test]
    fn failures_are_replayed() {
        let t = NullTransport::new();
        t.fail("broadcast_trx", RpcError::Http(500));
        assert_eq!(t.call("broadcast_trx", json!({})), Err(RpcError::Http(500)));
    }

    #[test]
    fn clones_share_log() {
        let t = NullTransport::new();
        let observer = t.clone();
        t.respond("a", json!(null));
        let _ = t.call("a", json!({"x": 1}));
        assert_eq!(observer.calls_to("a"), vec![json!({"x": 1})]);
        observer.reset();
        assert!(t.calls().is_empty());
    }
}
