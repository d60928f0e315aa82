//! Iterative traversal driver.
//!
//! Traversal uses an explicit heap-allocated task stack instead of
//! call-stack recursion, so graph depth is bounded by available memory, not
//! by call-stack limits. Registration in the identity tracker always
//! precedes enqueueing a container's children; a child that points back at
//! an ancestor therefore finds the ancestor's (still incomplete) clone and
//! is wired in by reference instead of descending again.

use std::rc::Rc;

use regraft_types::{Mapping, OpaqueValue, Value};
use tracing::{debug, trace};

use crate::builder::{SlotKey, allocate_empty, write};
use crate::classify::{Strategy, classify};
use crate::errors::CloneError;
use crate::identity::IdentityTracker;
use crate::options::{CloneOptions, OpaquePolicy};

/// One pending unit of work: resolve `source` and store the result at
/// `slot` in `parent`. Owned solely by the work queue; dropped once done.
struct CloneTask {
    parent: Value,
    slot: SlotKey,
    source: Value,
}

/// Produce a fully independent copy of `root`.
///
/// Mutating any container reachable from the result never affects the
/// source, and vice versa. Shared-reference topology is preserved: nodes
/// that are one allocation in the source are one allocation in the clone,
/// including cycles. Opaque values follow `options.opaque`; under the
/// default policy they are shared by reference, which is explicitly not a
/// clone.
///
/// On failure no partial clone escapes; the call either returns a complete
/// graph or an error with no caller-visible side effects.
pub fn deep_clone(root: &Value, options: &CloneOptions) -> Result<Value, CloneError> {
    // Non-container roots reconstruct directly; no queue needed.
    let Some(root_clone) = allocate_empty(root) else {
        return reconstruct_leaf(root, options);
    };
    debug!(kind = root.kind(), "deep clone start");

    let mut tracker = IdentityTracker::new();
    let mut queue: Vec<CloneTask> = Vec::new();
    register_and_enqueue(root, &root_clone, &mut tracker, &mut queue);

    while let Some(task) = queue.pop() {
        // Identity check precedes classification: a hit wires the existing
        // clone in and suppresses descent, which is what terminates cycles
        // and keeps shared subgraphs shared.
        if let Some(id) = task.source.identity()
            && let Some(existing) = tracker.lookup(id)
        {
            trace!(%id, "identity hit, wiring existing clone");
            write(&task.parent, &task.slot, existing);
            continue;
        }

        let produced = match classify(&task.source) {
            Strategy::Sequence | Strategy::Mapping => {
                // allocate_empty succeeds for every container kind.
                let Some(shell) = allocate_empty(&task.source) else {
                    continue;
                };
                register_and_enqueue(&task.source, &shell, &mut tracker, &mut queue);
                shell
            }
            Strategy::Primitive | Strategy::Temporal => reconstruct_leaf(&task.source, options)?,
            Strategy::Pattern | Strategy::Opaque => {
                let produced = reconstruct_leaf(&task.source, options)?;
                // Identity-bearing leaves register too, so a pattern or a
                // handler-substituted opaque shared in the source stays
                // shared in the clone.
                if let Some(id) = task.source.identity() {
                    tracker.register(id, produced.clone());
                }
                produced
            }
        };
        write(&task.parent, &task.slot, produced);
    }

    debug!(tracked = tracker.len(), "deep clone complete");
    Ok(root_clone)
}

/// One-level copy: a fresh top container whose children are handle copies
/// shared with the source. Non-containers come back as value copies (plain
/// data) or shared handles (patterns, opaque values).
#[must_use]
pub fn shallow_clone(value: &Value) -> Value {
    match value {
        Value::Sequence(rc) => Value::sequence(rc.borrow().clone()),
        Value::Mapping(rc) => {
            let source = rc.borrow();
            let mut entries = Mapping::with_capacity(source.len());
            for key in source.ordered_keys() {
                if let Some(child) = source.get(&key) {
                    entries.insert(key, child.clone());
                }
            }
            Value::mapping(entries)
        }
        other => other.clone(),
    }
}

/// Reconstruct a non-container value.
fn reconstruct_leaf(value: &Value, options: &CloneOptions) -> Result<Value, CloneError> {
    match value {
        // A temporal clone is a new value carrying the same instant.
        Value::Temporal(instant) => Ok(Value::Temporal(*instant)),
        // A pattern clone recompiles from identical source text and flags
        // and carries the scan offset forward.
        Value::Pattern(pattern) => Ok(Value::pattern(pattern.rebuild()?)),
        Value::Opaque(inner) => resolve_opaque(inner, options),
        // Plain data: clone is a value copy.
        other => Ok(other.clone()),
    }
}

fn resolve_opaque(
    inner: &Rc<dyn OpaqueValue>,
    options: &CloneOptions,
) -> Result<Value, CloneError> {
    match &options.opaque {
        OpaquePolicy::Share => {
            // Best-effort policy: reference-sharing, not cloning.
            debug!(kind = inner.type_name(), "sharing opaque value by reference");
            Ok(Value::Opaque(inner.clone()))
        }
        OpaquePolicy::Strict => Err(CloneError::Unsupported {
            type_name: inner.type_name().to_string(),
        }),
        OpaquePolicy::Handler(handler) => handler(inner),
    }
}

/// Register `shell` as the clone of `source`, then enqueue one task per
/// child entry. Named mapping entries enqueue before symbol-keyed ones,
/// each group in insertion order.
fn register_and_enqueue(
    source: &Value,
    shell: &Value,
    tracker: &mut IdentityTracker,
    queue: &mut Vec<CloneTask>,
) {
    let Some(id) = source.identity() else {
        return;
    };
    // Registration precedes child traversal; cycle handling depends on it.
    tracker.register(id, shell.clone());

    match source {
        Value::Sequence(rc) => {
            for (index, child) in rc.borrow().iter().enumerate() {
                queue.push(CloneTask {
                    parent: shell.clone(),
                    slot: SlotKey::Index(index),
                    source: child.clone(),
                });
            }
        }
        Value::Mapping(rc) => {
            let entries = rc.borrow();
            for key in entries.ordered_keys() {
                if let Some(child) = entries.get(&key) {
                    queue.push(CloneTask {
                        parent: shell.clone(),
                        slot: SlotKey::Key(key),
                        source: child.clone(),
                    });
                }
            }
        }
        _ => {}
    }
}
