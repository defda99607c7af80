//! Record encoding and load-time validation.
//!
//! Records are schema-less JSON objects. Decoding turns them into declared
//! types, filling defaults and repairing what can be repaired.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use taskboard_core::config::DEFAULT_TASK_DATE;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{ListId, NewList, Task, TaskId, TaskList};

/// Auto-keyed table of list records shared by the file and memory stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordTable {
    #[serde(default = "first_key")]
    pub next_key: ListId,
    #[serde(default)]
    pub records: BTreeMap<ListId, Value>,
}

fn first_key() -> ListId {
    1
}

impl Default for RecordTable {
    fn default() -> Self {
        Self {
            next_key: first_key(),
            records: BTreeMap::new(),
        }
    }
}

impl RecordTable {
    pub fn insert(&mut self, list: &NewList) -> TaskboardResult<ListId> {
        let key = self.next_key;
        let mut record = encode(list)?;
        if let Value::Object(map) = &mut record {
            map.insert("id".to_string(), Value::from(key));
        }
        self.records.insert(key, record);
        self.next_key += 1;
        Ok(key)
    }

    pub fn update(&mut self, list: &TaskList) -> TaskboardResult<()> {
        let slot = self
            .records
            .get_mut(&list.id)
            .ok_or_else(|| TaskboardError::NotFound(format!("List record {}", list.id)))?;
        *slot = encode(list)?;
        Ok(())
    }

    pub fn remove(&mut self, id: ListId) -> bool {
        self.records.remove(&id).is_some()
    }

    pub fn load_all(&self) -> TaskboardResult<Vec<TaskList>> {
        self.records
            .iter()
            .map(|(key, value)| decode_list(*key, value.clone()))
            .collect()
    }
}

pub fn encode<T: Serialize>(list: &T) -> TaskboardResult<Value> {
    serde_json::to_value(list).map_err(|e| TaskboardError::Serialization(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct RawList {
    id: Option<ListId>,
    title: Option<String>,
    #[serde(default)]
    tasks: Option<Vec<RawTask>>,
    next_task_id: Option<TaskId>,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    id: Option<TaskId>,
    title: Option<String>,
    date: Option<String>,
    completed: Option<bool>,
    pinned: Option<bool>,
}

/// Decode the record stored under `key`.
///
/// Missing task ids are assigned from the list's sequence, duplicate ids are
/// reassigned, and only the first pinned task keeps its pin.
pub fn decode_list(key: ListId, value: Value) -> TaskboardResult<TaskList> {
    let invalid = |reason: &str| TaskboardError::Validation(format!("record {}: {}", key, reason));

    let raw: RawList = serde_json::from_value(value).map_err(|e| invalid(&e.to_string()))?;

    if let Some(id) = raw.id {
        if id != key {
            tracing::warn!("Record {} carries id {}, using the store key", key, id);
        }
    }

    let title = raw
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| invalid("missing list title"))?;

    let raw_tasks = raw.tasks.unwrap_or_default();
    if let Some(index) = raw_tasks
        .iter()
        .position(|t| t.title.as_deref().map_or(true, |t| t.trim().is_empty()))
    {
        return Err(invalid(&format!("task {} has no title", index)));
    }

    let out_of_range = || invalid("task id out of range");
    let max_id = raw_tasks.iter().filter_map(|t| t.id).max().unwrap_or(0);
    let first_free = max_id.checked_add(1).ok_or_else(out_of_range)?;
    let mut next_task_id = raw.next_task_id.unwrap_or(1).max(first_free);
    let mut seen: HashSet<TaskId> = HashSet::new();
    let mut pin_taken = false;

    let mut tasks = Vec::with_capacity(raw_tasks.len());
    for raw_task in raw_tasks {
        let id = match raw_task.id {
            Some(id) if id > 0 && seen.insert(id) => id,
            _ => {
                let id = next_task_id;
                next_task_id = id.checked_add(1).ok_or_else(out_of_range)?;
                seen.insert(id);
                id
            }
        };
        let mut pinned = raw_task.pinned.unwrap_or(false);
        if pinned && pin_taken {
            tracing::warn!("Record {}: clearing extra pin on task {}", key, id);
            pinned = false;
        }
        pin_taken |= pinned;
        tasks.push(Task {
            id,
            title: raw_task.title.unwrap_or_default(),
            date: raw_task
                .date
                .unwrap_or_else(|| DEFAULT_TASK_DATE.to_string()),
            completed: raw_task.completed.unwrap_or(false),
            pinned,
        });
    }

    Ok(TaskList {
        id: key,
        title,
        tasks,
        next_task_id,
    })
}
