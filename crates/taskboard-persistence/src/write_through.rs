use crate::traits::ListStore;
use taskboard_core::{RetryPolicy, TaskboardError, TaskboardResult};
use taskboard_domain::{ListId, StoreWrite};

/// Applies a mutation's store write, retrying failures with exponential backoff.
#[derive(Debug, Clone, Copy)]
pub struct WriteThrough {
    policy: RetryPolicy,
}

impl WriteThrough {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    /// Perform `write` against `store`. Returns the assigned key for inserts.
    pub async fn apply<S: ListStore + ?Sized>(
        &self,
        store: &S,
        write: &StoreWrite,
    ) -> TaskboardResult<Option<ListId>> {
        let max_attempts = self.policy.effective_max_attempts();
        let mut attempt = 1;
        loop {
            let result = match write {
                StoreWrite::Insert(list) => store.insert(list).await.map(Some),
                StoreWrite::Update(list) => store.update(list).await.map(|_| None),
                StoreWrite::Remove(id) => store.remove(*id).await.map(|_| None),
            };

            match result {
                Ok(inserted) => {
                    if attempt > 1 {
                        tracing::info!("Store write succeeded on attempt {}", attempt);
                    }
                    return Ok(inserted);
                }
                Err(e) if attempt < max_attempts && is_transient(&e) => {
                    let delay = self.policy.backoff_for(attempt);
                    tracing::warn!(
                        "Store write failed (attempt {}/{}), retrying in {:?}: {}",
                        attempt,
                        max_attempts,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        "Store write for list {:?} abandoned after {} attempt(s): {}",
                        write.list_id(),
                        attempt,
                        e
                    );
                    return Err(TaskboardError::Storage {
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

/// Failures worth another try. Missing records and bad data will not fix themselves.
fn is_transient(error: &TaskboardError) -> bool {
    matches!(
        error,
        TaskboardError::Io(_)
            | TaskboardError::Database(_)
            | TaskboardError::StoreUnavailable(_)
            | TaskboardError::Storage { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockListStore;
    use taskboard_domain::{NewList, TaskList};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff_ms: 1,
        }
    }

    fn io_error() -> TaskboardError {
        TaskboardError::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
    }

    #[tokio::test]
    async fn test_insert_returns_assigned_key() {
        let mut store = MockListStore::new();
        store.expect_insert().times(1).returning(|_| Ok(7));

        let write = StoreWrite::Insert(NewList::new("New List".into()));
        let id = WriteThrough::new(fast_policy(3))
            .apply(&store, &write)
            .await
            .unwrap();
        assert_eq!(id, Some(7));
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let mut store = MockListStore::new();
        let mut calls = 0;
        store.expect_update().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(io_error())
            } else {
                Ok(())
            }
        });

        let write = StoreWrite::Update(TaskList::from_new(1, NewList::new("a".into())));
        WriteThrough::new(fast_policy(3))
            .apply(&store, &write)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut store = MockListStore::new();
        store.expect_remove().times(3).returning(|_| Err(io_error()));

        let err = WriteThrough::new(fast_policy(3))
            .apply(&store, &StoreWrite::Remove(1))
            .await
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Storage { attempts: 3, .. }));
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let mut store = MockListStore::new();
        store
            .expect_update()
            .times(1)
            .returning(|_| Err(TaskboardError::NotFound("List record 1".into())));

        let write = StoreWrite::Update(TaskList::from_new(1, NewList::new("a".into())));
        let err = WriteThrough::new(fast_policy(5))
            .apply(&store, &write)
            .await
            .unwrap_err();
        assert!(matches!(err, TaskboardError::Storage { attempts: 1, .. }));
    }
}
