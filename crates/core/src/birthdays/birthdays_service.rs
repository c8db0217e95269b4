use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::Mutex;

use crate::birthdays::birthdays_model::{Birthday, NewBirthday, SoftDeleteOutcome};
use crate::birthdays::birthdays_traits::{BirthdayRepositoryTrait, BirthdayServiceTrait};
use crate::errors::{DatabaseError, Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

pub struct BirthdayService {
    repository: Arc<dyn BirthdayRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
    // Held across write + emit so events leave in commit order.
    commit_order: Arc<Mutex<()>>,
}

impl BirthdayService {
    pub fn new(
        repository: Arc<dyn BirthdayRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        BirthdayService {
            repository,
            event_sink,
            commit_order: Arc::new(Mutex::new(())),
        }
    }

    /// Runs a write and its event emission on a task of their own.
    ///
    /// Once queued, a write commits even if the caller stops waiting, so the
    /// emission must not depend on the caller's future being polled to the end.
    async fn run_write<T, F>(write: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        tokio::spawn(write)
            .await
            .map_err(|e| Error::Unexpected(format!("Birthday write task failed: {}", e)))?
    }
}

#[async_trait]
impl BirthdayServiceTrait for BirthdayService {
    fn get_birthday(&self, birthday_id: i32) -> Result<Birthday> {
        self.repository.get_birthday(birthday_id)?.ok_or_else(|| {
            DatabaseError::NotFound(format!("birthday {} does not exist", birthday_id)).into()
        })
    }

    fn list_active_birthdays(&self) -> Result<Vec<Birthday>> {
        self.repository.list_active()
    }

    fn count_birthdays(&self, include_deleted: bool) -> Result<i64> {
        self.repository.count_birthdays(include_deleted)
    }

    async fn create_birthday(&self, new_birthday: NewBirthday) -> Result<Birthday> {
        new_birthday.validate()?;

        let repository = self.repository.clone();
        let event_sink = self.event_sink.clone();
        let commit_order = self.commit_order.clone();
        Self::run_write(async move {
            let _guard = commit_order.lock().await;
            let birthday = repository.insert_birthday(new_birthday).await?;
            info!("Created birthday {}", birthday.id);
            event_sink.emit(DomainEvent::birthday_created(birthday.clone()));
            Ok(birthday)
        })
        .await
    }

    async fn delete_birthday(&self, birthday_id: i32) -> Result<SoftDeleteOutcome> {
        let repository = self.repository.clone();
        let event_sink = self.event_sink.clone();
        let commit_order = self.commit_order.clone();
        Self::run_write(async move {
            let _guard = commit_order.lock().await;
            let outcome = repository.mark_deleted(birthday_id).await?;
            if outcome.changed {
                info!("Soft-deleted birthday {}", birthday_id);
                event_sink.emit(DomainEvent::birthday_deleted(birthday_id));
            } else {
                debug!("Birthday {} was already deleted", birthday_id);
            }
            Ok(outcome)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::birthdays::parse_birthday_date;
    use crate::errors::ValidationError;
    use crate::events::{MockDomainEventSink, NoOpDomainEventSink};
    use std::future::poll_fn;
    use std::sync::RwLock;
    use std::task::Poll;

    // ============== Mock Repository ==============

    #[derive(Default)]
    struct MockBirthdayRepository {
        rows: RwLock<Vec<Birthday>>,
    }

    #[async_trait]
    impl BirthdayRepositoryTrait for MockBirthdayRepository {
        fn get_birthday(&self, birthday_id: i32) -> Result<Option<Birthday>> {
            Ok(self
                .rows
                .read()
                .unwrap()
                .iter()
                .find(|b| b.id == birthday_id)
                .cloned())
        }

        fn list_active(&self) -> Result<Vec<Birthday>> {
            Ok(self
                .rows
                .read()
                .unwrap()
                .iter()
                .filter(|b| !b.is_deleted)
                .cloned()
                .collect())
        }

        fn count_birthdays(&self, include_deleted: bool) -> Result<i64> {
            let rows = self.rows.read().unwrap();
            Ok(rows
                .iter()
                .filter(|b| include_deleted || !b.is_deleted)
                .count() as i64)
        }

        async fn insert_birthday(&self, new_birthday: NewBirthday) -> Result<Birthday> {
            let mut rows = self.rows.write().unwrap();
            let birthday = Birthday {
                id: rows.len() as i32 + 1,
                name: new_birthday.name,
                date: new_birthday.date,
                is_deleted: false,
            };
            rows.push(birthday.clone());
            Ok(birthday)
        }

        async fn mark_deleted(&self, birthday_id: i32) -> Result<SoftDeleteOutcome> {
            let mut rows = self.rows.write().unwrap();
            let row = rows
                .iter_mut()
                .find(|b| b.id == birthday_id)
                .ok_or_else(|| Error::from(DatabaseError::NotFound(birthday_id.to_string())))?;
            let changed = !row.is_deleted;
            row.is_deleted = true;
            Ok(SoftDeleteOutcome {
                birthday: row.clone(),
                changed,
            })
        }
    }

    fn service_with_sink() -> (BirthdayService, MockDomainEventSink) {
        let sink = MockDomainEventSink::new();
        let service = BirthdayService::new(
            Arc::new(MockBirthdayRepository::default()),
            Arc::new(sink.clone()),
        );
        (service, sink)
    }

    fn new_birthday(name: &str) -> NewBirthday {
        NewBirthday {
            name: name.to_string(),
            date: parse_birthday_date("1990-12-10").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_emits_created_event() {
        let (service, sink) = service_with_sink();

        let birthday = service.create_birthday(new_birthday("Ada")).await.unwrap();

        assert_eq!(birthday.name, "Ada");
        assert!(!birthday.is_deleted);
        assert_eq!(
            sink.events(),
            vec![DomainEvent::birthday_created(birthday)]
        );
    }

    #[tokio::test]
    async fn test_create_validates_before_storage() {
        let (service, sink) = service_with_sink();

        let err = service.create_birthday(new_birthday("  ")).await.unwrap_err();

        assert!(matches!(err, Error::Validation(ValidationError::MissingField(_))));
        assert_eq!(service.count_birthdays(true).unwrap(), 0);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_delete_hides_from_listing_but_keeps_record() {
        let (service, _sink) = service_with_sink();
        let ada = service.create_birthday(new_birthday("Ada")).await.unwrap();
        let grace = service.create_birthday(new_birthday("Grace")).await.unwrap();

        let outcome = service.delete_birthday(ada.id).await.unwrap();

        assert!(outcome.changed);
        assert!(outcome.birthday.is_deleted);
        let active = service.list_active_birthdays().unwrap();
        assert_eq!(active, vec![grace]);
        assert!(service.get_birthday(ada.id).unwrap().is_deleted);
    }

    #[tokio::test]
    async fn test_second_delete_is_noop_without_event() {
        let (service, sink) = service_with_sink();
        let ada = service.create_birthday(new_birthday("Ada")).await.unwrap();

        service.delete_birthday(ada.id).await.unwrap();
        let second = service.delete_birthday(ada.id).await.unwrap();

        assert!(!second.changed);
        assert!(second.birthday.is_deleted);
        assert_eq!(sink.len(), 2);
        assert_eq!(
            sink.events().last(),
            Some(&DomainEvent::birthday_deleted(ada.id))
        );
    }

    #[tokio::test]
    async fn test_abandoned_create_still_emits_event() {
        let (service, sink) = service_with_sink();

        // The caller gives up after the first poll, before the write reports back.
        let mut create = service.create_birthday(new_birthday("Ada"));
        let first_poll = poll_fn(|cx| Poll::Ready(create.as_mut().poll(cx))).await;
        assert!(first_poll.is_pending());
        drop(create);

        for _ in 0..100 {
            if !sink.is_empty() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(service.count_birthdays(true).unwrap(), 1);
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            sink.events().first(),
            Some(DomainEvent::BirthdayCreated { birthday }) if birthday.name == "Ada"
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = BirthdayService::new(
            Arc::new(MockBirthdayRepository::default()),
            Arc::new(NoOpDomainEventSink),
        );

        let err = service.delete_birthday(999_999).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(service.get_birthday(999_999).unwrap_err().is_not_found());
    }
}
