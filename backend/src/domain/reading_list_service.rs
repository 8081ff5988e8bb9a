//! Reading list service.
//!
//! Resolves the signed-in user, reads their records from the store and
//! projects them into the three progress views. Also owns saving a catalog
//! volume and opening a saved record for editing.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::ports::{BookStore, BookStoreError, IdentityProvider};
use crate::domain::{
    BookId, BookRecord, CatalogItem, CatalogItemId, Error, Identity, NewBookRecord, ReadingList,
    UpdateSession, partition,
};

/// Translate store failures into domain errors.
pub(crate) fn map_store_error(error: BookStoreError) -> Error {
    match error {
        BookStoreError::Unavailable { message } => {
            Error::store_unavailable(format!("book store unavailable: {message}"))
        }
        BookStoreError::NotFound { id } => Error::not_found(format!("book record {id} not found")),
        BookStoreError::PermissionDenied { message } => {
            Error::permission_denied(format!("book store denied the operation: {message}"))
        }
    }
}

/// Service exposing the signed-in user's reading list.
#[derive(Clone)]
pub struct ReadingListService<S, I> {
    store: Arc<S>,
    identity: Arc<I>,
}

impl<S, I> ReadingListService<S, I>
where
    S: BookStore,
    I: IdentityProvider,
{
    /// Create a service over the given store and identity provider.
    pub fn new(store: Arc<S>, identity: Arc<I>) -> Self {
        Self { store, identity }
    }

    /// The signed-in principal, or `Unauthenticated`.
    pub async fn current_user(&self) -> Result<Identity, Error> {
        self.identity
            .current_user()
            .await
            .ok_or_else(|| Error::unauthenticated("no user is signed in"))
    }

    /// Load and partition the current user's records.
    pub async fn load(&self) -> Result<ReadingList, Error> {
        let identity = self.current_user().await?;
        let records = self.records_for(&identity).await?;
        Ok(partition(records, &identity.user_id))
    }

    /// Save a catalog volume to the current user's list.
    ///
    /// The new record starts unstarted with empty notes and a zero rating.
    pub async fn save(&self, item: &CatalogItem) -> Result<BookId, Error> {
        let identity = self.current_user().await?;
        let draft = NewBookRecord::from_catalog(item, identity.user_id.clone());
        let id = self.store.create(&draft).await.map_err(|err| {
            warn!(user_id = %identity.user_id, error = %err, "saving book failed");
            map_store_error(err)
        })?;
        info!(book_id = %id, user_id = %identity.user_id, "book saved");
        Ok(id)
    }

    /// Start an update session for the saved record of a catalog volume.
    ///
    /// Returns `NotFound` when the current user has not saved that volume.
    pub async fn open_for_update(
        &self,
        google_book_id: &CatalogItemId,
    ) -> Result<UpdateSession, Error> {
        let identity = self.current_user().await?;
        let record = self
            .records_for(&identity)
            .await?
            .into_iter()
            .find(|record| {
                record.is_owned_by(&identity.user_id) && &record.google_book_id == google_book_id
            })
            .ok_or_else(|| {
                Error::not_found(format!("no saved book for catalog item {google_book_id}"))
            })?;
        Ok(UpdateSession::new(record))
    }

    async fn records_for(&self, identity: &Identity) -> Result<Vec<BookRecord>, Error> {
        self.store
            .query_by_user(&identity.user_id)
            .await
            .map_err(|err| {
                warn!(user_id = %identity.user_id, error = %err, "loading books failed");
                map_store_error(err)
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockBookStore, MockIdentityProvider};
    use crate::domain::{CatalogItem, ErrorCode, ReadingState, UserId, VolumeInfo};
    use crate::test_support::{RecordBuilder, fixture_timestamp};
    use rstest::{fixture, rstest};

    fn user_id() -> UserId {
        UserId::new("u-1").expect("user id")
    }

    #[fixture]
    fn signed_in() -> MockIdentityProvider {
        let mut identity = MockIdentityProvider::new();
        identity
            .expect_current_user()
            .returning(|| Some(Identity::new(user_id(), Some("ada@example.com".to_owned()))));
        identity
    }

    fn sample_item() -> CatalogItem {
        CatalogItem {
            id: CatalogItemId::new("vol-42").expect("catalog id"),
            volume: VolumeInfo {
                title: "Dune".to_owned(),
                authors: vec!["Frank Herbert".to_owned()],
                ..VolumeInfo::default()
            },
        }
    }

    #[rstest]
    #[tokio::test]
    async fn load_partitions_the_users_records(signed_in: MockIdentityProvider) {
        let at = fixture_timestamp();
        let mut store = MockBookStore::new();
        store
            .expect_query_by_user()
            .withf(|user| user.as_ref() == "u-1")
            .times(1)
            .return_once(move |_| {
                Ok(vec![
                    RecordBuilder::new("b-1", "u-1").build(),
                    RecordBuilder::new("b-2", "u-1").started(at).build(),
                    RecordBuilder::new("b-3", "u-2").started(at).finished(at).build(),
                    RecordBuilder::new("b-4", "u-1").started(at).finished(at).build(),
                ])
            });

        let service = ReadingListService::new(Arc::new(store), Arc::new(signed_in));
        let list = service.load().await.expect("reading list");

        assert_eq!(list.view(ReadingState::Unstarted).len(), 1);
        assert_eq!(list.view(ReadingState::InProgress).len(), 1);
        let finished: Vec<_> = list.finished.iter().map(|r| r.id.as_ref()).collect();
        assert_eq!(finished, vec!["b-4"]);
    }

    #[tokio::test]
    async fn load_without_identity_is_unauthenticated() {
        let mut identity = MockIdentityProvider::new();
        identity.expect_current_user().returning(|| None);
        let mut store = MockBookStore::new();
        store.expect_query_by_user().never();

        let service = ReadingListService::new(Arc::new(store), Arc::new(identity));
        let err = service.load().await.expect_err("signed out");

        assert_eq!(err.code(), ErrorCode::Unauthenticated);
    }

    #[rstest]
    #[case(BookStoreError::unavailable("timeout"), ErrorCode::StoreUnavailable)]
    #[case(BookStoreError::permission_denied("rules"), ErrorCode::PermissionDenied)]
    #[tokio::test]
    async fn load_surfaces_store_failures(
        signed_in: MockIdentityProvider,
        #[case] failure: BookStoreError,
        #[case] expected: ErrorCode,
    ) {
        let mut store = MockBookStore::new();
        store
            .expect_query_by_user()
            .times(1)
            .return_once(move |_| Err(failure));

        let service = ReadingListService::new(Arc::new(store), Arc::new(signed_in));
        let err = service.load().await.expect_err("store failure");

        assert_eq!(err.code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn save_creates_an_unstarted_record_for_the_user(signed_in: MockIdentityProvider) {
        let mut store = MockBookStore::new();
        store
            .expect_create()
            .withf(|draft| {
                draft.user_id.as_ref() == "u-1"
                    && draft.google_book_id.as_ref() == "vol-42"
                    && draft.title == "Dune"
                    && draft.notes.is_empty()
                    && draft.rating.value() == 0
                    && draft.started_reading.is_none()
                    && draft.finished_reading.is_none()
            })
            .times(1)
            .return_once(|_| Ok(BookId::new("b-new").expect("book id")));

        let service = ReadingListService::new(Arc::new(store), Arc::new(signed_in));
        let id = service.save(&sample_item()).await.expect("saved");

        assert_eq!(id.as_ref(), "b-new");
    }

    #[rstest]
    #[tokio::test]
    async fn open_for_update_finds_the_saved_volume(signed_in: MockIdentityProvider) {
        let mut store = MockBookStore::new();
        store.expect_query_by_user().times(1).return_once(|_| {
            Ok(vec![
                RecordBuilder::new("b-1", "u-1").build(),
                RecordBuilder::new("b-2", "u-1")
                    .google_book_id("vol-42")
                    .notes("dog-eared")
                    .build(),
            ])
        });

        let service = ReadingListService::new(Arc::new(store), Arc::new(signed_in));
        let session = service
            .open_for_update(&CatalogItemId::new("vol-42").expect("catalog id"))
            .await
            .expect("session");

        assert_eq!(session.record().id.as_ref(), "b-2");
        assert_eq!(session.edit().notes, "dog-eared");
    }

    #[rstest]
    #[tokio::test]
    async fn open_for_update_reports_unsaved_volume(signed_in: MockIdentityProvider) {
        let mut store = MockBookStore::new();
        store
            .expect_query_by_user()
            .times(1)
            .return_once(|_| Ok(vec![RecordBuilder::new("b-1", "u-1").build()]));

        let service = ReadingListService::new(Arc::new(store), Arc::new(signed_in));
        let err = service
            .open_for_update(&CatalogItemId::new("vol-missing").expect("catalog id"))
            .await
            .expect_err("not saved");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
