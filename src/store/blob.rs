use std::time::Duration;

use anyhow::anyhow;

use crate::model::{Build, Release};
use crate::store::paths;
use crate::store::traits::{DataStore, ObjectStore, StoreError};

/// Persists builds and releases as indented, camel-cased JSON documents in
/// an object store. Each logical save fans out to every derived path
/// concurrently and succeeds only when all writes land: the first failure
/// fails the whole operation and drops the sibling writes, while any write
/// that already completed is left in place. Readers must tolerate a
/// half-written state; retries are the caller's responsibility.
pub struct BlobDataStore<O> {
    objects: O,
    op_timeout: Duration,
}

impl<O: ObjectStore> BlobDataStore<O> {
    /// Deadline applied to every individual object-store call.
    pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(objects: O) -> Self {
        Self::with_op_timeout(objects, Self::DEFAULT_OP_TIMEOUT)
    }

    pub fn with_op_timeout(objects: O, op_timeout: Duration) -> Self {
        Self {
            objects,
            op_timeout,
        }
    }

    async fn write(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        tokio::time::timeout(self.op_timeout, self.objects.write(path, bytes))
            .await
            .map_err(|_| StoreError::Storage(anyhow!("write to {path} timed out")))?
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
        tokio::time::timeout(self.op_timeout, self.objects.read(path))
            .await
            .map_err(|_| StoreError::Storage(anyhow!("read of {path} timed out")))?
    }
}

fn to_document<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec_pretty(value).map_err(|e| StoreError::Storage(e.into()))
}

#[async_trait::async_trait]
impl<O: ObjectStore> DataStore for BlobDataStore<O> {
    async fn load_build(&self, product_id: &str, build_version: &str) -> Result<Build, StoreError> {
        let path = paths::build_data_path(product_id, build_version);
        let bytes = self.read(&path).await?;

        serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Storage(
                anyhow::Error::new(e).context(format!("malformed build record at {path}")),
            )
        })
    }

    async fn save_build(&self, product_id: &str, build: &Build) -> Result<(), StoreError> {
        let document = to_document(build)?;
        let data_path = paths::build_data_path(product_id, &build.version);
        let date_path = paths::build_date_path(product_id, build);

        log::info!("saving build {} to {data_path}", build.version);

        // The date entry stores just the version, a pointer back to the
        // canonical record.
        tokio::try_join!(
            self.write(&data_path, document),
            self.write(&date_path, build.version.clone().into_bytes()),
        )?;

        Ok(())
    }

    async fn save_release(&self, release: &Release) -> Result<(), StoreError> {
        // Path computation validates the release before anything is written.
        let latest_path = paths::release_latest_path(release)?;
        let history_path = paths::release_history_path(release)?;
        let build_history_path = paths::build_release_history_path(release)?;

        let document = to_document(release)?;

        log::info!(
            "saving release of {} into {} across three paths",
            release.product.id,
            release.environment_id
        );

        tokio::try_join!(
            self.write(&latest_path, document.clone()),
            self.write(&history_path, document.clone()),
            self.write(&build_history_path, document),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Approval, Deployment, Product};
    use crate::store::memory::MemoryObjectStore;
    use chrono::{TimeZone, Utc};

    fn build(version: &str) -> Build {
        Build {
            version: version.to_string(),
            build_date_utc: Utc.with_ymd_and_hms(2024, 3, 1, 15, 4, 5).unwrap(),
            changes: vec![],
        }
    }

    fn release(builds: Vec<Build>) -> Release {
        Release {
            environment_id: "uat".to_string(),
            product: Product {
                id: "site".to_string(),
                family: String::new(),
                name: "Site".to_string(),
                description: String::new(),
                roles: vec![],
            },
            environments: vec![],
            builds,
            deployment: Deployment {
                deploy_date: Utc.with_ymd_and_hms(2024, 3, 2, 21, 30, 0).unwrap(),
                approval: Approval::default(),
            },
        }
    }

    /// Object store that fails every write whose path contains a marker,
    /// delegating everything else to an in-memory store.
    struct FailingStore {
        inner: MemoryObjectStore,
        fail_on: &'static str,
    }

    #[async_trait::async_trait]
    impl ObjectStore for FailingStore {
        async fn write(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
            if path.contains(self.fail_on) {
                return Err(StoreError::Storage(anyhow!("injected failure at {path}")));
            }
            self.inner.write(path, bytes).await
        }

        async fn read(&self, path: &str) -> Result<Vec<u8>, StoreError> {
            self.inner.read(path).await
        }
    }

    #[tokio::test]
    async fn build_save_then_load_round_trips() {
        let store = BlobDataStore::new(MemoryObjectStore::new());
        let build = build("1.3.2");

        store.save_build("site", &build).await.unwrap();
        let loaded = store.load_build("site", "1.3.2").await.unwrap();

        assert_eq!(loaded, build);
    }

    #[tokio::test]
    async fn save_build_writes_the_date_index_entry() {
        let objects = MemoryObjectStore::new();
        let store = BlobDataStore::new(objects.clone());

        store.save_build("site", &build("1.3.2")).await.unwrap();

        let entry = objects.get("/site/dates/20240301150405-1.3.2").unwrap();
        assert_eq!(entry, b"1.3.2");
    }

    #[tokio::test]
    async fn load_of_a_missing_build_is_not_found() {
        let store = BlobDataStore::new(MemoryObjectStore::new());

        let result = store.load_build("site", "9.9.9").await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn saving_the_same_version_twice_is_last_write_wins() {
        let store = BlobDataStore::new(MemoryObjectStore::new());

        let mut second = build("1.3.2");
        second.changes.push(crate::model::Note {
            id: "402".to_string(),
            ..Default::default()
        });

        store.save_build("site", &build("1.3.2")).await.unwrap();
        store.save_build("site", &second).await.unwrap();

        let loaded = store.load_build("site", "1.3.2").await.unwrap();
        assert_eq!(loaded.changes.len(), 1);
    }

    #[tokio::test]
    async fn save_release_writes_the_same_document_to_three_paths() {
        let objects = MemoryObjectStore::new();
        let store = BlobDataStore::new(objects.clone());
        let release = release(vec![build("1.3.2")]);

        store.save_release(&release).await.unwrap();

        let latest = objects.get("/site/environments/uat/latest.json").unwrap();
        let history = objects
            .get("/site/environments/uat/20240301150405-1-3-2.json")
            .unwrap();
        let build_history = objects
            .get("/site/builds/1-3-2/releases/20240302213000-uat.json")
            .unwrap();

        assert_eq!(latest, history);
        assert_eq!(latest, build_history);

        let decoded: Release = serde_json::from_slice(&latest).unwrap();
        assert_eq!(decoded, release);
    }

    #[tokio::test]
    async fn save_release_with_no_builds_writes_nothing() {
        let objects = MemoryObjectStore::new();
        let store = BlobDataStore::new(objects.clone());

        let result = store.save_release(&release(vec![])).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(objects.is_empty());
    }

    #[tokio::test]
    async fn one_failed_write_fails_the_whole_save() {
        let objects = MemoryObjectStore::new();
        let store = BlobDataStore::new(FailingStore {
            inner: objects.clone(),
            fail_on: "/dates/",
        });

        let result = store.save_build("site", &build("1.3.2")).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));

        // The surviving write is tolerated, not cleaned up.
        let keys = objects.keys();
        assert!(keys.len() <= 1);
        for key in keys {
            assert!(key.contains("/builds/"));
        }
    }

    #[tokio::test]
    async fn a_slow_object_store_hits_the_deadline() {
        struct StallingStore;

        #[async_trait::async_trait]
        impl ObjectStore for StallingStore {
            async fn write(&self, _path: &str, _bytes: Vec<u8>) -> Result<(), StoreError> {
                std::future::pending::<()>().await;
                unreachable!()
            }

            async fn read(&self, _path: &str) -> Result<Vec<u8>, StoreError> {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }

        let store = BlobDataStore::with_op_timeout(StallingStore, Duration::from_millis(20));

        let result = store.save_build("site", &build("1.3.2")).await;
        assert!(matches!(result, Err(StoreError::Storage(_))));
    }
}
