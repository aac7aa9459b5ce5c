//! Bucket handle tests against an in-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bkt_core::option::{copy, get, head, list, list_v2, list_versions, put};
use bkt_core::{
    Bucket, CannedAcl, CopyObjectOutput, CopyObjectRequest, DeleteObjectOutput,
    DeleteObjectRequest, DeleteObjectsOutput, DeleteObjectsRequest, DeletedObject, Error,
    GetObjectOutput, GetObjectRequest, HeadObjectRequest, ListObjectVersionsOutput,
    ListObjectVersionsRequest, ListObjectsOutput, ListObjectsRequest, ListObjectsV2Output,
    ListObjectsV2Request, ObjectContent, ObjectIdentifier, ObjectMetadata, ObjectStore,
    ObjectSummary, ObjectVersion, PageHandler, PresignedRequest, PutObjectOutput,
    PutObjectRequest, Result, ServerSideEncryption,
};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;

const BUCKET: &str = "test-bucket";

#[derive(Debug, Clone)]
enum Recorded {
    Get(GetObjectRequest),
    Head(HeadObjectRequest),
    Put(PutObjectRequest),
    DeleteObjects(DeleteObjectsRequest),
    List(ListObjectsRequest),
    ListV2(ListObjectsV2Request),
    ListVersions(ListObjectVersionsRequest),
    Copy(CopyObjectRequest),
}

/// Store double keeping objects in memory and recording every request
struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    requests: Mutex<Vec<Recorded>>,
    head_failure: Mutex<Option<fn() -> Error>>,
    pages_fetched: AtomicUsize,
    page_size: usize,
}

impl MemoryStore {
    fn new(page_size: usize) -> Arc<Self> {
        Arc::new(Self {
            objects: Mutex::new(BTreeMap::new()),
            requests: Mutex::new(Vec::new()),
            head_failure: Mutex::new(None),
            pages_fetched: AtomicUsize::new(0),
            page_size,
        })
    }

    fn with_objects(keys: &[&str], page_size: usize) -> Arc<Self> {
        let store = Self::new(page_size);
        {
            let mut objects = store.objects.lock().unwrap();
            for key in keys {
                objects.insert(key.to_string(), format!("content of {key}").into_bytes());
            }
        }
        store
    }

    fn record(&self, req: Recorded) {
        self.requests.lock().unwrap().push(req);
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    fn fail_head_with(&self, f: fn() -> Error) {
        *self.head_failure.lock().unwrap() = Some(f);
    }

    fn not_found(key: &str) -> Error {
        Error::request_failure(404, Some("NoSuchKey".into()), format!("{key} does not exist"))
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    fn page_size(&self, max_keys: Option<i32>) -> usize {
        max_keys.map(|n| n as usize).unwrap_or(self.page_size)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn get_object(&self, req: GetObjectRequest) -> Result<GetObjectOutput> {
        self.record(Recorded::Get(req.clone()));
        let data = self
            .objects
            .lock()
            .unwrap()
            .get(&req.key)
            .cloned()
            .ok_or_else(|| Self::not_found(&req.key))?;
        Ok(GetObjectOutput {
            metadata: ObjectMetadata {
                content_length: Some(data.len() as i64),
                version_id: req.version_id,
                ..Default::default()
            },
            body: Box::pin(std::io::Cursor::new(data)),
            content_range: req.range,
        })
    }

    async fn presign_get_object(
        &self,
        req: GetObjectRequest,
        expires_in: Duration,
    ) -> Result<PresignedRequest> {
        Ok(PresignedRequest {
            method: "GET".into(),
            uri: format!(
                "https://{}.s3.test/{}?X-Amz-Expires={}",
                req.bucket,
                req.key,
                expires_in.as_secs()
            ),
            headers: req
                .range
                .map(|r| vec![("range".to_string(), r)])
                .unwrap_or_default(),
        })
    }

    async fn head_object(&self, req: HeadObjectRequest) -> Result<ObjectMetadata> {
        self.record(Recorded::Head(req.clone()));
        if let Some(failure) = *self.head_failure.lock().unwrap() {
            return Err(failure());
        }
        let objects = self.objects.lock().unwrap();
        let data = objects.get(&req.key).ok_or_else(|| Self::not_found(&req.key))?;
        Ok(ObjectMetadata {
            content_length: Some(data.len() as i64),
            ..Default::default()
        })
    }

    async fn put_object(&self, req: PutObjectRequest) -> Result<PutObjectOutput> {
        self.record(Recorded::Put(req.clone()));
        let data = match req.body {
            ObjectContent::Bytes(data) => data,
            ObjectContent::File(path) => tokio::fs::read(path).await?,
        };
        self.objects.lock().unwrap().insert(req.key, data);
        Ok(PutObjectOutput {
            etag: Some("etag".into()),
            server_side_encryption: req.server_side_encryption.map(|s| s.as_str().to_string()),
            ..Default::default()
        })
    }

    async fn delete_object(&self, req: DeleteObjectRequest) -> Result<DeleteObjectOutput> {
        self.objects.lock().unwrap().remove(&req.key);
        Ok(DeleteObjectOutput::default())
    }

    async fn delete_objects(&self, req: DeleteObjectsRequest) -> Result<DeleteObjectsOutput> {
        self.record(Recorded::DeleteObjects(req.clone()));
        let mut objects = self.objects.lock().unwrap();
        let deleted = req
            .objects
            .into_iter()
            .filter(|id| objects.remove(&id.key).is_some())
            .map(|id| DeletedObject {
                key: id.key,
                version_id: id.version_id,
                delete_marker: false,
            })
            .collect();
        Ok(DeleteObjectsOutput {
            deleted,
            errors: Vec::new(),
        })
    }

    async fn list_objects(&self, req: ListObjectsRequest) -> Result<ListObjectsOutput> {
        self.record(Recorded::List(req.clone()));
        let keys = self.keys_with_prefix(&req.prefix);
        let limit = self.page_size(req.max_keys);
        Ok(ListObjectsOutput {
            is_truncated: keys.len() > limit,
            contents: keys
                .into_iter()
                .take(limit)
                .map(|k| ObjectSummary::new(k, 1))
                .collect(),
            ..Default::default()
        })
    }

    async fn list_objects_v2_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectsV2Request,
        on_page: PageHandler<'_, ListObjectsV2Output>,
    ) -> Result<()> {
        self.record(Recorded::ListV2(req.clone()));
        let keys = self.keys_with_prefix(&req.prefix);
        let size = self.page_size(req.max_keys);
        let chunks: Vec<&[String]> = if keys.is_empty() {
            vec![&keys[..]]
        } else {
            keys.chunks(size).collect()
        };

        for (i, chunk) in chunks.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.pages_fetched.fetch_add(1, Ordering::SeqCst);
            let last = i + 1 == chunks.len();
            let page = ListObjectsV2Output {
                contents: chunk.iter().map(|k| ObjectSummary::new(k.clone(), 1)).collect(),
                key_count: chunk.len() as i32,
                is_truncated: !last,
                ..Default::default()
            };
            if !on_page(&page, last) {
                break;
            }
        }
        Ok(())
    }

    async fn list_object_versions_pages(
        &self,
        cancel: &CancellationToken,
        req: ListObjectVersionsRequest,
        on_page: PageHandler<'_, ListObjectVersionsOutput>,
    ) -> Result<()> {
        self.record(Recorded::ListVersions(req.clone()));
        let keys = self.keys_with_prefix(&req.prefix);
        let size = self.page_size(req.max_keys);
        let pages: Vec<&[String]> = keys.chunks(size).collect();

        for (i, chunk) in pages.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            self.pages_fetched.fetch_add(1, Ordering::SeqCst);
            let last = i + 1 == pages.len();
            let page = ListObjectVersionsOutput {
                versions: chunk
                    .iter()
                    .map(|k| ObjectVersion {
                        key: k.clone(),
                        version_id: Some("v1".into()),
                        is_latest: true,
                        ..Default::default()
                    })
                    .collect(),
                is_truncated: !last,
                ..Default::default()
            };
            if !on_page(&page, last) {
                break;
            }
        }
        Ok(())
    }

    async fn copy_object(&self, req: CopyObjectRequest) -> Result<CopyObjectOutput> {
        self.record(Recorded::Copy(req.clone()));
        let escaped = req
            .copy_source
            .strip_prefix(&format!("{}/", req.bucket))
            .ok_or_else(|| Error::request_failure(400, None, "cross-bucket copy"))?;
        let (src, _) = url::form_urlencoded::parse(escaped.as_bytes())
            .next()
            .ok_or_else(|| Error::request_failure(400, None, "empty copy source"))?;

        let mut objects = self.objects.lock().unwrap();
        let data = objects
            .get(&*src)
            .cloned()
            .ok_or_else(|| Self::not_found(&src))?;
        objects.insert(req.key, data);
        Ok(CopyObjectOutput::default())
    }
}

fn bucket(store: &Arc<MemoryStore>) -> Bucket {
    Bucket::new(store.clone(), BUCKET)
}

async fn read_all(body: bkt_core::ObjectBody) -> String {
    let mut body = body;
    let mut out = String::new();
    body.read_to_string(&mut out).await.unwrap();
    out
}

#[tokio::test]
async fn put_object_sets_bucket_key_and_options_in_order() {
    let store = MemoryStore::new(10);
    let bucket = bucket(&store);

    bucket
        .put_object(
            "docs/readme.txt",
            b"hello".to_vec(),
            vec![
                put::sse_kms_key_id("alias/app"),
                put::acl_public_read(),
                put::content_type("text/plain"),
                put::content_length(5),
                put::content_type("text/markdown"),
                put::acl_private(),
            ],
        )
        .await
        .unwrap();

    let requests = store.requests();
    let [Recorded::Put(req)] = requests.as_slice() else {
        panic!("expected a single put, got {requests:?}");
    };
    assert_eq!(req.bucket, BUCKET);
    assert_eq!(req.key, "docs/readme.txt");
    assert_eq!(req.body, ObjectContent::Bytes(b"hello".to_vec()));
    assert_eq!(req.server_side_encryption, Some(ServerSideEncryption::AwsKms));
    assert_eq!(req.sse_kms_key_id.as_deref(), Some("alias/app"));
    assert_eq!(req.content_type.as_deref(), Some("text/markdown"));
    assert_eq!(req.content_length, Some(5));
    assert_eq!(req.acl, Some(CannedAcl::Private));
}

#[tokio::test]
async fn put_object_from_file() {
    let store = MemoryStore::new(10);
    let bucket = bucket(&store);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.bin");
    std::fs::write(&path, b"from disk").unwrap();

    let out = bucket
        .put_object("upload.bin", path, vec![put::sse_s3()])
        .await
        .unwrap();
    assert_eq!(out.server_side_encryption.as_deref(), Some("AES256"));

    let body = bucket.get_object_reader("upload.bin", vec![]).await.unwrap();
    assert_eq!(read_all(body).await, "from disk");
}

#[tokio::test]
async fn get_object_returns_body_and_forwards_options() {
    let store = MemoryStore::with_objects(&["a.txt"], 10);
    let bucket = bucket(&store);

    let out = bucket
        .get_object("a.txt", vec![get::version_id("v7"), get::range("bytes=0-3")])
        .await
        .unwrap();
    assert_eq!(out.metadata.version_id.as_deref(), Some("v7"));
    assert_eq!(out.content_range.as_deref(), Some("bytes=0-3"));
    assert_eq!(read_all(out.body).await, "content of a.txt");

    let err = bucket.get_object("missing", vec![]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn get_object_request_can_be_adjusted_before_sending() {
    let store = MemoryStore::with_objects(&["a.txt"], 10);
    let bucket = bucket(&store);

    let mut pending = bucket.get_object_request("a.txt", vec![get::version_id("v1")]);
    assert_eq!(pending.input().bucket, BUCKET);
    assert_eq!(pending.input().key, "a.txt");
    pending.input_mut().range = Some("bytes=0-0".into());

    let out = pending.send().await.unwrap();
    assert_eq!(out.content_range.as_deref(), Some("bytes=0-0"));

    let presigned = bucket
        .get_object_request("a.txt", vec![get::byte_range(0, 9)])
        .presign(Duration::from_secs(60))
        .await
        .unwrap();
    assert_eq!(presigned.method, "GET");
    assert!(presigned.uri.contains("X-Amz-Expires=60"));
    assert_eq!(presigned.headers, vec![("range".to_string(), "bytes=0-9".to_string())]);
}

#[tokio::test]
async fn object_exists_translates_not_found_only() {
    let store = MemoryStore::with_objects(&["present"], 10);
    let bucket = bucket(&store);

    assert!(bucket.object_exists("present", vec![]).await.unwrap());
    assert!(!bucket.object_exists("absent", vec![]).await.unwrap());

    store.fail_head_with(|| Error::request_failure(403, Some("AccessDenied".into()), "denied"));
    let err = bucket.object_exists("present", vec![]).await.unwrap_err();
    assert_eq!(err.status_code(), Some(403));

    store.fail_head_with(|| Error::Transport("connection reset".into()));
    let err = bucket.object_exists("present", vec![]).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn object_exists_passes_head_options() {
    let store = MemoryStore::with_objects(&["k"], 10);
    let bucket = bucket(&store);

    bucket
        .object_exists("k", vec![head::version_id("v2"), head::if_match("abc")])
        .await
        .unwrap();

    let requests = store.requests();
    let [Recorded::Head(req)] = requests.as_slice() else {
        panic!("expected a single head, got {requests:?}");
    };
    assert_eq!(req.bucket, BUCKET);
    assert_eq!(req.key, "k");
    assert_eq!(req.version_id.as_deref(), Some("v2"));
    assert_eq!(req.if_match.as_deref(), Some("abc"));
}

#[tokio::test]
async fn head_object_reports_not_found_as_error() {
    let store = MemoryStore::new(10);
    let err = bucket(&store).head_object("nope", vec![]).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn copy_object_escapes_source_key() {
    let key = "reports/q1 summary #2?.pdf";
    let store = MemoryStore::with_objects(&[key], 10);
    let bucket = bucket(&store);

    bucket
        .copy_object("archive/q1.pdf", key, vec![copy::content_type("application/pdf")])
        .await
        .unwrap();

    let requests = store.requests();
    let [Recorded::Copy(req)] = requests.as_slice() else {
        panic!("expected a single copy, got {requests:?}");
    };
    assert_eq!(req.bucket, BUCKET);
    assert_eq!(req.key, "archive/q1.pdf");
    assert_eq!(
        req.copy_source,
        format!("{BUCKET}/reports%2Fq1+summary+%232%3F.pdf")
    );
    assert_eq!(req.content_type.as_deref(), Some("application/pdf"));

    let body = bucket.get_object_reader("archive/q1.pdf", vec![]).await.unwrap();
    assert_eq!(read_all(body).await, format!("content of {key}"));
}

#[tokio::test]
async fn delete_objects_forwards_empty_batch() {
    let store = MemoryStore::new(10);
    let out = bucket(&store).delete_objects(Vec::new()).await.unwrap();
    assert!(out.deleted.is_empty());

    let requests = store.requests();
    let [Recorded::DeleteObjects(req)] = requests.as_slice() else {
        panic!("expected a single batch delete, got {requests:?}");
    };
    assert_eq!(req.bucket, BUCKET);
    assert!(req.objects.is_empty());
}

#[tokio::test]
async fn delete_objects_and_delete_object() {
    let store = MemoryStore::with_objects(&["a", "b", "c"], 10);
    let bucket = bucket(&store);

    let out = bucket
        .delete_objects(vec![
            ObjectIdentifier::new("a"),
            ObjectIdentifier::with_version("b", "v1"),
        ])
        .await
        .unwrap();
    assert_eq!(out.deleted.len(), 2);
    assert_eq!(out.deleted[1].version_id.as_deref(), Some("v1"));

    bucket.delete_object("c").await.unwrap();
    assert!(!bucket.object_exists("c", vec![]).await.unwrap());
}

#[tokio::test]
async fn list_objects_returns_single_page() {
    let store = MemoryStore::with_objects(&["logs/1", "logs/2", "logs/3", "other"], 10);
    let out = bucket(&store)
        .list_objects("logs/", vec![list::max_keys(2), list::delimiter("/")])
        .await
        .unwrap();

    assert_eq!(out.contents.len(), 2);
    assert!(out.is_truncated);

    let requests = store.requests();
    let [Recorded::List(req)] = requests.as_slice() else {
        panic!("expected a single list, got {requests:?}");
    };
    assert_eq!(req.prefix, "logs/");
    assert_eq!(req.delimiter.as_deref(), Some("/"));
}

#[tokio::test]
async fn list_objects_v2_pages_visits_pages_in_order() {
    let store = MemoryStore::with_objects(&["p/1", "p/2", "p/3", "p/4", "p/5"], 2);
    let bucket = bucket(&store);

    let mut seen = Vec::new();
    bucket
        .list_objects_v2_pages(
            &CancellationToken::new(),
            "p/",
            |page, last| {
                seen.push((
                    page.contents.iter().map(|o| o.key.clone()).collect::<Vec<_>>(),
                    last,
                ));
                true
            },
            vec![list_v2::start_after("p/0")],
        )
        .await
        .unwrap();

    assert_eq!(
        seen,
        vec![
            (vec!["p/1".to_string(), "p/2".to_string()], false),
            (vec!["p/3".to_string(), "p/4".to_string()], false),
            (vec!["p/5".to_string()], true),
        ]
    );
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 3);

    let requests = store.requests();
    let [Recorded::ListV2(req)] = requests.as_slice() else {
        panic!("expected a single listing, got {requests:?}");
    };
    assert_eq!(req.bucket, BUCKET);
    assert_eq!(req.start_after.as_deref(), Some("p/0"));
}

#[tokio::test]
async fn list_objects_v2_pages_stops_when_callback_declines() {
    let store = MemoryStore::with_objects(&["p/1", "p/2", "p/3", "p/4", "p/5"], 2);
    let mut calls = 0;

    bucket(&store)
        .list_objects_v2_pages(
            &CancellationToken::new(),
            "p/",
            |_, _| {
                calls += 1;
                false
            },
            vec![],
        )
        .await
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_objects_v2_pages_honors_cancellation() {
    let store = MemoryStore::with_objects(&["p/1", "p/2"], 1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut calls = 0;
    let err = bucket(&store)
        .list_objects_v2_pages(
            &cancel,
            "p/",
            |_, _| {
                calls += 1;
                true
            },
            vec![],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(calls, 0);
}

#[tokio::test]
async fn list_object_versions_pages_uses_page_size_option() {
    let store = MemoryStore::with_objects(&["v/a", "v/b", "v/c"], 10);
    let mut pages = Vec::new();

    bucket(&store)
        .list_object_versions_pages(
            &CancellationToken::new(),
            "v/",
            |page, last| {
                pages.push((page.versions.len(), last));
                true
            },
            vec![list_versions::max_keys(2), list_versions::key_marker("v/")],
        )
        .await
        .unwrap();

    assert_eq!(pages, vec![(2, false), (1, true)]);
}

#[tokio::test]
async fn list_object_versions_pages_stops_when_callback_declines() {
    let store = MemoryStore::with_objects(&["v/1", "v/2", "v/3", "v/4", "v/5"], 2);
    let mut calls = 0;

    bucket(&store)
        .list_object_versions_pages(
            &CancellationToken::new(),
            "v/",
            |page, last| {
                calls += 1;
                assert_eq!(page.versions.len(), 2);
                assert!(!last);
                false
            },
            vec![],
        )
        .await
        .unwrap();

    assert_eq!(calls, 1);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn list_object_versions_pages_honors_cancellation() {
    let store = MemoryStore::with_objects(&["v/1", "v/2"], 1);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut calls = 0;
    let err = bucket(&store)
        .list_object_versions_pages(
            &cancel,
            "v/",
            |_, _| {
                calls += 1;
                true
            },
            vec![],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert_eq!(calls, 0);
    assert_eq!(store.pages_fetched.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn bucket_handle_is_shareable_across_tasks() {
    let store = MemoryStore::new(10);
    let bucket = bucket(&store);

    let mut handles = Vec::new();
    for i in 0..8 {
        let bucket = bucket.clone();
        handles.push(tokio::spawn(async move {
            bucket
                .put_object(&format!("k{i}"), format!("v{i}"), vec![])
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let out = bucket.list_objects("k", vec![]).await.unwrap();
    assert_eq!(out.contents.len(), 8);
}
