mod common;

use common::{file_exists, flaky_services, in_memory_services, read_file, seed_file};
use object_store_fs::{
    AppBuilder, BatchOperation, BrowseService, FileOpsService, FolderLimits, FolderPath,
    MoveOutcome, ObjectKey, StorageError, StoragePolicy, ValidationError,
};

#[tokio::test]
async fn create_folder_materializes_an_empty_folder() {
    let app = in_memory_services();
    app.file_ops
        .create_folder(&FolderPath::parse("docs"))
        .await
        .unwrap();

    let root = app.browse.list_folder(&FolderPath::root()).await.unwrap();
    assert!(root.files.is_empty());
    assert_eq!(root.folders.len(), 1);
    assert_eq!(root.folders[0].name, "docs");
    assert!(file_exists(&app, "docs/.keep").await);
}

#[tokio::test]
async fn create_folder_is_idempotent() {
    let app = in_memory_services();
    let docs = FolderPath::parse("docs");
    app.file_ops.create_folder(&docs).await.unwrap();
    app.file_ops.create_folder(&docs).await.unwrap();

    let root = app.browse.list_folder(&FolderPath::root()).await.unwrap();
    assert_eq!(root.folders.len(), 1);
}

#[tokio::test]
async fn create_folder_rejects_the_root_and_bad_names() {
    let app = in_memory_services();

    let result = app.file_ops.create_folder(&FolderPath::root()).await;
    assert!(matches!(
        result,
        Err(StorageError::Validation(ValidationError::EmptyFolderName))
    ));

    let result = app
        .file_ops
        .create_folder(&FolderPath::parse("docs/bad:name"))
        .await;
    assert!(matches!(
        result,
        Err(StorageError::Validation(
            ValidationError::ForbiddenFolderCharacter(':')
        ))
    ));
}

#[tokio::test]
async fn create_folder_honors_the_depth_limit() {
    let policy = StoragePolicy {
        folder_limits: FolderLimits {
            max_depth: 2,
            ..FolderLimits::default()
        },
        ..StoragePolicy::default()
    };
    let app = AppBuilder::new().with_policy(policy).build().unwrap();

    app.file_ops
        .create_folder(&FolderPath::parse("a/b"))
        .await
        .unwrap();
    let result = app
        .file_ops
        .create_folder(&FolderPath::parse("a/b/c"))
        .await;
    assert!(matches!(
        result,
        Err(StorageError::Validation(ValidationError::FolderTooDeep {
            actual: 3,
            max: 2
        }))
    ));
}

#[tokio::test]
async fn delete_folder_removes_the_subtree_and_reports_the_count() {
    let app = in_memory_services();
    app.file_ops
        .create_folder(&FolderPath::parse("docs"))
        .await
        .unwrap();
    app.file_ops
        .create_folder(&FolderPath::parse("docs/sub"))
        .await
        .unwrap();
    seed_file(&app, "docs/a.txt", b"a").await;
    seed_file(&app, "docs/sub/b.txt", b"b").await;
    seed_file(&app, "archive/c.txt", b"c").await;

    let docs = FolderPath::parse("docs");
    let removed = app.file_ops.delete_folder(&docs).await.unwrap();
    // Two files plus the two folder markers
    assert_eq!(removed, 4);

    // Nothing is left under the prefix and keys outside it were not
    // touched
    let remaining = app
        .handle
        .store()
        .await
        .list_prefix(&FolderPath::root(), None)
        .await
        .unwrap();
    assert!(remaining.iter().all(|info| !info.key.has_prefix(&docs)));
    assert!(!file_exists(&app, "docs/sub/.keep").await);
    assert!(file_exists(&app, "archive/c.txt").await);

    let root = app.browse.list_folder(&FolderPath::root()).await.unwrap();
    let names: Vec<&str> = root.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["archive"]);
}

#[tokio::test]
async fn deleting_a_missing_folder_removes_nothing() {
    let app = in_memory_services();
    let removed = app
        .file_ops
        .delete_folder(&FolderPath::parse("ghost"))
        .await
        .unwrap();
    assert_eq!(removed, 0);
}

#[tokio::test]
async fn move_file_relocates_the_object() {
    let app = in_memory_services();
    seed_file(&app, "inbox/a.txt", b"payload").await;

    let source = ObjectKey::new("inbox/a.txt".to_string()).unwrap();
    let destination = ObjectKey::new("archive/a.txt".to_string()).unwrap();
    let outcome = app.file_ops.move_file(&source, &destination).await.unwrap();

    assert!(outcome.is_complete());
    assert!(!file_exists(&app, "inbox/a.txt").await);
    assert_eq!(read_file(&app, "archive/a.txt").await.as_ref(), b"payload");
}

#[tokio::test]
async fn failed_source_delete_reports_a_retained_source() {
    let (store, app) = flaky_services();
    seed_file(&app, "inbox/a.txt", b"payload").await;

    let source = ObjectKey::new("inbox/a.txt".to_string()).unwrap();
    let destination = ObjectKey::new("archive/a.txt".to_string()).unwrap();
    store.fail_deletes_of(
        &source,
        StorageError::Network {
            message: "connection reset".to_string(),
        },
    );

    let outcome = app.file_ops.move_file(&source, &destination).await.unwrap();

    let MoveOutcome::SourceRetained {
        source: retained,
        error,
    } = outcome
    else {
        panic!("expected the source to be retained");
    };
    assert_eq!(retained, source);
    assert!(matches!(error, StorageError::Network { .. }));
    // The object now exists under both keys
    assert!(file_exists(&app, "inbox/a.txt").await);
    assert!(file_exists(&app, "archive/a.txt").await);
}

#[tokio::test]
async fn rename_file_moves_within_the_folder() {
    let app = in_memory_services();
    seed_file(&app, "docs/old.txt", b"x").await;

    let source = ObjectKey::new("docs/old.txt".to_string()).unwrap();
    let destination = ObjectKey::new("docs/new.txt".to_string()).unwrap();
    let outcome = app
        .file_ops
        .rename_file(&source, &destination)
        .await
        .unwrap();

    assert!(outcome.is_complete());
    assert!(!file_exists(&app, "docs/old.txt").await);
    assert!(file_exists(&app, "docs/new.txt").await);
}

#[tokio::test]
async fn move_onto_the_same_key_leaves_the_object_in_place() {
    let app = in_memory_services();
    seed_file(&app, "docs/report.pdf", b"contents").await;

    let key = ObjectKey::new("docs/report.pdf".to_string()).unwrap();
    let outcome = app.file_ops.move_file(&key, &key).await.unwrap();
    assert!(outcome.is_complete());

    let outcome = app.file_ops.rename_file(&key, &key).await.unwrap();
    assert!(outcome.is_complete());
    assert_eq!(
        read_file(&app, "docs/report.pdf").await.as_ref(),
        b"contents"
    );
}

#[tokio::test]
async fn move_of_a_missing_key_onto_itself_reports_not_found() {
    let app = in_memory_services();

    let key = ObjectKey::new("docs/ghost.txt".to_string()).unwrap();
    let result = app.file_ops.move_file(&key, &key).await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

#[tokio::test]
async fn copy_file_keeps_the_source() {
    let app = in_memory_services();
    seed_file(&app, "docs/a.txt", b"x").await;

    let source = ObjectKey::new("docs/a.txt".to_string()).unwrap();
    let destination = ObjectKey::new("backup/a.txt".to_string()).unwrap();
    app.file_ops.copy_file(&source, &destination).await.unwrap();

    assert!(file_exists(&app, "docs/a.txt").await);
    assert!(file_exists(&app, "backup/a.txt").await);
}

#[tokio::test]
async fn batch_delete_runs_every_request_before_failing() {
    let (store, app) = flaky_services();
    seed_file(&app, "docs/a.txt", b"a").await;
    seed_file(&app, "docs/b.txt", b"b").await;
    seed_file(&app, "docs/c.txt", b"c").await;

    let blocked = ObjectKey::new("docs/b.txt".to_string()).unwrap();
    store.fail_deletes_of(
        &blocked,
        StorageError::Permission {
            message: "access denied".to_string(),
        },
    );

    let keys = vec![
        ObjectKey::new("docs/a.txt".to_string()).unwrap(),
        blocked.clone(),
        ObjectKey::new("docs/c.txt".to_string()).unwrap(),
    ];
    let result = app
        .file_ops
        .batch_operation(&keys, BatchOperation::Delete)
        .await;

    assert!(matches!(result, Err(StorageError::Permission { .. })));
    // The failure did not stop the other deletions
    assert!(!file_exists(&app, "docs/a.txt").await);
    assert!(file_exists(&app, "docs/b.txt").await);
    assert!(!file_exists(&app, "docs/c.txt").await);
}

#[tokio::test]
async fn batch_move_places_files_under_the_destination() {
    let app = in_memory_services();
    seed_file(&app, "inbox/a.txt", b"a").await;
    seed_file(&app, "inbox/b.txt", b"b").await;

    let keys = vec![
        ObjectKey::new("inbox/a.txt".to_string()).unwrap(),
        ObjectKey::new("inbox/b.txt".to_string()).unwrap(),
    ];
    app.file_ops
        .batch_operation(
            &keys,
            BatchOperation::Move {
                destination: FolderPath::parse("archive"),
            },
        )
        .await
        .unwrap();

    assert!(!file_exists(&app, "inbox/a.txt").await);
    assert!(!file_exists(&app, "inbox/b.txt").await);
    assert!(file_exists(&app, "archive/a.txt").await);
    assert!(file_exists(&app, "archive/b.txt").await);
}

#[tokio::test]
async fn batch_move_into_the_current_folder_keeps_every_file() {
    let app = in_memory_services();
    seed_file(&app, "docs/a.txt", b"a").await;
    seed_file(&app, "docs/b.txt", b"b").await;
    seed_file(&app, "inbox/c.txt", b"c").await;

    let keys = vec![
        ObjectKey::new("docs/a.txt".to_string()).unwrap(),
        ObjectKey::new("docs/b.txt".to_string()).unwrap(),
        ObjectKey::new("inbox/c.txt".to_string()).unwrap(),
    ];
    app.file_ops
        .batch_operation(
            &keys,
            BatchOperation::Move {
                destination: FolderPath::parse("docs"),
            },
        )
        .await
        .unwrap();

    // The two files already in place survive, the third moves in
    assert_eq!(read_file(&app, "docs/a.txt").await.as_ref(), b"a");
    assert_eq!(read_file(&app, "docs/b.txt").await.as_ref(), b"b");
    assert_eq!(read_file(&app, "docs/c.txt").await.as_ref(), b"c");
    assert!(!file_exists(&app, "inbox/c.txt").await);
}

#[tokio::test]
async fn batch_copy_keeps_the_sources() {
    let app = in_memory_services();
    seed_file(&app, "inbox/a.txt", b"a").await;
    seed_file(&app, "inbox/b.txt", b"b").await;

    let keys = vec![
        ObjectKey::new("inbox/a.txt".to_string()).unwrap(),
        ObjectKey::new("inbox/b.txt".to_string()).unwrap(),
    ];
    app.file_ops
        .batch_operation(
            &keys,
            BatchOperation::Copy {
                destination: FolderPath::parse("backup"),
            },
        )
        .await
        .unwrap();

    assert!(file_exists(&app, "inbox/a.txt").await);
    assert!(file_exists(&app, "inbox/b.txt").await);
    assert!(file_exists(&app, "backup/a.txt").await);
    assert!(file_exists(&app, "backup/b.txt").await);
}

#[tokio::test]
async fn batch_move_counts_a_failed_delete_as_a_failure() {
    let (store, app) = flaky_services();
    seed_file(&app, "inbox/a.txt", b"a").await;

    let source = ObjectKey::new("inbox/a.txt".to_string()).unwrap();
    store.fail_deletes_of(
        &source,
        StorageError::Network {
            message: "connection reset".to_string(),
        },
    );

    let result = app
        .file_ops
        .batch_operation(
            &[source],
            BatchOperation::Move {
                destination: FolderPath::parse("archive"),
            },
        )
        .await;

    assert!(matches!(result, Err(StorageError::Network { .. })));
    assert!(file_exists(&app, "inbox/a.txt").await);
    assert!(file_exists(&app, "archive/a.txt").await);
}

#[tokio::test]
async fn batch_copy_validates_destinations_before_any_request() {
    let app = in_memory_services();
    seed_file(&app, "docs/a.txt", b"a").await;

    // A destination prefix long enough to push the derived key past the
    // key length limit
    let long = "x".repeat(1100);
    let keys = vec![ObjectKey::new("docs/a.txt".to_string()).unwrap()];
    let result = app
        .file_ops
        .batch_operation(
            &keys,
            BatchOperation::Copy {
                destination: FolderPath::parse(&long),
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(StorageError::Validation(
            ValidationError::ObjectKeyTooLong { .. }
        ))
    ));

    let copied = app
        .handle
        .store()
        .await
        .list_prefix(&FolderPath::parse(&long), None)
        .await
        .unwrap();
    assert!(copied.is_empty());
}

#[tokio::test]
async fn empty_batch_is_a_no_op() {
    let app = in_memory_services();
    app.file_ops
        .batch_operation(&[], BatchOperation::Delete)
        .await
        .unwrap();
}
