use std::error::Error;

use bytes::Bytes;
use object_store_fs::{
    create_in_memory_app, BrowseService, DuplicateResolution, FileOpsService, FolderPath,
    ObjectKey, QuotaService, ResolvedUpload, UploadOutcome, UploadRequest, UploadService,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // Create the application services with in-memory storage
    let app = create_in_memory_app()?;

    // Build a small folder tree
    let reports = FolderPath::parse("documents/reports");
    app.file_ops
        .create_folder(&FolderPath::parse("documents"))
        .await?;
    app.file_ops.create_folder(&reports).await?;
    println!("Created documents/ and documents/reports/");

    // Upload a file into the tree
    let target = ObjectKey::in_folder(&reports, "q3.csv")?;
    let request = UploadRequest {
        target: target.clone(),
        file_name: "q3.csv".to_string(),
        content_type: "text/csv".to_string(),
        data: Bytes::from_static(b"region,revenue\nnorth,1200\nsouth,900\n"),
    };
    match app.upload.upload(request).await? {
        UploadOutcome::Uploaded(receipt) => {
            println!("Uploaded {} ({} bytes, etag {})", receipt.key, receipt.size, receipt.etag);
        }
        UploadOutcome::DuplicateDetected(_) => unreachable!("store is empty"),
    }

    // Upload the same name again and keep both copies
    let request = UploadRequest {
        target,
        file_name: "q3.csv".to_string(),
        content_type: "text/csv".to_string(),
        data: Bytes::from_static(b"region,revenue\nnorth,1350\nsouth,1100\n"),
    };
    match app.upload.upload(request).await? {
        UploadOutcome::Uploaded(_) => unreachable!("first upload already exists"),
        UploadOutcome::DuplicateDetected(pending) => {
            println!("Duplicate detected for {}", pending.target());
            match app
                .upload
                .resolve_duplicate(pending, DuplicateResolution::KeepBoth)
                .await?
            {
                ResolvedUpload::Uploaded(receipt) => {
                    println!("Kept both, second copy stored as {}", receipt.key)
                }
                ResolvedUpload::Skipped => unreachable!("keep-both never skips"),
            }
        }
    }

    // Browse the tree
    let listing = app.browse.list_folder(&reports).await?;
    println!("\nContents of {}/:", listing.current_path);
    for file in &listing.files {
        println!("  {} ({} bytes)", file.key.basename(), file.size);
    }

    let listing = app.browse.list_folder(&FolderPath::parse("documents")).await?;
    for folder in &listing.folders {
        println!(
            "Folder {}/ holds {} items, {} bytes total",
            folder.name, folder.item_count, folder.size
        );
    }

    // Move one copy up a level
    let source = ObjectKey::new("documents/reports/q3 (1).csv".to_string())?;
    let destination = ObjectKey::new("documents/q3-revised.csv".to_string())?;
    let outcome = app.file_ops.move_file(&source, &destination).await?;
    println!("\nMove complete: {:?}", outcome);

    // Report usage
    let quota = app.quota.storage_quota().await?;
    println!(
        "Storage used: {} of {} bytes ({:.4}%)",
        quota.used,
        quota.total,
        quota.fraction_used() * 100.0
    );

    Ok(())
}
