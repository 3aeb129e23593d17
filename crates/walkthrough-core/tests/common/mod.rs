use std::path::Path;

use walkthrough_core::{Walkthrough, WalkthroughBuilder};

/// Builds a walkthrough over the built-in tour backed by `db_path`.
pub async fn create_test_walkthrough(db_path: &Path) -> Walkthrough {
    WalkthroughBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create walkthrough")
}
