use std::path::PathBuf;
use std::sync::Arc;

use headstone_shared::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub dist_dir: PathBuf,
}

impl AppState {
    pub fn new(catalog: Catalog, dist_dir: PathBuf) -> Self {
        Self {
            catalog: Arc::new(catalog),
            dist_dir,
        }
    }
}
