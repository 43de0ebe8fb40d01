use crate::models::AppData;
use crate::session::SessionProvider;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub sessions: Arc<dyn SessionProvider>,
}

impl AppState {
    pub fn new(data_path: PathBuf, data: AppData, sessions: Arc<dyn SessionProvider>) -> Self {
        Self {
            data_path,
            data: Arc::new(Mutex::new(data)),
            sessions,
        }
    }
}
