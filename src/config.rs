use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::pdf::UploadStore;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024; // 200MB

#[derive(Debug, Clone, Parser)]
#[command(name = "estimator-server", about = "Electrical estimate and drawing scale API")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "ESTIMATOR_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Directory uploaded drawings are written to
    #[arg(long, env = "ESTIMATOR_UPLOAD_DIR", default_value = "uploads")]
    pub upload_dir: PathBuf,

    /// Largest accepted request body, in bytes
    #[arg(long, env = "ESTIMATOR_MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ServerConfig {
    pub fn upload_store(&self) -> UploadStore {
        UploadStore::new(&self.upload_dir)
    }
}
