//! Commands queued from the UI to the avatar decode worker.

use std::path::PathBuf;

pub enum WorkerCommand {
    DecodeAvatar { generation: u64, path: PathBuf },
}
