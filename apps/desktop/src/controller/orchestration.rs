//! Command orchestration from UI actions to the worker queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::WorkerCommand;

/// Queues a command for the worker. Returns whether the command was
/// accepted; on failure a status-line message is set so the caller can
/// unwind the workflow instead of leaving it stuck in `Submitting`.
pub fn dispatch_worker_command(
    cmd_tx: &Sender<WorkerCommand>,
    cmd: WorkerCommand,
    status: &mut String,
) -> bool {
    let cmd_name = match &cmd {
        WorkerCommand::DecodeAvatar { .. } => "decode_avatar",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->worker command");
            true
        }
        Err(TrySendError::Full(_)) => {
            *status = "Photo worker queue is full; please retry".to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "Photo worker disconnected; photos cannot be loaded".to_string();
            false
        }
    }
}
