//! Worker thread owning the tokio runtime that performs avatar decodes.
//!
//! Photo decoding is the only asynchronous operation in the widget; it
//! runs off the UI thread so the view stays responsive while a read is
//! pending. Results flow back as [`UiEvent`]s and are matched against the
//! workflow generation on the UI side, so a completion for an abandoned
//! form is discarded there.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use family_core::avatar;

use crate::backend_bridge::commands::WorkerCommand;
use crate::controller::events::UiEvent;

pub fn launch(cmd_rx: Receiver<WorkerCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build avatar worker runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::WorkerFailed(format!(
                    "photo worker startup failure: {err}"
                )));
                return;
            }
        };

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    WorkerCommand::DecodeAvatar { generation, path } => {
                        match avatar::load_avatar(&path).await {
                            Ok(image) => {
                                let _ = ui_tx.try_send(UiEvent::AvatarDecoded { generation, image });
                            }
                            Err(err) => {
                                tracing::warn!(
                                    "avatar decode failed for '{}': {err}",
                                    path.display()
                                );
                                let _ = ui_tx.try_send(UiEvent::AvatarDecodeFailed {
                                    generation,
                                    reason: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        });
    });
}
