//! Events flowing from the avatar worker back to the UI thread.

use family_core::AvatarImage;

pub enum UiEvent {
    AvatarDecoded { generation: u64, image: AvatarImage },
    AvatarDecodeFailed { generation: u64, reason: String },
    WorkerFailed(String),
}
