//! Headless core of the family directory widget: the member model, the
//! ordered member store, the add-member workflow state machine, the
//! branch projection used for rendering, and photo decoding.
//!
//! All member state lives in process memory for the lifetime of the view;
//! nothing here touches the network or persists member data.

pub mod avatar;
pub mod directory;
pub mod member;
pub mod render;
pub mod store;
pub mod workflow;

pub use avatar::{load_avatar, AvatarError};
pub use directory::{AvatarOutcome, FamilyDirectory, SubmitOutcome};
pub use member::{seed_family, AvatarImage, Branch, Member, MemberId};
pub use render::{branch_groups, BranchGroup};
pub use store::MemberStore;
pub use workflow::{
    AddMemberWorkflow, AvatarRequest, MemberDraft, WorkflowState, DEFAULT_RELATION,
};

#[cfg(test)]
#[path = "tests/directory_tests.rs"]
mod directory_tests;

#[cfg(test)]
#[path = "tests/avatar_tests.rs"]
mod avatar_tests;
