use std::path::PathBuf;

use crate::member::{AvatarImage, Branch, Member, MemberId};

/// Relation stored when the field is left blank.
pub const DEFAULT_RELATION: &str = "Member";

/// Transient form fields collected while the add-member modal is open.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub relation: String,
    pub branch: Branch,
    pub avatar_path: Option<PathBuf>,
}

impl Default for MemberDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            relation: String::new(),
            branch: Branch::Parents,
            avatar_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Closed,
    Open,
    Submitting,
}

/// Asynchronous decode request handed to the caller when a submit carries
/// a photo. `generation` ties the eventual completion back to this
/// workflow pass; a completion whose generation no longer matches is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRequest {
    pub generation: u64,
    pub path: PathBuf,
}

/// What the caller must do after [`AddMemberWorkflow::submit`].
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    /// Guard failed (blank name) or the workflow was not open; nothing
    /// happens and the form stays as it is.
    Rejected,
    /// No photo was selected; append this record now.
    Append(Member),
    /// A photo was selected; decode it off-thread and report back via
    /// [`AddMemberWorkflow::complete_avatar`].
    DecodeAvatar(AvatarRequest),
}

/// Result of driving the workflow with a finished decode.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarCompletion {
    /// The workflow was cancelled or reopened since the request was
    /// issued; the result must not produce a member.
    Stale,
    Append(Member),
    /// Decode failed; the form is open again with the draft preserved and
    /// an error message retained.
    Failed,
}

/// Add-member state machine: `Closed -> Open -> Submitting -> Closed`.
///
/// The member id is assigned at submit time, before any decode completes.
#[derive(Debug, Default)]
pub struct AddMemberWorkflow {
    state: WorkflowState,
    draft: MemberDraft,
    generation: u64,
    pending: Option<PendingMember>,
    last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct PendingMember {
    id: MemberId,
    name: String,
    relation: String,
    branch: Branch,
}

impl Default for WorkflowState {
    fn default() -> Self {
        WorkflowState::Closed
    }
}

impl AddMemberWorkflow {
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn draft(&self) -> &MemberDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut MemberDraft {
        &mut self.draft
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Opens the form with fields reset to defaults. A no-op unless the
    /// workflow is closed, so a stray open cannot wipe in-progress edits.
    pub fn open(&mut self) {
        if self.state != WorkflowState::Closed {
            return;
        }
        self.generation = self.generation.wrapping_add(1);
        self.draft = MemberDraft::default();
        self.last_error = None;
        self.state = WorkflowState::Open;
    }

    /// Discards all field edits and closes the form without appending
    /// anything. Invalidates any decode still in flight.
    pub fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.close();
    }

    pub fn submit(&mut self) -> SubmitAction {
        if self.state != WorkflowState::Open {
            return SubmitAction::Rejected;
        }
        let name = self.draft.name.trim();
        if name.is_empty() {
            // Silent rejection: the form stays open, no error is surfaced.
            tracing::debug!("rejected add-member submit with blank name");
            return SubmitAction::Rejected;
        }
        let name = name.to_string();
        let relation = match self.draft.relation.trim() {
            "" => DEFAULT_RELATION.to_string(),
            trimmed => trimmed.to_string(),
        };
        let id = MemberId::generate();
        let branch = self.draft.branch;

        match self.draft.avatar_path.clone() {
            Some(path) => {
                self.pending = Some(PendingMember {
                    id,
                    name,
                    relation,
                    branch,
                });
                self.last_error = None;
                self.state = WorkflowState::Submitting;
                SubmitAction::DecodeAvatar(AvatarRequest {
                    generation: self.generation,
                    path,
                })
            }
            None => {
                let member = Member {
                    id,
                    name,
                    relation,
                    avatar: None,
                    branch,
                    root: false,
                };
                self.close();
                SubmitAction::Append(member)
            }
        }
    }

    /// Applies the outcome of an asynchronous photo decode. Completions
    /// whose generation no longer matches the live workflow pass are
    /// discarded so a cancelled form can never append a member.
    pub fn complete_avatar(
        &mut self,
        generation: u64,
        result: Result<AvatarImage, String>,
    ) -> AvatarCompletion {
        if self.state != WorkflowState::Submitting || generation != self.generation {
            return AvatarCompletion::Stale;
        }
        let Some(pending) = self.pending.take() else {
            return AvatarCompletion::Stale;
        };
        match result {
            Ok(avatar) => {
                let member = Member {
                    id: pending.id,
                    name: pending.name,
                    relation: pending.relation,
                    avatar: Some(avatar),
                    branch: pending.branch,
                    root: false,
                };
                self.close();
                AvatarCompletion::Append(member)
            }
            Err(reason) => {
                // Recoverable: back to Open with the draft intact so the
                // user can retry or pick a different file.
                self.state = WorkflowState::Open;
                self.last_error = Some(reason);
                AvatarCompletion::Failed
            }
        }
    }

    fn close(&mut self) {
        self.state = WorkflowState::Closed;
        self.draft = MemberDraft::default();
        self.pending = None;
        self.last_error = None;
    }
}
