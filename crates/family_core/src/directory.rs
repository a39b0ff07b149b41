use crate::member::{seed_family, AvatarImage, Member, MemberId};
use crate::store::MemberStore;
use crate::workflow::{
    AddMemberWorkflow, AvatarCompletion, AvatarRequest, MemberDraft, SubmitAction, WorkflowState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected,
    Added(MemberId),
    /// The caller must decode the photo and call
    /// [`FamilyDirectory::complete_avatar`] with the result.
    AwaitingAvatar(AvatarRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarOutcome {
    Stale,
    Added(MemberId),
    Failed,
}

/// The member store plus the add-member workflow, wired together. This is
/// the only mutation entry point the UI uses; in particular it is the
/// layer that refuses to remove root members.
#[derive(Debug)]
pub struct FamilyDirectory {
    store: MemberStore,
    workflow: AddMemberWorkflow,
}

impl FamilyDirectory {
    pub fn new() -> Self {
        Self::with_members(seed_family())
    }

    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            store: MemberStore::new(members),
            workflow: AddMemberWorkflow::default(),
        }
    }

    pub fn members(&self) -> &[Member] {
        self.store.members()
    }

    pub fn member_count(&self) -> usize {
        self.store.len()
    }

    pub fn workflow_state(&self) -> WorkflowState {
        self.workflow.state()
    }

    pub fn draft(&self) -> &MemberDraft {
        self.workflow.draft()
    }

    pub fn draft_mut(&mut self) -> &mut MemberDraft {
        self.workflow.draft_mut()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.workflow.last_error()
    }

    pub fn open_form(&mut self) {
        self.workflow.open();
    }

    pub fn cancel_form(&mut self) {
        self.workflow.cancel();
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        match self.workflow.submit() {
            SubmitAction::Rejected => SubmitOutcome::Rejected,
            SubmitAction::Append(member) => {
                let id = member.id;
                tracing::debug!(name = %member.name, branch = ?member.branch, "appending member");
                self.store.append(member);
                SubmitOutcome::Added(id)
            }
            SubmitAction::DecodeAvatar(request) => SubmitOutcome::AwaitingAvatar(request),
        }
    }

    pub fn complete_avatar(
        &mut self,
        generation: u64,
        result: Result<AvatarImage, String>,
    ) -> AvatarOutcome {
        match self.workflow.complete_avatar(generation, result) {
            AvatarCompletion::Stale => {
                tracing::debug!(generation, "discarding stale avatar completion");
                AvatarOutcome::Stale
            }
            AvatarCompletion::Append(member) => {
                let id = member.id;
                tracing::debug!(name = %member.name, branch = ?member.branch, "appending member with photo");
                self.store.append(member);
                AvatarOutcome::Added(id)
            }
            AvatarCompletion::Failed => AvatarOutcome::Failed,
        }
    }

    /// Removes a member unless it is a root member or unknown. Returns
    /// whether a record was actually removed.
    pub fn remove_member(&mut self, id: MemberId) -> bool {
        let is_root = self
            .store
            .members()
            .iter()
            .any(|member| member.id == id && member.root);
        if is_root {
            tracing::debug!("refused removal of root member");
            return false;
        }
        self.store.remove_by_id(id)
    }
}

impl Default for FamilyDirectory {
    fn default() -> Self {
        Self::new()
    }
}
