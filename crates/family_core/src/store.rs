use crate::member::{Member, MemberId};

/// Ordered in-memory member list. Insertion order is preserved and is the
/// display tiebreak within a branch.
///
/// The store itself performs no root check on removal; that enforcement
/// lives in [`crate::directory::FamilyDirectory::remove_member`].
#[derive(Debug, Default)]
pub struct MemberStore {
    members: Vec<Member>,
}

impl MemberStore {
    pub fn new(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn append(&mut self, member: Member) {
        self.members.push(member);
    }

    /// Removes the record with the given id, if any. Unknown ids are a
    /// no-op.
    pub fn remove_by_id(&mut self, id: MemberId) -> bool {
        match self.members.iter().position(|member| member.id == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
