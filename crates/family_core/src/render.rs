use crate::member::{Branch, Member};

/// One display column: a branch and its members in store order.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchGroup<'a> {
    pub branch: Branch,
    pub members: Vec<&'a Member>,
}

/// Pure projection of the member list into one group per branch, in
/// enumeration order. Lists are small, so this is recomputed per frame
/// rather than cached.
pub fn branch_groups(members: &[Member]) -> Vec<BranchGroup<'_>> {
    Branch::ALL
        .into_iter()
        .map(|branch| BranchGroup {
            branch,
            members: members
                .iter()
                .filter(|member| member.branch == branch)
                .collect(),
        })
        .collect()
}
