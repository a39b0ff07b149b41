use std::path::PathBuf;

use crate::directory::{AvatarOutcome, FamilyDirectory, SubmitOutcome};
use crate::member::{AvatarImage, Branch, MemberId};
use crate::render::branch_groups;
use crate::workflow::{WorkflowState, DEFAULT_RELATION};

fn sample_avatar() -> AvatarImage {
    AvatarImage {
        data_uri: "data:image/png;base64,AAAA".to_string(),
        width: 1,
        height: 1,
        rgba: vec![0, 0, 0, 255],
    }
}

fn member_id_by_name(directory: &FamilyDirectory, name: &str) -> MemberId {
    directory
        .members()
        .iter()
        .find(|member| member.name == name)
        .map(|member| member.id)
        .expect("seed member present")
}

#[test]
fn submit_appends_one_member_to_the_selected_branch() {
    let mut directory = FamilyDirectory::new();
    assert_eq!(directory.member_count(), 8);

    directory.open_form();
    directory.draft_mut().name = "  Grandchild  ".to_string();
    directory.draft_mut().relation = "Firstborn".to_string();
    directory.draft_mut().branch = Branch::Children;

    let id = match directory.submit() {
        SubmitOutcome::Added(id) => id,
        other => panic!("expected Added, got {other:?}"),
    };

    assert_eq!(directory.member_count(), 9);
    assert_eq!(directory.workflow_state(), WorkflowState::Closed);
    let added = directory
        .members()
        .iter()
        .find(|member| member.id == id)
        .expect("appended member present");
    assert_eq!(added.name, "Grandchild");
    assert_eq!(added.relation, "Firstborn");
    assert_eq!(added.branch, Branch::Children);
    assert!(added.avatar.is_none());
    assert!(!added.root);
}

#[test]
fn blank_relation_is_stored_as_member() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "Cousin".to_string();
    directory.draft_mut().relation = "   ".to_string();
    directory.draft_mut().branch = Branch::Siblings;

    assert!(matches!(directory.submit(), SubmitOutcome::Added(_)));

    assert_eq!(directory.member_count(), 9);
    let cousin = directory
        .members()
        .iter()
        .find(|member| member.name == "Cousin")
        .expect("cousin appended");
    assert_eq!(cousin.relation, DEFAULT_RELATION);

    // Siblings column grows at the end, preserving store order.
    let groups = branch_groups(directory.members());
    let siblings = groups
        .iter()
        .find(|group| group.branch == Branch::Siblings)
        .expect("siblings group");
    let names: Vec<&str> = siblings
        .members
        .iter()
        .map(|member| member.name.as_str())
        .collect();
    assert_eq!(names, ["You", "Sibling", "Cousin"]);
}

#[test]
fn whitespace_only_name_is_silently_rejected() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "  ".to_string();

    assert_eq!(directory.submit(), SubmitOutcome::Rejected);
    assert_eq!(directory.member_count(), 8);
    assert_eq!(directory.workflow_state(), WorkflowState::Open);
    assert!(directory.last_error().is_none());
}

#[test]
fn cancel_discards_the_draft_and_leaves_the_store_unchanged() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "Someone".to_string();
    directory.draft_mut().branch = Branch::Children;

    directory.cancel_form();

    assert_eq!(directory.workflow_state(), WorkflowState::Closed);
    assert_eq!(directory.member_count(), 8);

    // Reopening starts from defaults again.
    directory.open_form();
    assert!(directory.draft().name.is_empty());
    assert_eq!(directory.draft().branch, Branch::Parents);
}

#[test]
fn root_member_cannot_be_removed() {
    let mut directory = FamilyDirectory::new();
    let nana = member_id_by_name(&directory, "Nana");

    assert!(!directory.remove_member(nana));
    assert_eq!(directory.member_count(), 8);
    assert!(directory.members().iter().any(|member| member.name == "Nana"));
}

#[test]
fn removing_a_member_shrinks_only_its_branch_group() {
    let mut directory = FamilyDirectory::new();
    let aunt = member_id_by_name(&directory, "Aunt");

    assert!(directory.remove_member(aunt));
    assert_eq!(directory.member_count(), 7);

    let groups = branch_groups(directory.members());
    let by_branch = |branch: Branch| {
        groups
            .iter()
            .find(|group| group.branch == branch)
            .map(|group| group.members.len())
            .unwrap_or(0)
    };
    assert_eq!(by_branch(Branch::Parents), 3);
    assert_eq!(by_branch(Branch::Grandparents), 2);
    assert_eq!(by_branch(Branch::Siblings), 2);
    assert_eq!(by_branch(Branch::Children), 0);
}

#[test]
fn removing_an_unknown_id_is_a_no_op() {
    let mut directory = FamilyDirectory::new();
    assert!(!directory.remove_member(MemberId::generate()));
    assert_eq!(directory.member_count(), 8);
}

#[test]
fn photo_submit_defers_the_append_until_the_decode_completes() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "Cousin".to_string();
    directory.draft_mut().branch = Branch::Siblings;
    directory.draft_mut().avatar_path = Some(PathBuf::from("cousin.png"));

    let request = match directory.submit() {
        SubmitOutcome::AwaitingAvatar(request) => request,
        other => panic!("expected AwaitingAvatar, got {other:?}"),
    };
    assert_eq!(request.path, PathBuf::from("cousin.png"));
    assert_eq!(directory.workflow_state(), WorkflowState::Submitting);
    assert_eq!(directory.member_count(), 8);

    let completion = directory.complete_avatar(request.generation, Ok(sample_avatar()));
    let AvatarOutcome::Added(id) = completion else {
        panic!("expected Added, got {completion:?}");
    };
    assert_eq!(directory.member_count(), 9);
    assert_eq!(directory.workflow_state(), WorkflowState::Closed);
    let cousin = directory
        .members()
        .iter()
        .find(|member| member.id == id)
        .expect("cousin appended");
    assert_eq!(cousin.branch, Branch::Siblings);
    assert!(cousin.avatar.is_some());
}

#[test]
fn stale_decode_completion_after_cancel_appends_nothing() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "Cousin".to_string();
    directory.draft_mut().avatar_path = Some(PathBuf::from("cousin.png"));

    let SubmitOutcome::AwaitingAvatar(request) = directory.submit() else {
        panic!("expected AwaitingAvatar");
    };
    directory.cancel_form();

    let completion = directory.complete_avatar(request.generation, Ok(sample_avatar()));
    assert_eq!(completion, AvatarOutcome::Stale);
    assert_eq!(directory.member_count(), 8);
    assert_eq!(directory.workflow_state(), WorkflowState::Closed);
}

#[test]
fn failed_decode_reopens_the_form_with_the_draft_preserved() {
    let mut directory = FamilyDirectory::new();
    directory.open_form();
    directory.draft_mut().name = "Cousin".to_string();
    directory.draft_mut().relation = "Visitor".to_string();
    directory.draft_mut().branch = Branch::Siblings;
    directory.draft_mut().avatar_path = Some(PathBuf::from("broken.png"));

    let SubmitOutcome::AwaitingAvatar(request) = directory.submit() else {
        panic!("expected AwaitingAvatar");
    };

    let completion =
        directory.complete_avatar(request.generation, Err("unreadable file".to_string()));
    assert_eq!(completion, AvatarOutcome::Failed);
    assert_eq!(directory.member_count(), 8);
    assert_eq!(directory.workflow_state(), WorkflowState::Open);
    assert_eq!(directory.last_error(), Some("unreadable file"));
    assert_eq!(directory.draft().name, "Cousin");
    assert_eq!(directory.draft().relation, "Visitor");

    // Retrying without the photo succeeds from the preserved draft.
    directory.draft_mut().avatar_path = None;
    assert!(matches!(directory.submit(), SubmitOutcome::Added(_)));
    assert_eq!(directory.member_count(), 9);
    assert!(directory.last_error().is_none());
}

#[test]
fn branch_tags_serialize_snake_case() {
    let tag = serde_json::to_string(&Branch::Grandparents).expect("serialize branch");
    assert_eq!(tag, "\"grandparents\"");
    let parsed: Branch = serde_json::from_str("\"siblings\"").expect("parse branch");
    assert_eq!(parsed, Branch::Siblings);
}

#[test]
fn branch_groups_cover_every_branch_in_enumeration_order() {
    let directory = FamilyDirectory::new();
    let groups = branch_groups(directory.members());

    let order: Vec<Branch> = groups.iter().map(|group| group.branch).collect();
    assert_eq!(order, Branch::ALL);

    let sizes: Vec<usize> = groups.iter().map(|group| group.members.len()).collect();
    assert_eq!(sizes, [2, 4, 2, 0]);
}
