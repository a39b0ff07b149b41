use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Random 128-bit member identity. Generated ids side-step the collision
/// window a wall-clock-derived id would have when two members are added
/// within the same millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

impl MemberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Fixed display categories a member is tagged with. `ALL` gives the
/// column order used by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Grandparents,
    Parents,
    Siblings,
    Children,
}

impl Branch {
    pub const ALL: [Branch; 4] = [
        Branch::Grandparents,
        Branch::Parents,
        Branch::Siblings,
        Branch::Children,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Branch::Grandparents => "Grandparents",
            Branch::Parents => "Parents & Uncles/Aunts",
            Branch::Siblings => "Siblings & Cousins",
            Branch::Children => "Children",
        }
    }
}

/// Decoded member photo: the self-contained data URI built from the
/// original file bytes, plus thumbnailed RGBA pixels for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarImage {
    pub data_uri: String,
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub relation: String,
    pub avatar: Option<AvatarImage>,
    pub branch: Branch,
    /// Set only by seed data; root members are never removable.
    pub root: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, relation: impl Into<String>, branch: Branch) -> Self {
        Self {
            id: MemberId::generate(),
            name: name.into(),
            relation: relation.into(),
            avatar: None,
            branch,
            root: false,
        }
    }

    fn rooted(mut self) -> Self {
        self.root = true;
        self
    }
}

/// Default family the directory starts from. "Nana" anchors the display
/// and is the only root member.
pub fn seed_family() -> Vec<Member> {
    vec![
        Member::new("Nana", "Eldest", Branch::Grandparents).rooted(),
        Member::new("Nani", "Grandmother", Branch::Grandparents),
        Member::new("Mother", "Daughter of Nana", Branch::Parents),
        Member::new("Father", "Son-in-law", Branch::Parents),
        Member::new("Aunt", "Mother's Sister", Branch::Parents),
        Member::new("Uncle", "Mother's Brother", Branch::Parents),
        Member::new("You", "Self", Branch::Siblings),
        Member::new("Sibling", "Brother/Sister", Branch::Siblings),
    ]
}
