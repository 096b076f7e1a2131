//! Ordered name trees used by the subreddit, topic and submission-type
//! breakdowns.
//!
//! Children keep first-seen order and are unique by name (and kind) per
//! parent. Only leaves carry a payload; inserting a leaf that already exists
//! merges the payloads.

use serde::Serialize;

/// Leaf data that can absorb another leaf of the same name.
pub trait Merge {
    fn merge(&mut self, other: Self);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch<L> {
    pub name: String,
    pub children: Vec<TreeNode<L>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaf<L> {
    pub name: String,
    #[serde(flatten)]
    pub payload: L,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TreeNode<L> {
    Branch(Branch<L>),
    Leaf(Leaf<L>),
}

impl<L> TreeNode<L> {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Branch(b) => &b.name,
            TreeNode::Leaf(l) => &l.name,
        }
    }
}

impl<L: Merge> Branch<L> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Creates a root whose first level is `names`, in order.
    pub fn with_branches(name: impl Into<String>, names: &[&str]) -> Self {
        let mut root = Self::new(name);
        for child in names {
            root.children.push(TreeNode::Branch(Branch::new(*child)));
        }
        root
    }

    pub fn child_branch(&self, name: &str) -> Option<&Branch<L>> {
        self.children.iter().find_map(|c| match c {
            TreeNode::Branch(b) if b.name == name => Some(b),
            _ => None,
        })
    }

    pub fn leaf(&self, name: &str) -> Option<&Leaf<L>> {
        self.children.iter().find_map(|c| match c {
            TreeNode::Leaf(l) if l.name == name => Some(l),
            _ => None,
        })
    }

    fn child_branch_mut(&mut self, name: &str) -> &mut Branch<L> {
        let position = self
            .children
            .iter()
            .position(|c| matches!(c, TreeNode::Branch(b) if b.name == name));
        let index = match position {
            Some(index) => index,
            None => {
                self.children.push(TreeNode::Branch(Branch::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[index] {
            TreeNode::Branch(b) => b,
            TreeNode::Leaf(_) => unreachable!("index points at a branch"),
        }
    }

    /// Inserts `payload` at `path`, creating intermediate branches as needed.
    pub fn insert(&mut self, path: &[&str], payload: L) {
        let Some((leaf_name, branches)) = path.split_last() else {
            return;
        };

        let mut node = self;
        for name in branches {
            node = node.child_branch_mut(name);
        }

        let existing = node
            .children
            .iter()
            .position(|c| matches!(c, TreeNode::Leaf(l) if l.name == *leaf_name));
        match existing {
            Some(index) => {
                if let TreeNode::Leaf(leaf) = &mut node.children[index] {
                    leaf.payload.merge(payload);
                }
            }
            None => node.children.push(TreeNode::Leaf(Leaf {
                name: leaf_name.to_string(),
                payload,
            })),
        }
    }
}

/// Leaf payload holding a single count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Size {
    pub size: u64,
}

impl Merge for Size {
    fn merge(&mut self, other: Self) {
        self.size += other.size;
    }
}

/// Leaf payload holding comment and submission tallies for one subreddit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub comments: u64,
    pub submissions: u64,
    pub posts: u64,
    pub comment_karma: i64,
    pub submission_karma: i64,
    pub karma: i64,
}

impl Activity {
    pub fn comments(count: u64, karma: i64) -> Self {
        Self {
            comments: count,
            posts: count,
            comment_karma: karma,
            karma,
            ..Default::default()
        }
    }

    pub fn submissions(count: u64, karma: i64) -> Self {
        Self {
            submissions: count,
            posts: count,
            submission_karma: karma,
            karma,
            ..Default::default()
        }
    }
}

impl Merge for Activity {
    fn merge(&mut self, other: Self) {
        self.comments += other.comments;
        self.submissions += other.submissions;
        self.posts += other.posts;
        self.comment_karma += other.comment_karma;
        self.submission_karma += other.submission_karma;
        self.karma += other.karma;
    }
}
