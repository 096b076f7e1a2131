//! Hierarchical classification of posts.
//!
//! Builds the subreddit breakdown (level-1 topic → subreddit), the topic
//! breakdown (`level1>level2>level3` paths) and the submission type/domain
//! breakdown, and keeps the per-subreddit tallies the synthesizer needs.

use indexmap::IndexMap;
use std::collections::BTreeMap;
use url::Url;

use crate::analyzers::summarize::count_values;
use crate::analyzers::tree::{Activity, Branch, Size};
use crate::posts::{Comment, Submission};
use crate::subreddits::SubredditTable;

static IMAGE_DOMAINS: &[&str] = &["imgur.com", "flickr.com"];
static VIDEO_DOMAINS: &[&str] = &["youtube.com", "youtu.be", "vimeo.com", "liveleak.com"];
static IMAGE_EXTENSIONS: &[&str] = &["jpg", "png", "gif", "bmp"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionType {
    SelfPost,
    Image,
    Video,
    Other,
}

impl SubmissionType {
    pub const ALL: [SubmissionType; 4] = [
        SubmissionType::SelfPost,
        SubmissionType::Image,
        SubmissionType::Video,
        SubmissionType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionType::SelfPost => "Self",
            SubmissionType::Image => "Image",
            SubmissionType::Video => "Video",
            SubmissionType::Other => "Other",
        }
    }
}

/// Classifies a submission and returns the name it is grouped under:
/// the subreddit for self posts, the domain otherwise.
pub fn classify_submission(submission: &Submission) -> (SubmissionType, &str) {
    let domain = submission.domain.as_str();
    let path = Url::parse(&submission.url)
        .map(|u| u.path().to_lowercase())
        .unwrap_or_default();

    if domain.starts_with("self.") {
        (SubmissionType::SelfPost, &submission.subreddit)
    } else if IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || IMAGE_DOMAINS.iter().any(|d| domain.ends_with(d))
    {
        (SubmissionType::Image, domain)
    } else if VIDEO_DOMAINS.iter().any(|d| domain.ends_with(d)) {
        (SubmissionType::Video, domain)
    } else {
        (SubmissionType::Other, domain)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    count: u64,
    karma: i64,
}

/// Trees produced once every post has been classified.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdowns {
    pub subreddit: Branch<Activity>,
    pub topic: Branch<Size>,
    pub type_domain: Branch<Size>,
}

pub struct Classifier<'t> {
    table: &'t SubredditTable,
    comment_subreddits: IndexMap<String, Tally>,
    submission_subreddits: IndexMap<String, Tally>,
    topics: Vec<String>,
    type_domain: Branch<Size>,
}

impl<'t> Classifier<'t> {
    pub fn new(table: &'t SubredditTable) -> Self {
        let types: Vec<&str> = SubmissionType::ALL.iter().map(|t| t.as_str()).collect();
        Self {
            table,
            comment_subreddits: IndexMap::new(),
            submission_subreddits: IndexMap::new(),
            topics: Vec::new(),
            type_domain: Branch::with_branches("All", &types),
        }
    }

    pub fn classify_comment(&mut self, comment: &Comment) {
        let tally = self
            .comment_subreddits
            .entry(comment.subreddit.clone())
            .or_default();
        tally.count += 1;
        tally.karma += comment.score;
        self.record_topic(&comment.subreddit);
    }

    pub fn classify_submission(&mut self, submission: &Submission) {
        let tally = self
            .submission_subreddits
            .entry(submission.subreddit.clone())
            .or_default();
        tally.count += 1;
        tally.karma += submission.score;
        self.record_topic(&submission.subreddit);

        let (kind, group) = classify_submission(submission);
        self.type_domain.insert(&[kind.as_str(), group], Size { size: 1 });
    }

    /// Comment counts per subreddit, most common first.
    pub fn commented_subreddits(&self) -> Vec<(String, u64)> {
        most_common(&self.comment_subreddits)
    }

    /// Submission counts per subreddit, most common first.
    pub fn submitted_subreddits(&self) -> Vec<(String, u64)> {
        most_common(&self.submission_subreddits)
    }

    /// Post counts per subreddit over submissions then comments, most common
    /// first.
    pub fn posted_subreddits(&self) -> Vec<(String, u64)> {
        let mut all: IndexMap<&str, Tally> = IndexMap::new();
        for (name, tally) in self
            .submission_subreddits
            .iter()
            .chain(self.comment_subreddits.iter())
        {
            all.entry(name.as_str()).or_default().count += tally.count;
        }
        let mut counts: Vec<(String, u64)> = all
            .into_iter()
            .map(|(name, tally)| (name.to_string(), tally.count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    // Comments must be classified before submissions for the topic
    // breakdown to keep its order.
    fn record_topic(&mut self, subreddit: &str) {
        self.topics.push(self.table.topic_path(subreddit));
    }

    pub fn breakdowns(&self) -> Breakdowns {
        Breakdowns {
            subreddit: self.subreddit_tree(),
            topic: self.topic_tree(),
            type_domain: self.type_domain.clone(),
        }
    }

    fn subreddit_tree(&self) -> Branch<Activity> {
        let mut root = Branch::new("All");

        let comments: BTreeMap<&str, Tally> = self
            .comment_subreddits
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        for (name, tally) in comments {
            let level1 = self.table.level1_topic(name);
            root.insert(&[level1, name], Activity::comments(tally.count, tally.karma));
        }

        let submissions: BTreeMap<&str, Tally> = self
            .submission_subreddits
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        for (name, tally) in submissions {
            let level1 = self.table.level1_topic(name);
            root.insert(&[level1, name], Activity::submissions(tally.count, tally.karma));
        }

        root
    }

    fn topic_tree(&self) -> Branch<Size> {
        let mut root = Branch::new("All");
        for (topic, count) in count_values(self.topics.iter().map(String::as_str)) {
            let path: Vec<&str> = topic.split('>').collect();
            root.insert(&path, Size { size: count });
        }
        root
    }
}

fn most_common(tallies: &IndexMap<String, Tally>) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = tallies
        .iter()
        .map(|(name, tally)| (name.clone(), tally.count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::tree::TreeNode;

    const TABLE: &str = "\
name,topic_level1,topic_level2,topic_level3,default,ignore_text,attribute,value
gaming,Gaming,,,true,false,,
NintendoSwitch,Gaming,Consoles,Nintendo Switch,false,false,,
rust,Technology,Programming,Rust,false,false,,
misc,Other,,,false,false,,
";

    fn table() -> SubredditTable {
        SubredditTable::from_reader(TABLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_classify_submission_types() {
        let selfpost = submission("rust", "self.rust", "https://www.reddit.com/r/rust/comments/x");
        let image = submission("pics", "i.imgur.com", "http://i.imgur.com/abc");
        let image_ext = submission("pics", "example.com", "http://example.com/cat.PNG");
        let video = submission("videos", "youtube.com", "https://youtube.com/watch?v=1");
        let other = submission("news", "bbc.co.uk", "https://bbc.co.uk/story");

        assert_eq!(classify_submission(&selfpost), (SubmissionType::SelfPost, "rust"));
        assert_eq!(classify_submission(&image), (SubmissionType::Image, "i.imgur.com"));
        assert_eq!(classify_submission(&image_ext), (SubmissionType::Image, "example.com"));
        assert_eq!(classify_submission(&video), (SubmissionType::Video, "youtube.com"));
        assert_eq!(classify_submission(&other), (SubmissionType::Other, "bbc.co.uk"));
    }

    #[test]
    fn test_type_domain_tree_counts_domains() {
        let table = table();
        let mut classifier = Classifier::new(&table);
        classifier.classify_submission(&submission("pics", "i.imgur.com", "http://i.imgur.com/a"));
        classifier.classify_submission(&submission("pics", "i.imgur.com", "http://i.imgur.com/b"));
        classifier.classify_submission(&submission("rust", "self.rust", "http://reddit.com/x"));

        let tree = classifier.breakdowns().type_domain;

        let names: Vec<_> = tree.children.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Self", "Image", "Video", "Other"]);
        let image = tree.child_branch("Image").unwrap();
        assert_eq!(image.leaf("i.imgur.com").unwrap().payload.size, 2);
        assert_eq!(tree.child_branch("Self").unwrap().leaf("rust").unwrap().payload.size, 1);
    }

    #[test]
    fn test_subreddit_tree_merges_comments_and_submissions() {
        let table = table();
        let mut classifier = Classifier::new(&table);
        classifier.classify_comment(&comment("rust", 4));
        classifier.classify_comment(&comment("gaming", 1));
        classifier.classify_comment(&comment("unknown", 2));
        classifier.classify_submission(&submission("rust", "self.rust", "http://x/y"));

        let tree = classifier.breakdowns().subreddit;

        // level-1 groups in order of sorted subreddit names
        let names: Vec<_> = tree.children.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Gaming", "Technology", "Other"]);
        let rust = tree.child_branch("Technology").unwrap().leaf("rust").unwrap();
        assert_eq!(rust.payload.comments, 1);
        assert_eq!(rust.payload.submissions, 1);
        assert_eq!(rust.payload.posts, 2);
        assert_eq!(rust.payload.karma, 14);
    }

    #[test]
    fn test_topic_tree_most_common_first() {
        let table = table();
        let mut classifier = Classifier::new(&table);
        for sub in ["misc", "NintendoSwitch", "NintendoSwitch", "gaming", "nowhere"] {
            classifier.classify_comment(&comment(sub, 1));
        }

        let tree = classifier.breakdowns().topic;

        let names: Vec<_> = tree.children.iter().map(TreeNode::name).collect();
        assert_eq!(names, vec!["Other", "Gaming"]);
        let gaming = tree.child_branch("Gaming").unwrap();
        assert_eq!(
            gaming
                .child_branch("Consoles")
                .unwrap()
                .leaf("Nintendo Switch")
                .unwrap()
                .payload
                .size,
            2
        );
        assert_eq!(
            gaming.child_branch("Generic").unwrap().leaf("Generic").unwrap().payload.size,
            1
        );
        assert_eq!(tree.leaf("Other").unwrap().payload.size, 2);
    }

    #[test]
    fn test_posted_subreddits_counts_both_kinds() {
        let table = table();
        let mut classifier = Classifier::new(&table);
        classifier.classify_comment(&comment("gaming", 1));
        classifier.classify_submission(&submission("rust", "self.rust", "http://x/y"));
        classifier.classify_comment(&comment("rust", 1));

        assert_eq!(
            classifier.posted_subreddits(),
            vec![("rust".to_string(), 2), ("gaming".to_string(), 1)]
        );
        assert_eq!(
            classifier.commented_subreddits(),
            vec![("gaming".to_string(), 1), ("rust".to_string(), 1)]
        );
    }

    fn comment(subreddit: &str, score: i64) -> Comment {
        Comment {
            id: "c".to_string(),
            subreddit: subreddit.to_string(),
            text: String::new(),
            created_utc: 0,
            score,
            permalink: String::new(),
            gilded: 0,
        }
    }

    fn submission(subreddit: &str, domain: &str, url: &str) -> Submission {
        Submission {
            id: "s".to_string(),
            subreddit: subreddit.to_string(),
            text: String::new(),
            created_utc: 0,
            score: 10,
            permalink: String::new(),
            url: url.to_string(),
            title: "t".to_string(),
            is_self: domain.starts_with("self."),
            gilded: 0,
            domain: domain.to_string(),
        }
    }
}
