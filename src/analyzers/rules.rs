//! Synopsis rules keyed by category or topic name.
//!
//! | Flag              | Meaning                                                        |
//! |-------------------|----------------------------------------------------------------|
//! | `min_levels`      | recognized level-1 topic group; depth required to be admitted  |
//! | `level2_group`    | level-2 topic that becomes its own synopsis category           |
//! | `excluded_topic`  | topic level never admitted into the synopsis                   |
//! | `excluded_label`  | coalesced topic label dropped before merging                   |
//! | `single_valued`   | category keeps one value and accepts no topic merges           |

/// Depth required for topics outside the recognized level-1 groups.
pub const DEFAULT_MIN_LEVELS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRule {
    pub name: &'static str,
    pub min_levels: Option<usize>,
    pub level2_group: bool,
    pub excluded_topic: bool,
    pub excluded_label: bool,
    pub single_valued: bool,
}

const fn rule(name: &'static str) -> CategoryRule {
    CategoryRule {
        name,
        min_levels: None,
        level2_group: false,
        excluded_topic: false,
        excluded_label: false,
        single_valued: false,
    }
}

const fn group(name: &'static str, min_levels: usize) -> CategoryRule {
    CategoryRule {
        min_levels: Some(min_levels),
        ..rule(name)
    }
}

const fn subgroup(name: &'static str) -> CategoryRule {
    CategoryRule {
        level2_group: true,
        ..rule(name)
    }
}

const fn excluded(name: &'static str) -> CategoryRule {
    CategoryRule {
        excluded_topic: true,
        ..rule(name)
    }
}

const fn excluded_label(name: &'static str) -> CategoryRule {
    CategoryRule {
        excluded_label: true,
        ..rule(name)
    }
}

const fn single(name: &'static str) -> CategoryRule {
    CategoryRule {
        single_valued: true,
        ..rule(name)
    }
}

static RULES: &[CategoryRule] = &[
    group("business", 2),
    group("entertainment", 3),
    group("gaming", 2),
    group("hobbies and interests", 2),
    group("lifestyle", 2),
    group("locations", 3),
    group("music", 2),
    group("science", 2),
    group("sports", 2),
    group("technology", 2),
    group("news and politics", 2),
    subgroup("television"),
    subgroup("books"),
    subgroup("celebrities"),
    CategoryRule {
        level2_group: true,
        excluded_label: true,
        single_valued: true,
        ..rule("religion and spirituality")
    },
    excluded("general"),
    excluded("drugs"),
    excluded("meta"),
    excluded("adult and nsfw"),
    excluded("other"),
    excluded_label("more interests"),
    excluded_label("alternative"),
    single("gender"),
    single("orientation"),
    single("relationship_partner"),
];

/// Looks up the rule for a lowercase category or topic name.
pub fn lookup(name: &str) -> Option<&'static CategoryRule> {
    RULES.iter().find(|r| r.name == name)
}

pub fn is_level1_group(name: &str) -> bool {
    lookup(name).is_some_and(|r| r.min_levels.is_some())
}

pub fn min_levels(name: &str) -> usize {
    lookup(name)
        .and_then(|r| r.min_levels)
        .unwrap_or(DEFAULT_MIN_LEVELS)
}

pub fn is_level2_group(name: &str) -> bool {
    lookup(name).is_some_and(|r| r.level2_group)
}

pub fn is_excluded_topic(name: &str) -> bool {
    lookup(name).is_some_and(|r| r.excluded_topic)
}

pub fn is_excluded_label(name: &str) -> bool {
    lookup(name).is_some_and(|r| r.excluded_label)
}

pub fn is_single_valued(name: &str) -> bool {
    lookup(name).is_some_and(|r| r.single_valued)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_levels() {
        assert_eq!(min_levels("entertainment"), 3);
        assert_eq!(min_levels("gaming"), 2);
        assert_eq!(min_levels("cooking"), DEFAULT_MIN_LEVELS);
    }

    #[test]
    fn test_flags() {
        assert!(is_level1_group("locations"));
        assert!(!is_level1_group("television"));
        assert!(is_level2_group("books"));
        assert!(is_excluded_topic("adult and nsfw"));
        assert!(is_excluded_label("more interests"));
        assert!(is_single_valued("gender"));
        assert!(is_single_valued("religion and spirituality"));
        assert!(!is_single_valued("possessions"));
    }

    #[test]
    fn test_names_are_unique() {
        for (i, rule) in RULES.iter().enumerate() {
            assert!(
                RULES[i + 1..].iter().all(|other| other.name != rule.name),
                "duplicate rule for {}",
                rule.name
            );
        }
    }
}
