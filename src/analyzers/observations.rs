//! Raw attribute observations collected while posts are processed.

use std::collections::HashMap;

/// Attribute categories fed directly from post text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Gender,
    Orientation,
    RelationshipPartner,
    PlacesLived,
    PlacesGrewUp,
    FamilyMembers,
    Pets,
    Favorites,
    Attributes,
    Possessions,
}

impl Category {
    /// Synopsis order.
    pub const ALL: [Category; 10] = [
        Category::Gender,
        Category::Orientation,
        Category::RelationshipPartner,
        Category::PlacesLived,
        Category::PlacesGrewUp,
        Category::FamilyMembers,
        Category::Pets,
        Category::Favorites,
        Category::Attributes,
        Category::Possessions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Gender => "gender",
            Category::Orientation => "orientation",
            Category::RelationshipPartner => "relationship_partner",
            Category::PlacesLived => "places_lived",
            Category::PlacesGrewUp => "places_grew_up",
            Category::FamilyMembers => "family_members",
            Category::Pets => "pets",
            Category::Favorites => "favorites",
            Category::Attributes => "attributes",
            Category::Possessions => "possessions",
        }
    }
}

/// `Extra` marks values that only look like they belong to the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    Direct,
    Extra,
}

/// One value seen in one post.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub value: String,
    pub source: String,
}

#[derive(Debug, Default)]
pub struct Observations {
    lists: HashMap<(Category, Confidence), Vec<Observation>>,
}

impl Observations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        category: Category,
        confidence: Confidence,
        value: impl Into<String>,
        source: impl Into<String>,
    ) {
        self.lists
            .entry((category, confidence))
            .or_default()
            .push(Observation {
                value: value.into(),
                source: source.into(),
            });
    }

    pub fn get(&self, category: Category, confidence: Confidence) -> &[Observation] {
        self.lists
            .get(&(category, confidence))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns `true` if any direct observation of `category` has `value`.
    pub fn contains(&self, category: Category, value: &str) -> bool {
        self.get(category, Confidence::Direct)
            .iter()
            .any(|o| o.value == value)
    }

    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
