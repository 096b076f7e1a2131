use once_cell::sync::Lazy;
use regex::Regex;

use super::{AttributeLoader, Chunk};
use crate::analyzers::observations::{Category, Confidence, Observations};

static PARTNER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmy (wife|husband|girlfriend|boyfriend|fianc[eé]e?|partner|spouse)\b")
        .unwrap()
});

static FAMILY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\bmy (mom|mother|dad|father|sister|brother|son|daughter|grandma|grandmother|grandpa|grandfather|aunt|uncle|cousin|kids|children|parents)\b",
    )
    .unwrap()
});

static PET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmy (dog|cat|puppy|kitten|parrot|hamster|rabbit|horse|snake|turtle)s?\b")
        .unwrap()
});

static GENDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi(?: am|'m) an? (man|woman|guy|girl|dude|gal|male|female)\b").unwrap()
});

static ORIENTATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi(?: am|'m) (gay|straight|bisexual|bi|lesbian|asexual)\b").unwrap()
});

static LIVED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi (?:live|lived|am living) in ([a-z][a-z .'-]*?)(?:,| and | but |$)")
        .unwrap()
});

static GREW_UP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi grew up in ([a-z][a-z .'-]*?)(?:,| and | but |$)").unwrap()
});

static FAVORITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bmy fav(?:ou?rite)? [a-z]+ (?:is|was) ([a-z0-9][a-z0-9 '-]*?)(?:,| and | but |$)")
        .unwrap()
});

static MY_THING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmy ([a-z0-9]+)\b").unwrap());

static OWNED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi (?:have|own|bought|got) (?:a|an|my|two|three) ([a-z0-9]+)\b").unwrap()
});

static SELF_DESCRIPTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bi(?: am|'m) (?:a |an )?([a-z]+)\b").unwrap());

static GADGETS: &[&str] = &[
    "switch", "iphone", "ipad", "phone", "laptop", "computer", "pc", "mac", "macbook", "ps4",
    "ps5", "xbox", "kindle", "tv", "camera", "guitar", "car", "truck", "bike", "motorcycle",
    "house", "apartment", "console",
];

static KNOWN_ATTRIBUTES: &[&str] = &[
    "student", "teacher", "engineer", "programmer", "developer", "nurse", "doctor", "lawyer",
    "vegetarian", "vegan", "veteran", "parent", "tall", "short", "introvert", "extrovert",
    "atheist", "christian", "muslim", "musician", "artist", "writer",
];

static NOT_ATTRIBUTES: &[&str] = &[
    "not", "so", "sure", "going", "just", "still", "really", "very", "the", "in", "at", "on",
    "here", "glad", "sorry", "afraid",
];

/// Regex-and-dictionary [`AttributeLoader`].
#[derive(Debug, Default)]
pub struct HeuristicAttributeLoader;

impl HeuristicAttributeLoader {
    pub fn new() -> Self {
        Self
    }

    // Capitalized places are likely proper nouns.
    fn place(obs: &mut Observations, category: Category, raw: &str, source: &str) {
        let place = raw.trim().trim_end_matches('.');
        if place.is_empty() {
            return;
        }
        let confidence = if place.starts_with(|c: char| c.is_uppercase()) {
            Confidence::Direct
        } else {
            Confidence::Extra
        };
        obs.push(category, confidence, place.to_lowercase(), source);
    }
}

fn normalize_gender(word: &str) -> &'static str {
    match word {
        "man" | "guy" | "dude" | "male" => "male",
        _ => "female",
    }
}

impl AttributeLoader for HeuristicAttributeLoader {
    fn load(&self, obs: &mut Observations, chunk: &Chunk, source: &str) {
        let text = chunk.text.as_str();
        let mut claimed: Vec<String> = Vec::new();

        for caps in PARTNER.captures_iter(text) {
            let partner = caps[1].to_lowercase().replace('é', "e");
            claimed.push(partner.clone());
            obs.push(Category::RelationshipPartner, Confidence::Direct, partner, source);
        }

        for caps in FAMILY.captures_iter(text) {
            let member = caps[1].to_lowercase();
            claimed.push(member.clone());
            obs.push(Category::FamilyMembers, Confidence::Direct, member, source);
        }

        for caps in PET.captures_iter(text) {
            let pet = caps[1].to_lowercase();
            claimed.push(pet.clone());
            obs.push(Category::Pets, Confidence::Direct, pet, source);
        }

        if let Some(caps) = GENDER.captures(text) {
            let word = caps[1].to_lowercase();
            claimed.push(word.clone());
            obs.push(Category::Gender, Confidence::Direct, normalize_gender(&word), source);
        }

        if let Some(caps) = ORIENTATION.captures(text) {
            let word = caps[1].to_lowercase();
            claimed.push(word.clone());
            let orientation = if word == "bi" { "bisexual".to_string() } else { word };
            obs.push(Category::Orientation, Confidence::Direct, orientation, source);
        }

        if let Some(caps) = LIVED.captures(text) {
            Self::place(obs, Category::PlacesLived, &caps[1], source);
        }

        if let Some(caps) = GREW_UP.captures(text) {
            Self::place(obs, Category::PlacesGrewUp, &caps[1], source);
        }

        if let Some(caps) = FAVORITE.captures(text) {
            obs.push(
                Category::Favorites,
                Confidence::Direct,
                caps[1].trim().to_lowercase(),
                source,
            );
        }

        for caps in MY_THING.captures_iter(text) {
            let thing = caps[1].to_lowercase();
            if GADGETS.contains(&thing.as_str()) {
                claimed.push(thing.clone());
                obs.push(Category::Possessions, Confidence::Direct, thing, source);
            }
        }

        for caps in OWNED.captures_iter(text) {
            let thing = caps[1].to_lowercase();
            if !claimed.contains(&thing) {
                obs.push(Category::Possessions, Confidence::Extra, thing, source);
            }
        }

        if let Some(caps) = SELF_DESCRIPTION.captures(text) {
            let word = caps[1].to_lowercase();
            if !claimed.contains(&word) && !NOT_ATTRIBUTES.contains(&word.as_str()) {
                let confidence = if KNOWN_ATTRIBUTES.contains(&word.as_str()) {
                    Confidence::Direct
                } else {
                    Confidence::Extra
                };
                obs.push(Category::Attributes, confidence, word, source);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(text: &str) -> Observations {
        let mut obs = Observations::new();
        HeuristicAttributeLoader::new().load(
            &mut obs,
            &Chunk {
                text: text.to_string(),
            },
            "src",
        );
        obs
    }

    fn values(obs: &Observations, category: Category, confidence: Confidence) -> Vec<String> {
        obs.get(category, confidence)
            .iter()
            .map(|o| o.value.clone())
            .collect()
    }

    #[test]
    fn test_possession_from_my_gadget() {
        let obs = load("I love my Switch");

        assert_eq!(
            values(&obs, Category::Possessions, Confidence::Direct),
            vec!["switch"]
        );
        assert_eq!(obs.get(Category::Possessions, Confidence::Direct)[0].source, "src");
    }

    #[test]
    fn test_partner_and_family() {
        let obs = load("My wife and my daughter went out");

        assert_eq!(
            values(&obs, Category::RelationshipPartner, Confidence::Direct),
            vec!["wife"]
        );
        assert_eq!(
            values(&obs, Category::FamilyMembers, Confidence::Direct),
            vec!["daughter"]
        );
    }

    #[test]
    fn test_gender_and_orientation() {
        let obs = load("I'm a guy");
        assert_eq!(values(&obs, Category::Gender, Confidence::Direct), vec!["male"]);

        let obs = load("I am bi");
        assert_eq!(
            values(&obs, Category::Orientation, Confidence::Direct),
            vec!["bisexual"]
        );
        assert!(obs.get(Category::Attributes, Confidence::Extra).is_empty());
    }

    #[test]
    fn test_places_split_by_capitalization() {
        let obs = load("I live in Seattle, it rains");
        assert_eq!(
            values(&obs, Category::PlacesLived, Confidence::Direct),
            vec!["seattle"]
        );

        let obs = load("I grew up in the woods");
        assert_eq!(
            values(&obs, Category::PlacesGrewUp, Confidence::Extra),
            vec!["the woods"]
        );
    }

    #[test]
    fn test_pets_and_self_description() {
        let obs = load("I am a nurse and my dogs are loud");

        assert_eq!(values(&obs, Category::Pets, Confidence::Direct), vec!["dog"]);
        assert_eq!(
            values(&obs, Category::Attributes, Confidence::Direct),
            vec!["nurse"]
        );
    }

    #[test]
    fn test_owned_things_are_low_confidence() {
        let obs = load("I bought a boat");

        assert_eq!(
            values(&obs, Category::Possessions, Confidence::Extra),
            vec!["boat"]
        );
    }
}
