use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The user's allergens, in the order they were entered.
///
/// Names are trimmed and de-duplicated case-insensitively; the first spelling wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AllergenProfile {
    allergens: IndexSet<String>,
    keys: IndexSet<String>,
}

impl AllergenProfile {
    pub fn new<I, S>(allergens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut profile = Self::default();
        for allergen in allergens {
            profile.insert(allergen.as_ref());
        }
        profile
    }

    fn insert(&mut self, allergen: &str) {
        let trimmed = allergen.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.keys.insert(trimmed.to_lowercase()) {
            self.allergens.insert(trimmed.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.allergens.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.allergens.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.allergens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allergens.is_empty()
    }
}

impl From<Vec<String>> for AllergenProfile {
    fn from(allergens: Vec<String>) -> Self {
        Self::new(allergens)
    }
}

impl From<AllergenProfile> for Vec<String> {
    fn from(profile: AllergenProfile) -> Self {
        profile.allergens.into_iter().collect()
    }
}
