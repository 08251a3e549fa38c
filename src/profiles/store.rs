//! Profile lookup.

use std::collections::HashMap;

use sceneseek_common::{Error, ProfileId, Result};

use super::Profile;

/// Resolves profiles by id.
///
/// Persistence lives outside this crate; implementations only need to answer
/// lookups and must be shareable across tasks.
pub trait ProfileStore: Send + Sync {
    /// Fetch a profile, failing with [`Error::NotFound`] when the id is unknown.
    fn get(&self, id: ProfileId) -> Result<Profile>;
}

/// A [`ProfileStore`] backed by a map, populated from configuration.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileStore {
    profiles: HashMap<ProfileId, Profile>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile.
    pub fn insert(&mut self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<Profile> for InMemoryProfileStore {
    fn from_iter<I: IntoIterator<Item = Profile>>(iter: I) -> Self {
        let mut store = Self::new();
        for profile in iter {
            store.insert(profile);
        }
        store
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn get(&self, id: ProfileId) -> Result<Profile> {
        self.profiles
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::not_found("profile", id))
    }
}
