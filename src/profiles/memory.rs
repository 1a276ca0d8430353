use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::dto::{DiabeticInput, ProfileInput};
use super::repo::ProfileStore;
use super::repo_types::{DiabeticProfile, UserProfile};

#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<Vec<UserProfile>>,
    diabetic: Mutex<Vec<DiabeticProfile>>,
}

fn profile_from(id: Uuid, user_id: Uuid, input: &ProfileInput) -> UserProfile {
    UserProfile {
        id,
        user_id,
        name: input.name.clone(),
        age: input.age,
        mobile_number: input.mobile_number.clone(),
        gender: input.gender,
        height_cm: input.height_cm,
        weight_kg: input.weight_kg,
        activity_level: input.activity_level,
        goal: input.goal,
        diet_type: input.diet_type,
        health_conditions: input.health_conditions.clone(),
    }
}

fn diabetic_from(id: Uuid, user_profile_id: Uuid, input: &DiabeticInput) -> DiabeticProfile {
    DiabeticProfile {
        id,
        user_profile_id,
        hba1c: input.hba1c,
        fasting_blood_sugar: input.fasting_blood_sugar,
        insulin_dependent: input.insulin_dependent,
        medications: input.medications.clone(),
        diagnosis_date: input.diagnosis_date,
    }
}

impl InMemoryProfileStore {
    /// Shared with the in-memory user store so signup lands here too.
    pub fn insert(&self, user_id: Uuid, input: &ProfileInput) -> Option<UserProfile> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.user_id == user_id) {
            return None;
        }
        let profile = profile_from(Uuid::new_v4(), user_id, input);
        profiles.push(profile.clone());
        Some(profile)
    }

    fn profile_id(&self, user_id: Uuid) -> Option<Uuid> {
        let profiles = self.profiles.lock().unwrap();
        profiles.iter().find(|p| p.user_id == user_id).map(|p| p.id)
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn create_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>> {
        Ok(self.insert(user_id, input))
    }

    async fn get_profile(&self, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        input: &ProfileInput,
    ) -> anyhow::Result<Option<UserProfile>> {
        let mut profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter_mut()
            .find(|p| p.user_id == user_id)
            .map(|p| {
                *p = profile_from(p.id, user_id, input);
                p.clone()
            }))
    }

    async fn delete_profile(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let Some(profile_id) = self.profile_id(user_id) else {
            return Ok(false);
        };
        self.profiles.lock().unwrap().retain(|p| p.id != profile_id);
        self.diabetic
            .lock()
            .unwrap()
            .retain(|d| d.user_profile_id != profile_id);
        Ok(true)
    }

    async fn create_diabetic(
        &self,
        profile_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>> {
        let mut diabetic = self.diabetic.lock().unwrap();
        if diabetic.iter().any(|d| d.user_profile_id == profile_id) {
            return Ok(None);
        }
        let created = diabetic_from(Uuid::new_v4(), profile_id, input);
        diabetic.push(created.clone());
        Ok(Some(created))
    }

    async fn get_diabetic(&self, user_id: Uuid) -> anyhow::Result<Option<DiabeticProfile>> {
        let Some(profile_id) = self.profile_id(user_id) else {
            return Ok(None);
        };
        let diabetic = self.diabetic.lock().unwrap();
        Ok(diabetic
            .iter()
            .find(|d| d.user_profile_id == profile_id)
            .cloned())
    }

    async fn update_diabetic(
        &self,
        user_id: Uuid,
        input: &DiabeticInput,
    ) -> anyhow::Result<Option<DiabeticProfile>> {
        let Some(profile_id) = self.profile_id(user_id) else {
            return Ok(None);
        };
        let mut diabetic = self.diabetic.lock().unwrap();
        Ok(diabetic
            .iter_mut()
            .find(|d| d.user_profile_id == profile_id)
            .map(|d| {
                *d = diabetic_from(d.id, profile_id, input);
                d.clone()
            }))
    }

    async fn delete_diabetic(&self, user_id: Uuid) -> anyhow::Result<bool> {
        let Some(profile_id) = self.profile_id(user_id) else {
            return Ok(false);
        };
        let mut diabetic = self.diabetic.lock().unwrap();
        let before = diabetic.len();
        diabetic.retain(|d| d.user_profile_id != profile_id);
        Ok(diabetic.len() < before)
    }
}
