//! Synthetic profile sources.

use rand::prelude::*;
use rand::seq::SliceRandom;

use triage_contracts::profile::PatientProfile;
use triage_knowledge::KnowledgeBase;

/// Anything that can hand out profiles for a simulation run.
pub trait ProfileSource {
    fn next_profile(&mut self) -> PatientProfile;
}

/// Replays a fixed list of profiles, cycling when exhausted.
///
/// An empty list yields default profiles.
#[derive(Debug, Clone)]
pub struct FixedProfiles {
    profiles: Vec<PatientProfile>,
    cursor: usize,
}

impl FixedProfiles {
    pub fn new(profiles: Vec<PatientProfile>) -> Self {
        Self { profiles, cursor: 0 }
    }
}

impl ProfileSource for FixedProfiles {
    fn next_profile(&mut self) -> PatientProfile {
        if self.profiles.is_empty() {
            return PatientProfile::default();
        }
        let profile = self.profiles[self.cursor % self.profiles.len()].clone();
        self.cursor += 1;
        profile
    }
}

pub const MIN_AGE: u8 = 1;
pub const MAX_AGE: u8 = 90;
pub const MAX_CONDITIONS: usize = 2;

/// Draws age 1–90, pain 1–10 and up to two distinct knowledge-base conditions
/// over a template profile.
#[derive(Debug, Clone)]
pub struct RandomProfileGenerator {
    rng: StdRng,
    condition_names: Vec<String>,
    template: PatientProfile,
}

impl RandomProfileGenerator {
    /// `seed = None` draws from the OS entropy source.
    pub fn new(kb: &KnowledgeBase, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            condition_names: kb.condition_names().map(str::to_string).collect(),
            template: PatientProfile::default(),
        }
    }

    /// Fields not drawn (complaint, duration, symptoms, ...) come from `template`.
    pub fn with_template(mut self, template: PatientProfile) -> Self {
        self.template = template;
        self
    }
}

impl ProfileSource for RandomProfileGenerator {
    fn next_profile(&mut self) -> PatientProfile {
        let age = self.rng.random_range(MIN_AGE..=MAX_AGE);
        let pain = self.rng.random_range(1..=10u8);
        let count = self
            .rng
            .random_range(0..=MAX_CONDITIONS)
            .min(self.condition_names.len());

        let mut names = self.condition_names.clone();
        let (picked, _) = names.partial_shuffle(&mut self.rng, count);

        PatientProfile {
            age: Some(age),
            pain_level: Some(pain),
            medical_conditions: picked.to_vec(),
            ..self.template.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use triage_contracts::profile::PatientProfile;
    use triage_knowledge::KnowledgeBase;

    use super::{FixedProfiles, ProfileSource, RandomProfileGenerator};

    #[test]
    fn test_draws_stay_in_range() {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut generator = RandomProfileGenerator::new(&kb, Some(7));

        for _ in 0..500 {
            let p = generator.next_profile();
            let age = p.age.unwrap();
            let pain = p.pain_level.unwrap();
            assert!((1..=90).contains(&age));
            assert!((1..=10).contains(&pain));
            assert!(p.medical_conditions.len() <= 2);

            let distinct: HashSet<&String> = p.medical_conditions.iter().collect();
            assert_eq!(distinct.len(), p.medical_conditions.len());
            assert!(p.medical_conditions.iter().all(|c| kb.condition(c).is_some()));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut a = RandomProfileGenerator::new(&kb, Some(42));
        let mut b = RandomProfileGenerator::new(&kb, Some(42));
        for _ in 0..50 {
            assert_eq!(a.next_profile(), b.next_profile());
        }
    }

    #[test]
    fn test_template_fields_kept() {
        let kb = KnowledgeBase::builtin().unwrap();
        let mut generator = RandomProfileGenerator::new(&kb, Some(1))
            .with_template(PatientProfile::new("persistent cough"));
        assert_eq!(generator.next_profile().primary_complaint, "persistent cough");
    }

    #[test]
    fn test_fixed_profiles_cycle() {
        let mut source = FixedProfiles::new(vec![
            PatientProfile::new("a"),
            PatientProfile::new("b"),
        ]);
        let complaints: Vec<String> = (0..3)
            .map(|_| source.next_profile().primary_complaint)
            .collect();
        assert_eq!(complaints, vec!["a", "b", "a"]);
    }
}
