use branch_pulse::prelude::*;
use std::sync::Mutex;

/// Mock ProjectRegistry keeping references in insertion order
#[derive(Default)]
pub struct MockProjectRegistry {
    references: Mutex<Vec<ProjectReference>>,
}

impl MockProjectRegistry {
    pub fn with_projects(projects: &[(&str, &[&str])]) -> Self {
        let references = projects
            .iter()
            .map(|(name, branches)| {
                ProjectReference::parse(name, branches.iter().map(|b| b.to_string()).collect())
                    .unwrap()
            })
            .collect();
        Self {
            references: Mutex::new(references),
        }
    }
}

impl ProjectRegistry for MockProjectRegistry {
    fn list(&self) -> Result<Vec<ProjectReference>> {
        Ok(self.references.lock().unwrap().clone())
    }

    fn add(&self, reference: &ProjectReference) -> Result<()> {
        let mut references = self.references.lock().unwrap();
        match references
            .iter_mut()
            .find(|r| r.identifier() == reference.identifier())
        {
            Some(existing) => *existing = reference.clone(),
            None => references.push(reference.clone()),
        }
        Ok(())
    }

    fn remove(&self, identifier: &ProjectIdentifier) -> Result<bool> {
        let mut references = self.references.lock().unwrap();
        let before = references.len();
        references.retain(|r| r.identifier() != identifier);
        Ok(references.len() != before)
    }
}
