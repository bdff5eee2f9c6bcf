use crate::scene::ObjectIndex;

/// Formats the selection label and move-button caption for one object noun.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    noun: String,
}

impl Labels {
    pub fn new(noun: impl Into<String>) -> Self {
        Self { noun: noun.into() }
    }

    pub fn noun(&self) -> &str {
        &self.noun
    }

    pub fn modifying(&self, index: ObjectIndex) -> String {
        format!("Modifying {} - {}", self.noun, index)
    }

    pub fn moving(&self, index: ObjectIndex) -> String {
        format!("Moving {} - {}", self.noun, index)
    }

    pub fn move_button(&self, index: ObjectIndex) -> String {
        format!("Move {}-{}", self.noun, index)
    }
}
