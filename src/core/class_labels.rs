use std::collections::HashMap;

/// Dense id of a class label, assigned in first-seen order.
pub type ClassId = usize;

/// Interning table for class labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLabels {
    values: Vec<String>,
    label_to_index: HashMap<String, ClassId>,
}

impl ClassLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut labels = Self::new();
        for v in values {
            labels.intern(v.as_ref());
        }
        labels
    }

    /// Returns the id of `label`, registering it first if it is new.
    pub fn intern(&mut self, label: &str) -> ClassId {
        if let Some(&id) = self.label_to_index.get(label) {
            return id;
        }
        let id = self.values.len();
        self.values.push(label.to_string());
        self.label_to_index.insert(label.to_string(), id);
        id
    }

    pub fn index_of(&self, label: &str) -> Option<ClassId> {
        self.label_to_index.get(label).copied()
    }

    pub fn label(&self, id: ClassId) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn enumerate_values(&self) -> impl Iterator<Item = (ClassId, &str)> {
        self.values.iter().map(String::as_str).enumerate()
    }
}
