use serde::{Deserialize, Serialize};

/// Names of the editable suggestion lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsList {
    Registrars,
    Categories,
    EvaluationTools,
}

impl SettingsList {
    pub const ALL: [Self; 3] = [Self::Registrars, Self::Categories, Self::EvaluationTools];

    /// Resolves the wire name of a list. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "registrars" => Some(Self::Registrars),
            "categories" => Some(Self::Categories),
            "evaluationTools" => Some(Self::EvaluationTools),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registrars => "registrars",
            Self::Categories => "categories",
            Self::EvaluationTools => "evaluationTools",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Registrars => "Registrars",
            Self::Categories => "Categories",
            Self::EvaluationTools => "Evaluation tools",
        }
    }
}

/// Suggestion lists shown in forms. Values are never validated against these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsCatalog {
    pub registrars: Vec<String>,
    pub categories: Vec<String>,
    pub evaluation_tools: Vec<String>,
}

impl SettingsCatalog {
    pub fn list(&self, kind: SettingsList) -> &[String] {
        match kind {
            SettingsList::Registrars => &self.registrars,
            SettingsList::Categories => &self.categories,
            SettingsList::EvaluationTools => &self.evaluation_tools,
        }
    }

    fn list_mut(&mut self, kind: SettingsList) -> &mut Vec<String> {
        match kind {
            SettingsList::Registrars => &mut self.registrars,
            SettingsList::Categories => &mut self.categories,
            SettingsList::EvaluationTools => &mut self.evaluation_tools,
        }
    }

    /// Appends `value` unless it is already present (case-sensitive).
    /// Returns whether the list changed.
    pub fn add(&mut self, kind: SettingsList, value: &str) -> bool {
        let list = self.list_mut(kind);
        if list.iter().any(|existing| existing == value) {
            return false;
        }
        list.push(value.to_string());
        true
    }

    /// Removes every occurrence of `value`, returning how many were dropped.
    pub fn remove(&mut self, kind: SettingsList, value: &str) -> usize {
        let list = self.list_mut(kind);
        let before = list.len();
        list.retain(|existing| existing != value);
        before - list.len()
    }
}
