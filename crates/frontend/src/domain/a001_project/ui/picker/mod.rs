use contracts::domain::a001_project::Project;

use crate::shared::multi_select::SelectOption;

impl SelectOption for Project {
    type Key = String;

    fn option_key(&self) -> String {
        self.id.clone()
    }

    fn option_label(&self) -> String {
        match &self.location {
            Some(location) if !location.is_empty() => format!("{} ({})", self.name, location),
            _ => self.name.clone(),
        }
    }
}
