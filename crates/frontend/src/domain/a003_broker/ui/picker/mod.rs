use contracts::domain::a003_broker::Broker;

use crate::shared::multi_select::SelectOption;

impl SelectOption for Broker {
    type Key = String;

    fn option_key(&self) -> String {
        self.id.clone()
    }

    fn option_label(&self) -> String {
        match &self.email {
            Some(email) if !email.is_empty() => format!("{} <{}>", self.name, email),
            _ => self.name.clone(),
        }
    }
}
