use std::fmt;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub id: String,
    pub name: String,
}

impl Client {
    pub fn new(name: &str) -> Client {
        Client::with_id(&Uuid::new_v4().to_string(), name)
    }

    pub fn with_id(id: &str, name: &str) -> Client {
        Client {
            id: id.to_string(),
            name: name.trim().to_string(),
        }
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
