use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "OK" }
    }
}

/// Payload served at the service root.
#[derive(Serialize, Deserialize, Debug)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub paths: String,
}

impl ServiceInfo {
    pub fn new(version: &str) -> Self {
        Self {
            name: "Account REST API Service".to_string(),
            version: version.to_string(),
            paths: "/accounts".to_string(),
        }
    }
}
