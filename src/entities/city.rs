use serde::{Deserialize, Serialize};

use crate::format::capitalize;

/// A city as offered by the routing service: a lowercase identifier token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City(pub String);

impl City {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }

    pub fn label(&self) -> String {
        capitalize(&self.0)
    }
}

#[test]
fn city_label_is_capitalized() {
    let city = City::new("colombo");

    assert_eq!(city.id(), "colombo");
    assert_eq!(city.label(), "Colombo");
}

#[test]
fn city_list_deserializes_from_plain_strings() {
    let cities: Vec<City> = serde_json::from_str(r#"["galle", "kandy"]"#).unwrap();

    assert_eq!(cities, vec![City::new("galle"), City::new("kandy")]);
}
