use super::view::SelectOption;
use super::Page;

use crate::error::Error;

pub const CITY_LOAD_ERROR: &str = "Error: Could not load city data from server.";

impl Page {
    /// Fills both city selectors from the routing service. On failure the
    /// selectors are left untouched and the page message reports it.
    #[tracing::instrument(skip(self))]
    pub async fn populate_cities(&mut self) -> Result<usize, Error> {
        let cities = match self.api.list_cities().await {
            Ok(cities) => cities,
            Err(err) => {
                tracing::error!("failed to load cities: {}", err);
                self.view.message = CITY_LOAD_ERROR.into();
                return Err(err);
            }
        };

        for city in &cities {
            let option = SelectOption::from(city);
            self.view.start.add(option.clone());
            self.view.goal.add(option);
        }

        Ok(cities.len())
    }
}

#[test]
fn every_city_lands_in_both_selectors() {
    use super::fake::FakeAPI;
    use crate::entities::City;
    use tokio_test::block_on;

    let api = FakeAPI::with_cities(vec![
        City::new("colombo"),
        City::new("kandy"),
        City::new("galle"),
    ]);
    let mut page = Page::new(api.into_dyn());

    assert_eq!(block_on(page.populate_cities()).unwrap(), 3);

    for selector in [&page.view().start, &page.view().goal] {
        let options: Vec<(&str, &str)> = selector
            .options()
            .iter()
            .map(|o| (o.label.as_str(), o.value.as_str()))
            .collect();
        assert_eq!(
            options,
            vec![("Colombo", "colombo"), ("Kandy", "kandy"), ("Galle", "galle")]
        );
        assert_eq!(selector.value(), "colombo");
    }
    assert_eq!(page.view().message, "Plan your journey");
}

#[test]
fn load_failure_leaves_selectors_empty() {
    use super::fake::FakeAPI;
    use crate::error::upstream_error;
    use tokio_test::block_on;

    let api = FakeAPI::failing_cities(upstream_error(500));
    let mut page = Page::new(api.into_dyn());

    assert!(block_on(page.populate_cities()).is_err());

    assert!(page.view().start.is_empty());
    assert!(page.view().goal.is_empty());
    assert_eq!(
        page.view().message,
        "Error: Could not load city data from server."
    );
}
