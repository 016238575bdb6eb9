use std::fmt;

use crate::entities::City;
use crate::error::{invalid_input_error, Error};

pub const INITIAL_MESSAGE: &str = "Plan your journey";
pub const SUBMIT_LABEL: &str = "Find Fastest Route";
pub const SUBMITTING_LABEL: &str = "Calculating...";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl From<&City> for SelectOption {
    fn from(city: &City) -> Self {
        Self {
            label: city.label(),
            value: city.id().to_string(),
        }
    }
}

/// A drop-down: the first option added is selected until told otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selector {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl Selector {
    pub fn add(&mut self, option: SelectOption) {
        self.options.push(option);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Value of the selected option, empty when there are no options.
    pub fn value(&self) -> &str {
        self.selected
            .and_then(|i| self.options.get(i))
            .map(|o| o.value.as_str())
            .unwrap_or("")
    }

    pub fn select(&mut self, value: &str) -> Result<(), Error> {
        let value = value.trim().to_lowercase();
        let index = self
            .options
            .iter()
            .position(|o| o.value == value)
            .ok_or_else(|| invalid_input_error(format!("Unknown city: {}", value)))?;

        self.selected = Some(index);
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubmitControl {
    pub disabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            disabled: false,
            label: SUBMIT_LABEL.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultsPanel {
    pub hidden: bool,
    pub time: String,
    pub distance: String,
    pub fuel: String,
    pub path: String,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self {
            hidden: true,
            time: String::new(),
            distance: String::new(),
            fuel: String::new(),
            path: String::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WarningsPanel {
    pub hidden: bool,
    pub items: Vec<String>,
}

impl Default for WarningsPanel {
    fn default() -> Self {
        Self {
            hidden: true,
            items: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub start: Selector,
    pub goal: Selector,
    /// Raw `datetime-local` input value.
    pub datetime: String,
    pub message: String,
    pub submit: SubmitControl,
    pub results: ResultsPanel,
    pub warnings: WarningsPanel,
}

impl Default for View {
    fn default() -> Self {
        Self {
            start: Selector::default(),
            goal: Selector::default(),
            datetime: String::new(),
            message: INITIAL_MESSAGE.into(),
            submit: SubmitControl::default(),
            results: ResultsPanel::default(),
            warnings: WarningsPanel::default(),
        }
    }
}

impl View {
    pub fn reset_results(&mut self) {
        self.message = INITIAL_MESSAGE.into();
        self.results.hidden = true;
        self.warnings.hidden = true;
        self.warnings.items.clear();
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;

        if !self.results.hidden {
            writeln!(f)?;
            writeln!(f, "  Time:     {}", self.results.time)?;
            writeln!(f, "  Distance: {}", self.results.distance)?;
            writeln!(f, "  Fuel:     {}", self.results.fuel)?;
            writeln!(f, "  Route:    {}", self.results.path)?;
        }

        if !self.warnings.hidden {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for item in &self.warnings.items {
                writeln!(f, "  ! {}", item)?;
            }
        }

        Ok(())
    }
}

#[test]
fn first_option_is_selected_by_default() {
    let mut selector = Selector::default();
    assert_eq!(selector.value(), "");

    selector.add((&City::new("colombo")).into());
    selector.add((&City::new("kandy")).into());

    assert_eq!(selector.value(), "colombo");
}

#[test]
fn select_by_value() {
    let mut selector = Selector::default();
    selector.add((&City::new("colombo")).into());
    selector.add((&City::new("kandy")).into());

    selector.select("Kandy").unwrap();
    assert_eq!(selector.value(), "kandy");

    let err = selector.select("atlantis").unwrap_err();
    assert_eq!(err.message, "Unknown city: atlantis");
    assert_eq!(selector.value(), "kandy");
}

#[test]
fn hidden_panels_are_not_printed() {
    let view = View::default();

    assert_eq!(view.to_string(), "Plan your journey\n");
}

#[test]
fn shown_panels_are_printed() {
    let mut view = View::default();
    view.message = "No festival event detected.".into();
    view.results = ResultsPanel {
        hidden: false,
        time: "1h 30m".into(),
        distance: "115 km".into(),
        fuel: "LKR 3593.75".into(),
        path: "Colombo → Kandy".into(),
    };
    view.warnings = WarningsPanel {
        hidden: false,
        items: vec!["Warning: Road closures expected in Kandy.".into()],
    };

    let text = view.to_string();
    assert!(text.starts_with("No festival event detected.\n"));
    assert!(text.contains("  Time:     1h 30m\n"));
    assert!(text.contains("  Route:    Colombo → Kandy\n"));
    assert!(text.ends_with("Warnings:\n  ! Warning: Road closures expected in Kandy.\n"));
}
