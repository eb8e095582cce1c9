//! Explicit selection model
//!
//! A user interaction is a pure function
//! `(dataset, current selection, event) → new selection`. Nothing is stored
//! between calls; callers hold the `Selection` value and pass it back in.
//!
//! After every event the selection is reconciled against the data: the state
//! must be one of the month's top states and the place one of the scope's
//! places, otherwise the first available option is taken.

use serde::{Deserialize, Serialize};

use crate::analytics::{places_in_scope, top_states};
use crate::budget::validate_trip;
use crate::data::TourismData;
use crate::error::{Result, TourismError};
use crate::utils::calendar::Month;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub user: Option<UserProfile>,
    pub month: Month,
    pub state: Option<String>,
    pub place: Option<String>,
    pub show_places_graph: bool,
    pub show_places_explore: bool,
    pub travelers: u32,
    pub days: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            user: None,
            month: Month::January,
            state: None,
            place: None,
            show_places_graph: false,
            show_places_explore: false,
            travelers: 2,
            days: 3,
        }
    }
}

impl Selection {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    SignIn { name: String, email: String },
    SignOut,
    SelectMonth { month: Month },
    SelectState { state: String },
    SelectPlace { place: String },
    ShowPlacesGraph,
    TogglePlacesExplore,
    SetTravelers { travelers: u32 },
    SetDays { days: u32 },
}

/// States offered for `month`: its top states by mean visitors
pub fn state_options(data: &TourismData, month: Month, top_k: usize) -> Vec<String> {
    top_states(data.for_month(month), top_k)
        .into_iter()
        .map(|s| s.state)
        .collect()
}

/// Places offered for a month and state, in first-appearance order
pub fn place_options(data: &TourismData, month: Month, state: &str) -> Vec<String> {
    places_in_scope(data.scope(month, state))
}

/// Apply one event and return the reconciled selection
///
/// # Errors
/// - `InvalidSignIn` when name or email is blank
/// - `InvalidTripParameters` when travelers or days would drop to zero
pub fn apply_event(
    data: &TourismData,
    current: &Selection,
    event: SelectionEvent,
    top_k_states: usize,
) -> Result<Selection> {
    let mut next = current.clone();

    match event {
        SelectionEvent::SignIn { name, email } => {
            let (name, email) = (name.trim(), email.trim());
            if name.is_empty() || email.is_empty() {
                return Err(TourismError::InvalidSignIn);
            }
            tracing::info!(user = name, "Signed in");
            next.user = Some(UserProfile {
                name: name.to_string(),
                email: email.to_string(),
            });
        }
        SelectionEvent::SignOut => next = Selection::default(),
        SelectionEvent::SelectMonth { month } => next.month = month,
        SelectionEvent::SelectState { state } => next.state = Some(state),
        SelectionEvent::SelectPlace { place } => next.place = Some(place),
        SelectionEvent::ShowPlacesGraph => next.show_places_graph = true,
        SelectionEvent::TogglePlacesExplore => next.show_places_explore = !next.show_places_explore,
        SelectionEvent::SetTravelers { travelers } => {
            validate_trip(travelers, next.days)?;
            next.travelers = travelers;
        }
        SelectionEvent::SetDays { days } => {
            validate_trip(next.travelers, days)?;
            next.days = days;
        }
    }

    Ok(reconcile(data, next, top_k_states))
}

/// Snap state and place onto the options the data offers
pub fn reconcile(data: &TourismData, mut selection: Selection, top_k_states: usize) -> Selection {
    let states = state_options(data, selection.month, top_k_states);
    selection.state = pick(selection.state.take(), &states);

    let places = match selection.state.as_deref() {
        Some(state) => place_options(data, selection.month, state),
        None => Vec::new(),
    };
    selection.place = pick(selection.place.take(), &places);

    selection
}

fn pick(current: Option<String>, options: &[String]) -> Option<String> {
    match current {
        Some(value) if options.contains(&value) => Some(value),
        Some(value) => {
            tracing::debug!(value = %value, "Selection not available; using first option");
            options.first().cloned()
        }
        None => options.first().cloned(),
    }
}
