use rok_leaderboard::{Snapshot, Store};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Current store snapshot; the calling component re-renders on every
/// [`Store::set`] that changes it.
#[hook]
pub fn use_snapshot(store: &Store) -> Snapshot {
    let snapshot = use_state_eq(|| store.get());

    {
        let snapshot = snapshot.clone();
        use_effect_with(store.clone(), move |store| {
            // Pick up anything written between render and subscription.
            snapshot.set(store.get());
            let subscription = store.subscribe(move |next| snapshot.set(next.clone()));
            move || subscription.unsubscribe()
        });
    }

    (*snapshot).clone()
}

/// Field check returning a user-facing message for bad input.
pub type Validator = fn(&str) -> Option<String>;

/// Error state and blur handler for a field checked when it loses focus.
#[derive(Clone)]
pub struct FieldCheck {
    /// Message from the last failed check, if any.
    pub error: Option<String>,
    /// Attach to the input's `onblur`.
    pub on_blur: Callback<FocusEvent>,
    /// Re-run the check against a value, e.g. from `onchange`.
    pub check: Callback<String>,
}

/// Custom hook running `validate` on the field text when it loses focus.
#[hook]
pub fn use_field_check(validate: Validator) -> FieldCheck {
    let error_state_handle: UseStateHandle<Option<String>> = use_state_eq(|| None::<String>);

    let check = {
        let error_setter = error_state_handle.clone();
        Callback::from(move |text: String| error_setter.set(validate(&text)))
    };

    let on_blur = check.reform(|e: FocusEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    FieldCheck {
        error: (*error_state_handle).clone(),
        on_blur,
        check,
    }
}
