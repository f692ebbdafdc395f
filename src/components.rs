//! Yew view components for the leaderboard dashboard.
//!
//! Every component derives its markup from a view description in
//! `rok_leaderboard::view` and writes user input back into the shared
//! [`Store`]. Text is always inserted as text nodes, so names and alliance
//! tags coming from the API are escaped by construction.

use crate::hooks::{use_field_check, use_snapshot};
use rok_leaderboard::config::{DEFAULT_KINGDOM, LIMIT_STEP, MAX_LIMIT, MIN_LIMIT, VERIFIED_KINGDOM};
use rok_leaderboard::validation::{
    clamp_limit, date_input_error, date_patch, kingdom_input_error, normalize_kingdom,
    parse_limit,
};
use rok_leaderboard::view::{
    date_field, kingdom_field, limit_field, metric_options, results_view, ResultsView, RowView,
};
use rok_leaderboard::{Metric, SnapshotPatch, Status, Store};
use log::debug;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Props for components bound to the dashboard store.
#[derive(Properties, PartialEq)]
pub struct StoreProps {
    pub store: Store,
}

/// Renders the results panel for a view description.
pub fn render_results(view: &ResultsView) -> Html {
    match view {
        ResultsView::Idle => html! {
            <div class="empty-state">
                <p>{ "Choose a kingdom and metric, then load the leaderboard." }</p>
            </div>
        },
        ResultsView::Loading => html! {
            <div class="loading-state">
                <div class="spinner"></div>
                <p>{ "Loading leaderboard..." }</p>
            </div>
        },
        ResultsView::Error { message } => html! {
            <div class="error-state">
                <h3>{ "Error Loading Leaderboard" }</h3>
                <p>{ message.clone() }</p>
                <p>{ "Please check your parameters and try again." }</p>
            </div>
        },
        ResultsView::Empty => html! {
            <div class="empty-state">
                <p>{ "No data available for this query." }</p>
            </div>
        },
        ResultsView::Table(table) => html! {
            <div class="leaderboard">
                <div class="leaderboard-header">
                    <h2>{ table.title.clone() }</h2>
                    <p class="metadata">{ table.metadata.clone() }</p>
                </div>
                <table class="leaderboard-table">
                    <thead>
                        <tr>
                            <th class="rank">{ "#" }</th>
                            <th class="id">{ "ID" }</th>
                            <th class="name">{ "Name" }</th>
                            <th class="alliance">{ "Alliance" }</th>
                            <th class="value">{ table.value_header.clone() }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { table.rows.iter().map(render_row).collect::<Html>() }
                    </tbody>
                </table>
            </div>
        },
    }
}

/// Renders a single ranked row
fn render_row(row: &RowView) -> Html {
    html! {
        <tr class={classes!(row.rank_class)}>
            <td class="rank">{ row.rank }</td>
            <td class="id">{ row.id.clone() }</td>
            <td class="name">{ row.name.clone() }</td>
            <td class="alliance">{ row.alliance.clone() }</td>
            <td class="value">{ row.value.clone() }</td>
        </tr>
    }
}

/// Results table, re-rendered on every store update.
#[function_component(LeaderboardTable)]
pub fn leaderboard_table(props: &StoreProps) -> Html {
    let snapshot = use_snapshot(&props.store);
    render_results(&results_view(&snapshot))
}

/// Kingdom id input with an unverified-kingdom warning and blur validation.
#[function_component(KingdomSelector)]
pub fn kingdom_selector(props: &StoreProps) -> Html {
    let snapshot = use_snapshot(&props.store);
    let field = kingdom_field(&snapshot);
    let check = use_field_check(kingdom_input_error);

    let oninput = {
        let store = props.store.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            store.set(SnapshotPatch::new().kingdom(normalize_kingdom(&input.value())));
        })
    };

    html! {
        <div class="control-group">
            <label for="kingdom-input">{ "Kingdom:" }</label>
            <input
                type="text"
                id="kingdom-input"
                placeholder="Enter kingdom ID"
                value={field.value}
                pattern="[0-9]{1,6}"
                title="Kingdom ID must be 1-6 digits"
                class={classes!(check.error.is_some().then_some("invalid"))}
                {oninput}
                onblur={check.on_blur.clone()}
            />
            <span class="help-text">{ format!("Default: {}", DEFAULT_KINGDOM) }</span>
            if field.show_unverified_warning {
                <span class="kingdom-warning">
                    { format!("\u{26a0}\u{fe0f} Warning: Only Kingdom {} has verified data", VERIFIED_KINGDOM) }
                </span>
            }
            if let Some(ref error) = check.error {
                <div class="input-error">{ error }</div>
            }
        </div>
    }
}

/// Drop-down of the four ranking metrics.
#[function_component(MetricSelector)]
pub fn metric_selector(props: &StoreProps) -> Html {
    let snapshot = use_snapshot(&props.store);

    let onchange = {
        let store = props.store.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match select.value().parse::<Metric>() {
                Ok(metric) => store.set(SnapshotPatch::new().metric(metric)),
                Err(err) => debug!("Ignoring metric selection: {}", err),
            }
        })
    };

    html! {
        <div class="control-group">
            <label for="metric-select">{ "Metric:" }</label>
            <select id="metric-select" {onchange}>
                { metric_options(&snapshot).into_iter().map(|option| html! {
                    <option value={option.metric.as_str()} selected={option.selected}>
                        { option.metric.label() }
                    </option>
                }).collect::<Html>() }
            </select>
        </div>
    }
}

/// Date input with a "Use Latest" toggle.
///
/// The last typed date is remembered locally so that unchecking "Use Latest"
/// restores it.
#[function_component(DateSelector)]
pub fn date_selector(props: &StoreProps) -> Html {
    let snapshot = use_snapshot(&props.store);
    let field = date_field(&snapshot);
    let draft = use_state(|| field.value.clone());
    let check = use_field_check(date_input_error);
    let date_ref = use_node_ref();

    let on_date_change = {
        let store = props.store.clone();
        let draft = draft.clone();
        let check = check.check.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            check.emit(value.clone());
            if !store.get().use_latest {
                store.set(SnapshotPatch::new().dt(value.trim()));
            }
            draft.set(value);
        })
    };

    let on_toggle = {
        let store = props.store.clone();
        let draft = draft.clone();
        let date_ref = date_ref.clone();
        Callback::from(move |e: Event| {
            let checkbox: HtmlInputElement = e.target_unchecked_into();
            let use_latest = checkbox.checked();
            store.set(date_patch(use_latest, &draft));

            if !use_latest && draft.trim().is_empty() {
                if let Some(input) = date_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
        })
    };

    html! {
        <div class="control-group">
            <label for="dt-input">{ "Date:" }</label>
            <input
                type="date"
                id="dt-input"
                ref={date_ref}
                disabled={field.disabled}
                value={field.value}
                class={classes!(check.error.is_some().then_some("invalid"))}
                onchange={on_date_change}
                onblur={check.on_blur.clone()}
            />
            <label class="checkbox-label">
                <input type="checkbox" id="use-latest-checkbox" checked={field.use_latest} onchange={on_toggle} />
                { " Use Latest" }
            </label>
            <span class="help-text">{ "Or select a specific snapshot date" }</span>
            if let Some(ref error) = check.error {
                <div class="input-error">{ error }</div>
            }
        </div>
    }
}

/// Result limit input, clamped to the supported range while typing and on
/// blur.
#[function_component(LimitInput)]
pub fn limit_input(props: &StoreProps) -> Html {
    let snapshot = use_snapshot(&props.store);
    let text = use_state(|| limit_field(&snapshot));

    // Follow limits written by someone else
    {
        let text = text.clone();
        use_effect_with(snapshot.limit, move |&limit| {
            if parse_limit(&text) != Some(limit) {
                text.set(limit.to_string());
            }
            || ()
        });
    }

    let oninput = {
        let store = props.store.clone();
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let value = input.value();
            // Leave the store alone while the field is blank or half-typed
            if let Some(limit) = parse_limit(&value) {
                store.set(SnapshotPatch::new().limit(limit));
            }
            text.set(value);
        })
    };

    let onblur = {
        let store = props.store.clone();
        let text = text.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let limit = clamp_limit(&input.value());
            text.set(limit.to_string());
            store.set(SnapshotPatch::new().limit(limit));
        })
    };

    html! {
        <div class="control-group">
            <label for="limit-input">{ "Limit:" }</label>
            <input
                type="number"
                id="limit-input"
                value={(*text).clone()}
                min={MIN_LIMIT.to_string()}
                max={MAX_LIMIT.to_string()}
                step={LIMIT_STEP.to_string()}
                {oninput}
                {onblur}
            />
            <span class="help-text">{ format!("Max {}", MAX_LIMIT) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StatusLineProps {
    pub status: Option<Status>,
}

/// One-line status message; renders nothing until there is one.
#[function_component(StatusLine)]
pub fn status_line(props: &StatusLineProps) -> Html {
    match &props.status {
        Some(status) => html! {
            <div id="status" class={status.css_class()}>{ status.message.clone() }</div>
        },
        None => html! { <div id="status" class="status"></div> },
    }
}
