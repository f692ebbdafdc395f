//! Main module for the RoK leaderboard dashboard using Yew.
//! Wires the store, the API client and the UI components.

use log::info;
use rok_leaderboard::controller::{check_health, load};
use rok_leaderboard::{config, logging, HttpLeaderboardApi, Status, Store};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;

use components::{
    DateSelector, KingdomSelector, LeaderboardTable, LimitInput, MetricSelector, StatusLine,
};

/// Primary application component owning the store and the API client.
#[function_component(App)]
fn app() -> Html {
    // One store per page session, handed to every widget
    let store = use_state(Store::default);
    let api = use_state(HttpLeaderboardApi::from_config);
    let status = use_state(|| None::<Status>);

    // Check API health on mount
    {
        let store = (*store).clone();
        let api = (*api).clone();
        let status = status.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let outcome = check_health(&store, &api).await;
                status.set(Some(outcome));
            });
        });
    }

    let on_load = {
        let store = (*store).clone();
        let api = (*api).clone();
        let status = status.clone();
        Callback::from(move |_: MouseEvent| {
            let store = store.clone();
            let api = api.clone();
            let status = status.clone();
            spawn_local(async move {
                load(&store, &api, |outcome| status.set(Some(outcome))).await;
            });
        })
    };

    let store = (*store).clone();
    html! {
        <div class="app">
            <header class="app-header">
                <h1>{ "RoK Leaderboard" }</h1>
            </header>

            <section class="controls">
                <KingdomSelector store={store.clone()} />
                <MetricSelector store={store.clone()} />
                <DateSelector store={store.clone()} />
                <LimitInput store={store.clone()} />
                <button id="load-btn" class="btn-primary" onclick={on_load}>
                    { "Load Leaderboard" }
                </button>
            </section>

            <StatusLine status={(*status).clone()} />

            <section id="leaderboard-container">
                <LeaderboardTable {store} />
            </section>
        </div>
    }
}

/// Entry point: installs panic and log hooks, then renders the App.
fn main() {
    console_error_panic_hook::set_once();
    logging::init(config::log_level());

    info!("RoK Leaderboard frontend initialized");
    info!("API URL: {}", config::api_base_url());

    yew::Renderer::<App>::new().render();
}
