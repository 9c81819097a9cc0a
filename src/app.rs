//! App Root Component
//!
//! Application shell and global providers.

use leptos::*;

use crate::api;
use crate::components::TrendChart;
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Load the dataset once on mount; failures leave the chart empty
    let state_for_fetch = state;
    create_effect(move |_| {
        let state = state_for_fetch.clone();
        spawn_local(async move {
            match api::fetch_data().await {
                Ok(points) => state.raw_data.set(points),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch chart data: {}", e).into(),
                    );
                }
            }
        });
    });

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Trend Chart"</h1>
            </header>

            <main>
                <TrendChart />
            </main>
        </div>
    }
}
