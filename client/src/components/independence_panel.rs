//! Conditional independence tests.
//!
//! SYSTEM CONTEXT
//! ==============
//! "Test Independencies" fetches every implied independence from the backend
//! and lists it with its p-value. Clicking a row highlights the independent
//! pair and the conditioning set, and records the inspection with
//! `PUT /network/test_independence/log`.

#[cfg(test)]
#[path = "independence_panel_test.rs"]
mod independence_panel_test;

use leptos::prelude::*;
use network::RequestGate;
use network::tools::{IndependenceRow, independence_rows};

use crate::net::api;
use crate::state::graph::GraphState;
use crate::util::config::ClientConfig;

fn join_ids(ids: &[String]) -> String {
    ids.join(", ")
}

/// Rows carry already rounded values; print the number as is.
fn format_p_value(value: f64) -> String {
    format!("{value}")
}

#[component]
pub fn IndependencePanel() -> impl IntoView {
    let graph = expect_context::<RwSignal<GraphState>>();
    let config = expect_context::<ClientConfig>();

    let rows = RwSignal::new(Vec::<IndependenceRow>::new());
    let selected = RwSignal::new(None::<usize>);
    let gate = StoredValue::new(RequestGate::new());

    on_cleanup(move || {
        let _ = gate.try_update_value(RequestGate::invalidate);
    });

    let backend = config.backend_url.clone();
    let on_test = move |_| {
        let Some(ticket) = gate.try_update_value(RequestGate::issue) else {
            return;
        };
        let backend = backend.clone();
        leptos::task::spawn_local(async move {
            let Some(tests) = api::test_independence(&backend).await else {
                return;
            };
            if gate.try_with_value(|g| g.is_current(ticket)) != Some(true) {
                return;
            }
            selected.set(None);
            rows.set(independence_rows(&tests));
        });
    };

    let backend = StoredValue::new(config.backend_url);
    let on_row = move |row: IndependenceRow| {
        graph.update(|g| {
            g.reset_colors();
            g.highlight(&row.plan(), false);
        });
        selected.set(Some(row.id));
        let body = row.log_body();
        let backend = backend.get_value();
        leptos::task::spawn_local(async move {
            if api::log_independence_test(&backend, &body).await.is_none() {
                leptos::logging::warn!("independence test was not logged");
            }
        });
    };

    view! {
        <div class="tool independence-panel">
            <button class="btn" on:click=on_test>"Test Independencies"</button>
            {move || {
                let current = rows.get();
                (!current.is_empty()).then(|| {
                    view! {
                        <table class="independence-panel__table">
                            <thead>
                                <tr>
                                    <th>"Independent"</th>
                                    <th>"Given"</th>
                                    <th>"p-value"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {current
                                    .into_iter()
                                    .map(|row| {
                                        let id = row.id;
                                        let pair = join_ids(&row.independence_assumption);
                                        let given = join_ids(&row.conditional_variables);
                                        let p_value = format_p_value(row.p_value);
                                        view! {
                                            <tr
                                                class="independence-panel__row"
                                                class:independence-panel__row--selected=move || selected.get() == Some(id)
                                                on:click=move |_| on_row(row.clone())
                                            >
                                                <td>{pair}</td>
                                                <td>{given}</td>
                                                <td>{p_value}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                })
            }}
        </div>
    }
}
