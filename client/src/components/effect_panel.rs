//! Causal effect estimation panel.
//!
//! SYSTEM CONTEXT
//! ==============
//! The user picks a treatment (`variable = value`) and an outcome variable.
//! Picking either highlights both on the graph. "Estimate effect" calls
//! `GET /network/estimate_effect` and renders one colored row per metric of
//! the outcome, followed by the backend's explanation.
//!
//! Responses are gated by a `RequestGate`; only the latest estimate is shown.

#[cfg(test)]
#[path = "effect_panel_test.rs"]
mod effect_panel_test;

use leptos::prelude::*;
use network::RequestGate;
use network::api::EffectEstimate;
use network::tools::{EffectRow, EffectSelection, TreatmentChoice, effect_rows};

use crate::net::api;
use crate::state::graph::GraphState;
use crate::util::config::ClientConfig;
use crate::util::dialog::alert;

const MISSING_SELECTION: &str = "Must select both a treatment and an outcome to estimate effect.";

/// What the table shows for one estimate.
#[derive(Clone, Debug, Default, PartialEq)]
struct EffectResult {
    rows: Vec<EffectRow>,
    explanation: Option<String>,
}

impl EffectResult {
    fn from_estimate(estimate: &EffectEstimate, outcome: &str) -> Self {
        Self {
            rows: effect_rows(estimate, outcome),
            explanation: estimate.explanation.clone(),
        }
    }
}

/// The metric color tints the value text.
fn value_style(color: &str) -> String {
    format!("color: {color}")
}

fn parse_choice(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[component]
pub fn EffectPanel() -> impl IntoView {
    let graph = expect_context::<RwSignal<GraphState>>();
    let config = expect_context::<ClientConfig>();

    let selection = RwSignal::new(EffectSelection::default());
    let result = RwSignal::new(EffectResult::default());
    let gate = StoredValue::new(RequestGate::new());

    on_cleanup(move || {
        let _ = gate.try_update_value(RequestGate::invalidate);
    });

    let repaint = move || {
        let plan = selection.with_untracked(EffectSelection::plan);
        graph.update(|g| g.show(plan.as_ref()));
    };

    let on_treatment = move |ev: leptos::ev::Event| {
        let choice = parse_choice(&event_target_value(&ev)).map(|raw| TreatmentChoice::parse(&raw));
        selection.update(|s| s.treatment = choice);
        repaint();
    };

    let on_outcome = move |ev: leptos::ev::Event| {
        let outcome = parse_choice(&event_target_value(&ev));
        selection.update(|s| s.outcome = outcome);
        repaint();
    };

    let on_estimate = move |_| {
        let Some((treatment, outcome)) = selection.with_untracked(EffectSelection::request) else {
            alert(MISSING_SELECTION);
            return;
        };
        let Some(ticket) = gate.try_update_value(RequestGate::issue) else {
            return;
        };
        let backend = config.backend_url.clone();
        leptos::task::spawn_local(async move {
            let Some(estimate) = api::estimate_effect(&backend, &treatment, &outcome).await else {
                return;
            };
            if gate.try_with_value(|g| g.is_current(ticket)) != Some(true) {
                return;
            }
            result.set(EffectResult::from_estimate(&estimate, &outcome));
        });
    };

    let treatment_options = move || {
        let current = selection.get();
        graph.with(|g| {
            current
                .treatment_options(&g.node_values)
                .into_iter()
                .flat_map(|pair| {
                    pair.values
                        .iter()
                        .map(|value| TreatmentChoice::new(pair.node.clone(), Some(value.clone())))
                        .collect::<Vec<_>>()
                })
                .map(|choice| {
                    let value = choice.query();
                    let label = choice.to_string();
                    view! { <option value=value>{label}</option> }
                })
                .collect::<Vec<_>>()
        })
    };

    let outcome_options = move || {
        let current = selection.get();
        graph.with(|g| {
            current
                .outcome_options(&g.node_values)
                .into_iter()
                .map(|node| {
                    let node = node.to_owned();
                    view! { <option value=node.clone()>{node.clone()}</option> }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <div class="tool effect-panel">
            <h3 class="tool__title">"Estimate causal effect:"</h3>
            <div class="effect-panel__pickers">
                <select
                    class="tool__select"
                    on:change=on_treatment
                    prop:value=move || selection.with(|s| s.treatment.as_ref().map(TreatmentChoice::query).unwrap_or_default())
                >
                    <option value="">"Treatment \u{25be}"</option>
                    {treatment_options}
                </select>
                <select
                    class="tool__select"
                    on:change=on_outcome
                    prop:value=move || selection.with(|s| s.outcome.clone().unwrap_or_default())
                >
                    <option value="">"Outcome \u{25be}"</option>
                    {outcome_options}
                </select>
                <button class="btn btn--primary" on:click=on_estimate>"Estimate effect"</button>
            </div>
            {move || {
                let current = result.get();
                (!current.rows.is_empty()).then(|| {
                    view! {
                        <table class="effect-panel__table">
                            <tbody>
                                {current
                                    .rows
                                    .into_iter()
                                    .map(|row| {
                                        let style = value_style(&row.color);
                                        view! {
                                            <tr>
                                                <td>{row.metric}</td>
                                                <td style=style>{row.value}</td>
                                            </tr>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </tbody>
                        </table>
                    }
                })
            }}
            {move || {
                result.with(|r| r.explanation.clone()).map(|text| {
                    view! { <p class="effect-panel__explanation">{format!("Explanation: {text}")}</p> }
                })
            }}
        </div>
    }
}
