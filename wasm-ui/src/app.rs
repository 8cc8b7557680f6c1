//! Main application component.

use gloo::console;
use inventario::{
    ExportError, Inventory, InventoryRecord, SubmitError, Uuid, export_csv, export_file_name_now,
};
use yew::prelude::*;

use crate::components::{DataInput, InventoryTable};
use crate::download::{CSV_MIME, alert, confirm, download_text};
use crate::storage::BrowserStorage;

const CLEAR_PROMPT: &str = "¿Estás seguro de que deseas limpiar toda la lista?";

/// Main application state.
#[derive(Clone, PartialEq)]
pub struct AppState {
    /// The record collection and its local-storage mirror.
    pub inventory: Inventory<BrowserStorage>,
    /// Text in the paste area.
    pub input_text: String,
    /// Current search term.
    pub search: String,
    /// Inline error under the paste area, if any.
    pub error: Option<String>,
}

impl AppState {
    /// Load the collection saved by a previous session.
    fn restore() -> Self {
        let inventory = Inventory::load(BrowserStorage).unwrap_or_else(|e| {
            console::error!(format!("could not restore inventory: {e}"));
            Inventory::empty(BrowserStorage)
        });
        Self {
            inventory,
            input_text: String::new(),
            search: String::new(),
            error: None,
        }
    }

    /// Visible records, rebuilt from the collection on every call.
    fn visible_records(&self) -> Vec<InventoryRecord> {
        self.inventory
            .visible(&self.search)
            .into_iter()
            .map(|v| v.record.clone())
            .collect()
    }
}

/// Main application component.
#[function_component(App)]
pub fn app() -> Html {
    let state = use_state(AppState::restore);

    let on_input_change = {
        let state = state.clone();
        Callback::from(move |text: String| {
            let mut new_state = (*state).clone();
            new_state.input_text = text;
            state.set(new_state);
        })
    };

    let on_submit = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let mut new_state = (*state).clone();
            new_state.error = None;

            match new_state.inventory.submit_now(&new_state.input_text) {
                Ok(_) => new_state.input_text.clear(),
                Err(SubmitError::Parse(e)) => new_state.error = Some(e.to_string()),
                Err(SubmitError::Store(e)) => {
                    console::error!(format!("could not save inventory: {e}"));
                    new_state.error = Some(format!("No se pudo guardar: {e}"));
                }
            }

            state.set(new_state);
        })
    };

    let on_dismiss_error = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let mut new_state = (*state).clone();
            new_state.error = None;
            state.set(new_state);
        })
    };

    let on_search = {
        let state = state.clone();
        Callback::from(move |term: String| {
            let mut new_state = (*state).clone();
            new_state.search = term;
            state.set(new_state);
        })
    };

    let on_delete = {
        let state = state.clone();
        Callback::from(move |id: Uuid| {
            let mut new_state = (*state).clone();
            if let Err(e) = new_state.inventory.delete(id) {
                console::error!(format!("could not delete {id}: {e}"));
                return;
            }
            state.set(new_state);
        })
    };

    let on_clear = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            if !confirm(CLEAR_PROMPT) {
                return;
            }
            let mut new_state = (*state).clone();
            if let Err(e) = new_state.inventory.clear() {
                console::error!(format!("could not clear inventory: {e}"));
                return;
            }
            state.set(new_state);
        })
    };

    let on_export = {
        let state = state.clone();
        Callback::from(move |_: ()| {
            let view = state.inventory.visible(&state.search);
            match export_csv(&view) {
                Ok(csv) => {
                    if let Err(e) = download_text(&export_file_name_now(), &csv, CSV_MIME) {
                        console::error!("CSV download failed", e);
                    }
                }
                Err(ExportError::Empty) => alert(&ExportError::Empty.to_string()),
                Err(e) => console::error!(format!("CSV export failed: {e}")),
            }
        })
    };

    html! {
        <div class="app">
            <header class="header">
                <h1>{ "📦 Control de Vencimientos" }</h1>
                <p class="subtitle">{ "Alfonsa Distribuidora" }</p>
            </header>

            <main class="main">
                <DataInput
                    value={state.input_text.clone()}
                    error={state.error.clone()}
                    on_change={on_input_change}
                    on_submit={on_submit}
                    on_dismiss_error={on_dismiss_error}
                />

                <InventoryTable
                    records={state.visible_records()}
                    search={state.search.clone()}
                    on_search={on_search}
                    on_delete={on_delete}
                    on_clear={on_clear}
                    on_export={on_export}
                />
            </main>

            <footer class="footer">
                <span>{ format!("{} productos", state.inventory.len()) }</span>
                <span class="footer-build">
                    { format!("Build: {} {}", env!("BUILD_COMMIT"), env!("BUILD_DATE")) }
                </span>
            </footer>
        </div>
    }
}
