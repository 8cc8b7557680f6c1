//! UI components for the inventory page.

use inventario::{
    InventoryRecord, Status, Uuid, VisibleRecord, format_date, format_quantity,
};
use yew::prelude::*;

/// Example lines shown in the empty textarea.
const PLACEHOLDER: &str = "Ejemplo:\n130x24 speed 250 (02/06/26)\n5x12 speed 473 (14/08/26)";

/// Paste area for new batches.
#[derive(Properties, PartialEq)]
pub struct DataInputProps {
    pub value: String,
    pub error: Option<String>,
    pub on_change: Callback<String>,
    pub on_submit: Callback<()>,
    pub on_dismiss_error: Callback<()>,
}

#[function_component(DataInput)]
pub fn data_input(props: &DataInputProps) -> Html {
    let on_input = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
            on_change.emit(target.value());
        })
    };

    let on_submit_click = props.on_submit.reform(|_: MouseEvent| ());
    let on_dismiss_click = props.on_dismiss_error.reform(|_: MouseEvent| ());

    html! {
        <div class="panel input-panel">
            <h2>{ "Agregar Productos" }</h2>
            <p class="hint">
                { "Pega líneas con el formato: " }
                <code>{ "130x24 speed 250 (02/06/26)" }</code>
            </p>
            <textarea
                class="batch-input"
                value={props.value.clone()}
                oninput={on_input}
                placeholder={PLACEHOLDER}
                spellcheck="false"
                rows="6"
            />
            if let Some(error) = &props.error {
                <div class="error">
                    <span>{ error }</span>
                    <button class="dismiss" onclick={on_dismiss_click}>{ "✕" }</button>
                </div>
            }
            <button class="submit-button" onclick={on_submit_click}>
                { "✨ Generar Tabla" }
            </button>
        </div>
    }
}

/// Search box, actions and the colour-coded table.
#[derive(Properties, PartialEq)]
pub struct InventoryTableProps {
    /// Visible records, already filtered and sorted.
    pub records: Vec<InventoryRecord>,
    pub search: String,
    pub on_search: Callback<String>,
    pub on_delete: Callback<Uuid>,
    pub on_clear: Callback<()>,
    pub on_export: Callback<()>,
}

#[function_component(InventoryTable)]
pub fn inventory_table(props: &InventoryTableProps) -> Html {
    let on_search_input = {
        let on_search = props.on_search.clone();
        Callback::from(move |e: InputEvent| {
            let target: web_sys::HtmlInputElement = e.target_unchecked_into();
            on_search.emit(target.value());
        })
    };

    let on_export_click = props.on_export.reform(|_: MouseEvent| ());
    let on_clear_click = props.on_clear.reform(|_: MouseEvent| ());
    let empty = props.records.is_empty();

    html! {
        <div class="panel table-panel">
            <div class="toolbar">
                <input
                    type="text"
                    class="search"
                    placeholder="🔍 Buscar por producto..."
                    value={props.search.clone()}
                    oninput={on_search_input}
                />
                <button class="export-button" onclick={on_export_click} disabled={empty}>
                    { "📥 Exportar CSV" }
                </button>
                <button class="clear-button" onclick={on_clear_click} disabled={empty}>
                    { "🗑️ Limpiar" }
                </button>
            </div>

            if empty {
                <div class="empty-state">
                    <p class="lead">{ "No hay productos aún." }</p>
                    <p>{ "Agrega productos usando el formulario superior." }</p>
                </div>
            } else {
                <>
                <table class="inventory">
                    <thead>
                        <tr>
                            <th class="name">{ "Producto" }</th>
                            <th>{ "Cantidad" }</th>
                            <th>{ "Vencimiento" }</th>
                            <th>{ "Días" }</th>
                            <th>{ "Estado" }</th>
                            <th>{ "Acción" }</th>
                        </tr>
                    </thead>
                    <tbody>
                        { for props.records.iter().map(|record| row(record, &props.on_delete)) }
                    </tbody>
                </table>
                <Legend />
                </>
            }
        </div>
    }
}

fn row(record: &InventoryRecord, on_delete: &Callback<Uuid>) -> Html {
    let visible = VisibleRecord::new(record);
    let status = visible.status;
    let id = record.id();
    let on_delete_click = on_delete.reform(move |_: MouseEvent| id);
    let style = format!("background-color: {}", status.row_color());

    html! {
        <tr key={id.to_string()} class={classes!(visible.is_urgent().then_some("urgent"))} style={style}>
            <td class="name">{ record.product_name() }</td>
            <td>{ format!("{} unidades", format_quantity(record.total_quantity())) }</td>
            <td>{ format_date(record.expiry_date()) }</td>
            <td class="days">{ format!("{}d", record.days_remaining()) }</td>
            <td>
                <span class={classes!("badge", status.css_class())}>{ status.badge() }</span>
            </td>
            <td>
                <button class="delete-button" onclick={on_delete_click}>{ "✕" }</button>
            </td>
        </tr>
    }
}

/// Threshold legend under the table.
#[function_component(Legend)]
fn legend() -> Html {
    html! {
        <div class="legend">
            { for Status::ALL.iter().map(|status| html! {
                <div class={classes!("legend-item", status.css_class())}>
                    <p class="legend-label">{ status.legend_title() }</p>
                    <p class="legend-range">{ status.legend() }</p>
                </div>
            }) }
        </div>
    }
}
