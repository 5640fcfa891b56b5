use dioxus::prelude::*;
use tracing::{info, warn};

use crate::app::Services;
use crate::domain::entities::workspace::Workspace;
use crate::domain::status::{current_status, Status};
use crate::domain::view::{
    format_entry_cell, StatusCounts, StatusFilter, ViewQuery, PAGE_SIZE_OPTIONS,
};
use crate::infra::export::csv::export_entries;
use crate::usecase::services::edit_service::EditService;
use crate::usecase::services::query_service::QueryService;
use crate::ui::dialogs;
use crate::ui::edit_modal::EditModal;
use crate::ui::session::SessionContext;
use crate::ui::state::app_state::{DashboardState, Feedback, FeedbackKind};

const PANEL_STYLE: &str =
    "background: #fff; border: 1px solid #ddd; border-radius: 10px; padding: 12px 16px;";
const BUTTON_STYLE: &str =
    "border: 1px solid #bbb; background: #fff; padding: 6px 12px; border-radius: 6px; cursor: pointer;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub absolute_index: usize,
    pub cells: Vec<String>,
    pub status: String,
    pub attended: bool,
    pub saving: bool,
}

/// Everything the dashboard renders, detached from the signals it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardModel {
    pub columns: Vec<String>,
    pub rows: Vec<PatientRow>,
    pub counts: StatusCounts,
    pub page: usize,
    pub total_pages: usize,
    pub page_window: Vec<usize>,
    pub range_label: String,
    pub filtered_count: usize,
    pub writes_in_flight: bool,
    pub has_status_column: bool,
    pub has_filters: bool,
    pub editing: bool,
}

pub fn dashboard_model(workspace: &Workspace, query: &ViewQuery) -> DashboardModel {
    let roles = workspace.roles();
    let view = workspace.view(query);
    let rows = view
        .visible()
        .iter()
        .map(|entry| {
            let status = current_status(entry.record, roles.status).to_string();
            PatientRow {
                absolute_index: entry.absolute_index,
                cells: view
                    .columns
                    .iter()
                    .map(|column| format_entry_cell(column, entry, roles))
                    .collect(),
                attended: Status::classify(&status) == Status::Attended,
                status,
                saving: workspace.is_saving(entry.absolute_index),
            }
        })
        .collect();

    DashboardModel {
        columns: view.columns.iter().map(|column| column.label.clone()).collect(),
        rows,
        counts: view.counts,
        page: view.page,
        total_pages: view.total_pages,
        page_window: view.page_window(),
        range_label: view.range_label(),
        filtered_count: view.filtered.len(),
        writes_in_flight: workspace.has_writes_in_flight(),
        has_status_column: roles.status.is_some(),
        has_filters: query.has_filters(),
        editing: workspace.session().is_some(),
    }
}

fn menu_item_style(selected: bool) -> &'static str {
    if selected {
        "padding: 8px 10px; cursor: pointer; background: #eef4ff;"
    } else {
        "padding: 8px 10px; cursor: pointer;"
    }
}

fn status_button_style(attended: bool) -> &'static str {
    if attended {
        "background: #dcfce7; color: #166534; border: 1px solid #bbf7d0; padding: 4px 12px; border-radius: 999px; cursor: pointer;"
    } else {
        "background: #fef9c3; color: #854d0e; border: 1px solid #fde68a; padding: 4px 12px; border-radius: 999px; cursor: pointer;"
    }
}

fn page_button_style(current: bool) -> &'static str {
    if current {
        "border: 1px solid #2563eb; background: #2563eb; color: #fff; padding: 6px 12px; border-radius: 6px;"
    } else {
        BUTTON_STYLE
    }
}

pub fn empty_message(has_filters: bool) -> &'static str {
    if has_filters {
        "Nenhum paciente encontrado"
    } else {
        "Nenhum paciente cadastrado"
    }
}

#[component]
fn StatsCard(label: &'static str, value: usize, accent: &'static str) -> Element {
    rsx! {
        div { style: "{PANEL_STYLE} flex: 1; border-left: 4px solid {accent};",
            div { style: "font-size: 13px; color: #555;", "{label}" }
            div { style: "font-size: 22px; font-weight: 700;", "{value}" }
        }
    }
}

#[component]
fn FeedbackToast(state: DashboardState) -> Element {
    let Some(feedback) = state.feedback.cloned() else {
        return rsx! {};
    };
    let (background, color, icon) = match feedback.kind {
        FeedbackKind::Success => ("#f0fdf4", "#166534", "✓"),
        FeedbackKind::Error => ("#fef2f2", "#991b1b", "✕"),
    };

    rsx! {
        div {
            style: "position: fixed; top: 16px; right: 16px; z-index: 1400; padding: 12px 16px; border-radius: 8px; background: {background}; color: {color}; border: 1px solid {color}; box-shadow: 0 8px 20px rgba(0,0,0,0.12); cursor: pointer;",
            onclick: move |_| state.dismiss(),
            "{icon} {feedback.message}"
        }
    }
}

#[component]
pub fn Dashboard(session: SessionContext, services: Services, page_size: usize) -> Element {
    let state = DashboardState::new(page_size);
    let DashboardState {
        mut workspace,
        mut query,
        loading,
        mut status_menu_open,
        ..
    } = state;

    let query_service = services.query.clone();
    let reload = use_callback(move |_: ()| {
        if workspace.peek().has_writes_in_flight() {
            warn!("reload skipped while rows are saving");
            return;
        }
        let query_service = query_service.clone();
        let mut loading = loading;
        loading.set(true);
        spawn(async move {
            let loaded = query_service.load().await;
            if QueryService::settle(&mut workspace.write(), loaded).is_err() {
                state.notify(Feedback::error("❌ Erro ao carregar dados"));
            }
            loading.set(false);
        });
    });

    use_effect(move || reload.call(()));

    let edit_for_toggle = services.edit.clone();
    let toggle_status = use_callback(move |absolute_index: usize| {
        let prepared = workspace.write().prepare_toggle(absolute_index);
        let update = match prepared {
            Ok(update) => update,
            Err(err) => {
                warn!(absolute_index, error = %err, "toggle not started");
                return;
            }
        };
        let edit_service = edit_for_toggle.clone();
        spawn(async move {
            let outcome = edit_service.push(&update).await;
            let settled = EditService::settle_toggle(&mut workspace.write(), &update, outcome);
            match settled {
                Ok(()) => state.notify(Feedback::success("Status atualizado com sucesso!")),
                Err(_) => state.notify(Feedback::error("Erro ao atualizar status")),
            }
        });
    });

    let edit_for_save = services.edit.clone();
    let save_row = use_callback(move |_: ()| {
        let prepared = workspace.write().prepare_save();
        let update = match prepared {
            Ok(update) => update,
            Err(err) => {
                warn!(error = %err, "save not started");
                return;
            }
        };
        let edit_service = edit_for_save.clone();
        spawn(async move {
            let outcome = edit_service.push(&update).await;
            let settled = EditService::settle_save(&mut workspace.write(), &update, outcome);
            match settled {
                Ok(()) => state.notify(Feedback::success("Registro atualizado com sucesso!")),
                Err(_) => state.notify(Feedback::error("Erro ao salvar. Tente novamente.")),
            }
        });
    });

    let close_edit = use_callback(move |_: ()| {
        let dirty = workspace.read().is_dirty();
        if dirty && !dialogs::confirm_discard_changes() {
            return;
        }
        if let Err(err) = workspace.write().discard_edit() {
            warn!(error = %err, "edit not closed");
        }
    });

    let model = dashboard_model(&workspace.read(), &query.read());
    let is_loading = loading();
    let status_filter = query.read().status();
    let search = query.read().search().to_string();
    let current_page_size = query.read().page_size();
    let signed_in_as = session.email().unwrap_or_default();
    let menu_open = status_menu_open();
    let page = model.page;
    let total_pages = model.total_pages;

    rsx! {
        div { style: "max-width: 1200px; margin: 0 auto; padding: 24px; font-family: sans-serif;",
            FeedbackToast { state }

            div { style: "text-align: center; margin-bottom: 24px;",
                h1 { style: "margin: 0;", "Sistema de Pacientes" }
                p { style: "color: #555;", "Gerencie e acompanhe os dados dos pacientes" }
                div { style: "display: flex; gap: 12px; justify-content: center; align-items: center;",
                    span { style: "color: #555; font-size: 13px;", "{signed_in_as}" }
                    button {
                        style: "background: #dc2626; color: #fff; border: none; padding: 6px 14px; border-radius: 6px; cursor: pointer;",
                        onclick: move |_| {
                            if !dialogs::confirm_sign_out() {
                                return;
                            }
                            match session.sign_out() {
                                Ok(()) => {
                                    info!("dashboard closed by sign-out");
                                    state.reset(page_size);
                                }
                                Err(err) => {
                                    warn!(error = %err, "sign-out failed");
                                    state.notify(Feedback::error("Erro ao fazer logout"));
                                }
                            }
                        },
                        "Sair"
                    }
                }
            }

            div { style: "{PANEL_STYLE} display: flex; gap: 12px; align-items: center; margin-bottom: 16px;",
                input {
                    style: "flex: 1; padding: 8px 12px; border: 1px solid #bbb; border-radius: 6px;",
                    placeholder: "Buscar pacientes...",
                    value: "{search}",
                    oninput: move |event| query.write().set_search(event.value()),
                }
                div { style: "position: relative;",
                    button {
                        style: "{BUTTON_STYLE} min-width: 180px; text-align: left;",
                        onclick: move |_| status_menu_open.set(!status_menu_open()),
                        "{status_filter.label()} ▾"
                    }
                    if menu_open {
                        div {
                            style: "position: absolute; top: 100%; left: 0; width: 100%; background: #fff; border: 1px solid #bbb; border-radius: 8px; box-shadow: 0 10px 24px rgba(0,0,0,0.15); z-index: 1200;",
                            for filter in StatusFilter::OPTIONS {
                                div {
                                    key: "{filter.value()}",
                                    style: menu_item_style(filter == status_filter),
                                    onclick: move |_| {
                                        query.write().set_status(filter);
                                        status_menu_open.set(false);
                                    },
                                    "{filter.label()}"
                                }
                            }
                        }
                    }
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: is_loading || model.writes_in_flight,
                    onclick: move |_| reload.call(()),
                    if is_loading { "Atualizando..." } else { "Atualizar" }
                }
                button {
                    style: "{BUTTON_STYLE}",
                    disabled: is_loading,
                    onclick: move |_| {
                        let Some(path) = dialogs::choose_export_path() else {
                            return;
                        };
                        let exported = {
                            let current = workspace.read();
                            let current_query = query.read();
                            let view = current.view(&current_query);
                            let written = export_entries(&path, current.sheet().header(), &view.filtered);
                            written
                        };
                        match exported {
                            Ok(count) => state.notify(Feedback::success(format!("{count} pacientes exportados"))),
                            Err(err) => {
                                warn!(error = %err, "csv export failed");
                                state.notify(Feedback::error("Erro ao exportar CSV"));
                            }
                        }
                    },
                    "Exportar CSV"
                }
            }

            div { style: "display: flex; gap: 12px; margin-bottom: 16px;",
                StatsCard { label: "Total de Pacientes", value: model.counts.total, accent: "#2563eb" }
                StatsCard { label: "Pendentes", value: model.counts.pending, accent: "#ca8a04" }
                StatsCard { label: "Atendidos", value: model.counts.attended, accent: "#16a34a" }
            }

            div { style: "display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px; font-size: 14px;",
                div {
                    span { "Itens por página: " }
                    select {
                        value: "{current_page_size}",
                        onchange: move |event| {
                            if let Ok(size) = event.value().parse::<usize>() {
                                query.write().set_page_size(size);
                            }
                        },
                        for size in PAGE_SIZE_OPTIONS {
                            option { key: "{size}", value: "{size}", "{size}" }
                        }
                    }
                }
                span { "{model.range_label}" }
            }

            if is_loading {
                div { style: "{PANEL_STYLE} text-align: center; padding: 48px;", "Carregando pacientes..." }
            } else if model.filtered_count == 0 {
                div { style: "{PANEL_STYLE} text-align: center; padding: 48px;",
                    p { "{empty_message(model.has_filters)}" }
                    if model.has_filters {
                        button {
                            style: "border: none; background: none; color: #2563eb; cursor: pointer;",
                            onclick: move |_| query.write().clear_filters(),
                            "Limpar filtros"
                        }
                    }
                }
            } else {
                div { style: "background: #fff; border: 1px solid #ddd; border-radius: 10px; overflow-x: auto; margin-bottom: 16px;",
                    table { style: "width: 100%; border-collapse: collapse;",
                        thead {
                            tr { style: "background: #f5f7fb;",
                                for (idx, column) in model.columns.iter().enumerate() {
                                    th { key: "{idx}", style: "text-align: left; padding: 10px 12px; border-bottom: 1px solid #ddd;", "{column}" }
                                }
                                if model.has_status_column {
                                    th { style: "text-align: left; padding: 10px 12px; border-bottom: 1px solid #ddd;", "Status" }
                                }
                                th { style: "text-align: right; padding: 10px 12px; border-bottom: 1px solid #ddd;", "Ações" }
                            }
                        }
                        tbody {
                            for row in model.rows.iter().cloned() {
                                tr { key: "{row.absolute_index}",
                                    for (idx, cell) in row.cells.iter().enumerate() {
                                        td { key: "{idx}", style: "padding: 10px 12px; border-bottom: 1px solid #eee; white-space: nowrap;", "{cell}" }
                                    }
                                    if model.has_status_column {
                                        td { style: "padding: 10px 12px; border-bottom: 1px solid #eee;",
                                            button {
                                                style: status_button_style(row.attended),
                                                disabled: row.saving,
                                                onclick: move |_| toggle_status.call(row.absolute_index),
                                                if row.saving { "Salvando..." } else { "{row.status}" }
                                            }
                                        }
                                    }
                                    td { style: "padding: 10px 12px; border-bottom: 1px solid #eee; text-align: right;",
                                        button {
                                            style: "{BUTTON_STYLE}",
                                            disabled: model.editing,
                                            onclick: move |_| {
                                                if let Err(err) = workspace.write().begin_edit(row.absolute_index) {
                                                    warn!(error = %err, "edit not opened");
                                                }
                                            },
                                            "Editar"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                if total_pages > 1 {
                    div { style: "{PANEL_STYLE} display: flex; justify-content: space-between; align-items: center;",
                        span { "{model.range_label}" }
                        div { style: "display: flex; gap: 6px;",
                            button {
                                style: "{BUTTON_STYLE}",
                                disabled: page <= 1,
                                onclick: move |_| query.write().set_page(page.saturating_sub(1).max(1)),
                                "‹"
                            }
                            for number in model.page_window.iter().copied() {
                                button {
                                    key: "{number}",
                                    style: page_button_style(number == page),
                                    onclick: move |_| query.write().set_page(number),
                                    "{number}"
                                }
                            }
                            button {
                                style: "{BUTTON_STYLE}",
                                disabled: page >= total_pages,
                                onclick: move |_| query.write().set_page((page + 1).min(total_pages)),
                                "›"
                            }
                        }
                    }
                }
            }

            if model.editing {
                EditModal { workspace, on_save: save_row, on_close: close_edit }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn workspace() -> Workspace {
        Workspace::from_values(vec![
            row(&["Nome", "Telefone", "CPF", "Status", "Último contato"]),
            row(&["Ana", "11987654321", "12345678901", "Pendente", "01/01/2024 10:00"]),
            row(&["Bia", "", "", "Atendido", "05/01/2024 08:30"]),
            row(&["Caio", "", "", "", ""]),
        ])
    }

    #[test]
    fn model_orders_rows_and_formats_cells() {
        let model = dashboard_model(&workspace(), &ViewQuery::default());

        assert_eq!(model.columns, vec!["Nome", "Telefone", "Último contato"]);
        assert_eq!(
            model.rows.iter().map(|r| r.absolute_index).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
        assert_eq!(model.rows[1].cells[1], "(11) 98765-4321");
        assert_eq!(model.rows[2].status, "Pendente");
        assert!(model.rows[0].attended);
        assert_eq!(model.counts, StatusCounts { total: 3, pending: 2, attended: 1 });
        assert!(model.has_status_column);
        assert!(!model.has_filters);
    }

    #[test]
    fn model_marks_rows_with_a_write_in_flight() {
        let mut ws = workspace();
        ws.prepare_toggle(1).expect("toggle should start");

        let model = dashboard_model(&ws, &ViewQuery::default());

        let saving: Vec<usize> = model
            .rows
            .iter()
            .filter(|r| r.saving)
            .map(|r| r.absolute_index)
            .collect();
        assert_eq!(saving, vec![1]);
    }

    #[test]
    fn empty_state_depends_on_active_filters() {
        let mut query = ViewQuery::default();
        query.set_search("zzz");

        let model = dashboard_model(&workspace(), &query);

        assert!(model.rows.is_empty());
        assert_eq!(empty_message(model.has_filters), "Nenhum paciente encontrado");
        assert_eq!(empty_message(false), "Nenhum paciente cadastrado");
    }

    #[test]
    fn rows_saving_block_reload() {
        let mut ws = workspace();
        assert!(!dashboard_model(&ws, &ViewQuery::default()).writes_in_flight);

        let update = ws.prepare_toggle(2).expect("toggle should start");
        assert!(dashboard_model(&ws, &ViewQuery::default()).writes_in_flight);

        ws.finish_toggle(&update, true).expect("toggle was pending");
        assert!(!dashboard_model(&ws, &ViewQuery::default()).writes_in_flight);
    }

    #[test]
    fn shrinking_reload_keeps_patients_visible() {
        let mut ws = workspace();
        let mut query = ViewQuery::with_page_size(2);
        query.set_page(2);
        assert_eq!(dashboard_model(&ws, &query).rows.len(), 1);

        ws.replace(vec![
            row(&["Nome", "Telefone", "CPF", "Status", "Último contato"]),
            row(&["Ana", "11987654321", "12345678901", "Pendente", "01/01/2024 10:00"]),
        ]);
        let model = dashboard_model(&ws, &query);

        assert_eq!(model.filtered_count, 1);
        assert_eq!(model.page, 1);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.range_label, "Página 1 de 1 • 1 de 1 itens");
        assert!(!model.has_filters);
    }

    #[test]
    fn range_label_reflects_the_page() {
        let mut query = ViewQuery::with_page_size(2);
        query.set_page(2);

        let model = dashboard_model(&workspace(), &query);

        assert_eq!(model.range_label, "Página 2 de 2 • 1 de 3 itens");
        assert_eq!(model.page_window, vec![1, 2]);
    }
}
