use dioxus::prelude::*;
use tracing::warn;

use crate::domain::entities::workspace::Workspace;
use crate::domain::format::input_kind;
use crate::domain::status::{ATTENDED_LABEL, PENDING_LABEL};

/// One input in the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub col: usize,
    pub label: String,
    pub value: String,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    StatusSelect,
    Input(&'static str),
}

/// Fields for the open edit session, one per header, in header order.
pub fn form_fields(workspace: &Workspace) -> Vec<FormField> {
    let Some(session) = workspace.session() else {
        return Vec::new();
    };
    let status_col = workspace.roles().status;
    workspace
        .sheet()
        .header()
        .iter()
        .enumerate()
        .map(|(col, label)| {
            let value = session.buffer.get(col).cloned().unwrap_or_default();
            if Some(col) == status_col {
                let value = if value.is_empty() {
                    PENDING_LABEL.to_string()
                } else {
                    value
                };
                FormField {
                    col,
                    label: label.clone(),
                    value,
                    kind: FieldKind::StatusSelect,
                }
            } else {
                FormField {
                    col,
                    label: label.clone(),
                    value,
                    kind: FieldKind::Input(input_kind(label).as_html()),
                }
            }
        })
        .collect()
}

#[component]
pub fn EditModal(
    mut workspace: Signal<Workspace>,
    on_save: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let (fields, saving, dirty) = {
        let current = workspace.read();
        let saving = current.session().is_some_and(|session| session.saving);
        let fields = form_fields(&current);
        let dirty = current.is_dirty();
        (fields, saving, dirty)
    };
    let save_label = if saving { "Salvando..." } else { "Salvar" };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.45); display: flex; align-items: center; justify-content: center; z-index: 1300;",
            div {
                style: "background: #fff; width: min(900px, 92vw); max-height: 90vh; display: flex; flex-direction: column; border-radius: 12px; box-shadow: 0 20px 40px rgba(0,0,0,0.25);",
                div {
                    style: "display: flex; justify-content: space-between; align-items: center; padding: 14px 20px; border-bottom: 1px solid #ddd;",
                    h3 { style: "margin: 0;", "Editar Paciente" }
                    button {
                        style: "border: none; background: none; font-size: 18px; cursor: pointer;",
                        disabled: saving,
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                div {
                    style: "padding: 20px; overflow-y: auto; display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px;",
                    {fields.into_iter().map(|field| {
                        let col = field.col;
                        rsx!(
                            div { key: "{col}",
                                label { style: "display: block; margin-bottom: 6px; font-weight: 600;", "{field.label}" }
                                {match field.kind {
                                    FieldKind::StatusSelect => rsx!(
                                        select {
                                            style: "width: 100%; padding: 8px 10px; border: 1px solid #bbb; border-radius: 6px;",
                                            value: "{field.value}",
                                            disabled: saving,
                                            onchange: move |event| {
                                                if let Err(err) = workspace.write().set_field(col, event.value()) {
                                                    warn!(col, error = %err, "field not updated");
                                                }
                                            },
                                            option { value: PENDING_LABEL, "{PENDING_LABEL}" }
                                            option { value: ATTENDED_LABEL, "{ATTENDED_LABEL}" }
                                        }
                                    ),
                                    FieldKind::Input(input_type) => rsx!(
                                        input {
                                            r#type: "{input_type}",
                                            style: "width: 100%; box-sizing: border-box; padding: 8px 10px; border: 1px solid #bbb; border-radius: 6px;",
                                            value: "{field.value}",
                                            disabled: saving,
                                            oninput: move |event| {
                                                if let Err(err) = workspace.write().set_field(col, event.value()) {
                                                    warn!(col, error = %err, "field not updated");
                                                }
                                            },
                                        }
                                    ),
                                }}
                            }
                        )
                    })}
                }
                div {
                    style: "display: flex; justify-content: flex-end; gap: 10px; padding: 14px 20px; border-top: 1px solid #ddd; background: #fafafa;",
                    button {
                        disabled: saving || !dirty,
                        onclick: move |_| {
                            if let Err(err) = workspace.write().reset_edit() {
                                warn!(error = %err, "edit not restored");
                            }
                        },
                        "Restaurar"
                    }
                    button {
                        disabled: saving,
                        onclick: move |_| on_close.call(()),
                        "Cancelar"
                    }
                    button {
                        style: "background: #2563eb; color: #fff; border: none; padding: 6px 16px; border-radius: 6px;",
                        disabled: saving,
                        onclick: move |_| on_save.call(()),
                        "{save_label}"
                    }
                }
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

    #[test]
    fn no_fields_without_an_open_session() {
        let workspace = Workspace::from_values(vec![row(&["Nome"]), row(&["Ana"])]);

        assert!(form_fields(&workspace).is_empty());
    }

    #[test]
    fn fields_follow_headers_and_input_kinds() {
        let mut workspace = Workspace::from_values(vec![
            row(&["Nome", "Email", "Telefone", "Status"]),
            row(&["Ana", "ana@x.com"]),
        ]);
        workspace.begin_edit(1).expect("row 1 is a record");

        let fields = form_fields(&workspace);

        assert_eq!(
            fields.iter().map(|f| f.kind).collect::<Vec<_>>(),
            vec![
                FieldKind::Input("text"),
                FieldKind::Input("email"),
                FieldKind::Input("tel"),
                FieldKind::StatusSelect,
            ]
        );
        assert_eq!(fields[0].value, "Ana");
        assert_eq!(fields[2].value, "");
        assert_eq!(fields[3].value, "Pendente");
    }

    #[test]
    fn rejected_changes_leave_the_form_untouched() {
        let mut workspace = Workspace::from_values(vec![
            row(&["Nome", "Status"]),
            row(&["Ana", "Atendido"]),
        ]);
        workspace.begin_edit(1).expect("row 1 is a record");
        workspace.prepare_save().expect("save should start");

        assert!(workspace.set_field(0, "Ana Maria").is_err());
        assert!(workspace.reset_edit().is_err());
        assert_eq!(form_fields(&workspace)[0].value, "Ana");
        assert_eq!(form_fields(&workspace)[1].value, "Atendido");
    }
}
