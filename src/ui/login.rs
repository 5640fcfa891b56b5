use dioxus::prelude::*;

use crate::ui::session::SessionContext;

const CARD_STYLE: &str = "max-width: 380px; margin: 80px auto; padding: 28px; background: #fff; border: 1px solid #ddd; border-radius: 14px; box-shadow: 0 10px 24px rgba(0,0,0,0.08);";
const INPUT_STYLE: &str = "width: 100%; box-sizing: border-box; padding: 10px 12px; border: 1px solid #bbb; border-radius: 8px;";

#[component]
pub fn LoginView(session: SessionContext, on_signed_in: EventHandler<()>) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut show_password = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    let can_submit = !loading() && !email().is_empty() && !password().is_empty();
    let password_type = if show_password() { "text" } else { "password" };
    let toggle_label = if show_password() { "Ocultar" } else { "Mostrar" };
    let submit_background = if can_submit { "#2563eb" } else { "#9ca3af" };

    rsx! {
        div { style: "{CARD_STYLE}",
            h2 { style: "margin: 0 0 4px 0;", "Acessar Sistema" }
            p { style: "margin: 0 0 20px 0; color: #555;", "Entre com suas credenciais" }

            if let Some(message) = error() {
                div {
                    style: "margin-bottom: 16px; padding: 10px 12px; background: #fef2f2; color: #991b1b; border: 1px solid #fecaca; border-radius: 8px;",
                    "{message}"
                }
            }

            form {
                onsubmit: move |event| {
                    event.prevent_default();
                    if loading() {
                        return;
                    }
                    let session = session.clone();
                    let email_value = email();
                    let password_value = password();
                    loading.set(true);
                    error.set(None);
                    spawn(async move {
                        let outcome = session.sign_in(email_value, password_value).await;
                        loading.set(false);
                        match outcome {
                            Ok(()) => on_signed_in.call(()),
                            Err(err) => error.set(Some(err.user_message())),
                        }
                    });
                },
                div { style: "margin-bottom: 14px;",
                    label { style: "display: block; margin-bottom: 6px; font-weight: 600;", "Email" }
                    input {
                        id: "email",
                        r#type: "email",
                        style: "{INPUT_STYLE}",
                        placeholder: "seu@email.com",
                        disabled: loading(),
                        value: email(),
                        oninput: move |event| email.set(event.value()),
                    }
                }
                div { style: "margin-bottom: 20px;",
                    div { style: "display: flex; justify-content: space-between; margin-bottom: 6px;",
                        label { style: "font-weight: 600;", "Senha" }
                        button {
                            r#type: "button",
                            style: "border: none; background: none; color: #2563eb; cursor: pointer;",
                            disabled: loading(),
                            onclick: move |_| show_password.set(!show_password()),
                            "{toggle_label}"
                        }
                    }
                    input {
                        id: "password",
                        r#type: "{password_type}",
                        style: "{INPUT_STYLE}",
                        placeholder: "••••••••",
                        disabled: loading(),
                        value: password(),
                        oninput: move |event| password.set(event.value()),
                    }
                }
                button {
                    r#type: "submit",
                    style: "width: 100%; padding: 12px; border: none; border-radius: 10px; color: #fff; font-weight: 600; background: {submit_background}; cursor: pointer;",
                    disabled: !can_submit,
                    if loading() { "Entrando..." } else { "Entrar" }
                }
            }
        }
    }
}
