//! # OAuth client panel
//!
//! List, create, edit, and delete OAuth client registrations. A created
//! client's secret is shown exactly once, in a reveal panel with copy
//! buttons; once the panel is closed the secret is gone for good.

use api::{OAuthClientCredentials, OAuthClientInfo, SubmitOutcome};
use dioxus::prelude::*;

use crate::views::ModalOverlay;
use crate::{copy_to_clipboard, Notice, NoticeBanner};

/// What the client form is currently doing. `Edit` carries the id of the
/// client being edited, so there is no separate "are we editing" flag to
/// fall out of sync.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientFormMode {
    Hidden,
    Add,
    Edit { client_id: String },
}

impl ClientFormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Hidden)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Hidden | Self::Add => "Add OAuth Client",
            Self::Edit { .. } => "Edit OAuth Client",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Hidden | Self::Add => "Create Client",
            Self::Edit { .. } => "Save Changes",
        }
    }
}

#[component]
pub fn OauthClientsSection() -> Element {
    let mut clients = use_signal(Vec::<OAuthClientInfo>::new);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut form_mode = use_signal(|| ClientFormMode::Hidden);
    let mut form_name = use_signal(String::new);
    let mut form_redirect_uri = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut delete_target = use_signal(|| Option::<OAuthClientInfo>::None);
    let mut revealed = use_signal(|| Option::<OAuthClientCredentials>::None);

    let load_clients = move || async move {
        match api::list_oauth_clients().await {
            Ok(list) => clients.set(list),
            Err(e) => {
                tracing::error!("Failed to load OAuth clients: {e}");
                notice.set(Some(Notice::Error(
                    "Failed to load OAuth clients".to_string(),
                )));
            }
        }
    };

    let _loader = use_resource(move || async move {
        load_clients().await;
    });

    let show_add_form = move |_| {
        form_name.set(String::new());
        form_redirect_uri.set(String::new());
        form_mode.set(ClientFormMode::Add);
    };

    let mut hide_form = move || {
        form_mode.set(ClientFormMode::Hidden);
    };

    let mut edit_client = move |client_id: String| {
        spawn(async move {
            match api::get_oauth_client(client_id.clone()).await {
                Ok(client) => {
                    form_name.set(client.name);
                    form_redirect_uri.set(client.redirect_uri);
                    form_mode.set(ClientFormMode::Edit { client_id });
                }
                Err(e) => {
                    tracing::error!("Failed to load OAuth client: {e}");
                    notice.set(Some(Notice::from_outcome(SubmitOutcome::from_failure(
                        &e,
                        "Failed to load OAuth client",
                    ))));
                }
            }
        });
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            notice.set(None);
            saving.set(true);

            let result = match form_mode() {
                ClientFormMode::Hidden => {
                    saving.set(false);
                    return;
                }
                ClientFormMode::Add => {
                    api::create_oauth_client(form_name(), form_redirect_uri()).await
                }
                ClientFormMode::Edit { client_id } => {
                    api::update_oauth_client(client_id, form_name(), form_redirect_uri()).await
                }
            };

            match result {
                Ok(response) => {
                    notice.set(Some(Notice::Success(response.message)));
                    // Only the create path ships credentials; the reveal
                    // panel is the one chance to copy the secret.
                    if let Some(credentials) = response.client {
                        revealed.set(Some(credentials));
                    }
                    form_mode.set(ClientFormMode::Hidden);
                    load_clients().await;
                }
                Err(e) => {
                    tracing::error!("Failed to save OAuth client: {e}");
                    // Business errors ("OAuth client not found", validation)
                    // surface verbatim; only transport failures become the
                    // connectivity message.
                    notice.set(Some(Notice::from_outcome(SubmitOutcome::from_failure(
                        &e,
                        "Failed to save OAuth client",
                    ))));
                }
            }
            saving.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(target) = delete_target() else {
            return;
        };
        spawn(async move {
            notice.set(None);
            let outcome = SubmitOutcome::from_result(
                api::delete_oauth_client(target.client_id).await,
                "Failed to delete OAuth client",
            );
            // Only a successful delete refreshes the list.
            if outcome.is_success() {
                load_clients().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
            delete_target.set(None);
        });
    };

    rsx! {
        div {
            class: "settings-section",
            h2 { class: "view-section-title", "OAuth Clients" }

            NoticeBanner { notice: notice() }

            if let Some(credentials) = revealed() {
                div {
                    class: "credentials-panel",
                    h3 { "Client Credentials" }
                    p {
                        class: "form-help",
                        "Copy the client secret now. It will not be shown again."
                    }
                    div {
                        class: "credentials-row",
                        span { class: "credentials-label", "Client ID" }
                        code { "{credentials.client_id}" }
                        button {
                            r#type: "button",
                            onclick: {
                                let value = credentials.client_id.clone();
                                move |_| copy_to_clipboard(&value)
                            },
                            "Copy"
                        }
                    }
                    div {
                        class: "credentials-row",
                        span { class: "credentials-label", "Client secret" }
                        code { "{credentials.client_secret}" }
                        button {
                            r#type: "button",
                            onclick: {
                                let value = credentials.client_secret.clone();
                                move |_| copy_to_clipboard(&value)
                            },
                            "Copy"
                        }
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| revealed.set(None),
                        "Close"
                    }
                }
            }

            if clients().is_empty() {
                p { class: "form-help", "No OAuth clients registered." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Client ID" }
                            th { "Redirect URI" }
                            th { "" }
                        }
                    }
                    tbody {
                        for client in clients() {
                            tr {
                                key: "{client.client_id}",
                                td { "{client.name}" }
                                td { code { "{client.client_id}" } }
                                td { "{client.redirect_uri}" }
                                td {
                                    button {
                                        r#type: "button",
                                        onclick: {
                                            let client_id = client.client_id.clone();
                                            move |_| edit_client(client_id.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        r#type: "button",
                                        class: "danger",
                                        onclick: {
                                            let client = client.clone();
                                            move |_| delete_target.set(Some(client.clone()))
                                        },
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "form-actions",
                button {
                    r#type: "button",
                    class: "primary",
                    onclick: show_add_form,
                    "Add OAuth Client"
                }
            }

            if form_mode().is_open() {
                ModalOverlay {
                    on_close: move |_| hide_form(),
                    h3 { "{form_mode().title()}" }
                    form {
                        onsubmit: handle_submit,
                        div {
                            class: "form-field",
                            label { "Name" }
                            input {
                                r#type: "text",
                                value: form_name(),
                                oninput: move |evt: FormEvent| form_name.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Redirect URI" }
                            input {
                                r#type: "url",
                                placeholder: "https://example.com/callback",
                                value: form_redirect_uri(),
                                oninput: move |evt: FormEvent| form_redirect_uri.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-actions",
                            button {
                                r#type: "button",
                                onclick: move |_| hide_form(),
                                "Cancel"
                            }
                            button {
                                class: "primary",
                                r#type: "submit",
                                disabled: saving(),
                                "{form_mode().submit_label()}"
                            }
                        }
                    }
                }
            }

            if let Some(target) = delete_target() {
                ModalOverlay {
                    on_close: move |_| delete_target.set(None),
                    h3 { "Delete OAuth Client" }
                    p { "Delete the OAuth client \"{target.name}\"? Applications using it will stop working." }
                    div {
                        class: "form-actions",
                        button {
                            r#type: "button",
                            onclick: move |_| delete_target.set(None),
                            "Cancel"
                        }
                        button {
                            r#type: "button",
                            class: "danger",
                            onclick: confirm_delete,
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_mode_labels_follow_the_mode() {
        assert_eq!(ClientFormMode::Add.title(), "Add OAuth Client");
        assert_eq!(ClientFormMode::Add.submit_label(), "Create Client");

        let edit = ClientFormMode::Edit {
            client_id: "abc".into(),
        };
        assert_eq!(edit.title(), "Edit OAuth Client");
        assert_eq!(edit.submit_label(), "Save Changes");
    }

    #[test]
    fn hidden_mode_is_not_open() {
        assert!(!ClientFormMode::Hidden.is_open());
        assert!(ClientFormMode::Add.is_open());
        assert!(ClientFormMode::Edit { client_id: "x".into() }.is_open());
    }
}
