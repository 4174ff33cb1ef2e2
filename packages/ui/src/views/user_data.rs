//! # User data page
//!
//! Key/value entries attached to an account. Entries are added and
//! edited through a modal; the key is fixed once created. Administrators
//! can act on another account by entering its username in the modal.

use api::{username_override, SubmitOutcome, UserDataEntry};
use dioxus::prelude::*;

use crate::views::ModalOverlay;
use crate::{use_auth, Notice, NoticeBanner};

/// Whether the entry modal creates a new key or rewrites the value of an
/// existing one. `Edit` pins the key so it cannot change mid-flight.
#[derive(Debug, Clone, PartialEq)]
pub enum DataFormMode {
    Add,
    Edit { key: String },
}

impl DataFormMode {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Add => "Add Data",
            Self::Edit { .. } => "Edit Data",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Edit { .. } => "Save",
        }
    }

    /// Prefix for the failure notice when the save does not go through.
    pub fn failure_context(&self) -> &'static str {
        match self {
            Self::Add => "Failed to add data",
            Self::Edit { .. } => "Failed to update data",
        }
    }
}

#[component]
pub fn UserDataView() -> Element {
    let auth = use_auth();

    let mut entries = use_signal(Vec::<UserDataEntry>::new);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut filter_username = use_signal(String::new);
    let mut form_mode = use_signal(|| Option::<DataFormMode>::None);
    let mut form_key = use_signal(String::new);
    let mut form_value = use_signal(String::new);
    let mut form_username = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut delete_target = use_signal(|| Option::<UserDataEntry>::None);

    let session_username = move || auth().username().unwrap_or("").to_string();

    // Admin filter: a non-empty username other than our own lists that
    // account's entries instead.
    let filter_target = move || username_override(&filter_username(), &session_username());

    let load_entries = move || async move {
        match api::list_user_data(filter_target()).await {
            Ok(list) => entries.set(list),
            Err(e) => {
                tracing::error!("Failed to load user data: {e}");
                notice.set(Some(Notice::error("Failed to load user data")));
            }
        }
    };

    let _loader = use_resource(move || async move {
        load_entries().await;
    });

    let show_add_form = move |_| {
        form_key.set(String::new());
        form_value.set(String::new());
        form_username.set(session_username());
        form_mode.set(Some(DataFormMode::Add));
    };

    let mut edit_entry = move |entry: UserDataEntry| {
        form_key.set(entry.key.clone());
        form_value.set(entry.value);
        form_username.set(entry.username);
        form_mode.set(Some(DataFormMode::Edit { key: entry.key }));
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(mode) = form_mode() else {
            return;
        };
        spawn(async move {
            notice.set(None);

            let key = match &mode {
                DataFormMode::Add => form_key().trim().to_string(),
                DataFormMode::Edit { key } => key.clone(),
            };
            let value = form_value();

            // Reject empties before anything leaves the page.
            if key.is_empty() || value.trim().is_empty() {
                notice.set(Some(Notice::error("Key and value are required")));
                return;
            }

            // The payload names a username only when it differs from the
            // session user's.
            let target = username_override(&form_username(), &session_username());

            saving.set(true);
            let outcome = SubmitOutcome::from_result(
                api::save_user_data(key, value, target).await,
                mode.failure_context(),
            );
            if outcome.is_success() {
                form_mode.set(None);
                load_entries().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
            saving.set(false);
        });
    };

    let confirm_delete = move |_| {
        let Some(target) = delete_target() else {
            return;
        };
        spawn(async move {
            notice.set(None);
            let username = username_override(&target.username, &session_username());
            let outcome = SubmitOutcome::from_result(
                api::delete_user_data(target.key, username).await,
                "Failed to delete data",
            );
            // Only a successful delete refreshes the list.
            if outcome.is_success() {
                load_entries().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
            delete_target.set(None);
        });
    };

    rsx! {
        div {
            class: "view-page",

            h1 { class: "view-title", "User Data" }

            NoticeBanner { notice: notice() }

            if auth().is_admin() {
                div {
                    class: "form-field",
                    label { "Username" }
                    input {
                        r#type: "text",
                        placeholder: session_username(),
                        value: filter_username(),
                        oninput: move |evt: FormEvent| filter_username.set(evt.value()),
                    }
                    button {
                        r#type: "button",
                        onclick: move |_| {
                            spawn(async move {
                                load_entries().await;
                            });
                        },
                        "Load"
                    }
                    p {
                        class: "form-help",
                        "Leave blank to manage your own data."
                    }
                }
            }

            if entries().is_empty() {
                p { class: "form-help", "No data stored." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Key" }
                            th { "Value" }
                            th { "" }
                        }
                    }
                    tbody {
                        for entry in entries() {
                            tr {
                                key: "{entry.key}",
                                td { code { "{entry.key}" } }
                                td { "{entry.value}" }
                                td {
                                    button {
                                        r#type: "button",
                                        onclick: {
                                            let entry = entry.clone();
                                            move |_| edit_entry(entry.clone())
                                        },
                                        "Edit"
                                    }
                                    button {
                                        r#type: "button",
                                        class: "danger",
                                        onclick: {
                                            let entry = entry.clone();
                                            move |_| delete_target.set(Some(entry.clone()))
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
                    "Add Data"
                }
            }

            if let Some(mode) = form_mode() {
                ModalOverlay {
                    on_close: move |_| form_mode.set(None),
                    h3 { "{mode.title()}" }
                    form {
                        onsubmit: handle_submit,
                        if auth().is_admin() {
                            div {
                                class: "form-field",
                                label { "Username" }
                                input {
                                    r#type: "text",
                                    value: form_username(),
                                    oninput: move |evt: FormEvent| form_username.set(evt.value()),
                                }
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Key" }
                            input {
                                r#type: "text",
                                readonly: mode.is_edit(),
                                value: form_key(),
                                oninput: move |evt: FormEvent| form_key.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Value" }
                            textarea {
                                rows: 3,
                                value: form_value(),
                                oninput: move |evt: FormEvent| form_value.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-actions",
                            button {
                                r#type: "button",
                                onclick: move |_| form_mode.set(None),
                                "Cancel"
                            }
                            button {
                                class: "primary",
                                r#type: "submit",
                                disabled: saving(),
                                "{mode.submit_label()}"
                            }
                        }
                    }
                }
            }

            if let Some(target) = delete_target() {
                ModalOverlay {
                    on_close: move |_| delete_target.set(None),
                    h3 { "Delete Data" }
                    p { "Delete the entry \"{target.key}\"? This cannot be undone." }
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
    fn edit_mode_pins_the_key() {
        let mode = DataFormMode::Edit { key: "theme".into() };
        assert!(mode.is_edit());
        assert_eq!(mode.title(), "Edit Data");
        assert_eq!(mode.submit_label(), "Save");
        assert_eq!(mode.failure_context(), "Failed to update data");
    }

    #[test]
    fn add_mode_labels() {
        assert!(!DataFormMode::Add.is_edit());
        assert_eq!(DataFormMode::Add.title(), "Add Data");
        assert_eq!(DataFormMode::Add.failure_context(), "Failed to add data");
    }
}
