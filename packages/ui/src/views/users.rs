//! # User administration page
//!
//! Administrators list every account, create accounts, grant or revoke
//! the admin role, and delete accounts. The session user's own row is
//! read-only here: role changes and deletion of one's own account are
//! refused by the server and never offered by the UI.

use api::{SubmitOutcome, UserInfo};
use dioxus::prelude::*;

use crate::views::ModalOverlay;
use crate::{use_auth, Notice, NoticeBanner};

/// Whether a row offers the role toggle and the delete button. The
/// session user's own row never does.
fn can_manage(row: &UserInfo, session_username: &str) -> bool {
    row.username != session_username
}

#[component]
pub fn UsersView() -> Element {
    let auth = use_auth();

    let mut users = use_signal(Vec::<UserInfo>::new);
    let mut notice = use_signal(|| Option::<Notice>::None);
    let mut show_add_form = use_signal(|| false);
    let mut form_username = use_signal(String::new);
    let mut form_password = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut delete_target = use_signal(|| Option::<String>::None);

    let session_username = move || auth().username().unwrap_or("").to_string();

    let load_users = move || async move {
        match api::list_users().await {
            Ok(list) => users.set(list),
            Err(e) => {
                tracing::error!("Failed to load users: {e}");
                notice.set(Some(Notice::from_outcome(SubmitOutcome::from_failure(
                    &e,
                    "Failed to load users",
                ))));
            }
        }
    };

    let _loader = use_resource(move || async move {
        load_users().await;
    });

    let open_add_form = move |_| {
        form_username.set(String::new());
        form_password.set(String::new());
        show_add_form.set(true);
    };

    let handle_add = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            notice.set(None);

            let username = form_username().trim().to_string();
            let password = form_password();
            if username.is_empty() || password.is_empty() {
                notice.set(Some(Notice::error("Username and password are required")));
                return;
            }

            saving.set(true);
            let outcome = SubmitOutcome::from_result(
                api::create_user(username, password).await,
                "Failed to create user",
            );
            if outcome.is_success() {
                show_add_form.set(false);
                load_users().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
            saving.set(false);
        });
    };

    let mut toggle_admin = move |username: String, admin: bool| {
        spawn(async move {
            notice.set(None);
            let outcome = SubmitOutcome::from_result(
                api::set_user_admin(username, admin).await,
                "Failed to update role",
            );
            if outcome.is_success() {
                load_users().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
        });
    };

    let confirm_delete = move |_| {
        let Some(username) = delete_target() else {
            return;
        };
        spawn(async move {
            notice.set(None);
            let outcome = SubmitOutcome::from_result(
                api::delete_user(username).await,
                "Failed to delete user",
            );
            // Only a successful delete refreshes the list.
            if outcome.is_success() {
                load_users().await;
            }
            notice.set(Some(Notice::from_outcome(outcome)));
            delete_target.set(None);
        });
    };

    rsx! {
        div {
            class: "view-page",

            h1 { class: "view-title", "Users" }

            NoticeBanner { notice: notice() }

            if !auth().is_admin() {
                p { class: "form-help", "Administrator access required." }
            } else {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Username" }
                            th { "Email" }
                            th { "Admin" }
                            th { "" }
                        }
                    }
                    tbody {
                        for row in users() {
                            tr {
                                key: "{row.username}",
                                td { "{row.username}" }
                                td { {row.email.clone().unwrap_or_default()} }
                                td {
                                    input {
                                        r#type: "checkbox",
                                        checked: row.admin,
                                        disabled: !can_manage(&row, &session_username()),
                                        onchange: {
                                            let username = row.username.clone();
                                            move |evt: FormEvent| {
                                                toggle_admin(username.clone(), evt.checked())
                                            }
                                        },
                                    }
                                }
                                td {
                                    if can_manage(&row, &session_username()) {
                                        button {
                                            r#type: "button",
                                            class: "danger",
                                            onclick: {
                                                let username = row.username.clone();
                                                move |_| delete_target.set(Some(username.clone()))
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
                        onclick: open_add_form,
                        "Add User"
                    }
                }
            }

            if show_add_form() {
                ModalOverlay {
                    on_close: move |_| show_add_form.set(false),
                    h3 { "Add User" }
                    form {
                        onsubmit: handle_add,
                        div {
                            class: "form-field",
                            label { "Username" }
                            input {
                                r#type: "text",
                                value: form_username(),
                                oninput: move |evt: FormEvent| form_username.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-field",
                            label { "Password" }
                            input {
                                r#type: "password",
                                placeholder: "min 8 characters",
                                value: form_password(),
                                oninput: move |evt: FormEvent| form_password.set(evt.value()),
                            }
                        }
                        div {
                            class: "form-actions",
                            button {
                                r#type: "button",
                                onclick: move |_| show_add_form.set(false),
                                "Cancel"
                            }
                            button {
                                class: "primary",
                                r#type: "submit",
                                disabled: saving(),
                                "Create"
                            }
                        }
                    }
                }
            }

            if let Some(username) = delete_target() {
                ModalOverlay {
                    on_close: move |_| delete_target.set(None),
                    h3 { "Delete User" }
                    p { "Delete the account \"{username}\"? Their OAuth clients and data entries are removed with it." }
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

    fn row(username: &str) -> UserInfo {
        UserInfo {
            username: username.to_string(),
            admin: false,
            email: None,
            phone: None,
            real_name: None,
            bio: None,
            location: None,
            website: None,
            avatar_url: None,
        }
    }

    #[test]
    fn own_row_is_read_only() {
        assert!(!can_manage(&row("alice"), "alice"));
        assert!(can_manage(&row("bob"), "alice"));
    }
}
