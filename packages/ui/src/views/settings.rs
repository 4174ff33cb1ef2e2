use api::{AvatarUpload, ProfileUpdate, ServerConfig, SmtpSettings, SubmitOutcome};
use dioxus::prelude::*;

use crate::views::OauthClientsSection;
use crate::{use_auth, Notice, NoticeBanner};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// The settings page: profile, server configuration (administrators
/// only), and the OAuth client panel.
#[component]
pub fn SettingsView() -> Element {
    let auth = use_auth();

    // Profile state
    let mut email = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut real_name = use_signal(String::new);
    let mut bio = use_signal(String::new);
    let mut location = use_signal(String::new);
    let mut website = use_signal(String::new);
    let mut avatar = use_signal(|| Option::<AvatarUpload>::None);
    let mut profile_notice = use_signal(|| Option::<Notice>::None);
    let mut profile_saving = use_signal(|| false);

    // Server configuration state. The typed signals do the form shaping:
    // checkboxes are booleans, the limits are integers, SMTP fields
    // assemble into the nested record on save.
    let mut server_name = use_signal(String::new);
    let mut allow_registration = use_signal(|| true);
    let mut max_users = use_signal(|| 1000u32);
    let mut session_timeout = use_signal(|| 3600u32);
    let mut log_level = use_signal(|| "info".to_string());
    let mut maintenance_mode = use_signal(|| false);
    let mut maintenance_message = use_signal(String::new);
    let mut smtp_enabled = use_signal(|| false);
    let mut smtp_server = use_signal(String::new);
    let mut smtp_port = use_signal(|| 587u16);
    let mut smtp_username = use_signal(String::new);
    let mut smtp_password = use_signal(String::new);
    let mut smtp_use_tls = use_signal(|| true);
    let mut smtp_from = use_signal(String::new);
    let mut config_notice = use_signal(|| Option::<Notice>::None);
    let mut config_saving = use_signal(|| false);

    // Load current profile + configuration on mount
    let _loader = use_resource(move || async move {
        if let Ok(Some(user)) = api::get_current_user().await {
            email.set(user.email.unwrap_or_default());
            phone.set(user.phone.unwrap_or_default());
            real_name.set(user.real_name.unwrap_or_default());
            bio.set(user.bio.unwrap_or_default());
            location.set(user.location.unwrap_or_default());
            website.set(user.website.unwrap_or_default());

            if user.admin {
                if let Ok(config) = api::get_server_config().await {
                    server_name.set(config.server_name);
                    allow_registration.set(config.allow_registration);
                    max_users.set(config.max_users);
                    session_timeout.set(config.session_timeout_secs);
                    log_level.set(config.log_level);
                    maintenance_mode.set(config.maintenance_mode);
                    maintenance_message.set(config.maintenance_message);
                    smtp_enabled.set(config.smtp_settings.enabled);
                    smtp_server.set(config.smtp_settings.server);
                    smtp_port.set(config.smtp_settings.port);
                    smtp_username.set(config.smtp_settings.username);
                    smtp_password.set(config.smtp_settings.password);
                    smtp_use_tls.set(config.smtp_settings.use_tls);
                    smtp_from.set(config.smtp_settings.from_email);
                }
            }
        }
    });

    let handle_profile_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            profile_notice.set(None);
            profile_saving.set(true);

            let profile = ProfileUpdate {
                email: Some(email()),
                phone: Some(phone()),
                real_name: Some(real_name()),
                bio: Some(bio()),
                location: Some(location()),
                website: Some(website()),
                avatar: avatar(),
            };

            let outcome = SubmitOutcome::from_result(
                api::update_profile(profile).await,
                "Failed to save profile",
            );
            if outcome.is_success() {
                avatar.set(None);
            }
            profile_notice.set(Some(Notice::from_outcome(outcome)));
            profile_saving.set(false);
        });
    };

    let handle_avatar_pick = move |evt: FormEvent| {
        if let Some(file) = evt.files().first().cloned() {
            spawn(async move {
                if let Ok(bytes) = file.read_bytes().await {
                    avatar.set(Some(AvatarUpload {
                        filename: file.name(),
                        bytes: bytes.to_vec(),
                    }));
                }
            });
        }
    };

    let handle_config_save = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            config_notice.set(None);
            config_saving.set(true);

            let config = ServerConfig {
                server_name: server_name(),
                allow_registration: allow_registration(),
                max_users: max_users(),
                session_timeout_secs: session_timeout(),
                log_level: log_level(),
                maintenance_mode: maintenance_mode(),
                maintenance_message: maintenance_message(),
                smtp_settings: SmtpSettings {
                    enabled: smtp_enabled(),
                    server: smtp_server(),
                    port: smtp_port(),
                    username: smtp_username(),
                    password: smtp_password(),
                    use_tls: smtp_use_tls(),
                    from_email: smtp_from(),
                },
            };

            let outcome = SubmitOutcome::from_result(
                api::save_server_config(config).await,
                "Failed to save server configuration",
            );
            config_notice.set(Some(Notice::from_outcome(outcome)));
            config_saving.set(false);
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "view-page",

            h1 { class: "view-title", "Settings" }

            // Profile section
            div {
                class: "settings-section",
                h2 { class: "view-section-title", "Profile" }

                NoticeBanner { notice: profile_notice() }

                form {
                    onsubmit: handle_profile_save,

                    div {
                        class: "form-field",
                        label { "Email" }
                        input {
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Phone" }
                        input {
                            r#type: "text",
                            value: phone(),
                            oninput: move |evt: FormEvent| phone.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Name" }
                        input {
                            r#type: "text",
                            value: real_name(),
                            oninput: move |evt: FormEvent| real_name.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Bio" }
                        textarea {
                            rows: 3,
                            value: bio(),
                            oninput: move |evt: FormEvent| bio.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Location" }
                        input {
                            r#type: "text",
                            value: location(),
                            oninput: move |evt: FormEvent| location.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Website" }
                        input {
                            r#type: "url",
                            value: website(),
                            oninput: move |evt: FormEvent| website.set(evt.value()),
                        }
                    }

                    div {
                        class: "form-field",
                        label { "Avatar" }
                        input {
                            r#type: "file",
                            accept: "image/*",
                            onchange: handle_avatar_pick,
                        }
                        if let Some(picked) = avatar() {
                            p { class: "form-help", "Selected: {picked.filename}" }
                        }
                    }

                    div {
                        class: "form-actions",
                        button {
                            class: "primary",
                            r#type: "submit",
                            disabled: profile_saving(),
                            if profile_saving() { "Saving..." } else { "Save Profile" }
                        }
                    }
                }
            }

            // Server configuration (administrators only)
            if auth().is_admin() {
                div {
                    class: "settings-section",
                    h2 { class: "view-section-title", "Server Configuration" }

                    NoticeBanner { notice: config_notice() }

                    form {
                        onsubmit: handle_config_save,

                        div {
                            class: "form-field",
                            label { "Server name" }
                            input {
                                r#type: "text",
                                value: server_name(),
                                oninput: move |evt: FormEvent| server_name.set(evt.value()),
                            }
                        }

                        div {
                            class: "form-field form-checkbox",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: allow_registration(),
                                    onchange: move |evt: FormEvent| allow_registration.set(evt.checked()),
                                }
                                "Allow registration"
                            }
                        }

                        div {
                            class: "form-field",
                            label { "Maximum users" }
                            input {
                                r#type: "number",
                                min: "1",
                                value: "{max_users()}",
                                oninput: move |evt: FormEvent| {
                                    if let Ok(v) = evt.value().parse::<u32>() {
                                        max_users.set(v);
                                    }
                                },
                            }
                        }

                        div {
                            class: "form-field",
                            label { "Session timeout (seconds)" }
                            input {
                                r#type: "number",
                                min: "60",
                                value: "{session_timeout()}",
                                oninput: move |evt: FormEvent| {
                                    if let Ok(v) = evt.value().parse::<u32>() {
                                        session_timeout.set(v);
                                    }
                                },
                            }
                        }

                        div {
                            class: "form-field",
                            label { "Log level" }
                            select {
                                value: log_level(),
                                onchange: move |evt: FormEvent| log_level.set(evt.value()),
                                option { value: "debug", "debug" }
                                option { value: "info", "info" }
                                option { value: "warning", "warning" }
                                option { value: "error", "error" }
                            }
                        }

                        div {
                            class: "form-field form-checkbox",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: maintenance_mode(),
                                    onchange: move |evt: FormEvent| maintenance_mode.set(evt.checked()),
                                }
                                "Maintenance mode"
                            }
                        }

                        div {
                            class: "form-field",
                            label { "Maintenance message" }
                            textarea {
                                rows: 2,
                                value: maintenance_message(),
                                oninput: move |evt: FormEvent| maintenance_message.set(evt.value()),
                            }
                        }

                        h3 { class: "view-subsection-title", "SMTP" }

                        div {
                            class: "form-field form-checkbox",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: smtp_enabled(),
                                    onchange: move |evt: FormEvent| smtp_enabled.set(evt.checked()),
                                }
                                "Enable outbound mail"
                            }
                        }

                        div {
                            class: "form-field",
                            label { "SMTP server" }
                            input {
                                r#type: "text",
                                placeholder: "smtp.example.com",
                                value: smtp_server(),
                                oninput: move |evt: FormEvent| smtp_server.set(evt.value()),
                            }
                        }

                        div {
                            class: "form-field",
                            label { "SMTP port" }
                            input {
                                r#type: "number",
                                min: "1",
                                max: "65535",
                                value: "{smtp_port()}",
                                oninput: move |evt: FormEvent| {
                                    if let Ok(v) = evt.value().parse::<u16>() {
                                        smtp_port.set(v);
                                    }
                                },
                            }
                        }

                        div {
                            class: "form-field",
                            label { "SMTP username" }
                            input {
                                r#type: "text",
                                value: smtp_username(),
                                oninput: move |evt: FormEvent| smtp_username.set(evt.value()),
                            }
                        }

                        div {
                            class: "form-field",
                            label { "SMTP password" }
                            input {
                                r#type: "password",
                                value: smtp_password(),
                                oninput: move |evt: FormEvent| smtp_password.set(evt.value()),
                            }
                        }

                        div {
                            class: "form-field form-checkbox",
                            label {
                                input {
                                    r#type: "checkbox",
                                    checked: smtp_use_tls(),
                                    onchange: move |evt: FormEvent| smtp_use_tls.set(evt.checked()),
                                }
                                "Use TLS"
                            }
                        }

                        div {
                            class: "form-field",
                            label { "Sender address" }
                            input {
                                r#type: "email",
                                placeholder: "noreply@example.com",
                                value: smtp_from(),
                                oninput: move |evt: FormEvent| smtp_from.set(evt.value()),
                            }
                        }

                        div {
                            class: "form-actions",
                            button {
                                class: "primary",
                                r#type: "submit",
                                disabled: config_saving(),
                                if config_saving() { "Saving..." } else { "Save Server Configuration" }
                            }
                        }
                    }
                }
            }

            // OAuth clients
            OauthClientsSection {}
        }
    }
}
