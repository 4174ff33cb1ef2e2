use dioxus::prelude::*;

use ui::{use_auth, LogoutButton};

use crate::Route;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

const LOGO: Asset = asset!("/assets/logo.png");

/// Top bar plus page body for the signed-in pages.
#[component]
pub fn AppShell(children: Element) -> Element {
    let auth = use_auth();

    // Signed-out visitors go to the login page.
    if !auth().loading && auth().user.is_none() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    }

    rsx! {
        header {
            class: "app-header",
            img { class: "app-logo", src: LOGO, alt: "Userhub" }
            nav {
                Link { to: Route::Settings {}, "Settings" }
                Link { to: Route::UserData {}, "User Data" }
                if auth().is_admin() {
                    Link { to: Route::Users {}, "Users" }
                }
            }
            div {
                class: "app-header-user",
                if let Some(name) = auth().username().map(str::to_string) {
                    span { "{name}" }
                }
                LogoutButton {}
            }
        }
        main {
            {children}
        }
    }
}
