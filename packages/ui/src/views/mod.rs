mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod settings;
pub use settings::SettingsView;

mod oauth_clients;
pub use oauth_clients::{ClientFormMode, OauthClientsSection};

mod user_data;
pub use user_data::{DataFormMode, UserDataView};

mod users;
pub use users::UsersView;
