//! Inline success/error notices shown next to forms.

use api::SubmitOutcome;
use dioxus::prelude::*;

/// A transient message resulting from a save or delete.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success(text.into())
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::Error(text.into())
    }

    pub fn from_outcome(outcome: SubmitOutcome) -> Self {
        match outcome {
            SubmitOutcome::Success(text) => Self::Success(text),
            SubmitOutcome::Failure(text) => Self::Error(text),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Error(text) => text,
        }
    }

    fn css_class(&self) -> &'static str {
        match self {
            Self::Success(_) => "notice notice-success",
            Self::Error(_) => "notice notice-error",
        }
    }
}

/// Renders a notice, or nothing.
#[component]
pub fn NoticeBanner(notice: Option<Notice>) -> Element {
    match notice {
        Some(notice) => rsx! {
            div {
                class: notice.css_class(),
                "{notice.text()}"
            }
        },
        None => rsx! {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::ApiResponse;

    #[test]
    fn outcome_maps_onto_notice_kind() {
        let ok = Notice::from_outcome(SubmitOutcome::from_result(
            Ok(ApiResponse::success("saved")),
            "Failed",
        ));
        assert_eq!(ok, Notice::Success("saved".to_string()));

        let err = Notice::from_outcome(SubmitOutcome::from_result(
            Ok(ApiResponse::default()),
            "Failed to update data",
        ));
        assert_eq!(
            err,
            Notice::Error("Failed to update data: unknown error".to_string())
        );
    }
}
