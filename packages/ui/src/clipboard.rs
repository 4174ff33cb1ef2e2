//! Copy-to-clipboard for the credential reveal panel.

/// Write `text` to the system clipboard, fire-and-forget. Off the web
/// platform this is a logged no-op.
pub fn copy_to_clipboard(text: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let clipboard = window.navigator().clipboard();
        let text = text.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) =
                wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text)).await
            {
                tracing::warn!("clipboard write failed: {e:?}");
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::debug!("clipboard unavailable, not copying {} bytes", text.len());
    }
}
