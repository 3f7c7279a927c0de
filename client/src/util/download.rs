//! Save text to a file through a temporary object URL.
//!
//! Browser-only; the SSR build is a no-op.

/// Offer `contents` to the user as a plain-text download named `file_name`.
///
/// # Errors
///
/// Returns a description of the failing DOM call.
pub fn save_text(file_name: &str, contents: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let parts = js_sys::Array::of1(&wasm_bindgen::JsValue::from_str(contents));
        let props = web_sys::BlobPropertyBag::new();
        props.set_type("text/plain");
        let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &props)
            .map_err(|e| format!("blob: {e:?}"))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| format!("object url: {e:?}"))?;

        let anchor = document
            .create_element("a")
            .map_err(|e| format!("anchor: {e:?}"))?
            .dyn_into::<web_sys::HtmlAnchorElement>()
            .map_err(|_| "anchor cast failed".to_owned())?;
        anchor.set_href(&url);
        anchor.set_download(file_name);
        anchor.click();

        let _ = web_sys::Url::revoke_object_url(&url);
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (file_name, contents);
        Err("downloads are only available in the browser".to_owned())
    }
}
