//! Browser file plumbing for export and import.

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, File, FileReader, HtmlAnchorElement, Url};

/// How long a download's object URL outlives the click that started it.
/// Revoking right after `click()` aborts the download in some browsers.
const REVOKE_DELAY_MS: i32 = 10_000;

/// Offers `text` as a JSON file download named `filename`.
///
/// Returns the object URL backing the download. It stays valid for
/// [`REVOKE_DELAY_MS`] and is then released.
pub fn download_json(filename: &str, text: &str) -> Result<String, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let document = window
		.document()
		.ok_or_else(|| JsValue::from_str("no document"))?;

	let parts = js_sys::Array::of1(&JsValue::from_str(text));
	let options = BlobPropertyBag::new();
	options.set_type("application/json");
	let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
	let url = Url::create_object_url_with_blob(&blob)?;

	let link: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
	link.set_href(&url);
	link.set_download(filename);
	link.click();

	let stale = url.clone();
	let revoke = Closure::once_into_js(move || {
		let _ = Url::revoke_object_url(&stale);
	});
	window.set_timeout_with_callback_and_timeout_and_arguments_0(
		revoke.unchecked_ref(),
		REVOKE_DELAY_MS,
	)?;
	Ok(url)
}

/// Reads `file` as text and hands the result to `on_load`.
///
/// The callback runs once, on the event loop, after the read finishes.
pub fn read_text(file: &File, on_load: impl FnOnce(String) + 'static) -> Result<(), JsValue> {
	let reader = FileReader::new()?;
	let reader_done = reader.clone();
	let callback = Closure::once_into_js(move || match reader_done.result() {
		Ok(value) => match value.as_string() {
			Some(text) => on_load(text),
			None => warn!("topo-map: file reader produced no text"),
		},
		Err(e) => warn!("topo-map: file read failed: {:?}", e),
	});
	reader.set_onload(Some(callback.unchecked_ref()));
	reader.read_as_text(file)
}
