use crate::engine::js_error_message;
use common::{AppError, ElementIds, Hyperparameters, ImageInput, SampleImage};
use log::{error, warn};
use pipeline::{ArtifactFile, Downloader, ResultTable, SampleSlots, View};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, File, HtmlAnchorElement, HtmlInputElement};

/// The page regions, looked up by id on every access
pub struct DomView {
    document: Document,
    ids: ElementIds,
}

impl DomView {
    pub fn new(document: Document, ids: ElementIds) -> Self {
        Self { document, ids }
    }

    fn element(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", id)))
    }

    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok())
    }

    fn set_text(&self, id: &str, text: &str) {
        match self.element(id) {
            Ok(element) => element.set_text_content(Some(text)),
            Err(e) => error!("cannot write error text: {}", js_error_message(&e)),
        }
    }

    fn set_html(&self, id: &str, html: &str) {
        match self.element(id) {
            Ok(element) => element.set_inner_html(html),
            Err(e) => error!("cannot render: {}", js_error_message(&e)),
        }
    }

    /// First file of the upload control, if any was picked
    pub fn upload(&self) -> Option<UploadedFile> {
        self.input(&self.ids.upload_input)
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
            .map(UploadedFile)
    }

    /// Markup next to the checked sample radio
    pub fn selected_sample(&self) -> Option<ImageInput> {
        let checked = match self.document.query_selector(r#"input[name="image"]:checked"#) {
            Ok(checked) => checked?,
            Err(e) => {
                warn!("sample lookup failed: {}", js_error_message(&e));
                return None;
            }
        };
        checked
            .next_element_sibling()
            .map(|image| ImageInput::Sample(SampleImage::new(image.outer_html())))
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        let value = |id: &str| self.input(id).map(|i| i.value()).unwrap_or_default();
        Hyperparameters::new(
            value(&self.ids.hidden_neurons),
            value(&self.ids.training_rounds),
            value(&self.ids.learning_rate),
        )
    }
}

impl View for DomView {
    fn clear_error(&self) {
        self.set_text(&self.ids.error_text, "");
    }

    fn show_error(&self, message: &str) {
        self.set_text(&self.ids.error_text, message);
    }

    fn show_results(&self, table: &ResultTable) {
        self.set_html(&self.ids.result_table, &table.to_html());
    }

    fn show_samples(&self, slots: &SampleSlots) {
        for (id, slot) in self.ids.sample_slots.iter().zip(slots.slots()) {
            self.set_html(id, &slot.to_html());
        }
    }
}

/// A file from the upload control
pub struct UploadedFile(File);

impl ArtifactFile for UploadedFile {
    fn name(&self) -> String {
        self.0.name()
    }

    async fn read_text(&self) -> Result<String, String> {
        let text = JsFuture::from(self.0.text())
            .await
            .map_err(|e| js_error_message(&e))?;
        text.as_string()
            .ok_or_else(|| "file content is not text".to_string())
    }
}

/// Offers downloads through a throwaway `<a download>` element
pub struct AnchorDownloader {
    document: Document,
}

impl AnchorDownloader {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn click_link(&self, filename: &str, contents: &str) -> Result<(), JsValue> {
        let href = format!(
            "data:text/plain;charset=utf-8,{}",
            String::from(js_sys::encode_uri_component(contents))
        );

        let anchor = self
            .document
            .create_element("a")?
            .dyn_into::<HtmlAnchorElement>()?;
        anchor.set_href(&href);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none")?;

        // Attached, clicked and removed in the same turn
        let body = self.document.body().ok_or("no body")?;
        body.append_child(&anchor)?;
        anchor.click();
        body.remove_child(&anchor)?;
        Ok(())
    }
}

impl Downloader for AnchorDownloader {
    fn offer(&self, filename: &str, contents: &str) -> Result<(), AppError> {
        self.click_link(filename, contents)
            .map_err(|e| AppError::Download(js_error_message(&e)))
    }
}
