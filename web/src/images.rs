use pairflip_core::{GameError, ImageProvider, Result, Symbol};
use std::future::Future;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Loads card pictures through `<img>` elements so the browser cache holds them before the board shows.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct HtmlImageProvider {
    url_template: String,
}

impl HtmlImageProvider {
    pub(crate) const ID_PLACEHOLDER: &'static str = "{id}";

    pub(crate) fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    pub(crate) fn url_for(&self, symbol: Symbol) -> String {
        self.url_template
            .replace(Self::ID_PLACEHOLDER, &symbol.to_string())
    }
}

impl ImageProvider for HtmlImageProvider {
    type Resource = HtmlImageElement;

    fn fetch_image(&self, symbol: Symbol) -> impl Future<Output = Result<HtmlImageElement>> {
        let url = self.url_for(symbol);
        async move {
            let image = HtmlImageElement::new().map_err(|err| preload_failure(symbol, &err))?;
            image.set_src(&url);
            JsFuture::from(image.decode())
                .await
                .map_err(|err| preload_failure(symbol, &err))?;
            log::trace!("loaded image {}", url);
            Ok(image)
        }
    }
}

fn preload_failure(symbol: Symbol, err: &JsValue) -> GameError {
    GameError::ImagePreloadFailure {
        symbol,
        reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}
