//! Host-page adapter — reads the vacancy/resume identifiers the hosting
//! document exposes as input elements.

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use screening_core::ports::HostPagePort;
use screening_types::{Result, WidgetError};

pub struct DomHostPage {
    document: Document,
}

impl DomHostPage {
    pub fn new() -> Result<Self> {
        let document = web_sys::window()
            .ok_or_else(|| WidgetError::Host("No window object".to_string()))?
            .document()
            .ok_or_else(|| WidgetError::Host("No document object".to_string()))?;
        Ok(Self { document })
    }
}

impl HostPagePort for DomHostPage {
    fn read_value(&self, element_id: &str) -> Option<String> {
        let element = match self.document.get_element_by_id(element_id) {
            Some(el) => el,
            None => {
                log::warn!("Element with id '{}' not found on the page", element_id);
                return None;
            }
        };

        // Input elements carry the id in `value`; anything else falls back
        // to a `value` attribute.
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else {
            element.get_attribute("value")
        }
    }
}
