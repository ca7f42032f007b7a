//! Page element helpers

use web_sys::{Document, Element};

fn document() -> Result<Document, String> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "No document".to_string())
}

fn element(id: &str) -> Result<Element, String> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| format!("Missing element #{id}"))
}

pub fn set_text(id: &str, text: &str) -> Result<(), String> {
    element(id)?.set_text_content(Some(text));
    Ok(())
}

pub fn set_visible(id: &str, visible: bool) -> Result<(), String> {
    let el = element(id)?;
    if visible {
        el.remove_attribute("hidden")
            .map_err(|e| format!("Failed to show #{id}: {:?}", e))
    } else {
        el.set_attribute("hidden", "")
            .map_err(|e| format!("Failed to hide #{id}: {:?}", e))
    }
}

pub fn set_attribute(id: &str, name: &str, value: &str) -> Result<(), String> {
    element(id)?
        .set_attribute(name, value)
        .map_err(|e| format!("Failed to set {name} on #{id}: {:?}", e))
}

pub fn set_style(id: &str, style: &str) -> Result<(), String> {
    set_attribute(id, "style", style)
}
