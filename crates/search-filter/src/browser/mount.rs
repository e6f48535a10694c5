//! WASM entry point: mounting the dropdown on the page.

use super::dom::DomView;
use super::events::{key_from_event, Listener};
use super::ready::ReadyState;
use search_filter_core::{DropdownFilter, Event, FilterError, Markup};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, window, EventTarget, KeyboardEvent};

type SharedFilter = Rc<RefCell<DropdownFilter<DomView>>>;

/// Handle to a dropdown mounted on the page.
///
/// A handle from a page without the dropdown root is inert: every method is
/// a no-op and the getters report a closed, empty dropdown.
#[wasm_bindgen]
#[derive(Debug)]
pub struct HeaderSearchFilter {
    filter: Option<SharedFilter>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl HeaderSearchFilter {
    /// Mount on the page using the default markup contract.
    pub fn mount() -> Result<HeaderSearchFilter, JsValue> {
        Self::mount_markup(&Markup::default())
    }

    /// Mount using a JSON markup configuration.
    #[wasm_bindgen(js_name = mountWith)]
    pub fn mount_with(json: &str) -> Result<HeaderSearchFilter, JsValue> {
        let markup = Markup::from_json(json).map_err(report)?;
        Self::mount_markup(&markup)
    }

    /// Whether the dropdown was found and is still listening.
    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.filter.is_some()
    }

    /// Whether the list is shown.
    #[wasm_bindgen(getter, js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.read(DropdownFilter::is_open).unwrap_or(false)
    }

    /// Index of the selected option.
    #[wasm_bindgen(getter, js_name = selectedIndex)]
    pub fn selected_index(&self) -> Option<u32> {
        self.read(|f| u32::try_from(f.selected_index()).ok()).flatten()
    }

    /// Value of the selected option.
    #[wasm_bindgen(getter, js_name = selectedValue)]
    pub fn selected_value(&self) -> Option<String> {
        self.read(|f| f.selected_option().map(|o| o.value.clone())).flatten()
    }

    /// State snapshot as JSON.
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsValue> {
        let state = self.read(|f| *f.state()).unwrap_or_default();
        serde_json::to_string(&state).map_err(|e| js_error(&format!("JSON error: {e}")))
    }

    /// Show the list and focus the selected option.
    pub fn open(&self) {
        self.write(DropdownFilter::open);
    }

    /// Hide the list.
    pub fn close(&self) {
        self.write(DropdownFilter::close);
    }

    /// Open if closed, close if open.
    pub fn toggle(&self) {
        self.write(DropdownFilter::toggle);
    }

    /// Select the option at `index`.
    #[wasm_bindgen(js_name = selectOption)]
    pub fn select_option(&self, index: u32) -> Result<(), JsValue> {
        let index = usize::try_from(index).map_err(|e| js_error(&e.to_string()))?;
        match self.write(|f| f.select_option(index)) {
            Some(result) => result.map_err(report),
            None if self.filter.is_some() => Err(js_error("search filter busy")),
            None => Ok(()),
        }
    }

    /// Remove every listener. The markup keeps its last rendered state.
    pub fn dispose(&mut self) {
        self.listeners.clear();
        if self.filter.take().is_some() {
            debug!("search filter disposed");
        }
    }
}

impl HeaderSearchFilter {
    fn inert() -> Self {
        Self {
            filter: None,
            listeners: Vec::new(),
        }
    }

    fn mount_markup(markup: &Markup) -> Result<Self, JsValue> {
        let document = window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        if ReadyState::parse(&document.ready_state()).is_loading() {
            console::warn_1(&JsValue::from_str(
                "search filter: mounting while the document is still loading",
            ));
        }

        let Some(view) = DomView::query(&document, markup).map_err(report)? else {
            debug!(root = %markup.root, "no search filter on this page");
            return Ok(Self::inert());
        };

        let filter = DropdownFilter::attach_with(view, markup);
        for err in filter.skipped() {
            console::warn_1(&JsValue::from_str(&format!("search filter: skipping {err}")));
        }

        let trigger: EventTarget = filter.view().trigger().clone().into();
        let listbox: EventTarget = filter.view().listbox().clone().into();
        let options: Vec<EventTarget> = filter
            .view()
            .options()
            .iter()
            .map(|option| option.clone().into())
            .collect();
        let shared: SharedFilter = Rc::new(RefCell::new(filter));

        let mut listeners = Vec::with_capacity(options.len() + 4);

        let f = Rc::clone(&shared);
        listeners.push(Listener::attach(&trigger, "click", move |e| {
            if dispatch(&f, &Event::TriggerClick) {
                e.prevent_default();
            }
        })?);

        for (slot, option) in options.iter().enumerate() {
            let f = Rc::clone(&shared);
            listeners.push(Listener::attach(option, "click", move |_| {
                dispatch(&f, &Event::OptionClick { slot });
            })?);
        }

        let f = Rc::clone(&shared);
        listeners.push(Listener::attach(&document, "click", move |e| {
            let inside = f
                .try_borrow()
                .map_or(true, |filter| filter.view().contains(e.target().as_ref()));
            dispatch(&f, &Event::DocumentClick { inside });
        })?);

        for target in [&trigger, &listbox] {
            let f = Rc::clone(&shared);
            listeners.push(Listener::attach(target, "keydown", move |e| {
                let Some(keyboard) = e.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let key = key_from_event(keyboard);
                let focused_slot = f
                    .try_borrow()
                    .ok()
                    .and_then(|filter| filter.view().focused_slot());
                if dispatch(&f, &Event::KeyDown { key, focused_slot }) {
                    e.prevent_default();
                }
            })?);
        }

        debug!(listeners = listeners.len(), "search filter mounted");
        Ok(Self {
            filter: Some(shared),
            listeners,
        })
    }

    fn read<T>(&self, f: impl FnOnce(&DropdownFilter<DomView>) -> T) -> Option<T> {
        let filter = self.filter.as_ref()?.try_borrow().ok()?;
        Some(f(&filter))
    }

    fn write<T>(&self, f: impl FnOnce(&mut DropdownFilter<DomView>) -> T) -> Option<T> {
        let mut filter = self.filter.as_ref()?.try_borrow_mut().ok()?;
        Some(f(&mut filter))
    }
}

/// Route an event to the dropdown. Returns whether to prevent the default.
fn dispatch(filter: &SharedFilter, event: &Event) -> bool {
    filter
        .try_borrow_mut()
        .is_ok_and(|mut filter| filter.handle_event(event))
}

fn report(err: FilterError) -> JsValue {
    let msg = err.to_string();
    console::error_1(&JsValue::from_str(&format!("search filter: {msg}")));
    js_error(&msg)
}

fn js_error(msg: &str) -> JsValue {
    js_sys::Error::new(msg).into()
}

/// Module start: install the panic hook and, with `auto-mount`, mount once
/// the document is parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "auto-mount")]
    auto_mount();
}

#[cfg(feature = "auto-mount")]
fn auto_mount() {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };
    if ReadyState::parse(&document.ready_state()).is_loading() {
        let on_ready = Closure::once(mount_for_page);
        if document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
            .is_ok()
        {
            on_ready.forget();
        }
    } else {
        mount_for_page();
    }
}

#[cfg(feature = "auto-mount")]
fn mount_for_page() {
    // Errors were already reported to the console.
    if let Ok(handle) = HeaderSearchFilter::mount() {
        std::mem::forget(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKUP: &str = r#"<div class="custom-select">
        <button type="button" class="custom-select__btn"><span class="custom-select__text">All</span></button>
        <ul class="custom-select__listbox">
          <li class="custom-select__option" data-value="all"><span>All</span></li>
          <li class="custom-select__option" data-value="docs"><span>Docs</span></li>
        </ul>
        <input type="hidden" id="category-filter-input" value="all">
      </div>"#;

    fn mounted() -> HeaderSearchFilter {
        let body = window().unwrap().document().unwrap().body().unwrap();
        body.set_inner_html(MARKUP);
        HeaderSearchFilter::mount().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_select_option_while_dispatching_is_an_error() {
        let mut handle = mounted();
        let shared = Rc::clone(handle.filter.as_ref().unwrap());
        {
            let _dispatching = shared.borrow_mut();
            assert!(handle.select_option(1).is_err());
        }
        assert_eq!(handle.selected_index(), Some(0));
        assert!(handle.select_option(1).is_ok());
        assert_eq!(handle.selected_index(), Some(1));
        handle.dispose();
    }

    #[wasm_bindgen_test]
    fn test_inert_select_option_is_ok() {
        assert!(HeaderSearchFilter::inert().select_option(3).is_ok());
    }
}
