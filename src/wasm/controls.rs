use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement, Window};

use super::js_err;
use super::storage::LocalStore;
use crate::color::{Channel, CHANNEL_MAX, CHANNEL_MIN, CHANNEL_STEP};
use crate::error::{Error, Result};
use crate::presets::{self, KeyValueStore, PresetError, PresetLibrary};
use crate::session::Session;

/// Channel sliders plus the preset save/browse panel.
struct ControlSurface {
    window: Window,
    document: Document,
    session: Rc<RefCell<Session>>,
    presets: RefCell<PresetLibrary<Box<dyn KeyValueStore>>>,
    sliders: Vec<(Channel, HtmlInputElement)>,
    list: HtmlElement,
    open: Cell<bool>,
}

fn on(target: &Element, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<()> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(js_err)?
        .dyn_into::<T>()
        .map_err(|_| Error::Js(format!("<{tag}> has an unexpected type")))
}

impl ControlSurface {
    /// Pushes the session's channel values into the sliders.
    fn sync_sliders(&self) {
        let colors = self.session.borrow().colors();
        for (channel, slider) in &self.sliders {
            slider.set_value_as_number(colors.get(*channel));
        }
    }

    fn save(&self) {
        let name = match self.window.prompt_with_message("Preset name") {
            Ok(Some(name)) => name,
            Ok(None) => return,
            Err(err) => {
                log::warn!("prompt failed: {err:?}");
                return;
            }
        };
        let result = self
            .session
            .borrow()
            .save_preset(&mut *self.presets.borrow_mut(), &name);
        match result {
            Ok(()) => {
                if self.open.get() {
                    self.refresh_list();
                }
            }
            Err(PresetError::EmptyName) => {}
            Err(err) => log::warn!("could not save preset: {err}"),
        }
    }

    fn load(&self, name: &str) {
        let result = self
            .session
            .borrow_mut()
            .load_preset(&*self.presets.borrow(), name);
        match result {
            Ok(_) => self.sync_sliders(),
            Err(err) => {
                log::warn!("could not load preset: {err}");
                self.refresh_list();
            }
        }
    }

    fn delete(&self, name: &str) {
        if let Err(err) = self.presets.borrow_mut().delete(name) {
            log::warn!("could not delete preset: {err}");
        }
        self.refresh_list();
    }

    /// Opening twice or closing twice is a no-op.
    fn set_open(&self, open: bool) {
        if self.open.get() == open {
            return;
        }
        self.open.set(open);
        if open {
            self.refresh_list();
        }
        self.list.set_hidden(!open);
    }

    fn refresh_list(&self) {
        self.list.set_inner_html("");
        let names = match self.presets.borrow().names() {
            Ok(names) => names,
            Err(err) => {
                log::warn!("could not list presets: {err}");
                return;
            }
        };
        for name in names {
            if let Err(err) = self.append_entry(&name) {
                log::warn!("could not show preset '{name}': {err}");
            }
        }
    }

    fn append_entry(&self, name: &str) -> Result<()> {
        let item: Element = create(&self.document, "li")?;
        let load: Element = create(&self.document, "button")?;
        load.set_text_content(Some(name));
        load.set_attribute("data-action", "load").map_err(js_err)?;
        load.set_attribute("data-preset", name).map_err(js_err)?;
        let delete: Element = create(&self.document, "button")?;
        delete.set_text_content(Some("\u{d7}"));
        delete.set_attribute("data-action", "delete").map_err(js_err)?;
        delete.set_attribute("data-preset", name).map_err(js_err)?;
        item.append_child(&load).map_err(js_err)?;
        item.append_child(&delete).map_err(js_err)?;
        self.list.append_child(&item).map_err(js_err)?;
        Ok(())
    }

    /// One delegated click handler for every entry in the list.
    fn on_list_click(&self, event: &Event) {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let (Some(action), Some(name)) = (
            target.get_attribute("data-action"),
            target.get_attribute("data-preset"),
        ) else {
            return;
        };
        match action.as_str() {
            "load" => self.load(&name),
            "delete" => self.delete(&name),
            _ => {}
        }
    }
}

fn slider(document: &Document, channel: Channel, value: f64) -> Result<HtmlInputElement> {
    let input: HtmlInputElement = create(document, "input")?;
    input.set_type("range");
    input.set_id(&format!("slider-{}", channel.name()));
    input.set_min(&CHANNEL_MIN.to_string());
    input.set_max(&CHANNEL_MAX.to_string());
    input.set_step(&CHANNEL_STEP.to_string());
    input.set_value_as_number(value);
    Ok(input)
}

/// Builds the widgets into `#controls` (created under `<body>` when the page
/// has none) and binds them to the session.
pub fn build(window: &Window, document: &Document, session: Rc<RefCell<Session>>) -> Result<()> {
    let container: Element = match document.get_element_by_id("controls") {
        Some(existing) => existing,
        None => {
            let body = document
                .body()
                .ok_or_else(|| Error::MissingElement("<body>".into()))?;
            let div: Element = create(document, "div")?;
            div.set_id("controls");
            body.append_child(&div).map_err(js_err)?;
            div
        }
    };

    let colors = session.borrow().colors();
    let mut sliders = Vec::new();
    for channel in Channel::ALL {
        let label: Element = create(document, "label")?;
        label.set_text_content(Some(channel.name()));
        let input = slider(document, channel, colors.get(channel))?;
        label.append_child(&input).map_err(js_err)?;
        container.append_child(&label).map_err(js_err)?;
        sliders.push((channel, input));
    }

    let save: Element = create(document, "button")?;
    save.set_text_content(Some("save"));
    let browse: Element = create(document, "button")?;
    browse.set_text_content(Some("presets"));
    let list: HtmlElement = create(document, "ul")?;
    list.set_class_name("preset-list");
    list.set_hidden(true);
    container.append_child(&save).map_err(js_err)?;
    container.append_child(&browse).map_err(js_err)?;
    container.append_child(&list).map_err(js_err)?;

    let presets = PresetLibrary::new(presets::store_or_memory(LocalStore::open(window)));
    let surface = Rc::new(ControlSurface {
        window: window.clone(),
        document: document.clone(),
        session,
        presets: RefCell::new(presets),
        sliders,
        list,
        open: Cell::new(false),
    });

    for (channel, input) in &surface.sliders {
        let channel = *channel;
        let session = surface.session.clone();
        let source = input.clone();
        on(input, "input", move |_| {
            let value = source.value_as_number();
            if value.is_finite() {
                session.borrow_mut().set_channel(channel, value);
            }
        })?;
    }

    let handler = surface.clone();
    on(&save, "click", move |_| handler.save())?;

    let handler = surface.clone();
    on(&browse, "click", move |_| handler.set_open(!handler.open.get()))?;

    let handler = surface.clone();
    on(&surface.list, "click", move |event| handler.on_list_click(&event))?;

    log::info!("control surface ready");
    Ok(())
}
