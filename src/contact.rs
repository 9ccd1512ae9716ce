use crate::constants::*;
use crate::core::constants::FORM_RESET_DELAY_MS;
use crate::core::contact::outcome_for_status;
use crate::core::{ContactError, ContactForm, Field, SubmitStatus, SubmitTicket};
use crate::dom;
use crate::handles::{Listener, Timeout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Contact section: mirrors the form inputs into a [`ContactForm`] and
/// drives the submit round-trip.
pub struct Contact {
    form: ContactForm,
    endpoint: String,
    element: web::HtmlFormElement,
    reset: Option<Timeout>,
}

pub type SharedContact = Rc<RefCell<Contact>>;

impl Contact {
    pub fn teardown(&mut self) {
        self.form.detach();
        self.reset = None;
    }

    /// Pull the inputs' current values into the model.
    fn read_inputs(&mut self) {
        let element = &self.element;
        self.form.sync_fields(|field| {
            let el = input_for(element, field)?;
            if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
                Some(input.value())
            } else {
                el.dyn_ref::<web::HtmlTextAreaElement>().map(|a| a.value())
            }
        });
    }

    fn render(&self) {
        let submitting = self.form.is_submitting();
        if let Ok(Some(btn)) = self.element.query_selector(CONTACT_SUBMIT_SELECTOR) {
            if let Some(btn) = btn.dyn_ref::<web::HtmlButtonElement>() {
                btn.set_disabled(submitting);
            }
        }
        _ = self
            .element
            .set_attribute("aria-busy", if submitting { "true" } else { "false" });

        let Some(doc) = dom::window_document() else {
            return;
        };
        if let Some(status) = doc.get_element_by_id(CONTACT_STATUS_ID) {
            let msg = self.form.status_message();
            status.set_text_content(msg);
            dom::set_class(&status, CLASS_HIDDEN, msg.is_none());
            dom::set_class(
                &status,
                CLASS_SUCCESS,
                self.form.status() == SubmitStatus::Success,
            );
            dom::set_class(
                &status,
                CLASS_ERROR,
                self.form.status() == SubmitStatus::Error,
            );
        }
    }

    /// Push the model's field values back into the inputs.
    fn write_inputs(&self) {
        for field in Field::ALL {
            let Some(el) = self.input(field) else {
                continue;
            };
            let value = self.form.fields().get(field);
            if let Some(input) = el.dyn_ref::<web::HtmlInputElement>() {
                input.set_value(value);
            } else if let Some(area) = el.dyn_ref::<web::HtmlTextAreaElement>() {
                area.set_value(value);
            }
        }
    }

    fn input(&self, field: Field) -> Option<web::Element> {
        input_for(&self.element, field)
    }
}

fn input_for(form: &web::HtmlFormElement, field: Field) -> Option<web::Element> {
    form.query_selector(&format!("[name=\"{}\"]", field.name()))
        .ok()
        .flatten()
}

pub fn mount(document: &web::Document, endpoint: String) -> Option<(SharedContact, Vec<Listener>)> {
    let element = document
        .get_element_by_id(CONTACT_FORM_ID)?
        .dyn_into::<web::HtmlFormElement>()
        .ok()?;
    let contact = Rc::new(RefCell::new(Contact {
        form: ContactForm::new(),
        endpoint,
        element: element.clone(),
        reset: None,
    }));
    {
        let mut c = contact.borrow_mut();
        c.read_inputs();
        c.render();
    }

    let mut listeners = Vec::new();

    let c_input = contact.clone();
    match Listener::new(&element, "input", move |ev| on_input(&c_input, ev)) {
        Ok(l) => listeners.push(l),
        Err(e) => log::warn!("[contact] {:?}", e),
    }

    let c_submit = contact.clone();
    match Listener::new(&element, "submit", move |ev| {
        ev.prevent_default();
        submit(&c_submit);
    }) {
        Ok(l) => listeners.push(l),
        Err(e) => log::warn!("[contact] {:?}", e),
    }

    Some((contact, listeners))
}

fn on_input(contact: &SharedContact, ev: web::Event) {
    let Some(target) = ev.target() else {
        return;
    };
    let (name, value) = if let Some(input) = target.dyn_ref::<web::HtmlInputElement>() {
        (input.name(), input.value())
    } else if let Some(area) = target.dyn_ref::<web::HtmlTextAreaElement>() {
        (area.name(), area.value())
    } else {
        return;
    };
    if let Some(field) = Field::from_name(&name) {
        contact.borrow_mut().form.set_field(field, value);
    }
}

fn submit(contact: &SharedContact) {
    let started = {
        let mut c = contact.borrow_mut();
        if !c.form.is_submitting() {
            c.read_inputs();
        }
        c.form.begin_submit()
    };
    let (ticket, body) = match started {
        Ok(v) => v,
        Err(ContactError::AlreadySubmitting | ContactError::Detached) => return,
        Err(e) => {
            log::warn!("[contact] not submitted: {}", e);
            _ = contact.borrow().element.report_validity();
            return;
        }
    };
    let endpoint = {
        let mut c = contact.borrow_mut();
        // A pending reset belongs to the previous submission
        c.reset = None;
        c.render();
        c.endpoint.clone()
    };
    log::info!("[contact] submitting to {}", endpoint);

    let contact = contact.clone();
    spawn_local(async move {
        let outcome = post_json(&endpoint, &body).await;
        let schedule_reset = {
            let mut c = contact.borrow_mut();
            if c.form.is_detached() {
                log::debug!("[contact] response arrived after unmount");
                return;
            }
            let reset = c.form.finish(ticket, outcome);
            c.render();
            reset
        };
        if schedule_reset {
            log::info!("[contact] message delivered");
            schedule_form_reset(&contact, ticket);
        }
    });
}

fn schedule_form_reset(contact: &SharedContact, ticket: SubmitTicket) {
    let c_reset = contact.clone();
    match Timeout::schedule(FORM_RESET_DELAY_MS, move || {
        let mut c = c_reset.borrow_mut();
        if !c.form.is_detached() && c.form.reset_after_success(ticket) {
            c.write_inputs();
            c.render();
        }
        c.reset = None;
    }) {
        Ok(t) => contact.borrow_mut().reset = Some(t),
        Err(e) => log::warn!("[contact] reset timer: {:?}", e),
    }
}

async fn post_json(endpoint: &str, body: &str) -> Result<(), ContactError> {
    let net = |e: JsValue| ContactError::Network(format!("{:?}", e));
    let window = web::window().ok_or_else(|| ContactError::Network("no window".into()))?;

    let opts = web::RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(web::RequestMode::SameOrigin);
    opts.set_body(&JsValue::from_str(body));
    let request = web::Request::new_with_str_and_init(endpoint, &opts).map_err(net)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(net)?;

    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(net)?;
    let resp: web::Response = resp.dyn_into().map_err(net)?;
    outcome_for_status(resp.status())
}
