use std::time::Duration;

use {
    super::ResizeControls,
    crate::{
        error::UploadError,
        session::{Event, Session},
        utils, validate,
    },
    gloo::{console::log, events::EventListener},
    wasm_bindgen::{JsCast as _, JsValue},
    web_sys::{
        FormData, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
        ProgressEvent, XmlHttpRequest,
    },
    yew::{html, Context, DragEvent, Html, NodeRef},
};

pub enum Msg {
    Picked,
    Dropped(DragEvent),
    DragOver(bool),
    Started,
    Progress { loaded: f64, total: f64 },
    Finished { status: u16, body: String },
    ConnectionLost,
    Reload,
}

#[derive(PartialEq, yew::Properties)]
pub struct Props {
    pub upload_url: String,
    #[prop_or_default]
    pub uploaded_name: Option<String>,
    #[prop_or_default]
    pub original_width: Option<u32>,
    #[prop_or_default]
    pub original_height: Option<u32>,
}

// The request plus the listeners keeping its callbacks alive. Dropping this
// drops the listeners, so it is kept until the request settles.
struct InFlight {
    started_at: f64,
    _request: XmlHttpRequest,
    _listeners: Vec<EventListener>,
}

pub struct UploadForm {
    session: Session,
    in_flight: Option<InFlight>,
    bar: f64,
    status: Option<String>,
    error: Option<String>,
    drag_over: bool,
    form_ref: NodeRef,
    input_ref: NodeRef,
}

impl yew::Component for UploadForm {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            session: Session::new(),
            in_flight: None,
            bar: 0.0,
            status: None,
            error: None,
            drag_over: false,
            form_ref: NodeRef::default(),
            input_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Picked => {
                self.picked(ctx);
                true
            }
            Msg::Dropped(event) => {
                event.prevent_default();
                self.drag_over = false;

                let Some(files) = event.data_transfer().and_then(|transfer| transfer.files())
                else {
                    return true;
                };
                if files.length() == 0 {
                    return true;
                }

                // Hand the dropped files to the input, then run the exact
                // same path as a regular selection.
                if let Some(input) = self.input_ref.cast::<HtmlInputElement>() {
                    input.set_files(Some(&files));
                }
                self.picked(ctx);
                true
            }
            Msg::DragOver(over) => {
                let changed = self.drag_over != over;
                self.drag_over = over;
                changed
            }
            Msg::Started => {
                let effect = self.session.apply(Event::Started);
                self.absorb(ctx, effect)
            }
            Msg::Progress { loaded, total } => {
                let elapsed = self
                    .in_flight
                    .as_ref()
                    .map(|in_flight| (js_sys::Date::now() - in_flight.started_at) / 1000.0)
                    .unwrap_or_default();

                let effect = self.session.apply(Event::Progress {
                    loaded,
                    total,
                    elapsed,
                });
                self.absorb(ctx, effect)
            }
            Msg::Finished { status, body } => {
                let effect = self.session.apply(Event::Finished {
                    status,
                    body: &body,
                });
                self.in_flight = None;
                self.absorb(ctx, effect)
            }
            Msg::ConnectionLost => {
                let effect = self.session.apply(Event::ConnectionLost);
                self.in_flight = None;
                self.absorb(ctx, effect)
            }
            Msg::Reload => {
                if gloo::utils::window().location().reload().is_err() {
                    log!("Could not reload the page");
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! { <form
            ref={self.form_ref.clone()}
            class="upload_view"
            action={ctx.props().upload_url.clone()}
            method="post"
            enctype="multipart/form-data">

            <label
                class={format!(
                    "upload_dropzone{}",
                    if self.drag_over { " drag_over" } else { "" }
                )}
                ondrop={ctx.link().callback(Msg::Dropped)}
                ondragover={ctx.link().callback(|event: DragEvent| {
                    event.prevent_default();
                    Msg::DragOver(true)
                })}
                ondragenter={ctx.link().callback(|event: DragEvent| {
                    event.prevent_default();
                    Msg::DragOver(true)
                })}
                ondragleave={ctx.link().callback(|_| Msg::DragOver(false))}>
                <input
                    ref={self.input_ref.clone()}
                    class="upload_input"
                    type="file"
                    name="file"
                    accept={validate::accept()}
                    disabled={self.session.active()}
                    onchange={ctx.link().callback(|_| Msg::Picked)}
                />
                <p>{ "Drop your file here or click to select" }</p>
            </label>

            { for ctx.props().uploaded_name.iter().map(|name| html! {
                <input type="hidden" name="uploaded_name" value={name.clone()} />
            }) }

            <ResizeControls
                original_width={ctx.props().original_width}
                original_height={ctx.props().original_height}
            />

            if self.status.is_some() {
                <div class="upload_progress">
                    <progress
                        class="upload_progress_bar"
                        max="100"
                        value={format!("{:.2}", self.bar)}>
                    </progress>
                    <p class="upload_status">{ self.status.clone().unwrap_or_default() }</p>
                </div>
            }

            <p class="upload_error">{ self.error.clone().unwrap_or_default() }</p>
        </form> }
    }
}

impl UploadForm {
    fn picked(&mut self, ctx: &Context<Self>) {
        let Some(input) = self.input_ref.cast::<HtmlInputElement>() else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        // One request at a time, a selection made mid-upload is dropped.
        // `in_flight` covers the gap between send() and the first loadstart.
        if self.session.active() || self.in_flight.is_some() {
            log!("Ignoring the new selection, an upload is already running");
            input.set_value("");
            return;
        }

        self.error = None;
        if let Err(why) = validate::check(&file.name(), file.size() as u64) {
            self.error = Some(why.to_string());
            input.set_value("");
            return;
        }

        match self.submit(ctx, &file) {
            Ok(in_flight) => self.in_flight = Some(in_flight),
            Err(why) => {
                log!(format!("Could not send the upload request: {why:?}"));
                self.error = Some(UploadError::Network.to_string());
            }
        }
    }

    fn submit(&self, ctx: &Context<Self>, file: &web_sys::File) -> Result<InFlight, JsValue> {
        let payload = self.payload(file)?;

        let request = XmlHttpRequest::new()?;
        request.open_with_async("POST", &ctx.props().upload_url, true)?;

        if let Some(token) = utils::cookie("csrftoken") {
            request.set_request_header("X-CSRFToken", &token)?;
        }

        let upload = request.upload()?;

        let link = ctx.link().clone();
        let on_start = EventListener::new(&upload, "loadstart", move |_| {
            link.send_message(Msg::Started)
        });

        let link = ctx.link().clone();
        let on_progress = EventListener::new(&upload, "progress", move |event| {
            let Some(event) = event.dyn_ref::<ProgressEvent>() else {
                return;
            };
            if event.length_computable() && event.total() > 0.0 {
                link.send_message(Msg::Progress {
                    loaded: event.loaded(),
                    total: event.total(),
                });
            }
        });

        let link = ctx.link().clone();
        let settled = request.clone();
        let on_load = EventListener::new(&request, "load", move |_| {
            let status = settled.status().unwrap_or(0);
            let body = settled.response_text().ok().flatten().unwrap_or_default();
            link.send_message(Msg::Finished { status, body });
        });

        let link = ctx.link().clone();
        let on_error = EventListener::new(&request, "error", move |_| {
            link.send_message(Msg::ConnectionLost)
        });

        request.send_with_opt_form_data(Some(&payload))?;

        Ok(InFlight {
            started_at: js_sys::Date::now(),
            _request: request,
            _listeners: vec![on_start, on_progress, on_load, on_error],
        })
    }

    // The payload is rebuilt by hand instead of posting the form natively:
    // the file must be the only file field, while every other named control
    // (hidden ones included) keeps its current value.
    fn payload(&self, file: &web_sys::File) -> Result<FormData, JsValue> {
        let payload = FormData::new()?;
        payload.append_with_blob("file", file)?;

        let Some(form) = self.form_ref.cast::<HtmlFormElement>() else {
            return Ok(payload);
        };

        let elements = form.elements();
        for index in 0..elements.length() {
            let Some(element) = elements.item(index) else {
                continue;
            };

            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                if input.name().is_empty() || input.type_() == "file" {
                    continue;
                }
                if matches!(input.type_().as_str(), "checkbox" | "radio") && !input.checked() {
                    continue;
                }
                payload.append_with_str(&input.name(), &input.value())?;
            } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                if !select.name().is_empty() {
                    payload.append_with_str(&select.name(), &select.value())?;
                }
            } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
                if !area.name().is_empty() {
                    payload.append_with_str(&area.name(), &area.value())?;
                }
            }
        }

        Ok(payload)
    }

    fn absorb(&mut self, ctx: &Context<Self>, effect: crate::session::Effect) -> bool {
        if let Some(bar) = effect.bar {
            self.bar = bar;
        }
        if effect.status.is_some() {
            self.status = effect.status;
        }
        if let Some(error) = effect.error {
            self.error = Some(error.to_string());
        }

        if effect.reload {
            utils::replace_history_entry();

            // Leave the success state on screen for a moment, the reload
            // brings up the server-rendered result.
            ctx.link().send_future(async {
                gloo_timers::future::sleep(Duration::from_secs(1)).await;
                Msg::Reload
            });
        }

        true
    }
}
