use {
    crate::ratio::{self, Adjustment, RatioLock},
    web_sys::HtmlInputElement,
    yew::{html, Context, Event, Html, NodeRef, TargetCast as _},
};

pub enum Msg {
    WidthEdited,
    HeightEdited,
    LockToggled(bool),
}

#[derive(PartialEq, yew::Properties)]
pub struct Props {
    #[prop_or_default]
    pub original_width: Option<u32>,
    #[prop_or_default]
    pub original_height: Option<u32>,
}

/// The two dimension fields plus the proportion lock. The inputs are left
/// uncontrolled; derived values are written straight to the elements, which
/// does not re-fire their input listeners, so an edit of one field can
/// never loop back through the other.
pub struct ResizeControls {
    lock: RatioLock,
    width_ref: NodeRef,
    height_ref: NodeRef,
}

enum Edited {
    Width,
    Height,
}

impl yew::Component for ResizeControls {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let lock = match (ctx.props().original_width, ctx.props().original_height) {
            (Some(width), Some(height)) => {
                RatioLock::from_original(width, height).unwrap_or_default()
            }
            _ => RatioLock::default(),
        };

        Self {
            lock,
            width_ref: NodeRef::default(),
            height_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::WidthEdited => self.edited(Edited::Width),
            Msg::HeightEdited => self.edited(Edited::Height),
            Msg::LockToggled(locked) => {
                self.lock.set_locked(locked);
                if locked {
                    self.reconcile();
                }
            }
        }
        false
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }

        // Pre-fill empty fields with the original dimensions
        let (Some(width), Some(height)) =
            (ctx.props().original_width, ctx.props().original_height)
        else {
            return;
        };

        for (node, value) in [(&self.width_ref, width), (&self.height_ref, height)] {
            if let Some(input) = node.cast::<HtmlInputElement>() {
                if input.value().is_empty() {
                    input.set_value(&value.to_string());
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! { <div class="resize_panel">
            <label class="resize_field">
                { "Width" }
                <input
                    ref={self.width_ref.clone()}
                    class="resize_input"
                    type="text"
                    inputmode="numeric"
                    name="width"
                    oninput={ctx.link().callback(|_| Msg::WidthEdited)}
                />
            </label>
            <label class="resize_field">
                { "Height" }
                <input
                    ref={self.height_ref.clone()}
                    class="resize_input"
                    type="text"
                    inputmode="numeric"
                    name="height"
                    oninput={ctx.link().callback(|_| Msg::HeightEdited)}
                />
            </label>
            <label class="resize_lock">
                <input
                    type="checkbox"
                    name="lock_aspect"
                    onchange={ctx.link().callback(|event: Event| {
                        let input: HtmlInputElement = event.target_unchecked_into();
                        Msg::LockToggled(input.checked())
                    })}
                />
                { "Keep original proportions" }
            </label>
        </div> }
    }
}

impl ResizeControls {
    fn edited(&self, edited: Edited) {
        let (source, target) = match edited {
            Edited::Width => (&self.width_ref, &self.height_ref),
            Edited::Height => (&self.height_ref, &self.width_ref),
        };
        let (Some(source), Some(target)) = (
            source.cast::<HtmlInputElement>(),
            target.cast::<HtmlInputElement>(),
        ) else {
            return;
        };

        let cleaned = ratio::sanitize(&source.value());
        if cleaned != source.value() {
            source.set_value(&cleaned);
        }

        if !self.lock.locked() || cleaned.is_empty() {
            return;
        }
        let Ok(value) = cleaned.parse::<u32>() else {
            return;
        };

        let derived = match edited {
            Edited::Width => self.lock.height_for(value),
            Edited::Height => self.lock.width_for(value),
        };
        target.set_value(&derived.to_string());
    }

    // Lock switched on with values already in the fields: width drives
    fn reconcile(&self) {
        let (Some(width_input), Some(height_input)) = (
            self.width_ref.cast::<HtmlInputElement>(),
            self.height_ref.cast::<HtmlInputElement>(),
        ) else {
            return;
        };

        let parse = |input: &HtmlInputElement| {
            input
                .value()
                .parse::<u32>()
                .ok()
                .filter(|value| *value != 0)
        };

        match self.lock.reconcile(parse(&width_input), parse(&height_input)) {
            Some(Adjustment::Height(height)) => height_input.set_value(&height.to_string()),
            Some(Adjustment::Width(width)) => width_input.set_value(&width.to_string()),
            None => {}
        }
    }
}
