use {
    crate::{
        config::DownloadRow,
        countdown::{self, Countdown},
    },
    gloo_timers::callback::Interval,
    yew::{function_component, html, Context, Html},
};

#[derive(PartialEq, yew::Properties)]
pub struct ListProps {
    pub rows: Vec<DownloadRow>,
}

#[function_component]
pub fn ExpiryList(props: &ListProps) -> Html {
    if props.rows.is_empty() {
        return html! {};
    }

    html! { <div class="download_list">{
        for props.rows.iter().map(|row| html! { <ExpiryRow row={row.clone()} /> })
    }</div> }
}

pub enum Msg {
    Tick,
}

#[derive(PartialEq, yew::Properties)]
pub struct RowProps {
    pub row: DownloadRow,
}

/// One download link and its lifetime. The row owns both the timer text and
/// the action control it disables, so the two can't get mismatched.
pub struct ExpiryRow {
    countdown: Countdown,
    ticker: Option<Interval>,
}

impl yew::Component for ExpiryRow {
    type Message = Msg;
    type Properties = RowProps;

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        Self {
            countdown: Countdown::new(countdown::minutes_or_default(ctx.props().row.minutes)),
            ticker: Some(Interval::new(1_000, move || link.send_message(Msg::Tick))),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Tick => {
                self.countdown.tick();
                if self.countdown.expired() {
                    // Dropping the interval stops the ticking for good
                    self.ticker = None;
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let row = &ctx.props().row;

        html! { <div class="download_row">
            <span class="download_name">{ &row.name }</span>
            <span class="expiry_time">{ self.countdown.label() }</span>
            {
                if self.countdown.expired() {
                    html! { <a class="download_button disabled" href="#">{ "Expired" }</a> }
                } else {
                    html! { <a class="download_button" href={row.url.clone()}>{ "Download" }</a> }
                }
            }
        </div> }
    }
}
