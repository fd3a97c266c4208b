use yew::{function_component, html, Html};

mod component;
pub mod config;
pub mod countdown;
pub mod error;
pub mod ratio;
pub mod session;
pub mod utils;
pub mod validate;

use {
    component::{ExpiryList, UploadForm},
    config::PageConfig,
};

#[function_component]
pub fn App(config: &PageConfig) -> Html {
    html! {
        <div id="global">
            <div id="content">
                <UploadForm
                    upload_url={config.upload_url.clone()}
                    uploaded_name={config.uploaded_name.clone()}
                    original_width={config.original_width}
                    original_height={config.original_height}
                />
                <ExpiryList rows={config.downloads.clone()} />
            </div>
        </div>
    }
}

pub fn run() {
    // Refreshing right after a post would resubmit the form without this
    utils::replace_history_entry();

    let document = gloo::utils::document();
    let root = document.get_element_by_id("app");
    let config = PageConfig::read(root.as_ref());

    match root {
        Some(root) => {
            yew::Renderer::<App>::with_root_and_props(root, config).render();
        }
        None => {
            yew::Renderer::<App>::with_props(config).render();
        }
    }
}
