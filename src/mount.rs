use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("sitemap container #{0} not found in the page")]
    MissingContainer(String),
    #[error("invalid sitemap options: {0}")]
    InvalidOptions(String),
    #[error("page has no document")]
    NoDocument,
}

/// Element ids the host page provides for an embedded widget.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContainerIds {
    pub grid_id: String,
    pub nav_id: String,
    /// Without one, pagination renders under the grid.
    #[serde(default)]
    pub pagination_id: Option<String>,
}

#[derive(Debug)]
pub struct Containers<E> {
    pub grid: E,
    pub nav: E,
    pub pagination: Option<E>,
}

impl ContainerIds {
    /// Looks every id up with `find`. A pagination id that was given but not
    /// found is as much an error as a missing grid.
    pub fn resolve<E>(&self, find: impl Fn(&str) -> Option<E>) -> Result<Containers<E>, WidgetError> {
        let require = |id: &str| find(id).ok_or_else(|| WidgetError::MissingContainer(id.to_string()));

        let grid = require(&self.grid_id)?;
        let nav = require(&self.nav_id)?;
        let pagination = self.pagination_id.as_deref().map(require).transpose()?;

        Ok(Containers { grid, nav, pagination })
    }
}

cfg_if! {
    if #[cfg(feature = "hydrate")] {
        use leptos::prelude::*;
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        use crate::components::label_nav::LabelNav;
        use crate::components::pagination::PaginationControls;
        use crate::components::sitemap::SitemapGrid;
        use crate::config::WidgetSettings;
        use crate::controller::SitemapController;

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct MountOptions {
            #[serde(flatten)]
            containers: ContainerIds,
            /// Origin serving the `/api` server functions, when it is not
            /// the page's own.
            #[serde(default)]
            server_url: Option<String>,
            #[serde(default)]
            settings: WidgetSettings,
        }

        /// JS-facing handle on a mounted widget.
        #[wasm_bindgen]
        pub struct SitemapHandle {
            controller: SitemapController,
            _owner: Owner,
        }

        #[wasm_bindgen]
        impl SitemapHandle {
            pub fn initialize(&self) {
                self.controller.initialize();
            }

            pub fn refresh(&self) {
                self.controller.refresh();
            }

            #[wasm_bindgen(js_name = loadLabel)]
            pub fn load_label(&self, label: String) {
                self.controller.load_label(label);
            }

            #[wasm_bindgen(js_name = loadAll)]
            pub fn load_all(&self) {
                self.controller.load_all();
            }

            #[wasm_bindgen(js_name = goToPage)]
            pub fn go_to_page(&self, page: usize) {
                self.controller.go_to_page(page);
            }

            pub fn retry(&self) {
                self.controller.retry();
            }
        }

        fn report(error: WidgetError) -> JsValue {
            let message = error.to_string();
            web_sys::console::error_1(&message.clone().into());
            JsValue::from_str(&message)
        }

        /// Mounts the widget into containers that already exist on the page
        /// and starts loading.
        #[wasm_bindgen(js_name = mountSitemap)]
        pub fn mount_sitemap(options: JsValue) -> Result<SitemapHandle, JsValue> {
            console_error_panic_hook::set_once();
            let _ = leptos::task::Executor::init_wasm_bindgen();

            let options: MountOptions = serde_wasm_bindgen::from_value(options)
                .map_err(|e| report(WidgetError::InvalidOptions(e.to_string())))?;

            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| report(WidgetError::NoDocument))?;
            let containers = options
                .containers
                .resolve(|id| {
                    document
                        .get_element_by_id(id)
                        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                })
                .map_err(report)?;

            if let Some(url) = options.server_url {
                leptos::server_fn::client::set_server_url(Box::leak(url.into_boxed_str()));
            }

            let owner = Owner::new();
            let controller = owner.with(|| {
                let controller = SitemapController::new(options.settings);

                leptos::mount::mount_to(containers.nav, move || view! { <LabelNav controller=controller/> })
                    .forget();
                match containers.pagination {
                    Some(pagination) => {
                        leptos::mount::mount_to(containers.grid, move || {
                            view! { <SitemapGrid controller=controller/> }
                        })
                        .forget();
                        leptos::mount::mount_to(pagination, move || {
                            view! { <PaginationControls controller=controller/> }
                        })
                        .forget();
                    }
                    None => {
                        leptos::mount::mount_to(containers.grid, move || {
                            view! {
                                <SitemapGrid controller=controller/>
                                <PaginationControls controller=controller/>
                            }
                        })
                        .forget();
                    }
                }
                controller
            });

            controller.initialize();
            Ok(SitemapHandle { controller, _owner: owner })
        }
    }
}
