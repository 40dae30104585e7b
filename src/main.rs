use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use anyhow::Context;
        use axum::{
            body::Body as AxumBody,
            extract::State,
            http::Request,
            response::IntoResponse,
            routing::get,
            Router,
        };
        use dotenv::dotenv;
        use env_logger::Env;
        use blog_sitemap::app::*;
        use blog_sitemap::config::SitemapConfig;
        use blog_sitemap::state::AppState;
        use leptos::prelude::*;
        use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};

        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            dotenv().ok();
            env_logger::init_from_env(Env::default().default_filter_or("info"));

            let conf = get_configuration(None).context("reading leptos configuration")?;
            let addr = conf.leptos_options.site_addr;
            let leptos_options = conf.leptos_options;

            let config = SitemapConfig::from_env().context("reading SITEMAP_* configuration")?;
            log::info!(
                "serving sitemap for {} ({} labels max, {} posts per label)",
                config.feed.blog_url,
                config.feed.max_labels,
                config.feed.posts_per_label
            );

            // Generate the list of routes in your Leptos App
            let routes = generate_route_list(App);

            let app_state = AppState::new(leptos_options.clone(), config)
                .context("building feed client")?;

            async fn server_fn_handler(
                State(app_state): State<AppState>,
                request: Request<AxumBody>,
            ) -> impl IntoResponse {
                handle_server_fns_with_context(
                    move || {
                        provide_context(app_state.clone());
                    },
                    request,
                )
                .await
            }

            let app = Router::new()
                .route(
                    "/api/{*fn_name}",
                    get(server_fn_handler).post(server_fn_handler),
                )
                .leptos_routes_with_handler(routes, get(|State(app_state): State<AppState>, request: Request<AxumBody>| async move {
                    let handler = leptos_axum::render_app_to_stream_with_context(
                        move || {
                            provide_context(app_state.clone());
                        },
                        move || shell(leptos_options.clone())
                    );
                    handler(request).await.into_response()
                }))
                .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
                .with_state(app_state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("binding {addr}"))?;
            log::info!("listening on http://{}", &addr);
            axum::serve(listener, app.into_make_service()).await?;
            Ok(())
        }
    } else {
        pub fn main() {
            // no client-side main function
            // see lib.rs for hydration and mountSitemap instead
        }
    }
}
