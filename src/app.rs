use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::admin_panel::AdminPanel;
use crate::components::chrome::SiteChrome;
use crate::components::contact::DynamicContactLinks;
use crate::components::merchant_grid::MerchantGrid;

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/vetrina.css"/>
        <Title text="Vetrina - Verified Merchants"/>

        <Router>
            <SiteChrome>
                <DynamicContactLinks/>
                <Routes fallback=|| view! { "Page not found." }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/merchants") view=MerchantsPage/>
                    <Route path=path!("/admin") view=AdminPage/>
                </Routes>
            </SiteChrome>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <section class="hero">
            <h1>"Vetrina"</h1>
            <p>"Your directory of verified merchants."</p>
            <a href="/merchants" class="btn btn-gradient">"Browse Merchants"</a>
        </section>
        <section id="about" class="page-section" data-animate="">
            <h2>"About"</h2>
            <p>
                "Every merchant listed here has been checked by our team. Look for the "
                "verified badge before you buy."
            </p>
        </section>
        <section id="contact" class="page-section" data-animate="">
            <h2>"Contact"</h2>
            <p>"Questions? Reach us directly:"</p>
            <a href="mailto:hello@vetrina.example" class="btn btn-gradient dynamic-contact-link">
                "Chat with us"
            </a>
        </section>
    }
}

#[component]
fn MerchantsPage() -> impl IntoView {
    view! {
        <section class="page-section" data-animate="">
            <h2>"Verified Merchants"</h2>
            <MerchantGrid/>
        </section>
    }
}

#[component]
fn AdminPage() -> impl IntoView {
    view! {
        <Title text="Vetrina - Admin"/>
        <AdminPanel/>
    }
}
