use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::path;

use crate::components::board_page::BoardPage;
use crate::components::content_pages::{listing_title, CollectionPage, ContentDetailPage};
use crate::components::hero_slider::HeroSlider;
use crate::components::publications_page::PublicationsPage;
use crate::components::search_bar::SearchBar;
use crate::components::search_page::SearchPage;
use crate::content::record::ContentType;

/// HTML document wrapping the app during server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="tr">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
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
        <Stylesheet id="leptos" href="/pkg/spolder.css"/>
        <Title text="SPOLDER - Spor Politikaları Derneği"/>

        <Router>
            <header class="top-nav">
                <a class="logo" href="/">"SPOLDER"</a>
                <nav>
                    {ContentType::ALL.into_iter().map(|ct| view! {
                        <a href=ct.listing_path()>{listing_title(ct)}</a>
                    }).collect_view()}
                    <a href="/yonetim-kurulu">"Yönetim Kurulu"</a>
                </nav>
                <SearchBar />
            </header>
            <main>
                <Routes fallback=|| view! { <h1>"Sayfa bulunamadı."</h1> }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/search") view=SearchPage/>
                    <Route path=path!("/haberler") view=|| view! { <CollectionPage content_type=ContentType::News /> }/>
                    <Route path=path!("/etkinlikler") view=|| view! { <CollectionPage content_type=ContentType::Event /> }/>
                    <Route path=path!("/projeler") view=|| view! { <CollectionPage content_type=ContentType::Project /> }/>
                    <Route path=path!("/blog") view=|| view! { <CollectionPage content_type=ContentType::Blog /> }/>
                    <Route path=path!("/yayinlar") view=PublicationsPage/>
                    <Route path=path!("/yonetim-kurulu") view=BoardPage/>
                    <Route path=path!("/haber/:id") view=|| view! { <ContentDetailPage content_type=ContentType::News /> }/>
                    <Route path=path!("/etkinlik/:id") view=|| view! { <ContentDetailPage content_type=ContentType::Event /> }/>
                    <Route path=path!("/proje/:id") view=|| view! { <ContentDetailPage content_type=ContentType::Project /> }/>
                    <Route path=path!("/blog/:id") view=|| view! { <ContentDetailPage content_type=ContentType::Blog /> }/>
                    <Route path=path!("/yayin/:id") view=|| view! { <ContentDetailPage content_type=ContentType::Publication /> }/>
                </Routes>
            </main>
            <footer class="site-footer">
                <p>"© SPOLDER - Spor Politikaları Derneği"</p>
            </footer>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <HeroSlider />
        <section class="intro">
            <h1>"Spor Politikaları Derneği"</h1>
            <p>"Spor politikaları alanında araştırma, eğitim ve savunuculuk çalışmaları."</p>
        </section>
    }
}
