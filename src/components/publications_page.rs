use leptos::prelude::*;

use crate::components::content_card::display_date;
use crate::content::presenter::PublicationEntry;

/// Filter tabs of the publications page: label and type value.
const TABS: [(&str, Option<&str>); 4] = [
    ("Tümü", None),
    ("Raporlar", Some("Rapor")),
    ("Araştırmalar", Some("Araştırma")),
    ("Politika Belgeleri", Some("Politika Belgesi")),
];

#[server]
pub async fn get_publications(kind: Option<String>) -> Result<Vec<PublicationEntry>, ServerFnError> {
    let state = crate::ssr_utils::app_state()?;
    Ok(crate::content::presenter::publications(state.content_store.as_ref(), kind.as_deref()).await)
}

/// `/yayinlar`: reports, studies and policy papers.
#[component]
pub fn PublicationsPage() -> impl IntoView {
    let kind = RwSignal::new(None::<&'static str>);
    let entries = Resource::new(
        move || kind.get(),
        |kind| get_publications(kind.map(String::from)),
    );

    view! {
        <div class="publications-page">
            <h1>"Yayınlar"</h1>
            <p class="page-lead">"Derneğimizin hazırladığı raporlar, araştırmalar ve politika belgeleri."</p>
            <div class="filter-tabs">
                {TABS.into_iter().map(|(label, value)| view! {
                    <button
                        class="filter-tab"
                        class:active=move || kind.get() == value
                        on:click=move |_| kind.set(value)
                    >
                        {label}
                    </button>
                }).collect_view()}
            </div>
            <Suspense fallback=|| view! { <p>"Yükleniyor..."</p> }>
                {move || entries.get().map(|res| match res {
                    Ok(entries) if entries.is_empty() => view! {
                        <p class="collection-empty">"Bu türde yayın bulunmuyor."</p>
                    }.into_any(),
                    Ok(entries) => view! {
                        <div class="publication-grid">
                            {entries.into_iter().map(|entry| view! { <PublicationCard entry=entry /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"Yayınlar yüklenemedi: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn PublicationCard(entry: PublicationEntry) -> impl IntoView {
    let year = display_date(&entry.hit);
    let PublicationEntry {
        hit,
        kind,
        pages,
        download_url,
        ..
    } = entry;

    view! {
        <article class="publication-card">
            <div class="publication-card-meta">
                <span class="publication-type">{kind}</span>
                <time>{year}</time>
            </div>
            <h3><a href=hit.link.clone()>{hit.record.title}</a></h3>
            <p>{hit.record.excerpt}</p>
            <div class="publication-card-footer">
                {pages.map(|pages| view! { <span>{pages} " sayfa"</span> })}
                <a class="button-outline" href=hit.link>"İncele"</a>
                {download_url.map(|url| view! {
                    <a class="button" href=url download="">"İndir"</a>
                })}
            </div>
        </article>
    }
}
