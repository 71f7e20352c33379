use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::content_card::ContentCard;
use crate::content::presenter::SearchOutcome;

#[server]
pub async fn search_content(query: String) -> Result<SearchOutcome, ServerFnError> {
    use crate::content::aggregator::Aggregator;

    let state = crate::ssr_utils::app_state()?;
    let aggregator = Aggregator::new(state.content_store.as_ref());
    Ok(crate::content::presenter::search(&aggregator, &query).await)
}

/// `/search?q=` results page.
#[component]
pub fn SearchPage() -> impl IntoView {
    let query_map = use_query_map();
    let query = Memo::new(move |_| query_map.get().get("q").unwrap_or_default());
    let outcome = Resource::new(move || query.get(), search_content);

    view! {
        <div class="search-page">
            <h1>"Arama Sonuçları"</h1>
            <Suspense fallback=|| view! { <p>"Aranıyor..."</p> }>
                {move || outcome.get().map(|res| match res {
                    Ok(SearchOutcome::NoQuery) => view! {
                        <p class="search-hint">"Aramak için yukarıdaki arama kutusunu kullanın."</p>
                    }.into_any(),
                    Ok(SearchOutcome::Results { query, hits }) if hits.is_empty() => view! {
                        <div class="search-empty">
                            <h2>"Sonuç Bulunamadı"</h2>
                            <p>"\"" {query} "\" için sonuç bulunamadı."</p>
                        </div>
                    }.into_any(),
                    Ok(SearchOutcome::Results { query, hits }) => view! {
                        <p class="search-summary">
                            "\"" {query} "\" için " {hits.len()} " sonuç bulundu"
                        </p>
                        <div class="content-grid">
                            {hits.into_iter().map(|hit| view! { <ContentCard hit=hit /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"Arama başarısız: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
