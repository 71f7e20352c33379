use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::content::presenter::ContentHit;
use crate::content::sequence::RequestSequencer;

/// Header autocomplete: news and blog matches for the typed text.
#[server]
pub async fn suggest_content(query: String) -> Result<Vec<ContentHit>, ServerFnError> {
    use crate::content::aggregator::Aggregator;
    use crate::content::presenter::suggest;

    let state = crate::ssr_utils::app_state()?;
    let aggregator = Aggregator::new(state.content_store.as_ref());
    Ok(suggest(&aggregator, &query, state.presentation.suggestion_limit).await)
}

/// Path of the search page for `query`.
pub fn search_path(query: &str) -> String {
    format!("/search?q={}", urlencoding::encode(query.trim()))
}

#[component]
pub fn SearchBar() -> impl IntoView {
    let query = RwSignal::new(String::new());
    let suggestions = RwSignal::new(Vec::<ContentHit>::new());
    let open = RwSignal::new(false);
    let sequencer = StoredValue::new(RequestSequencer::new());
    let navigate = use_navigate();

    let on_input = move |ev| {
        let value = event_target_value(&ev);
        query.set(value.clone());

        // Every keystroke supersedes the responses still in flight.
        let ticket = sequencer.with_value(RequestSequencer::issue);
        if value.trim().is_empty() {
            suggestions.set(Vec::new());
            open.set(false);
            return;
        }

        leptos::task::spawn_local(async move {
            let result = suggest_content(value).await;
            if !sequencer.with_value(|s| s.is_current(&ticket)) {
                return;
            }
            match result {
                Ok(hits) => suggestions.set(hits),
                Err(e) => {
                    leptos::logging::warn!("Suggestion request failed: {e}");
                    suggestions.set(Vec::new());
                }
            }
            open.set(true);
        });
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let q = query.get_untracked();
        if q.trim().is_empty() {
            return;
        }
        open.set(false);
        navigate(&search_path(&q), Default::default());
    };

    view! {
        <div class="search-container">
            <form role="search" on:submit=on_submit>
                <input
                    type="search"
                    placeholder="Haber ve blog yazılarında ara..."
                    on:input=on_input
                    on:focus=move |_| open.set(!query.get_untracked().trim().is_empty())
                    prop:value=query
                />
            </form>
            <Show when=move || open.get()>
                <div class="search-results">
                    {move || {
                        let hits = suggestions.get();
                        if hits.is_empty() {
                            view! { <p class="search-empty">"Sonuç bulunamadı"</p> }.into_any()
                        } else {
                            view! {
                                <ul>
                                    {hits.into_iter().map(|hit| view! {
                                        <li>
                                            <a href=hit.link.clone() on:click=move |_| open.set(false)>
                                                <span class="search-label">{hit.label.clone()}</span>
                                                <strong>{hit.record.title.clone()}</strong>
                                                <p>{hit.record.excerpt.clone()}</p>
                                            </a>
                                        </li>
                                    }).collect_view()}
                                </ul>
                                <a class="search-all" href=move || search_path(&query.get())>
                                    "Tüm sonuçları gör"
                                </a>
                            }.into_any()
                        }
                    }}
                </div>
            </Show>
        </div>
    }
}
