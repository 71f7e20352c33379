use std::time::Duration;

use leptos::prelude::*;

use crate::content::presenter::{ContentHit, SliderPayload};
use crate::content::slider::{SliderState, EMPTY_SLIDER_MESSAGE, EMPTY_SLIDER_TITLE};

#[server]
pub async fn get_slider() -> Result<SliderPayload, ServerFnError> {
    let state = crate::ssr_utils::app_state()?;
    Ok(crate::api::content::process_slider(
        state.content_store.as_ref(),
        state.presentation.slide_interval_secs,
    )
    .await)
}

/// Featured events, news and projects on the home page.
#[component]
pub fn HeroSlider() -> impl IntoView {
    let payload = Resource::new(|| (), |_| get_slider());

    view! {
        <section class="hero-slider">
            <Suspense fallback=|| view! { <div class="slider-loading">"Yükleniyor..."</div> }>
                {move || payload.get().map(|res| match res {
                    Ok(payload) => view! {
                        <SlideDeck slides=payload.slides interval_secs=payload.interval_secs />
                    }.into_any(),
                    Err(e) => {
                        leptos::logging::warn!("Slider content unavailable: {e}");
                        view! { <EmptySlider /> }.into_any()
                    }
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn EmptySlider() -> impl IntoView {
    view! {
        <div class="slider-empty">
            <h2>{EMPTY_SLIDER_TITLE}</h2>
            <p>{EMPTY_SLIDER_MESSAGE}</p>
        </div>
    }
}

/// Rotating deck over a fixed record set. A new record set mounts a new deck,
/// so the position starts over and the previous timer is dropped with it.
#[component]
fn SlideDeck(slides: Vec<ContentHit>, interval_secs: u64) -> impl IntoView {
    if slides.is_empty() {
        return view! { <EmptySlider /> }.into_any();
    }

    let len = slides.len();
    let state = RwSignal::new(SliderState::new(len));
    let slides = StoredValue::new(slides);

    Effect::new(move |_| {
        if !state.with_untracked(SliderState::timer_active) {
            return;
        }
        match set_interval_with_handle(
            move || state.update(|s| *s = s.tick()),
            Duration::from_secs(interval_secs.max(1)),
        ) {
            Ok(handle) => on_cleanup(move || handle.clear()),
            Err(e) => leptos::logging::warn!("Slider timer not started: {e:?}"),
        }
    });

    let current = move || {
        state
            .get()
            .index()
            .and_then(|i| slides.with_value(|s| s.get(i).cloned()))
    };

    view! {
        <div class="slider">
            {move || current().map(|hit| view! {
                <article class="slide">
                    {hit.record.image.clone().map(|src| view! {
                        <img src=src alt=hit.record.title.clone() />
                    })}
                    <div class="slide-caption">
                        <span class="slide-label">{hit.label.clone()}</span>
                        <h2>{hit.record.title.clone()}</h2>
                        <p>{hit.record.excerpt.clone()}</p>
                        <a class="slide-link" href=hit.link.clone()>"Detaylar"</a>
                    </div>
                </article>
            })}
            <Show when=move || { len > 1 }>
                <button class="slider-prev" aria-label="Önceki"
                    on:click=move |_| state.update(|s| *s = s.prev())>"‹"</button>
                <button class="slider-next" aria-label="Sonraki"
                    on:click=move |_| state.update(|s| *s = s.next())>"›"</button>
            </Show>
            <div class="slider-dots">
                {(0..len).map(|i| view! {
                    <button
                        class=move || if state.get().index() == Some(i) { "dot active" } else { "dot" }
                        aria-label=format!("Slayt {}", i + 1)
                        on:click=move |_| state.update(|s| *s = s.jump(i))
                    ></button>
                }).collect_view()}
            </div>
        </div>
    }
    .into_any()
}
