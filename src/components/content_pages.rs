use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::components::content_card::{display_date, ContentCard};
use crate::content::presenter::{ContentDetail, ContentHit};
use crate::content::record::ContentType;

#[server]
pub async fn get_content_detail(
    content_type: ContentType,
    id: String,
) -> Result<ContentDetail, ServerFnError> {
    let state = crate::ssr_utils::app_state()?;
    crate::api::content::process_detail(state.content_store.as_ref(), content_type, &id)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[server]
pub async fn get_collection(content_type: ContentType) -> Result<Vec<ContentHit>, ServerFnError> {
    let state = crate::ssr_utils::app_state()?;
    Ok(crate::api::content::process_collection(state.content_store.as_ref(), content_type, None).await)
}

/// Heading of a listing page, also used in the main navigation.
pub fn listing_title(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::News => "Haberler",
        ContentType::Event => "Etkinlikler",
        ContentType::Project => "Projeler",
        ContentType::Blog => "Blog",
        ContentType::Publication => "Yayınlar",
    }
}

/// Listing page of one content type, newest first.
#[component]
pub fn CollectionPage(content_type: ContentType) -> impl IntoView {
    let items = Resource::new(move || content_type, get_collection);

    view! {
        <div class="collection-page">
            <h1>{listing_title(content_type)}</h1>
            <Suspense fallback=|| view! { <p>"Yükleniyor..."</p> }>
                {move || items.get().map(|res| match res {
                    Ok(hits) if hits.is_empty() => view! {
                        <p class="collection-empty">"Henüz yayınlanmış içerik yok."</p>
                    }.into_any(),
                    Ok(hits) => view! {
                        <div class="content-grid">
                            {hits.into_iter().map(|hit| view! { <ContentCard hit=hit /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"İçerik yüklenemedi: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

/// Detail page of a single published record, addressed by the `:id` route param.
#[component]
pub fn ContentDetailPage(content_type: ContentType) -> impl IntoView {
    let params = use_params_map();
    let id = Memo::new(move |_| params.get().get("id").unwrap_or_default());
    let detail = Resource::new(
        move || (content_type, id.get()),
        |(content_type, id)| get_content_detail(content_type, id),
    );

    view! {
        <Suspense fallback=|| view! { <p>"Yükleniyor..."</p> }>
            {move || detail.get().map(|res| match res {
                Ok(detail) => {
                    let date = display_date(&detail.hit);
                    let ContentDetail { hit, body_html } = detail;
                    view! {
                        <article class="content-detail">
                            <a class="back-link" href=content_type.listing_path()>
                                "← " {listing_title(content_type)}
                            </a>
                            <span class="content-card-label">{hit.label}</span>
                            <h1>{hit.record.title}</h1>
                            <div class="content-detail-meta">
                                <time>{date}</time>
                                {(!hit.record.author.is_empty()).then(|| view! {
                                    <span>{hit.record.author.clone()}</span>
                                })}
                            </div>
                            {hit.record.image.map(|src| view! { <img class="content-detail-image" src=src alt="" /> })}
                            <div class="prose" inner_html=body_html></div>
                        </article>
                    }.into_any()
                }
                Err(_) => view! {
                    <div class="content-missing">
                        <h1>"İçerik bulunamadı"</h1>
                        <a href=content_type.listing_path()>{listing_title(content_type)} " sayfasına dön"</a>
                    </div>
                }.into_any(),
            })}
        </Suspense>
    }
}
