use leptos::prelude::*;

use crate::content::presenter::ContentHit;
use crate::content::record::ContentType;

/// Display form of a publication date, e.g. `12.12.2024`. Publications
/// only carry a year.
pub fn display_date(hit: &ContentHit) -> String {
    let format = match hit.record.content_type {
        ContentType::Publication => "%Y",
        _ => "%d.%m.%Y",
    };
    hit.record.published_at.format(format).to_string()
}

#[component]
pub fn ContentCard(hit: ContentHit) -> impl IntoView {
    let date = display_date(&hit);
    let ContentHit {
        record,
        link,
        label,
    } = hit;

    view! {
        <article class="content-card">
            {record.image.map(|src| view! { <img src=src alt="" loading="lazy" /> })}
            <div class="content-card-body">
                <div class="content-card-meta">
                    <span class="content-card-label">{label}</span>
                    {(!record.category.is_empty()).then(|| view! {
                        <span class="content-card-category">{record.category.clone()}</span>
                    })}
                    <time>{date}</time>
                </div>
                <h3><a href=link.clone()>{record.title}</a></h3>
                <p>{record.excerpt}</p>
                {(!record.author.is_empty()).then(|| view! {
                    <span class="content-card-author">{record.author.clone()}</span>
                })}
            </div>
        </article>
    }
}
