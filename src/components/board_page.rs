use leptos::prelude::*;

use crate::db::models::BoardMember;

#[server]
pub async fn get_board() -> Result<Vec<BoardMember>, ServerFnError> {
    let state = crate::ssr_utils::app_state()?;
    state
        .board_repo
        .list()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// `/yonetim-kurulu`: board members in display order.
#[component]
pub fn BoardPage() -> impl IntoView {
    let members = Resource::new(|| (), |_| get_board());

    view! {
        <div class="board-page">
            <h1>"Yönetim Kurulu"</h1>
            <Suspense fallback=|| view! { <p>"Yükleniyor..."</p> }>
                {move || members.get().map(|res| match res {
                    Ok(members) => view! {
                        <div class="board-grid">
                            {members.into_iter().map(|member| view! {
                                <article class="board-card">
                                    {member.image.map(|src| view! { <img src=src alt=member.name.clone() loading="lazy" /> })}
                                    <h3>{member.name.clone()}</h3>
                                    <span class="board-position">{member.position}</span>
                                    <p>{member.bio}</p>
                                </article>
                            }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! { <p class="error">"Yönetim kurulu yüklenemedi: " {e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
