//! 詳細モーダル（オーバーレイ・×・Escapeで閉じる）

use leptos::prelude::*;
use opportunity_common::Opportunity;

fn detail_row(label: &'static str, value: String) -> impl IntoView {
    (!value.is_empty()).then(|| {
        view! {
            <div class="detail-row">
                <dt>{label}</dt>
                <dd>{value}</dd>
            </div>
        }
    })
}

#[component]
pub fn OpportunityModal<FC>(opportunity: Opportunity, on_close: FC) -> impl IntoView
where
    FC: Fn(()) + Copy + 'static,
{
    let date = if opportunity.date_time.is_empty() {
        opportunity.date.clone()
    } else {
        opportunity.date_time.clone()
    };
    let contact = opportunity.contact.clone();

    view! {
        <div class="modal-overlay" on:click=move |_| on_close(())>
            <div class="modal" on:click=|ev| ev.stop_propagation()>
                <button class="modal-close" aria-label="Close" on:click=move |_| on_close(())>
                    "×"
                </button>
                <h2>{opportunity.name.clone()}</h2>
                <p class="organization">{opportunity.organization.clone()}</p>

                <dl class="details">
                    {detail_row("Location", opportunity.location.clone())}
                    {detail_row("Date", date)}
                    {detail_row("Type", opportunity.opportunity_type.clone())}
                    {detail_row("Age Groups", opportunity.age_groups.join(", "))}
                    {detail_row("Industry", opportunity.tags.join(", "))}
                    {detail_row("Remote / In-person", opportunity.remote_type.clone())}
                    {detail_row("Recurring", opportunity.recurrence_text.clone())}
                </dl>

                <p class="description">{opportunity.description.clone()}</p>

                {(!contact.is_empty()).then(|| {
                    let href = format!("mailto:{}", contact);
                    view! {
                        <p class="contact">
                            "Contact: " <a href=href>{contact.clone()}</a>
                        </p>
                    }
                })}
            </div>
        </div>
    }
}
