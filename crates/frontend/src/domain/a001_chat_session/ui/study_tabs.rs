use contracts::enums::{QuestionKind, StudyTab};
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Short Note / Question / Reference Links selector.
///
/// The Question tab carries a dropdown of question formats; every format
/// selects the Question tab.
#[component]
pub fn StudyTabs(
    #[prop(into)] active: Signal<StudyTab>,
    on_select: Callback<StudyTab>,
) -> impl IntoView {
    let menu_open = RwSignal::new(false);
    let question_kind = RwSignal::new(Option::<QuestionKind>::None);

    let select = move |tab: StudyTab| {
        menu_open.set(false);
        if tab != StudyTab::Question {
            question_kind.set(None);
        }
        on_select.run(tab);
    };

    view! {
        <div class="study-tabs" role="tablist">
            {StudyTab::all()
                .into_iter()
                .map(|tab| {
                    let is_active = move || active.get() == tab;
                    let label = move || match (tab, question_kind.get()) {
                        (StudyTab::Question, Some(kind)) => kind.display_name().to_string(),
                        _ => tab.display_name().to_string(),
                    };
                    view! {
                        <div class="study-tabs__item">
                            <button
                                type="button"
                                role="tab"
                                class="study-tabs__tab"
                                class:study-tabs__tab--active=is_active
                                aria-selected=move || is_active().to_string()
                                on:click=move |_| {
                                    if tab == StudyTab::Question {
                                        menu_open.update(|open| *open = !*open);
                                        on_select.run(tab);
                                    } else {
                                        select(tab);
                                    }
                                }
                            >
                                {icon(tab.icon())}
                                <span>{label}</span>
                                {(tab == StudyTab::Question).then(|| icon("chevron-down"))}
                            </button>
                            {(tab == StudyTab::Question).then(|| view! {
                                <Show when=move || menu_open.get()>
                                    <ul class="dropdown" role="menu">
                                        {QuestionKind::all()
                                            .into_iter()
                                            .map(|kind| view! {
                                                <li>
                                                    <button
                                                        type="button"
                                                        class="dropdown__item"
                                                        role="menuitem"
                                                        on:click=move |_| {
                                                            question_kind.set(Some(kind));
                                                            select(StudyTab::Question);
                                                        }
                                                    >
                                                        {icon(kind.icon())}
                                                        <span>{kind.display_name()}</span>
                                                    </button>
                                                </li>
                                            })
                                            .collect_view()}
                                    </ul>
                                </Show>
                            })}
                        </div>
                    }
                })
                .collect_view()}
        </div>
    }
}
