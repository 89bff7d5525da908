use crate::theme::{BASE_CSS, ThemeMode, theme_definition};
use crate::types::Locale;
use crate::views::ChatWidget;
use dioxus::prelude::*;

#[component]
pub fn App() -> Element {
    let locale = use_signal(Locale::default);
    let theme = use_signal(ThemeMode::default);

    rsx! {
        ThemeStyles { theme }
        PageHeader { locale, theme }
        ChatWidget { locale }
    }
}

#[component]
fn ThemeStyles(theme: Signal<ThemeMode>) -> Element {
    let definition = theme_definition(theme());
    rsx! {
        style { dangerous_inner_html: BASE_CSS }
        style { dangerous_inner_html: "{definition.css}" }
    }
}

#[component]
fn PageHeader(locale: Signal<Locale>, theme: Signal<ThemeMode>) -> Element {
    let mut locale = locale;
    let mut theme = theme;
    let next_locale = locale().toggled();
    let locale_label = next_locale.as_str().to_uppercase();
    let theme_label = theme_definition(theme()).toggle_label;
    rsx! {
        div { class: "page-header",
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| locale.set(next_locale),
                "{locale_label}"
            }
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| theme.set(theme().toggled()),
                "{theme_label}"
            }
        }
    }
}
