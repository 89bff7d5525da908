#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

pub struct ThemeDefinition {
    pub css: &'static str,
    pub toggle_label: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition {
            css: LIGHT_THEME,
            toggle_label: "Dark",
        },
        ThemeMode::Dark => ThemeDefinition {
            css: DARK_THEME,
            toggle_label: "Light",
        },
    }
}

/// Layout shared by both palettes.
pub const BASE_CSS: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg); color: var(--color-text); }
.page-header { display: flex; justify-content: flex-end; gap: 0.5rem; padding: 1rem; }
.chat-dock { position: fixed; right: 1rem; bottom: 1rem; display: flex; flex-direction: column; align-items: flex-end; gap: 0.6rem; width: min(95vw, 390px); max-height: 90vh; }
.chat-panel { display: flex; flex-direction: column; width: 100%; height: min(74vh, 600px); border: 1px solid var(--color-border); border-radius: 1rem; background: var(--color-surface); overflow: hidden; }
.chat-header { display: flex; justify-content: space-between; gap: 0.75rem; padding: 0.6rem 0.75rem; border-bottom: 1px solid var(--color-border); }
.chat-title { margin: 0; font-weight: 600; }
.chat-subtitle { margin: 0; font-size: 0.75rem; color: var(--color-text-muted); }
.chat-list { flex: 1; overflow-y: auto; padding: 0.75rem; display: flex; flex-direction: column; gap: 0.75rem; }
.quick-prompts { display: flex; flex-wrap: wrap; gap: 0.5rem; }
.message-row { display: flex; flex-direction: column; }
.message-row.user { align-items: flex-end; }
.message-row.assistant { align-items: flex-start; }
.bubble { max-width: 86%; border-radius: 1rem; padding: 0.5rem 0.75rem; font-size: 0.875rem; }
.bubble.user { background: var(--color-user-bg); color: var(--color-user-text); }
.bubble.assistant { background: var(--color-assistant-bg); color: var(--color-assistant-text); border: 1px solid var(--color-border); }
.message-content > * + * { margin-top: 0.5rem; }
.message-content p { margin: 0; line-height: 1.5; }
.message-content ul { margin: 0; padding-left: 1.25rem; }
.message-heading { font-weight: 600; }
.message-spacer { height: 0.25rem; }
.message-meta { font-size: 0.7rem; color: var(--color-text-muted); margin-top: 0.2rem; display: flex; gap: 0.5rem; }
.composer { display: flex; gap: 0.5rem; padding: 0.6rem; border-top: 1px solid var(--color-border); }
.composer input { flex: 1; height: 2.5rem; border-radius: 0.75rem; border: 1px solid var(--color-border); padding: 0 0.75rem; background: var(--color-input-bg); color: var(--color-text); }
.btn { border-radius: 0.75rem; border: 1px solid var(--color-border); background: transparent; color: inherit; padding: 0.4rem 0.8rem; cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: not-allowed; }
.btn-primary { background: var(--color-accent); color: #ffffff; border-color: var(--color-accent); }
.btn-pill { border-radius: 999px; font-size: 0.75rem; }
"#;

const LIGHT_THEME: &str = r#"
:root {
    --color-bg: #f8fafc;
    --color-surface: #ffffff;
    --color-text: #0f172a;
    --color-text-muted: #475569;
    --color-border: #d4d4d8;
    --color-input-bg: #ffffff;
    --color-accent: #0e7490;
    --color-user-bg: #0e7490;
    --color-user-text: #ffffff;
    --color-assistant-bg: #fafafa;
    --color-assistant-text: #1e293b;
}
.bubble.user a { color: #ffffff; text-decoration: underline; }
.bubble.assistant a { color: var(--color-accent); text-decoration: underline; }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg: #0b1120;
    --color-surface: #111827;
    --color-text: #f1f5f9;
    --color-text-muted: #cbd5e1;
    --color-border: #334155;
    --color-input-bg: #0f172a;
    --color-accent: #22d3ee;
    --color-user-bg: #0e7490;
    --color-user-text: #ffffff;
    --color-assistant-bg: #1e293b;
    --color-assistant-text: #f1f5f9;
}
.bubble.user a { color: #ffffff; text-decoration: underline; }
.bubble.assistant a { color: var(--color-accent); text-decoration: underline; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_swaps_palette() {
        let light = ThemeMode::default();
        assert_eq!(light.toggled(), ThemeMode::Dark);
        assert_eq!(light.toggled().toggled(), light);
        assert_ne!(
            theme_definition(ThemeMode::Light).css,
            theme_definition(ThemeMode::Dark).css
        );
    }
}
