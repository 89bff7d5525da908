use crate::types::Locale;

/// Fixed strings of the assistant widget for one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct ChatCopy {
    pub open_label: &'static str,
    pub close_label: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub clear_label: &'static str,
    pub intro_message: &'static str,
    pub placeholder: &'static str,
    pub send_label: &'static str,
    pub loading_label: &'static str,
    pub missing_key_message: &'static str,
    pub error_message: &'static str,
    pub copy_label: &'static str,
    pub quick_prompts: [&'static str; 3],
}

static CHAT_COPY_ES: ChatCopy = ChatCopy {
    open_label: "Abrir asistente",
    close_label: "Cerrar asistente",
    title: "Asistente IA",
    subtitle: "Te guio por este portfolio y respondo consultas.",
    clear_label: "Reiniciar chat",
    intro_message: "Hola, soy tu asistente. Puedo ayudarte a recorrer la pagina, explicar experiencia, proyectos y datos de contacto.",
    placeholder: "Escribe tu consulta...",
    send_label: "Enviar",
    loading_label: "Pensando...",
    missing_key_message: "Falta configurar el agente. Agrega `GEMINI_API_KEY`, `OPEN_ROUTER_API_KEY` o `GROQ_API_KEY` en tu entorno para activar respuestas IA.",
    error_message: "No pude responder en este momento. Intenta de nuevo en unos segundos.",
    copy_label: "Copiar",
    quick_prompts: [
        "Mostrame los proyectos mas relevantes",
        "Como puedo contactarte rapido?",
        "Que experiencia tenes en Python y Data Engineering?",
    ],
};

static CHAT_COPY_EN: ChatCopy = ChatCopy {
    open_label: "Open assistant",
    close_label: "Close assistant",
    title: "AI Assistant",
    subtitle: "I can guide you through this portfolio and answer questions.",
    clear_label: "Restart chat",
    intro_message: "Hi, I'm your assistant. I can walk you through the page and explain experience, projects and contact details.",
    placeholder: "Type your question...",
    send_label: "Send",
    loading_label: "Thinking...",
    missing_key_message: "The assistant is not configured yet. Add `GEMINI_API_KEY`, `OPEN_ROUTER_API_KEY` or `GROQ_API_KEY` to your environment to enable AI replies.",
    error_message: "I couldn't answer right now. Please try again in a few seconds.",
    copy_label: "Copy",
    quick_prompts: [
        "Show me the most relevant projects",
        "How can I reach you quickly?",
        "What experience do you have with Python and Data Engineering?",
    ],
};

pub fn chat_copy(locale: Locale) -> &'static ChatCopy {
    match locale {
        Locale::Es => &CHAT_COPY_ES,
        Locale::En => &CHAT_COPY_EN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locales_have_distinct_copy() {
        let es = chat_copy(Locale::Es);
        let en = chat_copy(Locale::En);
        assert_ne!(es.intro_message, en.intro_message);
        assert_ne!(es.error_message, es.missing_key_message);
        assert_ne!(en.error_message, en.missing_key_message);
        assert_eq!(es.copy_label, "Copiar");
        assert_eq!(en.copy_label, "Copy");
    }
}
